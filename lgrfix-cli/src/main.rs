mod config;

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use chrono::Utc;
use clap::{Parser, Subcommand};
use config::ConfigMerger;
use fs_err as fs;
use lgrfix_domain::{
    AuditLog, ClosureConfig, ClosureEngine, Repertoire, builtin_checks, run_checks,
};
use lgrfix_render::{render_check_text, render_report_md};
use lgrfix_types::check::CheckReport;
use lgrfix_types::closure::ClosureStrategy;
use lgrfix_types::repertoire::RepertoireDocument;
use lgrfix_types::report::{ClosureReport, ReportArtifacts, RunInfo, ToolInfo};
use sha2::{Digest, Sha256};
use std::process::ExitCode;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

/// Exit code when the relation is not closed.
const EXIT_NOT_CLOSED: u8 = 2;

#[derive(Debug, Parser)]
#[command(
    name = "lgrfix",
    version,
    about = "Check and close the variant relation of an LGR repertoire."
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Add missing code points and variants until the relation is symmetric and transitive.
    Populate(PopulateArgs),
    /// Report existence, symmetry and transitivity violations without changing anything.
    Check(CheckArgs),
}

#[derive(Debug, Parser)]
struct PopulateArgs {
    /// Repertoire file (lgrfix.repertoire.v1 JSON).
    #[arg(long)]
    input: Utf8PathBuf,

    /// Output directory (default: <input dir>/lgrfix).
    #[arg(long)]
    out_dir: Option<Utf8PathBuf>,

    /// How the fixed-point loop picks entries to re-scan.
    #[arg(long, value_enum)]
    strategy: Option<StrategyArg>,

    /// Fail if the relation is still open after this many iterations.
    #[arg(long)]
    max_iterations: Option<u64>,

    /// Config file (default: lgrfix.toml next to the input, if present).
    #[arg(long)]
    config: Option<Utf8PathBuf>,
}

#[derive(Debug, Parser)]
struct CheckArgs {
    /// Repertoire file (lgrfix.repertoire.v1 JSON).
    #[arg(long)]
    input: Utf8PathBuf,

    /// Output format (text, json).
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum StrategyArg {
    #[value(name = "full_rescan", alias = "full-rescan")]
    FullRescan,
    Worklist,
}

impl From<StrategyArg> for ClosureStrategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::FullRescan => ClosureStrategy::FullRescan,
            StrategyArg::Worklist => ClosureStrategy::Worklist,
        }
    }
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> ExitCode {
    match real_main() {
        Ok(code) => code,
        Err(e) => {
            error!("{:?}", e);
            ExitCode::from(1)
        }
    }
}

fn real_main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Populate(args) => cmd_populate(args),
        Command::Check(args) => cmd_check(args),
    }
}

fn cmd_populate(args: PopulateArgs) -> anyhow::Result<ExitCode> {
    let input_dir = parent_dir(&args.input);
    let out_dir = args.out_dir.unwrap_or_else(|| input_dir.join("lgrfix"));

    // Load config file and merge with CLI arguments
    let file_config =
        config::resolve(args.config.as_deref(), &input_dir).context("load lgrfix.toml config")?;
    let merged = ConfigMerger::new(file_config)
        .merge_populate_args(args.strategy.map(Into::into), args.max_iterations);

    debug!(
        "merged config: strategy={}, max_iterations={:?}, pretty={}, markdown={}",
        merged.strategy.as_str(),
        merged.max_iterations,
        merged.pretty,
        merged.markdown
    );

    let started_at = Utc::now();
    let (doc, input_bytes) = read_repertoire(&args.input)?;
    let mut rep = Repertoire::from_document(doc)
        .with_context(|| format!("load repertoire {}", args.input))?;

    let engine = ClosureEngine::new(ClosureConfig {
        strategy: merged.strategy,
        max_iterations: merged.max_iterations,
    });
    let mut audit = AuditLog::new();
    let summary = engine
        .populate(&mut rep, &mut audit)
        .context("close variant relation")?;
    let checks = run_checks(&builtin_checks(), &rep).context("run checks")?;

    fs::create_dir_all(&out_dir).with_context(|| format!("create {}", out_dir))?;

    let out_path = out_dir.join("repertoire.json");
    let out_bytes = to_json(&rep.into_document(), merged.pretty)?;
    fs::write(&out_path, &out_bytes).with_context(|| format!("write {}", out_path))?;

    let mut report = ClosureReport::new(tool_info(), merged.strategy);
    report.run = RunInfo {
        started_at: Some(started_at),
        ended_at: Some(Utc::now()),
    };
    report.artifacts = ReportArtifacts {
        input: args.input.to_string(),
        input_sha256: Some(sha256_hex(&input_bytes)),
        output: Some(out_path.to_string()),
        output_sha256: Some(sha256_hex(&out_bytes)),
    };
    report.summary = summary;
    report.checks = checks;
    report.events = audit.into_events();

    let report_path = out_dir.join("report.json");
    let report_bytes = to_json(&report, merged.pretty)?;
    fs::write(&report_path, report_bytes).with_context(|| format!("write {}", report_path))?;
    if merged.markdown {
        let md_path = out_dir.join("report.md");
        fs::write(&md_path, render_report_md(&report))
            .with_context(|| format!("write {}", md_path))?;
    }

    info!(
        "wrote closed repertoire to {} ({} code points, {} variants added)",
        out_dir, report.summary.code_points_added, report.summary.variants_added
    );

    if report.closed() {
        Ok(ExitCode::SUCCESS)
    } else {
        error!("variant relation is still not closed after populate");
        Ok(ExitCode::from(EXIT_NOT_CLOSED))
    }
}

fn cmd_check(args: CheckArgs) -> anyhow::Result<ExitCode> {
    let (doc, _) = read_repertoire(&args.input)?;
    let rep = Repertoire::from_document(doc)
        .with_context(|| format!("load repertoire {}", args.input))?;

    let checks = run_checks(&builtin_checks(), &rep).context("run checks")?;
    let report = CheckReport::new(tool_info(), checks);

    match args.format {
        OutputFormat::Text => print!("{}", render_check_text(&report)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }

    if report.passed() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(EXIT_NOT_CLOSED))
    }
}

/// Read and parse a repertoire, keeping the raw bytes for digesting.
fn read_repertoire(path: &Utf8Path) -> anyhow::Result<(RepertoireDocument, Vec<u8>)> {
    let bytes = fs::read(path).with_context(|| format!("read {}", path))?;
    let doc: RepertoireDocument =
        serde_json::from_slice(&bytes).with_context(|| format!("parse {}", path))?;
    if doc.schema != lgrfix_types::schema::LGRFIX_REPERTOIRE_V1 {
        anyhow::bail!(
            "{}: unsupported schema '{}', expected '{}'",
            path,
            doc.schema,
            lgrfix_types::schema::LGRFIX_REPERTOIRE_V1
        );
    }
    Ok((doc, bytes))
}

fn parent_dir(path: &Utf8Path) -> Utf8PathBuf {
    match path.parent() {
        Some(p) if !p.as_str().is_empty() => p.to_path_buf(),
        _ => Utf8PathBuf::from("."),
    }
}

fn to_json<T: serde::Serialize>(v: &T, pretty: bool) -> anyhow::Result<Vec<u8>> {
    let mut bytes = if pretty {
        serde_json::to_vec_pretty(v)
    } else {
        serde_json::to_vec(v)
    }
    .context("serialize json")?;
    bytes.push(b'\n');
    Ok(bytes)
}

fn sha256_hex(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

fn tool_info() -> ToolInfo {
    ToolInfo {
        name: "lgrfix".to_string(),
        version: Some(env!("CARGO_PKG_VERSION").to_string()),
    }
}
