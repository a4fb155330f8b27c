use anyhow::Context;
use clap::{Parser, Subcommand};
use fs_err as fs;
use lgrfix_types::repertoire::{CodePointEntry, RepertoireDocument};
use std::path::{Path, PathBuf};
use std::process::Command as ProcessCommand;

#[derive(Debug, Parser)]
#[command(name = "xtask", about = "Workspace helper tasks")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print schema identifiers used by lgrfix.
    PrintSchemas,
    /// Create tests/fixtures/<name>/repertoire.json with a single placeholder entry.
    InitFixture {
        name: String,
        #[arg(long, default_value = "tests/fixtures")]
        dir: PathBuf,
    },
    /// Bless golden fixtures (overwrite expected outputs).
    BlessFixtures,
    /// Check that every fixture input parses and carries the repertoire schema.
    Validate {
        #[arg(long, default_value = "tests/fixtures")]
        dir: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::PrintSchemas => {
            println!("{}", lgrfix_types::schema::LGRFIX_REPERTOIRE_V1);
            println!("{}", lgrfix_types::schema::LGRFIX_REPORT_V1);
            println!("{}", lgrfix_types::schema::LGRFIX_CHECK_V1);
        }
        Command::InitFixture { name, dir } => {
            let path = init_fixture(&dir, &name)?;
            println!("initialized {}", path.display());
        }
        Command::BlessFixtures => {
            let status = ProcessCommand::new("cargo")
                .args(["test", "-p", "lgrfix-domain", "--test", "golden_fixtures"])
                .env("LGRFIX_BLESS", "1")
                .status()
                .context("run golden fixture blessing")?;
            if !status.success() {
                anyhow::bail!("bless-fixtures failed");
            }
        }
        Command::Validate { dir } => {
            let checked = validate_fixtures(&dir)?;
            println!("{checked} fixture inputs valid");
        }
    }
    Ok(())
}

fn init_fixture(dir: &Path, name: &str) -> anyhow::Result<PathBuf> {
    let fixture = dir.join(name);
    let path = fixture.join("repertoire.json");
    if path.exists() {
        anyhow::bail!("{} already exists", path.display());
    }
    fs::create_dir_all(&fixture).with_context(|| format!("create {}", fixture.display()))?;

    let doc = RepertoireDocument::new(vec![CodePointEntry::new('a'.into())]);
    let mut json = serde_json::to_string_pretty(&doc).context("serialize fixture")?;
    json.push('\n');
    fs::write(&path, json)?;
    Ok(path)
}

fn validate_fixtures(dir: &Path) -> anyhow::Result<usize> {
    let mut names: Vec<_> = fs::read_dir(dir)?
        .filter_map(Result::ok)
        .map(|e| e.path())
        .filter(|p| p.is_dir())
        .collect();
    names.sort();

    for fixture in &names {
        let path = fixture.join("repertoire.json");
        let text = fs::read_to_string(&path)?;
        let doc: RepertoireDocument = serde_json::from_str(&text)
            .with_context(|| format!("parse {}", path.display()))?;
        if doc.schema != lgrfix_types::schema::LGRFIX_REPERTOIRE_V1 {
            anyhow::bail!("{}: unexpected schema '{}'", path.display(), doc.schema);
        }
    }
    Ok(names.len())
}
