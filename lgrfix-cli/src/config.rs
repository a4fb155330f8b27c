//! Configuration file loading for lgrfix.
//!
//! Discovers and loads `lgrfix.toml` from the directory holding the input
//! repertoire, or from an explicit `--config` path.
//! Merges config file settings with CLI arguments (CLI takes precedence).

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use lgrfix_types::closure::ClosureStrategy;
use serde::Deserialize;
use tracing::debug;

/// The config file name to search for.
pub const CONFIG_FILE_NAME: &str = "lgrfix.toml";

/// Top-level configuration from lgrfix.toml.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LgrfixConfig {
    pub closure: ClosureSection,
    pub output: OutputSection,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ClosureSection {
    /// `full_rescan` or `worklist`.
    pub strategy: Option<ClosureStrategy>,

    /// Abort the fixed-point loop after this many iterations.
    pub max_iterations: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputSection {
    /// Pretty-print JSON artifacts.
    pub pretty: bool,

    /// Also write `report.md`.
    pub markdown: bool,
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            pretty: true,
            markdown: true,
        }
    }
}

/// Look for `lgrfix.toml` in `dir`.
pub fn discover_config(dir: &Utf8Path) -> Option<Utf8PathBuf> {
    let config_path = dir.join(CONFIG_FILE_NAME);
    if config_path.exists() {
        debug!("found config file at {}", config_path);
        Some(config_path)
    } else {
        debug!("no config file found at {}", config_path);
        None
    }
}

pub fn load_config(path: &Utf8Path) -> anyhow::Result<LgrfixConfig> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read config file {}", path))?;
    parse_config(&contents).with_context(|| format!("parse config file {}", path))
}

pub fn parse_config(contents: &str) -> anyhow::Result<LgrfixConfig> {
    let config: LgrfixConfig = toml::from_str(contents).context("invalid TOML")?;
    Ok(config)
}

/// Load config from `dir`, or return default if not found.
pub fn load_or_default(dir: &Utf8Path) -> anyhow::Result<LgrfixConfig> {
    match discover_config(dir) {
        Some(path) => load_config(&path),
        None => Ok(LgrfixConfig::default()),
    }
}

/// An explicit path must exist; otherwise fall back to discovery in `dir`.
pub fn resolve(explicit: Option<&Utf8Path>, dir: &Utf8Path) -> anyhow::Result<LgrfixConfig> {
    match explicit {
        Some(path) => load_config(path),
        None => load_or_default(dir),
    }
}

/// Settings for one `populate` run after merging file and CLI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedConfig {
    pub strategy: ClosureStrategy,
    pub max_iterations: Option<u64>,
    pub pretty: bool,
    pub markdown: bool,
}

pub struct ConfigMerger {
    config: LgrfixConfig,
}

impl ConfigMerger {
    pub fn new(config: LgrfixConfig) -> Self {
        Self { config }
    }

    /// CLI values replace file values when given.
    pub fn merge_populate_args(
        self,
        cli_strategy: Option<ClosureStrategy>,
        cli_max_iterations: Option<u64>,
    ) -> MergedConfig {
        MergedConfig {
            strategy: cli_strategy
                .or(self.config.closure.strategy)
                .unwrap_or_default(),
            max_iterations: cli_max_iterations.or(self.config.closure.max_iterations),
            pretty: self.config.output.pretty,
            markdown: self.config.output.markdown,
        }
    }
}
