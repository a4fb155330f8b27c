use crate::check::CheckOutcome;
use crate::closure::{ClosureEvent, ClosureStrategy, ClosureSummary};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolInfo {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ended_at: Option<DateTime<Utc>>,
}

/// Where the repertoire came from and where the closed copy went.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportArtifacts {
    pub input: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_sha256: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_sha256: Option<String>,
}

/// Output of `lgrfix populate` (`lgrfix.report.v1`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClosureReport {
    pub schema: String,
    pub tool: ToolInfo,

    #[serde(default)]
    pub run: RunInfo,

    pub strategy: ClosureStrategy,

    #[serde(default)]
    pub artifacts: ReportArtifacts,

    pub summary: ClosureSummary,

    /// Check results after closure.
    #[serde(default)]
    pub checks: Vec<CheckOutcome>,

    #[serde(default)]
    pub events: Vec<ClosureEvent>,
}

impl ClosureReport {
    pub fn new(tool: ToolInfo, strategy: ClosureStrategy) -> Self {
        Self {
            schema: crate::schema::LGRFIX_REPORT_V1.to_string(),
            tool,
            run: RunInfo::default(),
            strategy,
            artifacts: ReportArtifacts::default(),
            summary: ClosureSummary::default(),
            checks: vec![],
            events: vec![],
        }
    }

    pub fn closed(&self) -> bool {
        self.checks.iter().all(|c| c.passed)
    }
}
