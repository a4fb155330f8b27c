use crate::codepoint::CodePoint;
use crate::report::ToolInfo;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single broken invariant in a variant relation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Violation {
    /// `source -> target` exists but `target` has no entry.
    MissingEntry { source: CodePoint, target: CodePoint },
    /// `source -> target` exists but `target -> source` does not.
    MissingMirror { source: CodePoint, target: CodePoint },
    /// `source -> via -> target` exists but `source -> target` does not.
    MissingShortcut {
        source: CodePoint,
        via: CodePoint,
        target: CodePoint,
    },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::MissingEntry { source, target } => write!(
                f,
                "{} is a variant of {} but is not in the repertoire",
                target, source
            ),
            Violation::MissingMirror { source, target } => write!(
                f,
                "{} is a variant of {} but not the other way around",
                target, source
            ),
            Violation::MissingShortcut {
                source,
                via,
                target,
            } => write!(
                f,
                "{} is a variant of {} through {} but not directly",
                target, source, via
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckOutcome {
    pub check: String,
    pub passed: bool,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub violations: Vec<Violation>,
}

/// Output of `lgrfix check` (`lgrfix.check.v1`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckReport {
    pub schema: String,
    pub tool: ToolInfo,

    #[serde(default)]
    pub checks: Vec<CheckOutcome>,
}

impl CheckReport {
    pub fn new(tool: ToolInfo, checks: Vec<CheckOutcome>) -> Self {
        Self {
            schema: crate::schema::LGRFIX_CHECK_V1.to_string(),
            tool,
            checks,
        }
    }

    pub fn passed(&self) -> bool {
        self.checks.iter().all(|c| c.passed)
    }
}
