use crate::codepoint::CodePoint;
use serde::{Deserialize, Serialize};

/// How the fixed-point loop chooses which entries to re-scan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClosureStrategy {
    /// Re-scan every entry on every iteration.
    #[default]
    FullRescan,
    /// Re-scan only entries touched by the previous pass.
    Worklist,
}

impl ClosureStrategy {
    pub fn as_str(self) -> &'static str {
        match self {
            ClosureStrategy::FullRescan => "full_rescan",
            ClosureStrategy::Worklist => "worklist",
        }
    }
}

/// Why a variant edge was added.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AddReason {
    /// Back-edge seeded when the source entry itself was missing.
    Existence,
    Symmetry,
    Transitivity { via: CodePoint },
}

/// One mutation performed by the closure engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClosureEvent {
    AddCodePoint {
        cp: CodePoint,
        variant_of: CodePoint,
    },
    AddVariant {
        source: CodePoint,
        target: CodePoint,
        reason: AddReason,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClosureSummary {
    pub code_points_added: u64,
    pub variants_added: u64,
    pub existence_added: u64,
    pub symmetry_added: u64,
    pub transitivity_added: u64,

    /// Fixed-point loop iterations (0 when the relation was already closed).
    pub iterations: u64,
}

impl ClosureSummary {
    pub fn is_noop(&self) -> bool {
        self.code_points_added == 0 && self.variants_added == 0
    }

    /// Fold an event into the counters.
    pub fn record(&mut self, event: &ClosureEvent) {
        match event {
            ClosureEvent::AddCodePoint { .. } => self.code_points_added += 1,
            ClosureEvent::AddVariant { reason, .. } => {
                self.variants_added += 1;
                match reason {
                    AddReason::Existence => self.existence_added += 1,
                    AddReason::Symmetry => self.symmetry_added += 1,
                    AddReason::Transitivity { .. } => self.transitivity_added += 1,
                }
            }
        }
    }
}
