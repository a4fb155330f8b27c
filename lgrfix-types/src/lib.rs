//! Shared DTOs (schemas-as-code) for the lgrfix workspace.
//!
//! # Design constraints
//! - These types are intended to be serialized to disk.
//! - Be conservative with breaking changes.
//! - Prefer adding optional fields over changing semantics.

pub mod check;
pub mod closure;
pub mod codepoint;
pub mod report;
pub mod repertoire;

pub use codepoint::{CodePoint, CodePointParseError};

/// Schema identifiers.
pub mod schema {
    pub const LGRFIX_REPERTOIRE_V1: &str = "lgrfix.repertoire.v1";
    pub const LGRFIX_REPORT_V1: &str = "lgrfix.report.v1";
    pub const LGRFIX_CHECK_V1: &str = "lgrfix.check.v1";
}
