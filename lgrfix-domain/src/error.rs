//! Error types for lgrfix-domain.
//!
//! - [`RepertoireError`]: raised by a [`crate::RepertoireStore`]. `NotInRepertoire`
//!   and `VariantAlreadyExists` are expected during closure and handled there.
//! - [`ClosureError`]: anything that aborts a closure run. The repertoire keeps
//!   whatever was added before the failure.

use lgrfix_types::CodePoint;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepertoireError {
    #[error("code point {cp} is not in the repertoire")]
    NotInRepertoire { cp: CodePoint },

    #[error("code point {cp} already exists in the repertoire")]
    CodePointAlreadyExists { cp: CodePoint },

    #[error("variant {variant} already exists for code point {cp}")]
    VariantAlreadyExists { cp: CodePoint, variant: CodePoint },
}

impl RepertoireError {
    pub fn is_not_in_repertoire(&self) -> bool {
        matches!(self, RepertoireError::NotInRepertoire { .. })
    }
}

#[derive(Debug, Error)]
pub enum ClosureError {
    #[error(transparent)]
    Repertoire(#[from] RepertoireError),

    #[error("{check} check failed")]
    Check {
        check: &'static str,
        #[source]
        source: anyhow::Error,
    },

    #[error("relation still open after {limit} iterations")]
    IterationLimit { limit: u64 },
}
