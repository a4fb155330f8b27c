//! Domain logic: check a code point variant relation and close it under
//! existence, symmetry and transitivity.
//!
//! This crate owns *what* gets added and why. Loading and writing repertoire
//! files is the CLI's job; everything here works on a [`RepertoireStore`].

mod audit;
mod checks;
mod closure;
mod error;
mod ports;
mod repertoire;

pub use audit::AuditLog;
pub use checks::{
    ExistenceCheck, RelationCheck, SymmetryCheck, TransitivityCheck, builtin_checks, run_checks,
};
pub use closure::{ClosureConfig, ClosureEngine, populate};
pub use error::{ClosureError, RepertoireError};
pub use ports::RepertoireStore;
pub use repertoire::Repertoire;
