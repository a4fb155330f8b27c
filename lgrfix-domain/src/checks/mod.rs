use crate::ports::RepertoireStore;
use lgrfix_types::check::{CheckOutcome, Violation};

mod existence;
mod symmetry;
mod transitivity;

pub use existence::ExistenceCheck;
pub use symmetry::SymmetryCheck;
pub use transitivity::TransitivityCheck;

/// A structural property of a variant relation.
///
/// Implementations must not mutate anything; the closure engine calls
/// [`RelationCheck::check`] once per loop iteration.
pub trait RelationCheck {
    fn name(&self) -> &'static str;

    /// Every place the property is broken, in deterministic order.
    fn violations(&self, rel: &dyn RepertoireStore) -> anyhow::Result<Vec<Violation>>;

    fn check(&self, rel: &dyn RepertoireStore) -> anyhow::Result<bool> {
        Ok(self.violations(rel)?.is_empty())
    }

    fn outcome(&self, rel: &dyn RepertoireStore) -> anyhow::Result<CheckOutcome> {
        let violations = self.violations(rel)?;
        Ok(CheckOutcome {
            check: self.name().to_string(),
            passed: violations.is_empty(),
            violations,
        })
    }
}

/// Existence, symmetry and transitivity, in that order.
pub fn builtin_checks() -> Vec<Box<dyn RelationCheck>> {
    vec![
        Box::new(ExistenceCheck),
        Box::new(SymmetryCheck),
        Box::new(TransitivityCheck),
    ]
}

/// Run every check and collect the outcomes.
pub fn run_checks(
    checks: &[Box<dyn RelationCheck>],
    rel: &dyn RepertoireStore,
) -> anyhow::Result<Vec<CheckOutcome>> {
    checks.iter().map(|c| c.outcome(rel)).collect()
}
