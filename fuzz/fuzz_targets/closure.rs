#![no_main]

//! Fuzz target for the closure engine.
//!
//! Builds a small relation from structured input, closes it with both
//! strategies and checks the postconditions.

use libfuzzer_sys::fuzz_target;
use lgrfix_domain::{
    AuditLog, ClosureConfig, ClosureEngine, Repertoire, RepertoireStore, builtin_checks,
    run_checks,
};
use lgrfix_types::CodePoint;
use lgrfix_types::closure::ClosureStrategy;

#[derive(Debug, arbitrary::Arbitrary)]
struct RelationInput {
    /// (source, target) pairs over a small alphabet.
    edges: Vec<(u8, u8)>,
    worklist: bool,
}

fn cp(v: u8) -> CodePoint {
    CodePoint::single(0x0600 + u32::from(v % 16))
}

fuzz_target!(|input: RelationInput| {
    let mut rep = Repertoire::new();
    for (a, b) in input.edges.iter().take(64) {
        let (a, b) = (cp(*a), cp(*b));
        if !rep.contains(&a) {
            let _ = rep.add_code_point(a.clone());
        }
        let _ = rep.add_variant(&a, b, Default::default());
    }
    let before = rep.variant_count();

    let strategy = if input.worklist {
        ClosureStrategy::Worklist
    } else {
        ClosureStrategy::FullRescan
    };
    let engine = ClosureEngine::new(ClosureConfig {
        strategy,
        max_iterations: None,
    });
    let mut audit = AuditLog::new();
    let summary = engine.populate(&mut rep, &mut audit).expect("closure succeeds");

    assert_eq!(rep.variant_count(), before + summary.variants_added as usize);
    let outcomes = run_checks(&builtin_checks(), &rep).expect("checks run");
    assert!(outcomes.iter().all(|o| o.passed), "{outcomes:?}");

    let again = ClosureEngine::default()
        .populate(&mut rep, &mut AuditLog::new())
        .expect("second run succeeds");
    assert!(again.is_noop());
});
