//! Property-based tests for the closure engine.
//!
//! These tests verify that, for arbitrary small relations:
//! - The closed relation passes the existence, symmetry and transitivity checks
//! - Nothing present before closure is removed or altered
//! - A second run adds nothing
//! - The worklist strategy reaches the same edge set as a full re-scan

use lgrfix_domain::{
    AuditLog, ClosureConfig, ClosureEngine, ExistenceCheck, RelationCheck, Repertoire,
    RepertoireStore, SymmetryCheck, TransitivityCheck,
};
use lgrfix_types::CodePoint;
use lgrfix_types::closure::ClosureStrategy;
use lgrfix_types::repertoire::{CodePointEntry, RepertoireDocument, VariantEdge, VariantMeta};
use proptest::prelude::*;
use std::collections::{BTreeMap, BTreeSet};

fn cp(v: u32) -> CodePoint {
    CodePoint::single(0x430 + v)
}

/// Entries keyed 0..6, targets drawn from 0..8 so some targets have no entry.
fn arb_relation() -> impl Strategy<Value = BTreeMap<u32, BTreeSet<u32>>> {
    prop::collection::btree_map(
        0u32..6,
        prop::collection::btree_set(0u32..8, 0..4),
        0..6,
    )
}

fn build(rel: &BTreeMap<u32, BTreeSet<u32>>) -> Repertoire {
    let entries = rel
        .iter()
        .map(|(src, targets)| CodePointEntry {
            cp: cp(*src),
            comment: None,
            tags: vec![],
            variants: targets
                .iter()
                .map(|t| {
                    VariantEdge::with_meta(
                        cp(*t),
                        VariantMeta {
                            comment: Some(format!("{}->{}", src, t)),
                            ..Default::default()
                        },
                    )
                })
                .collect(),
        })
        .collect();
    Repertoire::from_document(RepertoireDocument::new(entries)).expect("valid document")
}

fn edge_set(rep: &Repertoire) -> BTreeSet<(CodePoint, CodePoint)> {
    rep.entries()
        .flat_map(|e| e.variants.iter().map(move |v| (e.cp.clone(), v.cp.clone())))
        .collect()
}

fn close(rep: &mut Repertoire, strategy: ClosureStrategy) -> lgrfix_types::closure::ClosureSummary {
    let engine = ClosureEngine::new(ClosureConfig {
        strategy,
        max_iterations: None,
    });
    engine
        .populate(rep, &mut AuditLog::new())
        .expect("closure succeeds")
}

proptest! {
    #[test]
    fn closed_relation_passes_all_checks(rel in arb_relation()) {
        let mut rep = build(&rel);
        close(&mut rep, ClosureStrategy::FullRescan);

        prop_assert!(ExistenceCheck.violations(&rep).unwrap().is_empty());
        prop_assert!(SymmetryCheck.violations(&rep).unwrap().is_empty());
        prop_assert!(TransitivityCheck.violations(&rep).unwrap().is_empty());
    }

    #[test]
    fn closure_only_adds(rel in arb_relation()) {
        let before = build(&rel);
        let mut after = before.clone();
        close(&mut after, ClosureStrategy::FullRescan);

        for entry in before.entries() {
            let now = after.get(&entry.cp).expect("entry kept");
            for edge in &entry.variants {
                let kept = now.variants.iter().find(|v| v.cp == edge.cp);
                prop_assert_eq!(kept, Some(edge));
            }
        }
        prop_assert!(edge_set(&before).is_subset(&edge_set(&after)));
        prop_assert!(after.len() >= before.len());
    }

    #[test]
    fn second_run_adds_nothing(rel in arb_relation()) {
        let mut rep = build(&rel);
        close(&mut rep, ClosureStrategy::FullRescan);
        let edges = edge_set(&rep);

        let mut audit = AuditLog::new();
        let summary = ClosureEngine::default().populate(&mut rep, &mut audit).unwrap();
        prop_assert!(summary.is_noop());
        prop_assert_eq!(summary.iterations, 0);
        prop_assert!(audit.is_empty());
        prop_assert_eq!(edge_set(&rep), edges);
    }

    #[test]
    fn iterations_are_bounded(rel in arb_relation()) {
        let mut rep = build(&rel);
        let summary = close(&mut rep, ClosureStrategy::FullRescan);
        let n = rep.len() as u64;
        prop_assert!(summary.iterations <= n * n);
    }

    #[test]
    fn worklist_agrees_with_full_rescan(rel in arb_relation()) {
        let mut full = build(&rel);
        let mut work = build(&rel);
        let full_summary = close(&mut full, ClosureStrategy::FullRescan);
        let work_summary = close(&mut work, ClosureStrategy::Worklist);

        prop_assert_eq!(edge_set(&full), edge_set(&work));
        prop_assert_eq!(full.code_points(), work.code_points());
        prop_assert_eq!(full_summary.variants_added, work_summary.variants_added);
        prop_assert_eq!(full_summary.code_points_added, work_summary.code_points_added);
    }

    #[test]
    fn audit_log_matches_growth(rel in arb_relation()) {
        let before = build(&rel);
        let mut after = before.clone();
        let mut audit = AuditLog::new();
        let summary = ClosureEngine::default().populate(&mut after, &mut audit).unwrap();

        let added_edges = edge_set(&after).len() - edge_set(&before).len();
        prop_assert_eq!(summary.variants_added as usize, added_edges);
        prop_assert_eq!(summary.code_points_added as usize, after.len() - before.len());
        prop_assert_eq!(audit.len(), added_edges + (after.len() - before.len()));
    }
}
