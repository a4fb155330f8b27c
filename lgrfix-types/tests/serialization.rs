use lgrfix_types::CodePoint;
use lgrfix_types::check::{CheckOutcome, CheckReport, Violation};
use lgrfix_types::closure::ClosureStrategy;
use lgrfix_types::report::{ClosureReport, ToolInfo};
use lgrfix_types::repertoire::{CodePointEntry, RepertoireDocument, VariantEdge, VariantMeta};
use pretty_assertions::assert_eq;

fn tool() -> ToolInfo {
    ToolInfo {
        name: "lgrfix".to_string(),
        version: Some("1.0.0".to_string()),
    }
}

#[test]
fn strategy_serializes_snake_case() {
    let full = serde_json::to_value(ClosureStrategy::FullRescan).expect("serialize");
    let worklist = serde_json::to_value(ClosureStrategy::Worklist).expect("serialize");

    assert_eq!(full, serde_json::json!("full_rescan"));
    assert_eq!(worklist, serde_json::json!("worklist"));
    assert_eq!(ClosureStrategy::default(), ClosureStrategy::FullRescan);
}

#[test]
fn document_parses_variant_metadata_inline() {
    let json = r#"{
        "schema": "lgrfix.repertoire.v1",
        "metadata": { "language": "und-Cyrl" },
        "entries": [
            {
                "cp": "0041",
                "comment": "LATIN CAPITAL LETTER A",
                "variants": [
                    { "cp": "0410", "type": "blocked", "comment": "homoglyph", "references": ["0"] }
                ]
            },
            { "cp": "0410" }
        ]
    }"#;

    let doc: RepertoireDocument = serde_json::from_str(json).expect("parse document");
    assert_eq!(doc.entries.len(), 2);
    assert_eq!(doc.variant_count(), 1);
    assert_eq!(doc.metadata.language.as_deref(), Some("und-Cyrl"));

    let edge = &doc.entries[0].variants[0];
    assert_eq!(edge.cp, CodePoint::single(0x410));
    assert_eq!(edge.meta.variant_type.as_deref(), Some("blocked"));
    assert_eq!(edge.meta.comment.as_deref(), Some("homoglyph"));
    assert_eq!(edge.meta.references, vec!["0".to_string()]);
    assert!(doc.entries[1].variants.is_empty());
}

#[test]
fn document_rejects_malformed_code_point() {
    let json = r#"{ "schema": "lgrfix.repertoire.v1", "entries": [ { "cp": "not-hex" } ] }"#;
    assert!(serde_json::from_str::<RepertoireDocument>(json).is_err());
}

#[test]
fn engine_added_edge_serializes_without_metadata() {
    let entry = CodePointEntry {
        cp: CodePoint::single(0x430),
        comment: None,
        tags: vec![],
        variants: vec![VariantEdge::new(CodePoint::single(0x41))],
    };
    let v = serde_json::to_value(&entry).expect("serialize entry");
    assert_eq!(
        v,
        serde_json::json!({ "cp": "0430", "variants": [ { "cp": "0041" } ] })
    );
    assert!(VariantMeta::default().is_empty());
}

#[test]
fn new_document_uses_repertoire_schema() {
    let doc = RepertoireDocument::new(vec![]);
    assert_eq!(doc.schema, lgrfix_types::schema::LGRFIX_REPERTOIRE_V1);
}

#[test]
fn check_report_passes_only_when_all_checks_pass() {
    let ok = CheckOutcome {
        check: "symmetry".to_string(),
        passed: true,
        violations: vec![],
    };
    let bad = CheckOutcome {
        check: "transitivity".to_string(),
        passed: false,
        violations: vec![Violation::MissingShortcut {
            source: CodePoint::single(0x41),
            via: CodePoint::single(0x42),
            target: CodePoint::single(0x43),
        }],
    };

    assert!(CheckReport::new(tool(), vec![ok.clone()]).passed());
    let report = CheckReport::new(tool(), vec![ok, bad]);
    assert!(!report.passed());

    let v = serde_json::to_value(&report).expect("serialize");
    assert_eq!(v["schema"], serde_json::json!("lgrfix.check.v1"));
    assert!(v["checks"][0].get("violations").is_none());
    assert_eq!(
        v["checks"][1]["violations"][0],
        serde_json::json!({
            "type": "missing_shortcut",
            "source": "0041",
            "via": "0042",
            "target": "0043"
        })
    );
}

#[test]
fn violation_display_is_readable() {
    let v = Violation::MissingMirror {
        source: CodePoint::single(0x41),
        target: CodePoint::single(0x430),
    };
    assert_eq!(
        v.to_string(),
        "U+0430 is a variant of U+0041 but not the other way around"
    );
}

#[test]
fn closure_report_omits_empty_run_timestamps() {
    let report = ClosureReport::new(tool(), ClosureStrategy::Worklist);
    let v = serde_json::to_value(&report).expect("serialize");
    assert_eq!(v["schema"], serde_json::json!("lgrfix.report.v1"));
    assert_eq!(v["strategy"], serde_json::json!("worklist"));
    assert!(v["run"].get("started_at").is_none());
    assert!(report.closed());
}
