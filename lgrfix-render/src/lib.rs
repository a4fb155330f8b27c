//! Rendering helpers (markdown and plain text) for human-readable artifacts.

use lgrfix_types::check::{CheckOutcome, CheckReport};
use lgrfix_types::closure::{AddReason, ClosureEvent};
use lgrfix_types::report::ClosureReport;

/// One log-style sentence per closure event.
pub fn render_event_line(event: &ClosureEvent) -> String {
    match event {
        ClosureEvent::AddCodePoint { cp, variant_of } => format!(
            "Add missing code point '{}' as it is a variant of '{}'",
            cp, variant_of
        ),
        ClosureEvent::AddVariant {
            source,
            target,
            reason,
        } => match reason {
            AddReason::Existence | AddReason::Symmetry => format!(
                "Add code point '{}' as variant of '{}' for symmetry",
                target, source
            ),
            AddReason::Transitivity { via } => format!(
                "Add code point '{}' as variant of '{}' for transitivity with '{}'",
                target, source, via
            ),
        },
    }
}

pub fn render_report_md(report: &ClosureReport) -> String {
    let s = &report.summary;
    let mut out = String::new();
    out.push_str("# lgrfix report\n\n");
    out.push_str(&format!("- Strategy: `{}`\n", report.strategy.as_str()));
    out.push_str(&format!("- Iterations: {}\n", s.iterations));
    out.push_str(&format!("- Code points added: {}\n", s.code_points_added));
    out.push_str(&format!(
        "- Variants added: {} (existence {}, symmetry {}, transitivity {})\n",
        s.variants_added, s.existence_added, s.symmetry_added, s.transitivity_added
    ));
    out.push_str(&format!(
        "- Input: `{}`{}\n",
        report.artifacts.input,
        digest_suffix(report.artifacts.input_sha256.as_deref())
    ));
    if let Some(output) = &report.artifacts.output {
        out.push_str(&format!(
            "- Output: `{}`{}\n",
            output,
            digest_suffix(report.artifacts.output_sha256.as_deref())
        ));
    }
    out.push('\n');

    out.push_str("## Checks\n\n");
    if report.checks.is_empty() {
        out.push_str("_No checks run._\n\n");
    } else {
        out.push_str("| Check | Result | Violations |\n");
        out.push_str("|---|---|---|\n");
        for c in &report.checks {
            out.push_str(&format!(
                "| {} | {} | {} |\n",
                c.check,
                result_label(c),
                c.violations.len()
            ));
        }
        out.push('\n');
    }

    out.push_str("## Changes\n\n");
    if report.events.is_empty() {
        out.push_str("_No changes: the variant relation was already closed._\n");
        return out;
    }
    for (i, event) in report.events.iter().enumerate() {
        out.push_str(&format!("{}. {}\n", i + 1, render_event_line(event)));
    }

    out
}

/// Terminal output for `lgrfix check`.
pub fn render_check_text(report: &CheckReport) -> String {
    let mut out = String::new();
    for c in &report.checks {
        if c.passed {
            out.push_str(&format!("{}: ok\n", c.check));
            continue;
        }
        let n = c.violations.len();
        out.push_str(&format!(
            "{}: FAILED ({} violation{})\n",
            c.check,
            n,
            if n == 1 { "" } else { "s" }
        ));
        for v in &c.violations {
            out.push_str(&format!("  - {}\n", v));
        }
    }
    out.push_str(if report.passed() {
        "variant relation is closed\n"
    } else {
        "variant relation is not closed\n"
    });
    out
}

fn result_label(c: &CheckOutcome) -> &'static str {
    if c.passed { "pass" } else { "fail" }
}

fn digest_suffix(sha256: Option<&str>) -> String {
    match sha256 {
        Some(d) => format!(" (sha256 `{}`)", &d[..d.len().min(12)]),
        None => String::new(),
    }
}
