//! Report formatting for recalculations and replayed sessions.
//!
//! Pure functions: (data, OutputFormat) → String.
//! No I/O, no side effects.

use serde::Serialize;

use crate::form::{FormState, Recalculation};
use crate::session::SessionOutcome;
use crate::types::OutputFormat;

/// One-shot recalculation plus the form it left behind.
#[derive(Debug, Serialize)]
pub struct CalcReport<'a> {
    pub recalculation: &'a Recalculation,
    pub fields: &'a FormState,
}

/// Format a single recalculation for output.
pub fn format_calc(report: &CalcReport<'_>, format: OutputFormat) -> String {
    match format {
        OutputFormat::Human => {
            let mut out = String::new();
            out.push_str(&format!("=== {} ===\n", report.recalculation.form));
            out.push_str(&format_fields(report.fields, report.recalculation));
            out.push('\n');
            out.push_str(&format_summary(report.recalculation));
            out
        }
        OutputFormat::Json => format_json(report),
    }
}

/// Format a replayed session for output.
pub fn format_session(outcome: &SessionOutcome, format: OutputFormat) -> String {
    match format {
        OutputFormat::Human => format_session_human(outcome),
        OutputFormat::Json => format_json(outcome),
    }
}

// ============================================================================
// HUMAN FORMAT
// ============================================================================

fn format_fields(fields: &FormState, recalc: &Recalculation) -> String {
    let mut out = String::new();
    for (field, value) in fields.iter() {
        let marker = if recalc.written(field).is_some() { "  ←" } else { "" };
        let shown = if value.is_empty() { "-" } else { value };
        out.push_str(&format!("{:<18} {:>12}{}\n", field.label(), shown, marker));
    }
    out
}

fn format_summary(recalc: &Recalculation) -> String {
    let mut out = String::new();
    out.push_str("=== Summary ===\n");
    out.push_str(&format!("Fields written:     {}\n", recalc.writes.len()));
    out.push_str(&format!("Total rule:         {}\n", recalc.total_rule.describe()));
    out
}

fn format_session_human(outcome: &SessionOutcome) -> String {
    let mut out = String::new();

    if !outcome.events.is_empty() {
        out.push_str("=== Inputs ===\n");
        for event in &outcome.events {
            out.push_str(&format!("{} = {:?}\n", event.input.field, event.input.value));
            match &event.recalculation {
                Some(recalc) if recalc.writes.is_empty() => {
                    out.push_str("  └─ nothing written\n");
                }
                Some(recalc) => {
                    for write in &recalc.writes {
                        out.push_str(&format!("  └─ {} → {}\n", write.field, write.value));
                    }
                }
                None => out.push_str("  └─ not tracked\n"),
            }
        }
        out.push('\n');
    }

    out.push_str(&format!("=== {} (final) ===\n", outcome.form));
    for (field, value) in outcome.final_fields.iter() {
        let shown = if value.is_empty() { "-" } else { value };
        out.push_str(&format!("{:<18} {:>12}\n", field.label(), shown));
    }
    out.push('\n');

    let recalculated = outcome
        .events
        .iter()
        .filter(|e| e.recalculation.is_some())
        .count();
    out.push_str("=== Summary ===\n");
    out.push_str(&format!("Input events:       {}\n", outcome.events.len()));
    out.push_str(&format!("Recalculations:     {}\n", recalculated));

    out
}

// ============================================================================
// JSON FORMAT
// ============================================================================

fn format_json<T: Serialize>(value: &T) -> String {
    // serde_json::to_string_pretty for readable output
    serde_json::to_string_pretty(value).unwrap_or_else(|e| {
        // This should never happen with our types, but fail explicitly
        panic!("Failed to serialize report to JSON: {}", e)
    })
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::{CostController, FormFields};
    use crate::session::{Session, replay};
    use crate::types::{FieldId, FormKind};

    fn sample_form() -> (FormState, Recalculation) {
        let mut form = FormState::for_kind(FormKind::Purchase);
        form.set(FieldId::BoxQuantity, "10".into());
        form.set(FieldId::PackagesPerBox, "5".into());
        form.set(FieldId::ItemsPerPackage, "2".into());
        form.set(FieldId::CostPerBox, "100".into());
        let recalc = CostController::new(FormKind::Purchase).recalculate(&mut form);
        (form, recalc)
    }

    fn sample_session() -> SessionOutcome {
        let session = Session::from_json(
            r#"{
                "form": "sale-item",
                "inputs": [
                    { "field": "cost_per_package", "value": "3" },
                    { "field": "packages_per_box", "value": "4" },
                    { "field": "cost_per_box", "value": "10" }
                ]
            }"#,
        )
        .unwrap();
        replay(&session)
    }

    // --- Human format tests ---

    #[test]
    fn human_calc_lists_fields_and_marks_writes() {
        let (form, recalc) = sample_form();
        let report = CalcReport { recalculation: &recalc, fields: &form };
        let output = format_calc(&report, OutputFormat::Human);

        assert!(output.contains("=== Purchase ==="));
        assert!(output.contains("Box Quantity"));
        assert!(output.contains("20.00  ←"));
        assert!(output.contains("1000.00  ←"));
        assert!(output.contains("Total rule:         boxes × cost/box"));
    }

    #[test]
    fn human_session_shows_each_input() {
        let output = format_session(&sample_session(), OutputFormat::Human);

        assert!(output.contains("=== Inputs ==="));
        assert!(output.contains("cost_per_package = \"3\"\n  └─ not tracked"));
        assert!(output.contains("└─ cost_per_package → 2.50"));
        assert!(output.contains("=== Sale Item (final) ==="));
        assert!(output.contains("Input events:       3"));
        assert!(output.contains("Recalculations:     2"));
    }

    #[test]
    fn human_session_empty_has_no_inputs_section() {
        let outcome = replay(&Session::default());
        let output = format_session(&outcome, OutputFormat::Human);

        assert!(!output.contains("=== Inputs"));
        assert!(output.contains("=== Summary ==="));
        assert!(output.contains("Input events:       0"));
    }

    // --- JSON format tests ---

    #[test]
    fn json_calc_has_expected_fields() {
        let (form, recalc) = sample_form();
        let report = CalcReport { recalculation: &recalc, fields: &form };
        let output = format_calc(&report, OutputFormat::Json);
        let parsed: serde_json::Value = serde_json::from_str(&output).expect("Invalid JSON");

        assert_eq!(parsed["recalculation"]["form"], "purchase");
        assert_eq!(parsed["recalculation"]["total_rule"], "boxes_times_box_cost");
        assert!(parsed["recalculation"]["writes"].is_array());
        assert_eq!(parsed["fields"]["cost_per_item"], "10.00");
        assert_eq!(parsed["fields"]["total_cost_value"], "1000.00");
    }

    #[test]
    fn json_session_marks_untracked_events_null() {
        let output = format_session(&sample_session(), OutputFormat::Json);
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(parsed["form"], "sale-item");
        assert!(parsed["events"][0]["recalculation"].is_null());
        assert!(parsed["events"][1]["recalculation"].is_object());
        assert_eq!(parsed["final_fields"]["total_cost_value"], "0.00");
    }
}
