//! Replayable input sessions.
//!
//! A session is a form kind, the field values the page loads with, and
//! the ordered input events a user typed. Replaying feeds each event
//! through the [`CostController`] exactly as the live form would.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::form::{CostController, FormState, Recalculation};
use crate::types::{FieldId, FormKind};

/// One input event: the full text of a field after the keystroke.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputEvent {
    pub field: FieldId,
    pub value: String,
}

/// A recorded editing session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub form: FormKind,
    /// Values present when the page loads.
    pub fields: Vec<(FieldId, String)>,
    pub inputs: Vec<InputEvent>,
}

/// What happened to one input event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventOutcome {
    pub input: InputEvent,
    /// None when the field was untracked or absent.
    pub recalculation: Option<Recalculation>,
}

/// Result of replaying a whole session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionOutcome {
    pub form: FormKind,
    pub events: Vec<EventOutcome>,
    pub final_fields: FormState,
}

#[derive(Deserialize)]
struct RawSession {
    #[serde(default)]
    form: FormKind,
    #[serde(default)]
    fields: serde_json::Map<String, serde_json::Value>,
    #[serde(default)]
    inputs: Vec<InputEvent>,
}

impl Session {
    /// Parse a session document.
    ///
    /// `fields` is an object of field name → value; numbers are accepted
    /// and converted to their text.
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: RawSession = serde_json::from_str(json)?;
        let mut fields = Vec::with_capacity(raw.fields.len());
        for (name, value) in raw.fields {
            let field: FieldId = name.parse()?;
            let text = match value {
                serde_json::Value::String(s) => s,
                serde_json::Value::Null => String::new(),
                other => other.to_string(),
            };
            fields.push((field, text));
        }
        Ok(Session {
            form: raw.form,
            fields,
            inputs: raw.inputs,
        })
    }

    /// Load a session document from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content).map_err(|e| match e {
            Error::Json(source) => Error::Parse {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })
    }

    /// The form as it looks when the page loads.
    pub fn initial_form(&self) -> FormState {
        FormState::prefilled(self.form, self.fields.iter().cloned())
    }
}

/// Replay every input event in order.
pub fn replay(session: &Session) -> SessionOutcome {
    let controller = CostController::new(session.form);
    let mut form = session.initial_form();

    let events = session
        .inputs
        .iter()
        .map(|input| {
            debug!(field = %input.field, value = %input.value, "input");
            let recalculation = controller.on_input(&mut form, input.field, input.value.clone());
            EventOutcome {
                input: input.clone(),
                recalculation,
            }
        })
        .collect();

    SessionOutcome {
        form: session.form,
        events,
        final_fields: form,
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::FormFields;
    use std::io::Write;

    const PURCHASE_SESSION: &str = r#"{
        "form": "purchase",
        "fields": { "id_box_quantity": "10", "packages_per_box": 5 },
        "inputs": [
            { "field": "items_per_package", "value": "2" },
            { "field": "cost_per_box", "value": "1" },
            { "field": "cost_per_box", "value": "10" },
            { "field": "cost_per_box", "value": "100" }
        ]
    }"#;

    #[test]
    fn parses_fields_in_either_naming() {
        let session = Session::from_json(PURCHASE_SESSION).unwrap();
        assert_eq!(session.form, FormKind::Purchase);
        assert!(session.fields.contains(&(FieldId::BoxQuantity, "10".to_string())));
        assert!(session.fields.contains(&(FieldId::PackagesPerBox, "5".to_string())));
        assert_eq!(session.inputs.len(), 4);
    }

    #[test]
    fn unknown_field_is_rejected() {
        let err = Session::from_json(r#"{"fields": {"discount": "5"}}"#).unwrap_err();
        assert!(matches!(err, Error::UnknownField(name) if name == "discount"));
    }

    #[test]
    fn empty_document_defaults_to_purchase() {
        let session = Session::from_json("{}").unwrap();
        assert_eq!(session, Session::default());
    }

    #[test]
    fn replay_recalculates_on_every_keystroke() {
        let session = Session::from_json(PURCHASE_SESSION).unwrap();
        let outcome = replay(&session);

        assert_eq!(outcome.events.len(), 4);
        assert!(outcome.events.iter().all(|e| e.recalculation.is_some()));

        let fields = &outcome.final_fields;
        assert_eq!(fields.get(FieldId::CostPerPackage), Some("20.00"));
        assert_eq!(fields.get(FieldId::CostPerItem), Some("10.00"));
        assert_eq!(fields.get(FieldId::TotalCostValue), Some("1000.00"));
    }

    #[test]
    fn replay_sale_item_overwrites_total() {
        let session = Session::from_json(
            r#"{
                "form": "sale-item",
                "fields": { "total_cost_value": "5" },
                "inputs": [
                    { "field": "packages_per_box", "value": "4" },
                    { "field": "cost_per_box", "value": "10" },
                    { "field": "total_cost_value", "value": "1" }
                ]
            }"#,
        )
        .unwrap();
        let outcome = replay(&session);

        assert_eq!(outcome.final_fields.get(FieldId::CostPerPackage), Some("2.50"));
        // No box quantity: the total is still written, as zero
        let second = outcome.events[1].recalculation.as_ref().unwrap();
        assert_eq!(second.written(FieldId::TotalCostValue), Some("0.00"));
        // Typing into the total itself is stored but recalculates nothing
        assert!(outcome.events[2].recalculation.is_none());
        assert_eq!(outcome.final_fields.get(FieldId::TotalCostValue), Some("1"));
    }

    #[test]
    fn load_reads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(PURCHASE_SESSION.as_bytes()).unwrap();

        let session = Session::load(file.path()).unwrap();
        assert_eq!(session.inputs.len(), 4);
    }

    #[test]
    fn load_reports_path_on_bad_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"{ not json").unwrap();

        let err = Session::load(file.path()).unwrap_err();
        assert!(matches!(err, Error::Parse { .. }));
        assert!(err.to_string().contains(&file.path().display().to_string()));
    }

    #[test]
    fn load_missing_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Session::load(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, Error::Read { .. }));
    }
}
