//! Form binding: field lookup by id, and the recalculation controller.
//!
//! The pure rules live in [`crate::calc`]. This layer only reads fields,
//! hands a [`CostSnapshot`] to the rules, and writes the results back,
//! skipping any target the form does not have.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::calc::{self, CostSnapshot, TotalCost, TotalRule, UnitCosts};
use crate::format::to_fixed_2;
use crate::parse::parse_field;
use crate::types::{FieldId, FormKind};

// ============================================================================
// FIELD ACCESS
// ============================================================================

/// Text fields addressed by [`FieldId`].
pub trait FormFields {
    /// Current text of a field, or None when the form has no such field.
    fn get(&self, field: FieldId) -> Option<&str>;

    /// Replace a field's text. Returns false (and does nothing) when the
    /// field is absent.
    fn set(&mut self, field: FieldId, value: String) -> bool;

    fn has(&self, field: FieldId) -> bool {
        self.get(field).is_some()
    }
}

/// In-memory form: the fields that exist and their current text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormState {
    fields: BTreeMap<FieldId, String>,
}

impl FormState {
    /// Empty values for every field of the form's layout.
    pub fn for_kind(kind: FormKind) -> Self {
        FormState {
            fields: kind
                .layout()
                .iter()
                .map(|&f| (f, String::new()))
                .collect(),
        }
    }

    /// A form containing exactly the given fields.
    pub fn from_fields(fields: impl IntoIterator<Item = (FieldId, String)>) -> Self {
        FormState {
            fields: fields.into_iter().collect(),
        }
    }

    /// The form of `kind` with initial values filled in. Values for
    /// fields the form does not carry are logged and dropped.
    pub fn prefilled(kind: FormKind, values: impl IntoIterator<Item = (FieldId, String)>) -> Self {
        let mut form = Self::for_kind(kind);
        for (field, value) in values {
            if !form.set(field, value) {
                warn!(%field, form = %kind, "field not on form, ignored");
            }
        }
        form
    }

    /// Fields in form order with their text.
    pub fn iter(&self) -> impl Iterator<Item = (FieldId, &str)> {
        self.fields.iter().map(|(&f, v)| (f, v.as_str()))
    }
}

impl FormFields for FormState {
    fn get(&self, field: FieldId) -> Option<&str> {
        self.fields.get(&field).map(String::as_str)
    }

    fn set(&mut self, field: FieldId, value: String) -> bool {
        match self.fields.get_mut(&field) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }
}

/// Read the six numeric fields, absent or unparseable ones as 0.
pub fn snapshot(form: &impl FormFields) -> CostSnapshot {
    CostSnapshot {
        box_quantity: parse_field(form.get(FieldId::BoxQuantity)),
        packages_per_box: parse_field(form.get(FieldId::PackagesPerBox)),
        items_per_package: parse_field(form.get(FieldId::ItemsPerPackage)),
        cost_per_box: parse_field(form.get(FieldId::CostPerBox)),
        cost_per_package: parse_field(form.get(FieldId::CostPerPackage)),
        cost_per_item: parse_field(form.get(FieldId::CostPerItem)),
    }
}

// ============================================================================
// RECALCULATION RESULT
// ============================================================================

/// A value written into a field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldWrite {
    pub field: FieldId,
    pub value: String,
}

/// What one recalculation actually changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recalculation {
    pub form: FormKind,
    /// Writes performed, in order. Absent targets are not listed.
    pub writes: Vec<FieldWrite>,
    /// Rule that chose the total, whether or not a total field exists.
    pub total_rule: TotalRule,
}

impl Recalculation {
    /// The value written to `field`, if any.
    pub fn written(&self, field: FieldId) -> Option<&str> {
        self.writes
            .iter()
            .find(|w| w.field == field)
            .map(|w| w.value.as_str())
    }
}

// ============================================================================
// CONTROLLER
// ============================================================================

/// "On change, recompute, write results" for one form kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CostController {
    pub kind: FormKind,
}

impl CostController {
    pub fn new(kind: FormKind) -> Self {
        CostController { kind }
    }

    /// Whether an input event on `field` triggers a recalculation.
    pub fn is_tracked(&self, field: FieldId) -> bool {
        self.kind.tracked_fields().contains(&field)
    }

    /// Handle an input event: store the text, then recalculate if the
    /// field is tracked. Returns None when nothing was recalculated.
    pub fn on_input(
        &self,
        form: &mut impl FormFields,
        field: FieldId,
        value: impl Into<String>,
    ) -> Option<Recalculation> {
        if !form.set(field, value.into()) {
            debug!(%field, "input on absent field ignored");
            return None;
        }
        if !self.is_tracked(field) {
            return None;
        }
        Some(self.recalculate(form))
    }

    /// Recompute every derived field from the form's current values.
    pub fn recalculate(&self, form: &mut impl FormFields) -> Recalculation {
        let mut writes = Vec::new();

        let total_rule = match self.kind {
            FormKind::SaleItem => {
                let outcome = calc::single_pass(&snapshot(form));
                write_unit_costs(form, &outcome.unit, &mut writes);
                write_total(form, &outcome.total, &mut writes);
                outcome.total.rule
            }
            FormKind::Purchase => {
                let unit = calc::fallback_unit_costs(&snapshot(form));
                write_unit_costs(form, &unit, &mut writes);
                // Re-read: the total works from what the form now shows
                let total = calc::fallback_total(&snapshot(form));
                write_total(form, &total, &mut writes);
                total.rule
            }
        };

        debug!(
            form = %self.kind,
            writes = writes.len(),
            rule = ?total_rule,
            "recalculated"
        );

        Recalculation {
            form: self.kind,
            writes,
            total_rule,
        }
    }
}

fn write_unit_costs(form: &mut impl FormFields, unit: &UnitCosts, writes: &mut Vec<FieldWrite>) {
    if let Some(v) = unit.cost_per_package {
        write_field(form, FieldId::CostPerPackage, v, writes);
    }
    if let Some(v) = unit.cost_per_item {
        write_field(form, FieldId::CostPerItem, v, writes);
    }
}

fn write_total(form: &mut impl FormFields, total: &TotalCost, writes: &mut Vec<FieldWrite>) {
    write_field(form, FieldId::TotalCostValue, total.value, writes);
}

fn write_field(form: &mut impl FormFields, field: FieldId, value: f64, writes: &mut Vec<FieldWrite>) {
    let text = to_fixed_2(value);
    if form.set(field, text.clone()) {
        writes.push(FieldWrite { field, value: text });
    }
}

// ============================================================================
// TESTS
// ============================================================================
