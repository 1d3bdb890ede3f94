//! Derived cost computation.
//!
//! Pure functions: a [`CostSnapshot`] in, field values out. No form access;
//! the binding layer in [`crate::form`] reads the snapshot and applies the
//! results.
//!
//! Two rule sets exist, one per form:
//! - Sale item: a single pass straight from the box price.
//! - Purchase: unit costs first, then a total chosen by the first rule
//!   whose inputs are all positive.

use serde::Serialize;

use crate::format::displayed;
use crate::types::FormKind;

// ============================================================================
// TYPES
// ============================================================================

/// Numeric view of a form, every field already parsed (absent = 0).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CostSnapshot {
    pub box_quantity: f64,
    pub packages_per_box: f64,
    pub items_per_package: f64,
    pub cost_per_box: f64,
    /// Currently displayed package cost (an input on the purchase form).
    pub cost_per_package: f64,
    /// Currently displayed item cost (an input on the purchase form).
    pub cost_per_item: f64,
}

/// Unit costs to write. `None` leaves the field as it is.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct UnitCosts {
    pub cost_per_package: Option<f64>,
    pub cost_per_item: Option<f64>,
}

/// Which rule produced the total cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TotalRule {
    /// boxes × cost per box
    BoxesTimesBoxCost,
    /// boxes × packages per box × cost per package
    BoxesTimesPackages,
    /// boxes × packages per box × items per package × cost per item
    BoxesTimesItems,
    /// packages per box × cost per package
    PackagesOnly,
    /// items per package × cost per item
    ItemsOnly,
    /// No rule matched; total is zero.
    Nothing,
}

impl TotalRule {
    /// Short formula for display.
    pub fn describe(self) -> &'static str {
        match self {
            TotalRule::BoxesTimesBoxCost => "boxes × cost/box",
            TotalRule::BoxesTimesPackages => "boxes × packages/box × cost/package",
            TotalRule::BoxesTimesItems => "boxes × packages/box × items/package × cost/item",
            TotalRule::PackagesOnly => "packages/box × cost/package",
            TotalRule::ItemsOnly => "items/package × cost/item",
            TotalRule::Nothing => "no rule matched",
        }
    }
}

/// A computed total and the rule that chose it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TotalCost {
    pub value: f64,
    pub rule: TotalRule,
}

/// Everything one recalculation wants written.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Outcome {
    pub unit: UnitCosts,
    pub total: TotalCost,
}

// ============================================================================
// SALE ITEM: SINGLE PASS
// ============================================================================

/// Single-pass rules: unit costs derived from the box price, total always
/// `boxes × cost per box`.
pub fn single_pass(s: &CostSnapshot) -> Outcome {
    let cost_per_package = (s.packages_per_box > 0.0).then(|| s.cost_per_box / s.packages_per_box);

    let cost_per_item = (s.packages_per_box > 0.0 && s.items_per_package > 0.0)
        .then(|| s.cost_per_box / (s.packages_per_box * s.items_per_package));

    Outcome {
        unit: UnitCosts {
            cost_per_package,
            cost_per_item,
        },
        total: TotalCost {
            value: s.box_quantity * s.cost_per_box,
            rule: TotalRule::BoxesTimesBoxCost,
        },
    }
}

// ============================================================================
// PURCHASE: TWO STAGES
// ============================================================================

/// Stage one: unit costs, preferring the box price over an entered
/// package cost.
pub fn fallback_unit_costs(s: &CostSnapshot) -> UnitCosts {
    if s.cost_per_box > 0.0 && s.packages_per_box > 0.0 {
        let package = s.cost_per_box / s.packages_per_box;
        let item = (s.items_per_package > 0.0).then(|| package / s.items_per_package);
        UnitCosts {
            cost_per_package: Some(package),
            cost_per_item: item,
        }
    } else if s.cost_per_package > 0.0 && s.items_per_package > 0.0 {
        UnitCosts {
            cost_per_package: None,
            cost_per_item: Some(s.cost_per_package / s.items_per_package),
        }
    } else {
        UnitCosts::default()
    }
}

/// Stage two: the first total rule whose inputs are all positive.
pub fn fallback_total(s: &CostSnapshot) -> TotalCost {
    let boxes = s.box_quantity > 0.0;
    let packages = s.packages_per_box > 0.0;
    let items = s.items_per_package > 0.0;

    let (value, rule) = if boxes && s.cost_per_box > 0.0 {
        (s.box_quantity * s.cost_per_box, TotalRule::BoxesTimesBoxCost)
    } else if boxes && packages && s.cost_per_package > 0.0 {
        (
            s.box_quantity * s.packages_per_box * s.cost_per_package,
            TotalRule::BoxesTimesPackages,
        )
    } else if boxes && packages && items && s.cost_per_item > 0.0 {
        (
            s.box_quantity * s.packages_per_box * s.items_per_package * s.cost_per_item,
            TotalRule::BoxesTimesItems,
        )
    } else if packages && s.cost_per_package > 0.0 {
        (s.packages_per_box * s.cost_per_package, TotalRule::PackagesOnly)
    } else if items && s.cost_per_item > 0.0 {
        (s.items_per_package * s.cost_per_item, TotalRule::ItemsOnly)
    } else {
        (0.0, TotalRule::Nothing)
    };

    TotalCost { value, rule }
}

/// Snapshot as the form reads after `unit` has been written and displayed.
pub fn apply_displayed(s: &CostSnapshot, unit: &UnitCosts) -> CostSnapshot {
    CostSnapshot {
        cost_per_package: unit.cost_per_package.map(displayed).unwrap_or(s.cost_per_package),
        cost_per_item: unit.cost_per_item.map(displayed).unwrap_or(s.cost_per_item),
        ..*s
    }
}

// ============================================================================
// DISPATCH
// ============================================================================

/// Run the rules for `kind`, assuming every field is present on the form.
///
/// The purchase total sees the unit costs as displayed (two decimals),
/// the same values a fresh read of the form would return.
pub fn recalculate(kind: FormKind, s: &CostSnapshot) -> Outcome {
    match kind {
        FormKind::SaleItem => single_pass(s),
        FormKind::Purchase => {
            let unit = fallback_unit_costs(s);
            let total = fallback_total(&apply_displayed(s, &unit));
            Outcome { unit, total }
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
