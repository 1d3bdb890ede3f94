//! Domain types for purchase-costs.
//!
//! Field identifiers form the fixed contract with the admin forms:
//! every read and write goes through a [`FieldId`], never a raw string.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Prefix the admin widgets put in front of every field name.
const HTML_ID_PREFIX: &str = "id_";

// ============================================================================
// FIELDS
// ============================================================================

/// A numeric field on a cost form.
///
/// Ordered the way the fields appear on the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldId {
    /// Number of boxes purchased.
    BoxQuantity,
    /// Packages contained in one box.
    PackagesPerBox,
    /// Items contained in one package.
    ItemsPerPackage,
    /// Price paid for one box.
    CostPerBox,
    /// Derived: price of one package.
    CostPerPackage,
    /// Derived: price of one item.
    CostPerItem,
    /// Derived: price of the whole purchase.
    TotalCostValue,
}

impl FieldId {
    /// Every field, in form order.
    pub const ALL: [FieldId; 7] = [
        FieldId::BoxQuantity,
        FieldId::PackagesPerBox,
        FieldId::ItemsPerPackage,
        FieldId::CostPerBox,
        FieldId::CostPerPackage,
        FieldId::CostPerItem,
        FieldId::TotalCostValue,
    ];

    /// Contract name, e.g. `box_quantity`.
    pub fn name(self) -> &'static str {
        match self {
            FieldId::BoxQuantity => "box_quantity",
            FieldId::PackagesPerBox => "packages_per_box",
            FieldId::ItemsPerPackage => "items_per_package",
            FieldId::CostPerBox => "cost_per_box",
            FieldId::CostPerPackage => "cost_per_package",
            FieldId::CostPerItem => "cost_per_item",
            FieldId::TotalCostValue => "total_cost_value",
        }
    }

    /// Widget id as rendered by the admin, e.g. `id_box_quantity`.
    pub fn html_id(self) -> String {
        format!("{}{}", HTML_ID_PREFIX, self.name())
    }

    /// Human label shown next to the input.
    pub fn label(self) -> &'static str {
        match self {
            FieldId::BoxQuantity => "Box Quantity",
            FieldId::PackagesPerBox => "Packages per Box",
            FieldId::ItemsPerPackage => "Items per Package",
            FieldId::CostPerBox => "Cost per Box",
            FieldId::CostPerPackage => "Cost per Package",
            FieldId::CostPerItem => "Cost per Item",
            FieldId::TotalCostValue => "Total Cost",
        }
    }

    /// True for fields the calculator may overwrite.
    pub fn is_derived(self) -> bool {
        matches!(
            self,
            FieldId::CostPerPackage | FieldId::CostPerItem | FieldId::TotalCostValue
        )
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Accepts both `box_quantity` and `id_box_quantity`.
impl FromStr for FieldId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        let name = name.strip_prefix(HTML_ID_PREFIX).unwrap_or(name);
        FieldId::ALL
            .into_iter()
            .find(|f| f.name() == name)
            .ok_or_else(|| Error::UnknownField(s.to_string()))
    }
}

impl Serialize for FieldId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for FieldId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

// ============================================================================
// FORMS
// ============================================================================

/// The admin forms that carry cost fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FormKind {
    /// Purchase entry: two-stage recalculation with total-cost fallbacks.
    #[default]
    Purchase,
    /// Sale line item: single-pass recalculation.
    #[serde(alias = "sale_item", alias = "saleitem")]
    SaleItem,
}

impl FormKind {
    /// Fields whose input event triggers a recalculation.
    pub fn tracked_fields(self) -> &'static [FieldId] {
        match self {
            FormKind::Purchase => &[
                FieldId::BoxQuantity,
                FieldId::PackagesPerBox,
                FieldId::ItemsPerPackage,
                FieldId::CostPerBox,
                FieldId::CostPerPackage,
                FieldId::CostPerItem,
            ],
            FormKind::SaleItem => &[
                FieldId::BoxQuantity,
                FieldId::PackagesPerBox,
                FieldId::ItemsPerPackage,
                FieldId::CostPerBox,
            ],
        }
    }

    /// Fields present on the form, in display order.
    pub fn layout(self) -> &'static [FieldId] {
        match self {
            FormKind::Purchase => &FieldId::ALL,
            FormKind::SaleItem => &[
                FieldId::BoxQuantity,
                FieldId::PackagesPerBox,
                FieldId::ItemsPerPackage,
                FieldId::CostPerBox,
                FieldId::CostPerPackage,
                FieldId::CostPerItem,
                FieldId::TotalCostValue,
            ],
        }
    }

    /// Form title.
    pub fn title(self) -> &'static str {
        match self {
            FormKind::Purchase => "Purchase",
            FormKind::SaleItem => "Sale Item",
        }
    }
}

impl fmt::Display for FormKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

// ============================================================================
// CONFIGURATION
// ============================================================================

/// Output format for reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable pretty output.
    #[default]
    Human,
    /// Machine-readable JSON.
    Json,
}

// ============================================================================
// TESTS
// ============================================================================
