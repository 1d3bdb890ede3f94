//! purchase-costs: Derived cost fields for purchase and sale item forms.

pub mod calc;
pub mod config;
pub mod error;
pub mod form;
pub mod format;
pub mod parse;
pub mod report;
pub mod session;
pub mod tui;
pub mod types;
