//! TUI color semantics and style constants.
//!
//! Color semantics:
//! - Green: value just written by a recalculation
//! - Cyan: interactive elements (keybinding hints, focused input)
//! - Yellow: derived fields (overwritten by the calculator)
//! - Dim: de-emphasized (untracked hints, formulas)
//! - Bold: labels and titles

use ratatui::style::{Color, Modifier, Style};

// ============================================================================
// SEMANTIC STYLES
// ============================================================================

/// Just written by the last recalculation: green.
pub const STYLE_WRITTEN: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);

/// Derived field label: yellow.
pub const STYLE_DERIVED: Style = Style::new().fg(Color::Yellow);

/// Interactive element / keybinding hint: cyan.
pub const STYLE_INTERACTIVE: Style = Style::new().fg(Color::Cyan);

/// De-emphasized metadata: dark gray.
pub const STYLE_DIM: Style = Style::new().fg(Color::DarkGray);

/// Field label: bold.
pub const STYLE_LABEL: Style = Style::new().add_modifier(Modifier::BOLD);

// ============================================================================
// UI ELEMENT STYLES
// ============================================================================

/// Title bar / header.
pub const STYLE_TITLE: Style = Style::new().fg(Color::White).add_modifier(Modifier::BOLD);

/// Focused input row.
pub const STYLE_FOCUS: Style = Style::new().add_modifier(Modifier::REVERSED);

/// Footer / help line.
pub const STYLE_HELP: Style = Style::new().fg(Color::DarkGray);

// ============================================================================
// TESTS
// ============================================================================
