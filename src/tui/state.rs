//! TUI state algebra: pure types, zero effects.
//!
//! The form's field values live in [`App::form`]; screens carry only the
//! focus position. Every keystroke that changes a field becomes an
//! [`Effect::SetField`], which the effects layer routes through the
//! recalculation controller.

use crossterm::event::KeyEvent;

use crate::form::{FormState, Recalculation};
use crate::types::{FieldId, FormKind};

// ============================================================================
// APP EVENTS
// ============================================================================

/// Everything the event loop can receive from its channel.
#[derive(Debug)]
pub enum AppEvent {
    /// A terminal key event from the crossterm reader thread.
    Key(KeyEvent),
    /// Terminal resized; redraw.
    Resize,
}

// ============================================================================
// APPLICATION STATE
// ============================================================================

/// Top-level TUI model.
#[derive(Debug)]
pub struct App {
    /// Which form is being edited.
    pub kind: FormKind,

    /// Current field text, shared across screens.
    pub form: FormState,

    /// Current screen.
    pub screen: Screen,

    /// Result of the most recent recalculation, for highlighting.
    pub last: Option<Recalculation>,

    /// Set to true when the app should exit on the next tick.
    pub should_quit: bool,
}

// ============================================================================
// SCREENS
// ============================================================================

/// The current TUI screen. `focus` indexes into the form layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Typing into the focused field.
    Editing { focus: usize },
    /// Key reference overlay; returns to the same focus.
    Help { focus: usize },
}

impl Default for Screen {
    fn default() -> Self {
        Screen::Editing { focus: 0 }
    }
}

// ============================================================================
// ACTIONS
// ============================================================================

/// Semantic user action, decoupled from raw key events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Move focus to the next field (wraps).
    FocusNext,
    /// Move focus to the previous field (wraps).
    FocusPrev,
    /// Append a character to the focused field.
    Type(char),
    /// Delete the last character of the focused field.
    Backspace,
    /// Empty the focused field.
    ClearField,
    /// Show or hide the key reference.
    ToggleHelp,
    /// Leave the current screen.
    Back,
    /// Quit the application.
    Quit,
}

// ============================================================================
// TRANSITIONS
// ============================================================================

/// Result of a pure state transition.
#[derive(Debug, PartialEq)]
pub enum Transition {
    /// Render this screen.
    Screen(Screen),
    /// Quit the application.
    Quit,
    /// Execute a side effect, staying on the current screen.
    Effect(Effect),
}

/// Side effect requested by a pure transition.
#[derive(Debug, PartialEq)]
pub enum Effect {
    /// Replace a field's text: one input event.
    SetField { field: FieldId, value: String },
}

// ============================================================================
// CONSTRUCTORS
// ============================================================================

impl App {
    /// A blank form of the given kind, focus on the first field.
    pub fn new(kind: FormKind) -> Self {
        Self::with_form(kind, FormState::for_kind(kind))
    }

    /// Start from existing field values.
    pub fn with_form(kind: FormKind, form: FormState) -> Self {
        App {
            kind,
            form,
            screen: Screen::default(),
            last: None,
            should_quit: false,
        }
    }
}

impl Screen {
    /// Focus index regardless of screen.
    pub fn focus(&self) -> usize {
        match *self {
            Screen::Editing { focus } | Screen::Help { focus } => focus,
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::FormFields;

    #[test]
    fn new_app_starts_editing_first_field() {
        let app = App::new(FormKind::Purchase);
        assert_eq!(app.screen, Screen::Editing { focus: 0 });
        assert!(app.last.is_none());
        assert!(!app.should_quit);
    }

    #[test]
    fn new_app_has_form_layout() {
        let app = App::new(FormKind::SaleItem);
        assert!(app.form.has(FieldId::CostPerItem));
        assert!(app.form.has(FieldId::TotalCostValue));
        assert_eq!(app.form.iter().count(), FormKind::SaleItem.layout().len());
    }

    #[test]
    fn focus_is_shared_by_both_screens() {
        assert_eq!(Screen::Editing { focus: 3 }.focus(), 3);
        assert_eq!(Screen::Help { focus: 5 }.focus(), 5);
    }
}
