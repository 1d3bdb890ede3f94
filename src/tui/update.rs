//! Pure state transitions: (Screen, Action) → Transition.
//!
//! Fully testable without a terminal. Edits never touch the form here;
//! they come back as [`Effect::SetField`] with the field's new text.

use crate::form::{FormFields, FormState};
use crate::types::FormKind;

use super::state::{Action, Effect, Screen, Transition};

/// Pure state transition function.
///
/// `form` is read-only: it supplies the focused field's current text.
pub fn update(screen: Screen, action: &Action, form: &FormState, kind: FormKind) -> Transition {
    match screen {
        Screen::Editing { focus } => update_editing(focus, action, form, kind),
        Screen::Help { focus } => update_help(focus, action),
    }
}

// ============================================================================
// PER-SCREEN HANDLERS
// ============================================================================

/// Editing: focus movement and text edits on the focused field.
fn update_editing(focus: usize, action: &Action, form: &FormState, kind: FormKind) -> Transition {
    let layout = kind.layout();
    let len = layout.len();
    let stay = Transition::Screen(Screen::Editing { focus });

    let Some(&field) = layout.get(focus) else {
        return Transition::Screen(Screen::Editing { focus: 0 });
    };
    let current = form.get(field).unwrap_or("");

    match action {
        Action::FocusNext => Transition::Screen(Screen::Editing {
            focus: (focus + 1) % len,
        }),
        Action::FocusPrev => Transition::Screen(Screen::Editing {
            focus: (focus + len - 1) % len,
        }),
        Action::Type(c) => {
            let mut value = current.to_string();
            value.push(*c);
            Transition::Effect(Effect::SetField { field, value })
        }
        Action::Backspace => {
            let mut value = current.to_string();
            if value.pop().is_none() {
                return stay;
            }
            Transition::Effect(Effect::SetField { field, value })
        }
        Action::ClearField => {
            if current.is_empty() {
                stay
            } else {
                Transition::Effect(Effect::SetField {
                    field,
                    value: String::new(),
                })
            }
        }
        Action::ToggleHelp => Transition::Screen(Screen::Help { focus }),
        Action::Back | Action::Quit => Transition::Quit,
    }
}

/// Help: any dismiss key returns to editing at the same focus.
fn update_help(focus: usize, action: &Action) -> Transition {
    match action {
        Action::ToggleHelp | Action::Back => Transition::Screen(Screen::Editing { focus }),
        Action::Quit => Transition::Quit,
        _ => Transition::Screen(Screen::Help { focus }),
    }
}

// ============================================================================
// TESTS
// ============================================================================
