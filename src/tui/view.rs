//! Pure rendering: map App state to ratatui widget trees.
//!
//! Widget-building functions are pure (state in, widgets out); the only
//! effect is Frame::render_widget() which writes to the terminal buffer.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};

use crate::form::FormFields;
use crate::types::FormKind;

use super::state::{App, Screen};
use super::theme;

/// Width of the label column.
const LABEL_WIDTH: usize = 20;

/// Width of the value column.
const VALUE_WIDTH: usize = 14;

// ============================================================================
// DISPATCH
// ============================================================================

/// Render the current screen to the terminal frame.
pub fn render(app: &App, frame: &mut Frame) {
    let area = frame.area();

    let chunks = Layout::vertical([
        Constraint::Length(1), // title
        Constraint::Min(0),    // content
        Constraint::Length(1), // help
    ])
    .split(area);

    frame.render_widget(render_title(app.kind), chunks[0]);
    frame.render_widget(render_help_line(&app.screen), chunks[2]);

    match app.screen {
        Screen::Editing { focus } => render_form(app, focus, frame, chunks[1]),
        Screen::Help { .. } => render_help(app.kind, frame, chunks[1]),
    }
}

// ============================================================================
// SHARED LAYOUT
// ============================================================================

fn render_title(kind: FormKind) -> Paragraph<'static> {
    Paragraph::new(Line::from(vec![
        Span::styled("purchase-costs", theme::STYLE_TITLE),
        Span::styled(format!("  {} form", kind), theme::STYLE_DIM),
    ]))
}

fn render_help_line(screen: &Screen) -> Paragraph<'static> {
    let help_text = match screen {
        Screen::Editing { .. } => "[Tab/↓] next  [⇧Tab/↑] prev  [^U] clear  [F1] help  [Esc] quit",
        Screen::Help { .. } => "[F1/Esc] back  [^C] quit",
    };
    Paragraph::new(Span::styled(help_text, theme::STYLE_HELP))
}

// ============================================================================
// SCREEN: FORM
// ============================================================================

fn render_form(app: &App, focus: usize, frame: &mut Frame, area: Rect) {
    let mut lines = vec![Line::from("")];

    for (i, &field) in app.kind.layout().iter().enumerate() {
        let value = app.form.get(field).unwrap_or("");
        let written = app
            .last
            .as_ref()
            .is_some_and(|r| r.written(field).is_some());

        let label_style = if field.is_derived() {
            theme::STYLE_DERIVED
        } else {
            theme::STYLE_LABEL
        };

        let cursor = if i == focus { "▏" } else { " " };
        let value_style = if written {
            theme::STYLE_WRITTEN
        } else if i == focus {
            theme::STYLE_INTERACTIVE
        } else {
            ratatui::style::Style::new()
        };

        let mut spans = vec![
            Span::raw("  "),
            Span::styled(format!("{:<width$}", field.label(), width = LABEL_WIDTH), label_style),
            Span::styled(format!("[{:>width$}]", value, width = VALUE_WIDTH), value_style),
            Span::raw(cursor),
        ];
        if !app.kind.tracked_fields().contains(&field) {
            spans.push(Span::styled(" not tracked", theme::STYLE_DIM));
        }

        let line = if i == focus {
            Line::from(spans).style(theme::STYLE_FOCUS)
        } else {
            Line::from(spans)
        };
        lines.push(line);
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "  ─────────────────────────────────────────",
        theme::STYLE_DIM,
    )));

    if let Some(recalc) = &app.last {
        lines.push(Line::from(vec![
            Span::styled("  Total: ", theme::STYLE_LABEL),
            Span::styled(recalc.total_rule.describe(), theme::STYLE_DIM),
        ]));
    } else {
        lines.push(Line::from(Span::styled(
            "  Type in a tracked field to recalculate",
            theme::STYLE_DIM,
        )));
    }

    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

// ============================================================================
// SCREEN: HELP
// ============================================================================

fn render_help(kind: FormKind, frame: &mut Frame, area: Rect) {
    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled("  Keys", theme::STYLE_TITLE)),
        key_line("Tab, ↓, Enter", "next field"),
        key_line("Shift+Tab, ↑", "previous field"),
        key_line("Backspace", "delete last character"),
        key_line("Ctrl+U", "clear field"),
        key_line("Esc, Ctrl+C", "quit"),
        Line::from(""),
        Line::from(Span::styled("  Recalculates on", theme::STYLE_TITLE)),
    ];

    for field in kind.tracked_fields() {
        lines.push(Line::from(Span::raw(format!("    {}", field.label()))));
    }

    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

fn key_line(keys: &'static str, what: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("    {:<16}", keys), theme::STYLE_INTERACTIVE),
        Span::raw(what),
    ])
}

// ============================================================================
// TESTS
// ============================================================================
