//! Footer: one status line plus the key hints for the current screen

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::Widget,
};

use teachdesk_app::state::ActiveResult;
use teachdesk_app::{AppState, Screen};

use crate::theme::styles;

/// `(key, label)` pairs shown on the hint line
fn key_hints(state: &AppState) -> Vec<(&'static str, &'static str)> {
    if state.key_prompt.is_some() {
        return vec![("Enter", "Save key"), ("Esc", "Cancel")];
    }
    if state.confirm_delete.is_some() {
        return vec![("y", "Delete"), ("n", "Keep")];
    }

    match state.screen {
        Screen::Landing => vec![("Enter", "Get Started"), ("q", "Quit")],
        Screen::Home => vec![
            ("1", "Create New"),
            ("2", "Match Style"),
            ("3", "My Lessons"),
            ("q", "Quit"),
        ],
        Screen::CreateNew | Screen::MatchStyle => vec![
            ("Tab", "Next field"),
            ("Enter", "Submit"),
            ("Esc", "Home"),
        ],
        Screen::Result => match &state.result {
            Some(ActiveResult {
                editor: Some(_), ..
            }) => vec![("Ctrl+S", "Save edit"), ("Esc", "Cancel")],
            Some(result) if result.show_share_options => vec![
                ("c", "Copy"),
                ("d", "Download"),
                ("Esc", "Close"),
            ],
            _ => vec![
                ("s", "Save"),
                ("e", "Edit"),
                ("v", "Visual aid"),
                ("r", "Size"),
                ("p", "Share"),
                ("i", "Export image"),
                ("l", "My Lessons"),
                ("Esc", "Back"),
            ],
        },
        Screen::MyLessons => vec![
            ("Enter", "Open"),
            ("d", "Delete"),
            ("n", "New"),
            ("Esc", "Home"),
            ("q", "Quit"),
        ],
    }
}

/// Text describing the outstanding request, if any
fn loading_text(state: &AppState) -> Option<&'static str> {
    if state.is_loading_on(Screen::CreateNew) {
        Some("Drafting your lesson plan...")
    } else if state.is_loading_on(Screen::MatchStyle) {
        Some("Analyzing your document...")
    } else if state.is_generating_image() {
        Some("Generating visual aid...")
    } else {
        None
    }
}

pub struct StatusBar<'a> {
    state: &'a AppState,
}

impl<'a> StatusBar<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    fn status_line(&self) -> Line<'a> {
        if let Some(error) = &self.state.error {
            Line::from(vec![
                Span::styled(" ✗ ", styles::status_red()),
                Span::styled(error.as_str(), styles::status_red()),
            ])
        } else if let Some(notice) = &self.state.notice {
            Line::from(vec![
                Span::styled(" ✓ ", styles::status_green()),
                Span::styled(notice.text.as_str(), styles::status_green()),
            ])
        } else if let Some(text) = loading_text(self.state) {
            Line::from(vec![
                Span::styled(" ⟳ ", styles::status_yellow()),
                Span::styled(text, styles::status_yellow()),
            ])
        } else {
            Line::default()
        }
    }

    fn hint_line(&self) -> Line<'static> {
        let mut spans = vec![Span::raw(" ")];
        for (key, label) in key_hints(self.state) {
            spans.push(Span::styled("[", styles::text_muted()));
            spans.push(Span::styled(key, styles::keybinding()));
            spans.push(Span::styled(format!("] {}  ", label), styles::text_muted()));
        }
        Line::from(spans)
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 {
            return;
        }

        buf.set_line(area.x, area.y, &self.status_line(), area.width);
        if area.height > 1 {
            buf.set_line(area.x, area.y + 1, &self.hint_line(), area.width);
        }
    }
}
