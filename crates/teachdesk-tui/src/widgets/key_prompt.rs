//! API key entry modal

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};

use teachdesk_app::state::KeyPromptState;

use super::modal_overlay::open_modal;
use super::TextField;
use crate::theme::styles;

const WIDTH: u16 = 64;
const HEIGHT: u16 = 11;

pub struct KeyPrompt<'a> {
    prompt: &'a KeyPromptState,
}

impl<'a> KeyPrompt<'a> {
    pub fn new(prompt: &'a KeyPromptState) -> Self {
        Self { prompt }
    }
}

impl Widget for KeyPrompt<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let modal = open_modal(buf, area, WIDTH, HEIGHT);
        let block = styles::modal_block("Connect to Gemini");
        let inner = block.inner(modal);
        block.render(modal, buf);

        let [intro, field, status] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(1),
        ])
        .areas(inner);

        Paragraph::new(vec![
            Line::from(Span::styled(
                "Paste a Gemini API key to enable plan generation.",
                styles::text_primary(),
            )),
            Line::from(Span::styled(
                "Keys can also be set with GEMINI_API_KEY.",
                styles::text_muted(),
            )),
        ])
        .wrap(Wrap { trim: true })
        .render(intro, buf);

        TextField::new("API key", &self.prompt.input)
            .masked()
            .focused(!self.prompt.submitting)
            .render(field, buf);

        let line = if self.prompt.submitting {
            Line::from(Span::styled("Checking key...", styles::status_yellow()))
        } else if let Some(error) = &self.prompt.error {
            Line::from(Span::styled(error.clone(), styles::status_red()))
        } else {
            Line::from(vec![
                Span::styled("[", styles::text_muted()),
                Span::styled("Enter", styles::keybinding()),
                Span::styled("] Save  [", styles::text_muted()),
                Span::styled("Esc", styles::keybinding()),
                Span::styled("] Cancel", styles::text_muted()),
            ])
        };
        Paragraph::new(line).wrap(Wrap { trim: true }).render(status, buf);
    }
}
