//! Delete confirmation dialog

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};

use teachdesk_app::state::ConfirmDeleteState;

use super::modal_overlay::open_modal;
use crate::theme::styles;

pub struct ConfirmDialog<'a> {
    confirm: &'a ConfirmDeleteState,
}

impl<'a> ConfirmDialog<'a> {
    pub fn new(confirm: &'a ConfirmDeleteState) -> Self {
        Self { confirm }
    }
}

impl Widget for ConfirmDialog<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let modal = open_modal(buf, area, 50, 7);
        let block = styles::modal_block("Delete lesson");
        let inner = block.inner(modal);
        block.render(modal, buf);

        Paragraph::new(vec![
            Line::from(vec![
                Span::styled("Delete ", styles::text_primary()),
                Span::styled(format!("\"{}\"", self.confirm.topic), styles::title()),
                Span::styled("?", styles::text_primary()),
            ]),
            Line::from(Span::styled("This cannot be undone.", styles::text_muted())),
            Line::default(),
            Line::from(vec![
                Span::styled("[", styles::text_muted()),
                Span::styled("y", styles::keybinding()),
                Span::styled("] Delete   [", styles::text_muted()),
                Span::styled("n", styles::keybinding()),
                Span::styled("] Keep", styles::text_muted()),
            ]),
        ])
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .render(inner, buf);
    }
}
