//! Share menu popup on the Result screen

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use super::modal_overlay::open_modal;
use crate::theme::styles;

const OPTIONS: &[(&str, &str)] = &[("c", "Copy to Clipboard"), ("d", "Download .txt")];

pub struct ShareMenu;

impl Widget for ShareMenu {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let modal = open_modal(buf, area, 32, OPTIONS.len() as u16 + 2);
        let block = styles::modal_block("Share");
        let inner = block.inner(modal);
        block.render(modal, buf);

        let lines: Vec<Line> = OPTIONS
            .iter()
            .map(|(key, label)| {
                Line::from(vec![
                    Span::styled(" [", styles::text_muted()),
                    Span::styled(*key, styles::keybinding()),
                    Span::styled("] ", styles::text_muted()),
                    Span::styled(*label, styles::text_primary()),
                ])
            })
            .collect();
        Paragraph::new(lines).render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestTerminal;

    #[test]
    fn test_menu_options() {
        let mut term = TestTerminal::new();
        term.render_widget(ShareMenu, term.area());

        assert!(term.buffer_contains("[c] Copy to Clipboard"));
        assert!(term.buffer_contains("[d] Download .txt"));
    }
}
