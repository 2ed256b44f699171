//! Home screen: the three entry points

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};

use crate::theme::styles;

struct Card {
    key: &'static str,
    title: &'static str,
    detail: String,
}

pub struct Home {
    saved_count: usize,
}

impl Home {
    pub fn new(saved_count: usize) -> Self {
        Self { saved_count }
    }

    fn cards(&self) -> [Card; 3] {
        let saved = match self.saved_count {
            0 => "No saved lessons yet".to_string(),
            1 => "1 saved lesson".to_string(),
            n => format!("{} saved lessons", n),
        };
        [
            Card {
                key: "1",
                title: "Create New Plan",
                detail: "Draft a complete plan from a grade, subject and topic".to_string(),
            },
            Card {
                key: "2",
                title: "Match My Style",
                detail: "Reuse the structure and tone of a plan you already have".to_string(),
            },
            Card {
                key: "3",
                title: "My Lessons",
                detail: saved,
            },
        ]
    }
}

impl Widget for Home {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let direction = if area.width >= 90 {
            Direction::Horizontal
        } else {
            Direction::Vertical
        };
        let chunks = Layout::default()
            .direction(direction)
            .constraints([
                Constraint::Ratio(1, 3),
                Constraint::Ratio(1, 3),
                Constraint::Ratio(1, 3),
            ])
            .split(area);

        for (card, chunk) in self.cards().into_iter().zip(chunks.iter()) {
            let block = styles::glass_block(false).title(Line::from(vec![
                Span::styled(" [", styles::text_muted()),
                Span::styled(card.key, styles::keybinding()),
                Span::styled("] ", styles::text_muted()),
            ]));
            let inner = block.inner(*chunk);
            block.render(*chunk, buf);

            Paragraph::new(vec![
                Line::from(Span::styled(card.title, styles::title())),
                Line::from(Span::styled(card.detail, styles::text_secondary())),
            ])
            .wrap(Wrap { trim: true })
            .render(inner, buf);
        }
    }
}
