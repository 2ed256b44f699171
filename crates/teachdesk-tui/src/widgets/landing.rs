//! Welcome screen shown until an API key is available

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};

use super::modal_overlay::centered_rect;
use crate::theme::styles;

const FEATURES: &[(&str, &str)] = &[
    (
        "Instant lesson plans",
        "Objectives, activities and assessment for any grade and topic",
    ),
    (
        "Match your style",
        "Attach a plan you already wrote and get a new one in the same format",
    ),
    (
        "Visual aids",
        "Generate a classroom illustration for any plan",
    ),
];

pub struct Landing;

impl Widget for Landing {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let height = 6 + FEATURES.len() as u16 * 2 + 2;
        let card = centered_rect(area.width.min(72), height, area);

        let block = styles::glass_block(true);
        let inner = block.inner(card);
        block.render(card, buf);

        let mut lines = vec![
            Line::from(Span::styled("TeachDesk", styles::accent_bold())),
            Line::from(Span::styled(
                "Your AI lesson-planning assistant",
                styles::text_secondary(),
            )),
            Line::default(),
        ];
        for (title, detail) in FEATURES {
            lines.push(Line::from(vec![
                Span::styled("◆ ", styles::accent()),
                Span::styled(*title, styles::title()),
            ]));
            lines.push(Line::from(Span::styled(*detail, styles::text_muted())));
        }
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            "  Get Started  ",
            styles::button(true),
        )));

        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(inner, buf);
    }
}
