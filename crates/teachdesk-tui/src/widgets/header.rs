//! Header bar widget
//!
//! Shows the app title, the current screen and the assistant status pill.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};
use unicode_width::UnicodeWidthStr;

use teachdesk_app::Screen;

use crate::theme::{palette, styles};

pub const READY_LABEL: &str = "AI Assistant Ready";

/// Display name of a screen in the header
pub fn screen_title(screen: Screen) -> &'static str {
    match screen {
        Screen::Landing => "Welcome",
        Screen::Home => "Home",
        Screen::CreateNew => "Create New Plan",
        Screen::MatchStyle => "Match My Style",
        Screen::Result => "Lesson Plan",
        Screen::MyLessons => "My Lessons",
    }
}

pub struct MainHeader {
    screen: Screen,
    ready: bool,
}

impl MainHeader {
    pub fn new(screen: Screen, ready: bool) -> Self {
        Self { screen, ready }
    }
}

impl Widget for MainHeader {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = styles::glass_block(false);
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 || inner.width == 0 {
            return;
        }

        let left = Line::from(vec![
            Span::raw(" "),
            Span::styled(
                "TeachDesk",
                Style::default()
                    .fg(palette::ACCENT)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" "),
            Span::styled("/", styles::text_muted()),
            Span::raw(" "),
            Span::styled(screen_title(self.screen), styles::text_secondary()),
        ]);
        let left_width = left.width() as u16;
        buf.set_line(inner.x, inner.y, &left, inner.width);

        if !self.ready {
            return;
        }

        let pill = format!(" ● {} ", READY_LABEL);
        let pill_width = pill.width() as u16;
        // Drop the pill rather than overlap the title
        if left_width + pill_width + 2 > inner.width {
            return;
        }
        let x = inner.x + inner.width - pill_width;
        buf.set_line(
            x,
            inner.y,
            &Line::styled(pill, styles::status_green()),
            pill_width,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestTerminal;

    #[test]
    fn test_header_shows_title_and_screen() {
        let mut term = TestTerminal::new();
        term.render_widget(MainHeader::new(Screen::MyLessons, false), term.area());

        assert!(term.buffer_contains("TeachDesk"));
        assert!(term.buffer_contains("My Lessons"));
        assert!(!term.buffer_contains(READY_LABEL));
    }

    #[test]
    fn test_ready_pill_when_key_present() {
        let mut term = TestTerminal::new();
        term.render_widget(MainHeader::new(Screen::Home, true), term.area());

        assert!(term.buffer_contains(READY_LABEL));
    }

    #[test]
    fn test_pill_dropped_when_narrow() {
        let mut term = TestTerminal::with_size(30, 3);
        term.render_widget(MainHeader::new(Screen::CreateNew, true), term.area());

        assert!(term.buffer_contains("TeachDesk"));
        assert!(!term.buffer_contains("Ready"));
    }
}
