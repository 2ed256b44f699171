//! My Lessons: saved plans, newest first

use chrono::Local;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{List, ListItem, ListState, Paragraph, StatefulWidget, Widget},
};

use teachdesk_core::SavedLesson;

use crate::theme::styles;

pub const EMPTY_MESSAGE: &str = "No saved lessons yet";

fn lesson_item(lesson: &SavedLesson) -> ListItem<'static> {
    let mut title = vec![Span::styled(lesson.topic.clone(), styles::title())];
    if lesson.generated_image_url.is_some() {
        title.push(Span::styled("  [image]", styles::accent()));
    }

    let context = match (&lesson.grade, &lesson.subject) {
        (Some(grade), Some(subject)) => format!("{} · {}", grade, subject),
        _ => "Style matched".to_string(),
    };
    let created = lesson
        .created_at
        .with_timezone(&Local)
        .format("%b %-d, %Y")
        .to_string();

    ListItem::new(vec![
        Line::from(title),
        Line::from(vec![
            Span::styled(context, styles::text_secondary()),
            Span::styled(format!("  {}", created), styles::text_muted()),
        ]),
    ])
}

pub struct LessonsList<'a> {
    lessons: &'a [SavedLesson],
    selected: usize,
}

impl<'a> LessonsList<'a> {
    pub fn new(lessons: &'a [SavedLesson], selected: usize) -> Self {
        Self { lessons, selected }
    }
}

impl Widget for LessonsList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = styles::glass_block(true).title(Span::styled(
            format!(" My Lessons ({}) ", self.lessons.len()),
            styles::title(),
        ));

        if self.lessons.is_empty() {
            let inner = block.inner(area);
            block.render(area, buf);
            Paragraph::new(vec![
                Line::from(Span::styled(EMPTY_MESSAGE, styles::text_secondary())),
                Line::from(vec![
                    Span::styled("Press ", styles::text_muted()),
                    Span::styled("n", styles::keybinding()),
                    Span::styled(" to create your first plan", styles::text_muted()),
                ]),
            ])
            .alignment(Alignment::Center)
            .render(inner, buf);
            return;
        }

        let items: Vec<ListItem> = self.lessons.iter().map(lesson_item).collect();
        let list = List::new(items)
            .block(block)
            .highlight_style(styles::focused_selected())
            .highlight_symbol("▶ ");

        let mut list_state = ListState::default().with_selected(Some(self.selected));
        StatefulWidget::render(list, area, buf, &mut list_state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestTerminal;
    use teachdesk_core::LessonResult;

    fn saved(id: &str, topic: &str) -> SavedLesson {
        LessonResult::new_plan("3rd Grade", "Science", topic, "body", vec![]).to_saved(id)
    }

    #[test]
    fn test_empty_state() {
        let mut term = TestTerminal::new();
        term.render_widget(LessonsList::new(&[], 0), term.area());

        assert!(term.buffer_contains(EMPTY_MESSAGE));
    }

    #[test]
    fn test_lists_topics_with_context() {
        let lessons = vec![saved("a", "Magnets"), saved("b", "Weather")];
        let mut term = TestTerminal::new();
        term.render_widget(LessonsList::new(&lessons, 1), term.area());

        assert!(term.buffer_contains("My Lessons (2)"));
        assert!(term.buffer_contains("Magnets"));
        assert!(term.buffer_contains("Weather"));
        assert!(term.buffer_contains("3rd Grade · Science"));
    }

    #[test]
    fn test_image_badge() {
        let mut lesson = saved("a", "Volcanoes");
        lesson.generated_image_url = Some("data:image/png;base64,AA".into());
        let mut term = TestTerminal::new();
        term.render_widget(LessonsList::new(&[lesson], 0), term.area());

        assert!(term.buffer_contains("[image]"));
    }
}
