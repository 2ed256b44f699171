//! Create New form: grade selector, subject, topic and the submit button

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use teachdesk_app::state::{CreateField, CreateForm};

use super::TextField;
use crate::theme::styles;

pub struct CreateFormView<'a> {
    form: &'a CreateForm,
    loading: bool,
}

impl<'a> CreateFormView<'a> {
    pub fn new(form: &'a CreateForm, loading: bool) -> Self {
        Self { form, loading }
    }

    fn render_grade(&self, area: Rect, buf: &mut Buffer) {
        let focused = self.form.focus == CreateField::Grade;
        let block = styles::glass_block(focused).title(Span::styled(
            " Grade Level ",
            if focused {
                styles::accent_bold()
            } else {
                styles::text_secondary()
            },
        ));
        let inner = block.inner(area);
        block.render(area, buf);

        let arrow = if focused {
            styles::accent()
        } else {
            styles::text_muted()
        };
        Paragraph::new(Line::from(vec![
            Span::styled("◀ ", arrow),
            Span::styled(self.form.grade(), styles::text_primary()),
            Span::styled(" ▶", arrow),
        ]))
        .render(inner, buf);
    }
}

/// Label of a submit button, swapped for progress text while loading
pub(super) fn button_line(label: &str, busy_label: &str, enabled: bool, loading: bool) -> Line<'static> {
    let text = if loading { busy_label } else { label };
    Line::from(Span::styled(
        format!("  {}  ", text),
        styles::button(enabled && !loading),
    ))
}

impl Widget for CreateFormView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let outer = styles::glass_block(false).title(Span::styled(" New Lesson Plan ", styles::title()));
        let inner = outer.inner(area);
        outer.render(area, buf);

        let [grade, subject, topic, _, button] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(inner);

        self.render_grade(grade, buf);
        TextField::new("Subject", &self.form.subject)
            .focused(self.form.focus == CreateField::Subject)
            .placeholder("e.g. Life Science")
            .render(subject, buf);
        TextField::new("Topic", &self.form.topic)
            .focused(self.form.focus == CreateField::Topic)
            .placeholder("e.g. Photosynthesis")
            .render(topic, buf);

        Paragraph::new(button_line(
            "Generate Plan",
            "Drafting plan...",
            self.form.can_submit(),
            self.loading,
        ))
        .alignment(Alignment::Center)
        .render(button, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestTerminal;
    use teachdesk_app::text_buffer::TextBuffer;

    #[test]
    fn test_shows_default_grade() {
        let mut term = TestTerminal::new();
        let form = CreateForm::new("7th Grade");
        term.render_widget(CreateFormView::new(&form, false), term.area());

        assert!(term.buffer_contains("◀ 7th Grade ▶"));
        assert!(term.buffer_contains("Generate Plan"));
    }

    #[test]
    fn test_loading_swaps_button_label() {
        let mut term = TestTerminal::new();
        let mut form = CreateForm::new("7th Grade");
        form.subject = TextBuffer::with_text("Math");
        form.topic = TextBuffer::with_text("Angles");
        term.render_widget(CreateFormView::new(&form, true), term.area());

        assert!(term.buffer_contains("Drafting plan..."));
        assert!(!term.buffer_contains("Generate Plan"));
    }

    #[test]
    fn test_button_disabled_until_filled() {
        let form = CreateForm::new("7th Grade");
        let line = button_line("Generate Plan", "Drafting plan...", form.can_submit(), false);
        assert_eq!(line.spans[0].style, styles::button(false));
    }
}
