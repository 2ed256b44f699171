//! Match Style form: source document path and topic

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use teachdesk_app::state::{MatchField, MatchForm};
use teachdesk_genai::SourceKind;

use super::create_form::button_line;
use super::TextField;
use crate::theme::styles;

/// Hint under the file field describing what was typed
fn source_hint(form: &MatchForm) -> Line<'static> {
    match form.source_file() {
        None => Line::from(Span::styled(
            "PDF or plain-text (.txt, .md) example plan",
            styles::text_muted(),
        )),
        Some(path) => match SourceKind::from_path(&path) {
            Some(SourceKind::Pdf) => {
                Line::from(Span::styled("✓ PDF document", styles::status_green()))
            }
            Some(SourceKind::PlainText) => {
                Line::from(Span::styled("✓ Plain-text document", styles::status_green()))
            }
            None => Line::from(Span::styled(
                "Unsupported file type; use .pdf, .txt or .md",
                styles::status_yellow(),
            )),
        },
    }
}

pub struct MatchFormView<'a> {
    form: &'a MatchForm,
    loading: bool,
}

impl<'a> MatchFormView<'a> {
    pub fn new(form: &'a MatchForm, loading: bool) -> Self {
        Self { form, loading }
    }
}

impl Widget for MatchFormView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let outer = styles::glass_block(false).title(Span::styled(" Match My Style ", styles::title()));
        let inner = outer.inner(area);
        outer.render(area, buf);

        let [file, hint, topic, _, button] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(inner);

        TextField::new("Example plan file", &self.form.file_path)
            .focused(self.form.focus == MatchField::File)
            .placeholder("./my-plan.pdf")
            .render(file, buf);
        Paragraph::new(source_hint(self.form)).render(hint, buf);
        TextField::new("New topic", &self.form.topic)
            .focused(self.form.focus == MatchField::Topic)
            .placeholder("e.g. The Water Cycle")
            .render(topic, buf);

        Paragraph::new(button_line(
            "Match Style",
            "Analyzing...",
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
    fn test_hint_reports_pdf() {
        let form = MatchForm {
            file_path: TextBuffer::with_text("plan.PDF"),
            ..Default::default()
        };
        assert_eq!(source_hint(&form).spans[0].content, "✓ PDF document");
    }

    #[test]
    fn test_hint_warns_on_unsupported() {
        let form = MatchForm {
            file_path: TextBuffer::with_text("plan.docx"),
            ..Default::default()
        };
        assert!(source_hint(&form).spans[0].content.starts_with("Unsupported"));
    }

    #[test]
    fn test_loading_button() {
        let mut term = TestTerminal::new();
        let form = MatchForm::default();
        term.render_widget(MatchFormView::new(&form, true), term.area());

        assert!(term.buffer_contains("Analyzing..."));
        assert!(term.buffer_contains("Example plan file"));
    }
}
