//! Result screen: the plan (or its editor) and the visual-aid side panel

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};

use teachdesk_app::state::ActiveResult;
use teachdesk_app::text_buffer::TextBuffer;
use teachdesk_core::ImageResolution;

use crate::layout::result_columns;
use crate::theme::{palette, styles};

/// Subtitle describing where the plan came from
fn meta_line(result: &ActiveResult) -> Line<'static> {
    let lesson = &result.lesson;
    let mut spans = Vec::new();

    match (&lesson.grade, &lesson.subject) {
        (Some(grade), Some(subject)) => {
            spans.push(Span::styled(grade.clone(), styles::accent()));
            spans.push(Span::styled(" · ", styles::text_muted()));
            spans.push(Span::styled(subject.clone(), styles::text_secondary()));
        }
        _ => match &lesson.source_file {
            Some(path) => spans.push(Span::styled(
                format!("Style matched from {}", path.display()),
                styles::text_secondary(),
            )),
            None => spans.push(Span::styled("Style matched", styles::text_secondary())),
        },
    }

    spans.push(Span::styled("   ", styles::text_muted()));
    if result.is_saved {
        spans.push(Span::styled("✓ Saved", styles::status_green()));
    } else {
        spans.push(Span::styled("● Unsaved", styles::status_yellow()));
    }
    Line::from(spans)
}

/// Approximate decoded size of a base64 data URI in KiB
fn data_uri_kib(uri: &str) -> usize {
    let payload = uri.split_once(',').map(|(_, data)| data).unwrap_or(uri);
    (payload.len() * 3 / 4).div_ceil(1024)
}

fn resolution_line(selected: ImageResolution, enabled: bool) -> Line<'static> {
    let mut spans = vec![Span::styled("Size ", styles::text_secondary())];
    for resolution in ImageResolution::ALL {
        let style = if resolution == selected {
            if enabled {
                styles::focused_selected()
            } else {
                styles::text_primary().add_modifier(Modifier::REVERSED)
            }
        } else {
            styles::text_muted()
        };
        spans.push(Span::styled(format!(" {} ", resolution), style));
        spans.push(Span::raw(" "));
    }
    Line::from(spans)
}

/// Render a multi-line buffer with a visible cursor, scrolled to keep the cursor on screen
fn render_editor(editor: &TextBuffer, area: Rect, buf: &mut Buffer) {
    if area.width == 0 || area.height == 0 {
        return;
    }
    let (row, col) = editor.cursor_position();
    let top = (row + 1).saturating_sub(area.height as usize);
    let left = (col + 1).saturating_sub(area.width as usize);

    for (i, line) in editor
        .text()
        .split('\n')
        .skip(top)
        .take(area.height as usize)
        .enumerate()
    {
        let visible: String = line.chars().skip(left).collect();
        buf.set_line(
            area.x,
            area.y + i as u16,
            &Line::styled(visible, styles::text_primary()),
            area.width,
        );
    }

    let x = area.x + (col - left) as u16;
    let y = area.y + (row - top) as u16;
    if let Some(cell) = buf.cell_mut((x, y)) {
        cell.set_bg(palette::ACCENT).set_fg(palette::CONTRAST_FG);
    }
}

pub struct ResultView<'a> {
    result: &'a ActiveResult,
    generating_image: bool,
}

impl<'a> ResultView<'a> {
    pub fn new(result: &'a ActiveResult) -> Self {
        Self {
            result,
            generating_image: false,
        }
    }

    /// A visual-aid request is outstanding
    pub fn generating_image(mut self, generating: bool) -> Self {
        self.generating_image = generating;
        self
    }

    fn render_plan(&self, area: Rect, buf: &mut Buffer) {
        let title = if self.result.is_editing() {
            " Editing plan "
        } else {
            " Lesson Plan "
        };
        let block = styles::glass_block(self.result.is_editing())
            .title(Span::styled(title, styles::title()))
            .title_bottom(Line::from(vec![
                Span::styled(" [", styles::text_muted()),
                Span::styled("Esc", styles::keybinding()),
                Span::styled(format!("] {} ", self.result.back_label()), styles::text_muted()),
            ]));
        let inner = block.inner(area);
        block.render(area, buf);

        let [meta, _, body] = Layout::vertical([
            Constraint::Length(2),
            Constraint::Length(1),
            Constraint::Min(1),
        ])
        .areas(inner);

        Paragraph::new(vec![
            Line::from(Span::styled(self.result.lesson.topic.clone(), styles::title())),
            meta_line(self.result),
        ])
        .render(meta, buf);

        match &self.result.editor {
            Some(editor) => render_editor(editor, body, buf),
            None => Paragraph::new(self.result.lesson.content.as_str())
                .style(styles::text_primary())
                .wrap(Wrap { trim: false })
                .scroll((self.result.scroll, 0))
                .render(body, buf),
        }
    }

    fn render_side_panel(&self, area: Rect, buf: &mut Buffer) {
        let block = styles::glass_block(false).title(Span::styled(" Visual Aid ", styles::title()));
        let inner = block.inner(area);
        block.render(area, buf);

        let result = self.result;
        let mut lines = vec![resolution_line(result.resolution, !self.generating_image)];

        if self.generating_image {
            lines.push(Line::from(Span::styled(
                "⟳ Generating visual aid...",
                styles::status_yellow(),
            )));
        } else if let Some(uri) = &result.lesson.generated_image_url {
            lines.push(Line::from(Span::styled(
                format!("✓ Image ready ({} KB)", data_uri_kib(uri)),
                styles::status_green(),
            )));
            lines.push(Line::from(vec![
                Span::styled("[", styles::text_muted()),
                Span::styled("i", styles::keybinding()),
                Span::styled("] Export .png  ", styles::text_muted()),
                Span::styled("[", styles::text_muted()),
                Span::styled("x", styles::keybinding()),
                Span::styled("] Clear", styles::text_muted()),
            ]));
        } else {
            lines.push(Line::from(vec![
                Span::styled("[", styles::text_muted()),
                Span::styled("v", styles::keybinding()),
                Span::styled("] Generate an illustration", styles::text_muted()),
            ]));
        }

        if !result.lesson.grounding_refs.is_empty() {
            lines.push(Line::default());
            lines.push(Line::from(Span::styled("Sources", styles::title())));
            for reference in &result.lesson.grounding_refs {
                lines.push(Line::from(vec![
                    Span::styled("• ", styles::accent()),
                    Span::styled(reference.title.clone(), styles::text_secondary()),
                ]));
                lines.push(Line::from(Span::styled(
                    format!("  {}", reference.uri),
                    styles::text_muted(),
                )));
            }
        }

        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .render(inner, buf);
    }
}

impl Widget for ResultView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (plan, side) = result_columns(area);
        self.render_plan(plan, buf);
        self.render_side_panel(side, buf);
    }
}
