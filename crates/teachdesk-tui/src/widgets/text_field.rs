//! Single-line labelled input used by the forms and the key prompt

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

use teachdesk_app::text_buffer::TextBuffer;

use crate::theme::{palette, styles};

pub struct TextField<'a> {
    label: &'a str,
    buffer: &'a TextBuffer,
    focused: bool,
    masked: bool,
    placeholder: &'a str,
}

impl<'a> TextField<'a> {
    pub fn new(label: &'a str, buffer: &'a TextBuffer) -> Self {
        Self {
            label,
            buffer,
            focused: false,
            masked: false,
            placeholder: "",
        }
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// Render every character as a bullet
    pub fn masked(mut self) -> Self {
        self.masked = true;
        self
    }

    pub fn placeholder(mut self, placeholder: &'a str) -> Self {
        self.placeholder = placeholder;
        self
    }

    /// Visible characters and the cursor column, scrolled so the cursor fits
    fn visible(&self, width: usize) -> (Vec<char>, usize) {
        let chars: Vec<char> = if self.masked {
            vec!['•'; self.buffer.text().chars().count()]
        } else {
            self.buffer.text().chars().collect()
        };
        let (_, cursor) = self.buffer.cursor_position();

        let offset = (cursor + 1).saturating_sub(width);
        let end = (offset + width).min(chars.len());
        (chars[offset.min(end)..end].to_vec(), cursor - offset)
    }
}

impl Widget for TextField<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = styles::glass_block(self.focused)
            .title(Span::styled(
                format!(" {} ", self.label),
                if self.focused {
                    styles::accent_bold()
                } else {
                    styles::text_secondary()
                },
            ));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.width == 0 || inner.height == 0 {
            return;
        }

        if self.buffer.text().is_empty() && !self.focused {
            buf.set_line(
                inner.x,
                inner.y,
                &Line::styled(self.placeholder, styles::text_muted()),
                inner.width,
            );
            return;
        }

        let (chars, cursor_col) = self.visible(inner.width as usize);
        let text: String = chars.iter().collect();
        buf.set_line(
            inner.x,
            inner.y,
            &Line::styled(text, styles::text_primary()),
            inner.width,
        );

        if self.focused {
            let x = inner.x + cursor_col as u16;
            if let Some(cell) = buf.cell_mut((x, inner.y)) {
                cell.set_style(
                    Style::default()
                        .bg(palette::ACCENT)
                        .fg(palette::CONTRAST_FG)
                        .add_modifier(Modifier::BOLD),
                );
            }
        }
    }
}
