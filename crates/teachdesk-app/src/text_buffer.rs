//! Editable text with a cursor, shared by form fields, the key prompt and
//! the plan editor.
//!
//! The cursor is a byte offset that always sits on a char boundary.

/// One editing operation produced by the key handler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEdit {
    Insert(char),
    Newline,
    Backspace,
    Delete,
    Left,
    Right,
    Up,
    Down,
    LineStart,
    LineEnd,
    Clear,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextBuffer {
    text: String,
    cursor: usize,
}

impl TextBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Buffer holding `text` with the cursor at the end
    pub fn with_text(text: impl Into<String>) -> Self {
        let text = text.into();
        let cursor = text.len();
        Self { text, cursor }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Trimmed contents
    pub fn value(&self) -> &str {
        self.text.trim()
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    /// Apply an edit. `multiline` controls whether newlines are accepted.
    pub fn apply(&mut self, edit: TextEdit, multiline: bool) {
        match edit {
            TextEdit::Insert(c) => self.insert(c),
            TextEdit::Newline if multiline => self.insert('\n'),
            TextEdit::Newline => {}
            TextEdit::Backspace => self.backspace(),
            TextEdit::Delete => self.delete(),
            TextEdit::Left => self.cursor = self.prev_boundary(),
            TextEdit::Right => self.cursor = self.next_boundary(),
            TextEdit::Up => self.move_vertical(-1),
            TextEdit::Down => self.move_vertical(1),
            TextEdit::LineStart => self.cursor = self.line_start(self.cursor),
            TextEdit::LineEnd => self.cursor = self.line_end(self.cursor),
            TextEdit::Clear => self.clear(),
        }
    }

    /// (line, column) of the cursor, column counted in chars
    pub fn cursor_position(&self) -> (usize, usize) {
        let before = &self.text[..self.cursor];
        let line = before.matches('\n').count();
        let column = before[self.line_start(self.cursor)..].chars().count();
        (line, column)
    }

    fn insert(&mut self, c: char) {
        self.text.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let prev = self.prev_boundary();
        self.text.replace_range(prev..self.cursor, "");
        self.cursor = prev;
    }

    fn delete(&mut self) {
        if self.cursor >= self.text.len() {
            return;
        }
        let next = self.next_boundary();
        self.text.replace_range(self.cursor..next, "");
    }

    fn prev_boundary(&self) -> usize {
        self.text[..self.cursor]
            .char_indices()
            .next_back()
            .map(|(i, _)| i)
            .unwrap_or(0)
    }

    fn next_boundary(&self) -> usize {
        self.text[self.cursor..]
            .chars()
            .next()
            .map(|c| self.cursor + c.len_utf8())
            .unwrap_or(self.cursor)
    }

    fn line_start(&self, pos: usize) -> usize {
        self.text[..pos].rfind('\n').map(|i| i + 1).unwrap_or(0)
    }

    fn line_end(&self, pos: usize) -> usize {
        self.text[pos..]
            .find('\n')
            .map(|i| pos + i)
            .unwrap_or(self.text.len())
    }

    fn move_vertical(&mut self, delta: i32) {
        let (_, column) = self.cursor_position();
        let start = self.line_start(self.cursor);

        let target_start = if delta < 0 {
            if start == 0 {
                return;
            }
            self.line_start(start - 1)
        } else {
            let end = self.line_end(self.cursor);
            if end >= self.text.len() {
                return;
            }
            end + 1
        };

        let target_end = self.line_end(target_start);
        let line = &self.text[target_start..target_end];
        let offset = line
            .char_indices()
            .nth(column)
            .map(|(i, _)| i)
            .unwrap_or(line.len());
        self.cursor = target_start + offset;
    }
}
