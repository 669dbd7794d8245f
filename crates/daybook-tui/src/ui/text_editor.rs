/// Plain text editor state shared by the entry form, the add-todo form and the
/// filter input.
///
/// - Ctrl+A / Ctrl+E: start / end of line
/// - Ctrl+K / Ctrl+U: kill to end / start of line
/// - Ctrl+W: delete word backward
/// - Alt+Left / Alt+Right: word jumping
/// - Ctrl+Z / Ctrl+Y: undo / redo
///
/// Undo only covers unsaved edits to this buffer. It is capped and never
/// reaches stored records.
#[derive(Debug, Clone, Default)]
pub struct TextEditor {
    /// The actual text content (can be multiline)
    pub text: String,
    /// Cursor position as byte offset
    pub cursor: usize,
    undo_stack: Vec<(String, usize)>,
    redo_stack: Vec<(String, usize)>,
}

const UNDO_LIMIT: usize = 100;

impl TextEditor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Editor preloaded with `text`, cursor at the end.
    pub fn with_text(text: impl Into<String>) -> Self {
        let text = text.into();
        let cursor = text.len();
        Self {
            text,
            cursor,
            ..Self::default()
        }
    }

    /// Replace the content (e.g. after autocomplete). Undoable.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.push_undo_state();
        self.text = text.into();
        self.cursor = self.text.len();
    }

    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    fn push_undo_state(&mut self) {
        self.undo_stack.push((self.text.clone(), self.cursor));
        self.redo_stack.clear();
        if self.undo_stack.len() > UNDO_LIMIT {
            self.undo_stack.remove(0);
        }
    }

    pub fn undo(&mut self) {
        if let Some((text, cursor)) = self.undo_stack.pop() {
            self.redo_stack.push((self.text.clone(), self.cursor));
            self.text = text;
            self.cursor = cursor;
        }
    }

    pub fn redo(&mut self) {
        if let Some((text, cursor)) = self.redo_stack.pop() {
            self.undo_stack.push((self.text.clone(), self.cursor));
            self.text = text;
            self.cursor = cursor;
        }
    }

    pub fn insert_char(&mut self, c: char) {
        self.push_undo_state();
        self.text.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    pub fn insert_newline(&mut self) {
        self.insert_char('\n');
    }

    /// Backspace
    pub fn delete_char_before(&mut self) {
        if self.cursor > 0 {
            self.push_undo_state();
            let prev_boundary = self.text[..self.cursor]
                .char_indices()
                .last()
                .map(|(i, _)| i)
                .unwrap_or(0);
            self.text.remove(prev_boundary);
            self.cursor = prev_boundary;
        }
    }

    /// Delete
    pub fn delete_char_at(&mut self) {
        if self.cursor < self.text.len() {
            self.push_undo_state();
            self.text.remove(self.cursor);
        }
    }

    pub fn move_left(&mut self) {
        if self.cursor > 0 {
            self.cursor = self.text[..self.cursor]
                .char_indices()
                .last()
                .map(|(i, _)| i)
                .unwrap_or(0);
        }
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.text.len() {
            self.cursor = self.text[self.cursor..]
                .char_indices()
                .nth(1)
                .map(|(i, _)| self.cursor + i)
                .unwrap_or(self.text.len());
        }
    }

    pub fn move_to_line_start(&mut self) {
        self.cursor = self.text[..self.cursor]
            .rfind('\n')
            .map(|i| i + 1)
            .unwrap_or(0);
    }

    pub fn move_to_line_end(&mut self) {
        self.cursor = self.text[self.cursor..]
            .find('\n')
            .map(|i| self.cursor + i)
            .unwrap_or(self.text.len());
    }

    pub fn kill_to_line_end(&mut self) {
        let end = self.text[self.cursor..]
            .find('\n')
            .map(|i| self.cursor + i)
            .unwrap_or(self.text.len());
        if self.cursor < end {
            self.push_undo_state();
            self.text.drain(self.cursor..end);
        }
    }

    pub fn kill_to_line_start(&mut self) {
        let start = self.text[..self.cursor]
            .rfind('\n')
            .map(|i| i + 1)
            .unwrap_or(0);
        if start < self.cursor {
            self.push_undo_state();
            self.text.drain(start..self.cursor);
            self.cursor = start;
        }
    }

    pub fn delete_word_backward(&mut self) {
        if self.cursor == 0 {
            return;
        }

        let trimmed = self.text[..self.cursor].trim_end();
        let word_start = trimmed
            .rfind(char::is_whitespace)
            .map(|i| i + 1)
            .unwrap_or(0);

        self.push_undo_state();
        self.text.drain(word_start..self.cursor);
        self.cursor = word_start;
    }

    pub fn move_word_left(&mut self) {
        let trimmed = self.text[..self.cursor].trim_end();
        self.cursor = trimmed
            .rfind(char::is_whitespace)
            .map(|i| i + 1)
            .unwrap_or(0);
    }

    pub fn move_word_right(&mut self) {
        let after = &self.text[self.cursor..];
        let word_end = after.find(char::is_whitespace).unwrap_or(after.len());
        let next_word = after[word_end..]
            .find(|c: char| !c.is_whitespace())
            .map(|i| word_end + i)
            .unwrap_or(after.len());
        self.cursor += next_word;
    }

    /// Up one line, keeping the column where possible
    pub fn move_up(&mut self) {
        let (row, col) = self.cursor_position();
        if row == 0 {
            self.cursor = 0;
            return;
        }
        self.cursor = self.offset_of(row - 1, col);
    }

    pub fn move_down(&mut self) {
        let (row, col) = self.cursor_position();
        if row + 1 >= self.text.split('\n').count() {
            self.cursor = self.text.len();
            return;
        }
        self.cursor = self.offset_of(row + 1, col);
    }

    /// Byte offset of (row, col), clamping col to the line and to a char boundary.
    fn offset_of(&self, row: usize, col: usize) -> usize {
        let mut offset = 0;
        for (i, line) in self.text.split('\n').enumerate() {
            if i == row {
                let mut col = col.min(line.len());
                while !line.is_char_boundary(col) {
                    col -= 1;
                }
                return offset + col;
            }
            offset += line.len() + 1;
        }
        self.text.len()
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    /// Cursor as (row, byte column) for rendering
    pub fn cursor_position(&self) -> (usize, usize) {
        let before_cursor = &self.text[..self.cursor];
        let row = before_cursor.matches('\n').count();
        let col = before_cursor
            .rfind('\n')
            .map(|i| self.cursor - i - 1)
            .unwrap_or(self.cursor);
        (row, col)
    }

    /// Cursor column in characters on its line
    pub fn cursor_column_chars(&self) -> usize {
        let before_cursor = &self.text[..self.cursor];
        let line_start = before_cursor.rfind('\n').map(|i| i + 1).unwrap_or(0);
        before_cursor[line_start..].chars().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_backspace_multibyte() {
        let mut editor = TextEditor::new();
        editor.insert_char('h');
        editor.insert_char('é');
        editor.insert_char('!');
        assert_eq!(editor.text, "hé!");
        editor.move_left();
        editor.delete_char_before();
        assert_eq!(editor.text, "h!");
        assert_eq!(editor.cursor, 1);
    }

    #[test]
    fn test_undo_redo() {
        let mut editor = TextEditor::with_text("abc");
        editor.delete_char_before();
        assert_eq!(editor.text, "ab");
        editor.undo();
        assert_eq!(editor.text, "abc");
        editor.redo();
        assert_eq!(editor.text, "ab");
    }

    #[test]
    fn test_line_navigation() {
        let mut editor = TextEditor::with_text("first line\nsecond");
        assert_eq!(editor.cursor_position(), (1, 6));
        editor.move_up();
        assert_eq!(editor.cursor_position(), (0, 6));
        editor.move_to_line_end();
        assert_eq!(editor.cursor, 10);
        editor.move_down();
        assert_eq!(editor.cursor_position(), (1, 6));
        editor.move_to_line_start();
        assert_eq!(editor.cursor_position(), (1, 0));
    }

    #[test]
    fn test_word_operations() {
        let mut editor = TextEditor::with_text("@work last 7");
        editor.delete_word_backward();
        assert_eq!(editor.text, "@work last ");
        editor.move_word_left();
        assert_eq!(editor.cursor, 6);
        editor.move_word_left();
        assert_eq!(editor.cursor, 0);
        editor.move_word_right();
        assert_eq!(editor.cursor, 6);
    }

    #[test]
    fn test_kill_line() {
        let mut editor = TextEditor::with_text("one\ntwo three");
        editor.move_to_line_start();
        editor.move_word_right();
        editor.kill_to_line_end();
        assert_eq!(editor.text, "one\ntwo ");
        editor.kill_to_line_start();
        assert_eq!(editor.text, "one\n");
    }

    #[test]
    fn test_undo_is_capped_and_cleared() {
        let mut editor = TextEditor::new();
        for _ in 0..UNDO_LIMIT + 20 {
            editor.insert_char('x');
        }
        for _ in 0..UNDO_LIMIT + 20 {
            editor.undo();
        }
        assert_eq!(editor.text.len(), 20);

        editor.clear();
        editor.undo();
        assert!(editor.text.is_empty());
    }
}
