//! Single-line text input (pure state transitions).
//!
//! Backs both the search bar and the import path prompt. The cursor is a
//! character index, so multi-byte input edits cleanly. All functions take
//! the input by value and return the updated input.

/// Text buffer with a cursor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInput {
    text: String,
    cursor: usize,
}

impl TextInput {
    /// Input holding `text` with the cursor at the end.
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let cursor = text.chars().count();
        Self { text, cursor }
    }

    /// Current text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Cursor position in characters.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Whether the text is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    fn byte_offset(&self, char_index: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_index)
            .map(|(offset, _)| offset)
            .unwrap_or(self.text.len())
    }
}

/// Insert a character at the cursor and advance the cursor.
pub fn handle_char_input(mut input: TextInput, ch: char) -> TextInput {
    let offset = input.byte_offset(input.cursor);
    input.text.insert(offset, ch);
    input.cursor += 1;
    input
}

/// Delete the character before the cursor. No-op at position 0.
pub fn handle_backspace(mut input: TextInput) -> TextInput {
    if input.cursor == 0 {
        return input;
    }
    let offset = input.byte_offset(input.cursor - 1);
    input.text.remove(offset);
    input.cursor -= 1;
    input
}

/// Move cursor left by one position. Saturates at 0.
pub fn handle_cursor_left(mut input: TextInput) -> TextInput {
    input.cursor = input.cursor.saturating_sub(1);
    input
}

/// Move cursor right by one position. Saturates at the text length.
pub fn handle_cursor_right(mut input: TextInput) -> TextInput {
    let max = input.text.chars().count();
    input.cursor = (input.cursor + 1).min(max);
    input
}

/// Empty the buffer.
pub fn clear(_input: TextInput) -> TextInput {
    TextInput::default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typing_appends_at_cursor() {
        let input = "abc".chars().fold(TextInput::default(), handle_char_input);

        assert_eq!(input.text(), "abc");
        assert_eq!(input.cursor(), 3);
    }

    #[test]
    fn insert_in_middle_after_cursor_left() {
        let input = handle_cursor_left(TextInput::new("ac"));
        let input = handle_char_input(input, 'b');

        assert_eq!(input.text(), "abc");
        assert_eq!(input.cursor(), 2);
    }

    #[test]
    fn backspace_at_start_is_noop() {
        let input = handle_cursor_left(handle_cursor_left(TextInput::new("ab")));
        let input = handle_backspace(input);

        assert_eq!(input.text(), "ab");
        assert_eq!(input.cursor(), 0);
    }

    #[test]
    fn backspace_handles_multibyte_chars() {
        let input = handle_backspace(TextInput::new("añ"));

        assert_eq!(input.text(), "a");
        assert_eq!(input.cursor(), 1);
    }

    #[test]
    fn insert_after_multibyte_char() {
        let input = handle_char_input(TextInput::new("é"), 'x');

        assert_eq!(input.text(), "éx");
    }

    #[test]
    fn cursor_right_saturates_at_end() {
        let input = handle_cursor_right(TextInput::new("ab"));

        assert_eq!(input.cursor(), 2);
    }

    #[test]
    fn whitespace_is_kept_verbatim() {
        let input = handle_char_input(TextInput::default(), ' ');

        assert_eq!(input.text(), " ");
    }

    #[test]
    fn clear_empties_buffer() {
        assert!(clear(TextInput::new("abc")).is_empty());
    }
}
