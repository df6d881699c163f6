/// Single editable string with a char-indexed cursor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextBuffer {
    value: String,
    cursor: usize,
}

impl TextBuffer {
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        let cursor = value.chars().count();
        Self { value, cursor }
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn cursor(&self) -> usize {
        self.cursor.min(self.len())
    }

    pub fn len(&self) -> usize {
        self.value.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Replaces the text and parks the cursor at the end.
    pub fn set(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.cursor = self.len();
    }

    pub fn insert(&mut self, ch: char) {
        let pos = self.cursor();
        let at = byte_index(&self.value, pos);
        self.value.insert(at, ch);
        self.cursor = pos + 1;
    }

    pub fn backspace(&mut self) -> bool {
        let pos = self.cursor();
        if pos == 0 {
            return false;
        }
        let at = byte_index(&self.value, pos - 1);
        self.value.remove(at);
        self.cursor = pos - 1;
        true
    }

    pub fn delete(&mut self) -> bool {
        let pos = self.cursor();
        if pos >= self.len() {
            return false;
        }
        let at = byte_index(&self.value, pos);
        self.value.remove(at);
        true
    }

    pub fn move_left(&mut self) -> bool {
        let pos = self.cursor();
        if pos == 0 {
            return false;
        }
        self.cursor = pos - 1;
        true
    }

    pub fn move_right(&mut self) -> bool {
        let pos = self.cursor();
        if pos >= self.len() {
            return false;
        }
        self.cursor = pos + 1;
        true
    }

    pub fn move_home(&mut self) -> bool {
        let moved = self.cursor() != 0;
        self.cursor = 0;
        moved
    }

    pub fn move_end(&mut self) -> bool {
        let end = self.len();
        let moved = self.cursor() != end;
        self.cursor = end;
        moved
    }

    pub fn delete_word_left(&mut self) -> bool {
        let mut chars: Vec<char> = self.value.chars().collect();
        let pos = self.cursor();
        let mut start = pos;
        while start > 0 && is_separator(chars[start - 1]) {
            start -= 1;
        }
        while start > 0 && !is_separator(chars[start - 1]) {
            start -= 1;
        }
        if start == pos {
            return false;
        }
        chars.drain(start..pos);
        self.value = chars.into_iter().collect();
        self.cursor = start;
        true
    }

    pub fn delete_word_right(&mut self) -> bool {
        let mut chars: Vec<char> = self.value.chars().collect();
        let pos = self.cursor();
        let mut end = pos;
        while end < chars.len() && is_separator(chars[end]) {
            end += 1;
        }
        while end < chars.len() && !is_separator(chars[end]) {
            end += 1;
        }
        if end == pos {
            return false;
        }
        chars.drain(pos..end);
        self.value = chars.into_iter().collect();
        self.cursor = pos;
        true
    }

    /// Text before the cursor, used for cursor placement.
    pub fn before_cursor(&self) -> &str {
        &self.value[..byte_index(&self.value, self.cursor())]
    }
}

fn is_separator(ch: char) -> bool {
    ch.is_whitespace() || matches!(ch, '.' | '/' | ',' | '-' | '@' | '_' | ':')
}

fn byte_index(value: &str, char_idx: usize) -> usize {
    value
        .char_indices()
        .nth(char_idx)
        .map(|(idx, _)| idx)
        .unwrap_or(value.len())
}

#[cfg(test)]
mod tests {
    use super::TextBuffer;

    #[test]
    fn insert_and_backspace_respect_multibyte_chars() {
        let mut buf = TextBuffer::new("Zoë");
        buf.move_left();
        buf.insert('x');
        assert_eq!(buf.as_str(), "Zoxë");
        assert!(buf.backspace());
        assert_eq!(buf.as_str(), "Zoë");
        assert_eq!(buf.before_cursor(), "Zo");
    }

    #[test]
    fn delete_word_left_stops_at_separator() {
        let mut buf = TextBuffer::new("jane.doe@example");
        assert!(buf.delete_word_left());
        assert_eq!(buf.as_str(), "jane.doe@");
        assert!(buf.delete_word_left());
        assert_eq!(buf.as_str(), "jane.");
    }

    #[test]
    fn delete_word_right_from_home() {
        let mut buf = TextBuffer::new("hello world");
        buf.move_home();
        assert!(buf.delete_word_right());
        assert_eq!(buf.as_str(), " world");
        assert_eq!(buf.cursor(), 0);
    }
}
