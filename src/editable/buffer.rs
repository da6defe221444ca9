//! Text storage behind the editing state
//!
//! [`TextBuffer`] is the read side used for navigation and layout,
//! [`TextBufferMut`] adds edits. [`RopeBuffer`] backs the document and
//! [`StringBuffer`] backs single-line inputs such as the font filter.

use ropey::Rope;
use std::borrow::Cow;
use std::ops::Range;

use crate::util::is_line_break;

/// Read-only access, all offsets in characters
pub trait TextBuffer {
    /// Number of lines (always >= 1)
    fn line_count(&self) -> usize;

    /// Length of a line excluding its newline
    fn line_length(&self, line: usize) -> usize;

    fn len_chars(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len_chars() == 0
    }

    fn char_at(&self, line: usize, column: usize) -> Option<char>;

    /// Line content without the trailing newline
    fn line(&self, line: usize) -> Option<Cow<'_, str>>;

    /// Offset of the first character of `line`
    fn line_start(&self, line: usize) -> usize;

    /// Convert (line, column) to a character offset, clamping both
    fn position_to_offset(&self, line: usize, column: usize) -> usize {
        let line = line.min(self.line_count().saturating_sub(1));
        self.line_start(line) + column.min(self.line_length(line))
    }

    /// Convert a character offset to (line, column)
    fn offset_to_position(&self, offset: usize) -> (usize, usize);

    fn slice(&self, range: Range<usize>) -> String;

    fn content(&self) -> String;
}

pub trait TextBufferMut: TextBuffer {
    fn insert(&mut self, offset: usize, text: &str);

    fn remove(&mut self, range: Range<usize>);

    /// Replace everything
    fn set_content(&mut self, text: &str) {
        let len = self.len_chars();
        if len > 0 {
            self.remove(0..len);
        }
        self.insert(0, text);
    }
}

/// Single-line buffer backed by a `String`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StringBuffer {
    text: String,
}

impl StringBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_text(s: &str) -> Self {
        Self {
            text: s.to_string(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    fn byte_index(&self, char_offset: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_offset)
            .map_or(self.text.len(), |(i, _)| i)
    }
}

impl TextBuffer for StringBuffer {
    fn line_count(&self) -> usize {
        1
    }

    fn line_length(&self, line: usize) -> usize {
        if line == 0 {
            self.text.chars().count()
        } else {
            0
        }
    }

    fn len_chars(&self) -> usize {
        self.text.chars().count()
    }

    fn char_at(&self, line: usize, column: usize) -> Option<char> {
        (line == 0).then(|| self.text.chars().nth(column)).flatten()
    }

    fn line(&self, line: usize) -> Option<Cow<'_, str>> {
        (line == 0).then_some(Cow::Borrowed(self.text.as_str()))
    }

    fn line_start(&self, _line: usize) -> usize {
        0
    }

    fn offset_to_position(&self, offset: usize) -> (usize, usize) {
        (0, offset.min(self.len_chars()))
    }

    fn slice(&self, range: Range<usize>) -> String {
        let start = self.byte_index(range.start);
        let end = self.byte_index(range.end.max(range.start));
        self.text[start..end].to_string()
    }

    fn content(&self) -> String {
        self.text.clone()
    }
}

impl TextBufferMut for StringBuffer {
    fn insert(&mut self, offset: usize, text: &str) {
        let at = self.byte_index(offset);
        self.text.insert_str(at, text);
    }

    fn remove(&mut self, range: Range<usize>) {
        let start = self.byte_index(range.start);
        let end = self.byte_index(range.end.max(range.start));
        self.text.replace_range(start..end, "");
    }
}

/// Multi-line buffer backed by a rope
#[derive(Debug, Clone, Default)]
pub struct RopeBuffer {
    rope: Rope,
}

impl RopeBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_text(s: &str) -> Self {
        Self {
            rope: Rope::from_str(s),
        }
    }

}

impl TextBuffer for RopeBuffer {
    fn line_count(&self) -> usize {
        self.rope.len_lines().max(1)
    }

    fn line_length(&self, line: usize) -> usize {
        if line >= self.rope.len_lines() {
            return 0;
        }
        let slice = self.rope.line(line);
        let mut len = slice.len_chars();
        if len > 0 && is_line_break(slice.char(len - 1)) {
            len -= 1;
            if len > 0 && slice.char(len) == '\n' && slice.char(len - 1) == '\r' {
                len -= 1;
            }
        }
        len
    }

    fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    fn char_at(&self, line: usize, column: usize) -> Option<char> {
        if line >= self.rope.len_lines() || column >= self.line_length(line) {
            return None;
        }
        Some(self.rope.char(self.rope.line_to_char(line) + column))
    }

    fn line(&self, line: usize) -> Option<Cow<'_, str>> {
        if line >= self.rope.len_lines() {
            return None;
        }
        let start = self.rope.line_to_char(line);
        let slice = self.rope.slice(start..start + self.line_length(line));
        Some(Cow::from(slice))
    }

    fn line_start(&self, line: usize) -> usize {
        self.rope.line_to_char(line.min(self.rope.len_lines()))
    }

    fn offset_to_position(&self, offset: usize) -> (usize, usize) {
        let offset = offset.min(self.rope.len_chars());
        let line = self.rope.char_to_line(offset);
        (line, offset - self.rope.line_to_char(line))
    }

    fn slice(&self, range: Range<usize>) -> String {
        let end = range.end.min(self.rope.len_chars());
        let start = range.start.min(end);
        self.rope.slice(start..end).to_string()
    }

    fn content(&self) -> String {
        self.rope.to_string()
    }
}

impl TextBufferMut for RopeBuffer {
    fn insert(&mut self, offset: usize, text: &str) {
        self.rope.insert(offset.min(self.rope.len_chars()), text);
    }

    fn remove(&mut self, range: Range<usize>) {
        let end = range.end.min(self.rope.len_chars());
        let start = range.start.min(end);
        self.rope.remove(start..end);
    }

    fn set_content(&mut self, text: &str) {
        self.rope = Rope::from_str(text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_buffer_utf8_offsets() {
        let mut buf = StringBuffer::from_text("héllo");
        assert_eq!(buf.len_chars(), 5);
        assert_eq!(buf.char_at(0, 1), Some('é'));
        buf.insert(2, "X");
        assert_eq!(buf.as_str(), "héXllo");
        buf.remove(0..2);
        assert_eq!(buf.as_str(), "Xllo");
    }

    #[test]
    fn test_rope_lines_exclude_newline() {
        let buf = RopeBuffer::from_text("one\ntwo\n");
        assert_eq!(buf.line_count(), 3);
        assert_eq!(buf.line(0).unwrap(), "one");
        assert_eq!(buf.line_length(1), 3);
        assert_eq!(buf.line_length(2), 0);
    }

    #[test]
    fn test_rope_lines_exclude_every_line_break() {
        let buf = RopeBuffer::from_text("ab\rcd\r\nef\u{2028}gh");
        assert_eq!(buf.line_count(), 4);
        assert_eq!(buf.line(0).unwrap(), "ab");
        assert_eq!(buf.line_length(0), 2);
        assert_eq!(buf.line_length(1), 2);
        assert_eq!(buf.line(2).unwrap(), "ef");
        assert_eq!(buf.char_at(0, 2), None);
    }

    #[test]
    fn test_rope_position_conversion() {
        let buf = RopeBuffer::from_text("hello\nworld");
        assert_eq!(buf.offset_to_position(6), (1, 0));
        assert_eq!(buf.offset_to_position(11), (1, 5));
        assert_eq!(buf.offset_to_position(99), (1, 5));
        assert_eq!(buf.position_to_offset(1, 3), 9);
        assert_eq!(buf.position_to_offset(0, 99), 5);
        assert_eq!(buf.position_to_offset(7, 0), 6);
    }

    #[test]
    fn test_empty_rope_has_one_line() {
        let buf = RopeBuffer::new();
        assert_eq!(buf.line_count(), 1);
        assert_eq!(buf.line_length(0), 0);
        assert_eq!(buf.position_to_offset(0, 0), 0);
    }

    #[test]
    fn test_set_content_replaces_everything() {
        let mut buf = RopeBuffer::from_text("old");
        buf.set_content("new\ntext");
        assert_eq!(buf.content(), "new\ntext");

        let mut single = StringBuffer::from_text("abc");
        single.set_content("");
        assert!(single.is_empty());
    }
}
