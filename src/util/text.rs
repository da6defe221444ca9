//! Character classes for word-wise cursor movement, line endings and tab stops

use std::borrow::Cow;

/// Number of space advances between tab stops
pub const TAB_WIDTH: usize = 4;

/// Offset of the first tab stop after `offset`, with stops every `tab`
/// pixels from the line start
pub fn next_tab_stop(offset: f32, tab: f32) -> f32 {
    if tab <= 0.0 {
        return offset;
    }
    ((offset / tab).floor() + 1.0) * tab
}

/// Rewrite CRLF and lone CR line endings as LF
pub fn normalize_line_endings(text: &str) -> Cow<'_, str> {
    if text.contains('\r') {
        Cow::Owned(text.replace("\r\n", "\n").replace('\r', "\n"))
    } else {
        Cow::Borrowed(text)
    }
}

/// Characters that end a line in the rope
pub fn is_line_break(ch: char) -> bool {
    matches!(
        ch,
        '\n' | '\r' | '\u{000B}' | '\u{000C}' | '\u{0085}' | '\u{2028}' | '\u{2029}'
    )
}

/// Check if a character is a punctuation/symbol boundary (not whitespace)
pub fn is_punctuation(ch: char) -> bool {
    matches!(
        ch,
        '/' | ':'
            | ','
            | '.'
            | '-'
            | '('
            | ')'
            | '{'
            | '}'
            | '['
            | ']'
            | ';'
            | '"'
            | '\''
            | '<'
            | '>'
            | '='
            | '+'
            | '*'
            | '&'
            | '|'
            | '!'
            | '?'
            | '@'
            | '#'
            | '%'
            | '\\'
    )
}

/// Character type for word navigation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharType {
    Whitespace,
    /// Letters, digits and underscore
    WordChar,
    Punctuation,
}

/// Classify a character for word navigation
pub fn char_type(ch: char) -> CharType {
    if ch.is_whitespace() {
        CharType::Whitespace
    } else if is_punctuation(ch) {
        CharType::Punctuation
    } else {
        CharType::WordChar
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_type_classes() {
        assert_eq!(char_type(' '), CharType::Whitespace);
        assert_eq!(char_type('\n'), CharType::Whitespace);
        assert_eq!(char_type('a'), CharType::WordChar);
        assert_eq!(char_type('_'), CharType::WordChar);
        assert_eq!(char_type('é'), CharType::WordChar);
        assert_eq!(char_type('.'), CharType::Punctuation);
        assert_eq!(char_type('('), CharType::Punctuation);
    }

    #[test]
    fn test_normalize_line_endings() {
        assert_eq!(normalize_line_endings("a\r\nb\rc\n"), "a\nb\nc\n");
        assert_eq!(normalize_line_endings("\r\r\n"), "\n\n");
        assert!(matches!(normalize_line_endings("plain\n"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_line_breaks() {
        for ch in ['\n', '\r', '\u{000B}', '\u{000C}', '\u{0085}', '\u{2028}', '\u{2029}'] {
            assert!(is_line_break(ch), "{:?}", ch);
        }
        assert!(!is_line_break(' '));
        assert!(!is_line_break('\t'));
    }

    #[test]
    fn test_tab_advances_to_next_stop() {
        let space = 5.0;
        let tab = space * TAB_WIDTH as f32;

        assert_eq!(next_tab_stop(0.0, tab), 20.0);
        assert_eq!(next_tab_stop(space, tab), 20.0);
        assert_eq!(next_tab_stop(19.5, tab), 20.0);
        // Exactly on a stop moves to the following one
        assert_eq!(next_tab_stop(20.0, tab), 40.0);
        assert_eq!(next_tab_stop(41.0, tab), 60.0);
    }

    #[test]
    fn test_tab_after_text_lines_up_with_four_spaces() {
        let space = 5.0;
        let tab = space * TAB_WIDTH as f32;
        assert_eq!(next_tab_stop(0.0, tab), 4.0 * space);
        assert_eq!(next_tab_stop(3.0 * space, tab), 4.0 * space);
    }

    #[test]
    fn test_zero_width_tab_stays_put() {
        assert_eq!(next_tab_stop(12.0, 0.0), 12.0);
    }
}
