//! EditableState: a buffer with one cursor, its selection and edit history

use std::ops::Range;

use crate::util::{char_type, CharType};

use super::buffer::{TextBuffer, TextBufferMut};
use super::cursor::{Cursor, Position, Selection};
use super::history::{EditHistory, EditOperation};

/// Where an edit happened, in character offsets
///
/// Callers use this to keep side structures (such as formatting runs) in
/// step with the buffer: `removed` characters at `offset` were replaced by
/// `inserted` new ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextChange {
    pub offset: usize,
    pub removed: usize,
    pub inserted: usize,
}

/// Single-cursor editing over any buffer
#[derive(Debug, Clone)]
pub struct EditableState<B: TextBuffer> {
    pub buffer: B,
    cursor: Cursor,
    selection: Selection,
    history: EditHistory,
}

impl<B: TextBuffer> EditableState<B> {
    pub fn new(buffer: B) -> Self {
        Self {
            buffer,
            cursor: Cursor::default(),
            selection: Selection::default(),
            history: EditHistory::new(),
        }
    }

    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn text(&self) -> String {
        self.buffer.content()
    }

    pub fn has_selection(&self) -> bool {
        !self.selection.is_empty()
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Character offset of the cursor
    pub fn cursor_offset(&self) -> usize {
        self.buffer
            .position_to_offset(self.cursor.line, self.cursor.column)
    }

    /// Selected character range, empty at the cursor when nothing is selected
    pub fn selection_range(&self) -> Range<usize> {
        let start = self.selection.start();
        let end = self.selection.end();
        self.buffer.position_to_offset(start.line, start.column)
            ..self.buffer.position_to_offset(end.line, end.column)
    }

    pub fn selected_text(&self) -> String {
        if self.selection.is_empty() {
            return String::new();
        }
        self.buffer.slice(self.selection_range())
    }

    /// Clamp a position into the buffer
    pub fn clamp_position(&self, pos: Position) -> Position {
        let line = pos.line.min(self.buffer.line_count().saturating_sub(1));
        Position::new(line, pos.column.min(self.buffer.line_length(line)))
    }

    /// Put the cursor at `pos`; with `extend` the selection grows to it
    pub fn set_cursor(&mut self, pos: Position, extend: bool) {
        let pos = self.clamp_position(pos);
        self.cursor.set_position(pos);
        self.finish_move(extend);
    }

    /// Select `range` with the cursor at its end
    pub fn select_range(&mut self, range: Range<usize>) {
        let (al, ac) = self.buffer.offset_to_position(range.start);
        let (hl, hc) = self.buffer.offset_to_position(range.end);
        self.cursor.set_position(Position::new(hl, hc));
        self.selection = Selection::new(Position::new(al, ac), Position::new(hl, hc));
        self.history.break_coalescing();
    }

    fn finish_move(&mut self, extend: bool) {
        let pos = self.cursor.position();
        if extend {
            self.selection.head = pos;
        } else {
            self.selection = Selection::collapsed(pos);
        }
        self.history.break_coalescing();
    }

    /// Collapse an existing selection onto one of its ends instead of moving
    fn collapse_to(&mut self, extend: bool, to_start: bool) -> bool {
        if extend || self.selection.is_empty() {
            return false;
        }
        let target = if to_start {
            self.selection.start()
        } else {
            self.selection.end()
        };
        self.cursor.set_position(target);
        self.finish_move(false);
        true
    }

    pub fn move_left(&mut self, extend: bool) {
        if self.collapse_to(extend, true) {
            return;
        }
        if self.cursor.column > 0 {
            self.cursor.column -= 1;
        } else if self.cursor.line > 0 {
            self.cursor.line -= 1;
            self.cursor.column = self.buffer.line_length(self.cursor.line);
        }
        self.cursor.desired_column = None;
        self.finish_move(extend);
    }

    pub fn move_right(&mut self, extend: bool) {
        if self.collapse_to(extend, false) {
            return;
        }
        if self.cursor.column < self.buffer.line_length(self.cursor.line) {
            self.cursor.column += 1;
        } else if self.cursor.line + 1 < self.buffer.line_count() {
            self.cursor.line += 1;
            self.cursor.column = 0;
        }
        self.cursor.desired_column = None;
        self.finish_move(extend);
    }

    pub fn move_up(&mut self, extend: bool) {
        self.move_vertically(-1, extend);
    }

    pub fn move_down(&mut self, extend: bool) {
        self.move_vertically(1, extend);
    }

    /// Move by `delta` lines, keeping the desired column
    pub fn move_vertically(&mut self, delta: isize, extend: bool) {
        let last_line = self.buffer.line_count().saturating_sub(1);
        let target = self.cursor.line.saturating_add_signed(delta).min(last_line);
        if target == self.cursor.line {
            // Up on the first line or down on the last goes to its edge
            self.cursor.column = if delta < 0 {
                0
            } else {
                self.buffer.line_length(target)
            };
            self.cursor.desired_column = None;
        } else {
            self.cursor.remember_column();
            self.cursor.line = target;
            self.cursor.column = self
                .cursor
                .target_column()
                .min(self.buffer.line_length(target));
        }
        self.finish_move(extend);
    }

    pub fn move_line_start(&mut self, extend: bool) {
        self.cursor.column = 0;
        self.cursor.desired_column = None;
        self.finish_move(extend);
    }

    pub fn move_line_end(&mut self, extend: bool) {
        self.cursor.column = self.buffer.line_length(self.cursor.line);
        self.cursor.desired_column = None;
        self.finish_move(extend);
    }

    pub fn move_document_start(&mut self, extend: bool) {
        self.cursor.set_position(Position::new(0, 0));
        self.finish_move(extend);
    }

    pub fn move_document_end(&mut self, extend: bool) {
        let last_line = self.buffer.line_count().saturating_sub(1);
        self.cursor
            .set_position(Position::new(last_line, self.buffer.line_length(last_line)));
        self.finish_move(extend);
    }

    pub fn move_word_left(&mut self, extend: bool) {
        if self.collapse_to(extend, true) {
            return;
        }
        if self.cursor.column == 0 {
            self.move_left(extend);
            return;
        }
        let line = self.cursor.line;
        let mut col = self.cursor.column.min(self.buffer.line_length(line));
        let class_before = |col: usize| self.buffer.char_at(line, col - 1).map(char_type);

        while col > 0 && class_before(col) == Some(CharType::Whitespace) {
            col -= 1;
        }
        if let Some(class) = (col > 0).then(|| class_before(col)).flatten() {
            while col > 0 && class_before(col) == Some(class) {
                col -= 1;
            }
        }

        self.cursor.column = col;
        self.cursor.desired_column = None;
        self.finish_move(extend);
    }

    pub fn move_word_right(&mut self, extend: bool) {
        if self.collapse_to(extend, false) {
            return;
        }
        let line = self.cursor.line;
        let line_len = self.buffer.line_length(line);
        if self.cursor.column >= line_len {
            self.move_right(extend);
            return;
        }
        let mut col = self.cursor.column;
        let class_at = |col: usize| self.buffer.char_at(line, col).map(char_type);

        if let Some(class) = class_at(col) {
            while col < line_len && class_at(col) == Some(class) {
                col += 1;
            }
        }
        while col < line_len && class_at(col) == Some(CharType::Whitespace) {
            col += 1;
        }

        self.cursor.column = col;
        self.cursor.desired_column = None;
        self.finish_move(extend);
    }

    pub fn select_all(&mut self) {
        let len = self.buffer.len_chars();
        self.select_range(0..len);
    }

    /// Select the word (or run of whitespace/punctuation) around the cursor
    pub fn select_word(&mut self) {
        let line = self.cursor.line;
        let line_len = self.buffer.line_length(line);
        let col = self.cursor.column.min(line_len);
        let probe = if col < line_len { col } else { col.saturating_sub(1) };
        let Some(class) = self.buffer.char_at(line, probe).map(char_type) else {
            return;
        };
        let same = |c: usize| self.buffer.char_at(line, c).map(char_type) == Some(class);

        let mut start = probe;
        while start > 0 && same(start - 1) {
            start -= 1;
        }
        let mut end = probe;
        while end < line_len && same(end) {
            end += 1;
        }
        let base = self.buffer.line_start(line);
        self.select_range(base + start..base + end);
    }
}

impl<B: TextBufferMut> EditableState<B> {
    /// Replace the selection (or insert at the cursor) with `text`
    fn replace_selection(&mut self, text: &str, typed: bool) -> Option<TextChange> {
        let range = self.selection_range();
        if range.is_empty() && text.is_empty() {
            return None;
        }
        let cursor_before = self.cursor;
        let deleted = self.buffer.slice(range.clone());
        self.buffer.remove(range.clone());
        self.buffer.insert(range.start, text);

        let inserted = text.chars().count();
        let (line, column) = self.buffer.offset_to_position(range.start + inserted);
        self.cursor.set_position(Position::new(line, column));
        self.selection = Selection::collapsed(self.cursor.position());

        let op = EditOperation::replace(
            range.start,
            deleted,
            text.to_string(),
            cursor_before,
            self.cursor,
        );
        if typed && range.is_empty() {
            self.history.push_typed(op);
        } else {
            self.history.push(op);
        }

        Some(TextChange {
            offset: range.start,
            removed: range.len(),
            inserted,
        })
    }

    /// Type one character, replacing any selection
    pub fn insert_char(&mut self, ch: char) -> Option<TextChange> {
        let mut buf = [0u8; 4];
        self.replace_selection(ch.encode_utf8(&mut buf), true)
    }

    /// Insert a string (paste), replacing any selection
    pub fn insert_text(&mut self, text: &str) -> Option<TextChange> {
        self.replace_selection(text, false)
    }

    /// Remove the selection; `None` when nothing is selected
    pub fn delete_selection(&mut self) -> Option<TextChange> {
        if self.selection.is_empty() {
            return None;
        }
        self.replace_selection("", false)
    }

    /// Backspace
    pub fn delete_backward(&mut self) -> Option<TextChange> {
        if self.has_selection() {
            return self.delete_selection();
        }
        let offset = self.cursor_offset();
        if offset == 0 {
            return None;
        }
        self.delete_range(offset - 1..offset)
    }

    /// Delete key
    pub fn delete_forward(&mut self) -> Option<TextChange> {
        if self.has_selection() {
            return self.delete_selection();
        }
        let offset = self.cursor_offset();
        if offset >= self.buffer.len_chars() {
            return None;
        }
        self.delete_range(offset..offset + 1)
    }

    fn delete_range(&mut self, range: Range<usize>) -> Option<TextChange> {
        let cursor_before = self.cursor;
        let deleted = self.buffer.slice(range.clone());
        self.buffer.remove(range.clone());
        let (line, column) = self.buffer.offset_to_position(range.start);
        self.cursor.set_position(Position::new(line, column));
        self.selection = Selection::collapsed(self.cursor.position());
        self.history.push(EditOperation::delete(
            range.start,
            deleted,
            cursor_before,
            self.cursor,
        ));
        Some(TextChange {
            offset: range.start,
            removed: range.len(),
            inserted: 0,
        })
    }

    /// Apply `op` in reverse without recording it
    fn apply_reverted(&mut self, op: &EditOperation) -> TextChange {
        let removed = op.inserted_text.chars().count();
        self.buffer.remove(op.offset..op.offset + removed);
        self.buffer.insert(op.offset, &op.deleted_text);
        let cursor = op.cursor_before;
        self.cursor = self.clamp_position(cursor.position()).into();
        self.selection = Selection::collapsed(self.cursor.position());
        TextChange {
            offset: op.offset,
            removed,
            inserted: op.deleted_text.chars().count(),
        }
    }

    pub fn undo(&mut self) -> Option<TextChange> {
        let op = self.history.pop_undo()?;
        Some(self.apply_reverted(&op))
    }

    pub fn redo(&mut self) -> Option<TextChange> {
        // Redo entries are stored as inverses, so reverting one reapplies the edit
        let op = self.history.pop_redo()?;
        Some(self.apply_reverted(&op))
    }

    /// Replace the whole content and forget the history
    pub fn set_content(&mut self, text: &str) {
        self.buffer.set_content(text);
        self.cursor = Cursor::default();
        self.selection = Selection::default();
        self.history.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::super::buffer::{RopeBuffer, StringBuffer};
    use super::*;

    fn single_line(text: &str, column: usize) -> EditableState<StringBuffer> {
        let mut state = EditableState::new(StringBuffer::from_text(text));
        state.set_cursor(Position::new(0, column), false);
        state
    }

    fn multi_line(text: &str) -> EditableState<RopeBuffer> {
        EditableState::new(RopeBuffer::from_text(text))
    }

    #[test]
    fn test_insert_char_reports_change() {
        let mut state = single_line("hllo", 1);
        let change = state.insert_char('e').unwrap();
        assert_eq!(state.text(), "hello");
        assert_eq!(change, TextChange { offset: 1, removed: 0, inserted: 1 });
        assert_eq!(state.cursor().column, 2);
    }

    #[test]
    fn test_insert_replaces_selection() {
        let mut state = single_line("hello world", 0);
        state.select_range(0..5);
        let change = state.insert_text("bye").unwrap();
        assert_eq!(state.text(), "bye world");
        assert_eq!(change, TextChange { offset: 0, removed: 5, inserted: 3 });
        assert!(!state.has_selection());
    }

    #[test]
    fn test_backspace_joins_lines() {
        let mut state = multi_line("ab\ncd");
        state.set_cursor(Position::new(1, 0), false);
        let change = state.delete_backward().unwrap();
        assert_eq!(state.text(), "abcd");
        assert_eq!(change.offset, 2);
        assert_eq!(state.cursor().position(), Position::new(0, 2));
    }

    #[test]
    fn test_delete_at_edges_is_noop() {
        let mut state = single_line("ab", 0);
        assert!(state.delete_backward().is_none());
        state.move_document_end(false);
        assert!(state.delete_forward().is_none());
    }

    #[test]
    fn test_vertical_movement_keeps_column() {
        let mut state = multi_line("long line\nab\nanother line");
        state.set_cursor(Position::new(0, 7), false);
        state.move_down(false);
        assert_eq!(state.cursor().position(), Position::new(1, 2));
        state.move_down(false);
        assert_eq!(state.cursor().position(), Position::new(2, 7));
    }

    #[test]
    fn test_word_movement() {
        let mut state = single_line("hello, world", 0);
        state.move_word_right(false);
        assert_eq!(state.cursor().column, 5);
        state.move_word_right(false);
        assert_eq!(state.cursor().column, 7);
        state.move_word_left(false);
        assert_eq!(state.cursor().column, 5);
        state.move_word_left(false);
        assert_eq!(state.cursor().column, 0);
    }

    #[test]
    fn test_shift_extends_selection() {
        let mut state = single_line("hello", 0);
        state.move_right(true);
        state.move_right(true);
        assert_eq!(state.selected_text(), "he");
        state.move_left(false);
        assert!(!state.has_selection());
        assert_eq!(state.cursor().column, 0);
    }

    #[test]
    fn test_select_all_and_word() {
        let mut state = multi_line("one two\nthree");
        state.select_all();
        assert_eq!(state.selected_text(), "one two\nthree");

        state.set_cursor(Position::new(0, 5), false);
        state.select_word();
        assert_eq!(state.selected_text(), "two");
    }

    #[test]
    fn test_undo_redo_restores_text_and_cursor() {
        let mut state = single_line("", 0);
        for ch in "abc".chars() {
            state.insert_char(ch);
        }
        state.select_range(0..3);
        state.insert_text("X");
        assert_eq!(state.text(), "X");

        let change = state.undo().unwrap();
        assert_eq!(state.text(), "abc");
        assert_eq!(change, TextChange { offset: 0, removed: 1, inserted: 3 });

        state.undo();
        assert_eq!(state.text(), "");
        assert!(state.undo().is_none());

        state.redo();
        assert_eq!(state.text(), "abc");
        assert_eq!(state.cursor().column, 3);
        state.redo();
        assert_eq!(state.text(), "X");
    }

    #[test]
    fn test_set_content_clears_history() {
        let mut state = multi_line("");
        state.insert_char('a');
        state.set_content("fresh");
        assert!(!state.can_undo());
        assert_eq!(state.cursor().position(), Position::new(0, 0));
    }
}
