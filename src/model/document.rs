//! Document model - the text, its formatting runs and the insertion style

use std::borrow::Cow;
use std::ops::Range;

use crate::editable::{
    Cursor, EditableState, Position, RopeBuffer, Selection, TextBuffer, TextChange,
};

use super::format::{CharFormat, FontSize, FormatRuns, TextStyle};

/// The single live document of the window
///
/// Text edits go through [`EditableState`]; every [`TextChange`] it reports
/// is mirrored into [`FormatRuns`] so the runs always tile the text.
#[derive(Debug, Clone)]
pub struct Document {
    pub editable: EditableState<RopeBuffer>,
    pub formats: FormatRuns,
    /// Style for text that has no neighbour to inherit from
    pub default_style: TextStyle,
    /// Style set at the insertion point while nothing was selected,
    /// dropped as soon as the cursor moves
    pub pending_style: Option<TextStyle>,
    /// Incremented on every text or formatting change
    pub revision: u64,
}

impl Default for Document {
    fn default() -> Self {
        Self::new(TextStyle::default())
    }
}

impl Document {
    pub fn new(default_style: TextStyle) -> Self {
        Self {
            editable: EditableState::new(RopeBuffer::new()),
            formats: FormatRuns::default(),
            default_style,
            pending_style: None,
            revision: 0,
        }
    }

    pub fn with_text(text: &str) -> Self {
        let mut doc = Self::default();
        doc.replace_all(text);
        doc
    }

    // === Text access ===

    pub fn text(&self) -> String {
        self.editable.text()
    }

    /// Number of characters (Unicode scalar values)
    pub fn char_count(&self) -> usize {
        self.editable.buffer.len_chars()
    }

    pub fn is_empty(&self) -> bool {
        self.char_count() == 0
    }

    pub fn line_count(&self) -> usize {
        self.editable.buffer.line_count()
    }

    pub fn line_length(&self, line: usize) -> usize {
        self.editable.buffer.line_length(line)
    }

    /// Line content without its newline
    pub fn line_text(&self, line: usize) -> Cow<'_, str> {
        self.editable.buffer.line(line).unwrap_or_default()
    }

    /// Character range of a line, newline excluded
    pub fn line_range(&self, line: usize) -> Range<usize> {
        let start = self.editable.buffer.line_start(line);
        start..start + self.line_length(line)
    }

    pub fn position_to_offset(&self, pos: Position) -> usize {
        self.editable.buffer.position_to_offset(pos.line, pos.column)
    }

    pub fn offset_to_position(&self, offset: usize) -> Position {
        let (line, column) = self.editable.buffer.offset_to_position(offset);
        Position::new(line, column)
    }

    // === Cursor and selection ===

    pub fn cursor(&self) -> &Cursor {
        self.editable.cursor()
    }

    pub fn selection(&self) -> &Selection {
        self.editable.selection()
    }

    pub fn has_selection(&self) -> bool {
        self.editable.has_selection()
    }

    pub fn selection_range(&self) -> Range<usize> {
        self.editable.selection_range()
    }

    pub fn selected_text(&self) -> String {
        self.editable.selected_text()
    }

    /// Run a cursor movement; moving drops the pending insertion style
    pub fn navigate(&mut self, movement: impl FnOnce(&mut EditableState<RopeBuffer>)) {
        let before = (*self.cursor(), *self.selection());
        movement(&mut self.editable);
        if before != (*self.cursor(), *self.selection()) {
            self.pending_style = None;
        }
    }

    // === Styles ===

    /// Style of the character at `offset`
    pub fn style_at(&self, offset: usize) -> Option<&TextStyle> {
        self.formats.style_at(offset)
    }

    /// Style that text inserted at `offset` inherits from its neighbours
    ///
    /// The character before wins, then the one after, then the default.
    pub fn style_before(&self, offset: usize) -> TextStyle {
        offset
            .checked_sub(1)
            .and_then(|prev| self.formats.style_at(prev))
            .or_else(|| self.formats.style_at(offset))
            .unwrap_or(&self.default_style)
            .clone()
    }

    /// Style applied to the next typed character
    ///
    /// This is also what the toolbar reflects: the pending style if any, the
    /// first selected character's style, or the inherited style.
    pub fn current_style(&self) -> TextStyle {
        if let Some(style) = &self.pending_style {
            return style.clone();
        }
        let range = self.selection_range();
        if !range.is_empty() {
            if let Some(style) = self.formats.style_at(range.start) {
                return style.clone();
            }
        }
        self.style_before(range.start)
    }

    /// Merge `format` into the selection, or into the insertion point when
    /// nothing is selected
    pub fn merge_format(&mut self, format: &CharFormat) {
        if format.is_empty() {
            return;
        }
        let range = self.selection_range();
        if range.is_empty() {
            self.pending_style = Some(format.apply_to(&self.current_style()));
        } else {
            self.formats.merge(range, format);
        }
        self.revision += 1;
    }

    /// Largest point size used on a line, for layout
    pub fn line_max_size(&self, line: usize) -> FontSize {
        let range = self.line_range(line);
        let from_runs = self
            .formats
            .iter_range(range.clone())
            .map(|(_, style)| style.size)
            .max();
        from_runs.unwrap_or_else(|| {
            if self.cursor().line == line {
                self.current_style().size
            } else {
                self.style_before(range.start).size
            }
        })
    }

    // === Edits ===

    fn apply_change(&mut self, change: Option<TextChange>, style: Option<TextStyle>) -> bool {
        let Some(change) = change else {
            return false;
        };
        self.formats
            .remove(change.offset..change.offset + change.removed);
        let style = style.unwrap_or_else(|| self.style_before(change.offset));
        self.formats.insert(change.offset, change.inserted, style);
        self.revision += 1;
        true
    }

    /// Type a character, replacing any selection
    pub fn type_char(&mut self, ch: char) -> bool {
        let style = self.current_style();
        let change = self.editable.insert_char(ch);
        self.apply_change(change, Some(style))
    }

    /// Insert text at the cursor, replacing any selection
    pub fn insert_text(&mut self, text: &str) -> bool {
        let style = self.current_style();
        let change = self.editable.insert_text(text);
        self.apply_change(change, Some(style))
    }

    pub fn delete_backward(&mut self) -> bool {
        let change = self.editable.delete_backward();
        self.apply_change(change, None)
    }

    pub fn delete_forward(&mut self) -> bool {
        let change = self.editable.delete_forward();
        self.apply_change(change, None)
    }

    pub fn delete_selection(&mut self) -> bool {
        let change = self.editable.delete_selection();
        self.apply_change(change, None)
    }

    /// Undo the last text edit; restored text takes its neighbours' style
    pub fn undo(&mut self) -> bool {
        let change = self.editable.undo();
        self.pending_style = None;
        self.apply_change(change, None)
    }

    pub fn redo(&mut self) -> bool {
        let change = self.editable.redo();
        self.pending_style = None;
        self.apply_change(change, None)
    }

    /// Replace the text wholesale; formatting and history start over
    pub fn replace_all(&mut self, text: &str) {
        self.editable.set_content(text);
        self.formats
            .reset(self.char_count(), self.default_style.clone());
        self.pending_style = None;
        self.revision += 1;
    }

    pub fn clear(&mut self) {
        self.replace_all("");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::Color;

    fn doc_with(text: &str) -> Document {
        Document::with_text(text)
    }

    #[test]
    fn test_char_count_counts_scalars() {
        let doc = doc_with("héllo\n🦀");
        assert_eq!(doc.char_count(), 7);
        assert_eq!(doc.formats.len(), 7);
    }

    #[test]
    fn test_typed_text_inherits_previous_style() {
        let mut doc = doc_with("ab");
        doc.editable.select_all();
        doc.merge_format(&CharFormat::bold(true));
        doc.navigate(|e| e.move_document_end(false));
        doc.type_char('c');
        assert_eq!(doc.text(), "abc");
        assert!(doc.style_at(2).unwrap().bold);
        assert_eq!(doc.formats.runs().len(), 1);
    }

    #[test]
    fn test_pending_style_applies_to_next_char() {
        let mut doc = doc_with("ab");
        doc.navigate(|e| e.move_document_end(false));
        doc.merge_format(&CharFormat::italic(true));
        assert!(doc.current_style().italic);
        assert!(!doc.style_at(1).unwrap().italic);

        doc.type_char('c');
        assert!(doc.style_at(2).unwrap().italic);
        assert!(!doc.style_at(0).unwrap().italic);
    }

    #[test]
    fn test_moving_drops_pending_style() {
        let mut doc = doc_with("ab");
        doc.merge_format(&CharFormat::color(Color::rgb(255, 0, 0)));
        assert!(doc.pending_style.is_some());
        doc.navigate(|e| e.move_right(false));
        assert!(doc.pending_style.is_none());
    }

    #[test]
    fn test_typing_over_selection_uses_first_selected_style() {
        let mut doc = doc_with("abcd");
        doc.editable.select_range(1..2);
        doc.merge_format(&CharFormat::bold(true));
        doc.editable.select_range(1..3);
        doc.type_char('X');
        assert_eq!(doc.text(), "aXd");
        assert!(doc.style_at(1).unwrap().bold);
        assert!(!doc.style_at(2).unwrap().bold);
    }

    #[test]
    fn test_deletes_keep_runs_aligned() {
        let mut doc = doc_with("hello world");
        doc.editable.select_range(0..5);
        doc.merge_format(&CharFormat::bold(true));
        doc.editable.select_range(3..8);
        doc.delete_selection();
        assert_eq!(doc.text(), "helrld");
        assert_eq!(doc.formats.len(), 6);
        assert!(doc.style_at(2).unwrap().bold);
        assert!(!doc.style_at(3).unwrap().bold);
    }

    #[test]
    fn test_undo_restores_text_with_neighbour_style() {
        let mut doc = doc_with("");
        for ch in "hi".chars() {
            doc.type_char(ch);
        }
        doc.editable.select_all();
        doc.merge_format(&CharFormat::bold(true));
        doc.delete_selection();
        assert!(doc.is_empty());

        assert!(doc.undo());
        assert_eq!(doc.text(), "hi");
        assert_eq!(doc.formats.len(), 2);
    }

    #[test]
    fn test_replace_all_resets_formatting() {
        let mut doc = doc_with("abc");
        doc.editable.select_all();
        doc.merge_format(&CharFormat::size(FontSize::clamped(20)));
        doc.replace_all("new text");
        assert_eq!(doc.formats.runs().len(), 1);
        assert_eq!(doc.style_at(0), Some(&doc.default_style));
        assert!(!doc.editable.can_undo());
    }

    #[test]
    fn test_line_max_size() {
        let mut doc = doc_with("small\nbig");
        doc.editable.select_range(7..8);
        doc.merge_format(&CharFormat::size(FontSize::clamped(24)));
        assert_eq!(doc.line_max_size(0).points(), 12);
        assert_eq!(doc.line_max_size(1).points(), 24);
    }
}
