//! Undo/redo stacks

use super::cursor::Cursor;

/// A single reversible edit, offsets in characters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditOperation {
    pub offset: usize,
    /// Text removed by the edit (empty for pure inserts)
    pub deleted_text: String,
    /// Text added by the edit (empty for pure deletes)
    pub inserted_text: String,
    pub cursor_before: Cursor,
    pub cursor_after: Cursor,
}

impl EditOperation {
    pub fn replace(
        offset: usize,
        deleted_text: String,
        inserted_text: String,
        cursor_before: Cursor,
        cursor_after: Cursor,
    ) -> Self {
        Self {
            offset,
            deleted_text,
            inserted_text,
            cursor_before,
            cursor_after,
        }
    }

    pub fn insert(offset: usize, text: String, cursor_before: Cursor, cursor_after: Cursor) -> Self {
        Self::replace(offset, String::new(), text, cursor_before, cursor_after)
    }

    pub fn delete(offset: usize, text: String, cursor_before: Cursor, cursor_after: Cursor) -> Self {
        Self::replace(offset, text, String::new(), cursor_before, cursor_after)
    }

    /// The edit that undoes this one
    pub fn inverse(&self) -> Self {
        Self {
            offset: self.offset,
            deleted_text: self.inserted_text.clone(),
            inserted_text: self.deleted_text.clone(),
            cursor_before: self.cursor_after,
            cursor_after: self.cursor_before,
        }
    }

    /// Append a typed insert that continues this one, if it does
    ///
    /// Consecutive single-character inserts merge into one undo step until
    /// whitespace follows a word or the cursor jumps elsewhere.
    fn absorb(&mut self, next: &EditOperation) -> bool {
        let is_plain_insert = |op: &EditOperation| op.deleted_text.is_empty() && !op.inserted_text.is_empty();
        if !is_plain_insert(self) || !is_plain_insert(next) {
            return false;
        }
        if next.inserted_text.contains('\n') || self.inserted_text.contains('\n') {
            return false;
        }
        if self.offset + self.inserted_text.chars().count() != next.offset {
            return false;
        }
        let ends_with_space = self.inserted_text.ends_with(char::is_whitespace);
        let starts_with_space = next.inserted_text.starts_with(char::is_whitespace);
        if starts_with_space && !ends_with_space {
            return false;
        }
        self.inserted_text.push_str(&next.inserted_text);
        self.cursor_after = next.cursor_after;
        true
    }
}

/// Bounded undo/redo history
#[derive(Debug, Clone)]
pub struct EditHistory {
    undo_stack: Vec<EditOperation>,
    redo_stack: Vec<EditOperation>,
    max_size: usize,
    /// Set while consecutive typing may still merge into the last entry
    coalescing: bool,
}

impl Default for EditHistory {
    fn default() -> Self {
        Self::with_max_size(1000)
    }
}

impl EditHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_size(max_size: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_size,
            coalescing: false,
        }
    }

    /// Record an edit, clearing the redo stack
    pub fn push(&mut self, op: EditOperation) {
        self.redo_stack.clear();
        self.undo_stack.push(op);
        self.coalescing = false;
        if self.undo_stack.len() > self.max_size {
            let excess = self.undo_stack.len() - self.max_size;
            self.undo_stack.drain(..excess);
        }
    }

    /// Record a typed edit, merging it into the previous one when it continues it
    pub fn push_typed(&mut self, op: EditOperation) {
        if self.coalescing {
            if let Some(last) = self.undo_stack.last_mut() {
                if last.absorb(&op) {
                    self.redo_stack.clear();
                    return;
                }
            }
        }
        self.push(op);
        self.coalescing = true;
    }

    /// Stop merging typed edits into the current entry
    pub fn break_coalescing(&mut self) {
        self.coalescing = false;
    }

    /// Take the latest edit for undoing; its inverse becomes redoable
    pub fn pop_undo(&mut self) -> Option<EditOperation> {
        let op = self.undo_stack.pop()?;
        self.redo_stack.push(op.inverse());
        self.coalescing = false;
        Some(op)
    }

    /// Take the latest undone edit for redoing
    pub fn pop_redo(&mut self) -> Option<EditOperation> {
        let op = self.redo_stack.pop()?;
        self.undo_stack.push(op.inverse());
        self.coalescing = false;
        Some(op)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.coalescing = false;
    }

    pub fn undo_count(&self) -> usize {
        self.undo_stack.len()
    }
}
