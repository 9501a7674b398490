//! Edit history (undo/redo).
//!
//! One [`EditOperation`] covers everything a single user edit did to the buffer,
//! which may be several disjoint replacements when read-only text split the edit.

use super::cursor::Cursor;

/// One replacement applied to the buffer, in the order it was applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextChange {
    /// Char offset where the replacement started
    pub offset: usize,
    /// Text that was removed (empty for pure inserts)
    pub deleted: String,
    /// Text that was inserted (empty for pure deletes)
    pub inserted: String,
}

impl TextChange {
    pub fn inverse(&self) -> Self {
        Self {
            offset: self.offset,
            deleted: self.inserted.clone(),
            inserted: self.deleted.clone(),
        }
    }
}

/// A single edit that can be undone/redone.
#[derive(Debug, Clone)]
pub struct EditOperation {
    /// Replacements in application order
    pub changes: Vec<TextChange>,
    pub cursor_before: Cursor,
    pub cursor_after: Cursor,
}

impl EditOperation {
    pub fn new(changes: Vec<TextChange>, cursor_before: Cursor, cursor_after: Cursor) -> Self {
        Self {
            changes,
            cursor_before,
            cursor_after,
        }
    }

    /// The operation that restores the buffer to its state before this one.
    ///
    /// Replacements are reversed so each one sees exactly the text it produced.
    pub fn inverse(&self) -> Self {
        Self {
            changes: self.changes.iter().rev().map(TextChange::inverse).collect(),
            cursor_before: self.cursor_after,
            cursor_after: self.cursor_before,
        }
    }
}

/// Edit history with undo/redo stacks.
#[derive(Debug, Clone)]
pub struct EditHistory {
    undo_stack: Vec<EditOperation>,
    redo_stack: Vec<EditOperation>,
    max_size: usize,
}

impl Default for EditHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl EditHistory {
    pub fn new() -> Self {
        Self::with_max_size(1000)
    }

    pub fn with_max_size(max_size: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_size,
        }
    }

    /// Push an operation onto the undo stack (clears redo stack)
    pub fn push(&mut self, op: EditOperation) {
        self.redo_stack.clear();
        self.undo_stack.push(op);

        while self.undo_stack.len() > self.max_size {
            self.undo_stack.remove(0);
        }
    }

    /// Pop an operation from the undo stack; its inverse moves to the redo stack
    pub fn pop_undo(&mut self) -> Option<EditOperation> {
        let op = self.undo_stack.pop()?;
        self.redo_stack.push(op.inverse());
        Some(op)
    }

    /// Pop an operation from the redo stack; its inverse moves back to the undo stack
    pub fn pop_redo(&mut self) -> Option<EditOperation> {
        let op = self.redo_stack.pop()?;
        self.undo_stack.push(op.inverse());
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
    }

    pub fn undo_count(&self) -> usize {
        self.undo_stack.len()
    }
}
