//! Document - a rope buffer with one cursor, range marks, line classes and history.

use std::borrow::Cow;
use std::ops::Range;

use crate::util::{char_type, CharType};

use super::buffer::{RopeBuffer, TextBuffer, TextBufferMut};
use super::change::{BeforeChange, ChangeOrigin, PendingChange};
use super::cursor::{Cursor, Position};
use super::history::{EditHistory, EditOperation, TextChange};
use super::marks::{
    map_pos, Assoc, Bookmark, BookmarkId, MarkId, MarkOptions, MarkSet, TextMark, Widget,
};
use super::messages::{MoveTarget, TextEditMsg};
use super::selection::Selection;

/// Default width of one character cell, in pixels.
pub const DEFAULT_CHAR_WIDTH: f32 = 8.0;

/// Cursor styling injected while an insertion caret is shown.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CaretStyle {
    pub border_left_width: f32,
}

impl CaretStyle {
    pub fn css(&self) -> String {
        format!("border-left-width: {}px", self.border_left_width)
    }
}

/// Editable text with a single cursor, selection, marks and undo history.
///
/// Every edit goes through [`BeforeChange`] filters, then is split around
/// read-only marks, then applied part by part with marks and line classes
/// remapped after each part.
#[derive(Debug)]
pub struct Document {
    buffer: RopeBuffer,
    cursor: Cursor,
    /// Head always equals the cursor position
    selection: Selection,
    history: EditHistory,
    marks: MarkSet,
    /// One entry per buffer line
    line_classes: Vec<Vec<String>>,
    caret_style: Option<CaretStyle>,
    char_width: f32,
    filters: Vec<Box<dyn BeforeChange>>,
    revision: u64,
}

impl Default for Document {
    fn default() -> Self {
        Self::new("")
    }
}

impl Document {
    pub fn new(text: &str) -> Self {
        let buffer = RopeBuffer::from_text(text);
        let line_classes = vec![Vec::new(); buffer.line_count()];
        Self {
            buffer,
            cursor: Cursor::new(0, 0),
            selection: Selection::collapsed(Position::zero()),
            history: EditHistory::new(),
            marks: MarkSet::new(),
            line_classes,
            caret_style: None,
            char_width: DEFAULT_CHAR_WIDTH,
            filters: Vec::new(),
            revision: 0,
        }
    }

    pub fn buffer(&self) -> &RopeBuffer {
        &self.buffer
    }

    pub fn text(&self) -> String {
        self.buffer.content()
    }

    pub fn line(&self, line: usize) -> Option<Cow<'_, str>> {
        self.buffer.line(line)
    }

    pub fn line_count(&self) -> usize {
        self.buffer.line_count()
    }

    /// Incremented once for every replacement applied to the buffer
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn cursor(&self) -> Position {
        self.cursor.to_position()
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn has_selection(&self) -> bool {
        !self.selection.is_empty()
    }

    pub fn selected_text(&self) -> String {
        if self.selection.is_empty() {
            return String::new();
        }
        self.slice(self.selection.start(), self.selection.end())
    }

    pub fn slice(&self, from: Position, to: Position) -> String {
        self.buffer
            .slice(self.buffer.offset_of(from)..self.buffer.offset_of(to))
    }

    pub fn offset_of(&self, pos: Position) -> usize {
        self.buffer.offset_of(pos)
    }

    pub fn position_of(&self, offset: usize) -> Position {
        self.buffer.position_of(offset)
    }

    pub fn char_width(&self) -> f32 {
        self.char_width
    }

    pub fn set_char_width(&mut self, width: f32) {
        self.char_width = width;
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// Register a hook that sees every change before it is applied
    pub fn add_filter(&mut self, filter: Box<dyn BeforeChange>) {
        self.filters.push(filter);
    }

    /// Place the cursor, collapsing any selection
    pub fn set_cursor(&mut self, pos: Position) {
        let pos = self.buffer.clip(pos);
        self.cursor.set_position(pos);
        self.selection = Selection::collapsed(pos);
    }

    pub fn set_selection(&mut self, anchor: Position, head: Position) {
        let anchor = self.buffer.clip(anchor);
        let head = self.buffer.clip(head);
        self.cursor.set_position(head);
        self.selection = Selection::new(anchor, head);
    }

    pub fn collapse_selection(&mut self) {
        self.selection = Selection::collapsed(self.cursor.to_position());
    }

    /// Buffer text with every bookmark widget drawn at its position
    pub fn render(&self) -> String {
        let text = self.buffer.content();
        let bookmarks = self.marks.bookmarks();
        let mut out = String::with_capacity(text.len() + bookmarks.len() * 9);
        let mut pending = bookmarks.iter().peekable();
        for (offset, ch) in text.chars().enumerate() {
            while let Some((_, bookmark)) = pending.next_if(|(_, b)| b.pos <= offset) {
                out.push_str(bookmark.widget.glyph());
            }
            out.push(ch);
        }
        for (_, bookmark) in pending {
            out.push_str(bookmark.widget.glyph());
        }
        out
    }
}

// =============================================================================
// Marks, line classes and caret style
// =============================================================================

impl Document {
    pub fn add_mark(&mut self, from: Position, to: Position, options: MarkOptions) -> MarkId {
        let from = self.buffer.offset_of(from);
        let to = self.buffer.offset_of(to);
        self.marks.add_mark(from, to, options)
    }

    pub fn mark(&self, id: MarkId) -> Option<&TextMark> {
        self.marks.mark(id)
    }

    /// Current bounds of a mark, None once it has been removed
    pub fn find_mark(&self, id: MarkId) -> Option<(Position, Position)> {
        self.marks
            .mark(id)
            .map(|m| (self.buffer.position_of(m.from), self.buffer.position_of(m.to)))
    }

    pub fn marks(&self) -> impl Iterator<Item = (MarkId, &TextMark)> {
        self.marks.marks()
    }

    pub fn marks_at(&self, pos: Position) -> impl Iterator<Item = (MarkId, &TextMark)> {
        self.marks.marks_at(self.buffer.offset_of(pos))
    }

    pub fn remove_mark(&mut self, id: MarkId) -> bool {
        self.marks.remove_mark(id).is_some()
    }

    pub fn add_bookmark(&mut self, pos: Position, widget: Widget, insert_left: bool) -> BookmarkId {
        let offset = self.buffer.offset_of(pos);
        self.marks.add_bookmark(offset, widget, insert_left)
    }

    pub fn bookmark(&self, id: BookmarkId) -> Option<&Bookmark> {
        self.marks.bookmark(id)
    }

    pub fn find_bookmark(&self, id: BookmarkId) -> Option<Position> {
        self.marks
            .bookmark(id)
            .map(|b| self.buffer.position_of(b.pos))
    }

    pub fn bookmarks(&self) -> Vec<(BookmarkId, &Bookmark)> {
        self.marks.bookmarks()
    }

    pub fn bookmarks_at(&self, pos: Position) -> impl Iterator<Item = (BookmarkId, &Bookmark)> {
        self.marks.bookmarks_at(self.buffer.offset_of(pos))
    }

    pub fn remove_bookmark(&mut self, id: BookmarkId) -> bool {
        self.marks.remove_bookmark(id).is_some()
    }

    /// Drop every mark and bookmark
    pub fn clear_marks(&mut self) {
        self.marks.clear();
    }

    /// Returns false when the line is out of range or already has the class
    pub fn add_line_class(&mut self, line: usize, class: &str) -> bool {
        match self.line_classes.get_mut(line) {
            Some(classes) if !classes.iter().any(|c| c == class) => {
                classes.push(class.to_string());
                true
            }
            _ => false,
        }
    }

    pub fn remove_line_class(&mut self, line: usize, class: &str) -> bool {
        match self.line_classes.get_mut(line) {
            Some(classes) => {
                let before = classes.len();
                classes.retain(|c| c != class);
                classes.len() != before
            }
            None => false,
        }
    }

    pub fn line_classes(&self, line: usize) -> &[String] {
        self.line_classes
            .get(line)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn lines_with_class(&self, class: &str) -> Vec<usize> {
        self.line_classes
            .iter()
            .enumerate()
            .filter(|(_, classes)| classes.iter().any(|c| c == class))
            .map(|(line, _)| line)
            .collect()
    }

    pub fn caret_style(&self) -> Option<CaretStyle> {
        self.caret_style
    }

    /// Inject the wide-caret style sized to the default character width
    pub fn set_caret_style(&mut self) {
        self.caret_style = Some(CaretStyle {
            border_left_width: self.char_width,
        });
    }

    pub fn clear_caret_style(&mut self) {
        self.caret_style = None;
    }
}

// =============================================================================
// Movement Operations
// =============================================================================

impl Document {
    /// Move the cursor, extending the selection or collapsing it
    pub fn move_cursor(&mut self, target: MoveTarget, extend_selection: bool) {
        // Horizontal moves without shift first collapse an existing selection
        if !extend_selection && self.has_selection() {
            let collapse_to = match target {
                MoveTarget::Left | MoveTarget::WordLeft => Some(self.selection.start()),
                MoveTarget::Right | MoveTarget::WordRight => Some(self.selection.end()),
                _ => None,
            };
            if let Some(pos) = collapse_to {
                self.set_cursor(pos);
                return;
            }
        }

        let pos = self.cursor.to_position();
        match target {
            MoveTarget::Left => {
                let target = self.char_left_of(pos);
                self.cursor.set_position(target);
            }
            MoveTarget::Right => {
                let target = self.char_right_of(pos);
                self.cursor.set_position(target);
            }
            MoveTarget::Up => {
                if pos.line == 0 {
                    return;
                }
                self.move_vertically(pos.line - 1);
            }
            MoveTarget::Down => {
                if pos.line + 1 >= self.buffer.line_count() {
                    return;
                }
                self.move_vertically(pos.line + 1);
            }
            MoveTarget::LineStart => self.cursor.set_position(Position::new(pos.line, 0)),
            MoveTarget::LineEnd => {
                let len = self.buffer.line_length(pos.line);
                self.cursor.set_position(Position::new(pos.line, len));
            }
            MoveTarget::WordLeft => {
                let target = self.word_left_of(pos);
                self.cursor.set_position(target);
            }
            MoveTarget::WordRight => {
                let target = self.word_right_of(pos);
                self.cursor.set_position(target);
            }
            MoveTarget::DocumentStart => self.cursor.set_position(Position::zero()),
            MoveTarget::DocumentEnd => {
                let end = self.buffer.end_position();
                self.cursor.set_position(end);
            }
        }

        if extend_selection {
            self.selection.extend_to(self.cursor.to_position());
        } else {
            self.collapse_selection();
        }
    }

    pub fn select_all(&mut self) {
        let end = self.buffer.end_position();
        self.set_selection(Position::zero(), end);
    }

    fn move_vertically(&mut self, line: usize) {
        self.cursor.set_desired_column();
        self.cursor.line = line;
        self.cursor.column = self
            .cursor
            .effective_column()
            .min(self.buffer.line_length(line));
    }

    fn char_left_of(&self, pos: Position) -> Position {
        if pos.column > 0 {
            Position::new(pos.line, pos.column - 1)
        } else if pos.line > 0 {
            Position::new(pos.line - 1, self.buffer.line_length(pos.line - 1))
        } else {
            pos
        }
    }

    fn char_right_of(&self, pos: Position) -> Position {
        if pos.column < self.buffer.line_length(pos.line) {
            Position::new(pos.line, pos.column + 1)
        } else if pos.line + 1 < self.buffer.line_count() {
            Position::new(pos.line + 1, 0)
        } else {
            pos
        }
    }

    fn word_left_of(&self, pos: Position) -> Position {
        if pos.column == 0 {
            return self.char_left_of(pos);
        }
        let line = pos.line;
        let mut col = pos.column.min(self.buffer.line_length(line));

        // Skip whitespace/punctuation, then the word itself
        while col > 0
            && self
                .buffer
                .char_at(line, col - 1)
                .is_some_and(|ch| char_type(ch) != CharType::WordChar)
        {
            col -= 1;
        }
        while col > 0
            && self
                .buffer
                .char_at(line, col - 1)
                .is_some_and(|ch| char_type(ch) == CharType::WordChar)
        {
            col -= 1;
        }
        Position::new(line, col)
    }

    fn word_right_of(&self, pos: Position) -> Position {
        let line = pos.line;
        let line_len = self.buffer.line_length(line);
        if pos.column >= line_len {
            return self.char_right_of(pos);
        }

        let mut col = pos.column;
        if let Some(first) = self.buffer.char_at(line, col) {
            let start_type = char_type(first);
            while col < line_len
                && self
                    .buffer
                    .char_at(line, col)
                    .is_some_and(|ch| char_type(ch) == start_type)
            {
                col += 1;
            }
        }
        while col < line_len
            && self
                .buffer
                .char_at(line, col)
                .is_some_and(|ch| char_type(ch) == CharType::Whitespace)
        {
            col += 1;
        }
        Position::new(line, col)
    }
}

// =============================================================================
// Editing Operations
// =============================================================================

impl Document {
    /// Apply a [`TextEditMsg`]. Returns true if the buffer changed.
    pub fn apply(&mut self, msg: &TextEditMsg) -> bool {
        match msg {
            TextEditMsg::Move(target) => {
                self.move_cursor(*target, false);
                false
            }
            TextEditMsg::MoveWithSelection(target) => {
                self.move_cursor(*target, true);
                false
            }
            TextEditMsg::InsertChar(ch) => self.insert_char(*ch),
            TextEditMsg::InsertText(text) => self.insert_text(text),
            TextEditMsg::InsertNewline => self.insert_newline(),
            TextEditMsg::Paste(text) => self.paste(text),
            TextEditMsg::DeleteBackward => self.delete_backward(),
            TextEditMsg::DeleteForward => self.delete_forward(),
            TextEditMsg::DeleteWordBackward => self.delete_word_backward(),
            TextEditMsg::DeleteWordForward => self.delete_word_forward(),
            TextEditMsg::SelectAll => {
                self.select_all();
                false
            }
            TextEditMsg::CollapseSelection => {
                self.collapse_selection();
                false
            }
            TextEditMsg::Undo => self.undo(),
            TextEditMsg::Redo => self.redo(),
        }
    }

    pub fn insert_char(&mut self, ch: char) -> bool {
        let mut buf = [0u8; 4];
        self.replace_selection(ch.encode_utf8(&mut buf), ChangeOrigin::Input)
    }

    pub fn insert_text(&mut self, text: &str) -> bool {
        self.replace_selection(text, ChangeOrigin::Input)
    }

    pub fn insert_newline(&mut self) -> bool {
        self.replace_selection("\n", ChangeOrigin::Input)
    }

    pub fn paste(&mut self, text: &str) -> bool {
        self.replace_selection(text, ChangeOrigin::Paste)
    }

    /// Delete character before cursor (Backspace)
    pub fn delete_backward(&mut self) -> bool {
        if self.has_selection() {
            return self.delete_selection();
        }
        let pos = self.cursor.to_position();
        let from = self.char_left_of(pos);
        from != pos && self.edit(from, pos, "", ChangeOrigin::Delete)
    }

    /// Delete character after cursor (Delete key)
    pub fn delete_forward(&mut self) -> bool {
        if self.has_selection() {
            return self.delete_selection();
        }
        let pos = self.cursor.to_position();
        let to = self.char_right_of(pos);
        to != pos && self.edit(pos, to, "", ChangeOrigin::Delete)
    }

    pub fn delete_word_backward(&mut self) -> bool {
        if self.has_selection() {
            return self.delete_selection();
        }
        let pos = self.cursor.to_position();
        let from = self.word_left_of(pos);
        from != pos && self.edit(from, pos, "", ChangeOrigin::Delete)
    }

    pub fn delete_word_forward(&mut self) -> bool {
        if self.has_selection() {
            return self.delete_selection();
        }
        let pos = self.cursor.to_position();
        let to = self.word_right_of(pos);
        to != pos && self.edit(pos, to, "", ChangeOrigin::Delete)
    }

    fn delete_selection(&mut self) -> bool {
        let (from, to) = (self.selection.start(), self.selection.end());
        self.edit(from, to, "", ChangeOrigin::Delete)
    }

    fn replace_selection(&mut self, text: &str, origin: ChangeOrigin) -> bool {
        if text.is_empty() && !self.has_selection() {
            return false;
        }
        let (from, to) = (self.selection.start(), self.selection.end());
        self.edit(from, to, text, origin)
    }

    /// Replace a range through the full change pipeline, recording history.
    /// Returns true if any part of the change was applied.
    pub fn replace_range(
        &mut self,
        from: Position,
        to: Position,
        text: &str,
        origin: ChangeOrigin,
    ) -> bool {
        let from = self.buffer.clip(from);
        let to = self.buffer.clip(to);
        self.edit(from, to, text, origin)
    }

    /// Replace the whole buffer. Clears history and resets the cursor.
    pub fn set_value(&mut self, text: &str) {
        let end = self.buffer.end_position();
        self.make_change(PendingChange::new(
            Position::zero(),
            end,
            text,
            ChangeOrigin::SetValue,
        ));
        self.line_classes = vec![Vec::new(); self.buffer.line_count()];
        self.history.clear();
        self.set_cursor(Position::zero());
    }

    pub fn undo(&mut self) -> bool {
        let Some(op) = self.history.pop_undo() else {
            return false;
        };
        tracing::trace!("undo {} change(s)", op.changes.len());
        self.replay(op.inverse(), ChangeOrigin::Undo);
        true
    }

    pub fn redo(&mut self) -> bool {
        let Some(op) = self.history.pop_redo() else {
            return false;
        };
        tracing::trace!("redo {} change(s)", op.changes.len());
        self.replay(op.inverse(), ChangeOrigin::Redo);
        true
    }

    fn replay(&mut self, op: EditOperation, origin: ChangeOrigin) {
        for change in &op.changes {
            let from = self.buffer.position_of(change.offset);
            let to = self
                .buffer
                .position_of(change.offset + change.deleted.chars().count());
            self.make_change(PendingChange::new(from, to, &change.inserted, origin));
        }
        let pos = self.buffer.clip(op.cursor_after.to_position());
        self.set_cursor(pos);
    }

    fn edit(&mut self, from: Position, to: Position, text: &str, origin: ChangeOrigin) -> bool {
        let cursor_before = self.cursor;
        let changes = self.make_change(PendingChange::new(from, to, text, origin));
        if changes.is_empty() {
            return false;
        }
        self.history
            .push(EditOperation::new(changes, cursor_before, self.cursor));
        true
    }

    /// Filter, split and apply a change. Returns the replacements actually made.
    fn make_change(&mut self, mut change: PendingChange) -> Vec<TextChange> {
        for filter in &self.filters {
            filter.before_change(self, &mut change);
            if change.is_cancelled() {
                tracing::trace!("{:?} change cancelled by filter", change.origin);
                return Vec::new();
            }
        }

        let start = self.buffer.offset_of(change.from.min(change.to));
        let end = self.buffer.offset_of(change.from.max(change.to));
        let text = change.inserted_text();

        let split = if change.origin.is_trusted() {
            None
        } else {
            self.marks.split_read_only(start..end)
        };
        let parts = split.unwrap_or_else(|| vec![start..end]);

        let mut cursor = self.buffer.offset_of(self.cursor.to_position());
        let mut first_end = None;
        let mut applied = Vec::new();

        // Later parts first so earlier offsets stay valid
        for (i, part) in parts.iter().enumerate().rev() {
            let inserted = if i == 0 { text.as_str() } else { "" };
            if part.is_empty() && inserted.is_empty() {
                continue;
            }
            let inserted_len = inserted.chars().count();
            cursor = map_pos(cursor, part, inserted_len, Assoc::After);
            if i == 0 {
                first_end = Some(part.start + inserted_len);
            }
            applied.push(self.apply_part(part.clone(), inserted));
        }

        if applied.is_empty() {
            tracing::trace!(
                "{:?} change at {} dropped by read-only text",
                change.origin,
                change.from
            );
            return applied;
        }

        let pos = self.buffer.position_of(first_end.unwrap_or(cursor));
        self.set_cursor(pos);
        applied
    }

    fn apply_part(&mut self, range: Range<usize>, inserted: &str) -> TextChange {
        let first_line = self.buffer.position_of(range.start).line;
        let last_line = self.buffer.position_of(range.end).line;
        let deleted = self.buffer.slice(range.clone());

        self.buffer.replace(range.clone(), inserted);
        self.marks.map_change(&range, inserted.chars().count());

        // Lines swallowed by the edit lose their classes; new lines start bare
        let added = inserted.matches('\n').count();
        self.line_classes.splice(
            first_line + 1..=last_line,
            std::iter::repeat_with(Vec::new).take(added),
        );
        self.revision += 1;

        TextChange {
            offset: range.start,
            deleted,
            inserted: inserted.to_string(),
        }
    }
}
