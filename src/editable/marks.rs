//! Position-tracking range marks and bookmarks.
//!
//! Both are stored by char offset and remapped after every buffer replacement,
//! so holders keep a stable [`MarkId`] / [`BookmarkId`] instead of positions.

use serde::Serialize;
use slotmap::SlotMap;
use std::ops::Range;

slotmap::new_key_type! {
    pub struct MarkId;
    pub struct BookmarkId;
}

/// Three U+22C5 dot operators, shown in place of an empty region.
pub const PLACEHOLDER_GLYPH: &str = "\u{22c5}\u{22c5}\u{22c5}";

/// Single space standing in for the text about to be typed.
pub const CARET_GLYPH: &str = " ";

/// Which side of an edit a tracked position sticks to when the edit touches it.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Assoc {
    /// Stay at the start of the replacement
    Before,
    /// Move past the inserted text
    After,
}

/// Map a char offset through the replacement of `range` with `inserted` chars.
pub fn map_pos(pos: usize, range: &Range<usize>, inserted: usize, assoc: Assoc) -> usize {
    if pos < range.start {
        pos
    } else if pos > range.end {
        pos - range.len() + inserted
    } else {
        match assoc {
            Assoc::Before => range.start,
            Assoc::After => range.start + inserted,
        }
    }
}

/// Display class of a range mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum MarkClass {
    CodeBase,
    Tag,
    TagMultiline,
}

impl MarkClass {
    pub fn as_str(self) -> &'static str {
        match self {
            MarkClass::CodeBase => "code-base",
            MarkClass::Tag => "tag",
            MarkClass::TagMultiline => "tag-multiline",
        }
    }

    pub fn is_tag(self) -> bool {
        matches!(self, MarkClass::Tag | MarkClass::TagMultiline)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkOptions {
    pub class: MarkClass,
    /// Text inserted exactly at `from` lands inside the mark
    pub inclusive_left: bool,
    /// Text inserted exactly at `to` lands inside the mark
    pub inclusive_right: bool,
    pub read_only: bool,
    /// `name` attribute carried by tag marks
    pub name: Option<String>,
}

impl MarkOptions {
    pub fn read_only_base(inclusive_left: bool, inclusive_right: bool) -> Self {
        Self {
            class: MarkClass::CodeBase,
            inclusive_left,
            inclusive_right,
            read_only: true,
            name: None,
        }
    }

    pub fn tag(name: &str, multiline: bool) -> Self {
        Self {
            class: if multiline {
                MarkClass::TagMultiline
            } else {
                MarkClass::Tag
            },
            inclusive_left: true,
            inclusive_right: true,
            read_only: false,
            name: Some(name.to_string()),
        }
    }
}

/// A range `[from, to]` of char offsets that follows the text it covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextMark {
    pub from: usize,
    pub to: usize,
    pub options: MarkOptions,
}

impl TextMark {
    fn map(&mut self, range: &Range<usize>, inserted: usize) {
        let left = if self.options.inclusive_left {
            Assoc::Before
        } else {
            Assoc::After
        };
        let right = if self.options.inclusive_right {
            Assoc::After
        } else {
            Assoc::Before
        };
        self.from = map_pos(self.from, range, inserted, left);
        self.to = map_pos(self.to, range, inserted, right).max(self.from);
    }

    /// Inclusive containment, both boundaries count as inside
    pub fn contains(&self, offset: usize) -> bool {
        self.from <= offset && offset <= self.to
    }

    pub fn overlaps(&self, range: &Range<usize>) -> bool {
        self.from <= range.end && range.start <= self.to
    }
}

/// Non-buffer content rendered at a bookmark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Widget {
    Placeholder,
    InsertCaret,
}

impl Widget {
    pub fn glyph(self) -> &'static str {
        match self {
            Widget::Placeholder => PLACEHOLDER_GLYPH,
            Widget::InsertCaret => CARET_GLYPH,
        }
    }

    pub fn class(self) -> &'static str {
        match self {
            Widget::Placeholder => "tag-empty",
            Widget::InsertCaret => "insert-caret",
        }
    }
}

/// A zero-width point hosting a widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bookmark {
    pub pos: usize,
    pub widget: Widget,
    /// Text typed at the bookmark goes to its left
    pub insert_left: bool,
    seq: u64,
}

/// All marks and bookmarks of a document.
#[derive(Debug, Default)]
pub struct MarkSet {
    marks: SlotMap<MarkId, TextMark>,
    bookmarks: SlotMap<BookmarkId, Bookmark>,
    next_seq: u64,
}

impl MarkSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_mark(&mut self, from: usize, to: usize, options: MarkOptions) -> MarkId {
        self.marks.insert(TextMark {
            from,
            to: to.max(from),
            options,
        })
    }

    pub fn add_bookmark(&mut self, pos: usize, widget: Widget, insert_left: bool) -> BookmarkId {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.bookmarks.insert(Bookmark {
            pos,
            widget,
            insert_left,
            seq,
        })
    }

    pub fn mark(&self, id: MarkId) -> Option<&TextMark> {
        self.marks.get(id)
    }

    pub fn bookmark(&self, id: BookmarkId) -> Option<&Bookmark> {
        self.bookmarks.get(id)
    }

    pub fn remove_mark(&mut self, id: MarkId) -> Option<TextMark> {
        self.marks.remove(id)
    }

    pub fn remove_bookmark(&mut self, id: BookmarkId) -> Option<Bookmark> {
        self.bookmarks.remove(id)
    }

    pub fn clear(&mut self) {
        self.marks.clear();
        self.bookmarks.clear();
    }

    pub fn marks(&self) -> impl Iterator<Item = (MarkId, &TextMark)> {
        self.marks.iter()
    }

    /// Bookmarks in display order (position, then creation order)
    pub fn bookmarks(&self) -> Vec<(BookmarkId, &Bookmark)> {
        let mut all: Vec<_> = self.bookmarks.iter().collect();
        all.sort_by_key(|(_, b)| (b.pos, b.seq));
        all
    }

    pub fn bookmarks_at(&self, pos: usize) -> impl Iterator<Item = (BookmarkId, &Bookmark)> {
        self.bookmarks.iter().filter(move |(_, b)| b.pos == pos)
    }

    pub fn marks_at(&self, pos: usize) -> impl Iterator<Item = (MarkId, &TextMark)> {
        self.marks.iter().filter(move |(_, m)| m.contains(pos))
    }

    /// Remap everything after `range` was replaced by `inserted` chars
    pub fn map_change(&mut self, range: &Range<usize>, inserted: usize) {
        for mark in self.marks.values_mut() {
            mark.map(range, inserted);
        }
        for bookmark in self.bookmarks.values_mut() {
            let assoc = if bookmark.insert_left {
                Assoc::After
            } else {
                Assoc::Before
            };
            bookmark.pos = map_pos(bookmark.pos, range, inserted, assoc);
        }
    }

    /// Split `range` into the pieces that avoid read-only marks.
    ///
    /// Returns `None` when no read-only mark touches the range. A piece may be
    /// empty: it marks an insertion point that sits on a non-inclusive boundary.
    pub fn split_read_only(&self, range: Range<usize>) -> Option<Vec<Range<usize>>> {
        let read_only: Vec<&TextMark> = self
            .marks
            .values()
            .filter(|m| m.options.read_only && m.overlaps(&range))
            .collect();
        if read_only.is_empty() {
            return None;
        }

        let mut parts = vec![range];
        for mark in read_only {
            let mut j = 0;
            while j < parts.len() {
                let part = parts[j].clone();
                if part.end < mark.from || part.start > mark.to {
                    j += 1;
                    continue;
                }
                let mut pieces = Vec::with_capacity(2);
                if part.start < mark.from
                    || (!mark.options.inclusive_left && part.start == mark.from)
                {
                    pieces.push(part.start..mark.from);
                }
                if part.end > mark.to || (!mark.options.inclusive_right && part.end == mark.to) {
                    pieces.push(mark.to..part.end);
                }
                let added = pieces.len();
                parts.splice(j..=j, pieces);
                j += added;
            }
        }
        Some(parts)
    }
}
