//! Per-tag state, kept in sync with the document's marks.

use crate::editable::{BookmarkId, Document, MarkId, MarkOptions, Position};

use super::parser::ParsedTemplate;

/// Runtime state of one tag.
#[derive(Debug, Clone)]
pub struct TagState {
    name: String,
    content: String,
    multiline: bool,
    cursor_in: bool,
    range: MarkId,
    pub(super) placeholder: Option<BookmarkId>,
    pub(super) caret: Option<BookmarkId>,
}

impl TagState {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Text currently inside the tag
    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn is_multiline(&self) -> bool {
        self.multiline
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Whether the cursor was inside the tag at the last cursor activity
    pub fn cursor_in(&self) -> bool {
        self.cursor_in
    }

    pub fn range(&self) -> MarkId {
        self.range
    }

    pub fn has_placeholder(&self) -> bool {
        self.placeholder.is_some()
    }

    pub fn has_caret(&self) -> bool {
        self.caret.is_some()
    }

    /// Current `[from, to]` of the tag
    pub fn bounds(&self, doc: &Document) -> Option<(Position, Position)> {
        doc.find_mark(self.range)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagEventKind {
    ContentChanged,
    Entered,
    Left,
}

/// A transition detected by the registry. `index` points into [`Registry::tags`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagEvent {
    pub index: usize,
    pub kind: TagEventKind,
}

impl TagEvent {
    fn new(index: usize, kind: TagEventKind) -> Self {
        Self { index, kind }
    }
}

/// All tags of the loaded template plus the base segments around them.
#[derive(Debug, Default)]
pub struct Registry {
    tags: Vec<TagState>,
    segments: Vec<MarkId>,
}

impl Registry {
    /// Install the marks for a parsed template into `doc`, whose text must
    /// already equal `parsed.text`.
    pub fn build(doc: &mut Document, parsed: &ParsedTemplate) -> Self {
        let segments = parsed
            .segments
            .iter()
            .map(|segment| {
                let from = doc.position_of(segment.range.start);
                let to = doc.position_of(segment.range.end);
                doc.add_mark(
                    from,
                    to,
                    MarkOptions::read_only_base(segment.inclusive_left, segment.inclusive_right),
                )
            })
            .collect();

        let tags = parsed
            .tags
            .iter()
            .map(|tag| {
                let at = doc.position_of(tag.offset);
                TagState {
                    name: tag.name.clone(),
                    content: String::new(),
                    multiline: tag.multiline,
                    cursor_in: false,
                    range: doc.add_mark(at, at, MarkOptions::tag(&tag.name, tag.multiline)),
                    placeholder: None,
                    caret: None,
                }
            })
            .collect();

        Self { tags, segments }
    }

    /// Tags in source order, which is also document order
    pub fn tags(&self) -> &[TagState] {
        &self.tags
    }

    pub(super) fn tags_mut(&mut self) -> &mut [TagState] {
        &mut self.tags
    }

    pub fn tag(&self, name: &str) -> Option<&TagState> {
        self.tags.iter().find(|t| t.name == name)
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.tags.iter().position(|t| t.name == name)
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Current `[from, to]` of every read-only base segment
    pub fn base_segments(&self, doc: &Document) -> Vec<(Position, Position)> {
        self.segments
            .iter()
            .filter_map(|&id| doc.find_mark(id))
            .collect()
    }

    /// Tag indices sorted by current start position, ties kept in source order
    pub fn ordered(&self, doc: &Document) -> Vec<usize> {
        let mut order: Vec<(Position, usize)> = self
            .tags
            .iter()
            .enumerate()
            .filter_map(|(i, tag)| tag.bounds(doc).map(|(from, _)| (from, i)))
            .collect();
        order.sort();
        order.into_iter().map(|(_, i)| i).collect()
    }

    /// First tag, in position order, whose range contains `pos` (boundaries included)
    pub fn tag_at(&self, doc: &Document, pos: Position) -> Option<usize> {
        self.ordered(doc).into_iter().find(|&i| {
            self.tags[i]
                .bounds(doc)
                .is_some_and(|(from, to)| from <= pos && pos <= to)
        })
    }

    /// Re-read every tag's content, reporting the ones that changed
    pub fn on_buffer_changed(&mut self, doc: &Document) -> Vec<TagEvent> {
        let mut events = Vec::new();
        for (i, tag) in self.tags.iter_mut().enumerate() {
            let Some((from, to)) = tag.bounds(doc) else {
                continue;
            };
            let content = doc.slice(from, to);
            if content != tag.content {
                tracing::trace!("tag '{}' content {:?} -> {:?}", tag.name, tag.content, content);
                tag.content = content;
                events.push(TagEvent::new(i, TagEventKind::ContentChanged));
            }
        }
        events
    }

    /// Track which tag holds the cursor. Ignored while a selection is active.
    ///
    /// Leave transitions are reported before enter transitions.
    pub fn on_cursor_activity(&mut self, doc: &Document) -> Vec<TagEvent> {
        if doc.has_selection() {
            return Vec::new();
        }

        let cursor = doc.cursor();
        let mut left = Vec::new();
        let mut entered = Vec::new();
        for (i, tag) in self.tags.iter_mut().enumerate() {
            let inside = tag
                .bounds(doc)
                .is_some_and(|(from, to)| from <= cursor && cursor <= to);
            match (tag.cursor_in, inside) {
                (false, true) => entered.push(TagEvent::new(i, TagEventKind::Entered)),
                (true, false) => left.push(TagEvent::new(i, TagEventKind::Left)),
                _ => {}
            }
            tag.cursor_in = inside;
        }
        left.extend(entered);
        left
    }
}
