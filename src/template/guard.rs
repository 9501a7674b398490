//! Keeps single-line tags single-line.

use crate::editable::{BeforeChange, Document, MarkClass, PendingChange, TextMark};

/// Truncates multi-line edits to their first line unless they target a
/// multiline tag. Read-only text is handled by the document itself.
#[derive(Debug, Default, Clone, Copy)]
pub struct MutationGuard;

impl MutationGuard {
    /// The tag an edit of `[start, end]` belongs to: one containing the start,
    /// else the first one overlapping the range, else one containing the end.
    pub fn owning_tag(doc: &Document, start: usize, end: usize) -> Option<&TextMark> {
        let mut tags: Vec<&TextMark> = doc
            .marks()
            .map(|(_, mark)| mark)
            .filter(|mark| mark.options.class.is_tag())
            .collect();
        tags.sort_by_key(|mark| (mark.from, mark.to));

        tags.iter()
            .find(|mark| mark.contains(start))
            .or_else(|| tags.iter().find(|mark| mark.overlaps(&(start..end))))
            .or_else(|| tags.iter().find(|mark| mark.contains(end)))
            .copied()
    }
}

impl BeforeChange for MutationGuard {
    fn before_change(&self, doc: &Document, change: &mut PendingChange) {
        if change.origin.is_trusted() || !change.is_multiline() {
            return;
        }

        let start = doc.offset_of(change.from.min(change.to));
        let end = doc.offset_of(change.from.max(change.to));
        let owner = Self::owning_tag(doc, start, end);
        if owner.is_some_and(|mark| mark.options.class == MarkClass::TagMultiline) {
            return;
        }

        tracing::debug!(
            "truncating {:?} change at {} to its first line ({:?})",
            change.origin,
            change.from,
            owner.and_then(|mark| mark.options.name.as_deref())
        );
        let first = change.text.first().cloned().unwrap_or_default();
        let (from, to) = (change.from, change.to);
        change.update(from, to, vec![first]);
    }
}
