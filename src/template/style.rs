//! Line classes for multiline tags.

use crate::editable::Document;

use super::registry::TagState;

/// Class put on every line a multiline tag spans
pub const WRAP_CLASS: &str = "tag-wrap";

pub fn on_entered(doc: &mut Document, tag: &TagState) {
    if !tag.is_multiline() {
        return;
    }
    if let Some((from, _)) = tag.bounds(doc) {
        doc.add_line_class(from.line, WRAP_CLASS);
    }
}

pub fn on_content_changed(doc: &mut Document, tag: &TagState) {
    if !tag.is_multiline() {
        return;
    }
    if let Some((from, to)) = tag.bounds(doc) {
        for line in from.line + 1..=to.line {
            doc.add_line_class(line, WRAP_CLASS);
        }
    }
}

pub fn on_left(doc: &mut Document, tag: &TagState) {
    if !tag.is_multiline() || !tag.is_empty() {
        return;
    }
    if let Some((from, _)) = tag.bounds(doc) {
        doc.remove_line_class(from.line, WRAP_CLASS);
    }
}
