//! Placeholder and insertion-caret widgets for empty tags.
//!
//! An empty tag shows exactly one widget: the insertion caret while the
//! cursor sits inside it with no selection, the placeholder otherwise.
//! Tags with content show neither. The caret style follows the carets and
//! is reconciled by the session once all events of an input are handled.

use crate::editable::{Document, Position, Widget};

use super::registry::TagState;

pub fn on_content_changed(doc: &mut Document, tag: &mut TagState) {
    if !tag.is_empty() {
        clear_placeholder(doc, tag);
        clear_caret(doc, tag);
        return;
    }

    let Some((from, to)) = tag.bounds(doc) else {
        return;
    };
    let cursor = doc.cursor();
    let inside = from <= cursor && cursor <= to;
    if inside && !doc.has_selection() {
        clear_placeholder(doc, tag);
        install_caret(doc, tag, to);
    } else {
        clear_caret(doc, tag);
        install_placeholder(doc, tag, to);
    }
}

pub fn on_entered(doc: &mut Document, tag: &mut TagState) {
    if !tag.is_empty() {
        return;
    }
    clear_placeholder(doc, tag);
    if !doc.has_selection() {
        if let Some((_, to)) = tag.bounds(doc) {
            install_caret(doc, tag, to);
        }
    }
}

pub fn on_left(doc: &mut Document, tag: &mut TagState) {
    if !tag.is_empty() {
        return;
    }
    clear_caret(doc, tag);
    if let Some((from, _)) = tag.bounds(doc) {
        install_placeholder(doc, tag, from);
    }
}

/// Show the placeholder of an empty tag at its start, e.g. right after load
pub fn show_placeholder(doc: &mut Document, tag: &mut TagState) {
    if tag.is_empty() && tag.caret.is_none() {
        if let Some((from, _)) = tag.bounds(doc) {
            install_placeholder(doc, tag, from);
        }
    }
}

/// Remove the tag's placeholder as if it had been clicked.
/// Returns where it was.
pub fn activate(doc: &mut Document, tag: &mut TagState) -> Option<Position> {
    let id = tag.placeholder.take()?;
    let pos = doc.find_bookmark(id);
    doc.remove_bookmark(id);
    pos
}

fn install_placeholder(doc: &mut Document, tag: &mut TagState, at: Position) {
    if tag.placeholder.is_some_and(|id| doc.bookmark(id).is_some()) {
        return;
    }
    tracing::trace!("placeholder for '{}' at {}", tag.name(), at);
    tag.placeholder = Some(doc.add_bookmark(at, Widget::Placeholder, false));
}

fn clear_placeholder(doc: &mut Document, tag: &mut TagState) {
    if let Some(id) = tag.placeholder.take() {
        doc.remove_bookmark(id);
    }
}

fn install_caret(doc: &mut Document, tag: &mut TagState, at: Position) {
    if tag.caret.is_some_and(|id| doc.bookmark(id).is_some()) {
        return;
    }
    tracing::trace!("insert caret for '{}' at {}", tag.name(), at);
    tag.caret = Some(doc.add_bookmark(at, Widget::InsertCaret, true));
}

fn clear_caret(doc: &mut Document, tag: &mut TagState) {
    if let Some(id) = tag.caret.take() {
        doc.remove_bookmark(id);
    }
}
