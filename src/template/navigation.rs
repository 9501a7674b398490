//! Cyclic jumps between tags.

use crate::editable::{Document, Position};

use super::registry::Registry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

/// Move the cursor to the next or previous tag in document order, wrapping
/// around at either end. Returns the index of the tag jumped to.
///
/// From outside any tag, forward goes to the first tag and backward to the
/// last. The cursor lands before a placeholder, else at the end of the content.
pub fn jump(doc: &mut Document, registry: &Registry, direction: Direction) -> Option<usize> {
    let order = registry.ordered(doc);
    let count = order.len();
    if count == 0 {
        return None;
    }

    let current = registry
        .tag_at(doc, doc.cursor())
        .and_then(|idx| order.iter().position(|&i| i == idx));
    let next = match (current, direction) {
        (Some(i), Direction::Forward) => (i + 1) % count,
        (Some(i), Direction::Backward) => (i + count - 1) % count,
        (None, Direction::Forward) => 0,
        (None, Direction::Backward) => count - 1,
    };

    let index = order[next];
    let tag = &registry.tags()[index];
    let (from, to) = tag.bounds(doc)?;
    let target = if tag.has_placeholder() {
        before(to).filter(|&p| p >= from).unwrap_or(from)
    } else {
        to
    };

    tracing::debug!("jump {:?} to '{}' at {}", direction, tag.name(), target);
    doc.set_cursor(target);
    Some(index)
}

fn before(pos: Position) -> Option<Position> {
    pos.column
        .checked_sub(1)
        .map(|column| Position::new(pos.line, column))
}
