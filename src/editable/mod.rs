//! Host text-editing layer.
//!
//! A [`Document`] is the editor the template engine lives in: a rope buffer
//! with a single cursor and selection, position-tracking range marks and
//! bookmarks, read-only enforcement, per-line classes and undo history.
//!
//! # Architecture
//!
//! - [`TextBuffer`] / [`TextBufferMut`]: buffer traits, implemented by [`RopeBuffer`]
//! - [`MarkSet`]: marks and bookmarks keyed by [`MarkId`] / [`BookmarkId`]
//! - [`PendingChange`] / [`BeforeChange`]: edits can be rewritten or cancelled before they land
//! - [`EditHistory`]: undo/redo of whole user edits
//! - [`TextEditMsg`]: message type for all editing operations
//!
//! # Example
//!
//! ```
//! use blanks::editable::{Document, MarkOptions, Position};
//!
//! let mut doc = Document::new("x = ;");
//! doc.add_mark(Position::new(0, 0), Position::new(0, 4), MarkOptions::read_only_base(true, false));
//! doc.set_cursor(Position::new(0, 1));
//! assert!(!doc.insert_char('!'));
//!
//! doc.set_cursor(Position::new(0, 4));
//! assert!(doc.insert_text("42"));
//! assert_eq!(doc.text(), "x = 42;");
//! ```

mod buffer;
mod change;
mod cursor;
mod history;
mod marks;
mod messages;
mod selection;
mod state;

pub use buffer::{RopeBuffer, TextBuffer, TextBufferMut};
pub use change::{split_lines, BeforeChange, ChangeOrigin, PendingChange};
pub use cursor::{Cursor, Position};
pub use history::{EditHistory, EditOperation, TextChange};
pub use marks::{
    map_pos, Assoc, Bookmark, BookmarkId, MarkClass, MarkId, MarkOptions, MarkSet, TextMark,
    Widget, CARET_GLYPH, PLACEHOLDER_GLYPH,
};
pub use messages::{MoveTarget, TextEditMsg};
pub use selection::Selection;
pub use state::{CaretStyle, Document, DEFAULT_CHAR_WIDTH};
