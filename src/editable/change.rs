//! Pending changes and the hook that may rewrite them before they land.

use std::fmt;

use super::cursor::Position;
use super::state::Document;

/// Where an edit came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeOrigin {
    /// Typed text, including newlines
    Input,
    Paste,
    /// Backspace, delete and their word variants
    Delete,
    Undo,
    Redo,
    /// Whole-buffer replacement
    SetValue,
    /// Programmatic edits made by the engine itself
    Internal,
}

impl ChangeOrigin {
    /// History replays and programmatic edits are applied as-is, read-only marks included
    pub fn is_trusted(self) -> bool {
        matches!(
            self,
            ChangeOrigin::Undo | ChangeOrigin::Redo | ChangeOrigin::SetValue | ChangeOrigin::Internal
        )
    }
}

/// An edit that has been requested but not yet applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingChange {
    pub from: Position,
    pub to: Position,
    /// Inserted text split on line breaks; always at least one entry
    pub text: Vec<String>,
    pub origin: ChangeOrigin,
    cancelled: bool,
}

impl PendingChange {
    pub fn new(from: Position, to: Position, text: &str, origin: ChangeOrigin) -> Self {
        Self {
            from,
            to,
            text: split_lines(text),
            origin,
            cancelled: false,
        }
    }

    /// Replace the range and text this change will apply
    pub fn update(&mut self, from: Position, to: Position, text: Vec<String>) {
        self.from = from;
        self.to = to;
        self.text = if text.is_empty() {
            vec![String::new()]
        } else {
            text
        };
    }

    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    pub fn inserted_text(&self) -> String {
        self.text.join("\n")
    }

    pub fn is_multiline(&self) -> bool {
        self.text.len() > 1
    }
}

/// Split text on `\n`, keeping a trailing empty line when the text ends in one.
pub fn split_lines(text: &str) -> Vec<String> {
    text.split('\n').map(str::to_string).collect()
}

/// Hook run on every change before it is applied.
///
/// Implementations may rewrite the change with [`PendingChange::update`] or drop
/// it with [`PendingChange::cancel`].
pub trait BeforeChange: fmt::Debug {
    fn before_change(&self, doc: &Document, change: &mut PendingChange);
}
