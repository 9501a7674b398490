//! Commands a keybinding can trigger
//!
//! Tag navigation is handled by the session; everything else maps onto a
//! [`TextEditMsg`] for the document.

use std::fmt;
use std::str::FromStr;

use crate::editable::{MoveTarget, TextEditMsg};

macro_rules! commands {
    ($($(#[$meta:meta])* $variant:ident),* $(,)?) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum Command {
            $($(#[$meta])* $variant,)*
        }

        impl Command {
            pub const ALL: &'static [Command] = &[$(Command::$variant,)*];

            /// Name used in keymap files
            pub fn name(self) -> &'static str {
                match self {
                    $(Command::$variant => stringify!($variant),)*
                }
            }
        }

        impl FromStr for Command {
            type Err = ();

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $(stringify!($variant) => Ok(Command::$variant),)*
                    _ => Err(()),
                }
            }
        }
    };
}

commands! {
    NextTag,
    PreviousTag,

    MoveCursorUp,
    MoveCursorDown,
    MoveCursorLeft,
    MoveCursorRight,
    MoveCursorLineStart,
    MoveCursorLineEnd,
    MoveCursorWordLeft,
    MoveCursorWordRight,
    MoveCursorDocumentStart,
    MoveCursorDocumentEnd,

    MoveCursorUpWithSelection,
    MoveCursorDownWithSelection,
    MoveCursorLeftWithSelection,
    MoveCursorRightWithSelection,
    MoveCursorLineStartWithSelection,
    MoveCursorLineEndWithSelection,
    MoveCursorWordLeftWithSelection,
    MoveCursorWordRightWithSelection,
    MoveCursorDocumentStartWithSelection,
    MoveCursorDocumentEndWithSelection,

    SelectAll,
    ClearSelection,

    InsertNewline,
    DeleteBackward,
    DeleteForward,
    DeleteWordBackward,
    DeleteWordForward,

    Undo,
    Redo,

    /// Removes a default binding when used in a user keymap
    Unbound,
}

impl Command {
    /// The document message this command sends, `None` for tag navigation
    /// and `Unbound`
    pub fn to_msg(self) -> Option<TextEditMsg> {
        use MoveTarget as T;
        use TextEditMsg::{Move, MoveWithSelection};

        let msg = match self {
            Command::NextTag | Command::PreviousTag | Command::Unbound => return None,

            Command::MoveCursorUp => Move(T::Up),
            Command::MoveCursorDown => Move(T::Down),
            Command::MoveCursorLeft => Move(T::Left),
            Command::MoveCursorRight => Move(T::Right),
            Command::MoveCursorLineStart => Move(T::LineStart),
            Command::MoveCursorLineEnd => Move(T::LineEnd),
            Command::MoveCursorWordLeft => Move(T::WordLeft),
            Command::MoveCursorWordRight => Move(T::WordRight),
            Command::MoveCursorDocumentStart => Move(T::DocumentStart),
            Command::MoveCursorDocumentEnd => Move(T::DocumentEnd),

            Command::MoveCursorUpWithSelection => MoveWithSelection(T::Up),
            Command::MoveCursorDownWithSelection => MoveWithSelection(T::Down),
            Command::MoveCursorLeftWithSelection => MoveWithSelection(T::Left),
            Command::MoveCursorRightWithSelection => MoveWithSelection(T::Right),
            Command::MoveCursorLineStartWithSelection => MoveWithSelection(T::LineStart),
            Command::MoveCursorLineEndWithSelection => MoveWithSelection(T::LineEnd),
            Command::MoveCursorWordLeftWithSelection => MoveWithSelection(T::WordLeft),
            Command::MoveCursorWordRightWithSelection => MoveWithSelection(T::WordRight),
            Command::MoveCursorDocumentStartWithSelection => MoveWithSelection(T::DocumentStart),
            Command::MoveCursorDocumentEndWithSelection => MoveWithSelection(T::DocumentEnd),

            Command::SelectAll => TextEditMsg::SelectAll,
            Command::ClearSelection => TextEditMsg::CollapseSelection,

            Command::InsertNewline => TextEditMsg::InsertNewline,
            Command::DeleteBackward => TextEditMsg::DeleteBackward,
            Command::DeleteForward => TextEditMsg::DeleteForward,
            Command::DeleteWordBackward => TextEditMsg::DeleteWordBackward,
            Command::DeleteWordForward => TextEditMsg::DeleteWordForward,

            Command::Undo => TextEditMsg::Undo,
            Command::Redo => TextEditMsg::Redo,
        };
        Some(msg)
    }

    /// Human-readable name for listings
    pub fn display_name(self) -> &'static str {
        match self {
            Command::NextTag => "Next Tag",
            Command::PreviousTag => "Previous Tag",
            Command::SelectAll => "Select All",
            Command::ClearSelection => "Clear Selection",
            Command::InsertNewline => "Insert Newline",
            Command::DeleteBackward => "Delete Backward",
            Command::DeleteForward => "Delete Forward",
            Command::DeleteWordBackward => "Delete Word Backward",
            Command::DeleteWordForward => "Delete Word Forward",
            Command::Undo => "Undo",
            Command::Redo => "Redo",
            Command::Unbound => "Unbound",
            _ => "Move Cursor",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
