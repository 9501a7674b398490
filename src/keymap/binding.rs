//! A mapping from one or two keystrokes to a command

use super::command::Command;
use super::types::Keystroke;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keybinding {
    /// Usually one keystroke, two for a chord
    pub keystrokes: Vec<Keystroke>,
    pub command: Command,
}

impl Keybinding {
    pub fn new(keystroke: Keystroke, command: Command) -> Self {
        Self {
            keystrokes: vec![keystroke],
            command,
        }
    }

    pub fn chord(keystrokes: Vec<Keystroke>, command: Command) -> Self {
        Self {
            keystrokes,
            command,
        }
    }

    pub fn matches_single(&self, keystroke: &Keystroke) -> bool {
        self.keystrokes.len() == 1 && self.keystrokes[0] == *keystroke
    }

    pub fn starts_with(&self, keystroke: &Keystroke) -> bool {
        self.keystrokes.first() == Some(keystroke)
    }

    pub fn is_chord(&self) -> bool {
        self.keystrokes.len() > 1
    }

    /// Keystrokes in keymap-file notation, space separated
    pub fn display_string(&self) -> String {
        self.keystrokes
            .iter()
            .map(|k| k.to_string())
            .collect::<Vec<_>>()
            .join(" ")
    }
}
