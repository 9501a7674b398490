//! Keymap struct for storing and looking up keybindings

use std::collections::HashMap;

use super::binding::Keybinding;
use super::command::Command;
use super::types::Keystroke;

/// Result of handling a keystroke
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    Execute(Command),
    /// Keystroke is part of a chord, await more input
    AwaitMore,
    NoMatch,
}

#[derive(Debug, Clone, Default)]
pub struct Keymap {
    bindings: Vec<Keybinding>,
    /// Single-keystroke bindings, by keystroke. Later bindings win.
    single_lookup: HashMap<Keystroke, usize>,
    /// First keystroke of every chord, mapped to the chord bindings it starts
    chord_prefixes: HashMap<Keystroke, Vec<usize>>,
    pending_chord: Vec<Keystroke>,
}

impl Keymap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bindings(bindings: Vec<Keybinding>) -> Self {
        let mut keymap = Self::new();
        for binding in bindings {
            keymap.add_binding(binding);
        }
        keymap
    }

    pub fn add_binding(&mut self, binding: Keybinding) {
        let Some(&first_stroke) = binding.keystrokes.first() else {
            return;
        };
        let idx = self.bindings.len();

        if binding.is_chord() {
            self.chord_prefixes
                .entry(first_stroke)
                .or_default()
                .push(idx);
        } else {
            self.single_lookup.insert(first_stroke, idx);
        }

        self.bindings.push(binding);
    }

    /// Drop any half-typed chord
    pub fn reset(&mut self) {
        self.pending_chord.clear();
    }

    pub fn handle_keystroke(&mut self, keystroke: Keystroke) -> KeyAction {
        if !self.pending_chord.is_empty() {
            self.pending_chord.push(keystroke);
            return self.try_complete_chord();
        }

        if let Some(command) = self.lookup(&keystroke) {
            return KeyAction::Execute(command);
        }

        if self.chord_prefixes.contains_key(&keystroke) {
            self.pending_chord.push(keystroke);
            return KeyAction::AwaitMore;
        }

        KeyAction::NoMatch
    }

    fn try_complete_chord(&mut self) -> KeyAction {
        let first = self.pending_chord[0];
        let Some(indices) = self.chord_prefixes.get(&first) else {
            self.reset();
            return KeyAction::NoMatch;
        };

        let exact = indices
            .iter()
            .map(|&idx| &self.bindings[idx])
            .find(|b| b.keystrokes == self.pending_chord)
            .map(|b| b.command);
        if let Some(command) = exact {
            self.reset();
            return KeyAction::Execute(command);
        }

        let could_match = indices.iter().any(|&idx| {
            let binding = &self.bindings[idx];
            binding.keystrokes.len() > self.pending_chord.len()
                && binding.keystrokes[..self.pending_chord.len()] == self.pending_chord
        });

        if could_match {
            KeyAction::AwaitMore
        } else {
            self.reset();
            KeyAction::NoMatch
        }
    }

    /// Single-keystroke lookup without chord state
    pub fn lookup(&self, keystroke: &Keystroke) -> Option<Command> {
        self.single_lookup
            .get(keystroke)
            .map(|&idx| self.bindings[idx].command)
    }

    pub fn bindings(&self) -> &[Keybinding] {
        &self.bindings
    }

    pub fn binding_for(&self, command: Command) -> Option<&Keybinding> {
        self.bindings.iter().find(|b| b.command == command)
    }

    pub fn display_for(&self, command: Command) -> Option<String> {
        self.binding_for(command).map(|b| b.display_string())
    }

    pub fn has_pending_chord(&self) -> bool {
        !self.pending_chord.is_empty()
    }
}
