//! Default keybindings
//!
//! The shipped keymap lives in `keymap.yaml` at the crate root and is
//! embedded at compile time; [`default_bindings`] is the hardcoded fallback.

use std::path::Path;

use super::binding::Keybinding;
use super::command::Command;
use super::config::{load_keymap_file, parse_keymap_yaml};
use super::types::{KeyCode, Keystroke, Modifiers};

const DEFAULT_KEYMAP_YAML: &str = include_str!("../../keymap.yaml");

pub fn get_default_keymap_yaml() -> &'static str {
    DEFAULT_KEYMAP_YAML
}

/// Embedded defaults only, no files consulted
pub fn embedded_bindings() -> Vec<Keybinding> {
    match parse_keymap_yaml(DEFAULT_KEYMAP_YAML) {
        Ok(bindings) => bindings,
        Err(e) => {
            tracing::warn!(
                "Failed to parse embedded keymap: {}, using hardcoded defaults",
                e
            );
            default_bindings()
        }
    }
}

/// Load and merge keymaps, each layer overriding the previous one:
/// 1. Embedded default keymap
/// 2. `keymap.yaml` in the current directory
/// 3. `~/.config/blanks/keymap.yaml`
pub fn load_default_keymap() -> Vec<Keybinding> {
    let mut bindings = embedded_bindings();
    tracing::debug!("Loaded embedded default keymap ({} bindings)", bindings.len());

    let local = Path::new("keymap.yaml");
    if local.exists() {
        match load_keymap_file(local) {
            Ok(local_bindings) => {
                tracing::info!(
                    "Merging project keymap.yaml ({} bindings)",
                    local_bindings.len()
                );
                bindings = merge_bindings(bindings, local_bindings);
            }
            Err(e) => tracing::warn!("Failed to load project keymap.yaml: {}", e),
        }
    }

    if let Some(user_path) = crate::config_paths::keymap_file() {
        if user_path.exists() {
            match load_keymap_file(&user_path) {
                Ok(user_bindings) => {
                    tracing::info!(
                        "Merging user keymap from {} ({} bindings)",
                        user_path.display(),
                        user_bindings.len()
                    );
                    bindings = merge_bindings(bindings, user_bindings);
                }
                Err(e) => {
                    tracing::warn!("Failed to load user keymap from {}: {}", user_path.display(), e);
                }
            }
        }
    }

    bindings
}

/// Layer `user` over `base`: same keystrokes replace, `Unbound` removes,
/// anything else is added.
pub fn merge_bindings(base: Vec<Keybinding>, user: Vec<Keybinding>) -> Vec<Keybinding> {
    let mut result = base;

    for user_binding in user {
        if user_binding.command == Command::Unbound {
            result.retain(|b| b.keystrokes != user_binding.keystrokes);
            continue;
        }

        match result
            .iter()
            .position(|b| b.keystrokes == user_binding.keystrokes)
        {
            Some(idx) => result[idx] = user_binding,
            None => result.push(user_binding),
        }
    }

    result
}

/// Hardcoded defaults, mirroring `keymap.yaml`
pub fn default_bindings() -> Vec<Keybinding> {
    let cmd = Modifiers::cmd();
    let cmd_shift = cmd | Modifiers::SHIFT;
    let shift = Modifiers::SHIFT;
    let alt = Modifiers::ALT;
    let alt_shift = Modifiers::ALT | Modifiers::SHIFT;
    let ctrl = Modifiers::CTRL;
    let ctrl_shift = Modifiers::CTRL | Modifiers::SHIFT;
    let none = Modifiers::NONE;

    vec![
        // Tags
        bind(KeyCode::Tab, alt, Command::NextTag),
        bind(KeyCode::Tab, shift, Command::PreviousTag),
        // History
        bind(KeyCode::Char('z'), cmd, Command::Undo),
        bind(KeyCode::Char('z'), cmd_shift, Command::Redo),
        // Selection
        bind(KeyCode::Char('a'), cmd, Command::SelectAll),
        bind(KeyCode::Escape, none, Command::ClearSelection),
        // Movement
        bind(KeyCode::Up, none, Command::MoveCursorUp),
        bind(KeyCode::Down, none, Command::MoveCursorDown),
        bind(KeyCode::Left, none, Command::MoveCursorLeft),
        bind(KeyCode::Right, none, Command::MoveCursorRight),
        bind(KeyCode::Home, none, Command::MoveCursorLineStart),
        bind(KeyCode::End, none, Command::MoveCursorLineEnd),
        bind(KeyCode::Left, alt, Command::MoveCursorWordLeft),
        bind(KeyCode::Right, alt, Command::MoveCursorWordRight),
        bind(KeyCode::Home, ctrl, Command::MoveCursorDocumentStart),
        bind(KeyCode::End, ctrl, Command::MoveCursorDocumentEnd),
        bind(KeyCode::Up, shift, Command::MoveCursorUpWithSelection),
        bind(KeyCode::Down, shift, Command::MoveCursorDownWithSelection),
        bind(KeyCode::Left, shift, Command::MoveCursorLeftWithSelection),
        bind(KeyCode::Right, shift, Command::MoveCursorRightWithSelection),
        bind(KeyCode::Home, shift, Command::MoveCursorLineStartWithSelection),
        bind(KeyCode::End, shift, Command::MoveCursorLineEndWithSelection),
        bind(KeyCode::Left, alt_shift, Command::MoveCursorWordLeftWithSelection),
        bind(KeyCode::Right, alt_shift, Command::MoveCursorWordRightWithSelection),
        bind(KeyCode::Home, ctrl_shift, Command::MoveCursorDocumentStartWithSelection),
        bind(KeyCode::End, ctrl_shift, Command::MoveCursorDocumentEndWithSelection),
        // Editing
        bind(KeyCode::Enter, none, Command::InsertNewline),
        bind(KeyCode::Backspace, none, Command::DeleteBackward),
        bind(KeyCode::Delete, none, Command::DeleteForward),
        bind(KeyCode::Backspace, ctrl, Command::DeleteWordBackward),
        bind(KeyCode::Delete, ctrl, Command::DeleteWordForward),
    ]
}

fn bind(key: KeyCode, mods: Modifiers, command: Command) -> Keybinding {
    Keybinding::new(Keystroke::new(key, mods), command)
}
