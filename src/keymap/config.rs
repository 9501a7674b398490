//! YAML keymap files
//!
//! ```yaml
//! bindings:
//!   - key: alt+tab
//!     command: NextTag
//!   - key: ctrl+k ctrl+n
//!     command: NextTag
//!   - key: cmd+shift+z
//!     command: Redo
//!     platform: macos
//! ```

use std::path::Path;

use serde::Deserialize;

use super::binding::Keybinding;
use super::command::Command;
use super::types::Keystroke;

#[derive(Debug, Deserialize)]
pub struct KeymapConfig {
    pub bindings: Vec<BindingConfig>,
}

#[derive(Debug, Deserialize)]
pub struct BindingConfig {
    /// One keystroke, or two separated by a space for a chord
    pub key: String,
    pub command: String,
    #[serde(default)]
    pub platform: Option<String>,
}

pub fn load_keymap_file(path: &Path) -> Result<Vec<Keybinding>, KeymapError> {
    let content = std::fs::read_to_string(path).map_err(|e| KeymapError::IoError(e.to_string()))?;
    parse_keymap_yaml(&content)
}

pub fn parse_keymap_yaml(yaml: &str) -> Result<Vec<Keybinding>, KeymapError> {
    let config: KeymapConfig =
        serde_yaml::from_str(yaml).map_err(|e| KeymapError::ParseError(e.to_string()))?;

    let current_platform = current_platform();
    let mut bindings = Vec::with_capacity(config.bindings.len());

    for entry in config.bindings {
        if entry
            .platform
            .as_deref()
            .is_some_and(|platform| platform != current_platform)
        {
            continue;
        }

        let keystrokes = parse_key_sequence(&entry.key)?;
        let command = entry
            .command
            .parse::<Command>()
            .map_err(|_| KeymapError::InvalidCommand(entry.command.clone()))?;
        bindings.push(Keybinding::chord(keystrokes, command));
    }

    Ok(bindings)
}

/// Parse `alt+tab` or a chord such as `ctrl+k ctrl+n`
pub fn parse_key_sequence(keys: &str) -> Result<Vec<Keystroke>, KeymapError> {
    let strokes = keys
        .split_whitespace()
        .map(str::parse::<Keystroke>)
        .collect::<Result<Vec<_>, _>>()?;
    match strokes.len() {
        1 | 2 => Ok(strokes),
        _ => Err(KeymapError::InvalidKey(keys.to_string())),
    }
}

fn current_platform() -> &'static str {
    if cfg!(target_os = "macos") {
        "macos"
    } else if cfg!(target_os = "windows") {
        "windows"
    } else {
        "linux"
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeymapError {
    IoError(String),
    ParseError(String),
    InvalidKey(String),
    InvalidCommand(String),
}

impl std::fmt::Display for KeymapError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KeymapError::IoError(e) => write!(f, "IO error: {}", e),
            KeymapError::ParseError(e) => write!(f, "Parse error: {}", e),
            KeymapError::InvalidKey(k) => write!(f, "Invalid key: {}", k),
            KeymapError::InvalidCommand(c) => write!(f, "Invalid command: {}", c),
        }
    }
}

impl std::error::Error for KeymapError {}
