//! Configurable keyboard mapping
//!
//! ```text
//! "alt+tab" → Keystroke → Keymap::handle_keystroke() → Command → Session
//! ```
//!
//! Bindings come from the embedded `keymap.yaml`, then a project-local
//! `keymap.yaml`, then the user's keymap file.
//!
//! ```
//! use blanks::keymap::{default_bindings, Command, KeyAction, Keymap};
//!
//! let mut keymap = Keymap::with_bindings(default_bindings());
//! let stroke = "alt+tab".parse().unwrap();
//! assert_eq!(keymap.handle_keystroke(stroke), KeyAction::Execute(Command::NextTag));
//! ```

mod binding;
mod command;
mod config;
mod defaults;
#[allow(clippy::module_inception)]
mod keymap;
mod types;

pub use binding::Keybinding;
pub use command::Command;
pub use config::{load_keymap_file, parse_key_sequence, parse_keymap_yaml, KeymapError};
pub use defaults::{
    default_bindings, embedded_bindings, get_default_keymap_yaml, load_default_keymap,
    merge_bindings,
};
pub use keymap::{KeyAction, Keymap};
pub use types::{KeyCode, Keystroke, Modifiers};
