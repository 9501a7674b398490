//! blanks - fill-in-the-blanks code templates
//!
//! A template is loaded into a [`Session`], which turns delimited tags into
//! editable regions surrounded by read-only text. See [`template`] for the
//! engine and [`editable`] for the document it runs on.

pub mod cli;
pub mod config;
pub mod config_paths;
pub mod editable;
pub mod keymap;
pub mod template;
pub mod tracing;
pub mod util;

pub use config::EngineConfig;
pub use template::{ConfigurationError, Notification, Session, TemplateSettings};
