//! Template-driven editable regions.
//!
//! A template is source text with delimited tags such as `@T@cond@T@`.
//! Loading it strips the delimiters, makes everything between tags read-only
//! and leaves each tag as an editable region that grows with what is typed.
//!
//! # Architecture
//!
//! - [`parse`]: delimiters to stripped text, tag anchors and base segments
//! - [`Registry`]: per-tag state kept in sync with the document's marks
//! - [`MutationGuard`]: keeps single-line tags single-line
//! - `placeholder` / `style`: widgets and line classes reacting to tag events
//! - `navigation`: cyclic jumps between tags
//! - [`Session`]: owns the document and wires everything together
//!
//! ```
//! use blanks::editable::{Position, TextEditMsg};
//! use blanks::template::{Session, TemplateSettings};
//!
//! let mut session = Session::new(TemplateSettings::default());
//! session.load("x = @T@value@T@;").unwrap();
//! session.set_cursor(Position::new(0, 4));
//! session.handle(TextEditMsg::InsertText("42".into()));
//!
//! assert_eq!(session.text(), "x = 42;");
//! assert_eq!(session.tag("value").unwrap().content(), "42");
//! ```

mod error;
mod events;
mod guard;
mod navigation;
mod parser;
mod placeholder;
mod registry;
mod session;
mod settings;
mod style;

pub use error::{ConfigurationError, SettingsError};
pub use events::{Listener, Notification, Notifier};
pub use guard::MutationGuard;
pub use navigation::Direction;
pub use parser::{parse, BaseSegment, ParsedTemplate, TagDescriptor};
pub use registry::{Registry, TagEvent, TagEventKind, TagState};
pub use session::Session;
pub use settings::{Delimiter, TagSettings, TemplateSettings, DEFAULT_DELIMITER};
pub use style::WRAP_CLASS;
