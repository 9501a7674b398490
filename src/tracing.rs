//! Logging setup and session state diffs
//!
//! Configure the console via RUST_LOG:
//! - `RUST_LOG=debug` - all debug logs
//! - `RUST_LOG=session=debug` - cursor and tag state changes per message
//! - `RUST_LOG=blanks::template=trace` - module-level filtering
//!
//! Logs are also written to `~/.config/blanks/logs/blanks.log` with daily
//! rotation, at debug level.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::editable::Position;
use crate::template::Session;

/// Install the console and file layers
pub fn init() {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .with_filter(console_filter);

    let file_layer = match crate::config_paths::ensure_logs_dir() {
        Ok(logs_dir) => {
            let file_appender = tracing_appender::rolling::daily(logs_dir, "blanks.log");
            Some(
                fmt::layer()
                    .with_writer(file_appender)
                    .with_ansi(false)
                    .with_target(true)
                    .with_line_number(true)
                    .with_filter(EnvFilter::new("debug")),
            )
        }
        Err(e) => {
            eprintln!("Warning: Could not initialize file logging: {}", e);
            None
        }
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();
}

/// Cursor, selection and tag state at one point in time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub cursor: Position,
    pub selection_empty: bool,
    pub tags: Vec<TagInfo>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagInfo {
    pub name: String,
    pub content_len: usize,
    pub cursor_in: bool,
}

impl SessionSnapshot {
    pub fn capture(session: &Session) -> Self {
        Self {
            cursor: session.cursor(),
            selection_empty: !session.document().has_selection(),
            tags: session
                .tags()
                .into_iter()
                .map(|tag| TagInfo {
                    name: tag.name().to_string(),
                    content_len: tag.content().chars().count(),
                    cursor_in: tag.cursor_in(),
                })
                .collect(),
        }
    }

    /// Describe what changed between two snapshots
    pub fn diff(&self, other: &SessionSnapshot) -> Option<String> {
        let mut changes = Vec::new();

        if self.cursor != other.cursor {
            changes.push(format!("cursor {} → {}", self.cursor, other.cursor));
        }
        if self.selection_empty != other.selection_empty {
            let status = if other.selection_empty {
                "cleared"
            } else {
                "active"
            };
            changes.push(format!("selection {}", status));
        }

        for (before, after) in self.tags.iter().zip(&other.tags) {
            if before.content_len != after.content_len {
                changes.push(format!(
                    "'{}' {} → {} chars",
                    after.name, before.content_len, after.content_len
                ));
            }
            if before.cursor_in != after.cursor_in {
                let verb = if after.cursor_in { "entered" } else { "left" };
                changes.push(format!("'{}' {}", after.name, verb));
            }
        }

        if changes.is_empty() {
            None
        } else {
            Some(changes.join("; "))
        }
    }
}
