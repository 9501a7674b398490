//! Notifications published by a [`Session`](super::Session).

use std::fmt;

use serde::Serialize;

use super::error::ConfigurationError;

/// Something an embedder may want to react to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Notification {
    TagContentChanged {
        name: String,
        content: String,
        multiline: bool,
    },
    TagEntered {
        name: String,
    },
    TagLeft {
        name: String,
    },
    ConfigurationError {
        error: ConfigurationError,
    },
}

impl Notification {
    /// Name of the tag this notification is about, if any
    pub fn tag_name(&self) -> Option<&str> {
        match self {
            Notification::TagContentChanged { name, .. }
            | Notification::TagEntered { name }
            | Notification::TagLeft { name } => Some(name),
            Notification::ConfigurationError { error } => Some(error.tag_name()),
        }
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notification::TagContentChanged { name, content, .. } => {
                write!(f, "changed {}: {:?}", name, content)
            }
            Notification::TagEntered { name } => write!(f, "entered {}", name),
            Notification::TagLeft { name } => write!(f, "left {}", name),
            Notification::ConfigurationError { error } => write!(f, "error: {}", error),
        }
    }
}

pub type Listener = Box<dyn FnMut(&Notification)>;

/// Fans notifications out to listeners and keeps them queued until drained.
#[derive(Default)]
pub struct Notifier {
    listeners: Vec<Listener>,
    queue: Vec<Notification>,
}

impl fmt::Debug for Notifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Notifier")
            .field("listeners", &self.listeners.len())
            .field("queue", &self.queue)
            .finish()
    }
}

impl Notifier {
    pub fn subscribe(&mut self, listener: Listener) {
        self.listeners.push(listener);
    }

    pub fn emit(&mut self, notification: Notification) {
        tracing::debug!("notify: {}", notification);
        for listener in &mut self.listeners {
            listener(&notification);
        }
        self.queue.push(notification);
    }

    /// Drain queued notifications in emission order
    pub fn take(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.queue)
    }
}
