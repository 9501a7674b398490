//! Errors raised while loading templates and settings.

use serde::Serialize;
use thiserror::Error;

use crate::editable::Position;

/// A template that violates the tag rules. Positions refer to the raw template.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ConfigurationError {
    #[error("tag '{name}' at {position} is defined more than once")]
    DuplicateTag { name: String, position: Position },
    #[error("tag '{name}' at {position} directly follows the previous tag")]
    AdjacentTags { name: String, position: Position },
}

impl ConfigurationError {
    pub fn tag_name(&self) -> &str {
        match self {
            ConfigurationError::DuplicateTag { name, .. }
            | ConfigurationError::AdjacentTags { name, .. } => name,
        }
    }
}

/// Invalid engine settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("invalid delimiter pattern: {0}")]
    InvalidDelimiter(#[from] regex::Error),
    #[error("delimiter pattern '{0}' has no capture group for the tag name")]
    MissingCapture(String),
    #[error("character width must be a positive number, got {0}")]
    InvalidCharWidth(f32),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_error_message() {
        let err = ConfigurationError::DuplicateTag {
            name: "cond".into(),
            position: Position::new(2, 4),
        };
        assert_eq!(err.to_string(), "tag 'cond' at 3:5 is defined more than once");
        assert_eq!(err.tag_name(), "cond");
    }

    #[test]
    fn test_configuration_error_serializes_with_kind() {
        let err = ConfigurationError::AdjacentTags {
            name: "b".into(),
            position: Position::new(0, 3),
        };
        let json = serde_json::to_string(&err).unwrap();
        assert!(json.contains("\"kind\":\"adjacent_tags\""));
        assert!(json.contains("\"name\":\"b\""));
    }
}
