//! Engine settings: delimiter grammar, per-tag policy and caret metrics.

use std::collections::HashMap;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::error::SettingsError;
use crate::editable::DEFAULT_CHAR_WIDTH;

/// `@<anything>@<name>@<anything>@`, the first capture group is the tag name.
pub const DEFAULT_DELIMITER: &str = r"@[^@]*@([\w-]+)@[^@]*@";

static DEFAULT_REGEX: OnceLock<Regex> = OnceLock::new();

/// A compiled delimiter pattern with at least one capture group.
#[derive(Debug, Clone)]
pub struct Delimiter {
    regex: Regex,
}

impl Delimiter {
    pub fn new(pattern: &str) -> Result<Self, SettingsError> {
        let regex = Regex::new(pattern)?;
        if regex.captures_len() < 2 {
            return Err(SettingsError::MissingCapture(pattern.to_string()));
        }
        Ok(Self { regex })
    }

    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }
}

impl Default for Delimiter {
    fn default() -> Self {
        let regex = DEFAULT_REGEX
            .get_or_init(|| Regex::new(DEFAULT_DELIMITER).expect("default delimiter compiles"));
        Self {
            regex: regex.clone(),
        }
    }
}

/// Per-tag policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagSettings {
    /// Whether the tag's content may span lines
    #[serde(default)]
    pub multiline: bool,
}

/// Everything a [`Session`](super::Session) needs to load templates.
#[derive(Debug, Clone)]
pub struct TemplateSettings {
    pub delimiter: Delimiter,
    pub tags: HashMap<String, TagSettings>,
    /// Default character width, in pixels, used for the insertion caret
    pub char_width: f32,
}

impl Default for TemplateSettings {
    fn default() -> Self {
        Self {
            delimiter: Delimiter::default(),
            tags: HashMap::new(),
            char_width: DEFAULT_CHAR_WIDTH,
        }
    }
}

impl TemplateSettings {
    pub fn with_delimiter(mut self, pattern: &str) -> Result<Self, SettingsError> {
        self.delimiter = Delimiter::new(pattern)?;
        Ok(self)
    }

    pub fn with_tag(mut self, name: &str, multiline: bool) -> Self {
        self.tags.insert(name.to_string(), TagSettings { multiline });
        self
    }

    pub fn with_char_width(mut self, width: f32) -> Result<Self, SettingsError> {
        if !(width.is_finite() && width > 0.0) {
            return Err(SettingsError::InvalidCharWidth(width));
        }
        self.char_width = width;
        Ok(self)
    }

    /// Tags without settings are single-line
    pub fn is_multiline(&self, name: &str) -> bool {
        self.tags.get(name).is_some_and(|t| t.multiline)
    }
}
