//! Engine configuration file
//!
//! Read from `~/.config/blanks/config.yaml`:
//!
//! ```yaml
//! delimiter: '@[^@]*@([\w-]+)@[^@]*@'
//! char_width: 8.0
//! tags:
//!   body:
//!     multiline: true
//! ```

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::editable::DEFAULT_CHAR_WIDTH;
use crate::template::{SettingsError, TagSettings, TemplateSettings, DEFAULT_DELIMITER};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Tag delimiter regex, the first capture group is the tag name
    #[serde(default = "default_delimiter")]
    pub delimiter: String,

    /// Default character width in pixels, sizes the insertion caret
    #[serde(default = "default_char_width")]
    pub char_width: f32,

    #[serde(default)]
    pub tags: HashMap<String, TagSettings>,
}

fn default_delimiter() -> String {
    DEFAULT_DELIMITER.to_string()
}

fn default_char_width() -> f32 {
    DEFAULT_CHAR_WIDTH
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            delimiter: default_delimiter(),
            char_width: default_char_width(),
            tags: HashMap::new(),
        }
    }
}

impl EngineConfig {
    /// Load the user config, or defaults if it is missing or broken
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match serde_yaml::from_str(&content) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to parse config at {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Merge a tag file (`name: {multiline}` pairs) over the configured tags
    pub fn merge_tags(&mut self, tags: HashMap<String, TagSettings>) {
        self.tags.extend(tags);
    }

    pub fn into_settings(self) -> Result<TemplateSettings, SettingsError> {
        let mut settings = TemplateSettings::default()
            .with_delimiter(&self.delimiter)?
            .with_char_width(self.char_width)?;
        settings.tags = self.tags;
        Ok(settings)
    }
}
