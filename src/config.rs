//! Editor configuration persistence
//!
//! Stores user preferences in `~/.config/quill/config.yaml`. Every field is
//! optional in the file; anything missing or invalid falls back to defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::model::format::{FontSize, DEFAULT_FONT_SIZE};
use crate::theme::ThemeId;

/// Editor configuration that persists across sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Family used for unformatted text; the first discovered family if unset
    pub font_family: Option<String>,
    /// Point size for unformatted text, clamped to the supported range
    pub font_size: u32,
    pub window_width: u32,
    pub window_height: u32,
    /// How long status bar confirmations stay visible
    pub status_message_ms: u64,
    pub theme: ThemeId,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            font_family: None,
            font_size: DEFAULT_FONT_SIZE,
            window_width: 800,
            window_height: 600,
            status_message_ms: 3000,
            theme: ThemeId::default(),
        }
    }
}

impl EditorConfig {
    /// Load config from disk; a missing file is created with the defaults
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };

        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, writing defaults",
                path.display()
            );
            let config = Self::default();
            if let Err(e) = config.save_to(&path) {
                tracing::warn!("{}", e);
            }
            return config;
        }

        Self::load_from(&path)
    }

    /// Load from a specific file, falling back to defaults on any error
    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match Self::parse(&content) {
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

    pub fn parse(content: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(content)
    }

    /// Write the config, creating its directory if needed
    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }

        let content = serde_yaml::to_string(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;

        std::fs::write(path, content)
            .map_err(|e| format!("Failed to write config to {}: {}", path.display(), e))?;

        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Default point size, clamped into 8..=29
    pub fn font_size(&self) -> FontSize {
        FontSize::clamped(self.font_size)
    }

    pub fn status_message_duration(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.status_message_ms)
    }
}
