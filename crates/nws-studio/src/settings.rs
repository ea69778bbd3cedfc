//! Studio settings - persisted user preferences.
//!
//! Loaded from disk at startup and saved when changed. Unreadable or
//! unparsable files fall back to defaults with a warning; losing a
//! preferences file must never block an editing session.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use nws_ai::AiSettings;
use nws_persistence::AutosaveConfig;

use crate::error::{Result, StudioError};

/// Application settings.
///
/// Serialized to TOML and stored in the user's config directory.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StudioSettings {
    /// AI provider selection and credentials.
    pub ai: AiSettings,

    /// Autosave behavior.
    pub autosave: AutosaveConfig,
}

impl StudioSettings {
    /// Load settings from the default path.
    pub fn load() -> Self {
        Self::load_from(&Self::config_path())
    }

    /// Load settings from a specific path, falling back to defaults.
    pub fn load_from(path: &PathBuf) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(settings) => settings,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "unparsable settings, using defaults");
                    Self::default()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Self::default(),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "unreadable settings, using defaults");
                Self::default()
            }
        }
    }

    /// Save settings to the default path.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    /// Save settings to a specific path.
    pub fn save_to(&self, path: &PathBuf) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| StudioError::Settings {
                reason: format!("could not create config directory: {e}"),
            })?;
        }
        let content = toml::to_string_pretty(self).map_err(|e| StudioError::Settings {
            reason: format!("could not serialize settings: {e}"),
        })?;
        std::fs::write(path, content).map_err(|e| StudioError::Settings {
            reason: format!("could not write settings: {e}"),
        })
    }

    /// The default config file path.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("com", "NovelWritingStudio", "NWS")
            .map(|dirs| dirs.config_dir().join("settings.toml"))
            .unwrap_or_else(|| PathBuf::from("settings.toml"))
    }
}
