//! Configuration management.
//!
//! Settings live in `config.toml` under the user config directory
//! (`~/.config/audiomark/config.toml` on Linux). `AUDIOMARK_CONFIG` points
//! at a different file. Missing files and missing fields fall back to
//! defaults.

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::seek::FileSlot;

/// Environment variable overriding the config file location.
pub const CONFIG_ENV: &str = "AUDIOMARK_CONFIG";

/// Audio extensions a callout may link to.
pub const DEFAULT_AUDIO_EXTENSIONS: &[&str] = &["mp3", "wav", "ogg", "flac", "mp4", "m4a", "webm"];

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine the {0} directory")]
    NoDirectory(&'static str),

    #[error("Failed to access config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub player: PlayerConfig,
    pub storage: StorageConfig,
}

/// Playback and rendering settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Initial volume of the shared media handle (0.0 - 1.0)
    pub volume: f64,
    /// Distance of the skip forward/back commands in seconds
    pub seek_step_secs: f64,
    /// Audio file extensions a callout may link to
    pub allowed_extensions: Vec<String>,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            volume: 0.5,
            seek_step_secs: crate::coordinator::DEFAULT_SEEK_STEP,
            allowed_extensions: DEFAULT_AUDIO_EXTENSIONS
                .iter()
                .map(|ext| ext.to_string())
                .collect(),
        }
    }
}

impl PlayerConfig {
    /// Case-insensitive allow-list check.
    pub fn allows(&self, extension: &str) -> bool {
        self.allowed_extensions
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(extension))
    }
}

/// Where the cross-page seek slot lives.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Override for the seek slot file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seek_slot: Option<PathBuf>,
}

impl Config {
    /// Path of the config file.
    ///
    /// # Errors
    ///
    /// Fails if no config directory can be determined.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return Ok(PathBuf::from(path));
        }
        dirs::config_dir()
            .map(|dir| dir.join("audiomark").join("config.toml"))
            .ok_or(ConfigError::NoDirectory("config"))
    }

    /// Load from the default location, or defaults if the file is absent.
    ///
    /// # Errors
    ///
    /// Fails on unreadable or invalid files.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load from `path`, or defaults if the file is absent.
    ///
    /// # Errors
    ///
    /// Fails on unreadable or invalid files.
    pub fn load_from(path: &std::path::Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Save to the default location.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be written.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Location of the cross-page seek slot file.
    ///
    /// # Errors
    ///
    /// Fails if no override is set and no data directory can be determined.
    pub fn seek_slot_path(&self) -> Result<PathBuf, ConfigError> {
        if let Some(path) = &self.storage.seek_slot {
            return Ok(path.clone());
        }
        dirs::data_local_dir()
            .map(|dir| dir.join("audiomark").join(FileSlot::FILE_NAME))
            .ok_or(ConfigError::NoDirectory("data"))
    }
}
