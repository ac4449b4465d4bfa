//! Bridge configuration.
//!
//! ## Learning: Serde Defaults
//!
//! `#[serde(default)]` fills missing fields from `Default::default()`, so a
//! config file only needs the keys it changes and an absent file is the
//! same as an empty one.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use verdoc_widget::{GutterConfig, Viewport};

/// Main configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Widget appearance
    pub render: RenderConfig,

    /// State persistence
    pub storage: StorageConfig,
}

impl Config {
    /// Loads config from the default location, falling back to defaults.
    pub fn load() -> Self {
        Self::load_from_default_path().unwrap_or_else(|err| {
            tracing::warn!("Using default config: {}", err);
            Self::default()
        })
    }

    /// Loads config from a file.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    fn load_from_default_path() -> Result<Self, ConfigError> {
        let path = Self::default_path()?;
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Returns the default config file path.
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("verdoc").join("config.toml"))
    }

    /// Writes the config to `path`.
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

/// Widget appearance settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Widget theme
    pub theme: String,

    /// Column of the print margin
    pub print_margin_column: usize,

    /// Width of a character cell in pixels
    pub character_width: f32,

    /// Rows rendered in the gutter
    pub visible_rows: usize,
}

impl RenderConfig {
    pub fn gutter_config(&self) -> GutterConfig {
        GutterConfig {
            character_width: self.character_width,
        }
    }

    pub fn viewport(&self) -> Viewport {
        Viewport::new(0, self.visible_rows)
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            theme: "ace/theme/ambiance".to_string(),
            print_margin_column: 120,
            character_width: 7.0,
            visible_rows: 1000,
        }
    }
}

/// State persistence settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Key the application state is stored under
    pub key: String,

    /// Storage file (platform data dir when unset)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            key: "vd_persist".to_string(),
            path: None,
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config directory not found")]
    NoConfigDir,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
}
