//! Configuration management for contactbox.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::path::PathBuf;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default data directory name.
const DATA_DIR_NAME: &str = "contactbox";

/// Default database file name.
const DATABASE_FILE_NAME: &str = "contactbox.db";

/// Default storage key holding the record list.
pub const DEFAULT_STORAGE_KEY: &str = "iglesia_contacto_data";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `CONTACTBOX_`, sections split on
///    `__`, e.g. `CONTACTBOX_STORAGE__QUOTA_BYTES`)
/// 2. TOML config file at `~/.config/contactbox/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Storage configuration.
    pub storage: StorageConfig,
    /// Submission form configuration.
    pub form: FormConfig,
    /// Display strings used by the list renderer.
    pub display: DisplayConfig,
}

/// Storage-related configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path to the database file.
    /// Defaults to `~/.local/share/contactbox/contactbox.db`
    pub database_path: Option<PathBuf>,
    /// Key of the slot holding the serialized record list.
    pub key: String,
    /// Maximum total size in bytes of all stored values.
    /// Set to 0 for unlimited.
    pub quota_bytes: usize,
}

/// Submission form configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    /// How long the confirmation stays visible, in seconds.
    pub confirmation_secs: u64,
    /// Text of the success confirmation.
    pub confirmation_message: String,
}

/// Placeholder strings for the rendered list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Shown in place of the list when there is nothing to show.
    pub empty_message: String,
    /// Shown when a record has no `interes`.
    pub unspecified_interest: String,
    /// Shown when a record has no `mensaje`.
    pub no_message: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: None, // Will be resolved to default at runtime
            key: DEFAULT_STORAGE_KEY.to_string(),
            quota_bytes: 5 * 1024 * 1024,
        }
    }
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            confirmation_secs: 8,
            confirmation_message:
                "¡Gracias! Tu información ha sido recibida y guardada localmente.".to_string(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            empty_message: "No hay datos disponibles.".to_string(),
            unspecified_interest: "No especificado".to_string(),
            no_message: "Sin mensaje".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration with an optional custom config path.
    ///
    /// Sources are merged in this order (later sources override earlier):
    /// 1. Default values
    /// 2. TOML config file (if exists)
    /// 3. Environment variables (prefixed with `CONTACTBOX_`)
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file).nested())
            .merge(Env::prefixed("CONTACTBOX_").split("__"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(DATA_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Get the default data directory path.
    #[must_use]
    pub fn default_data_dir() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from(".local/share"))
            .join(DATA_DIR_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        if self.storage.key.trim().is_empty() {
            return Err(Error::ConfigValidation {
                message: "storage key must not be empty".to_string(),
            });
        }

        if self.form.confirmation_secs == 0 {
            return Err(Error::ConfigValidation {
                message: "confirmation_secs must be greater than 0".to_string(),
            });
        }

        Ok(())
    }

    /// Get the database path, resolving defaults if not set.
    #[must_use]
    pub fn database_path(&self) -> PathBuf {
        self.storage
            .database_path
            .clone()
            .unwrap_or_else(|| Self::default_data_dir().join(DATABASE_FILE_NAME))
    }

    /// Get the storage quota, `None` when unlimited.
    #[must_use]
    pub fn quota(&self) -> Option<usize> {
        if self.storage.quota_bytes == 0 {
            None
        } else {
            Some(self.storage.quota_bytes)
        }
    }
}
