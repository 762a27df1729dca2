//! Configuration management for minutebook.
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
const DATA_DIR_NAME: &str = "minutebook";

/// Default blob file name.
const DATA_FILE_NAME: &str = "minutes.json";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `MINUTEBOOK_`)
/// 2. TOML config file at `~/.config/minutebook/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Storage configuration.
    pub storage: StorageConfig,
    /// Seeding configuration.
    pub seed: SeedConfig,
    /// Export configuration.
    pub export: ExportConfig,
}

/// Storage-related configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path to the data blob file.
    /// Defaults to `~/.local/share/minutebook/minutes.json`
    pub data_path: Option<PathBuf>,
    /// Pretty-print the persisted JSON.
    pub pretty: bool,
}

/// Seeding-related configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedConfig {
    /// Seed a demonstration record when opening empty storage.
    pub demo_enabled: bool,
}

/// Export-related configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Directory where exported documents are written.
    /// Defaults to the current working directory.
    pub output_dir: Option<PathBuf>,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self { demo_enabled: true }
    }
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// Configuration is loaded in this order (later sources override earlier):
    /// 1. Default values
    /// 2. TOML config file (if exists)
    /// 3. Environment variables (prefixed with `MINUTEBOOK_`)
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration with an optional custom config path.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed("MINUTEBOOK_").split("_"));

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
        if let Some(path) = &self.storage.data_path {
            if path.file_name().is_none() {
                return Err(Error::ConfigValidation {
                    message: format!(
                        "storage.data_path must name a file, got {}",
                        path.display()
                    ),
                });
            }
        }

        Ok(())
    }

    /// Get the data blob path, resolving defaults if not set.
    #[must_use]
    pub fn data_path(&self) -> PathBuf {
        self.storage
            .data_path
            .clone()
            .unwrap_or_else(|| Self::default_data_dir().join(DATA_FILE_NAME))
    }

    /// Get the export output directory, resolving defaults if not set.
    #[must_use]
    pub fn export_dir(&self) -> PathBuf {
        self.export
            .output_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert!(config.storage.data_path.is_none());
        assert!(!config.storage.pretty);
        assert!(config.seed.demo_enabled);
        assert!(config.export.output_dir.is_none());
    }

    #[test]
    fn test_validate_valid_config() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_directory_like_data_path() {
        let mut config = Config::default();
        config.storage.data_path = Some(PathBuf::from("/data/store/.."));

        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("data_path"));
    }

    #[test]
    fn test_data_path_default() {
        let config = Config::default();
        let path = config.data_path();

        assert!(path.to_string_lossy().contains("minutes.json"));
        assert!(path.to_string_lossy().contains("minutebook"));
    }

    #[test]
    fn test_data_path_custom() {
        let mut config = Config::default();
        config.storage.data_path = Some(PathBuf::from("/custom/minutes.json"));

        assert_eq!(config.data_path(), PathBuf::from("/custom/minutes.json"));
    }

    #[test]
    fn test_export_dir_default() {
        let config = Config::default();
        assert_eq!(config.export_dir(), PathBuf::from("."));
    }

    #[test]
    fn test_export_dir_custom() {
        let mut config = Config::default();
        config.export.output_dir = Some(PathBuf::from("/exports"));
        assert_eq!(config.export_dir(), PathBuf::from("/exports"));
    }

    #[test]
    fn test_default_config_path() {
        let path = Config::default_config_path();
        assert!(path.to_string_lossy().contains("minutebook"));
        assert!(path.to_string_lossy().contains("config.toml"));
    }

    #[test]
    fn test_default_data_dir() {
        let path = Config::default_data_dir();
        assert!(path.to_string_lossy().contains("minutebook"));
    }

    #[test]
    fn test_load_nonexistent_config() {
        // Loading from a nonexistent path should work (uses defaults)
        let result = Config::load_from(Some(PathBuf::from("/nonexistent/config.toml")));
        assert!(result.is_ok());

        let config = result.unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_from_toml_file() {
        let path = std::env::temp_dir().join(format!(
            "minutebook_config_{}.toml",
            std::process::id()
        ));
        std::fs::write(
            &path,
            "[storage]\ndata_path = \"/tmp/custom.json\"\npretty = true\n\n[seed]\ndemo_enabled = false\n",
        )
        .unwrap();

        let config = Config::load_from(Some(path.clone())).unwrap();
        assert_eq!(
            config.storage.data_path,
            Some(PathBuf::from("/tmp/custom.json"))
        );
        assert!(config.storage.pretty);
        assert!(!config.seed.demo_enabled);

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_config_serialize() {
        let config = Config::default();
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("data_path"));
        assert!(json.contains("demo_enabled"));
    }

    #[test]
    fn test_storage_config_deserialize() {
        let json = r#"{"pretty": true}"#;
        let storage: StorageConfig = serde_json::from_str(json).unwrap();
        assert!(storage.pretty);
        assert!(storage.data_path.is_none());
    }

    #[test]
    fn test_config_clone() {
        let config = Config::default();
        let cloned = config.clone();
        assert_eq!(config, cloned);
    }
}
