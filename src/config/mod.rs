//! Configuration module for photoease
//!
//! Manages the listing endpoint, paging and favorites database location.
//! Configuration is stored in the user's config directory and can be
//! overridden per variable with `PHOTOEASE_*` environment variables
//! (for example `PHOTOEASE_BASE_URL`).

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

use crate::list::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use crate::remote::DEFAULT_BASE_URL;

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

const fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

/// Application configuration structure
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct PhotoEaseConfig {
    /// Base URL of the photo listing; `/photos` is appended
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Photos requested per page
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Favorites database directory (defaults to the user data directory)
    #[serde(default)]
    pub database_path: Option<PathBuf>,

    /// Per-request timeout in seconds; requests are never retried
    #[serde(default)]
    pub timeout_secs: Option<u64>,

    /// Suppress informational output by default
    #[serde(default)]
    pub quiet: bool,
}

impl Default for PhotoEaseConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            page_size: default_page_size(),
            database_path: None,
            timeout_secs: None,
            quiet: false,
        }
    }
}

impl PhotoEaseConfig {
    /// Get the path to the config file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the system config directory cannot be determined.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| ConfigError::Message("Could not determine config directory".to_string()))?;

        Ok(config_dir.join("photoease").join("config.toml"))
    }

    /// Load configuration from the default location, creating it if missing
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config file cannot be read, parsed, created, or validated.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from `path`, writing defaults there first if it doesn't exist
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config file cannot be read, parsed, created, or validated.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            Self::default().save_to(path)?;
        }

        let settings = Config::builder()
            .add_source(File::from(path).format(FileFormat::Toml))
            .add_source(Environment::with_prefix("PHOTOEASE").try_parsing(true))
            .build()?;

        let config: Self = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to `path`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the parent directory cannot be created, the configuration
    /// cannot be serialized to TOML, or the file cannot be written.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| ConfigError::Message(format!("Failed to create config directory: {e}")))?;
        }

        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Message(format!("Failed to serialize config: {e}")))?;

        fs::write(path, toml_string)
            .map_err(|e| ConfigError::Message(format!("Failed to write config file: {e}")))?;

        Ok(())
    }

    /// # Errors
    ///
    /// Returns `ConfigError` if `page_size` is zero or above `MAX_PAGE_SIZE`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.page_size == 0 {
            return Err(ConfigError::Message("page_size must be at least 1".to_string()));
        }
        if self.page_size > MAX_PAGE_SIZE {
            return Err(ConfigError::Message(format!(
                "page_size must be at most {MAX_PAGE_SIZE}, got {}",
                self.page_size
            )));
        }
        Ok(())
    }

    /// Favorites database directory, falling back to the user data directory
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if no path is configured and the data directory cannot be determined.
    pub fn resolve_database_path(&self) -> Result<PathBuf, ConfigError> {
        if let Some(path) = &self.database_path {
            return Ok(path.clone());
        }
        let data_dir = dirs::data_local_dir()
            .ok_or_else(|| ConfigError::Message("Could not determine data directory".to_string()))?;
        Ok(data_dir.join("photoease").join("favorites"))
    }

    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PhotoEaseConfig::default();
        assert_eq!(config.base_url, "https://jsonplaceholder.typicode.com");
        assert_eq!(config.page_size, 25);
        assert!(config.database_path.is_none());
        assert!(config.timeout().is_none());
        assert!(!config.quiet);
    }

    #[test]
    fn test_load_creates_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = PhotoEaseConfig::load_from(&path).unwrap();

        assert!(path.exists());
        assert_eq!(config, PhotoEaseConfig::default());
    }

    #[test]
    fn test_load_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "base_url = \"http://localhost:3000\"\ntimeout_secs = 10\n").unwrap();

        let config = PhotoEaseConfig::load_from(&path).unwrap();

        assert_eq!(config.base_url, "http://localhost:3000");
        assert_eq!(config.page_size, 25);
        assert_eq!(config.timeout(), Some(Duration::from_secs(10)));
    }

    #[test]
    fn test_zero_page_size_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "page_size = 0\n").unwrap();

        assert!(PhotoEaseConfig::load_from(&path).is_err());
    }

    #[test]
    fn test_oversized_page_size_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "page_size = 1000000\n").unwrap();
        assert!(PhotoEaseConfig::load_from(&path).is_err());

        let config = PhotoEaseConfig {
            page_size: MAX_PAGE_SIZE,
            ..PhotoEaseConfig::default()
        };
        assert!(config.validate().is_ok());
        assert!(PhotoEaseConfig { page_size: MAX_PAGE_SIZE + 1, ..config }.validate().is_err());
    }

    #[test]
    fn test_save_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let config = PhotoEaseConfig {
            database_path: Some(PathBuf::from("/tmp/photoease_favorites")),
            page_size: 10,
            quiet: true,
            ..PhotoEaseConfig::default()
        };

        config.save_to(&path).unwrap();
        let loaded = PhotoEaseConfig::load_from(&path).unwrap();

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_configured_database_path_wins() {
        let config = PhotoEaseConfig {
            database_path: Some(PathBuf::from("/srv/favorites")),
            ..PhotoEaseConfig::default()
        };
        assert_eq!(config.resolve_database_path().unwrap(), PathBuf::from("/srv/favorites"));
    }
}
