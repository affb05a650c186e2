//! Configuration file handling for ~/.soundmap/config.ini.
//!
//! Loads and saves user configuration with sensible defaults.

use ini::Ini;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub use super::settings::*;

/// Configuration file errors.
#[derive(Debug, Error)]
pub enum ConfigFileError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] ini::Error),

    /// Failed to write config file
    #[error("Failed to write config file: {0}")]
    WriteError(String),

    /// Invalid configuration value
    #[error("Invalid configuration: {section}.{key} = '{value}' - {reason}")]
    InvalidValue {
        section: String,
        key: String,
        value: String,
        reason: String,
    },

    /// Failed to create config directory
    #[error("Failed to create config directory: {0}")]
    DirectoryError(std::io::Error),
}

impl ConfigFile {
    /// Load configuration from the default path (~/.soundmap/config.ini).
    pub fn load() -> Result<Self, ConfigFileError> {
        let path = config_file_path();
        Self::load_from(&path)
    }

    /// Load configuration from a specific path.
    ///
    /// If the file doesn't exist, returns defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigFileError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let ini = Ini::load_from_file(path)?;
        super::parser::parse_ini(&ini)
    }

    /// Save configuration to a specific path.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigFileError> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(ConfigFileError::DirectoryError)?;
        }

        super::writer::to_ini(self)
            .write_to_file(path)
            .map_err(|e| ConfigFileError::WriteError(e.to_string()))
    }

    /// All settings as `section.key = value` pairs, in file order.
    pub fn entries(&self) -> Vec<(String, String)> {
        super::writer::to_entries(self)
    }
}

/// Get the path to the config directory (~/.soundmap).
pub fn config_directory() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".soundmap")
}

/// Get the path to the config file (~/.soundmap/config.ini).
pub fn config_file_path() -> PathBuf {
    config_directory().join("config.ini")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = ConfigFile::default();
        assert_eq!(config.overpass.timeout, 25);
        assert_eq!(config.circle.steps, 64);
        assert_eq!(config.circle.padding, 1.25);
        assert_eq!(config.data.locations, "locations.json");
        assert_eq!(config.data.delimiting, vec!["capuchina.json", "veracruz.json"]);
        assert_eq!(config.logging.file, "soundmap.log");
    }

    #[test]
    fn test_load_nonexistent_returns_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("nonexistent.ini");

        let config = ConfigFile::load_from(&config_path).unwrap();
        assert_eq!(config, ConfigFile::default());
    }

    #[test]
    fn test_save_and_reload() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("nested").join("config.ini");

        let mut config = ConfigFile::default();
        config.circle.steps = 96;
        config.circle.center_lat = 4.6;
        config.data.delimiting = vec!["a.json".to_string(), "https://x.test/b.json".to_string()];
        config.save_to(&config_path).unwrap();

        let reloaded = ConfigFile::load_from(&config_path).unwrap();
        assert_eq!(reloaded, config);
    }

    #[test]
    fn test_entries_in_file_order() {
        let entries = ConfigFile::default().entries();
        let keys: Vec<&str> = entries.iter().map(|(k, _)| k.as_str()).collect();

        assert_eq!(keys.first(), Some(&"overpass.endpoint"));
        assert_eq!(keys.last(), Some(&"logging.file"));
        assert_eq!(keys.len(), 10);
        assert!(entries.contains(&(
            "data.delimiting".to_string(),
            "capuchina.json, veracruz.json".to_string()
        )));
    }

    #[test]
    fn test_config_file_path() {
        assert!(config_file_path().ends_with(".soundmap/config.ini"));
    }
}
