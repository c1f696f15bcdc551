//! Configuration file for the vocabulary bank
//!
//! ```toml
//! # ~/.config/vocab-srs/config.toml
//! data_dir = "/home/me/vocab"
//! storage_file = "vocabulary.json"
//! default_suggested_by = "manual"
//! ```
//!
//! Every key is optional. A missing file yields the defaults.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::vocabulary::storage::{JsonFileStorage, DEFAULT_STORAGE_FILE};
use crate::vocabulary::{StorageError, VocabularyStore, DEFAULT_SUGGESTED_BY};

/// Error type for configuration loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Config directory not found")]
    ConfigDirNotFound,

    #[error(transparent)]
    Storage(#[from] StorageError),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory holding the vocabulary file (defaults to the platform data dir)
    pub data_dir: Option<PathBuf>,
    pub storage_file: String,
    /// Provenance tag for words added without one
    pub default_suggested_by: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: None,
            storage_file: DEFAULT_STORAGE_FILE.to_string(),
            default_suggested_by: DEFAULT_SUGGESTED_BY.to_string(),
        }
    }
}

impl Config {
    /// Default config location (e.g. ~/.config/vocab-srs/config.toml)
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        dirs::config_dir()
            .map(|p| p.join("vocab-srs").join("config.toml"))
            .ok_or(ConfigError::ConfigDirNotFound)
    }

    /// Load from `path`, falling back to defaults if the file does not exist
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            log::debug!("config: {} not found, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Configured data directory, or the platform default
    pub fn resolved_data_dir(&self) -> Result<PathBuf, ConfigError> {
        match &self.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => Ok(JsonFileStorage::default_data_dir()?),
        }
    }

    /// Open the file-backed store described by this config
    pub fn open_store(&self) -> Result<VocabularyStore<JsonFileStorage>, ConfigError> {
        let storage = JsonFileStorage::new(self.resolved_data_dir()?, &self.storage_file)?;
        log::debug!("config: vocabulary at {}", storage.path().display());

        let mut store = VocabularyStore::new(storage);
        store.set_default_suggested_by(self.default_suggested_by.clone());
        Ok(store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config::load(&temp_dir.path().join("config.toml")).unwrap();

        assert_eq!(config, Config::default());
        assert_eq!(config.storage_file, "vocabulary.json");
        assert_eq!(config.default_suggested_by, "AI");
    }

    #[test]
    fn test_partial_file_overrides() {
        let config = Config::parse("default_suggested_by = \"manual\"\n").unwrap();

        assert_eq!(config.default_suggested_by, "manual");
        assert_eq!(config.storage_file, DEFAULT_STORAGE_FILE);
        assert!(config.data_dir.is_none());
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "data_dir = [").unwrap();

        assert!(matches!(Config::load(&path), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_open_store_uses_config() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config {
            data_dir: Some(temp_dir.path().join("bank")),
            storage_file: "words.json".to_string(),
            default_suggested_by: "manual".to_string(),
        };

        let store = config.open_store().unwrap();
        assert!(store.add_word("apt", "", "", None).unwrap());

        assert!(temp_dir.path().join("bank").join("words.json").exists());
        assert_eq!(store.list_words()[0].suggested_by, "manual");
    }
}
