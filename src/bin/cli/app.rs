use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use vocab_srs::vocabulary::JsonFileStorage;
use vocab_srs::{Config, VocabularyEntry, VocabularyStore};

/// Shared application state for CLI commands
pub struct App {
    pub config: Config,
    pub store: VocabularyStore<JsonFileStorage>,
}

impl App {
    /// Load the config and open the vocabulary store
    pub fn new(config_path: Option<&Path>, data_dir: Option<PathBuf>) -> Result<Self> {
        let config_path = match config_path {
            Some(path) => path.to_path_buf(),
            None => Config::default_path().context("Failed to get config directory")?,
        };

        let mut config = Config::load(&config_path)
            .with_context(|| format!("Failed to load config from {}", config_path.display()))?;
        if data_dir.is_some() {
            config.data_dir = data_dir;
        }

        let store = config
            .open_store()
            .context("Failed to open vocabulary storage")?;

        Ok(Self { config, store })
    }

    /// Find an entry by word, or fail with a helpful message
    pub fn find_word(&self, word: &str) -> Result<VocabularyEntry> {
        self.store
            .find_word(word)
            .with_context(|| format!("No word '{}' in the bank", word))
    }
}
