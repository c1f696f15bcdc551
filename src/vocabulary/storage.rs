//! Storage port for the vocabulary collection
//!
//! The whole collection is the unit of persistence: adapters load and save
//! the full ordered list of entries at once.
//!
//! File layout for [`JsonFileStorage`]:
//! ```text
//! {data_dir}/
//! └── vocabulary.json      # Array of all entries, insertion order
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use thiserror::Error;

use super::models::VocabularyEntry;

/// File name used when none is configured
pub const DEFAULT_STORAGE_FILE: &str = "vocabulary.json";

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Data directory not found")]
    DataDirNotFound,
}

pub type Result<T> = std::result::Result<T, StorageError>;

/// Load and save the full vocabulary collection
pub trait VocabularyStorage: Send {
    /// Read every entry in storage order. An absent collection is empty.
    fn load(&self) -> Result<Vec<VocabularyEntry>>;

    /// Replace the stored collection
    fn save(&mut self, entries: &[VocabularyEntry]) -> Result<()>;

    /// Keep a collection that failed to load out of the way of the next save.
    /// Returns where it went, if anywhere.
    fn set_aside_unreadable(&mut self) -> Result<Option<PathBuf>> {
        Ok(None)
    }
}

/// Collection stored as a single pretty-printed JSON file
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    /// Create storage for `file_name` inside `data_dir`, creating the directory if needed
    pub fn new(data_dir: PathBuf, file_name: &str) -> Result<Self> {
        fs::create_dir_all(&data_dir)?;
        Ok(Self {
            path: data_dir.join(file_name),
        })
    }

    /// Default data directory (e.g. ~/.local/share/vocab-srs)
    pub fn default_data_dir() -> Result<PathBuf> {
        dirs::data_local_dir()
            .map(|p| p.join("vocab-srs"))
            .ok_or(StorageError::DataDirNotFound)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl VocabularyStorage for JsonFileStorage {
    fn load(&self) -> Result<Vec<VocabularyEntry>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        let entries: Vec<VocabularyEntry> = serde_json::from_str(&content)?;
        Ok(entries)
    }

    /// Atomic write (write to .tmp then rename)
    fn save(&mut self, entries: &[VocabularyEntry]) -> Result<()> {
        let tmp_path = self.path.with_extension("json.tmp");
        let json = serde_json::to_string_pretty(entries)?;
        fs::write(&tmp_path, json)?;
        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }

    /// Rename the unreadable file to `{file}.corrupt-{millis}`
    fn set_aside_unreadable(&mut self) -> Result<Option<PathBuf>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(format!(".corrupt-{}", Utc::now().timestamp_millis()));
        let backup = self.path.with_file_name(name);
        fs::rename(&self.path, &backup)?;
        Ok(Some(backup))
    }
}

/// In-process storage holding the serialized collection
///
/// Keeps the JSON text rather than the entries so that reads go through
/// the same decoding path as the file adapter.
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    raw: Option<String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-populated with `entries`
    pub fn with_entries(entries: &[VocabularyEntry]) -> Result<Self> {
        Ok(Self {
            raw: Some(serde_json::to_string(entries)?),
        })
    }

    /// Storage holding arbitrary text, e.g. a damaged collection
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            raw: Some(raw.into()),
        }
    }

    pub fn raw(&self) -> Option<&str> {
        self.raw.as_deref()
    }
}

impl VocabularyStorage for MemoryStorage {
    fn load(&self) -> Result<Vec<VocabularyEntry>> {
        match &self.raw {
            Some(raw) => Ok(serde_json::from_str(raw)?),
            None => Ok(Vec::new()),
        }
    }

    fn save(&mut self, entries: &[VocabularyEntry]) -> Result<()> {
        self.raw = Some(serde_json::to_string(entries)?);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocabulary::models::DEFAULT_SUGGESTED_BY;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn create_test_storage() -> (JsonFileStorage, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let storage = JsonFileStorage::new(temp_dir.path().join("data"), DEFAULT_STORAGE_FILE).unwrap();
        (storage, temp_dir)
    }

    fn entry(word: &str) -> VocabularyEntry {
        VocabularyEntry::new(
            word.to_string(),
            format!("meaning of {}", word),
            String::new(),
            DEFAULT_SUGGESTED_BY.to_string(),
            NaiveDate::from_ymd_opt(2026, 3, 14).unwrap(),
        )
    }

    #[test]
    fn test_missing_file_is_empty() {
        let (storage, _temp) = create_test_storage();
        assert!(!storage.path().exists());
        assert!(storage.load().unwrap().is_empty());
    }

    #[test]
    fn test_save_and_load_preserves_order() {
        let (mut storage, _temp) = create_test_storage();
        let entries = vec![entry("zeal"), entry("apt"), entry("moot")];

        storage.save(&entries).unwrap();
        let loaded = storage.load().unwrap();

        assert_eq!(loaded, entries);
    }

    #[test]
    fn test_save_leaves_no_temp_file() {
        let (mut storage, temp) = create_test_storage();
        storage.save(&[entry("zeal")]).unwrap();

        let files: Vec<_> = fs::read_dir(temp.path().join("data"))
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        assert_eq!(files, vec![DEFAULT_STORAGE_FILE.to_string()]);
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let (storage, _temp) = create_test_storage();
        fs::write(storage.path(), "{not json").unwrap();

        assert!(matches!(storage.load(), Err(StorageError::Json(_))));
    }

    #[test]
    fn test_set_aside_unreadable_keeps_original() {
        let (mut storage, temp) = create_test_storage();
        fs::write(storage.path(), "{not json").unwrap();

        let backup = storage.set_aside_unreadable().unwrap().unwrap();

        assert!(!storage.path().exists());
        assert_eq!(backup.parent(), Some(temp.path().join("data").as_path()));
        assert!(backup
            .file_name()
            .unwrap()
            .to_string_lossy()
            .starts_with("vocabulary.json.corrupt-"));
        assert_eq!(fs::read_to_string(&backup).unwrap(), "{not json");

        // Nothing left to move
        assert!(storage.set_aside_unreadable().unwrap().is_none());
    }

    #[test]
    fn test_blank_file_is_empty() {
        let (storage, _temp) = create_test_storage();
        fs::write(storage.path(), "  \n").unwrap();

        assert!(storage.load().unwrap().is_empty());
    }

    #[test]
    fn test_memory_storage_round_trip() {
        let mut storage = MemoryStorage::new();
        assert!(storage.load().unwrap().is_empty());

        storage.save(&[entry("apt")]).unwrap();
        assert_eq!(storage.load().unwrap()[0].word, "apt");

        let damaged = MemoryStorage::with_raw("[{]");
        assert!(damaged.load().is_err());
    }
}
