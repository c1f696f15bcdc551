//! Vocabulary store: the single authority over the persisted word bank
//!
//! Every mutation is a read-modify-write of the full collection performed
//! while holding the storage lock, so concurrent adds and reviews cannot
//! lose each other's updates. Subscribers are notified after the write.

use std::sync::{Mutex, MutexGuard};

use chrono::{Local, NaiveDate};
use thiserror::Error;

use super::algorithm::{calculate_next_review, preview_intervals, ReviewResult, MAX_QUALITY};
use super::models::*;
use super::notify::{ChangeNotifier, Subscription, SubscriptionId};
use super::storage::{StorageError, VocabularyStorage};

#[derive(Error, Debug)]
pub enum VocabularyError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

pub type Result<T> = std::result::Result<T, VocabularyError>;

/// Source of the current calendar date
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// Local calendar date from the system clock
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// A clock stuck on one date
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// Word bank with SM-2 review scheduling
pub struct VocabularyStore<S: VocabularyStorage> {
    storage: Mutex<S>,
    clock: Box<dyn Clock>,
    notifier: ChangeNotifier,
    default_suggested_by: String,
}

impl<S: VocabularyStorage> VocabularyStore<S> {
    pub fn new(storage: S) -> Self {
        Self::with_clock(storage, SystemClock)
    }

    pub fn with_clock(storage: S, clock: impl Clock + 'static) -> Self {
        Self {
            storage: Mutex::new(storage),
            clock: Box::new(clock),
            notifier: ChangeNotifier::new(),
            default_suggested_by: DEFAULT_SUGGESTED_BY.to_string(),
        }
    }

    /// Provenance tag applied by [`add_word`](Self::add_word) when none is given
    pub fn set_default_suggested_by(&mut self, suggested_by: impl Into<String>) {
        self.default_suggested_by = suggested_by.into();
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    // ==================== Notifications ====================

    pub fn subscribe(&self) -> Subscription {
        self.notifier.subscribe()
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.notifier.unsubscribe(id)
    }

    // ==================== Word Operations ====================

    /// Add a word to the bank
    ///
    /// Returns `Ok(false)` without touching storage if the word is blank or
    /// already present under any casing.
    pub fn add_word(
        &self,
        word: &str,
        definition: &str,
        context: &str,
        suggested_by: Option<&str>,
    ) -> Result<bool> {
        let word = word.trim();
        if word.is_empty() {
            log::warn!("vocabulary: refusing to add an empty word");
            return Ok(false);
        }

        let mut storage = self.lock_storage();
        let (mut entries, unreadable) = load_for_update(&*storage);

        if entries.iter().any(|e| e.matches_word(word)) {
            log::debug!("vocabulary: '{}' is already in the bank", word);
            return Ok(false);
        }

        let entry = VocabularyEntry::new(
            word.to_string(),
            definition.to_string(),
            context.to_string(),
            suggested_by.unwrap_or(&self.default_suggested_by).to_string(),
            self.today(),
        );
        let event = VocabularyEvent::WordAdded {
            id: entry.id.clone(),
            word: entry.word.clone(),
        };

        entries.push(entry);
        if unreadable {
            set_aside(&mut *storage)?;
        }
        storage.save(&entries)?;
        drop(storage);

        log::info!("vocabulary: added '{}' ({} words)", word, entries.len());
        self.notifier.notify(&event);
        Ok(true)
    }

    /// All entries in insertion order
    pub fn list_words(&self) -> Vec<VocabularyEntry> {
        let storage = self.lock_storage();
        load_or_empty(&*storage)
    }

    /// Entries whose next review falls on or before today, in storage order
    pub fn list_due_words(&self) -> Vec<VocabularyEntry> {
        let today = self.today();
        self.list_words()
            .into_iter()
            .filter(|e| e.is_due_on(today))
            .collect()
    }

    /// Find an entry by word (case-insensitive)
    pub fn find_word(&self, word: &str) -> Option<VocabularyEntry> {
        let word = word.trim();
        self.list_words().into_iter().find(|e| e.matches_word(word))
    }

    // ==================== Review Operations ====================

    /// Apply a review of the given quality (0-5) to one entry
    ///
    /// An unknown id is a no-op: nothing is written, no notification is
    /// sent, and `Ok(None)` is returned.
    pub fn process_review(&self, id: &str, quality: u8) -> Result<Option<VocabularyEntry>> {
        let quality = quality.min(MAX_QUALITY);
        let today = self.today();
        let mut storage = self.lock_storage();
        // An unreadable collection holds no ids, so nothing below can overwrite it
        let mut entries = load_or_empty(&*storage);

        let Some(entry) = entries.iter_mut().find(|e| e.id == id) else {
            log::debug!("vocabulary: review for unknown id '{}' ignored", id);
            return Ok(None);
        };

        let ReviewResult {
            reps,
            interval,
            ease_factor,
            next_review,
        } = calculate_next_review(entry, quality, today);

        entry.reps = reps;
        entry.interval = interval;
        entry.ease_factor = ease_factor;
        entry.next_review = next_review;
        let updated = entry.clone();

        storage.save(&entries)?;
        drop(storage);

        log::info!(
            "vocabulary: reviewed '{}' q={} -> interval {}d, ef {:.2}",
            updated.word,
            quality,
            updated.interval,
            updated.ease_factor
        );
        self.notifier.notify(&VocabularyEvent::WordReviewed {
            id: updated.id.clone(),
            quality,
            interval: updated.interval,
            next_review: updated.next_review,
        });
        Ok(Some(updated))
    }

    /// Submit one of the four answer buttons
    pub fn rate(&self, id: &str, rating: ReviewRating) -> Result<Option<VocabularyEntry>> {
        self.process_review(id, rating.quality())
    }

    /// Interval each answer button would give the entry today
    pub fn preview(&self, entry: &VocabularyEntry) -> [u32; 4] {
        preview_intervals(entry, self.today())
    }

    pub fn review_stats(&self) -> ReviewStats {
        let today = self.today();
        let entries = self.list_words();

        ReviewStats {
            due: entries.iter().filter(|e| e.is_due_on(today)).count(),
            total: entries.len(),
            learned: entries.iter().filter(|e| e.is_learned()).count(),
        }
    }

    fn lock_storage(&self) -> MutexGuard<'_, S> {
        self.storage
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Unreadable collections read as empty so reviews stay available
fn load_or_empty<S: VocabularyStorage + ?Sized>(storage: &S) -> Vec<VocabularyEntry> {
    load_for_update(storage).0
}

/// Like [`load_or_empty`], also reporting whether the stored collection was unreadable
fn load_for_update<S: VocabularyStorage + ?Sized>(storage: &S) -> (Vec<VocabularyEntry>, bool) {
    match storage.load() {
        Ok(entries) => (entries, false),
        Err(e) => {
            log::warn!("vocabulary: stored collection unreadable, treating as empty: {}", e);
            (Vec::new(), true)
        }
    }
}

/// Move an unreadable collection aside before it is overwritten
fn set_aside<S: VocabularyStorage + ?Sized>(storage: &mut S) -> Result<()> {
    if let Some(backup) = storage.set_aside_unreadable()? {
        log::warn!(
            "vocabulary: unreadable collection moved to {}",
            backup.display()
        );
    }
    Ok(())
}
