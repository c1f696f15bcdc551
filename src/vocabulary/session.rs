//! A single pass through the words due today
//!
//! The due set is snapshotted when the session starts; reviews submitted
//! during the session do not reshuffle it.

use super::models::{ReviewRating, VocabularyEntry};
use super::storage::VocabularyStorage;
use super::store::{Result, VocabularyStore};

pub struct ReviewSession {
    queue: Vec<VocabularyEntry>,
    position: usize,
    reviewed: usize,
    correct: usize,
}

impl ReviewSession {
    /// Start a session over the store's current due words
    pub fn start<S: VocabularyStorage>(store: &VocabularyStore<S>) -> Self {
        Self::from_entries(store.list_due_words())
    }

    pub fn from_entries(queue: Vec<VocabularyEntry>) -> Self {
        Self {
            queue,
            position: 0,
            reviewed: 0,
            correct: 0,
        }
    }

    /// Entry awaiting a rating, if any remain
    pub fn current(&self) -> Option<&VocabularyEntry> {
        self.queue.get(self.position)
    }

    /// Zero-based index of the current entry
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn is_complete(&self) -> bool {
        self.position >= self.queue.len()
    }

    pub fn reviewed(&self) -> usize {
        self.reviewed
    }

    /// Reviews answered Hard, Good or Easy
    pub fn correct(&self) -> usize {
        self.correct
    }

    /// Rate the current entry and move on
    ///
    /// Returns the updated entry, or `None` once the session is complete
    /// or the entry no longer exists in the store.
    pub fn rate<S: VocabularyStorage>(
        &mut self,
        store: &VocabularyStore<S>,
        rating: ReviewRating,
    ) -> Result<Option<VocabularyEntry>> {
        let Some(entry) = self.current() else {
            return Ok(None);
        };
        let id = entry.id.clone();

        let updated = store.rate(&id, rating)?;
        self.position += 1;
        if updated.is_some() {
            self.reviewed += 1;
            if rating != ReviewRating::Again {
                self.correct += 1;
            }
        }
        Ok(updated)
    }

    /// Move past the current entry without rating it
    pub fn skip(&mut self) {
        if !self.is_complete() {
            self.position += 1;
        }
    }
}
