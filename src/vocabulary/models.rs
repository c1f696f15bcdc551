//! Data models for the vocabulary bank

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Local, NaiveDate, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use super::algorithm::{start_of_day, DEFAULT_EASE_FACTOR};

/// Provenance tag used when the caller does not supply one
pub const DEFAULT_SUGGESTED_BY: &str = "AI";

/// Entries with more consecutive successful reviews than this count as learned
pub const LEARNED_REPS_THRESHOLD: u32 = 3;

/// A word in the vocabulary bank together with its review schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VocabularyEntry {
    pub id: String,
    pub word: String,
    #[serde(default)]
    pub definition: String,
    #[serde(default)]
    pub context: String,
    #[serde(default = "default_suggested_by")]
    pub suggested_by: String,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub added_at: DateTime<Utc>,
    /// Consecutive successful reviews
    #[serde(default)]
    pub reps: u32,
    /// Current interval in days
    #[serde(default)]
    pub interval: u32,
    /// SM-2 ease factor (default 2.5)
    #[serde(default = "default_ease_factor")]
    pub ease_factor: f64,
    /// Local midnight of the day the entry is next due
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub next_review: DateTime<Utc>,
}

fn default_suggested_by() -> String {
    DEFAULT_SUGGESTED_BY.to_string()
}

fn default_ease_factor() -> f64 {
    DEFAULT_EASE_FACTOR
}

impl VocabularyEntry {
    /// Build a fresh entry, due on `today`
    pub fn new(
        word: String,
        definition: String,
        context: String,
        suggested_by: String,
        today: NaiveDate,
    ) -> Self {
        Self {
            id: format!("word-{}", Uuid::new_v4()),
            word,
            definition,
            context,
            suggested_by,
            // Stored as epoch millis
            added_at: Utc::now().trunc_subsecs(3),
            reps: 0,
            interval: 0,
            ease_factor: DEFAULT_EASE_FACTOR,
            next_review: start_of_day(today),
        }
    }

    /// Local calendar date of the next review
    pub fn next_review_date(&self) -> NaiveDate {
        self.next_review.with_timezone(&Local).date_naive()
    }

    /// Check if the entry is due on the given day
    pub fn is_due_on(&self, today: NaiveDate) -> bool {
        self.next_review_date() <= today
    }

    pub fn is_learned(&self) -> bool {
        self.reps > LEARNED_REPS_THRESHOLD
    }

    /// Case-insensitive match against another word
    pub fn matches_word(&self, word: &str) -> bool {
        self.word.to_lowercase() == word.to_lowercase()
    }
}

/// Summary counts shown on the dashboard
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewStats {
    pub due: usize,
    pub total: usize,
    pub learned: usize,
}

/// The four answer buttons offered after a card is flipped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ReviewRating {
    Again,
    Hard,
    Good,
    Easy,
}

impl ReviewRating {
    pub const ALL: [ReviewRating; 4] = [
        ReviewRating::Again,
        ReviewRating::Hard,
        ReviewRating::Good,
        ReviewRating::Easy,
    ];

    /// SM-2 quality (0-5) submitted for this button
    pub fn quality(self) -> u8 {
        match self {
            ReviewRating::Again => 1,
            ReviewRating::Hard => 3,
            ReviewRating::Good => 4,
            ReviewRating::Easy => 5,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ReviewRating::Again => "Again",
            ReviewRating::Hard => "Hard",
            ReviewRating::Good => "Good",
            ReviewRating::Easy => "Easy",
        }
    }
}

impl fmt::Display for ReviewRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
#[error("Unknown rating '{0}' (expected again, hard, good, easy or 1-4)")]
pub struct RatingParseError(pub String);

impl FromStr for ReviewRating {
    type Err = RatingParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "again" | "a" | "1" => Ok(ReviewRating::Again),
            "hard" | "h" | "2" => Ok(ReviewRating::Hard),
            "good" | "g" | "3" => Ok(ReviewRating::Good),
            "easy" | "e" | "4" => Ok(ReviewRating::Easy),
            _ => Err(RatingParseError(s.to_string())),
        }
    }
}

/// Change notification sent to subscribers after a successful write
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum VocabularyEvent {
    WordAdded {
        id: String,
        word: String,
    },
    #[serde(rename_all = "camelCase")]
    WordReviewed {
        id: String,
        quality: u8,
        interval: u32,
        #[serde(with = "chrono::serde::ts_milliseconds")]
        next_review: DateTime<Utc>,
    },
}

impl VocabularyEvent {
    pub fn entry_id(&self) -> &str {
        match self {
            VocabularyEvent::WordAdded { id, .. } => id,
            VocabularyEvent::WordReviewed { id, .. } => id,
        }
    }
}
