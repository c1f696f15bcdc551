//! Vocabulary bank with spaced repetition
//!
//! This module provides:
//! - Word storage with case-insensitive uniqueness
//! - SM-2 spaced repetition scheduling
//! - Due-word selection and review statistics
//! - Change notifications for listening views

pub mod algorithm;
pub mod models;
pub mod notify;
pub mod session;
pub mod storage;
pub mod store;

pub use models::*;
pub use notify::{Subscription, SubscriptionId};
pub use session::ReviewSession;
pub use storage::{JsonFileStorage, MemoryStorage, StorageError, VocabularyStorage};
pub use store::{Clock, FixedClock, SystemClock, VocabularyError, VocabularyStore};
