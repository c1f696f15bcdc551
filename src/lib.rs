pub mod config;
pub mod vocabulary;

pub use config::{Config, ConfigError};
pub use vocabulary::{
    JsonFileStorage, ReviewRating, ReviewSession, ReviewStats, VocabularyEntry, VocabularyError,
    VocabularyEvent, VocabularyStore,
};
