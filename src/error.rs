//! Error types for LearnBuddy.

use thiserror::Error;

/// Library-level error type for LearnBuddy operations.
#[derive(Error, Debug)]
pub enum LearnBuddyError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Transcript source error: {0}")]
    TranscriptSource(String),

    #[error("Grading failed: {0}")]
    Grading(String),

    #[error("Attempt store error: {0}")]
    Storage(String),

    #[error("Session error: {0}")]
    Session(String),

    #[error("Cannot {action} while overlay is {state}")]
    InvalidTransition { state: String, action: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("OpenAI API error: {0}")]
    OpenAI(String),
}

/// Result type alias for LearnBuddy operations.
pub type Result<T> = std::result::Result<T, LearnBuddyError>;
