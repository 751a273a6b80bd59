//! Attempt history for assessments.
//!
//! Provides a trait-based interface over the attempt log plus the
//! streak and leaderboard views computed from it.

mod sqlite;
mod stats;

pub use sqlite::SqliteAttemptStore;
pub use stats::{daily_streak, leaderboard, LeaderboardEntry};

use crate::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How an attempt was answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttemptMode {
    /// Multiple-choice assessment.
    Mcq,
    /// Free-text answer graded by the grader.
    Subjective,
}

impl AttemptMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            AttemptMode::Mcq => "mcq",
            AttemptMode::Subjective => "subjective",
        }
    }
}

impl std::str::FromStr for AttemptMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mcq" => Ok(AttemptMode::Mcq),
            "subjective" => Ok(AttemptMode::Subjective),
            _ => Err(format!("Unknown attempt mode: {}", s)),
        }
    }
}

impl std::fmt::Display for AttemptMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One completed assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attempt {
    pub timestamp: DateTime<Utc>,
    pub video_id: String,
    /// 0 to 100.
    pub score: u8,
    pub mode: AttemptMode,
}

impl Attempt {
    /// Create an attempt stamped with the current time.
    pub fn new(video_id: impl Into<String>, score: u8, mode: AttemptMode) -> Self {
        Self {
            timestamp: Utc::now(),
            video_id: video_id.into(),
            score: score.min(100),
            mode,
        }
    }
}

/// Append-only attempt log.
#[async_trait]
pub trait AttemptStore: Send + Sync {
    /// Record an attempt.
    async fn append(&self, attempt: &Attempt) -> Result<()>;

    /// All attempts in the order they were recorded.
    async fn list(&self) -> Result<Vec<Attempt>>;

    /// Remove every attempt. Returns how many were removed.
    async fn clear(&self) -> Result<usize>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attempt_mode_strings() {
        assert_eq!("MCQ".parse::<AttemptMode>().unwrap(), AttemptMode::Mcq);
        assert_eq!(AttemptMode::Subjective.to_string(), "subjective");
        assert!("essay".parse::<AttemptMode>().is_err());
    }

    #[test]
    fn test_attempt_json_shape() {
        let attempt = Attempt::new("abc", 120, AttemptMode::Mcq);
        assert_eq!(attempt.score, 100);

        let json = serde_json::to_value(&attempt).unwrap();
        assert_eq!(json["mode"], "mcq");
        assert_eq!(json["video_id"], "abc");
    }
}
