//! Views over the attempt log.

use super::{Attempt, AttemptMode};
use chrono::{DateTime, Local, NaiveDate, Utc};
use serde::Serialize;
use std::collections::HashSet;

/// Consecutive local calendar days, ending at `today`, with at least one attempt.
///
/// Returns 0 when there is no attempt on `today`.
pub fn daily_streak(attempts: &[Attempt], today: NaiveDate) -> u32 {
    let days: HashSet<NaiveDate> = attempts
        .iter()
        .map(|a| a.timestamp.with_timezone(&Local).date_naive())
        .collect();

    let mut streak = 0;
    let mut day = today;
    while days.contains(&day) {
        streak += 1;
        match day.pred_opt() {
            Some(prev) => day = prev,
            None => break,
        }
    }
    streak
}

/// One leaderboard row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeaderboardEntry {
    /// Anonymized name by rank: `User-01`, `User-02`, ...
    pub name: String,
    pub score: u8,
    pub video_id: String,
    pub mode: AttemptMode,
    pub when: DateTime<Utc>,
}

/// Attempts ranked by score, most recent first among equal scores.
pub fn leaderboard(attempts: &[Attempt]) -> Vec<LeaderboardEntry> {
    let mut ranked: Vec<&Attempt> = attempts.iter().collect();
    ranked.sort_by(|a, b| b.score.cmp(&a.score).then(b.timestamp.cmp(&a.timestamp)));

    ranked
        .into_iter()
        .enumerate()
        .map(|(i, a)| LeaderboardEntry {
            name: format!("User-{:02}", i + 1),
            score: a.score,
            video_id: a.video_id.clone(),
            mode: a.mode,
            when: a.timestamp,
        })
        .collect()
}
