//! History command implementation.

use crate::cli::Output;
use crate::config::Settings;
use crate::storage::{daily_streak, leaderboard, AttemptStore, SqliteAttemptStore};
use anyhow::Result;
use chrono::Local;

/// Run the history command.
pub async fn run_history(limit: usize, clear: bool, settings: Settings) -> Result<()> {
    let store = SqliteAttemptStore::new(&settings.sqlite_path())?;

    if clear {
        let removed = store.clear().await?;
        Output::success(&format!("Removed {} attempts.", removed));
        return Ok(());
    }

    let attempts = store.list().await?;
    if attempts.is_empty() {
        Output::info("No attempts yet. Run 'learnbuddy assess' to take one.");
        return Ok(());
    }

    Output::header("Progress");
    Output::kv("Attempts", &attempts.len().to_string());
    Output::kv(
        "Daily streak",
        &format!("{} day(s)", daily_streak(&attempts, Local::now().date_naive())),
    );

    Output::header("Leaderboard");
    for entry in leaderboard(&attempts).into_iter().take(limit) {
        Output::list_item(&format!(
            "{}  {:>3}  {} ({}, {})",
            entry.name,
            entry.score,
            entry.video_id,
            entry.mode,
            entry.when.with_timezone(&Local).format("%Y-%m-%d %H:%M")
        ));
    }

    Ok(())
}
