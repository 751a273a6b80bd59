//! SQLite-backed attempt log.

use super::{Attempt, AttemptMode, AttemptStore};
use crate::error::{LearnBuddyError, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use tracing::{debug, info, instrument, warn};

const SCHEMA: &str = r#"
    CREATE TABLE IF NOT EXISTS attempts (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        timestamp TEXT NOT NULL,
        video_id TEXT NOT NULL,
        score INTEGER NOT NULL,
        mode TEXT NOT NULL
    );

    CREATE INDEX IF NOT EXISTS idx_attempts_timestamp ON attempts(timestamp);
"#;

/// Attempt store in a single SQLite table.
pub struct SqliteAttemptStore {
    conn: Mutex<Connection>,
}

impl SqliteAttemptStore {
    /// Open (or create) the attempts database at `path`.
    #[instrument(skip_all)]
    pub fn new(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        conn.execute_batch(SCHEMA)?;

        info!("Opened attempt store at {:?}", path);

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Create an in-memory store (useful for testing).
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(SCHEMA)?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| LearnBuddyError::Storage(format!("Failed to acquire lock: {}", e)))
    }
}

#[async_trait]
impl AttemptStore for SqliteAttemptStore {
    #[instrument(skip(self, attempt), fields(video_id = %attempt.video_id))]
    async fn append(&self, attempt: &Attempt) -> Result<()> {
        let conn = self.lock()?;

        conn.execute(
            "INSERT INTO attempts (timestamp, video_id, score, mode) VALUES (?1, ?2, ?3, ?4)",
            params![
                attempt.timestamp.to_rfc3339(),
                attempt.video_id,
                attempt.score,
                attempt.mode.as_str(),
            ],
        )?;

        debug!("Recorded {} attempt with score {}", attempt.mode, attempt.score);
        Ok(())
    }

    #[instrument(skip(self))]
    async fn list(&self) -> Result<Vec<Attempt>> {
        let conn = self.lock()?;

        let mut stmt =
            conn.prepare("SELECT timestamp, video_id, score, mode FROM attempts ORDER BY id")?;

        let rows = stmt.query_map([], |row| {
            let timestamp: String = row.get(0)?;
            let video_id: String = row.get(1)?;
            let score: u8 = row.get(2)?;
            let mode: String = row.get(3)?;
            Ok((timestamp, video_id, score, mode))
        })?;

        let mut attempts = Vec::new();
        for row in rows {
            let (timestamp, video_id, score, mode) = row?;

            let Ok(timestamp) = DateTime::parse_from_rfc3339(&timestamp) else {
                warn!("Skipping attempt with bad timestamp {:?}", timestamp);
                continue;
            };
            let Ok(mode) = mode.parse::<AttemptMode>() else {
                warn!("Skipping attempt with unknown mode {:?}", mode);
                continue;
            };

            attempts.push(Attempt {
                timestamp: timestamp.with_timezone(&Utc),
                video_id,
                score,
                mode,
            });
        }

        Ok(attempts)
    }

    #[instrument(skip(self))]
    async fn clear(&self) -> Result<usize> {
        let conn = self.lock()?;
        let deleted = conn.execute("DELETE FROM attempts", [])?;
        info!("Cleared {} attempts", deleted);
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn attempt(secs: i64, video_id: &str, score: u8, mode: AttemptMode) -> Attempt {
        Attempt {
            timestamp: Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap(),
            video_id: video_id.to_string(),
            score,
            mode,
        }
    }

    #[tokio::test]
    async fn test_append_and_list_in_order() {
        let store = SqliteAttemptStore::in_memory().unwrap();
        let first = attempt(100, "a", 80, AttemptMode::Mcq);
        let second = attempt(0, "b", 55, AttemptMode::Subjective);

        store.append(&first).await.unwrap();
        store.append(&second).await.unwrap();

        assert_eq!(store.list().await.unwrap(), vec![first, second]);
    }

    #[tokio::test]
    async fn test_clear() {
        let store = SqliteAttemptStore::in_memory().unwrap();
        store.append(&attempt(0, "a", 10, AttemptMode::Mcq)).await.unwrap();
        store.append(&attempt(1, "a", 20, AttemptMode::Mcq)).await.unwrap();

        assert_eq!(store.clear().await.unwrap(), 2);
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data").join("attempts.db");

        {
            let store = SqliteAttemptStore::new(&path).unwrap();
            store.append(&attempt(5, "v1", 90, AttemptMode::Mcq)).await.unwrap();
        }

        let store = SqliteAttemptStore::new(&path).unwrap();
        let attempts = store.list().await.unwrap();
        assert_eq!(attempts.len(), 1);
        assert_eq!(attempts[0].video_id, "v1");
        assert_eq!(attempts[0].score, 90);
    }
}
