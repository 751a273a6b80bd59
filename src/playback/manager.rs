//! Registry of running playback sessions.

use super::{spawn_session, Classifier, ClassifierConfig, PlaybackEvent, SessionHandle, SessionSignal};
use crate::error::{LearnBuddyError, Result};
use std::collections::HashMap;
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{info, instrument};
use uuid::Uuid;

/// Keeps at most one running session per video.
pub struct SessionManager {
    config: ClassifierConfig,
    sessions: HashMap<Uuid, SessionHandle>,
    by_video: HashMap<String, Uuid>,
}

impl SessionManager {
    pub fn new(config: ClassifierConfig) -> Self {
        Self {
            config,
            sessions: HashMap::new(),
            by_video: HashMap::new(),
        }
    }

    /// Start a session for `video_id`, ending any session already running for it.
    #[instrument(skip(self, scheduled))]
    pub async fn start(
        &mut self,
        video_id: &str,
        scheduled: &[f64],
    ) -> (Uuid, UnboundedReceiver<PlaybackEvent>) {
        if let Some(previous) = self.by_video.remove(video_id) {
            info!("Replacing session {} for {}", previous, video_id);
            self.end(previous).await;
        }

        let classifier = Classifier::new(self.config.clone(), scheduled);
        let (handle, events) = spawn_session(classifier);
        let id = handle.id();

        self.sessions.insert(id, handle);
        self.by_video.insert(video_id.to_string(), id);
        (id, events)
    }

    /// Deliver a signal to a running session.
    pub fn signal(&self, id: Uuid, signal: SessionSignal) -> Result<()> {
        let handle = self
            .sessions
            .get(&id)
            .ok_or_else(|| LearnBuddyError::Session(format!("No session with id {}", id)))?;

        if handle.send(signal) {
            Ok(())
        } else {
            Err(LearnBuddyError::Session(format!("Session {} has stopped", id)))
        }
    }

    /// Stop a session. Returns false when the id is unknown.
    pub async fn end(&mut self, id: Uuid) -> bool {
        let Some(handle) = self.sessions.remove(&id) else {
            return false;
        };
        self.by_video.retain(|_, v| *v != id);
        handle.shutdown().await;
        true
    }

    /// Stop every session.
    pub async fn shutdown_all(&mut self) {
        self.by_video.clear();
        for (_, handle) in self.sessions.drain() {
            handle.shutdown().await;
        }
    }

    pub fn session_for(&self, video_id: &str) -> Option<Uuid> {
        self.by_video.get(video_id).copied()
    }

    pub fn contains(&self, id: Uuid) -> bool {
        self.sessions.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
