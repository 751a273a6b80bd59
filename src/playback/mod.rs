//! Playback telemetry classification.
//!
//! A [`Classifier`] turns 1 Hz position samples and discrete player state
//! changes into behavioral events (rewind struggles, busy-bucket quiz
//! triggers, scheduled quizzes, inactivity reminders, end of video). The
//! [`driver`] runs one classifier per video session on a tokio task and the
//! [`SessionManager`] keeps track of running sessions by id.

mod classifier;
pub mod driver;
mod manager;

pub use classifier::{BucketCounters, Classifier, ClassifierConfig};
pub use driver::{spawn_session, SessionHandle, SessionSignal};
pub use manager::SessionManager;

use serde::{Deserialize, Serialize};

/// Narrow capability surface of an embedded video player.
pub trait Player: Send + Sync {
    /// Current playback position in seconds.
    fn current_time(&self) -> f64;
    /// Total duration in seconds, 0 when unknown.
    fn duration(&self) -> f64;
    fn seek_to(&self, seconds: f64);
    fn play(&self);
    fn pause(&self);
}

/// Discrete player states reported by the host player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerState {
    Unstarted,
    Ended,
    Playing,
    Paused,
    Buffering,
    Cued,
}

impl PlayerState {
    /// Map an IFrame-style numeric state code. Unknown codes read as unstarted.
    pub fn from_code(code: i32) -> Self {
        match code {
            0 => PlayerState::Ended,
            1 => PlayerState::Playing,
            2 => PlayerState::Paused,
            3 => PlayerState::Buffering,
            5 => PlayerState::Cued,
            _ => PlayerState::Unstarted,
        }
    }
}

impl std::str::FromStr for PlayerState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "unstarted" => Ok(PlayerState::Unstarted),
            "ended" => Ok(PlayerState::Ended),
            "playing" => Ok(PlayerState::Playing),
            "paused" => Ok(PlayerState::Paused),
            "buffering" => Ok(PlayerState::Buffering),
            "cued" => Ok(PlayerState::Cued),
            _ => Err(format!("Unknown player state: {}", s)),
        }
    }
}

impl std::fmt::Display for PlayerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PlayerState::Unstarted => "unstarted",
            PlayerState::Ended => "ended",
            PlayerState::Playing => "playing",
            PlayerState::Paused => "paused",
            PlayerState::Buffering => "buffering",
            PlayerState::Cued => "cued",
        };
        write!(f, "{}", name)
    }
}

/// One polled position reading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlaybackSample {
    /// Position in seconds.
    pub time: f64,
    /// Duration in seconds.
    pub duration: f64,
}

impl PlaybackSample {
    pub fn new(time: f64, duration: f64) -> Self {
        Self { time, duration }
    }

    /// Watched percentage, treating unknown durations as one second.
    pub fn progress_percent(&self) -> f64 {
        (self.time / self.duration.max(1.0) * 100.0).clamp(0.0, 100.0)
    }
}

/// Behavioral events emitted by the classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum PlaybackEvent {
    /// Repeated rewinds within the struggle window; offers help for the range.
    Struggle { start: f64, end: f64 },
    /// A bucket accumulated enough pauses and rewinds; `at` is the bucket start.
    QuizTrigger { at: f64 },
    /// An author-scheduled quiz timestamp was reached.
    ScheduledQuiz { at: f64 },
    /// No playback activity for the inactivity timeout.
    Reminder,
    /// The video finished.
    Ended,
}

impl std::fmt::Display for PlaybackEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlaybackEvent::Struggle { start, end } => write!(f, "struggle [{:.1}s - {:.1}s]", start, end),
            PlaybackEvent::QuizTrigger { at } => write!(f, "quiz trigger @ {:.1}s", at),
            PlaybackEvent::ScheduledQuiz { at } => write!(f, "scheduled quiz @ {:.1}s", at),
            PlaybackEvent::Reminder => write!(f, "inactivity reminder"),
            PlaybackEvent::Ended => write!(f, "ended"),
        }
    }
}
