//! Per-session playback classifier.

use super::{PlaybackEvent, PlaybackSample, PlayerState};
use std::collections::{HashMap, VecDeque};
use std::time::{Duration, Instant};
use tracing::debug;

/// Tunable thresholds for the classifier.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifierConfig {
    /// How often the player is polled.
    pub sample_interval: Duration,
    /// Width of an interaction bucket in playback seconds.
    pub bucket_seconds: f64,
    /// A backwards jump larger than this between samples is a rewind.
    pub rewind_threshold: f64,
    /// Any other jump larger than this between samples is a seek.
    pub seek_threshold: f64,
    /// Rewinds older than this no longer count toward a struggle.
    pub struggle_window: Duration,
    /// Rewinds inside the window needed for a struggle event.
    pub struggle_rewinds: usize,
    /// Pauses plus rewinds in one bucket needed for a quiz trigger.
    pub quiz_interaction_threshold: u32,
    /// Time without a `playing` transition or the page becoming visible
    /// before a reminder fires.
    pub inactivity_timeout: Duration,
    /// Seconds of help context before the position of a struggle.
    pub struggle_lookbehind: f64,
    /// Seconds of help context after the position of a struggle.
    pub struggle_lookahead: f64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            sample_interval: Duration::from_secs(1),
            bucket_seconds: 10.0,
            rewind_threshold: 2.0,
            seek_threshold: 5.0,
            struggle_window: Duration::from_secs(120),
            struggle_rewinds: 3,
            quiz_interaction_threshold: 4,
            inactivity_timeout: Duration::from_secs(120),
            struggle_lookbehind: 10.0,
            struggle_lookahead: 5.0,
        }
    }
}

/// Interaction counts for one bucket of playback time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BucketCounters {
    pub pauses: u32,
    pub rewinds: u32,
    pub seeks: u32,
}

#[derive(Debug, Clone)]
struct ScheduledQuiz {
    at: f64,
    fired: bool,
}

/// Classifier state for one video session.
///
/// Feed it samples with [`Classifier::tick`] and player transitions with
/// [`Classifier::on_state_change`]; each call returns the events it produced.
/// While suppressed (an overlay is open) triggers are consumed silently,
/// scheduled quizzes wait, and pauses are not counted.
#[derive(Debug, Clone)]
pub struct Classifier {
    config: ClassifierConfig,
    buckets: HashMap<u64, BucketCounters>,
    rewinds: VecDeque<Instant>,
    last_time: f64,
    scheduled: Vec<ScheduledQuiz>,
    ended: bool,
    inactivity_deadline: Option<Instant>,
    suppressed: bool,
}

impl Classifier {
    /// Create a classifier with the given scheduled quiz timestamps.
    pub fn new(config: ClassifierConfig, scheduled: &[f64]) -> Self {
        let mut scheduled: Vec<ScheduledQuiz> = scheduled
            .iter()
            .filter(|at| at.is_finite())
            .map(|&at| ScheduledQuiz { at, fired: false })
            .collect();
        scheduled.sort_by(|a, b| a.at.total_cmp(&b.at));
        scheduled.dedup_by(|a, b| a.at == b.at);

        Self {
            config,
            buckets: HashMap::new(),
            rewinds: VecDeque::new(),
            last_time: 0.0,
            scheduled,
            ended: false,
            inactivity_deadline: None,
            suppressed: false,
        }
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Clear all session state for a new video, keeping the schedule.
    pub fn reset(&mut self) {
        self.buckets.clear();
        self.rewinds.clear();
        self.last_time = 0.0;
        self.scheduled.iter_mut().for_each(|q| q.fired = false);
        self.ended = false;
        self.inactivity_deadline = None;
        self.suppressed = false;
    }

    /// Last observed playback position.
    pub fn last_time(&self) -> f64 {
        self.last_time
    }

    /// Record a position without classifying it (player just became ready).
    pub fn set_position(&mut self, time: f64) {
        self.last_time = time;
    }

    /// Counters for the bucket with the given index.
    pub fn bucket(&self, index: u64) -> BucketCounters {
        self.buckets.get(&index).copied().unwrap_or_default()
    }

    /// Index of the bucket containing `time`.
    pub fn bucket_index(&self, time: f64) -> u64 {
        (time.max(0.0) / self.config.bucket_seconds).floor() as u64
    }

    pub fn is_suppressed(&self) -> bool {
        self.suppressed
    }

    /// Suppress or re-enable triggers while an overlay is shown.
    pub fn set_suppressed(&mut self, suppressed: bool) {
        self.suppressed = suppressed;
    }

    /// Number of rewinds currently inside the struggle window.
    pub fn recent_rewinds(&self) -> usize {
        self.rewinds.len()
    }

    /// When the pending inactivity reminder is due, if armed.
    pub fn inactivity_deadline(&self) -> Option<Instant> {
        self.inactivity_deadline
    }

    /// (Re)start the single-shot inactivity timer.
    pub fn arm_inactivity(&mut self, now: Instant) {
        self.inactivity_deadline = Some(now + self.config.inactivity_timeout);
    }

    /// Classify one position sample.
    pub fn tick(&mut self, sample: PlaybackSample, now: Instant) -> Vec<PlaybackEvent> {
        let mut events = Vec::new();
        let t = sample.time;
        let delta = t - self.last_time;
        let index = self.bucket_index(t);

        if delta < -self.config.rewind_threshold {
            self.buckets.entry(index).or_default().rewinds += 1;
            if let Some(event) = self.record_rewind(t, now) {
                events.push(event);
            }
        } else if delta.abs() > self.config.seek_threshold {
            self.buckets.entry(index).or_default().seeks += 1;
        }

        if let Some(event) = self.check_bucket(index) {
            events.push(event);
        }

        self.last_time = t;

        if !self.suppressed {
            for quiz in self.scheduled.iter_mut().filter(|q| !q.fired && q.at <= t) {
                quiz.fired = true;
                events.push(PlaybackEvent::ScheduledQuiz { at: quiz.at });
            }
        }

        events.extend(self.poll_inactivity(now));
        events
    }

    /// Handle a discrete player state transition.
    pub fn on_state_change(&mut self, state: PlayerState, now: Instant) -> Vec<PlaybackEvent> {
        match state {
            PlayerState::Paused if !self.suppressed => {
                let index = self.bucket_index(self.last_time);
                self.buckets.entry(index).or_default().pauses += 1;
                Vec::new()
            }
            PlayerState::Ended if !self.ended => {
                self.ended = true;
                vec![PlaybackEvent::Ended]
            }
            PlayerState::Playing => {
                self.arm_inactivity(now);
                Vec::new()
            }
            _ => Vec::new(),
        }
    }

    /// Handle the host page becoming hidden or visible.
    pub fn on_visibility(&mut self, hidden: bool, now: Instant) {
        if !hidden {
            self.arm_inactivity(now);
        }
    }

    /// Fire the inactivity reminder if its deadline has passed.
    pub fn poll_inactivity(&mut self, now: Instant) -> Option<PlaybackEvent> {
        match self.inactivity_deadline {
            Some(deadline) if deadline <= now => {
                self.inactivity_deadline = None;
                (!self.suppressed).then_some(PlaybackEvent::Reminder)
            }
            _ => None,
        }
    }

    /// Add a rewind to the window and report a struggle once enough pile up.
    fn record_rewind(&mut self, t: f64, now: Instant) -> Option<PlaybackEvent> {
        let window = self.config.struggle_window;
        self.rewinds.push_back(now);
        self.rewinds.retain(|at| now.saturating_duration_since(*at) < window);

        if self.rewinds.len() < self.config.struggle_rewinds {
            return None;
        }

        self.rewinds.clear();
        let event = PlaybackEvent::Struggle {
            start: (t - self.config.struggle_lookbehind).max(0.0),
            end: t + self.config.struggle_lookahead,
        };
        debug!(suppressed = self.suppressed, "Struggle detected at {:.1}s", t);
        (!self.suppressed).then_some(event)
    }

    /// Fire a quiz trigger for a busy bucket and reset its counters.
    fn check_bucket(&mut self, index: u64) -> Option<PlaybackEvent> {
        let counters = self.buckets.get(&index)?;
        if counters.pauses + counters.rewinds < self.config.quiz_interaction_threshold {
            return None;
        }

        self.buckets.insert(index, BucketCounters::default());
        let at = index as f64 * self.config.bucket_seconds;
        debug!(suppressed = self.suppressed, "Bucket at {:.0}s reached interaction threshold", at);
        (!self.suppressed).then_some(PlaybackEvent::QuizTrigger { at })
    }
}
