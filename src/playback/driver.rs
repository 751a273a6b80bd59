//! Async session driver: polls the player and feeds the classifier.
//!
//! Each session runs on its own tokio task. The sampling interval and the
//! inactivity timer live inside that task, so shutting the session down
//! cancels both.

use super::{Classifier, PlaybackEvent, PlaybackSample, Player, PlayerState};
use std::sync::Arc;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info, instrument};
use uuid::Uuid;

/// Notifications delivered to a running session.
pub enum SessionSignal {
    /// The player finished loading; sampling starts from here.
    PlayerReady(Arc<dyn Player>),
    /// The player reported a state transition.
    StateChanged(PlayerState),
    /// The host page was hidden or shown.
    Visibility { hidden: bool },
    /// An overlay opened (true) or closed (false).
    Suppress(bool),
}

impl std::fmt::Debug for SessionSignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionSignal::PlayerReady(_) => write!(f, "PlayerReady"),
            SessionSignal::StateChanged(state) => write!(f, "StateChanged({})", state),
            SessionSignal::Visibility { hidden } => write!(f, "Visibility {{ hidden: {} }}", hidden),
            SessionSignal::Suppress(on) => write!(f, "Suppress({})", on),
        }
    }
}

/// Handle to a running session task.
#[derive(Debug)]
pub struct SessionHandle {
    id: Uuid,
    signals: UnboundedSender<SessionSignal>,
    task: JoinHandle<()>,
}

impl SessionHandle {
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Deliver a signal. Returns false when the session has already stopped.
    pub fn send(&self, signal: SessionSignal) -> bool {
        self.signals.send(signal).is_ok()
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Stop the session and wait for its task to finish.
    pub async fn shutdown(self) {
        drop(self.signals);
        if let Err(e) = self.task.await {
            debug!("Session task ended abnormally: {}", e);
        }
    }
}

/// Start a session task around `classifier`.
///
/// Events are delivered on the returned receiver. Sampling is a no-op until
/// a [`SessionSignal::PlayerReady`] arrives. The task stops when the handle
/// is shut down (or dropped) or when the event receiver is dropped.
pub fn spawn_session(classifier: Classifier) -> (SessionHandle, UnboundedReceiver<PlaybackEvent>) {
    let id = Uuid::new_v4();
    let (signal_tx, signal_rx) = mpsc::unbounded_channel();
    let (event_tx, event_rx) = mpsc::unbounded_channel();

    let task = tokio::spawn(run_session(id, classifier, signal_rx, event_tx));

    (
        SessionHandle {
            id,
            signals: signal_tx,
            task,
        },
        event_rx,
    )
}

#[instrument(skip_all, fields(session = %id))]
async fn run_session(
    id: Uuid,
    mut classifier: Classifier,
    mut signals: UnboundedReceiver<SessionSignal>,
    events: UnboundedSender<PlaybackEvent>,
) {
    info!("Session started");
    let mut player: Option<Arc<dyn Player>> = None;
    let mut ticker = tokio::time::interval(classifier.config().sample_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        let deadline = classifier.inactivity_deadline().map(Instant::from_std);

        let emitted = tokio::select! {
            _ = ticker.tick() => match &player {
                Some(p) => classifier.tick(PlaybackSample::new(p.current_time(), p.duration()), now()),
                None => Vec::new(),
            },
            signal = signals.recv() => match signal {
                Some(signal) => apply_signal(&mut classifier, &mut player, signal),
                None => break,
            },
            _ = tokio::time::sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                classifier.poll_inactivity(now()).into_iter().collect()
            }
        };

        for event in emitted {
            debug!("Emitting {}", event);
            if events.send(event).is_err() {
                debug!("Event receiver dropped");
                info!("Session stopped");
                return;
            }
        }
    }

    info!("Session stopped");
}

fn apply_signal(
    classifier: &mut Classifier,
    player: &mut Option<Arc<dyn Player>>,
    signal: SessionSignal,
) -> Vec<PlaybackEvent> {
    debug!("Signal {:?}", signal);
    match signal {
        SessionSignal::PlayerReady(p) => {
            classifier.set_position(p.current_time());
            classifier.arm_inactivity(now());
            *player = Some(p);
            Vec::new()
        }
        SessionSignal::StateChanged(state) => classifier.on_state_change(state, now()),
        SessionSignal::Visibility { hidden } => {
            classifier.on_visibility(hidden, now());
            Vec::new()
        }
        SessionSignal::Suppress(on) => {
            classifier.set_suppressed(on);
            if on {
                if let Some(p) = player {
                    p.pause();
                }
            }
            Vec::new()
        }
    }
}

/// Current time on the tokio clock, so paused-time tests stay deterministic.
fn now() -> std::time::Instant {
    Instant::now().into_std()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::playback::ClassifierConfig;
    use std::sync::Mutex;
    use std::time::Duration;

    #[derive(Default)]
    struct FakePlayer {
        time: Mutex<f64>,
        paused: Mutex<bool>,
    }

    impl FakePlayer {
        fn set_time(&self, t: f64) {
            *self.time.lock().unwrap() = t;
        }
    }

    impl Player for FakePlayer {
        fn current_time(&self) -> f64 {
            *self.time.lock().unwrap()
        }
        fn duration(&self) -> f64 {
            600.0
        }
        fn seek_to(&self, seconds: f64) {
            self.set_time(seconds);
        }
        fn play(&self) {
            *self.paused.lock().unwrap() = false;
        }
        fn pause(&self) {
            *self.paused.lock().unwrap() = true;
        }
    }

    fn classifier() -> Classifier {
        Classifier::new(ClassifierConfig::default(), &[])
    }

    #[tokio::test(start_paused = true)]
    async fn test_reminder_after_inactivity() {
        let (handle, mut events) = spawn_session(classifier());
        let player = Arc::new(FakePlayer::default());
        let start = Instant::now();

        handle.send(SessionSignal::PlayerReady(player.clone()));
        handle.send(SessionSignal::StateChanged(PlayerState::Playing));

        let event = events.recv().await;
        assert_eq!(event, Some(PlaybackEvent::Reminder));
        assert!(start.elapsed() >= Duration::from_secs(120));

        handle.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_rewinds_produce_struggle() {
        let (handle, mut events) = spawn_session(classifier());
        let player = Arc::new(FakePlayer::default());
        player.set_time(30.0);
        handle.send(SessionSignal::PlayerReady(player.clone()));

        tokio::time::sleep(Duration::from_millis(500)).await;
        for t in [20.0, 10.0, 0.0] {
            player.set_time(t);
            tokio::time::sleep(Duration::from_secs(1)).await;
        }

        let event = events.recv().await;
        assert_eq!(event, Some(PlaybackEvent::Struggle { start: 0.0, end: 5.0 }));

        handle.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_player_means_no_events() {
        let (handle, mut events) = spawn_session(classifier());

        tokio::time::sleep(Duration::from_secs(300)).await;
        assert!(events.try_recv().is_err());

        handle.shutdown().await;
        assert_eq!(events.recv().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_suppress_pauses_player() {
        let (handle, _events) = spawn_session(classifier());
        let player = Arc::new(FakePlayer::default());
        handle.send(SessionSignal::PlayerReady(player.clone()));
        handle.send(SessionSignal::Suppress(true));

        tokio::time::sleep(Duration::from_millis(10)).await;
        assert!(*player.paused.lock().unwrap());

        handle.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_ended_is_forwarded() {
        let (handle, mut events) = spawn_session(classifier());
        handle.send(SessionSignal::StateChanged(PlayerState::Ended));
        handle.send(SessionSignal::StateChanged(PlayerState::Ended));

        assert_eq!(events.recv().await, Some(PlaybackEvent::Ended));
        handle.shutdown().await;
        assert_eq!(events.recv().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropped_receiver_stops_task() {
        let (handle, events) = spawn_session(classifier());
        drop(events);
        handle.send(SessionSignal::StateChanged(PlayerState::Ended));

        tokio::time::sleep(Duration::from_millis(10)).await;
        assert!(handle.is_finished());
        assert!(!handle.send(SessionSignal::Suppress(false)));
    }
}
