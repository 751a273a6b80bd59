//! Simulate command: replay scripted playback telemetry.
//!
//! A script is a JSON document:
//!
//! ```json
//! {
//!   "scheduled_quizzes": [30.0],
//!   "steps": [
//!     { "at": 0, "action": "state", "state": "playing" },
//!     { "at": 1, "action": "sample", "time": 1.0 },
//!     { "at": 2, "action": "close" }
//!   ]
//! }
//! ```
//!
//! `at` is wall-clock seconds since the start of the session.

use super::{load_segments, question_generator};
use crate::cli::Output;
use crate::config::Settings;
use crate::playback::{Classifier, PlaybackEvent, PlaybackSample, PlayerState};
use crate::study::StudySession;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::time::{Duration, Instant};

/// A telemetry script.
#[derive(Debug, Deserialize)]
pub struct Script {
    /// Overrides `classifier.scheduled_quizzes` when present.
    #[serde(default)]
    pub scheduled_quizzes: Option<Vec<f64>>,
    /// Video duration reported with samples that do not carry one.
    #[serde(default)]
    pub duration: f64,
    pub steps: Vec<Step>,
}

#[derive(Debug, Deserialize)]
pub struct Step {
    pub at: f64,
    #[serde(flatten)]
    pub action: Action,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    /// A player position reading.
    Sample { time: f64, duration: Option<f64> },
    /// A player state transition.
    State { state: PlayerState },
    Visibility { hidden: bool },
    /// Dismiss the open overlay.
    Close,
    AcceptHelp,
    /// Answer the open quiz.
    Answer { response: String },
    /// Submit the open assessment; `null` leaves a question unanswered.
    Submit { selections: Vec<Option<usize>> },
}

/// One line of simulation output.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub at: f64,
    pub kind: &'static str,
    pub detail: String,
}

/// Run the simulate command.
pub async fn run_simulate(
    script_path: &str,
    input: Option<&str>,
    seed: Option<u64>,
    settings: Settings,
) -> Result<()> {
    let content = std::fs::read_to_string(script_path)
        .with_context(|| format!("Failed to read script {}", script_path))?;
    let script: Script = serde_json::from_str(&content).context("Invalid simulation script")?;

    let loaded = load_segments(input, &settings).await;
    Output::info(&format!(
        "Replaying {} steps against {} ({} segments)",
        script.steps.len(),
        loaded.origin,
        loaded.segments.len()
    ));

    let scheduled = script
        .scheduled_quizzes
        .clone()
        .unwrap_or_else(|| settings.classifier.scheduled_quizzes.clone());
    let mut classifier = Classifier::new(settings.classifier_config(), &scheduled);
    let mut session = StudySession::new(loaded.segments, question_generator(&settings, seed))
        .with_assessment_count(settings.quiz.assessment_count);

    for line in replay(&script, &mut classifier, &mut session) {
        Output::event(line.at, line.kind, &line.detail);
    }

    Ok(())
}

/// Feed the script through the classifier and the study session.
pub fn replay(script: &Script, classifier: &mut Classifier, session: &mut StudySession) -> Vec<Line> {
    let start = Instant::now();
    let at_instant = |at: f64| start + Duration::from_secs_f64(at.max(0.0));
    let mut lines = Vec::new();

    for step in &script.steps {
        let now = at_instant(step.at);

        // Reminders fire at their deadline, not at the next step.
        if let Some(deadline) = classifier.inactivity_deadline() {
            if deadline <= now {
                let at = deadline.duration_since(start).as_secs_f64();
                let events: Vec<PlaybackEvent> = classifier.poll_inactivity(deadline).into_iter().collect();
                dispatch(at, events, classifier, session, &mut lines);
            }
        }

        let events = match &step.action {
            Action::Sample { time, duration } => {
                classifier.tick(PlaybackSample::new(*time, duration.unwrap_or(script.duration)), now)
            }
            Action::State { state } => classifier.on_state_change(*state, now),
            Action::Visibility { hidden } => {
                classifier.on_visibility(*hidden, now);
                Vec::new()
            }
            Action::Close => {
                let result = session.close().map(|_| "closed".to_string());
                dismiss(step.at, "close", result, session, &mut lines);
                Vec::new()
            }
            Action::AcceptHelp => {
                record(step.at, "summary", session.accept_help(), &mut lines);
                Vec::new()
            }
            Action::Answer { response } => {
                let result = session
                    .answer_quiz(response)
                    .map(|ok| if ok { "correct" } else { "incorrect" }.to_string());
                dismiss(step.at, "answer", result, session, &mut lines);
                Vec::new()
            }
            Action::Submit { selections } => {
                let result = session
                    .complete_assessment(selections)
                    .map(|score| format!("score {}/100", score));
                dismiss(step.at, "submit", result, session, &mut lines);
                Vec::new()
            }
        };

        dispatch(step.at, events, classifier, session, &mut lines);
        classifier.set_suppressed(session.overlay_active());
    }

    lines
}

fn dispatch(
    at: f64,
    events: Vec<PlaybackEvent>,
    classifier: &mut Classifier,
    session: &mut StudySession,
    lines: &mut Vec<Line>,
) {
    for event in events {
        lines.push(Line {
            at,
            kind: "event",
            detail: event.to_string(),
        });
        if session.handle_event(&event) {
            lines.push(Line {
                at,
                kind: "overlay",
                detail: session.overlay().to_string(),
            });
        }
        classifier.set_suppressed(session.overlay_active());
    }
}

/// Record an action result; returns whether the action was accepted.
fn record(at: f64, kind: &'static str, result: crate::error::Result<String>, lines: &mut Vec<Line>) -> bool {
    let (accepted, detail) = match result {
        Ok(detail) => (true, detail),
        Err(e) => (false, format!("ignored: {}", e)),
    };
    lines.push(Line { at, kind, detail });
    accepted
}

/// Record an action that closes an overlay, and any held overlay it opened.
fn dismiss(
    at: f64,
    kind: &'static str,
    result: crate::error::Result<String>,
    session: &StudySession,
    lines: &mut Vec<Line>,
) {
    if record(at, kind, result, lines) && session.overlay_active() {
        lines.push(Line {
            at,
            kind: "overlay",
            detail: session.overlay().to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::playback::ClassifierConfig;
    use crate::quiz::QuestionGenerator;
    use crate::transcript::default_segments;

    fn run(json: &str) -> Vec<Line> {
        let script: Script = serde_json::from_str(json).unwrap();
        let mut classifier = Classifier::new(
            ClassifierConfig::default(),
            script.scheduled_quizzes.as_deref().unwrap_or_default(),
        );
        let mut session = StudySession::new(default_segments(), QuestionGenerator::seeded(5));
        replay(&script, &mut classifier, &mut session)
    }

    fn kinds(lines: &[Line]) -> Vec<&str> {
        lines.iter().map(|l| l.kind).collect()
    }

    #[test]
    fn test_struggle_opens_help_then_summary() {
        let lines = run(r#"{
            "duration": 68,
            "steps": [
                {"at": 0, "action": "sample", "time": 30},
                {"at": 1, "action": "sample", "time": 20},
                {"at": 2, "action": "sample", "time": 10},
                {"at": 3, "action": "sample", "time": 0},
                {"at": 4, "action": "accept_help"},
                {"at": 5, "action": "close"}
            ]
        }"#);

        assert_eq!(kinds(&lines), vec!["event", "overlay", "summary", "close"]);
        assert_eq!(lines[0].detail, "struggle [0.0s - 5.0s]");
        assert!(lines[1].detail.starts_with("help: Welcome to this lesson"));
    }

    #[test]
    fn test_scheduled_quiz_is_suppressed_while_overlay_open() {
        let lines = run(r#"{
            "scheduled_quizzes": [10, 20],
            "steps": [
                {"at": 0, "action": "sample", "time": 0},
                {"at": 1, "action": "sample", "time": 4},
                {"at": 2, "action": "sample", "time": 8},
                {"at": 3, "action": "sample", "time": 11},
                {"at": 4, "action": "sample", "time": 15},
                {"at": 5, "action": "sample", "time": 19},
                {"at": 6, "action": "sample", "time": 22},
                {"at": 7, "action": "answer", "response": "nothing"},
                {"at": 8, "action": "sample", "time": 23}
            ]
        }"#);

        let details: Vec<&str> = lines.iter().map(|l| l.detail.as_str()).collect();
        assert_eq!(details[0], "scheduled quiz @ 10.0s");
        assert!(details[1].starts_with("quiz: "));
        assert_eq!(lines[2].kind, "answer");
        assert_eq!(details[3], "scheduled quiz @ 20.0s");
        assert_eq!(lines[3].at, 8.0);
    }

    #[test]
    fn test_reminder_fires_at_deadline() {
        let lines = run(r#"{
            "steps": [
                {"at": 0, "action": "state", "state": "playing"},
                {"at": 300, "action": "close"}
            ]
        }"#);

        assert_eq!(lines[0].at, 120.0);
        assert_eq!(lines[0].detail, "inactivity reminder");
        assert_eq!(lines[1].kind, "overlay");
        assert_eq!(lines[2].detail, "closed");
    }

    #[test]
    fn test_invalid_actions_are_reported() {
        let lines = run(r#"{"steps": [{"at": 0, "action": "accept_help"}]}"#);
        assert_eq!(lines[0].detail, "ignored: Cannot accept help while overlay is idle");
    }

    #[test]
    fn test_ended_during_quiz_opens_assessment_on_close() {
        let lines = run(r#"{
            "scheduled_quizzes": [60],
            "duration": 68,
            "steps": [
                {"at": 0, "action": "sample", "time": 59},
                {"at": 1, "action": "sample", "time": 61},
                {"at": 2, "action": "state", "state": "ended"},
                {"at": 3, "action": "close"},
                {"at": 4, "action": "state", "state": "ended"}
            ]
        }"#);

        let details: Vec<&str> = lines.iter().map(|l| l.detail.as_str()).collect();
        assert_eq!(details[0], "scheduled quiz @ 60.0s");
        assert!(details[1].starts_with("quiz: "));
        assert_eq!(details[2], "ended");
        assert_eq!(details[3], "closed");
        assert_eq!(lines[4].kind, "overlay");
        assert_eq!(details[4], "assessment (5 questions)");
        assert_eq!(lines[4].at, 3.0);
        assert_eq!(lines.len(), 5);
    }

    #[test]
    fn test_ended_opens_assessment() {
        let lines = run(r#"{
            "steps": [
                {"at": 0, "action": "state", "state": "ended"},
                {"at": 1, "action": "submit", "selections": []}
            ]
        }"#);

        assert_eq!(lines[0].detail, "ended");
        assert_eq!(lines[1].detail, "assessment (5 questions)");
        assert_eq!(lines[2].detail, "score 0/100");
    }
}
