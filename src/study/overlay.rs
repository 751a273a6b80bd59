//! The single overlay shown on top of the player.

use crate::quiz::Question;
use serde::Serialize;

/// Text shown when the learner has been inactive.
pub const INACTIVITY_REMINDER: &str = "It seems you are inactive. Remember to stay focused.";

/// What the learner currently sees over the video.
///
/// Only one overlay can be open at a time; `Idle` means none.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "overlay", rename_all = "snake_case")]
pub enum Overlay {
    Idle,
    /// A single question raised by a trigger or a scheduled quiz.
    Quiz { question: Question },
    /// Offer of help for a section the learner keeps rewinding.
    Help { text: String },
    /// Condensed version of the help text.
    Summary { text: String },
    Reminder { text: String },
    /// End-of-video assessment.
    Assessment { questions: Vec<Question> },
}

impl Overlay {
    pub fn name(&self) -> &'static str {
        match self {
            Overlay::Idle => "idle",
            Overlay::Quiz { .. } => "quiz",
            Overlay::Help { .. } => "help",
            Overlay::Summary { .. } => "summary",
            Overlay::Reminder { .. } => "reminder",
            Overlay::Assessment { .. } => "assessment",
        }
    }

    pub fn is_active(&self) -> bool {
        !matches!(self, Overlay::Idle)
    }
}

impl std::fmt::Display for Overlay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Overlay::Idle => write!(f, "idle"),
            Overlay::Quiz { question } => write!(f, "quiz: {}", question.prompt()),
            Overlay::Help { text } | Overlay::Summary { text } | Overlay::Reminder { text } => {
                write!(f, "{}: {}", self.name(), text)
            }
            Overlay::Assessment { questions } => write!(f, "assessment ({} questions)", questions.len()),
        }
    }
}
