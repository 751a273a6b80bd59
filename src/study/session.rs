//! Study session coordinator.
//!
//! Routes classifier events through the segment locator into quiz, help,
//! reminder and assessment overlays.

use super::overlay::{Overlay, INACTIVITY_REMINDER};
use crate::error::{LearnBuddyError, Result};
use crate::nlp::{summarize, DEFAULT_SUMMARY_SENTENCES};
use crate::playback::PlaybackEvent;
use crate::quiz::{score_mcq, QuestionGenerator, DEFAULT_ASSESSMENT_COUNT};
use crate::transcript::{locate, TranscriptSegment};
use tracing::{debug, info};

/// Overlay state for one video.
pub struct StudySession {
    segments: Vec<TranscriptSegment>,
    overlay: Overlay,
    generator: QuestionGenerator,
    assessment_count: usize,
    /// The video ended while another overlay was open.
    assessment_pending: bool,
}

impl StudySession {
    pub fn new(segments: Vec<TranscriptSegment>, generator: QuestionGenerator) -> Self {
        Self {
            segments,
            overlay: Overlay::Idle,
            generator,
            assessment_count: DEFAULT_ASSESSMENT_COUNT,
            assessment_pending: false,
        }
    }

    pub fn with_assessment_count(mut self, count: usize) -> Self {
        self.assessment_count = count;
        self
    }

    pub fn segments(&self) -> &[TranscriptSegment] {
        &self.segments
    }

    pub fn overlay(&self) -> &Overlay {
        &self.overlay
    }

    /// Whether an overlay is open. Callers mirror this into the
    /// classifier's suppression flag.
    pub fn overlay_active(&self) -> bool {
        self.overlay.is_active()
    }

    /// Whether an assessment will open once the current overlay closes.
    pub fn assessment_pending(&self) -> bool {
        self.assessment_pending
    }

    /// Open the overlay for `event`.
    ///
    /// Returns false when the event was dropped because an overlay is
    /// already open or there was nothing to show. `Ended` is never dropped:
    /// while another overlay is open it is held until that overlay closes.
    pub fn handle_event(&mut self, event: &PlaybackEvent) -> bool {
        if self.overlay_active() {
            if matches!(event, PlaybackEvent::Ended) && !matches!(self.overlay, Overlay::Assessment { .. }) {
                debug!("Holding assessment until {} closes", self.overlay.name());
                self.assessment_pending = true;
            } else {
                debug!("Dropping {} while {} is open", event, self.overlay.name());
            }
            return false;
        }

        let next = match event {
            PlaybackEvent::QuizTrigger { at } | PlaybackEvent::ScheduledQuiz { at } => {
                locate(&self.segments, *at).map(|seg| Overlay::Quiz {
                    question: self.generator.question(&seg.text),
                })
            }
            PlaybackEvent::Struggle { start, .. } => {
                locate(&self.segments, *start).map(|seg| Overlay::Help {
                    text: seg.text.clone(),
                })
            }
            PlaybackEvent::Reminder => Some(Overlay::Reminder {
                text: INACTIVITY_REMINDER.to_string(),
            }),
            PlaybackEvent::Ended => {
                let questions = self.generator.assessment(&self.segments, self.assessment_count);
                (!questions.is_empty()).then_some(Overlay::Assessment { questions })
            }
        };

        match next {
            Some(overlay) => {
                info!("Opening {} overlay for {}", overlay.name(), event);
                self.overlay = overlay;
                true
            }
            None => {
                debug!("Nothing to show for {}", event);
                false
            }
        }
    }

    /// Turn the open help offer into a summary and return its text.
    pub fn accept_help(&mut self) -> Result<String> {
        let Overlay::Help { text } = &self.overlay else {
            return Err(self.invalid("accept help"));
        };
        let summary = summarize(text, DEFAULT_SUMMARY_SENTENCES);
        self.overlay = Overlay::Summary {
            text: summary.clone(),
        };
        Ok(summary)
    }

    /// Check a response to the open quiz and close it.
    pub fn answer_quiz(&mut self, response: &str) -> Result<bool> {
        let Overlay::Quiz { question } = &self.overlay else {
            return Err(self.invalid("answer a quiz"));
        };
        let correct = question.is_correct_response(response);
        self.return_to_idle();
        Ok(correct)
    }

    /// Score the open assessment and close it.
    pub fn complete_assessment(&mut self, selections: &[Option<usize>]) -> Result<u8> {
        let Overlay::Assessment { questions } = &self.overlay else {
            return Err(self.invalid("complete an assessment"));
        };
        let score = score_mcq(questions, selections);
        self.return_to_idle();
        Ok(score)
    }

    /// Dismiss the open overlay.
    pub fn close(&mut self) -> Result<()> {
        if !self.overlay_active() {
            return Err(self.invalid("close"));
        }
        debug!("Closing {} overlay", self.overlay.name());
        self.return_to_idle();
        Ok(())
    }

    /// Go idle, or straight into a held assessment.
    fn return_to_idle(&mut self) {
        self.overlay = Overlay::Idle;
        if std::mem::take(&mut self.assessment_pending) {
            self.handle_event(&PlaybackEvent::Ended);
        }
    }

    fn invalid(&self, action: &str) -> LearnBuddyError {
        LearnBuddyError::InvalidTransition {
            state: self.overlay.name().to_string(),
            action: action.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::Question;
    use crate::transcript::default_segments;

    fn session() -> StudySession {
        StudySession::new(default_segments(), QuestionGenerator::seeded(11))
    }

    #[test]
    fn test_quiz_trigger_opens_quiz_for_located_segment() {
        let mut s = session();
        assert!(s.handle_event(&PlaybackEvent::QuizTrigger { at: 20.0 }));
        assert!(s.overlay_active());

        let Overlay::Quiz { question } = s.overlay().clone() else {
            panic!("expected quiz");
        };
        let segment_text = &s.segments()[2].text;
        let stem = question.prompt().lines().next().unwrap_or_default();
        assert!(!stem.is_empty());
        assert!(segment_text.contains(stem));

        let answer = question.correct_answer().to_string();
        assert!(s.answer_quiz(&answer).unwrap());
        assert_eq!(s.overlay(), &Overlay::Idle);
    }

    #[test]
    fn test_triggers_dropped_while_open() {
        let mut s = session();
        assert!(s.handle_event(&PlaybackEvent::Reminder));
        assert!(!s.handle_event(&PlaybackEvent::ScheduledQuiz { at: 5.0 }));
        assert!(!s.handle_event(&PlaybackEvent::Struggle { start: 0.0, end: 5.0 }));
        assert_eq!(
            s.overlay(),
            &Overlay::Reminder {
                text: INACTIVITY_REMINDER.to_string()
            }
        );
        s.close().unwrap();
        assert!(!s.overlay_active());
    }

    #[test]
    fn test_help_then_summary() {
        let mut s = session();
        assert!(s.handle_event(&PlaybackEvent::Struggle { start: 8.0, end: 23.0 }));
        assert_eq!(
            s.overlay(),
            &Overlay::Help {
                text: s.segments()[1].text.clone()
            }
        );

        let summary = s.accept_help().unwrap();
        assert!(!summary.is_empty());
        assert!(matches!(s.overlay(), Overlay::Summary { .. }));

        let err = s.accept_help().unwrap_err();
        assert!(matches!(err, LearnBuddyError::InvalidTransition { .. }));
        s.close().unwrap();
    }

    #[test]
    fn test_ended_opens_assessment_and_scores() {
        let mut s = session().with_assessment_count(3);
        assert!(s.handle_event(&PlaybackEvent::Ended));

        let Overlay::Assessment { questions } = s.overlay().clone() else {
            panic!("expected assessment");
        };
        assert_eq!(questions.len(), 3);

        let selections: Vec<Option<usize>> = questions
            .iter()
            .map(|q| match q {
                Question::Mcq { correct_index, .. } => Some(*correct_index),
                Question::FillIn { .. } => None,
            })
            .collect();
        let expected = if questions.iter().any(Question::is_mcq) { 100 } else { 0 };
        assert_eq!(s.complete_assessment(&selections).unwrap(), expected);
        assert!(!s.overlay_active());
    }

    #[test]
    fn test_ended_during_quiz_opens_assessment_after_answer() {
        let mut s = session().with_assessment_count(2);
        assert!(s.handle_event(&PlaybackEvent::ScheduledQuiz { at: 60.0 }));
        assert!(!s.handle_event(&PlaybackEvent::Ended));
        assert!(s.assessment_pending());
        assert!(matches!(s.overlay(), Overlay::Quiz { .. }));

        s.answer_quiz("1").unwrap();
        assert!(!s.assessment_pending());
        let Overlay::Assessment { questions } = s.overlay() else {
            panic!("expected assessment, got {:?}", s.overlay());
        };
        assert_eq!(questions.len(), 2);

        s.complete_assessment(&[]).unwrap();
        assert_eq!(s.overlay(), &Overlay::Idle);
    }

    #[test]
    fn test_ended_during_help_waits_through_summary() {
        let mut s = session();
        assert!(s.handle_event(&PlaybackEvent::Struggle { start: 8.0, end: 23.0 }));
        assert!(!s.handle_event(&PlaybackEvent::Ended));

        s.accept_help().unwrap();
        assert!(matches!(s.overlay(), Overlay::Summary { .. }));

        s.close().unwrap();
        assert!(matches!(s.overlay(), Overlay::Assessment { .. }));
    }

    #[test]
    fn test_empty_transcript_shows_nothing() {
        let mut s = StudySession::new(Vec::new(), QuestionGenerator::seeded(1));
        assert!(!s.handle_event(&PlaybackEvent::QuizTrigger { at: 3.0 }));
        assert!(!s.handle_event(&PlaybackEvent::Ended));
        assert!(s.handle_event(&PlaybackEvent::Reminder));

        // A held assessment with nothing to ask leaves the session idle.
        assert!(!s.handle_event(&PlaybackEvent::Ended));
        s.close().unwrap();
        assert_eq!(s.overlay(), &Overlay::Idle);
    }

    #[test]
    fn test_invalid_transitions() {
        let mut s = session();
        let err = s.close().unwrap_err();
        assert_eq!(err.to_string(), "Cannot close while overlay is idle");
        assert!(s.answer_quiz("1").is_err());
        assert!(s.complete_assessment(&[]).is_err());

        s.handle_event(&PlaybackEvent::Reminder);
        let err = s.answer_quiz("1").unwrap_err();
        assert_eq!(err.to_string(), "Cannot answer a quiz while overlay is reminder");
    }
}
