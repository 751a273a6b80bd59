//! Grading of free-text answers.
//!
//! With an OpenAI key configured answers are graded by a chat model;
//! otherwise a local heuristic scores term coverage and answer length.

mod heuristic;
mod openai;

pub use heuristic::HeuristicGrader;
pub use openai::{parse_grade, OpenAIGrader};

use crate::config::{Prompts, Settings};
use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

/// Feedback for answers shorter than [`SHORT_ANSWER_CHARS`].
pub const SHORT_FEEDBACK: &str = "Try elaborating more on key concepts and include examples.";

/// Feedback for answers of reasonable length.
pub const DETAILED_FEEDBACK: &str = "Good detail. Consider adding definitions and a concise summary.";

/// Trimmed answers shorter than this get [`SHORT_FEEDBACK`].
pub const SHORT_ANSWER_CHARS: usize = 30;

/// Score and feedback for one answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grade {
    /// 0 to 100.
    pub score: u8,
    pub feedback: String,
}

/// Feedback used when the grader has nothing better to say.
pub fn base_feedback(answer: &str) -> &'static str {
    if answer.trim().chars().count() < SHORT_ANSWER_CHARS {
        SHORT_FEEDBACK
    } else {
        DETAILED_FEEDBACK
    }
}

/// Grades a free-text answer. Never fails: problems are reported as a zero
/// score with the base feedback.
#[async_trait]
pub trait Grader: Send + Sync {
    async fn grade(&self, answer: &str, topic: Option<&str>) -> Grade;

    /// Short name for display.
    fn name(&self) -> &str;
}

/// Build the grader for `settings`.
///
/// Uses OpenAI when an API key is configured or present in the
/// environment, the heuristic grader otherwise.
pub fn create_grader(settings: &Settings) -> Result<Arc<dyn Grader>> {
    let grading = &settings.grading;

    match crate::openai::resolve_api_key(grading.api_key.as_deref()) {
        Some(key) => {
            let prompts = Prompts::load(
                settings.prompts.custom_dir.as_deref(),
                Some(&settings.prompts.variables),
            )?;
            info!("Grading with OpenAI ({})", grading.model);
            Ok(Arc::new(OpenAIGrader::new(&key, &grading.model, grading.timeout(), prompts)?))
        }
        None => {
            info!("No OpenAI key configured, using heuristic grading");
            Ok(Arc::new(HeuristicGrader::from_settings(grading)?))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_feedback() {
        assert_eq!(base_feedback("   short   "), SHORT_FEEDBACK);
        assert_eq!(
            base_feedback("Binary search halves the range every single step."),
            DETAILED_FEEDBACK
        );
    }

    #[test]
    fn test_create_grader_with_configured_key() {
        let mut settings = Settings::default();
        settings.grading.api_key = Some("sk-test".to_string());
        let grader = create_grader(&settings).unwrap();
        assert_eq!(grader.name(), "openai");
    }

    #[test]
    fn test_create_grader_rejects_bad_pattern_without_key() {
        if std::env::var("OPENAI_API_KEY").is_ok_and(|k| !k.trim().is_empty()) {
            return;
        }
        let mut settings = Settings::default();
        assert_eq!(create_grader(&settings).unwrap().name(), "heuristic");

        settings.grading.coverage_terms = vec!["(unclosed".to_string()];
        assert!(create_grader(&settings).is_err());
    }
}
