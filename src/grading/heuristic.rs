//! Offline grading by key-term coverage and answer length.

use super::{base_feedback, Grade, Grader};
use crate::config::GradingSettings;
use crate::error::{LearnBuddyError, Result};
use async_trait::async_trait;
use regex::Regex;
use tracing::debug;

/// Coverage points per matched term.
const POINTS_PER_TERM: u32 = 40;

/// Characters per length point.
const CHARS_PER_POINT: f64 = 6.0;

/// Scores an answer without any network call.
///
/// coverage = min(100, 40 per term match); length = min(100, chars / 6);
/// score = coverage_weight * coverage + length_weight * length, rounded.
#[derive(Debug, Clone)]
pub struct HeuristicGrader {
    terms: Option<Regex>,
    coverage_weight: f64,
    length_weight: f64,
}

impl HeuristicGrader {
    /// Build from regex term patterns, matched case-insensitively as whole words.
    pub fn new(terms: &[String], coverage_weight: f64, length_weight: f64) -> Result<Self> {
        let terms = if terms.is_empty() {
            None
        } else {
            let pattern = format!(r"(?i)\b(?:{})\b", terms.join("|"));
            let regex = Regex::new(&pattern)
                .map_err(|e| LearnBuddyError::Config(format!("Invalid coverage term pattern: {}", e)))?;
            Some(regex)
        };

        Ok(Self {
            terms,
            coverage_weight,
            length_weight,
        })
    }

    pub fn from_settings(settings: &GradingSettings) -> Result<Self> {
        Self::new(
            &settings.coverage_terms,
            settings.coverage_weight,
            settings.length_weight,
        )
    }

    /// Count of term matches in `answer`.
    pub fn term_matches(&self, answer: &str) -> usize {
        self.terms.as_ref().map_or(0, |re| re.find_iter(answer).count())
    }

    pub fn score(&self, answer: &str) -> u8 {
        let matches = u32::try_from(self.term_matches(answer)).unwrap_or(u32::MAX);
        let coverage = f64::from(matches.saturating_mul(POINTS_PER_TERM).min(100));
        let length = (answer.chars().count() as f64 / CHARS_PER_POINT).round().min(100.0);

        let score = (self.coverage_weight * coverage + self.length_weight * length).round();
        debug!(matches, coverage, length, score, "Heuristic grade");
        score.clamp(0.0, 100.0) as u8
    }
}

#[async_trait]
impl Grader for HeuristicGrader {
    async fn grade(&self, answer: &str, _topic: Option<&str>) -> Grade {
        Grade {
            score: self.score(answer),
            feedback: base_feedback(answer).to_string(),
        }
    }

    fn name(&self) -> &str {
        "heuristic"
    }
}
