//! Quiz question model.

use serde::{Deserialize, Serialize};

/// A question shown in a quiz or assessment overlay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Question {
    /// Multiple choice with exactly one correct option.
    Mcq {
        prompt: String,
        options: Vec<String>,
        correct_index: usize,
    },
    /// Free-text answer compared against a single key term.
    FillIn { prompt: String, answer: String },
}

impl Question {
    pub fn prompt(&self) -> &str {
        match self {
            Question::Mcq { prompt, .. } | Question::FillIn { prompt, .. } => prompt,
        }
    }

    pub fn is_mcq(&self) -> bool {
        matches!(self, Question::Mcq { .. })
    }

    /// Text of the correct answer.
    pub fn correct_answer(&self) -> &str {
        match self {
            Question::Mcq {
                options,
                correct_index,
                ..
            } => options.get(*correct_index).map(String::as_str).unwrap_or_default(),
            Question::FillIn { answer, .. } => answer,
        }
    }

    /// Check a zero-based option index. Always false for fill-in questions.
    pub fn is_correct_choice(&self, index: usize) -> bool {
        matches!(self, Question::Mcq { correct_index, .. } if *correct_index == index)
    }

    /// Check a typed response.
    ///
    /// For multiple choice the response may be the 1-based option number or
    /// the option text. Comparison ignores case and surrounding whitespace.
    pub fn is_correct_response(&self, response: &str) -> bool {
        let response = response.trim();
        match self {
            Question::Mcq { options, .. } => {
                if let Ok(n) = response.parse::<usize>() {
                    return n >= 1 && self.is_correct_choice(n - 1);
                }
                options
                    .iter()
                    .position(|o| o.eq_ignore_ascii_case(response))
                    .is_some_and(|i| self.is_correct_choice(i))
            }
            Question::FillIn { answer, .. } => answer.eq_ignore_ascii_case(response),
        }
    }
}

/// Percentage of multiple-choice questions answered correctly.
///
/// `selections[i]` is the chosen option for `questions[i]`; fill-in questions
/// are not counted. Returns 0 when there are no multiple-choice questions.
pub fn score_mcq(questions: &[Question], selections: &[Option<usize>]) -> u8 {
    let mut total = 0u32;
    let mut correct = 0u32;

    for (i, question) in questions.iter().enumerate() {
        if !question.is_mcq() {
            continue;
        }
        total += 1;
        if selections
            .get(i)
            .copied()
            .flatten()
            .is_some_and(|choice| question.is_correct_choice(choice))
        {
            correct += 1;
        }
    }

    if total == 0 {
        return 0;
    }
    (f64::from(correct) / f64::from(total) * 100.0).round() as u8
}
