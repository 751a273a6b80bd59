//! Quiz command implementation.

use super::{load_segments, prompt_line, question_generator};
use crate::cli::Output;
use crate::config::Settings;
use crate::transcript::{format_timestamp, locate};
use anyhow::Result;

/// Run the quiz command: one question about the segment playing at `at`.
pub async fn run_quiz(at: f64, input: Option<&str>, seed: Option<u64>, settings: Settings) -> Result<()> {
    let loaded = load_segments(input, &settings).await;

    let Some(segment) = locate(&loaded.segments, at) else {
        Output::error("The transcript has no segments.");
        return Ok(());
    };

    Output::info(&format!(
        "Segment {} - {} ({})",
        format_timestamp(segment.start),
        format_timestamp(segment.end),
        loaded.origin
    ));

    let mut generator = question_generator(&settings, seed);
    let question = generator.question(&segment.text);
    Output::question(1, &question);

    let answer = prompt_line("\nYour answer:")?;
    if question.is_correct_response(&answer) {
        Output::success("Correct!");
    } else {
        Output::warning(&format!("Not quite. The answer is: {}", question.correct_answer()));
    }

    Ok(())
}
