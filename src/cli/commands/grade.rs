//! Grade command implementation.

use super::text_arg;
use crate::cli::Output;
use crate::config::Settings;
use crate::grading::create_grader;
use anyhow::Result;

/// Run the grade command.
pub async fn run_grade(answer: &str, topic: Option<&str>, settings: Settings) -> Result<()> {
    let answer = text_arg(answer)?;
    let grader = create_grader(&settings)?;

    let spinner = Output::spinner(&format!("Grading with {}...", grader.name()));
    let grade = grader.grade(&answer, topic).await;
    spinner.finish_and_clear();

    Output::header("Grade");
    Output::score("Score", grade.score);
    Output::kv("Feedback", &grade.feedback);
    Ok(())
}
