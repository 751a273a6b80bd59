//! Assessment command implementation.

use super::{load_segments, prompt_line, question_generator};
use crate::cli::Output;
use crate::config::Settings;
use crate::grading::create_grader;
use crate::nlp::keywords;
use crate::quiz::{score_mcq, Question};
use crate::storage::{Attempt, AttemptMode, AttemptStore, SqliteAttemptStore};
use anyhow::Result;

/// Run the assess command and record the attempt.
pub async fn run_assess(
    input: Option<&str>,
    count: Option<usize>,
    video_id: &str,
    subjective: bool,
    seed: Option<u64>,
    settings: Settings,
) -> Result<()> {
    let loaded = load_segments(input, &settings).await;

    let (score, mode) = if subjective {
        (subjective_round(&loaded.segments, &settings).await?, AttemptMode::Subjective)
    } else {
        let count = count.unwrap_or(settings.quiz.assessment_count);
        let questions = question_generator(&settings, seed).assessment(&loaded.segments, count);
        if questions.is_empty() {
            Output::warning("The transcript has no segments long enough to quiz.");
            return Ok(());
        }
        (mcq_round(&questions)?, AttemptMode::Mcq)
    };

    Output::header("Result");
    Output::score("Score", score);

    let store = SqliteAttemptStore::new(&settings.sqlite_path())?;
    store.append(&Attempt::new(video_id, score, mode)).await?;
    Output::success(&format!("Recorded {} attempt for {}", mode, video_id));

    Ok(())
}

/// Ask each question; only multiple-choice answers count toward the score.
fn mcq_round(questions: &[Question]) -> Result<u8> {
    Output::header(&format!("Assessment ({} questions)", questions.len()));

    let mut selections = Vec::with_capacity(questions.len());
    for (i, question) in questions.iter().enumerate() {
        Output::question(i + 1, question);
        let answer = prompt_line("Your answer:")?;

        match question {
            Question::Mcq { options, .. } => {
                let choice = answer
                    .parse::<usize>()
                    .ok()
                    .and_then(|n| n.checked_sub(1))
                    .filter(|&n| n < options.len());
                selections.push(choice);
            }
            Question::FillIn { .. } => selections.push(None),
        }

        if question.is_correct_response(&answer) {
            Output::success("Correct!");
        } else {
            Output::warning(&format!("The answer is: {}", question.correct_answer()));
        }
    }

    Ok(score_mcq(questions, &selections))
}

/// Ask for a free-text summary and grade it.
async fn subjective_round(segments: &[crate::transcript::TranscriptSegment], settings: &Settings) -> Result<u8> {
    let full_text = segments.iter().map(|s| s.text.as_str()).collect::<Vec<_>>().join(" ");
    let topic = keywords(&full_text, 3).join(", ");

    Output::header("Summarize what you learned");
    if !topic.is_empty() {
        Output::kv("Topic", &topic);
    }
    let answer = prompt_line("\nYour summary:")?;

    let grader = create_grader(settings)?;
    let spinner = Output::spinner(&format!("Grading with {}...", grader.name()));
    let grade = grader
        .grade(&answer, (!topic.is_empty()).then_some(topic.as_str()))
        .await;
    spinner.finish_and_clear();

    Output::kv("Feedback", &grade.feedback);
    Ok(grade.score)
}
