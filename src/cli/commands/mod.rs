//! CLI command implementations.

mod analyze;
mod assess;
mod config;
mod grade;
mod history;
mod parse;
mod quiz;
mod simulate;

pub use analyze::{run_keywords, run_summarize};
pub use assess::run_assess;
pub use config::run_config;
pub use grade::run_grade;
pub use history::run_history;
pub use parse::run_parse;
pub use quiz::run_quiz;
pub use simulate::run_simulate;

use crate::cli::Output;
use crate::config::Settings;
use crate::quiz::QuestionGenerator;
use crate::transcript::{load_transcript, LoadedTranscript};
use std::io::{self, BufRead, Read, Write};

/// Load the transcript named on the command line, or the configured one.
async fn load_segments(input: Option<&str>, settings: &Settings) -> LoadedTranscript {
    let source = input.or(settings.transcript.source.as_deref());
    let loaded = load_transcript(source, settings.transcript.fetch_timeout()).await;

    if source.is_some() && loaded.is_fallback() {
        Output::warning("Could not read the transcript, using the built-in sample instead.");
    }
    loaded
}

/// Question generator configured from `[quiz]`, with an optional seed override.
fn question_generator(settings: &Settings, seed: Option<u64>) -> QuestionGenerator {
    QuestionGenerator::from_seed(seed.or(settings.quiz.seed))
        .with_keyword_count(settings.quiz.keyword_count)
        .with_min_segment_chars(settings.quiz.min_segment_chars)
}

/// Resolve a text argument, reading stdin for `-`.
fn text_arg(text: &str) -> io::Result<String> {
    if text == "-" {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        Ok(buf)
    } else {
        Ok(text.to_string())
    }
}

/// Print a prompt and read one trimmed line from stdin.
fn prompt_line(prompt: &str) -> io::Result<String> {
    print!("{} ", prompt);
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}
