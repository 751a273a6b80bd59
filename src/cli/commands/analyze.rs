//! Keyword and summary commands.

use super::text_arg;
use crate::cli::Output;
use crate::nlp::{keywords, split_sentences, summarize};
use anyhow::Result;

/// Run the keywords command.
pub fn run_keywords(text: &str, count: usize) -> Result<()> {
    let text = text_arg(text)?;
    let keys = keywords(&text, count);

    if keys.is_empty() {
        Output::warning("No keywords found.");
        return Ok(());
    }

    Output::header("Keywords");
    for (i, key) in keys.iter().enumerate() {
        Output::list_item(&format!("{}. {}", i + 1, key));
    }
    Ok(())
}

/// Run the summarize command.
pub fn run_summarize(text: &str, sentences: usize) -> Result<()> {
    let text = text_arg(text)?;
    let summary = summarize(&text, sentences);

    Output::header("Summary");
    println!("{}", summary);
    println!();
    Output::kv(
        "Sentences",
        &format!("{} of {}", split_sentences(&summary).len(), split_sentences(&text).len()),
    );
    Ok(())
}
