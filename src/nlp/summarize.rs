//! Extractive summarization by keyword overlap.

use super::{keywords, tokenize};
use std::collections::HashSet;

/// Default number of sentences in a summary.
pub const DEFAULT_SUMMARY_SENTENCES: usize = 3;

/// Size of the keyword set sentences are scored against.
const SCORING_KEYWORDS: usize = 10;

/// Characters kept when no sentence can be extracted.
const FALLBACK_CHARS: usize = 200;

/// Summarize `text` into at most `max_sentences` sentences.
///
/// Sentences are scored by how many of their tokens belong to the text's
/// top keywords and the best ones are joined in score order, ties keeping
/// reading order. Text without sentence punctuation counts as one sentence.
pub fn summarize(text: &str, max_sentences: usize) -> String {
    let sentences = split_sentences(text);
    let keys: HashSet<String> = keywords(text, SCORING_KEYWORDS).into_iter().collect();

    let mut ranked: Vec<(usize, &str)> = sentences
        .iter()
        .map(|s| (tokenize(s).filter(|t| keys.contains(t)).count(), s.as_str()))
        .collect();
    ranked.sort_by(|a, b| b.0.cmp(&a.0));

    let chosen: Vec<&str> = ranked
        .into_iter()
        .take(max_sentences)
        .map(|(_, s)| s)
        .collect();

    if chosen.is_empty() {
        return text.chars().take(FALLBACK_CHARS).collect();
    }
    chosen.join(" ")
}

/// Split text into trimmed sentences ending in `.`, `!` or `?`.
///
/// Whitespace runs are collapsed first. A trailing fragment without a
/// terminator is dropped unless it is the only text present, in which case
/// the trimmed input is returned as written.
pub fn split_sentences(text: &str) -> Vec<String> {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    let mut sentences = Vec::new();
    let mut current = String::new();

    for ch in collapsed.chars() {
        if matches!(ch, '.' | '!' | '?') {
            if !current.is_empty() {
                current.push(ch);
                let trimmed = current.trim();
                if !trimmed.is_empty() {
                    sentences.push(trimmed.to_string());
                }
                current.clear();
            }
        } else {
            current.push(ch);
        }
    }

    if sentences.is_empty() && !collapsed.is_empty() {
        sentences.push(text.trim().to_string());
    }
    sentences
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEXT: &str = "Cats are small. Binary search halves the search range each step. \
                        The weather was nice. Binary search needs sorted input!";

    #[test]
    fn test_split_sentences() {
        let sentences = split_sentences("One.  Two!\nThree? four");
        assert_eq!(sentences, vec!["One.", "Two!", "Three?"]);
    }

    #[test]
    fn test_split_without_terminator() {
        assert_eq!(split_sentences("no punctuation here"), vec!["no punctuation here"]);
        assert!(split_sentences("   ").is_empty());
        assert_eq!(
            split_sentences("  first line\n  second   line "),
            vec!["first line\n  second   line"]
        );
    }

    #[test]
    fn test_summary_uses_score_order() {
        let summary = summarize(TEXT, 2);
        assert_eq!(
            summary,
            "Binary search halves the search range each step. Binary search needs sorted input!"
        );
    }

    #[test]
    fn test_summary_respects_limit_and_is_verbatim() {
        let sentences = split_sentences(TEXT);
        for n in 1..=5 {
            let summary = summarize(TEXT, n);
            let picked: Vec<&String> = sentences.iter().filter(|s| summary.contains(s.as_str())).collect();
            assert!(picked.len() <= n);
            assert_eq!(picked.len(), n.min(sentences.len()));
        }
    }

    #[test]
    fn test_summary_single_sentence() {
        assert_eq!(summarize(TEXT, 1), "Binary search halves the search range each step.");
    }

    #[test]
    fn test_summary_fallbacks() {
        assert_eq!(summarize("", 3), "");
        assert_eq!(summarize("just words", 3), "just words");
        assert_eq!(summarize(" spaced   out\nwords ", 3), "spaced   out\nwords");

        let long = "x".repeat(300);
        assert_eq!(summarize(&long, 0).len(), 200);
    }
}
