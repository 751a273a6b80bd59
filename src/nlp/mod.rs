//! Lightweight text analysis: keywords and extractive summaries.

mod keywords;
mod stopwords;
mod summarize;

pub use keywords::{keywords, DEFAULT_KEYWORDS};
pub use stopwords::is_stopword;
pub use summarize::{split_sentences, summarize, DEFAULT_SUMMARY_SENTENCES};

/// Lowercase `text` and split it on runs of non-alphanumeric characters.
pub fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(|t| t.to_ascii_lowercase())
}
