//! English function words ignored by keyword extraction.

use std::collections::HashSet;
use std::sync::LazyLock;

const WORDS: &[&str] = &[
    "the", "is", "in", "at", "of", "a", "an", "and", "or", "to", "for", "on", "with", "as", "by",
    "it", "that", "this", "are", "be", "from", "we", "you", "your", "our", "their", "was", "were",
    "will", "shall", "has", "have", "had", "but", "so", "if", "then", "than", "which", "who",
    "what", "when", "where", "why", "how", "into", "about", "each", "more", "much", "many", "few",
    "most", "least", "can", "could", "should", "would", "may", "might", "also", "just", "like",
    "one", "two", "three", "such", "using", "use", "used", "over", "under", "between", "within",
    "without", "until", "while",
];

static STOPWORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| WORDS.iter().copied().collect());

/// Whether `token` (already lowercased) is a stopword.
pub fn is_stopword(token: &str) -> bool {
    STOPWORDS.contains(token)
}
