//! Frequency-ranked keyword extraction.

use super::{is_stopword, tokenize};
use std::collections::HashMap;

/// Default number of keywords returned.
pub const DEFAULT_KEYWORDS: usize = 6;

/// Minimum token length, in characters, for a keyword.
const MIN_KEYWORD_LEN: usize = 3;

/// Extract up to `top_n` keywords from `text`.
///
/// Tokens are lowercased ASCII alphanumeric runs. Stopwords and tokens
/// shorter than three characters are dropped. The rest are ranked by
/// descending frequency; equal counts keep first-occurrence order.
pub fn keywords(text: &str, top_n: usize) -> Vec<String> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    let mut order: Vec<String> = Vec::new();

    for token in tokenize(text) {
        if token.len() < MIN_KEYWORD_LEN || is_stopword(&token) {
            continue;
        }
        let count = counts.entry(token.clone()).or_insert(0);
        if *count == 0 {
            order.push(token);
        }
        *count += 1;
    }

    // Stable sort keeps first-seen order among ties.
    order.sort_by(|a, b| counts[b].cmp(&counts[a]));
    order.truncate(top_n);
    order
}
