//! Question synthesis from transcript text.

use super::Question;
use crate::nlp::{keywords, summarize, DEFAULT_KEYWORDS};
use crate::transcript::TranscriptSegment;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::debug;

/// Default number of questions in an end-of-video assessment.
pub const DEFAULT_ASSESSMENT_COUNT: usize = 5;

/// Segments with this many characters or fewer are not quizzed.
pub const DEFAULT_MIN_SEGMENT_CHARS: usize = 20;

/// Most distractors shown next to the correct option.
const MAX_DISTRACTORS: usize = 3;

/// Keywords needed before a multiple-choice question is built.
const MIN_MCQ_KEYWORDS: usize = 3;

/// Answer of the placeholder question built for blank text.
const BLANK_TEXT_ANSWER: &str = "skip";

/// Build one question from `text`.
///
/// With at least three keywords this is a multiple-choice question whose
/// correct option is the top keyword; otherwise a fill-in question asking
/// for the top keyword (or the first word when there are no keywords).
/// Blank text yields a placeholder fill-in whose answer is `skip`.
pub fn generate_question<R: Rng + ?Sized>(text: &str, keyword_count: usize, rng: &mut R) -> Question {
    if text.trim().is_empty() {
        return Question::FillIn {
            prompt: format!("This segment has no transcript text.\nType '{}' to continue.", BLANK_TEXT_ANSWER),
            answer: BLANK_TEXT_ANSWER.to_string(),
        };
    }

    let keys = keywords(text, keyword_count);
    let stem = summarize(text, 1);

    if keys.len() >= MIN_MCQ_KEYWORDS {
        let correct = keys[0].clone();
        let mut options: Vec<String> = keys[1..].iter().take(MAX_DISTRACTORS).cloned().collect();
        options.push(correct.clone());
        options.shuffle(rng);

        let correct_index = options.iter().position(|o| *o == correct).unwrap_or_default();

        return Question::Mcq {
            prompt: format!("{}\nWhat key term best fits this segment?", stem),
            options,
            correct_index,
        };
    }

    let answer = keys
        .into_iter()
        .next()
        .or_else(|| text.split_whitespace().next().map(str::to_string))
        .unwrap_or_default();

    Question::FillIn {
        prompt: format!("{}\nFill in the key term: ____", stem),
        answer,
    }
}

/// Build up to `count` questions from randomly chosen segments.
///
/// Only segments with more than `min_chars` characters of trimmed text are
/// eligible; fewer questions are returned when the pool is small.
pub fn generate_assessment<R: Rng + ?Sized>(
    segments: &[TranscriptSegment],
    count: usize,
    min_chars: usize,
    keyword_count: usize,
    rng: &mut R,
) -> Vec<Question> {
    let mut pool: Vec<&TranscriptSegment> = segments
        .iter()
        .filter(|s| s.text.trim().chars().count() > min_chars)
        .collect();
    pool.shuffle(rng);

    debug!("Building assessment from {} of {} segments", pool.len().min(count), segments.len());

    pool.into_iter()
        .take(count)
        .map(|s| generate_question(&s.text, keyword_count, rng))
        .collect()
}

/// Question synthesizer owning its random source.
pub struct QuestionGenerator {
    rng: StdRng,
    keyword_count: usize,
    min_segment_chars: usize,
}

impl QuestionGenerator {
    /// Create a generator seeded from the operating system.
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    /// Create a deterministic generator.
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    /// Seeded when `seed` is given, OS-seeded otherwise.
    pub fn from_seed(seed: Option<u64>) -> Self {
        seed.map(Self::seeded).unwrap_or_default()
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            rng,
            keyword_count: DEFAULT_KEYWORDS,
            min_segment_chars: DEFAULT_MIN_SEGMENT_CHARS,
        }
    }

    pub fn with_keyword_count(mut self, keyword_count: usize) -> Self {
        self.keyword_count = keyword_count;
        self
    }

    pub fn with_min_segment_chars(mut self, min_segment_chars: usize) -> Self {
        self.min_segment_chars = min_segment_chars;
        self
    }

    pub fn question(&mut self, text: &str) -> Question {
        generate_question(text, self.keyword_count, &mut self.rng)
    }

    pub fn assessment(&mut self, segments: &[TranscriptSegment], count: usize) -> Vec<Question> {
        generate_assessment(
            segments,
            count,
            self.min_segment_chars,
            self.keyword_count,
            &mut self.rng,
        )
    }
}

impl Default for QuestionGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transcript::default_segments;

    const TEXT: &str = "Binary search needs sorted input. Binary search compares the target \
                        with the middle element and discards half of the remaining range.";

    #[test]
    fn test_mcq_correct_index_survives_shuffle() {
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            match generate_question(TEXT, DEFAULT_KEYWORDS, &mut rng) {
                Question::Mcq {
                    options,
                    correct_index,
                    prompt,
                } => {
                    assert_eq!(options[correct_index], "binary");
                    assert_eq!(options.len(), 4);
                    assert!(prompt.ends_with("What key term best fits this segment?"));
                }
                other => panic!("expected mcq, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_mcq_options_are_unique_keywords() {
        let mut rng = StdRng::seed_from_u64(7);
        let question = generate_question(TEXT, DEFAULT_KEYWORDS, &mut rng);
        let Question::Mcq { options, .. } = question else {
            panic!("expected mcq");
        };

        let keys = keywords(TEXT, DEFAULT_KEYWORDS);
        let mut sorted = options.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(sorted.len(), options.len());
        assert!(options.iter().all(|o| keys[..4].contains(o)));
    }

    #[test]
    fn test_shuffle_varies_with_seed() {
        let positions: std::collections::HashSet<usize> = (0..40)
            .filter_map(|seed| {
                let mut rng = StdRng::seed_from_u64(seed);
                match generate_question(TEXT, DEFAULT_KEYWORDS, &mut rng) {
                    Question::Mcq { correct_index, .. } => Some(correct_index),
                    Question::FillIn { .. } => None,
                }
            })
            .collect();
        assert!(positions.len() > 1);
    }

    #[test]
    fn test_fill_in_with_few_keywords() {
        let mut rng = StdRng::seed_from_u64(1);
        let question = generate_question("Recursion, recursion, loops.", DEFAULT_KEYWORDS, &mut rng);
        assert_eq!(
            question,
            Question::FillIn {
                prompt: "Recursion, recursion, loops.\nFill in the key term: ____".to_string(),
                answer: "recursion".to_string(),
            }
        );
    }

    #[test]
    fn test_fill_in_without_keywords_uses_first_word() {
        let mut rng = StdRng::seed_from_u64(1);
        let question = generate_question("It is so.", DEFAULT_KEYWORDS, &mut rng);
        assert_eq!(question.correct_answer(), "It");
        assert!(!question.is_mcq());
    }

    #[test]
    fn test_blank_text_still_has_an_answer() {
        let mut rng = StdRng::seed_from_u64(1);
        for text in ["", "   \n\t "] {
            let question = generate_question(text, DEFAULT_KEYWORDS, &mut rng);
            assert!(!question.is_mcq());
            assert_eq!(question.correct_answer(), "skip");
            assert!(question.is_correct_response("SKIP"));
        }
    }

    #[test]
    fn test_assessment_count_and_filter() {
        let segments = default_segments();
        let mut generator = QuestionGenerator::seeded(3);

        assert_eq!(generator.assessment(&segments, 5).len(), 5);
        assert_eq!(generator.assessment(&segments, 20).len(), 8);

        let short = vec![
            TranscriptSegment::new(0.0, 1.0, "too short"),
            TranscriptSegment::new(1.0, 2.0, "   exactly twenty chars   "),
            TranscriptSegment::new(2.0, 3.0, "this one is long enough to quiz"),
        ];
        assert_eq!(generator.assessment(&short, 5).len(), 1);
        assert!(generator.assessment(&[], 5).is_empty());
    }

    #[test]
    fn test_seeded_generators_agree() {
        let segments = default_segments();
        let a = QuestionGenerator::seeded(42).assessment(&segments, 5);
        let b = QuestionGenerator::seeded(42).assessment(&segments, 5);
        assert_eq!(a, b);
    }
}
