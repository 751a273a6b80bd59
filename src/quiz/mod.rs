//! Quiz questions synthesized from transcript text.
//!
//! Multiple-choice options are shuffled with an injected random source so
//! that question order can be reproduced from a seed.

mod generator;
mod question;

pub use generator::{
    generate_assessment, generate_question, QuestionGenerator, DEFAULT_ASSESSMENT_COUNT,
    DEFAULT_MIN_SEGMENT_CHARS,
};
pub use question::{score_mcq, Question};
