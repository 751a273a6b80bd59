//! LearnBuddy - study companion for lecture videos
//!
//! Watches how a learner plays a lecture video and reacts: quizzes after busy
//! stretches, help when a section keeps getting rewound, reminders after
//! inactivity and an assessment when the video ends.
//!
//! # Overview
//!
//! LearnBuddy allows you to:
//! - Parse WebVTT and SRT transcripts into timed segments
//! - Extract keywords and extractive summaries from segment text
//! - Build multiple-choice and fill-in questions from a segment
//! - Classify player telemetry into struggle, quiz, reminder and end events
//! - Grade free-text answers and keep a history of attempts
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - `config` - Configuration management
//! - `transcript` - Segment model, timed-text parsers, locator, loading
//! - `nlp` - Keyword extraction and summarization
//! - `quiz` - Question synthesis and assessment scoring
//! - `playback` - Playback classifier and per-session driver
//! - `study` - Overlay state machine for a study session
//! - `grading` - Heuristic and OpenAI graders
//! - `storage` - Attempt history, streaks and leaderboard
//!
//! # Example
//!
//! ```rust
//! use learnbuddy::playback::PlaybackEvent;
//! use learnbuddy::quiz::QuestionGenerator;
//! use learnbuddy::study::{Overlay, StudySession};
//! use learnbuddy::transcript::{parse_vtt, DEFAULT_TRANSCRIPT_VTT};
//!
//! let segments = parse_vtt(DEFAULT_TRANSCRIPT_VTT);
//! let mut session = StudySession::new(segments, QuestionGenerator::seeded(1));
//!
//! session.handle_event(&PlaybackEvent::QuizTrigger { at: 20.0 });
//! assert!(matches!(session.overlay(), Overlay::Quiz { .. }));
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod grading;
pub mod nlp;
pub mod openai;
pub mod playback;
pub mod quiz;
pub mod storage;
pub mod study;
pub mod transcript;

pub use error::{LearnBuddyError, Result};
