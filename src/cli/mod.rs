//! CLI module for LearnBuddy.

pub mod commands;
mod output;

pub use output::Output;

use clap::{Parser, Subcommand};

/// LearnBuddy - study companion for lecture videos
///
/// Parses lecture transcripts, extracts keywords and summaries, builds quizzes
/// and assessments, and replays playback telemetry through the behavior
/// classifier.
#[derive(Parser, Debug)]
#[command(name = "learnbuddy")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "LEARNBUDDY_CONFIG")]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Parse a timed-text transcript and print its segments
    Parse {
        /// Transcript URL or file (.vtt or .srt). Defaults to the configured source.
        input: Option<String>,

        /// Output format (text, json, srt, vtt)
        #[arg(short, long, default_value = "text")]
        format: String,

        /// Output file (stdout if not specified)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Extract the most frequent keywords from text
    Keywords {
        /// Text to analyze ('-' reads stdin)
        text: String,

        /// Number of keywords
        #[arg(short = 'n', long, default_value = "6")]
        count: usize,
    },

    /// Summarize text by keyword overlap
    Summarize {
        /// Text to summarize ('-' reads stdin)
        text: String,

        /// Maximum number of sentences
        #[arg(short, long, default_value = "3")]
        sentences: usize,
    },

    /// Ask one question about the segment playing at a timestamp
    Quiz {
        /// Playback position in seconds
        #[arg(long)]
        at: f64,

        /// Transcript URL or file
        #[arg(short, long)]
        input: Option<String>,

        /// Seed for reproducible option order
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Take the end-of-video assessment and record the attempt
    Assess {
        /// Transcript URL or file
        #[arg(short, long)]
        input: Option<String>,

        /// Number of questions (defaults to quiz.assessment_count)
        #[arg(short = 'n', long)]
        count: Option<usize>,

        /// Video the attempt is recorded against
        #[arg(long, default_value = "default")]
        video_id: String,

        /// Write a free-text summary instead and have it graded
        #[arg(long)]
        subjective: bool,

        /// Seed for reproducible question choice
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Grade a free-text answer
    Grade {
        /// The answer to grade ('-' reads stdin)
        answer: String,

        /// Optional topic hint for the grader
        #[arg(short, long)]
        topic: Option<String>,
    },

    /// Replay a JSON playback script through the classifier and overlays
    Simulate {
        /// Path to the script file
        script: String,

        /// Transcript URL or file
        #[arg(short, long)]
        input: Option<String>,

        /// Seed for reproducible questions
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Show recorded attempts, the daily streak and the leaderboard
    History {
        /// Maximum leaderboard rows
        #[arg(short, long, default_value = "10")]
        limit: usize,

        /// Delete all recorded attempts
        #[arg(long)]
        clear: bool,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,

    /// Write the default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
}
