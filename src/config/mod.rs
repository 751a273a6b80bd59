//! Configuration module for LearnBuddy.
//!
//! Handles loading and managing application settings and prompt templates.

mod prompts;
mod settings;

pub use prompts::{GradingPrompts, Prompts};
pub use settings::{
    ClassifierSettings, GeneralSettings, GradingSettings, PromptSettings, QuizSettings, Settings,
    StorageSettings, TranscriptSettings,
};
