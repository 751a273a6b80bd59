//! Configuration settings for LearnBuddy.

use crate::playback::ClassifierConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub transcript: TranscriptSettings,
    pub classifier: ClassifierSettings,
    pub quiz: QuizSettings,
    pub grading: GradingSettings,
    pub storage: StorageSettings,
    pub prompts: PromptSettings,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Directory for storing application data.
    pub data_dir: String,
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            data_dir: "~/.learnbuddy".to_string(),
            log_level: "info".to_string(),
        }
    }
}

/// Where transcripts come from.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranscriptSettings {
    /// URL or file path of a timed-text transcript. None uses the built-in one.
    pub source: Option<String>,
    /// Timeout for fetching remote transcripts.
    pub fetch_timeout_secs: u64,
}

impl Default for TranscriptSettings {
    fn default() -> Self {
        Self {
            source: None,
            fetch_timeout_secs: 10,
        }
    }
}

impl TranscriptSettings {
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }
}

/// Playback classifier thresholds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierSettings {
    /// Player polling interval in milliseconds.
    pub sample_interval_ms: u64,
    /// Width of an interaction bucket in seconds.
    pub bucket_seconds: f64,
    /// A backwards jump larger than this counts as a rewind.
    pub rewind_threshold_seconds: f64,
    /// Any other jump larger than this counts as a seek.
    pub seek_threshold_seconds: f64,
    /// How long rewinds stay in the struggle window.
    pub struggle_window_seconds: u64,
    /// Rewinds within the window that signal a struggle.
    pub struggle_rewinds: usize,
    /// Pauses plus rewinds in one bucket that trigger a quiz.
    pub quiz_interaction_threshold: u32,
    /// Seconds without activity before a reminder.
    pub inactivity_timeout_seconds: u64,
    /// Author-scheduled quiz timestamps in seconds.
    pub scheduled_quizzes: Vec<f64>,
    /// Help range starts this far before the struggle position.
    pub struggle_lookbehind_seconds: f64,
    /// Help range ends this far after the struggle position.
    pub struggle_lookahead_seconds: f64,
}

impl Default for ClassifierSettings {
    fn default() -> Self {
        Self {
            sample_interval_ms: 1000,
            bucket_seconds: 10.0,
            rewind_threshold_seconds: 2.0,
            seek_threshold_seconds: 5.0,
            struggle_window_seconds: 120,
            struggle_rewinds: 3,
            quiz_interaction_threshold: 4,
            inactivity_timeout_seconds: 120,
            scheduled_quizzes: Vec::new(),
            struggle_lookbehind_seconds: 10.0,
            struggle_lookahead_seconds: 5.0,
        }
    }
}

impl From<&ClassifierSettings> for ClassifierConfig {
    fn from(s: &ClassifierSettings) -> Self {
        Self {
            sample_interval: Duration::from_millis(s.sample_interval_ms.max(1)),
            bucket_seconds: s.bucket_seconds,
            rewind_threshold: s.rewind_threshold_seconds,
            seek_threshold: s.seek_threshold_seconds,
            struggle_window: Duration::from_secs(s.struggle_window_seconds),
            struggle_rewinds: s.struggle_rewinds,
            quiz_interaction_threshold: s.quiz_interaction_threshold,
            inactivity_timeout: Duration::from_secs(s.inactivity_timeout_seconds),
            struggle_lookbehind: s.struggle_lookbehind_seconds,
            struggle_lookahead: s.struggle_lookahead_seconds,
        }
    }
}

/// Question synthesis settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QuizSettings {
    /// Keywords extracted per question.
    pub keyword_count: usize,
    /// Questions in an end-of-video assessment.
    pub assessment_count: usize,
    /// Segments this short or shorter are not quizzed.
    pub min_segment_chars: usize,
    /// Fixed seed for reproducible option order.
    pub seed: Option<u64>,
}

impl Default for QuizSettings {
    fn default() -> Self {
        Self {
            keyword_count: 6,
            assessment_count: 5,
            min_segment_chars: 20,
            seed: None,
        }
    }
}

/// Subjective answer grading settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GradingSettings {
    /// Chat model used when an API key is available.
    pub model: String,
    /// OpenAI API key. Falls back to OPENAI_API_KEY.
    pub api_key: Option<String>,
    /// Request timeout for the grading call.
    pub timeout_secs: u64,
    /// Regex patterns counted by the offline grader.
    pub coverage_terms: Vec<String>,
    /// Weight of the term coverage score.
    pub coverage_weight: f64,
    /// Weight of the answer length score.
    pub length_weight: f64,
}

impl Default for GradingSettings {
    fn default() -> Self {
        Self {
            model: "gpt-4o-mini".to_string(),
            api_key: None,
            timeout_secs: 60,
            coverage_terms: [
                "algorithm",
                "search",
                "sort",
                r"big\s*o",
                "complexity",
                "time",
                "space",
                "binary",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            coverage_weight: 0.6,
            length_weight: 0.4,
        }
    }
}

impl GradingSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Attempt storage settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// Path to the SQLite attempts database.
    pub sqlite_path: String,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            sqlite_path: "~/.learnbuddy/attempts.db".to_string(),
        }
    }
}

/// Prompt customization settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct PromptSettings {
    /// Directory for custom prompts (overrides defaults).
    pub custom_dir: Option<String>,
    /// Custom variables available in all prompts as {{variable_name}}.
    pub variables: std::collections::HashMap<String, String>,
}

impl Settings {
    /// Load settings from the default configuration file.
    pub fn load() -> crate::error::Result<Self> {
        Self::load_from(None)
    }

    /// Load settings from a specific path, or default location if None.
    pub fn load_from(path: Option<&PathBuf>) -> crate::error::Result<Self> {
        let config_path = match path {
            Some(p) => p.clone(),
            None => Self::default_config_path(),
        };

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let settings: Settings = toml::from_str(&content)?;
            Ok(settings)
        } else {
            Ok(Settings::default())
        }
    }

    /// Save settings to the default configuration file.
    pub fn save(&self) -> crate::error::Result<()> {
        self.save_to(&Self::default_config_path())
    }

    /// Save settings to a specific path.
    pub fn save_to(&self, path: &PathBuf) -> crate::error::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::error::LearnBuddyError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("learnbuddy")
            .join("config.toml")
    }

    /// Expand shell variables in paths (e.g., ~).
    pub fn expand_path(path: &str) -> PathBuf {
        PathBuf::from(shellexpand::tilde(path).to_string())
    }

    /// Get the expanded data directory path.
    pub fn data_dir(&self) -> PathBuf {
        Self::expand_path(&self.general.data_dir)
    }

    /// Get the expanded SQLite database path.
    pub fn sqlite_path(&self) -> PathBuf {
        Self::expand_path(&self.storage.sqlite_path)
    }

    /// Classifier configuration built from the `[classifier]` section.
    pub fn classifier_config(&self) -> ClassifierConfig {
        ClassifierConfig::from(&self.classifier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_classifier_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.classifier_config(), ClassifierConfig::default());
        assert_eq!(settings.quiz.keyword_count, 6);
        assert_eq!(settings.grading.coverage_terms.len(), 8);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let settings: Settings = toml::from_str(
            r#"
            [classifier]
            struggle_rewinds = 5
            scheduled_quizzes = [30.0, 90.0]

            [quiz]
            seed = 7
            "#,
        )
        .unwrap();

        assert_eq!(settings.classifier.struggle_rewinds, 5);
        assert_eq!(settings.classifier.scheduled_quizzes, vec![30.0, 90.0]);
        assert_eq!(settings.classifier.bucket_seconds, 10.0);
        assert_eq!(settings.quiz.seed, Some(7));
        assert_eq!(settings.grading.model, "gpt-4o-mini");
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut settings = Settings::default();
        settings.transcript.source = Some("lecture.vtt".to_string());
        settings.save_to(&path).unwrap();

        let loaded = Settings::load_from(Some(&path)).unwrap();
        assert_eq!(loaded.transcript.source.as_deref(), Some("lecture.vtt"));
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let path = PathBuf::from("/nonexistent/learnbuddy/config.toml");
        let settings = Settings::load_from(Some(&path)).unwrap();
        assert_eq!(settings.storage.sqlite_path, "~/.learnbuddy/attempts.db");
    }
}
