//! Prompt templates for LearnBuddy.
//!
//! Prompts can be customized by placing TOML files in the custom prompts directory.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Collection of all prompt templates.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Prompts {
    pub grading: GradingPrompts,
    /// Custom variables from config, available in all prompts.
    #[serde(skip)]
    pub variables: HashMap<String, String>,
}

/// Prompts for grading free-text answers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GradingPrompts {
    pub system: String,
    /// Template with `{{answer}}` and `{{topic}}`. `{{topic}}` renders as
    /// " Topic: <hint>" or nothing.
    pub user: String,
}

impl Default for GradingPrompts {
    fn default() -> Self {
        Self {
            system: "You are a strict grader. Return only valid JSON.".to_string(),
            user: r#"Grade the following learning summary from 0-100. Provide JSON {"score":number,"feedback":string}. Rubric: clarity, accuracy, key terms, examples.{{topic}}

Summary:
{{answer}}"#
                .to_string(),
        }
    }
}

impl Prompts {
    /// Load prompts from the default location, with optional custom directory and variables.
    pub fn load(
        custom_dir: Option<&str>,
        custom_variables: Option<&HashMap<String, String>>,
    ) -> crate::error::Result<Self> {
        let mut prompts = Prompts::default();

        if let Some(vars) = custom_variables {
            prompts.variables = vars.clone();
        }

        if let Some(dir) = custom_dir {
            let custom_path = PathBuf::from(shellexpand::tilde(dir).to_string());

            let grading_path = custom_path.join("grading.toml");
            if grading_path.exists() {
                let content = std::fs::read_to_string(&grading_path)?;
                prompts.grading = toml::from_str(&content)?;
            }
        }

        Ok(prompts)
    }

    /// Render a prompt template with the given variables.
    pub fn render(template: &str, vars: &HashMap<String, String>) -> String {
        let mut result = template.to_string();
        for (key, value) in vars {
            result = result.replace(&format!("{{{{{}}}}}", key), value);
        }
        result
    }

    /// Render a prompt template with both provided variables and custom config variables.
    /// Provided variables take precedence over custom config variables.
    pub fn render_with_custom(&self, template: &str, vars: &HashMap<String, String>) -> String {
        let mut merged = self.variables.clone();
        for (key, value) in vars {
            merged.insert(key.clone(), value.clone());
        }
        Self::render(template, &merged)
    }
}
