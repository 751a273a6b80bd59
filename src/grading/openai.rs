//! OpenAI chat-completion grader.

use super::{base_feedback, Grade, Grader};
use crate::config::Prompts;
use crate::error::{LearnBuddyError, Result};
use crate::openai::create_client_with;
use async_openai::types::{
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
    ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
};
use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Grades answers with a chat model at temperature 0.
pub struct OpenAIGrader {
    client: async_openai::Client<async_openai::config::OpenAIConfig>,
    model: String,
    prompts: Prompts,
}

impl OpenAIGrader {
    pub fn new(api_key: &str, model: &str, timeout: Duration, prompts: Prompts) -> Result<Self> {
        Ok(Self {
            client: create_client_with(Some(api_key), timeout)?,
            model: model.to_string(),
            prompts,
        })
    }

    fn user_prompt(&self, answer: &str, topic: Option<&str>) -> String {
        let mut vars = HashMap::new();
        vars.insert("answer".to_string(), answer.to_string());
        vars.insert(
            "topic".to_string(),
            topic
                .filter(|t| !t.trim().is_empty())
                .map(|t| format!(" Topic: {}", t.trim()))
                .unwrap_or_default(),
        );
        self.prompts.render_with_custom(&self.prompts.grading.user, &vars)
    }

    async fn request_grade(&self, answer: &str, topic: Option<&str>) -> Result<Grade> {
        let messages: Vec<ChatCompletionRequestMessage> = vec![
            ChatCompletionRequestSystemMessageArgs::default()
                .content(self.prompts.grading.system.clone())
                .build()
                .map_err(|e| LearnBuddyError::Grading(e.to_string()))?
                .into(),
            ChatCompletionRequestUserMessageArgs::default()
                .content(self.user_prompt(answer, topic))
                .build()
                .map_err(|e| LearnBuddyError::Grading(e.to_string()))?
                .into(),
        ];

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(messages)
            .temperature(0.0)
            .build()
            .map_err(|e| LearnBuddyError::Grading(e.to_string()))?;

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e| LearnBuddyError::OpenAI(format!("Grading request failed: {}", e)))?;

        let content = response
            .choices
            .first()
            .and_then(|c| c.message.content.as_ref())
            .ok_or_else(|| LearnBuddyError::Grading("Empty response".to_string()))?;

        debug!("Grader replied with {} chars", content.len());
        parse_grade(content, answer)
    }
}

#[async_trait]
impl Grader for OpenAIGrader {
    #[instrument(skip(self, answer), fields(model = %self.model, chars = answer.len()))]
    async fn grade(&self, answer: &str, topic: Option<&str>) -> Grade {
        match self.request_grade(answer, topic).await {
            Ok(grade) => grade,
            Err(e) => {
                warn!("Grading failed, scoring 0: {}", e);
                Grade {
                    score: 0,
                    feedback: base_feedback(answer).to_string(),
                }
            }
        }
    }

    fn name(&self) -> &str {
        "openai"
    }
}

/// Parse a model reply of the form `{"score": n, "feedback": "..."}`.
///
/// The JSON object is taken from the first `{` to the last `}` so that code
/// fences or surrounding prose are tolerated. Scores are clamped to 0..=100;
/// a missing or non-numeric score reads as 0 and missing feedback falls back
/// to the base feedback for `answer`.
pub fn parse_grade(content: &str, answer: &str) -> Result<Grade> {
    let json_str = match (content.find('{'), content.rfind('}')) {
        (Some(start), Some(end)) if end > start => &content[start..=end],
        _ => return Err(LearnBuddyError::Grading("No JSON object in response".to_string())),
    };

    let value: serde_json::Value = serde_json::from_str(json_str)?;

    let score = match &value["score"] {
        serde_json::Value::Number(n) => n.as_f64().unwrap_or_default(),
        serde_json::Value::String(s) => s.trim().parse::<f64>().unwrap_or_default(),
        _ => 0.0,
    };
    let score = if score.is_finite() { score.round().clamp(0.0, 100.0) as u8 } else { 0 };

    let feedback = value["feedback"]
        .as_str()
        .filter(|f| !f.trim().is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| base_feedback(answer).to_string());

    Ok(Grade { score, feedback })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grading::{DETAILED_FEEDBACK, SHORT_FEEDBACK};

    #[test]
    fn test_parse_plain_json() {
        let grade = parse_grade(r#"{"score": 82, "feedback": "Clear."}"#, "x").unwrap();
        assert_eq!(
            grade,
            Grade {
                score: 82,
                feedback: "Clear.".to_string()
            }
        );
    }

    #[test]
    fn test_parse_fenced_json() {
        let reply = "```json\n{\"score\": 64.6, \"feedback\": \"Add an example.\"}\n```";
        let grade = parse_grade(reply, "x").unwrap();
        assert_eq!(grade.score, 65);
        assert_eq!(grade.feedback, "Add an example.");
    }

    #[test]
    fn test_parse_clamps_and_defaults() {
        let grade = parse_grade(r#"{"score": 250}"#, "short").unwrap();
        assert_eq!(grade.score, 100);
        assert_eq!(grade.feedback, SHORT_FEEDBACK);

        let long_answer = "Merge sort splits, sorts and merges in n log n time.";
        let grade = parse_grade(r#"{"score": "seventy", "feedback": ""}"#, long_answer).unwrap();
        assert_eq!(grade.score, 0);
        assert_eq!(grade.feedback, DETAILED_FEEDBACK);

        let grade = parse_grade(r#"{"score": "71"}"#, "x").unwrap();
        assert_eq!(grade.score, 71);
        assert_eq!(parse_grade(r#"{"score": -5}"#, "x").unwrap().score, 0);
    }

    #[test]
    fn test_parse_rejects_non_json() {
        assert!(parse_grade("I cannot grade this.", "x").is_err());
        assert!(parse_grade("} {", "x").is_err());
        assert!(parse_grade("{not json}", "x").is_err());
    }

    #[test]
    fn test_user_prompt_topic() {
        let grader = OpenAIGrader::new("sk-test", "gpt-4o-mini", Duration::from_secs(5), Prompts::default())
            .unwrap();

        let with_topic = grader.user_prompt("My summary", Some("binary search"));
        assert!(with_topic.contains("examples. Topic: binary search\n"));
        assert!(with_topic.ends_with("Summary:\nMy summary"));

        let without = grader.user_prompt("My summary", None);
        assert!(without.contains("examples.\n"));
        assert!(!without.contains("Topic:"));
    }
}
