//! OpenAI client configuration with sensible defaults.

use crate::error::{LearnBuddyError, Result};
use async_openai::{config::OpenAIConfig, Client};
use std::time::Duration;

/// Create an OpenAI client with an explicit API key and timeout.
///
/// When `api_key` is `None` the key is read from `OPENAI_API_KEY`.
pub fn create_client_with(api_key: Option<&str>, timeout: Duration) -> Result<Client<OpenAIConfig>> {
    let http_client = reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| LearnBuddyError::OpenAI(format!("Failed to create HTTP client: {}", e)))?;

    let mut config = OpenAIConfig::default();
    if let Some(key) = api_key {
        config = config.with_api_key(key);
    }

    Ok(Client::with_config(config).with_http_client(http_client))
}

/// Resolve the API key to use: explicit setting first, then `OPENAI_API_KEY`.
///
/// Empty values count as unset.
pub fn resolve_api_key(configured: Option<&str>) -> Option<String> {
    configured
        .filter(|k| !k.trim().is_empty())
        .map(str::to_string)
        .or_else(|| std::env::var("OPENAI_API_KEY").ok())
        .filter(|k| !k.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configured_key_wins() {
        assert_eq!(resolve_api_key(Some("sk-test")), Some("sk-test".to_string()));
    }

    #[test]
    fn test_client_with_key() {
        assert!(create_client_with(Some("sk-test"), Duration::from_secs(5)).is_ok());
    }
}
