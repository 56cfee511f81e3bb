//! The wisdom client.
//!
//! One outbound request per completed computation: the expression and its
//! result are embedded in a fixed Al-Khwarizmi prompt and sent to the
//! configured text-generation backend. A single attempt, no retries; any
//! failure is logged and replaced by [`WISDOM_FALLBACK`], so fetching never
//! returns an error to the caller.

use std::time::Duration;

use llm::LLMProvider;
use llm::builder::{LLMBackend, LLMBuilder};
use llm::chat::{ChatMessage, ChatProvider, ChatResponse};
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::WisdomConfig;

/// Shown in place of generated wisdom when the model cannot be reached.
pub const WISDOM_FALLBACK: &str = "اعداد اسرار جهان را در خود دارند...";

#[derive(Debug, Error)]
pub enum WisdomError {
    #[error("unknown wisdom backend: {0}")]
    UnknownBackend(String),
    #[error("model request failed: {0}")]
    Request(#[from] llm::error::LLMError),
    #[error("model request timed out after {0:?}")]
    Timeout(Duration),
    #[error("model returned an empty response")]
    EmptyResponse,
}

/// Client for the configured text-generation backend.
pub struct WisdomClient {
    provider: Box<dyn LLMProvider>,
    timeout: Duration,
}

impl WisdomClient {
    /// Build a client from configuration and the API key read at startup.
    pub fn new(config: &WisdomConfig, api_key: &str) -> Result<Self, WisdomError> {
        let provider = LLMBuilder::new()
            .backend(parse_backend(&config.backend)?)
            .api_key(api_key)
            .model(config.model.as_str())
            .max_tokens(config.max_tokens)
            .temperature(config.temperature)
            .build()?;

        Ok(Self {
            provider,
            timeout: Duration::from_secs(config.timeout_secs),
        })
    }

    /// Fetch a wisdom line for a completed computation.
    ///
    /// Always yields displayable text: on any failure the fallback line is
    /// returned and the failure is only logged.
    pub async fn fetch(&self, expression: &str, result: &str) -> String {
        debug!("fetching wisdom for {expression} = {result}");
        absorb(self.request(expression, result).await)
    }

    async fn request(&self, expression: &str, result: &str) -> Result<String, WisdomError> {
        let messages = vec![
            ChatMessage::user()
                .content(build_prompt(expression, result))
                .build(),
        ];

        let response = tokio::time::timeout(self.timeout, self.provider.chat(&messages))
            .await
            .map_err(|_| WisdomError::Timeout(self.timeout))??;

        let text = response
            .text()
            .map(|text| text.trim().to_string())
            .unwrap_or_default();
        if text.is_empty() {
            return Err(WisdomError::EmptyResponse);
        }
        Ok(text)
    }
}

/// Collapse a request outcome into displayable text.
fn absorb(outcome: Result<String, WisdomError>) -> String {
    match outcome {
        Ok(text) => text,
        Err(error) => {
            warn!("wisdom fetch failed: {error}");
            WISDOM_FALLBACK.to_string()
        }
    }
}

fn build_prompt(expression: &str, result: &str) -> String {
    format!(
        "You are Al-Khwarizmi, the Persian polymath and father of algebra. \
         The user just calculated: {expression} = {result}. \
         Provide a very short, poetic, or historical insight related to this \
         number or the concept of mathematics. \
         Speak in a wise, ancient Persian tone (but in modern readable Persian/Farsi). \
         Keep it under 30 words."
    )
}

fn parse_backend(name: &str) -> Result<LLMBackend, WisdomError> {
    match name.to_ascii_lowercase().as_str() {
        "google" | "gemini" => Ok(LLMBackend::Google),
        "openai" => Ok(LLMBackend::OpenAI),
        "anthropic" => Ok(LLMBackend::Anthropic),
        "ollama" => Ok(LLMBackend::Ollama),
        _ => Err(WisdomError::UnknownBackend(name.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_embeds_expression_and_result() {
        let prompt = build_prompt("7 + 3", "10");
        assert!(prompt.contains("7 + 3 = 10"));
        assert!(prompt.contains("Al-Khwarizmi"));
        assert!(prompt.contains("under 30 words"));
    }

    #[test]
    fn test_failures_absorbed_into_fallback() {
        assert_eq!(
            absorb(Err(WisdomError::Timeout(Duration::from_secs(15)))),
            WISDOM_FALLBACK
        );
        assert_eq!(absorb(Err(WisdomError::EmptyResponse)), WISDOM_FALLBACK);
        assert_eq!(absorb(Ok("insight".to_string())), "insight");
    }

    #[test]
    fn test_backend_names() {
        assert!(parse_backend("google").is_ok());
        assert!(parse_backend("Gemini").is_ok());
        assert!(parse_backend("openai").is_ok());
        assert!(matches!(
            parse_backend("abacus"),
            Err(WisdomError::UnknownBackend(_))
        ));
    }
}
