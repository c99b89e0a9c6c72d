//! Chat Completions Provider Implementation
//!
//! Talks to any OpenAI-compatible `/chat/completions` endpoint. The default
//! target is Groq's hosted Llama 3.3 70B at temperature 0.
//!
//! # Features
//!
//! - Explicit configuration object (endpoint, model, key), no global client
//! - Request timeout
//! - HTTP 429 surfaces as [`LlmError::RateLimitExceeded`]
//!
//! No retries. A failed call goes straight back to the caller.
//!
//! # Examples
//!
//! ```no_run
//! use shipmail_llm::{ChatCompletionsProvider, OracleConfig};
//!
//! let config = OracleConfig::new("gsk_example_key");
//! let provider = ChatCompletionsProvider::new(config).unwrap();
//! ```

use crate::LlmError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use shipmail_domain::traits::LlmProvider;
use std::time::Duration;
use tracing::debug;

/// Default chat completions endpoint (Groq, OpenAI-compatible)
pub const DEFAULT_ENDPOINT: &str = "https://api.groq.com/openai/v1/chat/completions";

/// Default model
pub const DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";

/// Default timeout for LLM requests (60 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Connection settings for the oracle endpoint
#[derive(Debug, Clone, PartialEq)]
pub struct OracleConfig {
    /// Full URL of the chat completions endpoint
    pub endpoint: String,

    /// Model identifier sent with every request
    pub model: String,

    /// Bearer token
    pub api_key: String,

    /// Sampling temperature
    pub temperature: f32,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl OracleConfig {
    /// Default endpoint and model with the given key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key: api_key.into(),
            temperature: 0.0,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Override the endpoint
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Override the model
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}

/// Request body for the chat completions API
#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    temperature: f32,
    messages: [ChatMessage<'a>; 2],
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

/// Response from the chat completions API
#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

/// OpenAI-compatible chat completions provider
pub struct ChatCompletionsProvider {
    config: OracleConfig,
    client: reqwest::Client,
}

impl ChatCompletionsProvider {
    /// Create a new provider
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::Config`] if the API key or endpoint is empty, or
    /// if the HTTP client cannot be built.
    pub fn new(config: OracleConfig) -> Result<Self, LlmError> {
        if config.api_key.trim().is_empty() {
            return Err(LlmError::Config("API key is empty".to_string()));
        }
        if config.endpoint.trim().is_empty() {
            return Err(LlmError::Config("endpoint is empty".to_string()));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| LlmError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    /// The configuration this provider was built with
    pub fn config(&self) -> &OracleConfig {
        &self.config
    }

    async fn complete(&self, system_prompt: &str, user_prompt: &str) -> Result<String, LlmError> {
        let body = ChatRequest {
            model: &self.config.model,
            temperature: self.config.temperature,
            messages: [
                ChatMessage {
                    role: "system",
                    content: system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: user_prompt,
                },
            ],
        };

        let response = self
            .client
            .post(&self.config.endpoint)
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::Communication(format!("Request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(error_for_status(status, &self.config.model, error_text));
        }

        let parsed = response
            .json::<ChatResponse>()
            .await
            .map_err(|e| LlmError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

        let content = first_content(parsed)?;
        debug!("Oracle reply: {} chars", content.len());
        Ok(content)
    }
}

#[async_trait]
impl LlmProvider for ChatCompletionsProvider {
    type Error = LlmError;

    async fn generate(&self, system_prompt: &str, user_prompt: &str) -> Result<String, Self::Error> {
        self.complete(system_prompt, user_prompt).await
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }
}

/// Map a non-success HTTP status to an error
fn error_for_status(status: reqwest::StatusCode, model: &str, body: String) -> LlmError {
    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
        LlmError::RateLimitExceeded(body)
    } else if status == reqwest::StatusCode::NOT_FOUND {
        LlmError::ModelNotAvailable(model.to_string())
    } else {
        LlmError::Communication(format!("HTTP {}: {}", status, body))
    }
}

fn first_content(response: ChatResponse) -> Result<String, LlmError> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .map(|content| content.trim().to_string())
        .ok_or_else(|| LlmError::InvalidResponse("No message content in response".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_oracle_config_defaults() {
        let config = OracleConfig::new("key");
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.temperature, 0.0);
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn test_provider_creation() {
        let config = OracleConfig::new("key")
            .with_endpoint("http://localhost:9999/v1/chat/completions")
            .with_model("llama3");
        let provider = ChatCompletionsProvider::new(config).unwrap();
        assert_eq!(provider.model_name(), "llama3");
        assert_eq!(provider.config().endpoint, "http://localhost:9999/v1/chat/completions");
    }

    #[test]
    fn test_provider_rejects_empty_key() {
        let result = ChatCompletionsProvider::new(OracleConfig::new("  "));
        assert!(matches!(result, Err(LlmError::Config(_))));
    }

    #[test]
    fn test_request_body_shape() {
        let body = ChatRequest {
            model: "m",
            temperature: 0.0,
            messages: [
                ChatMessage { role: "system", content: "rules" },
                ChatMessage { role: "user", content: "Subject: s\nBody: b" },
            ],
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["model"], "m");
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["content"], "Subject: s\nBody: b");
    }

    #[test]
    fn test_status_mapping() {
        let err = error_for_status(reqwest::StatusCode::TOO_MANY_REQUESTS, "m", "slow down".into());
        assert!(matches!(err, LlmError::RateLimitExceeded(_)));

        let err = error_for_status(reqwest::StatusCode::NOT_FOUND, "m", String::new());
        assert_eq!(err, LlmError::ModelNotAvailable("m".to_string()));

        let err = error_for_status(reqwest::StatusCode::BAD_GATEWAY, "m", "oops".into());
        assert!(err.to_string().contains("502"));
    }

    #[test]
    fn test_first_content_trims() {
        let response: ChatResponse = serde_json::from_str(
            r#"{"choices": [{"message": {"role": "assistant", "content": "  {\"a\": 1}\n"}}]}"#,
        )
        .unwrap();
        assert_eq!(first_content(response).unwrap(), r#"{"a": 1}"#);
    }

    #[test]
    fn test_first_content_missing() {
        let response: ChatResponse = serde_json::from_str(r#"{"choices": []}"#).unwrap();
        assert!(matches!(first_content(response), Err(LlmError::InvalidResponse(_))));
    }

    #[tokio::test]
    async fn test_connection_error_is_communication() {
        // Nothing listens on port 9; the request fails fast
        let config = OracleConfig::new("key").with_endpoint("http://127.0.0.1:9/v1/chat/completions");
        let provider = ChatCompletionsProvider::new(config).unwrap();

        let result = provider.generate("sys", "user").await;
        assert!(matches!(result, Err(LlmError::Communication(_))));
    }

    // Integration test (requires GROQ_API_KEY and network)
    #[tokio::test]
    #[ignore]
    async fn test_chat_generate_integration() {
        let Ok(key) = std::env::var("GROQ_API_KEY") else {
            return;
        };
        let provider = ChatCompletionsProvider::new(OracleConfig::new(key)).unwrap();
        let reply = provider.generate("Reply with {}", "Subject: ping\nBody: ping").await;
        assert!(reply.is_ok());
    }
}
