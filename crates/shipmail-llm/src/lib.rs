//! Shipmail LLM Provider Layer
//!
//! Implementations of the `LlmProvider` trait from `shipmail-domain`.
//!
//! # Providers
//!
//! - `MockProvider`: Deterministic, scripted provider for tests and dry runs
//! - `ChatCompletionsProvider`: OpenAI-compatible `/chat/completions` client
//!   (Groq by default)
//!
//! # Examples
//!
//! ```
//! use shipmail_llm::MockProvider;
//!
//! let mut provider = MockProvider::new("{}");
//! provider.add_response("Subject: rfq-17", r#"{"incoterm": "CIF"}"#);
//! assert_eq!(provider.call_count(), 0);
//! ```

#![warn(missing_docs)]

pub mod chat;

use async_trait::async_trait;
use shipmail_domain::traits::LlmProvider;
use std::sync::{Arc, Mutex, MutexGuard};
use thiserror::Error;

pub use chat::{ChatCompletionsProvider, OracleConfig};

/// Errors that can occur during LLM operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LlmError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Invalid response from LLM
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Rate limit exceeded (HTTP 429)
    #[error("Rate limit exceeded (429): {0}")]
    RateLimitExceeded(String),

    /// Model not available
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// Provider misconfiguration (missing key, bad endpoint)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic error
    #[error("LLM error: {0}")]
    Other(String),
}

/// A scripted reply for [`MockProvider`]
#[derive(Debug, Clone, PartialEq)]
pub enum MockReply {
    /// Return this text
    Text(String),

    /// Fail with this error
    Fail(LlmError),
}

/// Mock LLM provider for deterministic testing
///
/// Replies are chosen by the first registered key that occurs anywhere in
/// the user prompt, in registration order. Unmatched prompts get the
/// default reply.
///
/// # Examples
///
/// ```
/// use shipmail_llm::{LlmError, MockProvider};
///
/// let mut provider = MockProvider::new("{}");
/// provider.add_response("Subject: e1", r#"{"incoterm": "EXW"}"#);
/// provider.add_error("Subject: e2", LlmError::RateLimitExceeded("quota".into()));
/// assert_eq!(provider.call_count(), 0);
/// ```
#[derive(Debug, Clone)]
pub struct MockProvider {
    default_reply: MockReply,
    replies: Arc<Mutex<Vec<(String, MockReply)>>>,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl MockProvider {
    /// Create a new MockProvider with a fixed response for all prompts
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            default_reply: MockReply::Text(response.into()),
            replies: Arc::new(Mutex::new(Vec::new())),
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a MockProvider whose default is to fail
    pub fn failing(error: LlmError) -> Self {
        Self {
            default_reply: MockReply::Fail(error),
            ..Self::new("")
        }
    }

    /// Reply with `response` when the user prompt contains `key`
    pub fn add_response(&mut self, key: impl Into<String>, response: impl Into<String>) {
        lock(&self.replies).push((key.into(), MockReply::Text(response.into())));
    }

    /// Fail with `error` when the user prompt contains `key`
    pub fn add_error(&mut self, key: impl Into<String>, error: LlmError) {
        lock(&self.replies).push((key.into(), MockReply::Fail(error)));
    }

    /// Get the number of times generate was called
    pub fn call_count(&self) -> usize {
        lock(&self.prompts).len()
    }

    /// User prompts received so far, in call order
    pub fn prompts(&self) -> Vec<String> {
        lock(&self.prompts).clone()
    }

    fn reply_for(&self, user_prompt: &str) -> MockReply {
        lock(&self.replies)
            .iter()
            .find(|(key, _)| user_prompt.contains(key.as_str()))
            .map(|(_, reply)| reply.clone())
            .unwrap_or_else(|| self.default_reply.clone())
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new("Default mock response")
    }
}

#[async_trait]
impl LlmProvider for MockProvider {
    type Error = LlmError;

    async fn generate(&self, _system_prompt: &str, user_prompt: &str) -> Result<String, Self::Error> {
        lock(&self.prompts).push(user_prompt.to_string());

        match self.reply_for(user_prompt) {
            MockReply::Text(text) => Ok(text),
            MockReply::Fail(error) => Err(error),
        }
    }

    fn model_name(&self) -> &str {
        "mock"
    }
}

// A panicking test thread must not wedge the other clones.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_provider_default() {
        let provider = MockProvider::new("Test response");
        let result = provider.generate("sys", "any prompt").await;
        assert_eq!(result.unwrap(), "Test response");
    }

    #[tokio::test]
    async fn test_mock_provider_specific_responses() {
        let mut provider = MockProvider::default();
        provider.add_response("hello", "world");
        provider.add_response("foo", "bar");

        assert_eq!(provider.generate("sys", "say hello").await.unwrap(), "world");
        assert_eq!(provider.generate("sys", "foo!").await.unwrap(), "bar");
        assert_eq!(
            provider.generate("sys", "unknown").await.unwrap(),
            "Default mock response"
        );
    }

    #[tokio::test]
    async fn test_mock_provider_first_registered_key_wins() {
        let mut provider = MockProvider::default();
        provider.add_response("Subject: a", "first");
        provider.add_response("Subject: ab", "second");

        assert_eq!(provider.generate("sys", "Subject: abc").await.unwrap(), "first");
    }

    #[tokio::test]
    async fn test_mock_provider_call_count() {
        let provider = MockProvider::new("test");
        assert_eq!(provider.call_count(), 0);

        provider.generate("sys", "prompt1").await.unwrap();
        provider.generate("sys", "prompt2").await.unwrap();
        assert_eq!(provider.call_count(), 2);
        assert_eq!(provider.prompts(), vec!["prompt1", "prompt2"]);
    }

    #[tokio::test]
    async fn test_mock_provider_error() {
        let mut provider = MockProvider::default();
        provider.add_error("bad prompt", LlmError::Other("boom".to_string()));

        let result = provider.generate("sys", "a bad prompt").await;
        assert_eq!(result.unwrap_err(), LlmError::Other("boom".to_string()));
    }

    #[tokio::test]
    async fn test_mock_provider_failing_default() {
        let provider = MockProvider::failing(LlmError::Communication("down".to_string()));
        assert!(provider.generate("sys", "anything").await.is_err());
        assert_eq!(provider.call_count(), 1);
    }

    #[tokio::test]
    async fn test_mock_provider_clone_shares_history() {
        let provider1 = MockProvider::new("test");
        let provider2 = provider1.clone();

        provider1.generate("sys", "test").await.unwrap();

        assert_eq!(provider1.call_count(), 1);
        assert_eq!(provider2.call_count(), 1);
    }

    #[test]
    fn test_rate_limit_display_carries_markers() {
        let message = LlmError::RateLimitExceeded("tokens per minute".to_string()).to_string();
        assert!(message.contains("429"));
        assert!(message.to_lowercase().contains("rate limit"));
    }
}
