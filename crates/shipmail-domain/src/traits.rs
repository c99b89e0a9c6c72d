//! Trait interfaces for external dependencies
//!
//! The domain layer defines these; infrastructure crates implement them.

use async_trait::async_trait;

/// Trait for the language-model oracle that reads emails
///
/// Implemented by `shipmail-llm` (HTTP and mock providers). The reply is
/// free text that is expected, but not guaranteed, to contain one JSON
/// object.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Error type for LLM operations
    ///
    /// Its `Display` text is inspected for rate-limit markers ("429",
    /// "rate limit"), so implementations should keep that wording.
    type Error: std::fmt::Display + Send;

    /// Generate a completion for a system prompt and a user message
    async fn generate(&self, system_prompt: &str, user_prompt: &str) -> Result<String, Self::Error>;

    /// Model identifier, for logging
    fn model_name(&self) -> &str {
        "llm"
    }
}
