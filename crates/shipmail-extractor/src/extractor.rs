//! Core Extractor implementation

use crate::config::ExtractorConfig;
use crate::error::ExtractorError;
use crate::parser::parse_llm_response;
use crate::prompt::PromptBuilder;
use crate::types::ExtractionOutcome;
use shipmail_domain::traits::LlmProvider;
use shipmail_domain::{Email, EmailExtraction, PortIndex};
use tokio::time::timeout;
use tracing::{debug, warn};

/// The Extractor turns one email into one normalized record
///
/// It owns the oracle and the port index; both are read-only for the
/// lifetime of a batch.
pub struct Extractor<L>
where
    L: LlmProvider,
{
    llm_provider: L,
    ports: PortIndex,
    config: ExtractorConfig,
}

impl<L> Extractor<L>
where
    L: LlmProvider,
{
    /// Create a new Extractor
    pub fn new(llm_provider: L, ports: PortIndex, config: ExtractorConfig) -> Self {
        Self {
            llm_provider,
            ports,
            config,
        }
    }

    /// The port index used for resolution
    pub fn ports(&self) -> &PortIndex {
        &self.ports
    }

    /// The oracle
    pub fn llm_provider(&self) -> &L {
        &self.llm_provider
    }

    /// The active configuration
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Extract a record from one email, surfacing oracle failures
    pub async fn extract(&self, email: &Email) -> Result<EmailExtraction, ExtractorError> {
        let prompt = PromptBuilder::new(email).with_max_body_chars(self.config.max_body_chars);
        let user_prompt = prompt.user_prompt();
        if prompt.is_body_truncated() {
            warn!(
                "Email '{}': body truncated to {} chars before prompting",
                email.id, self.config.max_body_chars
            );
        }

        debug!("Email '{}': prompt length {} chars", email.id, user_prompt.len());

        let llm_response = timeout(
            self.config.oracle_timeout(),
            self.call_llm(prompt.system_prompt(), &user_prompt),
        )
        .await
        .map_err(|_| ExtractorError::Timeout(self.config.oracle_timeout_secs))??;

        debug!("Email '{}': LLM response length {} chars", email.id, llm_response.len());

        let raw = parse_llm_response(&llm_response)?;
        Ok(EmailExtraction::assemble(email, &raw, &self.ports))
    }

    /// Extract a record and apply the failure policy
    ///
    /// Rate limiting halts; every other failure degrades to a null record.
    pub async fn process(&self, email: &Email) -> ExtractionOutcome {
        match self.extract(email).await {
            Ok(record) => ExtractionOutcome::Extracted(record),
            Err(e) if e.is_rate_limited() => {
                warn!("Email '{}': oracle rate limited: {}", email.id, e);
                ExtractionOutcome::Halt {
                    reason: e.to_string(),
                }
            }
            Err(e) => {
                warn!("Email '{}': extraction failed, writing null record: {}", email.id, e);
                ExtractionOutcome::Fallback {
                    record: EmailExtraction::fallback(email.id.clone()),
                    reason: e.to_string(),
                }
            }
        }
    }

    /// Call the LLM provider
    async fn call_llm(&self, system_prompt: &str, user_prompt: &str) -> Result<String, ExtractorError> {
        self.llm_provider
            .generate(system_prompt, user_prompt)
            .await
            .map_err(|e| ExtractorError::Llm(e.to_string()))
    }
}
