//! Configuration for the Extractor

use crate::error::ExtractorError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the Extractor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Maximum time for a single oracle call (seconds)
    pub oracle_timeout_secs: u64,

    /// Bodies longer than this many characters are truncated before prompting
    pub max_body_chars: usize,
}

impl ExtractorConfig {
    /// Get the oracle timeout as a Duration
    pub fn oracle_timeout(&self) -> Duration {
        Duration::from_secs(self.oracle_timeout_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ExtractorError> {
        if self.oracle_timeout_secs == 0 {
            return Err(ExtractorError::Config(
                "oracle_timeout_secs must be greater than 0".to_string(),
            ));
        }
        if self.max_body_chars == 0 {
            return Err(ExtractorError::Config(
                "max_body_chars must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for ExtractorConfig {
    /// Default configuration with balanced settings
    fn default() -> Self {
        Self {
            oracle_timeout_secs: 90,
            max_body_chars: 20_000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(ExtractorConfig::default().validate().is_ok());
    }

    #[test]
    fn test_invalid_timeout() {
        let config = ExtractorConfig {
            oracle_timeout_secs: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ExtractorError::Config(_))));
    }

    #[test]
    fn test_invalid_body_limit() {
        let config = ExtractorConfig {
            max_body_chars: 0,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("max_body_chars"));
    }

    #[test]
    fn test_partial_section_uses_defaults() {
        let config: ExtractorConfig = serde_json::from_str(r#"{"oracle_timeout_secs": 15}"#).unwrap();
        assert_eq!(config.oracle_timeout_secs, 15);
        assert_eq!(config.max_body_chars, ExtractorConfig::default().max_body_chars);
    }
}
