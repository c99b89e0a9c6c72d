//! Error types for the Extractor

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during extraction
#[derive(Error, Debug)]
pub enum ExtractorError {
    /// LLM provider error
    #[error("LLM error: {0}")]
    Llm(String),

    /// Extraction timeout
    #[error("Extraction timeout after {0}s")]
    Timeout(u64),

    /// The reply contained no JSON object
    #[error("No JSON object in LLM reply")]
    NoJsonObject,

    /// The reply parsed but was not usable
    #[error("Invalid extraction format: {0}")]
    InvalidFormat(String),

    /// JSON parsing error
    #[error("JSON parse error: {0}")]
    JsonParse(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Input or output file error
    #[error("I/O error on {path}: {message}")]
    Io {
        /// File involved
        path: PathBuf,
        /// Underlying error text
        message: String,
    },
}

impl ExtractorError {
    /// Whether this failure means the oracle is rate-limiting us
    ///
    /// Only provider errors qualify; the marker is "429" or "rate limit" in
    /// any casing.
    pub fn is_rate_limited(&self) -> bool {
        match self {
            ExtractorError::Llm(message) => {
                message.contains("429") || message.to_lowercase().contains("rate limit")
            }
            _ => false,
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, err: impl std::fmt::Display) -> Self {
        ExtractorError::Io {
            path: path.into(),
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for ExtractorError {
    fn from(e: serde_json::Error) -> Self {
        ExtractorError::JsonParse(e.to_string())
    }
}
