//! Error types for the Extractor

use thiserror::Error;

/// Errors that can occur during extraction
#[derive(Error, Debug)]
pub enum ExtractorError {
    /// The memo is outside the accepted length range; never retried
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The oracle answer contained no usable claim array
    #[error("Extraction failed: {0}")]
    ExtractionFailure(String),

    /// LLM provider error
    #[error("LLM error: {0}")]
    Llm(String),

    /// Extraction timeout
    #[error("Extraction timeout")]
    Timeout,

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for ExtractorError {
    fn from(e: serde_json::Error) -> Self {
        ExtractorError::ExtractionFailure(format!("JSON parse error: {}", e))
    }
}
