//! Error types for the CLI application.

use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Oracle client error
    #[error(transparent)]
    Llm(#[from] sensecheck_llm::LlmError),

    /// Claim extraction error
    #[error(transparent)]
    Extractor(#[from] sensecheck_extractor::ExtractorError),

    /// Grounded verification error
    #[error(transparent)]
    Verifier(#[from] sensecheck_verifier::VerifierError),

    /// Document ingestion or verification error
    #[error(transparent)]
    Document(#[from] sensecheck_documents::DocumentError),

    /// Link validation error
    #[error(transparent)]
    Link(#[from] sensecheck_links::LinkError),

    /// Mission processing error
    #[error(transparent)]
    Mission(#[from] sensecheck_missions::MissionError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
