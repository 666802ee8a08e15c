//! Error types for link extraction and validation

use thiserror::Error;

/// Errors that can occur while validating links
///
/// Per-link failures are never errors; they are recorded on the link as
/// `ValidationStatus::Error`. These variants only reject a whole request.
#[derive(Error, Debug)]
pub enum LinkError {
    /// Malformed batch request (too many links, zero concurrency)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The HTTP client could not be built
    #[error("HTTP client error: {0}")]
    Client(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<reqwest::Error> for LinkError {
    fn from(e: reqwest::Error) -> Self {
        LinkError::Client(e.to_string())
    }
}
