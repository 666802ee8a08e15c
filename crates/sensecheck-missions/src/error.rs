//! Error types for mission operations

use thiserror::Error;

/// Errors that can occur while managing or processing missions
#[derive(Error, Debug)]
pub enum MissionError {
    /// Rejected request (missing name, malformed JSON...)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Mission, chapter or link does not exist
    #[error("{0} not found")]
    NotFound(String),

    /// A chapter failed to process; the chapter records the same message
    #[error("Chapter processing failed: {0}")]
    Processing(String),

    /// Link validation rejected the batch
    #[error("Link validation error: {0}")]
    Validation(#[from] sensecheck_links::LinkError),

    /// Storage layer error
    #[error("Storage error: {0}")]
    Store(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for mission operations
pub type Result<T> = std::result::Result<T, MissionError>;
