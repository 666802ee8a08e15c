//! Error types for document handling

use thiserror::Error;

/// Errors from decoding, storing or verifying against documents
#[derive(Error, Debug)]
pub enum DocumentError {
    /// Unsupported file, oversized file or full corpus
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The file could not be decoded
    #[error("Failed to decode {file_name}: {message}")]
    Decode {
        /// File being decoded
        file_name: String,
        /// Decoder message
        message: String,
    },

    /// The document oracle could not be reached
    #[error("LLM error: {0}")]
    Llm(String),

    /// Filesystem error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for document operations
pub type Result<T> = std::result::Result<T, DocumentError>;
