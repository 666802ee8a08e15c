//! Error types for grounded verification

use thiserror::Error;

/// Errors that abort a grounded verification
///
/// Format problems in oracle answers are never errors here; they fall
/// through to the heuristic parse tier.
#[derive(Error, Debug)]
pub enum VerifierError {
    /// The grounded oracle could not be reached
    #[error("Transport failure: {0}")]
    Transport(String),

    /// The grounded oracle answered with nothing
    #[error("Grounded oracle returned an empty answer")]
    EmptyAnswer,

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
