//! Request and response types for extraction

use sensecheck_domain::Claim;

/// Result of an extraction operation
#[derive(Debug, Clone)]
pub struct ExtractionResult {
    /// At most [`crate::MAX_CLAIMS`] claims, most important first when truncated
    pub claims: Vec<Claim>,

    /// Metadata about the extraction
    pub metadata: ExtractionMetadata,
}

/// Metadata about an extraction operation
#[derive(Debug, Clone)]
pub struct ExtractionMetadata {
    /// Timestamp of extraction (seconds since the Unix epoch)
    pub timestamp: u64,

    /// Model used for extraction
    pub model_name: String,

    /// Items in the oracle's array, before skipping and truncation
    pub items_returned: usize,

    /// Items skipped as malformed
    pub items_skipped: usize,

    /// Whether the claim set was cut down to the limit
    pub truncated: bool,

    /// Processing time in milliseconds
    pub processing_time_ms: u64,
}

/// One well-formed item from the oracle's answer, before clamping
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ClaimCandidate {
    pub text: String,
    pub category: Option<String>,
    pub confidence: Option<f64>,
    pub importance: Option<f64>,
    pub range: Option<(f64, f64)>,
}

impl ClaimCandidate {
    /// Importance used for ranking; missing or zero counts as 5
    pub fn rank(&self) -> f64 {
        match self.importance {
            Some(v) if v.is_finite() && v != 0.0 => v,
            _ => 5.0,
        }
    }
}
