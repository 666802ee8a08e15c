//! Claim module - the unit of extraction and grounded verification

use crate::Confidence;
use std::fmt;

/// Unique identifier for a claim based on UUIDv7
///
/// UUIDv7 provides:
/// - Chronological sortability, so claims keep extraction order
/// - 128-bit uniqueness without coordination
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClaimId(u128);

impl ClaimId {
    /// Generate a new UUIDv7-based ClaimId
    ///
    /// # Examples
    ///
    /// ```
    /// use sensecheck_domain::ClaimId;
    ///
    /// let id = ClaimId::new();
    /// assert!(id.value() > 0);
    /// ```
    pub fn new() -> Self {
        Self(uuid::Uuid::now_v7().as_u128())
    }

    /// Create a ClaimId from a raw u128 value
    pub fn from_value(value: u128) -> Self {
        Self(value)
    }

    /// Parse a ClaimId from a UUID string
    ///
    /// # Examples
    ///
    /// ```
    /// use sensecheck_domain::ClaimId;
    ///
    /// let id = ClaimId::new();
    /// let parsed = ClaimId::from_string(&id.to_string()).unwrap();
    /// assert_eq!(id, parsed);
    /// ```
    pub fn from_string(s: &str) -> Result<Self, String> {
        uuid::Uuid::parse_str(s)
            .map(|u| Self(u.as_u128()))
            .map_err(|e| format!("Invalid claim id: {}", e))
    }

    /// Get the raw u128 value
    pub fn value(&self) -> u128 {
        self.0
    }
}

impl Default for ClaimId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ClaimId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", uuid::Uuid::from_u128(self.0))
    }
}

/// Business category of a claim
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClaimCategory {
    /// Revenue, costs, margins, ROI
    Financial,
    /// Market sizes, growth rates, competitors
    Market,
    /// Deployments, customers, technical capabilities
    Operational,
    /// Anything else
    Other,
}

impl ClaimCategory {
    /// Get the category name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            ClaimCategory::Financial => "financial",
            ClaimCategory::Market => "market",
            ClaimCategory::Operational => "operational",
            ClaimCategory::Other => "other",
        }
    }

    /// Parse a category, case-insensitively
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "financial" => Some(ClaimCategory::Financial),
            "market" => Some(ClaimCategory::Market),
            "operational" => Some(ClaimCategory::Operational),
            "other" => Some(ClaimCategory::Other),
            _ => None,
        }
    }
}

/// Product judgment recorded against a claim by a reviewer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClaimStatus {
    /// Not yet judged
    Unverified,
    /// Judged true
    True,
    /// Judged false
    False,
    /// Judged to be an assumption rather than a fact
    Assumption,
}

impl ClaimStatus {
    /// Get the status name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            ClaimStatus::Unverified => "unverified",
            ClaimStatus::True => "true",
            ClaimStatus::False => "false",
            ClaimStatus::Assumption => "assumption",
        }
    }

    /// Parse a status string
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "unverified" => Some(ClaimStatus::Unverified),
            "true" => Some(ClaimStatus::True),
            "false" => Some(ClaimStatus::False),
            "assumption" => Some(ClaimStatus::Assumption),
            _ => None,
        }
    }
}

/// Progress of the pipeline's own verification of a claim
///
/// `VerificationError` means the pipeline could not finish; it is never a
/// negative verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VerificationState {
    /// No verification requested yet
    Idle,
    /// A verification call is in flight
    Verifying,
    /// A verdict was produced
    Verified,
    /// The pipeline failed before producing a verdict
    VerificationError,
}

impl VerificationState {
    /// Get the state name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            VerificationState::Idle => "idle",
            VerificationState::Verifying => "verifying",
            VerificationState::Verified => "verified",
            VerificationState::VerificationError => "verification_error",
        }
    }
}

/// Half-open character range `[start, end)` into the source text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextRange {
    /// First character (inclusive)
    pub start: usize,
    /// Last character (exclusive)
    pub end: usize,
}

impl TextRange {
    /// Create a range, swapping the bounds if they arrive reversed
    pub fn new(start: usize, end: usize) -> Self {
        if start <= end {
            Self { start, end }
        } else {
            Self { start: end, end: start }
        }
    }

    /// Clamp both bounds to a text of `len` characters
    pub fn clamp_to(self, len: usize) -> Self {
        Self::new(self.start.min(len), self.end.min(len))
    }

    /// Number of characters covered
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Whether the range covers no characters
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Slice the covered characters out of `text`
    ///
    /// Offsets are character offsets, not byte offsets. Returns `None` when
    /// the range does not fit the text.
    ///
    /// # Examples
    ///
    /// ```
    /// use sensecheck_domain::TextRange;
    ///
    /// let range = TextRange::new(12, 16);
    /// assert_eq!(range.slice("Revenue was $10M."), Some("$10M"));
    /// ```
    pub fn slice<'a>(&self, text: &'a str) -> Option<&'a str> {
        let byte_at = |char_idx: usize| -> Option<usize> {
            if char_idx == text.chars().count() {
                Some(text.len())
            } else {
                text.char_indices().nth(char_idx).map(|(i, _)| i)
            }
        };
        let start = byte_at(self.start)?;
        let end = byte_at(self.end)?;
        text.get(start..end)
    }
}

/// A claim extracted from memo text
#[derive(Debug, Clone, PartialEq)]
pub struct Claim {
    /// Unique identifier
    pub id: ClaimId,

    /// Full, self-contained claim text
    pub text: String,

    /// Business category
    pub category: ClaimCategory,

    /// How specific and verifiable the claim appears (1-10)
    pub confidence: Confidence,

    /// How critical the claim is to the decision (1-10)
    pub importance: Confidence,

    /// Location of the claim in the original memo
    pub range: TextRange,

    /// Reviewer judgment
    pub status: ClaimStatus,

    /// Pipeline verification progress
    pub verification_state: VerificationState,
}

impl Claim {
    /// Create a new unverified claim
    pub fn new(text: impl Into<String>, category: ClaimCategory, range: TextRange) -> Self {
        Self {
            id: ClaimId::new(),
            text: text.into(),
            category,
            confidence: Confidence::NEUTRAL,
            importance: Confidence::NEUTRAL,
            range,
            status: ClaimStatus::Unverified,
            verification_state: VerificationState::Idle,
        }
    }

    /// The memo excerpt this claim was extracted from
    pub fn excerpt<'a>(&self, memo: &'a str) -> Option<&'a str> {
        self.range.slice(memo)
    }
}
