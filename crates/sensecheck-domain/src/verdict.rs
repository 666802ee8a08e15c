//! Verdict types produced by the two claim verifiers

use crate::Confidence;

/// Outcome of search-grounded verification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GroundedStatus {
    /// Evidence supports the claim
    VerifiedTrue,
    /// Evidence contradicts the claim
    VerifiedFalse,
    /// Some parts hold, others do not
    PartiallyTrue,
    /// The answer depends on context the claim lacks
    NeedsContext,
    /// No usable evidence was found
    CannotFindAnswer,
}

impl GroundedStatus {
    /// Get the status name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            GroundedStatus::VerifiedTrue => "verified_true",
            GroundedStatus::VerifiedFalse => "verified_false",
            GroundedStatus::PartiallyTrue => "partially_true",
            GroundedStatus::NeedsContext => "needs_context",
            GroundedStatus::CannotFindAnswer => "cannot_find_answer",
        }
    }

    /// Parse a status name
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "verified_true" => Some(GroundedStatus::VerifiedTrue),
            "verified_false" => Some(GroundedStatus::VerifiedFalse),
            "partially_true" => Some(GroundedStatus::PartiallyTrue),
            "needs_context" => Some(GroundedStatus::NeedsContext),
            "cannot_find_answer" => Some(GroundedStatus::CannotFindAnswer),
            _ => None,
        }
    }
}

/// Which parse tier produced a grounded verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VerdictProvenance {
    /// The structuring oracle returned usable JSON
    Structured,
    /// Derived from keywords in the grounded prose
    Heuristic,
}

impl VerdictProvenance {
    /// Get the provenance name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            VerdictProvenance::Structured => "structured",
            VerdictProvenance::Heuristic => "heuristic",
        }
    }
}

/// Verdict for one claim checked against search-grounded evidence
#[derive(Debug, Clone, PartialEq)]
pub struct GroundedVerdict {
    /// Outcome
    pub status: GroundedStatus,
    /// Explanation
    pub reasoning: String,
    /// Absolute source URLs, deduplicated
    pub sources: Vec<String>,
    /// 1-10
    pub confidence: Confidence,
    /// The research question sent to the grounded oracle
    pub search_prompt: String,
    /// The claim text the question was derived from
    pub search_query: String,
    /// Parse tier that produced this verdict
    pub provenance: VerdictProvenance,
}

/// Outcome of document-grounded verification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentStatus {
    /// A document clearly supports the claim
    Found,
    /// A document conflicts with the claim
    Contradicted,
    /// No relevant support in the corpus
    NotFound,
}

impl DocumentStatus {
    /// Get the status name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentStatus::Found => "found",
            DocumentStatus::Contradicted => "contradicted",
            DocumentStatus::NotFound => "not_found",
        }
    }

    /// Parse a status name
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "found" => Some(DocumentStatus::Found),
            "contradicted" => Some(DocumentStatus::Contradicted),
            "not_found" => Some(DocumentStatus::NotFound),
            _ => None,
        }
    }
}

/// A quoted excerpt backing a document verdict
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Citation {
    /// Source document
    pub file_name: String,
    /// Sheet/cell or page description
    pub location: String,
    /// Relevant excerpt
    pub content: String,
}

/// Verdict for one claim checked against the uploaded documents
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentVerdict {
    /// Outcome
    pub status: DocumentStatus,
    /// Explanation
    pub reasoning: String,
    /// Supporting or conflicting excerpts
    pub citations: Vec<Citation>,
    /// 0-10; 0 means no evidence was consulted
    pub confidence: Confidence,
}

impl DocumentVerdict {
    /// Verdict used when no documents have been uploaded
    pub fn empty_corpus() -> Self {
        Self {
            status: DocumentStatus::NotFound,
            reasoning: "No documents available for verification.".to_string(),
            citations: Vec::new(),
            confidence: Confidence::ZERO,
        }
    }

    /// Verdict used when the oracle answer could not be interpreted
    pub fn unparseable() -> Self {
        Self {
            status: DocumentStatus::NotFound,
            reasoning: "Failed to process document verification results".to_string(),
            citations: Vec::new(),
            confidence: Confidence::ZERO,
        }
    }
}
