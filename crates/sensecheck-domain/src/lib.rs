//! SenseCheck Domain Layer
//!
//! This crate contains the core domain model for the SenseCheck evidence
//! verification pipeline. Its only external dependency is `uuid`; it defines
//! the value objects, verdict shapes and trait interfaces that every other
//! crate in the workspace depends upon.
//!
//! ## Key Concepts
//!
//! - **Claim**: A discrete factual assertion extracted from memo text, anchored
//!   to a character range of that text
//! - **Link**: A hyperlink found in text, carrying both a human judgment
//!   (`LinkStatus`) and a machine-probed liveness (`ValidationStatus`)
//! - **Verdict**: The typed outcome of verifying a claim against one evidence
//!   source (search-grounded or document-grounded)
//! - **Chunk**: A bounded, location-tagged fragment of an uploaded document
//! - **Mission / Chapter**: Batched JSON content with derived link rollups
//!
//! ## Architecture
//!
//! - Pure domain logic only
//! - Oracles and storage are reached through the traits in [`traits`]
//! - Infrastructure implementations live in other crates

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod claim;
pub mod confidence;
pub mod document;
pub mod id;
pub mod link;
pub mod mission;
pub mod traits;
pub mod verdict;

// Re-exports for convenience
pub use claim::{Claim, ClaimCategory, ClaimId, ClaimStatus, TextRange, VerificationState};
pub use confidence::Confidence;
pub use document::{ChunkLocation, ChunkMetadata, Document, DocumentChunk, DocumentKind};
pub use id::{ChapterId, DocumentId, MissionId};
pub use link::{Link, LinkStatus, ValidationOutcome, ValidationStatus};
pub use mission::{
    Chapter, ChapterStatus, ChapterSummary, LinksByStatus, Mission, MissionStatus,
    MissionSummary,
};
pub use verdict::{
    Citation, DocumentStatus, DocumentVerdict, GroundedStatus, GroundedVerdict,
    VerdictProvenance,
};

/// Seconds since the Unix epoch, saturating to zero if the clock is before it.
pub fn unix_timestamp() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
