//! SenseCheck Grounded Verifier
//!
//! Checks a single claim against the open web through a search-grounded
//! oracle, and turns the oracle's prose into a typed verdict.
//!
//! # Architecture
//!
//! ```text
//! Claim + memo → ContextPreprocessor → research question
//!              → grounded oracle → prose with citations
//!              → UrlExtractor strategies → source URLs
//!              → structuring oracle → ParseOutcome → GroundedVerdict
//! ```
//!
//! # Failure Policy
//!
//! - Preprocessing failures fall back to a fixed question template
//! - Structuring failures fall back to keyword heuristics over the prose
//! - Only a failed or empty grounded answer is an error, and it is always
//!   distinguishable from a negative verdict
//!
//! # Example Usage
//!
//! ```no_run
//! use sensecheck_domain::{Claim, ClaimCategory, TextRange};
//! use sensecheck_llm::MockProvider;
//! use sensecheck_verifier::{CompanyType, GroundedVerifier, VerifierConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let verifier = GroundedVerifier::new(MockProvider::default(), VerifierConfig::default());
//! let mut claim = Claim::new("Revenue was $10M", ClaimCategory::Financial, TextRange::new(0, 16));
//!
//! let verdict = verifier
//!     .verify_claim(&mut claim, "Revenue was $10M in 2024.", CompanyType::External)
//!     .await?;
//! println!("{} ({} sources)", verdict.status.as_str(), verdict.sources.len());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod grounded;
mod preprocess;
mod prompts;
mod response;
mod urls;

pub use config::VerifierConfig;
pub use error::VerifierError;
pub use grounded::GroundedVerifier;
pub use preprocess::{CompanyType, ContextPreprocessor, ResearchPrompt};
pub use response::{
    classify_keywords, heuristic_fields, parse_heuristic, parse_structured, ParseOutcome,
    VerdictFields, DEFAULT_REASONING,
};
pub use urls::{
    default_extractors, extract_urls, extract_urls_with, merge_urls, trim_url, BareUrls,
    CitationTargets, MarkdownTargets, UrlExtractor,
};
