//! SenseCheck Extractor
//!
//! Turns an investment memo into a bounded set of categorized, ranged claims
//! using an extraction oracle.
//!
//! # Architecture
//!
//! ```text
//! Memo → Extractor → LLM → JSON array → Claims (≤ 10, ranked by importance)
//! ```
//!
//! # Key Features
//!
//! - **Input validation**: memos outside 50..=10 000 characters are rejected
//!   before any oracle call
//! - **Tolerant parsing**: prose around the array is ignored; malformed items
//!   are skipped individually
//! - **Deterministic bound**: never more than [`MAX_CLAIMS`] claims, truncated
//!   by descending importance
//! - **Clamping**: confidence and importance to 1-10, ranges to the memo
//!
//! # Example Usage
//!
//! ```no_run
//! use sensecheck_extractor::{Extractor, ExtractorConfig};
//! use sensecheck_llm::MockProvider;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let llm = MockProvider::new(r#"[{"text": "Revenue was $10M", "category": "financial"}]"#);
//! let extractor = Extractor::new(llm, ExtractorConfig::default());
//!
//! let result = extractor
//!     .extract("Revenue was $10M in fiscal 2024, up from $6M the year before, per the CFO.")
//!     .await?;
//!
//! println!("Extracted {} claims", result.claims.len());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod extractor;
mod parser;
mod prompt;
mod types;


pub use config::ExtractorConfig;
pub use error::ExtractorError;
pub use extractor::Extractor;
pub use parser::MAX_CLAIMS;
pub use types::{ExtractionMetadata, ExtractionResult};
