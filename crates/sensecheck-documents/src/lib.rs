//! SenseCheck Documents
//!
//! Chunks uploaded spreadsheets and PDFs, keeps them in a bounded in-memory
//! corpus, and judges claims against the corpus with a document oracle.
//!
//! # Architecture
//!
//! ```text
//! file → decode (calamine | pdf-extract) → DocumentChunker → DocumentCorpus
//! claim + corpus chunks → DocumentVerifier → LLM → DocumentVerdict
//! ```
//!
//! # Chunking Rules
//!
//! - Spreadsheets: one line per non-empty row, cells joined with `" | "`;
//!   rows are never split across chunks and each sheet starts a new chunk
//! - PDFs: blank lines separate pages; long pages split on sentence
//!   boundaries, or hard-split when a page has none
//!
//! # Example Usage
//!
//! ```no_run
//! use sensecheck_documents::{DocumentCorpus, DocumentVerifier, DocumentsConfig};
//! use sensecheck_llm::MockProvider;
//! use std::path::Path;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let corpus = DocumentCorpus::new(DocumentsConfig::default());
//! corpus.ingest(Path::new("financials.xlsx"))?;
//!
//! let verifier = DocumentVerifier::new(MockProvider::default(), DocumentsConfig::default());
//! let verdict = verifier.verify_against_corpus("Revenue was $10M", &corpus).await?;
//! println!("{}: {}", verdict.status.as_str(), verdict.reasoning);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod chunking;
mod config;
mod corpus;
mod decode;
mod error;
mod verifier;

pub use chunking::{cell_address, DocumentChunker, SheetGrid};
pub use config::DocumentsConfig;
pub use corpus::{DocumentCorpus, DocumentSummary, SearchHit};
pub use decode::{read_pdf_text, read_workbook};
pub use error::{DocumentError, Result};
pub use verifier::{
    format_chunks, parse_document_verdict, DocumentVerifier, DEFAULT_DOCUMENT_REASONING,
};
