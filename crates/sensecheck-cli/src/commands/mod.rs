//! Command implementations.
//!
//! Each command returns its rendered output; `main` prints it. Oracle-backed
//! commands are generic over the provider so they run against a mock in tests.

pub mod check;
pub mod configure;
pub mod documents;
pub mod extract;
pub mod links;
pub mod mission;
pub mod verify;

pub use self::check::execute_check;
pub use self::configure::execute_config;
pub use self::documents::execute_verify_docs;
pub use self::extract::execute_extract;
pub use self::links::execute_links;
pub use self::mission::execute_mission;
pub use self::verify::execute_verify;

use crate::cli::TextSource;
use crate::error::{CliError, Result};
use sensecheck_documents::{DocumentCorpus, DocumentsConfig};
use std::io::Read;
use std::path::PathBuf;
use tracing::info;

/// Read the text named by `source`: inline, from a file or from stdin.
pub fn read_text(source: &TextSource) -> Result<String> {
    if let Some(path) = &source.file {
        return Ok(std::fs::read_to_string(path)?);
    }
    if source.stdin {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        return Ok(text);
    }
    source.text.clone().ok_or_else(|| {
        CliError::InvalidInput("No text given. Pass it inline, with --file or with --stdin.".into())
    })
}

/// Ingest `paths` into a fresh corpus.
pub fn load_corpus(paths: &[PathBuf], config: &DocumentsConfig) -> Result<DocumentCorpus> {
    let corpus = DocumentCorpus::new(config.clone());
    for path in paths {
        let summary = corpus.ingest(path)?;
        info!(
            "Loaded {} ({}, {} chunks)",
            summary.file_name,
            summary.kind.as_str(),
            summary.chunk_count
        );
    }
    Ok(corpus)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_read_inline_text() {
        let source = TextSource {
            text: Some("Revenue was $10M.".to_string()),
            file: None,
            stdin: false,
        };
        assert_eq!(read_text(&source).unwrap(), "Revenue was $10M.");
    }

    #[test]
    fn test_read_file_text() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "From a file").unwrap();
        let source = TextSource {
            text: None,
            file: Some(file.path().to_path_buf()),
            stdin: false,
        };
        assert_eq!(read_text(&source).unwrap(), "From a file");
    }

    #[test]
    fn test_missing_text_is_invalid_input() {
        let source = TextSource {
            text: None,
            file: None,
            stdin: false,
        };
        assert!(matches!(read_text(&source), Err(CliError::InvalidInput(_))));
    }

    #[test]
    fn test_load_corpus_rejects_unsupported_file() {
        let file = tempfile::Builder::new().suffix(".docx").tempfile().unwrap();
        let result = load_corpus(&[file.path().to_path_buf()], &DocumentsConfig::default());
        assert!(matches!(result, Err(CliError::Document(_))));
    }
}
