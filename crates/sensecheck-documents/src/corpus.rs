//! In-memory corpus of uploaded documents

use crate::chunking::DocumentChunker;
use crate::config::DocumentsConfig;
use crate::decode::{read_pdf_text, read_workbook};
use crate::error::{DocumentError, Result};
use sensecheck_domain::{Document, DocumentChunk, DocumentId, DocumentKind};
use std::path::Path;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{info, warn};

/// Listing entry for a stored document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentSummary {
    /// Identifier
    pub id: DocumentId,
    /// Original file name
    pub file_name: String,
    /// Format
    pub kind: DocumentKind,
    /// Upload time, seconds since the Unix epoch
    pub upload_time: u64,
    /// Chunks produced at upload
    pub chunk_count: usize,
}

impl From<&Document> for DocumentSummary {
    fn from(doc: &Document) -> Self {
        Self {
            id: doc.id,
            file_name: doc.file_name.clone(),
            kind: doc.kind,
            upload_time: doc.upload_time,
            chunk_count: doc.chunks.len(),
        }
    }
}

/// A chunk matched by [`DocumentCorpus::search`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    /// Document holding the chunk
    pub document_id: DocumentId,
    /// The matching chunk
    pub chunk: DocumentChunk,
}

/// Volatile store of uploaded documents and their chunks
///
/// Documents are kept in upload order. Deleting a document removes its
/// whole chunk set in one step.
pub struct DocumentCorpus {
    documents: RwLock<Vec<Document>>,
    chunker: DocumentChunker,
    config: DocumentsConfig,
}

impl DocumentCorpus {
    /// Create an empty corpus
    pub fn new(config: DocumentsConfig) -> Self {
        Self {
            documents: RwLock::new(Vec::new()),
            chunker: DocumentChunker::new(config.chunk_chars),
            config,
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, Vec<Document>> {
        self.documents.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<Document>> {
        self.documents.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// The active configuration
    pub fn config(&self) -> &DocumentsConfig {
        &self.config
    }

    /// Store an already-chunked document
    ///
    /// # Errors
    ///
    /// `InvalidInput` when the corpus is full.
    pub fn add(&self, document: Document) -> Result<DocumentId> {
        let mut documents = self.write();
        if documents.len() >= self.config.max_documents {
            return Err(full_corpus(self.config.max_documents));
        }
        let id = document.id;
        info!(
            "Stored {} ({} chunks), corpus now holds {} documents",
            document.file_name,
            document.chunks.len(),
            documents.len() + 1
        );
        documents.push(document);
        Ok(id)
    }

    /// Decode, chunk and store a file from disk
    ///
    /// The kind is detected from the extension.
    pub fn ingest(&self, path: &Path) -> Result<DocumentSummary> {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let kind = DocumentKind::from_extension(&file_name).ok_or_else(|| {
            DocumentError::InvalidInput(format!(
                "Unsupported file type: {}. Only Excel (.xlsx, .xls, .ods) and PDF files are allowed.",
                file_name
            ))
        })?;

        if self.len() >= self.config.max_documents {
            return Err(full_corpus(self.config.max_documents));
        }

        let size = std::fs::metadata(path)?.len();
        if size > self.config.max_file_bytes {
            return Err(DocumentError::InvalidInput(format!(
                "{} is too large: {} bytes, maximum is {}",
                file_name, size, self.config.max_file_bytes
            )));
        }

        info!("Processing {} file: {}", kind.as_str(), file_name);
        let chunks = match kind {
            DocumentKind::Excel => self.chunker.chunk_workbook(&file_name, &read_workbook(path)?),
            DocumentKind::Pdf => self.chunker.chunk_pdf_text(&file_name, &read_pdf_text(path)?),
        };
        if chunks.is_empty() {
            warn!("{} produced no text chunks", file_name);
        }

        let document = Document::new(file_name, kind, chunks);
        let summary = DocumentSummary::from(&document);
        self.add(document)?;
        Ok(summary)
    }

    /// Summaries of every stored document, in upload order
    pub fn list(&self) -> Vec<DocumentSummary> {
        self.read().iter().map(DocumentSummary::from).collect()
    }

    /// A stored document with its chunks
    pub fn get(&self, id: DocumentId) -> Option<Document> {
        self.read().iter().find(|d| d.id == id).cloned()
    }

    /// Remove a document and all of its chunks; false if it was not stored
    pub fn delete(&self, id: DocumentId) -> bool {
        let mut documents = self.write();
        let before = documents.len();
        documents.retain(|d| d.id != id);
        let removed = documents.len() < before;
        if removed {
            info!("Deleted document {}", id);
        }
        removed
    }

    /// Every chunk of every document, in upload order
    pub fn all_chunks(&self) -> Vec<DocumentChunk> {
        self.read()
            .iter()
            .flat_map(|d| d.chunks.iter().cloned())
            .collect()
    }

    /// Chunks whose content contains `query`, ignoring case
    pub fn search(&self, query: &str) -> Vec<SearchHit> {
        let needle = query.to_lowercase();
        self.read()
            .iter()
            .flat_map(|doc| {
                doc.chunks
                    .iter()
                    .filter(|chunk| chunk.content.to_lowercase().contains(&needle))
                    .map(|chunk| SearchHit {
                        document_id: doc.id,
                        chunk: chunk.clone(),
                    })
                    .collect::<Vec<_>>()
            })
            .collect()
    }

    /// Number of stored documents
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Whether no documents are stored
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }
}

impl Default for DocumentCorpus {
    fn default() -> Self {
        Self::new(DocumentsConfig::default())
    }
}

fn full_corpus(max: usize) -> DocumentError {
    DocumentError::InvalidInput(format!(
        "Maximum {} documents allowed. Please delete some documents first.",
        max
    ))
}
