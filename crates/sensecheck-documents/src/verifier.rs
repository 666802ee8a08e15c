//! Judging a claim against the document corpus

use crate::config::DocumentsConfig;
use crate::corpus::DocumentCorpus;
use crate::error::{DocumentError, Result};
use sensecheck_domain::traits::{CompletionRequest, LlmProvider};
use sensecheck_domain::{Citation, Confidence, DocumentChunk, DocumentStatus, DocumentVerdict};
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Reasoning used when the document oracle omits it
pub const DEFAULT_DOCUMENT_REASONING: &str = "Unable to verify claim against documents";

const DOCUMENT_INSTRUCTIONS: &str = r#"You check claims against excerpts from documents the user uploaded. Use only the excerpts provided.

Look for information that supports, contradicts or qualifies the claim. Pay close attention to numbers, dates, percentages and named entities, and note exactly where each relevant passage was found.

Status:
- found: the excerpts clearly support the claim
- contradicted: the excerpts conflict with the claim
- not_found: nothing relevant, or only weak or indirect support

Return exactly one JSON object:
{
  "status": "found" | "contradicted" | "not_found",
  "reasoning": "short explanation of what you found",
  "citations": [
    {"fileName": "document name", "location": "e.g. Sheet: Revenue, Cells: B15 or Page: 23", "content": "the relevant excerpt"}
  ],
  "confidence": 0-10
}"#;

/// Verifies claims against uploaded document chunks
pub struct DocumentVerifier<L: LlmProvider> {
    llm_provider: Arc<L>,
    config: DocumentsConfig,
}

impl<L: LlmProvider> DocumentVerifier<L> {
    /// Create a new document verifier
    pub fn new(llm_provider: L, config: DocumentsConfig) -> Self {
        Self::from_shared(Arc::new(llm_provider), config)
    }

    /// Create a verifier that shares a provider with other components
    pub fn from_shared(llm_provider: Arc<L>, config: DocumentsConfig) -> Self {
        Self {
            llm_provider,
            config,
        }
    }

    /// Judge `claim` against every chunk in `corpus`
    pub async fn verify_against_corpus(
        &self,
        claim: &str,
        corpus: &DocumentCorpus,
    ) -> Result<DocumentVerdict> {
        let chunks = corpus.all_chunks();
        self.verify_against_documents(claim, &chunks).await
    }

    /// Judge `claim` against `chunks`
    ///
    /// No chunks means no oracle call and a `not_found` verdict with
    /// confidence 0. An answer without a usable JSON object degrades to
    /// [`DocumentVerdict::unparseable`].
    ///
    /// # Errors
    ///
    /// `Llm` when the oracle cannot be reached.
    pub async fn verify_against_documents(
        &self,
        claim: &str,
        chunks: &[DocumentChunk],
    ) -> Result<DocumentVerdict> {
        if chunks.is_empty() {
            debug!("No documents uploaded, skipping oracle call");
            return Ok(DocumentVerdict::empty_corpus());
        }

        info!(
            "Verifying claim against {} document chunks",
            chunks.len()
        );

        let user = format!(
            "CLAIM TO VERIFY:\n{}\n\nDOCUMENT EXCERPTS:\n\n{}\n\nIs the claim \"{}\" supported by these documents?",
            claim,
            format_chunks(chunks, self.config.location_cells),
            claim
        );
        let request = CompletionRequest::new(self.config.temperature)
            .with_model(self.config.model.clone())
            .system(DOCUMENT_INSTRUCTIONS)
            .user(user);

        let answer = self
            .llm_provider
            .complete(&request)
            .await
            .map_err(|e| DocumentError::Llm(e.to_string()))?;

        Ok(parse_document_verdict(&answer).unwrap_or_else(|| {
            warn!("Failed to parse document verification answer");
            DocumentVerdict::unparseable()
        }))
    }
}

/// Render chunks as `[Chunk n - file - location]` blocks
pub fn format_chunks(chunks: &[DocumentChunk], location_cells: usize) -> String {
    chunks
        .iter()
        .enumerate()
        .map(|(idx, chunk)| {
            format!(
                "[Chunk {} - {} - {}]\n{}\n---",
                idx + 1,
                chunk.metadata.file_name,
                chunk.metadata.location.describe(location_cells),
                chunk.content.trim_end()
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn field<'a>(obj: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a str> {
    keys.iter()
        .filter_map(|k| obj.get(*k).and_then(Value::as_str))
        .map(str::trim)
        .find(|s| !s.is_empty())
}

fn parse_citation(value: &Value) -> Option<Citation> {
    let obj = value.as_object()?;
    Some(Citation {
        file_name: field(obj, &["fileName", "file_name"])?.to_string(),
        location: field(obj, &["location"]).unwrap_or_default().to_string(),
        content: field(obj, &["content"]).unwrap_or_default().to_string(),
    })
}

/// Read the first `{...}` object of a document oracle answer
///
/// Missing fields default to `not_found` and confidence 5. `None` when no
/// JSON object can be read.
pub fn parse_document_verdict(answer: &str) -> Option<DocumentVerdict> {
    let start = answer.find('{')?;
    let end = answer.rfind('}')?;
    if start >= end {
        return None;
    }
    let Value::Object(obj) = serde_json::from_str::<Value>(&answer[start..=end]).ok()? else {
        return None;
    };

    let status = field(&obj, &["status"])
        .and_then(DocumentStatus::parse)
        .unwrap_or(DocumentStatus::NotFound);

    let reasoning = field(&obj, &["reasoning"])
        .unwrap_or(DEFAULT_DOCUMENT_REASONING)
        .to_string();

    let citations = obj
        .get("citations")
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(parse_citation).collect())
        .unwrap_or_default();

    let confidence = obj
        .get("confidence")
        .and_then(|v| match v {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        })
        .map(Confidence::score)
        .unwrap_or(Confidence::NEUTRAL);

    Some(DocumentVerdict {
        status,
        reasoning,
        citations,
        confidence,
    })
}
