//! Core Extractor implementation

use crate::config::ExtractorConfig;
use crate::error::ExtractorError;
use crate::parser::{candidate_to_claim, enforce_claim_limit, parse_llm_response, MAX_CLAIMS};
use crate::prompt::PromptBuilder;
use crate::types::{ExtractionMetadata, ExtractionResult};
use sensecheck_domain::traits::LlmProvider;
use std::sync::Arc;
use std::time::Instant;
use tokio::time::timeout;
use tracing::{debug, info, warn};

/// The Extractor turns a memo into a bounded, ranked set of claims
pub struct Extractor<L>
where
    L: LlmProvider,
{
    llm_provider: Arc<L>,
    config: ExtractorConfig,
    model_name: String,
}

impl<L> Extractor<L>
where
    L: LlmProvider,
{
    /// Create a new Extractor
    pub fn new(llm_provider: L, config: ExtractorConfig) -> Self {
        Self::from_shared(Arc::new(llm_provider), config)
    }

    /// Create an Extractor that shares a provider with other components
    pub fn from_shared(llm_provider: Arc<L>, config: ExtractorConfig) -> Self {
        let model_name = config.model.clone().unwrap_or_else(|| "default".to_string());
        Self {
            llm_provider,
            config,
            model_name,
        }
    }

    /// Create a new Extractor with a specific model name for metadata
    pub fn with_model_name(mut self, model_name: impl Into<String>) -> Self {
        self.model_name = model_name.into();
        self
    }

    /// Extract claims from a memo
    ///
    /// # Errors
    ///
    /// - `InvalidInput` when the memo is outside the configured length range
    /// - `Llm` / `Timeout` when the oracle call fails
    /// - `ExtractionFailure` when the answer holds no parseable claim array
    pub async fn extract(&self, memo: &str) -> Result<ExtractionResult, ExtractorError> {
        let memo_chars = memo.chars().count();
        if memo_chars < self.config.min_memo_chars || memo_chars > self.config.max_memo_chars {
            return Err(ExtractorError::InvalidInput(format!(
                "Memo must be between {} and {} characters (got {})",
                self.config.min_memo_chars, self.config.max_memo_chars, memo_chars
            )));
        }

        let start_time = Instant::now();
        info!("Starting claim extraction, memo length {} chars", memo_chars);

        let request = PromptBuilder::new(memo, self.config.temperature)
            .with_model(self.config.model.clone())
            .build();

        let llm_response = timeout(
            self.config.extraction_timeout(),
            self.llm_provider.complete(&request),
        )
        .await
        .map_err(|_| ExtractorError::Timeout)?
        .map_err(|e| ExtractorError::Llm(e.to_string()))?;

        debug!("LLM response length: {} chars", llm_response.len());

        let parsed = parse_llm_response(&llm_response)?;
        let items_skipped = parsed.items_returned - parsed.candidates.len();
        let well_formed = parsed.candidates.len();

        let candidates = enforce_claim_limit(parsed.candidates);
        let truncated = candidates.len() < well_formed;

        if truncated {
            warn!(
                "Oracle returned {} claims despite instructions, kept the {} most important",
                well_formed, MAX_CLAIMS
            );
        } else if candidates.len() < MAX_CLAIMS {
            warn!(
                "Oracle returned only {} usable claims, requested {}",
                candidates.len(),
                MAX_CLAIMS
            );
        }

        let claims: Vec<_> = candidates
            .into_iter()
            .map(|candidate| candidate_to_claim(candidate, memo_chars))
            .collect();

        let processing_time_ms = start_time.elapsed().as_millis() as u64;

        info!(
            "Extraction complete: {} claims, {} skipped, {}ms",
            claims.len(),
            items_skipped,
            processing_time_ms
        );

        Ok(ExtractionResult {
            claims,
            metadata: ExtractionMetadata {
                timestamp: sensecheck_domain::unix_timestamp(),
                model_name: self.model_name.clone(),
                items_returned: parsed.items_returned,
                items_skipped,
                truncated,
                processing_time_ms,
            },
        })
    }
}
