//! Search-grounded claim verification

use crate::config::VerifierConfig;
use crate::error::VerifierError;
use crate::preprocess::{CompanyType, ContextPreprocessor, ResearchPrompt};
use crate::prompts::{structuring_request, STRUCTURING_INSTRUCTIONS};
use crate::response::{heuristic_fields, parse_structured, ParseOutcome, VerdictFields};
use crate::urls::{extract_urls, merge_urls};
use sensecheck_domain::traits::{CompletionRequest, LlmProvider};
use sensecheck_domain::{Claim, GroundedVerdict, VerdictProvenance, VerificationState};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Verifies claims through a search-grounded oracle
///
/// One verification is three oracle calls: preprocessing (never fatal),
/// the grounded search (fatal on transport failure or an empty answer) and
/// structuring (never fatal; falls back to keyword heuristics).
pub struct GroundedVerifier<L: LlmProvider> {
    llm_provider: Arc<L>,
    preprocessor: ContextPreprocessor<L>,
    config: VerifierConfig,
}

impl<L: LlmProvider> GroundedVerifier<L> {
    /// Create a new verifier
    pub fn new(llm_provider: L, config: VerifierConfig) -> Self {
        Self::from_shared(Arc::new(llm_provider), config)
    }

    /// Create a verifier that shares a provider with other components
    pub fn from_shared(llm_provider: Arc<L>, config: VerifierConfig) -> Self {
        let preprocessor = ContextPreprocessor::new(
            Arc::clone(&llm_provider),
            config.temperature,
            config.preprocessing_model.clone(),
        );
        Self {
            llm_provider,
            preprocessor,
            config,
        }
    }

    /// The active configuration
    pub fn config(&self) -> &VerifierConfig {
        &self.config
    }

    /// Rewrite a claim into a research question
    pub async fn preprocess(
        &self,
        claim: &str,
        memo_context: &str,
        company_type: CompanyType,
    ) -> ResearchPrompt {
        self.preprocessor
            .preprocess(claim, memo_context, company_type)
            .await
    }

    /// Ask the grounded oracle and interpret its answer
    ///
    /// # Errors
    ///
    /// - `Transport` when the grounded call fails
    /// - `EmptyAnswer` when it answers with only whitespace
    pub async fn verify(&self, research: &ResearchPrompt) -> Result<GroundedVerdict, VerifierError> {
        let request = CompletionRequest::new(self.config.temperature)
            .with_model(self.config.grounded_model.clone())
            .user(research.prompt.clone());

        let answer = self
            .llm_provider
            .complete(&request)
            .await
            .map_err(|e| VerifierError::Transport(e.to_string()))?;

        if answer.trim().is_empty() {
            return Err(VerifierError::EmptyAnswer);
        }
        debug!("Grounded answer length: {} chars", answer.len());

        let harvested = extract_urls(&answer);
        debug!("Harvested {} source URLs from grounded answer", harvested.len());

        let (fields, provenance) =
            match self.structure(&research.original_claim, &answer, &harvested).await {
                ParseOutcome::Parsed(fields) => (fields, VerdictProvenance::Structured),
                ParseOutcome::Heuristic(fields) => (fields, VerdictProvenance::Heuristic),
                ParseOutcome::Unparseable => {
                    warn!("Structuring answer unusable, falling back to keyword heuristics");
                    (
                        heuristic_fields(&answer, self.config.reasoning_excerpt_chars),
                        VerdictProvenance::Heuristic,
                    )
                }
            };

        let VerdictFields {
            status,
            reasoning,
            sources,
            confidence,
        } = fields;

        Ok(GroundedVerdict {
            status,
            reasoning,
            sources: merge_urls(sources.iter().chain(harvested.iter())),
            confidence,
            search_prompt: research.prompt.clone(),
            search_query: research.original_claim.clone(),
            provenance,
        })
    }

    /// Full pipeline for one claim: preprocess, verify, update its state
    ///
    /// The claim is `verifying` during the call and ends `verified` or
    /// `verification_error`. A negative verdict is still `verified`.
    pub async fn verify_claim(
        &self,
        claim: &mut Claim,
        memo_context: &str,
        company_type: CompanyType,
    ) -> Result<GroundedVerdict, VerifierError> {
        let start = Instant::now();
        claim.verification_state = VerificationState::Verifying;
        info!("Verifying claim {}", claim.id);

        let research = self.preprocess(&claim.text, memo_context, company_type).await;

        match self.verify(&research).await {
            Ok(verdict) => {
                claim.verification_state = VerificationState::Verified;
                info!(
                    "Claim {} verified as {} ({}, {}ms)",
                    claim.id,
                    verdict.status.as_str(),
                    verdict.provenance.as_str(),
                    start.elapsed().as_millis()
                );
                Ok(verdict)
            }
            Err(e) => {
                claim.verification_state = VerificationState::VerificationError;
                warn!("Verification of claim {} failed: {}", claim.id, e);
                Err(e)
            }
        }
    }

    async fn structure(&self, claim: &str, answer: &str, harvested: &[String]) -> ParseOutcome {
        let request = CompletionRequest::new(self.config.temperature)
            .with_model(self.config.structuring_model.clone())
            .system(STRUCTURING_INSTRUCTIONS)
            .user(structuring_request(claim, answer, harvested));

        match self.llm_provider.complete(&request).await {
            Ok(structured) => parse_structured(&structured),
            Err(e) => {
                warn!("Structuring call failed: {}", e);
                ParseOutcome::Unparseable
            }
        }
    }
}
