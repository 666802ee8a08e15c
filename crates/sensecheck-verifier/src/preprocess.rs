//! Context preprocessing: claim + memo → self-contained research question

use crate::prompts::{fallback_research_prompt, preprocessing_request, PREPROCESSING_INSTRUCTIONS};
use sensecheck_domain::traits::{CompletionRequest, LlmProvider};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

/// Whether the memo's subject is a public company or an internal venture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CompanyType {
    /// A real company that exists publicly
    #[default]
    External,
    /// An internal corporate venture or project
    Internal,
}

impl CompanyType {
    /// Get the type name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            CompanyType::External => "external",
            CompanyType::Internal => "internal",
        }
    }

    /// Parse a type name
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "external" => Some(CompanyType::External),
            "internal" => Some(CompanyType::Internal),
            _ => None,
        }
    }

    /// Phrase used in the fallback research question
    pub(crate) fn description(&self) -> &'static str {
        match self {
            CompanyType::External => "an external company",
            CompanyType::Internal => "an internal corporate venture",
        }
    }
}

impl fmt::Display for CompanyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A research question ready for the grounded oracle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResearchPrompt {
    /// The question text
    pub prompt: String,
    /// The claim it was derived from
    pub original_claim: String,
    /// Subject type the question was written for
    pub company_type: CompanyType,
    /// True when the fixed template was used instead of the oracle's rewrite
    pub fallback: bool,
}

/// Rewrites claims into research questions
pub struct ContextPreprocessor<L: LlmProvider> {
    llm_provider: Arc<L>,
    temperature: f32,
    model: Option<String>,
}

impl<L: LlmProvider> ContextPreprocessor<L> {
    /// Create a preprocessor sharing `llm_provider`
    pub fn new(llm_provider: Arc<L>, temperature: f32, model: Option<String>) -> Self {
        Self {
            llm_provider,
            temperature,
            model,
        }
    }

    /// Build a research question for `claim`
    ///
    /// Never fails: a transport error or an empty answer yields the fixed
    /// template with `fallback` set.
    pub async fn preprocess(
        &self,
        claim: &str,
        memo_context: &str,
        company_type: CompanyType,
    ) -> ResearchPrompt {
        let request = CompletionRequest::new(self.temperature)
            .with_model(self.model.clone())
            .system(PREPROCESSING_INSTRUCTIONS)
            .user(preprocessing_request(claim, memo_context, company_type));

        let rewritten = match self.llm_provider.complete(&request).await {
            Ok(answer) if !answer.trim().is_empty() => Some(answer.trim().to_string()),
            Ok(_) => {
                warn!("Preprocessing oracle returned an empty answer, using fallback prompt");
                None
            }
            Err(e) => {
                warn!("Preprocessing failed ({}), using fallback prompt", e);
                None
            }
        };

        let (prompt, fallback) = match rewritten {
            Some(prompt) => (prompt, false),
            None => (fallback_research_prompt(claim, company_type), true),
        };
        debug!("Research prompt: {}", prompt);

        ResearchPrompt {
            prompt,
            original_claim: claim.to_string(),
            company_type,
            fallback,
        }
    }
}
