//! LLM prompt engineering for claim extraction

use crate::parser::MAX_CLAIMS;
use sensecheck_domain::traits::CompletionRequest;

/// Builds the extraction request for a memo
pub struct PromptBuilder<'a> {
    memo: &'a str,
    model: Option<String>,
    temperature: f32,
}

impl<'a> PromptBuilder<'a> {
    /// Create a new prompt builder
    pub fn new(memo: &'a str, temperature: f32) -> Self {
        Self {
            memo,
            model: None,
            temperature,
        }
    }

    /// Route the request to a specific model
    pub fn with_model(mut self, model: Option<String>) -> Self {
        self.model = model;
        self
    }

    /// Build the complete extraction request
    pub fn build(&self) -> CompletionRequest {
        let user = format!(
            "Extract EXACTLY {} of the most important factual claims from this memo. \
             Not more, not fewer. Focus on verifiable facts with enough context to check \
             them independently:\n\n{}",
            MAX_CLAIMS, self.memo
        );

        CompletionRequest::new(self.temperature)
            .with_model(self.model.clone())
            .system(EXTRACTION_INSTRUCTIONS)
            .user(user)
    }
}

/// Core extraction instructions for the LLM
const EXTRACTION_INSTRUCTIONS: &str = r#"You are a financial analyst assistant reviewing an investment memo.
Your ONLY task is to extract EXACTLY 10 factual claims: no more, no fewer.

Pick the 10 claims that would make or break the investment decision.

EXTRACT:
- Current market data: sizes and growth rates with timeframes
- Competitive positioning: competitor units sold, pricing, market share
- Financial metrics: revenue, costs, margins, ROI figures
- Technical specifications: measurable capabilities and performance
- Operational data: deployments, customer counts, proven results

DO NOT EXTRACT:
- Targets, milestones or goals ("NPS >= 50", "5 pilots in year 1")
- Fragments without context ("TAM $7B")
- Subjective or unquantified statements ("market leadership")

Each claim must name its subject explicitly (which market, which company),
carry its numbers and timeframes, and be checkable on its own.

For each claim provide:
- text: the complete, self-contained claim
- category: one of "financial", "market", "operational", "other"
- confidence: 1-10, how specific and verifiable the claim is
- range: [start, end] character offsets of the claim in the memo
- importance: 1-10, how critical it is to the investment decision

Respond with a JSON array of EXACTLY 10 objects and nothing else."#;
