//! Verify command implementation.

use crate::cli::VerifyArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use sensecheck_domain::traits::LlmProvider;
use sensecheck_verifier::GroundedVerifier;
use std::sync::Arc;

/// Execute the verify command.
pub async fn execute_verify<L: LlmProvider>(
    args: VerifyArgs,
    provider: Arc<L>,
    config: &Config,
    formatter: &Formatter,
) -> Result<String> {
    let memo_context = match &args.memo {
        Some(path) => std::fs::read_to_string(path)?,
        None => String::new(),
    };

    let verifier = GroundedVerifier::from_shared(provider, config.verifier.clone());
    let research = verifier
        .preprocess(&args.claim, &memo_context, args.company_type.into())
        .await;
    let verdict = verifier.verify(&research).await?;

    formatter.format_grounded(&args.claim, &verdict)
}
