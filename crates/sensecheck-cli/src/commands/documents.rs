//! Verify-docs command implementation.

use crate::cli::VerifyDocsArgs;
use crate::commands::load_corpus;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use sensecheck_documents::DocumentVerifier;
use sensecheck_domain::traits::LlmProvider;
use std::sync::Arc;

/// Execute the verify-docs command.
pub async fn execute_verify_docs<L: LlmProvider>(
    args: VerifyDocsArgs,
    provider: Arc<L>,
    config: &Config,
    formatter: &Formatter,
) -> Result<String> {
    let corpus = load_corpus(&args.documents, &config.documents)?;
    let verdict = DocumentVerifier::from_shared(provider, config.documents.clone())
        .verify_against_corpus(&args.claim, &corpus)
        .await?;

    formatter.format_document_verdict(&args.claim, &verdict)
}
