//! Check command implementation: extract, then verify every claim.

use crate::cli::CheckArgs;
use crate::commands::{load_corpus, read_text};
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::{ClaimReport, Formatter};
use sensecheck_documents::DocumentVerifier;
use sensecheck_domain::traits::LlmProvider;
use sensecheck_extractor::Extractor;
use sensecheck_verifier::{CompanyType, GroundedVerifier};
use std::sync::Arc;
use tracing::{info, warn};

/// Execute the check command.
///
/// Claims are verified one after another. A claim whose verification fails
/// is reported as such; the run continues with the next claim.
pub async fn execute_check<L: LlmProvider>(
    args: CheckArgs,
    provider: Arc<L>,
    config: &Config,
    formatter: &Formatter,
) -> Result<String> {
    if args.skip_web && args.documents.is_empty() {
        return Err(CliError::InvalidInput(
            "Nothing to verify against: pass --document or drop --skip-web".into(),
        ));
    }

    let memo = read_text(&args.source)?;
    let corpus = if args.documents.is_empty() {
        None
    } else {
        Some(load_corpus(&args.documents, &config.documents)?)
    };

    let extraction = Extractor::from_shared(Arc::clone(&provider), config.extractor.clone())
        .extract(&memo)
        .await?;
    info!("Checking {} claims", extraction.claims.len());

    let grounded = (!args.skip_web)
        .then(|| GroundedVerifier::from_shared(Arc::clone(&provider), config.verifier.clone()));
    let documents = DocumentVerifier::from_shared(provider, config.documents.clone());
    let company_type: CompanyType = args.company_type.into();

    let mut reports = Vec::with_capacity(extraction.claims.len());
    for (idx, mut claim) in extraction.claims.into_iter().enumerate() {
        info!("Claim {}: {}", idx + 1, claim.text);

        let grounded = match &grounded {
            Some(verifier) => Some(
                verifier
                    .verify_claim(&mut claim, &memo, company_type)
                    .await
                    .map_err(|e| {
                        warn!("Web verification failed for claim {}: {}", idx + 1, e);
                        e.to_string()
                    }),
            ),
            None => None,
        };

        let document = match &corpus {
            Some(corpus) => Some(
                documents
                    .verify_against_corpus(&claim.text, corpus)
                    .await
                    .map_err(|e| {
                        warn!("Document verification failed for claim {}: {}", idx + 1, e);
                        e.to_string()
                    }),
            ),
            None => None,
        };

        reports.push(ClaimReport {
            claim,
            grounded,
            document,
        });
    }

    formatter.format_reports(&reports)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{CompanyTypeArg, TextSource};
    use crate::config::OutputFormat;
    use sensecheck_domain::VerificationState;
    use sensecheck_llm::MockProvider;
    use serde_json::Value;

    const MEMO: &str = "TechFlow reported revenue of $10M in fiscal 2024 and serves 40 enterprise customers across Europe.";

    fn args(skip_web: bool) -> CheckArgs {
        CheckArgs {
            source: TextSource {
                text: Some(MEMO.to_string()),
                file: None,
                stdin: false,
            },
            company_type: CompanyTypeArg::External,
            documents: Vec::new(),
            skip_web,
        }
    }

    const GROUNDED_ANSWER: &str =
        "Yes. The 2024 annual report states revenue of $10M [1].\n[1]: https://techflow.example.com/annual-report-2024";

    const EXTRACTION_ANSWER: &str = r#"[{"text": "TechFlow reported revenue of $10M in fiscal 2024", "category": "financial", "importance": 9, "range": [0, 49]},
        {"text": "TechFlow serves 40 enterprise customers", "category": "operational", "importance": 7}]"#;

    fn add_verification_rules(provider: &MockProvider) {
        provider.add_rule("You write research questions", "Did TechFlow report $10M revenue in fiscal 2024?");
        provider.add_rule(
            "You convert a fact-checking answer",
            r#"{"status": "verified_true", "reasoning": "Annual report confirms it.", "sources": [], "confidence": 8}"#,
        );
    }

    fn scripted_provider() -> Arc<MockProvider> {
        let provider = MockProvider::new(GROUNDED_ANSWER);
        provider.add_rule("Extract EXACTLY", EXTRACTION_ANSWER);
        add_verification_rules(&provider);
        Arc::new(provider)
    }

    #[tokio::test]
    async fn test_check_verifies_every_claim() {
        let provider = scripted_provider();
        let formatter = Formatter::new(OutputFormat::Json, false);

        let output = execute_check(args(false), Arc::clone(&provider), &Config::default(), &formatter)
            .await
            .unwrap();
        let value: Value = serde_json::from_str(&output).unwrap();
        let reports = value.as_array().unwrap();

        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0]["grounded"]["status"], "verified_true");
        assert_eq!(
            reports[0]["grounded"]["sources"][0],
            "https://techflow.example.com/annual-report-2024"
        );
        assert_eq!(
            reports[0]["claim"]["verificationState"],
            VerificationState::Verified.as_str()
        );
        assert!(reports[1]["document"].is_null());
        // one extraction call, then three calls per claim
        assert_eq!(provider.call_count(), 7);
    }

    #[tokio::test]
    async fn test_failed_claim_does_not_stop_the_run() {
        // The second claim's preprocessing fails, so its grounded call carries
        // the fallback template, which is made to fail too.
        let provider = MockProvider::new(GROUNDED_ANSWER);
        provider.add_rule("Extract EXACTLY", EXTRACTION_ANSWER);
        provider.add_error_rule("CLAIM TO VERIFY:\nTechFlow serves 40");
        provider.add_error_rule("investment memo: \"TechFlow serves 40");
        add_verification_rules(&provider);
        let formatter = Formatter::new(OutputFormat::Quiet, false);

        let output = execute_check(args(false), Arc::new(provider), &Config::default(), &formatter)
            .await
            .unwrap();
        let lines: Vec<_> = output.lines().collect();
        assert_eq!(
            lines,
            vec![
                "verified_true\tTechFlow reported revenue of $10M in fiscal 2024",
                "verification_error\tTechFlow serves 40 enterprise customers",
            ]
        );
    }

    #[tokio::test]
    async fn test_skip_web_without_documents_is_rejected() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let result =
            execute_check(args(true), scripted_provider(), &Config::default(), &formatter).await;
        assert!(matches!(result, Err(CliError::InvalidInput(_))));
    }
}
