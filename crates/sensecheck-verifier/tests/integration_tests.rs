//! End-to-end grounded verification against a scripted oracle
//!
//! Oracle calls are issued in a fixed order (preprocess, grounded search,
//! structuring), so queued mock replies line up with them.

use sensecheck_domain::{
    Claim, ClaimCategory, GroundedStatus, TextRange, VerdictProvenance, VerificationState,
};
use sensecheck_llm::MockProvider;
use sensecheck_verifier::{CompanyType, GroundedVerifier, VerifierConfig, VerifierError};
use std::sync::Arc;

const MEMO: &str = "TechFlow Solutions reports $47.2M ARR as of Q3 2024, up 80% year over year.";

const GROUNDED_ANSWER: &str = "TechFlow's ARR figure is broadly accurate according to its Q3 letter \
    (https://techflow.com/ir/q3-2024-letter). Coverage on https://techflow.com agrees, and \
    [Reuters](https://www.reuters.com/tech/techflow-arr-2024/) reported similar numbers.\n\n\
    [1]: https://www.crunchbase.com/organization/techflow";

fn claim() -> Claim {
    Claim::new(
        "TechFlow has $47.2M ARR as of Q3 2024",
        ClaimCategory::Financial,
        TextRange::new(0, 48),
    )
}

fn verifier(llm: &Arc<MockProvider>) -> GroundedVerifier<MockProvider> {
    GroundedVerifier::from_shared(Arc::clone(llm), VerifierConfig::default())
}

#[tokio::test]
async fn test_structured_verdict_merges_sources() {
    let llm = Arc::new(MockProvider::with_responses([
        "I'm evaluating TechFlow Solutions. Can you verify its $47.2M ARR as of Q3 2024?",
        GROUNDED_ANSWER,
        r#"{"status": "verified_true", "reasoning": "Company filings confirm the figure.",
            "sources": ["https://techflow.com/ir/q3-2024-letter", "https://extra.org/analysis"],
            "searchQuery": "TechFlow ARR", "confidence": 8}"#,
    ]));
    let mut claim = claim();

    let verdict = verifier(&llm)
        .verify_claim(&mut claim, MEMO, CompanyType::External)
        .await
        .unwrap();

    assert_eq!(claim.verification_state, VerificationState::Verified);
    assert_eq!(verdict.status, GroundedStatus::VerifiedTrue);
    assert_eq!(verdict.provenance, VerdictProvenance::Structured);
    assert_eq!(verdict.confidence.value(), 8);
    assert_eq!(verdict.reasoning, "Company filings confirm the figure.");
    assert_eq!(
        verdict.search_prompt,
        "I'm evaluating TechFlow Solutions. Can you verify its $47.2M ARR as of Q3 2024?"
    );
    assert_eq!(verdict.search_query, claim.text);

    // Oracle sources first, then harvested ones; the bare techflow.com domain
    // yields to the deeper letter URL
    assert_eq!(
        verdict.sources,
        vec![
            "https://techflow.com/ir/q3-2024-letter",
            "https://extra.org/analysis",
            "https://www.reuters.com/tech/techflow-arr-2024/",
            "https://www.crunchbase.com/organization/techflow",
        ]
    );

    let requests = llm.requests();
    assert_eq!(requests.len(), 3);
    assert!(requests.iter().all(|r| r.temperature == 0.3));
    assert!(requests[2].prompt_text().contains("- https://techflow.com/ir/q3-2024-letter"));
}

#[tokio::test]
async fn test_unparseable_structuring_uses_heuristics() {
    let llm = Arc::new(MockProvider::with_responses([
        "research question",
        GROUNDED_ANSWER,
        "Sorry, I cannot produce JSON today.",
    ]));
    let mut claim = claim();

    let verdict = verifier(&llm)
        .verify_claim(&mut claim, MEMO, CompanyType::External)
        .await
        .unwrap();

    assert_eq!(verdict.provenance, VerdictProvenance::Heuristic);
    assert_eq!(verdict.status, GroundedStatus::VerifiedTrue);
    assert_eq!(verdict.confidence.value(), 5);
    assert!(verdict.reasoning.ends_with("..."));
    assert_eq!(verdict.sources.len(), 3);
    assert!(!verdict.sources.contains(&"https://techflow.com".to_string()));
}

#[tokio::test]
async fn test_structuring_transport_failure_uses_heuristics() {
    let llm = Arc::new(MockProvider::with_responses([
        "research question",
        "Results are mixed; see https://a.com/report.",
    ]));
    llm.push_error("upstream reset");
    let mut claim = claim();

    let verdict = verifier(&llm)
        .verify_claim(&mut claim, MEMO, CompanyType::Internal)
        .await
        .unwrap();

    assert_eq!(verdict.provenance, VerdictProvenance::Heuristic);
    assert_eq!(verdict.status, GroundedStatus::PartiallyTrue);
    assert_eq!(verdict.sources, vec!["https://a.com/report"]);
    assert_eq!(claim.verification_state, VerificationState::Verified);
}

#[tokio::test]
async fn test_preprocessing_failure_uses_template() {
    let llm = Arc::new(MockProvider::default());
    llm.push_error("timeout");
    llm.push_response(GROUNDED_ANSWER);
    llm.push_response(r#"{"status": "needs_context"}"#);
    let mut claim = claim();

    let verdict = verifier(&llm)
        .verify_claim(&mut claim, MEMO, CompanyType::Internal)
        .await
        .unwrap();

    assert!(verdict
        .search_prompt
        .starts_with("I need to verify this claim from an investment memo"));
    assert!(verdict.search_prompt.contains("an internal corporate venture"));
    assert_eq!(verdict.status, GroundedStatus::NeedsContext);
    assert_eq!(verdict.confidence.value(), 5);
}

#[tokio::test]
async fn test_grounded_transport_failure_is_an_error() {
    let llm = Arc::new(MockProvider::default());
    llm.push_response("research question");
    llm.push_error("connection refused");
    let mut claim = claim();

    let result = verifier(&llm)
        .verify_claim(&mut claim, MEMO, CompanyType::External)
        .await;

    assert!(matches!(result, Err(VerifierError::Transport(_))));
    assert_eq!(claim.verification_state, VerificationState::VerificationError);
    assert_eq!(llm.call_count(), 2);
}

#[tokio::test]
async fn test_empty_grounded_answer_is_an_error() {
    let llm = Arc::new(MockProvider::with_responses(["research question", "  \n "]));
    let mut claim = claim();

    let result = verifier(&llm)
        .verify_claim(&mut claim, MEMO, CompanyType::External)
        .await;

    assert!(matches!(result, Err(VerifierError::EmptyAnswer)));
    assert_eq!(claim.verification_state, VerificationState::VerificationError);
}

#[tokio::test]
async fn test_role_models_are_routed() {
    let llm = Arc::new(MockProvider::with_responses([
        "question",
        "The claim is false per https://x.com/a",
        r#"{"status": "verified_false", "confidence": 9}"#,
    ]));
    let config = VerifierConfig {
        preprocessing_model: Some("fast".to_string()),
        grounded_model: Some("perplexity/sonar-pro".to_string()),
        structuring_model: Some("structurer".to_string()),
        ..VerifierConfig::default()
    };
    let verifier = GroundedVerifier::from_shared(Arc::clone(&llm), config);

    let mut claim = claim();
    let verdict = verifier
        .verify_claim(&mut claim, MEMO, CompanyType::External)
        .await
        .unwrap();
    assert_eq!(verdict.status, GroundedStatus::VerifiedFalse);

    let models: Vec<_> = llm
        .requests()
        .into_iter()
        .map(|r| r.model.unwrap_or_default())
        .collect();
    assert_eq!(models, vec!["fast", "perplexity/sonar-pro", "structurer"]);
}
