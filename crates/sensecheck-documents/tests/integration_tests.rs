//! Document verification against a scripted oracle

use sensecheck_documents::{DocumentCorpus, DocumentChunker, DocumentError, DocumentVerifier, DocumentsConfig};
use sensecheck_domain::{Confidence, Document, DocumentKind, DocumentStatus};
use sensecheck_llm::MockProvider;
use std::sync::Arc;

fn corpus_with_deck() -> DocumentCorpus {
    let corpus = DocumentCorpus::default();
    let chunker = DocumentChunker::new(800);
    let chunks = chunker.chunk_pdf_text(
        "deck.pdf",
        "TechFlow overview.\n\nRevenue was $10M in fiscal 2024. Gross margin was 62%.",
    );
    corpus
        .add(Document::new("deck.pdf", DocumentKind::Pdf, chunks))
        .unwrap();
    corpus
}

fn verifier(llm: &Arc<MockProvider>) -> DocumentVerifier<MockProvider> {
    DocumentVerifier::from_shared(Arc::clone(llm), DocumentsConfig::default())
}

#[tokio::test]
async fn test_empty_corpus_makes_no_oracle_call() {
    let llm = Arc::new(MockProvider::default());
    let corpus = DocumentCorpus::default();

    let verdict = verifier(&llm)
        .verify_against_corpus("Revenue was $10M", &corpus)
        .await
        .unwrap();

    assert_eq!(verdict.status, DocumentStatus::NotFound);
    assert_eq!(verdict.confidence, Confidence::ZERO);
    assert_eq!(verdict.reasoning, "No documents available for verification.");
    assert_eq!(llm.call_count(), 0);
}

#[tokio::test]
async fn test_found_verdict_with_citation() {
    let llm = Arc::new(MockProvider::new(
        r#"{"status": "found", "reasoning": "Page 2 states revenue of $10M.",
            "citations": [{"fileName": "deck.pdf", "location": "Page: 2", "content": "Revenue was $10M in fiscal 2024."}],
            "confidence": 9}"#,
    ));
    let corpus = corpus_with_deck();

    let verdict = verifier(&llm)
        .verify_against_corpus("Revenue was $10M", &corpus)
        .await
        .unwrap();

    assert_eq!(verdict.status, DocumentStatus::Found);
    assert_eq!(verdict.citations.len(), 1);
    assert_eq!(verdict.citations[0].location, "Page: 2");
    assert_eq!(verdict.confidence.value(), 9);

    let requests = llm.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].temperature, 0.3);
    let prompt = requests[0].prompt_text();
    assert!(prompt.contains("[Chunk 1 - deck.pdf - Page: 1]\nTechFlow overview.\n---"));
    assert!(prompt.contains("[Chunk 2 - deck.pdf - Page: 2]"));
}

#[tokio::test]
async fn test_unparseable_answer_degrades() {
    let llm = Arc::new(MockProvider::new("The documents do not mention revenue."));
    let corpus = corpus_with_deck();

    let verdict = verifier(&llm)
        .verify_against_corpus("Revenue was $10M", &corpus)
        .await
        .unwrap();

    assert_eq!(verdict.status, DocumentStatus::NotFound);
    assert_eq!(verdict.confidence, Confidence::ZERO);
    assert_eq!(verdict.reasoning, "Failed to process document verification results");
}

#[tokio::test]
async fn test_transport_failure_propagates() {
    let llm = Arc::new(MockProvider::default());
    llm.push_error("connection reset");
    let corpus = corpus_with_deck();

    let result = verifier(&llm)
        .verify_against_corpus("Revenue was $10M", &corpus)
        .await;

    assert!(matches!(result, Err(DocumentError::Llm(_))));
}

#[tokio::test]
async fn test_deleted_document_is_not_consulted() {
    let llm = Arc::new(MockProvider::default());
    let corpus = corpus_with_deck();
    let id = corpus.list()[0].id;
    assert!(corpus.delete(id));

    let verdict = verifier(&llm)
        .verify_against_corpus("Revenue was $10M", &corpus)
        .await
        .unwrap();

    assert_eq!(verdict.confidence, Confidence::ZERO);
    assert_eq!(llm.call_count(), 0);
}
