//! Integration tests for the link validator, driven by scripted probes

use sensecheck_domain::{Link, LinkStatus, ValidationStatus};
use sensecheck_links::{
    extract_links, LinkConfig, LinkError, LinkValidator, NetworkErrorKind, Probe, ProbeResult,
};
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Probe that replays a fixed sequence of results per URL
#[derive(Default, Clone)]
struct ScriptedProbe {
    scripts: Arc<Mutex<HashMap<String, VecDeque<ProbeResult>>>>,
    calls: Arc<AtomicUsize>,
    in_flight: Arc<AtomicUsize>,
    max_in_flight: Arc<AtomicUsize>,
}

impl ScriptedProbe {
    fn script(self, url: &str, results: Vec<ProbeResult>) -> Self {
        self.scripts
            .lock()
            .unwrap()
            .insert(url.to_string(), results.into());
        self
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Probe for ScriptedProbe {
    async fn probe(&self, url: &str) -> ProbeResult {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        tokio::time::sleep(Duration::from_millis(5)).await;

        let result = self
            .scripts
            .lock()
            .unwrap()
            .get_mut(url)
            .and_then(|queue| queue.pop_front())
            .unwrap_or(ProbeResult::Status(200));

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        result
    }
}

fn fast_config() -> LinkConfig {
    LinkConfig {
        batch_delay_ms: 0,
        retry_backoff_ms: 0,
        ..LinkConfig::default()
    }
}

fn network(kind: NetworkErrorKind) -> ProbeResult {
    ProbeResult::Network {
        kind,
        message: "error sending request".to_string(),
    }
}

#[tokio::test]
async fn test_404_then_success_is_working_after_two_retries() {
    let url = "https://x.com/flaky";
    let probe = ScriptedProbe::default().script(
        url,
        vec![
            ProbeResult::Status(404),
            ProbeResult::Status(404),
            ProbeResult::Status(200),
        ],
    );
    let validator = LinkValidator::new(probe.clone(), fast_config());

    let outcome = validator.validate_link(url).await;
    assert_eq!(outcome.status, ValidationStatus::Working);
    assert_eq!(outcome.retries_used, 2);
    assert_eq!(outcome.http_status, Some(200));
    assert_eq!(outcome.error, None);
    assert_eq!(probe.calls(), 3);
}

#[tokio::test]
async fn test_403_is_restricted_without_retry() {
    let url = "https://x.com/private";
    let probe = ScriptedProbe::default().script(url, vec![ProbeResult::Status(403)]);
    let validator = LinkValidator::new(probe.clone(), fast_config());

    let outcome = validator.validate_link(url).await;
    assert_eq!(outcome.status, ValidationStatus::Restricted);
    assert_eq!(outcome.retries_used, 0);
    assert_eq!(outcome.error.as_deref(), Some("Access forbidden (403)"));
    assert_eq!(probe.calls(), 1);
}

#[tokio::test]
async fn test_401_and_429_messages() {
    let probe = ScriptedProbe::default()
        .script("https://a.com", vec![ProbeResult::Status(401)])
        .script("https://b.com", vec![ProbeResult::Status(429)]);
    let validator = LinkValidator::new(probe, fast_config());

    let a = validator.validate_link("https://a.com").await;
    let b = validator.validate_link("https://b.com").await;
    assert_eq!(a.error.as_deref(), Some("Authentication required (401)"));
    assert_eq!(b.error.as_deref(), Some("Rate limited (429)"));
    assert_eq!(b.status, ValidationStatus::Restricted);
}

#[tokio::test]
async fn test_persistent_5xx_is_broken_after_retries() {
    let url = "https://x.com/down";
    let probe = ScriptedProbe::default().script(url, vec![ProbeResult::Status(503); 3]);
    let validator = LinkValidator::new(probe.clone(), fast_config());

    let outcome = validator.validate_link(url).await;
    assert_eq!(outcome.status, ValidationStatus::Broken);
    assert_eq!(outcome.retries_used, 2);
    assert_eq!(outcome.error.as_deref(), Some("HTTP 503 after 3 attempts"));
    assert_eq!(probe.calls(), 3);
}

#[tokio::test]
async fn test_other_status_is_broken_without_retry() {
    let url = "https://x.com/gone";
    let probe = ScriptedProbe::default().script(url, vec![ProbeResult::Status(410)]);
    let validator = LinkValidator::new(probe.clone(), fast_config());

    let outcome = validator.validate_link(url).await;
    assert_eq!(outcome.status, ValidationStatus::Broken);
    assert_eq!(outcome.error.as_deref(), Some("HTTP 410"));
    assert_eq!(probe.calls(), 1);
}

#[tokio::test]
async fn test_network_errors_exhaust_network_budget() {
    let url = "https://nowhere.invalid";
    let probe = ScriptedProbe::default()
        .script(url, vec![network(NetworkErrorKind::DnsNotFound); 5]);
    let validator = LinkValidator::new(probe.clone(), fast_config());

    let outcome = validator.validate_link(url).await;
    assert_eq!(outcome.status, ValidationStatus::Error);
    assert_eq!(outcome.retries_used, 2);
    assert_eq!(outcome.http_status, None);
    assert_eq!(
        outcome.error.as_deref(),
        Some("Network error: error sending request")
    );
    assert_eq!(probe.calls(), 3);
}

#[tokio::test]
async fn test_non_retryable_network_error_fails_immediately() {
    let url = "https://x.com/tls";
    let probe = ScriptedProbe::default().script(url, vec![network(NetworkErrorKind::Other)]);
    let validator = LinkValidator::new(probe.clone(), fast_config());

    let outcome = validator.validate_link(url).await;
    assert_eq!(outcome.status, ValidationStatus::Error);
    assert_eq!(outcome.retries_used, 0);
    assert_eq!(probe.calls(), 1);
}

#[tokio::test]
async fn test_retry_budgets_are_separate() {
    let url = "https://x.com/mixed";
    let probe = ScriptedProbe::default().script(
        url,
        vec![
            ProbeResult::Status(500),
            network(NetworkErrorKind::Timeout),
            ProbeResult::Status(502),
            ProbeResult::Status(200),
        ],
    );
    let config = LinkConfig {
        max_retries: 3,
        max_http_retries: 2,
        max_network_retries: 1,
        ..fast_config()
    };
    let validator = LinkValidator::new(probe, config);

    let outcome = validator.validate_link(url).await;
    assert_eq!(outcome.status, ValidationStatus::Working);
    assert_eq!(outcome.retries_used, 3);
}

#[tokio::test]
async fn test_mixed_failures_share_the_per_link_budget() {
    let url = "https://x.com/unstable";
    let probe = ScriptedProbe::default().script(
        url,
        vec![
            ProbeResult::Status(404),
            network(NetworkErrorKind::Timeout),
            ProbeResult::Status(503),
            network(NetworkErrorKind::Timeout),
            ProbeResult::Status(200),
        ],
    );
    let validator = LinkValidator::new(probe.clone(), fast_config());

    let outcome = validator.validate_link(url).await;
    assert_eq!(outcome.status, ValidationStatus::Broken);
    assert_eq!(outcome.retries_used, 2);
    assert_eq!(outcome.http_status, Some(503));
    assert_eq!(outcome.error.as_deref(), Some("HTTP 503 after 3 attempts"));
    assert_eq!(probe.calls(), 3);
}

#[tokio::test]
async fn test_zero_network_budget() {
    let url = "https://x.com/timeout";
    let probe = ScriptedProbe::default().script(url, vec![network(NetworkErrorKind::Timeout)]);
    let config = LinkConfig {
        max_network_retries: 0,
        ..fast_config()
    };
    let validator = LinkValidator::new(probe.clone(), config);

    let outcome = validator.validate_link(url).await;
    assert_eq!(outcome.status, ValidationStatus::Error);
    assert_eq!(probe.calls(), 1);
}

#[tokio::test]
async fn test_validate_all_preserves_order_and_derives_status() {
    let links = extract_links(
        "[ok](https://a.com/ok) [gone](https://a.com/gone) [private](https://a.com/private)",
    );
    let probe = ScriptedProbe::default()
        .script("https://a.com/gone", vec![ProbeResult::Status(404); 3])
        .script("https://a.com/private", vec![ProbeResult::Status(403)]);
    let validator = LinkValidator::new(probe, fast_config());

    let report = validator.validate_all(links).await.unwrap();

    let urls: Vec<_> = report.links.iter().map(|l| l.url.as_str()).collect();
    assert_eq!(
        urls,
        vec!["https://a.com/ok", "https://a.com/gone", "https://a.com/private"]
    );

    assert_eq!(report.links[0].validation_status, ValidationStatus::Working);
    assert_eq!(report.links[0].status, LinkStatus::Unverified);
    assert_eq!(report.links[1].status, LinkStatus::Invalid);
    assert_eq!(report.links[2].status, LinkStatus::Suspicious);

    assert_eq!(report.summary.total, 3);
    assert_eq!(report.summary.working, 1);
    assert_eq!(report.summary.broken, 1);
    assert_eq!(report.summary.restricted, 1);
}

#[tokio::test]
async fn test_concurrency_is_bounded() {
    let links: Vec<_> = (0..12)
        .map(|i| Link::new(format!("link-{}", i + 1), format!("https://x.com/{}", i), "x"))
        .collect();
    let probe = ScriptedProbe::default();
    let validator = LinkValidator::new(probe.clone(), fast_config());

    let report = validator.validate_all_with(links, 4).await.unwrap();
    assert_eq!(report.links.len(), 12);
    assert!(probe.max_in_flight.load(Ordering::SeqCst) <= 4);
    assert_eq!(probe.calls(), 12);
}

#[tokio::test]
async fn test_batch_limit() {
    let links: Vec<_> = (0..101)
        .map(|i| Link::new(format!("link-{}", i), format!("https://x.com/{}", i), "x"))
        .collect();
    let probe = ScriptedProbe::default();
    let validator = LinkValidator::new(probe.clone(), fast_config());

    let result = validator.validate_all(links).await;
    assert!(matches!(result, Err(LinkError::InvalidInput(_))));
    assert_eq!(probe.calls(), 0);
}

#[tokio::test]
async fn test_zero_concurrency_rejected() {
    let validator = LinkValidator::new(ScriptedProbe::default(), fast_config());
    let result = validator.validate_all_with(Vec::new(), 0).await;
    assert!(matches!(result, Err(LinkError::InvalidInput(_))));
}

#[tokio::test]
async fn test_empty_batch() {
    let validator = LinkValidator::new(ScriptedProbe::default(), fast_config());
    let report = validator.validate_all(Vec::new()).await.unwrap();
    assert!(report.links.is_empty());
    assert_eq!(report.summary.total, 0);
}
