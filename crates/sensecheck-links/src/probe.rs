//! Network probes
//!
//! A probe performs one request against a URL and reports either the HTTP
//! status (any status, never raised) or a classified transport failure.

use crate::{LinkConfig, LinkError};
use std::error::Error as StdError;
use std::future::Future;

/// Classified transport failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NetworkErrorKind {
    /// Host name did not resolve
    DnsNotFound,
    /// Connection could not be established
    ConnectionRefused,
    /// No answer within the timeout
    Timeout,
    /// Connection dropped mid-exchange
    ConnectionReset,
    /// Anything else (invalid URL, TLS failure, redirect loop...)
    Other,
}

impl NetworkErrorKind {
    /// Whether another attempt could plausibly succeed
    pub fn is_retryable(&self) -> bool {
        !matches!(self, NetworkErrorKind::Other)
    }
}

/// What a single probe observed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeResult {
    /// A response arrived
    Status(u16),
    /// No response arrived
    Network {
        /// Classification used for the retry decision
        kind: NetworkErrorKind,
        /// Human-readable cause
        message: String,
    },
}

/// Something that can probe a URL once
pub trait Probe: Send + Sync {
    /// Issue one request for `url`
    fn probe(&self, url: &str) -> impl Future<Output = ProbeResult> + Send;
}

/// HEAD-request probe over reqwest
#[derive(Debug, Clone)]
pub struct HttpProbe {
    client: reqwest::Client,
}

impl HttpProbe {
    /// Build a probe with the configured timeout, redirect limit and user agent
    pub fn new(config: &LinkConfig) -> Result<Self, LinkError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .user_agent(config.user_agent.clone())
            .build()?;
        Ok(Self { client })
    }
}

impl Probe for HttpProbe {
    async fn probe(&self, url: &str) -> ProbeResult {
        match self
            .client
            .head(url)
            .header(reqwest::header::ACCEPT, "*/*")
            .send()
            .await
        {
            Ok(response) => ProbeResult::Status(response.status().as_u16()),
            Err(e) => ProbeResult::Network {
                kind: classify(&e),
                message: e.to_string(),
            },
        }
    }
}

/// Classify a reqwest failure by walking its source chain
pub(crate) fn classify(err: &reqwest::Error) -> NetworkErrorKind {
    if err.is_timeout() {
        return NetworkErrorKind::Timeout;
    }

    // TLS and certificate failures also surface as connect errors; only a
    // recognised cause makes an error retryable
    classify_causes(err.source()).unwrap_or(NetworkErrorKind::Other)
}

/// Walk an error's source chain looking for a known transient cause
pub(crate) fn classify_causes(
    mut source: Option<&(dyn StdError + 'static)>,
) -> Option<NetworkErrorKind> {
    while let Some(cause) = source {
        if let Some(io) = cause.downcast_ref::<std::io::Error>() {
            if let Some(kind) = classify_io(io.kind()) {
                return Some(kind);
            }
        }
        if let Some(kind) = classify_message(&cause.to_string()) {
            return Some(kind);
        }
        source = cause.source();
    }
    None
}

fn classify_io(kind: std::io::ErrorKind) -> Option<NetworkErrorKind> {
    use std::io::ErrorKind;
    match kind {
        ErrorKind::ConnectionRefused => Some(NetworkErrorKind::ConnectionRefused),
        ErrorKind::ConnectionReset | ErrorKind::ConnectionAborted | ErrorKind::BrokenPipe => {
            Some(NetworkErrorKind::ConnectionReset)
        }
        ErrorKind::TimedOut => Some(NetworkErrorKind::Timeout),
        _ => None,
    }
}

pub(crate) fn classify_message(message: &str) -> Option<NetworkErrorKind> {
    let lower = message.to_lowercase();
    if lower.contains("dns error")
        || lower.contains("failed to lookup address")
        || lower.contains("name or service not known")
        || lower.contains("no such host")
    {
        Some(NetworkErrorKind::DnsNotFound)
    } else if lower.contains("connection refused") {
        Some(NetworkErrorKind::ConnectionRefused)
    } else if lower.contains("connection reset") || lower.contains("connection closed") {
        Some(NetworkErrorKind::ConnectionReset)
    } else if lower.contains("timed out") || lower.contains("timeout") {
        Some(NetworkErrorKind::Timeout)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_message() {
        assert_eq!(
            classify_message("dns error: failed to lookup address information"),
            Some(NetworkErrorKind::DnsNotFound)
        );
        assert_eq!(
            classify_message("tcp connect error: Connection refused (os error 111)"),
            Some(NetworkErrorKind::ConnectionRefused)
        );
        assert_eq!(
            classify_message("connection closed before message completed"),
            Some(NetworkErrorKind::ConnectionReset)
        );
        assert_eq!(classify_message("operation timed out"), Some(NetworkErrorKind::Timeout));
        assert_eq!(classify_message("invalid certificate"), None);
    }

    #[test]
    fn test_certificate_failure_is_not_retryable() {
        let tls = std::io::Error::other("invalid peer certificate: Expired");
        let kind = classify_causes(Some(&tls)).unwrap_or(NetworkErrorKind::Other);
        assert_eq!(kind, NetworkErrorKind::Other);
        assert!(!kind.is_retryable());

        let refused = std::io::Error::from(std::io::ErrorKind::ConnectionRefused);
        assert_eq!(
            classify_causes(Some(&refused)),
            Some(NetworkErrorKind::ConnectionRefused)
        );
    }

    #[test]
    fn test_retryable_kinds() {
        assert!(NetworkErrorKind::DnsNotFound.is_retryable());
        assert!(NetworkErrorKind::Timeout.is_retryable());
        assert!(!NetworkErrorKind::Other.is_retryable());
    }

    #[tokio::test]
    async fn test_refused_connection_is_classified() {
        let config = LinkConfig {
            request_timeout_secs: 2,
            ..LinkConfig::default()
        };
        let probe = HttpProbe::new(&config).unwrap();
        match probe.probe("http://127.0.0.1:9/").await {
            ProbeResult::Network { kind, .. } => assert!(kind.is_retryable()),
            other => panic!("expected network error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_invalid_url_is_not_retryable() {
        let probe = HttpProbe::new(&LinkConfig::default()).unwrap();
        match probe.probe("not a url").await {
            ProbeResult::Network { kind, .. } => assert_eq!(kind, NetworkErrorKind::Other),
            other => panic!("expected network error, got {:?}", other),
        }
    }
}
