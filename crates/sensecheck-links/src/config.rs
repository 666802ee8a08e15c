//! Configuration for link validation

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the link validator and its HTTP probe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkConfig {
    /// Links probed concurrently per batch
    pub max_concurrency: usize,

    /// Largest accepted batch
    pub max_links: usize,

    /// Pause between batches (milliseconds); not applied after the last batch
    pub batch_delay_ms: u64,

    /// Per-probe timeout (seconds)
    pub request_timeout_secs: u64,

    /// Redirects followed before giving up
    pub max_redirects: usize,

    /// Extra attempts allowed per link, whatever the failure
    pub max_retries: u32,

    /// Extra attempts allowed after a 404 or 5xx; bounded by `max_retries`
    pub max_http_retries: u32,

    /// Extra attempts allowed after a retryable network error; bounded by `max_retries`
    pub max_network_retries: u32,

    /// Backoff unit; retry `n` waits `n` units (milliseconds)
    pub retry_backoff_ms: u64,

    /// Sent with every probe
    pub user_agent: String,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            max_concurrency: 5,
            max_links: 100,
            batch_delay_ms: 500,
            request_timeout_secs: 10,
            max_redirects: 5,
            max_retries: 2,
            max_http_retries: 2,
            max_network_retries: 2,
            retry_backoff_ms: 1000,
            user_agent: "SenseCheck-LinkValidator/1.0 (Link verification bot)".to_string(),
        }
    }
}

impl LinkConfig {
    /// Aggressive preset: more parallelism, fewer retries
    pub fn aggressive() -> Self {
        Self {
            max_concurrency: 10,
            batch_delay_ms: 200,
            request_timeout_secs: 5,
            max_retries: 1,
            max_http_retries: 1,
            max_network_retries: 1,
            ..Self::default()
        }
    }

    /// Lenient preset: gentler on servers, more patient with slow ones
    pub fn lenient() -> Self {
        Self {
            max_concurrency: 3,
            batch_delay_ms: 1000,
            request_timeout_secs: 20,
            max_retries: 3,
            max_http_retries: 3,
            max_network_retries: 3,
            ..Self::default()
        }
    }

    /// Get the batch delay as a Duration
    pub fn batch_delay(&self) -> Duration {
        Duration::from_millis(self.batch_delay_ms)
    }

    /// Get the per-probe timeout as a Duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Backoff before retry number `retry` (1-based)
    pub fn retry_backoff(&self, retry: u32) -> Duration {
        Duration::from_millis(self.retry_backoff_ms.saturating_mul(u64::from(retry)))
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_concurrency == 0 {
            return Err("max_concurrency must be greater than 0".to_string());
        }
        if self.max_links == 0 {
            return Err("max_links must be greater than 0".to_string());
        }
        if self.request_timeout_secs == 0 {
            return Err("request_timeout_secs must be greater than 0".to_string());
        }
        if self.user_agent.trim().is_empty() {
            return Err("user_agent must not be empty".to_string());
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_are_valid() {
        assert!(LinkConfig::default().validate().is_ok());
        assert!(LinkConfig::aggressive().validate().is_ok());
        assert!(LinkConfig::lenient().validate().is_ok());
    }

    #[test]
    fn test_backoff_is_linear() {
        let config = LinkConfig::default();
        assert_eq!(config.retry_backoff(1), Duration::from_secs(1));
        assert_eq!(config.retry_backoff(2), Duration::from_secs(2));
    }

    #[test]
    fn test_zero_concurrency_rejected() {
        let config = LinkConfig {
            max_concurrency: 0,
            ..LinkConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = LinkConfig::lenient();
        let parsed = LinkConfig::from_toml(&config.to_toml().unwrap()).unwrap();
        assert_eq!(config, parsed);
    }
}
