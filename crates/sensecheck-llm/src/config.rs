//! Configuration for LLM providers

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// OpenRouter API endpoint
pub const DEFAULT_ENDPOINT: &str = "https://openrouter.ai/api/v1";

/// Model used when a role names none
pub const DEFAULT_MODEL: &str = "meta-llama/llama-4-maverick-17b-128e-instruct";

/// Search-grounded model for the verification call
pub const DEFAULT_GROUNDED_MODEL: &str = "perplexity/sonar-pro";

/// Default timeout for LLM requests (120 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Default number of attempts per request
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Per-role model overrides
///
/// A role left unset uses [`LlmConfig::default_model`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmModels {
    /// Claim extraction
    pub extraction: Option<String>,
    /// Research-question rewriting
    pub preprocessing: Option<String>,
    /// Search-grounded verification
    pub grounded: Option<String>,
    /// Structuring the grounded answer into JSON
    pub structuring: Option<String>,
    /// Judging a claim against uploaded documents
    pub document: Option<String>,
}

/// Configuration for an OpenAI-compatible chat-completions provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Base URL; `/chat/completions` is appended
    pub endpoint: String,

    /// Bearer token
    pub api_key: Option<String>,

    /// Model used when the request names none
    pub default_model: String,

    /// Per-request timeout (seconds)
    pub timeout_secs: u64,

    /// Attempts per request, including the first
    pub max_retries: u32,

    /// First backoff delay; doubles on each further retry (milliseconds)
    pub retry_base_delay_ms: u64,

    /// Sent as `HTTP-Referer`
    pub site_url: String,

    /// Sent as `X-Title`
    pub app_title: String,

    /// Per-role model overrides
    pub models: LlmModels,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: None,
            default_model: DEFAULT_MODEL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_retries: DEFAULT_MAX_RETRIES,
            retry_base_delay_ms: 1000,
            site_url: "http://localhost:3000".to_string(),
            app_title: "SenseCheck".to_string(),
            models: LlmModels {
                grounded: Some(DEFAULT_GROUNDED_MODEL.to_string()),
                ..LlmModels::default()
            },
        }
    }
}

impl LlmConfig {
    /// Get the request timeout as a Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.endpoint.trim().is_empty() {
            return Err("endpoint must not be empty".to_string());
        }
        if self.default_model.trim().is_empty() {
            return Err("default_model must not be empty".to_string());
        }
        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than 0".to_string());
        }
        if self.max_retries == 0 {
            return Err("max_retries must be at least 1".to_string());
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
    fn test_default_config_is_valid() {
        assert!(LlmConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_retries_rejected() {
        let config = LlmConfig {
            max_retries: 0,
            ..LlmConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = LlmConfig::from_toml(
            r#"
            api_key = "sk-test"

            [models]
            extraction = "openai/gpt-4o-mini"
            "#,
        )
        .unwrap();
        assert_eq!(config.api_key.as_deref(), Some("sk-test"));
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.models.extraction.as_deref(), Some("openai/gpt-4o-mini"));
        assert_eq!(config.models.grounded, None);
    }

    #[test]
    fn test_toml_round_trip() {
        let config = LlmConfig::default();
        let parsed = LlmConfig::from_toml(&config.to_toml().unwrap()).unwrap();
        assert_eq!(config, parsed);
    }
}
