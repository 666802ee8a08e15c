//! OpenRouter Provider Implementation
//!
//! Talks to any OpenAI-compatible `/chat/completions` endpoint; OpenRouter is
//! the default so that search-grounded and plain models share one client.
//!
//! # Features
//!
//! - Bearer authentication plus `HTTP-Referer` / `X-Title` attribution headers
//! - Per-request model override
//! - Retry with exponential backoff on transport errors and 5xx
//! - No retry on 4xx
//!
//! # Examples
//!
//! ```no_run
//! use sensecheck_llm::{LlmConfig, OpenRouterProvider};
//!
//! let config = LlmConfig {
//!     api_key: Some("sk-or-...".to_string()),
//!     ..LlmConfig::default()
//! };
//! let provider = OpenRouterProvider::new(config).unwrap();
//! ```

use crate::{LlmConfig, LlmError};
use sensecheck_domain::traits::{CompletionRequest, LlmProvider};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

/// Chat-completions API client
#[derive(Debug, Clone)]
pub struct OpenRouterProvider {
    config: LlmConfig,
    client: reqwest::Client,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Whether a failed attempt may be retried
enum Attempt {
    Retry(LlmError),
    Fatal(LlmError),
}

impl OpenRouterProvider {
    /// Create a provider from configuration
    ///
    /// # Errors
    ///
    /// Returns error if the configuration is invalid or the HTTP client
    /// cannot be built.
    pub fn new(config: LlmConfig) -> Result<Self, LlmError> {
        config.validate().map_err(LlmError::Other)?;

        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| LlmError::Other(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    /// Set the maximum number of attempts
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.config.max_retries = max_retries.max(1);
        self
    }

    /// Set the first backoff delay
    pub fn with_retry_base_delay(mut self, delay: Duration) -> Self {
        self.config.retry_base_delay_ms = delay.as_millis() as u64;
        self
    }

    /// The active configuration
    pub fn config(&self) -> &LlmConfig {
        &self.config
    }

    fn url(&self) -> String {
        format!("{}/chat/completions", self.config.endpoint.trim_end_matches('/'))
    }

    /// Backoff before retry number `attempt` (1-based): base, 2x base, 4x base...
    fn backoff(&self, attempt: u32) -> Duration {
        let factor = 2u64.saturating_pow(attempt.saturating_sub(1));
        Duration::from_millis(self.config.retry_base_delay_ms.saturating_mul(factor))
    }

    async fn attempt(&self, body: &ChatRequest<'_>) -> Result<String, Attempt> {
        let mut builder = self
            .client
            .post(self.url())
            .header("HTTP-Referer", &self.config.site_url)
            .header("X-Title", &self.config.app_title)
            .json(body);
        if let Some(key) = &self.config.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| Attempt::Retry(LlmError::from(e)))?;

        let status = response.status();
        if status.is_success() {
            let parsed = response.json::<ChatResponse>().await.map_err(|e| {
                Attempt::Fatal(LlmError::InvalidResponse(format!(
                    "Failed to parse response: {}",
                    e
                )))
            })?;
            return parsed
                .choices
                .into_iter()
                .next()
                .and_then(|c| c.message.content)
                .ok_or_else(|| {
                    Attempt::Fatal(LlmError::InvalidResponse(
                        "Response contained no message content".to_string(),
                    ))
                });
        }

        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());

        if status.is_server_error() {
            return Err(Attempt::Retry(LlmError::Communication(format!(
                "HTTP {}: {}",
                status, message
            ))));
        }

        Err(Attempt::Fatal(match status {
            reqwest::StatusCode::NOT_FOUND => LlmError::ModelNotAvailable(body.model.to_string()),
            reqwest::StatusCode::TOO_MANY_REQUESTS => LlmError::RateLimitExceeded,
            _ => LlmError::Rejected {
                status: status.as_u16(),
                message,
            },
        }))
    }
}

impl LlmProvider for OpenRouterProvider {
    type Error = LlmError;

    async fn complete(&self, request: &CompletionRequest) -> Result<String, Self::Error> {
        let model = request
            .model
            .as_deref()
            .unwrap_or(self.config.default_model.as_str());

        let body = ChatRequest {
            model,
            messages: request
                .messages
                .iter()
                .map(|m| ChatMessage {
                    role: m.role.as_str(),
                    content: &m.content,
                })
                .collect(),
            temperature: request.temperature,
        };

        let max_attempts = self.config.max_retries.max(1);
        let mut last_error = None;

        for attempt in 1..=max_attempts {
            debug!(model, attempt, max_attempts, "Chat completion attempt");

            match self.attempt(&body).await {
                Ok(content) => return Ok(content),
                Err(Attempt::Fatal(e)) => return Err(e),
                Err(Attempt::Retry(e)) => {
                    warn!(model, attempt, error = %e, "Chat completion failed");
                    last_error = Some(e);
                }
            }

            if attempt < max_attempts {
                let delay = self.backoff(attempt);
                debug!(delay_ms = delay.as_millis() as u64, "Retrying chat completion");
                tokio::time::sleep(delay).await;
            }
        }

        Err(last_error
            .unwrap_or_else(|| LlmError::Communication("Max retries exceeded".to_string())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_creation() {
        let provider = OpenRouterProvider::new(LlmConfig::default()).unwrap();
        assert_eq!(provider.url(), "https://openrouter.ai/api/v1/chat/completions");
        assert_eq!(provider.config().max_retries, 3);
    }

    #[test]
    fn test_trailing_slash_endpoint() {
        let config = LlmConfig {
            endpoint: "http://localhost:8080/v1/".to_string(),
            ..LlmConfig::default()
        };
        let provider = OpenRouterProvider::new(config).unwrap();
        assert_eq!(provider.url(), "http://localhost:8080/v1/chat/completions");
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = LlmConfig {
            timeout_secs: 0,
            ..LlmConfig::default()
        };
        assert!(OpenRouterProvider::new(config).is_err());
    }

    #[test]
    fn test_backoff_doubles() {
        let provider = OpenRouterProvider::new(LlmConfig::default()).unwrap();
        assert_eq!(provider.backoff(1), Duration::from_secs(1));
        assert_eq!(provider.backoff(2), Duration::from_secs(2));
    }

    #[test]
    fn test_with_max_retries_floor() {
        let provider = OpenRouterProvider::new(LlmConfig::default())
            .unwrap()
            .with_max_retries(0);
        assert_eq!(provider.config().max_retries, 1);
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_communication_error() {
        let config = LlmConfig {
            endpoint: "http://127.0.0.1:9".to_string(),
            timeout_secs: 2,
            ..LlmConfig::default()
        };
        let provider = OpenRouterProvider::new(config)
            .unwrap()
            .with_max_retries(2)
            .with_retry_base_delay(Duration::from_millis(1));

        let request = CompletionRequest::new(0.2).user("ping");
        let err = provider.complete(&request).await.unwrap_err();
        assert!(matches!(err, LlmError::Communication(_)));
    }

    // Integration tests (requires an API key)
    #[tokio::test]
    #[ignore]
    async fn test_openrouter_integration() {
        let config = LlmConfig {
            api_key: std::env::var("OPENROUTER_API_KEY").ok(),
            ..LlmConfig::default()
        };
        let provider = OpenRouterProvider::new(config).unwrap();
        let request = CompletionRequest::new(0.0).user("Say 'hello' and nothing else");
        let result = provider.complete(&request).await;
        assert!(result.is_ok());
    }
}
