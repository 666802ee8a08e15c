//! SenseCheck LLM Provider Layer
//!
//! Implementations of the `LlmProvider` trait from `sensecheck-domain`.
//! Every oracle the pipeline consults (extraction, preprocessing, grounded
//! search, structuring, document judgment) is a chat completion behind that
//! one trait; only the model and temperature differ per role.
//!
//! # Providers
//!
//! - `MockProvider`: Deterministic scripted responses for testing
//! - `OpenRouterProvider`: OpenAI-compatible chat completions over HTTPS
//!
//! # Examples
//!
//! ```
//! use sensecheck_llm::MockProvider;
//! use sensecheck_domain::traits::{CompletionRequest, LlmProvider};
//!
//! let provider = MockProvider::new("Hello from LLM!");
//! let request = CompletionRequest::new(0.2).user("test prompt");
//! let runtime = tokio::runtime::Runtime::new().unwrap();
//! let result = runtime.block_on(provider.complete(&request)).unwrap();
//! assert_eq!(result, "Hello from LLM!");
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod openrouter;

use sensecheck_domain::traits::{CompletionRequest, LlmProvider};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use thiserror::Error;

pub use config::{LlmConfig, LlmModels};
pub use openrouter::OpenRouterProvider;

/// Errors that can occur during LLM operations
#[derive(Error, Debug)]
pub enum LlmError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Invalid response from LLM
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Model not available
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// The API refused the request (4xx other than 404/429)
    #[error("Request rejected (HTTP {status}): {message}")]
    Rejected {
        /// HTTP status code
        status: u16,
        /// Response body or reason
        message: String,
    },

    /// Generic error
    #[error("LLM error: {0}")]
    Other(String),
}

impl From<reqwest::Error> for LlmError {
    fn from(err: reqwest::Error) -> Self {
        LlmError::Communication(format!("Request failed: {}", err))
    }
}

#[derive(Debug, Clone)]
enum MockReply {
    Text(String),
    Fail(String),
}

#[derive(Debug, Default)]
struct MockState {
    queue: VecDeque<MockReply>,
    rules: Vec<(String, MockReply)>,
    call_count: usize,
    requests: Vec<CompletionRequest>,
}

/// Mock LLM provider for deterministic testing
///
/// This provider returns pre-configured responses without making any network
/// calls. A reply is chosen in this order:
///
/// 1. The first substring rule whose needle occurs in the request's messages
/// 2. The next queued reply
/// 3. The default response
///
/// Clones share state, so a test can keep a handle for inspecting calls after
/// moving the provider into the component under test.
///
/// # Examples
///
/// ```
/// use sensecheck_llm::MockProvider;
///
/// let provider = MockProvider::default();
/// provider.push_response("first");
/// provider.push_error("network down");
/// provider.add_rule("structure", "{\"status\":\"verified_true\"}");
/// assert_eq!(provider.call_count(), 0);
/// ```
#[derive(Debug, Clone)]
pub struct MockProvider {
    default_response: String,
    state: Arc<Mutex<MockState>>,
}

impl MockProvider {
    /// Create a new MockProvider with a fixed response for all prompts
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            default_response: response.into(),
            state: Arc::new(Mutex::new(MockState::default())),
        }
    }

    /// Create a provider that answers with `responses` in order, then the default
    pub fn with_responses<I, S>(responses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let provider = Self::default();
        for response in responses {
            provider.push_response(response);
        }
        provider
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Queue a successful reply
    pub fn push_response(&self, response: impl Into<String>) {
        self.state().queue.push_back(MockReply::Text(response.into()));
    }

    /// Queue a transport failure
    pub fn push_error(&self, message: impl Into<String>) {
        self.state().queue.push_back(MockReply::Fail(message.into()));
    }

    /// Answer every request whose messages contain `needle` with `response`
    pub fn add_rule(&self, needle: impl Into<String>, response: impl Into<String>) {
        self.state()
            .rules
            .push((needle.into(), MockReply::Text(response.into())));
    }

    /// Fail every request whose messages contain `needle`
    pub fn add_error_rule(&self, needle: impl Into<String>) {
        self.state()
            .rules
            .push((needle.into(), MockReply::Fail("Mock error".to_string())));
    }

    /// Get the number of times complete was called
    pub fn call_count(&self) -> usize {
        self.state().call_count
    }

    /// Reset the call count and recorded requests
    pub fn reset_call_count(&self) {
        let mut state = self.state();
        state.call_count = 0;
        state.requests.clear();
    }

    /// Every request received so far, oldest first
    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.state().requests.clone()
    }

    fn reply_for(&self, request: &CompletionRequest) -> MockReply {
        let mut state = self.state();
        state.call_count += 1;
        state.requests.push(request.clone());

        let text = request.prompt_text();
        if let Some((_, reply)) = state.rules.iter().find(|(needle, _)| text.contains(needle.as_str())) {
            return reply.clone();
        }

        state
            .queue
            .pop_front()
            .unwrap_or_else(|| MockReply::Text(self.default_response.clone()))
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new("Default mock response")
    }
}

impl LlmProvider for MockProvider {
    type Error = LlmError;

    async fn complete(&self, request: &CompletionRequest) -> Result<String, Self::Error> {
        match self.reply_for(request) {
            MockReply::Text(text) => Ok(text),
            MockReply::Fail(message) => Err(LlmError::Communication(message)),
        }
    }
}
