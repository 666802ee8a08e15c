//! Trait definitions for external interactions
//!
//! These traits define the boundaries between domain logic and infrastructure.
//! Infrastructure implementations live in other crates.

use crate::{ChapterId, Mission, MissionId};
use std::future::Future;

/// Speaker of a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// Instructions
    System,
    /// Content
    User,
}

impl Role {
    /// Wire name of the role
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
        }
    }
}

/// A single chat message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Speaker
    pub role: Role,
    /// Text
    pub content: String,
}

impl Message {
    /// A system instruction
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    /// A user message
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// One oracle call
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    /// Model override; the provider's default is used when `None`
    pub model: Option<String>,
    /// Conversation
    pub messages: Vec<Message>,
    /// Sampling temperature
    pub temperature: f32,
}

impl CompletionRequest {
    /// Create a request with the given temperature and no messages
    pub fn new(temperature: f32) -> Self {
        Self {
            model: None,
            messages: Vec::new(),
            temperature,
        }
    }

    /// Use a specific model
    pub fn with_model(mut self, model: Option<String>) -> Self {
        self.model = model;
        self
    }

    /// Append a system message
    pub fn system(mut self, content: impl Into<String>) -> Self {
        self.messages.push(Message::system(content));
        self
    }

    /// Append a user message
    pub fn user(mut self, content: impl Into<String>) -> Self {
        self.messages.push(Message::user(content));
        self
    }

    /// Concatenated text of every message, for matching and logging
    pub fn prompt_text(&self) -> String {
        self.messages
            .iter()
            .map(|m| m.content.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Trait for LLM provider operations
///
/// Implemented by the infrastructure layer (sensecheck-llm). Every oracle role
/// in the pipeline (extraction, preprocessing, grounded search, structuring,
/// document judgment) goes through this one call.
pub trait LlmProvider: Send + Sync {
    /// Error type for LLM operations
    type Error: std::error::Error + Send + Sync + 'static;

    /// Run a chat completion and return the assistant's text
    fn complete(
        &self,
        request: &CompletionRequest,
    ) -> impl Future<Output = Result<String, Self::Error>> + Send;
}

impl<T: LlmProvider> LlmProvider for std::sync::Arc<T> {
    type Error = T::Error;

    fn complete(
        &self,
        request: &CompletionRequest,
    ) -> impl Future<Output = Result<String, Self::Error>> + Send {
        (**self).complete(request)
    }
}

/// Trait for storing and retrieving missions
///
/// Implemented by the infrastructure layer (sensecheck-missions)
pub trait MissionStore: Send + Sync {
    /// Error type for store operations
    type Error: std::error::Error + Send + Sync + 'static;

    /// Store a new mission
    fn create_mission(&self, mission: Mission) -> Result<MissionId, Self::Error>;

    /// Append a pending chapter to a mission
    fn add_chapter(
        &self,
        mission_id: MissionId,
        name: &str,
        json_content: &str,
    ) -> Result<ChapterId, Self::Error>;

    /// Get a mission by id
    fn get_mission(&self, id: MissionId) -> Result<Option<Mission>, Self::Error>;

    /// Replace a stored mission
    fn update_mission(&self, mission: Mission) -> Result<(), Self::Error>;

    /// All missions, oldest first
    fn list_missions(&self) -> Result<Vec<Mission>, Self::Error>;
}
