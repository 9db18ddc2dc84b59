//! LLM driver trait and the NiRDy chat relay.
//!
//! # Overview
//!
//! The [`LlmDriver`] trait defines the streaming interface to an
//! OpenAI-compatible provider. The [`ChatRelay`] builds on top of a driver
//! to pin the NiRDy persona in front of every conversation and flatten
//! transport errors into normalized events.
//!
//! # Example
//!
//! ```rust,ignore
//! use operation_nird::llm::{ChatRelay, LlmSettings, Provider};
//!
//! let settings = LlmSettings {
//!     base_url: "https://generativelanguage.googleapis.com/v1beta/openai".to_string(),
//!     api_key: Some("AIza...".to_string()),
//!     model: "gemini-2.0-flash".to_string(),
//!     provider: Provider::Google,
//! };
//! let relay = ChatRelay::new(settings);
//! ```

pub mod chat_completions;
pub mod provider;
pub mod relay;

pub use chat_completions::ChatCompletionsDriver;
pub use provider::Provider;
pub use relay::ChatRelay;

use crate::normalized::NormalizedEvent;
use futures::Stream;

/// LLM connection and model settings.
#[derive(Debug, Clone)]
pub struct LlmSettings {
    /// Base URL for the LLM API (e.g., `https://api.openai.com`).
    pub base_url: String,
    /// Optional API key for authentication.
    pub api_key: Option<String>,
    /// Model identifier (e.g., `gemini-2.0-flash`, `gpt-4o`).
    pub model: String,
    /// Provider type, auto-detected from `base_url`.
    pub provider: Provider,
}

/// A message in a conversation.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Message {
    /// Role of the message author.
    pub role: MessageRole,
    /// Text content of the message.
    pub content: String,
}

impl Message {
    /// Create a system message.
    #[must_use]
    pub fn system(content: impl Into<String>) -> Self {
        Self { role: MessageRole::System, content: content.into() }
    }

    /// Create a user message.
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self { role: MessageRole::User, content: content.into() }
    }

    /// Create an assistant message.
    #[must_use]
    pub fn assistant(content: impl Into<String>) -> Self {
        Self { role: MessageRole::Assistant, content: content.into() }
    }
}

/// Role of a message author.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// System prompt.
    System,
    /// User message.
    User,
    /// Assistant response.
    Assistant,
}

/// Request to an LLM driver.
#[derive(Debug)]
pub struct LlmRequest {
    /// Conversation messages, system prompt included.
    pub messages: Vec<Message>,
}

/// Trait for LLM streaming drivers.
///
/// Implementations of this trait provide streaming access to LLM responses,
/// emitting [`NormalizedEvent`]s as the model generates output.
#[async_trait::async_trait]
pub trait LlmDriver: Send + Sync {
    /// Stream a response from the LLM.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the connection is interrupted.
    async fn stream(
        &self,
        req: LlmRequest,
    ) -> anyhow::Result<std::pin::Pin<Box<dyn Stream<Item = anyhow::Result<NormalizedEvent>> + Send>>>;
}
