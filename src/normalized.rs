//! Normalized events for streaming LLM responses.
//!
//! The driver layer translates provider wire formats into this small
//! vocabulary; the relay and the HTTP handler only ever see these events.

use serde::{Deserialize, Serialize};

/// Normalized streaming events emitted by an LLM driver.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "data")]
pub enum NormalizedEvent {
    /// Incremental text delta from the assistant's reply.
    #[serde(rename = "message.delta")]
    MessageDelta {
        /// The text fragment to append.
        text: String,
    },

    /// An error occurred mid-stream.
    #[serde(rename = "error")]
    Error {
        /// Error message.
        message: String,
        /// Optional error code for programmatic handling.
        #[serde(skip_serializing_if = "Option::is_none")]
        code: Option<String>,
    },

    /// Stream has completed.
    #[serde(rename = "done")]
    Done,
}

impl NormalizedEvent {
    /// Stable event name, used in structured logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            NormalizedEvent::MessageDelta { .. } => "message.delta",
            NormalizedEvent::Error { .. } => "error",
            NormalizedEvent::Done => "done",
        }
    }
}
