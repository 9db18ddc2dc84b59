//! Opération N.I.R.D. game service and chat relay
//!
//! The backend for a browser game about digital sustainability in French
//! schools: role-based scenario play-throughs scored on money, CO2 and
//! campaign points, terminal mini-challenges, a cost simulator and a
//! streaming chat relay to an OpenAI-compatible LLM provider.
//!
//! # Architecture
//!
//! - **Server**: Axum-based HTTP server, JSON API plus streamed chat
//! - **Game engine**: pure synchronous state transitions over static
//!   content tables
//! - **Relay**: chat-completions driver with manual SSE parsing
//! - **Persistence**: single-slot JSON save store, merge-over-defaults
//!
//! # Modules
//!
//! - [`game`]: content tables, state transitions, simulator, verdict
//! - [`llm`]: LLM driver trait, chat-completions implementation, relay
//! - [`normalized`]: unified streaming event model
//! - [`session`]: in-memory game session store
//! - [`save`]: save-slot persistence

// Allow pedantic clippy warnings that don't add value for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::cargo_common_metadata)]
#![allow(clippy::multiple_crate_versions)]
#![allow(clippy::unused_async)]

pub mod config;
pub mod game;
pub mod llm;
pub mod normalized;
pub mod prompt;
pub mod save;
pub mod server;
pub mod session;

use crate::config::AppConfig;

use llm::ChatRelay;
use save::SaveStore;
use session::GameSessionStore;
use std::sync::Arc;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Chat relay to the configured LLM provider.
    pub relay: Arc<ChatRelay>,
    /// In-memory game sessions.
    pub sessions: GameSessionStore,
    /// Single-slot save store.
    pub save: Arc<SaveStore>,
    /// Global Configuration
    pub config: Arc<AppConfig>,
}
