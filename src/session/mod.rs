//! Game session management.
//!
//! This module provides in-memory storage for live play-throughs. Sessions
//! are identified by UUID and hold the authoritative
//! [`GameState`](crate::game::GameState) between requests; durable progress
//! goes through [`crate::save`] instead.
//!
//! # Architecture
//!
//! - [`GameSession`]: one live play-through
//! - [`GameSessionStore`]: thread-safe store for all active sessions
//!
//! # Example
//!
//! ```rust
//! use operation_nird::game::Role;
//! use operation_nird::session::GameSessionStore;
//!
//! let store = GameSessionStore::new();
//! let session = store.create();
//! session.update(|state| state.select_role(Role::Technicien));
//!
//! assert_eq!(session.state().role, Some(Role::Technicien));
//! ```

mod store;

pub use store::{DEFAULT_SESSION_TIMEOUT, GameSession, GameSessionStore};
