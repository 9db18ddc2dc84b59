//! The game engine: content tables, state transitions and derived views.
//!
//! Everything in this module is synchronous and I/O free. Persistence and
//! HTTP plumbing live in [`crate::save`] and [`crate::server`].

pub mod avatar;
pub mod content;
pub mod simulator;
pub mod state;
pub mod terminal;
pub mod verdict;

pub use content::{Choice, RoleInfo, Scenario, TerminalChallenge};
pub use state::{GameError, GameState, Impact, Role, Score};
