//! Game session and session storage.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::game::GameState;

/// Default session timeout (30 minutes).
pub const DEFAULT_SESSION_TIMEOUT: Duration = Duration::from_secs(30 * 60);

/// One live play-through.
///
/// The session owns the authoritative [`GameState`] plus per-challenge
/// failure counters for the terminal mini-game, which are deliberately not
/// part of the saved snapshot.
#[derive(Debug)]
pub struct GameSession {
    inner: Arc<GameSessionInner>,
}

#[derive(Debug)]
struct GameSessionInner {
    /// Unique session identifier.
    id: String,
    /// Authoritative game state.
    state: RwLock<GameState>,
    /// Failed attempts per terminal challenge id.
    terminal_failures: RwLock<HashMap<String, u32>>,
    /// Session creation time.
    created_at: DateTime<Utc>,
    /// Last activity time.
    last_activity: RwLock<DateTime<Utc>>,
}

impl Clone for GameSession {
    fn clone(&self) -> Self {
        Self { inner: Arc::clone(&self.inner) }
    }
}

impl GameSession {
    /// Create a new session around an initial state.
    fn new(id: String, state: GameState) -> Self {
        let now = Utc::now();
        Self {
            inner: Arc::new(GameSessionInner {
                id,
                state: RwLock::new(state),
                terminal_failures: RwLock::new(HashMap::new()),
                created_at: now,
                last_activity: RwLock::new(now),
            }),
        }
    }

    /// Get the session ID.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.inner.id
    }

    /// Snapshot of the current game state.
    #[must_use]
    pub fn state(&self) -> GameState {
        self.inner.state.read().unwrap().clone()
    }

    /// Run a transition against the state under the write lock.
    ///
    /// The closure's return value is passed through, so fallible engine
    /// transitions keep their `Result`.
    pub fn update<T>(&self, f: impl FnOnce(&mut GameState) -> T) -> T {
        let mut guard = self.inner.state.write().unwrap();
        let out = f(&mut guard);
        drop(guard);
        self.touch();
        out
    }

    /// Failed attempts recorded for a terminal challenge.
    #[must_use]
    pub fn terminal_failures(&self, challenge_id: &str) -> u32 {
        self.inner.terminal_failures.read().unwrap().get(challenge_id).copied().unwrap_or(0)
    }

    /// Record one failed attempt for a terminal challenge.
    pub fn record_terminal_failure(&self, challenge_id: &str) {
        let mut guard = self.inner.terminal_failures.write().unwrap();
        *guard.entry(challenge_id.to_string()).or_insert(0) += 1;
        drop(guard);
        self.touch();
    }

    /// Forget the failure counter of one challenge, once it is solved.
    pub fn clear_terminal_failures(&self, challenge_id: &str) {
        self.inner.terminal_failures.write().unwrap().remove(challenge_id);
    }

    /// Forget all failure counters, on reset.
    pub fn clear_all_terminal_failures(&self) {
        self.inner.terminal_failures.write().unwrap().clear();
    }

    /// Update the last activity timestamp.
    fn touch(&self) {
        let mut guard = self.inner.last_activity.write().unwrap();
        *guard = Utc::now();
    }

    /// Check if the session has expired.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.is_expired_with_timeout(DEFAULT_SESSION_TIMEOUT)
    }

    /// Check if the session has expired with a custom timeout.
    #[must_use]
    pub fn is_expired_with_timeout(&self, timeout: Duration) -> bool {
        let last = *self.inner.last_activity.read().unwrap();
        let now = Utc::now();
        if let Ok(duration) = (now - last).to_std() {
            duration > timeout
        } else {
            // Negative duration means clock skew or "last" is in future.
            false
        }
    }

    /// Get the session age.
    #[must_use]
    pub fn age(&self) -> Duration {
        let now = Utc::now();
        (now - self.inner.created_at).to_std().unwrap_or(Duration::from_secs(0))
    }
}

/// Thread-safe store for game sessions.
///
/// Provides methods for creating, retrieving, and cleaning up sessions.
#[derive(Debug, Clone)]
pub struct GameSessionStore {
    inner: Arc<GameSessionStoreInner>,
}

#[derive(Debug)]
struct GameSessionStoreInner {
    sessions: RwLock<HashMap<String, GameSession>>,
}

impl Default for GameSessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl GameSessionStore {
    /// Create a new session store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Arc::new(GameSessionStoreInner { sessions: RwLock::new(HashMap::new()) }),
        }
    }

    /// Create a session with a fresh state.
    #[must_use]
    pub fn create(&self) -> GameSession {
        self.create_with_state(GameState::default())
    }

    /// Create a session hydrated from an existing state, e.g. a save slot.
    #[must_use]
    pub fn create_with_state(&self, state: GameState) -> GameSession {
        let id = Uuid::new_v4().to_string();
        let session = GameSession::new(id.clone(), state);
        let mut guard = self.inner.sessions.write().unwrap();
        guard.insert(id, session.clone());
        session
    }

    /// Get a session by ID.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<GameSession> {
        let guard = self.inner.sessions.read().unwrap();
        guard.get(id).cloned()
    }

    /// Remove a session by ID.
    pub fn remove(&self, id: &str) -> Option<GameSession> {
        let mut guard = self.inner.sessions.write().unwrap();
        guard.remove(id)
    }

    /// Get the number of active sessions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.sessions.read().unwrap().len()
    }

    /// Check if there are no sessions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove all expired sessions.
    ///
    /// Returns the number of sessions removed.
    pub fn cleanup_expired(&self) -> usize {
        self.cleanup_expired_with_timeout(DEFAULT_SESSION_TIMEOUT)
    }

    /// Remove sessions that have been inactive longer than the timeout.
    pub fn cleanup_expired_with_timeout(&self, timeout: Duration) -> usize {
        let mut guard = self.inner.sessions.write().unwrap();
        let before = guard.len();
        guard.retain(|_, session| !session.is_expired_with_timeout(timeout));
        before - guard.len()
    }

    /// List all session IDs.
    #[must_use]
    pub fn list_ids(&self) -> Vec<String> {
        self.inner.sessions.read().unwrap().keys().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Role;

    #[test]
    fn test_session_update_and_snapshot() {
        let session = GameSession::new("test-123".to_string(), GameState::default());

        assert_eq!(session.id(), "test-123");
        assert_eq!(session.state().role, None);

        session.update(|s| s.select_role(Role::Eleve));
        let picked = session.update(|s| s.make_choice("eleve-1-b")).unwrap();
        assert!(picked.good);

        let snapshot = session.state();
        assert_eq!(snapshot.role, Some(Role::Eleve));
        assert_eq!(snapshot.decisions, vec!["eleve-1-b".to_string()]);
    }

    #[test]
    fn test_terminal_failure_counters() {
        let session = GameSession::new("test".to_string(), GameState::default());

        assert_eq!(session.terminal_failures("term-1"), 0);
        session.record_terminal_failure("term-1");
        session.record_terminal_failure("term-1");
        session.record_terminal_failure("term-2");
        assert_eq!(session.terminal_failures("term-1"), 2);
        assert_eq!(session.terminal_failures("term-2"), 1);

        session.clear_terminal_failures("term-1");
        assert_eq!(session.terminal_failures("term-1"), 0);
        assert_eq!(session.terminal_failures("term-2"), 1);

        session.clear_all_terminal_failures();
        assert_eq!(session.terminal_failures("term-2"), 0);
    }

    #[test]
    fn test_session_store_lifecycle() {
        let store = GameSessionStore::new();

        assert!(store.is_empty());

        let session = store.create();
        assert_eq!(store.len(), 1);

        let retrieved = store.get(session.id()).unwrap();
        assert_eq!(retrieved.id(), session.id());
        assert!(store.get("no-such-id").is_none());

        store.remove(session.id());
        assert!(store.is_empty());
    }

    #[test]
    fn test_store_hydrates_from_existing_state() {
        let store = GameSessionStore::new();

        let mut saved = GameState::default();
        saved.select_role(Role::Parent);
        saved.advance();

        let session = store.create_with_state(saved.clone());
        assert_eq!(session.state(), saved);
    }

    #[test]
    fn test_sessions_share_state_across_clones() {
        let store = GameSessionStore::new();
        let session = store.create();

        let same = store.get(session.id()).unwrap();
        same.update(|s| s.select_role(Role::Directeur));

        assert_eq!(session.state().role, Some(Role::Directeur));
    }

    #[test]
    fn test_fresh_session_is_not_expired() {
        let session = GameSessionStore::new().create();
        assert!(!session.is_expired());
        assert!(session.age() < Duration::from_secs(5));
    }
}
