//! Single-slot save persistence.
//!
//! The game keeps exactly one save slot on disk, named after the
//! `nird-game-state` storage key the browser build used. Loading is
//! deliberately forgiving: a missing, truncated or hand-edited file never
//! blocks a new game, it just falls back to defaults.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::game::GameState;

/// Storage key carried over from the browser build.
pub const SAVE_KEY: &str = "nird-game-state";

/// On-disk payload: the snapshot plus write metadata.
#[derive(Debug, Serialize, Deserialize)]
struct SaveSlot {
    #[serde(default)]
    saved_at: Option<DateTime<Utc>>,
    #[serde(default)]
    state: GameState,
}

/// File-backed store for the single save slot.
#[derive(Debug, Clone)]
pub struct SaveStore {
    path: PathBuf,
}

impl SaveStore {
    /// Create a store writing to `<data_dir>/nird-game-state.json`.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self { path: data_dir.into().join(format!("{SAVE_KEY}.json")) }
    }

    /// Path of the slot file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the saved state, falling back to [`GameState::default`] when the
    /// slot is missing or unreadable. Partial payloads merge over defaults;
    /// the avatar level is clamped back into `[1, 5]` in case the file was
    /// edited by hand.
    #[must_use]
    pub fn load(&self) -> GameState {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return GameState::default(),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Failed to read save slot");
                return GameState::default();
            }
        };

        match serde_json::from_str::<SaveSlot>(&raw) {
            Ok(slot) => sanitize(slot.state),
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Save slot is corrupt, starting fresh"
                );
                GameState::default()
            }
        }
    }

    /// Whether a slot file exists on disk.
    #[must_use]
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Persist a snapshot. The slot is written to a temporary file first and
    /// renamed into place, so a crash mid-write leaves the previous save
    /// intact.
    ///
    /// # Errors
    ///
    /// Returns an error when the data directory cannot be created or the
    /// file cannot be written.
    pub fn save(&self, state: &GameState) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let slot = SaveSlot { saved_at: Some(Utc::now()), state: state.clone() };
        let json = serde_json::to_string_pretty(&slot)?;

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    /// Remove the slot file. Missing files are not an error.
    ///
    /// # Errors
    ///
    /// Returns an error when the file exists but cannot be removed.
    pub fn clear(&self) -> anyhow::Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

fn sanitize(mut state: GameState) -> GameState {
    state.avatar_level = state.avatar_level.clamp(1, 5);
    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Role;

    fn store() -> (tempfile::TempDir, SaveStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = SaveStore::new(dir.path());
        (dir, store)
    }

    #[test]
    fn test_missing_slot_loads_defaults() {
        let (_dir, store) = store();
        assert!(!store.exists());
        assert_eq!(store.load(), GameState::default());
    }

    #[test]
    fn test_save_then_load_roundtrip() {
        let (_dir, store) = store();

        let mut state = GameState::default();
        state.select_role(Role::Technicien);
        state.make_choice("tech-1-b").unwrap();
        state.advance();

        store.save(&state).unwrap();
        assert!(store.exists());
        assert_eq!(store.load(), state);
    }

    #[test]
    fn test_corrupt_slot_falls_back_to_defaults() {
        let (_dir, store) = store();
        fs::write(store.path(), "{not json at all").unwrap();
        assert_eq!(store.load(), GameState::default());
    }

    #[test]
    fn test_partial_slot_merges_over_defaults() {
        let (_dir, store) = store();
        fs::write(store.path(), r#"{"state":{"role":"parent","avatar_level":3}}"#).unwrap();

        let state = store.load();
        assert_eq!(state.role, Some(Role::Parent));
        assert_eq!(state.avatar_level, 3);
        assert_eq!(state.scenario_index, 0);
        assert!(state.decisions.is_empty());
    }

    #[test]
    fn test_hand_edited_avatar_level_is_clamped() {
        let (_dir, store) = store();
        fs::write(store.path(), r#"{"state":{"avatar_level":42}}"#).unwrap();
        assert_eq!(store.load().avatar_level, 5);

        fs::write(store.path(), r#"{"state":{"avatar_level":0}}"#).unwrap();
        assert_eq!(store.load().avatar_level, 1);
    }

    #[test]
    fn test_save_overwrites_previous_slot() {
        let (_dir, store) = store();

        let mut first = GameState::default();
        first.select_role(Role::Eleve);
        store.save(&first).unwrap();

        let mut second = GameState::default();
        second.select_role(Role::Directeur);
        second.advance();
        store.save(&second).unwrap();

        assert_eq!(store.load(), second);
    }

    #[test]
    fn test_clear_removes_the_slot() {
        let (_dir, store) = store();
        store.save(&GameState::default()).unwrap();
        assert!(store.exists());

        store.clear().unwrap();
        assert!(!store.exists());
        // Clearing twice is fine.
        store.clear().unwrap();
    }

    #[test]
    fn test_slot_records_a_timestamp() {
        let (_dir, store) = store();
        store.save(&GameState::default()).unwrap();

        let raw = fs::read_to_string(store.path()).unwrap();
        let slot: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert!(slot["saved_at"].is_string());
    }
}
