//! Game-state snapshot persistence.
//!
//! One JSON record under [`keys::GAME_STATE`] holding the full
//! [`GameState`], timestamps in RFC 3339 and the RNG position included, so
//! a restored game continues its exact tile sequence. Corrupt records are
//! treated as absent; the caller starts a fresh game instead.

use tracing::warn;

use crate::core::state::GameState;
use crate::store::kv::{keys, KvStore};

/// Persist the current game snapshot.
pub fn save_snapshot(store: &mut impl KvStore, state: &GameState) -> anyhow::Result<()> {
    let json = serde_json::to_string(state)?;
    store.set(keys::GAME_STATE, &json)
}

/// Load the persisted snapshot, if any. Malformed JSON reads as absent.
#[must_use]
pub fn load_snapshot(store: &impl KvStore) -> Option<GameState> {
    let raw = store.get(keys::GAME_STATE)?;
    match serde_json::from_str(&raw) {
        Ok(state) => Some(state),
        Err(err) => {
            warn!(%err, "discarding corrupt game snapshot");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::direction::Direction;
    use crate::store::kv::MemoryStore;

    #[test]
    fn test_absent_snapshot() {
        let store = MemoryStore::new();
        assert!(load_snapshot(&store).is_none());
    }

    #[test]
    fn test_round_trip() {
        let mut store = MemoryStore::new();
        let mut state = GameState::new(42, 500);
        while !state.make_move(Direction::Left)
            && !state.make_move(Direction::Up)
            && !state.make_move(Direction::Right)
            && !state.make_move(Direction::Down)
        {}

        save_snapshot(&mut store, &state).unwrap();
        let restored = load_snapshot(&store).expect("snapshot should load");

        assert_eq!(restored, state);
        assert_eq!(restored.started_at, state.started_at);
    }

    #[test]
    fn test_corrupt_snapshot_reads_as_absent() {
        let mut store = MemoryStore::new();
        store.set(keys::GAME_STATE, "{ not json").unwrap();
        assert!(load_snapshot(&store).is_none());
    }

    #[test]
    fn test_wrong_shape_reads_as_absent() {
        let mut store = MemoryStore::new();
        store.set(keys::GAME_STATE, r#"{"score": "high"}"#).unwrap();
        assert!(load_snapshot(&store).is_none());
    }
}
