//! Best-score persistence.
//!
//! The best score is a ratchet kept per device. It is stored as plain
//! decimal text, matching the original record format.

use crate::store::kv::{keys, KvStore};

/// Load the persisted best score. Absent or unparseable records read as 0.
#[must_use]
pub fn load_best_score(store: &impl KvStore) -> u32 {
    store
        .get(keys::BEST_SCORE)
        .and_then(|raw| raw.trim().parse().ok())
        .unwrap_or(0)
}

/// Persist the best score.
pub fn save_best_score(store: &mut impl KvStore, score: u32) -> anyhow::Result<()> {
    store.set(keys::BEST_SCORE, &score.to_string())
}
