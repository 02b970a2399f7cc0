//! Aggregate game statistics.
//!
//! Updated once per completed game; never consumed by the engine itself.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::store::kv::{keys, KvStore};

/// Running totals and averages across all completed games on this device.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GameStats {
    pub games_played: u32,
    pub games_won: u32,
    pub total_score: u64,
    pub best_score: u32,
    /// Rounded mean score per completed game.
    pub average_score: u32,
    pub total_moves: u64,
    /// Rounded mean move count per completed game.
    pub average_moves_per_game: u32,
}

/// Load persisted stats. Absent or corrupt records read as zeroed stats.
#[must_use]
pub fn load_stats(store: &impl KvStore) -> GameStats {
    let Some(raw) = store.get(keys::STATS) else {
        return GameStats::default();
    };
    match serde_json::from_str(&raw) {
        Ok(stats) => stats,
        Err(err) => {
            warn!(%err, "discarding corrupt game stats");
            GameStats::default()
        }
    }
}

/// Persist stats.
pub fn save_stats(store: &mut impl KvStore, stats: &GameStats) -> anyhow::Result<()> {
    let json = serde_json::to_string(stats)?;
    store.set(keys::STATS, &json)
}

/// Record one completed game and persist the updated totals.
///
/// `_final_tile` is accepted for interface compatibility with score
/// submission but does not feed any aggregate.
pub fn record(
    store: &mut impl KvStore,
    score: u32,
    moves: u32,
    won: bool,
    _final_tile: u32,
) -> anyhow::Result<GameStats> {
    let mut stats = load_stats(store);

    stats.games_played += 1;
    stats.games_won += u32::from(won);
    stats.total_score += u64::from(score);
    stats.best_score = stats.best_score.max(score);
    stats.total_moves += u64::from(moves);
    stats.average_score = rounded_mean(stats.total_score, stats.games_played);
    stats.average_moves_per_game = rounded_mean(stats.total_moves, stats.games_played);

    save_stats(store, &stats)?;
    Ok(stats)
}

fn rounded_mean(total: u64, count: u32) -> u32 {
    if count == 0 {
        return 0;
    }
    ((total as f64 / f64::from(count)).round()) as u32
}
