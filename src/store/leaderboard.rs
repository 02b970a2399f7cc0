//! Local leaderboard: top 10 scores, plus whole-store export/import.
//!
//! Entries are immutable once created. The store keeps at most
//! [`MAX_ENTRIES`] entries ordered by score descending and persists them as
//! one JSON record. Export bundles leaderboard, stats, and best score into a
//! single backup string; import validates the full backup shape before
//! touching any key, so a malformed backup never partially applies.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::engine::Board;
use crate::store::best_score::load_best_score;
use crate::store::kv::{keys, KvStore};
use crate::store::stats::{load_stats, GameStats};

/// The leaderboard retains only this many entries, highest score first.
pub const MAX_ENTRIES: usize = 10;

/// Name recorded when a player submits an empty name.
pub const ANONYMOUS: &str = "Anonymous";

/// A finished game on the leaderboard. Immutable once created.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub id: String,
    pub player_name: String,
    pub score: u32,
    /// Highest tile reached in the game.
    pub final_tile: u32,
    pub move_count: u32,
    pub timestamp: DateTime<Utc>,
    /// Wall-clock game duration in seconds.
    pub game_time: f64,
    pub board_state: Board,
}

/// A submission before the store assigns its id.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEntry {
    pub player_name: String,
    pub score: u32,
    pub final_tile: u32,
    pub move_count: u32,
    pub timestamp: DateTime<Utc>,
    pub game_time: f64,
    pub board_state: Board,
}

/// Serialized backup of everything the crate persists besides the live game.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Backup {
    pub leaderboard: Vec<LeaderboardEntry>,
    pub stats: GameStats,
    pub best_score: u32,
    pub export_date: DateTime<Utc>,
}

/// Load the leaderboard, highest score first. Corrupt records read as empty.
#[must_use]
pub fn list(store: &impl KvStore) -> Vec<LeaderboardEntry> {
    let Some(raw) = store.get(keys::LEADERBOARD) else {
        return Vec::new();
    };
    match serde_json::from_str(&raw) {
        Ok(entries) => entries,
        Err(err) => {
            warn!(%err, "discarding corrupt leaderboard");
            Vec::new()
        }
    }
}

/// Insert a new entry: assigns an id, re-sorts descending by score,
/// truncates to the top [`MAX_ENTRIES`], persists, and returns the stored
/// entry. Empty player names record as [`ANONYMOUS`].
pub fn append(store: &mut impl KvStore, entry: NewEntry) -> anyhow::Result<LeaderboardEntry> {
    let player_name = if entry.player_name.trim().is_empty() {
        ANONYMOUS.to_string()
    } else {
        entry.player_name
    };

    let stored = LeaderboardEntry {
        id: format!(
            "score-{}-{:08x}",
            entry.timestamp.timestamp_millis(),
            rand::random::<u32>()
        ),
        player_name,
        score: entry.score,
        final_tile: entry.final_tile,
        move_count: entry.move_count,
        timestamp: entry.timestamp,
        game_time: entry.game_time,
        board_state: entry.board_state,
    };

    let mut entries = list(store);
    entries.push(stored.clone());
    entries.sort_by(|a, b| b.score.cmp(&a.score));
    entries.truncate(MAX_ENTRIES);

    save(store, &entries)?;
    Ok(stored)
}

/// Delete all leaderboard entries.
pub fn clear(store: &mut impl KvStore) -> anyhow::Result<()> {
    store.remove(keys::LEADERBOARD)
}

/// Remove every record the crate persists: live game, leaderboard, stats,
/// and best score.
pub fn clear_all_data(store: &mut impl KvStore) -> anyhow::Result<()> {
    for key in keys::ALL {
        store.remove(key)?;
    }
    Ok(())
}

/// Serialize the leaderboard, stats, and best score into one backup string.
pub fn export(store: &impl KvStore) -> anyhow::Result<String> {
    let backup = Backup {
        leaderboard: list(store),
        stats: load_stats(store),
        best_score: load_best_score(store),
        export_date: Utc::now(),
    };
    Ok(serde_json::to_string_pretty(&backup)?)
}

/// Apply a backup produced by [`export`]. Returns whether the import
/// succeeded.
///
/// Partial import is never allowed. The whole backup is validated and
/// serialized before any write, and a write failure midway rolls the
/// already-written keys back to their prior records.
pub fn import(store: &mut impl KvStore, raw: &str) -> bool {
    let backup: Backup = match serde_json::from_str(raw) {
        Ok(backup) => backup,
        Err(err) => {
            warn!(%err, "rejecting malformed backup");
            return false;
        }
    };

    let mut leaderboard = backup.leaderboard;
    leaderboard.sort_by(|a, b| b.score.cmp(&a.score));
    leaderboard.truncate(MAX_ENTRIES);

    let Ok(leaderboard_json) = serde_json::to_string(&leaderboard) else {
        return false;
    };
    let Ok(stats_json) = serde_json::to_string(&backup.stats) else {
        return false;
    };

    let staged = [
        (keys::LEADERBOARD, leaderboard_json),
        (keys::STATS, stats_json),
        (keys::BEST_SCORE, backup.best_score.to_string()),
    ];
    let prior: Vec<(&str, Option<String>)> =
        staged.iter().map(|(key, _)| (*key, store.get(key))).collect();

    for &(key, ref value) in &staged {
        if let Err(err) = store.set(key, value) {
            warn!(%err, key, "import write failed, restoring prior records");
            for (prior_key, prior_value) in &prior {
                let _ = match prior_value {
                    Some(value) => store.set(prior_key, value),
                    None => store.remove(prior_key),
                };
            }
            return false;
        }
    }

    true
}

fn save(store: &mut impl KvStore, entries: &[LeaderboardEntry]) -> anyhow::Result<()> {
    let json = serde_json::to_string(entries)?;
    store.set(keys::LEADERBOARD, &json)
}
