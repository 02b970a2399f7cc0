//! Persistence collaborators: best score, game snapshot, leaderboard, stats.
//!
//! Everything persists as JSON-shaped text in a local key-value store, one
//! record per logical key (see [`kv::keys`]). Loads never fail: malformed
//! data degrades to defaults rather than propagating an error.

pub mod best_score;
pub mod kv;
pub mod leaderboard;
pub mod snapshot;
pub mod stats;

pub use best_score::{load_best_score, save_best_score};
pub use kv::{keys, FileStore, KvStore, MemoryStore};
pub use leaderboard::{Backup, LeaderboardEntry, NewEntry, ANONYMOUS, MAX_ENTRIES};
pub use snapshot::{load_snapshot, save_snapshot};
pub use stats::GameStats;
