//! # twenty48
//!
//! A deterministic 2048 game engine with score tracking and a local
//! leaderboard.
//!
//! ## Design Principles
//!
//! 1. **Pure transitions**: the board algorithm is pure functions over
//!    value-type boards. Every accepted move produces a fresh grid; no two
//!    snapshots share mutable state.
//!
//! 2. **One randomness seam**: tile spawning takes an explicit seedable RNG,
//!    so collapse, scoring, and status logic test deterministically.
//!
//! 3. **Loads never fail**: persisted records that are missing or corrupt
//!    degrade to defaults. Rejected moves and rejected imports are silent
//!    signals, not errors.
//!
//! ## Modules
//!
//! - `core`: directions, RNG, game state and its transitions
//! - `engine`: the board algorithm (slide, merge, spawn, terminal detection)
//! - `store`: key-value persistence (best score, snapshot, leaderboard, stats)
//! - `input`: key-code to intent mapping
//!
//! ## Example
//!
//! ```
//! use twenty48::{Direction, GameState};
//!
//! let mut game = GameState::new(42, 0);
//! for direction in Direction::ALL {
//!     if game.make_move(direction) {
//!         break;
//!     }
//! }
//! assert!(game.move_count <= 1);
//! ```

pub mod core;
pub mod engine;
pub mod input;
pub mod store;

// Re-export commonly used types
pub use crate::core::{Direction, GameRng, GameRngState, GameState, GameStatus};

pub use crate::engine::{
    apply_move, can_move, collapse_line, compute_status, has_won, spawn_random_tile, Board,
    LineMerge, LineResult, MergeEvent, MergeList, MoveOutcome, BOARD_SIZE, WIN_TILE,
};

pub use crate::input::{intent_for_key, Intent};

pub use crate::store::{
    keys, load_best_score, load_snapshot, save_best_score, save_snapshot, Backup, FileStore,
    GameStats, KvStore, LeaderboardEntry, MemoryStore, NewEntry,
};
