//! Game state: the authoritative snapshot and its transitions.
//!
//! ## GameState
//!
//! One snapshot owns everything a game needs: board, score, best score,
//! status, move counter, timestamps, the RNG, and at most one previous
//! snapshot for single-level undo.
//!
//! Every accepted move produces a fresh board value; no two snapshots ever
//! share a mutable grid, so the undo snapshot stays valid while the current
//! board keeps changing.
//!
//! ## Invariants
//!
//! - `score` never decreases within a game.
//! - `best_score` is a ratchet: `max` over every score ever reached on this
//!   device, never reverted (not even by undo).
//! - Status moves `Playing → {Won, Lost, Paused}` and `Paused ↔ Playing`
//!   only. `Won` and `Lost` are terminal until a fresh game; `Won` is sticky.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::debug;

use crate::core::direction::Direction;
use crate::core::rng::GameRng;
use crate::engine::{self, Board, MergeList};

/// Lifecycle tag for a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    Playing,
    Won,
    Lost,
    Paused,
}

impl GameStatus {
    /// Whether no further moves are accepted without a reset.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, GameStatus::Won | GameStatus::Lost)
    }
}

/// The authoritative game snapshot.
///
/// Serializes to JSON with RFC 3339 timestamps and the RNG position, so a
/// restored game continues the exact tile sequence it was saved with.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    pub board: Board,
    pub score: u32,
    /// Best score ever reached on this device. Loaded from the best-score
    /// store at game start; only ever ratchets upward.
    pub best_score: u32,
    pub status: GameStatus,
    pub can_undo: bool,
    /// Single-level undo snapshot, overwritten on every accepted move.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous: Option<Box<GameState>>,
    pub move_count: u32,
    pub started_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ended_at: Option<DateTime<Utc>>,
    /// Merges produced by the most recent accepted move. Side channel for
    /// visual effects only; never consulted by game logic.
    #[serde(default, skip_serializing_if = "SmallVec::is_empty")]
    pub last_merges: MergeList,
    rng: GameRng,
}

impl GameState {
    /// Start a fresh game: empty board with two spawned tiles, score 0,
    /// status `Playing`. `best_score` comes from the caller's store.
    #[must_use]
    pub fn new(seed: u64, best_score: u32) -> Self {
        Self::with_rng(GameRng::new(seed), best_score)
    }

    /// Start a fresh game seeded from system entropy.
    #[must_use]
    pub fn from_entropy(best_score: u32) -> Self {
        Self::with_rng(GameRng::from_entropy(), best_score)
    }

    fn with_rng(mut rng: GameRng, best_score: u32) -> Self {
        let board = engine::spawn_random_tile(Board::new(), &mut rng);
        let board = engine::spawn_random_tile(board, &mut rng);

        Self {
            board,
            score: 0,
            best_score,
            status: GameStatus::Playing,
            can_undo: false,
            previous: None,
            move_count: 0,
            started_at: Utc::now(),
            ended_at: None,
            last_merges: MergeList::new(),
            rng,
        }
    }

    /// Attempt a move. Returns whether the move was accepted.
    ///
    /// Rejected moves are silent no-ops, not errors: a direction that shifts
    /// nothing consumes no turn, spawns no tile, and advances no counter,
    /// and any move is ignored unless the status is `Playing`. On rejection
    /// the state is untouched.
    ///
    /// An accepted move collapses the board, spawns one random tile, adds
    /// the merge score, ratchets the best score, snapshots the pre-move
    /// state for undo, and recomputes the status. Terminal transitions stamp
    /// `ended_at`.
    pub fn make_move(&mut self, direction: Direction) -> bool {
        if self.status != GameStatus::Playing {
            return false;
        }

        let outcome = engine::apply_move(self.board, direction);
        if !outcome.moved {
            return false;
        }

        let mut snapshot = self.clone();
        snapshot.previous = None;
        // Merge events are ephemeral per-move output; the snapshot's refer
        // to a move it predates, so undo must not resurrect them.
        snapshot.last_merges = MergeList::new();

        self.board = engine::spawn_random_tile(outcome.board, &mut self.rng);
        self.score += outcome.score;
        self.best_score = self.best_score.max(self.score);
        self.status = engine::compute_status(self.board, self.status);
        self.can_undo = true;
        self.previous = Some(Box::new(snapshot));
        self.move_count += 1;
        self.last_merges = outcome.merges;

        if self.status.is_terminal() {
            self.ended_at = Some(Utc::now());
            debug!(
                status = ?self.status,
                score = self.score,
                moves = self.move_count,
                "game reached terminal state"
            );
        }

        true
    }

    /// Restore the previous snapshot, if one exists.
    ///
    /// The restored state cannot be undone again, and the best score is
    /// preserved from the state being discarded rather than reverted.
    /// Returns whether an undo happened.
    pub fn undo(&mut self) -> bool {
        if !self.can_undo {
            return false;
        }
        let Some(previous) = self.previous.take() else {
            return false;
        };

        let best_score = self.best_score.max(previous.best_score);
        *self = *previous;
        self.can_undo = false;
        self.best_score = best_score;
        true
    }

    /// Toggle between `Playing` and `Paused`.
    ///
    /// Has no effect on terminal states and touches nothing but the status.
    pub fn toggle_pause(&mut self) {
        self.status = match self.status {
            GameStatus::Playing => GameStatus::Paused,
            GameStatus::Paused => GameStatus::Playing,
            terminal => terminal,
        };
    }

    /// Wall-clock duration of a finished game, if it has ended.
    #[must_use]
    pub fn duration(&self) -> Option<Duration> {
        self.ended_at.map(|end| end - self.started_at)
    }

    /// The highest tile on the current board.
    #[must_use]
    pub fn final_tile(&self) -> u32 {
        self.board.max_tile()
    }
}
