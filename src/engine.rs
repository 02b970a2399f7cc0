//! The 2048 board algorithm: slide, merge, spawn, and terminal detection.
//!
//! Everything here is a pure function over value-type boards. The only
//! non-determinism is [`spawn_random_tile`], which takes an explicit
//! [`GameRng`] so tests can pin the tile sequence.
//!
//! ## Collapse semantics
//!
//! A move collapses each row (left/right) or column (up/down) independently:
//!
//! 1. Compact non-empty tiles toward the leading edge, preserving order.
//! 2. Scan leading-to-trailing once; each adjacent equal pair merges into a
//!    single doubled tile. A tile participates in at most one merge per move,
//!    so `[2,2,2,2]` becomes `[4,4,0,0]`, never `[8,0,0,0]`.
//! 3. Pad with empty cells back to line length.
//!
//! Right and down are handled by reversing the line, collapsing, and
//! reversing back, with merge indices remapped to board coordinates.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::direction::Direction;
use crate::core::rng::GameRng;
use crate::core::state::GameStatus;

/// Board edge length. The grid never changes size during a game.
pub const BOARD_SIZE: usize = 4;

/// Reaching this tile value wins the game.
pub const WIN_TILE: u32 = 2048;

/// Value of a freshly spawned tile when the 0.9 roll hits.
pub const SPAWN_LOW: u32 = 2;

/// Value of a freshly spawned tile on the remaining 0.1.
pub const SPAWN_HIGH: u32 = 4;

/// Probability that a spawned tile is [`SPAWN_LOW`].
pub const SPAWN_LOW_CHANCE: f64 = 0.9;

/// One line of the board (a row or a column).
pub type Line = [u32; BOARD_SIZE];

/// A 4×4 grid of tile values. `0` is an empty cell; every non-zero cell is
/// a power of two ≥ 2.
///
/// Boards are small `Copy` values: every transition produces a fresh board,
/// so snapshots never alias a mutable grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board([[u32; BOARD_SIZE]; BOARD_SIZE]);

impl Board {
    /// Create an empty board.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a board from explicit rows.
    ///
    /// Intended for tests and snapshot restoration. Debug builds assert the
    /// tile-value invariant (empty or power of two ≥ 2).
    #[must_use]
    pub fn from_rows(rows: [[u32; BOARD_SIZE]; BOARD_SIZE]) -> Self {
        debug_assert!(
            rows.iter()
                .flatten()
                .all(|&v| v == 0 || (v >= 2 && v.is_power_of_two())),
            "tile values must be empty or powers of two >= 2"
        );
        Self(rows)
    }

    /// Get the value at (row, col). `0` means empty.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> u32 {
        self.0[row][col]
    }

    /// The raw grid, row-major.
    #[must_use]
    pub fn rows(&self) -> &[[u32; BOARD_SIZE]; BOARD_SIZE] {
        &self.0
    }

    /// All empty (row, col) positions.
    #[must_use]
    pub fn empty_positions(&self) -> Vec<(usize, usize)> {
        let mut empty = Vec::new();
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                if self.0[row][col] == 0 {
                    empty.push((row, col));
                }
            }
        }
        empty
    }

    /// Whether no cell is empty.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.0.iter().flatten().all(|&v| v != 0)
    }

    /// Sum of all tile values on the board.
    #[must_use]
    pub fn tile_sum(&self) -> u64 {
        self.0.iter().flatten().map(|&v| u64::from(v)).sum()
    }

    /// The highest tile value on the board (0 for an empty board).
    #[must_use]
    pub fn max_tile(&self) -> u32 {
        self.0.iter().flatten().copied().max().unwrap_or(0)
    }

    fn row(&self, row: usize) -> Line {
        self.0[row]
    }

    fn set_row(&mut self, row: usize, line: Line) {
        self.0[row] = line;
    }

    fn col(&self, col: usize) -> Line {
        let mut line = [0; BOARD_SIZE];
        for (row, cell) in line.iter_mut().enumerate() {
            *cell = self.0[row][col];
        }
        line
    }

    fn set_col(&mut self, col: usize, line: Line) {
        for (row, &value) in line.iter().enumerate() {
            self.0[row][col] = value;
        }
    }

    fn set(&mut self, row: usize, col: usize, value: u32) {
        self.0[row][col] = value;
    }
}

/// A merge produced by a move, in absolute board coordinates.
///
/// Merge events are a side channel for visual effects (confetti, pop
/// animations). Game logic never depends on them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeEvent {
    pub row: usize,
    pub col: usize,
    /// The doubled value of the merged tile.
    pub value: u32,
}

/// Merge events for one move. At most 8 merges fit on a 4×4 board, so the
/// list never leaves the stack.
pub type MergeList = SmallVec<[MergeEvent; 8]>;

/// A merge within a single collapsed line: destination index and new value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LineMerge {
    pub index: usize,
    pub value: u32,
}

/// Result of collapsing one line toward its leading edge.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LineResult {
    pub line: Line,
    /// Score contribution: the sum of merged tile values.
    pub score: u32,
    /// Whether the output differs from the input by content.
    pub moved: bool,
    pub merges: SmallVec<[LineMerge; 2]>,
}

/// Collapse a single line toward index 0.
///
/// Compacts out empty cells, then merges adjacent equal pairs in one
/// leading-to-trailing pass. A merged result is never re-merged within the
/// same move: `[2,2,4,0]` yields `[4,4,0,0]`, and the produced 4s stay apart.
#[must_use]
pub fn collapse_line(line: Line) -> LineResult {
    let tiles: SmallVec<[u32; BOARD_SIZE]> =
        line.iter().copied().filter(|&v| v != 0).collect();

    let mut out = [0u32; BOARD_SIZE];
    let mut merges = SmallVec::new();
    let mut score = 0;
    let mut len = 0;
    let mut i = 0;

    while i < tiles.len() {
        if i + 1 < tiles.len() && tiles[i] == tiles[i + 1] {
            let merged = tiles[i] * 2;
            out[len] = merged;
            score += merged;
            merges.push(LineMerge { index: len, value: merged });
            // Both source tiles are consumed; the result never re-merges.
            i += 2;
        } else {
            out[len] = tiles[i];
            i += 1;
        }
        len += 1;
    }

    LineResult {
        line: out,
        score,
        moved: out != line,
        merges,
    }
}

/// Outcome of applying a move to a board, before any tile spawn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveOutcome {
    pub board: Board,
    /// Total score delta: the sum of all merge-event values.
    pub score: u32,
    /// Whether any line changed. A move with `moved == false` is rejected
    /// by the caller without consuming a turn.
    pub moved: bool,
    pub merges: MergeList,
}

/// Apply a slide to every row (left/right) or column (up/down).
///
/// Lines collapse independently; tiles never merge across rows or columns.
/// Merge events are reported in absolute (row, col) board coordinates with
/// indices remapped for the reversed directions.
#[must_use]
pub fn apply_move(board: Board, direction: Direction) -> MoveOutcome {
    let mut next = board;
    let mut merges = MergeList::new();
    let mut score = 0;
    let mut moved = false;

    match direction {
        Direction::Left => {
            for row in 0..BOARD_SIZE {
                let result = collapse_line(board.row(row));
                next.set_row(row, result.line);
                score += result.score;
                moved |= result.moved;
                for m in result.merges {
                    merges.push(MergeEvent { row, col: m.index, value: m.value });
                }
            }
        }
        Direction::Right => {
            for row in 0..BOARD_SIZE {
                let mut line = board.row(row);
                line.reverse();
                let mut result = collapse_line(line);
                result.line.reverse();
                next.set_row(row, result.line);
                score += result.score;
                moved |= result.moved;
                for m in result.merges {
                    merges.push(MergeEvent {
                        row,
                        col: BOARD_SIZE - 1 - m.index,
                        value: m.value,
                    });
                }
            }
        }
        Direction::Up => {
            for col in 0..BOARD_SIZE {
                let result = collapse_line(board.col(col));
                next.set_col(col, result.line);
                score += result.score;
                moved |= result.moved;
                for m in result.merges {
                    merges.push(MergeEvent { row: m.index, col, value: m.value });
                }
            }
        }
        Direction::Down => {
            for col in 0..BOARD_SIZE {
                let mut line = board.col(col);
                line.reverse();
                let mut result = collapse_line(line);
                result.line.reverse();
                next.set_col(col, result.line);
                score += result.score;
                moved |= result.moved;
                for m in result.merges {
                    merges.push(MergeEvent {
                        row: BOARD_SIZE - 1 - m.index,
                        col,
                        value: m.value,
                    });
                }
            }
        }
    }

    MoveOutcome { board: next, score, moved, merges }
}

/// Place one random tile on a uniformly chosen empty cell.
///
/// The value is [`SPAWN_LOW`] with probability [`SPAWN_LOW_CHANCE`], else
/// [`SPAWN_HIGH`]. A full board is returned unchanged; that is a legal
/// terminal condition detected separately by [`can_move`].
#[must_use]
pub fn spawn_random_tile(board: Board, rng: &mut GameRng) -> Board {
    let empty = board.empty_positions();
    if empty.is_empty() {
        return board;
    }

    let (row, col) = empty[rng.gen_range_usize(0..empty.len())];
    let value = if rng.gen_bool(SPAWN_LOW_CHANCE) {
        SPAWN_LOW
    } else {
        SPAWN_HIGH
    };

    let mut next = board;
    next.set(row, col, value);
    next
}

/// Whether any move remains: an empty cell exists, or two orthogonally
/// adjacent cells hold equal values. The loss condition is the negation.
#[must_use]
pub fn can_move(board: Board) -> bool {
    if !board.is_full() {
        return true;
    }

    for row in 0..BOARD_SIZE {
        for col in 0..BOARD_SIZE {
            let current = board.get(row, col);
            if col + 1 < BOARD_SIZE && board.get(row, col + 1) == current {
                return true;
            }
            if row + 1 < BOARD_SIZE && board.get(row + 1, col) == current {
                return true;
            }
        }
    }

    false
}

/// Whether any cell has reached [`WIN_TILE`].
#[must_use]
pub fn has_won(board: Board) -> bool {
    board.max_tile() >= WIN_TILE
}

/// Compute the status after a move.
///
/// `Won` is sticky: playing past 2048 never un-wins, even if continued
/// merging leaves no cell at the threshold. Otherwise the board decides:
/// win threshold reached, no moves left, or still playing.
#[must_use]
pub fn compute_status(board: Board, previous: GameStatus) -> GameStatus {
    if previous == GameStatus::Won {
        return GameStatus::Won;
    }
    if has_won(board) {
        return GameStatus::Won;
    }
    if !can_move(board) {
        return GameStatus::Lost;
    }
    GameStatus::Playing
}
