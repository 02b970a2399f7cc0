//! Core engine types: directions, RNG, game state.
//!
//! These are the fundamental building blocks the rest of the crate is built
//! on. The board algorithm itself lives in [`crate::engine`].

pub mod direction;
pub mod rng;
pub mod state;

pub use direction::Direction;
pub use rng::{GameRng, GameRngState};
pub use state::{GameState, GameStatus};
