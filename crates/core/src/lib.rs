//! Core game logic module - pure, deterministic, and testable
//!
//! This crate holds the rules of the falling-block puzzle: the board, the
//! shape table, collision and wall kicks, line clearing and scoring, and the
//! signal-driven state machine that ties them together. It performs no I/O;
//! the only side channel is `tracing` events.
//!
//! # Module Structure
//!
//! - [`board`]: 10x20 grid of locked blocks and line clearing
//! - [`shapes`]: 4x4 occupancy masks for every kind and rotation
//! - [`piece`]: the active piece, collision, movement, rotation and drops
//! - [`scoring`]: score, level and speed bookkeeping
//! - [`rng`]: piece sources (seeded uniform draws or a scripted list)
//! - [`game_state`]: the session aggregate and its state machine
//! - [`snapshot`]: read-only copies for renderers
//!
//! # Game Rules
//!
//! - Pieces are drawn uniformly; there is no bag and no hold slot.
//! - Rotation is clockwise only. A blocked rotation tries one column left,
//!   then one column right, and otherwise leaves the piece untouched.
//! - A piece locks on the first gravity tick that cannot move it down.
//! - Clearing 1-4 lines at once scores 100/300/700/1500; every row of a hard
//!   drop is worth one more point.
//! - The level is `score / 600 + 1`, capped at 10, and never goes down.
//!
//! # Example
//!
//! ```
//! use brick_tetris_core::Game;
//! use brick_tetris_core::types::{Phase, Signal};
//!
//! let mut game = Game::from_seed(12345);
//! assert_eq!(game.phase(), Phase::Start);
//!
//! assert_eq!(game.dispatch(Signal::Enter), Phase::Fall);
//! game.dispatch(Signal::MoveRight);
//! game.dispatch(Signal::Rotate);
//! game.dispatch(Signal::HardDrop);
//!
//! assert!(game.stats().score > 0); // Hard drop awards points
//! ```
//!
//! # Timing
//!
//! The crate has no clock. A driver sends [`types::Signal::None`] whenever
//! [`scoring::tick_interval_ms`] elapses without input.

pub mod board;
pub mod error;
pub mod game_state;
pub mod piece;
pub mod rng;
pub mod scoring;
pub mod shapes;
pub mod snapshot;

pub use brick_tetris_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, BoardTags};
pub use error::{CoreError, Result};
pub use game_state::Game;
pub use piece::{
    collides, compute_ghost, hard_drop, spawn, tick, try_move, try_rotate, InputOutcome,
    SpawnOutcome, TickOutcome, Tetromino,
};
pub use rng::{PieceSource, SequenceSource, SimpleRng};
pub use scoring::{level_for_score, line_clear_points, tick_interval_ms, Stats};
pub use shapes::{shape_mask, ShapeMask};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
