//! Brick Tetris (workspace facade crate).
//!
//! Re-exports the member crates as `brick_tetris::{core, input, scores, term,
//! types}` and hosts the runner's [`config`].

pub mod config;

pub use brick_tetris_core as core;
pub use brick_tetris_input as input;
pub use brick_tetris_scores as scores;
pub use brick_tetris_term as term;
pub use brick_tetris_types as types;
