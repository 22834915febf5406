//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events to [`KeyCommand`]s: either a game
//! [`crate::types::Signal`] or a request for the front end itself. There is no
//! key-repeat handling here; every press is one signal.

pub mod map;

pub use brick_tetris_types as types;

pub use map::{map_key, KeyCommand};
