//! Terminal "game renderer" module.
//!
//! Renders into a plain framebuffer of styled characters, which
//! [`TerminalRenderer`] flushes to the terminal as diffs. The views are pure
//! and can be tested without a terminal.

pub mod fb;
pub mod game_view;
pub mod renderer;
pub mod scores_view;

pub use brick_tetris_core as core;
pub use brick_tetris_scores as scores;
pub use brick_tetris_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
pub use scores_view::ScoresView;
