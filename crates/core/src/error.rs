//! Error types for raw board access.
//!
//! Gameplay operations never fail: rejected moves report `false` and spawn
//! collisions become a phase transition. Only direct coordinate queries can
//! be out of range.

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("cell (row {row}, col {col}) is outside the 20x10 board")]
    OutOfBounds { row: i32, col: i32 },
}

pub type Result<T> = std::result::Result<T, CoreError>;
