use crate::board::BoardTags;
use crate::piece::Tetromino;
use crate::scoring::Stats;
use crate::shapes::{shape_mask, ShapeMask};
use crate::types::{PieceKind, Phase, Rotation, BOARD_HEIGHT, BOARD_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
}

impl ActiveSnapshot {
    pub fn mask(&self) -> ShapeMask {
        shape_mask(self.kind, self.rotation)
    }
}

impl From<Tetromino> for ActiveSnapshot {
    fn from(value: Tetromino) -> Self {
        Self {
            kind: value.kind,
            rotation: value.rotation,
            x: value.x,
            y: value.y,
        }
    }
}

/// Read-only copy of everything a renderer or score keeper needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub board: BoardTags,
    pub phase: Phase,
    pub current: ActiveSnapshot,
    /// True only while the current piece is falling.
    pub current_visible: bool,
    /// Landing position of the current piece, present when it is visible.
    pub ghost: Option<ActiveSnapshot>,
    pub next: ActiveSnapshot,
    pub stats: Stats,
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[0u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            phase: Phase::Start,
            current: Tetromino::new(PieceKind::I).into(),
            current_visible: false,
            ghost: None,
            next: Tetromino::new(PieceKind::I).into(),
            stats: Stats::new(),
        }
    }
}
