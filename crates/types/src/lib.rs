//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (rule engine, terminal rendering, persistence).
//!
//! # Board Dimensions
//!
//! The playfield is fixed:
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19)
//! - **Piece frame**: 4x4 local cells
//! - **Spawn position**: column 3, row -1 (one row above the visible board)
//!
//! # Examples
//!
//! ```
//! use brick_tetris_types::{PieceKind, Rotation, Signal, BOARD_WIDTH, BOARD_HEIGHT};
//!
//! let piece = PieceKind::T;
//! assert_eq!(PieceKind::from_str("t"), Some(piece));
//! assert_eq!(piece.tag(), 3);
//!
//! assert_eq!(Rotation::R270.rotate_cw(), Rotation::R0);
//!
//! assert_eq!(Signal::from_str("hardDrop"), Some(Signal::HardDrop));
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Width and height of the local piece frame (4x4)
pub const PIECE_SIZE: u8 = 4;

/// Spawn column: the 4-wide frame is centred horizontally.
pub const SPAWN_X: i8 = (BOARD_WIDTH / 2) as i8 - 2;

/// Spawn row: one row above the visible board.
pub const SPAWN_Y: i8 = -1;

/// Highest reachable level.
pub const MAX_LEVEL: u32 = 10;

/// Score needed per level step.
pub const SCORE_PER_LEVEL: u32 = 600;

/// Points for clearing N lines in one batch (index = lines cleared).
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 700, 1500];

/// Tick interval at level 1 while a piece is falling.
pub const BASE_TICK_MS: u32 = 500;

/// Tick interval reduction per level above 1.
pub const TICK_STEP_MS: u32 = 50;

/// Fastest tick interval.
pub const MIN_TICK_MS: u32 = 50;

/// Poll interval used by front ends outside of the falling phase.
pub const IDLE_POLL_MS: u32 = 120;

/// The seven tetromino piece kinds, in tag order.
///
/// The exported board tag of a locked cell is `index + 1`, so `I` is 1 and
/// `L` is 7; 0 is reserved for empty cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// All kinds in tag order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Zero-based index (I = 0 .. L = 6)
    pub fn index(self) -> usize {
        self as usize
    }

    /// Kind for a zero-based index, `None` outside 0..7
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Board tag for a locked cell of this kind (1..=7)
    pub fn tag(self) -> u8 {
        self as u8 + 1
    }

    /// Kind for a board tag; 0 and anything above 7 map to `None`
    pub fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            0 => None,
            t => Self::from_index(t as usize - 1),
        }
    }

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use brick_tetris_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "o" => Some(PieceKind::O),
            "t" => Some(PieceKind::T),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            _ => None,
        }
    }

    /// Convert to uppercase letter
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "I",
            PieceKind::O => "O",
            PieceKind::T => "T",
            PieceKind::S => "S",
            PieceKind::Z => "Z",
            PieceKind::J => "J",
            PieceKind::L => "L",
        }
    }
}

/// Piece orientation in 90° clockwise steps.
///
/// The cycle goes: R0 → R90 → R180 → R270 → R0
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Rotation {
    #[default]
    R0,
    R90,
    R180,
    R270,
}

impl Rotation {
    /// Rotate clockwise (90°)
    ///
    /// # Examples
    ///
    /// ```
    /// use brick_tetris_types::Rotation;
    ///
    /// assert_eq!(Rotation::R0.rotate_cw(), Rotation::R90);
    /// assert_eq!(Rotation::R90.rotate_cw(), Rotation::R180);
    /// assert_eq!(Rotation::R180.rotate_cw(), Rotation::R270);
    /// assert_eq!(Rotation::R270.rotate_cw(), Rotation::R0);
    /// ```
    pub fn rotate_cw(&self) -> Self {
        match self {
            Rotation::R0 => Rotation::R90,
            Rotation::R90 => Rotation::R180,
            Rotation::R180 => Rotation::R270,
            Rotation::R270 => Rotation::R0,
        }
    }

    /// Zero-based step count (0..4)
    pub fn index(self) -> usize {
        self as usize
    }

    /// Clockwise angle in degrees
    pub fn degrees(self) -> u16 {
        self as u16 * 90
    }
}

/// Input signals fed to the state machine, one per call.
///
/// `None` is the "no key pressed" / timer tick signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Signal {
    #[default]
    None,
    MoveLeft,
    MoveRight,
    MoveDown,
    Rotate,
    HardDrop,
    Enter,
    Escape,
    Pause,
}

impl Signal {
    /// Parse signal from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use brick_tetris_types::Signal;
    ///
    /// assert_eq!(Signal::from_str("moveLeft"), Some(Signal::MoveLeft));
    /// assert_eq!(Signal::from_str("TICK"), Some(Signal::None));
    /// assert_eq!(Signal::from_str("hold"), None);
    /// ```
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "none" | "tick" => Some(Signal::None),
            "moveleft" => Some(Signal::MoveLeft),
            "moveright" => Some(Signal::MoveRight),
            "movedown" => Some(Signal::MoveDown),
            "rotate" => Some(Signal::Rotate),
            "harddrop" => Some(Signal::HardDrop),
            "enter" => Some(Signal::Enter),
            "escape" => Some(Signal::Escape),
            "pause" => Some(Signal::Pause),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            Signal::None => "tick",
            Signal::MoveLeft => "moveLeft",
            Signal::MoveRight => "moveRight",
            Signal::MoveDown => "moveDown",
            Signal::Rotate => "rotate",
            Signal::HardDrop => "hardDrop",
            Signal::Enter => "enter",
            Signal::Escape => "escape",
            Signal::Pause => "pause",
        }
    }

    /// True for signals that steer the falling piece one step.
    pub fn is_piece_input(&self) -> bool {
        matches!(
            self,
            Signal::MoveLeft | Signal::MoveRight | Signal::MoveDown | Signal::Rotate
        )
    }
}

/// States of the game state machine.
///
/// `Spawn` only exists inside a single dispatch; callers never observe it.
/// `Exit` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Phase {
    #[default]
    Start,
    Spawn,
    Fall,
    Pause,
    GameOver,
    Exit,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Start => "start",
            Phase::Spawn => "spawn",
            Phase::Fall => "fall",
            Phase::Pause => "pause",
            Phase::GameOver => "gameover",
            Phase::Exit => "exit",
        }
    }

    /// Phases a caller may observe after a dispatch returns.
    pub fn is_stable(&self) -> bool {
        !matches!(self, Phase::Spawn)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Phase::Exit)
    }
}

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(PieceKind)`: Cell locked by the specified piece kind
pub type Cell = Option<PieceKind>;

/// Board tag of a cell (0 = empty, 1..=7 = kind)
pub fn cell_tag(cell: Cell) -> u8 {
    cell.map_or(0, PieceKind::tag)
}
