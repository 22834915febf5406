//! Piece module - active piece placement and the collision engine
//!
//! All operations here take the board and piece explicitly and never touch
//! any other state, so they can be exercised on hand-built boards.
//! Rejected operations leave the piece exactly as it was.

use tracing::debug;

use crate::board::Board;
use crate::rng::PieceSource;
use crate::scoring::Stats;
use crate::shapes::{mask_has_block, shape_mask, MaskBounds, ShapeMask};
use crate::types::{PieceKind, Rotation, Signal, BOARD_HEIGHT, BOARD_WIDTH, SPAWN_X, SPAWN_Y};

/// A piece placed on the board: kind, orientation and the board position of
/// the top-left corner of its 4x4 frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tetromino {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
}

impl Tetromino {
    /// Create a new tetromino at spawn position
    pub fn new(kind: PieceKind) -> Self {
        Self {
            kind,
            rotation: Rotation::R0,
            x: SPAWN_X,
            y: SPAWN_Y,
        }
    }

    /// Move back to the spawn position and orientation, keeping the kind
    pub fn reset_to_spawn(&mut self) {
        *self = Self::new(self.kind);
    }

    /// Occupancy mask for the current rotation
    pub fn mask(&self) -> ShapeMask {
        shape_mask(self.kind, self.rotation)
    }

    /// Board coordinates (x, y) of every occupied cell
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        crate::shapes::mask_cells(self.mask())
            .into_iter()
            .map(move |(r, c)| (self.x as i32 + c as i32, self.y as i32 + r as i32))
    }
}

/// Result of a gravity tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The piece moved down one row.
    Fell,
    /// The piece was blocked, locked into the board and lines were cleared.
    Locked { lines: usize },
}

impl TickOutcome {
    pub fn still_falling(&self) -> bool {
        matches!(self, TickOutcome::Fell)
    }
}

/// Result of promoting the next piece
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnOutcome {
    Spawned,
    /// The promoted piece overlaps the stack at its spawn position.
    Blocked,
}

impl SpawnOutcome {
    pub fn is_game_over(&self) -> bool {
        matches!(self, SpawnOutcome::Blocked)
    }
}

/// Result of a steering signal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputOutcome {
    /// The move or rotation was performed.
    Applied,
    /// The move or rotation would collide; nothing changed.
    Rejected,
    /// The signal does not steer the piece.
    Ignored,
}

impl InputOutcome {
    pub fn changed(&self) -> bool {
        matches!(self, InputOutcome::Applied)
    }
}

/// Check whether `piece`, shifted by (dx, dy), would overlap a wall, the
/// floor or a locked block.
///
/// Cells above the board never collide with board contents, which is what
/// allows pieces to spawn partly off-screen. An empty mask never collides.
pub fn collides(board: &Board, piece: &Tetromino, dx: i32, dy: i32) -> bool {
    let mask = piece.mask();
    let Some(bounds) = MaskBounds::of(mask) else {
        return false;
    };

    for r in bounds.min_r..=bounds.max_r {
        for c in bounds.min_c..=bounds.max_c {
            if !mask_has_block(mask, r, c) {
                continue;
            }

            let wx = piece.x as i32 + c as i32 + dx;
            let wy = piece.y as i32 + r as i32 + dy;

            if wx < 0 || wx >= BOARD_WIDTH as i32 || wy >= BOARD_HEIGHT as i32 {
                return true;
            }

            if wy >= 0 && matches!(board.get(wx, wy), Some(Some(_))) {
                return true;
            }
        }
    }

    false
}

/// Shift the piece by (dx, dy) if the target position is free
pub fn try_move(board: &Board, piece: &mut Tetromino, dx: i8, dy: i8) -> bool {
    if collides(board, piece, dx as i32, dy as i32) {
        return false;
    }
    piece.x += dx;
    piece.y += dy;
    true
}

/// Column offsets tried, in order, when a rotation collides in place
const KICK_OFFSETS: [i8; 2] = [-1, 1];

/// Rotate the piece one step clockwise.
///
/// If the rotated piece collides in place it is retried one column to the
/// left, then one column to the right. When nothing fits the piece keeps its
/// original rotation and position.
pub fn try_rotate(board: &Board, piece: &mut Tetromino) -> bool {
    let original = *piece;
    piece.rotation = piece.rotation.rotate_cw();

    if !collides(board, piece, 0, 0) {
        return true;
    }

    for dx in KICK_OFFSETS {
        piece.x = original.x + dx;
        if !collides(board, piece, 0, 0) {
            return true;
        }
    }

    *piece = original;
    false
}

/// One step of gravity: fall one row, or lock and clear lines when blocked.
pub fn tick(board: &mut Board, piece: &mut Tetromino, stats: &mut Stats) -> TickOutcome {
    if collides(board, piece, 0, 1) {
        board.lock(piece);
        let lines = board.clear_full_lines(stats);
        TickOutcome::Locked { lines }
    } else {
        piece.y += 1;
        TickOutcome::Fell
    }
}

/// Promote `next` to `current` at the spawn position.
///
/// On a collision the board and `next` are left untouched and the caller
/// should end the game. Otherwise a fresh kind is drawn for `next`.
pub fn spawn<S: PieceSource + ?Sized>(
    board: &Board,
    current: &mut Tetromino,
    next: &mut Tetromino,
    source: &mut S,
) -> SpawnOutcome {
    *current = *next;
    current.reset_to_spawn();

    if collides(board, current, 0, 0) {
        debug!(kind = ?current.kind, "spawn blocked");
        return SpawnOutcome::Blocked;
    }

    *next = Tetromino::new(source.draw());
    SpawnOutcome::Spawned
}

/// Dispatch a steering signal to [`try_move`] / [`try_rotate`]
pub fn apply_input(board: &Board, piece: &mut Tetromino, signal: Signal) -> InputOutcome {
    let applied = match signal {
        Signal::MoveLeft => try_move(board, piece, -1, 0),
        Signal::MoveRight => try_move(board, piece, 1, 0),
        Signal::MoveDown => try_move(board, piece, 0, 1),
        Signal::Rotate => try_rotate(board, piece),
        _ => return InputOutcome::Ignored,
    };

    if applied {
        InputOutcome::Applied
    } else {
        InputOutcome::Rejected
    }
}

/// Rows past the floor are never reached by a real shape; the bound keeps
/// the drop loops finite for an empty mask.
fn can_fall(board: &Board, piece: &Tetromino) -> bool {
    piece.y < BOARD_HEIGHT as i8 && !collides(board, piece, 0, 1)
}

/// Drop the piece straight down, lock it and clear lines.
///
/// Every row travelled is worth one point, added after the line-clear
/// points. Returns the number of lines cleared.
pub fn hard_drop(board: &mut Board, piece: &mut Tetromino, stats: &mut Stats) -> usize {
    let mut steps: u32 = 0;
    while can_fall(board, piece) {
        piece.y += 1;
        steps += 1;
    }

    board.lock(piece);
    let lines = board.clear_full_lines(stats);
    stats.add_drop_bonus(steps);
    lines
}

/// Where the piece would come to rest if dropped now.
pub fn compute_ghost(board: &Board, piece: &Tetromino) -> Tetromino {
    let mut ghost = *piece;
    while can_fall(board, &ghost) {
        ghost.y += 1;
    }
    ghost
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::SequenceSource;

    fn piece(kind: PieceKind, rotation: Rotation, x: i8, y: i8) -> Tetromino {
        Tetromino {
            kind,
            rotation,
            x,
            y,
        }
    }

    #[test]
    fn test_tetromino_new() {
        let p = Tetromino::new(PieceKind::T);
        assert_eq!(p.rotation, Rotation::R0);
        assert_eq!(p.x, 3);
        assert_eq!(p.y, -1);
    }

    #[test]
    fn test_cells_are_world_coordinates() {
        let p = piece(PieceKind::O, Rotation::R0, 2, 5);
        let cells: Vec<_> = p.cells().collect();
        assert_eq!(cells, vec![(3, 6), (4, 6), (3, 7), (4, 7)]);
    }

    #[test]
    fn test_spawn_row_above_board_is_free() {
        let board = Board::new();
        // J spawn mask occupies local row 1..=2, i.e. rows 0..=1.
        let p = Tetromino::new(PieceKind::J);
        assert!(!collides(&board, &p, 0, 0));
        // Vertical I far above the board only collides with walls.
        let high = piece(PieceKind::I, Rotation::R90, 3, -10);
        assert!(!collides(&board, &high, 0, 0));
        assert!(collides(&board, &high, 10, 0));
    }

    #[test]
    fn test_collides_with_floor_and_walls() {
        let board = Board::new();
        // Flat I on local row 1: at y = 18 it sits on row 19.
        let p = piece(PieceKind::I, Rotation::R0, 0, 18);
        assert!(!collides(&board, &p, 0, 0));
        assert!(collides(&board, &p, 0, 1));
        assert!(collides(&board, &p, -1, 0));
        assert!(!collides(&board, &p, 6, 0));
        assert!(collides(&board, &p, 7, 0));
    }

    #[test]
    fn test_collides_with_locked_block() {
        let mut board = Board::new();
        board.set(4, 10, Some(PieceKind::Z));
        let p = piece(PieceKind::O, Rotation::R0, 3, 8);
        // O occupies cols 4..=5, rows 9..=10
        assert!(collides(&board, &p, 0, 0));
        assert!(!collides(&board, &p, 0, -1));
    }

    #[test]
    fn test_try_move_rejects_without_change() {
        let board = Board::new();
        let mut p = piece(PieceKind::O, Rotation::R0, -1, 3);
        let before = p;
        assert!(!try_move(&board, &mut p, -1, 0));
        assert_eq!(p, before);
        assert!(try_move(&board, &mut p, 1, 0));
        assert_eq!(p.x, 0);
    }

    #[test]
    fn test_rotate_in_open_space() {
        let board = Board::new();
        let mut p = piece(PieceKind::T, Rotation::R0, 3, 5);
        assert!(try_rotate(&board, &mut p));
        assert_eq!(p.rotation, Rotation::R90);
        assert_eq!((p.x, p.y), (3, 5));
    }

    #[test]
    fn test_rotate_kicks_right_off_left_wall() {
        let board = Board::new();
        // T at 270° uses local cols 1..=2; at x = -1 it hugs the left wall.
        let mut p = piece(PieceKind::T, Rotation::R270, -1, 5);
        assert!(!collides(&board, &p, 0, 0));
        assert!(try_rotate(&board, &mut p));
        assert_eq!(p.rotation, Rotation::R0);
        assert_eq!(p.x, 0);
    }

    #[test]
    fn test_rotate_kicks_left_off_right_wall() {
        let board = Board::new();
        // Vertical I in local col 2; at x = 7 it is in column 9.
        let mut p = piece(PieceKind::I, Rotation::R90, 7, 5);
        assert!(try_rotate(&board, &mut p));
        assert_eq!(p.rotation, Rotation::R180);
        assert_eq!(p.x, 6);
    }

    #[test]
    fn test_rotate_reverts_when_boxed_in() {
        let mut board = Board::new();
        // Vertical I in column 5 between two full columns.
        for y in 0..BOARD_HEIGHT as i32 {
            board.set(4, y, Some(PieceKind::L));
            board.set(6, y, Some(PieceKind::L));
        }
        let mut p = piece(PieceKind::I, Rotation::R90, 3, 8);
        assert!(!collides(&board, &p, 0, 0));
        let before = p;
        assert!(!try_rotate(&board, &mut p));
        assert_eq!(p, before);
    }

    #[test]
    fn test_tick_falls_then_locks() {
        let mut board = Board::new();
        let mut stats = Stats::new();
        // O occupies local rows 1..=2, so y = 17 rests on the floor.
        let mut p = piece(PieceKind::O, Rotation::R0, 3, 16);
        assert_eq!(tick(&mut board, &mut p, &mut stats), TickOutcome::Fell);
        assert_eq!(p.y, 17);
        let outcome = tick(&mut board, &mut p, &mut stats);
        assert_eq!(outcome, TickOutcome::Locked { lines: 0 });
        assert!(!outcome.still_falling());
        assert_eq!(board.occupied_count(), 4);
        assert_eq!(board.get(4, 19), Some(Some(PieceKind::O)));
    }

    #[test]
    fn test_spawn_promotes_next_and_draws() {
        let board = Board::new();
        let mut source = SequenceSource::new(&[PieceKind::Z]);
        let mut current = piece(PieceKind::I, Rotation::R90, 0, 12);
        let mut next = Tetromino::new(PieceKind::S);

        assert_eq!(
            spawn(&board, &mut current, &mut next, &mut source),
            SpawnOutcome::Spawned
        );
        assert_eq!(current, Tetromino::new(PieceKind::S));
        assert_eq!(next, Tetromino::new(PieceKind::Z));
    }

    #[test]
    fn test_spawn_blocked_keeps_next() {
        let mut board = Board::new();
        board.set(4, 0, Some(PieceKind::T));
        let mut source = SequenceSource::new(&[PieceKind::Z]);
        let mut current = Tetromino::new(PieceKind::I);
        let mut next = Tetromino::new(PieceKind::O);
        let board_before = board.clone();

        let outcome = spawn(&board, &mut current, &mut next, &mut source);
        assert!(outcome.is_game_over());
        assert_eq!(next.kind, PieceKind::O);
        assert_eq!(board, board_before);
    }

    #[test]
    fn test_apply_input_dispatch() {
        let board = Board::new();
        let mut p = Tetromino::new(PieceKind::T);
        assert_eq!(apply_input(&board, &mut p, Signal::MoveLeft), InputOutcome::Applied);
        assert_eq!(p.x, 2);
        assert_eq!(apply_input(&board, &mut p, Signal::MoveRight), InputOutcome::Applied);
        assert_eq!(apply_input(&board, &mut p, Signal::MoveDown), InputOutcome::Applied);
        assert_eq!(p.y, 0);
        assert_eq!(apply_input(&board, &mut p, Signal::Rotate), InputOutcome::Applied);
        assert_eq!(apply_input(&board, &mut p, Signal::Pause), InputOutcome::Ignored);
        assert_eq!(apply_input(&board, &mut p, Signal::HardDrop), InputOutcome::Ignored);
        assert!(!InputOutcome::Ignored.changed());

        let mut wall = piece(PieceKind::O, Rotation::R0, -1, 5);
        assert_eq!(
            apply_input(&board, &mut wall, Signal::MoveLeft),
            InputOutcome::Rejected
        );
    }

    #[test]
    fn test_hard_drop_scores_steps() {
        let mut board = Board::new();
        let mut stats = Stats::new();
        // O at y = -1 occupies rows 0..=1; resting position is y = 17.
        let mut p = Tetromino::new(PieceKind::O);
        assert_eq!(hard_drop(&mut board, &mut p, &mut stats), 0);
        assert_eq!(p.y, 17);
        assert_eq!(stats.score, 18);
        assert_eq!(board.get(4, 19), Some(Some(PieceKind::O)));
    }

    #[test]
    fn test_ghost_does_not_move_piece() {
        let mut board = Board::new();
        board.set(4, 12, Some(PieceKind::J));
        let p = Tetromino::new(PieceKind::O);
        let ghost = compute_ghost(&board, &p);
        assert_eq!(p, Tetromino::new(PieceKind::O));
        // O bottom row is local row 2; it must stop above row 12.
        assert_eq!(ghost.y, 9);
        assert_eq!(ghost.x, p.x);
        assert!(!collides(&board, &ghost, 0, 0));
        assert!(collides(&board, &ghost, 0, 1));
    }
}
