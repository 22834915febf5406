//! Board module - manages the game grid
//!
//! The board is a 10x20 grid where each cell is empty or holds the kind of the
//! piece that was locked there. Uses a flat array for cache locality and
//! zero-allocation.
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..19 (top to bottom).
//! Pieces may hang above row 0; those cells are simply never written.

use tracing::debug;

use crate::error::{CoreError, Result};
use crate::piece::Tetromino;
use crate::scoring::Stats;
use crate::shapes::mask_cells;
use crate::types::{cell_tag, Cell, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

/// Exported board: `[row][col]` tags, 0 = empty, 1..=7 = piece kind
pub type BoardTags = [[u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];

/// The game board - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i32, y: i32) -> Option<usize> {
        if Self::in_bounds(x, y) {
            Some((y as usize) * (BOARD_WIDTH as usize) + (x as usize))
        } else {
            None
        }
    }

    #[inline(always)]
    pub fn in_bounds(x: i32, y: i32) -> bool {
        x >= 0 && x < BOARD_WIDTH as i32 && y >= 0 && y < BOARD_HEIGHT as i32
    }

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i32, y: i32, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Whether column `x` of row `y` holds a locked block.
    ///
    /// Callers clip coordinates before asking; anything outside the board is
    /// reported as [`CoreError::OutOfBounds`].
    pub fn is_occupied(&self, x: i32, y: i32) -> Result<bool> {
        self.get(x, y)
            .map(|cell| cell.is_some())
            .ok_or(CoreError::OutOfBounds { row: y, col: x })
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        self.row(y).is_some_and(|row| row.iter().all(|c| c.is_some()))
    }

    /// Cells of row `y`, `None` if out of range
    pub fn row(&self, y: usize) -> Option<&[Cell]> {
        if y >= BOARD_HEIGHT as usize {
            return None;
        }
        let start = y * BOARD_WIDTH as usize;
        Some(&self.cells[start..start + BOARD_WIDTH as usize])
    }

    /// Number of occupied cells on the whole board
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Remove row `y` and shift every row above it down by one.
    /// The top row becomes empty.
    fn collapse_row(&mut self, y: usize) {
        let width = BOARD_WIDTH as usize;

        // copy_within handles overlapping ranges safely
        self.cells.copy_within(0..y * width, width);
        self.cells[..width].fill(None);
    }

    /// Remove every full row, scanning bottom to top.
    ///
    /// After a collapse the same row index is checked again, since the row
    /// that dropped into it may be full as well. Returns the number removed.
    pub fn remove_full_rows(&mut self) -> usize {
        let mut removed = 0;
        let mut y = BOARD_HEIGHT as usize;
        while y > 0 {
            let row = y - 1;
            if self.is_row_full(row) {
                self.collapse_row(row);
                removed += 1;
            } else {
                y -= 1;
            }
        }
        removed
    }

    /// Remove full rows and score them as one batch.
    /// Returns the number of lines cleared.
    pub fn clear_full_lines(&mut self, stats: &mut Stats) -> usize {
        let lines = self.remove_full_rows();
        if lines > 0 {
            let points = stats.record_clear(lines);
            debug!(lines, points, score = stats.score, level = stats.level, "lines cleared");
        }
        lines
    }

    /// Merge the piece's occupied cells into the board.
    ///
    /// Cells that project outside the board (typically above row 0 right
    /// after a spawn) are skipped.
    pub fn lock(&mut self, piece: &Tetromino) {
        for (r, c) in mask_cells(piece.mask()) {
            let x = piece.x as i32 + c as i32;
            let y = piece.y as i32 + r as i32;
            self.set(x, y, Some(piece.kind));
        }
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Export the board as `[row][col]` tags
    pub fn tags(&self) -> BoardTags {
        let mut out = [[0u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];
        self.write_tags(&mut out);
        out
    }

    /// Write `[row][col]` tags into an existing buffer
    pub fn write_tags(&self, out: &mut BoardTags) {
        let width = BOARD_WIDTH as usize;
        for (y, row) in out.iter_mut().enumerate() {
            for (x, tag) in row.iter_mut().enumerate() {
                *tag = cell_tag(self.cells[y * width + x]);
            }
        }
    }

    /// Build a board from `[row][col]` tags. Unknown tags become empty cells.
    pub fn from_tags(tags: &BoardTags) -> Self {
        let mut board = Self::new();
        let width = BOARD_WIDTH as usize;
        for (y, row) in tags.iter().enumerate() {
            for (x, &tag) in row.iter().enumerate() {
                board.cells[y * width + x] = PieceKind::from_tag(tag);
            }
        }
        board
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Rotation;

    fn fill_row(board: &mut Board, y: i32, kind: PieceKind) {
        for x in 0..BOARD_WIDTH as i32 {
            board.set(x, y, Some(kind));
        }
    }

    #[test]
    fn test_board_index_calculation() {
        assert_eq!(Board::index(0, 0), Some(0));
        assert_eq!(Board::index(9, 0), Some(9));
        assert_eq!(Board::index(0, 1), Some(10));
        assert_eq!(Board::index(9, 19), Some(199));
        assert_eq!(Board::index(-1, 0), None);
        assert_eq!(Board::index(10, 0), None);
        assert_eq!(Board::index(0, 20), None);
    }

    #[test]
    fn test_is_occupied_reports_out_of_bounds() {
        let mut board = Board::new();
        board.set(4, 0, Some(PieceKind::T));
        assert_eq!(board.is_occupied(4, 0), Ok(true));
        assert_eq!(board.is_occupied(5, 0), Ok(false));
        assert_eq!(
            board.is_occupied(10, 3),
            Err(CoreError::OutOfBounds { row: 3, col: 10 })
        );
        assert!(board.is_occupied(0, -1).is_err());
    }

    #[test]
    fn test_collapse_keeps_rows_above() {
        let mut board = Board::new();
        board.set(2, 17, Some(PieceKind::J));
        fill_row(&mut board, 18, PieceKind::I);
        board.set(7, 19, Some(PieceKind::S));

        assert_eq!(board.remove_full_rows(), 1);
        assert_eq!(board.get(2, 18), Some(Some(PieceKind::J)));
        assert_eq!(board.get(7, 19), Some(Some(PieceKind::S)));
        assert_eq!(board.get(2, 17), Some(None));
        assert_eq!(board.occupied_count(), 2);
    }

    #[test]
    fn test_adjacent_full_rows_are_rescanned() {
        let mut board = Board::new();
        for y in 16..20 {
            fill_row(&mut board, y, PieceKind::I);
        }
        board.set(0, 15, Some(PieceKind::O));

        let mut stats = Stats::new();
        assert_eq!(board.clear_full_lines(&mut stats), 4);
        assert_eq!(stats.score, 1500);
        assert_eq!(stats.lines_cleared, 4);
        assert_eq!(board.get(0, 19), Some(Some(PieceKind::O)));
        assert_eq!(board.occupied_count(), 1);
    }

    #[test]
    fn test_lock_skips_cells_above_board() {
        let mut board = Board::new();
        // Vertical I at y = -2 covers rows -2..=1 in column 5.
        let piece = Tetromino {
            kind: PieceKind::I,
            rotation: Rotation::R90,
            x: 3,
            y: -2,
        };
        board.lock(&piece);
        assert_eq!(board.occupied_count(), 2);
        assert_eq!(board.get(5, 0), Some(Some(PieceKind::I)));
        assert_eq!(board.get(5, 1), Some(Some(PieceKind::I)));
    }

    #[test]
    fn test_tags_round_trip() {
        let mut board = Board::new();
        board.set(0, 0, Some(PieceKind::I));
        board.set(9, 19, Some(PieceKind::L));
        let tags = board.tags();
        assert_eq!(tags[0][0], 1);
        assert_eq!(tags[19][9], 7);
        assert_eq!(Board::from_tags(&tags), board);
    }
}
