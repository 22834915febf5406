//! Shapes module - tetromino geometry as 4x4 occupancy masks
//!
//! Every (kind, rotation) pair maps to a 16-bit mask over the piece's local
//! 4x4 frame: bit `r * 4 + c` is set when local row `r`, column `c` is
//! occupied. This table is the only source of piece geometry; collision,
//! locking and rendering all read it.

use arrayvec::ArrayVec;

use crate::types::{PieceKind, Rotation, PIECE_SIZE};

/// 16-bit occupancy mask of one piece orientation
pub type ShapeMask = u16;

/// Local (row, col) of an occupied mask cell
pub type LocalCell = (u8, u8);

/// Masks indexed by `[kind][rotation]`
pub const SHAPES: [[ShapeMask; 4]; 7] = [
    [0x00F0, 0x4444, 0x0F00, 0x2222], // I
    [0x0660, 0x0660, 0x0660, 0x0660], // O
    [0x0270, 0x0464, 0x0E40, 0x2620], // T
    [0x0360, 0x0462, 0x06C0, 0x4620], // S
    [0x0630, 0x0264, 0x0C60, 0x2640], // Z
    [0x0740, 0x0622, 0x02E0, 0x4460], // J
    [0x0710, 0x0226, 0x08E0, 0x6440], // L
];

/// Get the mask for a piece kind and rotation
#[inline]
pub fn shape_mask(kind: PieceKind, rotation: Rotation) -> ShapeMask {
    SHAPES[kind.index()][rotation.index()]
}

/// Check whether local cell (r, c) of the piece frame is occupied.
///
/// Indices outside the 4x4 frame are never occupied.
///
/// # Examples
///
/// ```
/// use brick_tetris_core::shapes::has_block;
/// use brick_tetris_core::types::{PieceKind, Rotation};
///
/// // The I piece lies flat on local row 1.
/// assert!(has_block(PieceKind::I, Rotation::R0, 1, 0));
/// assert!(!has_block(PieceKind::I, Rotation::R0, 0, 0));
/// assert!(!has_block(PieceKind::I, Rotation::R0, 4, 0));
/// ```
#[inline]
pub fn has_block(kind: PieceKind, rotation: Rotation, r: u8, c: u8) -> bool {
    mask_has_block(shape_mask(kind, rotation), r, c)
}

#[inline]
pub fn mask_has_block(mask: ShapeMask, r: u8, c: u8) -> bool {
    if r >= PIECE_SIZE || c >= PIECE_SIZE {
        return false;
    }
    (mask >> (r * PIECE_SIZE + c)) & 1 == 1
}

/// Occupied local cells of a mask in row-major order
pub fn mask_cells(mask: ShapeMask) -> ArrayVec<LocalCell, 16> {
    let mut cells = ArrayVec::new();
    for r in 0..PIECE_SIZE {
        for c in 0..PIECE_SIZE {
            if mask_has_block(mask, r, c) {
                cells.push((r, c));
            }
        }
    }
    cells
}

/// Minimal bounding box of the occupied cells of a mask
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaskBounds {
    pub min_r: u8,
    pub max_r: u8,
    pub min_c: u8,
    pub max_c: u8,
}

impl MaskBounds {
    /// Bounding box of `mask`, `None` for an empty mask
    pub fn of(mask: ShapeMask) -> Option<Self> {
        if mask == 0 {
            return None;
        }
        let mut bounds = Self {
            min_r: PIECE_SIZE - 1,
            max_r: 0,
            min_c: PIECE_SIZE - 1,
            max_c: 0,
        };
        for (r, c) in mask_cells(mask) {
            bounds.min_r = bounds.min_r.min(r);
            bounds.max_r = bounds.max_r.max(r);
            bounds.min_c = bounds.min_c.min(c);
            bounds.max_c = bounds.max_c.max(c);
        }
        Some(bounds)
    }

    pub fn width(&self) -> u8 {
        self.max_c - self.min_c + 1
    }

    pub fn height(&self) -> u8 {
        self.max_r - self.min_r + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_shape_has_four_cells() {
        for kind in PieceKind::ALL {
            for rot in [Rotation::R0, Rotation::R90, Rotation::R180, Rotation::R270] {
                let mask = shape_mask(kind, rot);
                assert_eq!(mask.count_ones(), 4, "{:?} {:?}", kind, rot);
                assert_eq!(mask_cells(mask).len(), 4);
            }
        }
    }

    #[test]
    fn t_piece_spawn_cells() {
        // 0x0270: row 1 -> cols 0..=2; row 2 -> col 1
        let cells = mask_cells(shape_mask(PieceKind::T, Rotation::R0));
        assert_eq!(cells.as_slice(), &[(1, 0), (1, 1), (1, 2), (2, 1)]);
    }

    #[test]
    fn bounds_of_vertical_i() {
        let b = MaskBounds::of(shape_mask(PieceKind::I, Rotation::R90)).unwrap();
        assert_eq!((b.min_r, b.max_r, b.min_c, b.max_c), (0, 3, 2, 2));
        assert_eq!(b.width(), 1);
        assert_eq!(b.height(), 4);
    }

    #[test]
    fn empty_mask_has_no_bounds() {
        assert_eq!(MaskBounds::of(0), None);
        assert!(mask_cells(0).is_empty());
    }

    #[test]
    fn o_piece_is_rotation_invariant() {
        let base = shape_mask(PieceKind::O, Rotation::R0);
        for rot in [Rotation::R90, Rotation::R180, Rotation::R270] {
            assert_eq!(shape_mask(PieceKind::O, rot), base);
        }
    }
}
