//! GameView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::shapes::{mask_cells, ShapeMask};
use crate::core::{ActiveSnapshot, GameSnapshot};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{Phase, PieceKind, BOARD_HEIGHT, BOARD_WIDTH, PIECE_SIZE};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

const PLAY_BG: Rgb = Rgb::new(30, 30, 40);
const PANEL_BG: Rgb = Rgb::new(0, 0, 0);

/// Screen rectangle of the bordered board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Frame {
    pub x: u16,
    pub y: u16,
    pub w: u16,
    pub h: u16,
}

/// A lightweight terminal renderer for the game.
#[derive(Debug, Clone, Copy)]
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self::new(2, 1)
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
        }
    }

    pub(crate) fn frame(&self, viewport: Viewport) -> Frame {
        let w = (BOARD_WIDTH as u16) * self.cell_w + 2;
        let h = (BOARD_HEIGHT as u16) * self.cell_h + 2;
        Frame {
            x: viewport.width.saturating_sub(w) / 2,
            y: viewport.height.saturating_sub(h) / 2,
            w,
            h,
        }
    }

    /// Render a snapshot into an existing framebuffer.
    ///
    /// Callers can reuse the framebuffer across frames; it is only resized
    /// when the viewport changes.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let frame = self.frame(viewport);
        draw_border(fb, frame, CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG));

        for y in 0..BOARD_HEIGHT {
            for x in 0..BOARD_WIDTH {
                match PieceKind::from_tag(snap.board[y as usize][x as usize]) {
                    Some(kind) => {
                        self.fill_cell(fb, frame, x as i32, y as i32, '█', kind_style(kind))
                    }
                    None => self.fill_cell(
                        fb,
                        frame,
                        x as i32,
                        y as i32,
                        '·',
                        CellStyle::new(Rgb::new(90, 90, 100), PLAY_BG).dim(),
                    ),
                }
            }
        }

        if snap.current_visible {
            if let Some(ghost) = snap.ghost {
                let style = CellStyle::new(Rgb::new(140, 140, 140), PLAY_BG).dim();
                self.draw_piece(fb, frame, &ghost, '░', style);
            }
            let style = kind_style(snap.current.kind).bold();
            self.draw_piece(fb, frame, &snap.current, '█', style);
        }

        self.draw_side_panel(fb, snap, viewport, frame);

        let overlay = match snap.phase {
            Phase::Start => Some("PRESS ENTER"),
            Phase::Pause => Some("PAUSED"),
            Phase::GameOver => Some("GAME OVER"),
            _ => None,
        };
        if let Some(text) = overlay {
            draw_overlay_text(fb, frame, text);
            if snap.phase == Phase::GameOver {
                let hint = CellStyle::new(Rgb::new(180, 180, 180), PANEL_BG);
                let line = frame.y.saturating_add(frame.h / 2 + 1);
                put_centered(fb, frame, line, "ENTER: again", hint);
            }
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_piece(
        &self,
        fb: &mut FrameBuffer,
        frame: Frame,
        piece: &ActiveSnapshot,
        ch: char,
        style: CellStyle,
    ) {
        for (r, c) in mask_cells(piece.mask()) {
            let x = piece.x as i32 + c as i32;
            let y = piece.y as i32 + r as i32;
            self.fill_cell(fb, frame, x, y, ch, style);
        }
    }

    /// Fill one board cell; cells off the board (e.g. above row 0) are skipped.
    fn fill_cell(
        &self,
        fb: &mut FrameBuffer,
        frame: Frame,
        x: i32,
        y: i32,
        ch: char,
        style: CellStyle,
    ) {
        if x < 0 || x >= BOARD_WIDTH as i32 || y < 0 || y >= BOARD_HEIGHT as i32 {
            return;
        }
        let px = frame.x + 1 + (x as u16) * self.cell_w;
        let py = frame.y + 1 + (y as u16) * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        frame: Frame,
    ) {
        let panel_x = frame.x.saturating_add(frame.w).saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < 10 {
            return;
        }

        let label = CellStyle::new(Rgb::new(220, 220, 220), PANEL_BG).bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);

        let stats = snap.stats;
        let rows = [
            ("SCORE", stats.score),
            ("BEST", stats.best_score),
            ("LEVEL", stats.level),
            ("SPEED", stats.speed),
            ("LINES", stats.lines_cleared),
        ];

        let mut y = frame.y;
        for (name, v) in rows {
            fb.put_str(panel_x, y, name, label);
            fb.put_u32(panel_x, y.saturating_add(1), v, value);
            y = y.saturating_add(3);
        }

        fb.put_str(panel_x, y, "NEXT", label);
        y = y.saturating_add(1);
        self.draw_preview(fb, panel_x, y, snap.next.mask(), kind_style(snap.next.kind));
    }

    /// Draw a 4x4 mask at a fixed screen position, one board cell per mask cell.
    fn draw_preview(
        &self,
        fb: &mut FrameBuffer,
        x: u16,
        y: u16,
        mask: ShapeMask,
        style: CellStyle,
    ) {
        let side = PIECE_SIZE as u16;
        fb.fill_rect(
            x,
            y,
            side * self.cell_w,
            side * self.cell_h,
            ' ',
            CellStyle::new(PANEL_BG, PANEL_BG),
        );
        for (r, c) in mask_cells(mask) {
            let px = x + (c as u16) * self.cell_w;
            let py = y + (r as u16) * self.cell_h;
            fb.fill_rect(px, py, self.cell_w, self.cell_h, '█', style);
        }
    }
}

pub(crate) fn draw_border(fb: &mut FrameBuffer, frame: Frame, style: CellStyle) {
    let Frame { x, y, w, h } = frame;
    if w < 2 || h < 2 {
        return;
    }

    fb.put_char(x, y, '┌', style);
    fb.put_char(x + w - 1, y, '┐', style);
    fb.put_char(x, y + h - 1, '└', style);
    fb.put_char(x + w - 1, y + h - 1, '┘', style);

    for dx in 1..w - 1 {
        fb.put_char(x + dx, y, '─', style);
        fb.put_char(x + dx, y + h - 1, '─', style);
    }
    for dy in 1..h - 1 {
        fb.put_char(x, y + dy, '│', style);
        fb.put_char(x + w - 1, y + dy, '│', style);
    }
}

pub(crate) fn put_centered(
    fb: &mut FrameBuffer,
    frame: Frame,
    y: u16,
    text: &str,
    style: CellStyle,
) {
    let text_w = text.chars().count() as u16;
    let x = frame.x.saturating_add(frame.w.saturating_sub(text_w) / 2);
    fb.put_str(x, y, text, style);
}

fn draw_overlay_text(fb: &mut FrameBuffer, frame: Frame, text: &str) {
    let style = CellStyle::new(Rgb::new(255, 255, 255), PANEL_BG).bold();
    put_centered(fb, frame, frame.y.saturating_add(frame.h / 2), text, style);
}

pub(crate) fn kind_style(kind: PieceKind) -> CellStyle {
    let fg = match kind {
        PieceKind::I => Rgb::new(80, 220, 220),
        PieceKind::O => Rgb::new(240, 220, 80),
        PieceKind::T => Rgb::new(200, 120, 220),
        PieceKind::S => Rgb::new(100, 220, 120),
        PieceKind::Z => Rgb::new(220, 80, 80),
        PieceKind::J => Rgb::new(80, 120, 220),
        PieceKind::L => Rgb::new(255, 165, 0),
    };
    CellStyle::new(fg, PLAY_BG)
}
