//! High-score listing drawn over the board area.

use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::game_view::{draw_border, put_centered, GameView, Viewport};
use crate::scores::ScoreEntry;

#[derive(Debug, Clone, Copy, Default)]
pub struct ScoresView {
    board: GameView,
}

impl ScoresView {
    /// Use the same cell geometry as the board so the listing covers it exactly.
    pub fn new(board: GameView) -> Self {
        Self { board }
    }

    /// Draw the table over whatever `fb` already holds.
    ///
    /// Only as many rows as fit inside the board frame are listed.
    pub fn render_into(&self, entries: &[ScoreEntry], viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        let frame = self.board.frame(viewport);
        let bg = CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));
        fb.fill_rect(frame.x, frame.y, frame.w, frame.h, ' ', bg);
        draw_border(fb, frame, bg);

        let title = bg.bold();
        put_centered(fb, frame, frame.y.saturating_add(1), "HIGH SCORES", title);

        let first = frame.y.saturating_add(3);
        let last = frame.y.saturating_add(frame.h).saturating_sub(2);
        if entries.is_empty() {
            put_centered(fb, frame, first, "no scores yet", bg.dim());
            return;
        }

        let score_right = frame.x.saturating_add(frame.w).saturating_sub(2);
        for (i, (entry, y)) in entries.iter().zip(first..last).enumerate() {
            let x = fb.put_u32(frame.x + 1, y, i as u32 + 1, bg.dim());
            let x = fb.put_str(x, y, ".", bg.dim());
            fb.put_str(x.saturating_add(1), y, &entry.name, bg);

            let digits = digit_count(entry.score);
            fb.put_u32(score_right.saturating_sub(digits - 1), y, entry.score, bg.bold());
        }
    }

    pub fn render(&self, entries: &[ScoreEntry], viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(entries, viewport, &mut fb);
        fb
    }
}

fn digit_count(mut n: u32) -> u16 {
    let mut count = 1;
    while n >= 10 {
        n /= 10;
        count += 1;
    }
    count
}
