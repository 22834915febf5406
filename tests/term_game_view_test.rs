//! Rendering a live session through the terminal views

use brick_tetris::core::{Game, SequenceSource};
use brick_tetris::scores::Scoreboard;
use brick_tetris::term::{FrameBuffer, GameView, ScoresView, Viewport};
use brick_tetris::types::{PieceKind, Signal};

fn blocks(fb: &FrameBuffer) -> usize {
    fb.cells().iter().filter(|c| c.ch == '█').count()
}

#[test]
fn falling_piece_and_preview_are_drawn() {
    let mut game = Game::new(SequenceSource::new(&[PieceKind::T, PieceKind::O]));
    let view = GameView::new(1, 1);
    let viewport = Viewport::new(60, 24);

    // START: only the NEXT preview has blocks.
    let fb = view.render(&game.snapshot(), viewport);
    assert!(fb.contains_text("PRESS ENTER"));
    assert_eq!(blocks(&fb), 4);

    // FALL: all four T cells are on the board after one tick.
    game.dispatch(Signal::Enter);
    game.dispatch(Signal::None);
    let fb = view.render(&game.snapshot(), viewport);
    assert!(!fb.contains_text("PRESS ENTER"));
    assert_eq!(blocks(&fb), 4 + 4);
    assert!(fb.cells().iter().any(|c| c.ch == '░'));
}

#[test]
fn render_into_reuses_buffer() {
    let mut game = Game::from_seed(3);
    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);

    view.render_into(&game.snapshot(), Viewport::new(50, 24), &mut fb);
    assert_eq!((fb.width(), fb.height()), (50, 24));

    game.dispatch(Signal::Enter);
    game.dispatch(Signal::Pause);
    view.render_into(&game.snapshot(), Viewport::new(70, 30), &mut fb);
    assert_eq!((fb.width(), fb.height()), (70, 30));
    assert!(fb.contains_text("PAUSED"));
}

#[test]
fn scores_overlay_lists_table() {
    let mut table = Scoreboard::new();
    table.submit("ann", 1500);
    table.submit("bob", 300);

    let view = GameView::default();
    let viewport = Viewport::new(60, 24);
    let mut fb = view.render(&Game::from_seed(1).snapshot(), viewport);
    ScoresView::new(view).render_into(table.entries(), viewport, &mut fb);

    assert!(fb.contains_text("HIGH SCORES"));
    assert!(fb.contains_text("ann"));
    assert!(fb.contains_text("bob"));
    assert!(!fb.contains_text("PRESS ENTER"));
}
