//! Property tests for the rule engine.
//!
//! Invariants covered:
//! - The live piece never overlaps walls, floor or stack while falling.
//! - Rotation either lands on a free placement or changes nothing.
//! - Line clearing leaves no full row and removes exactly ten cells per line.
//! - Score and level never decrease within one session.
//! - Queries do not mutate: back-to-back snapshots are equal.

use proptest::prelude::*;

use brick_tetris::core::{collides, try_rotate, Board, Game, Stats, Tetromino};
use brick_tetris::types::{Phase, PieceKind, Rotation, Signal, BOARD_HEIGHT, BOARD_WIDTH};

const PLAY_SIGNALS: [Signal; 8] = [
    Signal::None,
    Signal::MoveLeft,
    Signal::MoveRight,
    Signal::MoveDown,
    Signal::Rotate,
    Signal::HardDrop,
    Signal::Enter,
    Signal::Pause,
];

fn signal() -> impl Strategy<Value = Signal> {
    prop::sample::select(PLAY_SIGNALS.to_vec())
}

fn kind() -> impl Strategy<Value = PieceKind> {
    prop::sample::select(PieceKind::ALL.to_vec())
}

fn rotation() -> impl Strategy<Value = Rotation> {
    prop::sample::select(vec![Rotation::R0, Rotation::R90, Rotation::R180, Rotation::R270])
}

/// Boards dense enough that full rows show up regularly.
fn board() -> impl Strategy<Value = Board> {
    prop::collection::vec(prop::bool::weighted(0.85), 200).prop_map(|filled| {
        let mut board = Board::new();
        for (i, f) in filled.into_iter().enumerate() {
            if f {
                let x = (i % BOARD_WIDTH as usize) as i32;
                let y = (i / BOARD_WIDTH as usize) as i32;
                board.set(x, y, Some(PieceKind::Z));
            }
        }
        board
    })
}

fn full_rows(board: &Board) -> usize {
    (0..BOARD_HEIGHT as usize).filter(|&y| board.is_row_full(y)).count()
}

proptest! {
    #[test]
    fn session_invariants_hold_for_any_signal_sequence(
        seed in any::<u32>(),
        signals in prop::collection::vec(signal(), 1..400),
    ) {
        let mut game = Game::from_seed(seed);
        let mut last = game.stats();

        for s in signals {
            let before = game.phase();
            let phase = game.dispatch(s);
            prop_assert_ne!(phase, Phase::Spawn);
            prop_assert_eq!(game.snapshot(), game.snapshot());

            let stats = game.stats();
            let restarted = before == Phase::GameOver && s == Signal::Enter;
            if !restarted {
                prop_assert!(stats.score >= last.score);
                prop_assert!(stats.level >= last.level);
                prop_assert!(stats.lines_cleared >= last.lines_cleared);
            }
            prop_assert!(stats.best_score >= stats.score);
            prop_assert!(stats.level <= 10);
            last = stats;

            if phase == Phase::Fall {
                prop_assert!(!collides(game.board(), &game.current(), 0, 0));
                prop_assert_eq!(full_rows(game.board()), 0);
            }
        }
    }

    #[test]
    fn rotation_lands_free_or_changes_nothing(
        board in board(),
        kind in kind(),
        rotation in rotation(),
        x in -3i8..10,
        y in -3i8..20,
    ) {
        let mut piece = Tetromino { kind, rotation, x, y };
        let before = piece;
        if try_rotate(&board, &mut piece) {
            prop_assert!(!collides(&board, &piece, 0, 0));
            prop_assert_eq!(piece.rotation, before.rotation.rotate_cw());
            prop_assert!((piece.x - before.x).abs() <= 1);
            prop_assert_eq!(piece.y, before.y);
        } else {
            prop_assert_eq!(piece, before);
        }
    }

    #[test]
    fn line_clear_removes_ten_cells_per_line(board in board()) {
        let mut board = board;
        let before = board.occupied_count();
        let full = full_rows(&board);
        let mut stats = Stats::new();

        let cleared = board.clear_full_lines(&mut stats);
        prop_assert_eq!(cleared, full);
        prop_assert_eq!(full_rows(&board), 0);
        prop_assert_eq!(board.occupied_count(), before - cleared * BOARD_WIDTH as usize);
        prop_assert_eq!(stats.lines_cleared as usize, cleared);
    }
}

#[test]
fn exit_absorbs_every_signal() {
    let mut game = Game::from_seed(5);
    game.dispatch(Signal::Enter);
    assert_eq!(game.dispatch(Signal::Escape), Phase::Exit);
    let snap = game.snapshot();
    for s in PLAY_SIGNALS {
        assert_eq!(game.dispatch(s), Phase::Exit);
    }
    assert_eq!(game.snapshot(), snap);
}
