//! Game state module - the session aggregate and its signal-driven state machine
//!
//! A [`Game`] owns the board, the current and next pieces, the statistics,
//! the piece source and the current [`Phase`]. Callers feed exactly one
//! [`Signal`] per [`Game::dispatch`] call and read the result through the
//! query methods or a [`GameSnapshot`].
//!
//! Transitions (unlisted signals keep the phase):
//!
//! | Phase | Enter | Escape | Pause | steering / drop | no signal |
//! |---|---|---|---|---|---|
//! | Start | Spawn | Exit | | | |
//! | Spawn | spawn → Fall, or GameOver when blocked | | | | |
//! | Fall | | Exit | Pause | drop → Spawn; move/rotate stay | tick → Fall / Spawn |
//! | Pause | | Exit | Fall | | |
//! | GameOver | new session → Spawn | Exit | | | |
//! | Exit | terminal | | | | |
//!
//! `reset` is a no-op once the session has reached `Exit`.
//!
//! `Spawn` is resolved inside the same dispatch, so callers never see it.

use tracing::{debug, info};

use crate::board::{Board, BoardTags};
use crate::piece::{self, SpawnOutcome, Tetromino};
use crate::rng::{PieceSource, SimpleRng};
use crate::scoring::Stats;
use crate::snapshot::GameSnapshot;
use crate::types::{Phase, Signal};

/// Complete game session
#[derive(Debug, Clone)]
pub struct Game<S: PieceSource = SimpleRng> {
    board: Board,
    current: Tetromino,
    next: Tetromino,
    stats: Stats,
    phase: Phase,
    source: S,
}

impl Game<SimpleRng> {
    /// Create a new session drawing pieces from a seeded [`SimpleRng`]
    pub fn from_seed(seed: u32) -> Self {
        Self::new(SimpleRng::new(seed))
    }
}

impl Default for Game<SimpleRng> {
    fn default() -> Self {
        Self::from_seed(1)
    }
}

impl<S: PieceSource> Game<S> {
    /// Create a new session in [`Phase::Start`].
    ///
    /// One kind is drawn immediately; it is both the preview and the piece
    /// that the first spawn promotes.
    pub fn new(mut source: S) -> Self {
        let next = Tetromino::new(source.draw());
        Self {
            board: Board::new(),
            current: next,
            next,
            stats: Stats::new(),
            phase: Phase::Start,
            source,
        }
    }

    /// Re-initialize the session in place and return to [`Phase::Start`].
    ///
    /// The best score and the piece source stream carry over. A session in
    /// [`Phase::Exit`] is left untouched.
    pub fn reset(&mut self) {
        if self.phase == Phase::Exit {
            return;
        }
        self.reinitialize();
        self.phase = Phase::Start;
    }

    fn reinitialize(&mut self) {
        self.board.clear();
        self.stats = Stats::with_best(self.stats.best_score);
        self.next = Tetromino::new(self.source.draw());
        self.current = self.next;
    }

    /// Feed one signal and return the settled phase.
    ///
    /// The returned phase is never [`Phase::Spawn`].
    pub fn dispatch(&mut self, signal: Signal) -> Phase {
        self.step(signal);
        while self.phase == Phase::Spawn {
            self.step(Signal::None);
        }
        self.phase
    }

    /// One transition of the state machine.
    fn step(&mut self, signal: Signal) {
        let from = self.phase;
        let to = match (from, signal) {
            (Phase::Start, Signal::Enter) => Phase::Spawn,
            (Phase::Start, Signal::Escape) => Phase::Exit,
            (Phase::Start, _) => Phase::Start,

            (Phase::Spawn, _) => self.resolve_spawn(),

            (Phase::Fall, Signal::HardDrop) => {
                piece::hard_drop(&mut self.board, &mut self.current, &mut self.stats);
                Phase::Spawn
            }
            (Phase::Fall, s) if s.is_piece_input() => {
                piece::apply_input(&self.board, &mut self.current, s);
                Phase::Fall
            }
            (Phase::Fall, Signal::Pause) => Phase::Pause,
            (Phase::Fall, Signal::Escape) => Phase::Exit,
            (Phase::Fall, Signal::Enter) => Phase::Fall,
            (Phase::Fall, _) => {
                let outcome = piece::tick(&mut self.board, &mut self.current, &mut self.stats);
                if outcome.still_falling() {
                    Phase::Fall
                } else {
                    Phase::Spawn
                }
            }

            (Phase::Pause, Signal::Pause) => Phase::Fall,
            (Phase::Pause, Signal::Escape) => Phase::Exit,
            (Phase::Pause, _) => Phase::Pause,

            (Phase::GameOver, Signal::Enter) => {
                self.reinitialize();
                Phase::Spawn
            }
            (Phase::GameOver, Signal::Escape) => Phase::Exit,
            (Phase::GameOver, _) => Phase::GameOver,

            (Phase::Exit, _) => Phase::Exit,
        };

        if from != to {
            debug!(
                from = from.as_str(),
                to = to.as_str(),
                signal = signal.as_str(),
                "phase change"
            );
        }
        self.phase = to;
    }

    fn resolve_spawn(&mut self) -> Phase {
        match piece::spawn(&self.board, &mut self.current, &mut self.next, &mut self.source) {
            SpawnOutcome::Spawned => Phase::Fall,
            SpawnOutcome::Blocked => {
                info!(
                    score = self.stats.score,
                    lines = self.stats.lines_cleared,
                    level = self.stats.level,
                    "game over"
                );
                Phase::GameOver
            }
        }
    }

    /// Raise the remembered best score (e.g. from a high-score table).
    pub fn set_best_score(&mut self, best: u32) {
        self.stats.best_score = self.stats.best_score.max(best).max(self.stats.score);
    }

    /// Replace the board contents, e.g. to set up a puzzle before starting.
    pub fn load_board(&mut self, board: Board) {
        self.board = board;
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Board as `[row][col]` tags
    pub fn board_tags(&self) -> BoardTags {
        self.board.tags()
    }

    pub fn current(&self) -> Tetromino {
        self.current
    }

    /// Whether the current piece is in play and should be drawn
    pub fn current_visible(&self) -> bool {
        self.phase == Phase::Fall
    }

    pub fn next(&self) -> Tetromino {
        self.next
    }

    pub fn stats(&self) -> Stats {
        self.stats
    }

    /// Landing position of the current piece
    pub fn ghost(&self) -> Tetromino {
        piece::compute_ghost(&self.board, &self.current)
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_tags(&mut out.board);

        let visible = self.current_visible();
        out.phase = self.phase;
        out.current = self.current.into();
        out.current_visible = visible;
        out.ghost = visible.then(|| self.ghost().into());
        out.next = self.next.into();
        out.stats = self.stats;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}
