//! Terminal runner (default binary).
//!
//! Multiplexes keyboard input and the gravity timer into one loop that feeds
//! [`Game::dispatch`], renders a snapshot every iteration and records the
//! score when a game ends.

use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use crossterm::event::{self, Event};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use brick_tetris::config::Config;
use brick_tetris::core::{tick_interval_ms, Game};
use brick_tetris::input::{map_key, KeyCommand};
use brick_tetris::scores::Scoreboard;
use brick_tetris::term::{FrameBuffer, GameView, ScoresView, TerminalRenderer};
use brick_tetris::types::{Phase, Signal, IDLE_POLL_MS};

fn main() -> Result<()> {
    let cfg = Config::parse();
    init_logging(&cfg)?;

    let scores_path = cfg.scores_path();
    let scoreboard = Scoreboard::load(&scores_path).unwrap_or_else(|e| {
        warn!(error = %e, path = %scores_path.display(), "could not load high scores");
        Scoreboard::new()
    });

    let seed = cfg.seed();
    let mut game = Game::from_seed(seed);
    game.set_best_score(scoreboard.best());
    info!(seed, best = scoreboard.best(), "session started");

    let mut app = App {
        game,
        scoreboard,
        scores_path,
        player: cfg.player_name(),
        view: GameView::new(cfg.cell_width, 1),
        show_scores: false,
        submitted: false,
    };

    let mut term = TerminalRenderer::new();
    let result = term.enter().and_then(|()| app.run(&mut term));

    // Always try to restore terminal state.
    let restored = term.exit();
    result.and(restored)
}

/// File logging only: stdout belongs to the renderer.
fn init_logging(cfg: &Config) -> Result<()> {
    let Some(path) = &cfg.log_file else {
        return Ok(());
    };
    let file = File::create(path).with_context(|| format!("create log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow!("install log subscriber: {e}"))
}

struct App {
    game: Game,
    scoreboard: Scoreboard,
    scores_path: PathBuf,
    player: String,
    view: GameView,
    show_scores: bool,
    submitted: bool,
}

impl App {
    fn run(&mut self, term: &mut TerminalRenderer) -> Result<()> {
        let scores_view = ScoresView::new(self.view);
        let mut fb = FrameBuffer::new(0, 0);
        let mut last_tick = Instant::now();

        loop {
            let phase = self.game.phase();
            if phase == Phase::Exit {
                return Ok(());
            }
            self.record_game_over(phase);

            // Render.
            let viewport = term.viewport()?;
            self.view.render_into(&self.game.snapshot(), viewport, &mut fb);
            if self.show_scores {
                scores_view.render_into(self.scoreboard.entries(), viewport, &mut fb);
            }
            term.draw_swap(&mut fb)?;

            // Input with timeout until next gravity step.
            let interval_ms = tick_interval_ms(self.game.stats().level);
            let interval = Duration::from_millis(u64::from(interval_ms));
            let timeout = if phase == Phase::Fall {
                interval.saturating_sub(last_tick.elapsed())
            } else {
                Duration::from_millis(u64::from(IDLE_POLL_MS))
            };

            if event::poll(timeout)? {
                match event::read()? {
                    Event::Key(key) => match map_key(key) {
                        Some(KeyCommand::Quit) => return Ok(()),
                        Some(KeyCommand::ShowScores) if phase != Phase::Fall => {
                            self.show_scores = !self.show_scores;
                        }
                        Some(KeyCommand::ShowScores) => {}
                        Some(KeyCommand::Signal(signal)) => {
                            self.show_scores = false;
                            self.game.dispatch(signal);
                        }
                        None => {}
                    },
                    Event::Resize(..) => term.invalidate(),
                    _ => {}
                }
            }

            // Gravity. Entering FALL from another phase restarts the timer.
            if self.game.phase() != Phase::Fall || phase != Phase::Fall {
                last_tick = Instant::now();
            } else if last_tick.elapsed() >= interval {
                last_tick = Instant::now();
                self.game.dispatch(Signal::None);
            }
        }
    }

    /// Submit the score once per finished game.
    fn record_game_over(&mut self, phase: Phase) {
        if phase != Phase::GameOver {
            self.submitted = false;
            return;
        }
        if self.submitted {
            return;
        }
        self.submitted = true;

        let score = self.game.stats().score;
        if let Some(rank) = self.scoreboard.submit(&self.player, score) {
            info!(score, rank = rank + 1, "new high score entry");
        }
        if let Err(e) = self.scoreboard.save(&self.scores_path) {
            warn!(error = %e, "could not save high scores");
        }
    }
}
