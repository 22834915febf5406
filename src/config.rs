//! Command-line configuration for the terminal runner.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use clap::Parser;

use crate::scores::{default_path, DEFAULT_NAME};

#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "brick-tetris", version, about = "Falling-block puzzle in the terminal")]
pub struct Config {
    /// Piece generator seed (defaults to the wall clock)
    #[arg(long)]
    pub seed: Option<u32>,

    /// High-score file (defaults to $HOME/.tetris_scores.tsv)
    #[arg(long, value_name = "PATH")]
    pub scores: Option<PathBuf>,

    /// Name recorded in the high-score table (defaults to $USER)
    #[arg(long)]
    pub name: Option<String>,

    /// Write logs to this file; filter with RUST_LOG (default "info")
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Terminal columns per board cell
    #[arg(long, default_value_t = 2, value_parser = clap::value_parser!(u16).range(1..=4))]
    pub cell_width: u16,
}

impl Config {
    /// Explicit seed, or one derived from the current time.
    pub fn seed(&self) -> u32 {
        self.seed.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_secs() as u32 ^ d.subsec_nanos())
                .unwrap_or(1)
        })
    }

    pub fn scores_path(&self) -> PathBuf {
        self.scores.clone().unwrap_or_else(default_path)
    }

    pub fn player_name(&self) -> String {
        self.name
            .clone()
            .or_else(|| std::env::var("USER").ok())
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| DEFAULT_NAME.to_string())
    }
}
