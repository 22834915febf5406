//! High-score table persisted as tab-separated text.
//!
//! One record per line, `name<TAB>score`, best first. The file is small and
//! rewritten in full on every save.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, warn};

/// Longest stored player name, in characters
pub const NAME_MAX: usize = 15;
/// Capacity of the table
pub const MAX_SCORES: usize = 100;
/// File name used under the home directory
pub const DEFAULT_FILE_NAME: &str = ".tetris_scores.tsv";
/// Name recorded when the player gives none
pub const DEFAULT_NAME: &str = "Player";

#[derive(Debug, Error)]
pub enum ScoreError {
    #[error("failed to read score file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write score file {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub type Result<T> = std::result::Result<T, ScoreError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreEntry {
    pub name: String,
    pub score: u32,
}

impl ScoreEntry {
    pub fn new(name: &str, score: u32) -> Self {
        Self {
            name: clip_name(name),
            score,
        }
    }

    /// Parse one `name<TAB>score` line. Returns `None` for malformed lines.
    fn parse(line: &str) -> Option<Self> {
        let (name, score) = line.split_once('\t')?;
        let score = score.trim().parse::<u32>().ok()?;
        Some(Self::new(name, score))
    }
}

fn clip_name(name: &str) -> String {
    name.chars().take(NAME_MAX).collect()
}

/// `$HOME/.tetris_scores.tsv`, or `./.tetris_scores.tsv` without a home.
pub fn default_path() -> PathBuf {
    match std::env::var_os("HOME") {
        Some(home) if !home.is_empty() => PathBuf::from(home).join(DEFAULT_FILE_NAME),
        _ => PathBuf::from(".").join(DEFAULT_FILE_NAME),
    }
}

/// Descending table of at most [`MAX_SCORES`] entries
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scoreboard {
    entries: Vec<ScoreEntry>,
}

impl Scoreboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a table from disk. A missing file is an empty table.
    ///
    /// Malformed lines are skipped and reading stops after [`MAX_SCORES`]
    /// records. Records are kept in file order.
    pub fn load(path: &Path) -> Result<Self> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no score file yet");
                return Ok(Self::new());
            }
            Err(source) => {
                return Err(ScoreError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        Ok(Self::parse(&text))
    }

    /// Parse table text; see [`Scoreboard::load`].
    pub fn parse(text: &str) -> Self {
        let mut entries = Vec::new();
        for (lineno, line) in text.lines().enumerate() {
            if entries.len() >= MAX_SCORES {
                break;
            }
            if line.is_empty() {
                continue;
            }
            match ScoreEntry::parse(line) {
                Some(entry) => entries.push(entry),
                None => warn!(line = lineno + 1, "skipping malformed score record"),
            }
        }
        Self { entries }
    }

    /// Write every entry as `name\tscore\n`, in table order.
    pub fn save(&self, path: &Path) -> Result<()> {
        let wrap = |source| ScoreError::Write {
            path: path.to_path_buf(),
            source,
        };
        let mut file = fs::File::create(path).map_err(wrap)?;
        file.write_all(self.to_text().as_bytes()).map_err(wrap)?;
        file.flush().map_err(wrap)
    }

    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for e in &self.entries {
            out.push_str(&e.name);
            out.push('\t');
            out.push_str(&e.score.to_string());
            out.push('\n');
        }
        out
    }

    /// Record a finished game.
    ///
    /// When the table is full the score must beat the last entry strictly, and
    /// then replaces it. The new entry moves up past lower scores only, so it
    /// lands after existing equal scores. Returns its rank (0 = best), or
    /// `None` if the score did not make the table.
    pub fn submit(&mut self, name: &str, score: u32) -> Option<usize> {
        let name = if name.is_empty() { DEFAULT_NAME } else { name };
        let entry = ScoreEntry::new(name, score);

        if self.entries.len() >= MAX_SCORES {
            match self.entries.last_mut() {
                Some(last) if score > last.score => *last = entry,
                _ => return None,
            }
        } else {
            self.entries.push(entry);
        }

        let mut rank = self.entries.len() - 1;
        while rank > 0 && self.entries[rank - 1].score < self.entries[rank].score {
            self.entries.swap(rank - 1, rank);
            rank -= 1;
        }
        debug!(rank, score, "score recorded");
        Some(rank)
    }

    /// Top score, or 0 for an empty table
    pub fn best(&self) -> u32 {
        self.entries.first().map_or(0, |e| e.score)
    }

    pub fn entries(&self) -> &[ScoreEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
