//! Scoring module - line-clear points, leveling and tick cadence
//!
//! Rules:
//! - A batch of cleared lines scores from [`LINE_SCORES`] (1→100, 2→300,
//!   3→700, 4→1500). Separate batches are never combined.
//! - Hard drops add one point per row travelled.
//! - Level is `min(10, score / 600 + 1)` and only ever goes up; speed mirrors
//!   the level.

use crate::types::{
    BASE_TICK_MS, LINE_SCORES, MAX_LEVEL, MIN_TICK_MS, SCORE_PER_LEVEL, TICK_STEP_MS,
};

/// Session statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Stats {
    pub score: u32,
    pub level: u32,
    pub lines_cleared: u32,
    pub best_score: u32,
    /// Opaque cadence metric for front ends; equal to `level`.
    pub speed: u32,
}

impl Stats {
    pub fn new() -> Self {
        Self {
            score: 0,
            level: 1,
            lines_cleared: 0,
            best_score: 0,
            speed: 1,
        }
    }

    /// Fresh stats that remember a previous best score
    pub fn with_best(best_score: u32) -> Self {
        Self {
            best_score,
            ..Self::new()
        }
    }

    /// Apply one batch of cleared lines. Returns the points awarded.
    pub fn record_clear(&mut self, lines: usize) -> u32 {
        if lines == 0 {
            return 0;
        }
        let points = line_clear_points(lines);
        self.score = self.score.saturating_add(points);
        self.lines_cleared = self.lines_cleared.saturating_add(lines as u32);

        let new_level = level_for_score(self.score);
        if new_level > self.level {
            self.level = new_level;
            self.speed = new_level;
        }
        self.track_best();
        points
    }

    /// Add the hard-drop bonus (one point per row).
    pub fn add_drop_bonus(&mut self, rows: u32) {
        self.score = self.score.saturating_add(rows);
        self.track_best();
    }

    fn track_best(&mut self) {
        if self.score > self.best_score {
            self.best_score = self.score;
        }
    }
}

impl Default for Stats {
    fn default() -> Self {
        Self::new()
    }
}

/// Points for one batch of `lines` cleared together.
///
/// Batches larger than four cannot happen in play and score nothing.
pub fn line_clear_points(lines: usize) -> u32 {
    LINE_SCORES.get(lines).copied().unwrap_or(0)
}

/// Level reached with `score` points, capped at [`MAX_LEVEL`]
pub fn level_for_score(score: u32) -> u32 {
    (score / SCORE_PER_LEVEL + 1).min(MAX_LEVEL)
}

/// Milliseconds between gravity ticks at `level`
pub fn tick_interval_ms(level: u32) -> u32 {
    let reduction = level.saturating_sub(1).saturating_mul(TICK_STEP_MS);
    BASE_TICK_MS.saturating_sub(reduction).max(MIN_TICK_MS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_clear_points() {
        assert_eq!(line_clear_points(0), 0);
        assert_eq!(line_clear_points(1), 100);
        assert_eq!(line_clear_points(2), 300);
        assert_eq!(line_clear_points(3), 700);
        assert_eq!(line_clear_points(4), 1500);
        assert_eq!(line_clear_points(5), 0);
    }

    #[test]
    fn test_level_for_score() {
        assert_eq!(level_for_score(0), 1);
        assert_eq!(level_for_score(599), 1);
        assert_eq!(level_for_score(600), 2);
        assert_eq!(level_for_score(5400), 10);
        assert_eq!(level_for_score(100_000), 10);
    }

    #[test]
    fn test_record_clear_updates_level_and_speed() {
        let mut stats = Stats::new();
        assert_eq!(stats.record_clear(4), 1500);
        assert_eq!(stats.score, 1500);
        assert_eq!(stats.lines_cleared, 4);
        assert_eq!(stats.level, 3);
        assert_eq!(stats.speed, 3);
    }

    #[test]
    fn test_level_never_decreases() {
        let mut stats = Stats::new();
        stats.level = 5;
        stats.speed = 5;
        stats.record_clear(1);
        assert_eq!(stats.level, 5);
        assert_eq!(stats.speed, 5);
    }

    #[test]
    fn test_level_clamps_at_max() {
        let mut stats = Stats::new();
        stats.score = 5900;
        stats.level = 9;
        stats.record_clear(4);
        assert_eq!(stats.level, MAX_LEVEL);
    }

    #[test]
    fn test_zero_lines_is_noop() {
        let mut stats = Stats::new();
        assert_eq!(stats.record_clear(0), 0);
        assert_eq!(stats, Stats::new());
    }

    #[test]
    fn test_drop_bonus_tracks_best() {
        let mut stats = Stats::with_best(10);
        stats.add_drop_bonus(7);
        assert_eq!(stats.score, 7);
        assert_eq!(stats.best_score, 10);
        stats.add_drop_bonus(5);
        assert_eq!(stats.best_score, 12);
    }

    #[test]
    fn test_tick_interval_ms() {
        assert_eq!(tick_interval_ms(1), 500);
        assert_eq!(tick_interval_ms(2), 450);
        assert_eq!(tick_interval_ms(10), 50);
        assert_eq!(tick_interval_ms(0), 500);
        assert_eq!(tick_interval_ms(50), 50);
    }
}
