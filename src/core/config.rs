//! Game configuration.
//!
//! `GameConfig::default()` holds the fixed constants of the game: eight
//! symbol pairs, an 800 ms match delay, a 1000 ms mismatch rollback, a 60
//! second countdown and 10 points per match. The `with_*` builders exist so
//! tests can shrink boards and timers; real play uses the defaults.

use serde::{Deserialize, Serialize};

use crate::board::GLYPHS;

/// Complete game configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Number of distinct symbols on the board; each appears twice.
    pub pair_count: usize,

    /// Delay between the second reveal and the match check.
    pub match_delay_ms: u64,

    /// Delay between a failed match check and hiding the pair again.
    pub mismatch_delay_ms: u64,

    /// Single-player countdown length, in ticks.
    pub countdown_secs: u32,

    /// Interval between countdown ticks.
    pub tick_interval_ms: u64,

    /// Points awarded per matched pair.
    pub points_per_match: u32,

    /// How long transient messages stay on screen.
    pub message_duration_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            pair_count: 8,
            match_delay_ms: 800,
            mismatch_delay_ms: 1000,
            countdown_secs: 60,
            tick_interval_ms: 1000,
            points_per_match: 10,
            message_duration_ms: 3000,
        }
    }
}

impl GameConfig {
    /// Total tiles on a board built from this config.
    #[must_use]
    pub fn tile_count(&self) -> usize {
        self.pair_count * 2
    }

    /// Check the invariants the builders enforce, for configs built as
    /// struct literals or deserialized.
    ///
    /// # Panics
    ///
    /// If the board has no pairs or more pairs than there are glyphs, or if
    /// the countdown or its tick interval is zero.
    pub fn validate(&self) {
        assert!(self.pair_count > 0, "Board needs at least 1 pair");
        assert!(self.pair_count <= GLYPHS.len(), "At most 8 pairs supported");
        assert!(self.countdown_secs > 0, "Countdown must be at least 1 second");
        assert!(self.tick_interval_ms > 0, "Tick interval must be positive");
    }

    /// Set the number of symbol pairs.
    #[must_use]
    pub fn with_pair_count(mut self, pairs: usize) -> Self {
        assert!(pairs > 0, "Board needs at least 1 pair");
        assert!(pairs <= GLYPHS.len(), "At most 8 pairs supported");
        self.pair_count = pairs;
        self
    }

    /// Set the countdown length.
    #[must_use]
    pub fn with_countdown_secs(mut self, secs: u32) -> Self {
        assert!(secs > 0, "Countdown must be at least 1 second");
        self.countdown_secs = secs;
        self
    }

    /// Set the match-check and mismatch-rollback delays.
    #[must_use]
    pub fn with_delays(mut self, match_delay_ms: u64, mismatch_delay_ms: u64) -> Self {
        self.match_delay_ms = match_delay_ms;
        self.mismatch_delay_ms = mismatch_delay_ms;
        self
    }

    /// Set the points awarded per match.
    #[must_use]
    pub fn with_points_per_match(mut self, points: u32) -> Self {
        self.points_per_match = points;
        self
    }
}
