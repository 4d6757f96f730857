//! Single-player versus two-player mode.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::error::ParseModeError;

/// How a session is played.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameMode {
    /// One player racing the countdown.
    #[default]
    Single,
    /// Two players taking turns; a miss passes the turn.
    Multi,
}

impl GameMode {
    /// Seats in a session of this mode.
    #[must_use]
    pub const fn player_count(self) -> usize {
        match self {
            GameMode::Single => 1,
            GameMode::Multi => 2,
        }
    }

    /// Whether the countdown runs in this mode.
    #[must_use]
    pub const fn is_timed(self) -> bool {
        matches!(self, GameMode::Single)
    }

    /// Banner shown when the mode selector switches to this mode.
    #[must_use]
    pub const fn enabled_message(self) -> &'static str {
        match self {
            GameMode::Single => "Single Player Mode Enabled!",
            GameMode::Multi => "2 Player Mode Enabled!",
        }
    }
}

impl FromStr for GameMode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "single" => Ok(GameMode::Single),
            "multi" => Ok(GameMode::Multi),
            other => Err(ParseModeError(other.to_string())),
        }
    }
}

impl std::fmt::Display for GameMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameMode::Single => write!(f, "single"),
            GameMode::Multi => write!(f, "multi"),
        }
    }
}
