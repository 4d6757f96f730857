//! Game-over results and the messages that announce them.

use serde::{Deserialize, Serialize};

use crate::core::PlayerId;
use crate::session::GameSession;

/// Why the session ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EndReason {
    /// Every tile was matched.
    BoardCleared,
    /// The countdown reached zero.
    TimeUp,
}

/// Final standing of a session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// Single-player final score.
    Solo { score: u32 },
    /// One player finished ahead.
    Winner {
        player: PlayerId,
        name: String,
        score: u32,
    },
    /// Both players finished level.
    Tie { score: u32 },
}

impl Outcome {
    /// Compare the scores of a finished session.
    #[must_use]
    pub fn of(session: &GameSession) -> Self {
        let mut standings = session.players().iter();
        let Some((first_id, first)) = standings.next() else {
            return Outcome::Solo { score: 0 };
        };
        let Some((second_id, second)) = standings.next() else {
            return Outcome::Solo { score: first.score };
        };

        use std::cmp::Ordering;
        match first.score.cmp(&second.score) {
            Ordering::Greater => Outcome::Winner {
                player: first_id,
                name: first.name.clone(),
                score: first.score,
            },
            Ordering::Less => Outcome::Winner {
                player: second_id,
                name: second.name.clone(),
                score: second.score,
            },
            Ordering::Equal => Outcome::Tie { score: first.score },
        }
    }
}

/// How and why a session ended.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameOver {
    pub reason: EndReason,
    pub outcome: Outcome,
}

impl GameOver {
    #[must_use]
    pub fn new(session: &GameSession, reason: EndReason) -> Self {
        Self {
            reason,
            outcome: Outcome::of(session),
        }
    }

    /// Text of the terminal message.
    #[must_use]
    pub fn message(&self) -> String {
        match (&self.reason, &self.outcome) {
            (EndReason::TimeUp, Outcome::Solo { score }) => {
                format!("⏳ Time's up! You scored {score} points.")
            }
            (_, Outcome::Solo { score }) => format!("🎉 Game Over! You scored {score} points!"),
            (_, Outcome::Winner { name, .. }) => format!("🏆 Game Over! {name} wins!"),
            (_, Outcome::Tie { .. }) => "🏆 Game Over! It's a tie!".to_string(),
        }
    }
}
