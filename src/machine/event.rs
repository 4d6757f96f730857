//! Inputs and outputs of the state machine.

use serde::{Deserialize, Serialize};

use crate::board::TileIndex;
use crate::presentation::Notification;
use crate::schedule::TaskKind;

use super::outcome::GameOver;

/// Something that happened to a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    /// The player clicked a tile.
    SelectTile(TileIndex),
    /// The match delay elapsed.
    CheckMatch,
    /// The mismatch delay elapsed.
    RollbackMismatch,
    /// One countdown second elapsed.
    CountdownTick,
}

impl From<TaskKind> for Event {
    fn from(kind: TaskKind) -> Self {
        match kind {
            TaskKind::MatchCheck => Event::CheckMatch,
            TaskKind::MismatchRollback => Event::RollbackMismatch,
            TaskKind::CountdownTick => Event::CountdownTick,
        }
    }
}

/// A side effect requested by a transition, carried out by the controller.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Effect {
    /// Tell the presenter something changed.
    Notify(Notification),
    /// Fire `kind` for this session after `delay_ms`.
    Schedule { kind: TaskKind, delay_ms: u64 },
    /// Cancel this session's countdown.
    StopCountdown,
    /// The session is over; start a new one. Always the last effect.
    GameOver(GameOver),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_kinds_map_to_events() {
        assert_eq!(Event::from(TaskKind::MatchCheck), Event::CheckMatch);
        assert_eq!(Event::from(TaskKind::MismatchRollback), Event::RollbackMismatch);
        assert_eq!(Event::from(TaskKind::CountdownTick), Event::CountdownTick);
    }
}
