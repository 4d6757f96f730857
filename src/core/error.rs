//! Error types.
//!
//! No error here is fatal. `StartError` aborts a start attempt and is shown
//! to the player; `InputError` explains why an event was ignored.

use crate::board::TileIndex;

/// Why a start attempt was refused. The display text is shown to the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum StartError {
    #[error("Enter Player 1 Name!")]
    MissingPlayerOneName,

    #[error("Enter a player name!")]
    MissingPlayerTwoName,
}

/// Why an event left the session untouched.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    /// No game has been started.
    #[error("no game in progress")]
    NoSession,

    /// A pair is being evaluated.
    #[error("board is locked while a pair is evaluated")]
    Locked,

    #[error("tile {0} is not on the board")]
    TileOutOfRange(TileIndex),

    #[error("tile {0} is already matched")]
    TileMatched(TileIndex),

    /// The tile is the one already face up, waiting for its partner.
    #[error("tile {0} is already selected")]
    TileAlreadySelected(TileIndex),

    /// A match check or rollback arrived without a revealed pair.
    #[error("no revealed pair to evaluate")]
    NothingToEvaluate,

    /// A countdown tick arrived for an untimed or expired session.
    #[error("countdown is not running")]
    CountdownInactive,
}

/// Unknown value from the mode selector.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown game mode '{0}', expected 'single' or 'multi'")]
pub struct ParseModeError(pub String);
