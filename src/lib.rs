//! # memory-match
//!
//! Game engine for a memory-matching card game: flip tiles two at a time
//! and find the pairs, alone against a countdown or taking turns with a
//! second player.
//!
//! ## Design Principles
//!
//! 1. **Sessions are values**: A `GameSession` is passed in and returned,
//!    never mutated through shared globals.
//!
//! 2. **Transitions are pure**: `machine::step` takes a session and an
//!    event and returns the next session plus a list of effects. It knows
//!    nothing about the UI or the clock.
//!
//! 3. **Delays are cancellable tasks**: Match checks, rollbacks and
//!    countdown ticks are scheduled against a `SessionId`. Replacing the
//!    session cancels them.
//!
//! ## Modules
//!
//! - `core`: Configuration, RNG, players, mode, errors
//! - `board`: Tiles, symbols and board generation
//! - `session`: The explicit session value and its phase
//! - `machine`: Events, effects and the transition function
//! - `schedule`: Virtual-clock task scheduler
//! - `presentation`: The `Presenter` trait the core writes to
//! - `controller`: Glues all of the above to UI actions

pub mod board;
pub mod controller;
pub mod core;
pub mod machine;
pub mod presentation;
pub mod schedule;
pub mod session;

// Re-export commonly used types
pub use crate::core::{
    GameConfig, GameMode, GameRng, GameRngState, InputError, ParseModeError, Player, PlayerId,
    PlayerMap, StartError,
};

pub use crate::board::{generate, Board, Symbol, Tile, TileFace, TileIndex};

pub use crate::session::{GameSession, Phase, SessionId};

pub use crate::machine::{step, Effect, EndReason, Event, GameOver, Outcome, Transition};

pub use crate::schedule::{ScheduledTask, Scheduler, TaskId, TaskKind};

pub use crate::presentation::{Notification, Presenter, RecordingPresenter};

pub use crate::controller::{GameController, StartRequest};
