//! Core types: configuration, RNG, players, mode and errors.

pub mod config;
pub mod error;
pub mod mode;
pub mod player;
pub mod rng;

pub use config::GameConfig;
pub use error::{InputError, ParseModeError, StartError};
pub use mode::GameMode;
pub use player::{Player, PlayerId, PlayerMap, MAX_PLAYERS};
pub use rng::{GameRng, GameRngState};
