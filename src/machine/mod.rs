//! Interaction state machine.
//!
//! Sessions move `Idle -> OneSelected -> Evaluating` as tiles are picked.
//! A match check fires after the match delay: a hit scores and returns to
//! `Idle`, a miss waits out the mismatch delay, hides both tiles and (in
//! multi mode) passes the turn.
//!
//! ## Example
//!
//! ```
//! use memory_match::board::{Board, Symbol, Tile, TileIndex};
//! use memory_match::core::{GameConfig, GameMode, Player, PlayerMap};
//! use memory_match::machine::{step, Event};
//! use memory_match::session::{GameSession, Phase, SessionId};
//!
//! let config = GameConfig::default().with_pair_count(1);
//! let board = Board::from_tiles([Tile::new(Symbol::new(0)), Tile::new(Symbol::new(0))]);
//! let players = PlayerMap::from_vec(vec![Player::new("Ana")]);
//! let session = GameSession::new(SessionId(1), GameMode::Single, players, board, &config);
//!
//! let t = step(&session, Event::SelectTile(TileIndex::new(0)), &config).unwrap();
//! let t = step(&t.session, Event::SelectTile(TileIndex::new(1)), &config).unwrap();
//! assert_eq!(t.session.phase(), Phase::Evaluating);
//!
//! let t = step(&t.session, Event::CheckMatch, &config).unwrap();
//! assert!(t.is_game_over());
//! ```

mod event;
mod outcome;
mod transition;

pub use event::{Effect, Event};
pub use outcome::{EndReason, GameOver, Outcome};
pub use transition::{step, Transition};
