//! The game session: one playthrough from a freshly dealt board to game over.
//!
//! A `GameSession` is a plain value. Transitions read one session and
//! produce the next; the controller owns whichever is current. Cloning is
//! cheap because the board is a persistent vector.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::board::{Board, TileIndex};
use crate::core::{GameConfig, GameMode, Player, PlayerId, PlayerMap};

/// Identifies one session instance. Rebuilding a session always yields a
/// new id, which is what scheduled tasks are keyed to.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct SessionId(pub u64);

impl SessionId {
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Session({})", self.0)
    }
}

/// Where the selection state machine stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// No tile face up.
    Idle,
    /// One tile face up, waiting for its partner.
    OneSelected,
    /// Two tiles face up, input locked until the pair resolves.
    Evaluating,
}

/// Complete state of one playthrough.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSession {
    pub(crate) id: SessionId,
    pub(crate) mode: GameMode,
    pub(crate) players: PlayerMap<Player>,
    pub(crate) active_player: PlayerId,
    /// Seconds left; `None` when the mode is untimed.
    pub(crate) time_remaining: Option<u32>,
    pub(crate) board: Board,
    /// Revealed, unmatched tiles in selection order.
    pub(crate) selection: SmallVec<[TileIndex; 2]>,
    /// Who revealed the first tile of the current pair.
    pub(crate) pair_owner: Option<PlayerId>,
    pub(crate) locked: bool,
}

impl GameSession {
    /// Seat `players` at `board`. The first player moves first.
    ///
    /// Panics if the player count does not fit the mode.
    pub fn new(
        id: SessionId,
        mode: GameMode,
        players: PlayerMap<Player>,
        board: Board,
        config: &GameConfig,
    ) -> Self {
        assert_eq!(
            players.player_count(),
            mode.player_count(),
            "Player count must match the game mode"
        );

        Self {
            id,
            mode,
            players,
            active_player: PlayerId::ONE,
            time_remaining: mode.is_timed().then_some(config.countdown_secs),
            board,
            selection: SmallVec::new(),
            pair_owner: None,
            locked: false,
        }
    }

    #[must_use]
    pub fn id(&self) -> SessionId {
        self.id
    }

    #[must_use]
    pub fn mode(&self) -> GameMode {
        self.mode
    }

    #[must_use]
    pub fn players(&self) -> &PlayerMap<Player> {
        &self.players
    }

    #[must_use]
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(id)
    }

    /// Score of a seat, 0 for a seat that does not exist.
    #[must_use]
    pub fn score(&self, id: PlayerId) -> u32 {
        self.players.get(id).map_or(0, |p| p.score)
    }

    #[must_use]
    pub fn active_player(&self) -> PlayerId {
        self.active_player
    }

    /// Name of the player whose turn it is.
    #[must_use]
    pub fn active_name(&self) -> &str {
        &self.players[self.active_player].name
    }

    #[must_use]
    pub fn time_remaining(&self) -> Option<u32> {
        self.time_remaining
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn selection(&self) -> &[TileIndex] {
        &self.selection
    }

    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        match self.selection.len() {
            0 => Phase::Idle,
            1 => Phase::OneSelected,
            _ => Phase::Evaluating,
        }
    }

    /// Label for the turn indicator.
    #[must_use]
    pub fn turn_label(&self) -> String {
        format!("{}'s Turn", self.active_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::generate;
    use crate::core::GameRng;

    fn session(mode: GameMode) -> GameSession {
        let config = GameConfig::default();
        let names: Vec<_> = ["Ana", "Bo"]
            .into_iter()
            .take(mode.player_count())
            .map(Player::new)
            .collect();
        GameSession::new(
            SessionId(1),
            mode,
            PlayerMap::from_vec(names),
            generate(config.pair_count, &mut GameRng::new(1)),
            &config,
        )
    }

    #[test]
    fn test_single_session_defaults() {
        let s = session(GameMode::Single);

        assert_eq!(s.phase(), Phase::Idle);
        assert_eq!(s.time_remaining(), Some(60));
        assert_eq!(s.active_player(), PlayerId::ONE);
        assert_eq!(s.turn_label(), "Ana's Turn");
        assert_eq!(s.score(PlayerId::ONE), 0);
        assert_eq!(s.score(PlayerId::TWO), 0);
        assert!(!s.is_locked());
    }

    #[test]
    fn test_multi_session_is_untimed() {
        let s = session(GameMode::Multi);
        assert_eq!(s.time_remaining(), None);
        assert_eq!(s.players().player_count(), 2);
    }

    #[test]
    #[should_panic(expected = "Player count must match the game mode")]
    fn test_mode_mismatch() {
        let config = GameConfig::default();
        let _ = GameSession::new(
            SessionId(1),
            GameMode::Multi,
            PlayerMap::from_vec(vec![Player::new("Ana")]),
            generate(config.pair_count, &mut GameRng::new(1)),
            &config,
        );
    }

    #[test]
    fn test_session_serde() {
        let s = session(GameMode::Multi);
        let json = serde_json::to_string(&s).unwrap();
        let back: GameSession = serde_json::from_str(&json).unwrap();
        assert_eq!(s, back);
    }
}
