//! Pure transition function.
//!
//! `step` never mutates its input. It returns the next session and the
//! effects the controller must carry out, in order.

use crate::board::{TileFace, TileIndex};
use crate::core::{GameConfig, GameMode, InputError};
use crate::presentation::Notification;
use crate::schedule::TaskKind;
use crate::session::GameSession;

use super::event::{Effect, Event};
use super::outcome::{EndReason, GameOver};

/// The next session plus the effects that go with it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transition {
    pub session: GameSession,
    pub effects: Vec<Effect>,
}

impl Transition {
    fn new(session: GameSession) -> Self {
        Self {
            session,
            effects: Vec::new(),
        }
    }

    fn notify(&mut self, notification: Notification) {
        self.effects.push(Effect::Notify(notification));
    }

    fn render(&mut self, index: TileIndex) {
        let face = self
            .session
            .board
            .get(index)
            .map_or(TileFace::Hidden, |t| t.face());
        self.notify(Notification::RenderTile { index, face });
    }

    fn end(&mut self, reason: EndReason, config: &GameConfig) {
        let over = GameOver::new(&self.session, reason);
        self.effects.push(Effect::StopCountdown);
        self.notify(Notification::ShowMessage {
            text: over.message(),
            duration_ms: config.message_duration_ms,
        });
        self.effects.push(Effect::GameOver(over));
    }

    /// True if the transition ended the session.
    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.effects.iter().any(|e| matches!(e, Effect::GameOver(_)))
    }
}

/// Apply one event to a session.
///
/// Returns `Err` when the event is ignored; the session is then unchanged.
pub fn step(
    session: &GameSession,
    event: Event,
    config: &GameConfig,
) -> Result<Transition, InputError> {
    match event {
        Event::SelectTile(index) => select(session, index, config),
        Event::CheckMatch => check_match(session, config),
        Event::RollbackMismatch => rollback_mismatch(session),
        Event::CountdownTick => tick(session, config),
    }
}

fn select(
    session: &GameSession,
    index: TileIndex,
    config: &GameConfig,
) -> Result<Transition, InputError> {
    if session.locked {
        return Err(InputError::Locked);
    }
    let tile = session
        .board
        .get(index)
        .ok_or(InputError::TileOutOfRange(index))?;
    if tile.matched {
        return Err(InputError::TileMatched(index));
    }
    if session.selection.contains(&index) {
        return Err(InputError::TileAlreadySelected(index));
    }

    let mut t = Transition::new(session.clone());
    let next = &mut t.session;

    next.board.reveal(index);
    if next.selection.is_empty() {
        next.pair_owner = Some(next.active_player);
    }
    next.selection.push(index);

    let evaluating = next.selection.len() == 2;
    if evaluating {
        next.locked = true;
    }

    t.render(index);
    if evaluating {
        t.effects.push(Effect::Schedule {
            kind: TaskKind::MatchCheck,
            delay_ms: config.match_delay_ms,
        });
    }
    Ok(t)
}

/// The two selected tiles, if a pair is face up.
fn revealed_pair(session: &GameSession) -> Result<(TileIndex, TileIndex), InputError> {
    match session.selection.as_slice() {
        [a, b] if session.locked => Ok((*a, *b)),
        _ => Err(InputError::NothingToEvaluate),
    }
}

fn is_match(session: &GameSession, a: TileIndex, b: TileIndex) -> bool {
    match (session.board.get(a), session.board.get(b)) {
        (Some(x), Some(y)) => x.symbol == y.symbol,
        _ => false,
    }
}

fn check_match(session: &GameSession, config: &GameConfig) -> Result<Transition, InputError> {
    let (a, b) = revealed_pair(session)?;

    let mut t = Transition::new(session.clone());

    if !is_match(session, a, b) {
        t.effects.push(Effect::Schedule {
            kind: TaskKind::MismatchRollback,
            delay_ms: config.mismatch_delay_ms,
        });
        return Ok(t);
    }

    let next = &mut t.session;
    next.board.mark_matched(a);
    next.board.mark_matched(b);

    let scorer = next.pair_owner.take().unwrap_or(next.active_player);
    let value = match next.players.get_mut(scorer) {
        Some(player) => {
            player.score += config.points_per_match;
            player.score
        }
        None => 0,
    };

    next.selection.clear();
    next.locked = false;
    let cleared = next.board.is_cleared();

    t.render(a);
    t.render(b);
    t.notify(Notification::SetScore {
        player: scorer,
        value,
    });

    if cleared {
        t.end(EndReason::BoardCleared, config);
    }
    Ok(t)
}

fn rollback_mismatch(session: &GameSession) -> Result<Transition, InputError> {
    let (a, b) = revealed_pair(session)?;
    if is_match(session, a, b) {
        return Err(InputError::NothingToEvaluate);
    }

    let mut t = Transition::new(session.clone());
    let next = &mut t.session;

    next.board.hide(a);
    next.board.hide(b);
    next.selection.clear();
    next.pair_owner = None;
    next.locked = false;

    let switched = next.mode == GameMode::Multi;
    if switched {
        next.active_player = next.active_player.next(next.players.player_count());
    }

    t.render(a);
    t.render(b);
    if switched {
        let label = t.session.turn_label();
        t.notify(Notification::SetActivePlayerLabel(label));
    }
    Ok(t)
}

fn tick(session: &GameSession, config: &GameConfig) -> Result<Transition, InputError> {
    let remaining = match session.time_remaining {
        Some(secs) if secs > 0 => secs - 1,
        _ => return Err(InputError::CountdownInactive),
    };

    let mut t = Transition::new(session.clone());
    t.session.time_remaining = Some(remaining);

    if remaining > 0 {
        t.notify(Notification::SetCountdown(remaining));
    } else {
        t.end(EndReason::TimeUp, config);
    }
    Ok(t)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Board, Symbol, Tile};
    use crate::core::{Player, PlayerId, PlayerMap};
    use crate::machine::outcome::Outcome;
    use crate::session::{Phase, SessionId};

    /// Board layout: symbols 0 1 0 1.
    fn session(mode: GameMode) -> (GameSession, GameConfig) {
        let config = GameConfig::default().with_pair_count(2);
        let board = Board::from_tiles([0, 1, 0, 1].map(|s| Tile::new(Symbol::new(s))));
        let players: Vec<_> = ["Ana", "Bo"]
            .into_iter()
            .take(mode.player_count())
            .map(Player::new)
            .collect();
        let session = GameSession::new(
            SessionId(1),
            mode,
            PlayerMap::from_vec(players),
            board,
            &config,
        );
        (session, config)
    }

    fn apply(session: &GameSession, event: Event, config: &GameConfig) -> Transition {
        step(session, event, config).expect("event should apply")
    }

    fn select_pair(session: &GameSession, a: usize, b: usize, config: &GameConfig) -> GameSession {
        let s = apply(session, Event::SelectTile(TileIndex::new(a)), config).session;
        apply(&s, Event::SelectTile(TileIndex::new(b)), config).session
    }

    #[test]
    fn test_first_selection() {
        let (s, config) = session(GameMode::Single);
        let t = apply(&s, Event::SelectTile(TileIndex::new(0)), &config);

        assert_eq!(t.session.phase(), Phase::OneSelected);
        assert!(!t.session.is_locked());
        assert_eq!(
            t.effects,
            vec![Effect::Notify(Notification::RenderTile {
                index: TileIndex::new(0),
                face: TileFace::Revealed(Symbol::new(0)),
            })]
        );
        // Input untouched.
        assert_eq!(s.phase(), Phase::Idle);
    }

    #[test]
    fn test_same_tile_twice_is_ignored() {
        let (s, config) = session(GameMode::Single);
        let s = apply(&s, Event::SelectTile(TileIndex::new(0)), &config).session;

        assert_eq!(
            step(&s, Event::SelectTile(TileIndex::new(0)), &config),
            Err(InputError::TileAlreadySelected(TileIndex::new(0)))
        );
        assert_eq!(s.selection(), &[TileIndex::new(0)]);
    }

    #[test]
    fn test_second_selection_locks_and_schedules_check() {
        let (s, config) = session(GameMode::Single);
        let s = apply(&s, Event::SelectTile(TileIndex::new(0)), &config).session;
        let t = apply(&s, Event::SelectTile(TileIndex::new(2)), &config);

        assert_eq!(t.session.phase(), Phase::Evaluating);
        assert!(t.session.is_locked());
        assert_eq!(
            t.effects.last(),
            Some(&Effect::Schedule {
                kind: TaskKind::MatchCheck,
                delay_ms: 800,
            })
        );
    }

    #[test]
    fn test_locked_board_ignores_selection() {
        let (s, config) = session(GameMode::Single);
        let s = select_pair(&s, 0, 1, &config);

        assert_eq!(
            step(&s, Event::SelectTile(TileIndex::new(2)), &config),
            Err(InputError::Locked)
        );
    }

    #[test]
    fn test_out_of_range_selection() {
        let (s, config) = session(GameMode::Single);
        assert_eq!(
            step(&s, Event::SelectTile(TileIndex::new(9)), &config),
            Err(InputError::TileOutOfRange(TileIndex::new(9)))
        );
    }

    #[test]
    fn test_match_awards_points_and_unlocks() {
        let (s, config) = session(GameMode::Single);
        let s = select_pair(&s, 0, 2, &config);
        let t = apply(&s, Event::CheckMatch, &config);

        let next = &t.session;
        assert_eq!(next.score(PlayerId::ONE), 10);
        assert_eq!(next.phase(), Phase::Idle);
        assert!(!next.is_locked());
        assert_eq!(next.board().matched_count(), 2);
        assert!(t.effects.contains(&Effect::Notify(Notification::SetScore {
            player: PlayerId::ONE,
            value: 10
        })));
        assert!(!t.is_game_over());
    }

    #[test]
    fn test_matched_tile_is_ignored() {
        let (s, config) = session(GameMode::Single);
        let s = select_pair(&s, 0, 2, &config);
        let s = apply(&s, Event::CheckMatch, &config).session;

        assert_eq!(
            step(&s, Event::SelectTile(TileIndex::new(2)), &config),
            Err(InputError::TileMatched(TileIndex::new(2)))
        );
    }

    #[test]
    fn test_mismatch_schedules_rollback_and_stays_locked() {
        let (s, config) = session(GameMode::Multi);
        let s = select_pair(&s, 0, 1, &config);
        let t = apply(&s, Event::CheckMatch, &config);

        assert_eq!(t.session, s);
        assert_eq!(
            t.effects,
            vec![Effect::Schedule {
                kind: TaskKind::MismatchRollback,
                delay_ms: 1000,
            }]
        );
    }

    #[test]
    fn test_rollback_hides_and_switches_in_multi() {
        let (s, config) = session(GameMode::Multi);
        let s = select_pair(&s, 0, 1, &config);
        let t = apply(&s, Event::RollbackMismatch, &config);

        let next = &t.session;
        assert_eq!(next.phase(), Phase::Idle);
        assert!(!next.is_locked());
        assert!(next.board().tiles().all(|t| !t.revealed));
        assert_eq!(next.active_player(), PlayerId::TWO);
        assert_eq!(next.score(PlayerId::ONE), 0);
        assert_eq!(next.score(PlayerId::TWO), 0);
        assert!(t.effects.contains(&Effect::Notify(Notification::SetActivePlayerLabel(
            "Bo's Turn".into()
        ))));
    }

    #[test]
    fn test_rollback_keeps_player_in_single() {
        let (s, config) = session(GameMode::Single);
        let s = select_pair(&s, 0, 1, &config);
        let t = apply(&s, Event::RollbackMismatch, &config);

        assert_eq!(t.session.active_player(), PlayerId::ONE);
        assert!(!t
            .effects
            .iter()
            .any(|e| matches!(e, Effect::Notify(Notification::SetActivePlayerLabel(_)))));
    }

    #[test]
    fn test_timer_events_without_pair() {
        let (s, config) = session(GameMode::Single);
        assert_eq!(step(&s, Event::CheckMatch, &config), Err(InputError::NothingToEvaluate));
        assert_eq!(
            step(&s, Event::RollbackMismatch, &config),
            Err(InputError::NothingToEvaluate)
        );
    }

    #[test]
    fn test_points_go_to_first_selector() {
        let (s, config) = session(GameMode::Multi);
        let mut s = apply(&s, Event::SelectTile(TileIndex::new(0)), &config).session;
        // Turn changes hands between the two reveals.
        s.active_player = PlayerId::TWO;
        let s = apply(&s, Event::SelectTile(TileIndex::new(2)), &config).session;
        let s = apply(&s, Event::CheckMatch, &config).session;

        assert_eq!(s.score(PlayerId::ONE), 10);
        assert_eq!(s.score(PlayerId::TWO), 0);
    }

    #[test]
    fn test_clearing_board_ends_game() {
        let (s, config) = session(GameMode::Multi);
        let s = select_pair(&s, 0, 2, &config);
        let s = apply(&s, Event::CheckMatch, &config).session;
        let s = select_pair(&s, 1, 3, &config);
        let t = apply(&s, Event::CheckMatch, &config);

        assert!(t.session.board().is_cleared());
        let n = t.effects.len();
        assert_eq!(t.effects[n - 3], Effect::StopCountdown);
        assert_eq!(
            t.effects[n - 2],
            Effect::Notify(Notification::ShowMessage {
                text: "🏆 Game Over! Ana wins!".into(),
                duration_ms: 3000,
            })
        );
        assert_eq!(
            t.effects[n - 1],
            Effect::GameOver(GameOver {
                reason: EndReason::BoardCleared,
                outcome: Outcome::Winner {
                    player: PlayerId::ONE,
                    name: "Ana".into(),
                    score: 20,
                },
            })
        );
    }

    #[test]
    fn test_tick_counts_down() {
        let (s, config) = session(GameMode::Single);
        let t = apply(&s, Event::CountdownTick, &config);

        assert_eq!(t.session.time_remaining(), Some(59));
        assert_eq!(t.effects, vec![Effect::Notify(Notification::SetCountdown(59))]);
    }

    #[test]
    fn test_last_tick_ends_game() {
        let (mut s, config) = session(GameMode::Single);
        s.time_remaining = Some(1);
        s.players[PlayerId::ONE].score = 30;
        let t = apply(&s, Event::CountdownTick, &config);

        assert!(t.is_game_over());
        assert!(t.effects.contains(&Effect::Notify(Notification::ShowMessage {
            text: "⏳ Time's up! You scored 30 points.".into(),
            duration_ms: 3000,
        })));
    }

    #[test]
    fn test_tick_in_untimed_session() {
        let (s, config) = session(GameMode::Multi);
        assert_eq!(
            step(&s, Event::CountdownTick, &config),
            Err(InputError::CountdownInactive)
        );
    }
}
