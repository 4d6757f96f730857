//! Game controller: the single owner of all game state.
//!
//! The controller turns UI actions into state-machine events, swaps in the
//! resulting session, forwards notifications to the presenter and keeps the
//! scheduler in step with the live session.
//!
//! Time is virtual. A front end calls [`GameController::advance`] with the
//! elapsed milliseconds and every task due in that window fires in order.
//!
//! ```
//! use memory_match::{GameController, RecordingPresenter, StartRequest};
//!
//! let mut game = GameController::with_seed(7, RecordingPresenter::new());
//! game.start(&StartRequest::single("Ana")).unwrap();
//!
//! game.advance(1000);
//! assert_eq!(game.session().and_then(|s| s.time_remaining()), Some(59));
//! ```

use crate::board::{generate, TileFace, TileIndex};
use crate::core::{
    GameConfig, GameMode, GameRng, GameRngState, InputError, Player, PlayerId, PlayerMap,
    StartError,
};
use crate::machine::{step, Effect, Event, GameOver, Transition};
use crate::presentation::{Notification, Presenter};
use crate::schedule::{ScheduledTask, Scheduler, TaskKind};
use crate::session::{GameSession, SessionId};

/// What the intro screen submits when the start button is pressed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StartRequest {
    pub player_one: String,
    /// Ignored in single mode.
    pub player_two: String,
    /// Theme color picked on the intro screen.
    pub theme: Option<String>,
}

impl StartRequest {
    pub fn single(player_one: impl Into<String>) -> Self {
        Self {
            player_one: player_one.into(),
            ..Self::default()
        }
    }

    pub fn multi(player_one: impl Into<String>, player_two: impl Into<String>) -> Self {
        Self {
            player_one: player_one.into(),
            player_two: player_two.into(),
            theme: None,
        }
    }

    #[must_use]
    pub fn with_theme(mut self, color: impl Into<String>) -> Self {
        self.theme = Some(color.into());
        self
    }

    /// Seat the players for `mode`, or say which name is missing.
    pub fn players(&self, mode: GameMode) -> Result<PlayerMap<Player>, StartError> {
        let one = self.player_one.trim();
        if one.is_empty() {
            return Err(StartError::MissingPlayerOneName);
        }

        let mut players = vec![Player::new(one)];
        if mode == GameMode::Multi {
            let two = self.player_two.trim();
            if two.is_empty() {
                return Err(StartError::MissingPlayerTwoName);
            }
            players.push(Player::new(two));
        }
        Ok(PlayerMap::from_vec(players))
    }
}

/// Owns the live session and everything around it.
pub struct GameController<P: Presenter> {
    config: GameConfig,
    rng: GameRng,
    presenter: P,
    scheduler: Scheduler,

    /// Mode picked on the selector; used by the next start.
    mode: GameMode,
    info_visible: bool,

    session: Option<GameSession>,
    last_session_id: SessionId,
}

impl<P: Presenter> GameController<P> {
    /// # Panics
    ///
    /// If `config` fails [`GameConfig::validate`].
    pub fn new(config: GameConfig, rng: GameRng, presenter: P) -> Self {
        config.validate();
        Self {
            config,
            rng,
            presenter,
            scheduler: Scheduler::new(),
            mode: GameMode::default(),
            info_visible: false,
            session: None,
            last_session_id: SessionId::default(),
        }
    }

    /// Default configuration with a seeded RNG.
    pub fn with_seed(seed: u64, presenter: P) -> Self {
        Self::new(GameConfig::default(), GameRng::new(seed), presenter)
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// The live session, if a game is running.
    #[must_use]
    pub fn session(&self) -> Option<&GameSession> {
        self.session.as_ref()
    }

    #[must_use]
    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    #[must_use]
    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    /// Mode the next start will use.
    #[must_use]
    pub fn mode(&self) -> GameMode {
        self.mode
    }

    #[must_use]
    pub fn info_visible(&self) -> bool {
        self.info_visible
    }

    /// RNG checkpoint; restoring it replays the same future boards.
    #[must_use]
    pub fn rng_state(&self) -> GameRngState {
        self.rng.state()
    }

    // === UI actions ===

    /// Start a game in the selected mode.
    ///
    /// On a missing name the message is shown and nothing else changes.
    pub fn start(&mut self, request: &StartRequest) -> Result<SessionId, StartError> {
        let players = match request.players(self.mode) {
            Ok(players) => players,
            Err(err) => {
                tracing::debug!("start refused: {}", err);
                self.show_message(err.to_string());
                return Err(err);
            }
        };

        if let Some(color) = &request.theme {
            self.notify(Notification::ApplyTheme(color.clone()));
        }
        self.notify(Notification::ShowBoard);

        Ok(self.open_session(self.mode, players))
    }

    /// Flip a tile.
    pub fn select_tile(&mut self, index: TileIndex) -> Result<(), InputError> {
        let session = self.session.as_ref().ok_or(InputError::NoSession)?;
        match step(session, Event::SelectTile(index), &self.config) {
            Ok(transition) => {
                self.apply(transition);
                Ok(())
            }
            Err(err) => {
                tracing::debug!("tile {} ignored: {}", index, err);
                Err(err)
            }
        }
    }

    /// Switch the mode selector. A running game keeps its mode.
    pub fn change_mode(&mut self, mode: GameMode) {
        self.mode = mode;
        self.notify(Notification::SetPlayerTwoInputVisible(mode == GameMode::Multi));
        self.show_message(mode.enabled_message().to_string());
    }

    /// Restart the running game with zero scores, a new board and a full timer.
    ///
    /// Returns the new session id, or `None` if no game was running.
    pub fn reset(&mut self) -> Option<SessionId> {
        let Some(session) = &self.session else {
            tracing::debug!("reset ignored: no game in progress");
            return None;
        };
        let mode = session.mode();
        let players = fresh_players(session);
        Some(self.open_session(mode, players))
    }

    /// Show or hide the rules panel. Returns the new visibility.
    pub fn toggle_info_panel(&mut self) -> bool {
        self.info_visible = !self.info_visible;
        self.notify(Notification::SetInfoPanelVisible(self.info_visible));
        self.info_visible
    }

    /// Leave the game. The session and its pending tasks are discarded.
    pub fn return_to_menu(&mut self) {
        if let Some(session) = self.session.take() {
            let dropped = self.scheduler.cancel_session(session.id());
            tracing::info!("{} discarded, {} task(s) cancelled", session.id(), dropped);
        }
        self.notify(Notification::NavigateToMenu);
    }

    /// Let `elapsed_ms` of virtual time pass, firing every task that falls due.
    pub fn advance(&mut self, elapsed_ms: u64) {
        let until = self.scheduler.now_ms().saturating_add(elapsed_ms);
        while let Some(task) = self.scheduler.pop_due(until) {
            self.deliver(task);
        }
        self.scheduler.advance_to(until);
    }

    // === Internals ===

    fn deliver(&mut self, task: ScheduledTask) {
        let Some(session) = self.session.as_ref().filter(|s| s.id() == task.session) else {
            tracing::debug!("dropping stale {:?} for {}", task.kind, task.session);
            return;
        };

        if task.kind == TaskKind::CountdownTick {
            tracing::trace!("countdown tick for {}", task.session);
        }

        match step(session, task.kind.into(), &self.config) {
            Ok(transition) => self.apply(transition),
            Err(err) => tracing::debug!("{:?} ignored: {}", task.kind, err),
        }
    }

    fn apply(&mut self, transition: Transition) {
        let Transition { session, effects } = transition;
        let id = session.id();
        self.session = Some(session);

        for effect in effects {
            match effect {
                Effect::Notify(notification) => self.notify(notification),
                Effect::Schedule { kind, delay_ms } => {
                    self.scheduler.schedule(id, kind, delay_ms);
                }
                Effect::StopCountdown => {
                    self.scheduler.cancel_kind(id, TaskKind::CountdownTick);
                }
                Effect::GameOver(over) => self.finish(over),
            }
        }
    }

    /// Report the result and deal the next session with the same players.
    fn finish(&mut self, over: GameOver) {
        let Some(session) = &self.session else {
            return;
        };
        tracing::info!("{} over ({:?}): {:?}", session.id(), over.reason, over.outcome);

        let mode = session.mode();
        let players = fresh_players(session);
        self.open_session(mode, players);
    }

    /// Replace whatever is running with a freshly dealt session.
    fn open_session(&mut self, mode: GameMode, players: PlayerMap<Player>) -> SessionId {
        if let Some(old) = &self.session {
            self.scheduler.cancel_session(old.id());
        }

        let id = self.last_session_id.next();
        self.last_session_id = id;

        let board = generate(self.config.pair_count, &mut self.rng);
        let session = GameSession::new(id, mode, players, board, &self.config);
        tracing::info!("{} started: {} mode, {} tiles", id, mode, session.board().len());

        self.notify(Notification::SetActivePlayerLabel(session.turn_label()));
        for player in PlayerId::all(session.players().player_count()) {
            self.notify(Notification::SetScore { player, value: 0 });
        }
        for (index, _) in session.board().indexed() {
            self.notify(Notification::RenderTile {
                index,
                face: TileFace::Hidden,
            });
        }

        if let Some(secs) = session.time_remaining() {
            self.notify(Notification::SetCountdown(secs));
            self.scheduler
                .schedule_repeating(id, TaskKind::CountdownTick, self.config.tick_interval_ms);
        }

        self.session = Some(session);
        id
    }

    fn show_message(&mut self, text: String) {
        let duration_ms = self.config.message_duration_ms;
        self.notify(Notification::ShowMessage { text, duration_ms });
    }

    fn notify(&mut self, notification: Notification) {
        notification.dispatch(&mut self.presenter);
    }
}

/// Same names, scores back to zero.
fn fresh_players(session: &GameSession) -> PlayerMap<Player> {
    PlayerMap::from_vec(
        session
            .players()
            .iter()
            .map(|(_, p)| Player::new(p.name.clone()))
            .collect(),
    )
}
