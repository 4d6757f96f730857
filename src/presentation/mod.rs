//! Presentation adapter: the external collaborator the core writes to.
//!
//! The core owns no UI state. It describes every visible change as a
//! [`Notification`] and hands it to a [`Presenter`]. A browser front end
//! would implement `Presenter` over the DOM; tests use
//! [`RecordingPresenter`].

use serde::{Deserialize, Serialize};

use crate::board::{TileFace, TileIndex};
use crate::core::PlayerId;

/// A side-effecting update for the presenter.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Notification {
    /// Hide the intro screen and show the play area.
    ShowBoard,
    /// Apply the theme color picked on the intro screen.
    ApplyTheme(String),
    RenderTile { index: TileIndex, face: TileFace },
    SetActivePlayerLabel(String),
    SetScore { player: PlayerId, value: u32 },
    SetCountdown(u32),
    ShowMessage { text: String, duration_ms: u64 },
    SetPlayerTwoInputVisible(bool),
    SetInfoPanelVisible(bool),
    NavigateToMenu,
}

impl Notification {
    /// Forward this notification to the matching presenter call.
    pub fn dispatch<P: Presenter + ?Sized>(&self, presenter: &mut P) {
        match self {
            Notification::ShowBoard => presenter.show_board(),
            Notification::ApplyTheme(color) => presenter.apply_theme(color),
            Notification::RenderTile { index, face } => presenter.render(*index, *face),
            Notification::SetActivePlayerLabel(label) => presenter.set_active_player_label(label),
            Notification::SetScore { player, value } => presenter.set_score(*player, *value),
            Notification::SetCountdown(value) => presenter.set_countdown(*value),
            Notification::ShowMessage { text, duration_ms } => {
                presenter.show_transient_message(text, *duration_ms)
            }
            Notification::SetPlayerTwoInputVisible(visible) => {
                presenter.set_player_two_input_visible(*visible)
            }
            Notification::SetInfoPanelVisible(visible) => {
                presenter.set_info_panel_visible(*visible)
            }
            Notification::NavigateToMenu => presenter.navigate_to_menu(),
        }
    }
}

/// Sink for visible changes.
///
/// The required methods are the ones gameplay depends on. The provided
/// ones cover menu chrome and default to doing nothing.
pub trait Presenter {
    fn render(&mut self, index: TileIndex, face: TileFace);

    fn set_active_player_label(&mut self, label: &str);

    fn set_score(&mut self, player: PlayerId, value: u32);

    fn set_countdown(&mut self, value: u32);

    fn show_transient_message(&mut self, text: &str, duration_ms: u64);

    fn navigate_to_menu(&mut self);

    fn show_board(&mut self) {}

    fn apply_theme(&mut self, _color: &str) {}

    fn set_player_two_input_visible(&mut self, _visible: bool) {}

    fn set_info_panel_visible(&mut self, _visible: bool) {}
}

/// Presenter that keeps every notification it receives, in order.
#[derive(Clone, Debug, Default)]
pub struct RecordingPresenter {
    log: Vec<Notification>,
}

impl RecordingPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything received so far.
    #[must_use]
    pub fn notifications(&self) -> &[Notification] {
        &self.log
    }

    /// Text of every transient message, oldest first.
    #[must_use]
    pub fn messages(&self) -> Vec<&str> {
        self.log
            .iter()
            .filter_map(|n| match n {
                Notification::ShowMessage { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Most recent score shown for a player.
    #[must_use]
    pub fn last_score(&self, player: PlayerId) -> Option<u32> {
        self.log.iter().rev().find_map(|n| match n {
            Notification::SetScore { player: p, value } if *p == player => Some(*value),
            _ => None,
        })
    }

    /// Most recent countdown value shown.
    #[must_use]
    pub fn last_countdown(&self) -> Option<u32> {
        self.log.iter().rev().find_map(|n| match n {
            Notification::SetCountdown(value) => Some(*value),
            _ => None,
        })
    }

    /// Drain the log.
    pub fn take(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.log)
    }
}

impl Presenter for RecordingPresenter {
    fn render(&mut self, index: TileIndex, face: TileFace) {
        self.log.push(Notification::RenderTile { index, face });
    }

    fn set_active_player_label(&mut self, label: &str) {
        self.log.push(Notification::SetActivePlayerLabel(label.to_string()));
    }

    fn set_score(&mut self, player: PlayerId, value: u32) {
        self.log.push(Notification::SetScore { player, value });
    }

    fn set_countdown(&mut self, value: u32) {
        self.log.push(Notification::SetCountdown(value));
    }

    fn show_transient_message(&mut self, text: &str, duration_ms: u64) {
        self.log.push(Notification::ShowMessage {
            text: text.to_string(),
            duration_ms,
        });
    }

    fn navigate_to_menu(&mut self) {
        self.log.push(Notification::NavigateToMenu);
    }

    fn show_board(&mut self) {
        self.log.push(Notification::ShowBoard);
    }

    fn apply_theme(&mut self, color: &str) {
        self.log.push(Notification::ApplyTheme(color.to_string()));
    }

    fn set_player_two_input_visible(&mut self, visible: bool) {
        self.log.push(Notification::SetPlayerTwoInputVisible(visible));
    }

    fn set_info_panel_visible(&mut self, visible: bool) {
        self.log.push(Notification::SetInfoPanelVisible(visible));
    }
}
