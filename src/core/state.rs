//! Presenter state: the single value an application holds.
//!
//! ## Setup
//!
//! Roster editing and settings, owned by the roster manager.
//!
//! ## Game
//!
//! Turn order, gift ownership and round phase, owned by the round engine.
//!
//! Verbs are routed to whichever component owns the current phase. Calling a
//! setup verb on a running game (or a game verb during setup) is a caller bug
//! and returns `EngineError::WrongPhase`; everything else follows the owning
//! component's no-op rules.

use serde::{Deserialize, Serialize};

use super::config::{ConfigUpdate, Configuration};
use super::error::{EngineError, Phase};
use super::rng::GameRng;
use super::slot::Slot;
use crate::roster::SetupState;
use crate::rules::GameState;

/// Setup or in-game state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PresenterState {
    Setup(SetupState),
    Game(GameState),
}

impl Default for PresenterState {
    fn default() -> Self {
        PresenterState::Setup(SetupState::default())
    }
}

impl From<SetupState> for PresenterState {
    fn from(state: SetupState) -> Self {
        PresenterState::Setup(state)
    }
}

impl From<GameState> for PresenterState {
    fn from(state: GameState) -> Self {
        PresenterState::Game(state)
    }
}

impl PresenterState {
    /// Empty roster with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        match self {
            PresenterState::Setup(_) => Phase::Setup,
            PresenterState::Game(_) => Phase::Game,
        }
    }

    #[must_use]
    pub fn as_setup(&self) -> Option<&SetupState> {
        match self {
            PresenterState::Setup(state) => Some(state),
            PresenterState::Game(_) => None,
        }
    }

    #[must_use]
    pub fn as_game(&self) -> Option<&GameState> {
        match self {
            PresenterState::Game(state) => Some(state),
            PresenterState::Setup(_) => None,
        }
    }

    /// Settings in force for either phase.
    #[must_use]
    pub fn config(&self) -> &Configuration {
        match self {
            PresenterState::Setup(state) => state.config(),
            PresenterState::Game(state) => state.config(),
        }
    }

    // === Setup verbs ===

    /// # Errors
    ///
    /// `WrongPhase` during a game.
    pub fn add_player(&self, name: impl Into<String>) -> Result<Self, EngineError> {
        self.in_setup("add_player", |state| state.add_player(name).into())
    }

    /// # Errors
    ///
    /// `WrongPhase` during a game.
    pub fn remove_player(&self, name: &str) -> Result<Self, EngineError> {
        self.in_setup("remove_player", |state| state.remove_player(name).into())
    }

    /// Only a setup with at least one player can start.
    #[must_use]
    pub fn can_start_game(&self) -> bool {
        self.as_setup().is_some_and(SetupState::can_start_game)
    }

    /// Shuffle the roster and start playing. An empty roster stays in setup.
    ///
    /// # Errors
    ///
    /// `WrongPhase` if a game is already running.
    pub fn start_game(&self, rng: &mut GameRng) -> Result<Self, EngineError> {
        self.in_setup("start_game", |state| match state.start_game(rng) {
            Some(game) => game.into(),
            None => state.clone().into(),
        })
    }

    // === Verbs valid in both phases ===

    /// Change one setting, in setup or through the in-game settings dialog.
    #[must_use]
    pub fn update_config(&self, update: ConfigUpdate) -> Self {
        match self {
            PresenterState::Setup(state) => state.update_config(update).into(),
            PresenterState::Game(state) => state.update_config(update).into(),
        }
    }

    /// Replace all settings at once. Invalid configurations are ignored.
    #[must_use]
    pub fn set_config(&self, config: Configuration) -> Self {
        match self {
            PresenterState::Setup(state) => state.with_config(config).into(),
            PresenterState::Game(state) => state.with_config(config).into(),
        }
    }

    /// Discard everything and start over with defaults.
    #[must_use]
    pub fn reset_all(&self) -> Self {
        tracing::debug!("all data reset");
        Self::default()
    }

    // === Game verbs ===

    /// # Errors
    ///
    /// `WrongPhase` during setup.
    pub fn open_gift(&self, label: impl Into<String>) -> Result<Self, EngineError> {
        self.in_game("open_gift", |state| Ok(state.open_gift(label).into()))
    }

    /// # Errors
    ///
    /// `WrongPhase` during setup, `SlotOutOfRange` for a seat that does not
    /// exist.
    pub fn steal_gift(&self, target: Slot) -> Result<Self, EngineError> {
        self.in_game("steal_gift", |state| state.steal_gift(target).map(Into::into))
    }

    /// # Errors
    ///
    /// `WrongPhase` during setup.
    pub fn pass_turn(&self) -> Result<Self, EngineError> {
        self.in_game("pass_turn", |state| Ok(state.pass_turn().into()))
    }

    /// Abandon the game and return to setup.
    ///
    /// # Errors
    ///
    /// `WrongPhase` during setup.
    pub fn reset_game(&self) -> Result<Self, EngineError> {
        self.in_game("reset_game", |state| Ok(state.reset_game().into()))
    }

    /// # Errors
    ///
    /// `WrongPhase` during setup.
    pub fn reset_gifts(&self) -> Result<Self, EngineError> {
        self.in_game("reset_gifts", |state| Ok(state.reset_gifts().into()))
    }

    /// # Errors
    ///
    /// `WrongPhase` during setup.
    pub fn reshuffle_order(&self, rng: &mut GameRng) -> Result<Self, EngineError> {
        self.in_game("reshuffle_order", |state| Ok(state.reshuffle_order(rng).into()))
    }

    /// # Errors
    ///
    /// `WrongPhase` during setup; use `add_player` there.
    pub fn add_late_player(&self, name: impl Into<String>) -> Result<Self, EngineError> {
        self.in_game("add_late_player", |state| Ok(state.add_late_player(name).into()))
    }

    // === Routing ===

    fn in_setup(
        &self,
        operation: &'static str,
        f: impl FnOnce(&SetupState) -> Self,
    ) -> Result<Self, EngineError> {
        match self {
            PresenterState::Setup(state) => Ok(f(state)),
            PresenterState::Game(_) => Err(EngineError::WrongPhase {
                operation,
                phase: Phase::Game,
            }),
        }
    }

    fn in_game(
        &self,
        operation: &'static str,
        f: impl FnOnce(&GameState) -> Result<Self, EngineError>,
    ) -> Result<Self, EngineError> {
        match self {
            PresenterState::Game(state) => f(state),
            PresenterState::Setup(_) => Err(EngineError::WrongPhase {
                operation,
                phase: Phase::Setup,
            }),
        }
    }
}
