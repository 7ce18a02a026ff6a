//! Pre-game roster and settings.

use im::Vector;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::{ConfigUpdate, Configuration, GameRng};
use crate::rules::GameState;

/// Largest roster a game can seat; every player needs a `Slot`.
pub const MAX_PLAYERS: usize = u16::MAX as usize;

/// Check whether `name` may join a roster that already holds `players`.
///
/// Names must be non-empty and unique. Shared by setup and late arrivals.
pub(crate) fn can_add_name(players: &Vector<String>, name: &str) -> bool {
    !name.is_empty() && players.len() < MAX_PLAYERS && !players.iter().any(|p| p == name)
}

/// Check that a stored roster holds only non-empty, unique names and fits
/// the seat limit.
pub(crate) fn is_valid_roster(players: &Vector<String>) -> bool {
    let mut seen = FxHashSet::default();
    players.len() <= MAX_PLAYERS
        && players
            .iter()
            .all(|name| !name.is_empty() && seen.insert(name.as_str()))
}

/// Setup-phase state: the roster in display order and the settings.
///
/// Every operation returns a new value; rejected operations return a copy of
/// the unchanged state.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetupState {
    configuration: Configuration,
    players: Vector<String>,
}

impl SetupState {
    /// Create an empty roster with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a roster from existing parts.
    ///
    /// Empty and duplicate names are dropped, keeping the first occurrence.
    #[must_use]
    pub fn from_parts<I, S>(configuration: Configuration, players: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let empty = Self {
            configuration,
            players: Vector::new(),
        };
        players
            .into_iter()
            .fold(empty, |state, name| state.add_player(name))
    }

    /// Current settings.
    #[must_use]
    pub fn config(&self) -> &Configuration {
        &self.configuration
    }

    /// Players in display (insertion) order.
    #[must_use]
    pub fn players(&self) -> &Vector<String> {
        &self.players
    }

    /// Add a player to the end of the roster.
    ///
    /// Empty or duplicate names are ignored.
    #[must_use]
    pub fn add_player(&self, name: impl Into<String>) -> Self {
        let name = name.into();
        if !can_add_name(&self.players, &name) {
            trace!(%name, "rejected player name");
            return self.clone();
        }

        debug!(%name, "player added");
        let mut next = self.clone();
        next.players.push_back(name);
        next
    }

    /// Remove every occurrence of `name`. Absent names are ignored.
    #[must_use]
    pub fn remove_player(&self, name: &str) -> Self {
        let mut next = self.clone();
        next.players.retain(|p| p != name);
        if next.players.len() != self.players.len() {
            debug!(%name, "player removed");
        }
        next
    }

    /// Change one setting. Out-of-range values leave the settings unchanged.
    #[must_use]
    pub fn update_config(&self, update: ConfigUpdate) -> Self {
        match self.configuration.updated(update) {
            Some(configuration) => {
                debug!(field = update.field(), "configuration updated");
                Self {
                    configuration,
                    players: self.players.clone(),
                }
            }
            None => {
                trace!(?update, "rejected configuration update");
                self.clone()
            }
        }
    }

    /// Replace the settings wholesale, as the settings dialog does.
    ///
    /// Invalid configurations are ignored.
    #[must_use]
    pub fn with_config(&self, configuration: Configuration) -> Self {
        if !configuration.is_valid() {
            return self.clone();
        }
        Self {
            configuration,
            players: self.players.clone(),
        }
    }

    /// A game needs at least one player.
    #[must_use]
    pub fn can_start_game(&self) -> bool {
        !self.players.is_empty()
    }

    /// Shuffle the roster into a turn order and start the first round.
    ///
    /// Returns `None` when the roster is empty.
    #[must_use]
    pub fn start_game(&self, rng: &mut GameRng) -> Option<GameState> {
        if !self.can_start_game() {
            trace!("start_game rejected: empty roster");
            return None;
        }

        let mut order: Vec<String> = self.players.iter().cloned().collect();
        rng.shuffle(&mut order);
        debug!(players = order.len(), seed = rng.seed(), "game started");

        Some(GameState::new(self.clone(), order.into_iter().collect()))
    }
}
