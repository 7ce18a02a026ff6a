//! The round engine: gift ownership and the open/steal/pass transitions.
//!
//! `GameState` is an immutable snapshot. Each verb takes `&self` and returns
//! the next snapshot; the `im` collections underneath make those copies
//! O(1). A verb called while ineligible hands back an unchanged copy, so a
//! UI can probe with the matching `can_*` predicate and still be safe if it
//! calls the verb anyway.

use im::Vector;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::gift::Gift;
use super::round::{Round, RoundType};
use crate::core::{ConfigUpdate, Configuration, EngineError, GameRng, Slot, SlotMap};
use crate::roster::{can_add_name, is_valid_roster, SetupState};

/// In-game state: turn order, gift ownership and round phase.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    /// Roster and settings as they were when the game started.
    setup: SetupState,

    /// Live settings; the settings dialog may change them mid-game.
    config: Configuration,

    /// Player names by slot.
    order: Vector<String>,

    /// Opened gift held by each slot.
    gifts: SlotMap<Option<Gift>>,

    round: Round,
}

impl GameState {
    /// Start a game from a setup snapshot and an already shuffled order.
    pub(crate) fn new(setup: SetupState, order: Vector<String>) -> Self {
        let player_count = order.len();
        Self {
            config: *setup.config(),
            setup,
            order,
            gifts: SlotMap::with_value(player_count, None),
            round: Round::opening(player_count),
        }
    }

    // === Read accessors ===

    /// Settings in force.
    #[must_use]
    pub fn config(&self) -> &Configuration {
        &self.config
    }

    /// The setup this game was started from.
    #[must_use]
    pub fn setup(&self) -> &SetupState {
        &self.setup
    }

    /// Player names in turn order.
    #[must_use]
    pub fn order(&self) -> &Vector<String> {
        &self.order
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.order.len()
    }

    /// Name seated at `slot`.
    #[must_use]
    pub fn player_name(&self, slot: Slot) -> Option<&str> {
        self.order.get(slot.index()).map(String::as_str)
    }

    /// Ownership table.
    #[must_use]
    pub fn gifts(&self) -> &SlotMap<Option<Gift>> {
        &self.gifts
    }

    /// Gift held by `slot`, if any.
    #[must_use]
    pub fn gift(&self, slot: Slot) -> Option<&Gift> {
        self.gifts.get(slot).and_then(Option::as_ref)
    }

    /// Steals left on the gift held by `slot`.
    #[must_use]
    pub fn steals_left(&self, slot: Slot) -> Option<u32> {
        self.gift(slot).map(|gift| gift.steals_left(&self.config))
    }

    /// Number of gifts opened so far.
    #[must_use]
    pub fn opened_count(&self) -> usize {
        self.gifts.values().filter(|g| g.is_some()).count()
    }

    #[must_use]
    pub fn round(&self) -> Round {
        self.round
    }

    #[must_use]
    pub fn round_type(&self) -> RoundType {
        self.round.round_type()
    }

    /// Slot whose turn it is. `None` once the game is done.
    #[must_use]
    pub fn current_player(&self) -> Option<Slot> {
        self.round.current()
    }

    /// Slot up after the next opened gift. Only set in the normal phase.
    #[must_use]
    pub fn next_player(&self) -> Option<Slot> {
        self.round.next()
    }

    #[must_use]
    pub fn is_done(&self) -> bool {
        self.round.is_done()
    }

    // === Open ===

    /// Gifts can only be opened during the normal phase.
    #[must_use]
    pub fn can_open_gift(&self) -> bool {
        self.round_type() == RoundType::Normal
    }

    /// The current player opens a new gift, then the turn advances.
    #[must_use]
    pub fn open_gift(&self, label: impl Into<String>) -> Self {
        let Round::Normal { current, .. } = self.round else {
            trace!(round = %self.round_type(), "open_gift rejected");
            return self.clone();
        };

        let gift = Gift::new(label);
        debug!(%current, label = %gift.label, "gift opened");

        let next = Self {
            gifts: self.gifts.with(current, Some(gift)),
            round: self.round.advance(self.player_count()),
            ..self.clone()
        };
        next.log_phase_change(self);
        next
    }

    // === Steal ===

    /// Check whether the current player may steal the gift held by `target`.
    ///
    /// Out-of-range targets are simply not eligible.
    #[must_use]
    pub fn can_steal_gift(&self, target: Slot) -> bool {
        let Some(current) = self.round.current() else {
            return false;
        };
        if target == current {
            return false;
        }
        self.gift(target)
            .is_some_and(|gift| gift.can_be_stolen_by(current, &self.config))
    }

    /// The current player takes the gift held by `target`.
    ///
    /// The victim receives whatever the thief held (nothing, except during
    /// the final swap) and, in the normal phase, becomes the current player.
    /// A steal during the final swap ends the game.
    ///
    /// # Errors
    ///
    /// `EngineError::SlotOutOfRange` if `target` is not a seat in this game.
    pub fn steal_gift(&self, target: Slot) -> Result<Self, EngineError> {
        if !target.is_valid(self.player_count()) {
            return Err(EngineError::SlotOutOfRange {
                slot: target,
                player_count: self.player_count(),
            });
        }

        let (Some(current), Some(stolen)) = (self.round.current(), self.gift(target)) else {
            trace!(%target, round = %self.round_type(), "steal_gift rejected");
            return Ok(self.clone());
        };
        if !self.can_steal_gift(target) {
            trace!(%current, %target, "steal_gift rejected");
            return Ok(self.clone());
        }

        let taken = stolen.stolen_from(target);
        let handed_back = self.gift(current).map(|gift| gift.handed_over_by(current));
        debug!(
            thief = %current,
            victim = %target,
            label = %taken.label,
            steals_taken = taken.steals_taken,
            "gift stolen"
        );

        let next = Self {
            gifts: self
                .gifts
                .with(current, Some(taken))
                .with(target, handed_back),
            round: self.round.after_steal(target),
            ..self.clone()
        };
        next.log_phase_change(self);
        Ok(next)
    }

    // === Pass ===

    /// Only the final-swap holder may pass.
    #[must_use]
    pub fn can_pass_turn(&self) -> bool {
        self.round_type() == RoundType::FinalSwap
    }

    /// Decline the final swap, ending the game.
    #[must_use]
    pub fn pass_turn(&self) -> Self {
        if !self.can_pass_turn() {
            trace!(round = %self.round_type(), "pass_turn rejected");
            return self.clone();
        }

        let next = Self {
            round: self.round.advance(self.player_count()),
            ..self.clone()
        };
        next.log_phase_change(self);
        next
    }

    // === Settings and resets ===

    /// Change one setting mid-game.
    ///
    /// Opened gifts keep their steal counts; a new cap only affects future
    /// eligibility.
    #[must_use]
    pub fn update_config(&self, update: ConfigUpdate) -> Self {
        match self.config.updated(update) {
            Some(config) => {
                debug!(field = update.field(), "configuration updated mid-game");
                Self {
                    config,
                    ..self.clone()
                }
            }
            None => {
                trace!(?update, "rejected configuration update");
                self.clone()
            }
        }
    }

    /// Replace the settings wholesale. Invalid configurations are ignored.
    #[must_use]
    pub fn with_config(&self, config: Configuration) -> Self {
        if !config.is_valid() {
            return self.clone();
        }
        Self {
            config,
            ..self.clone()
        }
    }

    /// Abandon the game and return to setup.
    ///
    /// The roster comes back in its original display order; settings changed
    /// mid-game are kept.
    #[must_use]
    pub fn reset_game(&self) -> SetupState {
        debug!("game reset");
        self.setup.with_config(self.config)
    }

    /// Take every gift back and restart the round, keeping the turn order.
    #[must_use]
    pub fn reset_gifts(&self) -> Self {
        debug!("gifts reset");
        Self {
            gifts: SlotMap::with_value(self.player_count(), None),
            round: Round::opening(self.player_count()),
            ..self.clone()
        }
    }

    /// The order may be reshuffled until the first gift is opened.
    #[must_use]
    pub fn can_reshuffle_order(&self) -> bool {
        self.round == Round::opening(self.player_count()) && self.opened_count() == 0
    }

    /// Draw a fresh turn order.
    #[must_use]
    pub fn reshuffle_order(&self, rng: &mut GameRng) -> Self {
        if !self.can_reshuffle_order() {
            trace!("reshuffle_order rejected: gifts already opened");
            return self.clone();
        }

        let mut order: Vec<String> = self.order.iter().cloned().collect();
        rng.shuffle(&mut order);
        debug!("turn order reshuffled");
        Self {
            order: order.into_iter().collect(),
            ..self.clone()
        }
    }

    /// Late arrivals may join while gifts are still being opened.
    #[must_use]
    pub fn can_add_late_player(&self, name: &str) -> bool {
        self.round_type() == RoundType::Normal && can_add_name(&self.order, name)
    }

    /// Seat a late arrival in a new last slot.
    ///
    /// If the turn pointer had already wrapped to slot 0, the newcomer is
    /// slotted in as next so they still open before the final swap.
    #[must_use]
    pub fn add_late_player(&self, name: impl Into<String>) -> Self {
        let name = name.into();
        let (Round::Normal { current, next }, Some(slot)) =
            (self.round, Slot::from_index(self.player_count()))
        else {
            trace!(%name, "add_late_player rejected");
            return self.clone();
        };
        if !self.can_add_late_player(&name) {
            trace!(%name, "add_late_player rejected");
            return self.clone();
        }

        let next = if next == Slot::FIRST { slot } else { next };
        debug!(%name, %slot, "late player seated");

        let mut order = self.order.clone();
        order.push_back(name.clone());
        Self {
            setup: self.setup.add_player(name),
            order,
            gifts: self.gifts.pushed(None),
            round: Round::Normal { current, next },
            ..self.clone()
        }
    }

    // === Internal ===

    fn log_phase_change(&self, previous: &Self) {
        if self.round_type() != previous.round_type() {
            debug!(from = %previous.round_type(), to = %self.round_type(), "round phase changed");
        }
    }

    /// Check the structural invariants a decoded snapshot must satisfy.
    pub(crate) fn check_structure(&self) -> Result<(), String> {
        let player_count = self.player_count();
        if player_count == 0 {
            return Err("game has no players".into());
        }
        if self.gifts.len() != player_count {
            return Err(format!(
                "gift table has {} slots for {} players",
                self.gifts.len(),
                player_count
            ));
        }
        if !self.config.is_valid() {
            return Err("configuration out of range".into());
        }

        if !is_valid_roster(&self.order) {
            return Err("turn order has empty or duplicate names".into());
        }
        if !is_valid_roster(self.setup.players()) {
            return Err("roster has empty or duplicate names".into());
        }
        let seated: FxHashSet<&str> = self.order.iter().map(String::as_str).collect();
        let roster_matches = self.setup.players().len() == player_count
            && self
                .setup
                .players()
                .iter()
                .all(|name| seated.contains(name.as_str()));
        if !roster_matches {
            return Err("turn order does not match the roster".into());
        }

        for (slot, gift) in self.gifts.iter() {
            let stale_owner = gift
                .as_ref()
                .and_then(|g| g.last_owner)
                .is_some_and(|owner| !owner.is_valid(player_count));
            if stale_owner {
                return Err(format!("gift at {slot} names a missing previous owner"));
            }
        }

        match self.round {
            Round::Normal { current, next } => {
                if !current.is_valid(player_count) || !next.is_valid(player_count) {
                    return Err("turn pointer out of range".into());
                }
                if self.gift(current).is_some() {
                    return Err(format!("current player {current} already holds a gift"));
                }
            }
            Round::FinalSwap { current } => {
                if current != Slot::FIRST {
                    return Err(format!("final swap revisits {current} instead of slot 0"));
                }
            }
            Round::Done => {}
        }
        if !self.can_open_gift() && self.opened_count() != player_count {
            return Err(format!(
                "{} round with {} of {} gifts opened",
                self.round_type(),
                self.opened_count(),
                player_count
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game(names: &[&str], config: Configuration) -> GameState {
        let setup = SetupState::from_parts(config, names.iter().copied());
        let order = setup.players().clone();
        GameState::new(setup, order)
    }

    #[test]
    fn test_open_assigns_gift_and_advances() {
        let state = game(&["A", "B", "C"], Configuration::default());
        let state = state.open_gift("Socks");

        assert_eq!(state.gift(Slot::new(0)).map(|g| g.label.as_str()), Some("Socks"));
        assert_eq!(state.current_player(), Some(Slot::new(1)));
        assert_eq!(state.next_player(), Some(Slot::new(2)));
    }

    #[test]
    fn test_steal_moves_gift_and_hands_turn_to_victim() {
        let state = game(&["A", "B", "C"], Configuration::default())
            .open_gift("Socks")
            .open_gift("Candle");
        assert_eq!(state.current_player(), Some(Slot::new(2)));

        let state = state.steal_gift(Slot::new(0)).unwrap();
        let taken = state.gift(Slot::new(2)).unwrap();
        assert_eq!(taken.label, "Socks");
        assert_eq!(taken.steals_taken, 1);
        assert_eq!(taken.last_owner, Some(Slot::new(0)));
        assert!(state.gift(Slot::new(0)).is_none());
        assert_eq!(state.current_player(), Some(Slot::new(0)));
        assert_eq!(state.next_player(), Some(Slot::FIRST));
    }

    #[test]
    fn test_cannot_steal_own_or_missing_gift() {
        let state = game(&["A", "B", "C"], Configuration::default()).open_gift("Socks");

        assert!(!state.can_steal_gift(Slot::new(1)));
        assert!(!state.can_steal_gift(Slot::new(2)));
        assert!(!state.can_steal_gift(Slot::new(9)));
        assert_eq!(state.steal_gift(Slot::new(2)).unwrap(), state);
    }

    #[test]
    fn test_steal_out_of_range_is_contract_violation() {
        let state = game(&["A", "B"], Configuration::default());

        assert_eq!(
            state.steal_gift(Slot::new(2)),
            Err(EngineError::SlotOutOfRange {
                slot: Slot::new(2),
                player_count: 2,
            })
        );
    }

    #[test]
    fn test_pass_only_in_final_swap() {
        let state = game(&["A", "B"], Configuration::default());
        assert!(!state.can_pass_turn());
        assert_eq!(state.pass_turn(), state);

        let state = state.open_gift("Socks").open_gift("Candle");
        assert!(state.can_pass_turn());
        assert!(state.pass_turn().is_done());
    }

    #[test]
    fn test_mid_game_cap_change_keeps_counts() {
        let state = game(&["A", "B", "C"], Configuration::default())
            .open_gift("Socks")
            .steal_gift(Slot::new(0))
            .unwrap();
        let state = state.update_config(ConfigUpdate::MaxSteals(1));

        assert_eq!(state.gift(Slot::new(1)).unwrap().steals_taken, 1);
        assert_eq!(state.steals_left(Slot::new(1)), Some(0));
        assert!(!state.can_steal_gift(Slot::new(1)));
    }

    #[test]
    fn test_reset_game_restores_roster_and_keeps_settings() {
        let state = game(&["A", "B"], Configuration::default())
            .open_gift("Socks")
            .update_config(ConfigUpdate::TimerEnabled(true));

        let setup = state.reset_game();
        assert_eq!(setup.players().len(), 2);
        assert!(setup.config().timer_enabled);
    }

    #[test]
    fn test_reset_gifts_restarts_round() {
        let state = game(&["A", "B", "C"], Configuration::default())
            .open_gift("Socks")
            .open_gift("Candle");

        let reset = state.reset_gifts();
        assert_eq!(reset.opened_count(), 0);
        assert_eq!(reset.round(), Round::opening(3));
        assert_eq!(reset.order(), state.order());
    }

    #[test]
    fn test_reshuffle_only_before_first_gift() {
        let state = game(&["A", "B", "C", "D", "E"], Configuration::default());
        assert!(state.can_reshuffle_order());

        let reshuffled = state.reshuffle_order(&mut GameRng::new(3));
        let mut before: Vec<_> = state.order().iter().cloned().collect();
        let mut after: Vec<_> = reshuffled.order().iter().cloned().collect();
        before.sort();
        after.sort();
        assert_eq!(before, after);

        let opened = state.open_gift("Socks");
        assert!(!opened.can_reshuffle_order());
        assert_eq!(opened.reshuffle_order(&mut GameRng::new(3)), opened);
    }

    #[test]
    fn test_late_player_after_wrap_becomes_next() {
        let state = game(&["A", "B"], Configuration::default()).open_gift("Socks");
        assert_eq!(state.next_player(), Some(Slot::FIRST));

        let state = state.add_late_player("C");
        assert_eq!(state.player_count(), 3);
        assert_eq!(state.next_player(), Some(Slot::new(2)));

        let state = state.open_gift("Candle");
        assert_eq!(state.current_player(), Some(Slot::new(2)));
        assert_eq!(state.next_player(), Some(Slot::FIRST));

        let state = state.open_gift("Mug");
        assert_eq!(state.round_type(), RoundType::FinalSwap);
        assert_eq!(state.setup().players().len(), 3);
    }

    #[test]
    fn test_late_player_rejected_after_normal_phase() {
        let state = game(&["A"], Configuration::default()).open_gift("Socks");
        assert_eq!(state.round_type(), RoundType::FinalSwap);
        assert_eq!(state.add_late_player("B"), state);

        let state = game(&["A", "B"], Configuration::default());
        assert_eq!(state.add_late_player("A"), state);
        assert_eq!(state.add_late_player(""), state);
    }

    #[test]
    fn test_check_structure() {
        let state = game(&["A", "B"], Configuration::default()).open_gift("Socks");
        assert_eq!(state.check_structure(), Ok(()));

        let broken = GameState {
            round: Round::Normal {
                current: Slot::FIRST,
                next: Slot::new(1),
            },
            ..state.clone()
        };
        assert!(broken.check_structure().is_err());

        let broken = GameState {
            round: Round::FinalSwap { current: Slot::new(1) },
            ..state
        };
        assert!(broken.check_structure().is_err());
    }

    #[test]
    fn test_check_structure_requires_every_gift_after_normal() {
        let state = game(&["A", "B", "C"], Configuration::default())
            .open_gift("Socks")
            .open_gift("Candle")
            .open_gift("Mug");
        assert_eq!(state.check_structure(), Ok(()));

        let emptied = GameState {
            gifts: state.gifts.with(Slot::new(1), None),
            ..state.clone()
        };
        assert!(emptied.check_structure().is_err());

        let done = state.pass_turn();
        let emptied = GameState {
            gifts: done.gifts.with(Slot::new(2), None),
            ..done
        };
        assert!(emptied.check_structure().is_err());
    }

    #[test]
    fn test_check_structure_requires_matching_roster() {
        let state = game(&["A", "B"], Configuration::default());

        let reordered = GameState {
            setup: SetupState::from_parts(Configuration::default(), ["B", "A"]),
            ..state.clone()
        };
        assert_eq!(reordered.check_structure(), Ok(()));

        // Roster edits always dedupe, so build the stored form directly.
        let setup: SetupState = serde_json::from_value(serde_json::json!({
            "configuration": Configuration::default(),
            "players": ["A", "B", "A"],
        }))
        .unwrap();
        let duplicated = GameState {
            setup,
            ..state.clone()
        };
        assert!(duplicated.check_structure().is_err());

        let shorter = GameState {
            setup: SetupState::from_parts(Configuration::default(), ["A"]),
            ..state
        };
        assert!(shorter.check_structure().is_err());
    }
}
