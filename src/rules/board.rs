//! Read-only board view for renderers.
//!
//! One row per slot with everything a player card shows: who sits there,
//! what they hold, whether it is their turn, and whether the current player
//! may steal from them.

use smallvec::SmallVec;

use super::engine::GameState;
use super::gift::Gift;
use crate::core::Slot;

/// One seat on the board.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoardEntry<'a> {
    pub slot: Slot,
    pub name: &'a str,
    pub gift: Option<&'a Gift>,
    /// Steals left on the held gift under the current settings.
    pub steals_left: Option<u32>,
    pub is_current: bool,
    pub is_next: bool,
    /// The current player may steal this seat's gift.
    pub can_steal: bool,
}

/// Steal targets for the current player.
///
/// Most parties fit inline without allocating.
pub type StealTargets = SmallVec<[Slot; 8]>;

impl GameState {
    /// Every seat in turn order.
    #[must_use]
    pub fn board(&self) -> Vec<BoardEntry<'_>> {
        let current = self.current_player();
        let next = self.next_player();

        self.order()
            .iter()
            .zip(Slot::all(self.player_count()))
            .map(|(name, slot)| BoardEntry {
                slot,
                name,
                gift: self.gift(slot),
                steals_left: self.steals_left(slot),
                is_current: current == Some(slot),
                is_next: next == Some(slot),
                can_steal: self.can_steal_gift(slot),
            })
            .collect()
    }

    /// Slots the current player may steal from right now.
    #[must_use]
    pub fn steal_targets(&self) -> StealTargets {
        Slot::all(self.player_count())
            .filter(|&slot| self.can_steal_gift(slot))
            .collect()
    }

    /// Check whether the current player has any legal move at all.
    ///
    /// Opening is always available in the normal phase and passing in the
    /// final swap, so this is only false once the game is done.
    #[must_use]
    pub fn has_moves(&self) -> bool {
        self.can_open_gift() || self.can_pass_turn() || !self.steal_targets().is_empty()
    }
}
