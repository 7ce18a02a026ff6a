//! Round phases and turn pointers.
//!
//! ## Phases
//!
//! - `Normal`: each slot in turn order opens a gift or steals one. A steal
//!   hands the turn to the victim (the steal chain) without moving `next`.
//! - `FinalSwap`: slot 0, who had nobody to steal from on the first turn,
//!   gets one closing chance to steal from anyone or pass.
//! - `Done`: terminal.
//!
//! The pointers live inside the variants, so a finished round cannot carry a
//! stale current player and the final swap has no "next" at all.

use serde::{Deserialize, Serialize};

use crate::core::Slot;

/// Phase tag without pointers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoundType {
    Normal,
    FinalSwap,
    Done,
}

impl std::fmt::Display for RoundType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RoundType::Normal => write!(f, "normal"),
            RoundType::FinalSwap => write!(f, "final swap"),
            RoundType::Done => write!(f, "done"),
        }
    }
}

/// Round phase with its turn pointers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Round {
    /// `current` acts now; `next` takes over after the next opened gift.
    Normal { current: Slot, next: Slot },
    /// Slot 0 is revisited for one last steal or pass.
    FinalSwap { current: Slot },
    Done,
}

impl Round {
    /// Opening round for a game with `player_count` players.
    #[must_use]
    pub fn opening(player_count: usize) -> Self {
        let next = if player_count > 1 { Slot::new(1) } else { Slot::FIRST };
        Round::Normal {
            current: Slot::FIRST,
            next,
        }
    }

    #[must_use]
    pub fn round_type(&self) -> RoundType {
        match self {
            Round::Normal { .. } => RoundType::Normal,
            Round::FinalSwap { .. } => RoundType::FinalSwap,
            Round::Done => RoundType::Done,
        }
    }

    /// Slot whose turn it is, if the round is still running.
    #[must_use]
    pub fn current(&self) -> Option<Slot> {
        match *self {
            Round::Normal { current, .. } | Round::FinalSwap { current } => Some(current),
            Round::Done => None,
        }
    }

    /// Slot that acts after the next opened gift. Only set in `Normal`.
    #[must_use]
    pub fn next(&self) -> Option<Slot> {
        match *self {
            Round::Normal { next, .. } => Some(next),
            Round::FinalSwap { .. } | Round::Done => None,
        }
    }

    #[must_use]
    pub fn is_done(&self) -> bool {
        matches!(self, Round::Done)
    }

    /// Move the turn to the victim of a steal.
    ///
    /// In `Normal` the victim becomes current and `next` is kept. A steal in
    /// the final swap ends the game.
    #[must_use]
    pub fn after_steal(self, victim: Slot) -> Self {
        match self {
            Round::Normal { next, .. } => Round::Normal {
                current: victim,
                next,
            },
            Round::FinalSwap { .. } | Round::Done => Round::Done,
        }
    }

    /// Advance after a gift was opened (or the final swap was passed).
    ///
    /// The wrap back to slot 0 is checked before the last-slot rule. For two
    /// or more players the order makes no difference; for a single player it
    /// sends the lone opener to the final swap instead of opening forever.
    #[must_use]
    pub fn advance(self, player_count: usize) -> Self {
        match self {
            Round::Normal { next, .. } if next == Slot::FIRST => Round::FinalSwap {
                current: Slot::FIRST,
            },
            Round::Normal { next, .. } if next.index() + 1 == player_count => Round::Normal {
                current: next,
                next: Slot::FIRST,
            },
            Round::Normal { next, .. } => Round::Normal {
                current: next,
                next: Slot(next.0 + 1),
            },
            Round::FinalSwap { .. } | Round::Done => Round::Done,
        }
    }
}
