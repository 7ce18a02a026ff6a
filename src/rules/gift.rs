//! Opened gifts and their steal history.

use serde::{Deserialize, Serialize};

use crate::core::{Configuration, Slot};

/// A gift that has been opened.
///
/// Gifts only exist once opened; an unopened seat is `None` in the
/// ownership table.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Gift {
    /// Display label chosen by whoever opened it.
    pub label: String,

    /// Times this gift has been stolen so far.
    pub steals_taken: u32,

    /// Slot that most recently lost this gift.
    pub last_owner: Option<Slot>,
}

impl Gift {
    /// A freshly opened gift.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            steals_taken: 0,
            last_owner: None,
        }
    }

    /// Remaining steals under the given settings.
    #[must_use]
    pub fn steals_left(&self, config: &Configuration) -> u32 {
        config.max_steals.saturating_sub(self.steals_taken)
    }

    /// Check whether the steal cap still allows taking this gift.
    #[must_use]
    pub fn under_steal_cap(&self, config: &Configuration) -> bool {
        self.steals_taken < config.max_steals
    }

    /// Check whether `thief` may take this gift, ignoring whose turn it is.
    ///
    /// With steal-backs disabled, the slot that just lost the gift cannot
    /// take it straight back.
    #[must_use]
    pub fn can_be_stolen_by(&self, thief: Slot, config: &Configuration) -> bool {
        self.under_steal_cap(config)
            && (config.allow_steal_backs || self.last_owner != Some(thief))
    }

    /// The gift as it lands with the thief.
    #[must_use]
    pub(crate) fn stolen_from(&self, victim: Slot) -> Self {
        Self {
            label: self.label.clone(),
            steals_taken: self.steals_taken + 1,
            last_owner: Some(victim),
        }
    }

    /// The gift as it is handed over in a swap, without counting a steal.
    #[must_use]
    pub(crate) fn handed_over_by(&self, giver: Slot) -> Self {
        Self {
            last_owner: Some(giver),
            ..self.clone()
        }
    }
}
