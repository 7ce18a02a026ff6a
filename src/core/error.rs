//! Contract-violation errors.
//!
//! Rejected player actions (stealing a capped gift, opening during the final
//! swap) are not errors: those verbs return the state unchanged. `EngineError`
//! is reserved for caller bugs, such as driving a game verb while still in
//! setup or naming a slot that does not exist.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::Slot;

/// Top-level phase of the presenter state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Editing the roster and settings.
    Setup,
    /// A game is in progress (or finished but not yet reset).
    Game,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::Setup => write!(f, "setup"),
            Phase::Game => write!(f, "game"),
        }
    }
}

/// Errors signalling a caller bug.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("`{operation}` is not available during {phase}")]
    WrongPhase {
        operation: &'static str,
        phase: Phase,
    },
    #[error("{slot} is out of range for a {player_count}-player game")]
    SlotOutOfRange { slot: Slot, player_count: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = EngineError::WrongPhase {
            operation: "open_gift",
            phase: Phase::Setup,
        };
        assert_eq!(err.to_string(), "`open_gift` is not available during setup");

        let err = EngineError::SlotOutOfRange {
            slot: Slot::new(4),
            player_count: 3,
        };
        assert_eq!(err.to_string(), "Slot 4 is out of range for a 3-player game");
    }
}
