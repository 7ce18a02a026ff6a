//! Roster and configuration manager.
//!
//! Owns the pre-game player list and settings, and shuffles the roster into
//! a turn order when the game starts.

pub mod setup;

pub(crate) use setup::{can_add_name, is_valid_roster};
pub use setup::{SetupState, MAX_PLAYERS};
