//! Core types: slots, RNG, configuration, errors and the presenter state.
//!
//! Everything here is shared by the roster manager and the round engine.

pub mod config;
pub mod error;
pub mod rng;
pub mod slot;
pub mod state;

pub use config::{ConfigUpdate, Configuration, DEFAULT_MAX_STEALS, DEFAULT_TIMER_DURATION_SECS};
pub use error::{EngineError, Phase};
pub use rng::{GameRng, GameRngState};
pub use slot::{Slot, SlotMap};
pub use state::PresenterState;
