//! # white-elephant
//!
//! Round engine for the White Elephant gift-exchange game.
//!
//! Players take turns opening a new gift or stealing an opened one. A player
//! who loses a gift immediately takes the turn (the steal chain), and the
//! first opener gets one closing chance to steal after everyone else has
//! gone (the final swap).
//!
//! ## Design Principles
//!
//! 1. **Immutable snapshots**: every verb takes `&self` and returns the next
//!    state. Persistent `im` collections keep those copies O(1).
//!
//! 2. **Probe, then act**: each verb has a `can_*` predicate. A verb called
//!    while ineligible returns the state unchanged; only caller bugs
//!    (wrong phase, nonexistent seat) produce an `EngineError`.
//!
//! 3. **Injected randomness**: shuffles draw from a seeded `GameRng`, so a
//!    game replays exactly under the same seed.
//!
//! ## Example
//!
//! ```
//! use white_elephant::{ConfigUpdate, GameRng, PresenterState, RoundType, Slot};
//!
//! let mut rng = GameRng::new(7);
//! let state = PresenterState::new()
//!     .add_player("Alice")?
//!     .add_player("Bob")?
//!     .update_config(ConfigUpdate::MaxSteals(1))
//!     .start_game(&mut rng)?
//!     .open_gift("Socks")?
//!     .open_gift("Candle")?;
//!
//! let game = state.as_game().unwrap();
//! assert_eq!(game.round_type(), RoundType::FinalSwap);
//! assert_eq!(game.current_player(), Some(Slot::new(0)));
//!
//! let state = state.steal_gift(Slot::new(1))?;
//! assert!(state.as_game().unwrap().is_done());
//! # Ok::<(), white_elephant::EngineError>(())
//! ```
//!
//! ## Modules
//!
//! - `core`: slots, RNG, configuration, errors, presenter state
//! - `roster`: pre-game roster and settings
//! - `rules`: the round engine and board view
//! - `persist`: JSON and binary snapshots

pub mod core;
pub mod persist;
pub mod roster;
pub mod rules;

// Re-export commonly used types
pub use crate::core::{
    ConfigUpdate, Configuration, EngineError, GameRng, GameRngState, Phase, PresenterState, Slot,
    SlotMap,
};

pub use crate::roster::SetupState;

pub use crate::rules::{BoardEntry, GameState, Gift, Round, RoundType, StealTargets};

pub use crate::persist::PersistError;
