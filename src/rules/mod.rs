//! The round engine.
//!
//! Owns everything that happens once the game starts:
//! - Gift ownership and steal history (`gift`)
//! - Round phases and turn pointers (`round`)
//! - The open/steal/pass transitions (`engine`)
//! - The read-only board view for renderers (`board`)

pub mod board;
pub mod engine;
pub mod gift;
pub mod round;

pub use board::{BoardEntry, StealTargets};
pub use engine::GameState;
pub use gift::Gift;
pub use round::{Round, RoundType};
