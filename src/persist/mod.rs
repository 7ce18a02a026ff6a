//! Save and restore the presenter state.
//!
//! The engine never touches storage itself. A host saves a snapshot after
//! every transition and restores it on load:
//!
//! - `serialize` / `deserialize`: JSON text blob for browser-style key/value
//!   storage. A blob that fails to parse, or parses into a state that breaks
//!   the engine's invariants, is treated as absent.
//! - `to_bytes` / `from_bytes`: compact bincode snapshot with the same
//!   validation, reporting why a snapshot was refused.
//!
//! ```
//! use white_elephant::{persist, PresenterState};
//!
//! let state = PresenterState::new().add_player("Alice").unwrap();
//! let blob = persist::serialize(&state).unwrap();
//!
//! assert_eq!(persist::deserialize(&blob), Some(state));
//! assert_eq!(persist::deserialize("not json"), None);
//! ```

use thiserror::Error;
use tracing::warn;

use crate::core::PresenterState;
use crate::roster::is_valid_roster;

/// Why a snapshot could not be restored.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("malformed JSON snapshot: {0}")]
    Json(#[from] serde_json::Error),
    #[error("malformed binary snapshot: {0}")]
    Binary(#[from] bincode::Error),
    #[error("snapshot violates game invariants: {0}")]
    Invalid(String),
}

/// Encode the state as a JSON text blob.
///
/// # Errors
///
/// `PersistError::Json` if the value cannot be encoded. A host should keep
/// its previous save rather than store an empty blob.
pub fn serialize(state: &PresenterState) -> Result<String, PersistError> {
    Ok(serde_json::to_string(state)?)
}

/// Decode a JSON text blob, or `None` if it is malformed or invalid.
#[must_use]
pub fn deserialize(blob: &str) -> Option<PresenterState> {
    match decode_json(blob) {
        Ok(state) => Some(state),
        Err(err) => {
            warn!(%err, "discarding saved state");
            None
        }
    }
}

/// Restore from an optional saved blob, falling back to a fresh state.
#[must_use]
pub fn load_or_default(blob: Option<&str>) -> PresenterState {
    blob.and_then(deserialize).unwrap_or_default()
}

/// Decode a JSON text blob, reporting why it was refused.
///
/// # Errors
///
/// `PersistError::Json` for malformed input, `PersistError::Invalid` for a
/// well-formed snapshot that breaks an invariant.
pub fn decode_json(blob: &str) -> Result<PresenterState, PersistError> {
    let state: PresenterState = serde_json::from_str(blob)?;
    validate(&state)?;
    Ok(state)
}

/// Encode the state as a compact binary snapshot.
///
/// # Errors
///
/// `PersistError::Binary` if bincode rejects the value.
pub fn to_bytes(state: &PresenterState) -> Result<Vec<u8>, PersistError> {
    Ok(bincode::serialize(state)?)
}

/// Decode a binary snapshot produced by `to_bytes`.
///
/// # Errors
///
/// `PersistError::Binary` for malformed input, `PersistError::Invalid` for a
/// snapshot that breaks an invariant.
pub fn from_bytes(bytes: &[u8]) -> Result<PresenterState, PersistError> {
    let state: PresenterState = bincode::deserialize(bytes)?;
    validate(&state)?;
    Ok(state)
}

/// Check that a decoded state is one the engine could have produced.
///
/// # Errors
///
/// `PersistError::Invalid` naming the first broken invariant.
pub fn validate(state: &PresenterState) -> Result<(), PersistError> {
    match state {
        PresenterState::Setup(setup) => {
            if !setup.config().is_valid() {
                return Err(PersistError::Invalid("configuration out of range".into()));
            }
            if !is_valid_roster(setup.players()) {
                return Err(PersistError::Invalid(
                    "roster has empty or duplicate names".into(),
                ));
            }
            Ok(())
        }
        PresenterState::Game(game) => game.check_structure().map_err(PersistError::Invalid),
    }
}
