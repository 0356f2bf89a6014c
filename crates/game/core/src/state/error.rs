//! State management errors.
//!
//! Errors related to thing allocation and player bookkeeping.

use crate::error::{ErrorSeverity, GameError};
use crate::state::PlayerId;

/// Errors that occur during game state operations.
///
/// These errors indicate capacity limits or inconsistent player tables.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StateError {
    /// Every thing slot is taken.
    #[error("thing table is full (capacity: {capacity})")]
    ThingSlotsExhausted { capacity: usize },

    /// Every creature-control slot is taken.
    #[error("creature control table is full (capacity: {capacity})")]
    ControlSlotsExhausted { capacity: usize },

    /// Thing ID allocation overflow (all IDs exhausted).
    #[error("thing ID overflow (current: {current})")]
    ThingIdOverflow { current: u32 },

    /// A player with this id is already registered.
    #[error("player {0} is already registered")]
    DuplicatePlayer(PlayerId),

    /// Player id does not fit the alliance mask.
    #[error("player {0} is out of range")]
    PlayerOutOfRange(PlayerId),
}

impl GameError for StateError {
    fn severity(&self) -> ErrorSeverity {
        use StateError::*;
        match self {
            // Slots free up as things die
            ThingSlotsExhausted { .. } | ControlSlotsExhausted { .. } => {
                ErrorSeverity::Recoverable
            }

            ThingIdOverflow { .. } => ErrorSeverity::Fatal,

            DuplicatePlayer(_) | PlayerOutOfRange(_) => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        use StateError::*;
        match self {
            ThingSlotsExhausted { .. } => "STATE_THING_SLOTS_EXHAUSTED",
            ControlSlotsExhausted { .. } => "STATE_CONTROL_SLOTS_EXHAUSTED",
            ThingIdOverflow { .. } => "STATE_THING_ID_OVERFLOW",
            DuplicatePlayer(_) => "STATE_DUPLICATE_PLAYER",
            PlayerOutOfRange(_) => "STATE_PLAYER_OUT_OF_RANGE",
        }
    }
}
