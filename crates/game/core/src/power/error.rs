//! Cast rejection taxonomy.

use crate::catalog::{EntryPoint, PowerKind};
use crate::env::{Cue, OracleError};
use crate::error::{ErrorSeverity, GameError};
use crate::state::{PlayerId, StateError, SubtileCoord, ThingId};

/// Limited table a cast needed a free slot in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum SlotKind {
    Thing,
    CreatureControl,
    Hand,
}

/// Why a cast was rejected.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CastError {
    #[error("player {caster} tried to cast {power} which is unavailable")]
    Unavailable { caster: PlayerId, power: PowerKind },

    #[error("thing {0} does not exist")]
    ThingNotFound(ThingId),

    #[error("no target for {power} near {stl}")]
    NoTargetNear { power: PowerKind, stl: SubtileCoord },

    #[error("{power} can't target {target}")]
    IneligibleTarget { power: PowerKind, target: Target },

    #[error("not enough gold: price {price}, funds {funds}")]
    InsufficientFunds { price: u64, funds: u64 },

    #[error("no free {0} slot")]
    ResourceExhausted(SlotKind),

    #[error("tried to apply {power} to non-creature {thing}")]
    NotACreature { power: PowerKind, thing: ThingId },

    #[error("power {power} not supported on entry point {entry}")]
    UnsupportedPower { power: PowerKind, entry: EntryPoint },

    #[error("player {0} is not registered")]
    UnknownPlayer(PlayerId),

    #[error(transparent)]
    Oracle(#[from] OracleError),

    #[error(transparent)]
    State(StateError),
}

/// What a targeting check rejected, for diagnostics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Target {
    Thing,
    Subtile,
    ThingOrSubtile,
}

impl From<StateError> for CastError {
    fn from(error: StateError) -> Self {
        match error {
            StateError::ThingSlotsExhausted { .. } => Self::ResourceExhausted(SlotKind::Thing),
            StateError::ControlSlotsExhausted { .. } => {
                Self::ResourceExhausted(SlotKind::CreatureControl)
            }
            other => Self::State(other),
        }
    }
}

impl CastError {
    /// The single rejection cue shown to the caster for this error.
    pub fn rejection_cue(&self) -> Cue {
        match self {
            Self::InsufficientFunds { .. } => Cue::NotEnoughGold,
            Self::ResourceExhausted(_) => Cue::CannotCreate,
            _ => Cue::Rejected,
        }
    }
}

impl GameError for CastError {
    fn severity(&self) -> ErrorSeverity {
        use CastError::*;
        match self {
            InsufficientFunds { .. } | ResourceExhausted(_) => ErrorSeverity::Recoverable,

            Unavailable { .. }
            | ThingNotFound(_)
            | NoTargetNear { .. }
            | IneligibleTarget { .. } => ErrorSeverity::Validation,

            NotACreature { .. } | UnsupportedPower { .. } | UnknownPlayer(_) => {
                ErrorSeverity::Internal
            }

            Oracle(error) => error.severity(),
            State(error) => error.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        use CastError::*;
        match self {
            Unavailable { .. } => "CAST_UNAVAILABLE",
            ThingNotFound(_) => "CAST_THING_NOT_FOUND",
            NoTargetNear { .. } => "CAST_NO_TARGET_NEAR",
            IneligibleTarget { .. } => "CAST_INELIGIBLE_TARGET",
            InsufficientFunds { .. } => "CAST_INSUFFICIENT_FUNDS",
            ResourceExhausted(_) => "CAST_RESOURCE_EXHAUSTED",
            NotACreature { .. } => "CAST_NOT_A_CREATURE",
            UnsupportedPower { .. } => "CAST_UNSUPPORTED_POWER",
            UnknownPlayer(_) => "CAST_UNKNOWN_PLAYER",
            Oracle(error) => error.error_code(),
            State(error) => error.error_code(),
        }
    }
}
