use super::CastError;
use crate::catalog::{CastFlags, EntryPoint, PowerKind};
use crate::state::{PlayerId, SubtileCoord, ThingId};

/// A cast as issued by the UI or a computer player.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CastRequest {
    pub caster: PlayerId,
    pub power: PowerKind,
    /// Requested overcharge level; clamped before resolution.
    #[cfg_attr(feature = "serde", serde(default))]
    pub level: u8,
    pub target: CastTarget,
}

impl CastRequest {
    pub fn on_thing(
        caster: PlayerId,
        power: PowerKind,
        level: u8,
        thing: ThingId,
        stl: SubtileCoord,
    ) -> Self {
        Self {
            caster,
            power,
            level,
            target: CastTarget::Thing { thing, stl },
        }
    }

    pub fn on_location(caster: PlayerId, power: PowerKind, level: u8, stl: SubtileCoord) -> Self {
        Self {
            caster,
            power,
            level,
            target: CastTarget::Location {
                stl,
                allow_flags: CastFlags::empty(),
            },
        }
    }

    pub fn untargeted(caster: PlayerId, power: PowerKind, level: u8) -> Self {
        Self {
            caster,
            power,
            level,
            target: CastTarget::Untargeted,
        }
    }

    pub fn entry_point(&self) -> EntryPoint {
        self.target.entry_point()
    }
}

/// Where a cast is aimed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CastTarget {
    /// A thing, picked at subtile `stl`.
    Thing { thing: ThingId, stl: SubtileCoord },
    /// A map subtile; `allow_flags` widen the power's own targeting.
    Location {
        stl: SubtileCoord,
        #[cfg_attr(feature = "serde", serde(default))]
        allow_flags: CastFlags,
    },
    Untargeted,
}

impl CastTarget {
    pub fn entry_point(&self) -> EntryPoint {
        match self {
            Self::Thing { .. } => EntryPoint::OnThing,
            Self::Location { .. } => EntryPoint::OnLocation,
            Self::Untargeted => EntryPoint::Untargeted,
        }
    }
}

/// Tri-state result of a cast.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CastOutcome {
    /// Nothing to do; nothing charged.
    Ok,
    /// Charged (where the power costs anything) and applied.
    Success,
    /// Rejected; the caster got one rejection cue.
    Fail(CastError),
}

impl CastOutcome {
    pub fn is_fail(&self) -> bool {
        matches!(self, Self::Fail(_))
    }

    pub fn error(&self) -> Option<&CastError> {
        match self {
            Self::Fail(error) => Some(error),
            _ => None,
        }
    }
}

impl From<Result<Resolution, CastError>> for CastOutcome {
    fn from(result: Result<Resolution, CastError>) -> Self {
        match result {
            Ok(Resolution::Unchanged) => Self::Ok,
            Ok(Resolution::Applied) => Self::Success,
            Err(error) => Self::Fail(error),
        }
    }
}

/// What a handler did when it did not fail.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Resolution {
    /// Redundant cast: no charge, no cue.
    Unchanged,
    Applied,
}

/// Handler input for casts on a thing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ThingCast {
    pub power: PowerKind,
    /// Already clamped.
    pub level: u8,
    pub thing: ThingId,
    pub stl: SubtileCoord,
}

/// Handler input for casts on a subtile.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LocationCast {
    pub power: PowerKind,
    /// Already clamped.
    pub level: u8,
    pub stl: SubtileCoord,
    pub allow_flags: CastFlags,
}
