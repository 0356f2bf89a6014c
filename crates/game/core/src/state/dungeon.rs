//! Per-keeper dungeon bookkeeping touched by powers.

use std::collections::BTreeMap;

use super::{CreatureModel, CreatureTemplate, SubtileCoord, ThingId};
use crate::catalog::PowerSet;

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dungeon {
    /// Gold available for spending.
    pub funds: u64,
    /// Researched powers.
    pub available_powers: PowerSet,
    /// Breed summoned by the create-digger power.
    pub digger: CreatureTemplate,
    /// Creatures sacrificed at the temple, per breed.
    pub creature_sacrifices: BTreeMap<CreatureModel, u32>,
    pub sight: SightOfEvil,
    /// Turn must-obey mode was switched on.
    pub must_obey_since: Option<u64>,
    pub last_slap_turn: Option<u64>,
    pub num_slaps: u32,
    /// Camera shake requested by the last lightning strike.
    pub camera_deviate_jump: u16,
    pub call_to_arms: Option<CallToArms>,
    /// Turn the running audience was called.
    pub hold_audience_turn: Option<u64>,
}

impl Dungeon {
    pub fn new(funds: u64, digger: CreatureTemplate) -> Self {
        Self {
            funds,
            available_powers: PowerSet::EMPTY,
            digger,
            creature_sacrifices: BTreeMap::new(),
            sight: SightOfEvil::default(),
            must_obey_since: None,
            last_slap_turn: None,
            num_slaps: 0,
            camera_deviate_jump: 0,
            call_to_arms: None,
            hold_audience_turn: None,
        }
    }

    pub fn with_powers(mut self, powers: PowerSet) -> Self {
        self.available_powers = powers;
        self
    }

    pub fn sacrificed(&self, model: CreatureModel) -> u32 {
        self.creature_sacrifices.get(&model).copied().unwrap_or(0)
    }

    pub fn must_obey(&self) -> bool {
        self.must_obey_since.is_some()
    }
}

/// Sight-of-evil eye bookkeeping.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SightOfEvil {
    pub eye: Option<ThingId>,
    /// Overcharge level the eye was cast at.
    pub level: u8,
    /// Reference turn of the decaying recharge timer.
    pub recharge_turn: i64,
    /// Subtile the eye was cast at; center of the explored window.
    pub origin: SubtileCoord,
    /// Radius, in subtiles, explored so far.
    pub explored_radius: u8,
    /// Pending move requested by a recast on an old eye.
    pub retarget: Option<SubtileCoord>,
}

impl SightOfEvil {
    pub fn is_active(&self) -> bool {
        self.eye.is_some()
    }

    /// Whether the eye's window covers `stl`.
    pub fn covers(&self, stl: SubtileCoord) -> bool {
        if !self.is_active() {
            return false;
        }
        let dx = stl.x.abs_diff(self.origin.x);
        let dy = stl.y.abs_diff(self.origin.y);
        dx.max(dy) <= u16::from(self.explored_radius)
    }
}

/// Active call-to-arms rally.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CallToArms {
    pub banner: ThingId,
    pub target: SubtileCoord,
    pub level: u8,
    pub since: u64,
}
