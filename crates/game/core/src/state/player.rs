use arrayvec::ArrayVec;

use super::{Dungeon, PlayerId, ThingId};
use crate::config::MagicConfig;

/// A keeper slot: diplomacy, interaction state and dungeon.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerState {
    pub id: PlayerId,
    /// Players this one declares alliance with, as a `PlayerId::mask` set.
    pub allies: u8,
    pub control: PlayerControl,
    pub dungeon: Dungeon,
}

impl PlayerState {
    pub fn new(id: PlayerId, dungeon: Dungeon) -> Self {
        Self {
            id,
            allies: 0,
            control: PlayerControl::default(),
            dungeon,
        }
    }

    pub fn declares_ally(&self, other: PlayerId) -> bool {
        self.allies & other.mask() != 0
    }
}

/// Interaction the keeper's hand is currently performing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PlayerInstance {
    /// Slap animation in progress on the influenced thing.
    Whip,
    /// Camera is inside the influenced creature.
    Possess,
}

/// Per-player input and hand state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerControl {
    /// Fine-grained overcharge counter; `>> 2` yields the level.
    pub overcharge_accumulator: i32,
    pub last_lightning_turn: Option<u64>,
    pub instance: Option<PlayerInstance>,
    pub influenced: Option<ThingId>,
    /// Things held in the power hand, most recent last.
    pub hand: ArrayVec<ThingId, { MagicConfig::MAX_HAND_CAPACITY }>,
}

impl PlayerControl {
    /// Discrete overcharge level, capped at `max_level`.
    pub fn overcharge_level(&self, max_level: u8) -> u8 {
        let level = (self.overcharge_accumulator >> 2).max(0);
        u8::try_from(level).map_or(max_level, |level| level.min(max_level))
    }
}
