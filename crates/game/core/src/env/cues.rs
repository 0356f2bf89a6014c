//! Presentation cues emitted while resolving casts.
//!
//! Cues are fire-and-forget: the engine never reads them back, so a sink can
//! drop them without affecting the simulation.

use crate::state::ThingId;

/// Sound sample index understood by the presentation layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Sample(pub u16);

impl Sample {
    pub const REJECTED: Self = Self(119);
    pub const HEAL: Self = Self(37);
    pub const SPEED: Self = Self(38);
    pub const SIGHT: Self = Self(51);
    pub const LIGHTNING: Self = Self(55);
    pub const OBEY: Self = Self(58);
    pub const DISEASE: Self = Self(59);
    pub const CHICKEN: Self = Self(109);
    pub const ARMOUR: Self = Self(153);
    pub const CONCEAL: Self = Self(154);
}

/// Entry of a creature's own sound set, resolved per breed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CreatureSound {
    Born,
    Slapped,
}

/// A single presentation side effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Cue {
    /// Generic "cannot do that" sound for the local player.
    Rejected,
    /// Creation refused for lack of free slots.
    CannotCreate,
    /// "You do not have enough gold" message for the local player.
    NotEnoughGold,
    /// Positional sound played at a thing, heard by everyone nearby.
    ThingSound { thing: ThingId, sample: Sample },
    CreatureSound { thing: ThingId, sound: CreatureSound },
    /// Non-positional sound.
    GlobalSound(Sample),
}

impl Cue {
    /// Rejection-class cues; exactly one accompanies every failed cast.
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::Rejected | Self::CannotCreate | Self::NotEnoughGold)
    }
}

/// Receiver of presentation cues.
pub trait CueSink {
    fn emit(&mut self, cue: Cue);
}

/// Sink that drops every cue.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullCues;

impl CueSink for NullCues {
    fn emit(&mut self, _cue: Cue) {}
}

/// Sink that records cues in order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CueLog {
    cues: Vec<Cue>,
}

impl CueLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cues(&self) -> &[Cue] {
        &self.cues
    }

    pub fn rejections(&self) -> usize {
        self.cues.iter().filter(|cue| cue.is_rejection()).count()
    }

    pub fn clear(&mut self) {
        self.cues.clear();
    }
}

impl CueSink for CueLog {
    fn emit(&mut self, cue: Cue) {
        self.cues.push(cue);
    }
}
