use bitflags::bitflags;

use super::{ActiveEffects, Coord3d, CreatureModel, EffectKind, PlayerId, ThingId};
use crate::catalog::PowerKind;

/// Anything that exists on the map.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Thing {
    pub id: ThingId,
    pub owner: PlayerId,
    pub position: Coord3d,
    pub creation_turn: u64,
    /// Held in a power hand; immune to powers while true.
    pub picked_up: bool,
    pub class: ThingClass,
}

impl Thing {
    pub fn creature(&self) -> Option<&Creature> {
        match &self.class {
            ThingClass::Creature(creature) => Some(creature),
            _ => None,
        }
    }

    pub fn creature_mut(&mut self) -> Option<&mut Creature> {
        match &mut self.class {
            ThingClass::Creature(creature) => Some(creature),
            _ => None,
        }
    }

    pub fn object(&self) -> Option<ObjectKind> {
        match self.class {
            ThingClass::Object(kind) => Some(kind),
            _ => None,
        }
    }

    pub fn is_creature(&self) -> bool {
        matches!(self.class, ThingClass::Creature(_))
    }

    /// True for creatures imprisoned or tortured by someone other than their owner.
    pub fn in_enemy_custody(&self) -> bool {
        self.creature()
            .and_then(|creature| creature.captor)
            .is_some_and(|captor| captor != self.owner)
    }
}

/// What a thing is, with its class-specific data.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ThingClass {
    Creature(Creature),
    Object(ObjectKind),
    Shot(ShotThing),
    Effect(EffectThing),
}

/// Objects lying on the map.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ObjectKind {
    Food { mature: bool },
    GoldPile,
    GoldHoard,
    Spellbook(PowerKind),
    /// Floating sight-of-evil eye.
    SightEye,
    /// Scorch mark left by a lightning strike.
    LightningMark,
    /// Call-to-arms rally banner.
    Banner,
    Other(u16),
}

impl ObjectKind {
    pub fn is_mature_food(self) -> bool {
        matches!(self, Self::Food { mature: true })
    }

    pub fn is_gold(self) -> bool {
        matches!(self, Self::GoldPile | Self::GoldHoard)
    }

    pub fn is_spellbook(self) -> bool {
        matches!(self, Self::Spellbook(_))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShotThing {
    pub kind: ShotKind,
    pub level: u8,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ShotKind {
    Lightning,
}

/// Short-lived effect entity, consumed by the terrain or render layers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EffectThing {
    pub kind: EffectThingKind,
    pub level: u8,
    pub magnitude: i32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EffectThingKind {
    LightningStrike,
    CaveIn,
    DestroyWalls,
}

bitflags! {
    /// Breed-level traits copied from the creature configuration.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    #[cfg_attr(feature = "serde", serde(transparent))]
    pub struct CreatureTraits: u8 {
        const NEVER_CHICKENS = 1 << 0;
        const DIGGER         = 1 << 1;
    }
}

/// Behaviour state a power can switch a creature into.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Behavior {
    #[default]
    Idle,
    Sleeping,
    /// Freshly summoned digger dropping onto the floor.
    DiggerBirth,
    SlapCowers,
    ArriveAtCallToArms,
    ArriveAtAudience,
}

/// Breed statistics needed to create a creature.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CreatureTemplate {
    pub model: CreatureModel,
    pub max_health: i32,
    pub base_speed: u16,
    pub slaps_to_kill: u16,
    pub annoy_slapped: u32,
    pub annoy_woken_up: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub traits: CreatureTraits,
}

impl CreatureTemplate {
    /// Spawns a creature of this breed at full health.
    pub fn instantiate(&self) -> Creature {
        Creature {
            model: self.model,
            health: self.max_health,
            max_health: self.max_health,
            captor: None,
            effects: ActiveEffects::empty(),
            base_speed: self.base_speed,
            max_speed: self.base_speed,
            slaps_to_kill: self.slaps_to_kill,
            annoy_slapped: self.annoy_slapped,
            annoy_woken_up: self.annoy_woken_up,
            anger: 0,
            slap_turns: 0,
            behavior: Behavior::Idle,
            behavior_backup: None,
            disease_caster: None,
            traits: self.traits,
            impulse: Coord3d::default(),
        }
    }
}

/// Per-creature control data.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Creature {
    pub model: CreatureModel,
    pub health: i32,
    pub max_health: i32,
    /// Player holding this creature captive, if any.
    pub captor: Option<PlayerId>,
    pub effects: ActiveEffects,
    pub base_speed: u16,
    pub max_speed: u16,
    pub slaps_to_kill: u16,
    pub annoy_slapped: u32,
    pub annoy_woken_up: u32,
    pub anger: u32,
    /// Turns of slap-induced hurry left.
    pub slap_turns: u32,
    pub behavior: Behavior,
    /// Behaviour to resume once cowering ends.
    pub behavior_backup: Option<Behavior>,
    /// Keeper whose disease infected this creature.
    pub disease_caster: Option<PlayerId>,
    pub traits: CreatureTraits,
    /// Pending push applied by the physics layer.
    pub impulse: Coord3d,
}

impl Creature {
    pub fn is_at_full_health(&self) -> bool {
        self.health >= self.max_health
    }

    /// Max speed from the base speed and the modifiers powers control.
    pub fn compute_max_speed(&self, owner_must_obey: bool) -> u16 {
        let mut speed = u32::from(self.base_speed);
        if self.effects.has(EffectKind::Speed) {
            speed *= 2;
        }
        if self.slap_turns > 0 {
            speed *= 2;
        }
        if owner_must_obey {
            speed = speed * 5 / 4;
        }
        u16::try_from(speed).unwrap_or(u16::MAX)
    }
}
