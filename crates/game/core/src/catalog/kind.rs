//! Power kinds and the entry points that accept them.

/// Every keeper power the engine knows how to resolve.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
    strum::EnumCount,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[repr(u8)]
pub enum PowerKind {
    /// Pick up an owned thing into the power hand.
    Hand,
    /// Summon the keeper's worker breed.
    CreateDigger,
    /// Dungeon-wide "must obey" toggle.
    Obey,
    /// Whip a creature.
    Slap,
    /// Sight of evil: a floating eye that reveals an area.
    Sight,
    /// Rally creatures to a banner.
    CallToArms,
    CaveIn,
    HealCreature,
    /// Summon every free creature to the dungeon heart.
    HoldAudience,
    Lightning,
    SpeedCreature,
    /// Armour.
    Protect,
    /// Invisibility.
    Conceal,
    Disease,
    Chicken,
    DestroyWalls,
    TimeBomb,
    Possess,
    Armageddon,
}

impl PowerKind {
    /// Stable index of this kind, used by bit sets.
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Returns true if the kind accepts a thing as target.
    pub const fn targets_things(self) -> bool {
        matches!(
            self,
            Self::Hand
                | Self::HealCreature
                | Self::SpeedCreature
                | Self::Protect
                | Self::Conceal
                | Self::Disease
                | Self::Chicken
                | Self::Slap
                | Self::Possess
                | Self::CallToArms
                | Self::Lightning
        )
    }

    /// Returns true if the kind accepts a map location as target.
    pub const fn targets_locations(self) -> bool {
        matches!(
            self,
            Self::CreateDigger
                | Self::Slap
                | Self::Sight
                | Self::CallToArms
                | Self::CaveIn
                | Self::Lightning
                | Self::DestroyWalls
                | Self::TimeBomb
        )
    }

    /// Returns true if the kind is cast without a target.
    pub const fn is_untargeted(self) -> bool {
        matches!(self, Self::Obey | Self::HoldAudience | Self::Armageddon)
    }
}

/// Dispatcher entry point a cast request came through.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum EntryPoint {
    OnThing,
    OnLocation,
    Untargeted,
}
