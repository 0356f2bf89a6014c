use bitflags::bitflags;

bitflags! {
    /// Targeting capabilities of a power.
    ///
    /// The creature, ground and tall groups each have a composite `ALL_*`
    /// value; a composite only matches when every member bit is set.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    #[cfg_attr(feature = "serde", serde(transparent))]
    pub struct CastFlags: u32 {
        // Creatures
        const OWNED_CREATURES    = 1 << 0;
        const ALLIED_CREATURES   = 1 << 1;
        const ENEMY_CREATURES    = 1 << 2;
        const ALL_CREATURES      = Self::OWNED_CREATURES.bits()
            | Self::ALLIED_CREATURES.bits()
            | Self::ENEMY_CREATURES.bits();
        /// Creatures held captive by an enemy of their owner.
        const CUSTODY_CREATURES  = 1 << 3;

        // Objects
        const OWNED_FOOD         = 1 << 4;
        const OWNED_GOLD         = 1 << 5;
        const OWNED_SPELLBOOK    = 1 << 6;

        // Ground slabs
        const NEUTRAL_GROUND     = 1 << 7;
        const OWNED_GROUND       = 1 << 8;
        const ALLIED_GROUND      = 1 << 9;
        const ENEMY_GROUND       = 1 << 10;
        const ALL_GROUND         = Self::NEUTRAL_GROUND.bits()
            | Self::OWNED_GROUND.bits()
            | Self::ALLIED_GROUND.bits()
            | Self::ENEMY_GROUND.bits();

        // Tall slabs
        const NEUTRAL_TALL       = 1 << 11;
        const OWNED_TALL         = 1 << 12;
        const ALLIED_TALL        = 1 << 13;
        const ENEMY_TALL         = 1 << 14;
        const ALL_TALL           = Self::NEUTRAL_TALL.bits()
            | Self::OWNED_TALL.bits()
            | Self::ALLIED_TALL.bits()
            | Self::ENEMY_TALL.bits();

        // Location rules
        /// Rejects rooms, doors, reserved tiles, rock and liquids.
        const CLAIMABLE          = 1 << 15;
        const ALLOW_UNREVEALED   = 1 << 16;
        /// Unrevealed tiles are fine if the sight-of-evil eye explored them.
        const ALLOW_TEMP_REVEAL  = 1 << 17;
        const ALLOW_ANYWHERE     = 1 << 18;
        const REQUIRES_CAST_DELAY = 1 << 19;

        /// Targeting a thing OR its location is enough.
        const THING_OR_MAP       = 1 << 20;
    }
}

impl CastFlags {
    /// Returns true if every bit of `flag` is present.
    ///
    /// Reads better than `contains` at call sites testing composites.
    #[inline]
    pub const fn has(self, flag: CastFlags) -> bool {
        self.contains(flag)
    }
}
