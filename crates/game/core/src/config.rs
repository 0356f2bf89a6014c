use crate::state::ThingsState;

/// Tunable parameters of the casting engine.
///
/// Defaults reproduce the classic rules; sessions may load overrides from
/// TOML but every peer of a lockstep session must use the same values.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MagicConfig {
    /// Highest overcharge level a cast may use.
    pub max_overcharge_level: u8,
    /// Turns that must pass after a lightning strike before powers flagged
    /// `REQUIRES_CAST_DELAY` may be cast again.
    pub cast_delay_turns: u64,
    /// Turns that must pass between two slaps of the same dungeon.
    pub slap_cooldown_turns: u64,
    /// Base damage of the lightning shot, multiplied by the power magnitude.
    pub lightning_shot_damage: i32,
    /// Height above the floor at which a lightning shot is created.
    pub lightning_shot_height: i32,
    /// Height above the floor at which a fresh digger is dropped.
    pub digger_drop_height: i32,
    /// Height at which the sight-of-evil eye floats.
    pub sight_eye_height: i32,
    /// Turns per subtile of growth of the sight-of-evil explored radius.
    pub sight_reveal_step: u64,
    /// Search radius, in subtiles, for the slap power cast on a location.
    pub slap_search_radius: u16,
    /// Maximum number of things held in a power hand.
    pub hand_capacity: usize,
    /// Size of the thing table of a fresh session.
    pub thing_capacity: usize,
    /// Size of the creature-control table of a fresh session.
    pub control_capacity: usize,
}

impl MagicConfig {
    // ===== compile-time constants used as type parameters =====
    /// Overcharge levels stored per power (levels `0..=8`).
    pub const OVERCHARGE_LEVELS: usize = 9;
    /// Upper bound of `max_overcharge_level`.
    pub const MAX_OVERCHARGE_LEVEL: u8 = (Self::OVERCHARGE_LEVELS - 1) as u8;
    /// Active effects a creature can carry at once.
    pub const MAX_ACTIVE_EFFECTS: usize = 8;
    /// Players tracked by the diplomacy mask (keepers, heroes and neutral).
    pub const MAX_PLAYERS: usize = 8;
    /// Things a power hand may ever hold.
    pub const MAX_HAND_CAPACITY: usize = 64;
    /// Radius, in subtiles, of the sight-of-evil explored window.
    pub const SIGHT_WINDOW_RADIUS: u8 = 15;
    /// Turns it takes the sight-of-evil eye to close, per level.
    pub const SIGHT_CLOSE_INSTANCE_TIME: [i64; Self::OVERCHARGE_LEVELS] =
        [4, 4, 5, 5, 6, 6, 7, 7, 8];

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_CAST_DELAY_TURNS: u64 = 20;
    pub const DEFAULT_SLAP_COOLDOWN_TURNS: u64 = 10;
    pub const DEFAULT_LIGHTNING_SHOT_DAMAGE: i32 = 10;
    pub const DEFAULT_HAND_CAPACITY: usize = 8;

    pub fn new() -> Self {
        Self {
            max_overcharge_level: Self::MAX_OVERCHARGE_LEVEL,
            cast_delay_turns: Self::DEFAULT_CAST_DELAY_TURNS,
            slap_cooldown_turns: Self::DEFAULT_SLAP_COOLDOWN_TURNS,
            lightning_shot_damage: Self::DEFAULT_LIGHTNING_SHOT_DAMAGE,
            lightning_shot_height: 128,
            digger_drop_height: 384,
            sight_eye_height: (5 << 8) + 128,
            sight_reveal_step: 4,
            slap_search_radius: 2,
            hand_capacity: Self::DEFAULT_HAND_CAPACITY,
            thing_capacity: ThingsState::DEFAULT_THING_CAPACITY,
            control_capacity: ThingsState::DEFAULT_CONTROL_CAPACITY,
        }
    }

    /// Clamps a requested overcharge level into `0..=max_overcharge_level`.
    pub fn clamp_level(&self, level: u8) -> u8 {
        level.min(self.max_level())
    }

    /// Effective maximum level, never above what the catalog stores.
    pub fn max_level(&self) -> u8 {
        self.max_overcharge_level.min(Self::MAX_OVERCHARGE_LEVEL)
    }

    /// Effective hand capacity, never above the compile-time bound.
    pub fn hand_limit(&self) -> usize {
        self.hand_capacity.min(Self::MAX_HAND_CAPACITY)
    }
}

impl Default for MagicConfig {
    fn default() -> Self {
        Self::new()
    }
}
