use std::fmt;

/// Identifier of a player slot (keepers, heroes, neutral).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Heroes owned by the level itself.
    pub const HEROES: Self = Self(4);

    /// Owner of unclaimed terrain and free-roaming things.
    pub const NEUTRAL: Self = Self(5);

    #[inline]
    pub const fn is_neutral(self) -> bool {
        self.0 == Self::NEUTRAL.0
    }

    /// Bit of this player inside an alliance mask; zero past the mask width.
    #[inline]
    pub fn mask(self) -> u8 {
        1u8.checked_shl(u32::from(self.0)).unwrap_or(0)
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.0)
    }
}

/// Unique identifier for a thing (creature, object, shot or effect).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ThingId(pub u32);

impl fmt::Display for ThingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Creature breed index into the external creature configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CreatureModel(pub u8);

impl CreatureModel {
    /// Wildcard used by roster-wide updates.
    pub const ANY: Self = Self(0);

    pub fn matches(self, other: CreatureModel) -> bool {
        self == Self::ANY || self == other
    }
}

/// Map units per subtile.
pub const SUBTILE_SIZE: i32 = 256;

/// Fine-grained map coordinate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SubtileCoord {
    pub x: u16,
    pub y: u16,
}

impl SubtileCoord {
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }

    /// Center of the subtile at floor zero.
    pub fn center(self) -> Coord3d {
        Coord3d::new(
            i32::from(self.x) * SUBTILE_SIZE + SUBTILE_SIZE / 2,
            i32::from(self.y) * SUBTILE_SIZE + SUBTILE_SIZE / 2,
            0,
        )
    }
}

impl fmt::Display for SubtileCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Position in map units (`SUBTILE_SIZE` per subtile).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coord3d {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Coord3d {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    pub const fn with_z(self, z: i32) -> Self {
        Self { z, ..self }
    }

    /// Subtile under this position; negative coordinates clamp to zero.
    pub fn subtile(self) -> SubtileCoord {
        let clamp = |v: i32| u16::try_from((v / SUBTILE_SIZE).max(0)).unwrap_or(u16::MAX);
        SubtileCoord::new(clamp(self.x), clamp(self.y))
    }

    /// Chebyshev distance on the map plane.
    pub fn box_distance(self, other: Coord3d) -> i64 {
        let dx = (i64::from(self.x) - i64::from(other.x)).abs();
        let dy = (i64::from(self.y) - i64::from(other.y)).abs();
        dx.max(dy)
    }

    /// Squared euclidean distance on the map plane.
    pub fn planar_distance_sq(self, other: Coord3d) -> i64 {
        let dx = i64::from(self.x) - i64::from(other.x);
        let dy = i64::from(self.y) - i64::from(other.y);
        dx * dx + dy * dy
    }
}
