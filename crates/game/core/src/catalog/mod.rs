//! Read-only power statistics.
//!
//! The catalog is produced by an external loader and never mutated during a
//! session. Construction validates the invariants every handler relies on.
mod flags;
mod kind;

pub use flags::CastFlags;
pub use kind::{EntryPoint, PowerKind};

use strum::EnumCount;

use crate::config::MagicConfig;
use crate::error::{ErrorSeverity, GameError};

/// Cost and strength of one power at every overcharge level.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PowerStats {
    pub kind: PowerKind,
    /// Gold price per level; non-decreasing.
    pub cost: [u32; MagicConfig::OVERCHARGE_LEVELS],
    /// Power-specific strength per level (damage factor, sight time, ...).
    pub magnitude: [i32; MagicConfig::OVERCHARGE_LEVELS],
    /// Turns an attached effect lasts.
    #[cfg_attr(feature = "serde", serde(default))]
    pub duration: u32,
    pub cast_flags: CastFlags,
}

impl PowerStats {
    pub fn new(
        kind: PowerKind,
        cost: [u32; MagicConfig::OVERCHARGE_LEVELS],
        magnitude: [i32; MagicConfig::OVERCHARGE_LEVELS],
        cast_flags: CastFlags,
    ) -> Self {
        Self {
            kind,
            cost,
            magnitude,
            duration: 0,
            cast_flags,
        }
    }

    pub fn with_duration(mut self, duration: u32) -> Self {
        self.duration = duration;
        self
    }

    /// Price at `level`, clamped into the stored range.
    pub fn cost_at(&self, level: u8) -> u32 {
        self.cost[Self::slot(level)]
    }

    /// Magnitude at `level`, clamped into the stored range.
    pub fn magnitude_at(&self, level: u8) -> i32 {
        self.magnitude[Self::slot(level)]
    }

    fn slot(level: u8) -> usize {
        usize::from(level).min(MagicConfig::OVERCHARGE_LEVELS - 1)
    }
}

/// Per-power statistics for a session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PowerCatalog {
    powers: [Option<PowerStats>; PowerKind::COUNT],
}

impl PowerCatalog {
    /// Builds a catalog, rejecting duplicate kinds and decreasing prices.
    ///
    /// # Errors
    ///
    /// Returns the first [`CatalogError`] found.
    pub fn new(powers: impl IntoIterator<Item = PowerStats>) -> Result<Self, CatalogError> {
        let mut table: [Option<PowerStats>; PowerKind::COUNT] = Default::default();
        for stats in powers {
            if let Some(level) = stats.cost.windows(2).position(|pair| pair[1] < pair[0]) {
                return Err(CatalogError::DecreasingCost {
                    kind: stats.kind,
                    level: level + 1,
                });
            }
            let slot = &mut table[stats.kind.index()];
            if slot.is_some() {
                return Err(CatalogError::Duplicate(stats.kind));
            }
            *slot = Some(stats);
        }
        Ok(Self { powers: table })
    }

    pub fn get(&self, kind: PowerKind) -> Option<&PowerStats> {
        self.powers[kind.index()].as_ref()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PowerStats> {
        self.powers.iter().flatten()
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Set of powers, e.g. the powers a keeper has researched.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PowerSet(u32);

impl PowerSet {
    pub const EMPTY: Self = Self(0);

    pub fn insert(&mut self, kind: PowerKind) {
        self.0 |= 1 << kind.index();
    }

    pub fn remove(&mut self, kind: PowerKind) {
        self.0 &= !(1 << kind.index());
    }

    pub const fn contains(&self, kind: PowerKind) -> bool {
        self.0 & (1 << kind.index()) != 0
    }
}

impl FromIterator<PowerKind> for PowerSet {
    fn from_iter<I: IntoIterator<Item = PowerKind>>(iter: I) -> Self {
        let mut set = Self::EMPTY;
        for kind in iter {
            set.insert(kind);
        }
        set
    }
}

/// Invalid catalog data.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("power {0} is listed more than once")]
    Duplicate(PowerKind),

    #[error("power {kind} gets cheaper at level {level}")]
    DecreasingCost { kind: PowerKind, level: usize },
}

impl GameError for CatalogError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Duplicate(_) => "CATALOG_DUPLICATE",
            Self::DecreasingCost { .. } => "CATALOG_DECREASING_COST",
        }
    }
}
