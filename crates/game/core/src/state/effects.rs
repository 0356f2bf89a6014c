//! Timed effects attached to creatures by powers.
//!
//! A creature carries at most one effect per kind. Attaching a kind that is
//! already present refreshes it instead of stacking. Expiry belongs to the
//! creature-update layer; the engine only attaches, refreshes and queries.

use arrayvec::ArrayVec;

use crate::config::MagicConfig;

/// Active effects on one creature.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActiveEffects {
    effects: ArrayVec<ActiveEffect, { MagicConfig::MAX_ACTIVE_EFFECTS }>,
}

// One effect per kind always fits.
const _: () = assert!(MagicConfig::MAX_ACTIVE_EFFECTS >= <EffectKind as strum::EnumCount>::COUNT);

/// A single effect with its remaining strength.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActiveEffect {
    pub kind: EffectKind,
    /// Overcharge level the effect was cast at.
    pub level: u8,
    /// Turns left before the creature-update layer removes it.
    pub remaining: u32,
    /// Magnitude taken from the power table at cast time.
    pub potency: i32,
}

/// Kinds of effects powers attach.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumCount, strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum EffectKind {
    Heal,
    Speed,
    Armour,
    Invisibility,
    Disease,
    Chicken,
}

impl ActiveEffects {
    pub fn empty() -> Self {
        Self {
            effects: ArrayVec::new(),
        }
    }

    /// Checks if an effect of `kind` is attached.
    pub fn has(&self, kind: EffectKind) -> bool {
        self.effects.iter().any(|e| e.kind == kind)
    }

    pub fn get(&self, kind: EffectKind) -> Option<&ActiveEffect> {
        self.effects.iter().find(|e| e.kind == kind)
    }

    /// Attaches `effect`, refreshing an existing one of the same kind.
    ///
    /// Returns false when the list is full and the kind is not present.
    pub fn attach(&mut self, effect: ActiveEffect) -> bool {
        if let Some(existing) = self.effects.iter_mut().find(|e| e.kind == effect.kind) {
            *existing = effect;
            return true;
        }
        self.effects.try_push(effect).is_ok()
    }

    pub fn remove(&mut self, kind: EffectKind) {
        self.effects.retain(|e| e.kind != kind);
    }

    pub fn iter(&self) -> impl Iterator<Item = &ActiveEffect> {
        self.effects.iter()
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}
