//! Targeting matrix: may a power hit this subtile, or this thing?
//!
//! Both predicates are pure. They read the caster's diplomacy, visibility and
//! cooldown state but never mutate anything.

use crate::catalog::{CastFlags, PowerKind};
use crate::env::{CellFlags, MagicEnv, OracleError, SlabKind, TerrainCell};
use crate::state::{GameState, PlayerId, SubtileCoord, Thing, ThingClass};

use super::sight::power_sight_explored;

/// Ownership sub-flags of one geometry branch, in precedence order.
struct OwnershipFlags {
    all: CastFlags,
    neutral: CastFlags,
    owned: CastFlags,
    allied: CastFlags,
    enemy: CastFlags,
}

const TALL: OwnershipFlags = OwnershipFlags {
    all: CastFlags::ALL_TALL,
    neutral: CastFlags::NEUTRAL_TALL,
    owned: CastFlags::OWNED_TALL,
    allied: CastFlags::ALLIED_TALL,
    enemy: CastFlags::ENEMY_TALL,
};

const GROUND: OwnershipFlags = OwnershipFlags {
    all: CastFlags::ALL_GROUND,
    neutral: CastFlags::NEUTRAL_GROUND,
    owned: CastFlags::OWNED_GROUND,
    allied: CastFlags::ALLIED_GROUND,
    enemy: CastFlags::ENEMY_GROUND,
};

/// Whether `caster` may cast `power` at subtile `stl`.
///
/// `extra` widens the power's own flags (e.g. a call-to-arms placed by a
/// computer player).
///
/// # Errors
///
/// Fails if the catalog or terrain is missing, the power has no catalog
/// entry, or `stl` lies outside the map.
pub fn can_cast_at_location(
    state: &GameState,
    env: &MagicEnv<'_>,
    caster: PlayerId,
    power: PowerKind,
    stl: SubtileCoord,
    extra: CastFlags,
) -> Result<bool, OracleError> {
    let flags = env.power(power)?.cast_flags | extra;
    let cell = env
        .terrain()?
        .cell(stl)
        .ok_or(OracleError::SubtileOutOfBounds(stl))?;
    let cast_delay = env.config()?.cast_delay_turns;
    Ok(location_allows(state, caster, flags, stl, &cell, cast_delay))
}

fn location_allows(
    state: &GameState,
    caster: PlayerId,
    flags: CastFlags,
    stl: SubtileCoord,
    cell: &TerrainCell,
    cast_delay: u64,
) -> bool {
    if !flags.has(CastFlags::ALLOW_UNREVEALED) && !cell.is_revealed_to(caster) {
        // The sight-of-evil eye may stand in for real exploration.
        if !flags.has(CastFlags::ALLOW_TEMP_REVEAL) || !power_sight_explored(state, caster, stl)
        {
            return false;
        }
    }
    if flags.has(CastFlags::ALLOW_ANYWHERE) {
        return true;
    }
    if flags.has(CastFlags::REQUIRES_CAST_DELAY) {
        let last = state
            .player(caster)
            .and_then(|player| player.control.last_lightning_turn);
        if last.is_some_and(|last| state.game_turn <= last.saturating_add(cast_delay)) {
            return false;
        }
    }

    let branch = if cell.is_tall() {
        if flags.has(CastFlags::CLAIMABLE)
            && (cell
                .flags
                .intersects(CellFlags::DOOR | CellFlags::ROOM | CellFlags::RESERVED)
                || cell.slab == SlabKind::Rock)
        {
            return false;
        }
        &TALL
    } else {
        if flags.has(CastFlags::CLAIMABLE) && cell.slab.is_liquid() {
            return false;
        }
        &GROUND
    };

    if flags.has(branch.all) {
        return true;
    }
    let owner = cell.owner;
    (flags.has(branch.neutral) && owner.is_neutral())
        || (flags.has(branch.owned) && owner == caster)
        || (flags.has(branch.allied)
            && owner != caster
            && state.players_are_mutual_allies(caster, owner))
        || (flags.has(branch.enemy) && state.players_are_enemies(caster, owner))
}

/// Whether `caster` may cast `power` on `thing`.
///
/// # Errors
///
/// Fails if the catalog is missing or has no entry for `power`.
pub fn can_cast_on_thing(
    state: &GameState,
    env: &MagicEnv<'_>,
    caster: PlayerId,
    power: PowerKind,
    thing: &Thing,
) -> Result<bool, OracleError> {
    let flags = env.power(power)?.cast_flags;
    Ok(thing_allows(state, caster, flags, thing))
}

fn thing_allows(state: &GameState, caster: PlayerId, flags: CastFlags, thing: &Thing) -> bool {
    if thing.picked_up {
        return false;
    }
    match &thing.class {
        ThingClass::Object(object) => {
            thing.owner == caster
                && ((flags.has(CastFlags::OWNED_FOOD) && object.is_mature_food())
                    || (flags.has(CastFlags::OWNED_GOLD) && object.is_gold())
                    || (flags.has(CastFlags::OWNED_SPELLBOOK) && object.is_spellbook()))
        }
        ThingClass::Creature(_) => {
            if flags.has(CastFlags::ALL_CREATURES) {
                return true;
            }
            let custody = thing.in_enemy_custody();
            (flags.has(CastFlags::OWNED_CREATURES) && thing.owner == caster && !custody)
                || (flags.has(CastFlags::ALLIED_CREATURES)
                    && state.players_are_mutual_allies(caster, thing.owner)
                    && !custody)
                || (flags.has(CastFlags::CUSTODY_CREATURES) && custody)
                || (flags.has(CastFlags::ENEMY_CREATURES)
                    && state.players_are_enemies(caster, thing.owner))
        }
        ThingClass::Shot(_) | ThingClass::Effect(_) => false,
    }
}
