//! Powers aimed at a patch of the map.

use tracing::debug;

use crate::catalog::{CastFlags, PowerKind};
use crate::power::{CastContext, CastError, LocationCast, Resolution, ThingCast};
use crate::state::{
    Behavior, CallToArms, CreatureModel, CreatureTraits, EffectThing, EffectThingKind,
    ObjectKind, SubtileCoord, ThingClass, ThingId,
};

pub(super) fn call_to_arms_on_thing(
    ctx: &mut CastContext<'_>,
    cast: ThingCast,
) -> Result<Resolution, CastError> {
    call_to_arms(ctx, cast.level, cast.stl, CastFlags::empty())
}

pub(super) fn call_to_arms_on_location(
    ctx: &mut CastContext<'_>,
    cast: LocationCast,
) -> Result<Resolution, CastError> {
    call_to_arms(ctx, cast.level, cast.stl, cast.allow_flags)
}

/// Plants the rally banner, or moves it if one is already up.
fn call_to_arms(
    ctx: &mut CastContext<'_>,
    level: u8,
    stl: SubtileCoord,
    allow_flags: CastFlags,
) -> Result<Resolution, CastError> {
    ctx.ensure_location(PowerKind::CallToArms, stl, allow_flags)?;
    let turn = ctx.turn();
    let caster = ctx.caster;

    let active = ctx.player()?.dungeon.call_to_arms;
    if let Some(rally) = active {
        if let Some(banner) = ctx.state.things.get_mut(rally.banner) {
            banner.position = stl.center();
            if let Some(rally) = ctx.player_mut()?.dungeon.call_to_arms.as_mut() {
                rally.target = stl;
            }
            return Ok(Resolution::Unchanged);
        }
    }

    ctx.ensure_thing_slot()?;
    ctx.pay(PowerKind::CallToArms, level)?;
    let banner = ctx.state.things.spawn(
        caster,
        stl.center(),
        turn,
        ThingClass::Object(ObjectKind::Banner),
    )?;
    ctx.player_mut()?.dungeon.call_to_arms = Some(CallToArms {
        banner,
        target: stl,
        level,
        since: turn,
    });
    let rallied = rally_creatures(ctx, Behavior::ArriveAtCallToArms);
    debug!(%caster, rallied, "call to arms planted");
    Ok(Resolution::Applied)
}

/// Sends every free creature of the caster to `behavior`; diggers stay put.
///
/// Returns how many creatures answered.
pub(super) fn rally_creatures(ctx: &mut CastContext<'_>, behavior: Behavior) -> usize {
    let caster = ctx.caster;
    let free: Vec<ThingId> = ctx
        .state
        .things
        .creatures_of(caster, CreatureModel::ANY)
        .filter(|thing| !thing.picked_up && !thing.in_enemy_custody())
        .filter(|thing| {
            thing
                .creature()
                .is_some_and(|creature| !creature.traits.contains(CreatureTraits::DIGGER))
        })
        .map(|thing| thing.id)
        .collect();
    for id in &free {
        let creature = ctx
            .state
            .things
            .get_mut(*id)
            .and_then(|thing| thing.creature_mut());
        if let Some(creature) = creature {
            creature.behavior = behavior;
        }
    }
    free.len()
}

pub(super) fn cave_in(ctx: &mut CastContext<'_>, cast: LocationCast) -> Result<Resolution, CastError> {
    terrain_effect(ctx, cast, EffectThingKind::CaveIn)
}

pub(super) fn destroy_walls(
    ctx: &mut CastContext<'_>,
    cast: LocationCast,
) -> Result<Resolution, CastError> {
    terrain_effect(ctx, cast, EffectThingKind::DestroyWalls)
}

/// Leaves an effect entity for the terrain system to resolve.
fn terrain_effect(
    ctx: &mut CastContext<'_>,
    cast: LocationCast,
    kind: EffectThingKind,
) -> Result<Resolution, CastError> {
    ctx.ensure_location(cast.power, cast.stl, CastFlags::empty())?;
    ctx.ensure_thing_slot()?;
    let magnitude = ctx.power(cast.power)?.magnitude_at(cast.level);
    ctx.pay(cast.power, cast.level)?;

    let caster = ctx.caster;
    let turn = ctx.turn();
    ctx.state.things.spawn(
        caster,
        cast.stl.center(),
        turn,
        ThingClass::Effect(EffectThing {
            kind,
            level: cast.level,
            magnitude,
        }),
    )?;
    Ok(Resolution::Applied)
}

/// Only the targeting check; the bomb itself is not simulated.
pub(super) fn time_bomb(ctx: &mut CastContext<'_>, cast: LocationCast) -> Result<Resolution, CastError> {
    ctx.ensure_location(PowerKind::TimeBomb, cast.stl, CastFlags::empty())?;
    Ok(Resolution::Unchanged)
}
