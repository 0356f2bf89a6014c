use crate::catalog::PowerKind;
use crate::env::{CreatureSound, Cue};
use crate::power::permission::can_cast_on_thing;
use crate::power::{CastContext, CastError, LocationCast, Resolution, ThingCast};
use crate::state::{Behavior, PlayerInstance, SUBTILE_SIZE, ThingId};

/// Starts a whip on `cast.thing`.
///
/// A slap still animating, or one landed within the cooldown, makes the cast
/// a no-op. Slapping is free.
pub(super) fn slap_thing(ctx: &mut CastContext<'_>, cast: ThingCast) -> Result<Resolution, CastError> {
    ctx.thing(cast.thing)?;
    let cooldown = ctx.config()?.slap_cooldown_turns;
    let turn = ctx.turn();
    let player = ctx.player()?;
    if player.control.instance == Some(PlayerInstance::Whip) {
        return Ok(Resolution::Unchanged);
    }
    let cooling = player
        .dungeon
        .last_slap_turn
        .is_some_and(|last| turn.saturating_sub(last) <= cooldown);
    if cooling {
        return Ok(Resolution::Unchanged);
    }

    let player = ctx.player_mut()?;
    player.control.influenced = Some(cast.thing);
    player.control.instance = Some(PlayerInstance::Whip);
    player.dungeon.num_slaps = player.dungeon.num_slaps.saturating_add(1);
    Ok(Resolution::Applied)
}

/// Slaps the nearest slappable thing around `cast.stl`.
pub(super) fn slap_location(
    ctx: &mut CastContext<'_>,
    cast: LocationCast,
) -> Result<Resolution, CastError> {
    let radius = i32::from(ctx.config()?.slap_search_radius) * SUBTILE_SIZE;
    let center = cast.stl.center();
    let limit = i64::from(radius) * i64::from(radius);

    let mut nearest: Option<(i64, ThingId)> = None;
    for thing in ctx.state.things.iter() {
        let distance = thing.position.planar_distance_sq(center);
        if distance > limit {
            continue;
        }
        if !can_cast_on_thing(&*ctx.state, &ctx.env, ctx.caster, PowerKind::Slap, thing)? {
            continue;
        }
        // Things are visited in id order, so ties keep the lowest id.
        if nearest.is_none_or(|(best, _)| distance < best) {
            nearest = Some((distance, thing.id));
        }
    }
    let Some((_, thing)) = nearest else {
        return Err(CastError::NoTargetNear {
            power: PowerKind::Slap,
            stl: cast.stl,
        });
    };

    slap_thing(
        ctx,
        ThingCast {
            power: cast.power,
            level: cast.level,
            thing,
            stl: cast.stl,
        },
    )
}

/// Lands the caster's pending slap on `thing`.
///
/// Ends the whip instance and starts the slap cooldown.
pub fn slap_creature(ctx: &mut CastContext<'_>, thing: ThingId) -> Result<(), CastError> {
    let duration = ctx.power(PowerKind::Slap)?.duration;
    let turn = ctx.turn();
    let owner = ctx.thing(thing)?.owner;
    let owner_must_obey = ctx
        .state
        .player(owner)
        .is_some_and(|owner| owner.dungeon.must_obey());

    let creature = ctx.creature_mut(PowerKind::Slap, thing)?;
    creature.anger = creature.anger.saturating_add(creature.annoy_slapped);
    if creature.slaps_to_kill > 0 {
        let damage = creature.max_health / i32::from(creature.slaps_to_kill);
        creature.health = creature.health.saturating_sub(damage);
    }
    let first_slap = creature.slap_turns == 0;
    creature.slap_turns = duration;
    if first_slap {
        creature.max_speed = creature.compute_max_speed(owner_must_obey);
    }
    if creature.behavior != Behavior::SlapCowers {
        if creature.behavior == Behavior::Sleeping {
            creature.anger = creature.anger.saturating_add(creature.annoy_woken_up);
        }
        creature.behavior_backup = Some(creature.behavior);
        creature.behavior = Behavior::SlapCowers;
    }
    ctx.emit(Cue::CreatureSound {
        thing,
        sound: CreatureSound::Slapped,
    });

    let player = ctx.player_mut()?;
    if player.control.instance == Some(PlayerInstance::Whip) {
        player.control.instance = None;
    }
    player.dungeon.last_slap_turn = Some(turn);
    Ok(())
}
