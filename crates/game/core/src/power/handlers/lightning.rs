use tracing::debug;

use crate::catalog::{CastFlags, PowerKind};
use crate::env::Sample;
use crate::power::sight::power_sight_explored;
use crate::power::{CastContext, CastError, LocationCast, Resolution, ThingCast};
use crate::state::{
    Coord3d, EffectThing, EffectThingKind, GameState, ObjectKind, PlayerId, ShotKind, ShotThing,
    SubtileCoord, ThingClass,
};

/// Camera shake requested for the caster after a strike.
const CAMERA_DEVIATE_JUMP: u16 = 256;

/// Strength of a strike before distance falloff.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LightningStrength {
    pub max_damage: i32,
    /// Box distance, in map units, within which creatures are hurt.
    pub range: i64,
}

impl LightningStrength {
    /// `magnitude * shot_damage` damage over `magnitude * 128` units; a strike
    /// on a subtile the caster only sees through the eye does a quarter.
    pub fn new(magnitude: i32, shot_damage: i32, sight_explored: bool) -> Self {
        let mut max_damage = magnitude.saturating_mul(shot_damage);
        if sight_explored {
            max_damage /= 4;
        }
        Self {
            max_damage,
            range: (i64::from(magnitude) << 8) / 2,
        }
    }
}

pub(super) fn lightning_on_thing(
    ctx: &mut CastContext<'_>,
    cast: ThingCast,
) -> Result<Resolution, CastError> {
    lightning_at(ctx, cast.level, cast.stl)
}

pub(super) fn lightning_on_location(
    ctx: &mut CastContext<'_>,
    cast: LocationCast,
) -> Result<Resolution, CastError> {
    lightning_at(ctx, cast.level, cast.stl)
}

fn lightning_at(
    ctx: &mut CastContext<'_>,
    level: u8,
    stl: SubtileCoord,
) -> Result<Resolution, CastError> {
    ctx.ensure_location(PowerKind::Lightning, stl, CastFlags::empty())?;
    let stats = ctx.power(PowerKind::Lightning)?;
    let config = ctx.config()?;
    let floor = ctx.env.terrain()?.cell(stl).map_or(0, |cell| cell.floor_height);

    ctx.pay(PowerKind::Lightning, level)?;

    let caster = ctx.caster;
    let turn = ctx.turn();
    let center = stl.center();
    let shot = ctx
        .state
        .things
        .spawn(
            caster,
            center.with_z(floor + config.lightning_shot_height),
            turn,
            ThingClass::Shot(ShotThing {
                kind: ShotKind::Lightning,
                level,
            }),
        )
        .ok();

    let strength = LightningStrength::new(
        stats.magnitude_at(level),
        config.lightning_shot_damage,
        power_sight_explored(&*ctx.state, caster, stl),
    );
    // The scorch mark is cosmetic; no free slot simply means no mark.
    let _ = ctx.state.things.spawn(
        caster,
        center,
        turn,
        ThingClass::Object(ObjectKind::LightningMark),
    );
    let affected = electricity_affecting_area(ctx.state, center, caster, strength);
    debug!(
        affected,
        range = strength.range,
        damage = strength.max_damage,
        "lightning struck"
    );

    if let Some(shot) = shot {
        let position = ctx
            .state
            .things
            .get(shot)
            .map_or(center, |thing| thing.position);
        let effect = ctx.state.things.spawn(
            caster,
            position,
            turn,
            ThingClass::Effect(EffectThing {
                kind: EffectThingKind::LightningStrike,
                level,
                magnitude: strength.max_damage,
            }),
        );
        if let Ok(effect) = effect {
            ctx.thing_sound(effect, Sample::LIGHTNING);
        }
    }

    let player = ctx.player_mut()?;
    player.dungeon.camera_deviate_jump = CAMERA_DEVIATE_JUMP;
    player.control.last_lightning_turn = Some(turn);
    Ok(Resolution::Applied)
}

/// Damages every creature not allied with `caster` within `strength.range`.
///
/// Damage falls off linearly with box distance. Returns the number of
/// creatures hurt.
pub fn electricity_affecting_area(
    state: &mut GameState,
    center: Coord3d,
    caster: PlayerId,
    strength: LightningStrength,
) -> usize {
    if strength.range <= 0 || strength.max_damage <= 0 {
        return 0;
    }
    let victims: Vec<_> = state
        .things
        .iter()
        .filter(|thing| thing.is_creature() && !thing.picked_up)
        .filter(|thing| !state.players_are_mutual_allies(caster, thing.owner))
        .filter_map(|thing| {
            let distance = thing.position.box_distance(center);
            (distance < strength.range).then_some((thing.id, distance))
        })
        .collect();

    let mut affected = 0;
    for (id, distance) in victims {
        let damage = i128::from(strength.max_damage) * i128::from(strength.range - distance)
            / i128::from(strength.range);
        let damage = i32::try_from(damage).unwrap_or(i32::MAX);
        if damage <= 0 {
            continue;
        }
        if let Some(creature) = state.things.get_mut(id).and_then(|thing| thing.creature_mut()) {
            creature.health = creature.health.saturating_sub(damage);
            affected += 1;
        }
    }
    affected
}
