use crate::catalog::{CastFlags, PowerKind};
use crate::env::Sample;
use crate::power::sight::sight_recharge_turn;
use crate::power::{CastContext, CastError, LocationCast, Resolution};
use crate::state::{ObjectKind, SightOfEvil, ThingClass};

/// Sight of evil: one eye per keeper; recasting recharges it instead.
pub(super) fn sight(ctx: &mut CastContext<'_>, cast: LocationCast) -> Result<Resolution, CastError> {
    let stats = ctx.power(PowerKind::Sight)?;
    let config = ctx.config()?;
    let turn = ctx.turn();
    let existing = ctx.player()?.dungeon.sight;

    if let Some(eye) = existing.eye {
        if let Some(born) = ctx.state.things.get(eye).map(|thing| thing.creation_turn) {
            let now = i64::try_from(turn).unwrap_or(i64::MAX);
            let magnitude = stats.magnitude_at(existing.level);
            let base = now - i64::from(magnitude);
            let sight = &mut ctx.player_mut()?.dungeon.sight;
            sight.recharge_turn =
                sight_recharge_turn(now, existing.recharge_turn, magnitude, existing.level);
            // An old eye gets pulled over to the new target.
            if base < i64::try_from(born).unwrap_or(i64::MAX) {
                sight.retarget = Some(cast.stl);
            }
            return Ok(Resolution::Unchanged);
        }
    }

    ctx.ensure_location(PowerKind::Sight, cast.stl, CastFlags::empty())?;
    ctx.ensure_thing_slot()?;
    ctx.pay(PowerKind::Sight, cast.level)?;

    let caster = ctx.caster;
    let eye = ctx.state.things.spawn(
        caster,
        cast.stl.center().with_z(config.sight_eye_height),
        turn,
        ThingClass::Object(ObjectKind::SightEye),
    )?;
    ctx.player_mut()?.dungeon.sight = SightOfEvil {
        eye: Some(eye),
        level: cast.level,
        recharge_turn: i64::try_from(turn).unwrap_or(i64::MAX),
        origin: cast.stl,
        explored_radius: 0,
        retarget: None,
    };
    ctx.thing_sound(eye, Sample::SIGHT);
    Ok(Resolution::Applied)
}
