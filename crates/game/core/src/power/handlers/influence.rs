//! Powers acting through the keeper's hand: picking up and possessing.

use crate::power::{CastContext, CastError, Resolution, SlotKind, Target, ThingCast};
use crate::state::PlayerInstance;

pub(super) fn hand(ctx: &mut CastContext<'_>, cast: ThingCast) -> Result<Resolution, CastError> {
    let limit = ctx.config()?.hand_limit();
    let caster = ctx.caster;
    if ctx.thing(cast.thing)?.owner != caster {
        return Err(CastError::IneligibleTarget {
            power: cast.power,
            target: Target::Thing,
        });
    }
    if ctx.player()?.control.hand.len() >= limit {
        return Err(CastError::ResourceExhausted(SlotKind::Hand));
    }

    let player = ctx.player_mut()?;
    if player.control.hand.try_push(cast.thing).is_err() {
        return Err(CastError::ResourceExhausted(SlotKind::Hand));
    }
    if let Some(thing) = ctx.state.things.get_mut(cast.thing) {
        thing.picked_up = true;
    }
    Ok(Resolution::Applied)
}

/// Moves the caster's camera into the creature. Free of charge.
pub(super) fn possess(ctx: &mut CastContext<'_>, cast: ThingCast) -> Result<Resolution, CastError> {
    ctx.creature(cast.power, cast.thing)?;
    let control = &mut ctx.player_mut()?.control;
    control.influenced = Some(cast.thing);
    control.instance = Some(PlayerInstance::Possess);
    Ok(Resolution::Applied)
}
