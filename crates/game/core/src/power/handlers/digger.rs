use tracing::error;

use crate::catalog::{CastFlags, PowerKind};
use crate::env::{CreatureSound, Cue, SeedContext, compute_seed};
use crate::power::{CastContext, CastError, LocationCast, Resolution, SlotKind};
use crate::state::{Behavior, Coord3d, ThingClass};

/// Horizontal push range of a freshly dropped digger.
const IMPULSE_SPREAD: u16 = 80;
const IMPULSE_LIFT: i32 = 160;

/// Summons the caster's digger breed at `cast.stl`.
///
/// Slots are checked before payment so an exhausted table never costs gold.
/// The price does not scale with overcharge.
pub(super) fn create_digger(
    ctx: &mut CastContext<'_>,
    cast: LocationCast,
) -> Result<Resolution, CastError> {
    ctx.ensure_location(PowerKind::CreateDigger, cast.stl, CastFlags::empty())?;
    if !ctx.state.things.has_free_control_slot() {
        return Err(CastError::ResourceExhausted(SlotKind::CreatureControl));
    }
    ctx.ensure_thing_slot()?;

    let config = ctx.config()?;
    let floor = ctx
        .env
        .terrain()?
        .cell(cast.stl)
        .map_or(0, |cell| cell.floor_height);
    let rng = ctx.env.rng()?;
    ctx.pay(PowerKind::CreateDigger, 0)?;

    let caster = ctx.caster;
    let turn = ctx.turn();
    let game_seed = ctx.state.game_seed;
    let seed = |context| compute_seed(game_seed, turn, caster.0, context);
    let impulse = Coord3d::new(
        rng.spread(seed(SeedContext::ImpulseX), IMPULSE_SPREAD),
        rng.spread(seed(SeedContext::ImpulseY), IMPULSE_SPREAD),
        IMPULSE_LIFT,
    );

    let mut digger = ctx.player()?.dungeon.digger.instantiate();
    digger.behavior = Behavior::DiggerBirth;
    digger.impulse = impulse;

    let position = cast.stl.center().with_z(floor + config.digger_drop_height);
    match ctx
        .state
        .things
        .spawn(caster, position, turn, ThingClass::Creature(digger))
    {
        Ok(thing) => ctx.emit(Cue::CreatureSound {
            thing,
            sound: CreatureSound::Born,
        }),
        // Slots were free a moment ago; the gold is already spent.
        Err(err) => error!(%caster, error = %err, "digger creation failed after payment"),
    }
    Ok(Resolution::Applied)
}
