//! Dungeon-wide powers cast without a target.

use crate::catalog::PowerKind;
use crate::env::{Cue, Sample};
use crate::power::{CastContext, CastError, Resolution};
use crate::state::{Armageddon, Behavior, CreatureModel, ThingId};

use super::terrain::rally_creatures;

/// Toggles must-obey mode.
///
/// The mode is paid for while it lasts, not when toggled, so the cast itself
/// is free.
pub(super) fn obey(ctx: &mut CastContext<'_>, _level: u8) -> Result<Resolution, CastError> {
    let turn = ctx.turn();
    let dungeon = &mut ctx.player_mut()?.dungeon;
    let enabled = match dungeon.must_obey_since {
        Some(_) => {
            dungeon.must_obey_since = None;
            false
        }
        None => {
            dungeon.must_obey_since = Some(turn);
            true
        }
    };
    if enabled {
        ctx.emit(Cue::GlobalSound(Sample::OBEY));
    }
    update_speed_of_model(ctx, CreatureModel::ANY, enabled);
    Ok(Resolution::Applied)
}

/// Recomputes max speed of the caster's creatures of `model`.
fn update_speed_of_model(ctx: &mut CastContext<'_>, model: CreatureModel, must_obey: bool) {
    let caster = ctx.caster;
    let roster: Vec<ThingId> = ctx
        .state
        .things
        .creatures_of(caster, model)
        .map(|thing| thing.id)
        .collect();
    for id in roster {
        let creature = ctx
            .state
            .things
            .get_mut(id)
            .and_then(|thing| thing.creature_mut());
        if let Some(creature) = creature {
            creature.max_speed = creature.compute_max_speed(must_obey);
        }
    }
}

/// Calls every free creature of the caster to the dungeon heart.
pub(super) fn hold_audience(ctx: &mut CastContext<'_>, level: u8) -> Result<Resolution, CastError> {
    if ctx.player()?.dungeon.hold_audience_turn.is_some() {
        return Ok(Resolution::Unchanged);
    }
    ctx.pay(PowerKind::HoldAudience, level)?;
    let turn = ctx.turn();
    ctx.player_mut()?.dungeon.hold_audience_turn = Some(turn);
    rally_creatures(ctx, Behavior::ArriveAtAudience);
    Ok(Resolution::Applied)
}

/// Starts the final battle. Only one may ever run per game.
pub(super) fn armageddon(ctx: &mut CastContext<'_>, level: u8) -> Result<Resolution, CastError> {
    if ctx.state.armageddon.is_some() {
        return Ok(Resolution::Unchanged);
    }
    ctx.pay(PowerKind::Armageddon, level)?;
    let since = ctx.turn();
    ctx.state.armageddon = Some(Armageddon {
        caster: ctx.caster,
        since,
    });
    Ok(Resolution::Applied)
}
