//! Gold deduction and the overcharge tracker.

use crate::catalog::{PowerKind, PowerStats};
use crate::state::{GameState, PlayerId, PlayerState};

use super::CastError;

/// Price `caster` pays for `stats` at `level`.
///
/// The digger summon gets cheaper the more diggers have been sacrificed
/// relative to those alive: `cost * max(1, alive - sacrificed + 1) / 2`.
pub fn power_price(state: &GameState, caster: PlayerId, stats: &PowerStats, level: u8) -> u64 {
    let cost = u64::from(stats.cost_at(level));
    match stats.kind {
        PowerKind::CreateDigger => {
            let Some(player) = state.player(caster) else {
                return cost;
            };
            let model = player.dungeon.digger.model;
            let alive = i64::try_from(state.things.creatures_of(caster, model).count())
                .unwrap_or(i64::MAX);
            let factor = alive
                .saturating_sub(i64::from(player.dungeon.sacrificed(model)))
                .saturating_add(1)
                .max(1);
            cost.saturating_mul(u64::try_from(factor).unwrap_or(1)) / 2
        }
        _ => cost,
    }
}

/// Deducts the price of `stats` at `level` from the caster's funds.
///
/// Either the full price is taken or nothing changes.
///
/// # Errors
///
/// `InsufficientFunds` when the caster cannot afford it, `UnknownPlayer` for
/// unregistered casters.
pub fn pay_for_power(
    state: &mut GameState,
    caster: PlayerId,
    stats: &PowerStats,
    level: u8,
) -> Result<u64, CastError> {
    let price = power_price(state, caster, stats, level);
    let player = state
        .player_mut(caster)
        .ok_or(CastError::UnknownPlayer(caster))?;
    let funds = player.dungeon.funds;
    if funds < price {
        return Err(CastError::InsufficientFunds { price, funds });
    }
    player.dungeon.funds = funds - price;
    Ok(price)
}

/// Advances the overcharge accumulator by one input tick.
///
/// Raises the level while the next one is affordable; otherwise drops to the
/// highest affordable level (accumulator reset to zero if none is). Returns
/// whether the resulting level is still below `max_level`.
pub fn update_overcharge(player: &mut PlayerState, stats: &PowerStats, max_level: u8) -> bool {
    let funds = player.dungeon.funds;
    let max = i32::from(max_level);
    let accumulator = &mut player.control.overcharge_accumulator;
    let affordable = |level: i32| {
        u8::try_from(level).is_ok_and(|level| u64::from(stats.cost_at(level)) <= funds)
    };

    let mut level = (accumulator.saturating_add(1) >> 2).min(max);
    if affordable(level) {
        *accumulator = accumulator.saturating_add(1);
    } else {
        while level >= 0 && !affordable(level) {
            level -= 1;
        }
        *accumulator = if level >= 0 { (level << 2) + 1 } else { 0 };
    }
    level < max
}
