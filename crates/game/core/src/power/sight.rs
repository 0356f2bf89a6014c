//! Sight-of-evil recharge timer and explored window.

use crate::catalog::PowerKind;
use crate::config::MagicConfig;
use crate::env::{MagicEnv, OracleError};
use crate::state::{GameState, PlayerId, SubtileCoord};

/// Decaying recharge recurrence of the sight-of-evil eye.
///
/// All divisions truncate toward zero; peers must agree on every bit.
pub fn sight_recharge_turn(turn: i64, recharge_turn: i64, magnitude: i32, level: u8) -> i64 {
    let capacity = i64::from((magnitude / 4).unsigned_abs()) >> 2;
    let elapsed = (turn - recharge_turn).clamp(0, capacity);
    let base = turn - i64::from(magnitude);
    let slot = usize::from(level.min(MagicConfig::MAX_OVERCHARGE_LEVEL));
    let instance_time = MagicConfig::SIGHT_CLOSE_INSTANCE_TIME[slot];
    let divisor = (capacity / instance_time).max(1);
    base + elapsed / divisor - instance_time
}

/// Whether the caster's eye has explored `stl`.
pub fn power_sight_explored(state: &GameState, player: PlayerId, stl: SubtileCoord) -> bool {
    state
        .player(player)
        .is_some_and(|player| player.dungeon.sight.covers(stl))
}

/// Starts closing the caster's eye by rewinding its recharge timer.
///
/// Does nothing when the caster has no eye.
///
/// # Errors
///
/// Fails if the catalog has no sight-of-evil entry.
pub fn turn_off_sight_of_evil(
    state: &mut GameState,
    env: &MagicEnv<'_>,
    player: PlayerId,
) -> Result<(), OracleError> {
    let stats = env.power(PowerKind::Sight)?;
    let turn = i64::try_from(state.game_turn).unwrap_or(i64::MAX);
    let Some(player) = state.player_mut(player) else {
        return Ok(());
    };
    let sight = &mut player.dungeon.sight;
    if !sight.is_active() {
        return Ok(());
    }
    sight.recharge_turn = sight_recharge_turn(
        turn,
        sight.recharge_turn,
        stats.magnitude_at(sight.level),
        sight.level,
    );
    Ok(())
}

/// Grows the explored window of the caster's eye with its age.
///
/// The radius widens by one subtile every `sight_reveal_step` turns, up to
/// [`MagicConfig::SIGHT_WINDOW_RADIUS`]. A stale eye reference is cleared.
///
/// # Errors
///
/// Fails if the configuration is missing.
pub fn update_power_sight_explored(
    state: &mut GameState,
    env: &MagicEnv<'_>,
    player: PlayerId,
) -> Result<(), OracleError> {
    let step = env.config()?.sight_reveal_step;
    let turn = state.game_turn;
    let Some(eye) = state
        .player(player)
        .and_then(|player| player.dungeon.sight.eye)
    else {
        return Ok(());
    };
    let born = state.things.get(eye).map(|thing| thing.creation_turn);
    let Some(player) = state.player_mut(player) else {
        return Ok(());
    };
    let sight = &mut player.dungeon.sight;
    match born {
        Some(born) => {
            let age = turn.saturating_sub(born);
            let grown = age.checked_div(step).unwrap_or(u64::MAX);
            sight.explored_radius =
                u8::try_from(grown).map_or(MagicConfig::SIGHT_WINDOW_RADIUS, |radius| {
                    radius.min(MagicConfig::SIGHT_WINDOW_RADIUS)
                });
        }
        None => {
            sight.eye = None;
            sight.explored_radius = 0;
        }
    }
    Ok(())
}
