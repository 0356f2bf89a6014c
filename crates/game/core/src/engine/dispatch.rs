//! Cast validation, routing and outcome normalization.

use tracing::{debug, error, warn};

use crate::catalog::{CastFlags, EntryPoint};
use crate::env::{CueSink, MagicEnv};
use crate::error::{ErrorSeverity, GameError};
use crate::power::permission::{can_cast_at_location, can_cast_on_thing};
use crate::power::{
    CastContext, CastError, CastOutcome, CastRequest, CastTarget, LocationCast, Resolution,
    Target, ThingCast, handlers_for,
};
use crate::state::{GameState, PlayerId};

/// Runs one cast through the pipeline and normalizes its outcome.
///
/// Phases:
/// 1. `validate` - caster, availability and targeting, without mutation
/// 2. `resolve` - the handler registered for the power and entry point
pub(super) fn cast(
    state: &mut GameState,
    env: MagicEnv<'_>,
    cues: &mut dyn CueSink,
    local_player: Option<PlayerId>,
    request: &CastRequest,
) -> CastOutcome {
    let result = validate(state, &env, request).and_then(|level| {
        let mut ctx = CastContext::new(state, env, &mut *cues, request.caster);
        resolve(&mut ctx, request, level)
    });

    if let Err(error) = &result {
        report(request, error);
        if local_player == Some(request.caster) {
            cues.emit(error.rejection_cue());
        }
    }
    CastOutcome::from(result)
}

/// Checks everything that must hold before a handler runs.
///
/// Returns the clamped level.
fn validate(state: &GameState, env: &MagicEnv<'_>, request: &CastRequest) -> Result<u8, CastError> {
    let caster = request.caster;
    let player = state
        .player(caster)
        .ok_or(CastError::UnknownPlayer(caster))?;
    if !player.dungeon.available_powers.contains(request.power) {
        return Err(CastError::Unavailable {
            caster,
            power: request.power,
        });
    }

    if let CastTarget::Thing { thing, stl } = request.target {
        let target = state
            .things
            .get(thing)
            .ok_or(CastError::ThingNotFound(thing))?;
        let flags = env.power(request.power)?.cast_flags;
        let at_location =
            can_cast_at_location(state, env, caster, request.power, stl, CastFlags::empty())?;
        let on_thing = can_cast_on_thing(state, env, caster, request.power, target)?;

        if flags.has(CastFlags::THING_OR_MAP) {
            if !at_location && !on_thing {
                return Err(CastError::IneligibleTarget {
                    power: request.power,
                    target: Target::ThingOrSubtile,
                });
            }
        } else if !on_thing {
            return Err(CastError::IneligibleTarget {
                power: request.power,
                target: Target::Thing,
            });
        } else if !at_location {
            return Err(CastError::IneligibleTarget {
                power: request.power,
                target: Target::Subtile,
            });
        }
    }

    let level = env.config()?.clamp_level(request.level);
    if level != request.level {
        warn!(
            %caster,
            power = %request.power,
            requested = request.level,
            level,
            "overcharge level clamped"
        );
    }
    Ok(level)
}

/// Routes to the handler of the request's power and entry point.
fn resolve(
    ctx: &mut CastContext<'_>,
    request: &CastRequest,
    level: u8,
) -> Result<Resolution, CastError> {
    let handlers = handlers_for(request.power);
    let unsupported = |entry| CastError::UnsupportedPower {
        power: request.power,
        entry,
    };

    match request.target {
        CastTarget::Thing { thing, stl } => {
            let handler = handlers
                .on_thing
                .ok_or_else(|| unsupported(EntryPoint::OnThing))?;
            handler(
                ctx,
                ThingCast {
                    power: request.power,
                    level,
                    thing,
                    stl,
                },
            )
        }
        CastTarget::Location { stl, allow_flags } => {
            let handler = handlers
                .on_location
                .ok_or_else(|| unsupported(EntryPoint::OnLocation))?;
            handler(
                ctx,
                LocationCast {
                    power: request.power,
                    level,
                    stl,
                    allow_flags,
                },
            )
        }
        CastTarget::Untargeted => {
            let handler = handlers
                .untargeted
                .ok_or_else(|| unsupported(EntryPoint::Untargeted))?;
            handler(ctx, level)
        }
    }
}

fn report(request: &CastRequest, err: &CastError) {
    let caster = request.caster;
    let power = request.power;
    let code = err.error_code();
    match err.severity() {
        ErrorSeverity::Recoverable => {
            debug!(%caster, %power, code, error = %err, "cast rejected");
        }
        ErrorSeverity::Validation => {
            warn!(%caster, %power, code, error = %err, "cast rejected");
        }
        ErrorSeverity::Internal | ErrorSeverity::Fatal => {
            error!(%caster, %power, code, error = %err, "cast aborted");
        }
    }
}
