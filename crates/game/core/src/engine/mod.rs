//! Cast dispatcher and per-tick power upkeep.
//!
//! The [`MagicEngine`] is the only writer of [`GameState`] for power effects.
//! Every cast flows through the same pipeline: validate the caster and the
//! target, clamp the level, route to the handler registered for the power and
//! entry point, then normalize the result into a [`CastOutcome`]. A failed
//! cast emits exactly one rejection cue, and only to the local player.

mod dispatch;

use crate::catalog::{CastFlags, PowerKind};
use crate::env::{CueSink, MagicEnv, OracleError};
use crate::power::{self, CastContext, CastError, CastOutcome, CastRequest, CastTarget, economy};
use crate::state::{GameState, PlayerId, SubtileCoord, ThingId};

/// Resolves casts against one simulation state.
///
/// Casts must be submitted in the same order on every peer; the engine never
/// reorders them.
pub struct MagicEngine<'a> {
    state: &'a mut GameState,
    /// Player whose point of view receives rejection cues.
    local_player: Option<PlayerId>,
}

impl<'a> MagicEngine<'a> {
    /// Creates an engine without a local player; rejection cues are suppressed.
    pub fn new(state: &'a mut GameState) -> Self {
        Self {
            state,
            local_player: None,
        }
    }

    pub fn with_local_player(mut self, player: PlayerId) -> Self {
        self.local_player = Some(player);
        self
    }

    pub fn state(&self) -> &GameState {
        self.state
    }

    /// Resolves a cast request through the entry point its target selects.
    pub fn cast(
        &mut self,
        env: MagicEnv<'_>,
        cues: &mut dyn CueSink,
        request: &CastRequest,
    ) -> CastOutcome {
        dispatch::cast(self.state, env, cues, self.local_player, request)
    }

    #[allow(clippy::too_many_arguments)]
    pub fn cast_on_thing(
        &mut self,
        env: MagicEnv<'_>,
        cues: &mut dyn CueSink,
        caster: PlayerId,
        power: PowerKind,
        level: u8,
        thing: ThingId,
        stl: SubtileCoord,
    ) -> CastOutcome {
        let request = CastRequest::on_thing(caster, power, level, thing, stl);
        self.cast(env, cues, &request)
    }

    /// Casts at a subtile; `allow_flags` widen the power's own targeting.
    #[allow(clippy::too_many_arguments)]
    pub fn cast_on_location(
        &mut self,
        env: MagicEnv<'_>,
        cues: &mut dyn CueSink,
        caster: PlayerId,
        power: PowerKind,
        level: u8,
        stl: SubtileCoord,
        allow_flags: CastFlags,
    ) -> CastOutcome {
        let request = CastRequest {
            caster,
            power,
            level,
            target: CastTarget::Location { stl, allow_flags },
        };
        self.cast(env, cues, &request)
    }

    pub fn cast_untargeted(
        &mut self,
        env: MagicEnv<'_>,
        cues: &mut dyn CueSink,
        caster: PlayerId,
        power: PowerKind,
        level: u8,
    ) -> CastOutcome {
        let request = CastRequest::untargeted(caster, power, level);
        self.cast(env, cues, &request)
    }

    /// Casts on a thing at the subtile the thing stands on.
    ///
    /// A missing thing fails like any other invalid target.
    pub fn directly_cast_on_thing(
        &mut self,
        env: MagicEnv<'_>,
        cues: &mut dyn CueSink,
        caster: PlayerId,
        power: PowerKind,
        level: u8,
        thing: ThingId,
    ) -> CastOutcome {
        let stl = self
            .state
            .things
            .get(thing)
            .map(|thing| thing.position.subtile())
            .unwrap_or_default();
        self.cast_on_thing(env, cues, caster, power, level, thing, stl)
    }

    /// Advances `caster`'s overcharge by one input tick for `power`.
    ///
    /// Returns whether a higher level is still reachable.
    ///
    /// # Errors
    ///
    /// Fails for unknown players or when the catalog or config is missing.
    pub fn update_overcharge(
        &mut self,
        env: &MagicEnv<'_>,
        caster: PlayerId,
        power: PowerKind,
    ) -> Result<bool, CastError> {
        let stats = env.power(power)?;
        let max_level = env.config()?.max_level();
        let player = self
            .state
            .player_mut(caster)
            .ok_or(CastError::UnknownPlayer(caster))?;
        Ok(economy::update_overcharge(player, stats, max_level))
    }

    /// Current overcharge level of `caster`; zero for unknown players.
    ///
    /// # Errors
    ///
    /// Fails when the config is missing.
    pub fn overcharge_level(
        &self,
        env: &MagicEnv<'_>,
        caster: PlayerId,
    ) -> Result<u8, OracleError> {
        let max_level = env.config()?.max_level();
        Ok(self
            .state
            .player(caster)
            .map_or(0, |player| player.control.overcharge_level(max_level)))
    }

    /// Starts closing `caster`'s sight-of-evil eye.
    ///
    /// # Errors
    ///
    /// Fails if the catalog has no sight-of-evil entry.
    pub fn turn_off_sight_of_evil(
        &mut self,
        env: &MagicEnv<'_>,
        caster: PlayerId,
    ) -> Result<(), OracleError> {
        power::sight::turn_off_sight_of_evil(self.state, env, caster)
    }

    /// Per-tick growth of `caster`'s sight-of-evil explored window.
    ///
    /// # Errors
    ///
    /// Fails when the config is missing.
    pub fn update_power_sight_explored(
        &mut self,
        env: &MagicEnv<'_>,
        caster: PlayerId,
    ) -> Result<(), OracleError> {
        power::sight::update_power_sight_explored(self.state, env, caster)
    }

    /// Lands `caster`'s pending slap on `thing`.
    ///
    /// # Errors
    ///
    /// Fails if `thing` is not a creature or the catalog lacks the slap entry.
    pub fn slap_creature(
        &mut self,
        env: MagicEnv<'_>,
        cues: &mut dyn CueSink,
        caster: PlayerId,
        thing: ThingId,
    ) -> Result<(), CastError> {
        let mut ctx = CastContext::new(self.state, env, cues, caster);
        power::slap_creature(&mut ctx, thing)
    }
}
