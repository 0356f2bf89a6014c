use crate::catalog::{CastFlags, PowerKind, PowerStats};
use crate::config::MagicConfig;
use crate::env::{Cue, CueSink, MagicEnv, Sample};
use crate::state::{Creature, GameState, PlayerId, PlayerState, SubtileCoord, Thing, ThingId};

use super::error::Target;
use super::{CastError, SlotKind, economy, permission};

/// Everything a handler may touch while resolving one cast.
pub struct CastContext<'a> {
    pub state: &'a mut GameState,
    pub env: MagicEnv<'a>,
    pub cues: &'a mut dyn CueSink,
    pub caster: PlayerId,
}

impl<'a> CastContext<'a> {
    pub fn new(
        state: &'a mut GameState,
        env: MagicEnv<'a>,
        cues: &'a mut dyn CueSink,
        caster: PlayerId,
    ) -> Self {
        Self {
            state,
            env,
            cues,
            caster,
        }
    }

    pub fn turn(&self) -> u64 {
        self.state.game_turn
    }

    pub fn config(&self) -> Result<&'a MagicConfig, CastError> {
        Ok(self.env.config()?)
    }

    pub fn power(&self, kind: PowerKind) -> Result<&'a PowerStats, CastError> {
        Ok(self.env.power(kind)?)
    }

    pub fn player(&self) -> Result<&PlayerState, CastError> {
        self.state
            .player(self.caster)
            .ok_or(CastError::UnknownPlayer(self.caster))
    }

    pub fn player_mut(&mut self) -> Result<&mut PlayerState, CastError> {
        self.state
            .player_mut(self.caster)
            .ok_or(CastError::UnknownPlayer(self.caster))
    }

    pub fn thing(&self, id: ThingId) -> Result<&Thing, CastError> {
        self.state.things.get(id).ok_or(CastError::ThingNotFound(id))
    }

    /// Looks up a creature for a creature-only power.
    pub fn creature(&self, power: PowerKind, id: ThingId) -> Result<&Creature, CastError> {
        self.thing(id)?
            .creature()
            .ok_or(CastError::NotACreature { power, thing: id })
    }

    pub fn creature_mut(
        &mut self,
        power: PowerKind,
        id: ThingId,
    ) -> Result<&mut Creature, CastError> {
        self.state
            .things
            .get_mut(id)
            .ok_or(CastError::ThingNotFound(id))?
            .creature_mut()
            .ok_or(CastError::NotACreature { power, thing: id })
    }

    /// Rejects the cast unless `power` may target `stl`.
    pub fn ensure_location(
        &self,
        power: PowerKind,
        stl: SubtileCoord,
        extra: CastFlags,
    ) -> Result<(), CastError> {
        let allowed = permission::can_cast_at_location(
            &*self.state,
            &self.env,
            self.caster,
            power,
            stl,
            extra,
        )?;
        if allowed {
            Ok(())
        } else {
            Err(CastError::IneligibleTarget {
                power,
                target: Target::Subtile,
            })
        }
    }

    /// Rejects the cast unless a new thing can be created.
    pub fn ensure_thing_slot(&self) -> Result<(), CastError> {
        if self.state.things.has_free_thing_slot() {
            Ok(())
        } else {
            Err(CastError::ResourceExhausted(SlotKind::Thing))
        }
    }

    /// Charges the caster for `power` at `level`.
    pub fn pay(&mut self, power: PowerKind, level: u8) -> Result<u64, CastError> {
        let stats = self.power(power)?;
        economy::pay_for_power(self.state, self.caster, stats, level)
    }

    /// Positional sound at a thing.
    pub fn thing_sound(&mut self, thing: ThingId, sample: Sample) {
        self.cues.emit(Cue::ThingSound { thing, sample });
    }

    pub fn emit(&mut self, cue: Cue) {
        self.cues.emit(cue);
    }
}
