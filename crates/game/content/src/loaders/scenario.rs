//! Replay scenario loader.
//!
//! A scenario seeds a session (keepers, creature breeds, things on the map)
//! and scripts the casts to replay against it. Things are numbered from 1 in
//! declaration order, creatures first, so a script can aim at them by id.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Context;
use keeper_core::state::{CreatureTemplate, ObjectKind, PlayerState, ThingClass};
use keeper_core::{
    CastFlags, CastOutcome, CreatureModel, CreatureTraits, CueSink, Dungeon, GameState,
    MagicConfig, MagicEngine, MagicEnv, PlayerId, PowerKind, SubtileCoord, TerrainOracle, ThingId,
};
use serde::Deserialize;
use tracing::{debug, info};

use crate::loaders::{LoadResult, read_file};

/// A replayable session description.
#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    pub seed: u64,
    pub start_turn: u64,
    /// Map name, resolved by the [`ContentFactory`](super::ContentFactory).
    pub map: String,
    /// Keeper whose rejection cues are played.
    #[serde(default)]
    pub local_player: Option<u8>,
    /// Creature breeds by name.
    pub breeds: BTreeMap<String, BreedSpec>,
    pub keepers: Vec<KeeperSpec>,
    #[serde(default)]
    pub creatures: Vec<CreatureSpec>,
    #[serde(default)]
    pub objects: Vec<ObjectSpec>,
    /// Casts in non-decreasing turn order.
    #[serde(default)]
    pub script: Vec<ScriptedCast>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BreedSpec {
    pub model: u8,
    pub max_health: i32,
    pub base_speed: u16,
    #[serde(default)]
    pub slaps_to_kill: u16,
    #[serde(default)]
    pub annoy_slapped: u32,
    #[serde(default)]
    pub annoy_woken_up: u32,
    #[serde(default)]
    pub traits: CreatureTraits,
}

impl BreedSpec {
    fn template(&self) -> CreatureTemplate {
        CreatureTemplate {
            model: CreatureModel(self.model),
            max_health: self.max_health,
            base_speed: self.base_speed,
            slaps_to_kill: self.slaps_to_kill,
            annoy_slapped: self.annoy_slapped,
            annoy_woken_up: self.annoy_woken_up,
            traits: self.traits,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct KeeperSpec {
    pub id: u8,
    pub funds: u64,
    /// Breed name of the keeper's digger.
    pub digger: String,
    /// Researched powers.
    pub powers: Vec<PowerKind>,
    /// Players this keeper declares alliance with.
    #[serde(default)]
    pub allies: Vec<u8>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreatureSpec {
    pub owner: u8,
    pub breed: String,
    pub at: (u16, u16),
}

#[derive(Debug, Clone, Deserialize)]
pub struct ObjectSpec {
    pub owner: u8,
    pub kind: ObjectKind,
    pub at: (u16, u16),
}

/// One scripted cast.
#[derive(Debug, Clone, Deserialize)]
pub struct ScriptedCast {
    pub turn: u64,
    pub caster: u8,
    pub power: PowerKind,
    #[serde(default)]
    pub level: u8,
    pub target: TargetSpec,
}

impl ScriptedCast {
    pub fn caster(&self) -> PlayerId {
        PlayerId(self.caster)
    }
}

/// Where a scripted cast is aimed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum TargetSpec {
    /// A thing, at whatever subtile it stands on when the cast runs.
    OnThing { id: u32 },
    OnLocation {
        x: u16,
        y: u16,
        #[serde(default)]
        allow: CastFlags,
    },
    Untargeted,
}

impl Scenario {
    pub fn local_player(&self) -> Option<PlayerId> {
        self.local_player.map(PlayerId)
    }

    /// Keeper ids in declaration order.
    pub fn keeper_ids(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.keepers.iter().map(|keeper| PlayerId(keeper.id))
    }

    /// Builds the initial state on `terrain`.
    ///
    /// # Errors
    ///
    /// Unknown breed names, duplicate or out-of-range keepers, things placed
    /// outside the map, a script running backwards, or thing tables too
    /// small for the scenario.
    pub fn build(
        &self,
        config: &MagicConfig,
        terrain: &dyn TerrainOracle,
    ) -> LoadResult<GameState> {
        let mut state = GameState::with_config(self.seed, config);
        state.game_turn = self.start_turn;

        for keeper in &self.keepers {
            let digger = self.breed(&keeper.digger)?;
            let dungeon = Dungeon::new(keeper.funds, digger)
                .with_powers(keeper.powers.iter().copied().collect());
            let mut player = PlayerState::new(PlayerId(keeper.id), dungeon);
            for ally in &keeper.allies {
                player.allies |= PlayerId(*ally).mask();
            }
            state
                .add_player(player)
                .with_context(|| format!("keeper {}", keeper.id))?;
        }

        for (index, creature) in self.creatures.iter().enumerate() {
            let template = self.breed(&creature.breed)?;
            let stl = Self::placed(terrain, creature.at)
                .with_context(|| format!("creature #{index}"))?;
            state
                .things
                .spawn(
                    PlayerId(creature.owner),
                    stl.center(),
                    self.start_turn,
                    ThingClass::Creature(template.instantiate()),
                )
                .with_context(|| format!("creature #{index}"))?;
        }

        for (index, object) in self.objects.iter().enumerate() {
            let stl =
                Self::placed(terrain, object.at).with_context(|| format!("object #{index}"))?;
            state
                .things
                .spawn(
                    PlayerId(object.owner),
                    stl.center(),
                    self.start_turn,
                    ThingClass::Object(object.kind),
                )
                .with_context(|| format!("object #{index}"))?;
        }

        let mut turn = self.start_turn;
        for (index, cast) in self.script.iter().enumerate() {
            if cast.turn < turn {
                anyhow::bail!("cast #{index} at turn {} runs backwards from {turn}", cast.turn);
            }
            turn = cast.turn;
        }

        debug!(
            keepers = self.keepers.len(),
            things = state.things.len(),
            casts = self.script.len(),
            "scenario built"
        );
        Ok(state)
    }

    /// Replays the cast script against `state`, one outcome per cast.
    ///
    /// Before each cast the game turn advances to the cast's turn and every
    /// keeper's sight-of-evil window is refreshed.
    ///
    /// # Errors
    ///
    /// Fails when `env` lacks the configuration the upkeep needs; rejected
    /// casts are outcomes, not errors.
    pub fn replay(
        &self,
        state: &mut GameState,
        env: MagicEnv<'_>,
        cues: &mut dyn CueSink,
    ) -> LoadResult<Vec<CastOutcome>> {
        let mut outcomes = Vec::with_capacity(self.script.len());
        for cast in &self.script {
            state.game_turn = state.game_turn.max(cast.turn);
            let mut engine = MagicEngine::new(&mut *state);
            if let Some(local) = self.local_player() {
                engine = engine.with_local_player(local);
            }
            for keeper in self.keeper_ids() {
                engine.update_power_sight_explored(&env, keeper)?;
            }

            let outcome = match cast.target {
                TargetSpec::OnThing { id } => engine.directly_cast_on_thing(
                    env,
                    cues,
                    cast.caster(),
                    cast.power,
                    cast.level,
                    ThingId(id),
                ),
                TargetSpec::OnLocation { x, y, allow } => engine.cast_on_location(
                    env,
                    cues,
                    cast.caster(),
                    cast.power,
                    cast.level,
                    SubtileCoord::new(x, y),
                    allow,
                ),
                TargetSpec::Untargeted => {
                    engine.cast_untargeted(env, cues, cast.caster(), cast.power, cast.level)
                }
            };
            outcomes.push(outcome);
        }
        info!(casts = outcomes.len(), turn = state.game_turn, "replay finished");
        Ok(outcomes)
    }

    fn breed(&self, name: &str) -> LoadResult<CreatureTemplate> {
        self.breeds
            .get(name)
            .map(BreedSpec::template)
            .ok_or_else(|| anyhow::anyhow!("unknown breed '{name}'"))
    }

    fn placed(terrain: &dyn TerrainOracle, (x, y): (u16, u16)) -> LoadResult<SubtileCoord> {
        let stl = SubtileCoord::new(x, y);
        if !terrain.contains(stl) {
            anyhow::bail!("subtile ({x}, {y}) is outside the map");
        }
        Ok(stl)
    }
}

/// Loader for replay scenarios from RON files.
pub struct ScenarioLoader;

impl ScenarioLoader {
    pub fn load(path: &Path) -> LoadResult<Scenario> {
        let content = read_file(path)?;
        Self::parse(&content).with_context(|| format!("Invalid scenario {}", path.display()))
    }

    pub fn parse(content: &str) -> LoadResult<Scenario> {
        ron::from_str(content).map_err(|e| anyhow::anyhow!("Failed to parse scenario RON: {}", e))
    }
}
