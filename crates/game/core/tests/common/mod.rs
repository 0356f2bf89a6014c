//! Shared world fixture for the casting integration tests.
#![allow(dead_code)]

use keeper_core::catalog::{PowerCatalog, PowerKind, PowerSet, PowerStats};
use keeper_core::env::{
    CellFlags, CueLog, Env, GridTerrain, MagicEnv, MapDimensions, PcgRng, SlabKind, TerrainCell,
};
use keeper_core::state::{
    Coord3d, CreatureModel, CreatureTemplate, CreatureTraits, Dungeon, GameState, PlayerId,
    PlayerState, SubtileCoord, ThingClass, ThingId,
};
use keeper_core::{CastFlags, CastOutcome, CastRequest, MagicConfig, MagicEngine};

pub const ME: PlayerId = PlayerId(0);
pub const FOE: PlayerId = PlayerId(1);

pub const MAP: MapDimensions = MapDimensions::new(32, 32);
/// Claimed floor of the local keeper.
pub const HOME: SubtileCoord = SubtileCoord::new(4, 4);
/// Claimed floor of the enemy keeper.
pub const ENEMY_FLOOR: SubtileCoord = SubtileCoord::new(24, 24);
/// Enemy floor the local keeper has never seen.
pub const HIDDEN: SubtileCoord = SubtileCoord::new(30, 2);
/// Enemy wall visible to both keepers.
pub const WALL: SubtileCoord = SubtileCoord::new(20, 2);

pub const LIGHTNING_COST: [u32; 9] = [100, 150, 225, 300, 400, 500, 600, 700, 800];
pub const HEAL_COST: [u32; 9] = [50, 60, 70, 80, 90, 100, 110, 120, 130];

pub fn imp() -> CreatureTemplate {
    CreatureTemplate {
        model: CreatureModel(1),
        max_health: 75,
        base_speed: 48,
        slaps_to_kill: 5,
        annoy_slapped: 0,
        annoy_woken_up: 0,
        traits: CreatureTraits::DIGGER,
    }
}

pub fn troll() -> CreatureTemplate {
    CreatureTemplate {
        model: CreatureModel(7),
        max_health: 400,
        base_speed: 32,
        slaps_to_kill: 10,
        annoy_slapped: 20,
        annoy_woken_up: 5,
        traits: CreatureTraits::empty(),
    }
}

pub fn chicken_proof() -> CreatureTemplate {
    CreatureTemplate {
        model: CreatureModel(9),
        traits: CreatureTraits::NEVER_CHICKENS,
        ..troll()
    }
}

fn creature_powers() -> CastFlags {
    CastFlags::OWNED_CREATURES | CastFlags::ALLIED_CREATURES | CastFlags::THING_OR_MAP
}

fn enemy_powers() -> CastFlags {
    CastFlags::ENEMY_CREATURES | CastFlags::THING_OR_MAP
}

pub fn catalog() -> PowerCatalog {
    let flat = |cost: u32| [cost; 9];
    let powers = [
        PowerStats::new(
            PowerKind::Hand,
            [0; 9],
            [0; 9],
            CastFlags::OWNED_CREATURES | CastFlags::OWNED_GOLD | CastFlags::THING_OR_MAP,
        ),
        PowerStats::new(
            PowerKind::CreateDigger,
            flat(300),
            [0; 9],
            CastFlags::OWNED_GROUND | CastFlags::CLAIMABLE,
        ),
        PowerStats::new(PowerKind::Obey, [0; 9], [0; 9], CastFlags::empty()),
        PowerStats::new(
            PowerKind::Slap,
            [0; 9],
            [0; 9],
            CastFlags::OWNED_CREATURES | CastFlags::THING_OR_MAP,
        )
        .with_duration(20),
        PowerStats::new(
            PowerKind::Sight,
            [200, 300, 400, 500, 600, 700, 800, 900, 1000],
            [200; 9],
            CastFlags::ALL_GROUND | CastFlags::ALL_TALL | CastFlags::ALLOW_UNREVEALED,
        ),
        PowerStats::new(PowerKind::CallToArms, flat(100), [0; 9], CastFlags::ALL_GROUND),
        PowerStats::new(
            PowerKind::CaveIn,
            flat(500),
            [3, 4, 5, 6, 7, 8, 9, 10, 11],
            CastFlags::ALL_GROUND,
        ),
        PowerStats::new(PowerKind::HealCreature, HEAL_COST, [50; 9], creature_powers())
            .with_duration(5),
        PowerStats::new(PowerKind::HoldAudience, flat(1000), [0; 9], CastFlags::empty()),
        PowerStats::new(
            PowerKind::Lightning,
            LIGHTNING_COST,
            [4, 5, 6, 7, 8, 9, 10, 11, 12],
            CastFlags::ALL_GROUND
                | CastFlags::ENEMY_CREATURES
                | CastFlags::REQUIRES_CAST_DELAY
                | CastFlags::ALLOW_TEMP_REVEAL
                | CastFlags::THING_OR_MAP,
        ),
        PowerStats::new(PowerKind::SpeedCreature, flat(80), [1; 9], creature_powers())
            .with_duration(300),
        PowerStats::new(PowerKind::Protect, flat(80), [1; 9], creature_powers()).with_duration(300),
        PowerStats::new(PowerKind::Conceal, flat(80), [1; 9], creature_powers()).with_duration(300),
        PowerStats::new(PowerKind::Disease, flat(120), [2; 9], enemy_powers()).with_duration(400),
        PowerStats::new(PowerKind::Chicken, flat(150), [1; 9], enemy_powers()).with_duration(200),
        PowerStats::new(PowerKind::DestroyWalls, flat(700), [2; 9], CastFlags::ALL_TALL),
        PowerStats::new(PowerKind::TimeBomb, flat(100), [0; 9], CastFlags::ALL_GROUND),
        PowerStats::new(
            PowerKind::Possess,
            [0; 9],
            [0; 9],
            CastFlags::OWNED_CREATURES | CastFlags::THING_OR_MAP,
        ),
        PowerStats::new(PowerKind::Armageddon, flat(5000), [0; 9], CastFlags::empty()),
    ];
    PowerCatalog::new(powers).expect("test catalog is valid")
}

/// Left half claimed by `ME`, right half by `FOE`.
pub fn terrain() -> GridTerrain {
    let floor =
        TerrainCell::new(ME, SlabKind::Claimed, CellFlags::empty()).revealed_to([ME, FOE]);
    let mut terrain = GridTerrain::filled(MAP, floor);
    terrain
        .update_rect(SubtileCoord::new(16, 0), SubtileCoord::new(31, 31), |cell| {
            cell.owner = FOE;
        })
        .expect("rect inside map");
    terrain
        .set(
            HIDDEN,
            TerrainCell::new(FOE, SlabKind::Claimed, CellFlags::empty()).revealed_to([FOE]),
        )
        .expect("inside map");
    terrain
        .set(
            WALL,
            TerrainCell::new(FOE, SlabKind::Wall, CellFlags::TALL).revealed_to([ME, FOE]),
        )
        .expect("inside map");
    terrain
}

/// A two-keeper world with every power researched.
pub struct World {
    pub state: GameState,
    pub catalog: PowerCatalog,
    pub terrain: GridTerrain,
    pub rng: PcgRng,
    pub config: MagicConfig,
    pub cues: CueLog,
}

impl World {
    pub fn new(funds: u64) -> Self {
        let mut state = GameState::with_seed(0x5eed);
        state.game_turn = 1000;
        let everything: PowerSet = catalog().iter().map(|stats| stats.kind).collect();
        for id in [ME, FOE] {
            let dungeon = Dungeon::new(funds, imp()).with_powers(everything);
            state
                .add_player(PlayerState::new(id, dungeon))
                .expect("fresh player");
        }
        Self {
            state,
            catalog: catalog(),
            terrain: terrain(),
            rng: PcgRng,
            config: MagicConfig::default(),
            cues: CueLog::new(),
        }
    }

    /// Runs `f` with an engine whose local player is `ME`.
    pub fn with_engine<R>(
        &mut self,
        f: impl FnOnce(&mut MagicEngine<'_>, MagicEnv<'_>, &mut CueLog) -> R,
    ) -> R {
        let env = Env::<GridTerrain, PcgRng>::with_all(
            &self.catalog,
            &self.terrain,
            &self.rng,
            &self.config,
        )
        .as_magic_env();
        let mut engine = MagicEngine::new(&mut self.state).with_local_player(ME);
        f(&mut engine, env, &mut self.cues)
    }

    pub fn cast(&mut self, request: &CastRequest) -> CastOutcome {
        self.with_engine(|engine, env, cues| engine.cast(env, cues, request))
    }

    pub fn spawn_creature(
        &mut self,
        owner: PlayerId,
        template: CreatureTemplate,
        stl: SubtileCoord,
    ) -> ThingId {
        let turn = self.state.game_turn;
        self.state
            .things
            .spawn(owner, stl.center(), turn, ThingClass::Creature(template.instantiate()))
            .expect("free slot")
    }

    pub fn spawn_at(&mut self, owner: PlayerId, position: Coord3d, class: ThingClass) -> ThingId {
        let turn = self.state.game_turn;
        self.state
            .things
            .spawn(owner, position, turn, class)
            .expect("free slot")
    }

    pub fn funds(&self, player: PlayerId) -> u64 {
        self.state.player(player).expect("registered").dungeon.funds
    }

    pub fn set_funds(&mut self, player: PlayerId, funds: u64) {
        self.state
            .player_mut(player)
            .expect("registered")
            .dungeon
            .funds = funds;
    }

    pub fn creature(&self, id: ThingId) -> &keeper_core::Creature {
        self.state
            .things
            .get(id)
            .and_then(|thing| thing.creature())
            .expect("creature exists")
    }

    pub fn wound(&mut self, id: ThingId, damage: i32) {
        let creature = self
            .state
            .things
            .get_mut(id)
            .and_then(|thing| thing.creature_mut())
            .expect("creature exists");
        creature.health -= damage;
    }
}
