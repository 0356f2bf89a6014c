//! Deterministic power-casting engine shared by every peer of a session.
//!
//! `keeper-core` decides whether a keeper may cast a power at a target,
//! charges for it and applies the effect to the simulation state. It never
//! performs I/O: the power catalog, terrain, randomness and configuration
//! come in through [`env::Env`], and presentation side effects go out as
//! [`env::Cue`] values. All power effects flow through
//! [`engine::MagicEngine`].
pub mod catalog;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod power;
pub mod state;

pub use catalog::{
    CastFlags, CatalogError, EntryPoint, PowerCatalog, PowerKind, PowerSet, PowerStats,
};
pub use config::MagicConfig;
pub use engine::MagicEngine;
pub use env::{
    CellFlags, Cue, CueLog, CueSink, Env, GridTerrain, MagicEnv, MapDimensions, NullCues,
    OracleError, PcgRng, RngOracle, Sample, SlabKind, TerrainCell, TerrainOracle,
};
pub use error::{ErrorSeverity, GameError};
pub use power::{CastError, CastOutcome, CastRequest, CastTarget, SlotKind};
#[cfg(feature = "serde")]
pub use state::compute_state_root;
pub use state::{
    Coord3d, Creature, CreatureModel, CreatureTemplate, CreatureTraits, Dungeon, GameState,
    PlayerId, PlayerState, SubtileCoord, Thing, ThingClass, ThingId,
};
