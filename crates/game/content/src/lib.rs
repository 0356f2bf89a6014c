//! Data-driven content for the casting engine.
//!
//! This crate provides loaders for the RON/TOML data files that feed
//! `keeper-core`:
//! - Power catalog (RON)
//! - Engine configuration (TOML)
//! - Grid terrain maps (RON)
//! - Replay scenarios: keepers, things and a cast script (RON)
//!
//! Content is consumed by the `Env` oracles and never appears in game state.

use std::path::Path;

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{
    CatalogLoader, ConfigLoader, ContentFactory, LoadResult, MapLoader, Scenario, ScenarioLoader,
    ScriptedCast, TargetSpec,
};

/// Data directory shipped with this crate.
pub fn bundled_data_dir() -> &'static Path {
    Path::new(concat!(env!("CARGO_MANIFEST_DIR"), "/data"))
}
