//! Content factory for building oracle inputs from data files.

use std::path::{Path, PathBuf};

use keeper_core::{GridTerrain, MagicConfig, PowerCatalog};

use crate::loaders::{CatalogLoader, ConfigLoader, LoadResult, MapLoader, Scenario, ScenarioLoader};

/// Content factory that loads all engine content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── powers.ron
/// ├── maps/
/// │   └── twin_keeps.ron
/// └── scenarios/
///     └── skirmish.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Factory over the data shipped with this crate.
    pub fn bundled() -> Self {
        Self::new(crate::bundled_data_dir())
    }

    /// Load engine configuration from `config.toml`.
    ///
    /// A missing file yields the default configuration.
    pub fn load_config(&self) -> LoadResult<MagicConfig> {
        let path = self.data_dir.join("config.toml");
        if !path.exists() {
            return Ok(MagicConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load the power catalog from `powers.ron`.
    pub fn load_catalog(&self) -> LoadResult<PowerCatalog> {
        let path = self.data_dir.join("powers.ron");
        CatalogLoader::load(&path)
    }

    /// Load a map from `maps/{map_name}.ron`.
    pub fn load_map(&self, map_name: &str) -> LoadResult<GridTerrain> {
        let path = self.data_dir.join("maps").join(format!("{}.ron", map_name));
        MapLoader::load(&path)
    }

    /// Load a scenario from `scenarios/{name}.ron`.
    pub fn load_scenario(&self, name: &str) -> LoadResult<Scenario> {
        let path = self.data_dir.join("scenarios").join(format!("{}.ron", name));
        ScenarioLoader::load(&path)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
