//! Power catalog loader.

use std::path::Path;

use anyhow::Context;
use keeper_core::{PowerCatalog, PowerStats};
use tracing::debug;

use crate::loaders::{LoadResult, read_file};

/// Loader for the power catalog from RON files.
///
/// The file holds a list of [`PowerStats`]; cast flags are written as
/// bitflag names (`"ALL_GROUND | ENEMY_CREATURES"`).
pub struct CatalogLoader;

impl CatalogLoader {
    /// Load and validate a catalog from a RON file.
    pub fn load(path: &Path) -> LoadResult<PowerCatalog> {
        let content = read_file(path)?;
        Self::parse(&content)
            .with_context(|| format!("Invalid power catalog {}", path.display()))
    }

    /// Parse and validate a catalog from RON text.
    ///
    /// Duplicate powers and decreasing price tables are rejected.
    pub fn parse(content: &str) -> LoadResult<PowerCatalog> {
        let powers: Vec<PowerStats> = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse catalog RON: {}", e))?;
        let count = powers.len();
        let catalog = PowerCatalog::new(powers)?;
        debug!(powers = count, "power catalog loaded");
        Ok(catalog)
    }
}
