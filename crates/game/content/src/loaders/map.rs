//! Map data loader.
//!
//! Loads the static terrain a power may target. Things are placed by
//! scenario files.

use std::path::Path;

use anyhow::Context;
use keeper_core::state::SubtileCoord;
use keeper_core::{CellFlags, GridTerrain, MapDimensions, PlayerId, SlabKind, TerrainCell};
use serde::Deserialize;

use crate::loaders::{LoadResult, read_file};

/// Map data structure for RON files.
#[derive(Debug, Clone, Deserialize)]
struct MapDataRon {
    dimensions: (u16, u16),
    /// Cell every subtile starts as.
    fill: CellRon,
    /// Inclusive rectangles painted over the fill, in order.
    #[serde(default)]
    regions: Vec<RegionRon>,
}

#[derive(Debug, Clone, Deserialize)]
struct RegionRon {
    from: (u16, u16),
    to: (u16, u16),
    cell: CellRon,
}

#[derive(Debug, Clone, Deserialize)]
struct CellRon {
    owner: u8,
    #[serde(default)]
    slab: SlabKind,
    #[serde(default)]
    flags: CellFlags,
    /// Player ids the subtile is revealed to.
    #[serde(default)]
    revealed_to: Vec<u8>,
    #[serde(default)]
    floor_height: i32,
}

impl CellRon {
    fn to_cell(&self) -> TerrainCell {
        let mut cell = TerrainCell::new(PlayerId(self.owner), self.slab, self.flags)
            .revealed_to(self.revealed_to.iter().copied().map(PlayerId));
        cell.floor_height = self.floor_height;
        cell
    }
}

/// Loader for map data from RON files.
pub struct MapLoader;

impl MapLoader {
    /// Load map data from a RON file.
    pub fn load(path: &Path) -> LoadResult<GridTerrain> {
        let content = read_file(path)?;
        Self::parse(&content).with_context(|| format!("Invalid map {}", path.display()))
    }

    pub fn parse(content: &str) -> LoadResult<GridTerrain> {
        let data: MapDataRon = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse map RON: {}", e))?;

        let (width, height) = data.dimensions;
        if width == 0 || height == 0 {
            anyhow::bail!("map dimensions must be positive, got {width}x{height}");
        }
        let mut terrain = GridTerrain::filled(MapDimensions::new(width, height), data.fill.to_cell());

        for (index, region) in data.regions.iter().enumerate() {
            let cell = region.cell.to_cell();
            let from = SubtileCoord::new(region.from.0, region.from.1);
            let to = SubtileCoord::new(region.to.0, region.to.1);
            terrain
                .update_rect(from, to, |target| *target = cell)
                .with_context(|| format!("region #{index} leaves the map"))?;
        }

        Ok(terrain)
    }
}
