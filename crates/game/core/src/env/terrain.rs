use bitflags::bitflags;

use super::OracleError;
use crate::state::{PlayerId, SubtileCoord};

/// Terrain oracle exposing ownership, visibility and geometry per subtile.
pub trait TerrainOracle: Send + Sync {
    fn dimensions(&self) -> MapDimensions;

    /// Returns `None` for subtiles outside the map.
    fn cell(&self, stl: SubtileCoord) -> Option<TerrainCell>;

    fn contains(&self, stl: SubtileCoord) -> bool {
        self.dimensions().contains(stl)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapDimensions {
    pub width: u16,
    pub height: u16,
}

impl MapDimensions {
    pub const fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    pub fn contains(&self, stl: SubtileCoord) -> bool {
        stl.x < self.width && stl.y < self.height
    }

    pub fn area(&self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }
}

bitflags! {
    /// Map block flags relevant to power targeting.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    #[cfg_attr(feature = "serde", serde(transparent))]
    pub struct CellFlags: u8 {
        /// Wall-height geometry; unset means floor level.
        const TALL     = 1 << 0;
        const DOOR     = 1 << 1;
        const ROOM     = 1 << 2;
        /// Reserved by the level script.
        const RESERVED = 1 << 3;
    }
}

/// Slab material under a subtile.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum SlabKind {
    Rock,
    Gold,
    #[default]
    Earth,
    Wall,
    Path,
    Claimed,
    Water,
    Lava,
}

impl SlabKind {
    pub fn is_liquid(self) -> bool {
        matches!(self, Self::Water | Self::Lava)
    }
}

/// Static description of one subtile.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TerrainCell {
    pub owner: PlayerId,
    /// Players the subtile is revealed to, as a `PlayerId::mask` set.
    #[cfg_attr(feature = "serde", serde(default))]
    pub revealed: u8,
    #[cfg_attr(feature = "serde", serde(default))]
    pub flags: CellFlags,
    #[cfg_attr(feature = "serde", serde(default))]
    pub slab: SlabKind,
    #[cfg_attr(feature = "serde", serde(default))]
    pub floor_height: i32,
}

impl TerrainCell {
    pub fn new(owner: PlayerId, slab: SlabKind, flags: CellFlags) -> Self {
        Self {
            owner,
            revealed: 0,
            flags,
            slab,
            floor_height: 0,
        }
    }

    pub fn revealed_to(mut self, players: impl IntoIterator<Item = PlayerId>) -> Self {
        for player in players {
            self.revealed |= player.mask();
        }
        self
    }

    pub fn is_revealed_to(&self, player: PlayerId) -> bool {
        self.revealed & player.mask() != 0
    }

    pub fn is_tall(&self) -> bool {
        self.flags.contains(CellFlags::TALL)
    }
}

impl Default for TerrainCell {
    fn default() -> Self {
        Self::new(PlayerId::NEUTRAL, SlabKind::default(), CellFlags::empty())
    }
}

/// Dense row-major terrain grid.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridTerrain {
    dimensions: MapDimensions,
    cells: Vec<TerrainCell>,
}

impl GridTerrain {
    /// Creates a grid where every subtile is `fill`.
    pub fn filled(dimensions: MapDimensions, fill: TerrainCell) -> Self {
        Self {
            dimensions,
            cells: vec![fill; dimensions.area()],
        }
    }

    /// Replaces one subtile.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::SubtileOutOfBounds` outside the grid.
    pub fn set(&mut self, stl: SubtileCoord, cell: TerrainCell) -> Result<(), OracleError> {
        let index = self
            .index(stl)
            .ok_or(OracleError::SubtileOutOfBounds(stl))?;
        self.cells[index] = cell;
        Ok(())
    }

    /// Applies `update` to every subtile of the inclusive rectangle `from..=to`.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::SubtileOutOfBounds` if a corner lies outside.
    pub fn update_rect(
        &mut self,
        from: SubtileCoord,
        to: SubtileCoord,
        mut update: impl FnMut(&mut TerrainCell),
    ) -> Result<(), OracleError> {
        for corner in [from, to] {
            if !self.dimensions.contains(corner) {
                return Err(OracleError::SubtileOutOfBounds(corner));
            }
        }
        for y in from.y.min(to.y)..=from.y.max(to.y) {
            for x in from.x.min(to.x)..=from.x.max(to.x) {
                if let Some(index) = self.index(SubtileCoord::new(x, y)) {
                    update(&mut self.cells[index]);
                }
            }
        }
        Ok(())
    }

    fn index(&self, stl: SubtileCoord) -> Option<usize> {
        self.dimensions.contains(stl).then(|| {
            usize::from(stl.y) * usize::from(self.dimensions.width) + usize::from(stl.x)
        })
    }
}

impl TerrainOracle for GridTerrain {
    fn dimensions(&self) -> MapDimensions {
        self.dimensions
    }

    fn cell(&self, stl: SubtileCoord) -> Option<TerrainCell> {
        self.index(stl).map(|index| self.cells[index])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_bounds_is_none() {
        let grid = GridTerrain::filled(MapDimensions::new(4, 3), TerrainCell::default());
        assert!(grid.cell(SubtileCoord::new(3, 2)).is_some());
        assert!(grid.cell(SubtileCoord::new(4, 0)).is_none());
        assert!(grid.cell(SubtileCoord::new(0, 3)).is_none());
    }

    #[test]
    fn update_rect_touches_inclusive_area() {
        let mut grid = GridTerrain::filled(MapDimensions::new(5, 5), TerrainCell::default());
        grid.update_rect(SubtileCoord::new(1, 1), SubtileCoord::new(2, 2), |cell| {
            cell.owner = PlayerId(0)
        })
        .unwrap();
        let owned = (0..5)
            .flat_map(|y| (0..5).map(move |x| SubtileCoord::new(x, y)))
            .filter(|stl| grid.cell(*stl).is_some_and(|c| c.owner == PlayerId(0)))
            .count();
        assert_eq!(owned, 4);
    }

    #[test]
    fn reveal_mask_tracks_players() {
        let cell = TerrainCell::default().revealed_to([PlayerId(0), PlayerId(2)]);
        assert!(cell.is_revealed_to(PlayerId(2)));
        assert!(!cell.is_revealed_to(PlayerId(1)));
    }
}
