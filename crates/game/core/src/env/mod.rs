//! Read-only session data consumed by the casting engine.
//!
//! Oracles expose the power catalog, terrain ownership and visibility, the
//! random source and the tunable configuration. The [`Env`] aggregate bundles
//! them so handlers can reach everything they need without hard coupling to
//! concrete implementations.
mod cues;
mod error;
mod rng;
mod terrain;

pub use cues::{CreatureSound, Cue, CueLog, CueSink, NullCues, Sample};
pub use error::OracleError;
pub use rng::{PcgRng, RngOracle, SeedContext, compute_seed};
pub use terrain::{CellFlags, GridTerrain, MapDimensions, SlabKind, TerrainCell, TerrainOracle};

use crate::catalog::{PowerCatalog, PowerKind, PowerStats};
use crate::config::MagicConfig;

/// Aggregates read-only oracles required by the dispatcher and handlers.
pub struct Env<'a, T, R>
where
    T: TerrainOracle + ?Sized,
    R: RngOracle + ?Sized,
{
    catalog: Option<&'a PowerCatalog>,
    terrain: Option<&'a T>,
    rng: Option<&'a R>,
    config: Option<&'a MagicConfig>,
}

// Manual impls: derives would require `T: Clone`, which trait objects are not.
impl<T, R> Clone for Env<'_, T, R>
where
    T: TerrainOracle + ?Sized,
    R: RngOracle + ?Sized,
{
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, R> Copy for Env<'_, T, R>
where
    T: TerrainOracle + ?Sized,
    R: RngOracle + ?Sized,
{
}

pub type MagicEnv<'a> = Env<'a, dyn TerrainOracle + 'a, dyn RngOracle + 'a>;

impl<'a, T, R> Env<'a, T, R>
where
    T: TerrainOracle + ?Sized,
    R: RngOracle + ?Sized,
{
    pub fn new(
        catalog: Option<&'a PowerCatalog>,
        terrain: Option<&'a T>,
        rng: Option<&'a R>,
        config: Option<&'a MagicConfig>,
    ) -> Self {
        Self {
            catalog,
            terrain,
            rng,
            config,
        }
    }

    pub fn with_all(
        catalog: &'a PowerCatalog,
        terrain: &'a T,
        rng: &'a R,
        config: &'a MagicConfig,
    ) -> Self {
        Self::new(Some(catalog), Some(terrain), Some(rng), Some(config))
    }

    pub fn empty() -> Self {
        Self {
            catalog: None,
            terrain: None,
            rng: None,
            config: None,
        }
    }

    /// Returns the power catalog, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::CatalogNotAvailable` if no catalog was provided.
    pub fn catalog(&self) -> Result<&'a PowerCatalog, OracleError> {
        self.catalog.ok_or(OracleError::CatalogNotAvailable)
    }

    /// Returns the catalog entry of `kind`.
    ///
    /// # Errors
    ///
    /// Fails if the catalog is missing or has no entry for `kind`.
    pub fn power(&self, kind: PowerKind) -> Result<&'a PowerStats, OracleError> {
        self.catalog()?
            .get(kind)
            .ok_or(OracleError::PowerNotFound(kind))
    }

    /// Returns the TerrainOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::TerrainNotAvailable` if no terrain oracle was provided.
    pub fn terrain(&self) -> Result<&'a T, OracleError> {
        self.terrain.ok_or(OracleError::TerrainNotAvailable)
    }

    /// Returns the RngOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::RngNotAvailable` if no rng oracle was provided.
    pub fn rng(&self) -> Result<&'a R, OracleError> {
        self.rng.ok_or(OracleError::RngNotAvailable)
    }

    /// Returns the magic configuration, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::ConfigNotAvailable` if no config was provided.
    pub fn config(&self) -> Result<&'a MagicConfig, OracleError> {
        self.config.ok_or(OracleError::ConfigNotAvailable)
    }
}

impl<'a, T, R> Env<'a, T, R>
where
    T: TerrainOracle + 'a,
    R: RngOracle + 'a,
{
    /// Converts this environment into a trait-object based `MagicEnv`.
    pub fn as_magic_env(&self) -> MagicEnv<'a> {
        let terrain: Option<&'a dyn TerrainOracle> = self.terrain.map(|terrain| terrain as _);
        let rng: Option<&'a dyn RngOracle> = self.rng.map(|rng| rng as _);
        Env::new(self.catalog, terrain, rng, self.config)
    }
}
