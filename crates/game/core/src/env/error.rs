//! Oracle access errors.
//!
//! Errors related to oracle availability and data access.

use crate::catalog::PowerKind;
use crate::error::{ErrorSeverity, GameError};
use crate::state::SubtileCoord;

/// Errors that occur when accessing oracle data.
///
/// Oracle errors indicate that required session data is unavailable or
/// invalid. Missing oracles are fatal since the engine cannot resolve a cast
/// without the catalog, the terrain or the random source.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OracleError {
    /// Power catalog is not available in the environment.
    #[error("power catalog not available")]
    CatalogNotAvailable,

    /// TerrainOracle is not available in the environment.
    #[error("TerrainOracle not available")]
    TerrainNotAvailable,

    /// RngOracle is not available in the environment.
    #[error("RngOracle not available")]
    RngNotAvailable,

    /// Magic configuration is not available in the environment.
    #[error("magic config not available")]
    ConfigNotAvailable,

    /// Subtile is outside the map bounds.
    #[error("subtile {0} is out of map bounds")]
    SubtileOutOfBounds(SubtileCoord),

    /// Power has no entry in the catalog.
    #[error("power {0} has no catalog entry")]
    PowerNotFound(PowerKind),
}

impl GameError for OracleError {
    fn severity(&self) -> ErrorSeverity {
        use OracleError::*;
        match self {
            // Missing oracles are fatal - engine cannot proceed
            CatalogNotAvailable | TerrainNotAvailable | RngNotAvailable | ConfigNotAvailable => {
                ErrorSeverity::Fatal
            }

            SubtileOutOfBounds(_) => ErrorSeverity::Validation,

            // A power without data was routed to a handler
            PowerNotFound(_) => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        use OracleError::*;
        match self {
            CatalogNotAvailable => "ORACLE_CATALOG_NOT_AVAILABLE",
            TerrainNotAvailable => "ORACLE_TERRAIN_NOT_AVAILABLE",
            RngNotAvailable => "ORACLE_RNG_NOT_AVAILABLE",
            ConfigNotAvailable => "ORACLE_CONFIG_NOT_AVAILABLE",
            SubtileOutOfBounds(_) => "ORACLE_SUBTILE_OUT_OF_BOUNDS",
            PowerNotFound(_) => "ORACLE_POWER_NOT_FOUND",
        }
    }
}
