//! Engine configuration loader.

use std::path::Path;

use keeper_core::MagicConfig;
use tracing::warn;

use crate::loaders::{LoadResult, read_file};

/// Loader for engine configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Missing keys keep their defaults. Values above the compile-time limits
    /// are accepted but clamped by the engine, which is logged here.
    pub fn load(path: &Path) -> LoadResult<MagicConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<MagicConfig> {
        let config: MagicConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        if config.max_overcharge_level > MagicConfig::MAX_OVERCHARGE_LEVEL {
            warn!(
                requested = config.max_overcharge_level,
                max = MagicConfig::MAX_OVERCHARGE_LEVEL,
                "max_overcharge_level above the catalog range"
            );
        }
        if config.hand_capacity > MagicConfig::MAX_HAND_CAPACITY {
            warn!(
                requested = config.hand_capacity,
                max = MagicConfig::MAX_HAND_CAPACITY,
                "hand_capacity above the hand limit"
            );
        }
        if config.sight_reveal_step == 0 {
            anyhow::bail!("sight_reveal_step must be positive");
        }
        Ok(config)
    }
}
