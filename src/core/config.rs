//! World generation configuration with documented constants
//!
//! Tunable parameters live in [`WorldGenConfig`] and can be loaded from TOML.
//! Fixed rules of the generator are collected here as constants with
//! explanations of how they interact.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::core::error::{HexforgeError, Result};
use crate::core::types::Turn;

// === STARTING LOCATIONS ===

/// Starting tiles must be at least this many tiles away from every map edge.
///
/// Keeps the full sweet-spot radius (3) plus one ring inside the map.
pub const MIN_WORLD_EDGE_DISTANCE: i32 = 4;

/// Minimum sweet spot value for a tile to be considered as a starting location.
pub const MIN_STARTING_SWEET_SPOT: f32 = 5.0;

/// Only this fraction of the best remaining candidates is sampled from.
///
/// Rounded up, so at least one candidate is always eligible.
pub const BEST_CANDIDATES_FRACTION: f64 = 0.1;

/// A starting tile's passable area must cover at least this fraction of the map.
///
/// Rules out tiny islands that cannot support expansion.
pub const MIN_LAND_AREA_FRACTION: f64 = 0.02;

/// Lower bound of the distance between two starting locations.
pub const MIN_LOCATION_DISTANCE: i32 = 4;

// === SWEET SPOT ===

/// Radius of the neighbourhood summed into a tile's sweet spot value.
pub const SWEET_SPOT_RADIUS: i32 = 3;

/// Multiplier applied to the sweet spot of coastal tiles.
pub const COAST_SWEET_SPOT_MULTIPLIER: f32 = 1.5;

// === AI ===

/// Number of turns a tile exclusion stays active.
pub const TILE_EXCLUSION_DURATION: Turn = 10;

/// Configuration for a generated world
///
/// Defaults produce a medium continent map for four players.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldGenConfig {
    /// Map width in tiles
    pub width: i32,
    /// Map height in tiles
    pub height: i32,
    /// Seed for every random draw of the pipeline
    pub seed: u64,
    /// Number of starting locations to select
    pub players: usize,

    // === RESOURCES ===
    /// Probability that a tile is considered for a deposit, in [0, 1]
    pub abundance: f64,
    /// Multiplier for both mean and spread of deposit quantities (>= 0)
    ///
    /// At 1.0 the base richness tiers are used unchanged. Values close to
    /// zero still produce deposits of quantity 1.
    pub richness: f64,

    // === TERRAIN ===
    /// Fraction of the map that ends up as land
    pub land_ratio: f64,
    /// Fraction of land that is raised into hills
    pub hill_ratio: f64,
    /// Fraction of land that is raised into mountains
    pub mountain_ratio: f64,
    /// Fraction of forestable tiles covered by forest
    pub forest_ratio: f64,
    /// Number of rivers traced inland from the coast
    pub river_count: usize,
}

impl Default for WorldGenConfig {
    fn default() -> Self {
        Self {
            width: 60,
            height: 40,
            seed: 42,
            players: 4,

            abundance: 0.15,
            richness: 1.0,

            land_ratio: 0.45,
            hill_ratio: 0.15,
            mountain_ratio: 0.08,
            forest_ratio: 0.3,
            river_count: 12,
        }
    }
}

impl WorldGenConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from TOML; missing keys keep their defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: WorldGenConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config file from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    pub fn tile_count(&self) -> usize {
        (self.width.max(0) as usize) * (self.height.max(0) as usize)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.width <= 0 || self.height <= 0 {
            return Err(HexforgeError::ConfigError(format!(
                "map size must be positive, got {}x{}",
                self.width, self.height
            )));
        }

        // Tile indexing works in i32
        if self.width.checked_mul(self.height).is_none() {
            return Err(HexforgeError::ConfigError(format!(
                "map size {}x{} has too many tiles",
                self.width, self.height
            )));
        }

        if !(0.0..=1.0).contains(&self.abundance) {
            return Err(HexforgeError::ConfigError(format!(
                "abundance ({}) must be within [0, 1]",
                self.abundance
            )));
        }

        if !self.richness.is_finite() || self.richness < 0.0 {
            return Err(HexforgeError::ConfigError(format!(
                "richness ({}) must be a non-negative number",
                self.richness
            )));
        }

        for (name, ratio) in [
            ("land_ratio", self.land_ratio),
            ("hill_ratio", self.hill_ratio),
            ("mountain_ratio", self.mountain_ratio),
            ("forest_ratio", self.forest_ratio),
        ] {
            if !(0.0..=1.0).contains(&ratio) {
                return Err(HexforgeError::ConfigError(format!(
                    "{} ({}) must be within [0, 1]",
                    name, ratio
                )));
            }
        }

        // Hills and mountains are carved out of the same land budget
        if self.hill_ratio + self.mountain_ratio > 1.0 {
            return Err(HexforgeError::ConfigError(format!(
                "hill_ratio + mountain_ratio ({}) exceeds 1",
                self.hill_ratio + self.mountain_ratio
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(WorldGenConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = WorldGenConfig::from_toml_str("width = 80\nseed = 7\n").unwrap();
        assert_eq!(config.width, 80);
        assert_eq!(config.seed, 7);
        assert_eq!(config.height, WorldGenConfig::default().height);
        assert_eq!(config.tile_count(), 80 * 40);
    }

    #[test]
    fn test_rejects_abundance_out_of_range() {
        let result = WorldGenConfig::from_toml_str("abundance = 1.5\n");
        assert!(matches!(result, Err(HexforgeError::ConfigError(_))));
    }

    #[test]
    fn test_rejects_negative_richness() {
        let config = WorldGenConfig {
            richness: -0.1,
            ..WorldGenConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_empty_map() {
        let config = WorldGenConfig {
            width: 0,
            ..WorldGenConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_tile_count_overflow() {
        let config = WorldGenConfig {
            width: 50_000,
            height: 50_000,
            ..WorldGenConfig::default()
        };
        assert!(matches!(config.validate(), Err(HexforgeError::ConfigError(_))));

        let widest = WorldGenConfig {
            width: i32::MAX,
            height: 1,
            ..WorldGenConfig::default()
        };
        assert!(widest.validate().is_ok());
    }

    #[test]
    fn test_rejects_malformed_toml() {
        let result = WorldGenConfig::from_toml_str("width = \"wide\"");
        assert!(matches!(result, Err(HexforgeError::TomlError(_))));
    }
}
