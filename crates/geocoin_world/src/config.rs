//! # World Configuration
//!
//! Loaded from TOML. Every field has a default, so a partial file (or an
//! empty one) is legal.
//!
//! ```toml
//! [grid]
//! tile_width = 0.0001
//! visibility_radius = 8
//!
//! [generation]
//! spawn_threshold = 0.02
//! max_coins_per_cache = 4
//!
//! [player]
//! start = [36.98949379578401, -122.06277128548504]
//! ```

use std::path::Path;

use geocoin_grid::{GridIndex, Point};
use geocoin_procedural::{CacheGenerator, GeneratorConfig};
use serde::{Deserialize, Serialize};

use crate::error::{WorldError, WorldResult};

/// Grid parameters.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Coordinate span of one cell.
    pub tile_width: f64,
    /// Chebyshev radius of the visible neighborhood. Negative means 0; at
    /// most [`GridIndex::MAX_RADIUS`].
    pub visibility_radius: i32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            tile_width: 1e-4,
            visibility_radius: 8,
        }
    }
}

/// Player parameters.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Starting `[lat, lng]`.
    pub start: [f64; 2],
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            start: [36.989_493_795_784_01, -122.062_771_285_485_04],
        }
    }
}

/// Complete world configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Grid section.
    pub grid: GridConfig,
    /// Generation section.
    pub generation: GeneratorConfig,
    /// Player section.
    pub player: PlayerConfig,
}

impl WorldConfig {
    /// Small always-spawn world for tests: every visible cell has a cache.
    #[must_use]
    pub fn test() -> Self {
        Self {
            grid: GridConfig {
                visibility_radius: 2,
                ..GridConfig::default()
            },
            generation: GeneratorConfig {
                spawn_threshold: 1.0,
                ..GeneratorConfig::default()
            },
            player: PlayerConfig::default(),
        }
    }

    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// Returns `WorldError::InvalidConfig` on a parse or validation failure.
    pub fn from_toml_str(text: &str) -> WorldResult<Self> {
        let config: Self =
            toml::from_str(text).map_err(|e| WorldError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    ///
    /// # Errors
    ///
    /// Returns `WorldError::InvalidConfig` if the file cannot be read or is
    /// invalid.
    pub fn load(path: impl AsRef<Path>) -> WorldResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| WorldError::InvalidConfig(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&text)
    }

    /// Serializes to TOML.
    ///
    /// # Errors
    ///
    /// Returns `WorldError::Encode` if serialization fails.
    pub fn to_toml_string(&self) -> WorldResult<String> {
        toml::to_string(self).map_err(|e| WorldError::Encode(e.to_string()))
    }

    /// Checks value ranges.
    ///
    /// # Errors
    ///
    /// Returns `WorldError::InvalidConfig` naming the first bad field.
    pub fn validate(&self) -> WorldResult<()> {
        let tile_width = self.grid.tile_width;
        if !tile_width.is_finite() || tile_width <= 0.0 {
            return Err(WorldError::InvalidConfig(format!(
                "grid.tile_width must be finite and positive, got {tile_width}"
            )));
        }

        let radius = self.grid.visibility_radius;
        if radius > GridIndex::MAX_RADIUS {
            return Err(WorldError::InvalidConfig(format!(
                "grid.visibility_radius must be at most {}, got {radius}",
                GridIndex::MAX_RADIUS
            )));
        }

        let threshold = self.generation.spawn_threshold;
        if !(0.0..=1.0).contains(&threshold) {
            return Err(WorldError::InvalidConfig(format!(
                "generation.spawn_threshold must be in [0, 1], got {threshold}"
            )));
        }

        let max_coins = self.generation.max_coins_per_cache;
        if max_coins > GeneratorConfig::MAX_COINS_LIMIT {
            return Err(WorldError::InvalidConfig(format!(
                "generation.max_coins_per_cache must be at most {}, got {max_coins}",
                GeneratorConfig::MAX_COINS_LIMIT
            )));
        }

        if !self.start_point().is_finite() {
            return Err(WorldError::InvalidConfig(
                "player.start must be finite".to_string(),
            ));
        }
        if self.grid_index().cell_for(self.start_point()).is_none() {
            return Err(WorldError::InvalidConfig(format!(
                "player.start {:?} lies outside the addressable grid",
                self.player.start
            )));
        }

        Ok(())
    }

    /// Visibility radius, clamped at 0.
    #[must_use]
    pub fn visibility_radius(&self) -> i32 {
        self.grid.visibility_radius.max(0)
    }

    /// Starting point.
    #[must_use]
    pub const fn start_point(&self) -> Point {
        Point::from_array(self.player.start)
    }

    /// Grid index for this configuration.
    #[must_use]
    pub const fn grid_index(&self) -> GridIndex {
        GridIndex::new(self.grid.tile_width)
    }

    /// Generator for this configuration.
    #[must_use]
    pub const fn generator(&self) -> CacheGenerator {
        CacheGenerator::new(self.generation)
    }
}
