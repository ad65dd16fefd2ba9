//! # Cache Generator
//!
//! Decides, per cell, whether a cache exists and what it initially holds.
//!
//! Both decisions are pure functions of the cell key and the configuration.
//! The coin count hashes a suffixed key, so it is independent of the spawn
//! roll even though both derive from the same cell.

use geocoin_economy::{Cache, Coin};
use geocoin_grid::Cell;
use serde::{Deserialize, Serialize};

use crate::hash::hash_to_unit;

/// First serial handed out in a fresh cache.
pub const FIRST_SERIAL: u32 = 1;

/// Suffix that derives the coin-count key from the cell key.
const COIN_COUNT_SUFFIX: &str = ",initialValue";

/// Generation parameters.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// A cell spawns when its unit hash is below this cutoff.
    pub spawn_threshold: f64,
    /// Exclusive upper bound on a fresh cache's coin count.
    pub max_coins_per_cache: u32,
}

impl GeneratorConfig {
    /// Reference spawn cutoff.
    pub const DEFAULT_SPAWN_THRESHOLD: f64 = 0.02;
    /// Reference coin bound.
    pub const DEFAULT_MAX_COINS: u32 = 4;
    /// Largest coin bound a world configuration accepts.
    pub const MAX_COINS_LIMIT: u32 = 1024;
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            spawn_threshold: Self::DEFAULT_SPAWN_THRESHOLD,
            max_coins_per_cache: Self::DEFAULT_MAX_COINS,
        }
    }
}

/// Deterministic cache generator.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CacheGenerator {
    /// Generation parameters.
    config: GeneratorConfig,
}

impl CacheGenerator {
    /// Creates a new generator.
    #[must_use]
    pub const fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Returns true if a cache exists at `cell`.
    #[must_use]
    pub fn should_spawn(&self, cell: Cell) -> bool {
        hash_to_unit(&cell.key()) < self.config.spawn_threshold
    }

    /// Number of coins a fresh cache at `cell` starts with.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn initial_coin_count(&self, cell: Cell) -> u32 {
        let roll = hash_to_unit(&format!("{}{COIN_COUNT_SUFFIX}", cell.key()));
        // roll < 1, so the product stays below max_coins_per_cache.
        (roll * f64::from(self.config.max_coins_per_cache)).floor() as u32
    }

    /// Builds the fresh cache for `cell`: serials `1..=count`, all minted here.
    ///
    /// Only for cells with no ledger entry. A cell already in the ledger is
    /// restored from its memento, never regenerated.
    #[must_use]
    pub fn materialize(&self, cell: Cell) -> Cache {
        let count = self.initial_coin_count(cell);
        let coins = (FIRST_SERIAL..FIRST_SERIAL + count)
            .map(|serial| Coin::new(cell, serial))
            .collect();
        Cache::with_coins(cell, coins)
    }
}
