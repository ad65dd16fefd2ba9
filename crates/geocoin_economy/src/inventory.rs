//! # Inventory System
//!
//! The player's held coins, modeled as a cache with no place on the grid.
//! It is the usual source or destination of a transfer the player starts.

use geocoin_grid::Cell;

use crate::cache::Cache;
use crate::coin::Coin;
use crate::error::EconomyResult;

/// Sentinel cell of the inventory.
///
/// `(i64::MIN, i64::MIN)` lies outside the addressable range, so no point on
/// the grid maps to it. `(-1, -1)` would be a real cell south-west of the origin.
pub const INVENTORY_CELL: Cell = Cell::new(i64::MIN, i64::MIN);

/// The player's coin holding.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Inventory {
    /// Backing container, bound to [`INVENTORY_CELL`].
    cache: Cache,
}

impl Inventory {
    /// Creates an empty inventory.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            cache: Cache::new(INVENTORY_CELL),
        }
    }

    /// Rebuilds an inventory from a memento.
    ///
    /// # Errors
    ///
    /// Returns `EconomyError::CorruptState` if the memento is malformed.
    pub fn from_memento(memento: &str) -> EconomyResult<Self> {
        Ok(Self {
            cache: Cache::from_memento(INVENTORY_CELL, memento)?,
        })
    }

    /// Returns the held coins, sorted.
    #[inline]
    #[must_use]
    pub fn coins(&self) -> &[Coin] {
        self.cache.coins()
    }

    /// Number of coins held.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    /// Returns true if no coins are held.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    /// Returns true if `coin` is held.
    #[must_use]
    pub fn contains(&self, coin: &Coin) -> bool {
        self.cache.contains(coin)
    }

    /// The coin an "insert coin" action hands over: the last in sort order.
    #[must_use]
    pub fn last(&self) -> Option<Coin> {
        self.cache.coins().last().copied()
    }

    /// Adds a coin.
    ///
    /// Coins must come out of another container; outside the transfer
    /// protocol the caller owns the conservation invariant.
    pub fn add(&mut self, coin: Coin) {
        self.cache.insert(coin);
    }

    /// Removes a coin by identity.
    ///
    /// # Errors
    ///
    /// Returns `EconomyError::CoinNotFound` if the coin is not held.
    pub fn remove(&mut self, coin: &Coin) -> EconomyResult<Coin> {
        self.cache.take(coin)
    }

    /// Empties the inventory (full reset only).
    pub fn clear(&mut self) {
        self.cache.clear();
    }

    /// Encodes the holding.
    ///
    /// # Errors
    ///
    /// Returns `EconomyError::Encode` if serialization fails.
    pub fn to_memento(&self) -> EconomyResult<String> {
        self.cache.to_memento()
    }

    /// The backing cache, for read-only use.
    #[must_use]
    pub const fn as_cache(&self) -> &Cache {
        &self.cache
    }

    /// The backing cache, as a transfer endpoint.
    pub fn as_cache_mut(&mut self) -> &mut Cache {
        &mut self.cache
    }
}

impl Default for Inventory {
    fn default() -> Self {
        Self::new()
    }
}
