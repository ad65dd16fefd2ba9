//! # Cache Container
//!
//! A cell-bound container of coins.
//!
//! ## Memento Format
//!
//! ```text
//! {"coins":[{"cell":{"i":369894,"j":-1220628},"serial":1}, ...]}
//! ```
//!
//! The memento carries only the coin list. The cache's own cell is fixed at
//! construction and rebuilt from the ledger key on load.
//!
//! ## Ordering
//!
//! Coins are kept sorted (serial, then origin cell) after every insertion so
//! that display and tests are deterministic.

use std::collections::HashSet;

use geocoin_grid::Cell;
use serde::{Deserialize, Serialize};

use crate::coin::Coin;
use crate::error::{EconomyError, EconomyResult};

/// Serialized form of a cache's contents.
#[derive(Serialize, Deserialize)]
struct CacheMemento {
    coins: Vec<Coin>,
}

/// A container of coins bound to one cell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cache {
    /// Cell this cache belongs to.
    cell: Cell,
    /// Contents, sorted.
    coins: Vec<Coin>,
}

impl Cache {
    /// Creates an empty cache.
    #[must_use]
    pub const fn new(cell: Cell) -> Self {
        Self {
            cell,
            coins: Vec::new(),
        }
    }

    /// Creates a cache holding `coins`.
    ///
    /// Intended for the generator, which is the only source of new coins.
    #[must_use]
    pub fn with_coins(cell: Cell, mut coins: Vec<Coin>) -> Self {
        coins.sort_unstable();
        Self { cell, coins }
    }

    /// Rebuilds a cache from a memento.
    ///
    /// # Errors
    ///
    /// Returns `EconomyError::CorruptState` if the memento is malformed.
    pub fn from_memento(cell: Cell, memento: &str) -> EconomyResult<Self> {
        let mut cache = Self::new(cell);
        cache.restore_memento(memento)?;
        Ok(cache)
    }

    /// Returns the cell this cache belongs to.
    #[inline]
    #[must_use]
    pub const fn cell(&self) -> Cell {
        self.cell
    }

    /// Returns the coins, sorted.
    #[inline]
    #[must_use]
    pub fn coins(&self) -> &[Coin] {
        &self.coins
    }

    /// Number of coins held.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.coins.len()
    }

    /// Returns true if the cache holds no coins.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.coins.is_empty()
    }

    /// Returns true if `coin` (by origin and serial) is held here.
    #[must_use]
    pub fn contains(&self, coin: &Coin) -> bool {
        self.coins.contains(coin)
    }

    /// Encodes the coin list.
    ///
    /// # Errors
    ///
    /// Returns `EconomyError::Encode` if serialization fails.
    pub fn to_memento(&self) -> EconomyResult<String> {
        serde_json::to_string(&CacheMemento {
            coins: self.coins.clone(),
        })
        .map_err(|e| EconomyError::Encode(e.to_string()))
    }

    /// Replaces the coin list from a memento.
    ///
    /// On error the cache is left untouched.
    ///
    /// # Errors
    ///
    /// Returns `EconomyError::CorruptState` if the memento is not well-formed
    /// or lists the same coin twice.
    pub fn restore_memento(&mut self, memento: &str) -> EconomyResult<()> {
        let decoded: CacheMemento =
            serde_json::from_str(memento).map_err(|e| EconomyError::CorruptState {
                reason: e.to_string(),
            })?;

        let mut seen = HashSet::with_capacity(decoded.coins.len());
        if let Some(dup) = decoded.coins.iter().find(|c| !seen.insert(**c)) {
            return Err(EconomyError::CorruptState {
                reason: format!("duplicate coin {dup}"),
            });
        }

        let mut coins = decoded.coins;
        coins.sort_unstable();
        self.coins = coins;
        Ok(())
    }

    /// Inserts a coin, keeping the order.
    pub(crate) fn insert(&mut self, coin: Coin) {
        let at = self.coins.partition_point(|c| *c < coin);
        self.coins.insert(at, coin);
    }

    /// Removes a coin by identity.
    pub(crate) fn take(&mut self, coin: &Coin) -> EconomyResult<Coin> {
        let index = self
            .coins
            .iter()
            .position(|c| c == coin)
            .ok_or(EconomyError::CoinNotFound { coin: *coin })?;
        Ok(self.coins.remove(index))
    }

    /// Removes every coin.
    pub(crate) fn clear(&mut self) {
        self.coins.clear();
    }
}
