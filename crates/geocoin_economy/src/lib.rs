//! # GeoCoin Economy
//!
//! Coins, the caches that hold them, and the protocol that moves them.
//!
//! ## Design Principles
//!
//! 1. **Conservation** - Every generated coin is in exactly one container
//! 2. **Value identity** - Coins match by `(origin cell, serial)`, never by instance
//! 3. **Mementos** - Container contents round-trip through a JSON string
//! 4. **No storage** - Persisting a mutation is the caller's job
//!
//! ## Example
//!
//! ```rust
//! use geocoin_economy::{transfer, Cache, Coin, Inventory};
//! use geocoin_grid::Cell;
//!
//! let cell = Cell::new(369_894, -1_220_628);
//! let mut cache = Cache::with_coins(cell, vec![Coin::new(cell, 1), Coin::new(cell, 2)]);
//! let mut inventory = Inventory::new();
//!
//! transfer(&mut cache, inventory.as_cache_mut(), &Coin::new(cell, 1)).unwrap();
//! assert_eq!(cache.len(), 1);
//! assert_eq!(inventory.len(), 1);
//!
//! // A stale second click fails and changes nothing.
//! assert!(transfer(&mut cache, inventory.as_cache_mut(), &Coin::new(cell, 1)).is_err());
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod cache;
pub mod coin;
pub mod error;
pub mod inventory;
pub mod transfer;

pub use cache::Cache;
pub use coin::Coin;
pub use error::{EconomyError, EconomyResult};
pub use inventory::{Inventory, INVENTORY_CELL};
pub use transfer::{transfer, TransferReceipt};
