//! # GeoCoin
//!
//! Location-bound coin caches on a persistent, procedurally generated grid.
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────┐
//! │                        GEOCOIN                                │
//! ├───────────────────────────────────────────────────────────────┤
//! │                                                               │
//! │  ┌──────────────┐   ┌──────────────┐   ┌──────────────────┐   │
//! │  │    grid      │──>│  procedural  │──>│      world       │   │
//! │  │ • Cell       │   │ • hash       │   │ • WorldLedger    │   │
//! │  │ • GridIndex  │   │ • generator  │   │ • GameSession    │   │
//! │  │ • Point      │   └──────────────┘   │ • stores         │   │
//! │  └──────┬───────┘          ▲           └──────────────────┘   │
//! │         │           ┌──────┴───────┐            ▲             │
//! │         └──────────>│   economy    │────────────┘             │
//! │                     │ • Coin/Cache │                          │
//! │                     │ • Inventory  │                          │
//! │                     │ • transfer   │                          │
//! │                     └──────────────┘                          │
//! └───────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use geocoin::{Direction, GameSession, MemoryStore, WorldConfig};
//!
//! let mut session = GameSession::start(WorldConfig::test(), MemoryStore::new()).unwrap();
//! session.step(Direction::East).unwrap();
//!
//! let here = session.current_cell();
//! let coin = session.cache(here).and_then(|c| c.coins().first().copied());
//! if let Some(coin) = coin {
//!     session.collect(here, coin).unwrap();
//!     assert_eq!(session.inventory().len(), 1);
//! }
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]

// Re-export the layers
pub use geocoin_economy as economy;
pub use geocoin_grid as grid;
pub use geocoin_procedural as procedural;
pub use geocoin_world as world;

// Re-export commonly used types
pub use geocoin_economy::{Cache, Coin, EconomyError, Inventory, TransferReceipt};
pub use geocoin_grid::{Cell, Direction, GridIndex, Point};
pub use geocoin_procedural::{CacheGenerator, GeneratorConfig};
pub use geocoin_world::{
    CellState, FileStore, GameSession, KeyValueStore, MemoryStore, VisibilityDelta, WorldConfig,
    WorldError, WorldLedger, WorldResult,
};
