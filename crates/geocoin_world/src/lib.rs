//! # GeoCoin World
//!
//! The persistent world: which caches exist, which are in view, and how
//! their state survives restarts.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                    GameSession                       │
//! │   position, trail, inventory, store                  │
//! └───────────────┬──────────────────────┬───────────────┘
//!                 │ reconcile / transfer │ save / load
//!                 ▼                      ▼
//! ┌───────────────────────────┐  ┌──────────────────────┐
//! │        WorldLedger        │  │  persistence codec   │
//! │ mementos · active · barren│  │ caches · inventory · │
//! │ GridIndex + CacheGenerator│  │ pathCoords           │
//! └───────────────────────────┘  └──────────┬───────────┘
//!                                           ▼
//!                                  ┌──────────────────┐
//!                                  │  KeyValueStore   │
//!                                  │ Memory │ File    │
//!                                  └──────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use geocoin_world::{GameSession, MemoryStore, WorldConfig};
//! use geocoin_grid::Direction;
//!
//! let mut session = GameSession::start(WorldConfig::test(), MemoryStore::new()).unwrap();
//! let delta = session.step(Direction::North).unwrap();
//! assert_eq!(delta.spawned.len(), 5);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod config;
pub mod error;
pub mod ledger;
pub mod persistence;
pub mod session;
pub mod storage;
pub mod trail;

pub use config::{GridConfig, PlayerConfig, WorldConfig};
pub use error::{StorageError, StorageResult, WorldError, WorldResult};
pub use ledger::{CellState, VisibilityDelta, WorldLedger};
pub use persistence::{SavedWorld, CACHES_KEY, INVENTORY_KEY, PATH_KEY};
pub use session::GameSession;
pub use storage::{FileStore, KeyValueStore, MemoryStore};
pub use trail::PathTrail;
