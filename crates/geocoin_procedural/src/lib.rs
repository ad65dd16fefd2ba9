//! # GeoCoin Procedural Generation
//!
//! Deterministic cache placement for an unbounded, reproducible world.
//!
//! ## Design Principles
//!
//! 1. **Deterministic**: The same cell always yields the same decision
//! 2. **Cellular**: Every cell is decided independently of its neighbors
//! 3. **Seedless**: No process state feeds the hash
//! 4. **Write-once**: Generation runs at most once per cell; afterwards the
//!    ledger is the source of truth
//!
//! ## Core Components
//!
//! - `hash_to_unit`: String to `[0, 1)` mapping
//! - `CacheGenerator`: Spawn decision, coin count, fresh caches
//! - `GeneratorConfig`: Spawn threshold and coin bound
//!
//! ## Example
//!
//! ```rust
//! use geocoin_grid::Cell;
//! use geocoin_procedural::{CacheGenerator, GeneratorConfig};
//!
//! let gen = CacheGenerator::new(GeneratorConfig::default());
//! let cell = Cell::new(369_894, -1_220_628);
//!
//! if gen.should_spawn(cell) {
//!     let cache = gen.materialize(cell);
//!     assert_eq!(cache.len() as u32, gen.initial_coin_count(cell));
//! }
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod generator;
pub mod hash;

pub use generator::{CacheGenerator, GeneratorConfig, FIRST_SERIAL};
pub use hash::{hash_to_unit, stable_hash};
