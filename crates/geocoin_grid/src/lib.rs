//! # GeoCoin Grid
//!
//! Discretizes the continuous lat/lng plane into fixed-width cells.
//!
//! ## Design Principles
//!
//! 1. **Canonical**: A point maps to exactly one cell, via floor division
//! 2. **Value identity**: Two cells are the same cell iff their `(i, j)` match
//! 3. **Checked**: Points beyond the addressable range have no cell; nothing clamps
//!
//! ## Core Components
//!
//! - `Cell`: Discrete `(i, j)` grid address
//! - `Point`: Continuous coordinate (lat, lng)
//! - `CellBounds`: Half-open rectangle covered by one cell
//! - `GridIndex`: Point-to-cell mapping and neighborhood sweeps
//!
//! ## Example
//!
//! ```rust
//! use geocoin_grid::{GridIndex, Point};
//!
//! let grid = GridIndex::new(0.0001);
//! let here = Point::new(36.98949379578401, -122.06277128548504);
//!
//! let cell = grid.cell_for(here).unwrap();
//! assert!(grid.bounds_of(cell).contains(here));
//! assert_eq!(grid.neighborhood(here, 8).map(|cells| cells.len()), Some(17 * 17));
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod cell;
pub mod index;
pub mod point;

pub use cell::Cell;
pub use index::GridIndex;
pub use point::{CellBounds, Direction, Point};
