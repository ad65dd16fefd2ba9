//! Coin identity.

use std::cmp::Ordering;
use std::fmt;

use geocoin_grid::Cell;
use serde::{Deserialize, Serialize};

/// A coin, identified by the cell that minted it and a serial.
///
/// Serials are unique only among the coins of one origin cell. A coin keeps
/// its identity wherever it travels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coin {
    /// Cell the coin was generated in.
    pub cell: Cell,
    /// Serial within the origin cell, starting at 1.
    pub serial: u32,
}

impl Coin {
    /// Creates a coin handle.
    #[inline]
    #[must_use]
    pub const fn new(cell: Cell, serial: u32) -> Self {
        Self { cell, serial }
    }
}

impl Ord for Coin {
    /// Serial first, then origin cell.
    fn cmp(&self, other: &Self) -> Ordering {
        self.serial
            .cmp(&other.serial)
            .then_with(|| self.cell.cmp(&other.cell))
    }
}

impl PartialOrd for Coin {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Coin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.cell, self.serial)
    }
}
