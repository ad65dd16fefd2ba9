//! # Cell Identity
//!
//! A cell is the discrete address of one tile of the plane.
//!
//! ## Key Format
//!
//! Cells are keyed as decimal `i`, a comma, then decimal `j` (`"369894,-1220628"`).
//! The separator keeps `(1, 23)` and `(12, 3)` apart; the key is used both as
//! the ledger key and as the input of the procedural hash.
//!
//! ## Addressable Range
//!
//! Points only ever map to cells with `|i|` and `|j|` at most
//! [`Cell::MAX_INDEX`]. Everything outside that range is free for sentinels.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Cell coordinate (identifies one tile of the grid).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    /// Row index (lat / tile width, floored).
    pub i: i64,
    /// Column index (lng / tile width, floored).
    pub j: i64,
}

impl Cell {
    /// Largest index magnitude a point can map to (2^52, where `f64` still
    /// holds every integer exactly).
    pub const MAX_INDEX: i64 = 1 << 52;

    /// Creates a new cell.
    #[inline]
    #[must_use]
    pub const fn new(i: i64, j: i64) -> Self {
        Self { i, j }
    }

    /// Canonical string key, `"i,j"`.
    #[must_use]
    pub fn key(self) -> String {
        format!("{},{}", self.i, self.j)
    }

    /// Parses a key produced by [`Cell::key`].
    ///
    /// Returns `None` for anything that is not exactly two comma-separated
    /// decimal integers.
    #[must_use]
    pub fn parse_key(key: &str) -> Option<Self> {
        let (i, j) = key.split_once(',')?;
        Some(Self {
            i: i.trim().parse().ok()?,
            j: j.trim().parse().ok()?,
        })
    }

    /// Returns true if some point can map to this cell.
    #[inline]
    #[must_use]
    pub const fn is_addressable(self) -> bool {
        self.i.unsigned_abs() <= Self::MAX_INDEX.unsigned_abs()
            && self.j.unsigned_abs() <= Self::MAX_INDEX.unsigned_abs()
    }

    /// Returns the cell offset by `(di, dj)`, or `None` on overflow.
    #[inline]
    #[must_use]
    pub fn offset(self, di: i64, dj: i64) -> Option<Self> {
        Some(Self {
            i: self.i.checked_add(di)?,
            j: self.j.checked_add(dj)?,
        })
    }

    /// Chebyshev (king-move) distance to another cell.
    #[must_use]
    pub fn chebyshev_distance(self, other: Self) -> u64 {
        self.i.abs_diff(other.i).max(self.j.abs_diff(other.j))
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.i, self.j)
    }
}
