//! # Grid Index
//!
//! Maps continuous points to cells and answers neighborhood queries.
//!
//! Cells are plain `Copy` values, so there is no interning table: two lookups
//! of the same point produce equal cells, and equality is all any caller needs.
//!
//! A point whose floored coordinates fall outside [`Cell::MAX_INDEX`] (or are
//! not finite) has no cell. Lookups return `None` instead of clamping, so two
//! distinct far-away points can never share a cell.

use crate::cell::Cell;
use crate::point::{CellBounds, Point};

/// [`Cell::MAX_INDEX`] as a float; exact, being a power of two.
#[allow(clippy::cast_precision_loss)]
const MAX_INDEX_F64: f64 = Cell::MAX_INDEX as f64;

/// Point-to-cell index with a fixed tile width.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridIndex {
    /// Coordinate span of one cell along either axis.
    tile_width: f64,
}

impl GridIndex {
    /// Largest neighborhood radius a query accepts.
    pub const MAX_RADIUS: i32 = 64;

    /// Creates a new index.
    ///
    /// `tile_width` must be finite and positive; configuration validation
    /// enforces this before an index is built.
    #[must_use]
    pub const fn new(tile_width: f64) -> Self {
        Self { tile_width }
    }

    /// Returns the tile width.
    #[inline]
    #[must_use]
    pub const fn tile_width(&self) -> f64 {
        self.tile_width
    }

    /// Returns the cell containing `point`.
    ///
    /// Floor division, so negative coordinates round toward negative infinity.
    /// Returns `None` if either floored coordinate is not finite or lies
    /// beyond [`Cell::MAX_INDEX`].
    #[must_use]
    pub fn cell_for(&self, point: Point) -> Option<Cell> {
        Some(Cell::new(
            axis_index(point.lat / self.tile_width)?,
            axis_index(point.lng / self.tile_width)?,
        ))
    }

    /// Returns the rectangle covered by `cell`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn bounds_of(&self, cell: Cell) -> CellBounds {
        let w = self.tile_width;
        let (i, j) = (cell.i as f64, cell.j as f64);
        CellBounds {
            south_west: Point::new(i * w, j * w),
            north_east: Point::new((i + 1.0) * w, (j + 1.0) * w),
        }
    }

    /// Returns every cell within Chebyshev distance `radius` of the cell
    /// containing `point`, center included.
    ///
    /// Yields exactly `(2r + 1)^2` distinct cells. A negative radius is
    /// treated as zero. Returns `None` if `point` has no cell or `radius`
    /// exceeds [`GridIndex::MAX_RADIUS`].
    #[must_use]
    pub fn neighborhood(&self, point: Point, radius: i32) -> Option<Vec<Cell>> {
        Self::cells_around(self.cell_for(point)?, radius)
    }

    /// Same sweep as [`GridIndex::neighborhood`], centered on a known cell.
    ///
    /// Returns `None` if `center` is not addressable or `radius` exceeds
    /// [`GridIndex::MAX_RADIUS`].
    #[must_use]
    pub fn cells_around(center: Cell, radius: i32) -> Option<Vec<Cell>> {
        if !center.is_addressable() || radius > Self::MAX_RADIUS {
            return None;
        }
        let r = i64::from(radius.max(0));
        let side = usize::try_from(2 * r + 1).ok()?;
        let mut cells = Vec::with_capacity(side * side);

        // Addressable centers sit far inside the i64 range, so plain adds
        // cannot overflow, and each (di, dj) pair yields a different cell.
        for di in -r..=r {
            for dj in -r..=r {
                cells.push(Cell::new(center.i + di, center.j + dj));
            }
        }

        Some(cells)
    }
}

impl Default for GridIndex {
    fn default() -> Self {
        Self::new(1.0e-4)
    }
}

/// Floors one scaled coordinate into a cell index.
#[allow(clippy::cast_possible_truncation)]
fn axis_index(scaled: f64) -> Option<i64> {
    let floored = scaled.floor();
    // NaN fails both comparisons.
    if (-MAX_INDEX_F64..=MAX_INDEX_F64).contains(&floored) {
        Some(floored as i64)
    } else {
        None
    }
}
