//! Continuous coordinates on the lat/lng plane.

use serde::{Deserialize, Serialize};

/// A point on the plane.
///
/// `lat` is the first axis (cell `i`), `lng` the second (cell `j`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// First axis.
    pub lat: f64,
    /// Second axis.
    pub lng: f64,
}

impl Point {
    /// Creates a new point.
    #[must_use]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Converts to `[lat, lng]`.
    #[must_use]
    pub const fn to_array(self) -> [f64; 2] {
        [self.lat, self.lng]
    }

    /// Creates from `[lat, lng]`.
    #[must_use]
    pub const fn from_array(arr: [f64; 2]) -> Self {
        Self::new(arr[0], arr[1])
    }

    /// Returns true if both components are finite.
    #[must_use]
    pub fn is_finite(self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }

    /// Moves `distance` units in `direction`.
    #[must_use]
    pub fn step(self, direction: Direction, distance: f64) -> Self {
        let (dlat, dlng) = direction.unit();
        Self::new(self.lat + dlat * distance, self.lng + dlng * distance)
    }
}

/// Movement directions for discrete player steps.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Increasing lat.
    North,
    /// Decreasing lat.
    South,
    /// Increasing lng.
    East,
    /// Decreasing lng.
    West,
}

impl Direction {
    /// All four directions.
    pub const ALL: [Self; 4] = [Self::North, Self::South, Self::East, Self::West];

    /// Unit vector as `(dlat, dlng)`.
    #[inline]
    #[must_use]
    pub const fn unit(self) -> (f64, f64) {
        match self {
            Self::North => (1.0, 0.0),
            Self::South => (-1.0, 0.0),
            Self::East => (0.0, 1.0),
            Self::West => (0.0, -1.0),
        }
    }
}

/// Axis-aligned rectangle covered by one cell.
///
/// Half-open: `[south_west.lat, north_east.lat) x [south_west.lng, north_east.lng)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CellBounds {
    /// Inclusive lower corner.
    pub south_west: Point,
    /// Exclusive upper corner.
    pub north_east: Point,
}

impl CellBounds {
    /// Returns true if `point` lies inside the half-open rectangle.
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        point.lat >= self.south_west.lat
            && point.lat < self.north_east.lat
            && point.lng >= self.south_west.lng
            && point.lng < self.north_east.lng
    }

    /// Center of the rectangle (where a presentation layer pins the cache).
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(
            (self.south_west.lat + self.north_east.lat) * 0.5,
            (self.south_west.lng + self.north_east.lng) * 0.5,
        )
    }
}
