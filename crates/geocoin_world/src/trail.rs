//! Path trail: every position the player has occupied, in order.

use geocoin_grid::Point;

use crate::error::{WorldError, WorldResult};

/// Ordered list of visited points.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PathTrail {
    points: Vec<Point>,
}

impl PathTrail {
    /// Creates an empty trail.
    #[must_use]
    pub const fn new() -> Self {
        Self { points: Vec::new() }
    }

    /// Appends a point.
    pub fn push(&mut self, point: Point) {
        self.points.push(point);
    }

    /// Returns the visited points.
    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Most recent point.
    #[must_use]
    pub fn last(&self) -> Option<Point> {
        self.points.last().copied()
    }

    /// Number of points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns true if the trail is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Drops every point.
    pub fn clear(&mut self) {
        self.points.clear();
    }

    /// Encodes as `[[lat, lng], ...]`.
    ///
    /// # Errors
    ///
    /// Returns `WorldError::Encode` if serialization fails.
    pub fn to_json(&self) -> WorldResult<String> {
        let pairs: Vec<[f64; 2]> = self.points.iter().map(|p| p.to_array()).collect();
        serde_json::to_string(&pairs).map_err(|e| WorldError::Encode(e.to_string()))
    }

    /// Decodes `[[lat, lng], ...]`. Returns `None` if malformed.
    #[must_use]
    pub fn from_json(text: &str) -> Option<Self> {
        let pairs: Vec<[f64; 2]> = serde_json::from_str(text).ok()?;
        Some(Self {
            points: pairs.into_iter().map(Point::from_array).collect(),
        })
    }
}
