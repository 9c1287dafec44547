//! Viewport rectangles and the per-axis before/within/after test behind
//! off-screen classification.

use crate::core::geo::Point;
use serde::{Deserialize, Serialize};

/// Position of a scalar relative to a closed interval
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Section {
    Before = 0,
    Within = 1,
    After = 2,
}

impl Section {
    /// Classifies `value` against `[start, end]`; both ends count as within
    pub fn of(value: f64, start: f64, end: f64) -> Self {
        if value < start {
            Section::Before
        } else if value <= end {
            Section::Within
        } else {
            Section::After
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

/// Represents an axis-aligned rectangle in map units
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: Point,
    pub max: Point,
}

impl Bounds {
    /// Creates new bounds from two points
    pub fn new(min: Point, max: Point) -> Self {
        Self { min, max }
    }

    /// Creates bounds from individual coordinates
    pub fn from_coords(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self::new(Point::new(min_x, min_y), Point::new(max_x, max_y))
    }

    /// Creates bounds from an `(x, y, width, height)` viewport rectangle
    pub fn from_rect(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::from_coords(x, y, x + width, y + height)
    }

    /// Checks if the bounds contain a point (edges included)
    pub fn contains(&self, point: &Point) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }

    /// Per-axis classification of a point: `(horizontal, vertical)`
    pub fn classify(&self, point: &Point) -> (Section, Section) {
        (
            Section::of(point.x, self.min.x, self.max.x),
            Section::of(point.y, self.min.y, self.max.y),
        )
    }
}
