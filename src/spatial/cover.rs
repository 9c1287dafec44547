//! Value types produced by the clustering solvers.

use crate::core::constants::GEOMETRY_EPSILON;
use crate::core::geo::Point;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub center: Point,
    pub radius: f64,
}

impl Circle {
    pub fn new(center: Point, radius: f64) -> Self {
        Self { center, radius }
    }

    /// Containment with a tolerance scaled to the circle size
    pub fn contains(&self, point: &Point) -> bool {
        let tolerance = GEOMETRY_EPSILON * self.radius.max(1.0);
        self.center.distance_to(point) <= self.radius + tolerance
    }

    /// Strict overlap: touching circles do not overlap
    pub fn overlaps(&self, other: &Circle) -> bool {
        self.center.distance_to(&other.center) < self.radius + other.radius
    }
}

/// A cluster of markers summarised by one enclosing circle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cover {
    /// Member indexes into the solver input, ascending
    pub indexes: Vec<usize>,
    pub circle: Circle,
}

impl Cover {
    pub fn len(&self) -> usize {
        self.indexes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indexes.is_empty()
    }

    /// Covers with equal member sets are the same marker from the host's point of view
    pub fn same_members(&self, other: &Cover) -> bool {
        self.indexes == other.indexes
    }
}

/// 1-D extent as `(center, half_width)`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Span {
    pub center: f64,
    pub half_width: f64,
}

impl Span {
    pub fn from_range(low: f64, high: f64) -> Self {
        Self {
            center: (low + high) / 2.0,
            half_width: (high - low) / 2.0,
        }
    }

    pub fn low(&self) -> f64 {
        self.center - self.half_width
    }

    pub fn high(&self) -> f64 {
        self.center + self.half_width
    }
}

/// 1-D analogue of [`Cover`], scoped to one axis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cover1D {
    /// Member indexes ordered by scalar value
    pub indexes: Vec<usize>,
    pub span: Span,
}
