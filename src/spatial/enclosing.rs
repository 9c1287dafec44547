//! Minimal enclosing circle strategies.
//!
//! The `smallest` cover method is pluggable: a [`ClusterSolver`] only offers
//! it when an [`EnclosingCircle`] implementation was injected at
//! construction.
//!
//! [`ClusterSolver`]: crate::spatial::clustering::ClusterSolver

use crate::core::geo::Point;
use crate::spatial::cover::Circle;

/// Computes a circle enclosing every given point
pub trait EnclosingCircle: Send + Sync {
    /// `points` is never empty
    fn enclose(&self, points: &[Point]) -> Circle;

    fn name(&self) -> &str;
}

/// Welzl's minimal enclosing circle, in its iterative form.
///
/// Points are visited in input order with no shuffling, so results are
/// reproducible; the worst case is cubic, which is fine for cluster-sized
/// inputs.
#[derive(Debug, Clone, Copy, Default)]
pub struct Welzl;

impl EnclosingCircle for Welzl {
    fn enclose(&self, points: &[Point]) -> Circle {
        let mut circle = Circle::new(points[0], 0.0);
        for i in 1..points.len() {
            if circle.contains(&points[i]) {
                continue;
            }
            circle = Circle::new(points[i], 0.0);
            for j in 0..i {
                if circle.contains(&points[j]) {
                    continue;
                }
                circle = diameter_circle(&points[i], &points[j]);
                for k in 0..j {
                    if !circle.contains(&points[k]) {
                        circle = circumscribed(&points[i], &points[j], &points[k]);
                    }
                }
            }
        }
        circle
    }

    fn name(&self) -> &str {
        "welzl"
    }
}

fn diameter_circle(a: &Point, b: &Point) -> Circle {
    Circle::new(a.midpoint(b), a.distance_to(b) / 2.0)
}

/// Circle through three points; collinear triples fall back to the widest pair
fn circumscribed(a: &Point, b: &Point, c: &Point) -> Circle {
    let (bx, by) = (b.x - a.x, b.y - a.y);
    let (cx, cy) = (c.x - a.x, c.y - a.y);
    let d = 2.0 * (bx * cy - by * cx);
    if d.abs() < f64::EPSILON {
        return [
            diameter_circle(a, b),
            diameter_circle(a, c),
            diameter_circle(b, c),
        ]
        .into_iter()
        .fold(Circle::new(*a, 0.0), |widest, circle| {
            if circle.radius > widest.radius {
                circle
            } else {
                widest
            }
        });
    }
    let b2 = bx * bx + by * by;
    let c2 = cx * cx + cy * cy;
    let ux = (cy * b2 - by * c2) / d;
    let uy = (bx * c2 - cx * b2) / d;
    let center = Point::new(a.x + ux, a.y + uy);
    Circle::new(center, ux.hypot(uy))
}
