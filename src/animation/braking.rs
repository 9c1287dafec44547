//! Braking inertia: a flick that slows to rest at a constant rate.

use crate::animation::inertia::{InertiaModel, Trajectory};
use crate::core::geo::Point;

/// Translation-only inertia with constant deceleration.
///
/// Each axis slows linearly from its release speed to rest over
/// `braking_time_ms`, so both axes stop together and the path is a straight
/// line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrakingInertia {
    position: Point,
    velocity: Point,
    scale: f64,
    braking_time_ms: f64,
}

impl BrakingInertia {
    /// `position` and `velocity` are in scaled camera space
    pub fn new(position: Point, velocity: Point, scale: f64, braking_time_ms: f64) -> Self {
        Self {
            position,
            velocity,
            scale,
            braking_time_ms: braking_time_ms.max(0.0),
        }
    }

    /// Brakes from the release state and velocity of an analytic model
    pub fn from_model(model: &InertiaModel, braking_time_ms: f64) -> Self {
        let end = model.end();
        Self::new(end.position, model.velocity(0.0), end.scale, braking_time_ms)
    }

    pub fn braking_time_ms(&self) -> f64 {
        self.braking_time_ms
    }

    /// Where the camera comes to rest
    pub fn rest_position(&self) -> Point {
        self.position(self.braking_time_ms)
    }

    fn elapsed(&self, t: f64) -> f64 {
        t.clamp(0.0, self.braking_time_ms)
    }
}

impl Trajectory for BrakingInertia {
    fn position(&self, t: f64) -> Point {
        if self.braking_time_ms <= 0.0 {
            return self.position;
        }
        let t = self.elapsed(t);
        let travel = t - t * t / (2.0 * self.braking_time_ms);
        self.position.add(&self.velocity.multiply(travel))
    }

    fn velocity(&self, t: f64) -> Point {
        if self.braking_time_ms <= 0.0 || t >= self.braking_time_ms {
            return Point::zero();
        }
        self.velocity
            .multiply(1.0 - self.elapsed(t) / self.braking_time_ms)
    }

    fn scale(&self, _t: f64) -> f64 {
        self.scale
    }

    fn is_translation_only(&self) -> bool {
        true
    }
}
