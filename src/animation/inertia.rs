//! Closed-form inertia for a flick that may pan and zoom at once.
//!
//! The models work in *scaled* camera space, where `position = offset *
//! zoom / 100` and `scale = zoom / 100`. In that space a zoom about a fixed
//! screen point moves `position` along a straight line by an amount
//! proportional to the zoom ratio, so continuing a constant zoom rate gives a
//! geometric series with a closed-form sum.
//!
//! Time `t` is measured in milliseconds from release: `t = 0` is the last
//! trail sample and `t = -dt` the start of the velocity window.

use crate::core::{camera::Camera, constants::MIN_VELOCITY_DT_MS, geo::Point};

/// Ratios closer to one than this are treated as a constant zoom
const UNIT_RATIO_EPSILON: f64 = 1e-12;

/// Camera state in scaled space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaledCamera {
    pub position: Point,
    pub scale: f64,
}

impl ScaledCamera {
    pub fn new(position: Point, scale: f64) -> Self {
        Self { position, scale }
    }

    pub fn from_camera(camera: &Camera) -> Self {
        let scale = camera.scale();
        Self::new(camera.offset.multiply(scale), scale)
    }

    pub fn to_camera(&self) -> Camera {
        Camera::new(
            self.scale * 100.0,
            Point::new(self.position.x / self.scale, self.position.y / self.scale),
        )
    }
}

/// A camera path sampled by inertia playback
pub trait Trajectory: Send + Sync {
    /// Scaled position at `t`
    fn position(&self, t: f64) -> Point;

    /// Derivative of [`Trajectory::position`] at `t`
    fn velocity(&self, t: f64) -> Point;

    /// Scale (zoom / 100) at `t`
    fn scale(&self, t: f64) -> f64;

    fn camera(&self, t: f64) -> Camera {
        ScaledCamera::new(self.position(t), self.scale(t)).to_camera()
    }

    fn speed(&self, t: f64) -> f64 {
        self.velocity(t).length()
    }

    /// True when the path never changes zoom
    fn is_translation_only(&self) -> bool;

    /// Time at which the path reaches `scale`, if it ever does
    fn time_at_scale(&self, _scale: f64) -> Option<f64> {
        None
    }
}

/// Analytic trajectory through two samples `dt` apart
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InertiaModel {
    start: ScaledCamera,
    end: ScaledCamera,
    dt: f64,
    direction: Point,
    distance: f64,
    ratio: f64,
    log_ratio: f64,
}

impl InertiaModel {
    /// `start` is the state at `-dt`, `end` the state at release.
    /// Both scales must be positive.
    pub fn new(start: ScaledCamera, end: ScaledCamera, dt: f64) -> Self {
        let travel = end.position.subtract(&start.position);
        let ratio = end.scale / start.scale;
        Self {
            start,
            end,
            dt: dt.max(MIN_VELOCITY_DT_MS),
            direction: travel.normalized(),
            distance: travel.length(),
            ratio,
            log_ratio: ratio.ln(),
        }
    }

    pub fn start(&self) -> ScaledCamera {
        self.start
    }

    pub fn end(&self) -> ScaledCamera {
        self.end
    }

    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Zoom ratio per window: `z1 / z0`
    pub fn ratio(&self) -> f64 {
        self.ratio
    }

    fn constant_zoom(&self) -> bool {
        (self.ratio - 1.0).abs() < UNIT_RATIO_EPSILON
    }

    /// Windows elapsed since the start sample
    fn windows(&self, t: f64) -> f64 {
        (t + self.dt) / self.dt
    }

    /// `z(t) / z0`
    fn growth(&self, t: f64) -> f64 {
        (self.windows(t) * self.log_ratio).exp()
    }

    /// `(z(t) / z0 - 1) / (ratio - 1)`, exactly one at release
    fn travelled_fraction(&self, t: f64) -> f64 {
        (self.windows(t) * self.log_ratio).exp_m1() / self.log_ratio.exp_m1()
    }

    /// Same release state with the radial motion of a pinch about
    /// `pinch_origin` taken out of the velocity.
    ///
    /// `pinch_origin` is a screen point, whose sign is opposite to the camera
    /// offset, so the fixed point of the pinch in scaled space is
    /// `-pinch_origin`. The correction is taken from the window's average
    /// velocity, which a pure pinch explains exactly. This intentionally
    /// differs from correcting the analytic release velocity `v(0)`, which
    /// leaves residual motion after a pure pinch. The result keeps the
    /// release zoom constant.
    pub fn remove_zoom(&self, pinch_origin: Point) -> InertiaModel {
        let radial = self.end.position.add(&pinch_origin);
        let pinch_speed = (1.0 - self.start.scale / self.end.scale) * radial.length() / self.dt;
        let average = self
            .end
            .position
            .subtract(&self.start.position)
            .multiply(1.0 / self.dt);
        let corrected = average.subtract(&radial.normalized().multiply(pinch_speed));
        let start = ScaledCamera::new(
            self.end.position.subtract(&corrected.multiply(self.dt)),
            self.end.scale,
        );
        InertiaModel::new(start, self.end, self.dt)
    }
}

impl Trajectory for InertiaModel {
    fn position(&self, t: f64) -> Point {
        let travelled = if self.constant_zoom() {
            self.distance * (t + self.dt) / self.dt
        } else {
            self.distance * self.travelled_fraction(t)
        };
        self.start.position.add(&self.direction.multiply(travelled))
    }

    fn velocity(&self, t: f64) -> Point {
        let speed = if self.constant_zoom() {
            self.distance / self.dt
        } else {
            self.distance * self.log_ratio / self.dt * self.growth(t) / self.log_ratio.exp_m1()
        };
        self.direction.multiply(speed)
    }

    fn scale(&self, t: f64) -> f64 {
        if self.constant_zoom() {
            self.end.scale
        } else {
            self.start.scale * self.growth(t)
        }
    }

    fn is_translation_only(&self) -> bool {
        self.constant_zoom()
    }

    fn time_at_scale(&self, scale: f64) -> Option<f64> {
        if self.constant_zoom() || scale <= 0.0 || self.start.scale <= 0.0 {
            return None;
        }
        // solve ratio^((t + dt) / dt) = scale / z0
        let exponent = (scale / self.start.scale).ln() / self.log_ratio;
        let t = self.dt * exponent - self.dt;
        t.is_finite().then_some(t)
    }
}
