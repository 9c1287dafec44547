//! Frame-by-frame playback of an inertia trajectory.
//!
//! The host calls [`InertiaPlayback::tick`] from its animation-frame loop and
//! writes the returned camera. Anything else that wants to move the camera
//! cancels the playback first through its [`CancellationToken`], so there is
//! never more than one writer.

use crate::{
    animation::{
        braking::BrakingInertia,
        inertia::{InertiaModel, Trajectory},
    },
    core::{camera::Camera, config::{InertiaConfig, InertiaModelKind}},
};
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

/// Shared cancellation flag; clones observe the same state
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

pub struct InertiaPlayback {
    trajectory: Box<dyn Trajectory>,
    started_at: f64,
    config: InertiaConfig,
    zoom_range: Option<(f64, f64)>,
    last_scale: Option<f64>,
    token: CancellationToken,
    finished: bool,
}

impl std::fmt::Debug for InertiaPlayback {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InertiaPlayback")
            .field("started_at", &self.started_at)
            .field("zoom_range", &self.zoom_range)
            .field("cancelled", &self.token.is_cancelled())
            .field("finished", &self.finished)
            .finish()
    }
}

impl InertiaPlayback {
    pub fn new(trajectory: Box<dyn Trajectory>, started_at: f64, config: &InertiaConfig) -> Self {
        Self {
            trajectory,
            started_at,
            config: config.clone(),
            zoom_range: None,
            last_scale: None,
            token: CancellationToken::new(),
            finished: false,
        }
    }

    /// Playback for a gesture released at `released_at`.
    ///
    /// The analytic model without a zoom change is a constant-velocity
    /// drift, so it is braked instead; the braking model always is.
    pub fn from_release(model: InertiaModel, released_at: f64, config: &InertiaConfig) -> Self {
        let trajectory: Box<dyn Trajectory> = match config.model {
            InertiaModelKind::Analytic if !model.is_translation_only() => Box::new(model),
            _ => Box::new(BrakingInertia::from_model(&model, config.braking_time_ms)),
        };
        Self::new(trajectory, released_at, config)
    }

    /// Clamps playback zoom to `[min, max]`, ending playback at the limit
    pub fn with_zoom_range(mut self, min: f64, max: f64) -> Self {
        self.zoom_range = Some((min, max));
        self
    }

    /// Host time (ms) of the release this playback continues
    pub fn started_at(&self) -> f64 {
        self.started_at
    }

    pub fn token(&self) -> CancellationToken {
        self.token.clone()
    }

    pub fn stop(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    pub fn is_finished(&self) -> bool {
        self.finished || self.token.is_cancelled()
    }

    pub fn trajectory(&self) -> &dyn Trajectory {
        self.trajectory.as_ref()
    }

    /// Camera where the trajectory crosses `zoom`, so the zoom anchor stays
    /// put on the clamped frame. Paths that cannot be solved for a scale
    /// only clamp the zoom.
    fn camera_at_zoom(&self, fallback: Camera, zoom: f64) -> Camera {
        let scale = zoom / 100.0;
        match self.trajectory.time_at_scale(scale) {
            Some(t) => Camera::new(zoom, self.trajectory.position(t).multiply(1.0 / scale)),
            None => Camera::new(zoom, fallback.offset),
        }
    }

    /// Camera for the frame at `now` (ms), or `None` once playback is over.
    /// The frame that meets a stop condition is still returned.
    pub fn tick(&mut self, now: f64) -> Option<Camera> {
        if self.is_finished() {
            return None;
        }
        let t = (now - self.started_at).max(0.0);
        let mut camera = self.trajectory.camera(t);
        let scale = self.trajectory.scale(t);

        if let Some((min, max)) = self.zoom_range {
            if camera.zoom < min || camera.zoom > max {
                camera = self.camera_at_zoom(camera, camera.zoom.clamp(min, max));
                log::debug!("inertia reached zoom limit {:.1}", camera.zoom);
                self.finished = true;
            }
        }

        // the first frame has no previous zoom to compare against
        let settled_zoom = self
            .last_scale
            .map_or(false, |last| (scale / last - 1.0).abs() < self.config.zoom_threshold);
        self.last_scale = Some(scale);
        if settled_zoom && self.trajectory.speed(t) < self.config.speed_threshold {
            log::trace!("inertia settled after {:.0} ms", t);
            self.finished = true;
        }
        if t >= self.config.max_duration_ms {
            log::debug!("inertia cut off after {:.0} ms", t);
            self.finished = true;
        }
        Some(camera)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::inertia::ScaledCamera;
    use crate::core::geo::Point;

    fn drift(velocity_x: f64) -> InertiaModel {
        InertiaModel::new(
            ScaledCamera::new(Point::new(0.0, 0.0), 1.0),
            ScaledCamera::new(Point::new(velocity_x * 50.0, 0.0), 1.0),
            50.0,
        )
    }

    #[test]
    fn test_token_is_shared() {
        let token = CancellationToken::new();
        let clone = token.clone();
        assert!(!token.is_cancelled());
        clone.cancel();
        assert!(token.is_cancelled());
    }

    #[test]
    fn test_translation_is_braked_to_rest() {
        let config = InertiaConfig::default();
        let mut playback = InertiaPlayback::from_release(drift(-0.1), 1000.0, &config);
        assert!(playback.trajectory().is_translation_only());

        let first = playback.tick(1000.0).unwrap();
        assert_eq!(first.offset, Point::new(-5.0, 0.0));

        let mut frames = 1;
        let mut now = 1000.0;
        let mut last = first;
        while let Some(camera) = playback.tick(now) {
            last = camera;
            frames += 1;
            now += 16.0;
            assert!(frames < 1000, "playback never settled");
        }
        assert!(playback.is_finished());
        // braked travel is half the release speed times the braking time
        let expected = -5.0 - 0.1 * config.braking_time_ms / 2.0;
        assert!((last.offset.x - expected).abs() < 1.0);
    }

    #[test]
    fn test_stop_cancels_next_tick() {
        let mut playback = InertiaPlayback::from_release(drift(0.5), 0.0, &InertiaConfig::default());
        assert!(playback.tick(16.0).is_some());
        let token = playback.token();
        token.cancel();
        assert!(playback.is_cancelled());
        assert!(playback.tick(32.0).is_none());
    }

    #[test]
    fn test_zoom_in_flick_stops_at_zoom_limit() {
        let model = InertiaModel::new(
            ScaledCamera::new(Point::zero(), 1.0),
            ScaledCamera::new(Point::zero(), 1.5),
            50.0,
        );
        let config = InertiaConfig::default();
        let mut playback = InertiaPlayback::from_release(model, 0.0, &config).with_zoom_range(5.0, 400.0);
        let mut last = None;
        let mut now = 0.0;
        while let Some(camera) = playback.tick(now) {
            last = Some(camera);
            now += 16.0;
        }
        let last = last.unwrap();
        assert_eq!(last.zoom, 400.0);
        assert!(now < config.max_duration_ms);
    }

    #[test]
    fn test_clamped_frame_keeps_anchor_fixed() {
        // zooming by 1.5 about screen point `a` moves scaled position s to (s + a) * 1.5 - a
        let anchor = Point::new(100.0, 0.0);
        let model = InertiaModel::new(
            ScaledCamera::new(Point::zero(), 1.0),
            ScaledCamera::new(anchor.multiply(1.5).subtract(&anchor), 1.5),
            50.0,
        );
        let mut playback =
            InertiaPlayback::from_release(model, 0.0, &InertiaConfig::default()).with_zoom_range(5.0, 400.0);

        let mut now = 0.0;
        let mut last = None;
        while let Some(camera) = playback.tick(now) {
            let under_anchor = camera.screen_to_map(&anchor);
            assert!(under_anchor.distance_to(&anchor) < 1e-6, "{:?} at zoom {}", under_anchor, camera.zoom);
            last = Some(camera);
            now += 16.0;
        }
        assert_eq!(last.unwrap().zoom, 400.0);
    }

    #[test]
    fn test_max_duration_cuts_off() {
        let config = InertiaConfig {
            model: InertiaModelKind::Analytic,
            max_duration_ms: 100.0,
            ..InertiaConfig::default()
        };
        // slow exponential zoom-in that would otherwise run for a long time
        let model = InertiaModel::new(
            ScaledCamera::new(Point::zero(), 1.0),
            ScaledCamera::new(Point::zero(), 1.01),
            50.0,
        );
        let mut playback = InertiaPlayback::from_release(model, 0.0, &config);
        assert!(playback.tick(50.0).is_some());
        assert!(playback.tick(100.0).is_some());
        assert!(playback.tick(116.0).is_none());
    }
}
