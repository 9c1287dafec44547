//! Gesture controller tying pointer input, zoom controls and inertia together.
//!
//! The controller owns the camera. Pointer gestures drive it through a
//! [`PanningSession`], releases hand it over to an [`InertiaPlayback`], and
//! every explicit camera change stops a running playback before touching the
//! camera.

use crate::{
    animation::{
        inertia::Trajectory,
        playback::{CancellationToken, InertiaPlayback},
    },
    core::{
        bounds::Bounds,
        camera::{Camera, ZoomLevels},
        config::MapInteractionConfig,
        geo::Point,
    },
    input::{
        panning::{PanningSession, SessionPhase},
        pointer::PointerId,
    },
    spatial::{
        clustering::{ClusterSolution, ClusterSolver},
        distant::{self, DistantSolution},
    },
    MapError, Result,
};

#[derive(Debug)]
pub struct GestureController {
    config: MapInteractionConfig,
    levels: ZoomLevels,
    camera: Camera,
    session: Option<PanningSession>,
    playback: Option<InertiaPlayback>,
    /// Token of a playback handed to an external driver
    external: Option<CancellationToken>,
    solver: ClusterSolver,
}

impl GestureController {
    pub fn new(config: MapInteractionConfig) -> Result<Self> {
        config.validate()?;
        let levels = ZoomLevels::new(config.zoom.levels.clone())?;
        let camera = Camera::new(levels.clamp(config.zoom.default_zoom), Point::zero());
        Ok(Self {
            config,
            levels,
            camera,
            session: None,
            playback: None,
            external: None,
            solver: ClusterSolver::with_welzl(),
        })
    }

    pub fn config(&self) -> &MapInteractionConfig {
        &self.config
    }

    pub fn zoom_levels(&self) -> &ZoomLevels {
        &self.levels
    }

    pub fn camera(&self) -> Camera {
        self.camera
    }

    pub fn is_panning(&self) -> bool {
        self.session.is_some()
    }

    /// True while the controller itself drives inertia; a playback handed
    /// out by [`Self::take_playback`] is tracked by its driver
    pub fn is_animating(&self) -> bool {
        self.playback.as_ref().map_or(false, |p| !p.is_finished())
    }

    /// Tracks a new pointer, stopping any inertia once it is accepted
    pub fn pointer_down(&mut self, id: PointerId, position: Point, t: f64) -> Result<()> {
        let camera = self.camera;
        let session = self
            .session
            .get_or_insert_with(|| PanningSession::new(camera));
        if let Err(err) = session.start(id, position, t) {
            if session.pointer_count() == 0 {
                self.session = None;
            }
            return Err(err);
        }
        self.cancel_inertia();
        Ok(())
    }

    pub fn pointer_move(&mut self, id: PointerId, position: Point, t: f64) -> Result<()> {
        let session = self.session.as_mut().ok_or(MapError::UnknownPointer(id))?;
        session.move_pointer(id, position, t)?;
        self.camera = session.camera();
        Ok(())
    }

    /// Releases a pointer. Lifting the last one ends the gesture and starts
    /// inertia when the release still carries motion.
    pub fn pointer_up(&mut self, id: PointerId, t: f64) -> Result<()> {
        let session = self.session.as_mut().ok_or(MapError::UnknownPointer(id))?;
        if session.end(id, t)? == SessionPhase::Active {
            return Ok(());
        }
        if let Some(session) = self.session.take() {
            self.release(&session, t);
        }
        Ok(())
    }

    fn release(&mut self, session: &PanningSession, t: f64) {
        self.camera = session.camera();
        let mut model = session.calculate_velocity(self.config.panning.velocity_window_ms);
        if self.config.panning.remove_pinch_zoom {
            if let Some(origin) = session.pinch_origin() {
                model = model.remove_zoom(origin);
            }
        }
        if model.is_translation_only() && model.speed(0.0) <= 0.0 {
            log::debug!("gesture released without motion");
            return;
        }
        log::debug!(
            "gesture released: speed {:.3}, zoom ratio {:.4}",
            model.speed(0.0),
            model.ratio()
        );
        self.playback = Some(
            InertiaPlayback::from_release(model, t, &self.config.inertia)
                .with_zoom_range(self.levels.min(), self.levels.max()),
        );
    }

    /// Stops inertia, including a playback handed out by [`Self::take_playback`]
    pub fn cancel_inertia(&mut self) {
        if let Some(playback) = self.playback.take() {
            playback.stop();
        }
        if let Some(token) = self.external.take() {
            token.cancel();
        }
    }

    /// Hands the running playback to an external driver.
    ///
    /// The controller keeps its token, so new gestures and zoom controls
    /// still stop it. The driver reports each frame back through
    /// [`Self::sync_camera`].
    pub fn take_playback(&mut self) -> Option<InertiaPlayback> {
        let playback = self.playback.take()?;
        self.external = Some(playback.token());
        Some(playback)
    }

    /// Writes a frame from an externally driven playback. Frames arriving
    /// after that playback was cancelled are dropped.
    pub fn sync_camera(&mut self, camera: Camera) -> bool {
        match &self.external {
            Some(token) if !token.is_cancelled() => {
                self.camera = camera;
                true
            }
            _ => {
                log::trace!("dropping frame from a stopped playback");
                false
            }
        }
    }

    /// Advances inertia to `now` and returns the new camera, if any moved
    pub fn frame(&mut self, now: f64) -> Option<Camera> {
        let playback = self.playback.as_mut()?;
        match playback.tick(now) {
            Some(camera) => {
                self.camera = camera;
                Some(camera)
            }
            None => {
                self.playback = None;
                None
            }
        }
    }

    // Zoom controls are ignored while fingers are down; the session owns
    // the camera until release.

    pub fn zoom_in(&mut self, anchor: Option<Point>) {
        if self.ensure_idle("zoom in") {
            self.camera.zoom_in(&self.levels, anchor);
        }
    }

    pub fn zoom_out(&mut self, anchor: Option<Point>) {
        if self.ensure_idle("zoom out") {
            self.camera.zoom_out(&self.levels, anchor);
        }
    }

    pub fn set_zoom(&mut self, zoom: f64, anchor: Option<Point>) -> Result<()> {
        if self.ensure_idle("set zoom") {
            self.camera.set_zoom(self.levels.clamp(zoom), anchor)?;
        }
        Ok(())
    }

    pub fn zoom_fit(&mut self) {
        if self.ensure_idle("zoom fit") {
            self.camera.zoom_fit();
        }
    }

    fn ensure_idle(&mut self, operation: &str) -> bool {
        self.cancel_inertia();
        if self.session.is_some() {
            log::debug!("{} ignored during a gesture", operation);
            return false;
        }
        true
    }

    /// Map-space rectangle covered by a viewport of the given pixel size
    pub fn viewport_bounds(&self, width_px: f64, height_px: f64, px_per_unit: f64) -> Bounds {
        let units = px_per_unit * self.camera.scale();
        let half = Point::new(width_px / units / 2.0, height_px / units / 2.0);
        Bounds::new(self.camera.offset.subtract(&half), self.camera.offset.add(&half))
    }

    pub fn cluster(&self, points: &[Point], px_per_unit: f64) -> Result<ClusterSolution> {
        let merge_distance = self
            .config
            .merge_distance_in_map_units(px_per_unit, self.camera.zoom);
        self.solver
            .solve(points, merge_distance, &self.config.clustering)
    }

    pub fn distant(&self, points: &[Point], viewport: &Bounds, px_per_unit: f64) -> DistantSolution {
        let merge_distance = self
            .config
            .distant_merge_distance_in_map_units(px_per_unit, self.camera.zoom);
        distant::solve(points, viewport, merge_distance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spatial::distant::Region;

    fn controller() -> GestureController {
        GestureController::new(MapInteractionConfig::default()).unwrap()
    }

    /// Mouse drag of 10 px every 10 ms along x, released at `t = 50`
    fn flick(controller: &mut GestureController) {
        controller
            .pointer_down(PointerId::Mouse, Point::new(0.0, 0.0), 0.0)
            .unwrap();
        for step in 1..=5 {
            let t = step as f64 * 10.0;
            controller
                .pointer_move(PointerId::Mouse, Point::new(t, 0.0), t)
                .unwrap();
        }
        controller.pointer_up(PointerId::Mouse, 50.0).unwrap();
    }

    #[test]
    fn test_flick_starts_inertia_and_settles() {
        let mut controller = controller();
        flick(&mut controller);
        assert!(!controller.is_panning());
        assert!(controller.is_animating());
        assert_eq!(controller.camera().offset, Point::new(-50.0, 0.0));

        let mut now = 50.0;
        while controller.frame(now).is_some() {
            now += 16.0;
            assert!(now < 5000.0);
        }
        assert!(!controller.is_animating());
        let offset = controller.camera().offset;
        assert!(offset.x < -50.0);
        assert_eq!(offset.y, 0.0);
        assert_eq!(controller.camera().zoom, 100.0);
    }

    #[test]
    fn test_zoom_controls_cancel_inertia() {
        let mut controller = controller();
        flick(&mut controller);
        controller.frame(66.0);
        assert!(controller.is_animating());

        controller.zoom_in(None);
        assert!(!controller.is_animating());
        assert!(controller.frame(82.0).is_none());
        assert!(controller.camera().zoom > 100.0);
    }

    #[test]
    fn test_pointer_down_cancels_inertia() {
        let mut controller = controller();
        flick(&mut controller);
        controller
            .pointer_down(PointerId::Touch(3), Point::new(5.0, 5.0), 100.0)
            .unwrap();
        assert!(!controller.is_animating());
        assert!(controller.is_panning());
    }

    #[test]
    fn test_taken_playback_is_stopped_by_new_gesture() {
        let mut controller = controller();
        flick(&mut controller);
        let mut playback = controller.take_playback().unwrap();
        let frame = playback.tick(66.0).unwrap();
        assert!(controller.sync_camera(frame));
        assert_eq!(controller.camera(), frame);

        controller
            .pointer_down(PointerId::Touch(1), Point::zero(), 70.0)
            .unwrap();
        assert!(playback.is_cancelled());
        assert!(playback.tick(82.0).is_none());
        assert!(!controller.sync_camera(Camera::default()));
        assert_eq!(controller.camera(), frame);
    }

    #[test]
    fn test_taken_playback_is_stopped_by_zoom() {
        let mut controller = controller();
        flick(&mut controller);
        let playback = controller.take_playback().unwrap();
        controller.zoom_in(None);
        assert!(playback.is_cancelled());
        assert!(controller.camera().zoom > 100.0);
    }

    #[test]
    fn test_release_without_motion_has_no_inertia() {
        let mut controller = controller();
        controller
            .pointer_down(PointerId::Mouse, Point::new(3.0, 3.0), 0.0)
            .unwrap();
        controller.pointer_up(PointerId::Mouse, 200.0).unwrap();
        assert!(!controller.is_animating());
        assert!(controller.frame(216.0).is_none());
    }

    #[test]
    fn test_unknown_pointer_is_rejected() {
        let mut controller = controller();
        let err = controller
            .pointer_move(PointerId::Touch(9), Point::zero(), 0.0)
            .unwrap_err();
        assert!(matches!(err, MapError::UnknownPointer(PointerId::Touch(9))));
        assert!(controller.pointer_up(PointerId::Mouse, 0.0).is_err());
        assert!(!controller.is_panning());
    }

    #[test]
    fn test_zoom_ignored_while_panning() {
        let mut controller = controller();
        controller
            .pointer_down(PointerId::Mouse, Point::zero(), 0.0)
            .unwrap();
        controller.zoom_in(None);
        assert_eq!(controller.camera().zoom, 100.0);
    }

    #[test]
    fn test_set_zoom_clamps_to_levels() {
        let mut controller = controller();
        controller.set_zoom(1.0e6, None).unwrap();
        assert_eq!(controller.camera().zoom, controller.zoom_levels().max());
        assert!(controller.set_zoom(f64::NAN, None).is_err());
    }

    #[test]
    fn test_cluster_uses_pixel_distance() {
        let mut controller = controller();
        // 40 px merge distance at 10 px per unit and 100% is 4 map units
        let points = [Point::new(0.0, 0.0), Point::new(3.0, 0.0)];
        let merged = controller.cluster(&points, 10.0).unwrap();
        assert_eq!(merged.covers.len(), 1);

        controller.set_zoom(200.0, None).unwrap();
        let split = controller.cluster(&points, 10.0).unwrap();
        assert!(split.covers.is_empty());
        assert_eq!(split.remains, vec![0, 1]);
    }

    #[test]
    fn test_distant_in_viewport() {
        let controller = controller();
        let viewport = controller.viewport_bounds(200.0, 100.0, 10.0);
        assert_eq!(viewport, Bounds::from_coords(-10.0, -5.0, 10.0, 5.0));
        let points = [Point::new(0.0, 0.0), Point::new(20.0, 0.0), Point::new(0.0, -9.0)];
        let solution = controller.distant(&points, &viewport, 10.0);
        assert_eq!(solution.region(Region::Inside), &[0]);
        assert_eq!(solution.region(Region::Right), &[1]);
        assert_eq!(solution.region(Region::Top), &[2]);
    }
}
