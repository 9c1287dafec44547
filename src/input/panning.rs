//! Multi-pointer pan and pinch-zoom tracking.
//!
//! A [`PanningSession`] lives from the first pointer down to the last
//! pointer up. Every event appends a camera sample to the trail, which is
//! later read backwards to estimate the release velocity.

use crate::{
    animation::inertia::{InertiaModel, ScaledCamera},
    core::{
        camera::Camera,
        constants::MIN_VELOCITY_DT_MS,
        geo::{average_distance, centroid, Point},
    },
    input::pointer::PointerId,
    prelude::HashMap,
    MapError, Result,
};

/// Camera state recorded after an input event
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrailSample {
    /// Event timestamp in milliseconds
    pub t: f64,
    pub offset: Point,
    pub zoom: f64,
}

/// Camera change over the trailing velocity window
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrailVelocity {
    /// Window length actually covered, never below one millisecond
    pub dt: f64,
    pub delta_offset: Point,
    pub delta_zoom: f64,
}

impl TrailVelocity {
    /// Offset change in map units per millisecond
    pub fn rate(&self) -> Point {
        self.delta_offset.multiply(1.0 / self.dt)
    }

    /// Zoom change in percent per millisecond
    pub fn zoom_rate(&self) -> f64 {
        self.delta_zoom / self.dt
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// At least one pointer is still down
    Active,
    /// The last pointer went up; read the velocity and drop the session
    Finished,
}

#[derive(Debug, Clone)]
pub struct PanningSession {
    camera: Camera,
    pointers: HashMap<PointerId, Point>,
    trail: Vec<TrailSample>,
    pinch_origin: Option<Point>,
}

impl PanningSession {
    pub fn new(camera: Camera) -> Self {
        Self {
            camera,
            pointers: HashMap::default(),
            trail: Vec::new(),
            pinch_origin: None,
        }
    }

    pub fn zoom(&self) -> f64 {
        self.camera.zoom
    }

    pub fn offset(&self) -> Point {
        self.camera.offset
    }

    pub fn camera(&self) -> Camera {
        self.camera
    }

    pub fn pointer_count(&self) -> usize {
        self.pointers.len()
    }

    pub fn is_active(&self) -> bool {
        !self.pointers.is_empty()
    }

    pub fn trail(&self) -> &[TrailSample] {
        &self.trail
    }

    /// Screen-space centroid of the most recent pinch, if the gesture pinched
    pub fn pinch_origin(&self) -> Option<Point> {
        self.pinch_origin
    }

    /// Registers a pointer going down at raw screen position `position`
    pub fn start(&mut self, id: PointerId, position: Point, t: f64) -> Result<()> {
        if self.pointers.contains_key(&id) {
            log::warn!("panning start: {} is already tracked", id);
            return Err(MapError::DuplicatePointer(id));
        }
        self.pointers.insert(id, position);
        self.record(t);
        Ok(())
    }

    /// Moves a tracked pointer, panning by its share of the translation and
    /// pinch-zooming about the pointer centroid when several pointers are down
    pub fn move_pointer(&mut self, id: PointerId, position: Point, t: f64) -> Result<()> {
        let previous = match self.pointers.get(&id) {
            Some(p) => *p,
            None => {
                log::warn!("panning move: {} is not tracked", id);
                return Err(MapError::UnknownPointer(id));
            }
        };
        let spread_before = self.spread();
        self.pointers.insert(id, position);

        let count = self.pointers.len() as f64;
        let delta = position.subtract(&previous);
        self.camera.pan_by_screen(&delta.multiply(1.0 / count));

        if self.pointers.len() > 1 {
            let spread = self.spread();
            let scale = if spread_before > 0.0 && spread > 0.0 {
                spread / spread_before
            } else {
                1.0
            };
            let anchor = self.centroid();
            self.camera.zoom_about(self.camera.zoom * scale, anchor);
            self.pinch_origin = Some(anchor);
        }

        self.record(t);
        Ok(())
    }

    /// Releases a tracked pointer
    pub fn end(&mut self, id: PointerId, t: f64) -> Result<SessionPhase> {
        if self.pointers.remove(&id).is_none() {
            log::warn!("panning end: {} is not tracked", id);
            return Err(MapError::UnknownPointer(id));
        }
        self.record(t);
        Ok(if self.pointers.is_empty() {
            SessionPhase::Finished
        } else {
            SessionPhase::Active
        })
    }

    /// Camera change over the last `window_ms` of the trail.
    ///
    /// Intervals are walked from the newest backwards; the interval that
    /// straddles the window start contributes proportionally.
    pub fn velocity(&self, window_ms: f64) -> TrailVelocity {
        let mut dt = 0.0;
        let mut delta_offset = Point::zero();
        let mut delta_zoom = 0.0;
        for pair in self.trail.windows(2).rev() {
            if dt >= window_ms {
                break;
            }
            let (older, newer) = (&pair[0], &pair[1]);
            let interval = newer.t - older.t;
            let used = interval.min(window_ms - dt);
            // zero-length intervals count in full instead of dividing by zero
            let share = if used > 0.0 { used / interval } else { 1.0 };
            dt += used.max(0.0);
            delta_offset = delta_offset.add(&newer.offset.subtract(&older.offset).multiply(share));
            delta_zoom += share * (newer.zoom - older.zoom);
        }
        TrailVelocity {
            dt: dt.max(MIN_VELOCITY_DT_MS),
            delta_offset,
            delta_zoom,
        }
    }

    /// Inertia trajectory continuing the motion of the last `window_ms`
    pub fn calculate_velocity(&self, window_ms: f64) -> InertiaModel {
        let velocity = self.velocity(window_ms);
        let window_start = Camera::new(
            self.camera.zoom - velocity.delta_zoom,
            self.camera.offset.subtract(&velocity.delta_offset),
        );
        InertiaModel::new(
            ScaledCamera::from_camera(&window_start),
            ScaledCamera::from_camera(&self.camera),
            velocity.dt,
        )
    }

    fn record(&mut self, t: f64) {
        self.trail.push(TrailSample {
            t,
            offset: self.camera.offset,
            zoom: self.camera.zoom,
        });
    }

    fn positions(&self) -> Vec<Point> {
        self.pointers.values().copied().collect()
    }

    fn centroid(&self) -> Point {
        centroid(&self.positions()).unwrap_or_default()
    }

    fn spread(&self) -> f64 {
        average_distance(&self.positions())
    }
}
