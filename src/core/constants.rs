//! Engine-wide defaults for clustering, gestures and inertia.
//! Keeping them in a single place makes it easier to tweak the magic numbers.

/// Zoom percentage that shows the map at its fitted size.
pub const DEFAULT_ZOOM: f64 = 100.0;

/// Preset zoom percentages used by stepwise zoom in/out.
pub const DEFAULT_ZOOM_LEVELS: [f64; 24] = [
    5.0, 10.0, 15.0, 25.0, 33.0, 50.0, 67.0, 75.0, 80.0, 90.0, 100.0, 110.0, 125.0, 150.0,
    175.0, 200.0, 250.0, 300.0, 400.0, 500.0, 750.0, 1000.0, 1500.0, 2000.0,
];

/// Marker merge distance in screen pixels.
pub const DEFAULT_MERGE_DISTANCE_PX: f64 = 40.0;

/// Trailing window used to estimate release velocity.
pub const VELOCITY_WINDOW_MS: f64 = 50.0;

/// Shortest window a velocity estimate may report, avoiding division by zero.
pub const MIN_VELOCITY_DT_MS: f64 = 1.0;

/// Time the linear braking model takes to bring a flick to rest.
pub const BRAKING_TIME_MS: f64 = 750.0;

/// Playback stops once speed (scaled units per ms) drops below this.
pub const INERTIA_SPEED_THRESHOLD: f64 = 0.001;

/// Playback stops once the relative zoom change per frame drops below this.
pub const INERTIA_ZOOM_THRESHOLD: f64 = 0.001;

/// Hard cap on inertia playback length.
pub const INERTIA_MAX_DURATION_MS: f64 = 2000.0;

/// Target on-screen length of the scale bar.
pub const SCALE_BAR_PX: f64 = 100.0;

/// Lengths the scale bar may snap to, in map units.
pub const SCALE_BAR_STEPS: [f64; 15] = [
    0.1, 0.2, 0.5, 1.0, 2.0, 5.0, 10.0, 20.0, 50.0, 100.0, 200.0, 500.0, 1000.0, 2000.0, 5000.0,
];

/// Tolerance used by geometric containment checks.
pub const GEOMETRY_EPSILON: f64 = 1e-9;
