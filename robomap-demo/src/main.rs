use robomap::{
    core::{camera::nice_scale_length, config::InteractionProfile},
    runtime::drive_playback,
    Bounds, GestureController, Point, PointerId, Region, UserFrame,
};
use std::time::Duration;

/// Floor plan size in meters
const MAP_SIZE: (f64, f64) = (80.0, 36.0);
/// Rendered map width in pixels; the plan is fitted to it at 100% zoom
const MAP_WIDTH_PX: f64 = 1200.0;

/// Sample markers in user coordinates: centred origin, +x right, +y up
const MARKERS: &[(&str, f64, f64)] = &[
    ("robot 1", -25.6, 15.0),
    ("robot 2", -23.6, 15.0),
    ("robot 3", -23.6, 13.0),
    ("robot 4", -25.6, 13.0),
    ("robot A", -24.9, -13.0),
    ("robot B", -25.7, -15.0),
    ("robot C", -23.5, -14.7),
    ("cat 1", 6.18, 0.21),
    ("cat 2", 3.74, 0.04),
    ("cat 3", 2.46, -2.26),
    ("cat 4", 0.47, 0.08),
    ("cat 5", 2.15, 2.55),
    ("dog 1", 15.0, 15.7),
    ("dog 2", 15.4, -16.0),
];

/// Headless walkthrough of the clustering and gesture engines
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let map_size = Point::new(MAP_SIZE.0, MAP_SIZE.1);
    let px_per_unit = MAP_WIDTH_PX / map_size.x;
    let viewport_px = (MAP_WIDTH_PX, map_size.y * px_per_unit);

    let frame = UserFrame::parse(map_size, "center", "right", "top")?;
    let points: Vec<Point> = MARKERS
        .iter()
        .map(|(_, x, y)| frame.to_internal(&Point::new(*x, *y)))
        .collect();

    let mut controller = GestureController::new(InteractionProfile::Balanced.resolve())?;

    for zoom in [100.0, 200.0, 400.0] {
        controller.set_zoom(zoom, None)?;
        report_clusters(&controller, &points, &frame, px_per_unit)?;
    }

    // look at the cats up close, leaving the robots off screen
    controller.set_zoom(400.0, None)?;
    let viewport = controller.viewport_bounds(viewport_px.0, viewport_px.1, px_per_unit);
    report_indicators(&controller, &points, &viewport, px_per_unit);

    // flick towards the left wall and let inertia carry the camera
    controller.zoom_fit();
    let finger = PointerId::Touch(1);
    controller.pointer_down(finger, Point::new(0.0, 0.0), 0.0)?;
    for step in 1..=6 {
        let t = step as f64 * 8.0;
        controller.pointer_move(finger, Point::new(step as f64 * 3.0, 0.5 * step as f64), t)?;
    }
    controller.pointer_up(finger, 48.0)?;
    log::info!("released at offset {:?}", frame.to_user(&controller.camera().offset));

    if let Some(playback) = controller.take_playback() {
        let frames = drive_playback(playback, Duration::from_millis(16), |camera| {
            controller.sync_camera(camera);
        })
        .await;
        let last = controller.camera();
        log::info!(
            "inertia ran {} frames, resting at offset {:?} zoom {:.0}%",
            frames,
            frame.to_user(&last.offset),
            last.zoom
        );
        log::info!(
            "scale bar: {} m per {} px",
            nice_scale_length(controller.config().scale_bar_px, px_per_unit, last.zoom),
            controller.config().scale_bar_px
        );
    }

    Ok(())
}

fn report_clusters(
    controller: &GestureController,
    points: &[Point],
    frame: &UserFrame,
    px_per_unit: f64,
) -> robomap::Result<()> {
    let solution = controller.cluster(points, px_per_unit)?;
    log::info!(
        "zoom {:.0}%: {} single markers, {} covers",
        controller.camera().zoom,
        solution.remains.len(),
        solution.covers.len()
    );
    for cover in &solution.covers {
        let names: Vec<&str> = cover.indexes.iter().map(|i| MARKERS[*i].0).collect();
        log::info!(
            "  cover at {:?} r={:.2}: {}",
            frame.to_user(&cover.circle.center),
            cover.circle.radius,
            names.join(", ")
        );
    }
    Ok(())
}

fn report_indicators(
    controller: &GestureController,
    points: &[Point],
    viewport: &Bounds,
    px_per_unit: f64,
) {
    let solution = controller.distant(points, viewport, px_per_unit);
    log::info!("{} markers off screen", solution.off_screen_count());
    for edge in &solution.edges {
        log::info!(
            "  {:?} indicator: {} markers around {:.2}",
            edge.region,
            edge.indexes.len(),
            edge.span.center
        );
    }
    for region in Region::ALL.iter().filter(|r| r.is_corner()) {
        let count = solution.region(*region).len();
        if count > 0 {
            log::info!("  {:?} corner: {} markers", region, count);
        }
    }
}
