//! Camera state shared by gestures, zoom controls and inertia playback.
//!
//! `offset` is the map point shown at the viewport centre and `zoom` is a
//! percentage (100 = fitted). Screen coordinates are relative to the viewport
//! centre and already divided by the pixels-per-map-unit ratio, so
//! `screen = (map - offset) * zoom / 100`.

use crate::core::constants::{DEFAULT_ZOOM, DEFAULT_ZOOM_LEVELS, SCALE_BAR_STEPS};
use crate::core::geo::Point;
use crate::{MapError, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub zoom: f64,
    pub offset: Point,
}

impl Camera {
    pub fn new(zoom: f64, offset: Point) -> Self {
        Self { zoom, offset }
    }

    /// Zoom factor (1.0 at 100%)
    pub fn scale(&self) -> f64 {
        self.zoom / 100.0
    }

    pub fn map_to_screen(&self, map: &Point) -> Point {
        map.subtract(&self.offset).multiply(self.scale())
    }

    pub fn screen_to_map(&self, screen: &Point) -> Point {
        screen.multiply(1.0 / self.scale()).add(&self.offset)
    }

    /// Translates by a screen-space delta, dragging the map along with it
    pub fn pan_by_screen(&mut self, delta: &Point) {
        self.offset = self.offset.subtract(&delta.multiply(1.0 / self.scale()));
    }

    /// Sets the zoom, keeping the map point under `anchor` fixed on screen.
    /// Without an anchor the viewport centre stays fixed.
    pub fn set_zoom(&mut self, next: f64, anchor: Option<Point>) -> Result<()> {
        if !next.is_finite() || next <= 0.0 {
            return Err(MapError::InvalidArgument(format!("zoom {}", next)));
        }
        self.zoom_about(next, anchor.unwrap_or_default());
        Ok(())
    }

    /// `next` must be positive and finite
    pub(crate) fn zoom_about(&mut self, next: f64, anchor: Point) {
        let s = (1.0 / self.zoom - 1.0 / next) * 100.0;
        self.offset = self.offset.add(&anchor.multiply(s));
        self.zoom = next;
    }

    pub fn zoom_in(&mut self, levels: &ZoomLevels, anchor: Option<Point>) {
        self.zoom_about(levels.step_in(self.zoom), anchor.unwrap_or_default());
    }

    pub fn zoom_out(&mut self, levels: &ZoomLevels, anchor: Option<Point>) {
        self.zoom_about(levels.step_out(self.zoom), anchor.unwrap_or_default());
    }

    /// Resets to the fitted view
    pub fn zoom_fit(&mut self) {
        self.offset = Point::zero();
        self.zoom = DEFAULT_ZOOM;
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(DEFAULT_ZOOM, Point::zero())
    }
}

/// Sorted preset zoom percentages used for stepwise zooming
#[derive(Debug, Clone, PartialEq)]
pub struct ZoomLevels {
    levels: Vec<f64>,
}

impl ZoomLevels {
    pub fn new(levels: Vec<f64>) -> Result<Self> {
        if levels.is_empty()
            || levels.iter().any(|z| !z.is_finite() || *z <= 0.0)
            || levels.windows(2).any(|w| w[0] >= w[1])
        {
            return Err(MapError::InvalidArgument(format!("zoom levels {:?}", levels)));
        }
        Ok(Self { levels })
    }

    pub fn min(&self) -> f64 {
        self.levels[0]
    }

    pub fn max(&self) -> f64 {
        self.levels[self.levels.len() - 1]
    }

    /// First level above `zoom`, or the highest level
    pub fn step_in(&self, zoom: f64) -> f64 {
        self.levels
            .iter()
            .copied()
            .find(|z| *z > zoom)
            .unwrap_or_else(|| self.max())
    }

    /// Last level below `zoom`, or the lowest level
    pub fn step_out(&self, zoom: f64) -> f64 {
        self.levels
            .iter()
            .rev()
            .copied()
            .find(|z| *z < zoom)
            .unwrap_or_else(|| self.min())
    }

    pub fn clamp(&self, zoom: f64) -> f64 {
        zoom.clamp(self.min(), self.max())
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.levels
    }
}

impl Default for ZoomLevels {
    fn default() -> Self {
        Self {
            levels: DEFAULT_ZOOM_LEVELS.to_vec(),
        }
    }
}

/// Scale-bar length in map units closest to `scale_bar_px` on screen
pub fn nice_scale_length(scale_bar_px: f64, px_per_unit: f64, zoom: f64) -> f64 {
    let target = scale_bar_px / (px_per_unit * zoom / 100.0);
    SCALE_BAR_STEPS
        .iter()
        .copied()
        .fold(SCALE_BAR_STEPS[0], |best, step| {
            if (step - target).abs() < (best - target).abs() {
                step
            } else {
                best
            }
        })
}
