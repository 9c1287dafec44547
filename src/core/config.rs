//! Configuration for clustering, gestures and inertia
//!
//! Every section carries serde defaults so a host can ship a partial JSON
//! document and only override what it cares about. Presets are available
//! through [`InteractionProfile`].

use crate::core::constants::{
    BRAKING_TIME_MS, DEFAULT_MERGE_DISTANCE_PX, DEFAULT_ZOOM, DEFAULT_ZOOM_LEVELS,
    INERTIA_MAX_DURATION_MS, INERTIA_SPEED_THRESHOLD, INERTIA_ZOOM_THRESHOLD, SCALE_BAR_PX,
    VELOCITY_WINDOW_MS,
};
use crate::spatial::clustering::ClusterOptions;
use crate::{MapError, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq)]
pub enum InteractionProfile {
    Balanced,
    Touch,
    Custom(MapInteractionConfig),
}

impl InteractionProfile {
    pub fn resolve(&self) -> MapInteractionConfig {
        match self {
            Self::Balanced => MapInteractionConfig::default(),
            Self::Touch => MapInteractionConfig {
                merge_distance_px: 56.0,
                distant_merge_distance_px: 56.0,
                panning: PanningConfig {
                    velocity_window_ms: 80.0,
                    remove_pinch_zoom: true,
                },
                inertia: InertiaConfig {
                    braking_time_ms: 1000.0,
                    ..InertiaConfig::default()
                },
                ..MapInteractionConfig::default()
            },
            Self::Custom(config) => config.clone(),
        }
    }
}

impl Default for InteractionProfile {
    fn default() -> Self {
        Self::Balanced
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapInteractionConfig {
    pub clustering: ClusterOptions,
    /// Marker merge distance in screen pixels
    pub merge_distance_px: f64,
    /// Merge distance for off-screen edge indicators, in screen pixels
    pub distant_merge_distance_px: f64,
    pub panning: PanningConfig,
    pub inertia: InertiaConfig,
    pub zoom: ZoomConfig,
    pub scale_bar_px: f64,
}

impl Default for MapInteractionConfig {
    fn default() -> Self {
        Self {
            clustering: ClusterOptions::default(),
            merge_distance_px: DEFAULT_MERGE_DISTANCE_PX,
            distant_merge_distance_px: DEFAULT_MERGE_DISTANCE_PX,
            panning: PanningConfig::default(),
            inertia: InertiaConfig::default(),
            zoom: ZoomConfig::default(),
            scale_bar_px: SCALE_BAR_PX,
        }
    }
}

impl MapInteractionConfig {
    /// Parses a (possibly partial) JSON document and validates it
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let levels = &self.zoom.levels;
        if levels.is_empty() {
            return Err(MapError::InvalidArgument("zoom.levels: empty".to_string()));
        }
        if levels.iter().any(|z| !z.is_finite() || *z <= 0.0)
            || levels.windows(2).any(|w| w[0] >= w[1])
        {
            return Err(MapError::InvalidArgument(format!(
                "zoom.levels: {:?}",
                levels
            )));
        }
        Ok(())
    }

    /// Converts the pixel merge distance into map units at the given zoom
    pub fn merge_distance_in_map_units(&self, px_per_unit: f64, zoom: f64) -> f64 {
        px_to_map_units(self.merge_distance_px, px_per_unit, zoom)
    }

    pub fn distant_merge_distance_in_map_units(&self, px_per_unit: f64, zoom: f64) -> f64 {
        px_to_map_units(self.distant_merge_distance_px, px_per_unit, zoom)
    }
}

/// `px_per_unit` is the screen pixels per map unit at 100% zoom
pub fn px_to_map_units(px: f64, px_per_unit: f64, zoom: f64) -> f64 {
    px / (px_per_unit * zoom / 100.0)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanningConfig {
    pub velocity_window_ms: f64,
    /// Strip pinch-induced radial motion from the release velocity
    pub remove_pinch_zoom: bool,
}

impl Default for PanningConfig {
    fn default() -> Self {
        Self {
            velocity_window_ms: VELOCITY_WINDOW_MS,
            remove_pinch_zoom: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InertiaModelKind {
    /// Closed-form exponential model coupling translation with zoom
    Analytic,
    /// Per-axis linear deceleration, translation only
    Braking,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InertiaConfig {
    pub model: InertiaModelKind,
    pub braking_time_ms: f64,
    pub speed_threshold: f64,
    pub zoom_threshold: f64,
    pub max_duration_ms: f64,
}

impl Default for InertiaConfig {
    fn default() -> Self {
        Self {
            model: InertiaModelKind::Analytic,
            braking_time_ms: BRAKING_TIME_MS,
            speed_threshold: INERTIA_SPEED_THRESHOLD,
            zoom_threshold: INERTIA_ZOOM_THRESHOLD,
            max_duration_ms: INERTIA_MAX_DURATION_MS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoomConfig {
    pub levels: Vec<f64>,
    pub default_zoom: f64,
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            levels: DEFAULT_ZOOM_LEVELS.to_vec(),
            default_zoom: DEFAULT_ZOOM,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spatial::clustering::CoverMethod;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = MapInteractionConfig::from_json(
            r#"{ "clustering": { "cover_method": "median" }, "inertia": { "model": "braking" } }"#,
        )
        .unwrap();
        assert_eq!(config.clustering.cover_method, CoverMethod::Median);
        assert!(config.clustering.merge_overlaps);
        assert_eq!(config.inertia.model, InertiaModelKind::Braking);
        assert_eq!(config.inertia.braking_time_ms, BRAKING_TIME_MS);
        assert_eq!(config.panning.velocity_window_ms, VELOCITY_WINDOW_MS);
    }

    #[test]
    fn test_unknown_cover_method_is_rejected() {
        let err = MapInteractionConfig::from_json(r#"{ "clustering": { "cover_method": "fancy" } }"#)
            .unwrap_err();
        assert!(matches!(err, MapError::Config(_)));
    }

    #[test]
    fn test_unsorted_zoom_levels_are_rejected() {
        let err = MapInteractionConfig::from_json(r#"{ "zoom": { "levels": [100, 50] } }"#)
            .unwrap_err();
        assert!(matches!(err, MapError::InvalidArgument(_)));
    }

    #[test]
    fn test_merge_distance_conversion() {
        let config = MapInteractionConfig::default();
        // 40 px at 2 px/unit and 200% zoom is 10 map units
        assert_eq!(config.merge_distance_in_map_units(2.0, 200.0), 10.0);
    }

    #[test]
    fn test_touch_profile_resolves() {
        let touch = InteractionProfile::Touch.resolve();
        assert!(touch.merge_distance_px > MapInteractionConfig::default().merge_distance_px);
        assert_eq!(touch.zoom, ZoomConfig::default());
        let custom = InteractionProfile::Custom(touch.clone()).resolve();
        assert_eq!(custom, touch);
    }
}
