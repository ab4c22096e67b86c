use serde::{Deserialize, Serialize};
use crate::engine::geometry::{ZoomBounds, MAX_ZOOM, MIN_ZOOM};
use crate::engine::gesture::{DEFAULT_DRAG_THRESHOLD, DEFAULT_WHEEL_SENSITIVITY};
use crate::error::LightboxError;

/// Tunables for one viewer. Every field has a default, so a host page can
/// pass a partial JSON object (or none at all).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub min_zoom: f64,
    pub max_zoom: f64,
    /// Movement (per axis) past which a press becomes a drag.
    pub drag_threshold: f64,
    /// Exponent scale for ctrl+wheel (trackpad pinch) zoom.
    pub wheel_zoom_sensitivity: f64,
    /// How long to wait for an image load before centering anyway.
    pub ready_timeout_ms: f64,
    /// Fallback when no animation frame arrives after a zoom.
    pub frame_timeout_ms: f64,
    /// Quiet period after the last scroll event before the active image is
    /// recomputed.
    pub settle_ms: f64,
    /// Used when the host never reports that its hide animation finished.
    pub hide_delay_ms: f64,
    pub log_level: String,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            min_zoom: MIN_ZOOM,
            max_zoom: MAX_ZOOM,
            drag_threshold: DEFAULT_DRAG_THRESHOLD,
            wheel_zoom_sensitivity: DEFAULT_WHEEL_SENSITIVITY,
            ready_timeout_ms: 3000.0,
            frame_timeout_ms: 100.0,
            settle_ms: 150.0,
            hide_delay_ms: 300.0,
            log_level: "info".to_string(),
        }
    }
}

impl ViewerConfig {
    pub fn from_json(raw: &str) -> Result<Self, LightboxError> {
        let config: ViewerConfig = serde_json::from_str(raw)?;
        Ok(config.normalized())
    }

    /// Repair values that would break the engine: swapped or sub-1 zoom
    /// bounds, negative or non-finite durations and thresholds.
    pub fn normalized(mut self) -> Self {
        let defaults = ViewerConfig::default();
        let finite_or = |v: f64, d: f64| if v.is_finite() { v } else { d };

        let mut lo = finite_or(self.min_zoom, defaults.min_zoom).max(MIN_ZOOM);
        let mut hi = finite_or(self.max_zoom, defaults.max_zoom).max(MIN_ZOOM);
        if lo > hi {
            std::mem::swap(&mut lo, &mut hi);
        }
        self.min_zoom = lo;
        self.max_zoom = hi;

        self.drag_threshold = finite_or(self.drag_threshold, defaults.drag_threshold).max(0.0);
        self.wheel_zoom_sensitivity = finite_or(self.wheel_zoom_sensitivity, defaults.wheel_zoom_sensitivity).max(0.0);
        self.ready_timeout_ms = finite_or(self.ready_timeout_ms, defaults.ready_timeout_ms).max(0.0);
        self.frame_timeout_ms = finite_or(self.frame_timeout_ms, defaults.frame_timeout_ms).max(0.0);
        self.settle_ms = finite_or(self.settle_ms, defaults.settle_ms).max(0.0);
        self.hide_delay_ms = finite_or(self.hide_delay_ms, defaults.hide_delay_ms).max(0.0);
        self
    }

    pub fn zoom_bounds(&self) -> ZoomBounds {
        ZoomBounds { min: self.min_zoom, max: self.max_zoom }
    }

    pub fn log_level(&self) -> log::Level {
        self.log_level.parse().unwrap_or(log::Level::Info)
    }
}
