//! Two-finger pinch helpers shared by the gesture recognizer.

use crate::engine::geometry::ZoomBounds;
use crate::types::{MediaId, Point};

/// Fingers closer than this at gesture start give a ratio too noisy to use.
pub const MIN_PINCH_DIST: f64 = 10.0;

/// One active touch, viewport-relative.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TouchPoint {
    pub id: i32,
    pub position: Point,
}

/// Snapshot of state at the moment a 2-finger touch begins.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PinchSession {
    pub media: MediaId,
    /// Distance between the two fingers at gesture start.
    pub initial_dist: f64,
    /// Zoom of `media` at gesture start.
    pub initial_zoom: f64,
}

/// Returns (midpoint, distance) for exactly 2 touches.
pub fn two_finger_geometry(touches: &[TouchPoint]) -> Option<(Point, f64)> {
    let [t0, t1] = touches else { return None };
    let (p0, p1) = (t0.position, t1.position);
    let mid = Point::new((p0.x + p1.x) / 2.0, (p0.y + p1.y) / 2.0);
    let dist = ((p1.x - p0.x).powi(2) + (p1.y - p0.y).powi(2)).sqrt();
    Some((mid, dist))
}

impl PinchSession {
    pub fn begin(media: MediaId, touches: &[TouchPoint], zoom: f64) -> Option<Self> {
        let (_, dist) = two_finger_geometry(touches)?;
        if !(dist >= MIN_PINCH_DIST) {
            return None;
        }
        Some(Self { media, initial_dist: dist, initial_zoom: zoom })
    }

    /// Zoom proportional to the finger distance ratio, plus the current
    /// midpoint to anchor the rescroll on.
    pub fn update(&self, touches: &[TouchPoint], bounds: ZoomBounds) -> Option<(f64, Point)> {
        let (mid, dist) = two_finger_geometry(touches)?;
        let ratio = dist / self.initial_dist;
        if !ratio.is_finite() {
            return None;
        }
        Some((bounds.pinch(self.initial_zoom, ratio), mid))
    }
}
