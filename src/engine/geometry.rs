//! Pure geometry for the viewer: click position to scroll offset, pinch ratio
//! to zoom, and anchor-preserving rescroll after a zoom change.
//!
//! Every function works on one axis at a time and never returns a negative
//! or non-finite offset.

use crate::types::{MediaId, MediaRect};

pub const MIN_ZOOM: f64 = 1.0;
pub const MAX_ZOOM: f64 = 4.0;

/// Inclusive zoom range. `Default` is `[MIN_ZOOM, MAX_ZOOM]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoomBounds {
    pub min: f64,
    pub max: f64,
}

impl Default for ZoomBounds {
    fn default() -> Self {
        Self { min: MIN_ZOOM, max: MAX_ZOOM }
    }
}

impl ZoomBounds {
    pub fn clamp(&self, z: f64) -> f64 {
        if z.is_nan() {
            return self.min;
        }
        z.clamp(self.min, self.max)
    }

    pub fn pinch(&self, base_zoom: f64, distance_ratio: f64) -> f64 {
        self.clamp(base_zoom * distance_ratio)
    }
}

fn finite_or_zero(v: f64) -> f64 {
    if v.is_finite() { v } else { 0.0 }
}

fn max_scroll(content: f64, viewport: f64) -> f64 {
    (finite_or_zero(content) - finite_or_zero(viewport)).max(0.0)
}

/// Scroll offset that puts the clicked point of an image at the middle of
/// the viewport, clamped to what the image can actually scroll.
pub fn scroll_for_click(image_size: f64, viewport_size: f64, fraction: f64) -> f64 {
    if !(image_size > 0.0) || !image_size.is_finite() || !(viewport_size >= 0.0) {
        return 0.0;
    }
    let fraction = if fraction.is_finite() { fraction.clamp(0.0, 1.0) } else { 0.5 };
    let offset = image_size * fraction - viewport_size / 2.0;
    offset.clamp(0.0, max_scroll(image_size, viewport_size))
}

/// Recompute one scroll axis after a zoom change so the content point under
/// `anchor` (viewport-relative) stays under it.
///
/// `content_size` is the unscaled rendered size; scrollable content at zoom
/// `z` is `content_size * z` because the transform origin is top-left.
pub fn zoom_anchored_rescroll(
    old_zoom: f64,
    new_zoom: f64,
    viewport_size: f64,
    content_size: f64,
    scroll_offset: f64,
    anchor: f64,
) -> f64 {
    let limit = max_scroll(content_size * new_zoom, viewport_size);
    match anchored_offset(old_zoom, new_zoom, content_size, scroll_offset, anchor) {
        Some(offset) => offset.clamp(0.0, limit),
        None => finite_or_zero(scroll_offset).max(0.0).min(limit),
    }
}

/// Unclamped form of `zoom_anchored_rescroll`. The result may fall outside
/// this image when neighbours share the scroll container; the caller clamps
/// against the whole content. `None` for degenerate extents.
pub fn anchored_offset(old_zoom: f64, new_zoom: f64, content_size: f64, scroll_offset: f64, anchor: f64) -> Option<f64> {
    let old_extent = content_size * old_zoom;
    let new_extent = content_size * new_zoom;
    if !(old_extent > 0.0) || !(new_extent > 0.0) || !old_extent.is_finite() || !new_extent.is_finite() {
        return None;
    }
    let scroll = finite_or_zero(scroll_offset);
    let anchor = finite_or_zero(anchor);

    // Content point under the anchor as a share of the whole old extent
    let pct = (scroll + anchor) / old_extent;
    Some(pct * new_extent - anchor)
}

pub fn clamp_zoom(z: f64) -> f64 {
    ZoomBounds::default().clamp(z)
}

pub fn pinch_scale_to_zoom(base_zoom: f64, distance_ratio: f64) -> f64 {
    ZoomBounds::default().pinch(base_zoom, distance_ratio)
}

/// Zoom after one wheel step. Trackpad pinches arrive as many small deltas,
/// so the factor is exponential in `delta_y` rather than a fixed step.
/// Unclamped.
pub fn wheel_zoom(current: f64, delta_y: f64, sensitivity: f64) -> f64 {
    current * (-finite_or_zero(delta_y) * sensitivity).exp()
}

/// Media item whose vertical midpoint is closest to the middle of the
/// viewport. Ties go to the earlier item.
pub fn nearest_to_center(items: &[MediaRect], viewport_top: f64, viewport_height: f64) -> Option<MediaId> {
    let center = viewport_top + viewport_height.max(0.0) / 2.0;
    let mut best: Option<(MediaId, f64)> = None;
    for item in items {
        let mid = item.top + item.height.max(0.0) / 2.0;
        let dist = (mid - center).abs();
        if !dist.is_finite() {
            continue;
        }
        match best {
            Some((_, d)) if d <= dist => {}
            _ => best = Some((item.id, dist)),
        }
    }
    best.map(|(id, _)| id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scroll_for_click_examples() {
        assert_eq!(scroll_for_click(1125.0, 375.0, 0.0), 0.0);
        assert_eq!(scroll_for_click(1125.0, 375.0, 1.0), 750.0);
        // 1125 * 0.5 - 187.5
        assert_eq!(scroll_for_click(1125.0, 375.0, 0.5), 375.0);
    }

    #[test]
    fn test_scroll_for_click_stays_in_range() {
        for &(image, viewport) in &[(1125.0, 375.0), (3375.0, 812.0), (300.0, 812.0), (812.0, 812.0)] {
            let max = f64::max(0.0, image - viewport);
            for i in 0..=20 {
                let f = i as f64 / 20.0;
                let off = scroll_for_click(image, viewport, f);
                assert!(off >= 0.0 && off <= max, "offset {off} out of [0, {max}] for f={f}");
            }
        }
    }

    #[test]
    fn test_scroll_for_click_degenerate() {
        assert_eq!(scroll_for_click(0.0, 375.0, 0.7), 0.0);
        assert_eq!(scroll_for_click(200.0, 375.0, 1.0), 0.0);
        assert_eq!(scroll_for_click(f64::NAN, 375.0, 0.5), 0.0);
        assert_eq!(scroll_for_click(1000.0, 0.0, f64::NAN), 500.0);
    }

    #[test]
    fn test_clamp_zoom() {
        assert_eq!(clamp_zoom(0.5), 1.0);
        assert_eq!(clamp_zoom(5.0), 4.0);
        assert_eq!(clamp_zoom(2.3), 2.3);
        assert_eq!(clamp_zoom(f64::NAN), 1.0);
    }

    #[test]
    fn test_pinch_scale_to_zoom() {
        assert_eq!(pinch_scale_to_zoom(1.0, 2.0), 2.0);
        assert_eq!(pinch_scale_to_zoom(3.0, 2.0), 4.0);
        assert_eq!(pinch_scale_to_zoom(2.0, 0.25), 1.0);
    }

    #[test]
    fn test_rescroll_keeps_anchor_fixed() {
        // 400px wide image in a 400px viewport, zoom 1 -> 2 around x=100
        let scroll = zoom_anchored_rescroll(1.0, 2.0, 400.0, 400.0, 0.0, 100.0);
        assert_eq!(scroll, 100.0);
        // Point under the anchor before: (0 + 100) / 1 = 100 content px.
        // After: (100 + 100) / 2 = 100 content px.
        let before = (0.0 + 100.0) / 1.0;
        let after = (scroll + 100.0) / 2.0;
        assert!((before - after).abs() < 1e-9);
    }

    #[test]
    fn test_rescroll_clamps() {
        // Zooming out near the far edge cannot scroll past the new extent
        let scroll = zoom_anchored_rescroll(4.0, 1.0, 400.0, 400.0, 1200.0, 0.0);
        assert_eq!(scroll, 0.0);
        let scroll = zoom_anchored_rescroll(2.0, 4.0, 400.0, 400.0, 400.0, 400.0);
        assert_eq!(scroll, 1200.0);
        assert_eq!(zoom_anchored_rescroll(1.0, 2.0, 400.0, 0.0, 50.0, 10.0), 0.0);
    }

    #[test]
    fn test_wheel_zoom_direction() {
        assert!(wheel_zoom(2.0, -10.0, 0.01) > 2.0);
        assert!(wheel_zoom(2.0, 10.0, 0.01) < 2.0);
        assert_eq!(wheel_zoom(2.0, 0.0, 0.01), 2.0);
    }

    #[test]
    fn test_nearest_to_center() {
        let items = [
            MediaRect { id: MediaId(1), top: 0.0, height: 800.0 },
            MediaRect { id: MediaId(2), top: 800.0, height: 800.0 },
            MediaRect { id: MediaId(3), top: 1600.0, height: 800.0 },
        ];
        assert_eq!(nearest_to_center(&items, 0.0, 800.0), Some(MediaId(1)));
        assert_eq!(nearest_to_center(&items, 900.0, 800.0), Some(MediaId(2)));
        assert_eq!(nearest_to_center(&items, 1700.0, 800.0), Some(MediaId(3)));
        // Exactly between 1 and 2: earlier wins
        assert_eq!(nearest_to_center(&items, 400.0, 800.0), Some(MediaId(1)));
        assert_eq!(nearest_to_center(&[], 0.0, 800.0), None);
    }
}
