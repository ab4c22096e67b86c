//! Viewport controller: turns zoom state and scroll geometry into writes on
//! one scrollable element.
//!
//! The controller only computes numbers. Every side effect goes through the
//! `ScrollSurface` it wraps, so the DOM element and the in-memory test fake
//! behave the same.

use crate::config::ViewerConfig;
use crate::engine::geometry::{self, ZoomBounds};
use crate::engine::gesture::{GestureView, Intent};
use crate::engine::ready::{Wake, Waiter};
use crate::engine::zoom_state::{ZoomState, ZoomStore};
use crate::types::{ClickFraction, Cursor, MediaBox, MediaId, MediaRect, Point, ScrollOffset, Size};

/// The scrollable element housing the lightbox images.
pub trait ScrollSurface {
    fn viewport_size(&self) -> Size;
    fn scroll_offset(&self) -> ScrollOffset;
    fn set_scroll_offset(&mut self, offset: ScrollOffset);
    /// Unscaled rendered box, `None` when the image is not in the viewer.
    fn media_box(&self, media: MediaId) -> Option<MediaBox>;
    /// Natural dimensions are known and layout is final.
    fn is_ready(&self, media: MediaId) -> bool;
    /// Scale from a top-left origin, or remove the transform with `None`.
    fn set_transform(&mut self, media: MediaId, zoom: Option<f64>);
    fn set_cursor(&mut self, media: MediaId, cursor: Cursor);
    fn media_layout(&self) -> Vec<MediaRect>;
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CenterOutcome {
    Applied(ScrollOffset),
    /// Waiting for the image to finish loading.
    Deferred,
    /// No such image in the viewer; nothing changed.
    Missing,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct PendingCenter {
    media: MediaId,
    fraction: Option<ClickFraction>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct PendingRescroll {
    media: MediaId,
    old_zoom: f64,
    new_zoom: f64,
    scroll_before: ScrollOffset,
    anchor: Point,
}

/// What a `poll` released.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Released {
    pub centered: Option<ScrollOffset>,
    pub rescrolled: bool,
}

pub struct ViewportController<S> {
    surface: S,
    zoom: ZoomStore,
    centering: Waiter<MediaId, PendingCenter>,
    rescroll: Waiter<(), PendingRescroll>,
    ready_timeout_ms: f64,
    frame_timeout_ms: f64,
}

impl<S: ScrollSurface> ViewportController<S> {
    pub fn new(surface: S, config: &ViewerConfig) -> Self {
        Self {
            surface,
            zoom: ZoomStore::new(config.zoom_bounds()),
            centering: Waiter::new(),
            rescroll: Waiter::new(),
            ready_timeout_ms: config.ready_timeout_ms,
            frame_timeout_ms: config.frame_timeout_ms,
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn zoom_store(&self) -> &ZoomStore {
        &self.zoom
    }

    pub fn bounds(&self) -> ZoomBounds {
        self.zoom.bounds()
    }

    pub fn has_pending_center(&self) -> bool {
        self.centering.is_armed()
    }

    pub fn has_pending_rescroll(&self) -> bool {
        self.rescroll.is_armed()
    }

    /// Earliest fallback deadline still parked, for scheduling a timer.
    pub fn next_deadline_ms(&self) -> Option<f64> {
        match (self.centering.deadline_ms(), self.rescroll.deadline_ms()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    // ── Centering ─────────────────────────────────────────────────────────

    /// Scroll so the clicked point of `media` sits in the middle of the
    /// viewport. Without a fraction the image is centered horizontally and
    /// its top scrolled into view.
    pub fn center_on(&mut self, media: MediaId, fraction: Option<ClickFraction>, now_ms: f64) -> CenterOutcome {
        if self.surface.media_box(media).is_none() {
            log::debug!("viewport: center_on {} ignored, not in viewer", media);
            self.centering.cancel();
            return CenterOutcome::Missing;
        }
        let request = PendingCenter { media, fraction };
        if self.surface.is_ready(media) {
            self.centering.cancel();
            return CenterOutcome::Applied(self.apply_center(request));
        }
        log::debug!("viewport: {} not loaded, deferring center", media);
        self.centering.arm(media, request, now_ms, self.ready_timeout_ms);
        CenterOutcome::Deferred
    }

    /// The image finished loading. Applies a parked center for it, reading
    /// the final rendered box.
    pub fn media_ready(&mut self, media: MediaId) -> Option<ScrollOffset> {
        let (request, _) = self.centering.signal(&media)?;
        Some(self.apply_center(request))
    }

    fn apply_center(&mut self, request: PendingCenter) -> ScrollOffset {
        let b = self.surface.media_box(request.media).unwrap_or_default();
        let vp = self.surface.viewport_size();
        let (left, top) = match request.fraction {
            Some(f) => (
                geometry::scroll_for_click(b.size.width, vp.width, f.x),
                geometry::scroll_for_click(b.size.height, vp.height, f.y),
            ),
            None => ((b.size.width - vp.width).max(0.0) / 2.0, 0.0),
        };
        let offset = ScrollOffset::new(b.origin.x + left, b.origin.y + top).sanitized();
        self.surface.set_scroll_offset(offset);
        log::debug!("viewport: centered {} at ({:.1}, {:.1})", request.media, offset.left, offset.top);
        offset
    }

    // ── Zoom ──────────────────────────────────────────────────────────────

    /// Zoom `media` keeping the content under `anchor` in place. The scale
    /// transform is applied now; the scroll correction waits for the next
    /// animation frame so it is computed against the new scroll extents.
    /// Returns false when nothing changed.
    pub fn apply_zoom(&mut self, media: MediaId, zoom: f64, anchor: Point, now_ms: f64) -> bool {
        if self.surface.media_box(media).is_none() {
            return false;
        }
        let current = self.zoom.get(media);
        let new_zoom = self.zoom.bounds().clamp(zoom);
        if (new_zoom - current.zoom).abs() < 1e-9 {
            return false;
        }
        self.zoom.set(media, ZoomState { zoom: new_zoom, ..current });
        self.surface.set_transform(media, Some(new_zoom));
        self.surface.set_cursor(media, if new_zoom > 1.0 { Cursor::Grab } else { Cursor::Default });

        // Zooms landing in the same frame coalesce
        if let Some(p) = self.rescroll.payload_mut() {
            if p.media == media {
                p.new_zoom = new_zoom;
                p.anchor = anchor;
                return true;
            }
        }
        if let Some(other) = self.rescroll.cancel() {
            self.apply_rescroll(other);
        }
        let pending = PendingRescroll {
            media,
            old_zoom: current.zoom,
            new_zoom,
            scroll_before: self.surface.scroll_offset(),
            anchor,
        };
        self.rescroll.arm((), pending, now_ms, self.frame_timeout_ms);
        true
    }

    /// Called from `requestAnimationFrame`.
    pub fn animation_frame(&mut self) -> bool {
        match self.rescroll.signal(&()) {
            Some((pending, _)) => {
                self.apply_rescroll(pending);
                true
            }
            None => false,
        }
    }

    fn apply_rescroll(&mut self, p: PendingRescroll) {
        let Some(b) = self.surface.media_box(p.media) else { return };
        let local = |scroll: f64, origin: f64, size: f64, anchor: f64| {
            geometry::anchored_offset(p.old_zoom, p.new_zoom, size, scroll - origin, anchor).unwrap_or(scroll - origin)
        };
        let left = local(p.scroll_before.left, b.origin.x, b.size.width, p.anchor.x);
        let top = local(p.scroll_before.top, b.origin.y, b.size.height, p.anchor.y);
        // Absolute offset; the container clamps it to its own extent
        let offset = ScrollOffset::new(b.origin.x + left, b.origin.y + top).sanitized();
        self.surface.set_scroll_offset(offset);
        if self.zoom.peek(p.media).is_some() {
            let actual = self.surface.scroll_offset();
            self.zoom.set_pan(p.media, actual.left - b.origin.x, actual.top - b.origin.y);
        }
    }

    /// Remove the transform and cursor from `media` and forget its zoom.
    /// Safe to call any number of times.
    pub fn reset_zoom(&mut self, media: MediaId) {
        self.surface.set_transform(media, None);
        self.surface.set_cursor(media, Cursor::Default);
        self.zoom.remove(media);
        self.rescroll.cancel_if(|_, p| p.media == media);
    }

    /// Reset every tracked image and drop all parked work.
    pub fn reset_all(&mut self) {
        for media in self.zoom.reset_all() {
            self.surface.set_transform(media, None);
            self.surface.set_cursor(media, Cursor::Default);
        }
        self.rescroll.cancel();
        self.centering.cancel();
    }

    // ── Scrolling ─────────────────────────────────────────────────────────

    pub fn scroll_to(&mut self, media: MediaId, offset: ScrollOffset) {
        let offset = offset.sanitized();
        self.surface.set_scroll_offset(offset);
        if self.zoom.peek(media).is_some() {
            if let Some(b) = self.surface.media_box(media) {
                let actual = self.surface.scroll_offset();
                self.zoom.set_pan(media, actual.left - b.origin.x, actual.top - b.origin.y);
            }
        }
    }

    /// Reset scrolling to the origin without touching zoom state.
    pub fn rewind(&mut self) {
        if self.surface.scroll_offset() != ScrollOffset::ZERO {
            self.surface.set_scroll_offset(ScrollOffset::ZERO);
        }
    }

    pub fn set_cursor(&mut self, media: MediaId, cursor: Cursor) {
        let cursor = match cursor {
            Cursor::Grab | Cursor::Grabbing if self.zoom.zoom(media) <= 1.0 => Cursor::Default,
            c => c,
        };
        self.surface.set_cursor(media, cursor);
    }

    pub fn apply_intent(&mut self, intent: Intent, now_ms: f64) {
        match intent {
            Intent::ScrollTo { media, offset } => self.scroll_to(media, offset),
            Intent::ZoomAt { media, zoom, anchor } => {
                self.apply_zoom(media, zoom, anchor, now_ms);
            }
            Intent::SetCursor { media, cursor } => self.set_cursor(media, cursor),
        }
    }

    /// Release whatever fallback deadlines have passed.
    pub fn poll(&mut self, now_ms: f64) -> Released {
        let mut released = Released::default();
        if let Some((request, wake)) = self.centering.expire(now_ms) {
            debug_assert_eq!(wake, Wake::TimedOut);
            log::warn!("viewport: {} never reported ready, centering with known size", request.media);
            released.centered = Some(self.apply_center(request));
        }
        if let Some((pending, _)) = self.rescroll.expire(now_ms) {
            log::debug!("viewport: no animation frame in time, rescrolling anyway");
            self.apply_rescroll(pending);
            released.rescrolled = true;
        }
        released
    }

    pub fn media_layout(&self) -> Vec<MediaRect> {
        self.surface.media_layout()
    }
}

impl<S: ScrollSurface> GestureView for ViewportController<S> {
    fn zoom_of(&self, media: MediaId) -> f64 {
        self.zoom.zoom(media)
    }

    fn scroll_offset(&self) -> ScrollOffset {
        self.surface.scroll_offset()
    }
}
