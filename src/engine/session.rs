//! One lightbox viewing session, from the click on a thumbnail to the page
//! scroll restore after the modal is gone.
//!
//! The session owns the viewport controller and the gesture recognizer and
//! talks to the page only through the `HostModal` and `Gallery` capabilities.
//! On close the page is returned to the thumbnail of the image that was
//! nearest the viewer's center, so paging through a multi-image set and
//! closing lands the gallery on the last image looked at.

use crate::config::ViewerConfig;
use crate::engine::geometry;
use crate::engine::gesture::{GestureRecognizer, InputEvent, Response};
use crate::engine::ready::Waiter;
use crate::engine::viewport::{CenterOutcome, ScrollSurface, ViewportController};
use crate::types::{ClickFraction, MediaId, ScrollHandoff};

/// The modal that hosts the viewer. Focus handling, ARIA and the backdrop
/// live behind this.
pub trait HostModal {
    fn show(&mut self);
    fn hide(&mut self);
    fn is_open(&self) -> bool;
    fn restore_focus(&mut self) {}
}

/// The page underneath the lightbox.
pub trait Gallery {
    fn page_scroll_y(&self) -> f64;
    /// Page scroll that brings the thumbnail for `media` into view.
    fn thumbnail_page_y(&self, media: MediaId) -> Option<f64>;
    fn restore_page_scroll(&mut self, y: f64);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    Closed,
    /// Shown, waiting for the opener image to load before centering.
    Opening,
    Open,
    /// Hidden, waiting for the host's hide animation before restoring.
    Closing,
}

pub struct LightboxSession<S, H, G> {
    state: SessionState,
    viewport: ViewportController<S>,
    gestures: GestureRecognizer,
    host: H,
    gallery: G,
    saved_page_y: f64,
    active: Option<MediaId>,
    settle: Waiter<(), ()>,
    hiding: Waiter<(), Option<ScrollHandoff>>,
    settle_ms: f64,
    hide_delay_ms: f64,
}

impl<S: ScrollSurface, H: HostModal, G: Gallery> LightboxSession<S, H, G> {
    pub fn new(surface: S, host: H, gallery: G, config: &ViewerConfig) -> Self {
        Self {
            state: SessionState::Closed,
            viewport: ViewportController::new(surface, config),
            gestures: GestureRecognizer::new(config.zoom_bounds(), config.drag_threshold, config.wheel_zoom_sensitivity),
            host,
            gallery,
            saved_page_y: 0.0,
            active: None,
            settle: Waiter::new(),
            hiding: Waiter::new(),
            settle_ms: config.settle_ms,
            hide_delay_ms: config.hide_delay_ms,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn active_media(&self) -> Option<MediaId> {
        self.active
    }

    pub fn viewport(&self) -> &ViewportController<S> {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut ViewportController<S> {
        &mut self.viewport
    }

    pub fn gestures(&self) -> &GestureRecognizer {
        &self.gestures
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn gallery(&self) -> &G {
        &self.gallery
    }

    /// Open on `opener`, positioned at the clicked point. Returns false (and
    /// changes nothing) when the session is busy or the image is unknown.
    pub fn open(&mut self, opener: MediaId, fraction: Option<ClickFraction>, now_ms: f64) -> bool {
        if self.state == SessionState::Closing {
            self.finish_hide();
        }
        if self.state != SessionState::Closed {
            log::debug!("lightbox: open {} ignored in {:?}", opener, self.state);
            return false;
        }
        if self.viewport.surface().media_box(opener).is_none() {
            log::warn!("lightbox: no image {} in viewer, not opening", opener);
            return false;
        }

        self.saved_page_y = self.gallery.page_scroll_y();
        self.active = Some(opener);
        self.host.show();
        self.gestures.attach();
        self.state = SessionState::Opening;

        match self.viewport.center_on(opener, fraction, now_ms) {
            CenterOutcome::Applied(_) | CenterOutcome::Missing => self.state = SessionState::Open,
            CenterOutcome::Deferred => {}
        }
        log::info!("lightbox: opened on {} ({:?})", opener, self.state);
        true
    }

    /// An image in the viewer finished loading.
    pub fn media_ready(&mut self, media: MediaId) {
        if self.viewport.media_ready(media).is_some() && self.state == SessionState::Opening {
            self.state = SessionState::Open;
        }
    }

    /// Route one input event. Only an open session claims anything.
    pub fn handle_input(&mut self, event: &InputEvent, now_ms: f64) -> Response {
        if self.state != SessionState::Open {
            return Response::default();
        }
        let response = self.gestures.handle(event, &self.viewport);
        for intent in &response.intents {
            self.viewport.apply_intent(*intent, now_ms);
        }
        response
    }

    /// The viewer scrolled. The active image is recomputed once scrolling
    /// has been quiet for the settle window.
    pub fn scrolled(&mut self, now_ms: f64) {
        if self.state == SessionState::Open {
            self.settle.arm((), (), now_ms, self.settle_ms);
        }
    }

    pub fn animation_frame(&mut self) -> bool {
        self.viewport.animation_frame()
    }

    /// Drive every fallback timer.
    pub fn poll(&mut self, now_ms: f64) {
        let released = self.viewport.poll(now_ms);
        if released.centered.is_some() && self.state == SessionState::Opening {
            self.state = SessionState::Open;
        }
        if self.settle.expire(now_ms).is_some() {
            self.update_active();
        }
        if self.hiding.expire(now_ms).is_some() {
            log::debug!("lightbox: no hide signal from host, restoring after delay");
            self.finish_hide();
        }
    }

    pub fn next_deadline_ms(&self) -> Option<f64> {
        [self.viewport.next_deadline_ms(), self.settle.deadline_ms(), self.hiding.deadline_ms()]
            .into_iter()
            .flatten()
            .reduce(f64::min)
    }

    fn update_active(&mut self) {
        let layout = self.viewport.media_layout();
        let top = self.viewport.surface().scroll_offset().top;
        let height = self.viewport.surface().viewport_size().height;
        if let Some(id) = geometry::nearest_to_center(&layout, top, height) {
            if self.active != Some(id) {
                log::debug!("lightbox: active media now {}", id);
                self.active = Some(id);
            }
        }
    }

    /// Close the viewer. Returns the handoff the page will be restored to
    /// once the host reports the hide finished (or the hide delay passes).
    pub fn close(&mut self, now_ms: f64) -> Option<ScrollHandoff> {
        if !matches!(self.state, SessionState::Open | SessionState::Opening) {
            return None;
        }
        self.update_active();
        let handoff = self.active.map(|media_id| ScrollHandoff {
            media_id,
            outer_page_scroll_y: self.gallery.thumbnail_page_y(media_id).unwrap_or(self.saved_page_y),
        });

        self.viewport.reset_all();
        self.gestures.detach();
        self.settle.cancel();
        if self.host.is_open() {
            self.host.hide();
        }
        self.state = SessionState::Closing;
        self.hiding.arm((), handoff, now_ms, self.hide_delay_ms);
        log::info!("lightbox: closing, handoff {:?}", handoff);
        handoff
    }

    /// The host's hide animation completed.
    pub fn hidden(&mut self) {
        if self.state == SessionState::Closing {
            self.finish_hide();
        }
    }

    fn finish_hide(&mut self) {
        let handoff = self.hiding.cancel().flatten();
        let y = handoff.map(|h| h.outer_page_scroll_y).unwrap_or(self.saved_page_y);
        // Viewer is invisible now; the next open starts from the origin
        self.viewport.rewind();
        self.gallery.restore_page_scroll(y);
        self.host.restore_focus();
        self.active = None;
        self.state = SessionState::Closed;
    }
}
