//! Gesture recognition: raw pointer/touch/wheel input to viewer intents.
//!
//! Three phases: `Idle`, `Dragging` (mouse, pen or one finger panning a
//! zoomed image) and `Pinching` (exactly two fingers). Dragging is only
//! entered on an image that is already zoomed in, so at zoom 1 the browser
//! keeps native swipe scrolling between images.
//!
//! The host modal closes on pointerup, so a release that ended a real drag
//! suppresses that pointerup and then exactly one trailing click.

use crate::engine::geometry::{self, ZoomBounds};
use crate::engine::pinch::{PinchSession, TouchPoint};
use crate::types::{Cursor, MediaId, Point, ScrollOffset};

pub const DEFAULT_DRAG_THRESHOLD: f64 = 5.0;
pub const DEFAULT_WHEEL_SENSITIVITY: f64 = 0.01;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerKind {
    Mouse,
    Pen,
    Touch,
}

/// Input as the recognizer sees it. Positions are viewport-relative;
/// `touches` always lists the touches still active after the event.
#[derive(Clone, Debug, PartialEq)]
pub enum InputEvent {
    PointerDown { pointer_id: i32, kind: PointerKind, button: i16, position: Point, target: Option<MediaId> },
    PointerMove { pointer_id: i32, position: Point },
    PointerUp { pointer_id: i32, kind: PointerKind },
    PointerCancel { pointer_id: i32 },
    TouchStart { touches: Vec<TouchPoint>, target: Option<MediaId> },
    TouchMove { touches: Vec<TouchPoint> },
    TouchEnd { touches: Vec<TouchPoint> },
    Wheel { position: Point, delta_y: f64, ctrl_key: bool, target: Option<MediaId> },
    /// Capture-phase click.
    Click,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Intent {
    ScrollTo { media: MediaId, offset: ScrollOffset },
    ZoomAt { media: MediaId, zoom: f64, anchor: Point },
    SetCursor { media: MediaId, cursor: Cursor },
}

/// What the DOM layer should do with the event that produced it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Response {
    /// Call `preventDefault`.
    pub claimed: bool,
    /// Stop propagation so the host never sees the event.
    pub suppress: bool,
    pub intents: Vec<Intent>,
}

impl Response {
    fn claimed(intents: Vec<Intent>) -> Self {
        Self { claimed: true, suppress: false, intents }
    }
}

/// Read access to the viewer state the recognizer decides on.
pub trait GestureView {
    fn zoom_of(&self, media: MediaId) -> f64;
    fn scroll_offset(&self) -> ScrollOffset;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragSource {
    Pointer(i32),
    Touch(i32),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragSession {
    pub media: MediaId,
    pub source: DragSource,
    pub start_pointer: Point,
    pub start_scroll: ScrollOffset,
    /// Movement went past the threshold at some point. Sticky.
    pub did_drag: bool,
}

impl DragSession {
    fn offset_at(&mut self, position: Point, threshold: f64) -> ScrollOffset {
        let dx = position.x - self.start_pointer.x;
        let dy = position.y - self.start_pointer.y;
        if dx.abs().max(dy.abs()) > threshold {
            self.did_drag = true;
        }
        ScrollOffset::new(self.start_scroll.left - dx, self.start_scroll.top - dy).sanitized()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Phase {
    #[default]
    Idle,
    Dragging(DragSession),
    Pinching(PinchSession),
    /// A pinch ended back at zoom 1 with fingers still down. Nothing pans,
    /// but every remaining touch release belongs to the pinch.
    PinchTail,
}

#[derive(Debug)]
pub struct GestureRecognizer {
    attached: bool,
    phase: Phase,
    suppress_click: bool,
    drag_threshold: f64,
    wheel_sensitivity: f64,
    bounds: ZoomBounds,
}

impl Default for GestureRecognizer {
    fn default() -> Self {
        Self::new(ZoomBounds::default(), DEFAULT_DRAG_THRESHOLD, DEFAULT_WHEEL_SENSITIVITY)
    }
}

impl GestureRecognizer {
    pub fn new(bounds: ZoomBounds, drag_threshold: f64, wheel_sensitivity: f64) -> Self {
        Self {
            attached: false,
            phase: Phase::Idle,
            suppress_click: false,
            drag_threshold,
            wheel_sensitivity,
            bounds,
        }
    }

    /// Start accepting input. Returns false if already attached.
    pub fn attach(&mut self) -> bool {
        if self.attached {
            return false;
        }
        self.attached = true;
        true
    }

    /// Stop accepting input and drop any gesture in flight.
    pub fn detach(&mut self) {
        if self.attached {
            log::debug!("gesture: detached in {:?}", self.phase);
        }
        self.attached = false;
        self.phase = Phase::Idle;
        self.suppress_click = false;
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn handle(&mut self, event: &InputEvent, view: &impl GestureView) -> Response {
        if !self.attached {
            return Response::default();
        }
        match event {
            InputEvent::PointerDown { pointer_id, kind, button, position, target } => {
                self.pointer_down(*pointer_id, *kind, *button, *position, *target, view)
            }
            InputEvent::PointerMove { pointer_id, position } => match &mut self.phase {
                Phase::Dragging(drag) if drag.source == DragSource::Pointer(*pointer_id) => {
                    let offset = drag.offset_at(*position, self.drag_threshold);
                    Response::claimed(vec![Intent::ScrollTo { media: drag.media, offset }])
                }
                _ => Response::default(),
            },
            InputEvent::PointerUp { pointer_id, kind } => self.pointer_up(*pointer_id, *kind),
            InputEvent::PointerCancel { pointer_id } => match self.phase {
                Phase::Dragging(drag) if drag.source == DragSource::Pointer(*pointer_id) => {
                    self.phase = Phase::Idle;
                    Response {
                        claimed: false,
                        suppress: false,
                        intents: vec![Intent::SetCursor { media: drag.media, cursor: Cursor::Grab }],
                    }
                }
                _ => Response::default(),
            },
            InputEvent::TouchStart { touches, target } => self.touch_start(touches, *target, view),
            InputEvent::TouchMove { touches } => self.touch_move(touches),
            InputEvent::TouchEnd { touches } => self.touch_end(touches, view),
            InputEvent::Wheel { position, delta_y, ctrl_key, target } => {
                // Plain wheel is page/viewer scrolling; only ctrl+wheel is a pinch
                let (true, Some(media)) = (*ctrl_key, *target) else {
                    return Response::default();
                };
                let current = view.zoom_of(media);
                let zoom = self.bounds.clamp(geometry::wheel_zoom(current, *delta_y, self.wheel_sensitivity));
                Response::claimed(vec![Intent::ZoomAt { media, zoom, anchor: *position }])
            }
            InputEvent::Click => {
                if !self.suppress_click {
                    return Response::default();
                }
                self.suppress_click = false;
                log::debug!("gesture: swallowed click after drag");
                Response { claimed: true, suppress: true, intents: Vec::new() }
            }
        }
    }

    fn pointer_down(
        &mut self,
        pointer_id: i32,
        kind: PointerKind,
        button: i16,
        position: Point,
        target: Option<MediaId>,
        view: &impl GestureView,
    ) -> Response {
        // A click that never arrived must not eat the next real one
        self.suppress_click = false;
        if kind == PointerKind::Touch || button != 0 || self.phase != Phase::Idle {
            return Response::default();
        }
        let Some(media) = target else { return Response::default() };
        if view.zoom_of(media) <= 1.0 {
            return Response::default();
        }
        self.phase = Phase::Dragging(DragSession {
            media,
            source: DragSource::Pointer(pointer_id),
            start_pointer: position,
            start_scroll: view.scroll_offset(),
            did_drag: false,
        });
        Response::claimed(vec![Intent::SetCursor { media, cursor: Cursor::Grabbing }])
    }

    fn pointer_up(&mut self, pointer_id: i32, kind: PointerKind) -> Response {
        match self.phase {
            Phase::Dragging(drag) if drag.source == DragSource::Pointer(pointer_id) => {
                self.phase = Phase::Idle;
                self.suppress_click = drag.did_drag;
                Response {
                    claimed: true,
                    suppress: drag.did_drag,
                    intents: vec![Intent::SetCursor { media: drag.media, cursor: Cursor::Grab }],
                }
            }
            // Touch pointerup arrives before touchend; the touch drag itself
            // ends there, but the close must be stopped here
            Phase::Dragging(drag) if kind == PointerKind::Touch && matches!(drag.source, DragSource::Touch(_)) => {
                if drag.did_drag {
                    self.suppress_click = true;
                }
                Response { claimed: false, suppress: drag.did_drag, intents: Vec::new() }
            }
            Phase::Pinching(_) | Phase::PinchTail if kind == PointerKind::Touch => {
                self.suppress_click = true;
                Response { claimed: false, suppress: true, intents: Vec::new() }
            }
            _ => Response::default(),
        }
    }

    fn touch_start(&mut self, touches: &[TouchPoint], target: Option<MediaId>, view: &impl GestureView) -> Response {
        match touches.len() {
            1 => {
                let t = touches[0];
                let media = match target {
                    Some(m) if view.zoom_of(m) > 1.0 => m,
                    _ => {
                        self.phase = Phase::Idle;
                        return Response::default();
                    }
                };
                self.phase = Phase::Dragging(DragSession {
                    media,
                    source: DragSource::Touch(t.id),
                    start_pointer: t.position,
                    start_scroll: view.scroll_offset(),
                    did_drag: false,
                });
                Response::claimed(Vec::new())
            }
            2 => {
                let media = match (target, self.phase) {
                    (Some(m), _) => m,
                    (None, Phase::Dragging(drag)) => drag.media,
                    _ => {
                        self.phase = Phase::Idle;
                        return Response::default();
                    }
                };
                match PinchSession::begin(media, touches, view.zoom_of(media)) {
                    Some(pinch) => {
                        log::debug!("gesture: pinch on {} from zoom {:.2}", media, pinch.initial_zoom);
                        self.phase = Phase::Pinching(pinch);
                        Response::claimed(Vec::new())
                    }
                    None => {
                        self.phase = Phase::Idle;
                        Response::default()
                    }
                }
            }
            _ => {
                self.phase = Phase::Idle;
                Response::default()
            }
        }
    }

    fn touch_move(&mut self, touches: &[TouchPoint]) -> Response {
        match &mut self.phase {
            Phase::Pinching(pinch) => {
                let Some((zoom, anchor)) = pinch.update(touches, self.bounds) else {
                    return Response::default();
                };
                Response::claimed(vec![Intent::ZoomAt { media: pinch.media, zoom, anchor }])
            }
            Phase::Dragging(drag) => {
                let DragSource::Touch(id) = drag.source else { return Response::default() };
                let Some(t) = touches.iter().find(|t| t.id == id) else {
                    return Response::default();
                };
                let offset = drag.offset_at(t.position, self.drag_threshold);
                Response::claimed(vec![Intent::ScrollTo { media: drag.media, offset }])
            }
            Phase::Idle | Phase::PinchTail => Response::default(),
        }
    }

    fn touch_end(&mut self, touches: &[TouchPoint], view: &impl GestureView) -> Response {
        // Re-derive from the remaining touch count; ordering is not trusted
        match (touches.len(), self.phase) {
            (0, Phase::Dragging(drag)) => {
                self.phase = Phase::Idle;
                if drag.did_drag {
                    self.suppress_click = true;
                }
                Response { claimed: drag.did_drag, suppress: false, intents: Vec::new() }
            }
            (0, _) => {
                self.phase = Phase::Idle;
                Response::default()
            }
            (1, Phase::Pinching(pinch)) => {
                let t = touches[0];
                if view.zoom_of(pinch.media) > 1.0 {
                    // Continuing with one finger is still part of the gesture,
                    // so lifting it must not count as a tap
                    self.phase = Phase::Dragging(DragSession {
                        media: pinch.media,
                        source: DragSource::Touch(t.id),
                        start_pointer: t.position,
                        start_scroll: view.scroll_offset(),
                        did_drag: true,
                    });
                } else {
                    self.phase = Phase::PinchTail;
                }
                Response::claimed(Vec::new())
            }
            (1, Phase::Dragging(drag)) if drag.source != DragSource::Touch(touches[0].id) => {
                let t = touches[0];
                self.phase = Phase::Dragging(DragSession {
                    source: DragSource::Touch(t.id),
                    start_pointer: t.position,
                    start_scroll: view.scroll_offset(),
                    ..drag
                });
                Response::claimed(Vec::new())
            }
            (2, _) => Response::default(),
            (_, Phase::Dragging(_)) if touches.len() == 1 => Response::default(),
            (_, Phase::PinchTail) => Response::default(),
            _ => {
                self.phase = Phase::Idle;
                Response::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[derive(Default)]
    struct View {
        zooms: HashMap<MediaId, f64>,
        scroll: ScrollOffset,
    }

    impl GestureView for View {
        fn zoom_of(&self, media: MediaId) -> f64 {
            self.zooms.get(&media).copied().unwrap_or(1.0)
        }
        fn scroll_offset(&self) -> ScrollOffset {
            self.scroll
        }
    }

    const IMG: MediaId = MediaId(1);

    fn zoomed(z: f64) -> View {
        View { zooms: HashMap::from([(IMG, z)]), scroll: ScrollOffset::new(100.0, 200.0) }
    }

    fn attached() -> GestureRecognizer {
        let mut g = GestureRecognizer::default();
        assert!(g.attach());
        g
    }

    fn down(x: f64, y: f64) -> InputEvent {
        InputEvent::PointerDown {
            pointer_id: 1,
            kind: PointerKind::Mouse,
            button: 0,
            position: Point::new(x, y),
            target: Some(IMG),
        }
    }

    fn mv(x: f64, y: f64) -> InputEvent {
        InputEvent::PointerMove { pointer_id: 1, position: Point::new(x, y) }
    }

    fn up() -> InputEvent {
        InputEvent::PointerUp { pointer_id: 1, kind: PointerKind::Mouse }
    }

    fn tp(id: i32, x: f64, y: f64) -> TouchPoint {
        TouchPoint { id, position: Point::new(x, y) }
    }

    #[test]
    fn test_attach_is_idempotent() {
        let mut g = GestureRecognizer::default();
        assert!(g.attach());
        assert!(!g.attach());
        assert!(g.is_attached());
    }

    #[test]
    fn test_no_drag_at_zoom_one() {
        let mut g = attached();
        let view = zoomed(1.0);
        let r = g.handle(&down(10.0, 10.0), &view);
        assert!(!r.claimed);
        assert_eq!(g.phase(), &Phase::Idle);
    }

    #[test]
    fn test_press_outside_media_creates_no_state() {
        let mut g = attached();
        let view = zoomed(2.0);
        let ev = InputEvent::PointerDown {
            pointer_id: 1,
            kind: PointerKind::Mouse,
            button: 0,
            position: Point::new(1.0, 1.0),
            target: None,
        };
        assert_eq!(g.handle(&ev, &view), Response::default());
        assert_eq!(g.phase(), &Phase::Idle);
    }

    #[test]
    fn test_drag_scrolls_opposite_to_pointer() {
        let mut g = attached();
        let view = zoomed(2.0);
        assert!(g.handle(&down(50.0, 50.0), &view).claimed);
        let r = g.handle(&mv(30.0, 80.0), &view);
        assert_eq!(
            r.intents,
            vec![Intent::ScrollTo { media: IMG, offset: ScrollOffset::new(120.0, 170.0) }]
        );
    }

    #[test]
    fn test_small_movement_keeps_tap_to_close() {
        let mut g = attached();
        let view = zoomed(2.0);
        g.handle(&down(50.0, 50.0), &view);
        g.handle(&mv(55.0, 46.0), &view);
        let r = g.handle(&up(), &view);
        assert!(!r.suppress, "movement of exactly 5 is not a drag");
        assert!(!g.handle(&InputEvent::Click, &view).suppress);
    }

    #[test]
    fn test_drag_suppresses_pointerup_and_one_click() {
        let mut g = attached();
        let view = zoomed(2.0);
        g.handle(&down(50.0, 50.0), &view);
        g.handle(&mv(50.0, 56.0), &view);
        let r = g.handle(&up(), &view);
        assert!(r.suppress);
        assert!(g.handle(&InputEvent::Click, &view).suppress);
        assert!(!g.handle(&InputEvent::Click, &view).suppress, "only one click is swallowed");
    }

    #[test]
    fn test_did_drag_matches_threshold_property() {
        let view = zoomed(2.0);
        for &(dx, dy) in &[(0.0, 0.0), (5.0, 0.0), (-5.0, 5.0), (5.01, 0.0), (0.0, -6.0), (3.0, 4.9), (-7.5, 1.0)] {
            let mut g = attached();
            g.handle(&down(100.0, 100.0), &view);
            g.handle(&mv(100.0 + dx, 100.0 + dy), &view);
            let r = g.handle(&up(), &view);
            let expected = f64::max(f64::abs(dx), f64::abs(dy)) > 5.0;
            assert_eq!(r.suppress, expected, "dx={dx} dy={dy}");
        }
    }

    #[test]
    fn test_did_drag_is_sticky() {
        let mut g = attached();
        let view = zoomed(2.0);
        g.handle(&down(50.0, 50.0), &view);
        g.handle(&mv(70.0, 50.0), &view);
        g.handle(&mv(50.0, 50.0), &view);
        assert!(g.handle(&up(), &view).suppress);
    }

    #[test]
    fn test_stale_suppression_cleared_by_next_press() {
        let mut g = attached();
        let view = zoomed(2.0);
        g.handle(&down(50.0, 50.0), &view);
        g.handle(&mv(90.0, 50.0), &view);
        g.handle(&up(), &view);
        // Click never came; the next press starts fresh
        g.handle(&down(50.0, 50.0), &view);
        g.handle(&up(), &view);
        assert!(!g.handle(&InputEvent::Click, &view).suppress);
    }

    #[test]
    fn test_plain_wheel_passes_through() {
        let mut g = attached();
        let view = zoomed(2.0);
        let ev = InputEvent::Wheel { position: Point::new(10.0, 10.0), delta_y: 40.0, ctrl_key: false, target: Some(IMG) };
        assert_eq!(g.handle(&ev, &view), Response::default());
    }

    #[test]
    fn test_ctrl_wheel_zooms_at_pointer() {
        let mut g = attached();
        let view = zoomed(1.0);
        let ev = InputEvent::Wheel { position: Point::new(10.0, 20.0), delta_y: -50.0, ctrl_key: true, target: Some(IMG) };
        let r = g.handle(&ev, &view);
        assert!(r.claimed);
        match r.intents.as_slice() {
            [Intent::ZoomAt { media, zoom, anchor }] => {
                assert_eq!(*media, IMG);
                assert!(*zoom > 1.0 && *zoom <= 4.0);
                assert_eq!(*anchor, Point::new(10.0, 20.0));
            }
            other => panic!("unexpected intents {other:?}"),
        }
    }

    #[test]
    fn test_single_touch_at_zoom_one_not_claimed() {
        let mut g = attached();
        let view = zoomed(1.0);
        let r = g.handle(&InputEvent::TouchStart { touches: vec![tp(0, 5.0, 5.0)], target: Some(IMG) }, &view);
        assert!(!r.claimed);
        assert_eq!(g.phase(), &Phase::Idle);
    }

    #[test]
    fn test_pinch_then_pan_then_release() {
        let mut g = attached();
        let mut view = zoomed(1.0);
        let start = vec![tp(0, 100.0, 100.0), tp(1, 200.0, 100.0)];
        assert!(g.handle(&InputEvent::TouchStart { touches: start, target: Some(IMG) }, &view).claimed);
        assert!(matches!(g.phase(), Phase::Pinching(_)));

        let spread = vec![tp(0, 50.0, 100.0), tp(1, 250.0, 100.0)];
        let r = g.handle(&InputEvent::TouchMove { touches: spread }, &view);
        assert_eq!(r.intents, vec![Intent::ZoomAt { media: IMG, zoom: 2.0, anchor: Point::new(150.0, 100.0) }]);
        view.zooms.insert(IMG, 2.0);

        g.handle(&InputEvent::TouchEnd { touches: vec![tp(1, 250.0, 100.0)] }, &view);
        assert!(matches!(g.phase(), Phase::Dragging(d) if d.source == DragSource::Touch(1)));

        let r = g.handle(&InputEvent::TouchMove { touches: vec![tp(1, 240.0, 90.0)] }, &view);
        assert_eq!(r.intents, vec![Intent::ScrollTo { media: IMG, offset: ScrollOffset::new(110.0, 210.0) }]);

        let r = g.handle(&InputEvent::PointerUp { pointer_id: 9, kind: PointerKind::Touch }, &view);
        assert!(r.suppress, "lifting after a pinch must not close the modal");
        g.handle(&InputEvent::TouchEnd { touches: vec![] }, &view);
        assert_eq!(g.phase(), &Phase::Idle);
    }

    #[test]
    fn test_pinch_back_at_zoom_one_waits_for_last_finger() {
        let mut g = attached();
        let view = zoomed(1.0);
        let start = vec![tp(0, 100.0, 100.0), tp(1, 200.0, 100.0)];
        g.handle(&InputEvent::TouchStart { touches: start, target: Some(IMG) }, &view);
        g.handle(&InputEvent::TouchEnd { touches: vec![tp(0, 100.0, 100.0)] }, &view);
        assert_eq!(g.phase(), &Phase::PinchTail);
        let r = g.handle(&InputEvent::TouchMove { touches: vec![tp(0, 160.0, 130.0)] }, &view);
        assert!(r.intents.is_empty(), "remaining finger must not pan at zoom 1");
        g.handle(&InputEvent::TouchEnd { touches: vec![] }, &view);
        assert_eq!(g.phase(), &Phase::Idle);
    }

    #[test]
    fn test_pinch_at_zoom_one_never_leaks_a_release() {
        let mut g = attached();
        let view = zoomed(1.0);
        let start = vec![tp(0, 100.0, 100.0), tp(1, 200.0, 100.0)];
        g.handle(&InputEvent::TouchStart { touches: start, target: Some(IMG) }, &view);
        g.handle(&InputEvent::TouchMove { touches: vec![tp(0, 90.0, 100.0), tp(1, 210.0, 100.0)] }, &view);

        // Browsers fire pointerup before the matching touchend
        let first = g.handle(&InputEvent::PointerUp { pointer_id: 0, kind: PointerKind::Touch }, &view);
        assert!(first.suppress, "first finger release reached the host");
        g.handle(&InputEvent::TouchEnd { touches: vec![tp(1, 210.0, 100.0)] }, &view);
        let last = g.handle(&InputEvent::PointerUp { pointer_id: 1, kind: PointerKind::Touch }, &view);
        assert!(last.suppress, "last finger release reached the host");
        g.handle(&InputEvent::TouchEnd { touches: vec![] }, &view);
        assert_eq!(g.phase(), &Phase::Idle);

        // The trailing click is swallowed once, then taps close again
        assert!(g.handle(&InputEvent::Click, &view).suppress);
        assert!(!g.handle(&InputEvent::Click, &view).suppress);
    }

    #[test]
    fn test_stale_touchend_resets() {
        let mut g = attached();
        let view = zoomed(2.0);
        let start = vec![tp(0, 100.0, 100.0), tp(1, 200.0, 100.0)];
        g.handle(&InputEvent::TouchStart { touches: start, target: Some(IMG) }, &view);
        // touchend reporting zero touches while pinching
        g.handle(&InputEvent::TouchEnd { touches: vec![] }, &view);
        assert_eq!(g.phase(), &Phase::Idle);
        let r = g.handle(&InputEvent::TouchMove { touches: vec![tp(0, 1.0, 1.0), tp(1, 2.0, 2.0)] }, &view);
        assert!(r.intents.is_empty());
    }

    #[test]
    fn test_touch_drag_suppresses_close() {
        let mut g = attached();
        let view = zoomed(3.0);
        g.handle(&InputEvent::TouchStart { touches: vec![tp(4, 10.0, 10.0)], target: Some(IMG) }, &view);
        g.handle(&InputEvent::TouchMove { touches: vec![tp(4, 10.0, 40.0)] }, &view);
        let r = g.handle(&InputEvent::PointerUp { pointer_id: 4, kind: PointerKind::Touch }, &view);
        assert!(r.suppress);
        g.handle(&InputEvent::TouchEnd { touches: vec![] }, &view);
        assert_eq!(g.phase(), &Phase::Idle);
    }

    #[test]
    fn test_detach_drops_everything() {
        let mut g = attached();
        let view = zoomed(2.0);
        g.handle(&down(50.0, 50.0), &view);
        g.handle(&mv(90.0, 50.0), &view);
        g.detach();
        assert_eq!(g.phase(), &Phase::Idle);
        assert_eq!(g.handle(&mv(10.0, 10.0), &view), Response::default());
        assert_eq!(g.handle(&InputEvent::Click, &view), Response::default());
        assert_eq!(g.handle(&up(), &view), Response::default());
    }
}
