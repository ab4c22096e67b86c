use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::{EventListener, EventListenerOptions, EventListenerPhase};
use gloo::render::{request_animation_frame, AnimationFrame};
use gloo::timers::callback::Timeout;
use js_sys::Date;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, HtmlElement, PointerEvent, TouchEvent, WheelEvent};

use crate::config::ViewerConfig;
use crate::dom::events;
use crate::dom::surface::{DomGallery, DomSurface};
use crate::engine::gesture::InputEvent;
use crate::engine::session::{HostModal, LightboxSession, SessionState};
use crate::error::LightboxError;
use crate::types::{ClickFraction, MediaId, ScrollHandoff};

type DomSession<H> = LightboxSession<DomSurface, H, DomGallery>;

fn now_ms() -> f64 {
    Date::now()
}

fn active(phase: EventListenerPhase) -> EventListenerOptions {
    EventListenerOptions { phase, passive: false }
}

/// A lightbox session wired to a live viewer element. Listeners, the
/// pending animation frame and the fallback timer all live as long as this
/// value; dropping it detaches everything.
pub struct DomLightbox<H: HostModal + 'static> {
    viewer: Rc<Viewer<H>>,
}

struct Viewer<H: HostModal + 'static> {
    element: HtmlElement,
    session: RefCell<DomSession<H>>,
    listeners: RefCell<Vec<EventListener>>,
    frame: RefCell<Option<AnimationFrame>>,
    /// Deadline the timer was armed for, and the timer itself.
    timer: RefCell<Option<(f64, Timeout)>>,
}

impl<H: HostModal + 'static> DomLightbox<H> {
    pub fn new(element: HtmlElement, gallery_root: Element, host: H, config: &ViewerConfig) -> Result<Self, LightboxError> {
        let gallery = DomGallery::new(gallery_root)?;
        let session = LightboxSession::new(DomSurface::new(element.clone()), host, gallery, config);
        let viewer = Rc::new(Viewer {
            element,
            session: RefCell::new(session),
            listeners: RefCell::new(Vec::new()),
            frame: RefCell::new(None),
            timer: RefCell::new(None),
        });
        viewer.install_listeners()?;
        Ok(Self { viewer })
    }

    pub fn open(&self, media: MediaId, fraction: Option<ClickFraction>) -> bool {
        let opened = self.viewer.with_session(|s| s.open(media, fraction, now_ms())).unwrap_or(false);
        self.viewer.schedule();
        opened
    }

    pub fn close(&self) -> Option<ScrollHandoff> {
        let handoff = self.viewer.with_session(|s| s.close(now_ms())).flatten();
        self.viewer.schedule();
        handoff
    }

    /// The host finished hiding the viewer.
    pub fn hidden(&self) {
        self.viewer.with_session(|s| s.hidden());
        self.viewer.schedule();
    }

    /// `None` while the session is mid-update.
    pub fn state(&self) -> Option<SessionState> {
        self.viewer.session.try_borrow().ok().map(|s| s.state())
    }

    pub fn active_media(&self) -> Option<MediaId> {
        self.viewer.session.try_borrow().ok().and_then(|s| s.active_media())
    }
}

impl<H: HostModal + 'static> Drop for DomLightbox<H> {
    fn drop(&mut self) {
        self.viewer.teardown();
    }
}

impl<H: HostModal + 'static> Viewer<H> {
    fn with_session<R>(&self, f: impl FnOnce(&mut DomSession<H>) -> R) -> Option<R> {
        match self.session.try_borrow_mut() {
            Ok(mut session) => Some(f(&mut session)),
            Err(_) => {
                log::warn!("lightbox: re-entrant session access dropped");
                None
            }
        }
    }

    fn dispatch(self: &Rc<Self>, event: &Event, input: InputEvent) {
        let Some(response) = self.with_session(|s| s.handle_input(&input, now_ms())) else { return };
        if response.claimed {
            event.prevent_default();
        }
        if response.suppress {
            event.stop_immediate_propagation();
        }
        if !response.intents.is_empty() {
            self.schedule();
        }
    }

    /// Request a frame for a pending rescroll and keep one timer armed for
    /// the earliest engine deadline.
    fn schedule(self: &Rc<Self>) {
        let Ok((wants_frame, deadline)) = self
            .session
            .try_borrow()
            .map(|s| (s.viewport().has_pending_rescroll(), s.next_deadline_ms()))
        else {
            return;
        };

        if wants_frame && self.frame.borrow().is_none() {
            let viewer = Rc::clone(self);
            let handle = request_animation_frame(move |_| {
                viewer.frame.borrow_mut().take();
                viewer.with_session(|s| s.animation_frame());
                viewer.schedule();
            });
            *self.frame.borrow_mut() = Some(handle);
        }

        let armed = self.timer.borrow().as_ref().map(|(at, _)| *at);
        if armed == deadline {
            return;
        }
        let Some(at) = deadline else {
            self.timer.borrow_mut().take();
            return;
        };
        let delay = (at - now_ms()).max(0.0).ceil() as u32;
        let viewer = Rc::clone(self);
        let timeout = Timeout::new(delay, move || {
            viewer.timer.borrow_mut().take();
            viewer.with_session(|s| s.poll(now_ms()));
            viewer.schedule();
        });
        *self.timer.borrow_mut() = Some((at, timeout));
    }

    fn install_listeners(self: &Rc<Self>) -> Result<(), LightboxError> {
        if !self.listeners.borrow().is_empty() {
            return Ok(());
        }
        let window = web_sys::window().ok_or(LightboxError::NoWindow)?;
        let mut listeners = Vec::new();

        // Presses start on the viewer; moves and releases are followed on the
        // window so a drag keeps working outside it. Capture phase, so a
        // suppressed pointerup or click never reaches the host's handlers.
        let viewer = Rc::clone(self);
        listeners.push(EventListener::new_with_options(
            &self.element,
            "pointerdown",
            active(EventListenerPhase::Bubble),
            move |event: &Event| {
                let Some(pe) = event.dyn_ref::<PointerEvent>() else { return };
                let Some(input) = events::pointer_input(pe, &viewer.element) else { return };
                viewer.dispatch(event, input);
            },
        ));
        for name in ["pointermove", "pointerup", "pointercancel"] {
            let viewer = Rc::clone(self);
            listeners.push(EventListener::new_with_options(
                &window,
                name,
                active(EventListenerPhase::Capture),
                move |event: &Event| {
                    let Some(pe) = event.dyn_ref::<PointerEvent>() else { return };
                    let Some(input) = events::pointer_input(pe, &viewer.element) else { return };
                    viewer.dispatch(event, input);
                },
            ));
        }
        let viewer = Rc::clone(self);
        listeners.push(EventListener::new_with_options(
            &window,
            "click",
            active(EventListenerPhase::Capture),
            move |event: &Event| viewer.dispatch(event, InputEvent::Click),
        ));

        // Touch and wheel must be non-passive to claim pinches
        for name in ["touchstart", "touchmove", "touchend", "touchcancel"] {
            let viewer = Rc::clone(self);
            listeners.push(EventListener::new_with_options(
                &self.element,
                name,
                active(EventListenerPhase::Bubble),
                move |event: &Event| {
                    let Some(te) = event.dyn_ref::<TouchEvent>() else { return };
                    let Some(input) = events::touch_input(te, &viewer.element) else { return };
                    viewer.dispatch(event, input);
                },
            ));
        }
        let viewer = Rc::clone(self);
        listeners.push(EventListener::new_with_options(
            &self.element,
            "wheel",
            active(EventListenerPhase::Bubble),
            move |event: &Event| {
                let Some(we) = event.dyn_ref::<WheelEvent>() else { return };
                let input = events::wheel_input(we, &viewer.element);
                viewer.dispatch(event, input);
            },
        ));

        let viewer = Rc::clone(self);
        listeners.push(EventListener::new(&self.element, "scroll", move |_event: &Event| {
            viewer.with_session(|s| s.scrolled(now_ms()));
            viewer.schedule();
        }));

        // `load` does not bubble; capture sees it for every image inside
        let viewer = Rc::clone(self);
        listeners.push(EventListener::new_with_options(
            &self.element,
            "load",
            EventListenerOptions::run_in_capture_phase(),
            move |event: &Event| {
                let Some(media) = events::media_target(event) else { return };
                log::debug!("lightbox: {} loaded", media);
                viewer.with_session(|s| s.media_ready(media));
                viewer.schedule();
            },
        ));

        log::debug!("lightbox: {} listeners attached", listeners.len());
        *self.listeners.borrow_mut() = listeners;
        Ok(())
    }

    fn teardown(&self) {
        self.listeners.borrow_mut().clear();
        self.frame.borrow_mut().take();
        self.timer.borrow_mut().take();
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod browser_tests {
    use super::*;
    use crate::components::lightbox::SLIDE_STYLE;
    use crate::dom::surface::MEDIA_ATTR;
    use gloo::timers::future::TimeoutFuture;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[derive(Default)]
    struct Flag {
        open: bool,
    }

    impl HostModal for Flag {
        fn show(&mut self) {
            self.open = true;
        }
        fn hide(&mut self) {
            self.open = false;
        }
        fn is_open(&self) -> bool {
            self.open
        }
    }

    /// 400x400 image that loads without the network.
    const SQUARE: &str = "data:image/svg+xml,%3Csvg xmlns=%22http://www.w3.org/2000/svg%22 width=%22400%22 height=%22400%22/%3E";

    #[wasm_bindgen_test]
    async fn test_open_close_round_trip() {
        let document = web_sys::window().unwrap().document().unwrap();
        let viewer: HtmlElement = document.create_element("div").unwrap().dyn_into().unwrap();
        viewer.style().set_property("width", "200px").unwrap();
        viewer.style().set_property("height", "200px").unwrap();
        viewer.style().set_property("overflow", "auto").unwrap();
        let img: HtmlElement = document.create_element("img").unwrap().dyn_into().unwrap();
        img.set_attribute(MEDIA_ATTR, "1").unwrap();
        img.set_attribute("style", SLIDE_STYLE).unwrap();
        viewer.append_child(&img).unwrap();
        let gallery = document.create_element("div").unwrap();
        let body = document.body().unwrap();
        body.append_child(&viewer).unwrap();
        body.append_child(&gallery).unwrap();

        let lightbox = DomLightbox::new(viewer.clone(), gallery.clone(), Flag::default(), &ViewerConfig::default()).unwrap();
        img.set_attribute("src", SQUARE).unwrap();
        // Opening before the load parks the centering until `load`
        assert!(lightbox.open(MediaId(1), Some(ClickFraction::new(0.75, 0.5))));
        for _ in 0..100 {
            if lightbox.state() == Some(SessionState::Open) {
                break;
            }
            TimeoutFuture::new(10).await;
        }
        assert_eq!(lightbox.state(), Some(SessionState::Open));
        // Natural width 400 in a 200 wide viewer: 400 * 0.75 - 100
        assert_eq!(img.offset_width(), 400);
        assert_eq!(viewer.scroll_left(), 200);
        assert_eq!(viewer.scroll_top(), 100);

        let handoff = lightbox.close().unwrap();
        assert_eq!(handoff.media_id, MediaId(1));
        lightbox.hidden();
        assert_eq!(lightbox.state(), Some(SessionState::Closed));
        assert_eq!(viewer.scroll_left(), 0);

        drop(lightbox);
        viewer.remove();
        gallery.remove();
    }
}
