use leptos::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::HtmlElement;
use crate::config::ViewerConfig;
use crate::dom::{events, DomLightbox};
use crate::engine::session::HostModal;
use crate::types::{MediaId, ScrollHandoff};

/// Slides keep their natural size so the viewer scrolls on both axes and
/// can open at the clicked spot.
pub const SLIDE_STYLE: &str = "display: block; width: auto; max-width: none; height: auto;";

#[derive(Clone, Debug, PartialEq)]
pub struct LightboxItem {
    pub id: MediaId,
    pub src: String,
    pub thumb_src: String,
    pub alt: String,
}

/// The overlay as a modal: shown and hidden through inline `display`, with
/// an `open` signal mirrored for styling.
pub struct SignalModal {
    open: RwSignal<bool>,
    overlay: HtmlElement,
    return_focus: Option<HtmlElement>,
}

impl SignalModal {
    pub fn new(open: RwSignal<bool>, overlay: HtmlElement) -> Self {
        Self { open, overlay, return_focus: None }
    }

    fn set_display(&self, value: &str) {
        if let Err(e) = self.overlay.style().set_property("display", value) {
            log::warn!("lightbox: display {value} failed: {:?}", e);
        }
    }
}

impl HostModal for SignalModal {
    fn show(&mut self) {
        self.return_focus = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.active_element())
            .and_then(|el| el.dyn_into::<HtmlElement>().ok());
        // Must be laid out before the viewer is measured for centering
        self.set_display("block");
        self.open.set(true);
    }

    fn hide(&mut self) {
        self.set_display("none");
        self.open.set(false);
    }

    fn is_open(&self) -> bool {
        self.open.get_untracked()
    }

    fn restore_focus(&mut self) {
        let Some(el) = self.return_focus.take() else { return };
        if let Err(e) = el.focus() {
            log::debug!("lightbox: focus return failed: {:?}", e);
        }
    }
}

/// Thumbnail grid plus a fullscreen zoomable viewer. Clicking a thumbnail
/// opens the viewer at the same spot of the image; a tap or click that is
/// not the end of a drag closes it again.
#[component]
pub fn Lightbox(
    items: Vec<LightboxItem>,
    #[prop(optional)] config: Option<ViewerConfig>,
    #[prop(optional, into)] on_close: Option<Callback<ScrollHandoff>>,
) -> impl IntoView {
    let config = config.unwrap_or_default().normalized();
    let open = RwSignal::new(false);
    let gallery_ref = NodeRef::<leptos::html::Div>::new();
    let overlay_ref = NodeRef::<leptos::html::Div>::new();
    let viewer_ref = NodeRef::<leptos::html::Div>::new();
    let driver: StoredValue<Option<DomLightbox<SignalModal>>, LocalStorage> = StoredValue::new_local(None);

    // Wire the engine once everything is mounted
    Effect::new(move || {
        let (Some(gallery), Some(overlay), Some(viewer)) = (gallery_ref.get(), overlay_ref.get(), viewer_ref.get()) else {
            return;
        };
        if driver.with_value(|d| d.is_some()) {
            return;
        }
        let host = SignalModal::new(open, overlay.into());
        match DomLightbox::new(viewer.into(), gallery.into(), host, &config) {
            Ok(lightbox) => driver.set_value(Some(lightbox)),
            Err(e) => log::error!("lightbox: setup failed: {e}"),
        }
    });

    // The overlay is hidden synchronously, so the next tick is "hide done"
    Effect::new(move |was_open: Option<bool>| {
        let is_open = open.get();
        if was_open == Some(true) && !is_open {
            driver.with_value(|d| {
                if let Some(d) = d {
                    d.hidden();
                }
            });
        }
        is_open
    });

    let open_at = move |id: MediaId, ev: leptos::ev::MouseEvent| {
        let fraction = events::click_fraction(&ev);
        driver.with_value(|d| {
            if let Some(d) = d {
                d.open(id, fraction);
            }
        });
    };

    let close = move || {
        let handoff = driver.with_value(|d| d.as_ref().and_then(|d| d.close()));
        if let (Some(handoff), Some(on_close)) = (handoff, on_close) {
            on_close.run(handoff);
        }
    };

    let thumbs = items
        .iter()
        .cloned()
        .map(|item| {
            let id = item.id;
            view! {
                <img
                    class="loupe-thumb"
                    src=item.thumb_src
                    alt=item.alt
                    data-media-id=id.0.to_string()
                    on:click=move |ev| open_at(id, ev)
                />
            }
        })
        .collect_view();

    let slides = items
        .into_iter()
        .map(|item| {
            view! {
                <img
                    class="loupe-image"
                    src=item.src
                    alt=item.alt
                    data-media-id=item.id.0.to_string()
                    draggable="false"
                    style=SLIDE_STYLE
                />
            }
        })
        .collect_view();

    view! {
        <div class="loupe">
            <div class="loupe-gallery" node_ref=gallery_ref>
                {thumbs}
            </div>
            <div
                class="loupe-overlay"
                class:open=move || open.get()
                node_ref=overlay_ref
                style="display: none; position: fixed; inset: 0;"
                on:pointerup=move |_| close()
            >
                <div
                    class="loupe-viewer"
                    node_ref=viewer_ref
                    style="width: 100%; height: 100%; overflow: auto; touch-action: pan-x pan-y;"
                >
                    {slides}
                </div>
            </div>
        </div>
    }
}
