use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement, HtmlImageElement, ScrollBehavior, ScrollToOptions, Window};
use crate::engine::session::Gallery;
use crate::engine::viewport::ScrollSurface;
use crate::error::LightboxError;
use crate::types::{Cursor, MediaBox, MediaId, MediaRect, Point, ScrollOffset, Size};

/// Attribute tying viewer images and gallery thumbnails to a `MediaId`.
pub const MEDIA_ATTR: &str = "data-media-id";

pub fn media_selector(media: MediaId) -> String {
    format!("[{}=\"{}\"]", MEDIA_ATTR, media.0)
}

pub fn media_id_of(el: &Element) -> Option<MediaId> {
    el.get_attribute(MEDIA_ATTR).as_deref().and_then(MediaId::parse)
}

fn instant_scroll(left: Option<f64>, top: f64) -> ScrollToOptions {
    let opts = ScrollToOptions::new();
    if let Some(left) = left {
        opts.set_left(left);
    }
    opts.set_top(top);
    opts.set_behavior(ScrollBehavior::Instant);
    opts
}

// ── Viewer ────────────────────────────────────────────────────────────────────

/// The scrollable lightbox element and the `<img data-media-id>` inside it.
pub struct DomSurface {
    viewer: HtmlElement,
}

impl DomSurface {
    pub fn new(viewer: HtmlElement) -> Self {
        Self { viewer }
    }

    pub fn element(&self) -> &HtmlElement {
        &self.viewer
    }

    fn find(&self, media: MediaId) -> Option<HtmlElement> {
        self.viewer
            .query_selector(&media_selector(media))
            .ok()
            .flatten()
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
    }

    /// Top-left of `el` in the viewer's scroll-content coordinates. With a
    /// top-left transform origin this is unaffected by the zoom scale.
    fn content_origin(&self, el: &Element) -> Point {
        let outer = self.viewer.get_bounding_client_rect();
        let inner = el.get_bounding_client_rect();
        Point::new(
            inner.left() - outer.left() - self.viewer.client_left() as f64 + self.viewer.scroll_left() as f64,
            inner.top() - outer.top() - self.viewer.client_top() as f64 + self.viewer.scroll_top() as f64,
        )
    }
}

impl ScrollSurface for DomSurface {
    fn viewport_size(&self) -> Size {
        Size::new(self.viewer.client_width() as f64, self.viewer.client_height() as f64)
    }

    fn scroll_offset(&self) -> ScrollOffset {
        ScrollOffset::new(self.viewer.scroll_left() as f64, self.viewer.scroll_top() as f64)
    }

    fn set_scroll_offset(&mut self, offset: ScrollOffset) {
        self.viewer.scroll_to_with_scroll_to_options(&instant_scroll(Some(offset.left), offset.top));
    }

    fn media_box(&self, media: MediaId) -> Option<MediaBox> {
        let el = self.find(media)?;
        Some(MediaBox {
            origin: self.content_origin(&el),
            // Layout size; transforms do not change offsetWidth/Height
            size: Size::new(el.offset_width() as f64, el.offset_height() as f64),
        })
    }

    fn is_ready(&self, media: MediaId) -> bool {
        let Some(el) = self.find(media) else { return false };
        let loaded = match el.dyn_ref::<HtmlImageElement>() {
            Some(img) => img.complete() && img.natural_width() > 0,
            None => true,
        };
        loaded && el.offset_width() > 0 && el.offset_height() > 0
    }

    fn set_transform(&mut self, media: MediaId, zoom: Option<f64>) {
        let Some(el) = self.find(media) else { return };
        let style = el.style();
        let result = match zoom {
            Some(z) => style
                .set_property("transform-origin", "0 0")
                .and_then(|_| style.set_property("transform", &format!("scale({z})"))),
            None => style.remove_property("transform").map(|_| ()),
        };
        if let Err(e) = result {
            log::warn!("surface: transform on {} failed: {:?}", media, e);
        }
    }

    fn set_cursor(&mut self, media: MediaId, cursor: Cursor) {
        let Some(el) = self.find(media) else { return };
        let style = el.style();
        let result = match cursor {
            Cursor::Default => style.remove_property("cursor").map(|_| ()),
            c => style.set_property("cursor", c.css()),
        };
        if let Err(e) = result {
            log::warn!("surface: cursor on {} failed: {:?}", media, e);
        }
    }

    fn media_layout(&self) -> Vec<MediaRect> {
        let Ok(nodes) = self.viewer.query_selector_all(&format!("[{}]", MEDIA_ATTR)) else {
            return Vec::new();
        };
        (0..nodes.length())
            .filter_map(|i| nodes.get(i))
            .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
            .filter_map(|el| {
                let id = media_id_of(&el)?;
                let origin = self.content_origin(&el);
                Some(MediaRect { id, top: origin.y, height: el.offset_height() as f64 })
            })
            .collect()
    }
}

// ── Gallery ───────────────────────────────────────────────────────────────────

/// The page under the lightbox: window scroll plus the thumbnail grid.
pub struct DomGallery {
    window: Window,
    root: Element,
}

impl DomGallery {
    pub fn new(root: Element) -> Result<Self, LightboxError> {
        let window = web_sys::window().ok_or(LightboxError::NoWindow)?;
        Ok(Self { window, root })
    }

    fn viewport_height(&self) -> f64 {
        self.window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0)
    }
}

impl Gallery for DomGallery {
    fn page_scroll_y(&self) -> f64 {
        self.window.scroll_y().unwrap_or(0.0)
    }

    /// Page scroll that centers the thumbnail vertically.
    fn thumbnail_page_y(&self, media: MediaId) -> Option<f64> {
        let thumb = self.root.query_selector(&media_selector(media)).ok().flatten()?;
        let rect = thumb.get_bounding_client_rect();
        let page_top = rect.top() + self.page_scroll_y();
        Some((page_top - (self.viewport_height() - rect.height()) / 2.0).max(0.0))
    }

    fn restore_page_scroll(&mut self, y: f64) {
        self.window.scroll_to_with_scroll_to_options(&instant_scroll(None, y));
    }
}
