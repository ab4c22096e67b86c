use serde::{Deserialize, Serialize};

/// Identity of one media item (image) inside a lightbox.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MediaId(pub u32);

impl MediaId {
    /// Parse the value of a `data-media-id` attribute.
    pub fn parse(raw: &str) -> Option<Self> {
        raw.trim().parse().ok().map(MediaId)
    }
}

impl std::fmt::Display for MediaId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }
}

/// scrollLeft / scrollTop of the viewer element.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollOffset {
    pub left: f64,
    pub top: f64,
}

impl ScrollOffset {
    pub const ZERO: ScrollOffset = ScrollOffset { left: 0.0, top: 0.0 };

    pub const fn new(left: f64, top: f64) -> Self {
        Self { left, top }
    }

    /// Both axes finite and non-negative.
    pub fn sanitized(self) -> Self {
        let fix = |v: f64| if v.is_finite() { v.max(0.0) } else { 0.0 };
        Self { left: fix(self.left), top: fix(self.top) }
    }
}

/// Rendered (unscaled) box of a media item in scroll-content coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MediaBox {
    pub origin: Point,
    pub size: Size,
}

/// Vertical extent of a media item, used for nearest-to-center tracking.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MediaRect {
    pub id: MediaId,
    pub top: f64,
    pub height: f64,
}

/// Where inside the source thumbnail the user clicked, as a fraction of its
/// rendered box. Both axes are kept in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClickFraction {
    pub x: f64,
    pub y: f64,
}

impl ClickFraction {
    pub fn new(x: f64, y: f64) -> Self {
        let fix = |v: f64| if v.is_finite() { v.clamp(0.0, 1.0) } else { 0.5 };
        Self { x: fix(x), y: fix(y) }
    }

    /// Derive the fraction from a thumbnail rect and a client click position.
    /// Returns `None` for an empty rect.
    pub fn from_click(rect_left: f64, rect_top: f64, rect_width: f64, rect_height: f64, click_x: f64, click_y: f64) -> Option<Self> {
        if !(rect_width > 0.0 && rect_height > 0.0) {
            return None;
        }
        Some(Self::new(
            (click_x - rect_left) / rect_width,
            (click_y - rect_top) / rect_height,
        ))
    }
}

/// Pointer affordance shown over a media item.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Cursor {
    #[default]
    Default,
    Grab,
    Grabbing,
}

impl Cursor {
    pub fn css(&self) -> &'static str {
        match self {
            Cursor::Default => "",
            Cursor::Grab => "grab",
            Cursor::Grabbing => "grabbing",
        }
    }
}

/// Restore target handed back to the host page when the lightbox closes.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScrollHandoff {
    pub media_id: MediaId,
    pub outer_page_scroll_y: f64,
}
