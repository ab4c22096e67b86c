//! In-memory stand-ins for the DOM side, used by the engine tests.

use std::collections::{HashMap, HashSet};
use crate::engine::session::{Gallery, HostModal};
use crate::engine::viewport::ScrollSurface;
use crate::types::{Cursor, MediaBox, MediaId, MediaRect, Point, ScrollOffset, Size};

/// A scroll container holding images stacked at fixed origins. Scrolling is
/// clamped to the content extent, scaled images included, like a browser.
#[derive(Debug, Default)]
pub struct FakeSurface {
    pub viewport: Size,
    pub scroll: ScrollOffset,
    pub boxes: HashMap<MediaId, MediaBox>,
    pub ready: HashSet<MediaId>,
    pub transforms: HashMap<MediaId, f64>,
    pub cursors: HashMap<MediaId, Cursor>,
    /// Every value written through `set_scroll_offset`, in order.
    pub scroll_log: Vec<ScrollOffset>,
}

impl FakeSurface {
    pub fn new(viewport: Size) -> Self {
        Self { viewport, ..Default::default() }
    }

    /// Add a loaded image.
    pub fn with_image(mut self, id: MediaId, origin: Point, size: Size) -> Self {
        self.boxes.insert(id, MediaBox { origin, size });
        self.ready.insert(id);
        self
    }

    /// Add an image whose dimensions are not known yet.
    pub fn with_loading_image(mut self, id: MediaId, origin: Point) -> Self {
        self.boxes.insert(id, MediaBox { origin, size: Size::default() });
        self
    }

    /// Finish loading an image.
    pub fn load(&mut self, id: MediaId, size: Size) {
        if let Some(b) = self.boxes.get_mut(&id) {
            b.size = size;
        }
        self.ready.insert(id);
    }

    fn content_extent(&self) -> Size {
        let mut extent = Size::default();
        for (id, b) in &self.boxes {
            let z = self.transforms.get(id).copied().unwrap_or(1.0);
            extent.width = extent.width.max(b.origin.x + b.size.width * z);
            extent.height = extent.height.max(b.origin.y + b.size.height * z);
        }
        extent
    }
}

impl ScrollSurface for FakeSurface {
    fn viewport_size(&self) -> Size {
        self.viewport
    }

    fn scroll_offset(&self) -> ScrollOffset {
        self.scroll
    }

    fn set_scroll_offset(&mut self, offset: ScrollOffset) {
        let extent = self.content_extent();
        let max_left = (extent.width - self.viewport.width).max(0.0);
        let max_top = (extent.height - self.viewport.height).max(0.0);
        self.scroll = ScrollOffset::new(offset.left.clamp(0.0, max_left), offset.top.clamp(0.0, max_top));
        self.scroll_log.push(self.scroll);
    }

    fn media_box(&self, media: MediaId) -> Option<MediaBox> {
        self.boxes.get(&media).copied()
    }

    fn is_ready(&self, media: MediaId) -> bool {
        self.ready.contains(&media)
    }

    fn set_transform(&mut self, media: MediaId, zoom: Option<f64>) {
        match zoom {
            Some(z) => self.transforms.insert(media, z),
            None => self.transforms.remove(&media),
        };
    }

    fn set_cursor(&mut self, media: MediaId, cursor: Cursor) {
        self.cursors.insert(media, cursor);
    }

    fn media_layout(&self) -> Vec<MediaRect> {
        let mut rects: Vec<MediaRect> = self
            .boxes
            .iter()
            .map(|(id, b)| MediaRect { id: *id, top: b.origin.y, height: b.size.height })
            .collect();
        rects.sort_by(|a, b| a.top.total_cmp(&b.top));
        rects
    }
}

#[derive(Debug, Default)]
pub struct FakeModal {
    pub open: bool,
    pub shows: usize,
    pub hides: usize,
    pub focus_returns: usize,
}

impl HostModal for FakeModal {
    fn show(&mut self) {
        self.open = true;
        self.shows += 1;
    }

    fn hide(&mut self) {
        self.open = false;
        self.hides += 1;
    }

    fn is_open(&self) -> bool {
        self.open
    }

    fn restore_focus(&mut self) {
        self.focus_returns += 1;
    }
}

#[derive(Debug, Default)]
pub struct FakeGallery {
    pub page_y: f64,
    pub thumbnails: HashMap<MediaId, f64>,
    pub restores: Vec<f64>,
}

impl Gallery for FakeGallery {
    fn page_scroll_y(&self) -> f64 {
        self.page_y
    }

    fn thumbnail_page_y(&self, media: MediaId) -> Option<f64> {
        self.thumbnails.get(&media).copied()
    }

    fn restore_page_scroll(&mut self, y: f64) {
        self.page_y = y;
        self.restores.push(y);
    }
}
