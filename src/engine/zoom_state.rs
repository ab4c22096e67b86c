use std::collections::HashMap;
use crate::engine::geometry::ZoomBounds;
use crate::types::MediaId;

/// Zoom and pan of one image.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoomState {
    pub zoom: f64,
    pub pan_x: f64,
    pub pan_y: f64,
}

impl Default for ZoomState {
    fn default() -> Self {
        Self { zoom: 1.0, pan_x: 0.0, pan_y: 0.0 }
    }
}

/// Keyed store of per-image zoom state. Entries are created lazily on first
/// interaction and all dropped together when the lightbox closes.
#[derive(Debug, Default)]
pub struct ZoomStore {
    bounds: ZoomBounds,
    entries: HashMap<MediaId, ZoomState>,
}

impl ZoomStore {
    pub fn new(bounds: ZoomBounds) -> Self {
        Self { bounds, entries: HashMap::new() }
    }

    pub fn bounds(&self) -> ZoomBounds {
        self.bounds
    }

    /// State for `id`, inserting the default if it is not tracked yet.
    pub fn get(&mut self, id: MediaId) -> ZoomState {
        *self.entries.entry(id).or_default()
    }

    /// Current zoom without creating an entry.
    pub fn zoom(&self, id: MediaId) -> f64 {
        self.entries.get(&id).map(|s| s.zoom).unwrap_or(1.0)
    }

    pub fn peek(&self, id: MediaId) -> Option<&ZoomState> {
        self.entries.get(&id)
    }

    pub fn set(&mut self, id: MediaId, state: ZoomState) {
        let zoom = self.bounds.clamp(state.zoom);
        self.entries.insert(id, ZoomState { zoom, ..state });
    }

    pub fn set_pan(&mut self, id: MediaId, pan_x: f64, pan_y: f64) {
        let entry = self.entries.entry(id).or_default();
        entry.pan_x = pan_x;
        entry.pan_y = pan_y;
    }

    pub fn remove(&mut self, id: MediaId) -> Option<ZoomState> {
        self.entries.remove(&id)
    }

    /// Forget every entry. Returns the ids that were tracked so the caller
    /// can revert the visual transform on each of them.
    pub fn reset_all(&mut self) -> Vec<MediaId> {
        let mut ids: Vec<MediaId> = self.entries.drain().map(|(id, _)| id).collect();
        ids.sort();
        ids
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
