//! Platform-independent core of the viewer. Nothing in here touches the
//! DOM; the `dom` module plugs web-sys implementations into the traits.

pub mod geometry;
pub mod gesture;
pub mod pinch;
pub mod ready;
pub mod session;
pub mod viewport;
pub mod zoom_state;

#[cfg(test)]
pub(crate) mod testing;
