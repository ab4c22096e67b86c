//! Zoom, pan and lightbox engine for product image viewers.
//!
//! `engine` holds the platform-independent state machines, `dom` binds them
//! to a live page, and `components` wraps the whole thing in a leptos view.

pub mod components;
pub mod config;
pub mod dom;
pub mod engine;
pub mod error;
pub mod types;

pub use config::ViewerConfig;
pub use dom::DomLightbox;
pub use engine::session::{Gallery, HostModal, LightboxSession, SessionState};
pub use engine::viewport::{ScrollSurface, ViewportController};
pub use error::LightboxError;
pub use types::{ClickFraction, MediaId, ScrollHandoff};

/// Route `log` output to the browser console and panics to `console.error`.
pub fn init_logging(level: log::Level) -> Result<(), LightboxError> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(level).map_err(|_| LightboxError::Logger)
}
