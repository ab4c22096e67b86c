pub mod lightbox;

pub use lightbox::{Lightbox, LightboxItem, SignalModal};
