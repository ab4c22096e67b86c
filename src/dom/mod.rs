pub mod driver;
pub mod events;
pub mod surface;

pub use driver::DomLightbox;
pub use surface::{DomGallery, DomSurface, MEDIA_ATTR};
