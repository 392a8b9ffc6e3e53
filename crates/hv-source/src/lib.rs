/// Image sources for halfview: file decoding and resampling.

pub mod image;
pub mod resize;

pub use crate::image::load_image;
pub use crate::resize::Resizer;
