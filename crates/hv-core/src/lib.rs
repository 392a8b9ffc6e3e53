/// Shared types, geometry, configuration and buffer pools for halfview.
///
/// This crate contains everything the encoder, the renderer and the
/// application agree on: pixels and pixel buffers, grid geometry, UI
/// settings, the TOML configuration and the collaborator traits.

pub mod config;
pub mod error;
pub mod geometry;
pub mod pixel;
pub mod pool;
pub mod traits;

pub use config::{Filter, UiSettings, ViewConfig};
pub use error::CoreError;
pub use geometry::{Point, Rect};
pub use pixel::{BYTES_PER_PIXEL, Pixel, PixelBuffer};
pub use pool::{BytePool, PixelPool};
pub use traits::{FixedGrid, GridSize, Resampler};
