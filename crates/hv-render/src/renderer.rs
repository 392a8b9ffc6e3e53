use std::borrow::Cow;
use std::sync::Arc;

use hv_core::config::UiSettings;
use hv_core::geometry::{Point, Rect, clamp_origin, clamp_rect, default_margin, scale_factor, scaled_size};
use hv_core::pixel::PixelBuffer;
use hv_core::pool::{BytePool, PixelPool};
use hv_core::traits::{GridSize, Resampler};

use crate::error::RenderError;
use crate::frame::assemble;

/// Ce que l'appelant demande d'afficher.
///
/// `margin` and `origin` are in grid pixel units (one column, half a row).
/// The renderer works on a copy; the caller's request is never modified.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderRequest<'a> {
    /// Source image, any stride.
    pub image: &'a PixelBuffer,
    /// Box the image is scaled to fit.
    pub margin: Rect,
    /// Requested top-left position.
    pub origin: Point,
    /// Terminal modes for this frame.
    pub ui: UiSettings,
    /// Allow scaling above 1.0 when the margin is larger than the image.
    pub allow_upscale: bool,
}

impl<'a> RenderRequest<'a> {
    /// Request at the origin with the default margin for `grid`.
    #[must_use]
    pub fn new(image: &'a PixelBuffer, grid: Point) -> Self {
        let bounds = Rect::from_size(image.width() as i32, image.height() as i32);
        Self {
            image,
            margin: default_margin(bounds, grid),
            origin: Point::default(),
            ui: UiSettings::default(),
            allow_upscale: false,
        }
    }
}

/// Résultat d'un rendu.
#[derive(Debug)]
pub struct RenderedFrame<'a> {
    /// Terminal bytes, ready to be written as is.
    pub bytes: Vec<u8>,
    /// Image actually encoded: borrowed when no scaling was needed.
    pub image: Cow<'a, PixelBuffer>,
    /// Origin after clamping to the grid.
    pub origin: Point,
}

/// Point d'entrée du rendu : géométrie, redimensionnement, encodage.
///
/// # Example
/// ```
/// use hv_core::geometry::Point;
/// use hv_core::pixel::{Pixel, PixelBuffer};
/// use hv_core::traits::{FixedGrid, Resampler};
/// use hv_render::{RenderRequest, Renderer};
///
/// struct Keep;
/// impl Resampler for Keep {
///     fn scale(&mut self, _: &PixelBuffer, _: &mut PixelBuffer) -> anyhow::Result<()> {
///         Ok(())
///     }
/// }
///
/// let mut image = PixelBuffer::new(2, 2);
/// image.fill(Pixel::rgb(255, 0, 0));
/// let mut renderer = Renderer::new(Keep, FixedGrid::new(80, 24));
/// let request = RenderRequest::new(&image, Point::new(80, 48));
/// let frame = renderer.render(&request).unwrap();
/// assert!(frame.bytes.ends_with(b"\x1b[1;3H"));
/// renderer.recycle(frame);
/// ```
pub struct Renderer<R, G> {
    resampler: R,
    grid: G,
    pixels: Arc<PixelPool>,
    output: Arc<BytePool>,
}

impl<R: Resampler, G: GridSize> Renderer<R, G> {
    /// Renderer with fresh pools.
    #[must_use]
    pub fn new(resampler: R, grid: G) -> Self {
        Self::with_pools(resampler, grid, Arc::new(PixelPool::new()), Arc::new(BytePool::new()))
    }

    /// Renderer sharing existing pools.
    #[must_use]
    pub fn with_pools(resampler: R, grid: G, pixels: Arc<PixelPool>, output: Arc<BytePool>) -> Self {
        Self {
            resampler,
            grid,
            pixels,
            output,
        }
    }

    /// Grid size provider.
    #[must_use]
    pub fn grid(&self) -> &G {
        &self.grid
    }

    /// Resampler, e.g. to change its filter between frames.
    pub fn resampler_mut(&mut self) -> &mut R {
        &mut self.resampler
    }

    /// Render one frame.
    ///
    /// # Errors
    /// - [`RenderError::Config`] for an empty image or margin,
    /// - [`RenderError::Geometry`] when the grid size cannot be queried,
    /// - [`RenderError::Resample`] when scaling fails,
    /// - [`RenderError::EmptyRender`] when nothing is left to draw.
    pub fn render<'a>(&mut self, request: &RenderRequest<'a>) -> Result<RenderedFrame<'a>, RenderError> {
        let mut req = request.clone();
        if req.image.is_empty() {
            return Err(RenderError::Config(format!(
                "image vide ({}×{})",
                req.image.width(),
                req.image.height()
            )));
        }
        if req.margin.width() <= 0 || req.margin.height() <= 0 {
            return Err(RenderError::Config(format!(
                "marge vide ({}×{})",
                req.margin.width(),
                req.margin.height()
            )));
        }

        let grid = self.grid.pixels()?;
        req.margin = clamp_rect(req.margin, grid);

        let (width, height) = (req.image.width(), req.image.height());
        let mut scale = scale_factor(req.margin, width, height);
        if !req.allow_upscale {
            scale = scale.min(1.0);
        }
        let (scaled_w, scaled_h) = scaled_size(width, height, scale);
        log::debug!(
            "render: {width}×{height} → {scaled_w}×{scaled_h} (échelle {scale:.3}, grille {}×{})",
            grid.x,
            grid.y
        );
        if scaled_w == 0 || scaled_h == 0 {
            return Err(RenderError::EmptyRender);
        }

        let image = if (scaled_w, scaled_h) == (width, height) {
            Cow::Borrowed(req.image)
        } else {
            let mut dst = self.pixels.acquire(scaled_w, scaled_h);
            if let Err(e) = self.resampler.scale(req.image, &mut dst) {
                self.pixels.release(dst);
                return Err(RenderError::Resample(e));
            }
            Cow::Owned(dst)
        };

        req.origin = clamp_origin(req.origin, Point::new(scaled_w as i32, scaled_h as i32), grid);

        let mut bytes = self.output.acquire();
        assemble(&image, req.origin, grid, &req.ui, &mut bytes);
        if bytes.is_empty() {
            self.output.release(bytes);
            if let Cow::Owned(buf) = image {
                self.pixels.release(buf);
            }
            return Err(RenderError::EmptyRender);
        }

        Ok(RenderedFrame {
            bytes,
            image,
            origin: req.origin,
        })
    }

    /// Hand the buffers of a finished frame back to the pools.
    pub fn recycle(&self, frame: RenderedFrame<'_>) {
        self.output.release(frame.bytes);
        if let Cow::Owned(buf) = frame.image {
            self.pixels.release(buf);
        }
    }
}
