use anyhow::{Context, Result};
use fast_image_resize::images::Image;
use fast_image_resize::{FilterType, PixelType, ResizeAlg, ResizeOptions, Resizer as FirResizer};
use hv_core::config::Filter;
use hv_core::pixel::{BYTES_PER_PIXEL, PixelBuffer};
use hv_core::traits::Resampler;

/// Resizer réutilisable wrappant fast_image_resize.
///
/// Source and destination rows are packed into scratch buffers, so any
/// stride is accepted on both sides. Alpha is premultiplied during the
/// convolution and restored afterwards.
///
/// # Example
/// ```
/// use hv_core::config::Filter;
/// use hv_core::pixel::{Pixel, PixelBuffer};
/// use hv_source::resize::Resizer;
///
/// let mut r = Resizer::new(Filter::Nearest);
/// let mut src = PixelBuffer::new(100, 100);
/// src.fill(Pixel::rgb(3, 4, 5));
/// let mut dst = PixelBuffer::new(50, 50);
/// r.resize_into(&src, &mut dst).unwrap();
/// assert_eq!(dst.pixel(49, 49), Pixel::rgb(3, 4, 5));
/// ```
pub struct Resizer {
    inner: FirResizer,
    filter: Filter,
    options: ResizeOptions,
    /// Lignes source contiguës (fast_image_resize exige `&mut`).
    src_buf: Vec<u8>,
    /// Lignes destination contiguës, recopiées au stride de `dst`.
    dst_buf: Vec<u8>,
}

fn options_for(filter: Filter) -> ResizeOptions {
    let alg = match filter {
        Filter::Nearest => ResizeAlg::Nearest,
        Filter::Bilinear => ResizeAlg::Convolution(FilterType::Bilinear),
        Filter::Lanczos3 => ResizeAlg::Convolution(FilterType::Lanczos3),
    };
    ResizeOptions::new().resize_alg(alg)
}

/// Copy the visible rows of `buf` back to back into `out`.
fn pack_rows(buf: &PixelBuffer, out: &mut Vec<u8>) {
    out.clear();
    for y in 0..buf.height() {
        out.extend_from_slice(buf.row(y));
    }
}

/// Copy contiguous rows from `rows` into `dst`, honoring its stride.
fn unpack_rows(rows: &[u8], dst: &mut PixelBuffer) {
    let row_bytes = dst.width() as usize * BYTES_PER_PIXEL;
    if row_bytes == 0 {
        return;
    }
    let stride = dst.stride();
    let data = dst.data_mut();
    for (y, row) in rows.chunks_exact(row_bytes).enumerate() {
        let start = y * stride;
        if let Some(slot) = data.get_mut(start..start + row_bytes) {
            slot.copy_from_slice(row);
        }
    }
}

impl Resizer {
    /// Create a resizer for `filter`.
    #[must_use]
    pub fn new(filter: Filter) -> Self {
        Self {
            inner: FirResizer::new(),
            filter,
            options: options_for(filter),
            src_buf: Vec::new(),
            dst_buf: Vec::new(),
        }
    }

    /// Current filter.
    #[must_use]
    pub fn filter(&self) -> Filter {
        self.filter
    }

    /// Switch filter for the next resize.
    pub fn set_filter(&mut self, filter: Filter) {
        if filter != self.filter {
            log::debug!("resize: filtre {:?} → {filter:?}", self.filter);
            self.filter = filter;
            self.options = options_for(filter);
        }
    }

    /// Resize `src` into `dst`. Dimensions of `dst` determine output size.
    ///
    /// # Errors
    /// Returns an error if either buffer is empty or the resize fails.
    pub fn resize_into(&mut self, src: &PixelBuffer, dst: &mut PixelBuffer) -> Result<()> {
        pack_rows(src, &mut self.src_buf);
        if src.width() == dst.width() && src.height() == dst.height() {
            unpack_rows(&self.src_buf, dst);
            return Ok(());
        }

        let dst_len = dst.width() as usize * dst.height() as usize * BYTES_PER_PIXEL;
        self.dst_buf.clear();
        self.dst_buf.resize(dst_len, 0);

        let src_image = Image::from_slice_u8(src.width(), src.height(), &mut self.src_buf, PixelType::U8x4)
            .context("Dimensions source invalides")?;
        let mut dst_image = Image::from_slice_u8(dst.width(), dst.height(), &mut self.dst_buf, PixelType::U8x4)
            .context("Dimensions destination invalides")?;

        self.inner
            .resize(&src_image, &mut dst_image, Some(&self.options))
            .context("Échec du redimensionnement")?;

        unpack_rows(&self.dst_buf, dst);
        Ok(())
    }
}

impl Default for Resizer {
    fn default() -> Self {
        Self::new(Filter::default())
    }
}

impl Resampler for Resizer {
    fn scale(&mut self, src: &PixelBuffer, dst: &mut PixelBuffer) -> Result<()> {
        self.resize_into(src, dst)
    }
}

#[cfg(test)]
mod tests {
    use hv_core::pixel::Pixel;
    use hv_core::pool::PixelPool;

    use super::*;

    fn checker(width: u32, height: u32) -> PixelBuffer {
        let mut buf = PixelBuffer::new(width, height);
        for y in 0..height {
            for x in 0..width {
                let p = if (x + y).is_multiple_of(2) { Pixel::rgb(255, 0, 0) } else { Pixel::rgba(0, 0, 255, 0) };
                buf.set_pixel(x, y, p);
            }
        }
        buf
    }

    #[test]
    fn nearest_upscale_replicates_pixels() {
        let src = checker(2, 2);
        let mut dst = PixelBuffer::new(4, 4);
        Resizer::new(Filter::Nearest).resize_into(&src, &mut dst).unwrap();
        assert_eq!(dst.pixel(0, 0), Pixel::rgb(255, 0, 0));
        assert_eq!(dst.pixel(1, 1), Pixel::rgb(255, 0, 0));
        assert_eq!(dst.pixel(3, 0).a, 0);
        assert_eq!(dst.pixel(3, 3), Pixel::rgb(255, 0, 0));
    }

    #[test]
    fn strided_destination_matches_tight_one() {
        let src = checker(37, 23);
        let mut tight = PixelBuffer::new(20, 11);
        let pool = PixelPool::new();
        let mut pooled = pool.acquire(20, 11);
        assert!(pooled.stride() > 20 * 4);

        let mut r = Resizer::new(Filter::Bilinear);
        r.resize_into(&src, &mut tight).unwrap();
        r.resize_into(&src, &mut pooled).unwrap();
        for y in 0..11 {
            assert_eq!(tight.row(y), pooled.row(y), "ligne {y}");
        }
    }

    #[test]
    fn same_size_copies_rows() {
        let src = checker(5, 3);
        let pool = PixelPool::new();
        let mut dst = pool.acquire(5, 3);
        Resizer::default().scale(&src, &mut dst).unwrap();
        for y in 0..3 {
            assert_eq!(src.row(y), dst.row(y));
        }
    }

    #[test]
    fn uniform_image_survives_lanczos() {
        let mut src = PixelBuffer::new(64, 64);
        src.fill(Pixel::rgba(200, 100, 50, 255));
        let mut dst = PixelBuffer::new(10, 7);
        let mut r = Resizer::new(Filter::Nearest);
        r.set_filter(Filter::Lanczos3);
        assert_eq!(r.filter(), Filter::Lanczos3);
        r.resize_into(&src, &mut dst).unwrap();
        let p = dst.pixel(5, 3);
        assert!(p.r.abs_diff(200) <= 1 && p.g.abs_diff(100) <= 1 && p.b.abs_diff(50) <= 1);
        assert_eq!(p.a, 255);
    }

    #[test]
    fn transparent_source_stays_transparent() {
        let src = PixelBuffer::new(16, 16);
        let mut dst = PixelBuffer::new(4, 4);
        Resizer::new(Filter::Bilinear).resize_into(&src, &mut dst).unwrap();
        assert!((0..4).all(|y| (0..4).all(|x| dst.pixel(x, y).a == 0)));
    }
}
