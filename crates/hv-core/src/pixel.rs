use crate::error::CoreError;

/// Octets par pixel (RGBA).
pub const BYTES_PER_PIXEL: usize = 4;

/// Un pixel RGBA 8 bits. Comparé alpha compris.
///
/// # Example
/// ```
/// use hv_core::pixel::Pixel;
/// let red = Pixel::rgba(255, 0, 0, 255);
/// assert_ne!(red, Pixel::rgba(255, 0, 0, 254));
/// assert_eq!(Pixel::TRANSPARENT.a, 0);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Pixel {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
    /// Alpha, 0 = fully transparent.
    pub a: u8,
}

impl Pixel {
    /// All channels zero.
    pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0);

    /// Build a pixel from its four channels.
    #[inline(always)]
    #[must_use]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque pixel.
    #[inline(always)]
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    /// Color channels without alpha.
    #[inline(always)]
    #[must_use]
    pub const fn rgb_tuple(self) -> (u8, u8, u8) {
        (self.r, self.g, self.b)
    }
}

/// Buffer de pixels RGBA row-major avec un stride explicite.
///
/// `stride` is the number of bytes between the starts of two consecutive
/// rows. It is a multiple of 4 and at least `width * 4`; pooled buffers keep
/// the stride of their size class, so rows may carry unused trailing bytes.
///
/// Every read is bounds-checked: an index outside the data yields
/// [`Pixel::TRANSPARENT`] instead of panicking.
///
/// # Example
/// ```
/// use hv_core::pixel::{Pixel, PixelBuffer};
/// let mut buf = PixelBuffer::new(2, 2);
/// buf.set_pixel(1, 1, Pixel::rgb(1, 2, 3));
/// assert_eq!(buf.pixel(1, 1), Pixel::rgb(1, 2, 3));
/// assert_eq!(buf.stride(), 8);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    data: Vec<u8>,
    width: u32,
    height: u32,
    stride: usize,
}

impl PixelBuffer {
    /// Crée un buffer contigu rempli de pixels transparents.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        let stride = width as usize * BYTES_PER_PIXEL;
        Self {
            data: vec![0u8; stride * height as usize],
            width,
            height,
            stride,
        }
    }

    /// Wrap existing RGBA bytes.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidStride`] if `stride` is not a multiple of 4
    /// or cannot hold `width` pixels, and [`CoreError::InvalidDimensions`] if
    /// `data` is too short for the requested bounds.
    ///
    /// # Example
    /// ```
    /// use hv_core::pixel::PixelBuffer;
    /// assert!(PixelBuffer::from_raw(vec![0; 16], 2, 2, 8).is_ok());
    /// assert!(PixelBuffer::from_raw(vec![0; 16], 2, 2, 6).is_err());
    /// assert!(PixelBuffer::from_raw(vec![0; 12], 2, 2, 8).is_err());
    /// ```
    pub fn from_raw(data: Vec<u8>, width: u32, height: u32, stride: usize) -> Result<Self, CoreError> {
        let row_bytes = width as usize * BYTES_PER_PIXEL;
        if !stride.is_multiple_of(BYTES_PER_PIXEL) || stride < row_bytes || (stride == 0 && height > 0) {
            return Err(CoreError::InvalidStride { stride, width });
        }
        let needed = if height == 0 {
            0
        } else {
            stride * (height as usize - 1) + row_bytes
        };
        if data.len() < needed {
            return Err(CoreError::InvalidDimensions { width, height });
        }
        Ok(Self {
            data,
            width,
            height,
            stride,
        })
    }

    /// Width in pixels.
    #[inline(always)]
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[inline(always)]
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Bytes per row.
    #[inline(always)]
    #[must_use]
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// `true` when the buffer has no visible pixel.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Bytes covering the visible rows, from the first pixel to the last one.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        if self.is_empty() {
            return &[];
        }
        let end = self.stride * (self.height as usize - 1) + self.width as usize * BYTES_PER_PIXEL;
        &self.data[..end.min(self.data.len())]
    }

    /// Full backing storage, trailing stride bytes included.
    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Mutable backing storage.
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Byte index of pixel (x, y).
    #[inline(always)]
    #[must_use]
    pub fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.stride + x as usize * BYTES_PER_PIXEL
    }

    /// Pixel starting at byte `index`, transparent when out of range.
    #[inline(always)]
    #[must_use]
    pub fn pixel_at(&self, index: usize) -> Pixel {
        let Some(end) = index.checked_add(BYTES_PER_PIXEL) else {
            return Pixel::TRANSPARENT;
        };
        match self.data.get(index..end) {
            Some(&[r, g, b, a]) => Pixel::rgba(r, g, b, a),
            _ => Pixel::TRANSPARENT,
        }
    }

    /// Accès au pixel (x, y).
    #[inline(always)]
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Pixel {
        if x >= self.width || y >= self.height {
            return Pixel::TRANSPARENT;
        }
        self.pixel_at(self.index(x, y))
    }

    /// Écrit le pixel (x, y). Ignoré hors limites.
    pub fn set_pixel(&mut self, x: u32, y: u32, pixel: Pixel) {
        if x >= self.width || y >= self.height {
            return;
        }
        let idx = self.index(x, y);
        if let Some(slot) = self.data.get_mut(idx..idx + BYTES_PER_PIXEL) {
            slot.copy_from_slice(&[pixel.r, pixel.g, pixel.b, pixel.a]);
        }
    }

    /// Paint every visible pixel with `pixel`.
    pub fn fill(&mut self, pixel: Pixel) {
        for y in 0..self.height {
            for x in 0..self.width {
                self.set_pixel(x, y, pixel);
            }
        }
    }

    /// Visible bytes of row `y` (`width * 4` long), empty when out of range.
    #[must_use]
    pub fn row(&self, y: u32) -> &[u8] {
        if y >= self.height {
            return &[];
        }
        let start = y as usize * self.stride;
        let end = start + self.width as usize * BYTES_PER_PIXEL;
        self.data.get(start..end).unwrap_or(&[])
    }

    /// Zero the whole backing storage.
    pub fn clear(&mut self) {
        self.data.fill(0);
    }

    /// Change the logical bounds, keeping the stride. Used by the pool.
    ///
    /// Returns `false` (and changes nothing) if the storage cannot hold them.
    pub(crate) fn reshape(&mut self, width: u32, height: u32) -> bool {
        let row_bytes = width as usize * BYTES_PER_PIXEL;
        if row_bytes > self.stride || self.stride * height as usize > self.data.len() {
            return false;
        }
        self.width = width;
        self.height = height;
        true
    }

    /// Allocated rows, independent of the logical height.
    pub(crate) fn capacity_rows(&self) -> usize {
        if self.stride == 0 {
            0
        } else {
            self.data.len() / self.stride
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_range_reads_are_transparent() {
        let mut buf = PixelBuffer::new(2, 1);
        buf.fill(Pixel::rgb(9, 9, 9));
        assert_eq!(buf.pixel(2, 0), Pixel::TRANSPARENT);
        assert_eq!(buf.pixel(0, 1), Pixel::TRANSPARENT);
        assert_eq!(buf.pixel_at(usize::MAX - 2), Pixel::TRANSPARENT);
        assert_eq!(buf.pixel_at(6), Pixel::TRANSPARENT);
        assert_eq!(buf.pixel_at(4), Pixel::rgb(9, 9, 9));
    }

    #[test]
    fn strided_rows_skip_padding() {
        let mut data = vec![0u8; 24];
        data[12..16].copy_from_slice(&[1, 2, 3, 4]);
        let buf = PixelBuffer::from_raw(data, 2, 2, 12).unwrap();
        assert_eq!(buf.pixel(0, 1), Pixel::rgba(1, 2, 3, 4));
        assert_eq!(buf.row(1), &[1, 2, 3, 4, 0, 0, 0, 0]);
        // 12 bytes of row 0 + 8 visible bytes of row 1
        assert_eq!(buf.as_bytes().len(), 20);
    }

    #[test]
    fn from_raw_rejects_bad_layouts() {
        assert!(matches!(
            PixelBuffer::from_raw(vec![0; 64], 4, 2, 12),
            Err(CoreError::InvalidStride { stride: 12, width: 4 })
        ));
        assert!(matches!(
            PixelBuffer::from_raw(vec![0; 64], 2, 2, 10),
            Err(CoreError::InvalidStride { .. })
        ));
        assert!(matches!(
            PixelBuffer::from_raw(vec![0; 8], 2, 2, 8),
            Err(CoreError::InvalidDimensions { width: 2, height: 2 })
        ));
        // Last row does not need its padding.
        assert!(PixelBuffer::from_raw(vec![0; 20], 2, 2, 12).is_ok());
    }

    #[test]
    fn reshape_keeps_stride() {
        let mut buf = PixelBuffer::new(4, 4);
        assert!(buf.reshape(2, 3));
        assert_eq!(buf.stride(), 16);
        assert_eq!((buf.width(), buf.height()), (2, 3));
        assert!(!buf.reshape(5, 1));
        assert!(!buf.reshape(4, 5));
        assert_eq!(buf.capacity_rows(), 4);
    }
}
