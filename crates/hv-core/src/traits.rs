use std::io;

use anyhow::Result;

use crate::geometry::Point;
use crate::pixel::PixelBuffer;

/// Redimensionne un buffer de pixels.
///
/// Implémenté par : `hv_source::resize::Resizer`.
///
/// `dst` is pre-allocated by the caller; its width and height define the
/// output size, its stride may be larger than `width * 4`. Implementations
/// must preserve per-pixel alpha.
///
/// # Example
/// ```
/// use hv_core::traits::Resampler;
/// use hv_core::pixel::PixelBuffer;
///
/// struct TopLeft;
/// impl Resampler for TopLeft {
///     fn scale(&mut self, src: &PixelBuffer, dst: &mut PixelBuffer) -> anyhow::Result<()> {
///         let p = src.pixel(0, 0);
///         dst.fill(p);
///         Ok(())
///     }
/// }
/// ```
pub trait Resampler {
    /// Scale `src` into `dst`.
    ///
    /// # Errors
    /// Returns an error if the backend rejects the dimensions.
    fn scale(&mut self, src: &PixelBuffer, dst: &mut PixelBuffer) -> Result<()>;
}

/// Fournit la taille courante de la grille du terminal.
///
/// Implémenté par : [`FixedGrid`], `hv_render::terminal::TerminalGrid`.
pub trait GridSize {
    /// Size in character cells: (columns, rows).
    ///
    /// # Errors
    /// Returns the OS error when the size cannot be queried.
    fn cells(&self) -> io::Result<(u16, u16)>;

    /// Size in pixel units: one pixel per column, two per row.
    ///
    /// # Errors
    /// Propagates the error of [`GridSize::cells`] unchanged.
    fn pixels(&self) -> io::Result<Point> {
        let (columns, rows) = self.cells()?;
        Ok(Point::new(i32::from(columns), i32::from(rows) * 2))
    }
}

/// Grille de taille fixe (sortie redirigée, tests).
///
/// # Example
/// ```
/// use hv_core::traits::{FixedGrid, GridSize};
/// use hv_core::geometry::Point;
/// let grid = FixedGrid::new(80, 24);
/// assert_eq!(grid.pixels().unwrap(), Point::new(80, 48));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FixedGrid {
    /// Columns.
    pub columns: u16,
    /// Rows.
    pub rows: u16,
}

impl FixedGrid {
    /// Terminal size used when nothing better is known.
    pub const FALLBACK: Self = Self::new(141, 29);

    /// Build a fixed grid.
    #[must_use]
    pub const fn new(columns: u16, rows: u16) -> Self {
        Self { columns, rows }
    }
}

impl GridSize for FixedGrid {
    fn cells(&self) -> io::Result<(u16, u16)> {
        Ok((self.columns, self.rows))
    }
}
