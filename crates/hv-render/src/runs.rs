//! Déduplication des couleurs entre cellules voisines d'une même ligne.
//!
//! The pen left by the previous cell is reused when it already holds the
//! right colors. Only the layers that changed are re-emitted.

use hv_ansi::color::{paint_background, paint_foreground, push_char};
use hv_core::pixel::{BYTES_PER_PIXEL, Pixel};

use crate::glyph::Block;

/// Ce qu'il faut réémettre pour une cellule.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Run {
    /// Same colors as the left cell and upper equals lower: a bare space.
    Space,
    /// Same colors as the left cell: the glyph alone.
    GlyphOnly,
    /// Only the lower pixel changed: background code, then glyph.
    Background,
    /// Only the upper pixel changed: text color code, then glyph.
    Foreground,
    /// Nothing reusable: full encode.
    Full,
}

#[inline(always)]
fn same_pixel(pixels: &[u8], a: usize, b: usize) -> bool {
    match (
        pixels.get(a..a + BYTES_PER_PIXEL),
        pixels.get(b..b + BYTES_PER_PIXEL),
    ) {
        (Some(p), Some(q)) => p == q,
        _ => false,
    }
}

/// Compare the cell at `index` with its left neighbour.
///
/// `pixels` is the raw RGBA data, `stride` its row length in bytes. A
/// neighbour outside `pixels` counts as a different color.
///
/// # Example
/// ```
/// use hv_render::runs::{classify_run, Run};
/// let px = [7u8; 16]; // 2×2 uniforme
/// assert_eq!(classify_run(&px, 0, 8), Run::Full);
/// assert_eq!(classify_run(&px, 4, 8), Run::Space);
/// ```
#[must_use]
pub fn classify_run(pixels: &[u8], index: usize, stride: usize) -> Run {
    if stride == 0 || index.is_multiple_of(stride) {
        return Run::Full;
    }
    let lower = index + stride;
    let (upper_same, lower_same, vertical_same) =
        if lower + 3 < pixels.len() && index >= BYTES_PER_PIXEL {
            (
                same_pixel(pixels, index, index - BYTES_PER_PIXEL),
                same_pixel(pixels, lower, lower - BYTES_PER_PIXEL),
                same_pixel(pixels, index, lower),
            )
        } else {
            (false, false, false)
        };
    match (upper_same, lower_same, vertical_same) {
        (true, true, true) => Run::Space,
        (true, true, false) => Run::GlyphOnly,
        (true, false, _) => Run::Background,
        (false, true, _) => Run::Foreground,
        (false, false, _) => Run::Full,
    }
}

/// Write the elided form of a cell. Returns `false` for [`Run::Full`] or a
/// block without glyph, in which case nothing is written.
///
/// A uniform run of shade cells keeps its glyph: a space would show the
/// background color at full strength.
pub fn encode_run(buf: &mut Vec<u8>, run: Run, block: Block, upper: Pixel, lower: Pixel) -> bool {
    let Some(glyph) = block.glyph() else {
        return false;
    };
    match run {
        Run::Space if block.is_half() => buf.push(b' '),
        Run::Space | Run::GlyphOnly => push_char(buf, glyph),
        Run::Background => {
            paint_background(buf, lower);
            push_char(buf, glyph);
        }
        Run::Foreground => {
            paint_foreground(buf, upper);
            push_char(buf, glyph);
        }
        Run::Full => return false,
    }
    true
}
