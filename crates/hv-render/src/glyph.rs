//! Choix du glyphe pour une cellule (deux pixels empilés).

use hv_ansi::glyph::{
    ALPHA_BARELY_VISIBLE, ALPHA_MOSTLY_OPAQUE, LOWER_HALF_BLOCK, SHADE_RAMP, UPPER_HALF_BLOCK,
    average_alpha, shade_level,
};
use hv_core::pixel::Pixel;

/// Décalage vertical de l'image dans les cellules.
///
/// With an odd height the first pixel row sits alone in the lower half of
/// the first cell row.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum VerticalPhase {
    /// Pixel rows pair up from row 0.
    #[default]
    Even,
    /// Row 0 is drawn alone, pairing resumes from row 1.
    Odd,
}

impl VerticalPhase {
    /// Phase of an image of the given height.
    #[must_use]
    pub const fn for_height(height: u32) -> Self {
        if height % 2 == 1 { Self::Odd } else { Self::Even }
    }

    /// `true` for [`VerticalPhase::Odd`].
    #[must_use]
    pub const fn is_set(self) -> bool {
        matches!(self, Self::Odd)
    }
}

/// Contenu d'une cellule.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Block {
    /// Both pixels nearly invisible: nothing is drawn.
    Skip,
    /// Both pixels translucent: shade glyph at this ramp level.
    Shade(usize),
    /// `▀`, upper pixel as text color, lower pixel as background.
    UpperHalf,
    /// `▄`, used for the lone first row of an odd-height image.
    LowerHalf,
}

impl Block {
    /// Character to print, `None` for [`Block::Skip`].
    #[must_use]
    pub fn glyph(self) -> Option<char> {
        match self {
            Self::Skip => None,
            Self::Shade(level) => Some(SHADE_RAMP[level.min(SHADE_RAMP.len() - 1)]),
            Self::UpperHalf => Some(UPPER_HALF_BLOCK),
            Self::LowerHalf => Some(LOWER_HALF_BLOCK),
        }
    }

    /// `true` for the two half-block variants.
    #[must_use]
    pub const fn is_half(self) -> bool {
        matches!(self, Self::UpperHalf | Self::LowerHalf)
    }
}

/// Pick the block for a cell whose upper pixel starts at byte `index`.
///
/// # Example
/// ```
/// use hv_core::pixel::Pixel;
/// use hv_render::glyph::{select_block, Block, VerticalPhase};
///
/// let red = Pixel::rgb(255, 0, 0);
/// assert_eq!(select_block(red, red, 0, 8, VerticalPhase::Even), Block::UpperHalf);
/// assert_eq!(select_block(red, Pixel::TRANSPARENT, 0, 8, VerticalPhase::Odd), Block::LowerHalf);
/// assert_eq!(select_block(Pixel::TRANSPARENT, Pixel::TRANSPARENT, 0, 8, VerticalPhase::Even), Block::Skip);
/// ```
#[inline]
#[must_use]
pub fn select_block(upper: Pixel, lower: Pixel, index: usize, stride: usize, phase: VerticalPhase) -> Block {
    if upper.a < ALPHA_MOSTLY_OPAQUE && lower.a < ALPHA_MOSTLY_OPAQUE {
        if upper.a < ALPHA_BARELY_VISIBLE && lower.a < ALPHA_BARELY_VISIBLE {
            return Block::Skip;
        }
        return Block::Shade(shade_level(average_alpha(upper.a, lower.a)));
    }
    if index < stride && phase.is_set() {
        return Block::LowerHalf;
    }
    Block::UpperHalf
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn translucent_pairs_become_shades() {
        let half = Pixel::rgba(10, 10, 10, 128);
        let b = select_block(half, half, 40, 8, VerticalPhase::Even);
        assert_eq!(b, Block::Shade(2));
        assert_eq!(b.glyph(), Some('▒'));

        // 203 + 203 ne déborde pas
        let almost = Pixel::rgba(0, 0, 0, 203);
        assert_eq!(select_block(almost, almost, 0, 8, VerticalPhase::Even), Block::Shade(3));
    }

    #[test]
    fn one_visible_pixel_is_enough_for_a_shade() {
        let faint = Pixel::rgba(1, 2, 3, 60);
        let b = select_block(faint, Pixel::TRANSPARENT, 0, 8, VerticalPhase::Even);
        assert_eq!(b, Block::Shade(0));
        assert_eq!(b.glyph(), Some(' '));
    }

    #[test]
    fn phase_only_affects_first_row() {
        let red = Pixel::rgb(255, 0, 0);
        assert_eq!(select_block(red, red, 4, 8, VerticalPhase::Odd), Block::LowerHalf);
        assert_eq!(select_block(red, red, 8, 8, VerticalPhase::Odd), Block::UpperHalf);
        assert_eq!(select_block(red, red, 4, 8, VerticalPhase::Even), Block::UpperHalf);
    }

    #[test]
    fn phase_from_height() {
        assert!(VerticalPhase::for_height(3).is_set());
        assert!(VerticalPhase::for_height(1).is_set());
        assert!(!VerticalPhase::for_height(2).is_set());
        assert_eq!(Block::Skip.glyph(), None);
    }
}
