//! Glyphes Unicode et seuils de transparence.

/// Bloc supérieur, la couleur de texte peint la moitié haute.
pub const UPPER_HALF_BLOCK: char = '▀';

/// Bloc inférieur, la couleur de texte peint la moitié basse.
pub const LOWER_HALF_BLOCK: char = '▄';

/// Rampe de transparence, du vide au plein.
pub const SHADE_RAMP: [char; 5] = [' ', '░', '▒', '▓', '█'];

/// Below this alpha a pixel is not drawn at all (1/5 of max alpha).
pub const ALPHA_BARELY_VISIBLE: u8 = 255 / 5;

/// Below this alpha a pixel only contributes to a shade glyph (4/5 of max alpha).
pub const ALPHA_MOSTLY_OPAQUE: u8 = ((255u16 * 4) / 5) as u8;

/// Index into [`SHADE_RAMP`] for an alpha value: `round(alpha / 255 * 4)`.
///
/// # Example
/// ```
/// use hv_ansi::glyph::shade_level;
/// assert_eq!(shade_level(0), 0);
/// assert_eq!(shade_level(128), 2);
/// assert_eq!(shade_level(255), 4);
/// ```
#[inline(always)]
#[must_use]
pub fn shade_level(alpha: u8) -> usize {
    let steps = (SHADE_RAMP.len() - 1) as f32;
    ((f32::from(alpha) / 255.0) * steps).round() as usize
}

/// Shade glyph for an alpha value.
#[inline(always)]
#[must_use]
pub fn block_shade(alpha: u8) -> char {
    SHADE_RAMP[shade_level(alpha).min(SHADE_RAMP.len() - 1)]
}

/// Mean of two alpha values, computed in 16 bits.
#[inline(always)]
#[must_use]
pub fn average_alpha(a: u8, b: u8) -> u8 {
    ((u16::from(a) + u16::from(b)) / 2) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thresholds() {
        assert_eq!(ALPHA_BARELY_VISIBLE, 51);
        assert_eq!(ALPHA_MOSTLY_OPAQUE, 204);
    }

    #[test]
    fn shade_is_monotonic_and_spans_ramp() {
        let mut prev = 0;
        for alpha in 0..=255u8 {
            let level = shade_level(alpha);
            assert!(level >= prev, "shade non monotone à alpha {alpha}");
            prev = level;
        }
        let levels: Vec<usize> = [0u8, 64, 128, 191, 255].iter().map(|&a| shade_level(a)).collect();
        assert_eq!(levels, vec![0, 1, 2, 3, 4]);
        assert_eq!(block_shade(191), '▓');
    }

    #[test]
    fn average_alpha_does_not_wrap() {
        assert_eq!(average_alpha(203, 203), 203);
        assert_eq!(average_alpha(255, 0), 127);
    }
}
