//! Séquences SGR true-color.
//!
//! `ESC[38;2;R;G;Bm` sets the text (foreground) color, `ESC[48;2;R;G;Bm`
//! the background. Both can share one sequence:
//! `ESC[38;2;255;82;197;48;2;155;106;0m` paints pink text on brown.

use hv_core::pixel::Pixel;

use crate::digits::digits;
use crate::glyph::ALPHA_BARELY_VISIBLE;

const PREFIX_FG: &[u8] = b"\x1b[38;2;";
const PREFIX_BG: &[u8] = b"\x1b[48;2;";
const CHAIN_BG: &[u8] = b"48;2;";

/// Restore default text and background colors.
pub const RESET_ALL: &[u8] = b"\x1b[39;49m";
/// Restore the default text color.
pub const RESET_FOREGROUND: &[u8] = b"\x1b[39m";
/// Restore the default background color.
pub const RESET_BACKGROUND: &[u8] = b"\x1b[49m";

/// Couche colorée par une séquence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Layer {
    /// Text color, SGR 38.
    Foreground,
    /// Background color, SGR 48.
    Background,
}

#[inline(always)]
fn push_component(buf: &mut Vec<u8>, value: u8, terminator: u8) {
    buf.extend_from_slice(digits(value));
    buf.push(terminator);
}

/// Append the true-color sequence for one layer.
///
/// # Example
/// ```
/// use hv_ansi::color::{encode_color, Layer};
/// let mut buf = Vec::new();
/// encode_color(&mut buf, 255, 82, 197, Layer::Foreground);
/// assert_eq!(buf, b"\x1b[38;2;255;82;197m");
/// ```
#[inline(always)]
pub fn encode_color(buf: &mut Vec<u8>, r: u8, g: u8, b: u8, layer: Layer) {
    buf.extend_from_slice(match layer {
        Layer::Foreground => PREFIX_FG,
        Layer::Background => PREFIX_BG,
    });
    push_component(buf, r, b';');
    push_component(buf, g, b';');
    push_component(buf, b, b'm');
}

/// Append one sequence setting text then background color.
///
/// # Example
/// ```
/// use hv_ansi::color::encode_dual_color;
/// let mut buf = Vec::new();
/// encode_dual_color(&mut buf, (255, 82, 197), (155, 106, 0));
/// assert_eq!(buf, b"\x1b[38;2;255;82;197;48;2;155;106;0m");
/// ```
#[inline(always)]
pub fn encode_dual_color(buf: &mut Vec<u8>, fg: (u8, u8, u8), bg: (u8, u8, u8)) {
    buf.extend_from_slice(PREFIX_FG);
    push_component(buf, fg.0, b';');
    push_component(buf, fg.1, b';');
    push_component(buf, fg.2, b';');
    buf.extend_from_slice(CHAIN_BG);
    push_component(buf, bg.0, b';');
    push_component(buf, bg.1, b';');
    push_component(buf, bg.2, b'm');
}

/// Bytes restoring both default colors.
#[must_use]
pub fn reset_all() -> &'static [u8] {
    RESET_ALL
}

/// Bytes restoring the default text color.
#[must_use]
pub fn reset_foreground() -> &'static [u8] {
    RESET_FOREGROUND
}

/// Bytes restoring the default background color.
#[must_use]
pub fn reset_background() -> &'static [u8] {
    RESET_BACKGROUND
}

/// Un pixel est peint s'il dépasse le seuil « à peine visible ».
#[inline(always)]
#[must_use]
pub fn is_visible(pixel: Pixel) -> bool {
    pixel.a > ALPHA_BARELY_VISIBLE
}

/// Set the text color to `fg`, or to the default when `fg` is not visible.
#[inline(always)]
pub fn paint_foreground(buf: &mut Vec<u8>, fg: Pixel) {
    if is_visible(fg) {
        encode_color(buf, fg.r, fg.g, fg.b, Layer::Foreground);
    } else {
        buf.extend_from_slice(RESET_FOREGROUND);
    }
}

/// Set the background color to `bg`, or to the default when `bg` is not visible.
#[inline(always)]
pub fn paint_background(buf: &mut Vec<u8>, bg: Pixel) {
    if is_visible(bg) {
        encode_color(buf, bg.r, bg.g, bg.b, Layer::Background);
    } else {
        buf.extend_from_slice(RESET_BACKGROUND);
    }
}

/// Set both layers for a cell.
///
/// Two visible pixels share one dual sequence. Otherwise the visible layer
/// gets its color and the other one is reset, so the terminal pen depends
/// only on this cell and never on what was painted before.
///
/// # Example
/// ```
/// use hv_ansi::color::paint_base;
/// use hv_core::pixel::Pixel;
/// let mut buf = Vec::new();
/// paint_base(&mut buf, Pixel::rgb(1, 2, 3), Pixel::TRANSPARENT);
/// assert_eq!(buf, b"\x1b[38;2;1;2;3m\x1b[49m");
/// ```
#[inline(always)]
pub fn paint_base(buf: &mut Vec<u8>, fg: Pixel, bg: Pixel) {
    match (is_visible(fg), is_visible(bg)) {
        (true, true) => encode_dual_color(buf, fg.rgb_tuple(), bg.rgb_tuple()),
        (true, false) => {
            paint_foreground(buf, fg);
            buf.extend_from_slice(RESET_BACKGROUND);
        }
        (false, true) => {
            paint_background(buf, bg);
            buf.extend_from_slice(RESET_FOREGROUND);
        }
        (false, false) => buf.extend_from_slice(RESET_ALL),
    }
}

/// Append a character as UTF-8.
#[inline(always)]
pub fn push_char(buf: &mut Vec<u8>, ch: char) {
    let mut tmp = [0u8; 4];
    buf.extend_from_slice(ch.encode_utf8(&mut tmp).as_bytes());
}

/// Paint one character with its colors, optionally resetting afterwards.
///
/// # Example
/// ```
/// use hv_ansi::color::paint_rune;
/// use hv_core::pixel::Pixel;
/// let mut buf = Vec::new();
/// paint_rune(&mut buf, '▀', Pixel::rgb(255, 0, 0), Pixel::rgb(0, 0, 255), true);
/// assert_eq!(buf, "\x1b[38;2;255;0;0;48;2;0;0;255m▀\x1b[39;49m".as_bytes());
/// ```
#[inline(always)]
pub fn paint_rune(buf: &mut Vec<u8>, ch: char, fg: Pixel, bg: Pixel, reset: bool) {
    paint_base(buf, fg, bg);
    push_char(buf, ch);
    if reset {
        buf.extend_from_slice(RESET_ALL);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_literal_format() {
        for (r, g, b) in [(0, 0, 0), (9, 10, 99), (100, 200, 255), (255, 82, 197)] {
            for (layer, code) in [(Layer::Foreground, 38), (Layer::Background, 48)] {
                let mut buf = Vec::new();
                encode_color(&mut buf, r, g, b, layer);
                assert_eq!(buf, format!("\x1b[{code};2;{r};{g};{b}m").as_bytes());
            }
        }
    }

    #[test]
    fn encoding_is_idempotent_and_appends() {
        let mut first = Vec::new();
        encode_color(&mut first, 12, 34, 56, Layer::Background);
        let mut second = Vec::new();
        encode_color(&mut second, 12, 34, 56, Layer::Background);
        assert_eq!(first, second);

        let mut buf = b"x".to_vec();
        encode_color(&mut buf, 1, 2, 3, Layer::Foreground);
        assert!(buf.starts_with(b"x\x1b[38;2;"));
    }

    #[test]
    fn dual_equals_chained_single_codes() {
        let fg = (255, 0, 17);
        let bg = (3, 140, 255);
        let mut dual = Vec::new();
        encode_dual_color(&mut dual, fg, bg);

        let mut expected = Vec::new();
        encode_color(&mut expected, fg.0, fg.1, fg.2, Layer::Foreground);
        expected.pop();
        expected.push(b';');
        expected.extend_from_slice(b"48;2;");
        expected.extend_from_slice(digits(bg.0));
        expected.push(b';');
        expected.extend_from_slice(digits(bg.1));
        expected.push(b';');
        expected.extend_from_slice(digits(bg.2));
        expected.push(b'm');
        assert_eq!(dual, expected);
    }

    #[test]
    fn resets() {
        assert_eq!(reset_all(), b"\x1b[39;49m");
        assert_eq!(reset_foreground(), b"\x1b[39m");
        assert_eq!(reset_background(), b"\x1b[49m");
    }

    #[test]
    fn paint_base_resets_invisible_layers() {
        let opaque = Pixel::rgb(10, 20, 30);
        let faint = Pixel::rgba(10, 20, 30, 51);

        let mut buf = Vec::new();
        paint_base(&mut buf, faint, opaque);
        assert_eq!(buf, b"\x1b[48;2;10;20;30m\x1b[39m");

        buf.clear();
        paint_base(&mut buf, faint, faint);
        assert_eq!(buf, RESET_ALL);

        buf.clear();
        paint_base(&mut buf, opaque, Pixel::rgba(1, 1, 1, 52));
        assert_eq!(buf, b"\x1b[38;2;10;20;30;48;2;1;1;1m");
    }
}
