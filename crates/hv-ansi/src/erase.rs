//! Effacement d'écran, de ligne et de zones.

use hv_core::geometry::Rect;

use crate::cursor::{move_down, move_to, move_to_column};

/// Erase from the cursor to the end of the screen.
pub const ERASE_FROM_CURSOR: &[u8] = b"\x1b[0J";
/// Erase the whole screen.
pub const ERASE_SCREEN: &[u8] = b"\x1b[2J";
/// Erase the whole current line.
pub const ERASE_LINE: &[u8] = b"\x1b[2K";

/// Append [`ERASE_FROM_CURSOR`].
pub fn erase_screen_from_cursor(buf: &mut Vec<u8>) {
    buf.extend_from_slice(ERASE_FROM_CURSOR);
}

/// Append [`ERASE_SCREEN`].
pub fn erase_screen(buf: &mut Vec<u8>) {
    buf.extend_from_slice(ERASE_SCREEN);
}

/// Append [`ERASE_LINE`].
pub fn erase_line(buf: &mut Vec<u8>) {
    buf.extend_from_slice(ERASE_LINE);
}

/// Blank the 1-based columns `from..=to` of the current line with spaces.
///
/// Bounds may be given in either order. The cursor ends on `from`.
///
/// # Example
/// ```
/// use hv_ansi::erase::erase_block;
/// let mut buf = Vec::new();
/// erase_block(&mut buf, 5, 3);
/// assert_eq!(buf, b"\x1b[3G   \x1b[3G");
/// ```
pub fn erase_block(buf: &mut Vec<u8>, from: u32, to: u32) {
    let (from, to) = if from <= to { (from, to) } else { (to, from) };
    move_to_column(buf, from);
    buf.resize(buf.len() + (to - from + 1) as usize, b' ');
    move_to_column(buf, from);
}

/// Blank a rectangle given in cells, 0-based and half-open.
///
/// The cursor ends on the top-left cell of the rectangle. Empty or inverted
/// rectangles append nothing.
pub fn erase_rect(buf: &mut Vec<u8>, cells: Rect) {
    if cells.width() <= 0 || cells.height() <= 0 {
        return;
    }
    let left = (cells.min.x.max(0) + 1) as u32;
    let right = cells.max.x.max(0) as u32;
    let top = (cells.min.y.max(0) + 1) as u32;
    let bottom = cells.max.y.max(0) as u32;
    if right < left || bottom < top {
        return;
    }
    move_to(buf, left, top);
    for row in top..=bottom {
        erase_block(buf, left, right);
        if row < bottom {
            move_down(buf, 1);
        }
    }
    move_to(buf, left, top);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn erase_block_swaps_reversed_bounds() {
        let mut a = Vec::new();
        erase_block(&mut a, 2, 4);
        let mut b = Vec::new();
        erase_block(&mut b, 4, 2);
        assert_eq!(a, b);
        assert_eq!(a, b"\x1b[2G   \x1b[2G");
    }

    #[test]
    fn erase_rect_covers_every_row() {
        let mut buf = Vec::new();
        erase_rect(&mut buf, Rect::new(1, 0, 3, 2));
        assert_eq!(
            buf,
            b"\x1b[1;2H\x1b[2G  \x1b[2G\x1b[1B\x1b[2G  \x1b[2G\x1b[1;2H"
        );
    }

    #[test]
    fn empty_rect_is_noop() {
        let mut buf = Vec::new();
        erase_rect(&mut buf, Rect::new(4, 4, 4, 9));
        erase_rect(&mut buf, Rect::new(4, 4, 2, 9));
        assert!(buf.is_empty());
    }

    #[test]
    fn offscreen_rect_is_noop() {
        let mut buf = Vec::new();
        erase_rect(&mut buf, Rect::new(-5, 0, -2, 1));
        erase_rect(&mut buf, Rect::new(0, -6, 3, -1));
        assert!(buf.is_empty());
    }

    #[test]
    fn rect_straddling_origin_is_cut_at_first_cell() {
        let mut buf = Vec::new();
        erase_rect(&mut buf, Rect::new(-3, 0, 2, 1));
        assert_eq!(buf, b"\x1b[1;1H\x1b[1G  \x1b[1G\x1b[1;1H");
    }

    #[test]
    fn screen_and_line() {
        let mut buf = Vec::new();
        erase_screen_from_cursor(&mut buf);
        erase_screen(&mut buf);
        erase_line(&mut buf);
        assert_eq!(buf, b"\x1b[0J\x1b[2J\x1b[2K");
    }
}
