//! Déplacements du curseur (séquences CSI standard, coordonnées 1-based).

use crate::CSI;
use crate::digits::push_decimal;

#[inline]
fn push_csi(buf: &mut Vec<u8>, n: u32, final_byte: u8) {
    buf.extend_from_slice(CSI);
    push_decimal(buf, n);
    buf.push(final_byte);
}

/// Move to (1, 1).
pub fn move_to_start(buf: &mut Vec<u8>) {
    buf.extend_from_slice(b"\x1b[H");
}

/// Move up `lines`.
pub fn move_up(buf: &mut Vec<u8>, lines: u32) {
    push_csi(buf, lines, b'A');
}

/// Move down `lines`, same column.
pub fn move_down(buf: &mut Vec<u8>, lines: u32) {
    push_csi(buf, lines, b'B');
}

/// Move right `columns`.
pub fn move_right(buf: &mut Vec<u8>, columns: u32) {
    push_csi(buf, columns, b'C');
}

/// Move left `columns`.
pub fn move_left(buf: &mut Vec<u8>, columns: u32) {
    push_csi(buf, columns, b'D');
}

/// Move down `lines` and to the first column.
pub fn move_down_start(buf: &mut Vec<u8>, lines: u32) {
    push_csi(buf, lines, b'E');
}

/// Move to `column` on the current line.
pub fn move_to_column(buf: &mut Vec<u8>, column: u32) {
    push_csi(buf, column, b'G');
}

/// Move to (`column`, `row`). The sequence carries the row first.
///
/// # Example
/// ```
/// use hv_ansi::cursor::move_to;
/// let mut buf = Vec::new();
/// move_to(&mut buf, 12, 3);
/// assert_eq!(buf, b"\x1b[3;12H");
/// ```
pub fn move_to(buf: &mut Vec<u8>, column: u32, row: u32) {
    buf.extend_from_slice(CSI);
    push_decimal(buf, row);
    buf.push(b';');
    push_decimal(buf, column);
    buf.push(b'H');
}
