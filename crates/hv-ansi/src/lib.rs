/// ANSI/VT escape encoding for halfview.
///
/// True-color SGR sequences built from a compile-time digit table, the
/// half-block and shade glyphs, and the cursor, mode and erase sequences the
/// frame assembler needs. Every function appends to a caller-owned
/// `Vec<u8>`; nothing here allocates a buffer of its own.

pub mod color;
pub mod cursor;
pub mod digits;
pub mod erase;
pub mod glyph;
pub mod mode;

pub use color::{
    Layer, RESET_ALL, RESET_BACKGROUND, RESET_FOREGROUND, encode_color, encode_dual_color,
    paint_base, paint_rune,
};
pub use digits::digits;
pub use glyph::{LOWER_HALF_BLOCK, SHADE_RAMP, UPPER_HALF_BLOCK};

/// Control Sequence Introducer.
pub const CSI: &[u8] = b"\x1b[";
