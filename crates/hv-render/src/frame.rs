//! Assemblage d'une image complète : init, lignes de cellules, finalisation.
//!
//! Every cell row starts at `origin.x + 1` and covers two pixel rows. With an
//! odd image height the first cell row carries pixel row 0 alone in its lower
//! half, and pairing resumes from row 1.

use hv_ansi::color::{RESET_ALL, paint_rune};
use hv_ansi::cursor::{move_down_start, move_right, move_to, move_to_column, move_to_start};
use hv_ansi::erase::erase_screen_from_cursor;
use hv_ansi::mode::{alternate_screen, auto_wrap, show_cursor};
use hv_core::config::UiSettings;
use hv_core::geometry::{Point, final_position, start_position};
use hv_core::pixel::{Pixel, PixelBuffer};

use crate::glyph::{VerticalPhase, select_block};
use crate::runs::{classify_run, encode_run};

/// 1-based terminal coordinate, never below 1.
#[inline]
fn pos(v: i32) -> u32 {
    v.max(1) as u32
}

/// État d'une ligne de cellules en cours d'émission.
struct FrameContext {
    phase: VerticalPhase,
    /// The terminal pen holds the full colors of the previous cell.
    pen_valid: bool,
    /// Skipped cells not yet crossed with a cursor move.
    pending_skip: u32,
}

impl FrameContext {
    fn new(phase: VerticalPhase) -> Self {
        Self {
            phase,
            pen_valid: false,
            pending_skip: 0,
        }
    }

    fn start_row(&mut self) {
        self.pen_valid = false;
        self.pending_skip = 0;
    }

    fn flush_skip(&mut self, out: &mut Vec<u8>) {
        if self.pending_skip > 0 {
            move_right(out, self.pending_skip);
            self.pending_skip = 0;
        }
    }
}

/// Encode `image` as a complete frame appended to `out`.
///
/// `origin` is in grid pixel units and is expected to be clamped already;
/// `grid` is only used to decide whether the cursor must wrap after the
/// last row.
///
/// # Example
/// ```
/// use hv_core::config::UiSettings;
/// use hv_core::geometry::Point;
/// use hv_core::pixel::{Pixel, PixelBuffer};
/// use hv_render::frame::assemble;
///
/// let mut image = PixelBuffer::new(2, 2);
/// image.fill(Pixel::rgb(255, 0, 0));
/// let mut out = Vec::new();
/// assemble(&image, Point::new(0, 0), Point::new(80, 48), &UiSettings::default(), &mut out);
/// let text = String::from_utf8(out).unwrap();
/// assert_eq!(text.matches("\x1b[38;2;255;0;0;48;2;255;0;0m").count(), 1);
/// assert!(text.contains("\x1b[1;1H"));
/// assert!(text.ends_with("\x1b[1;3H"));
/// ```
pub fn assemble(image: &PixelBuffer, origin: Point, grid: Point, ui: &UiSettings, out: &mut Vec<u8>) {
    let phase = VerticalPhase::for_height(image.height());
    init(out, ui, origin);

    let mut ctx = FrameContext::new(phase);
    let mut y = 0;
    while y < image.height() {
        render_row(image, y, origin, &mut ctx, out);
        y = if y == 0 && ctx.phase.is_set() { 1 } else { y + 2 };
    }

    finalize(out, ui, image, origin, grid);
}

fn init(out: &mut Vec<u8>, ui: &UiSettings, origin: Point) {
    out.extend_from_slice(show_cursor(ui.show_cursor));
    out.extend_from_slice(alternate_screen(ui.alternate_screen));
    out.extend_from_slice(auto_wrap(ui.auto_wrap));
    if ui.erase_screen {
        move_to_start(out);
        erase_screen_from_cursor(out);
    }
    let (column, row) = start_position(origin);
    move_to(out, pos(column), pos(row));
}

fn render_row(image: &PixelBuffer, y: u32, origin: Point, ctx: &mut FrameContext, out: &mut Vec<u8>) {
    let stride = image.stride();
    let pixels = image.as_bytes();
    // Ligne fantôme : la rangée 0 seule, dans la moitié basse.
    let phantom = y == 0 && ctx.phase.is_set();
    ctx.start_row();

    for x in 0..image.width() {
        let index = image.index(x, y);
        let upper = image.pixel_at(index);
        let lower = if phantom {
            Pixel::TRANSPARENT
        } else {
            image.pixel(x, y + 1)
        };

        let block = select_block(upper, lower, index, stride, ctx.phase);
        let Some(glyph) = block.glyph() else {
            ctx.pending_skip += 1;
            ctx.pen_valid = false;
            continue;
        };
        ctx.flush_skip(out);

        if ctx.pen_valid && !phantom {
            let run = classify_run(pixels, index, stride);
            if encode_run(out, run, block, upper, lower) {
                continue;
            }
        }
        paint_rune(out, glyph, upper, lower, false);
        ctx.pen_valid = true;
    }

    out.extend_from_slice(RESET_ALL);
    move_down_start(out, 1);
    move_to_column(out, pos(origin.x + 1));
}

fn finalize(out: &mut Vec<u8>, ui: &UiSettings, image: &PixelBuffer, origin: Point, grid: Point) {
    out.extend_from_slice(show_cursor(true));
    if !ui.alternate_screen {
        out.extend_from_slice(alternate_screen(false));
    }
    out.extend_from_slice(auto_wrap(true));
    out.extend_from_slice(RESET_ALL);

    let (column, row) = final_position(image.width(), image.height(), origin);
    move_to(out, pos(column), pos(row));
    if origin.x + image.width() as i32 >= grid.x {
        move_down_start(out, 1);
    }
}
