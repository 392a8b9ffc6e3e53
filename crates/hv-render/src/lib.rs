/// Half-block frame rendering for halfview.
///
/// Glyph selection, color run elision and frame assembly on top of the
/// `hv-ansi` encoders, plus the [`Renderer`] entry point that scales the
/// image to its margin and hands back a pooled byte buffer.

pub mod error;
pub mod frame;
pub mod glyph;
pub mod renderer;
pub mod runs;
pub mod terminal;

pub use error::RenderError;
pub use frame::assemble;
pub use glyph::{Block, VerticalPhase, select_block};
pub use renderer::{RenderRequest, RenderedFrame, Renderer};
pub use runs::{Run, classify_run, encode_run};
pub use terminal::TerminalGrid;
