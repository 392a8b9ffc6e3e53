use std::io;

use hv_core::traits::GridSize;

/// Taille de la grille lue sur le terminal courant via crossterm.
///
/// Each call queries the terminal again, so a resize is picked up by the
/// next frame.
#[derive(Clone, Copy, Debug, Default)]
pub struct TerminalGrid;

impl GridSize for TerminalGrid {
    fn cells(&self) -> io::Result<(u16, u16)> {
        crossterm::terminal::size()
    }
}
