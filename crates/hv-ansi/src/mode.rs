//! Modes privés DEC : curseur, retour à la ligne automatique, écran alternatif.

/// Show (`?25h`) or hide (`?25l`) the cursor.
#[must_use]
pub fn show_cursor(show: bool) -> &'static [u8] {
    if show { b"\x1b[?25h" } else { b"\x1b[?25l" }
}

/// Enable (`?7h`) or disable (`?7l`) line auto-wrap.
#[must_use]
pub fn auto_wrap(active: bool) -> &'static [u8] {
    if active { b"\x1b[?7h" } else { b"\x1b[?7l" }
}

/// Enter (`?1049h`) or leave (`?1049l`) the alternate screen.
#[must_use]
pub fn alternate_screen(active: bool) -> &'static [u8] {
    if active {
        b"\x1b[?1049h"
    } else {
        b"\x1b[?1049l"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_sequences() {
        assert_eq!(show_cursor(false), b"\x1b[?25l");
        assert_eq!(auto_wrap(true), b"\x1b[?7h");
        assert_eq!(alternate_screen(false), b"\x1b[?1049l");
    }
}
