//! Mode interactif : déplacement de l'image au clavier.

use std::io::{self, Write};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use arc_swap::ArcSwap;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal;
use hv_ansi::color::RESET_ALL;
use hv_ansi::cursor::move_down_start;
use hv_ansi::erase::erase_rect;
use hv_ansi::mode::{alternate_screen, auto_wrap, show_cursor};
use hv_core::config::ViewConfig;
use hv_core::geometry::{Point, Rect};
use hv_core::pixel::PixelBuffer;
use hv_core::traits::GridSize;
use hv_render::{Renderer, TerminalGrid};
use hv_source::resize::Resizer;

use crate::view::{build_request, covered_cells};

/// Event wait between two config checks.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Effet d'une touche.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    /// Move the image to this origin.
    Move(Point),
    /// Leave the loop.
    Quit,
    /// Nothing to do.
    Ignore,
}

/// Map a key press to an action. Arrows move by `step` pixels.
///
/// Vertical moves go by whole cells: an odd step is rounded up to the next
/// even pixel count.
#[must_use]
pub fn key_action(key: &KeyEvent, origin: Point, step: i32) -> Action {
    if key.kind != KeyEventKind::Press {
        return Action::Ignore;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Action::Quit,
            _ => Action::Ignore,
        };
    }
    let row_step = (step + 1) & !1;
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => Action::Quit,
        KeyCode::Left => Action::Move(Point::new(origin.x - step, origin.y)),
        KeyCode::Right => Action::Move(Point::new(origin.x + step, origin.y)),
        KeyCode::Up => Action::Move(Point::new(origin.x, origin.y - row_step)),
        KeyCode::Down => Action::Move(Point::new(origin.x, origin.y + row_step)),
        _ => Action::Ignore,
    }
}

/// Block until a key is pressed, in raw mode.
///
/// # Errors
/// Returns an error if the terminal cannot be driven.
pub fn wait_for_key() -> Result<()> {
    terminal::enable_raw_mode().context("Impossible de passer le terminal en mode brut")?;
    let result = loop {
        match event::read() {
            Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => break Ok(()),
            Ok(_) => {}
            Err(e) => break Err(e),
        }
    };
    let raw_off = terminal::disable_raw_mode();
    result?;
    raw_off?;
    Ok(())
}

/// Run the pan loop until the user quits.
///
/// The terminal is switched to raw mode for the duration of the loop and
/// restored on every exit path.
///
/// # Errors
/// Returns an error if the terminal cannot be driven or a frame fails.
pub fn run(config: &Arc<ArcSwap<ViewConfig>>, image: &PixelBuffer) -> Result<()> {
    let mut renderer = Renderer::new(Resizer::new(config.load().filter), TerminalGrid);
    let mut out = io::stdout().lock();

    terminal::enable_raw_mode().context("Impossible de passer le terminal en mode brut")?;
    let result = pan_loop(&mut renderer, config, image, &mut out);

    // Restaurer le terminal (TOUJOURS, même en cas d'erreur)
    let restored = restore(&mut out, &config.load());
    let raw_off = terminal::disable_raw_mode();

    result?;
    restored?;
    raw_off?;
    Ok(())
}

fn pan_loop(
    renderer: &mut Renderer<Resizer, TerminalGrid>,
    config: &Arc<ArcSwap<ViewConfig>>,
    image: &PixelBuffer,
    out: &mut impl Write,
) -> Result<()> {
    let mut current = config.load_full();
    let mut origin = Point::new(current.origin_x, current.origin_y);
    let mut previous: Option<Rect> = None;
    let mut dirty = true;

    loop {
        if dirty {
            previous = Some(draw(renderer, &current, image, origin, previous, out)?);
            dirty = false;
        }

        if event::poll(POLL_INTERVAL)? {
            match event::read()? {
                Event::Key(key) => match key_action(&key, origin, current.pan_step as i32) {
                    Action::Move(next) => {
                        let grid = renderer.grid().pixels()?;
                        let clamped = clamp_to_grid(next, previous, grid);
                        if clamped != origin {
                            origin = clamped;
                            dirty = true;
                        }
                    }
                    Action::Quit => break,
                    Action::Ignore => {}
                },
                Event::Resize(columns, rows) => {
                    log::debug!("pan: redimensionnement {columns}×{rows}");
                    dirty = true;
                }
                _ => {}
            }
        }

        let latest = config.load_full();
        if !Arc::ptr_eq(&latest, &current) {
            renderer.resampler_mut().set_filter(latest.filter);
            current = latest;
            dirty = true;
        }
    }
    Ok(())
}

/// Keep the origin where the last drawn image still fits.
fn clamp_to_grid(origin: Point, previous: Option<Rect>, grid: Point) -> Point {
    let Some(cells) = previous else {
        return origin;
    };
    let size = Point::new(cells.width(), cells.height() * 2);
    hv_core::geometry::clamp_origin(origin, size, grid)
}

/// Erase the previous image, draw one frame, return the cells it covers.
fn draw(
    renderer: &mut Renderer<Resizer, TerminalGrid>,
    config: &ViewConfig,
    image: &PixelBuffer,
    origin: Point,
    previous: Option<Rect>,
    out: &mut impl Write,
) -> Result<Rect> {
    let grid = renderer.grid().pixels()?;
    let mut request = build_request(config, image, grid);
    request.origin = origin;
    let frame = renderer.render(&request)?;

    let mut erase = Vec::new();
    if let Some(cells) = previous {
        erase_rect(&mut erase, cells);
    }
    out.write_all(&erase)?;
    out.write_all(&frame.bytes)?;
    out.flush()?;

    let cells = covered_cells(frame.origin, frame.image.width(), frame.image.height());
    renderer.recycle(frame);
    Ok(cells)
}

/// Reset colors, cursor and wrapping, then leave the alternate screen or go
/// below the image.
///
/// # Errors
/// Returns an error if writing to `out` fails.
pub fn restore(out: &mut impl Write, config: &ViewConfig) -> io::Result<()> {
    let mut bytes = Vec::new();
    bytes.extend_from_slice(RESET_ALL);
    bytes.extend_from_slice(show_cursor(true));
    bytes.extend_from_slice(auto_wrap(true));
    if config.ui.alternate_screen {
        bytes.extend_from_slice(alternate_screen(false));
    } else {
        move_down_start(&mut bytes, 1);
    }
    out.write_all(&bytes)?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use hv_core::config::UiSettings;

    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn arrows_move_by_step() {
        let origin = Point::new(10, 10);
        assert_eq!(key_action(&press(KeyCode::Left), origin, 2), Action::Move(Point::new(8, 10)));
        assert_eq!(key_action(&press(KeyCode::Right), origin, 2), Action::Move(Point::new(12, 10)));
        assert_eq!(key_action(&press(KeyCode::Up), origin, 4), Action::Move(Point::new(10, 6)));
        assert_eq!(key_action(&press(KeyCode::Down), origin, 4), Action::Move(Point::new(10, 14)));
        assert_eq!(key_action(&press(KeyCode::Char('a')), origin, 2), Action::Ignore);
    }

    #[test]
    fn odd_step_moves_whole_cells_vertically() {
        let origin = Point::new(10, 10);
        assert_eq!(key_action(&press(KeyCode::Down), origin, 1), Action::Move(Point::new(10, 12)));
        assert_eq!(key_action(&press(KeyCode::Up), origin, 3), Action::Move(Point::new(10, 6)));
        assert_eq!(key_action(&press(KeyCode::Right), origin, 1), Action::Move(Point::new(11, 10)));
    }

    #[test]
    fn step_one_vertical_press_changes_start_row() {
        let origin = Point::new(0, 0);
        let Action::Move(next) = key_action(&press(KeyCode::Down), origin, 1) else {
            panic!("déplacement attendu");
        };
        assert_ne!(hv_core::geometry::start_position(next), hv_core::geometry::start_position(origin));
    }

    #[test]
    fn quit_keys() {
        let origin = Point::default();
        assert_eq!(key_action(&press(KeyCode::Esc), origin, 2), Action::Quit);
        assert_eq!(key_action(&press(KeyCode::Char('q')), origin, 2), Action::Quit);
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(key_action(&ctrl_c, origin, 2), Action::Quit);
        let mut release = press(KeyCode::Esc);
        release.kind = KeyEventKind::Release;
        assert_eq!(key_action(&release, origin, 2), Action::Ignore);
    }

    #[test]
    fn origin_stops_at_grid_edge() {
        let cells = Some(Rect::new(0, 0, 20, 5));
        let grid = Point::new(80, 48);
        assert_eq!(clamp_to_grid(Point::new(70, 40), cells, grid), Point::new(60, 38));
        assert_eq!(clamp_to_grid(Point::new(-2, -2), cells, grid), Point::new(0, 0));
        assert_eq!(clamp_to_grid(Point::new(-2, 3), None, grid), Point::new(-2, 3));
    }

    #[test]
    fn restore_leaves_alternate_screen_only_when_entered() {
        let mut out = Vec::new();
        let config = ViewConfig::default();
        restore(&mut out, &config).unwrap();
        assert_eq!(out, b"\x1b[39;49m\x1b[?25h\x1b[?7h\x1b[1E");

        let mut out = Vec::new();
        let config = ViewConfig {
            ui: UiSettings {
                alternate_screen: true,
                ..UiSettings::default()
            },
            ..ViewConfig::default()
        };
        restore(&mut out, &config).unwrap();
        assert!(out.ends_with(b"\x1b[?1049l"));
    }
}
