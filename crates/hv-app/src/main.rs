use std::io::{self, Write};
use std::sync::Arc;

use anyhow::{Context, Result};
use arc_swap::ArcSwap;
use clap::Parser;
use hv_core::config::ViewConfig;
use hv_core::pixel::PixelBuffer;
use hv_core::traits::{FixedGrid, GridSize};
use hv_render::{Renderer, TerminalGrid};
use hv_source::resize::Resizer;

pub mod cli;
pub mod hotreload;
pub mod pan;
pub mod view;

fn main() -> Result<()> {
    // 1. Parser CLI
    let cli = cli::Cli::parse();

    // 2. Initialiser le logging (stderr, jamais mêlé aux octets de l'image)
    env_logger::Builder::new()
        .filter_level(cli.log_level.parse().unwrap_or(log::LevelFilter::Warn))
        .target(env_logger::Target::Stderr)
        .init();

    // 3. Charger la config puis appliquer les overrides CLI
    let mut config = resolve_config(&cli)?;
    cli.apply_overrides(&mut config);

    // 4. Charger l'image
    let image = hv_source::load_image(&cli.image)?;

    if !cli.pan {
        let grid = cli.grid.unwrap_or_else(detect_grid);
        return print_once(&config, &image, grid);
    }

    if cli.grid.is_some() {
        log::warn!("--grid ignoré en mode interactif, la taille du terminal fait foi.");
    }
    let config = Arc::new(ArcSwap::from_pointee(config));

    // 5. Hot-reload de la config pendant le mode interactif
    let _watcher = if cli.config.exists() {
        let overrides = cli.clone();
        Some(hotreload::spawn_config_watcher(&cli.config, &config, move |c| {
            overrides.apply_overrides(c);
        })?)
    } else {
        None
    };

    pan::run(&config, &image)
}

/// Render the image once to stdout.
fn print_once(config: &ViewConfig, image: &PixelBuffer, grid: FixedGrid) -> Result<()> {
    let mut renderer = Renderer::new(Resizer::new(config.filter), grid);
    let request = view::build_request(config, image, grid.pixels()?);
    let frame = renderer.render(&request).context("Rendu impossible")?;

    let mut out = io::stdout().lock();
    let result = write_once(&mut out, &frame.bytes, config, pan::wait_for_key);
    renderer.recycle(frame);
    result
}

/// Write a one-shot frame. On the alternate screen the image stays up until
/// `wait` returns, then the main screen comes back.
fn write_once(
    out: &mut impl Write,
    bytes: &[u8],
    config: &ViewConfig,
    wait: impl FnOnce() -> Result<()>,
) -> Result<()> {
    out.write_all(bytes)?;
    out.flush()?;
    if config.ui.alternate_screen {
        let waited = wait();
        pan::restore(out, config)?;
        waited?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use hv_core::config::UiSettings;

    use super::*;

    #[test]
    fn one_shot_on_main_screen_does_not_wait() {
        let mut out = Vec::new();
        write_once(&mut out, b"frame", &ViewConfig::default(), || {
            panic!("aucune attente sur l'écran principal")
        })
        .unwrap();
        assert_eq!(out, b"frame");
    }

    #[test]
    fn one_shot_on_alternate_screen_leaves_it_after_key() {
        let config = ViewConfig {
            ui: UiSettings {
                alternate_screen: true,
                ..UiSettings::default()
            },
            ..ViewConfig::default()
        };
        let mut out = Vec::new();
        let mut waited = false;
        write_once(&mut out, b"frame", &config, || {
            waited = true;
            Ok(())
        })
        .unwrap();
        assert!(waited);
        assert!(out.starts_with(b"frame"));
        assert!(out.ends_with(b"\x1b[?1049l"));
    }

    #[test]
    fn alternate_screen_is_left_even_if_wait_fails() {
        let config = ViewConfig {
            ui: UiSettings {
                alternate_screen: true,
                ..UiSettings::default()
            },
            ..ViewConfig::default()
        };
        let mut out = Vec::new();
        let result = write_once(&mut out, b"frame", &config, || anyhow::bail!("stdin fermé"));
        assert!(result.is_err());
        assert!(out.ends_with(b"\x1b[?1049l"));
    }
}

/// Current terminal size, or a fixed fallback when stdout is not a terminal.
fn detect_grid() -> FixedGrid {
    match TerminalGrid.cells() {
        Ok((columns, rows)) if columns > 0 && rows > 0 => FixedGrid::new(columns, rows),
        Ok(_) => {
            log::warn!("Terminal de taille nulle, grille par défaut.");
            FixedGrid::FALLBACK
        }
        Err(e) => {
            log::warn!("Taille du terminal indisponible ({e}), grille par défaut.");
            FixedGrid::FALLBACK
        }
    }
}

/// Resolve config: the file when it exists, defaults otherwise.
fn resolve_config(cli: &cli::Cli) -> Result<ViewConfig> {
    if cli.config.exists() {
        hv_core::config::load_config(&cli.config)
    } else {
        log::info!(
            "Config introuvable : {}. Utilisation des défauts.",
            cli.config.display()
        );
        Ok(ViewConfig::default())
    }
}
