use std::path::PathBuf;

use clap::Parser;
use hv_core::config::{Filter, ViewConfig};
use hv_core::traits::FixedGrid;

/// halfview: true-color half-block image viewer for the terminal.
#[derive(Parser, Clone, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Image à afficher (PNG, JPEG, BMP, GIF, TIFF, WebP).
    pub image: PathBuf,

    /// Fichier de configuration TOML. Défaut : config/default.toml.
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: PathBuf,

    /// Largeur de la marge, en colonnes.
    #[arg(long)]
    pub width: Option<u32>,

    /// Hauteur de la marge, en pixels (2 par ligne).
    #[arg(long)]
    pub height: Option<u32>,

    /// Colonne de départ.
    #[arg(short = 'x', long = "origin-x", allow_negative_numbers = true)]
    pub origin_x: Option<i32>,

    /// Rangée de pixels de départ (2 par ligne).
    #[arg(short = 'y', long = "origin-y", allow_negative_numbers = true)]
    pub origin_y: Option<i32>,

    /// Filtre de redimensionnement : nearest, bilinear, lanczos3.
    #[arg(long)]
    pub filter: Option<Filter>,

    /// Autoriser l'agrandissement au-delà de la taille native.
    #[arg(long, default_value_t = false)]
    pub upscale: bool,

    /// Dessiner sur l'écran alternatif.
    #[arg(long, default_value_t = false)]
    pub alt_screen: bool,

    /// Masquer le curseur pendant le dessin.
    #[arg(long, default_value_t = false)]
    pub hide_cursor: bool,

    /// Effacer l'écran avant de dessiner.
    #[arg(long, default_value_t = false)]
    pub erase: bool,

    /// Désactiver le retour à la ligne automatique pendant le dessin.
    #[arg(long, default_value_t = false)]
    pub no_wrap: bool,

    /// Mode interactif : flèches pour déplacer l'image, q/Échap pour quitter.
    #[arg(long, default_value_t = false)]
    pub pan: bool,

    /// Pas de déplacement en mode interactif, en pixels.
    #[arg(long)]
    pub step: Option<u32>,

    /// Taille de grille forcée, COLONNESxLIGNES (ex : 120x40).
    #[arg(long, value_parser = parse_grid)]
    pub grid: Option<FixedGrid>,

    /// Niveau de log : error, warn, info, debug, trace.
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

impl Cli {
    /// Apply command-line values over a loaded configuration.
    ///
    /// Flags only ever switch a setting away from its default, so an absent
    /// flag leaves the file value alone.
    pub fn apply_overrides(&self, config: &mut ViewConfig) {
        if self.width.is_some() {
            config.margin_width = self.width;
        }
        if self.height.is_some() {
            config.margin_height = self.height;
        }
        if let Some(x) = self.origin_x {
            config.origin_x = x;
        }
        if let Some(y) = self.origin_y {
            config.origin_y = y;
        }
        if let Some(filter) = self.filter {
            config.filter = filter;
        }
        if let Some(step) = self.step {
            config.pan_step = step;
        }
        config.allow_upscale |= self.upscale;
        config.ui.alternate_screen |= self.alt_screen;
        config.ui.erase_screen |= self.erase;
        if self.hide_cursor {
            config.ui.show_cursor = false;
        }
        if self.no_wrap {
            config.ui.auto_wrap = false;
        }
        config.clamp_all();
    }
}

/// Parse `COLSxROWS`.
///
/// # Errors
/// Returns a message when the text is not two positive integers joined by `x`.
pub fn parse_grid(s: &str) -> Result<FixedGrid, String> {
    let (cols, rows) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("grille '{s}' : format attendu COLONNESxLIGNES"))?;
    let columns: u16 = cols.trim().parse().map_err(|e| format!("colonnes '{cols}' : {e}"))?;
    let rows: u16 = rows.trim().parse().map_err(|e| format!("lignes '{rows}' : {e}"))?;
    if columns == 0 || rows == 0 {
        return Err(format!("grille '{s}' : dimensions nulles"));
    }
    Ok(FixedGrid::new(columns, rows))
}
