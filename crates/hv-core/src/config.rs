use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Modes du terminal appliqués autour d'une frame.
///
/// # Example
/// ```
/// use hv_core::config::UiSettings;
/// let ui = UiSettings::default();
/// assert!(ui.show_cursor && ui.auto_wrap);
/// assert!(!ui.alternate_screen && !ui.erase_screen);
/// ```
#[allow(clippy::struct_excessive_bools)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct UiSettings {
    /// Cursor visible while the frame is drawn.
    pub show_cursor: bool,
    /// Draw on the alternate screen. The renderer enters it but never leaves it.
    pub alternate_screen: bool,
    /// Clear the screen from the top before drawing, so nothing printed
    /// earlier survives.
    pub erase_screen: bool,
    /// Terminal line auto-wrap while the frame is drawn.
    pub auto_wrap: bool,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            show_cursor: true,
            alternate_screen: false,
            erase_screen: false,
            auto_wrap: true,
        }
    }
}

/// Resampling filter used when the image does not fit at scale 1.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Filter {
    /// Nearest neighbour, keeps hard pixel edges.
    #[default]
    Nearest,
    /// Bilinear convolution.
    Bilinear,
    /// Lanczos3 convolution, sharpest downscale.
    Lanczos3,
}

impl std::str::FromStr for Filter {
    type Err = crate::error::CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "nearest" => Ok(Self::Nearest),
            "bilinear" => Ok(Self::Bilinear),
            "lanczos3" | "lanczos" => Ok(Self::Lanczos3),
            other => Err(crate::error::CoreError::Config(format!(
                "filtre inconnu '{other}' (nearest, bilinear, lanczos3)"
            ))),
        }
    }
}

/// Configuration complète du viewer.
///
/// Sérialisable en TOML. Chaque champ a une valeur par défaut saine.
///
/// # Example
/// ```
/// use hv_core::config::ViewConfig;
/// let config = ViewConfig::default();
/// assert_eq!(config.pan_step, 2);
/// assert!(config.margin_width.is_none());
/// ```
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct ViewConfig {
    // === Placement ===
    /// Largeur de la zone de placement, en colonnes. None = taille par défaut.
    pub margin_width: Option<u32>,
    /// Hauteur de la zone de placement, en pixels (2 par ligne). None = taille par défaut.
    pub margin_height: Option<u32>,
    /// Horizontal anchor of the image, in columns.
    pub origin_x: i32,
    /// Vertical anchor of the image, in pixel rows.
    pub origin_y: i32,

    // === Scaling ===
    /// Resampling filter.
    pub filter: Filter,
    /// Allow scale factors above 1.0.
    pub allow_upscale: bool,

    // === UI ===
    /// Terminal modes around each frame.
    pub ui: UiSettings,

    // === Pan ===
    /// Pixels moved per arrow key press.
    pub pan_step: u32,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            margin_width: None,
            margin_height: None,
            origin_x: 0,
            origin_y: 0,
            filter: Filter::Nearest,
            allow_upscale: false,
            ui: UiSettings::default(),
            pan_step: 2,
        }
    }
}

impl ViewConfig {
    /// Clamp all numeric fields to their valid ranges.
    /// Called after TOML deserialization to prevent out-of-range values.
    pub fn clamp_all(&mut self) {
        self.pan_step = self.pan_step.clamp(1, 64);
        self.origin_x = self.origin_x.max(0);
        self.origin_y = self.origin_y.max(0);
        if self.margin_width == Some(0) {
            self.margin_width = None;
        }
        if self.margin_height == Some(0) {
            self.margin_height = None;
        }
    }
}

/// Structure TOML intermédiaire pour désérialisation avec valeurs optionnelles.
#[derive(Deserialize)]
struct ConfigFile {
    view: Option<ViewSection>,
    ui: Option<UiSection>,
    pan: Option<PanSection>,
}

/// View section, all fields optional for partial override.
#[derive(Deserialize)]
struct ViewSection {
    margin_width: Option<u32>,
    margin_height: Option<u32>,
    origin_x: Option<i32>,
    origin_y: Option<i32>,
    filter: Option<Filter>,
    allow_upscale: Option<bool>,
}

/// UI section, all fields optional.
#[allow(clippy::struct_excessive_bools, clippy::struct_field_names)]
#[derive(Deserialize)]
struct UiSection {
    show_cursor: Option<bool>,
    alternate_screen: Option<bool>,
    erase_screen: Option<bool>,
    auto_wrap: Option<bool>,
}

#[derive(Deserialize)]
struct PanSection {
    step: Option<u32>,
}

/// Charge un fichier TOML et fusionne avec les valeurs par défaut.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
///
/// # Example
/// ```no_run
/// use hv_core::config::load_config;
/// use std::path::Path;
/// let config = load_config(Path::new("config/default.toml")).unwrap();
/// ```
pub fn load_config(path: &Path) -> Result<ViewConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Impossible de lire {}", path.display()))?;
    parse_config(&content).with_context(|| format!("Erreur de parsing TOML dans {}", path.display()))
}

/// Parse TOML text and merge it over the defaults.
///
/// # Errors
/// Returns an error if the text is not valid TOML for this schema.
///
/// # Example
/// ```
/// use hv_core::config::{parse_config, Filter};
/// let config = parse_config("[view]\nfilter = \"bilinear\"\n").unwrap();
/// assert_eq!(config.filter, Filter::Bilinear);
/// ```
pub fn parse_config(content: &str) -> Result<ViewConfig> {
    let file: ConfigFile = toml::from_str(content)?;
    let mut config = ViewConfig::default();

    if let Some(v) = file.view {
        if v.margin_width.is_some() {
            config.margin_width = v.margin_width;
        }
        if v.margin_height.is_some() {
            config.margin_height = v.margin_height;
        }
        if let Some(x) = v.origin_x {
            config.origin_x = x;
        }
        if let Some(y) = v.origin_y {
            config.origin_y = y;
        }
        if let Some(f) = v.filter {
            config.filter = f;
        }
        if let Some(u) = v.allow_upscale {
            config.allow_upscale = u;
        }
    }

    if let Some(u) = file.ui {
        if let Some(v) = u.show_cursor {
            config.ui.show_cursor = v;
        }
        if let Some(v) = u.alternate_screen {
            config.ui.alternate_screen = v;
        }
        if let Some(v) = u.erase_screen {
            config.ui.erase_screen = v;
        }
        if let Some(v) = u.auto_wrap {
            config.ui.auto_wrap = v;
        }
    }

    if let Some(p) = file.pan
        && let Some(step) = p.step
    {
        config.pan_step = step;
    }

    config.clamp_all();
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn partial_file_keeps_defaults() {
        let config = parse_config("[ui]\nalternate_screen = true\n").unwrap();
        assert!(config.ui.alternate_screen);
        assert!(config.ui.show_cursor);
        assert_eq!(config.filter, Filter::Nearest);
        assert_eq!(config.pan_step, 2);
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let config =
            parse_config("[view]\norigin_x = -4\nmargin_width = 0\n[pan]\nstep = 500\n").unwrap();
        assert_eq!(config.origin_x, 0);
        assert_eq!(config.margin_width, None);
        assert_eq!(config.pan_step, 64);
    }

    #[test]
    fn unknown_filter_is_rejected() {
        assert!(parse_config("[view]\nfilter = \"cubic\"\n").is_err());
        assert!("cubic".parse::<Filter>().is_err());
        assert_eq!("Lanczos".parse::<Filter>().unwrap(), Filter::Lanczos3);
    }

    #[test]
    fn load_config_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[view]\nmargin_width = 40\nmargin_height = 30\nallow_upscale = true").unwrap();
        let config = load_config(file.path()).unwrap();
        assert_eq!(config.margin_width, Some(40));
        assert_eq!(config.margin_height, Some(30));
        assert!(config.allow_upscale);
    }

    #[test]
    fn shipped_default_matches_defaults() {
        let config = parse_config(include_str!("../../../config/default.toml")).unwrap();
        assert_eq!(config, ViewConfig::default());
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(load_config(Path::new("/nonexistent/halfview.toml")).is_err());
    }
}
