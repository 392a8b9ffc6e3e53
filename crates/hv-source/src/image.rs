use std::path::Path;

use anyhow::{Context, Result};
use hv_core::error::CoreError;
use hv_core::pixel::{BYTES_PER_PIXEL, PixelBuffer};

/// Charge une image depuis le disque en RGBA 8 bits.
///
/// The format is chosen from the file extension. Animated formats yield their
/// first frame.
///
/// # Errors
/// Returns [`CoreError::UnsupportedFormat`] for an unknown extension, or an
/// error if the file cannot be read or decoded.
///
/// # Example
/// ```no_run
/// use hv_source::image::load_image;
/// use std::path::Path;
/// let image = load_image(Path::new("photo.png")).unwrap();
/// assert!(image.width() > 0);
/// ```
pub fn load_image(path: &Path) -> Result<PixelBuffer> {
    let format = image::ImageFormat::from_path(path).map_err(|_| CoreError::UnsupportedFormat {
        format: path
            .extension()
            .map_or_else(|| "(aucune extension)".to_string(), |e| e.to_string_lossy().into_owned()),
    })?;

    let decoded = image::open(path)
        .with_context(|| format!("Impossible de charger {} ({format:?})", path.display()))?;

    let rgba = decoded.to_rgba8();
    let (width, height) = rgba.dimensions();
    log::info!("image: {} {width}×{height} ({format:?})", path.display());
    let buffer = PixelBuffer::from_raw(rgba.into_raw(), width, height, width as usize * BYTES_PER_PIXEL)?;
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use hv_core::pixel::Pixel;

    use super::*;

    #[test]
    fn png_round_trip_keeps_alpha() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dot.png");
        let mut img = image::RgbaImage::new(3, 2);
        img.put_pixel(2, 1, image::Rgba([10, 20, 30, 40]));
        img.save(&path).unwrap();

        let buf = load_image(&path).unwrap();
        assert_eq!((buf.width(), buf.height(), buf.stride()), (3, 2, 12));
        assert_eq!(buf.pixel(2, 1), Pixel::rgba(10, 20, 30, 40));
        assert_eq!(buf.pixel(0, 0), Pixel::TRANSPARENT);
    }

    #[test]
    fn unknown_extension_is_unsupported() {
        let err = load_image(Path::new("notes.xyz")).unwrap_err();
        match err.downcast_ref::<CoreError>() {
            Some(CoreError::UnsupportedFormat { format }) => assert_eq!(format, "xyz"),
            other => panic!("attendu UnsupportedFormat, obtenu {other:?}"),
        }
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_image(&dir.path().join("absent.png")).is_err());
    }
}
