use hv_core::config::ViewConfig;
use hv_core::geometry::{Point, Rect};
use hv_core::pixel::PixelBuffer;
use hv_render::RenderRequest;

/// Construit la requête de rendu d'une image selon la configuration.
///
/// A margin dimension left unset in the configuration falls back to the
/// default margin for this image and grid.
#[must_use]
pub fn build_request<'a>(config: &ViewConfig, image: &'a PixelBuffer, grid: Point) -> RenderRequest<'a> {
    let mut request = RenderRequest::new(image, grid);
    let width = config.margin_width.map_or(request.margin.width(), |w| w as i32);
    let height = config.margin_height.map_or(request.margin.height(), |h| h as i32);
    request.margin = Rect::from_size(width, height);
    request.origin = Point::new(config.origin_x, config.origin_y);
    request.ui = config.ui;
    request.allow_upscale = config.allow_upscale;
    request
}

/// Cellules (0-based, demi-ouvertes) couvertes par une image rendue.
#[must_use]
pub fn covered_cells(origin: Point, width: u32, height: u32) -> Rect {
    let top = origin.y / 2;
    let rows = height.div_ceil(2) as i32;
    Rect::new(origin.x, top, origin.x + width as i32, top + rows)
}
