//! Grid geometry in target pixel units.
//!
//! One terminal column is one pixel wide and one terminal row is two pixels
//! tall, so a grid of `C × R` cells is a `C × 2R` pixel box.

/// Point entier, en pixels de grille.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: i32,
    /// Vertical coordinate.
    pub y: i32,
}

impl Point {
    /// Build a point.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Rectangle demi-ouvert `[min, max)`.
///
/// # Example
/// ```
/// use hv_core::geometry::Rect;
/// let r = Rect::new(2, 3, 10, 7);
/// assert_eq!((r.width(), r.height()), (8, 4));
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rect {
    /// Top-left corner, inclusive.
    pub min: Point,
    /// Bottom-right corner, exclusive.
    pub max: Point,
}

impl Rect {
    /// Build a rectangle from its corners.
    #[must_use]
    pub const fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self {
            min: Point::new(x0, y0),
            max: Point::new(x1, y1),
        }
    }

    /// Rectangle anchored at the origin.
    #[must_use]
    pub const fn from_size(width: i32, height: i32) -> Self {
        Self::new(0, 0, width, height)
    }

    /// Width, negative for inverted rectangles.
    #[must_use]
    pub const fn width(&self) -> i32 {
        self.max.x - self.min.x
    }

    /// Height, negative for inverted rectangles.
    #[must_use]
    pub const fn height(&self) -> i32 {
        self.max.y - self.min.y
    }

    /// Surface, 0 for empty or inverted rectangles.
    #[must_use]
    pub fn area(&self) -> i64 {
        i64::from(self.width().max(0)) * i64::from(self.height().max(0))
    }
}

/// Clamp saturant. Retourne `min` si `max < min`.
///
/// # Example
/// ```
/// use hv_core::geometry::clamp;
/// assert_eq!(clamp(12, 0, 10), 10);
/// assert_eq!(clamp(-3, 0, 10), 0);
/// assert_eq!(clamp(5, 0, -4), 0);
/// ```
#[inline]
#[must_use]
pub fn clamp(value: i32, min: i32, max: i32) -> i32 {
    if value < min || max < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

/// Clamp both corners of `margin` into the grid box `[0, grid]`.
#[must_use]
pub fn clamp_rect(margin: Rect, grid: Point) -> Rect {
    Rect::new(
        clamp(margin.min.x, 0, grid.x),
        clamp(margin.min.y, 0, grid.y),
        clamp(margin.max.x, 0, grid.x),
        clamp(margin.max.y, 0, grid.y),
    )
}

/// Échelle uniforme pour faire tenir `width × height` dans `margin`.
///
/// Returns 0.0 for an empty source.
///
/// # Example
/// ```
/// use hv_core::geometry::{scale_factor, Rect};
/// let s = scale_factor(Rect::from_size(50, 40), 100, 100);
/// assert!((s - 0.4).abs() < f64::EPSILON);
/// ```
#[must_use]
pub fn scale_factor(margin: Rect, width: u32, height: u32) -> f64 {
    if width == 0 || height == 0 {
        return 0.0;
    }
    let sx = f64::from(margin.width()) / f64::from(width);
    let sy = f64::from(margin.height()) / f64::from(height);
    sx.min(sy).max(0.0)
}

/// Dimensions after scaling, rounded to the nearest pixel.
#[must_use]
pub fn scaled_size(width: u32, height: u32, scale: f64) -> (u32, u32) {
    (
        (f64::from(width) * scale).round() as u32,
        (f64::from(height) * scale).round() as u32,
    )
}

/// Keep the image inside the grid: each axis is clamped to
/// `[0, grid - image]`, or pinned to 0 when the image is larger than the grid.
///
/// # Example
/// ```
/// use hv_core::geometry::{clamp_origin, Point};
/// let grid = Point::new(80, 48);
/// assert_eq!(clamp_origin(Point::new(75, -2), Point::new(10, 10), grid), Point::new(70, 0));
/// assert_eq!(clamp_origin(Point::new(5, 5), Point::new(100, 10), grid), Point::new(0, 5));
/// ```
#[must_use]
pub fn clamp_origin(origin: Point, image: Point, grid: Point) -> Point {
    Point::new(
        clamp(origin.x, 0, (grid.x - image.x).max(0)),
        clamp(origin.y, 0, (grid.y - image.y).max(0)),
    )
}

/// Marge par défaut : l'image entière si sa surface tient dans la grille,
/// sinon la grille.
#[must_use]
pub fn default_margin(image: Rect, grid: Point) -> Rect {
    let grid_rect = Rect::from_size(grid.x, grid.y);
    if image.area() <= grid_rect.area() {
        image
    } else {
        grid_rect
    }
}

/// 1-based (column, row) where drawing starts.
#[must_use]
pub fn start_position(origin: Point) -> (i32, i32) {
    (origin.x + 1, origin.y / 2 + 1)
}

/// 1-based (column, row) of the cell right after the last rendered one.
#[must_use]
pub fn final_position(width: u32, height: u32, origin: Point) -> (i32, i32) {
    let rows = height.div_ceil(2) as i32;
    (width as i32 + origin.x + 1, rows + origin.y / 2)
}
