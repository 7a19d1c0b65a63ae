// src/geometry.rs - Rectangles, points and image layouts in image-local pixels

use serde::{Deserialize, Serialize};

/// A position in the rendered image's local coordinate space (origin top-left)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Axis-aligned bounding box in image-local pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rectangle {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rectangle {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Zero-sized rectangle anchored at `origin`
    pub fn at(origin: Point) -> Self {
        Self::new(origin.x, origin.y, 0.0, 0.0)
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Whether the rectangle lies entirely inside `layout` with non-negative sides
    pub fn fits_within(&self, layout: &ImageLayout) -> bool {
        self.x >= 0.0
            && self.y >= 0.0
            && self.width >= 0.0
            && self.height >= 0.0
            && self.right() <= layout.width
            && self.bottom() <= layout.height
    }

    /// Human-readable coordinates, as shown when a selection is confirmed
    pub fn summary(&self) -> String {
        format!(
            "X:{:.0}, Y:{:.0} size {:.0}x{:.0}",
            self.x, self.y, self.width, self.height
        )
    }
}

/// Rendered (not source-file) pixel dimensions of the displayed image
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "LayoutFields")]
pub struct ImageLayout {
    pub width: f64,
    pub height: f64,
}

#[derive(Deserialize)]
struct LayoutFields {
    width: f64,
    height: f64,
}

impl TryFrom<LayoutFields> for ImageLayout {
    type Error = String;

    fn try_from(fields: LayoutFields) -> Result<Self, Self::Error> {
        Self::checked(fields.width, fields.height)
    }
}

impl ImageLayout {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Layout from untrusted input: both sides must be finite and positive
    pub fn checked(width: f64, height: f64) -> Result<Self, String> {
        if !(width.is_finite() && width > 0.0 && height.is_finite() && height > 0.0) {
            return Err(format!(
                "layout dimensions must be finite and positive, got {}x{}",
                width, height
            ));
        }
        Ok(Self::new(width, height))
    }

    /// Clamp a point into the layout bounds
    pub fn clamp_point(&self, point: Point) -> Point {
        Point::new(
            point.x.max(0.0).min(self.width),
            point.y.max(0.0).min(self.height),
        )
    }
}

impl From<(u32, u32)> for ImageLayout {
    fn from((width, height): (u32, u32)) -> Self {
        Self::new(width as f64, height as f64)
    }
}
