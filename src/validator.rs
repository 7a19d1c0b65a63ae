// src/validator.rs - Minimum-size gate applied when a drag is released

use crate::geometry::Rectangle;

/// Default minimum side length, in pixels, for an accepted selection
pub const MIN_SELECTION_SIZE: f64 = 10.0;

/// Check whether a released rectangle is large enough to keep
#[inline]
pub fn is_valid(rect: &Rectangle, min_size: f64) -> bool {
    rect.width >= min_size && rect.height >= min_size
}
