use image::{Rgba, RgbaImage};

/// Resize an image to the specified dimensions
pub fn resize_image(
    image: &RgbaImage,
    dimensions: [u32; 2],
) -> RgbaImage {
    let (width, height) = (dimensions[0], dimensions[1]);
    image::imageops::resize(
        image,
        width,
        height,
        image::imageops::FilterType::Triangle,
    )
}

/// Largest size with the source aspect ratio that fits inside `max`.
/// Never upscales; each side is at least one pixel.
pub fn fit_dimensions(source: (u32, u32), max: [u32; 2]) -> [u32; 2] {
    let (width, height) = source;
    if width == 0 || height == 0 {
        return [width, height];
    }

    let scale = (max[0] as f64 / width as f64)
        .min(max[1] as f64 / height as f64)
        .min(1.0);

    [
        ((width as f64 * scale).round() as u32).max(1),
        ((height as f64 * scale).round() as u32).max(1),
    ]
}

/// Build an opaque pixel from an RGB triple
#[inline]
pub fn rgb_to_rgba(color: [u8; 3]) -> Rgba<u8> {
    Rgba([color[0], color[1], color[2], 255])
}

/// Pack an RGB triple into the 0xRRGGBB framebuffer format
#[inline]
pub fn rgb_to_u32(color: [u8; 3]) -> u32 {
    ((color[0] as u32) << 16) | ((color[1] as u32) << 8) | color[2] as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_keeps_aspect_ratio() {
        assert_eq!(fit_dimensions((1600, 1200), [800, 600]), [800, 600]);
        assert_eq!(fit_dimensions((1200, 1600), [800, 600]), [450, 600]);
        assert_eq!(fit_dimensions((4000, 1000), [800, 600]), [800, 200]);
    }

    #[test]
    fn fit_never_upscales() {
        assert_eq!(fit_dimensions((320, 240), [800, 600]), [320, 240]);
    }

    #[test]
    fn packs_rgb_for_the_framebuffer() {
        assert_eq!(rgb_to_u32([255, 0, 0]), 0xFF0000);
        assert_eq!(rgb_to_u32([0x12, 0x34, 0x56]), 0x123456);
    }
}
