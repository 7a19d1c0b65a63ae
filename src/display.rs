// src/display.rs - Image display surface: rendered layout, selection overlay and crops

use std::path::Path;

use image::RgbaImage;
use imageproc::drawing::draw_hollow_rect_mut;
use imageproc::rect::Rect;
use log::info;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::errors::Result;
use crate::geometry::{ImageLayout, Rectangle};
use crate::image_io::{load_image, InputImage};
use crate::image_utils::{fit_dimensions, resize_image, rgb_to_rgba};
use crate::selector::SelectionState;

/// Stroke width of the drawn selection box, in rendered pixels
pub const SELECTION_STROKE: u32 = 2;

/// Everything the consumer needs to know about the displayed image
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageInfo {
    pub filename: String,
    pub source_width: u32,
    pub source_height: u32,
    pub layout: ImageLayout,
}

impl ImageInfo {
    /// Scale a rendered-space rectangle onto the source file's pixel grid
    pub fn to_source_space(&self, rect: &Rectangle) -> Rectangle {
        if self.layout.width <= 0.0 || self.layout.height <= 0.0 {
            return *rect;
        }

        let source_width = self.source_width as f64;
        let source_height = self.source_height as f64;
        let scale_x = source_width / self.layout.width;
        let scale_y = source_height / self.layout.height;

        let x = (rect.x * scale_x).max(0.0).min(source_width);
        let y = (rect.y * scale_y).max(0.0).min(source_height);
        Rectangle::new(
            x,
            y,
            (rect.width * scale_x).max(0.0).min(source_width - x),
            (rect.height * scale_y).max(0.0).min(source_height - y),
        )
    }
}

/// A loaded image as it is shown to the user
pub struct DisplaySurface {
    info: ImageInfo,
    rendered: RgbaImage,
}

impl DisplaySurface {
    /// Load an image file and render it at the configured display size
    pub fn load<P: AsRef<Path>>(path: P, config: &Config) -> Result<Self> {
        let input = load_image(path)?;
        info!(
            "Image loaded: {} ({}x{})",
            input.path.display(),
            input.image.width(),
            input.image.height()
        );
        Ok(Self::from_input(input, config.display_max_dimensions))
    }

    pub fn from_input(input: InputImage, max_dimensions: Option<[u32; 2]>) -> Self {
        let filename = input
            .path
            .file_name()
            .and_then(|name| name.to_str())
            .map(str::to_string)
            .unwrap_or(input.filename);
        Self::from_image(input.image, filename, max_dimensions)
    }

    pub fn from_image(image: RgbaImage, filename: String, max_dimensions: Option<[u32; 2]>) -> Self {
        let source = image.dimensions();

        let rendered = match max_dimensions {
            Some(max) => {
                let target = fit_dimensions(source, max);
                if target == [source.0, source.1] {
                    image
                } else {
                    info!("Rendering at {}x{}", target[0], target[1]);
                    resize_image(&image, target)
                }
            }
            None => image,
        };

        let info = ImageInfo {
            filename,
            source_width: source.0,
            source_height: source.1,
            layout: ImageLayout::from(rendered.dimensions()),
        };

        Self { info, rendered }
    }

    /// Rendered pixel dimensions, reported once the image has loaded
    pub fn layout(&self) -> ImageLayout {
        self.info.layout
    }

    pub fn info(&self) -> &ImageInfo {
        &self.info
    }

    pub fn rendered(&self) -> &RgbaImage {
        &self.rendered
    }

    /// The rendered image with the selection box drawn on top when visible
    pub fn render_overlay(&self, selection: &SelectionState, color: [u8; 3]) -> RgbaImage {
        let mut canvas = self.rendered.clone();
        if !selection.visible {
            return canvas;
        }

        let rect = selection.rect;
        let pixel = rgb_to_rgba(color);
        let width = rect.width.round() as u32;
        let height = rect.height.round() as u32;

        for inset in 0..SELECTION_STROKE {
            if width <= 2 * inset || height <= 2 * inset {
                break;
            }
            let outline = Rect::at(rect.x.round() as i32 + inset as i32, rect.y.round() as i32 + inset as i32)
                .of_size(width - 2 * inset, height - 2 * inset);
            draw_hollow_rect_mut(&mut canvas, outline, pixel);
        }

        canvas
    }

    /// Copy the selected region out of the rendered image
    pub fn crop(&self, rect: &Rectangle) -> RgbaImage {
        let (image_width, image_height) = self.rendered.dimensions();
        let x = (rect.x.max(0.0).floor() as u32).min(image_width);
        let y = (rect.y.max(0.0).floor() as u32).min(image_height);
        let width = (rect.width.max(0.0).round() as u32).min(image_width - x);
        let height = (rect.height.max(0.0).round() as u32).min(image_height - y);

        image::imageops::crop_imm(&self.rendered, x, y, width, height).to_image()
    }
}
