// src/gui/state.rs - GUI state: displayed image, selector and framebuffer

use log::{info, warn};

use plant_area_selector_lib::image_utils::rgb_to_u32;
use plant_area_selector_lib::output::write_request_json;
use plant_area_selector_lib::{
    AreaSelector, Config, DiagnosticRequest, DisplaySurface, Result, SelectorError,
};

// Colors (in 0xRRGGBB format)
pub const COLOR_BACKGROUND: u32 = 0x303030; // Dark gray
pub const COLOR_DRAGGING: u32 = 0xFFFF00;   // Yellow while the press is held

/// GUI Application State
pub struct GuiState {
    pub config: Config,
    pub surface: DisplaySurface,
    pub selector: AreaSelector,

    // Display state
    pub base: Vec<u32>,
    pub buffer: Vec<u32>,
    pub width: usize,
    pub height: usize,

    // UI state
    pub mouse_x: f32,
    pub mouse_y: f32,
    pub mouse_down: bool,
    pub status_message: String,
}

impl GuiState {
    pub fn new(surface: DisplaySurface, config: Config) -> Self {
        let (width, height) = surface.rendered().dimensions();
        let (width, height) = (width as usize, height as usize);

        let base = surface
            .rendered()
            .pixels()
            .map(|p| {
                if p[3] == 0 {
                    COLOR_BACKGROUND
                } else {
                    rgb_to_u32([p[0], p[1], p[2]])
                }
            })
            .collect::<Vec<u32>>();

        let mut selector = AreaSelector::from_config(&config);
        selector.load_image(surface.layout());

        Self {
            config,
            surface,
            selector,
            buffer: base.clone(),
            base,
            width,
            height,
            mouse_x: 0.0,
            mouse_y: 0.0,
            mouse_down: false,
            status_message: "Drag over the affected area".to_string(),
        }
    }

    pub fn selection_color(&self) -> u32 {
        if self.selector.state().is_dragging() {
            COLOR_DRAGGING
        } else {
            rgb_to_u32(self.config.selection_color_rgb)
        }
    }

    /// Update the status line after a release
    pub fn report_release(&mut self) {
        self.status_message = match self.selector.selection() {
            Some(rect) => format!("Selected {} - Enter to submit", rect.summary()),
            None => format!(
                "Selection too small (minimum {:.0}px), drag again",
                self.selector.min_size()
            ),
        };
    }

    pub fn clear_selection(&mut self) {
        self.selector.clear();
        self.status_message = "Selection cleared".to_string();
    }

    /// Package the finalized selection and write the request body
    pub fn submit(&mut self) -> Result<()> {
        let request = match DiagnosticRequest::new(
            Some(self.surface.info()),
            self.selector.selection(),
            self.config.coordinate_space,
        ) {
            Ok(request) => request,
            Err(SelectorError::AreaNotSelected) => {
                warn!("Submit blocked: no affected area selected");
                self.status_message = SelectorError::AreaNotSelected.to_string();
                return Ok(());
            }
            Err(e) => return Err(e),
        };

        let stem = std::path::Path::new(&request.image)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("selection")
            .to_string();
        let path = write_request_json(&request, self.config.output_dir(), &stem)?;
        info!("Request written to {}", path.display());
        self.status_message = format!("Request saved: {}", path.display());

        Ok(())
    }

    pub fn title(&self) -> String {
        format!("Affected area - {}", self.status_message)
    }
}
