// src/gui/mod.rs - Interactive affected-area selection window

mod state;
mod render;
mod events;

use std::path::PathBuf;
use std::time::Duration;
use log::info;
use minifb::{Window, WindowOptions};

use plant_area_selector_lib::{Config, DisplaySurface, Result, SelectorError};

use self::state::GuiState;

/// Run the GUI application
pub fn run_gui(image_path: PathBuf, config: Config) -> Result<()> {
    let surface = DisplaySurface::load(&image_path, &config)?;
    let layout = surface.layout();
    info!("Displaying at {}x{}", layout.width, layout.height);

    let mut state = GuiState::new(surface, config);

    let mut window = Window::new(
        &state.title(),
        state.width,
        state.height,
        WindowOptions {
            resize: false,
            scale: minifb::Scale::X1,
            ..WindowOptions::default()
        },
    )
    .map_err(|e| SelectorError::Other(format!("Failed to create window: {}", e)))?;

    window.limit_update_rate(Some(Duration::from_millis(16)));

    render::update_buffer(&mut state);

    while window.is_open() && !window.is_key_down(minifb::Key::Escape) {
        if events::handle_events(&mut window, &mut state)? {
            render::update_buffer(&mut state);
            window.set_title(&state.title());
        }

        window
            .update_with_buffer(&state.buffer, state.width, state.height)
            .map_err(|e| SelectorError::Other(format!("Failed to update window: {}", e)))?;
    }

    info!("GUI closed");
    Ok(())
}
