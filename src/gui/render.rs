// src/gui/render.rs - Rendering functions

use plant_area_selector_lib::display::SELECTION_STROKE;

use super::state::GuiState;

/// Draw a filled rectangle
fn draw_rect(buffer: &mut [u32], x: usize, y: usize, width_px: usize, height_px: usize,
             buffer_width: usize, buffer_height: usize, color: u32) {
    for py in y..std::cmp::min(y + height_px, buffer_height) {
        for px in x..std::cmp::min(x + width_px, buffer_width) {
            let idx = py * buffer_width + px;
            if idx < buffer.len() {
                buffer[idx] = color;
            }
        }
    }
}

/// Draw the outline of a rectangle with the given stroke
pub fn draw_outline(buffer: &mut [u32], x: usize, y: usize, width_px: usize, height_px: usize,
                    buffer_width: usize, buffer_height: usize, stroke: usize, color: u32) {
    if width_px == 0 || height_px == 0 {
        return;
    }
    let stroke = stroke.min(width_px).min(height_px);

    draw_rect(buffer, x, y, width_px, stroke, buffer_width, buffer_height, color);
    draw_rect(buffer, x, y + height_px - stroke, width_px, stroke, buffer_width, buffer_height, color);
    draw_rect(buffer, x, y, stroke, height_px, buffer_width, buffer_height, color);
    draw_rect(buffer, x + width_px - stroke, y, stroke, height_px, buffer_width, buffer_height, color);
}

/// Update the buffer for display
pub fn update_buffer(state: &mut GuiState) {
    state.buffer.copy_from_slice(&state.base);

    let selection = state.selector.selection_state();
    if !selection.visible {
        return;
    }

    let color = state.selection_color();
    let rect = selection.rect;
    draw_outline(
        &mut state.buffer,
        rect.x.round() as usize,
        rect.y.round() as usize,
        rect.width.round() as usize,
        rect.height.round() as usize,
        state.width,
        state.height,
        SELECTION_STROKE as usize,
        color,
    );
}
