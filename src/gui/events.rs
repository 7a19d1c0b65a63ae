// src/gui/events.rs - Mouse and keyboard handling

use minifb::{Key, KeyRepeat, MouseButton, MouseMode, Window};

use plant_area_selector_lib::{PointerEvent, PointerEventKind, Result};
use super::state::GuiState;

/// Pointer event for a left-button change between two frames, if any
pub fn pointer_event(was_down: bool, is_down: bool, x: f64, y: f64) -> Option<PointerEvent> {
    match (was_down, is_down) {
        (false, true) => Some(PointerEvent::press(x, y)),
        (true, true) => Some(PointerEvent::moved(x, y)),
        (true, false) => Some(PointerEvent::release(x, y)),
        (false, false) => None,
    }
}

/// Handle all events (mouse and keyboard). Returns true when a redraw is needed.
pub fn handle_events(window: &mut Window, state: &mut GuiState) -> Result<bool> {
    let mut changed = false;

    // Clamp keeps drags that leave the window on the image edge
    if let Some((x, y)) = window.get_mouse_pos(MouseMode::Clamp) {
        state.mouse_x = x;
        state.mouse_y = y;
    }
    let (x, y) = (state.mouse_x as f64, state.mouse_y as f64);

    let mouse_down_now = window.get_mouse_down(MouseButton::Left);

    if let Some(event) = pointer_event(state.mouse_down, mouse_down_now, x, y) {
        changed |= state.selector.handle(&event);
        match event.kind {
            PointerEventKind::Press => state.status_message = "Selecting...".to_string(),
            PointerEventKind::Release => {
                state.report_release();
                changed = true;
            }
            PointerEventKind::Move => {}
        }
    }

    state.mouse_down = mouse_down_now;

    if window.is_key_pressed(Key::C, KeyRepeat::No) {
        state.clear_selection();
        changed = true;
    }

    if window.is_key_pressed(Key::Enter, KeyRepeat::No) {
        state.submit()?;
        changed = true;
    }

    Ok(changed)
}
