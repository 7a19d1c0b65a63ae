// src/selector.rs - Press/drag/release state machine for the affected-area rectangle

use log::{debug, info, warn};

use crate::config::Config;
use crate::geometry::{ImageLayout, Point, Rectangle};
use crate::pointer::{PointerEvent, PointerEventKind};
use crate::validator::{is_valid, MIN_SELECTION_SIZE};

/// Selection state machine
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum SelectorState {
    /// No active or saved selection
    #[default]
    Idle,
    /// Press held; `rect.x`/`rect.y` is the press origin
    Dragging { rect: Rectangle },
    /// Released and accepted
    Finalized { rect: Rectangle },
}

/// What the display layer draws: the current rectangle and whether to show it
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SelectionState {
    pub rect: Rectangle,
    pub visible: bool,
}

impl SelectorState {
    pub fn selection_state(&self) -> SelectionState {
        match *self {
            SelectorState::Idle => SelectionState::default(),
            SelectorState::Dragging { rect } | SelectorState::Finalized { rect } => {
                SelectionState { rect, visible: true }
            }
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self, SelectorState::Dragging { .. })
    }
}

/// Grow the rectangle anchored at `rect`'s origin toward `pointer`.
///
/// Sides never go negative and never extend past the layout.
pub fn drag_to(rect: &Rectangle, pointer: Point, layout: &ImageLayout) -> Rectangle {
    let width = (pointer.x - rect.x).min(layout.width - rect.x).max(0.0);
    let height = (pointer.y - rect.y).min(layout.height - rect.y).max(0.0);
    Rectangle::new(rect.x, rect.y, width, height)
}

/// Pure transition function. Without a layout nothing can be pressed;
/// events at non-finite positions are dropped.
pub fn transition(
    state: SelectorState,
    event: &PointerEvent,
    layout: Option<&ImageLayout>,
    min_size: f64,
) -> SelectorState {
    let Some(layout) = layout else {
        return state;
    };
    if !event.position().is_finite() {
        return state;
    }

    match (state, event.kind) {
        (_, PointerEventKind::Press) => {
            let origin = layout.clamp_point(event.position());
            SelectorState::Dragging { rect: Rectangle::at(origin) }
        }
        (SelectorState::Dragging { rect }, PointerEventKind::Move) => SelectorState::Dragging {
            rect: drag_to(&rect, event.position(), layout),
        },
        (SelectorState::Dragging { rect }, PointerEventKind::Release) => {
            if is_valid(&rect, min_size) {
                SelectorState::Finalized { rect }
            } else {
                SelectorState::Idle
            }
        }
        (other, _) => other,
    }
}

/// Affected-area selector bound to the currently displayed image
#[derive(Debug, Clone)]
pub struct AreaSelector {
    state: SelectorState,
    layout: Option<ImageLayout>,
    min_size: f64,
}

impl Default for AreaSelector {
    fn default() -> Self {
        Self::new(MIN_SELECTION_SIZE)
    }
}

impl AreaSelector {
    pub fn new(min_size: f64) -> Self {
        Self {
            state: SelectorState::Idle,
            layout: None,
            min_size,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.min_selection_size)
    }

    /// A new image finished loading: replace the layout and drop any selection
    pub fn load_image(&mut self, layout: ImageLayout) {
        debug!("Image layout {}x{}, selection cleared", layout.width, layout.height);
        self.layout = Some(layout);
        self.state = SelectorState::Idle;
    }

    pub fn layout(&self) -> Option<&ImageLayout> {
        self.layout.as_ref()
    }

    pub fn min_size(&self) -> f64 {
        self.min_size
    }

    pub fn state(&self) -> &SelectorState {
        &self.state
    }

    pub fn selection_state(&self) -> SelectionState {
        self.state.selection_state()
    }

    /// The finalized rectangle, if any
    pub fn selection(&self) -> Option<Rectangle> {
        match self.state {
            SelectorState::Finalized { rect } => Some(rect),
            _ => None,
        }
    }

    pub fn clear(&mut self) {
        self.state = SelectorState::Idle;
    }

    /// Feed one pointer event. Returns true when the state changed.
    pub fn handle(&mut self, event: &PointerEvent) -> bool {
        if self.layout.is_none() {
            if event.kind == PointerEventKind::Press {
                warn!("Press at ({:.1}, {:.1}) ignored: no image loaded", event.x, event.y);
            }
            return false;
        }

        let previous = self.state;
        self.state = transition(previous, event, self.layout.as_ref(), self.min_size);

        if let (SelectorState::Dragging { rect }, PointerEventKind::Release) = (previous, event.kind) {
            match self.state {
                SelectorState::Finalized { .. } => info!("Affected area selected: {}", rect.summary()),
                _ => info!(
                    "Selection {:.0}x{:.0} discarded (minimum {:.0}px)",
                    rect.width, rect.height, self.min_size
                ),
            }
        }

        previous != self.state
    }

    pub fn press(&mut self, x: f64, y: f64) -> bool {
        self.handle(&PointerEvent::press(x, y))
    }

    pub fn move_to(&mut self, x: f64, y: f64) -> bool {
        self.handle(&PointerEvent::moved(x, y))
    }

    pub fn release(&mut self) -> bool {
        self.handle(&PointerEvent::release(0.0, 0.0))
    }
}
