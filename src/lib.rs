// src/lib.rs - Library interface for the affected-area selector

pub mod config;
pub mod display;
pub mod errors;
pub mod geometry;
pub mod image_io;
pub mod image_utils;
pub mod output;
pub mod pointer;
pub mod request;
pub mod selector;
pub mod session;
pub mod validator;

// Re-export commonly used types and functions
pub use errors::{SelectorError, Result};
pub use config::{Config, CoordinateSpace};
pub use geometry::{ImageLayout, Point, Rectangle};
pub use validator::{is_valid, MIN_SELECTION_SIZE};

pub use selector::{
    transition,
    AreaSelector,
    SelectionState,
    SelectorState,
};

pub use pointer::{
    load_event_file,
    parse_event_script,
    PointerEvent,
    PointerEventKind,
    ScriptStep,
};

pub use display::{DisplaySurface, ImageInfo};
pub use request::{DiagnosticRequest, PlantRecord};
pub use session::{
    process_directory,
    process_image,
    process_image_as,
    process_layout_session,
    run_session,
    SessionOutcome,
};
pub use image_io::{InputImage, load_image, save_image};
