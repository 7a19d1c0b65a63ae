use thiserror::Error;
use std::io;
use std::path::PathBuf;

/// Custom error types for the affected-area selector
#[derive(Error, Debug)]
pub enum SelectorError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Image processing error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load configuration from {path}: {source}")]
    ConfigLoad {
        source: toml::de::Error,
        path: PathBuf,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV output error: {0}")]
    CsvOutput(#[from] csv::Error),

    #[error("Invalid event on line {line}: {reason}")]
    InvalidEvent { line: usize, reason: String },

    #[error("No image loaded: take or select a photo first")]
    NoImageLoaded,

    #[error("Area not selected: select the affected area first")]
    AreaNotSelected,

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid input path: {0}")]
    InvalidPath(PathBuf),

    #[error("Unexpected error: {0}")]
    Other(String),
}

/// Type alias for Result with our custom error type
pub type Result<T> = std::result::Result<T, SelectorError>;
