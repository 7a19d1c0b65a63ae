// src/config.rs - Selector configuration loaded from TOML

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::errors::{Result, SelectorError};
use crate::validator::MIN_SELECTION_SIZE;

/// Configuration for the affected-area selector
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    #[serde(default = "default_input_path")]
    pub input_path: String,

    #[serde(default = "default_output_base_dir")]
    pub output_base_dir: String,

    /// Largest rendered size; images are fit inside it keeping their aspect ratio
    #[serde(default = "default_display_max_dimensions")]
    pub display_max_dimensions: Option<[u32; 2]>,

    /// Smallest accepted side, in rendered pixels
    #[serde(default = "default_min_selection_size")]
    pub min_selection_size: f64,

    #[serde(default)]
    pub coordinate_space: CoordinateSpace,

    #[serde(default = "default_selection_color_rgb")]
    pub selection_color_rgb: [u8; 3],

    #[serde(default = "default_parallel")]
    pub use_parallel: bool,
}

/// Pixel grid the submitted rectangle is expressed in
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum CoordinateSpace {
    /// Coordinates as drawn on the displayed image
    #[default]
    Rendered,
    /// Scaled to the source file's pixel dimensions
    Source,
}

fn default_input_path() -> String {
    "./input".to_string()
}

fn default_output_base_dir() -> String {
    "./output".to_string()
}

fn default_display_max_dimensions() -> Option<[u32; 2]> {
    Some([800, 600])
}

fn default_min_selection_size() -> f64 {
    MIN_SELECTION_SIZE
}

fn default_selection_color_rgb() -> [u8; 3] {
    [255, 0, 0] // Red
}

fn default_parallel() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_path: default_input_path(),
            output_base_dir: default_output_base_dir(),
            display_max_dimensions: default_display_max_dimensions(),
            min_selection_size: default_min_selection_size(),
            coordinate_space: CoordinateSpace::default(),
            selection_color_rgb: default_selection_color_rgb(),
            use_parallel: default_parallel(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            SelectorError::Config(format!("Failed to read config file '{}': {}", path.display(), e))
        })?;

        toml::from_str(&content).map_err(|source| SelectorError::ConfigLoad {
            source,
            path: path.to_path_buf(),
        })
    }

    /// Load `path` if it exists, otherwise fall back to defaults
    pub fn from_file_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::from_file(path)
        } else {
            log::warn!("Config file '{}' not found, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if !self.min_selection_size.is_finite() || self.min_selection_size <= 0.0 {
            return Err(SelectorError::Config(
                "min_selection_size must be a positive number".to_string(),
            ));
        }

        if let Some([width, height]) = self.display_max_dimensions {
            if width == 0 || height == 0 {
                return Err(SelectorError::Config(
                    "display_max_dimensions must be non-zero".to_string(),
                ));
            }
        }

        if self.output_base_dir.trim().is_empty() {
            return Err(SelectorError::Config(
                "output_base_dir must not be empty".to_string(),
            ));
        }

        Ok(())
    }

    /// Output directory for request bodies, overlays and crops
    pub fn output_dir(&self) -> PathBuf {
        PathBuf::from(&self.output_base_dir)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self).map_err(|e| {
            SelectorError::Config(format!("Failed to serialize config: {}", e))
        })?;

        fs::write(path, content)?;

        Ok(())
    }
}
