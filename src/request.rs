// src/request.rs - Packaging a finalized selection for the diagnosis backend

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::CoordinateSpace;
use crate::display::ImageInfo;
use crate::errors::{Result, SelectorError};
use crate::geometry::Rectangle;

/// Body of a disease-diagnosis request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosticRequest {
    pub image: String,
    pub image_width: u32,
    pub image_height: u32,
    pub rendered_width: f64,
    pub rendered_height: f64,
    pub coordinate_space: CoordinateSpace,
    pub affected_area: Rectangle,
}

impl DiagnosticRequest {
    /// Build a request from the displayed image and the selector's finalized rectangle.
    ///
    /// Submission is blocked until an image is shown and an area has been selected.
    pub fn new(
        image: Option<&ImageInfo>,
        selection: Option<Rectangle>,
        space: CoordinateSpace,
    ) -> Result<Self> {
        let image = image.ok_or(SelectorError::NoImageLoaded)?;
        let rect = selection.ok_or(SelectorError::AreaNotSelected)?;

        let affected_area = match space {
            CoordinateSpace::Rendered => rect,
            CoordinateSpace::Source => image.to_source_space(&rect),
        };

        Ok(Self {
            image: image.filename.clone(),
            image_width: image.source_width,
            image_height: image.source_height,
            rendered_width: image.layout.width,
            rendered_height: image.layout.height,
            coordinate_space: space,
            affected_area,
        })
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// A plant to be saved together with its photo
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PlantRecord {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub species: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub user_id: Option<String>,
    pub image_path: Option<PathBuf>,
}

fn trimmed(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl PlantRecord {
    /// Check required fields and normalise the optional ones
    pub fn validate(self) -> Result<Self> {
        let name = self.name.trim().to_string();
        if name.is_empty() {
            return Err(SelectorError::MissingField("name"));
        }
        if self.image_path.is_none() {
            return Err(SelectorError::MissingField("image"));
        }

        Ok(Self {
            name,
            species: trimmed(self.species),
            location: trimmed(self.location),
            user_id: trimmed(self.user_id),
            image_path: self.image_path,
        })
    }

    fn extension(&self) -> String {
        self.image_path
            .as_deref()
            .and_then(Path::extension)
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .filter(|ext| !ext.is_empty())
            .unwrap_or_else(|| "jpg".to_string())
    }

    /// Unique name for the uploaded photo
    pub fn upload_file_name(&self, timestamp_millis: u128) -> String {
        format!("plant_{}.{}", timestamp_millis, self.extension())
    }

    pub fn mime_type(&self) -> String {
        match self.extension().as_str() {
            "jpg" => "image/jpeg".to_string(),
            ext => format!("image/{}", ext),
        }
    }
}
