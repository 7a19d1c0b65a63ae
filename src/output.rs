use std::fs;
use std::path::{Path, PathBuf};
use csv::Writer;
use serde_json::json;

use crate::config::CoordinateSpace;
use crate::errors::Result;
use crate::request::{DiagnosticRequest, PlantRecord};
use crate::session::SessionOutcome;

/// Write a diagnostic request body to `<output>/requests/<filename>.json`
pub fn write_request_json<P: AsRef<Path>>(
    request: &DiagnosticRequest,
    output_dir: P,
    filename: &str,
) -> Result<PathBuf> {
    let output_path = output_dir.as_ref().join("requests").join(format!("{}.json", filename));

    if let Some(parent) = output_path.parent() {
        fs::create_dir_all(parent)?;
    }

    fs::write(&output_path, request.to_json()?)?;

    Ok(output_path)
}

/// Write a validated plant record with its upload metadata to `<output>/plants/<filename>.json`
pub fn write_plant_json<P: AsRef<Path>>(
    record: &PlantRecord,
    timestamp_millis: u128,
    output_dir: P,
    filename: &str,
) -> Result<PathBuf> {
    let output_path = output_dir.as_ref().join("plants").join(format!("{}.json", filename));

    if let Some(parent) = output_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let body = json!({
        "plant": record,
        "upload_name": record.upload_file_name(timestamp_millis),
        "mime_type": record.mime_type(),
    });
    fs::write(&output_path, serde_json::to_string_pretty(&body)?)?;

    Ok(output_path)
}

/// Write one row per processed image to `<output>/selections.csv`
pub fn write_selection_csv<P: AsRef<Path>>(
    outcomes: &[SessionOutcome],
    output_dir: P,
) -> Result<PathBuf> {
    let output_path = output_dir.as_ref().join("selections.csv");

    if let Some(parent) = output_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut writer = Writer::from_path(&output_path)?;

    writer.write_record([
        "Image",
        "Accepted",
        "Space",
        "X",
        "Y",
        "Width",
        "Height",
    ])?;

    // Submitted coordinates, in the request's own space
    for outcome in outcomes {
        match &outcome.request {
            Some(request) => {
                let rect = request.affected_area;
                let space = match request.coordinate_space {
                    CoordinateSpace::Rendered => "rendered",
                    CoordinateSpace::Source => "source",
                };
                writer.write_record(&[
                    outcome.filename.clone(),
                    "true".to_string(),
                    space.to_string(),
                    format!("{:.2}", rect.x),
                    format!("{:.2}", rect.y),
                    format!("{:.2}", rect.width),
                    format!("{:.2}", rect.height),
                ])?
            }
            None => writer.write_record(&[
                outcome.filename.clone(),
                "false".to_string(),
                String::new(),
                String::new(),
                String::new(),
                String::new(),
                String::new(),
            ])?,
        }
    }

    writer.flush()?;

    Ok(output_path)
}
