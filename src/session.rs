// src/session.rs - Replaying recorded pointer sessions over images, one file or a whole directory

use std::path::{Path, PathBuf};

use log::{error, info, warn};
use rayon::prelude::*;

use crate::config::Config;
use crate::display::DisplaySurface;
use crate::errors::{Result, SelectorError};
use crate::geometry::{ImageLayout, Rectangle};
use crate::image_io::{get_image_files_in_dir, save_image};
use crate::output::{write_request_json, write_selection_csv};
use crate::pointer::{load_event_file, ScriptStep};
use crate::request::DiagnosticRequest;
use crate::selector::AreaSelector;

/// Extensions tried, in order, when looking for an image's event script
pub const EVENT_SCRIPT_EXTENSIONS: [&str; 2] = ["events", "json"];

/// Result of replaying one session
#[derive(Debug, Clone, PartialEq)]
pub struct SessionOutcome {
    pub filename: String,
    pub layout: Option<ImageLayout>,
    /// Finalized rectangle in rendered coordinates
    pub selection: Option<Rectangle>,
    pub request: Option<DiagnosticRequest>,
}

/// Feed script steps into the selector and return the finalized rectangle.
///
/// With `fixed_layout` set, `load` steps reload that layout instead of their own.
pub fn run_session(
    selector: &mut AreaSelector,
    steps: &[ScriptStep],
    fixed_layout: Option<ImageLayout>,
) -> Option<Rectangle> {
    for step in steps {
        match step {
            ScriptStep::Load { load } => selector.load_image(fixed_layout.unwrap_or(*load)),
            ScriptStep::Pointer(event) => {
                selector.handle(event);
            }
        }
    }

    selector.selection()
}

/// Replay a session without an image file: the script must `load` a layout first
pub fn process_layout_session(steps: &[ScriptStep], config: &Config) -> SessionOutcome {
    let mut selector = AreaSelector::from_config(config);
    let selection = run_session(&mut selector, steps, None);

    SessionOutcome {
        filename: String::new(),
        layout: selector.layout().copied(),
        selection,
        request: None,
    }
}

fn file_stem(filename: &str) -> String {
    Path::new(filename)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(filename)
        .to_string()
}

/// Replay a session over a displayed image and write its outputs under the image's stem.
///
/// Writes the request body, overlay and crop when an area was selected.
/// A missing selection is reported, not treated as a failure.
pub fn process_image(
    surface: &DisplaySurface,
    steps: &[ScriptStep],
    config: &Config,
    debug: bool,
) -> Result<SessionOutcome> {
    let filename = surface.info().filename.clone();
    process_image_as(surface, steps, config, debug, &filename, &file_stem(&filename))
}

/// Same as [`process_image`], reporting the outcome as `label` and naming
/// every output file after `output_name` (which may contain `/`).
pub fn process_image_as(
    surface: &DisplaySurface,
    steps: &[ScriptStep],
    config: &Config,
    debug: bool,
    label: &str,
    output_name: &str,
) -> Result<SessionOutcome> {
    let mut selector = AreaSelector::from_config(config);
    selector.load_image(surface.layout());
    let selection = run_session(&mut selector, steps, Some(surface.layout()));

    let info = surface.info();
    let output_dir = config.output_dir();

    if debug {
        let overlay = surface.render_overlay(&selector.selection_state(), config.selection_color_rgb);
        save_image(&overlay, output_dir.join("debug").join(format!("{}_state.png", output_name)))?;
    }

    let request = match DiagnosticRequest::new(Some(info), selection, config.coordinate_space) {
        Ok(request) => request,
        Err(SelectorError::AreaNotSelected) => {
            warn!("{}: {}", label, SelectorError::AreaNotSelected);
            return Ok(SessionOutcome {
                filename: label.to_string(),
                layout: Some(surface.layout()),
                selection: None,
                request: None,
            });
        }
        Err(e) => return Err(e),
    };

    let request_path = write_request_json(&request, &output_dir, output_name)?;
    info!("{}: request written to {}", label, request_path.display());

    if let Some(rect) = selection {
        let overlay = surface.render_overlay(&selector.selection_state(), config.selection_color_rgb);
        save_image(&overlay, output_dir.join("overlays").join(format!("{}.png", output_name)))?;
        save_image(&surface.crop(&rect), output_dir.join("crops").join(format!("{}.png", output_name)))?;
    }

    Ok(SessionOutcome {
        filename: label.to_string(),
        layout: Some(surface.layout()),
        selection,
        request: Some(request),
    })
}

/// Find the event script recorded next to an image.
///
/// `leaf.png.events` wins over `leaf.events`, so same-stem images can carry their own script.
pub fn events_path_for(image_path: &Path) -> Option<PathBuf> {
    let full_name = EVENT_SCRIPT_EXTENSIONS.iter().map(|ext| {
        let mut name = image_path.as_os_str().to_owned();
        name.push(".");
        name.push(ext);
        PathBuf::from(name)
    });
    let stem_name = EVENT_SCRIPT_EXTENSIONS
        .iter()
        .map(|ext| image_path.with_extension(ext));

    full_name.chain(stem_name).find(|candidate| candidate.is_file())
}

/// Path of `path` below `root`, `/`-separated, extension kept
pub fn relative_label(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

struct BatchJob {
    image: PathBuf,
    events: PathBuf,
    label: String,
}

fn process_job(job: &BatchJob, config: &Config, debug: bool) -> Result<SessionOutcome> {
    let surface = DisplaySurface::load(&job.image, config)?;
    let steps = load_event_file(&job.events)?;
    process_image_as(&surface, &steps, config, debug, &job.label, &job.label)
}

/// Process every image in `dir` that has an event script beside it, then write the CSV summary.
///
/// Outputs and CSV rows are named by the image's path relative to `dir`.
pub fn process_directory<P: AsRef<Path>>(dir: P, config: &Config, debug: bool) -> Result<Vec<SessionOutcome>> {
    let root = dir.as_ref();
    let image_files = get_image_files_in_dir(root)?;
    info!("Found {} image files", image_files.len());

    let jobs: Vec<BatchJob> = image_files
        .into_iter()
        .filter_map(|image| match events_path_for(&image) {
            Some(events) => Some(BatchJob {
                label: relative_label(root, &image),
                image,
                events,
            }),
            None => {
                warn!("Skipping {}: no event script", image.display());
                None
            }
        })
        .collect();

    let run = |job: &BatchJob| {
        info!("Processing: {}", job.image.display());
        match process_job(job, config, debug) {
            Ok(outcome) => Some(outcome),
            Err(e) => {
                error!("Error processing {}: {}", job.image.display(), e);
                None
            }
        }
    };

    let mut outcomes: Vec<SessionOutcome> = if config.use_parallel {
        jobs.par_iter().filter_map(run).collect()
    } else {
        jobs.iter().filter_map(run).collect()
    };
    outcomes.sort_by(|a, b| a.filename.cmp(&b.filename));

    let csv_path = write_selection_csv(&outcomes, config.output_dir())?;
    info!(
        "{} of {} images have an affected area; summary at {}",
        outcomes.iter().filter(|o| o.selection.is_some()).count(),
        outcomes.len(),
        csv_path.display()
    );

    Ok(outcomes)
}
