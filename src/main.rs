mod gui;

use std::path::{Path, PathBuf};
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use clap::{Parser, ValueEnum};
use log::{info, warn};

use plant_area_selector_lib::output::write_plant_json;
use plant_area_selector_lib::pointer::load_event_file;
use plant_area_selector_lib::session::events_path_for;
use plant_area_selector_lib::{
    process_directory, process_image, process_layout_session, Config, CoordinateSpace,
    DisplaySurface, PlantRecord, Result, SelectorError,
};

/// Command-line arguments
#[derive(Parser, Debug)]
#[clap(author, version, about = "Affected-area selection for plant disease diagnosis")]
struct Args {
    /// Path to input image or directory
    #[clap(short, long)]
    input: Option<String>,

    /// Event script to replay (defaults to <image>.events or <image>.json)
    #[clap(short, long)]
    events: Option<String>,

    /// Path to output directory
    #[clap(short, long)]
    output: Option<String>,

    /// Path to configuration file
    #[clap(short, long, default_value = "config.toml")]
    config: String,

    /// Minimum selection side in pixels (overwrites config)
    #[clap(short, long)]
    min_size: Option<f64>,

    /// Coordinate space of submitted rectangles (overwrites config)
    #[clap(short = 's', long)]
    coordinate_space: Option<CoordinateSpaceArg>,

    /// Plant name; writes a plant record next to the request
    #[clap(long)]
    plant_name: Option<String>,

    #[clap(long)]
    species: Option<String>,

    #[clap(long)]
    location: Option<String>,

    #[clap(long)]
    user_id: Option<String>,

    /// Enable debug mode (save intermediate images and log more)
    #[clap(short, long)]
    debug: bool,

    /// Open the interactive selection window
    #[clap(long)]
    gui: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CoordinateSpaceArg {
    Rendered,
    Source,
}

fn timestamp_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0)
}

/// Plant record from the command line, validated, when `--plant-name` was given
fn plant_record(args: &Args, image_path: &Path) -> Result<Option<PlantRecord>> {
    let Some(name) = args.plant_name.clone() else {
        return Ok(None);
    };

    PlantRecord {
        name,
        species: args.species.clone(),
        location: args.location.clone(),
        user_id: args.user_id.clone(),
        image_path: Some(image_path.to_path_buf()),
    }
    .validate()
    .map(Some)
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_level = if args.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();

    let mut config = Config::from_file_or_default(&args.config)?;

    if let Some(input) = args.input.clone() {
        config.input_path = input;
    }

    if let Some(output) = args.output.clone() {
        config.output_base_dir = output;
    }

    if let Some(min_size) = args.min_size {
        config.min_selection_size = min_size;
    }

    if let Some(space) = args.coordinate_space {
        config.coordinate_space = match space {
            CoordinateSpaceArg::Rendered => CoordinateSpace::Rendered,
            CoordinateSpaceArg::Source => CoordinateSpace::Source,
        };
    }

    config.validate()?;

    let input_path = PathBuf::from(&config.input_path);

    if args.gui {
        if input_path.is_file() {
            info!("Launching GUI with image: {}", input_path.display());
            return gui::run_gui(input_path, config);
        }
        return Err(SelectorError::Config(
            "GUI mode requires a single input image, not a directory".to_string(),
        ));
    }

    let start_time = Instant::now();

    if let (None, Some(events)) = (&args.input, &args.events) {
        // No image: the script supplies its own layout with `load` lines
        let steps = load_event_file(events)?;
        let outcome = process_layout_session(&steps, &config);
        match outcome.selection {
            Some(rect) => println!("{}", serde_json::to_string_pretty(&rect)?),
            None => println!("{}", SelectorError::AreaNotSelected),
        }
    } else if input_path.is_file() {
        let events_path = match args.events.as_ref() {
            Some(events) => PathBuf::from(events),
            None => events_path_for(&input_path).ok_or_else(|| {
                SelectorError::Config(format!("No event script found for {}", input_path.display()))
            })?,
        };

        // Reject a bad record before anything is written
        let record = plant_record(&args, &input_path)?;

        let surface = DisplaySurface::load(&input_path, &config)?;
        let steps = load_event_file(&events_path)?;
        let outcome = process_image(&surface, &steps, &config, args.debug)?;

        match &outcome.request {
            Some(request) => println!("{}", request.to_json()?),
            None => println!("{}", SelectorError::AreaNotSelected),
        }

        if let Some(record) = record {
            let stem = input_path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("plant");
            let path = write_plant_json(&record, timestamp_millis(), config.output_dir(), stem)?;
            info!("Plant record written to {}", path.display());
        }
    } else if input_path.is_dir() {
        if args.plant_name.is_some() {
            warn!("--plant-name is ignored when processing a directory");
        }
        process_directory(&input_path, &config, args.debug)?;
    } else {
        return Err(SelectorError::InvalidPath(input_path));
    }

    info!("Completed in {:.2} seconds", start_time.elapsed().as_secs_f64());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(extra: &[&str]) -> Args {
        let mut argv = vec!["plant_area_selector_cli", "--input", "leaf.png"];
        argv.extend_from_slice(extra);
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn blank_plant_name_is_rejected_up_front() {
        let result = plant_record(&args(&["--plant-name", "   "]), Path::new("leaf.png"));
        assert!(matches!(result, Err(SelectorError::MissingField("name"))));
    }

    #[test]
    fn plant_record_is_trimmed_and_optional() {
        assert!(plant_record(&args(&[]), Path::new("leaf.png")).unwrap().is_none());

        let record = plant_record(
            &args(&["--plant-name", " Tomato ", "--species", "  "]),
            Path::new("leaf.png"),
        )
        .unwrap()
        .unwrap();
        assert_eq!(record.name, "Tomato");
        assert_eq!(record.species, None);
        assert_eq!(record.image_path, Some(PathBuf::from("leaf.png")));
    }
}
