use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;

use facefinder_core::detection::domain::detector_config::DetectorConfig;
use facefinder_core::detection::infrastructure::skin_hair_detector::SkinHairDetector;
use facefinder_core::imaging::infrastructure::image_file_reader::ImageFileReader;
use facefinder_core::imaging::infrastructure::image_file_writer::ImageFileWriter;
use facefinder_core::marking::infrastructure::outline_marker::OutlineMarker;
use facefinder_core::pipeline::batch_mark_faces_use_case::{
    load_manifest, BatchMarkFacesUseCase,
};
use facefinder_core::pipeline::mark_faces_use_case::MarkFacesUseCase;
use facefinder_core::pipeline::pipeline_logger::{PipelineLogger, StdoutPipelineLogger};
use facefinder_core::shared::bounding_box::BoundingBox;
use facefinder_core::shared::constants::{
    DEFAULT_BLOCK_SIZE, DEFAULT_MAJORITY, DEFAULT_MIN_COMPONENT_SIZE, IMAGE_EXTENSIONS,
};

/// Finds faces as skin regions bordering hair and outlines them in red.
#[derive(Parser)]
#[command(name = "facefinder")]
struct Cli {
    /// Input image file (omit with --batch).
    input: Option<PathBuf>,

    /// Output image file (required unless --batch is used).
    output: Option<PathBuf>,

    /// Side length of a classification block, in pixels.
    #[arg(long, default_value_t = DEFAULT_BLOCK_SIZE)]
    block_size: u32,

    /// Components with fewer blocks are ignored.
    #[arg(long, default_value_t = DEFAULT_MIN_COMPONENT_SIZE)]
    min_component_size: usize,

    /// Fraction of a block's pixels that must match (0.0 exclusive to 1.0).
    #[arg(long, default_value_t = DEFAULT_MAJORITY)]
    majority: f64,

    /// JSON manifest of {input, output, block_size, min_component_size, majority} jobs.
    #[arg(long, conflicts_with_all = ["input", "output"])]
    batch: Option<PathBuf>,

    /// Print each face box to stdout as x0,y0,x1,y1.
    #[arg(long)]
    print_boxes: bool,
}

impl Cli {
    fn detector_config(&self) -> DetectorConfig {
        DetectorConfig::new(self.block_size, self.min_component_size, self.majority)
    }
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    validate(&cli)?;

    let mut logger = StdoutPipelineLogger::new(1);
    let result = match (&cli.batch, &cli.input, &cli.output) {
        (Some(manifest), _, _) => run_batch(manifest, &mut logger),
        (None, Some(input), Some(output)) => run_single(&cli, input, output, &mut logger),
        _ => Err("Input and output files are required unless --batch is used".into()),
    };
    logger.summary();
    result
}

fn run_single(
    cli: &Cli,
    input: &Path,
    output: &Path,
    logger: &mut dyn PipelineLogger,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut use_case = build_use_case(&cli.detector_config())?;
    let faces = use_case.execute(input, output, logger)?;
    logger.progress(1, 1);

    if cli.print_boxes {
        print_boxes(&faces);
    }
    log::info!("Output written to {}", output.display());
    Ok(())
}

fn run_batch(
    manifest: &Path,
    logger: &mut dyn PipelineLogger,
) -> Result<(), Box<dyn std::error::Error>> {
    let jobs = load_manifest(manifest)?;
    log::info!("Loaded {} job(s) from {}", jobs.len(), manifest.display());

    let report = BatchMarkFacesUseCase::new(Box::new(build_use_case)).execute(&jobs, logger);
    if report.is_success() {
        Ok(())
    } else {
        Err(format!("{} of {} job(s) failed", report.failed.len(), jobs.len()).into())
    }
}

fn build_use_case(
    config: &DetectorConfig,
) -> Result<MarkFacesUseCase, Box<dyn std::error::Error>> {
    Ok(MarkFacesUseCase::new(
        Box::new(ImageFileReader::new()),
        Box::new(ImageFileWriter::new()),
        Box::new(SkinHairDetector::new(*config)?),
        Box::new(OutlineMarker::default()),
    ))
}

fn print_boxes(faces: &[BoundingBox]) {
    for face in faces {
        println!("{},{},{},{}", face.min.x, face.min.y, face.max.x, face.max.y);
    }
}

fn validate(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(manifest) = &cli.batch {
        if !manifest.exists() {
            return Err(format!("Batch manifest not found: {}", manifest.display()).into());
        }
        return Ok(());
    }

    let Some(input) = &cli.input else {
        return Err("Input file is required unless --batch is used".into());
    };
    if !input.exists() {
        return Err(format!("Input file not found: {}", input.display()).into());
    }
    let Some(output) = &cli.output else {
        return Err("Output file is required unless --batch is used".into());
    };
    if !is_image(output) {
        return Err(format!(
            "Output must have an image extension ({}), got {}",
            IMAGE_EXTENSIONS.join(", "),
            output.display()
        )
        .into());
    }
    cli.detector_config().validate()?;
    Ok(())
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}
