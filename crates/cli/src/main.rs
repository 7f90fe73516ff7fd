mod settings;

use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;

use face_censor_core::censoring::domain::region_censor::OverlapMode;
use face_censor_core::censoring::infrastructure::censor_factory::CensorMethod;
use face_censor_core::detection::domain::face_detector::FaceDetector;
use face_censor_core::detection::infrastructure::detector_slot::{DetectorSlot, LoadResult};
use face_censor_core::detection::infrastructure::json_file_detector::JsonFileDetector;
use face_censor_core::imaging::infrastructure::image_file_reader::ImageFileReader;
use face_censor_core::imaging::infrastructure::image_file_writer::ImageFileWriter;
use face_censor_core::pipeline::censor_image_use_case::{CensorImageUseCase, RenderTarget};
use face_censor_core::pipeline::censor_logger::LogCensorLogger;
use face_censor_core::pipeline::censor_session::CensorOptions;
use face_censor_core::shared::block_size::BlockSize;
use face_censor_core::shared::constants::{
    DEFAULT_OUTPUT_NAME, IMAGE_EXTENSIONS, MAX_INTERACTIVE_BLOCK_SIZE, MIN_INTERACTIVE_BLOCK_SIZE,
};

use settings::Settings;

/// Pixelate detected faces in a still image.
#[derive(Parser)]
#[command(name = "face-censor")]
struct Cli {
    /// Input image file.
    input: PathBuf,

    /// Output image file (default: censored-image.png next to the input).
    output: Option<PathBuf>,

    /// JSON file with face detector output for the input image.
    #[arg(long)]
    detections: PathBuf,

    /// Pixelation block size in pixels. Several comma-separated sizes write
    /// one output per size.
    #[arg(long, value_delimiter = ',')]
    block_size: Option<Vec<u32>>,

    /// Ignore faces scored below this confidence (0.0-1.0).
    #[arg(long)]
    confidence: Option<f64>,

    /// Overlapping regions: compound or isolated.
    #[arg(long)]
    overlap: Option<String>,

    /// Censor method: pixelation.
    #[arg(long)]
    method: Option<String>,

    /// Persist the effective options as the new defaults.
    #[arg(long)]
    save_settings: bool,
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

    let settings = resolve_settings(&cli, Settings::load())?;
    if cli.save_settings {
        let path = settings.save()?;
        log::info!("Settings saved to {}", path.display());
    }

    let options = CensorOptions {
        method: settings.method,
        block_size: BlockSize::new(settings.block_size)?,
        overlap: settings.overlap,
    };
    let sizes = block_sizes(&cli, &settings)?;
    let targets = render_targets(&cli.input, cli.output.as_deref(), &sizes);
    ensure_input_preserved(&cli.input, &targets)?;

    let detector = build_detector(&cli.detections)?;
    let mut use_case = CensorImageUseCase::new(
        Box::new(ImageFileReader::new()),
        Box::new(ImageFileWriter::new()),
        detector,
        options,
        settings.min_confidence,
        Box::new(LogCensorLogger::default()),
    );
    let summary = use_case.execute_targets(&cli.input, &targets)?;

    for target in &targets {
        log::info!("Output written to {}", target.path.display());
    }
    if summary.regions_skipped > 0 {
        log::info!(
            "{} of {} face(s) censored ({} outside the image)",
            summary.regions_censored,
            summary.faces_detected,
            summary.regions_skipped
        );
    }
    Ok(())
}

fn build_detector(path: &Path) -> Result<Box<dyn FaceDetector>, Box<dyn std::error::Error>> {
    log::info!("Loading face detections from {}", path.display());
    let slot = DetectorSlot::new();
    let path = path.to_path_buf();
    slot.load_blocking(move || load_json_detector(&path))?;
    Ok(Box::new(slot))
}

fn load_json_detector(path: &Path) -> LoadResult {
    let detector = JsonFileDetector::open(path)?;
    Ok(Box::new(detector))
}

/// Applies command-line overrides on top of the persisted settings.
fn resolve_settings(cli: &Cli, saved: Settings) -> Result<Settings, Box<dyn std::error::Error>> {
    let mut settings = saved;
    if let Some(method) = &cli.method {
        settings.method = method.parse::<CensorMethod>()?;
    }
    if let Some(overlap) = &cli.overlap {
        settings.overlap = overlap.parse::<OverlapMode>()?;
    }
    if let Some(first) = cli.block_size.as_ref().and_then(|sizes| sizes.first()) {
        settings.block_size = *first;
    }
    if cli.confidence.is_some() {
        settings.min_confidence = cli.confidence;
    }
    Ok(settings)
}

fn block_sizes(
    cli: &Cli,
    settings: &Settings,
) -> Result<Vec<BlockSize>, Box<dyn std::error::Error>> {
    let raw = match &cli.block_size {
        Some(sizes) if !sizes.is_empty() => sizes.clone(),
        _ => vec![settings.block_size],
    };
    let mut sizes = Vec::with_capacity(raw.len());
    for size in raw {
        let block_size = BlockSize::new(size)?;
        if !(MIN_INTERACTIVE_BLOCK_SIZE..=MAX_INTERACTIVE_BLOCK_SIZE).contains(&size) {
            log::warn!(
                "Block size {block_size} is outside the usual {MIN_INTERACTIVE_BLOCK_SIZE}-{MAX_INTERACTIVE_BLOCK_SIZE}px range"
            );
        }
        sizes.push(block_size);
    }
    Ok(sizes)
}

/// One target per block size. With several sizes each output name gets a
/// `_b<size>` suffix before the extension.
fn render_targets(input: &Path, output: Option<&Path>, sizes: &[BlockSize]) -> Vec<RenderTarget> {
    let base = match output {
        Some(path) => path.to_path_buf(),
        None => default_output(input),
    };
    if sizes.len() == 1 {
        return vec![RenderTarget {
            block_size: sizes[0],
            path: base,
        }];
    }
    sizes
        .iter()
        .map(|&block_size| RenderTarget {
            block_size,
            path: suffixed(&base, block_size.get()),
        })
        .collect()
}

/// `censored-image.png` next to the input, or `<stem>-censored.png` when the
/// input itself carries that name.
fn default_output(input: &Path) -> PathBuf {
    let candidate = input.with_file_name(DEFAULT_OUTPUT_NAME);
    if !same_file(&candidate, input) {
        return candidate;
    }
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("image");
    input.with_file_name(format!("{stem}-censored.png"))
}

/// The source image is never written to.
fn ensure_input_preserved(
    input: &Path,
    targets: &[RenderTarget],
) -> Result<(), Box<dyn std::error::Error>> {
    match targets.iter().find(|t| same_file(&t.path, input)) {
        Some(target) => Err(format!(
            "Output {} would overwrite the input image",
            target.path.display()
        )
        .into()),
        None => Ok(()),
    }
}

/// Compares resolved paths when both exist, otherwise the paths as given.
fn same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}

fn suffixed(path: &Path, block_size: u32) -> PathBuf {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("censored-image");
    let name = match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => format!("{stem}_b{block_size}.{ext}"),
        None => format!("{stem}_b{block_size}"),
    };
    path.with_file_name(name)
}

fn validate(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    if !cli.input.exists() {
        return Err(format!("Input file not found: {}", cli.input.display()).into());
    }
    if !is_image(&cli.input) {
        return Err(format!(
            "Unsupported input '{}'; expected one of: {}",
            cli.input.display(),
            IMAGE_EXTENSIONS.join(", ")
        )
        .into());
    }
    if !cli.detections.exists() {
        return Err(format!("Detections file not found: {}", cli.detections.display()).into());
    }
    if let Some(output) = &cli.output {
        if same_file(output, &cli.input) {
            return Err(format!(
                "Output must differ from the input image: {}",
                output.display()
            )
            .into());
        }
        if !is_image(output) {
            return Err(format!(
                "Unsupported output format '{}'; expected one of: {}",
                output.display(),
                IMAGE_EXTENSIONS.join(", ")
            )
            .into());
        }
    }
    if let Some(sizes) = &cli.block_size {
        if let Some(zero) = sizes.iter().find(|&&s| s == 0) {
            return Err(format!("Block size must be a positive integer, got {zero}").into());
        }
    }
    if let Some(confidence) = cli.confidence {
        if !(0.0..=1.0).contains(&confidence) {
            return Err(
                format!("Confidence must be between 0.0 and 1.0, got {confidence}").into(),
            );
        }
    }
    if let Some(overlap) = &cli.overlap {
        overlap.parse::<OverlapMode>()?;
    }
    if let Some(method) = &cli.method {
        method.parse::<CensorMethod>()?;
    }
    Ok(())
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}
