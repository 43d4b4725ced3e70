//! poremet CLI - pore structure metrology for micrographs

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use poremet_algorithms::metrics::MeasurementResult;
use poremet_algorithms::morphology::{CleanupParams, CleanupStrategy, StructuringElement};
use poremet_algorithms::pipeline::{analyze, AnalysisParams};
use poremet_algorithms::regions::ExtractionParams;
use poremet_algorithms::segmentation::{SegmentationParams, ThresholdMode};
use poremet_core::{Connectivity, Grid, IntensityField};

// ─── CLI structure ──────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "poremet")]
#[command(author, version, about = "Pore structure metrology for micrographs", long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a single micrograph
    Analyze {
        /// Input image file (png, jpeg or tiff)
        input: PathBuf,

        #[command(flatten)]
        args: AnalysisArgs,
    },
    /// Analyze every image in a directory
    Batch {
        /// Input directory
        input: PathBuf,

        #[command(flatten)]
        args: AnalysisArgs,
    },
}

#[derive(Args)]
struct AnalysisArgs {
    /// Physical length of one pixel edge, in micrometres
    #[arg(short, long, default_value = "1.0")]
    pixel_size: f64,

    /// Minimum pore area in pixels
    #[arg(long, default_value = "800")]
    min_area: usize,

    /// Minimum circularity (4*pi*area / perimeter^2) in 0..1
    #[arg(long, default_value = "0.2")]
    min_circularity: f64,

    /// Skip the pre-threshold smoothing pass
    #[arg(long)]
    no_blur: bool,

    /// Treat bright pixels as pores instead of dark ones
    #[arg(long)]
    invert: bool,

    /// Use a local-mean threshold instead of global Otsu
    #[arg(long)]
    adaptive: bool,

    /// Adaptive window side length in pixels (odd, >= 3)
    #[arg(long, default_value = "31")]
    window: usize,

    /// Adaptive offset subtracted from the local mean
    #[arg(long, default_value = "10.0")]
    offset: f64,

    /// Mask cleanup strategy: morphological, size-threshold
    #[arg(long, default_value = "morphological")]
    cleanup: String,

    /// Structuring element shape: square, cross, disk
    #[arg(long, default_value = "square")]
    shape: String,

    /// Structuring element radius in pixels
    #[arg(short, long, default_value = "1")]
    radius: usize,

    /// Smallest object kept by size-threshold cleanup, in pixels
    #[arg(long, default_value = "50")]
    min_object: usize,

    /// Largest hole filled by size-threshold cleanup, in pixels
    #[arg(long, default_value = "50")]
    max_hole: usize,

    /// Pixel connectivity: four, eight
    #[arg(long, default_value = "eight")]
    connectivity: String,

    /// Skip contour tracing (no perimeters, circularity filter disabled)
    #[arg(long)]
    no_contours: bool,

    /// Emit results as JSON instead of a text report
    #[arg(long)]
    json: bool,
}

// ─── Helpers ────────────────────────────────────────────────────────────

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");
}

fn spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

fn read_micrograph(path: &Path) -> Result<IntensityField> {
    let img = image::open(path)
        .with_context(|| format!("Failed to read image: {}", path.display()))?
        .to_luma8();
    let (width, height) = img.dimensions();
    let field = Grid::from_vec(img.into_raw(), height as usize, width as usize)
        .context("Image dimensions do not match pixel data")?;
    Ok(field)
}

fn parse_se(shape: &str, radius: usize) -> Result<StructuringElement> {
    let se = match shape.to_lowercase().as_str() {
        "square" | "sq" => StructuringElement::Square(radius),
        "cross" | "cr" => StructuringElement::Cross(radius),
        "disk" | "circle" => StructuringElement::Disk(radius),
        _ => anyhow::bail!("Unknown shape: {}. Use square, cross, or disk.", shape),
    };
    se.validate()
        .map_err(|e| anyhow::anyhow!("Invalid structuring element: {}", e))?;
    Ok(se)
}

fn parse_connectivity(s: &str) -> Result<Connectivity> {
    match s.to_lowercase().as_str() {
        "four" | "4" => Ok(Connectivity::Four),
        "eight" | "8" => Ok(Connectivity::Eight),
        _ => anyhow::bail!("Unknown connectivity: {}. Use four or eight.", s),
    }
}

fn build_params(args: &AnalysisArgs) -> Result<AnalysisParams> {
    let connectivity = parse_connectivity(&args.connectivity)?;

    let mode = if args.adaptive {
        ThresholdMode::Adaptive {
            window_size: args.window,
            offset: args.offset,
        }
    } else {
        ThresholdMode::Global
    };

    let strategy = match args.cleanup.to_lowercase().as_str() {
        "morphological" | "morph" => CleanupStrategy::Morphological {
            element: parse_se(&args.shape, args.radius)?,
        },
        "size-threshold" | "size" => CleanupStrategy::SizeThreshold {
            min_object_px: args.min_object,
            max_hole_px: args.max_hole,
        },
        _ => anyhow::bail!(
            "Unknown cleanup strategy: {}. Use morphological or size-threshold.",
            args.cleanup
        ),
    };

    let params = AnalysisParams {
        pixel_size: args.pixel_size,
        min_area_px: args.min_area,
        min_circularity: args.min_circularity,
        segmentation: SegmentationParams {
            blur: !args.no_blur,
            invert: args.invert,
            mode,
        },
        cleanup: CleanupParams {
            strategy,
            connectivity,
        },
        extraction: ExtractionParams {
            connectivity,
            trace_contours: !args.no_contours,
        },
    };
    params
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid parameters: {}", e))?;
    Ok(params)
}

fn print_report(result: &MeasurementResult) {
    if result.pore_count == 0 {
        warn!("no pores passed the filters");
    }
    println!(
        "  Pores counted: {} ({} rejected)",
        result.pore_count, result.rejected_count
    );
    println!("  Mean diameter: {:.2} um", result.mean_diameter);
    println!("  Mean area: {:.2} um^2", result.mean_area);
    println!("  Porosity: {:.2} %", result.porosity_percent);
}

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "tif", "tiff"];

fn collect_images(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = std::fs::read_dir(dir)
        .with_context(|| format!("Failed to read directory: {}", dir.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| {
            path.extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
                .unwrap_or(false)
        })
        .collect();
    files.sort();
    Ok(files)
}

// ─── Main ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    match cli.command {
        Commands::Analyze { input, args } => {
            let params = build_params(&args)?;
            let pb = spinner("Reading image...");
            let field = read_micrograph(&input)?;
            pb.finish_and_clear();
            info!("Input: {} x {}", field.cols(), field.rows());

            let start = Instant::now();
            let result = analyze(&field, &params).context("Analysis failed")?;
            let elapsed = start.elapsed();

            if args.json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                println!("Image: {}", input.display());
                println!("  Dimensions: {} x {}", field.cols(), field.rows());
                print_report(&result);
                println!("  Processing time: {:.2?}", elapsed);
            }
        }

        Commands::Batch { input, args } => {
            let params = build_params(&args)?;
            let files = collect_images(&input)?;
            if files.is_empty() {
                anyhow::bail!("No images found in {}", input.display());
            }
            info!("Found {} images", files.len());

            let pb = ProgressBar::new(files.len() as u64);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("{bar:40.green} {pos}/{len} {msg}")
                    .unwrap(),
            );

            let start = Instant::now();
            // One failed image must not sink the rest of the batch.
            let outcomes: Vec<_> = files
                .par_iter()
                .map(|path| {
                    let outcome = read_micrograph(path)
                        .and_then(|field| analyze(&field, &params).context("Analysis failed"));
                    pb.inc(1);
                    (path, outcome)
                })
                .collect();
            pb.finish_and_clear();
            let elapsed = start.elapsed();

            if args.json {
                let entries: Vec<serde_json::Value> = outcomes
                    .iter()
                    .map(|(path, outcome)| match outcome {
                        Ok(result) => serde_json::json!({
                            "file": path.display().to_string(),
                            "result": result,
                        }),
                        Err(e) => serde_json::json!({
                            "file": path.display().to_string(),
                            "error": e.to_string(),
                        }),
                    })
                    .collect();
                println!("{}", serde_json::to_string_pretty(&entries)?);
            } else {
                let mut failures = 0usize;
                for (path, outcome) in &outcomes {
                    match outcome {
                        Ok(result) => {
                            println!("Image: {}", path.display());
                            print_report(result);
                        }
                        Err(e) => {
                            failures += 1;
                            warn!("{}: {:#}", path.display(), e);
                        }
                    }
                }
                println!(
                    "Processed {} images ({} failed) in {:.2?}",
                    outcomes.len() - failures,
                    failures,
                    elapsed
                );
            }
        }
    }

    Ok(())
}
