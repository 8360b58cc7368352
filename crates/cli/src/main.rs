//! Grainseg CLI - grain segmentation and morphometry for micrographs

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Instant;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use grainseg_algorithms::pipeline::{segment_and_measure, PipelineParams};
use grainseg_algorithms::preprocess::to_intensity;
use grainseg_core::{Grid, Micrograph, Rgb8};

mod export;
mod render;

// ─── CLI structure ──────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "grainseg")]
#[command(author, version, about = "Grain segmentation for metallurgical micrographs", long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show information about a micrograph
    Info {
        /// Input image file
        input: PathBuf,
    },
    /// Segment grains and export per-grain measurements
    Segment {
        /// Input image file (grayscale or RGB)
        input: PathBuf,
        /// Output CSV file with one row per grain
        output: PathBuf,
        /// Gaussian blur strength in pixels
        #[arg(short, long, default_value = "2.0")]
        sigma: f64,
        /// Local threshold window side (even values are bumped to odd)
        #[arg(short, long, default_value = "35")]
        block_size: usize,
        /// Multiplier applied to the local mean threshold
        #[arg(short, long, default_value = "1.0")]
        threshold_factor: f64,
        /// Minimum grain area in pixels (0 keeps everything)
        #[arg(short, long, default_value = "64")]
        min_size: usize,
        /// Maximum hole area to fill in pixels (0 fills nothing)
        #[arg(long, default_value = "64")]
        hole_size: usize,
        /// Segment the dark phase instead of the bright one
        #[arg(short, long)]
        invert: bool,
        /// Also write the cleaned binary mask as a PNG
        #[arg(long)]
        mask: Option<PathBuf>,
        /// Also write the colorized label map as a PNG
        #[arg(long)]
        labels: Option<PathBuf>,
    },
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

fn read_micrograph(path: &PathBuf) -> Result<Micrograph> {
    let img = image::open(path).with_context(|| format!("Failed to read {}", path.display()))?;

    let micrograph = match img {
        image::DynamicImage::ImageLuma8(buf) => {
            let (width, height) = buf.dimensions();
            let grid = Grid::from_vec(buf.into_raw(), height as usize, width as usize)?;
            Micrograph::Gray(grid)
        }
        other => {
            let buf = other.to_rgb8();
            let (width, height) = buf.dimensions();
            let pixels: Vec<Rgb8> = buf.pixels().map(|p| Rgb8(p.0)).collect();
            let grid = Grid::from_vec(pixels, height as usize, width as usize)?;
            Micrograph::Rgb(grid)
        }
    };

    let (rows, cols) = micrograph.shape();
    info!("Input: {} x {}, {} channel(s)", cols, rows, micrograph.channels());
    Ok(micrograph)
}

// ─── Main ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    match cli.command {
        Commands::Info { input } => {
            let micrograph = read_micrograph(&input)?;
            let (rows, cols) = micrograph.shape();
            let intensity = to_intensity(&micrograph);
            let stats = intensity.statistics();

            println!("File: {}", input.display());
            println!("Dimensions: {} x {} ({} pixels)", cols, rows, rows * cols);
            println!("Channels: {}", micrograph.channels());
            println!("\nIntensity statistics (normalized to [0, 1]):");
            if let Some(min) = stats.min {
                println!("  Min: {:.4}", min);
            }
            if let Some(max) = stats.max {
                println!("  Max: {:.4}", max);
            }
            if let Some(mean) = stats.mean {
                println!("  Mean: {:.4}", mean);
            }
        }

        Commands::Segment {
            input,
            output,
            sigma,
            block_size,
            threshold_factor,
            min_size,
            hole_size,
            invert,
            mask,
            labels,
        } => {
            let params = PipelineParams {
                sigma,
                block_size,
                threshold_factor,
                min_size,
                hole_size,
            };

            let micrograph = read_micrograph(&input)?;
            let start = Instant::now();
            let seg = segment_and_measure(&micrograph, &params, invert)
                .context("Segmentation failed")?;
            let elapsed = start.elapsed();

            info!("Detected {} grain(s)", seg.num_grains);
            export::write_region_csv(&seg, &output).context("Failed to write CSV")?;

            if let Some(mask_path) = mask {
                render::save_mask_png(&seg.cleaned_mask, &mask_path)?;
                info!("Mask saved to: {}", mask_path.display());
            }
            if let Some(labels_path) = labels {
                render::save_labels_png(&seg.label_map, &labels_path)?;
                info!("Label map saved to: {}", labels_path.display());
            }

            println!("Measurements saved to: {}", output.display());
            println!("  Grains: {}", seg.num_grains);
            println!("  Processing time: {:.2?}", elapsed);
        }
    }

    Ok(())
}
