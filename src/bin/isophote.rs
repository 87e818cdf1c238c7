//! Batch contour-map extraction tool
//!
//! Walks a directory of FITS frames and writes, per frame, a contour map as
//! a CSV table and a false-color PNG. Thresholds are sigma multiples derived
//! from each frame's darkest corner block.
//!
//! Usage:
//! ```
//! cargo run --bin isophote -- --input data/fits --levels 10
//! ```
//!
//! See --help for detailed options.

use anyhow::Context;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use isophote::batch::{self, BatchOptions};
use isophote::contour::LevelSpec;
use log::{info, warn};
use rayon::prelude::*;
use std::fs;
use std::path::PathBuf;

/// Command line arguments for batch contour extraction
#[derive(Parser, Debug)]
#[command(
    name = "isophote",
    about = "Builds sigma-scaled contour maps from directories of FITS frames",
    long_about = None
)]
struct Args {
    /// Directory containing input FITS frames (searched recursively)
    #[arg(long, default_value = "data/fits")]
    input: PathBuf,

    /// Output directory for contour CSV tables
    #[arg(long, default_value = "data/bitmaps")]
    csv_dir: PathBuf,

    /// Output directory for rendered PNG images
    #[arg(long, default_value = "data/imgs")]
    png_dir: PathBuf,

    /// Number of sigma-spaced contour levels
    #[arg(long, default_value_t = 10, conflicts_with = "multipliers")]
    levels: usize,

    /// Explicit sigma multipliers, comma separated (e.g. 1,5,10,50,100)
    #[arg(long, value_delimiter = ',')]
    multipliers: Option<Vec<f64>>,

    /// Apply a square-root stretch to the final counts
    #[arg(long, default_value_t = false)]
    sqrt_stretch: bool,

    /// Process frames serially instead of in parallel
    #[arg(long, default_value_t = false)]
    serial: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let levels = match args.multipliers {
        Some(multipliers) => LevelSpec::Multipliers(multipliers),
        None => LevelSpec::Count(args.levels),
    };
    let options = BatchOptions {
        levels,
        sqrt_stretch: args.sqrt_stretch,
        serial: args.serial,
    };

    let files = batch::list_images(&args.input)
        .with_context(|| format!("listing frames under {}", args.input.display()))?;
    anyhow::ensure!(
        !files.is_empty(),
        "no FITS frames found under {}",
        args.input.display()
    );
    fs::create_dir_all(&args.csv_dir)?;
    fs::create_dir_all(&args.png_dir)?;
    info!("processing {} frames from {}", files.len(), args.input.display());

    let progress = ProgressBar::new(files.len() as u64);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{bar:40} {pos}/{len} {msg}")
            .expect("valid progress template"),
    );

    let run = |path: &PathBuf| {
        let result = batch::process_file(path, &args.csv_dir, &args.png_dir, &options);
        progress.inc(1);
        (path.clone(), result)
    };
    let results: Vec<_> = if args.serial {
        files.iter().map(run).collect()
    } else {
        files.par_iter().map(run).collect()
    };
    progress.finish_and_clear();

    let mut failed = 0usize;
    for (path, result) in results {
        match result {
            Ok(outcome) => info!(
                "{}: sigma {:.4}, {} levels folded",
                path.display(),
                outcome.sigma,
                outcome.levels.len()
            ),
            Err(e) => {
                failed += 1;
                warn!("skipping {}: {e}", path.display());
            }
        }
    }

    info!("{} frames processed, {} skipped", files.len() - failed, failed);
    Ok(())
}
