//! Batch contour-map extraction over a directory of FITS frames.
//!
//! Each frame's contour-map build is fully independent, so the batch fans
//! out across images with rayon by default. Per-frame failures (undersized
//! frames, unreadable files) are logged and skipped; the rest of the batch
//! continues.

use log::{info, warn};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::contour::{ContourBuilder, ContourOutcome, LevelSpec};
use crate::error::ContourError;
use crate::io::fits::{load_image, FitsError};
use crate::io::table::{write_contour_csv, TableError};
use crate::render::render_contour_png;

/// Errors from processing a single frame.
#[derive(Error, Debug)]
pub enum BatchError {
    /// Frame could not be loaded.
    #[error(transparent)]
    Fits(#[from] FitsError),

    /// Frame was rejected by the contour core.
    #[error(transparent)]
    Contour(#[from] ContourError),

    /// Contour table could not be written.
    #[error(transparent)]
    Table(#[from] TableError),

    /// Rendered image could not be written.
    #[error("image encoding failed: {0}")]
    Render(#[from] image::ImageError),
}

/// Batch processing options.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchOptions {
    /// Contour level specification applied to every frame.
    pub levels: LevelSpec,
    /// Apply a square-root stretch to the final counts.
    #[serde(default)]
    pub sqrt_stretch: bool,
    /// Process frames serially instead of in parallel.
    #[serde(default)]
    pub serial: bool,
}

/// What a directory run produced.
#[derive(Debug)]
pub struct BatchSummary {
    /// Frames processed to completion.
    pub processed: Vec<PathBuf>,
    /// Frames skipped, with the reason.
    pub failed: Vec<(PathBuf, String)>,
}

/// Enumerate FITS frames under `dir`, recursively, in sorted order.
pub fn list_images(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    collect_images(dir, &mut files)?;
    files.sort();
    Ok(files)
}

fn collect_images(dir: &Path, files: &mut Vec<PathBuf>) -> io::Result<()> {
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            collect_images(&path, files)?;
        } else if is_fits(&path) {
            files.push(path);
        }
    }
    Ok(())
}

fn is_fits(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("fits") || e.eq_ignore_ascii_case("fit"))
        .unwrap_or(false)
}

/// Run the full pipeline for one frame: load, build, write CSV and PNG.
///
/// Output files take the input file's stem: `ngc1300.fits` produces
/// `ngc1300.csv` and `ngc1300.png`.
pub fn process_file(
    path: &Path,
    csv_dir: &Path,
    png_dir: &Path,
    options: &BatchOptions,
) -> Result<ContourOutcome, BatchError> {
    let frame = load_image(path)?;

    let mut builder = ContourBuilder::new(options.levels.clone());
    if options.sqrt_stretch {
        builder = builder.with_remap(f64::sqrt);
    }
    let outcome = builder.build(&frame.view())?;

    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("frame");
    write_contour_csv(&outcome.map.view(), csv_dir.join(format!("{stem}.csv")))?;
    render_contour_png(&outcome.map.view(), png_dir.join(format!("{stem}.png")))?;

    Ok(outcome)
}

/// Process every FITS frame under `input`, writing one CSV table and one
/// rendered image per frame.
///
/// Frames that fail to load or are rejected by the contour core are logged
/// and recorded in the summary; they never abort the batch.
pub fn process_directory(
    input: &Path,
    csv_dir: &Path,
    png_dir: &Path,
    options: &BatchOptions,
) -> io::Result<BatchSummary> {
    let files = list_images(input)?;
    fs::create_dir_all(csv_dir)?;
    fs::create_dir_all(png_dir)?;
    info!("processing {} frames from {}", files.len(), input.display());

    let run = |path: &PathBuf| -> (PathBuf, Result<(), String>) {
        match process_file(path, csv_dir, png_dir, options) {
            Ok(outcome) => {
                info!(
                    "{}: sigma {:.4}, {} levels folded",
                    path.display(),
                    outcome.sigma,
                    outcome.levels.len()
                );
                (path.clone(), Ok(()))
            }
            Err(e) => {
                warn!("skipping {}: {e}", path.display());
                (path.clone(), Err(e.to_string()))
            }
        }
    };

    let results: Vec<_> = if options.serial {
        files.iter().map(run).collect()
    } else {
        files.par_iter().map(run).collect()
    };

    let mut summary = BatchSummary {
        processed: Vec::new(),
        failed: Vec::new(),
    };
    for (path, result) in results {
        match result {
            Ok(()) => summary.processed.push(path),
            Err(reason) => summary.failed.push((path, reason)),
        }
    }
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_list_images_filters_and_sorts() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("b.fits"), b"").unwrap();
        fs::write(dir.path().join("a.FITS"), b"").unwrap();
        fs::write(dir.path().join("c.fit"), b"").unwrap();
        fs::write(dir.path().join("notes.txt"), b"").unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("nested/d.fits"), b"").unwrap();

        let files = list_images(dir.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.strip_prefix(dir.path()).unwrap().to_str().unwrap())
            .collect();
        assert_eq!(names, vec!["a.FITS", "b.fits", "c.fit", "nested/d.fits"]);
    }

    #[test]
    fn test_missing_directory_is_an_error() {
        let dir = tempdir().unwrap();
        assert!(list_images(&dir.path().join("absent")).is_err());
    }
}
