//! Contour-map assembly across an ordered threshold sequence.
//!
//! A contour map counts, per pixel, how many intensity thresholds that pixel
//! cleared. The builder estimates the frame's noise scale, resolves the level
//! specification into absolute thresholds, grows one connected region per
//! threshold from the fixed center seed and folds the resulting masks into an
//! integer accumulator.
//!
//! The seed is compared against a non-decreasing threshold sequence, so the
//! first level the seed fails truncates the rest: higher thresholds cannot
//! succeed either. Truncation is surfaced through the per-level diagnostics,
//! never as an error.

use log::{info, warn};
use ndarray::{Array2, ArrayView2};
use serde::{Deserialize, Serialize};

use crate::contour::noise::estimate_noise;
use crate::contour::region::grow;
use crate::error::ContourError;

/// Contour level specification: either a count of sigma-spaced levels or an
/// explicit list of sigma multipliers.
///
/// Deserializes untagged, so a config file may say `"levels": 5` or
/// `"levels": [1.0, 5.0, 10.0]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LevelSpec {
    /// `k` thresholds at `1σ, 2σ, …, kσ`.
    Count(usize),
    /// Thresholds at each multiplier times sigma, in the given order.
    /// Callers must supply increasing values for sane accumulation.
    Multipliers(Vec<f64>),
}

impl LevelSpec {
    /// Resolve the specification into absolute intensity thresholds.
    pub fn resolve(&self, sigma: f64) -> Vec<f64> {
        match self {
            LevelSpec::Count(k) => (1..=*k).map(|m| m as f64 * sigma).collect(),
            LevelSpec::Multipliers(ms) => ms.iter().map(|m| m * sigma).collect(),
        }
    }
}

/// Outcome of a single contour level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelStatus {
    /// The level grew a region of `accepted` pixels.
    Filled {
        /// Number of pixels accepted at this level.
        accepted: usize,
    },
    /// The level completed but its mask has no variation; nothing beyond the
    /// background was accepted.
    Degenerate,
    /// The seed pixel did not clear this threshold; the level sequence was
    /// truncated here.
    SeedNotHot,
}

/// Per-level diagnostic record.
#[derive(Debug, Clone)]
pub struct LevelDiagnostic {
    /// Zero-based index into the resolved threshold sequence.
    pub index: usize,
    /// Absolute intensity threshold for this level.
    pub threshold: f64,
    /// What the level produced.
    pub status: LevelStatus,
}

/// A finished contour map together with its build diagnostics.
#[derive(Debug)]
pub struct ContourOutcome {
    /// Per-pixel count of thresholds cleared.
    pub map: Array2<u32>,
    /// Noise scale the thresholds were derived from.
    pub sigma: f64,
    /// Resolved absolute thresholds, in processing order.
    pub thresholds: Vec<f64>,
    /// One record per level actually processed; truncated levels after the
    /// first cold seed are absent.
    pub levels: Vec<LevelDiagnostic>,
}

/// Builds contour maps from square intensity frames.
pub struct ContourBuilder {
    levels: LevelSpec,
    remap: Option<Box<dyn Fn(f64) -> f64 + Send + Sync>>,
}

impl ContourBuilder {
    /// Create a builder for the given level specification.
    pub fn new(levels: LevelSpec) -> Self {
        Self {
            levels,
            remap: None,
        }
    }

    /// Install an intensity remap applied per-cell to the final counts
    /// before they leave the builder. The result is truncated back to an
    /// integer, so e.g. a square-root stretch maps a count of 9 to 3.
    pub fn with_remap<F>(mut self, remap: F) -> Self
    where
        F: Fn(f64) -> f64 + Send + Sync + 'static,
    {
        self.remap = Some(Box::new(remap));
        self
    }

    /// Build the contour map for `grid`.
    ///
    /// # Errors
    ///
    /// Propagates [`ContourError`] from noise estimation when the frame is
    /// non-square or too small for corner blocks. Cold seeds and empty
    /// threshold sequences are diagnostics, not errors.
    pub fn build(&self, grid: &ArrayView2<f64>) -> Result<ContourOutcome, ContourError> {
        let sigma = estimate_noise(grid)?;
        let thresholds = self.levels.resolve(sigma);
        let frame_size = grid.nrows();
        let seed = (frame_size / 2, frame_size / 2);

        let mut map = Array2::<u32>::zeros((frame_size, frame_size));
        let mut levels = Vec::with_capacity(thresholds.len());

        if thresholds.is_empty() {
            warn!("level spec resolved to zero thresholds; returning an all-zero contour map");
        }

        for (index, &threshold) in thresholds.iter().enumerate() {
            let outcome = grow(grid, seed, threshold);

            let status = if !outcome.seed_hot {
                LevelStatus::SeedNotHot
            } else {
                let accepted = outcome.mask.accepted_count();
                if accepted == 0 {
                    LevelStatus::Degenerate
                } else {
                    LevelStatus::Filled { accepted }
                }
            };

            map += &outcome.mask.to_binary();
            levels.push(LevelDiagnostic {
                index,
                threshold,
                status,
            });

            match status {
                LevelStatus::SeedNotHot => {
                    info!(
                        "seed below threshold {threshold:.4} at level {index}; \
                         skipping {} remaining levels",
                        thresholds.len() - index - 1
                    );
                    break;
                }
                LevelStatus::Degenerate => {
                    warn!("level {index} (threshold {threshold:.4}) produced a degenerate mask");
                }
                LevelStatus::Filled { accepted } => {
                    info!("level {index} (threshold {threshold:.4}): {accepted} pixels accepted");
                }
            }
        }

        if let Some(remap) = &self.remap {
            map.mapv_inplace(|v| remap(v as f64) as u32);
        }

        Ok(ContourOutcome {
            map,
            sigma,
            thresholds,
            levels,
        })
    }
}
