//! Corner-block noise estimation for astronomical frames.
//!
//! The noise scale of a frame is taken from the least-illuminated of its four
//! `N/10 × N/10` corner blocks, on the assumption that the darkest corner is
//! dominated by sky background rather than source flux. The standard
//! deviation of that block is the sigma used to scale every contour
//! threshold.

use crate::error::{ContourError, MIN_FRAME_SIZE};
use ndarray::{s, ArrayView2};

/// Estimate the per-frame noise scale from the darkest corner block.
///
/// Partitions the frame into four `N/10 × N/10` corner blocks (integer floor
/// division), selects the block with the lowest mean intensity and returns
/// the population standard deviation of its values. Ties on the mean resolve
/// to the first block in (top-left, top-right, bottom-left, bottom-right)
/// order, so the result is deterministic for identical inputs.
///
/// # Errors
///
/// Returns [`ContourError::NonSquareGrid`] for non-square frames and
/// [`ContourError::InvalidGridSize`] when the frame is too small for `N/10`
/// corner blocks.
pub fn estimate_noise(grid: &ArrayView2<f64>) -> Result<f64, ContourError> {
    let (height, width) = grid.dim();
    if height != width {
        return Err(ContourError::NonSquareGrid { height, width });
    }

    let frame_size = height;
    let block = frame_size / 10;
    if block == 0 {
        return Err(ContourError::InvalidGridSize {
            size: frame_size,
            min: MIN_FRAME_SIZE,
        });
    }

    let corners = [
        grid.slice(s![..block, ..block]),
        grid.slice(s![..block, frame_size - block..]),
        grid.slice(s![frame_size - block.., ..block]),
        grid.slice(s![frame_size - block.., frame_size - block..]),
    ];

    let mut darkest = &corners[0];
    let mut darkest_mean = block_mean(darkest);
    for corner in &corners[1..] {
        let mean = block_mean(corner);
        if mean < darkest_mean {
            darkest = corner;
            darkest_mean = mean;
        }
    }

    Ok(block_std(darkest, darkest_mean))
}

fn block_mean(block: &ArrayView2<f64>) -> f64 {
    block.iter().sum::<f64>() / block.len() as f64
}

fn block_std(block: &ArrayView2<f64>, mean: f64) -> f64 {
    let variance = block.iter().map(|&v| (v - mean).powi(2)).sum::<f64>() / block.len() as f64;
    variance.sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_patterns::noisy_frame;
    use approx::assert_relative_eq;
    use ndarray::Array2;

    #[test]
    fn test_flat_frame_has_zero_noise() {
        let grid = Array2::from_elem((20, 20), 7.5);
        let sigma = estimate_noise(&grid.view()).unwrap();
        assert_eq!(sigma, 0.0);
    }

    #[test]
    fn test_darkest_corner_is_selected() {
        // Bright noisy frame with a flat dark patch in the bottom-right
        // corner block; sigma must come from the flat patch.
        let mut grid = Array2::from_shape_fn((40, 40), |(r, c)| {
            100.0 + ((r * 40 + c) % 7) as f64
        });
        grid.slice_mut(s![36.., 36..]).fill(1.0);

        let sigma = estimate_noise(&grid.view()).unwrap();
        assert_eq!(sigma, 0.0);
    }

    #[test]
    fn test_known_corner_statistics() {
        // Corner blocks alternate between 0 and 2: mean 1, sigma 1.
        let grid = Array2::from_shape_fn((40, 40), |(r, c)| {
            let in_corner = (r < 4 || r >= 36) && (c < 4 || c >= 36);
            if in_corner {
                ((r + c) % 2) as f64 * 2.0
            } else {
                50.0
            }
        });

        let sigma = estimate_noise(&grid.view()).unwrap();
        assert_relative_eq!(sigma, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_deterministic_across_calls() {
        let grid = noisy_frame(50, 100.0, 12.0, 42);
        let first = estimate_noise(&grid.view()).unwrap();
        let second = estimate_noise(&grid.view()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_noise_tracks_generated_sigma() {
        let grid = noisy_frame(200, 100.0, 10.0, 7);
        let sigma = estimate_noise(&grid.view()).unwrap();
        // A 20x20 corner block of N(100, 10) samples; the darkest-corner
        // selection biases slightly low, so the tolerance is loose.
        assert!(sigma > 5.0 && sigma < 15.0, "sigma = {sigma}");
    }

    #[test]
    fn test_undersized_frame_is_rejected() {
        let grid = Array2::<f64>::zeros((8, 8));
        let err = estimate_noise(&grid.view()).unwrap_err();
        assert!(matches!(
            err,
            ContourError::InvalidGridSize { size: 8, .. }
        ));

        let grid = Array2::<f64>::zeros((9, 9));
        assert!(estimate_noise(&grid.view()).is_err());

        let grid = Array2::<f64>::zeros((10, 10));
        assert!(estimate_noise(&grid.view()).is_ok());
    }

    #[test]
    fn test_non_square_frame_is_rejected() {
        let grid = Array2::<f64>::zeros((20, 30));
        let err = estimate_noise(&grid.view()).unwrap_err();
        assert!(matches!(
            err,
            ContourError::NonSquareGrid {
                height: 20,
                width: 30
            }
        ));
    }
}
