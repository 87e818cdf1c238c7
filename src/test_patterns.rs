//! Synthetic frame generation for contour-map validation.
//!
//! Provides deterministic test frames: flat backgrounds with centered hot
//! blocks, Gaussian blobs, and seeded Gaussian-noise fields.

use ndarray::Array2;
use num_traits::Zero;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};

/// Generate a flat square frame with a centered hot block.
///
/// # Arguments
/// * `size` - Side length of the frame
/// * `block_size` - Side length of the hot block (centered on `size / 2`)
/// * `background` - Value outside the block
/// * `peak` - Value inside the block
pub fn hot_block_frame<T>(size: usize, block_size: usize, background: T, peak: T) -> Array2<T>
where
    T: Clone + Zero,
{
    let mut frame = Array2::zeros((size, size));
    let center = size / 2;
    let start = center - block_size / 2;
    let end = start + block_size;

    for r in 0..size {
        for c in 0..size {
            let in_block = (start..end).contains(&r) && (start..end).contains(&c);
            frame[[r, c]] = if in_block {
                peak.clone()
            } else {
                background.clone()
            };
        }
    }

    frame
}

/// Generate a centered Gaussian blob on a zero background.
///
/// # Arguments
/// * `size` - Side length of the square frame
/// * `sigma` - Standard deviation of the Gaussian in pixels
/// * `amplitude` - Peak amplitude at the center
pub fn gaussian_blob(size: usize, sigma: f64, amplitude: f64) -> Array2<f64> {
    let center = (size / 2) as f64;

    Array2::from_shape_fn((size, size), |(r, c)| {
        let dr = r as f64 - center;
        let dc = c as f64 - center;
        amplitude * (-(dr * dr + dc * dc) / (2.0 * sigma * sigma)).exp()
    })
}

/// Generate a square frame of Gaussian noise with a deterministic seed.
pub fn noisy_frame(size: usize, mean: f64, std: f64, seed: u64) -> Array2<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let dist = Normal::new(mean, std).expect("std must be finite and non-negative");

    Array2::from_shape_fn((size, size), |_| dist.sample(&mut rng))
}
