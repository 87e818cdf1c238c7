//! Generational breadth-first region growing.
//!
//! Grows a connected region outward from a seed pixel, one frontier
//! generation at a time. Every frontier pixel is classified against the
//! intensity threshold: pixels above it join the region and seed the next
//! generation, pixels at or below it become fire breaks whose neighbors are
//! never expanded. Each cell is classified at most once, so the fill visits
//! at most `N^2` pixels before the frontier drains.

use std::collections::HashSet;

use log::debug;
use ndarray::ArrayView2;

use crate::contour::mask::Mask;
use crate::contour::neighborhood::unvisited_neighbors;

/// Result of one region grow.
#[derive(Debug)]
pub struct GrowOutcome {
    /// Visit mask for this threshold level.
    pub mask: Mask,
    /// Whether the seed pixel cleared the threshold. A cold seed leaves the
    /// mask blank; this is normal control flow, not a failure.
    pub seed_hot: bool,
}

/// Flood-fill the connected region around `seed` that exceeds `threshold`.
///
/// The seed qualifies at `>=` the threshold; every other pixel must be
/// strictly above it, so exactly-equal pixels away from the seed are
/// rejected. The asymmetry is intentional and preserved for output
/// compatibility with existing contour maps.
pub fn grow(grid: &ArrayView2<f64>, seed: (usize, usize), threshold: f64) -> GrowOutcome {
    let frame_size = grid.nrows();
    let mut mask = Mask::new(frame_size);

    if grid[seed] < threshold {
        return GrowOutcome {
            mask,
            seed_hot: false,
        };
    }

    mask.mark_accepted(seed);
    let mut frontier: HashSet<(usize, usize)> = unvisited_neighbors(seed, frame_size, &mask)
        .into_iter()
        .collect();

    let mut generation = 0usize;
    while !frontier.is_empty() {
        let mut accepted = Vec::new();
        for &pixel in &frontier {
            if grid[pixel] > threshold {
                mask.mark_accepted(pixel);
                accepted.push(pixel);
            } else {
                mask.mark_rejected(pixel);
            }
        }

        let mut next = HashSet::new();
        for &pixel in &accepted {
            next.extend(unvisited_neighbors(pixel, frame_size, &mask));
        }

        generation += 1;
        debug!(
            "generation {generation}: {} classified, {} accepted, {} queued",
            frontier.len(),
            accepted.len(),
            next.len()
        );
        frontier = next;
    }

    GrowOutcome {
        mask,
        seed_hot: true,
    }
}
