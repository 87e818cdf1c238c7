use thiserror::Error;

/// Minimum frame size for corner-based noise estimation.
///
/// Corner blocks are `N/10 × N/10`; below 10 pixels per side the blocks are
/// empty and no noise scale can be derived.
pub const MIN_FRAME_SIZE: usize = 10;

/// Errors produced by the contour-map core.
#[derive(Error, Debug)]
pub enum ContourError {
    /// Frame is too small to carve `N/10` corner blocks for noise estimation.
    #[error("frame size {size} is below the {min}-pixel minimum for noise estimation")]
    InvalidGridSize {
        /// Side length of the offending frame.
        size: usize,
        /// Minimum supported side length.
        min: usize,
    },

    /// Frame is not square; the contour core addresses pixels by a single
    /// frame size.
    #[error("frame is {height}x{width}, expected a square frame")]
    NonSquareGrid {
        /// Number of rows in the frame.
        height: usize,
        /// Number of columns in the frame.
        width: usize,
    },
}
