//! Sigma-scaled contour-map extraction for astronomical images.
//!
//! A contour map encodes, per pixel, how many intensity thresholds that pixel
//! exceeded. Thresholds are multiples of a per-frame noise scale estimated
//! from the darkest corner of the image, and each threshold's region is grown
//! by a generational flood fill from the frame center, so the map traces the
//! nested iso-intensity structure of the central source.
//!
//! # Module Organization
//!
//! - **contour**: the extraction core (noise scale, flood fill, accumulation)
//! - **io**: FITS frame loading and CSV export of finished maps
//! - **render**: false-color rasterization of contour maps
//! - **batch**: directory-level fan-out across independent frames
//! - **test_patterns**: deterministic synthetic frames for validation
//!
//! The core operates purely on in-memory `ndarray` views and never touches
//! the filesystem; all persistence goes through `io` and `render`.

pub mod batch;
pub mod contour;
pub mod error;
pub mod io;
pub mod render;
pub mod test_patterns;

pub use batch::{process_directory, process_file, BatchOptions, BatchSummary};
pub use contour::{
    estimate_noise, grow, ContourBuilder, ContourOutcome, LevelDiagnostic, LevelSpec, LevelStatus,
};
pub use error::{ContourError, MIN_FRAME_SIZE};
pub use render::{contour_to_rgb, render_contour_png};
