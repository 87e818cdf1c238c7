//! Frame and contour-map I/O.
//!
//! The contour core only consumes and produces in-memory arrays; everything
//! that touches the filesystem lives here. FITS frames come in through
//! `fits`, finished contour maps go out as delimited tables through `table`.

pub mod fits;
pub mod table;

pub use fits::{load_image, write_frame, FitsError};
pub use table::{read_contour_csv, write_contour_csv, TableError};
