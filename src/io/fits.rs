//! FITS frame I/O for contour-map inputs.
//!
//! Reads single-frame 2D images from the primary HDU into `Array2<f64>` and
//! writes frames back out, flipping vertically in both directions because the
//! FITS origin is bottom-left while ndarray indexes from the top row.

use fitsio::hdu::HduInfo;
use fitsio::images::{ImageDescription, ImageType};
use fitsio::FitsFile;
use ndarray::{s, Array2, ArrayView2};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during FITS frame operations.
#[derive(Error, Debug)]
pub enum FitsError {
    /// Underlying FITS library failure (missing file, malformed headers).
    #[error("FITS I/O error: {0}")]
    FitsIo(#[from] fitsio::errors::Error),

    /// The primary HDU does not hold a single 2D image.
    #[error("{path} does not contain a 2D image in its primary HDU")]
    NotAnImage {
        /// Path of the offending file.
        path: String,
    },

    /// Pixel payload does not match the advertised dimensions.
    #[error("cannot reshape image data to {height}x{width}")]
    MalformedImage {
        /// Advertised number of rows.
        height: usize,
        /// Advertised number of columns.
        width: usize,
    },
}

/// Load the primary HDU of a FITS file as a 2D intensity frame.
///
/// # Errors
///
/// Returns [`FitsError::NotAnImage`] when the primary HDU is missing or not
/// two-dimensional, and [`FitsError::MalformedImage`] when the pixel payload
/// does not fill the advertised shape.
pub fn load_image<P: AsRef<Path>>(path: P) -> Result<Array2<f64>, FitsError> {
    let mut fptr = FitsFile::open(&path)?;
    let hdu = fptr.primary_hdu()?;

    let (height, width) = match &hdu.info {
        HduInfo::ImageInfo { shape, .. } if shape.len() == 2 => (shape[0], shape[1]),
        _ => {
            return Err(FitsError::NotAnImage {
                path: path.as_ref().display().to_string(),
            })
        }
    };

    let data: Vec<f64> = hdu.read_image(&mut fptr)?;
    let frame = Array2::from_shape_vec((height, width), data)
        .map_err(|_| FitsError::MalformedImage { height, width })?;

    // Flip vertically to match ndarray convention (FITS origin is bottom-left)
    Ok(frame.slice(s![..;-1, ..]).to_owned())
}

/// Write a 2D intensity frame to the primary HDU of a new FITS file.
///
/// Overwrites any existing file at `path`.
pub fn write_frame<P: AsRef<Path>>(frame: &ArrayView2<f64>, path: P) -> Result<(), FitsError> {
    let (height, width) = frame.dim();
    let description = ImageDescription {
        data_type: ImageType::Double,
        dimensions: &[height, width],
    };

    let mut fptr = FitsFile::create(&path)
        .with_custom_primary(&description)
        .overwrite()
        .open()?;
    let hdu = fptr.primary_hdu()?;

    let flat: Vec<f64> = frame.slice(s![..;-1, ..]).iter().copied().collect();
    hdu.write_image(&mut fptr, &flat)?;

    Ok(())
}
