//! Delimited-table serialization of contour maps.
//!
//! Contour maps are exported as headerless CSV, one record per frame row,
//! one integer count per field.

use csv::{ReaderBuilder, WriterBuilder};
use ndarray::{Array2, ArrayView2};
use std::path::Path;
use thiserror::Error;

/// Errors from contour-table serialization.
#[derive(Error, Debug)]
pub enum TableError {
    /// Underlying CSV read/write failure.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The table on disk is not a rectangular grid of integer counts.
    #[error("malformed contour table: {0}")]
    Malformed(String),
}

/// Write a contour map as a headerless CSV table.
pub fn write_contour_csv<P: AsRef<Path>>(
    map: &ArrayView2<u32>,
    path: P,
) -> Result<(), TableError> {
    let mut writer = WriterBuilder::new().has_headers(false).from_path(path)?;

    for row in map.rows() {
        writer.write_record(row.iter().map(|v| v.to_string()))?;
    }
    writer.flush().map_err(csv::Error::from)?;

    Ok(())
}

/// Read a contour map back from a headerless CSV table.
///
/// # Errors
///
/// Returns [`TableError::Malformed`] for ragged rows, non-integer fields or
/// an empty table.
pub fn read_contour_csv<P: AsRef<Path>>(path: P) -> Result<Array2<u32>, TableError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;

    let mut values = Vec::new();
    let mut width = None;
    let mut height = 0usize;

    for record in reader.records() {
        let record = record?;
        match width {
            None => width = Some(record.len()),
            Some(w) if w != record.len() => {
                return Err(TableError::Malformed(format!(
                    "row {height} has {} fields, expected {w}",
                    record.len()
                )))
            }
            _ => {}
        }

        for field in record.iter() {
            let value = field
                .trim()
                .parse::<u32>()
                .map_err(|_| TableError::Malformed(format!("non-integer field '{field}'")))?;
            values.push(value);
        }
        height += 1;
    }

    let width = width.ok_or_else(|| TableError::Malformed("empty table".to_string()))?;
    Array2::from_shape_vec((height, width), values)
        .map_err(|e| TableError::Malformed(e.to_string()))
}
