//! Error type shared by the map and legend codecs

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading or saving maps and legends.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GeoMapError {
    /// A required argument was empty or otherwise unusable
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// The referenced file does not exist
    #[error("file not found: {}", .0.display())]
    MissingResource(PathBuf),
    /// The file is not a PNG raster image
    #[error("unsupported format for '{}': {}", .path.display(), .reason)]
    UnsupportedFormat { path: PathBuf, reason: String },
    /// A legend header row lacks one of the required columns
    #[error("legend header is missing column '{0}'")]
    MissingColumn(String),
    /// Width or height was zero where a positive size is required
    #[error("invalid dimensions {width}x{height}, both must be positive")]
    InvalidDimension { width: usize, height: usize },
    /// File I/O error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    /// Image encoding error
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    /// Delimited text read/write error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, GeoMapError>;
