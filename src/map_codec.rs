//! Conversion between PNG map images and terrain grids
//!
//! Pixel `(x, y)` is stored at grid cell `(row = y, col = x)`, and encoding
//! applies the exact inverse, so a decoded map re-encodes to the same layout.
//! A `W x H` image therefore decodes to a grid of `width = H`, `height = W`.

use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;
use std::sync::Arc;

use image::{ImageError, ImageFormat, RgbaImage};
use tracing::{debug, info};

use crate::error::{GeoMapError, Result};
use crate::grid::TerrainGrid;
use crate::registry::TerrainRegistry;

/// Resolve every pixel of `image` through `registry`.
///
/// # Errors
///
/// Returns `InvalidDimension` for an image with no pixels.
pub fn decode(image: &RgbaImage, registry: &Arc<TerrainRegistry>) -> Result<TerrainGrid> {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(GeoMapError::InvalidDimension {
            width: width as usize,
            height: height as usize,
        });
    }

    let mut grid = TerrainGrid::new(height as usize, width as usize, Arc::clone(registry));
    for (x, y, pixel) in image.enumerate_pixels() {
        grid.set_cell(y as usize, x as usize, registry.resolve(*pixel));
    }
    Ok(grid)
}

/// Paint every cell's canonical color back into an image.
///
/// Unset cells paint as the blank color.
///
/// # Errors
///
/// Returns `InvalidDimension` if either grid dimension is zero or does not
/// fit an image axis.
pub fn encode(grid: &TerrainGrid) -> Result<RgbaImage> {
    let invalid = || GeoMapError::InvalidDimension {
        width: grid.width(),
        height: grid.height(),
    };
    if grid.width() == 0 || grid.height() == 0 {
        return Err(invalid());
    }
    let image_width = u32::try_from(grid.height()).map_err(|_| invalid())?;
    let image_height = u32::try_from(grid.width()).map_err(|_| invalid())?;

    Ok(RgbaImage::from_fn(image_width, image_height, |x, y| {
        grid.cell_at(y as usize, x as usize).color()
    }))
}

/// Load a PNG map from disk and decode it against `registry`.
///
/// # Errors
///
/// * `InvalidArgument` if `path` is empty
/// * `MissingResource` if the file does not exist
/// * `UnsupportedFormat` if the extension is not exactly `png` or the
///   contents are not a readable PNG
pub fn load_map(path: impl AsRef<Path>, registry: &Arc<TerrainRegistry>) -> Result<TerrainGrid> {
    let path = path.as_ref();
    require_path(path)?;
    if !path.exists() {
        return Err(GeoMapError::MissingResource(path.to_path_buf()));
    }
    // Case-sensitive on purpose: `MAP.PNG` is rejected
    if path.extension().and_then(|e| e.to_str()) != Some("png") {
        return Err(GeoMapError::UnsupportedFormat {
            path: path.to_path_buf(),
            reason: "expected a .png file".to_string(),
        });
    }

    let reader = BufReader::new(File::open(path)?);
    let image = image::load(reader, ImageFormat::Png)
        .map_err(|e| classify_image_error(path, e))?
        .to_rgba8();
    debug!(path = %path.display(), width = image.width(), height = image.height(), "decoded map image");

    let grid = decode(&image, registry)?;
    info!(path = %path.display(), rows = grid.width(), cols = grid.height(), "loaded map");
    Ok(grid)
}

/// Encode `grid` and write it to `path` as PNG.
///
/// Creates parent directories if they don't exist.
///
/// # Errors
///
/// * `InvalidArgument` if `path` is empty
/// * `InvalidDimension` if the grid has a zero dimension
pub fn save_map(path: impl AsRef<Path>, grid: &TerrainGrid) -> Result<()> {
    let path = path.as_ref();
    require_path(path)?;
    let image = encode(grid)?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }

    image.save_with_format(path, ImageFormat::Png)?;
    info!(path = %path.display(), width = image.width(), height = image.height(), "saved map");
    Ok(())
}

pub(crate) fn require_path(path: &Path) -> Result<()> {
    if path.as_os_str().is_empty() {
        return Err(GeoMapError::InvalidArgument("path is empty".to_string()));
    }
    Ok(())
}

/// Everything except a genuine read failure means the bytes are not a PNG.
fn classify_image_error(path: &Path, error: ImageError) -> GeoMapError {
    match error {
        ImageError::IoError(e) if e.kind() != io::ErrorKind::UnexpectedEof => GeoMapError::Io(e),
        other => GeoMapError::UnsupportedFormat {
            path: path.to_path_buf(),
            reason: other.to_string(),
        },
    }
}
