//! Legend tables: the terrain registry persisted as CSV
//!
//! Format: a mandatory header row `ColorHex,TerrainType,Symbol` followed by
//! one row per terrain. Columns are matched by header name, and all three
//! must be present. Name and symbol fields are taken verbatim; only the color
//! field has surrounding whitespace stripped.
//!
//! ```text
//! ColorHex,TerrainType,Symbol
//! #C2B280FF,sand,s
//! #00FF00FF,grass,g
//! ```

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::color::{format_hex, parse_hex, BLANK};
use crate::error::{GeoMapError, Result};
use crate::map_codec::require_path;
use crate::registry::TerrainRegistry;

/// Header row written by [`write_legend`]
pub const HEADER: [&str; 3] = ["ColorHex", "TerrainType", "Symbol"];

#[derive(Debug, Deserialize)]
struct LegendRow {
    #[serde(rename = "ColorHex", default)]
    color_hex: String,
    #[serde(rename = "TerrainType", default)]
    terrain_type: String,
    #[serde(rename = "Symbol", default)]
    symbol: String,
}

/// Build a registry from CSV text.
///
/// Rows with an empty color are skipped. A color that fails to parse is
/// replaced by the blank color and the row is inserted anyway, subject to
/// the registry's usual insert rules. Short rows read their missing fields
/// as empty.
///
/// # Errors
///
/// * `MissingColumn` if the header row lacks any of [`HEADER`]
/// * `Csv` if the text is not readable as CSV
pub fn read_legend<R: Read>(reader: R) -> Result<TerrainRegistry> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = csv_reader.headers()?;
    if let Some(column) = HEADER.iter().find(|name| !headers.iter().any(|h| h == **name)) {
        return Err(GeoMapError::MissingColumn(column.to_string()));
    }

    let mut registry = TerrainRegistry::new();
    for (index, row) in csv_reader.deserialize::<LegendRow>().enumerate() {
        let row = row?;
        // Header is line 1
        let line = index + 2;

        let color_hex = row.color_hex.trim();
        if color_hex.is_empty() {
            debug!(line, "legend row has no color, skipped");
            continue;
        }

        let color = match parse_hex(color_hex) {
            Ok(color) => color,
            Err(e) => {
                warn!(line, color = %color_hex, error = %e, "malformed legend color, using blank");
                BLANK
            }
        };

        registry.insert(&row.terrain_type, &row.symbol, color);
    }

    Ok(registry)
}

/// Write `registry` as CSV in insertion order.
pub fn write_legend<W: Write>(writer: W, registry: &TerrainRegistry) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(HEADER)?;
    for terrain in registry.entries() {
        csv_writer.write_record([
            format_hex(terrain.color()).as_str(),
            terrain.name(),
            terrain.symbol(),
        ])?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Load a legend CSV file.
///
/// # Errors
///
/// * `InvalidArgument` if `path` is empty
/// * `MissingResource` if the file does not exist
/// * `MissingColumn` if the header row lacks a required column
/// * `Csv` if the file is not readable as CSV
pub fn load_legend(path: impl AsRef<Path>) -> Result<TerrainRegistry> {
    let path = path.as_ref();
    require_path(path)?;
    if !path.exists() {
        return Err(GeoMapError::MissingResource(path.to_path_buf()));
    }

    let registry = read_legend(File::open(path)?)?;
    info!(path = %path.display(), terrains = registry.len(), "loaded legend");
    Ok(registry)
}

/// Save `registry` to a legend CSV file, replacing any existing file.
///
/// Creates parent directories if they don't exist.
pub fn save_legend(path: impl AsRef<Path>, registry: &TerrainRegistry) -> Result<()> {
    let path = path.as_ref();
    require_path(path)?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }

    write_legend(File::create(path)?, registry)?;
    info!(path = %path.display(), terrains = registry.len(), "saved legend");
    Ok(())
}
