//! Geomap - Library for converting terrain map images to symbolic grids
//!
//! This library provides functionality to:
//! - Keep a color-keyed legend of terrains ([`registry`])
//! - Decode PNG maps into terrain grids and encode them back ([`map_codec`])
//! - Load and save legends as CSV tables ([`legend`])
//! - Preview grids and legends in a terminal ([`terminal`])

pub mod cli;
pub mod color;
pub mod config;
pub mod error;
pub mod grid;
pub mod legend;
pub mod map_codec;
pub mod registry;
pub mod terminal;
pub mod terrain;

pub use error::{GeoMapError, Result};
pub use grid::TerrainGrid;
pub use registry::{InsertOutcome, TerrainRegistry};
pub use terrain::TerrainDescriptor;
