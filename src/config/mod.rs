//! Configuration for the geomap command-line tool
//!
//! Provides types and loading for the optional `geomap.toml` file.

pub mod loader;
pub mod schema;

pub use loader::*;
pub use schema::*;
