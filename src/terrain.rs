//! Terrain descriptors: the (name, symbol, color) triple behind every map cell

use std::fmt;
use std::sync::{Arc, OnceLock};

use image::Rgba;

use crate::color::{format_hex, BLANK};

/// Name given to colors with no registered terrain
pub const UNKNOWN_NAME: &str = "unknown";
/// Symbol given to colors with no registered terrain
pub const UNKNOWN_SYMBOL: &str = "?";

/// One terrain category. Immutable once constructed; grid edits replace the
/// shared reference rather than mutating fields.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TerrainDescriptor {
    name: String,
    symbol: String,
    color: Rgba<u8>,
}

impl TerrainDescriptor {
    pub fn new(name: impl Into<String>, symbol: impl Into<String>, color: Rgba<u8>) -> Self {
        Self {
            name: name.into(),
            symbol: symbol.into(),
            color,
        }
    }

    /// The `unknown` / `?` descriptor carrying the blank color.
    pub fn unknown() -> Self {
        Self::new(UNKNOWN_NAME, UNKNOWN_SYMBOL, BLANK)
    }

    /// Process-wide shared instance of [`TerrainDescriptor::unknown`].
    ///
    /// Unset grid cells read as this value, so repeated reads are pointer-equal.
    pub fn unknown_shared() -> &'static Arc<TerrainDescriptor> {
        static UNKNOWN: OnceLock<Arc<TerrainDescriptor>> = OnceLock::new();
        UNKNOWN.get_or_init(|| Arc::new(TerrainDescriptor::unknown()))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn color(&self) -> Rgba<u8> {
        self.color
    }

    pub fn is_unknown(&self) -> bool {
        self.name == UNKNOWN_NAME && self.symbol == UNKNOWN_SYMBOL
    }
}

impl Default for TerrainDescriptor {
    fn default() -> Self {
        Self::unknown()
    }
}

impl fmt::Display for TerrainDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {} ({})", self.symbol, self.name, format_hex(self.color))
    }
}
