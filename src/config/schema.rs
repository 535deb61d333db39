//! Configuration schema types for `geomap.toml`

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeomapConfig {
    /// Default legend table
    #[serde(default)]
    pub legend: LegendConfig,
    /// Terminal preview settings
    #[serde(default)]
    pub terminal: TerminalConfig,
}

/// `[legend]` section
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LegendConfig {
    /// Legend CSV used when a command is not given `--legend`.
    /// Relative paths are resolved against the config file's directory.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// `[terminal]` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TerminalConfig {
    /// ANSI background colors in map previews
    #[serde(default = "default_true")]
    pub color: bool,
    /// Print the legend after the map
    #[serde(default = "default_true")]
    pub show_key: bool,
    /// Print row/column numbers around the map
    #[serde(default)]
    pub coordinates: bool,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            color: true,
            show_key: true,
            coordinates: false,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Configuration validation error
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    /// Path to the invalid field (e.g., "legend.path")
    pub field: String,
    /// Error message
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "geomap.toml: '{}' {}", self.field, self.message)
    }
}

impl GeomapConfig {
    /// Validate the configuration and return any errors
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut errors = Vec::new();

        if let Some(path) = &self.legend.path {
            if path.as_os_str().is_empty() {
                errors.push(ConfigValidationError {
                    field: "legend.path".to_string(),
                    message: "must be a non-empty path".to_string(),
                });
            }
        }

        errors
    }
}
