//! Configuration loading and discovery for `geomap.toml`
//!
//! Provides functions to find, load, and merge configuration.

use super::schema::GeomapConfig;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// File name searched for by [`find_config`]
pub const CONFIG_FILE_NAME: &str = "geomap.toml";

/// Configuration loading error
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// File I/O error
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error
    #[error("Failed to parse geomap.toml: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error
    #[error("Config validation failed:\n{}", .0.iter().map(|e| format!("  - {}", e)).collect::<Vec<_>>().join("\n"))]
    Validation(Vec<String>),
}

/// Command-line arguments that can override config values
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    /// Override legend path
    pub legend: Option<PathBuf>,
    /// Override ANSI color output
    pub color: Option<bool>,
    /// Override legend printing after the map
    pub show_key: Option<bool>,
    /// Override coordinate headers
    pub coordinates: Option<bool>,
}

/// Locate the config used when `--config` is not given.
///
/// The nearest `geomap.toml` in the working directory or one of its
/// ancestors wins; otherwise the per-user file in [`user_config_dir`].
pub fn find_config() -> Option<PathBuf> {
    env::current_dir()
        .ok()
        .and_then(|cwd| find_config_from(&cwd))
        .or_else(|| user_config_dir().and_then(|dir| find_config_in(&dir)))
}

/// Per-user config directory: `$XDG_CONFIG_HOME/geomap`, falling back to
/// `$HOME/.config/geomap`. An empty `XDG_CONFIG_HOME` counts as unset.
pub fn user_config_dir() -> Option<PathBuf> {
    let base = env::var_os("XDG_CONFIG_HOME")
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
        .or_else(|| env::var_os("HOME").map(|home| PathBuf::from(home).join(".config")))?;
    Some(base.join("geomap"))
}

/// Nearest `geomap.toml` in `start` or its ancestors.
pub fn find_config_from(start: &Path) -> Option<PathBuf> {
    start.ancestors().find_map(find_config_in)
}

/// `dir/geomap.toml` if it is a regular file.
fn find_config_in(dir: &Path) -> Option<PathBuf> {
    let candidate = dir.join(CONFIG_FILE_NAME);
    candidate.is_file().then_some(candidate)
}

/// Load configuration.
///
/// If a path is provided, loads from that file. Otherwise, uses `find_config()`
/// to locate the config file. If no config file is found, returns the default
/// configuration.
pub fn load_config(path: Option<&Path>) -> Result<GeomapConfig, ConfigError> {
    let config_path = match path {
        Some(p) => Some(p.to_path_buf()),
        None => find_config(),
    };

    match config_path {
        Some(p) => load_config_file(&p),
        None => Ok(GeomapConfig::default()),
    }
}

/// Load configuration from a specific file path.
///
/// A relative `legend.path` is resolved against the config file's directory.
pub fn load_config_file(path: &Path) -> Result<GeomapConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    let mut config: GeomapConfig = toml::from_str(&contents)?;

    let errors = config.validate();
    if !errors.is_empty() {
        return Err(ConfigError::Validation(errors.into_iter().map(|e| e.to_string()).collect()));
    }

    if let (Some(root), Some(legend)) = (path.parent(), config.legend.path.as_ref()) {
        config.legend.path = Some(resolve_path(root, legend));
    }

    debug!(path = %path.display(), "loaded config");
    Ok(config)
}

/// Merge command-line overrides into a configuration.
///
/// Command-line values take precedence over config file values.
pub fn merge_cli_overrides(config: &mut GeomapConfig, overrides: &CliOverrides) {
    if let Some(ref legend) = overrides.legend {
        config.legend.path = Some(legend.clone());
    }
    if let Some(color) = overrides.color {
        config.terminal.color = color;
    }
    if let Some(show_key) = overrides.show_key {
        config.terminal.show_key = show_key;
    }
    if let Some(coordinates) = overrides.coordinates {
        config.terminal.coordinates = coordinates;
    }
}

/// Resolve a path relative to a base directory.
///
/// If the path is absolute, returns it unchanged.
pub fn resolve_path(root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() || root.as_os_str().is_empty() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_config(dir: &Path, content: &str) -> PathBuf {
        let config_path = dir.join(CONFIG_FILE_NAME);
        File::create(&config_path)
            .expect("should create config file")
            .write_all(content.as_bytes())
            .expect("should write config content");
        config_path
    }

    #[test]
    fn test_find_config_in_current_dir() {
        let temp = TempDir::new().expect("should create temp dir");
        let config_path = write_config(temp.path(), "");

        let found = find_config_from(temp.path());
        assert_eq!(found, Some(config_path));
    }

    #[test]
    fn test_find_config_in_parent_dir() {
        let temp = TempDir::new().expect("should create temp dir");
        let config_path = write_config(temp.path(), "");

        let subdir = temp.path().join("maps").join("regions");
        fs::create_dir_all(&subdir).expect("should create subdirectories");

        let found = find_config_from(&subdir);
        assert_eq!(found, Some(config_path));
    }

    #[test]
    fn test_find_config_skips_directory_with_config_name() {
        let temp = TempDir::new().expect("should create temp dir");
        let config_path = write_config(temp.path(), "");

        let inner = temp.path().join("nested");
        fs::create_dir_all(inner.join(CONFIG_FILE_NAME)).expect("should create decoy directory");

        assert_eq!(find_config_from(&inner), Some(config_path));
    }

    #[test]
    fn test_find_config_none_without_file() {
        let temp = TempDir::new().expect("should create temp dir");
        assert_eq!(find_config_in(temp.path()), None);
    }

    #[test]
    fn test_load_config_resolves_legend_path() {
        let temp = TempDir::new().expect("should create temp dir");
        let config_path = write_config(temp.path(), "[legend]\npath = \"csv/terrain.csv\"\n");

        let config = load_config(Some(&config_path)).expect("should load config");
        assert_eq!(config.legend.path, Some(temp.path().join("csv/terrain.csv")));
    }

    #[test]
    fn test_load_config_parse_error() {
        let temp = TempDir::new().expect("should create temp dir");
        let config_path = write_config(temp.path(), "[terminal]\ncolor = \"yes\"\n");

        let result = load_config(Some(&config_path));
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_config_validation_error() {
        let temp = TempDir::new().expect("should create temp dir");
        let config_path = write_config(temp.path(), "[legend]\npath = \"\"\n");

        let result = load_config(Some(&config_path));
        match result {
            Err(ConfigError::Validation(errors)) => assert!(errors[0].contains("legend.path")),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_merge_cli_overrides() {
        let mut config = GeomapConfig::default();
        let overrides = CliOverrides {
            legend: Some(PathBuf::from("other.csv")),
            color: Some(false),
            ..Default::default()
        };

        merge_cli_overrides(&mut config, &overrides);

        assert_eq!(config.legend.path, Some(PathBuf::from("other.csv")));
        assert!(!config.terminal.color);
        assert!(config.terminal.show_key);
    }

    #[test]
    fn test_resolve_path() {
        let root = Path::new("/project");
        assert_eq!(resolve_path(root, Path::new("a.csv")), PathBuf::from("/project/a.csv"));
        assert_eq!(resolve_path(root, Path::new("/abs/a.csv")), PathBuf::from("/abs/a.csv"));
        assert_eq!(resolve_path(Path::new(""), Path::new("a.csv")), PathBuf::from("a.csv"));
    }
}
