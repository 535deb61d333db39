//! Command-line interface implementation

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use tracing::warn;

use crate::color::{format_hex, parse_hex};
use crate::config::{load_config, merge_cli_overrides, CliOverrides, GeomapConfig};
use crate::legend::{load_legend, save_legend};
use crate::map_codec::{load_map, save_map};
use crate::registry::{InsertOutcome, TerrainRegistry};
use crate::terminal::{render_grid, render_key_table, TerminalOptions};

const EXIT_SUCCESS: u8 = 0;
const EXIT_ERROR: u8 = 1;
const EXIT_INVALID_ARGS: u8 = 2;

/// Geomap - convert terrain map images to symbolic grids and back
#[derive(Parser)]
#[command(name = "geomap")]
#[command(about = "Geomap - convert terrain map images to symbolic grids and back")]
#[command(version)]
pub struct Cli {
    /// Config file (default: nearest geomap.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Decode a PNG map and print it as terrain symbols
    Show {
        /// PNG map image
        map: PathBuf,

        /// Legend CSV mapping colors to terrains
        #[arg(short, long)]
        legend: Option<PathBuf>,

        /// Disable ANSI colors
        #[arg(long)]
        no_color: bool,

        /// Don't print the legend after the map
        #[arg(long)]
        no_key: bool,

        /// Print row and column numbers
        #[arg(long)]
        coordinates: bool,
    },

    /// Print the legend table
    Keys {
        /// Legend CSV mapping colors to terrains
        #[arg(short, long)]
        legend: Option<PathBuf>,

        /// Disable ANSI colors
        #[arg(long)]
        no_color: bool,
    },

    /// Decode a map and re-encode it with canonical terrain colors.
    /// Colors missing from the legend become transparent.
    Canonicalize {
        /// PNG map image
        map: PathBuf,

        /// Output PNG
        #[arg(short, long)]
        output: PathBuf,

        /// Legend CSV mapping colors to terrains
        #[arg(short, long)]
        legend: Option<PathBuf>,
    },

    /// Add a terrain to a legend CSV, creating the file if needed
    AddKey {
        /// Terrain name
        name: String,

        /// Display symbol
        symbol: String,

        /// Hex color (#RRGGBB or #RRGGBBAA)
        color: String,

        /// Legend CSV mapping colors to terrains
        #[arg(short, long)]
        legend: Option<PathBuf>,
    },
}

/// Run the CLI application
pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let mut config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
    };

    match cli.command {
        Commands::Show {
            map,
            legend,
            no_color,
            no_key,
            coordinates,
        } => {
            let overrides = CliOverrides {
                legend,
                color: no_color.then_some(false),
                show_key: no_key.then_some(false),
                coordinates: coordinates.then_some(true),
            };
            merge_cli_overrides(&mut config, &overrides);
            run_show(&map, &config)
        }
        Commands::Keys { legend, no_color } => {
            let overrides = CliOverrides {
                legend,
                color: no_color.then_some(false),
                ..Default::default()
            };
            merge_cli_overrides(&mut config, &overrides);
            run_keys(&config)
        }
        Commands::Canonicalize {
            map,
            output,
            legend,
        } => {
            let overrides = CliOverrides {
                legend,
                ..Default::default()
            };
            merge_cli_overrides(&mut config, &overrides);
            run_canonicalize(&map, &output, &config)
        }
        Commands::AddKey {
            name,
            symbol,
            color,
            legend,
        } => {
            let overrides = CliOverrides {
                legend,
                ..Default::default()
            };
            merge_cli_overrides(&mut config, &overrides);
            run_add_key(&name, &symbol, &color, &config)
        }
    }
}

/// Load the configured legend, or an empty one when none is configured.
fn registry_for(config: &GeomapConfig) -> Result<TerrainRegistry, ExitCode> {
    match &config.legend.path {
        Some(path) => load_legend(path).map_err(|e| {
            eprintln!("Error: Cannot load legend '{}': {}", path.display(), e);
            ExitCode::from(EXIT_ERROR)
        }),
        None => {
            warn!("no legend configured, every color will resolve as unknown");
            Ok(TerrainRegistry::new())
        }
    }
}

/// Execute the show command
fn run_show(map: &Path, config: &GeomapConfig) -> ExitCode {
    let registry = match registry_for(config) {
        Ok(registry) => Arc::new(registry),
        Err(code) => return code,
    };

    let grid = match load_map(map, &registry) {
        Ok(grid) => grid,
        Err(e) => {
            eprintln!("Error: Cannot load map '{}': {}", map.display(), e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let options = TerminalOptions {
        color: config.terminal.color,
        coordinates: config.terminal.coordinates,
    };
    print!("{}", render_grid(&grid, &options));
    if config.terminal.show_key {
        println!();
        print!("{}", render_key_table(&registry, config.terminal.color));
    }

    ExitCode::from(EXIT_SUCCESS)
}

/// Execute the keys command
fn run_keys(config: &GeomapConfig) -> ExitCode {
    if config.legend.path.is_none() {
        eprintln!("Error: No legend given; pass --legend or set [legend] path in geomap.toml");
        return ExitCode::from(EXIT_INVALID_ARGS);
    }
    let registry = match registry_for(config) {
        Ok(registry) => registry,
        Err(code) => return code,
    };

    print!("{}", render_key_table(&registry, config.terminal.color));
    ExitCode::from(EXIT_SUCCESS)
}

/// Execute the canonicalize command
fn run_canonicalize(map: &Path, output: &Path, config: &GeomapConfig) -> ExitCode {
    let registry = match registry_for(config) {
        Ok(registry) => Arc::new(registry),
        Err(code) => return code,
    };

    let grid = match load_map(map, &registry) {
        Ok(grid) => grid,
        Err(e) => {
            eprintln!("Error: Cannot load map '{}': {}", map.display(), e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    if let Err(e) = save_map(output, &grid) {
        eprintln!("Error: Cannot save map '{}': {}", output.display(), e);
        return ExitCode::from(EXIT_ERROR);
    }

    println!("Saved: {}", output.display());
    ExitCode::from(EXIT_SUCCESS)
}

/// Execute the add-key command
fn run_add_key(name: &str, symbol: &str, color: &str, config: &GeomapConfig) -> ExitCode {
    let Some(path) = config.legend.path.as_deref() else {
        eprintln!("Error: No legend given; pass --legend or set [legend] path in geomap.toml");
        return ExitCode::from(EXIT_INVALID_ARGS);
    };

    let color = match parse_hex(color) {
        Ok(color) => color,
        Err(e) => {
            eprintln!("Error: Invalid color '{}': {}", color, e);
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
    };

    let mut registry = if path.exists() {
        match load_legend(path) {
            Ok(registry) => registry,
            Err(e) => {
                eprintln!("Error: Cannot load legend '{}': {}", path.display(), e);
                return ExitCode::from(EXIT_ERROR);
            }
        }
    } else {
        TerrainRegistry::new()
    };

    match registry.insert(name, symbol, color) {
        InsertOutcome::Inserted => {}
        InsertOutcome::Duplicate => {
            let existing = registry.resolve(color);
            println!(
                "Unchanged: {} is already '{}' ({})",
                format_hex(color),
                existing.name(),
                existing.symbol()
            );
            return ExitCode::from(EXIT_SUCCESS);
        }
        InsertOutcome::MissingField => {
            eprintln!("Error: Terrain name and symbol must not be empty");
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
    }

    if let Err(e) = save_legend(path, &registry) {
        eprintln!("Error: Cannot save legend '{}': {}", path.display(), e);
        return ExitCode::from(EXIT_ERROR);
    }

    println!("Added: {} = {} ({})", symbol, name, format_hex(color));
    ExitCode::from(EXIT_SUCCESS)
}
