//! Terminal rendering of terrain grids and legends
//!
//! Each grid row is printed as one line of terrain symbols. With color on,
//! every cell gets a 24-bit ANSI background taken from the terrain's
//! canonical color.

use image::Rgba;

use crate::color::format_hex;
use crate::grid::TerrainGrid;
use crate::registry::TerrainRegistry;

/// ANSI escape sequence to reset all formatting
pub const ANSI_RESET: &str = "\x1b[0m";

/// Background used for fully transparent colors
const TRANSPARENT_BG: &str = "\x1b[48;5;236m";

/// Options for [`render_grid`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerminalOptions {
    /// Emit ANSI background colors
    pub color: bool,
    /// Print row and column numbers around the grid
    pub coordinates: bool,
}

impl Default for TerminalOptions {
    fn default() -> Self {
        Self {
            color: true,
            coordinates: false,
        }
    }
}

/// Convert RGBA color to ANSI 24-bit background escape sequence.
///
/// Transparent colors (alpha = 0) are rendered as a dark gray background
/// so blank cells stay visible.
///
/// ```
/// use geomap::terminal::color_to_ansi_bg;
/// use image::Rgba;
///
/// assert_eq!(color_to_ansi_bg(Rgba([255, 0, 0, 255])), "\x1b[48;2;255;0;0m");
/// assert_eq!(color_to_ansi_bg(Rgba([0, 0, 0, 0])), "\x1b[48;5;236m");
/// ```
pub fn color_to_ansi_bg(rgba: Rgba<u8>) -> String {
    if rgba[3] == 0 {
        TRANSPARENT_BG.to_string()
    } else {
        format!("\x1b[48;2;{};{};{}m", rgba[0], rgba[1], rgba[2])
    }
}

/// Render `grid` as symbol rows, one line per grid row.
pub fn render_grid(grid: &TerrainGrid, options: &TerminalOptions) -> String {
    if grid.width() == 0 || grid.height() == 0 {
        return String::new();
    }

    let cell_width = (0..grid.width())
        .flat_map(|row| (0..grid.height()).map(move |col| (row, col)))
        .map(|(row, col)| grid.cell_at(row, col).symbol().chars().count())
        .max()
        .unwrap_or(1)
        .max(1);
    let row_num_width = (grid.width() - 1).to_string().len().max(2);

    let mut output = String::new();

    if options.coordinates {
        output.push_str(&" ".repeat(row_num_width + 2));
        for col in 0..grid.height() {
            output.push_str(&format!("{:>width$} ", col, width = cell_width + 1));
        }
        output.push('\n');

        output.push_str(&" ".repeat(row_num_width));
        output.push_str(" \u{250C}"); // ┌
        output.push_str(&"\u{2500}".repeat(grid.height() * (cell_width + 2))); // ─
        output.push('\n');
    }

    for row in 0..grid.width() {
        if options.coordinates {
            output.push_str(&format!("{:>width$} \u{2502}", row, width = row_num_width)); // │
        }

        for col in 0..grid.height() {
            let terrain = grid.cell_at(row, col);
            if options.color {
                output.push_str(&color_to_ansi_bg(terrain.color()));
            }
            output.push_str(&format!(" {:<width$} ", terrain.symbol(), width = cell_width));
            if options.color {
                output.push_str(ANSI_RESET);
            }
        }
        output.push('\n');
    }

    output
}

/// Render the registry as `symbol = name (#RRGGBBAA)` lines in legend order.
pub fn render_key_table(registry: &TerrainRegistry, color: bool) -> String {
    let mut output = String::from("Legend:\n");
    for terrain in registry.entries() {
        output.push_str("  ");
        if color {
            output.push_str(&color_to_ansi_bg(terrain.color()));
            output.push_str("  ");
            output.push_str(ANSI_RESET);
            output.push(' ');
        }
        output.push_str(&format!(
            "{} = {:16} ({})\n",
            terrain.symbol(),
            terrain.name(),
            format_hex(terrain.color())
        ));
    }
    output
}
