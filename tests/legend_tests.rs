//! Integration tests for legend CSV files and the full
//! legend -> map -> edit -> map -> legend pipeline.

use std::fs;
use std::sync::Arc;

use geomap::legend::{load_legend, save_legend};
use geomap::map_codec::{load_map, save_map};
use geomap::{GeoMapError, InsertOutcome, TerrainRegistry};
use image::{Rgba, RgbaImage};
use tempfile::TempDir;

const SAND: Rgba<u8> = Rgba([194, 178, 128, 255]);
const GRASS: Rgba<u8> = Rgba([0, 255, 0, 255]);

fn write_csv(dir: &TempDir, name: &str, lines: &[&str]) -> std::path::PathBuf {
    let path = dir.path().join(name);
    let mut content = lines.join("\n");
    content.push('\n');
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_save_then_load_reproduces_entries() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("terrain_mapping.csv");

    let mut registry = TerrainRegistry::new();
    registry.insert("sand", "s", SAND);
    registry.insert("grass", "g", GRASS);

    save_legend(&path, &registry).unwrap();
    let reloaded = load_legend(&path).unwrap();

    assert_eq!(reloaded.len(), 2);
    for (original, loaded) in registry.entries().iter().zip(reloaded.entries()) {
        assert_eq!(**original, **loaded);
    }
}

#[test]
fn test_saved_file_layout() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("legend.csv");

    let mut registry = TerrainRegistry::new();
    registry.insert("sand", "s", SAND);
    save_legend(&path, &registry).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    assert_eq!(text, "ColorHex,TerrainType,Symbol\n#C2B280FF,sand,s\n");
}

#[test]
fn test_load_valid_csv_is_not_empty() {
    let dir = TempDir::new().unwrap();
    let path = write_csv(&dir, "valid.csv", &["ColorHex,TerrainType,Symbol", "#FFFFFF,Mountain,M"]);
    assert!(!load_legend(&path).unwrap().is_empty());
}

#[test]
fn test_load_header_only_is_empty() {
    let dir = TempDir::new().unwrap();
    let path = write_csv(&dir, "empty.csv", &["ColorHex,TerrainType,Symbol"]);
    assert!(load_legend(&path).unwrap().is_empty());
}

#[test]
fn test_load_invalid_hex_uses_blank() {
    let dir = TempDir::new().unwrap();
    let path = write_csv(&dir, "invalid.csv", &["ColorHex,TerrainType,Symbol", "INVALID,Mountain,M"]);

    let registry = load_legend(&path).unwrap();
    let (color, terrain) = registry.iter().next().unwrap();
    assert_eq!(color, Rgba([0, 0, 0, 0]));
    assert_eq!(terrain.name(), "Mountain");
    assert_eq!(terrain.symbol(), "M");
    assert_eq!(terrain.color(), Rgba([0, 0, 0, 0]));
}

#[test]
fn test_load_empty_hex_ignores_line() {
    let dir = TempDir::new().unwrap();
    let path = write_csv(&dir, "blank.csv", &["ColorHex,TerrainType,Symbol", ",Mountain,M"]);
    assert!(load_legend(&path).unwrap().is_empty());
}

#[test]
fn test_load_missing_file() {
    let dir = TempDir::new().unwrap();
    let result = load_legend(dir.path().join("missing.csv"));
    assert!(matches!(result, Err(GeoMapError::MissingResource(_))));
}

#[test]
fn test_full_pipeline() {
    let dir = TempDir::new().unwrap();
    let legend_path = write_csv(
        &dir,
        "terrain_mapping.csv",
        &["ColorHex,TerrainType,Symbol", "#C2B280,sand,s", "#00FF00,grass,g"],
    );
    let map_path = dir.path().join("test_map.png");
    let mut image = RgbaImage::from_pixel(3, 3, SAND);
    image.put_pixel(1, 1, GRASS);
    image.put_pixel(2, 2, Rgba([0, 0, 255, 255]));
    image.save(&map_path).unwrap();

    let registry = Arc::new(load_legend(&legend_path).unwrap());
    let mut grid = load_map(&map_path, &registry).unwrap();
    assert_eq!(grid.cell_at(1, 1).symbol(), "g");
    assert!(grid.cell_at(2, 2).is_unknown());

    // Teach the grid's legend about water and paint it in
    let water = Rgba([0, 0, 255, 255]);
    assert_eq!(grid.registry_mut().insert("water", "r", water), InsertOutcome::Inserted);
    let water_terrain = grid.registry().resolve(water);
    grid.set_cell(2, 2, water_terrain);

    let out_map = dir.path().join("out.png");
    let out_legend = dir.path().join("out.csv");
    save_map(&out_map, &grid).unwrap();
    save_legend(&out_legend, grid.registry()).unwrap();

    let reloaded_registry = Arc::new(load_legend(&out_legend).unwrap());
    assert_eq!(reloaded_registry.len(), 3);
    let reloaded = load_map(&out_map, &reloaded_registry).unwrap();
    assert_eq!(reloaded.cell_at(2, 2).name(), "water");
    assert_eq!(reloaded.cell_at(0, 0).name(), "sand");

    // The original shared legend was not modified
    assert_eq!(registry.len(), 2);
}

#[test]
fn test_load_legend_with_foreign_header_fails() {
    let dir = TempDir::new().unwrap();
    let path = write_csv(&dir, "terrain_mapping.csv", &["Color,Name,Glyph", "#FFFFFF,Mountain,M"]);

    match load_legend(&path) {
        Err(GeoMapError::MissingColumn(column)) => assert_eq!(column, "ColorHex"),
        other => panic!("expected MissingColumn, got {:?}", other.map(|r| r.len())),
    }
}
