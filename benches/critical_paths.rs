//! Criterion benchmarks for Geomap critical paths
//!
//! - Color: hex parsing
//! - Map codec: image decode and grid encode
//! - Legend: CSV parsing

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use geomap::color::parse_hex;
use geomap::legend::read_legend;
use geomap::map_codec::{decode, encode};
use geomap::TerrainRegistry;
use image::{Rgba, RgbaImage};
use std::sync::Arc;

/// Registry with 16 terrains keyed by shades of red
fn make_registry() -> TerrainRegistry {
    let mut registry = TerrainRegistry::new();
    for i in 0..16u8 {
        registry.insert(&format!("terrain{}", i), &format!("{:x}", i), Rgba([i * 16, 0, 0, 255]));
    }
    registry
}

/// Image whose pixels cycle through the registry colors plus one unknown color
fn make_image(size: u32) -> RgbaImage {
    RgbaImage::from_fn(size, size, |x, y| {
        let i = ((x + y) % 17) as u8;
        if i == 16 {
            Rgba([1, 2, 3, 255])
        } else {
            Rgba([i * 16, 0, 0, 255])
        }
    })
}

fn make_legend_csv(rows: usize) -> String {
    let mut csv = String::from("ColorHex,TerrainType,Symbol\n");
    for i in 0..rows {
        csv.push_str(&format!("#{:06X},terrain{},{}\n", i, i, i % 10));
    }
    csv
}

fn bench_color(c: &mut Criterion) {
    let mut group = c.benchmark_group("color");
    for input in ["#C2B280", "#C2B280FF", "#F00", "INVALID"] {
        group.bench_with_input(BenchmarkId::new("parse_hex", input), input, |b, s| {
            b.iter(|| parse_hex(black_box(s)))
        });
    }
    group.finish();
}

fn bench_map_codec(c: &mut Criterion) {
    let registry = Arc::new(make_registry());
    let mut group = c.benchmark_group("map_codec");

    for size in [32u32, 128, 512] {
        let image = make_image(size);
        group.throughput(Throughput::Elements(u64::from(size) * u64::from(size)));

        group.bench_with_input(BenchmarkId::new("decode", size), &image, |b, image| {
            b.iter(|| decode(black_box(image), &registry))
        });

        let grid = decode(&image, &registry).expect("bench image decodes");
        group.bench_with_input(BenchmarkId::new("encode", size), &grid, |b, grid| {
            b.iter(|| encode(black_box(grid)))
        });
    }
    group.finish();
}

fn bench_legend(c: &mut Criterion) {
    let mut group = c.benchmark_group("legend");
    for rows in [16usize, 256] {
        let csv = make_legend_csv(rows);
        group.throughput(Throughput::Elements(rows as u64));
        group.bench_with_input(BenchmarkId::new("read_legend", rows), &csv, |b, csv| {
            b.iter(|| read_legend(black_box(csv.as_bytes())))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_color, bench_map_codec, bench_legend);
criterion_main!(benches);
