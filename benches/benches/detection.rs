// Copyright 2025 the Mapmenu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::{Point, Rect};
use mapmenu_crs::Crs;
use mapmenu_detect::{DetectorConfig, Feature, FeatureDetector, LayerTree, MapCanvas, MemoryLayer};
use mapmenu_precise_hit::Geometry;
use mapmenu_view2d::MapViewport;

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_f64(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) / ((1u64 << 53) as f64)
    }
}

/// `n * n` square parcels of side `cell` with a well in each.
fn gen_grid_layers(n: usize, cell: f64) -> LayerTree {
    let mut parcels = MemoryLayer::new("parcels", "Parcels", Crs::new("EPSG:32633"));
    let mut wells = MemoryLayer::new("wells", "Wells", Crs::new("EPSG:32633"));
    let mut id = 0_i64;
    for y in 0..n {
        for x in 0..n {
            let x0 = x as f64 * cell;
            let y0 = y as f64 * cell;
            parcels.push(Feature::new(
                id,
                Geometry::polygon(vec![vec![
                    Point::new(x0, y0),
                    Point::new(x0 + cell, y0),
                    Point::new(x0 + cell, y0 + cell),
                    Point::new(x0, y0 + cell),
                ]]),
            ));
            wells.push(Feature::new(
                id,
                Geometry::point(x0 + 0.5 * cell, y0 + 0.5 * cell),
            ));
            id += 1;
        }
    }
    let mut layers = LayerTree::new();
    layers.register(parcels);
    layers.register(wells);
    layers
}

fn gen_clicks(count: usize, extent: f64) -> Vec<Point> {
    let mut rng = Rng::new(0x81FD_BEE7_94F0_AF1A);
    (0..count)
        .map(|_| Point::new(rng.next_f64() * extent, rng.next_f64() * extent))
        .collect()
}

fn canvas() -> MapCanvas {
    MapCanvas::new(
        MapViewport::new(Rect::new(0.0, 0.0, 1280.0, 800.0), Point::ZERO, 1.0),
        Crs::new("EPSG:32633"),
    )
}

fn bench_detect(c: &mut Criterion) {
    let cell = 50.0;
    let canvas = canvas();
    let scan = FeatureDetector::new(DetectorConfig {
        spatial_index_threshold: usize::MAX,
        ..DetectorConfig::default()
    });
    let indexed = FeatureDetector::new(DetectorConfig {
        spatial_index_threshold: 0,
        ..DetectorConfig::default()
    });

    let mut group = c.benchmark_group("detect_grid");
    for &n in &[16usize, 64, 128] {
        let layers = gen_grid_layers(n, cell);
        let clicks = gen_clicks(256, n as f64 * cell);
        group.throughput(Throughput::Elements(clicks.len() as u64));
        group.bench_function(BenchmarkId::new("Scan", n), |b| {
            b.iter(|| {
                for &pt in &clicks {
                    black_box(scan.detect(&layers, &canvas, pt));
                }
            });
        });
        group.bench_function(BenchmarkId::new("Indexed", n), |b| {
            b.iter(|| {
                for &pt in &clicks {
                    black_box(indexed.detect(&layers, &canvas, pt));
                }
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_detect);
criterion_main!(benches);
