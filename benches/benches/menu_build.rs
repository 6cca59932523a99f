// Copyright 2025 the Mapmenu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use kurbo::{Point, Rect};
use mapmenu_action::{ActionEnv, RecordingServices};
use mapmenu_actions::builtin_registrations;
use mapmenu_catalog::ActionCatalog;
use mapmenu_crs::Crs;
use mapmenu_detect::{Feature, FeatureDetector, LayerTree, MapCanvas, MemoryLayer};
use mapmenu_menu::ContextMenuBuilder;
use mapmenu_precise_hit::Geometry;
use mapmenu_settings::MemoryConfig;
use mapmenu_view2d::MapViewport;

/// `count` points stacked within a few map units of the origin.
fn gen_stacked_wells(count: usize) -> LayerTree {
    let mut wells = MemoryLayer::new("wells", "Wells", Crs::new("EPSG:32633"));
    for i in 0..count {
        let t = i as f64;
        wells.push(Feature::new(
            i as i64,
            Geometry::point(t.cos() * 3.0, t.sin() * 3.0),
        ));
    }
    let mut layers = LayerTree::new();
    layers.register(wells);
    layers
}

fn bench_build(c: &mut Criterion) {
    let catalog = ActionCatalog::load(builtin_registrations(), MemoryConfig::new().shared());
    let canvas = MapCanvas::new(
        MapViewport::new(Rect::new(0.0, 0.0, 1280.0, 800.0), Point::ZERO, 1.0),
        Crs::new("EPSG:32633"),
    );
    let services = RecordingServices::new();
    let builder = ContextMenuBuilder::new(&catalog);

    let mut group = c.benchmark_group("menu_build");
    for &n in &[0usize, 1, 8, 64] {
        let layers = gen_stacked_wells(n);
        let env = ActionEnv {
            canvas: &canvas,
            layers: &layers,
            services: &services,
        };
        let click = FeatureDetector::default().click_context(&layers, &canvas, Point::ZERO);
        group.bench_function(BenchmarkId::new("stacked_points", n), |b| {
            b.iter(|| black_box(builder.build_or_placeholder(env, &click)));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_build);
criterion_main!(benches);
