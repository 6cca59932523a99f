// Copyright 2025 the Mapmenu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Headless context menu host.
//!
//! Right-clicks a small sample project at a few places, prints each menu as
//! an outline, runs the first action of every menu and prints what it
//! reported. Settings are read from the JSON file given as the first
//! argument, or kept in memory.
//!
//! Run:
//! - `cargo run -p mapmenu_demos --bin headless_host`
//! - `RUST_LOG=debug cargo run -p mapmenu_demos --bin headless_host -- settings.json`

use std::error::Error;

use kurbo::{Point, Rect};
use mapmenu_action::{ActionEnv, RecordingServices};
use mapmenu_actions::builtin_registrations;
use mapmenu_catalog::ActionCatalog;
use mapmenu_crs::Crs;
use mapmenu_detect::{Feature, LayerTree, MapCanvas, MemoryLayer};
use mapmenu_host::{ClickEvent, MenuHost, MenuSelection, OutlineSink};
use mapmenu_precise_hit::Geometry;
use mapmenu_settings::{JsonFileConfig, MemoryConfig, SettingValue, keys};
use mapmenu_view2d::MapViewport;
use tracing_subscriber::EnvFilter;

fn sample_layers() -> LayerTree {
    let utm = Crs::new("EPSG:32633");
    let mut layers = LayerTree::new();
    layers.register(
        MemoryLayer::new("parcels", "Parcels", utm.clone())
            .with_feature(Feature::new(
                1,
                Geometry::polygon(vec![vec![
                    Point::new(0.0, 0.0),
                    Point::new(200.0, 0.0),
                    Point::new(200.0, 150.0),
                    Point::new(0.0, 150.0),
                ]]),
            ))
            .with_feature(Feature::new(
                2,
                Geometry::polygon(vec![vec![
                    Point::new(200.0, 0.0),
                    Point::new(320.0, 0.0),
                    Point::new(320.0, 150.0),
                    Point::new(200.0, 150.0),
                ]]),
            )),
    );
    layers.register(
        MemoryLayer::new("roads", "Roads", utm.clone()).with_feature(Feature::new(
            7,
            Geometry::line(vec![
                Point::new(-50.0, 75.0),
                Point::new(150.0, 75.0),
                Point::new(400.0, 300.0),
            ]),
        )),
    );
    layers.register(
        MemoryLayer::new("wells", "Wells", utm)
            .with_feature(Feature::new(20, Geometry::point(150.0, 78.0)))
            .with_feature(Feature::new(21, Geometry::point(153.0, 74.0))),
    );
    layers
}

fn first_action(sink: &OutlineSink) -> Option<MenuSelection> {
    sink.labels().find_map(|label| match sink.selection(label) {
        Some(selection @ MenuSelection::Entry(_)) => Some(selection),
        _ => None,
    })
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => JsonFileConfig::open(path)?.shared(),
        None => MemoryConfig::new().shared(),
    };
    config.borrow_mut().set(
        &keys::show_copy_coordinates_key(keys::DEFAULT_NAMESPACE),
        SettingValue::Bool(true),
    );
    let catalog = ActionCatalog::load(builtin_registrations(), config);
    for skipped in catalog.load_report() {
        tracing::warn!(?skipped, "action not loaded");
    }

    let layers = sample_layers();
    let canvas = MapCanvas::new(
        MapViewport::new(Rect::new(0.0, 0.0, 800.0, 600.0), Point::new(160.0, 75.0), 0.5),
        Crs::new("EPSG:32633"),
    );
    let services = RecordingServices::new();
    let env = ActionEnv {
        canvas: &canvas,
        layers: &layers,
        services: &services,
    };
    let host = MenuHost::new(&catalog);

    for (what, at) in [
        ("empty map", Point::new(600.0, 500.0)),
        ("parcel", Point::new(60.0, 30.0)),
        ("road crossing wells", Point::new(151.0, 76.0)),
    ] {
        let mut sink = OutlineSink::new();
        let session = host.on_context_menu_about_to_show(&mut sink, &ClickEvent::at_map(at), env);
        println!("== {what} at ({}, {})", at.x, at.y);
        print!("{}", sink.outline());

        services.clear();
        if let Some(selection) = first_action(&sink) {
            session.activate(selection);
        }
        for note in services.notifications() {
            println!("-- [{:?}] {}", note.severity, note.title);
            for line in note.message.lines() {
                println!("   {line}");
            }
        }
        println!();
    }

    catalog.config().borrow_mut().flush()?;
    Ok(())
}
