// Copyright 2025 the Mapmenu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The built-in actions, driven through real menus.

use kurbo::{Point, Rect};
use mapmenu_action::{ActionEnv, Notification, RecordingServices, Severity};
use mapmenu_actions::{ChangeMapScale, CheckCrsAllLayers, builtin_registrations};
use mapmenu_catalog::ActionCatalog;
use mapmenu_crs::Crs;
use mapmenu_detect::{Feature, FeatureDetector, LayerTree, MapCanvas, MemoryLayer};
use mapmenu_menu::{ContextMenuBuilder, MenuTree};
use mapmenu_precise_hit::Geometry;
use mapmenu_settings::{MemoryConfig, SettingValue, keys};
use mapmenu_view2d::MapViewport;

fn utm() -> Crs {
    Crs::new("EPSG:32633")
}

fn square(x0: f64, y0: f64, size: f64) -> Geometry {
    Geometry::polygon(vec![vec![
        Point::new(x0, y0),
        Point::new(x0 + size, y0),
        Point::new(x0 + size, y0 + size),
        Point::new(x0, y0 + size),
    ]])
}

struct Fixture {
    layers: LayerTree,
    canvas: MapCanvas,
    services: RecordingServices,
    catalog: ActionCatalog,
}

impl Fixture {
    fn new(layers: LayerTree, crs: Crs) -> Self {
        Self {
            layers,
            canvas: MapCanvas::new(
                MapViewport::new(Rect::new(0.0, 0.0, 800.0, 600.0), Point::ZERO, 1.0),
                crs,
            ),
            services: RecordingServices::new(),
            catalog: ActionCatalog::load(builtin_registrations(), MemoryConfig::new().shared()),
        }
    }

    fn env(&self) -> ActionEnv<'_> {
        ActionEnv {
            canvas: &self.canvas,
            layers: &self.layers,
            services: &self.services,
        }
    }

    fn menu(&self, at: Point) -> MenuTree<'_> {
        let click = FeatureDetector::default().click_context(&self.layers, &self.canvas, at);
        ContextMenuBuilder::new(&self.catalog).build(self.env(), &click)
    }

    fn set(&self, action: &str, setting: &str, value: SettingValue) {
        self.catalog
            .settings_for(action)
            .unwrap()
            .set(setting, value)
            .unwrap();
    }

    /// Runs the entry labelled `label` and returns the first notification it sent.
    fn run(&self, at: Point, label: &str) -> Notification {
        self.services.clear();
        let menu = self.menu(at);
        let entry = menu
            .find_entry(label)
            .unwrap_or_else(|| panic!("no `{label}` in\n{}", menu.structure()));
        menu.invoke(entry, &self.catalog).unwrap();
        self.services.notifications().remove(0)
    }
}

fn parcels() -> LayerTree {
    let mut layers = LayerTree::new();
    layers.register(
        MemoryLayer::new("parcels", "Parcels", utm())
            .with_feature(Feature::new(1, square(0.0, 0.0, 10.0)))
            .with_feature(Feature::new(2, square(100.0, 100.0, 20.0)))
            .with_feature(Feature::without_geometry(3)),
    );
    layers
}

fn roads(crs: Crs, geometry: Geometry) -> LayerTree {
    let mut layers = LayerTree::new();
    layers.register(
        MemoryLayer::new("roads", "Roads", crs).with_feature(Feature::new(5, geometry)),
    );
    layers
}

#[test]
fn every_builtin_loads() {
    let catalog = ActionCatalog::load(builtin_registrations(), MemoryConfig::new().shared());
    assert_eq!(catalog.len(), 9);
    assert!(catalog.load_report().is_empty());
    assert_eq!(catalog.get_enabled_actions().count(), 9);
    for action in catalog.get_all_actions() {
        let settings = catalog.settings_for(action.id()).unwrap();
        assert!(!settings.schema().is_empty(), "{} has no settings", action.id());
    }
}

#[test]
fn polygon_click_menu() {
    let fx = Fixture::new(parcels(), utm());
    assert_eq!(
        fx.menu(Point::new(5.0, 5.0)).structure(),
        "Calculate Polygon Area\nCalculate Polygon Perimeter\n---\n\
         Calculate Polygon Areas for Layer\n---\n\
         Change Map Scale\nCheck CRS for All Layers\n"
    );
    assert_eq!(
        fx.menu(Point::new(500.0, -300.0)).structure(),
        "Change Map Scale\nCheck CRS for All Layers\n"
    );
}

#[test]
fn polygon_area_and_perimeter() {
    let fx = Fixture::new(parcels(), utm());
    let click = Point::new(5.0, 5.0);

    let area = fx.run(click, "Calculate Polygon Area");
    assert_eq!(area.severity, Severity::Info);
    assert_eq!(area.title, "Area Calculation");
    assert_eq!(
        area.message,
        "Feature ID: 1\nLayer: Parcels\nArea: 100.00\nUnits: square meters\nCRS: EPSG:32633"
    );
    assert_eq!(fx.services.clipboard(), None);

    fx.set(PERIMETER, "decimal_places", SettingValue::Int(1));
    fx.set(PERIMETER, "show_crs_info", SettingValue::Bool(false));
    fx.set(PERIMETER, "copy_to_clipboard", SettingValue::Bool(true));
    let perimeter = fx.run(click, "Calculate Polygon Perimeter");
    assert_eq!(
        perimeter.message,
        "Feature ID: 1\nLayer: Parcels\nPerimeter: 40.0 meters"
    );
    assert_eq!(fx.services.clipboard().as_deref(), Some("40.0"));
}

const PERIMETER: &str = "calculate_polygon_perimeter";

#[test]
fn success_message_follows_the_result() {
    let fx = Fixture::new(parcels(), utm());
    fx.set("calculate_polygon_area", "show_success_message", SettingValue::Bool(true));
    fx.run(Point::new(5.0, 5.0), "Calculate Polygon Area");
    let last = fx.services.last_notification().unwrap();
    assert_eq!(last.severity, Severity::Success);
    assert_eq!(last.message, "Area calculated successfully: 100.00 square meters");
}

#[test]
fn layer_statistics_skip_features_without_geometry() {
    let fx = Fixture::new(parcels(), utm());
    fx.set(
        "calculate_polygon_areas_layer",
        "show_individual_results",
        SettingValue::Bool(true),
    );
    let stats = fx.run(Point::new(5.0, 5.0), "Calculate Polygon Areas for Layer");
    assert_eq!(stats.title, "Layer Area Statistics");
    assert_eq!(
        stats.message,
        "Layer: Parcels\n\
         Features: 2 (1 skipped)\n\
         Total Area: 500.00 square meters\n\
         Average: 250.00 square meters\n\
         Minimum: 100.00 square meters\n\
         Maximum: 400.00 square meters\n\
         Feature 1: 100.00 square meters\n\
         Feature 2: 400.00 square meters"
    );
    let last = fx.services.last_notification().unwrap();
    assert_eq!(last.severity, Severity::Success);
    assert_eq!(last.message, "Processed 2 features in layer `Parcels`");
}

#[test]
fn geographic_lines_are_measured_in_meters() {
    let line = Geometry::line(vec![Point::new(0.0, 0.0), Point::new(1.0, 0.0)]);
    let fx = Fixture::new(roads(Crs::wgs84(), line), Crs::wgs84());
    let length = fx.run(Point::new(0.5, 0.0), "Calculate Line Length");
    assert_eq!(
        length.message,
        "Feature ID: 5\nLayer: Roads\nLength: 111319.49\nUnits: meters\nCRS: EPSG:3857"
    );
}

#[test]
fn bearing_reports_the_segment_under_the_click() {
    let line = Geometry::line(vec![
        Point::new(0.0, 0.0),
        Point::new(100.0, 0.0),
        Point::new(100.0, 100.0),
    ]);
    let fx = Fixture::new(roads(utm(), line), utm());
    let bearing = fx.run(Point::new(100.0, 60.0), "Calculate Line Bearing/Azimuth");
    assert_eq!(bearing.title, "Line Bearing");
    assert_eq!(
        bearing.message,
        "Feature ID: 5\n\
         Layer: Roads\n\
         Bearing: 45.00° (NE)\n\
         Start: 0.00, 0.00\n\
         End: 100.00, 100.00\n\
         Closest Segment: 2 of 2\n\
         Segment Bearing: 0.00° (N)\n\
         Length: 200.00 meters"
    );
}

#[test]
fn point_coordinates_in_wgs84() {
    let mut layers = LayerTree::new();
    layers.register(
        MemoryLayer::new("wells", "Wells", Crs::web_mercator())
            .with_feature(Feature::new(3, Geometry::point(111_319.490_793_273_57, 0.0))),
    );
    let fx = Fixture::new(layers, Crs::web_mercator());
    fx.set("show_point_coordinates", "show_wgs84", SettingValue::Bool(true));
    fx.set("show_point_coordinates", "copy_to_clipboard", SettingValue::Bool(true));
    let coords = fx.run(Point::new(111_320.0, 2.0), "Show Point Coordinates");
    assert_eq!(coords.title, "Point Coordinates");
    assert_eq!(
        coords.message,
        "Feature ID: 3\n\
         Layer: Wells\n\
         EPSG:3857: 111319.490793, 0.000000\n\
         EPSG:4326: 1.000000, 0.000000"
    );
    assert_eq!(
        fx.services.clipboard().as_deref(),
        Some("111319.490793, 0.000000")
    );
}

#[test]
fn crs_check_flags_mismatched_layers() {
    let mut layers = LayerTree::new();
    layers.register(MemoryLayer::new("parcels", "Parcels", utm()));
    layers.register(MemoryLayer::new("tiles", "Tiles", Crs::web_mercator()));
    layers.register(MemoryLayer::new("broken", "Broken", utm()).with_valid(false));
    let fx = Fixture::new(layers, utm());
    let check = fx.run(Point::ZERO, "Check CRS for All Layers");
    assert_eq!(check.severity, Severity::Warning);
    assert_eq!(check.title, "CRS Check");
    assert_eq!(
        check.message,
        "Map CRS: EPSG:32633\n\
         Parcels: EPSG:32633\n\
         Tiles: EPSG:3857 (mismatch)\n\
         Total Layers: 2 | Mismatched CRS: 1"
    );
}

#[test]
fn crs_check_without_layers_warns() {
    let fx = Fixture::new(LayerTree::new(), utm());
    let check = fx.run(Point::ZERO, "Check CRS for All Layers");
    assert_eq!(check.severity, Severity::Warning);
    assert_eq!(check.title, "No Layers");
    assert!(fx.catalog.get_action(CheckCrsAllLayers::ID).is_some());
}

#[test]
fn map_scale_comes_from_settings() {
    let fx = Fixture::new(LayerTree::new(), utm());
    let set = fx.run(Point::ZERO, "Change Map Scale");
    assert_eq!(set.message, "Map scale set to 1:10,000 - District");
    assert_eq!(fx.services.map_scale(), Some(10_000.0));

    let settings = fx.catalog.settings_for(ChangeMapScale::ID).unwrap();
    assert!(
        settings
            .set("scale_denominator", SettingValue::Int(30_000))
            .is_err()
    );
    settings
        .set("scale_denominator", SettingValue::Int(25_000))
        .unwrap();
    let set = fx.run(Point::ZERO, "Change Map Scale");
    assert_eq!(set.message, "Map scale set to 1:25,000 - Town/City");
    assert_eq!(fx.services.map_scale(), Some(25_000.0));
}

#[test]
fn hand_edited_scale_falls_back_to_default() {
    let fx = Fixture::new(LayerTree::new(), utm());
    fx.catalog.config().borrow_mut().set(
        &keys::setting_key(fx.catalog.namespace(), ChangeMapScale::ID, "scale_denominator"),
        SettingValue::Int(12_345),
    );
    fx.run(Point::ZERO, "Change Map Scale");
    assert_eq!(fx.services.map_scale(), Some(10_000.0));
}
