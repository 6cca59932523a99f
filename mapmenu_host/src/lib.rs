// Copyright 2025 the Mapmenu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mapmenu Host: wires a map canvas' right-click into the context menu.
//!
//! The host toolkit implements [`MenuSink`] for its menu widget and
//! [`HostServices`](mapmenu_action::HostServices) for notifications, the
//! clipboard and the map scale. When the canvas is about to show its context
//! menu, [`MenuHost::on_context_menu_about_to_show`] clears the menu,
//! optionally adds a **Copy Coordinates** item, detects features under the
//! click, and renders the built menu. The returned [`MenuSession`] runs the
//! item the user picks; errors and panics inside actions become critical
//! notifications.
//!
//! ```
//! use kurbo::{Point, Rect};
//! use mapmenu_action::{ActionEnv, RecordingServices};
//! use mapmenu_catalog::ActionCatalog;
//! use mapmenu_crs::Crs;
//! use mapmenu_detect::{LayerTree, MapCanvas};
//! use mapmenu_host::{ClickEvent, MenuHost, MenuSelection, OutlineSink};
//! use mapmenu_settings::{MemoryConfig, SettingValue};
//! use mapmenu_view2d::MapViewport;
//!
//! let config = MemoryConfig::new().shared();
//! config
//!     .borrow_mut()
//!     .set("RightClickUtilities/show_copy_coordinates", SettingValue::Bool(true));
//! let catalog = ActionCatalog::load(&[], config);
//!
//! let layers = LayerTree::new();
//! let canvas = MapCanvas::new(
//!     MapViewport::new(Rect::new(0.0, 0.0, 800.0, 600.0), Point::ZERO, 1.0),
//!     Crs::web_mercator(),
//! );
//! let services = RecordingServices::new();
//! let env = ActionEnv { canvas: &canvas, layers: &layers, services: &services };
//!
//! let mut sink = OutlineSink::new();
//! let session = MenuHost::new(&catalog).on_context_menu_about_to_show(
//!     &mut sink,
//!     &ClickEvent::at_map(Point::new(12.5, -3.0)),
//!     env,
//! );
//! assert_eq!(sink.outline(), "Copy Coordinates\n---\n[Right-click Utilities]\n");
//!
//! assert!(session.activate(MenuSelection::CopyCoordinates));
//! assert_eq!(
//!     services.clipboard().as_deref(),
//!     Some("12.500000, -3.000000 (EPSG:3857)")
//! );
//! ```

mod host;
mod sink;

pub use host::{COPY_COORDINATES_LABEL, ClickEvent, MenuHost, MenuSession};
pub use sink::{MenuSelection, MenuSink, OutlineSink, render};
