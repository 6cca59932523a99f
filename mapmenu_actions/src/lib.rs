// Copyright 2025 the Mapmenu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mapmenu Actions: the built-in context menu actions.
//!
//! | Id | Scope | Click types | Category |
//! |---|---|---|---|
//! | `calculate_polygon_area` | feature | polygons | Analysis |
//! | `calculate_polygon_perimeter` | feature | polygons | Analysis |
//! | `calculate_line_length` | feature | lines | Analysis |
//! | `calculate_line_bearing` | feature | lines | Analysis |
//! | `calculate_polygon_areas_layer` | layer | polygons | Analysis |
//! | `calculate_line_length_layer` | layer | lines | Analysis |
//! | `show_point_coordinates` | feature | points | Information |
//! | `change_map_scale` | universal | any | Navigation |
//! | `check_crs_all_layers` | universal | any | Information |
//!
//! Results go to the user through
//! [`HostServices::notify`](mapmenu_action::HostServices::notify) and, when
//! the action's `copy_to_clipboard` setting is on, the clipboard. Lengths and
//! areas of geometry in a geographic CRS are measured in Web Mercator.
//!
//! ```
//! use mapmenu_actions::builtin_registrations;
//! use mapmenu_catalog::ActionCatalog;
//! use mapmenu_settings::MemoryConfig;
//!
//! let catalog = ActionCatalog::load(builtin_registrations(), MemoryConfig::new().shared());
//! assert_eq!(catalog.len(), 9);
//! assert!(catalog.load_report().is_empty());
//! ```

mod feature;
mod info;
mod layer;
mod measure;
mod navigation;
mod report;

use mapmenu_action::Action;
use mapmenu_catalog::Registration;

pub use feature::{LineBearing, LineLength, PolygonArea, PolygonPerimeter, cardinal_direction};
pub use info::{CheckCrsAllLayers, ShowPointCoordinates};
pub use layer::{LineLengthLayer, PolygonAreasLayer};
pub use navigation::{ChangeMapScale, PREDEFINED_SCALES, scale_label};

fn boxed<A: Action + Default + 'static>() -> Box<dyn Action> {
    Box::new(A::default())
}

const BUILTINS: &[Registration] = &[
    boxed::<PolygonArea>,
    boxed::<PolygonPerimeter>,
    boxed::<LineLength>,
    boxed::<LineBearing>,
    boxed::<PolygonAreasLayer>,
    boxed::<LineLengthLayer>,
    boxed::<ShowPointCoordinates>,
    boxed::<ChangeMapScale>,
    boxed::<CheckCrsAllLayers>,
];

/// Registration list of every built-in action, in menu order.
#[must_use]
pub fn builtin_registrations() -> &'static [Registration] {
    BUILTINS
}
