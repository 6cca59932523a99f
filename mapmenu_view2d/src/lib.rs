// Copyright 2025 the Mapmenu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mapmenu View 2D: a north-up map viewport.
//!
//! [`MapViewport`] maps between device pixels (y down) and map coordinates
//! (y up, in the units of the canvas CRS). Its zoom level is expressed as
//! *map units per pixel*, which is what pixel tolerances are multiplied by
//! when turning a click radius into a map-space search rectangle.
//!
//! It does **not** own layers or render anything. Hosts keep it in sync with
//! their own canvas and use it to:
//! - Convert a right-click position into map coordinates.
//! - Convert pixel tolerances into map units.
//!
//! ```rust
//! use kurbo::{Point, Rect};
//! use mapmenu_view2d::MapViewport;
//!
//! // 800x600 window centered on (1000, 2000), 2 map units per pixel.
//! let view = MapViewport::new(
//!     Rect::new(0.0, 0.0, 800.0, 600.0),
//!     Point::new(1000.0, 2000.0),
//!     2.0,
//! );
//!
//! // The top-left pixel is north-west of the center.
//! let nw = view.view_to_map_point(Point::new(0.0, 0.0));
//! assert_eq!(nw, Point::new(200.0, 2600.0));
//!
//! // A 10 px tolerance is 20 map units at this zoom.
//! assert_eq!(10.0 * view.map_units_per_pixel(), 20.0);
//! ```
//!
//! This crate is `no_std`.

#![no_std]

mod viewport;

pub use viewport::MapViewport;
