// Copyright 2025 the Mapmenu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mapmenu CRS: coordinate reference systems and transforms between them.
//!
//! Layers and the map canvas may use different coordinate reference systems.
//! Before a click can be tested against a layer's features, the click point
//! and its search rectangle are carried into the layer's CRS with a
//! [`CoordinateTransform`] obtained from a [`TransformProvider`].
//!
//! Built-in transforms:
//! - [`IdentityTransform`] between equal CRSs.
//! - [`WebMercator`] between `EPSG:4326` and `EPSG:3857`.
//! - [`AffineTransform`] for any pair registered with an explicit affine map,
//!   which covers local engineering grids and test fixtures.
//!
//! Bounding boxes are transformed by densifying their edges so that curved
//! images of straight edges are still enclosed.
//!
//! ```
//! use kurbo::Point;
//! use mapmenu_crs::{Crs, TransformProvider, TransformRegistry};
//!
//! let registry = TransformRegistry::new();
//! let to_mercator = registry
//!     .transform(&Crs::wgs84(), &Crs::web_mercator())
//!     .unwrap();
//! let p = to_mercator.transform_point(Point::new(0.0, 0.0)).unwrap();
//! assert!(p.x.abs() < 1e-9 && p.y.abs() < 1e-9);
//! ```

mod crs;
mod registry;
mod transform;

pub use crs::Crs;
pub use registry::{TransformProvider, TransformRegistry};
pub use transform::{
    AffineTransform, CoordinateTransform, DENSIFY_POINTS, IdentityTransform, TransformError,
    WebMercator,
};
