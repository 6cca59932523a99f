// Copyright 2025 the Mapmenu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mapmenu Detect: which map features are under a right-click.
//!
//! ## Pipeline
//!
//! For every layer of the [`LayerTree`] that is visible and valid, in
//! registration order:
//!
//! 1. Pick a pixel tolerance from the layer's geometry class: points and
//!    lines use [`DetectorConfig::point_search_radius`], polygons (and
//!    layers of unknown class) use [`DetectorConfig::default_tolerance`].
//!    Multiply by the canvas resolution to get a search rectangle.
//! 2. If the layer's CRS differs from the canvas CRS, transform the click,
//!    the rectangle and the tolerances into layer units. A layer whose
//!    transform fails is skipped.
//! 3. Keep features whose bounding box meets the rectangle. Large layers go
//!    through a [`FeatureIndex`]; both paths give identical candidates.
//! 4. Run the exact hit test from `mapmenu_precise_hit` on each candidate.
//!
//! Hits are then ordered points first, then lines, then polygons, nearer
//! first within each group, and the click is classified as a [`ClickType`].
//!
//! ```
//! use kurbo::{Point, Rect};
//! use mapmenu_crs::Crs;
//! use mapmenu_detect::{
//!     ClickType, Feature, FeatureDetector, LayerTree, MapCanvas, MemoryLayer,
//! };
//! use mapmenu_precise_hit::{Geometry, GeometryKind};
//! use mapmenu_view2d::MapViewport;
//!
//! let crs = Crs::new("EPSG:3857");
//! let mut layers = LayerTree::new();
//! layers.register(
//!     MemoryLayer::new("wells", "Wells", crs.clone())
//!         .with_feature(Feature::new(7, Geometry::point(103.0, 204.0))),
//! );
//! let viewport =
//!     MapViewport::new(Rect::new(0.0, 0.0, 640.0, 480.0), Point::new(100.0, 200.0), 1.0);
//! let canvas = MapCanvas::new(viewport, crs);
//!
//! let ctx = FeatureDetector::default().click_context(&layers, &canvas, Point::new(100.0, 200.0));
//! assert_eq!(ctx.click_type, ClickType::Geometry(GeometryKind::Point));
//! assert_eq!(ctx.detected_features[0].distance, 5.0);
//! ```

mod canvas;
mod detector;
mod layer;
mod spatial;
mod tree;

pub use canvas::MapCanvas;
pub use detector::{ClickContext, ClickType, DetectedFeature, DetectorConfig, FeatureDetector};
pub use layer::{Feature, FeatureId, LayerId, MemoryLayer, VectorLayer};
pub use spatial::FeatureIndex;
pub use tree::LayerTree;
