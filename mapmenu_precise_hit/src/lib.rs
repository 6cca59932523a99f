// Copyright 2025 the Mapmenu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mapmenu Precise Hit: planar feature geometry and exact hit tests.
//!
//! A coarse index narrows candidates by bounding box; this crate answers the
//! precise question for one geometry and one query point:
//!
//! - points are hit when the nearest vertex is within
//!   [`HitParams::point_tolerance`],
//! - lines are hit when the nearest segment is within
//!   [`HitParams::line_tolerance`],
//! - polygons are hit when the point is inside (even-odd over all rings), on
//!   the boundary, or within [`HitParams::boundary_tolerance`] of an edge.
//!
//! All tolerance comparisons are inclusive. A successful test yields a
//! [`HitScore`] whose `distance` is zero for interior and on-boundary hits.
//!
//! ```
//! use kurbo::Point;
//! use mapmenu_precise_hit::{Geometry, HitKind, HitParams, PreciseHitTest};
//!
//! let square = Geometry::polygon(vec![vec![
//!     Point::new(0.0, 0.0),
//!     Point::new(10.0, 0.0),
//!     Point::new(10.0, 10.0),
//!     Point::new(0.0, 10.0),
//! ]]);
//! let params = HitParams {
//!     boundary_tolerance: 2.0,
//!     ..HitParams::default()
//! };
//!
//! let inside = square.hit_test_local(Point::new(5.0, 5.0), &params).unwrap();
//! assert_eq!(inside.kind, HitKind::Interior);
//! assert_eq!(inside.distance, 0.0);
//!
//! let near = square.hit_test_local(Point::new(11.5, 5.0), &params).unwrap();
//! assert_eq!(near.kind, HitKind::Boundary);
//! assert!(square.hit_test_local(Point::new(13.0, 5.0), &params).is_none());
//! ```

#![no_std]

extern crate alloc;

mod geometry;
mod measure;
mod polygon;
mod stroke;

use kurbo::Point;

pub use geometry::{Geometry, GeometryClass, GeometryKind};
pub use measure::bearing_degrees;
pub use polygon::Polygon;
pub use stroke::StrokedPath;

/// Tolerances used by [`PreciseHitTest`], in the geometry's own units.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct HitParams {
    /// Maximum distance from a point vertex.
    pub point_tolerance: f64,
    /// Maximum distance from a line segment, added to any stroke half-width.
    pub line_tolerance: f64,
    /// Maximum distance from a polygon edge for a click outside the polygon.
    pub boundary_tolerance: f64,
}

impl HitParams {
    /// Same tolerance for every geometry class.
    #[must_use]
    pub const fn uniform(tolerance: f64) -> Self {
        Self {
            point_tolerance: tolerance,
            line_tolerance: tolerance,
            boundary_tolerance: tolerance,
        }
    }
}

/// What part of a geometry a hit landed on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HitKind {
    /// Near a point vertex.
    Vertex,
    /// Near a line segment.
    Stroke,
    /// On or near a polygon ring.
    Boundary,
    /// Strictly inside a polygon.
    Interior,
}

/// Result of a successful hit test.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HitScore {
    /// Distance from the query point to the geometry; zero inside or on it.
    pub distance: f64,
    /// Part of the geometry that was hit.
    pub kind: HitKind,
}

/// Exact hit testing in the geometry's local coordinate space.
pub trait PreciseHitTest {
    /// Returns a score when `pt` hits this geometry under `params`.
    fn hit_test_local(&self, pt: Point, params: &HitParams) -> Option<HitScore>;
}
