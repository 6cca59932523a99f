// Copyright 2025 the Mapmenu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Polygons with holes: even-odd containment and boundary distance.

use alloc::vec::Vec;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::{Line, Point};

use crate::stroke::{min_segment_distance, segment_distance};
use crate::{HitKind, HitParams, HitScore, PreciseHitTest};

/// A polygon made of one exterior ring followed by zero or more holes.
///
/// Rings may be given open or explicitly closed; the closing edge is implied.
/// Containment uses the even-odd rule across all rings, so holes need no
/// particular winding.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Polygon {
    /// Exterior ring first, then interior rings.
    pub rings: Vec<Vec<Point>>,
}

/// Edges of a ring including the implied closing edge.
pub(crate) fn ring_edges(ring: &[Point]) -> impl Iterator<Item = Line> + '_ {
    let n = ring.len();
    (0..n).filter_map(move |i| {
        let a = ring[i];
        let b = ring[(i + 1) % n];
        // An explicitly closed ring repeats its first vertex; skip the
        // zero-length wrap edge unless the ring is a single vertex.
        (n == 1 || a != b).then(|| Line::new(a, b))
    })
}

/// Number of ring edges crossed by a ray cast from `pt` towards +x, modulo 2.
fn ring_crossing_parity(ring: &[Point], pt: Point) -> bool {
    let mut inside = false;
    for edge in ring_edges(ring) {
        let (a, b) = (edge.p0, edge.p1);
        if (a.y > pt.y) != (b.y > pt.y) {
            let x_at = a.x + (pt.y - a.y) * (b.x - a.x) / (b.y - a.y);
            if pt.x < x_at {
                inside = !inside;
            }
        }
    }
    inside
}

/// Shoelace area of a ring, positive for counter-clockwise (y-up) rings.
pub(crate) fn ring_signed_area(ring: &[Point]) -> f64 {
    ring_edges(ring)
        .map(|e| e.p0.x * e.p1.y - e.p1.x * e.p0.y)
        .sum::<f64>()
        * 0.5
}

impl Polygon {
    /// Creates a polygon from its rings.
    #[must_use]
    pub fn new(rings: Vec<Vec<Point>>) -> Self {
        Self { rings }
    }

    /// Returns `true` if there is no exterior ring with at least one vertex.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rings.first().is_none_or(Vec::is_empty)
    }

    /// Iterates over every ring edge.
    pub fn edges(&self) -> impl Iterator<Item = Line> + '_ {
        self.rings.iter().flat_map(|r| ring_edges(r))
    }

    /// Even-odd containment over all rings. Points exactly on an edge may
    /// report either side; use [`Polygon::boundary_distance`] for those.
    #[must_use]
    pub fn contains(&self, pt: Point) -> bool {
        self.rings
            .iter()
            .fold(false, |acc, ring| acc ^ ring_crossing_parity(ring, pt))
    }

    /// Distance from `pt` to the nearest edge of any ring.
    #[must_use]
    pub fn boundary_distance(&self, pt: Point) -> f64 {
        min_segment_distance(self.edges(), pt)
    }

    /// Returns `true` if `pt` lies on an edge.
    #[must_use]
    pub fn on_boundary(&self, pt: Point) -> bool {
        self.edges().any(|e| segment_distance(e, pt) == 0.0)
    }

    /// Distance from `pt` to the polygon area: zero inside or on the boundary.
    #[must_use]
    pub fn distance(&self, pt: Point) -> f64 {
        if self.contains(pt) {
            0.0
        } else {
            self.boundary_distance(pt)
        }
    }

    /// Planar area: exterior minus holes.
    #[must_use]
    pub fn area(&self) -> f64 {
        let mut rings = self.rings.iter().map(|r| ring_signed_area(r).abs());
        let exterior = rings.next().unwrap_or(0.0);
        (exterior - rings.sum::<f64>()).max(0.0)
    }

    /// Total length of all rings.
    #[must_use]
    pub fn perimeter(&self) -> f64 {
        self.edges().map(|e| e.p0.distance(e.p1)).sum()
    }
}

impl PreciseHitTest for Polygon {
    fn hit_test_local(&self, pt: Point, params: &HitParams) -> Option<HitScore> {
        if self.is_empty() {
            return None;
        }
        // Three independent checks; any one is enough.
        if self.contains(pt) {
            return Some(HitScore {
                distance: 0.0,
                kind: HitKind::Interior,
            });
        }
        if self.on_boundary(pt) {
            return Some(HitScore {
                distance: 0.0,
                kind: HitKind::Boundary,
            });
        }
        let d = self.boundary_distance(pt);
        (d <= params.boundary_tolerance).then_some(HitScore {
            distance: d,
            kind: HitKind::Boundary,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn square(x0: f64, y0: f64, size: f64) -> Vec<Point> {
        vec![
            Point::new(x0, y0),
            Point::new(x0 + size, y0),
            Point::new(x0 + size, y0 + size),
            Point::new(x0, y0 + size),
        ]
    }

    #[test]
    fn holes_are_outside() {
        let donut = Polygon::new(vec![square(0.0, 0.0, 10.0), square(3.0, 3.0, 4.0)]);
        assert!(donut.contains(Point::new(1.0, 1.0)));
        assert!(!donut.contains(Point::new(5.0, 5.0)));
        assert!(!donut.contains(Point::new(20.0, 5.0)));
        assert_eq!(donut.distance(Point::new(5.0, 5.0)), 2.0);
        assert_eq!(donut.area(), 84.0);
        assert_eq!(donut.perimeter(), 56.0);
    }

    #[test]
    fn closed_and_open_rings_agree() {
        let mut closed = square(0.0, 0.0, 10.0);
        closed.push(Point::new(0.0, 0.0));
        let a = Polygon::new(vec![closed]);
        let b = Polygon::new(vec![square(0.0, 0.0, 10.0)]);
        assert_eq!(a.area(), b.area());
        assert_eq!(a.perimeter(), b.perimeter());
        assert_eq!(a.edges().count(), 4);
    }

    #[test]
    fn boundary_hit_paths() {
        let poly = Polygon::new(vec![square(0.0, 0.0, 100.0)]);
        let params = HitParams {
            boundary_tolerance: 15.0,
            ..HitParams::default()
        };

        let on_edge = poly.hit_test_local(Point::new(100.0, 50.0), &params).unwrap();
        assert_eq!(on_edge.distance, 0.0);

        let near = poly.hit_test_local(Point::new(112.0, 50.0), &params).unwrap();
        assert_eq!(near.kind, HitKind::Boundary);
        assert_eq!(near.distance, 12.0);

        let edge_of_tolerance = poly.hit_test_local(Point::new(50.0, -15.0), &params);
        assert!(edge_of_tolerance.is_some());
        assert!(poly.hit_test_local(Point::new(50.0, -15.5), &params).is_none());
    }

    #[test]
    fn empty_polygon_never_hits() {
        let poly = Polygon::default();
        assert!(poly.is_empty());
        assert!(poly.hit_test_local(Point::ZERO, &HitParams::uniform(1e9)).is_none());
        assert_eq!(poly.boundary_distance(Point::ZERO), f64::INFINITY);
    }
}
