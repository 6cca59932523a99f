// Copyright 2025 the Mapmenu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Feature geometry and its kind.

use alloc::vec::Vec;
use core::fmt;

use kurbo::{Point, Rect};

use crate::polygon::Polygon;
use crate::stroke::StrokedPath;
use crate::{HitKind, HitParams, HitScore, PreciseHitTest};

/// Geometry kind of a single feature, resolved from its multipart structure.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GeometryKind {
    /// A single point.
    Point,
    /// Several points.
    MultiPoint,
    /// A single polyline.
    Line,
    /// Several polylines.
    MultiLine,
    /// A single polygon.
    Polygon,
    /// Several polygons.
    MultiPolygon,
}

impl GeometryKind {
    /// Every kind, single-part before multipart, points before lines before polygons.
    pub const ALL: [Self; 6] = [
        Self::Point,
        Self::MultiPoint,
        Self::Line,
        Self::MultiLine,
        Self::Polygon,
        Self::MultiPolygon,
    ];

    /// Lower-case identifier, e.g. `"multipolygon"`.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Point => "point",
            Self::MultiPoint => "multipoint",
            Self::Line => "line",
            Self::MultiLine => "multiline",
            Self::Polygon => "polygon",
            Self::MultiPolygon => "multipolygon",
        }
    }

    /// Capitalized label, e.g. `"Multipolygon"`.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Point => "Point",
            Self::MultiPoint => "Multipoint",
            Self::Line => "Line",
            Self::MultiLine => "Multiline",
            Self::Polygon => "Polygon",
            Self::MultiPolygon => "Multipolygon",
        }
    }

    /// Parses a name produced by [`GeometryKind::name`].
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.name() == name)
    }

    /// Point, line or polygon class.
    #[must_use]
    pub const fn class(self) -> GeometryClass {
        match self {
            Self::Point | Self::MultiPoint => GeometryClass::Point,
            Self::Line | Self::MultiLine => GeometryClass::Line,
            Self::Polygon | Self::MultiPolygon => GeometryClass::Polygon,
        }
    }

    /// Priority rank: points 0, lines 1, polygons 2.
    #[must_use]
    pub const fn rank(self) -> u8 {
        self.class() as u8
    }

    /// Returns `true` for the multipart kinds.
    #[must_use]
    pub const fn is_multipart(self) -> bool {
        matches!(self, Self::MultiPoint | Self::MultiLine | Self::MultiPolygon)
    }
}

impl fmt::Display for GeometryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Coarse class of a geometry kind, ignoring multipart structure.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GeometryClass {
    /// Points and multipoints.
    Point = 0,
    /// Lines and multilines.
    Line = 1,
    /// Polygons and multipolygons.
    Polygon = 2,
}

/// Planar geometry of a map feature.
#[derive(Clone, Debug, PartialEq)]
pub enum Geometry {
    /// A single point.
    Point(Point),
    /// Several points.
    MultiPoint(Vec<Point>),
    /// A polyline.
    LineString(Vec<Point>),
    /// Several polylines.
    MultiLineString(Vec<Vec<Point>>),
    /// A polygon with optional holes.
    Polygon(Polygon),
    /// Several polygons.
    MultiPolygon(Vec<Polygon>),
}

impl Geometry {
    /// A point geometry.
    #[must_use]
    pub fn point(x: f64, y: f64) -> Self {
        Self::Point(Point::new(x, y))
    }

    /// A polyline from its vertices.
    #[must_use]
    pub fn line(vertices: Vec<Point>) -> Self {
        Self::LineString(vertices)
    }

    /// A polygon from its rings, exterior first.
    #[must_use]
    pub fn polygon(rings: Vec<Vec<Point>>) -> Self {
        Self::Polygon(Polygon::new(rings))
    }

    /// Kind of this geometry.
    #[must_use]
    pub fn kind(&self) -> GeometryKind {
        match self {
            Self::Point(_) => GeometryKind::Point,
            Self::MultiPoint(_) => GeometryKind::MultiPoint,
            Self::LineString(_) => GeometryKind::Line,
            Self::MultiLineString(_) => GeometryKind::MultiLine,
            Self::Polygon(_) => GeometryKind::Polygon,
            Self::MultiPolygon(_) => GeometryKind::MultiPolygon,
        }
    }

    /// Iterates over every vertex of every part.
    pub fn vertices(&self) -> impl Iterator<Item = Point> + '_ {
        let parts: Vec<&[Point]> = match self {
            Self::Point(p) => alloc::vec![core::slice::from_ref(p)],
            Self::MultiPoint(ps) | Self::LineString(ps) => alloc::vec![ps.as_slice()],
            Self::MultiLineString(lines) => lines.iter().map(Vec::as_slice).collect(),
            Self::Polygon(poly) => poly.rings.iter().map(Vec::as_slice).collect(),
            Self::MultiPolygon(polys) => polys
                .iter()
                .flat_map(|p| p.rings.iter().map(Vec::as_slice))
                .collect(),
        };
        parts.into_iter().flat_map(|part| part.iter().copied())
    }

    /// Returns `true` if the geometry has no vertices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices().next().is_none()
    }

    /// Returns `true` if every vertex is finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.vertices().all(|p| p.is_finite())
    }

    /// Bounding box, or `None` for empty or non-finite geometry.
    #[must_use]
    pub fn bounds(&self) -> Option<Rect> {
        let mut it = self.vertices();
        let first = it.next()?;
        let rect = it.fold(Rect::from_points(first, first), |r, p| r.union_pt(p));
        (rect.x0.is_finite() && rect.y0.is_finite() && rect.x1.is_finite() && rect.y1.is_finite())
            .then_some(rect)
    }

    /// Distance from `pt` to the geometry.
    ///
    /// Points use the nearest vertex, lines the nearest segment, polygons
    /// are zero inside or on the boundary. Empty geometry is infinitely far.
    #[must_use]
    pub fn distance(&self, pt: Point) -> f64 {
        match self {
            Self::Point(_) | Self::MultiPoint(_) => self
                .vertices()
                .map(|v| v.distance(pt))
                .fold(f64::INFINITY, f64::min),
            Self::LineString(vertices) => path(vertices).distance(pt),
            Self::MultiLineString(lines) => lines
                .iter()
                .map(|l| path(l).distance(pt))
                .fold(f64::INFINITY, f64::min),
            Self::Polygon(poly) => {
                if poly.is_empty() {
                    f64::INFINITY
                } else {
                    poly.distance(pt)
                }
            }
            Self::MultiPolygon(polys) => polys
                .iter()
                .filter(|p| !p.is_empty())
                .map(|p| p.distance(pt))
                .fold(f64::INFINITY, f64::min),
        }
    }

    /// Applies `f` to every vertex, keeping the structure.
    ///
    /// Returns `None` as soon as `f` does, so a failed coordinate transform
    /// yields no geometry at all rather than a partially transformed one.
    pub fn try_map_points<F>(&self, mut f: F) -> Option<Self>
    where
        F: FnMut(Point) -> Option<Point>,
    {
        let mut map_part = |ps: &[Point]| ps.iter().map(|p| f(*p)).collect::<Option<Vec<_>>>();
        Some(match self {
            Self::Point(p) => Self::Point(map_part(core::slice::from_ref(p))?[0]),
            Self::MultiPoint(ps) => Self::MultiPoint(map_part(ps)?),
            Self::LineString(ps) => Self::LineString(map_part(ps)?),
            Self::MultiLineString(lines) => Self::MultiLineString(
                lines.iter().map(|l| map_part(l)).collect::<Option<_>>()?,
            ),
            Self::Polygon(poly) => Self::Polygon(Polygon::new(
                poly.rings.iter().map(|r| map_part(r)).collect::<Option<_>>()?,
            )),
            Self::MultiPolygon(polys) => Self::MultiPolygon(
                polys
                    .iter()
                    .map(|poly| {
                        poly.rings
                            .iter()
                            .map(|r| map_part(r))
                            .collect::<Option<Vec<_>>>()
                            .map(Polygon::new)
                    })
                    .collect::<Option<_>>()?,
            ),
        })
    }
}

fn path(vertices: &[Point]) -> StrokedPath<'_> {
    StrokedPath {
        vertices,
        half_width: 0.0,
    }
}

fn best(a: Option<HitScore>, b: Option<HitScore>) -> Option<HitScore> {
    match (a, b) {
        (Some(x), Some(y)) => Some(if y.distance < x.distance { y } else { x }),
        (x, None) => x,
        (None, y) => y,
    }
}

impl PreciseHitTest for Geometry {
    fn hit_test_local(&self, pt: Point, params: &HitParams) -> Option<HitScore> {
        if !pt.is_finite() || !self.is_finite() {
            return None;
        }
        match self {
            Self::Point(_) | Self::MultiPoint(_) => {
                let d = self.distance(pt);
                (d <= params.point_tolerance).then_some(HitScore {
                    distance: d,
                    kind: HitKind::Vertex,
                })
            }
            Self::LineString(vertices) => path(vertices).hit_test_local(pt, params),
            Self::MultiLineString(lines) => lines
                .iter()
                .map(|l| path(l).hit_test_local(pt, params))
                .fold(None, best),
            Self::Polygon(poly) => poly.hit_test_local(pt, params),
            Self::MultiPolygon(polys) => polys
                .iter()
                .map(|p| p.hit_test_local(pt, params))
                .fold(None, best),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn unit_square(x0: f64) -> Polygon {
        Polygon::new(vec![vec![
            Point::new(x0, 0.0),
            Point::new(x0 + 1.0, 0.0),
            Point::new(x0 + 1.0, 1.0),
            Point::new(x0, 1.0),
        ]])
    }

    #[test]
    fn kinds_and_ranks() {
        assert_eq!(Geometry::point(0.0, 0.0).kind(), GeometryKind::Point);
        assert_eq!(
            Geometry::MultiPolygon(vec![unit_square(0.0)]).kind(),
            GeometryKind::MultiPolygon
        );
        assert_eq!(GeometryKind::MultiPoint.rank(), 0);
        assert_eq!(GeometryKind::MultiLine.rank(), 1);
        assert_eq!(GeometryKind::Polygon.rank(), 2);
        assert!(GeometryKind::MultiLine.is_multipart());
        assert_eq!(GeometryKind::MultiPolygon.title(), "Multipolygon");
        assert_eq!(GeometryKind::from_name("line"), Some(GeometryKind::Line));
        assert_eq!(GeometryKind::from_name("mixed"), None);
    }

    #[test]
    fn point_tolerance_is_inclusive() {
        let g = Geometry::MultiPoint(vec![Point::new(0.0, 0.0), Point::new(10.0, 0.0)]);
        let params = HitParams {
            point_tolerance: 3.0,
            ..HitParams::default()
        };
        let hit = g.hit_test_local(Point::new(10.0, 3.0), &params).unwrap();
        assert_eq!(hit.distance, 3.0);
        assert_eq!(hit.kind, HitKind::Vertex);
        assert!(g.hit_test_local(Point::new(10.0, 3.01), &params).is_none());
    }

    #[test]
    fn multipolygon_picks_nearest_part() {
        let g = Geometry::MultiPolygon(vec![unit_square(0.0), unit_square(5.0)]);
        let hit = g
            .hit_test_local(Point::new(4.5, 0.5), &HitParams::uniform(1.0))
            .unwrap();
        assert_eq!(hit.distance, 0.5);
        assert_eq!(g.distance(Point::new(5.5, 0.5)), 0.0);
    }

    #[test]
    fn bounds_and_degenerate_input() {
        let g = Geometry::line(vec![Point::new(2.0, -1.0), Point::new(-3.0, 4.0)]);
        assert_eq!(g.bounds(), Some(Rect::new(-3.0, -1.0, 2.0, 4.0)));

        let empty = Geometry::LineString(vec![]);
        assert!(empty.is_empty());
        assert_eq!(empty.bounds(), None);
        assert_eq!(empty.distance(Point::ZERO), f64::INFINITY);

        let nan = Geometry::point(f64::NAN, 0.0);
        assert_eq!(nan.bounds(), None);
        assert!(nan.hit_test_local(Point::ZERO, &HitParams::uniform(1e9)).is_none());
    }

    #[test]
    fn try_map_points_is_all_or_nothing() {
        let g = Geometry::polygon(vec![vec![
            Point::new(0.0, 0.0),
            Point::new(2.0, 0.0),
            Point::new(2.0, 2.0),
        ]]);
        let shifted = g
            .try_map_points(|p| Some(Point::new(p.x + 1.0, p.y)))
            .unwrap();
        assert_eq!(shifted.bounds(), Some(Rect::new(1.0, 0.0, 3.0, 2.0)));

        let failed = g.try_map_points(|p| (p.x < 1.0).then_some(p));
        assert_eq!(failed, None);
    }
}
