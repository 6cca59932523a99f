// Copyright 2025 the Mapmenu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Planar measurements in the geometry's own units.

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::Point;

use crate::geometry::Geometry;
use crate::stroke::StrokedPath;

/// Grid bearing from `from` to `to` in degrees clockwise from north (+y),
/// normalized to `[0, 360)`. Coincident points give `None`.
#[must_use]
pub fn bearing_degrees(from: Point, to: Point) -> Option<f64> {
    let d = to - from;
    if d.x == 0.0 && d.y == 0.0 {
        return None;
    }
    let deg = d.x.atan2(d.y).to_degrees();
    Some(if deg < 0.0 { deg + 360.0 } else { deg })
}

impl Geometry {
    /// Area of polygonal geometry; zero for points and lines.
    #[must_use]
    pub fn area(&self) -> f64 {
        match self {
            Self::Polygon(p) => p.area(),
            Self::MultiPolygon(ps) => ps.iter().map(|p| p.area()).sum(),
            _ => 0.0,
        }
    }

    /// Perimeter of polygonal geometry; zero for points and lines.
    #[must_use]
    pub fn perimeter(&self) -> f64 {
        match self {
            Self::Polygon(p) => p.perimeter(),
            Self::MultiPolygon(ps) => ps.iter().map(|p| p.perimeter()).sum(),
            _ => 0.0,
        }
    }

    /// Length of linear geometry; zero for points and polygons.
    #[must_use]
    pub fn length(&self) -> f64 {
        let len = |vertices: &[Point]| {
            StrokedPath {
                vertices,
                half_width: 0.0,
            }
            .length()
        };
        match self {
            Self::LineString(vs) => len(vs),
            Self::MultiLineString(lines) => lines.iter().map(|l| len(l)).sum(),
            _ => 0.0,
        }
    }

    /// Bearing from the first to the last vertex of linear geometry.
    #[must_use]
    pub fn line_bearing(&self) -> Option<f64> {
        let (first, last) = match self {
            Self::LineString(vs) => (*vs.first()?, *vs.last()?),
            Self::MultiLineString(lines) => (
                *lines.iter().find_map(|l| l.first())?,
                *lines.iter().rev().find_map(|l| l.last())?,
            ),
            _ => return None,
        };
        bearing_degrees(first, last)
    }
}
