// Copyright 2025 the Mapmenu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Distance helpers for polylines.

use alloc::vec::Vec;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::{Line, ParamCurveNearest, Point};

use crate::{HitKind, HitParams, HitScore, PreciseHitTest};

/// Distance from `pt` to the segment `line`.
pub(crate) fn segment_distance(line: Line, pt: Point) -> f64 {
    line.nearest(pt, 0.).distance_sq.sqrt()
}

/// Segments of an open polyline. A single vertex yields a zero-length segment.
pub(crate) fn open_segments(vertices: &[Point]) -> impl Iterator<Item = Line> + '_ {
    let single = (vertices.len() == 1).then(|| Line::new(vertices[0], vertices[0]));
    vertices
        .windows(2)
        .map(|w| Line::new(w[0], w[1]))
        .chain(single)
}

/// Minimum distance from `pt` to any segment, or infinity when there are none.
pub(crate) fn min_segment_distance(segments: impl Iterator<Item = Line>, pt: Point) -> f64 {
    segments
        .map(|l| segment_distance(l, pt))
        .fold(f64::INFINITY, f64::min)
}

/// An open polyline with a stroke half-width.
///
/// The hit test compares the distance to the nearest segment against the
/// half-width plus [`HitParams::line_tolerance`]. Map lines normally use a
/// zero half-width and rely on the tolerance alone.
#[derive(Clone, Copy, Debug)]
pub struct StrokedPath<'a> {
    /// Vertices of the centerline in local coordinates.
    pub vertices: &'a [Point],
    /// Half of the stroke width in local units.
    pub half_width: f64,
}

impl StrokedPath<'_> {
    /// Distance from `pt` to the centerline, infinity for an empty path.
    #[must_use]
    pub fn distance(&self, pt: Point) -> f64 {
        min_segment_distance(open_segments(self.vertices), pt)
    }

    /// Total length of the centerline.
    #[must_use]
    pub fn length(&self) -> f64 {
        open_segments(self.vertices).map(|l| l.p0.distance(l.p1)).sum()
    }

    /// Collects the centerline segments.
    #[must_use]
    pub fn segments(&self) -> Vec<Line> {
        open_segments(self.vertices).collect()
    }
}

impl PreciseHitTest for StrokedPath<'_> {
    fn hit_test_local(&self, pt: Point, params: &HitParams) -> Option<HitScore> {
        let dist = self.distance(pt);
        let limit = self.half_width + params.line_tolerance;
        if dist <= limit {
            Some(HitScore {
                distance: dist,
                kind: HitKind::Stroke,
            })
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stroked_path_hit_and_miss() {
        let vertices = [Point::new(0.0, 0.0), Point::new(10.0, 0.0), Point::new(10.0, 10.0)];
        let path = StrokedPath {
            vertices: &vertices,
            half_width: 1.0,
        };
        let params = HitParams::default();

        assert!(path.hit_test_local(Point::new(5.0, 0.0), &params).is_some());
        assert!(path.hit_test_local(Point::new(5.0, 0.5), &params).is_some());
        assert!(path.hit_test_local(Point::new(10.5, 5.0), &params).is_some());
        assert!(path.hit_test_local(Point::new(5.0, 5.0), &params).is_none());
        assert_eq!(path.length(), 20.0);
        assert_eq!(path.segments().len(), 2);
    }

    #[test]
    fn tolerance_is_inclusive() {
        let vertices = [Point::new(0.0, 0.0), Point::new(10.0, 0.0)];
        let path = StrokedPath {
            vertices: &vertices,
            half_width: 0.0,
        };
        let params = HitParams {
            line_tolerance: 3.0,
            ..HitParams::default()
        };
        let hit = path.hit_test_local(Point::new(4.0, 3.0), &params).unwrap();
        assert_eq!(hit.distance, 3.0);
        assert!(path.hit_test_local(Point::new(4.0, 3.000_001), &params).is_none());
    }

    #[test]
    fn degenerate_paths() {
        let empty = StrokedPath {
            vertices: &[],
            half_width: 0.0,
        };
        assert_eq!(empty.distance(Point::ZERO), f64::INFINITY);
        assert!(empty.hit_test_local(Point::ZERO, &HitParams::uniform(1e9)).is_none());

        let single = [Point::new(3.0, 4.0)];
        let dot = StrokedPath {
            vertices: &single,
            half_width: 0.0,
        };
        assert_eq!(dot.distance(Point::ZERO), 5.0);
    }
}
