// Copyright 2025 the Mapmenu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bounding-box filtering of a layer's features.
//!
//! Both the linear scan and the indexed lookup apply the same inclusive box
//! test and yield feature positions in ascending layer order, so a layer
//! gives the same candidates whichever path is taken.

use kurbo::Rect;
use mapmenu_index::{Aabb2D, GridF64, IndexGeneric};

use crate::layer::Feature;

/// Target number of features per grid cell when sizing the index.
const FEATURES_PER_CELL: f64 = 4.0;

pub(crate) fn aabb(rect: Rect) -> Aabb2D<f64> {
    Aabb2D::new(rect.x0, rect.y0, rect.x1, rect.y1)
}

fn feature_box(feature: &Feature) -> Option<Aabb2D<f64>> {
    feature.geometry.as_ref()?.bounds().map(aabb)
}

/// Grid index over feature bounding boxes, keyed by position in the layer.
#[derive(Debug)]
pub struct FeatureIndex {
    index: IndexGeneric<f64, usize, GridF64>,
}

impl FeatureIndex {
    /// Indexes every feature with finite bounds.
    ///
    /// Returns `None` when no feature has finite bounds.
    #[must_use]
    pub fn build(features: &[Feature]) -> Option<Self> {
        let boxes: Vec<(usize, Aabb2D<f64>)> = features
            .iter()
            .enumerate()
            .filter_map(|(pos, f)| feature_box(f).map(|b| (pos, b)))
            .collect();
        let extent = boxes.iter().map(|(_, b)| *b).reduce(|a, b| a.union(&b))?;

        // Square cells sized so that a uniform layer puts a handful of features in each.
        let n = boxes.len() as f64;
        let cell = if extent.width() > 0.0 && extent.height() > 0.0 {
            (extent.width() * extent.height() * FEATURES_PER_CELL / n).sqrt()
        } else {
            extent.width().max(extent.height()) * FEATURES_PER_CELL / n
        };
        let cell = if cell.is_finite() && cell > 0.0 { cell } else { 1.0 };

        let mut index = IndexGeneric::<f64, usize, GridF64>::with_grid(cell);
        for (pos, b) in boxes {
            index.insert(b, pos);
        }
        Some(Self { index })
    }

    /// Number of indexed features.
    #[must_use]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Returns `true` if nothing was indexed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Positions of features whose bounds meet `rect`, ascending.
    #[must_use]
    pub fn query(&self, rect: Rect) -> Vec<usize> {
        self.index.query_rect(aabb(rect)).copied().collect()
    }
}

/// Positions of features whose bounds meet `rect`, by linear scan.
pub(crate) fn scan(features: &[Feature], rect: Rect) -> Vec<usize> {
    let probe = aabb(rect);
    features
        .iter()
        .enumerate()
        .filter(|(_, f)| feature_box(f).is_some_and(|b| b.overlaps(&probe)))
        .map(|(pos, _)| pos)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Point;
    use mapmenu_precise_hit::Geometry;

    fn grid_of_points(n: i32) -> Vec<Feature> {
        (0..n * n)
            .map(|i| {
                let x = f64::from(i % n) * 3.0;
                let y = f64::from(i / n) * 3.0;
                Feature::new(i64::from(i), Geometry::point(x, y))
            })
            .collect()
    }

    #[test]
    fn indexed_and_linear_agree() {
        let mut features = grid_of_points(40);
        features.insert(7, Feature::without_geometry(-1));
        features.push(Feature::new(
            -2,
            Geometry::line(vec![Point::new(-10.0, 50.0), Point::new(200.0, 50.0)]),
        ));
        features.push(Feature::new(-3, Geometry::point(f64::NAN, 0.0)));

        let index = FeatureIndex::build(&features).unwrap();
        assert_eq!(index.len(), features.len() - 2);
        for rect in [
            Rect::new(0.0, 0.0, 0.0, 0.0),
            Rect::new(2.0, 2.0, 7.0, 7.0),
            Rect::new(-100.0, 49.0, -50.0, 51.0),
            Rect::new(-1.0, -1.0, 1000.0, 1000.0),
            Rect::new(500.0, 500.0, 600.0, 600.0),
        ] {
            assert_eq!(index.query(rect), scan(&features, rect), "query {rect:?}");
        }
    }

    #[test]
    fn no_finite_bounds_means_no_index() {
        let features = vec![
            Feature::without_geometry(1),
            Feature::new(2, Geometry::point(f64::INFINITY, 0.0)),
        ];
        assert!(FeatureIndex::build(&features).is_none());
        assert!(FeatureIndex::build(&[]).is_none());
    }

    #[test]
    fn single_point_layer_has_usable_cell() {
        let features = vec![Feature::new(1, Geometry::point(3.0, 4.0))];
        let index = FeatureIndex::build(&features).unwrap();
        assert_eq!(index.query(Rect::new(2.0, 3.0, 4.0, 5.0)), vec![0]);
        assert!(index.query(Rect::new(5.0, 5.0, 6.0, 6.0)).is_empty());
    }
}
