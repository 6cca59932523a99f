// Copyright 2025 the Mapmenu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis-aligned bounding boxes.

use core::fmt::Debug;

/// Axis-aligned bounding box in 2D with inclusive edges.
///
/// Degenerate boxes (zero width and/or height) are valid and represent
/// points or axis-parallel segments; they still intersect anything that
/// touches them. A box is only *empty* when `min > max` on some axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb2D<T> {
    /// Minimum x.
    pub min_x: T,
    /// Minimum y.
    pub min_y: T,
    /// Maximum x.
    pub max_x: T,
    /// Maximum y.
    pub max_y: T,
}

impl<T: Copy + PartialOrd + Debug> Aabb2D<T> {
    /// Creates a box from its minimum and maximum corners.
    ///
    /// The corners are normalized so that `min <= max` on both axes.
    #[must_use]
    pub fn new(x0: T, y0: T, x1: T, y1: T) -> Self {
        let (min_x, max_x) = if x0 <= x1 { (x0, x1) } else { (x1, x0) };
        let (min_y, max_y) = if y0 <= y1 { (y0, y1) } else { (y1, y0) };
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Creates a degenerate box covering a single point.
    #[must_use]
    pub fn from_point(x: T, y: T) -> Self {
        Self {
            min_x: x,
            min_y: y,
            max_x: x,
            max_y: y,
        }
    }

    /// Returns `true` when `min > max` on some axis.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.min_x > self.max_x || self.min_y > self.max_y
    }

    /// Returns `true` if the two boxes share at least one point (edges count).
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.min_x <= other.max_x
            && other.min_x <= self.max_x
            && self.min_y <= other.max_y
            && other.min_y <= self.max_y
    }

    /// Smallest box containing both inputs.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        let pick_min = |a: T, b: T| if b < a { b } else { a };
        let pick_max = |a: T, b: T| if b > a { b } else { a };
        Self {
            min_x: pick_min(self.min_x, other.min_x),
            min_y: pick_min(self.min_y, other.min_y),
            max_x: pick_max(self.max_x, other.max_x),
            max_y: pick_max(self.max_y, other.max_y),
        }
    }
}

impl Aabb2D<f64> {
    /// Square box of half-extent `radius` centered on a point.
    #[must_use]
    pub fn around(x: f64, y: f64, radius: f64) -> Self {
        let r = radius.abs();
        Self::new(x - r, y - r, x + r, y + r)
    }

    /// Returns `true` if every coordinate is finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.min_x.is_finite()
            && self.min_y.is_finite()
            && self.max_x.is_finite()
            && self.max_y.is_finite()
    }

    /// Width of the box (zero for degenerate boxes).
    #[must_use]
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// Height of the box (zero for degenerate boxes).
    #[must_use]
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}
