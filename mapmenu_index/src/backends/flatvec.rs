// Copyright 2025 the Mapmenu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Linear-scan backend.

use alloc::vec::Vec;
use core::fmt::Debug;

use crate::backend::Backend;
use crate::types::Aabb2D;

/// Linear-scan backend over a list of `(slot, box)` pairs.
///
/// Every query tests every box, so results are exact by construction. Useful
/// for small sets and as a reference for other backends.
pub struct FlatVec<T: Copy + PartialOrd + Debug> {
    boxes: Vec<(usize, Aabb2D<T>)>,
}

impl<T: Copy + PartialOrd + Debug> Default for FlatVec<T> {
    fn default() -> Self {
        Self { boxes: Vec::new() }
    }
}

impl<T: Copy + PartialOrd + Debug> Debug for FlatVec<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FlatVec")
            .field("boxes", &self.boxes.len())
            .finish_non_exhaustive()
    }
}

impl<T: Copy + PartialOrd + Debug> Backend<T> for FlatVec<T> {
    fn insert(&mut self, slot: usize, aabb: Aabb2D<T>) {
        self.boxes.push((slot, aabb));
    }

    fn visit_rect<F: FnMut(usize)>(&self, rect: Aabb2D<T>, mut f: F) {
        self.boxes
            .iter()
            .filter(|(_, a)| a.overlaps(&rect))
            .for_each(|(slot, _)| f(*slot));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn touching_boxes_are_hits() {
        let mut b = FlatVec::<f64>::default();
        for (slot, x) in [(3, 0.0), (2, 10.0), (1, 20.0), (0, 30.0)] {
            b.insert(slot, Aabb2D::new(x, 0.0, x + 5.0, 5.0));
        }
        assert_eq!(b.query_rect_sorted(Aabb2D::new(5.0, 5.0, 10.0, 6.0)), [2, 3]);
        assert!(b.query_rect_sorted(Aabb2D::new(6.0, 0.0, 9.0, 5.0)).is_empty());
        assert_eq!(
            b.query_rect_sorted(Aabb2D::new(-100.0, -100.0, 100.0, 100.0)),
            [0, 1, 2, 3]
        );
    }
}
