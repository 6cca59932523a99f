// Copyright 2025 the Mapmenu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Uniform grid backend for `f64` coordinates.
//!
//! Each slot is bucketed into every cell its box touches. Queries walk the
//! cells covered by the query rectangle, de-duplicate, and apply the exact
//! box test. Works well for map layers where features are roughly uniform
//! in size relative to the chosen cell size.

// `f64::floor` is provided by std.
extern crate std;

use alloc::vec::Vec;
use core::fmt::Debug;

use hashbrown::{HashMap, HashSet};
use smallvec::SmallVec;

use crate::backend::Backend;
use crate::types::Aabb2D;

type Cell = (i64, i64);

/// Upper bound on the number of cells a single insert or query may touch.
///
/// Boxes larger than this are kept in an overflow list that every query scans.
const MAX_CELLS_PER_BOX: i64 = 4096;

/// Uniform grid backend over `f64` boxes.
pub struct GridF64 {
    cell_size: f64,
    entries: Vec<Option<Aabb2D<f64>>>,
    cells: HashMap<Cell, SmallVec<[usize; 8]>>,
    oversized: Vec<usize>,
}

impl GridF64 {
    /// Creates a grid with square cells of the given size in world units.
    ///
    /// Non-finite or non-positive sizes fall back to `1.0`.
    #[must_use]
    pub fn new(cell_size: f64) -> Self {
        let cell_size = if cell_size.is_finite() && cell_size > 0.0 {
            cell_size
        } else {
            1.0
        };
        Self {
            cell_size,
            entries: Vec::new(),
            cells: HashMap::new(),
            oversized: Vec::new(),
        }
    }

    /// Returns the configured cell size.
    #[must_use]
    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    #[expect(
        clippy::cast_possible_truncation,
        reason = "cell coordinates are clamped into i64 range first"
    )]
    fn cell_coord(&self, v: f64) -> i64 {
        let c = (v / self.cell_size).floor();
        c.clamp(i64::MIN as f64, i64::MAX as f64) as i64
    }

    /// Cell span covered by `aabb`, or `None` if it is too large (or non-finite) to bucket.
    fn span(&self, aabb: &Aabb2D<f64>) -> Option<(Cell, Cell)> {
        if !aabb.is_finite() || aabb.is_empty() {
            return None;
        }
        let lo = (self.cell_coord(aabb.min_x), self.cell_coord(aabb.min_y));
        let hi = (self.cell_coord(aabb.max_x), self.cell_coord(aabb.max_y));
        let w = hi.0.saturating_sub(lo.0).saturating_add(1);
        let h = hi.1.saturating_sub(lo.1).saturating_add(1);
        if w.saturating_mul(h) > MAX_CELLS_PER_BOX {
            None
        } else {
            Some((lo, hi))
        }
    }

    fn bucket(&mut self, slot: usize, aabb: &Aabb2D<f64>) {
        match self.span(aabb) {
            Some((lo, hi)) => {
                for cy in lo.1..=hi.1 {
                    for cx in lo.0..=hi.0 {
                        self.cells.entry((cx, cy)).or_default().push(slot);
                    }
                }
            }
            None => self.oversized.push(slot),
        }
    }

    fn visit_candidates<F: FnMut(usize)>(&self, rect: &Aabb2D<f64>, mut f: F) {
        match self.span(rect) {
            Some((lo, hi)) => {
                let mut seen: HashSet<usize> = HashSet::new();
                for cy in lo.1..=hi.1 {
                    for cx in lo.0..=hi.0 {
                        if let Some(bucket) = self.cells.get(&(cx, cy)) {
                            for &slot in bucket {
                                if seen.insert(slot) {
                                    f(slot);
                                }
                            }
                        }
                    }
                }
                for &slot in &self.oversized {
                    if seen.insert(slot) {
                        f(slot);
                    }
                }
            }
            // Query too large for cell walking: every live slot is a candidate.
            None => {
                for (slot, entry) in self.entries.iter().enumerate() {
                    if entry.is_some() {
                        f(slot);
                    }
                }
            }
        }
    }
}

impl Debug for GridF64 {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let alive = self.entries.iter().filter(|e| e.is_some()).count();
        f.debug_struct("GridF64")
            .field("cell_size", &self.cell_size)
            .field("alive", &alive)
            .field("cells", &self.cells.len())
            .field("oversized", &self.oversized.len())
            .finish_non_exhaustive()
    }
}

impl Backend<f64> for GridF64 {
    fn insert(&mut self, slot: usize, aabb: Aabb2D<f64>) {
        if self.entries.len() <= slot {
            self.entries.resize_with(slot + 1, || None);
        }
        self.bucket(slot, &aabb);
        self.entries[slot] = Some(aabb);
    }

    fn visit_rect<F: FnMut(usize)>(&self, rect: Aabb2D<f64>, mut f: F) {
        self.visit_candidates(&rect, |slot| {
            if let Some(Some(a)) = self.entries.get(slot)
                && a.overlaps(&rect)
            {
                f(slot);
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::FlatVec;
    use alloc::vec;

    fn sample() -> Vec<Aabb2D<f64>> {
        vec![
            Aabb2D::from_point(0.5, 0.5),
            Aabb2D::new(0.0, 0.0, 30.0, 2.0),
            Aabb2D::from_point(25.0, 25.0),
            Aabb2D::new(-1.0e9, -1.0e9, 1.0e9, 1.0e9),
            Aabb2D::from_point(10.0, 10.0),
        ]
    }

    #[test]
    fn grid_matches_flatvec() {
        let mut grid = GridF64::new(5.0);
        let mut flat = FlatVec::<f64>::default();
        for (i, b) in sample().into_iter().enumerate() {
            grid.insert(i, b);
            flat.insert(i, b);
        }
        for q in [
            Aabb2D::around(0.0, 0.0, 1.0),
            Aabb2D::around(10.0, 10.0, 0.5),
            Aabb2D::around(24.0, 24.0, 0.5),
            Aabb2D::new(-100.0, -100.0, 100.0, 100.0),
        ] {
            assert_eq!(grid.query_rect_sorted(q), flat.query_rect_sorted(q));
        }
    }

    #[test]
    fn sparse_slots_and_huge_queries() {
        let mut grid = GridF64::new(1.0);
        grid.insert(4, Aabb2D::from_point(0.5, 0.5));
        grid.insert(1, Aabb2D::from_point(3.5, 3.5));
        assert_eq!(grid.query_rect_sorted(Aabb2D::around(0.5, 0.5, 0.1)), vec![4]);
        assert!(grid.query_rect_sorted(Aabb2D::around(2.0, 2.0, 0.1)).is_empty());

        // Too many cells to walk: falls back to testing every box.
        let everything = Aabb2D::new(-1.0e12, -1.0e12, 1.0e12, 1.0e12);
        assert_eq!(grid.query_rect_sorted(everything), vec![1, 4]);
    }

    #[test]
    fn invalid_cell_size_falls_back() {
        assert_eq!(GridF64::new(0.0).cell_size(), 1.0);
        assert_eq!(GridF64::new(f64::NAN).cell_size(), 1.0);
        assert_eq!(GridF64::new(2.5).cell_size(), 2.5);
    }
}
