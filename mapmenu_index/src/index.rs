// Copyright 2025 the Mapmenu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Payload-carrying index over a pluggable backend.

use alloc::vec::Vec;
use core::fmt::Debug;

use crate::backend::Backend;
use crate::types::Aabb2D;

/// An AABB index storing a payload per entry on top of a backend `B`.
///
/// The index is built once by inserting every entry; rebuild it when the
/// underlying data changes. Query results come back in insertion order.
pub struct IndexGeneric<T, P, B>
where
    T: Copy + PartialOrd + Debug,
    B: Backend<T>,
{
    payloads: Vec<P>,
    backend: B,
    _coord: core::marker::PhantomData<T>,
}

#[cfg(feature = "backend_grid")]
impl<P> IndexGeneric<f64, P, crate::backends::GridF64> {
    /// Creates an empty index backed by a uniform grid with the given cell size.
    #[must_use]
    pub fn with_grid(cell_size: f64) -> Self {
        Self::with_backend(crate::backends::GridF64::new(cell_size))
    }
}

impl<T, P, B> IndexGeneric<T, P, B>
where
    T: Copy + PartialOrd + Debug,
    B: Backend<T>,
{
    /// Creates an empty index on top of the given backend.
    pub fn with_backend(backend: B) -> Self {
        Self {
            payloads: Vec::new(),
            backend,
            _coord: core::marker::PhantomData,
        }
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.payloads.len()
    }

    /// Returns `true` if nothing was inserted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.payloads.is_empty()
    }

    /// Adds an entry.
    pub fn insert(&mut self, aabb: Aabb2D<T>, payload: P) {
        self.backend.insert(self.payloads.len(), aabb);
        self.payloads.push(payload);
    }

    /// Payloads whose box touches the rectangle, in insertion order.
    pub fn query_rect(&self, rect: Aabb2D<T>) -> impl Iterator<Item = &P> + '_ {
        self.backend
            .query_rect_sorted(rect)
            .into_iter()
            .filter_map(move |slot| self.payloads.get(slot))
    }
}

impl<T, P, B> Debug for IndexGeneric<T, P, B>
where
    T: Copy + PartialOrd + Debug,
    B: Backend<T> + Debug,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("IndexGeneric")
            .field("len", &self.payloads.len())
            .field("backend", &self.backend)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::FlatVec;
    use alloc::vec;

    #[test]
    fn query_returns_insertion_order() {
        let mut idx = IndexGeneric::<f64, u32, _>::with_backend(FlatVec::default());
        idx.insert(Aabb2D::new(0.0, 0.0, 10.0, 10.0), 7);
        idx.insert(Aabb2D::from_point(1.0, 1.0), 3);
        idx.insert(Aabb2D::from_point(50.0, 50.0), 9);
        assert_eq!(idx.len(), 3);

        let hits: Vec<u32> = idx.query_rect(Aabb2D::around(1.0, 1.0, 0.5)).copied().collect();
        assert_eq!(hits, vec![7, 3]);
    }

    #[cfg(feature = "backend_grid")]
    #[test]
    fn grid_index_agrees_with_flat_index() {
        let mut flat = IndexGeneric::<f64, u32, _>::with_backend(FlatVec::default());
        let mut grid = IndexGeneric::<f64, u32, crate::backends::GridF64>::with_grid(4.0);
        for i in 0..200_u32 {
            let x = f64::from(i % 20) * 3.0;
            let y = f64::from(i / 20) * 3.0;
            let b = if i % 7 == 0 {
                Aabb2D::new(x, y, x + 10.0, y + 1.0)
            } else {
                Aabb2D::from_point(x, y)
            };
            flat.insert(b, i);
            grid.insert(b, i);
        }
        let queries = [
            (0.0, 0.0, 1.0),
            (15.0, 9.0, 4.0),
            (30.0, 27.0, 0.0),
            (-5.0, -5.0, 1.0),
        ];
        for (qx, qy, r) in queries {
            let q = Aabb2D::around(qx, qy, r);
            let a: Vec<u32> = flat.query_rect(q).copied().collect();
            let b: Vec<u32> = grid.query_rect(q).copied().collect();
            assert_eq!(a, b, "query at ({qx}, {qy}) r={r}");
        }
    }
}
