// Copyright 2025 the Mapmenu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Backend trait for spatial indexing implementations.

use alloc::vec::Vec;
use core::fmt::Debug;

use crate::types::Aabb2D;

/// Spatial backend abstraction used by [`IndexGeneric`](crate::IndexGeneric).
///
/// Backends only see slot numbers and boxes; payloads live in the index.
/// Each slot is inserted once. Visiting order is backend-specific and callers
/// that need a stable order should sort the visited slots.
pub trait Backend<T>
where
    T: Copy + PartialOrd + Debug,
{
    /// Insert a new slot into the spatial structure.
    fn insert(&mut self, slot: usize, aabb: Aabb2D<T>);

    /// Visit slots whose AABB intersects the rectangle (edges included).
    ///
    /// Each matching slot is visited exactly once.
    fn visit_rect<F: FnMut(usize)>(&self, rect: Aabb2D<T>, f: F);

    /// Collect slots whose AABB intersects the rectangle, in ascending slot order.
    fn query_rect_sorted(&self, rect: Aabb2D<T>) -> Vec<usize> {
        let mut out = Vec::new();
        self.visit_rect(rect, |i| out.push(i));
        out.sort_unstable();
        out
    }
}
