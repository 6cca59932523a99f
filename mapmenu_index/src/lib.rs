// Copyright 2025 the Mapmenu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mapmenu Index: a small 2D AABB index used to narrow feature candidates.
//!
//! Entries are boxes with an attached payload. The index is filled once and
//! queried with rectangles; results come back in insertion order so that
//! callers see the same result regardless of backend.
//!
//! - [`FlatVec`]: linear scan. Fine for small sets.
//! - [`GridF64`]: uniform grid over `f64` boxes (feature `backend_grid`).
//!
//! ```
//! use mapmenu_index::{Aabb2D, FlatVec, IndexGeneric};
//!
//! let mut idx = IndexGeneric::<f64, &str, _>::with_backend(FlatVec::default());
//! idx.insert(Aabb2D::from_point(1.0, 1.0), "a");
//! idx.insert(Aabb2D::new(10.0, 10.0, 20.0, 20.0), "b");
//!
//! let hits: Vec<_> = idx
//!     .query_rect(Aabb2D::around(0.0, 0.0, 2.0))
//!     .copied()
//!     .collect();
//! assert_eq!(hits, ["a"]);
//! ```

#![no_std]

extern crate alloc;

mod backend;
pub mod backends;
mod index;
mod types;

pub use backend::Backend;
pub use backends::FlatVec;
#[cfg(feature = "backend_grid")]
pub use backends::GridF64;
pub use index::IndexGeneric;
pub use types::Aabb2D;
