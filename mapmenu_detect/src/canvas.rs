// Copyright 2025 the Mapmenu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The map canvas a click lands on.

use std::rc::Rc;

use kurbo::Point;
use mapmenu_crs::{CoordinateTransform, Crs, TransformError, TransformProvider, TransformRegistry};
use mapmenu_view2d::MapViewport;

/// Viewport, destination CRS and transform source of a map canvas.
#[derive(Clone, Debug)]
pub struct MapCanvas {
    /// Pixel/map mapping of the canvas.
    pub viewport: MapViewport,
    crs: Crs,
    transforms: Rc<dyn TransformProvider>,
}

impl MapCanvas {
    /// A canvas in `crs` using the built-in transforms.
    #[must_use]
    pub fn new(viewport: MapViewport, crs: Crs) -> Self {
        Self::with_transforms(viewport, crs, Rc::new(TransformRegistry::new()))
    }

    /// A canvas with an explicit transform provider.
    #[must_use]
    pub fn with_transforms(
        viewport: MapViewport,
        crs: Crs,
        transforms: Rc<dyn TransformProvider>,
    ) -> Self {
        Self {
            viewport,
            crs,
            transforms,
        }
    }

    /// Destination CRS of the canvas.
    #[must_use]
    pub fn crs(&self) -> &Crs {
        &self.crs
    }

    /// Changes the destination CRS; the viewport is left as is.
    pub fn set_crs(&mut self, crs: Crs) {
        self.crs = crs;
    }

    /// The transform provider.
    #[must_use]
    pub fn transforms(&self) -> &Rc<dyn TransformProvider> {
        &self.transforms
    }

    /// Map units per device pixel.
    #[must_use]
    pub fn map_units_per_pixel(&self) -> f64 {
        self.viewport.map_units_per_pixel()
    }

    /// Map coordinates under a device pixel position.
    #[must_use]
    pub fn screen_to_map(&self, pos: Point) -> Point {
        self.viewport.view_to_map_point(pos)
    }

    /// Transform from canvas coordinates into `crs`.
    pub fn transform_to(&self, crs: &Crs) -> Result<Rc<dyn CoordinateTransform>, TransformError> {
        self.transforms.transform(&self.crs, crs)
    }
}
