// Copyright 2025 the Mapmenu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Measurement frames.
//!
//! Geographic coordinates are in degrees, which make no sense as lengths or
//! areas. Geometry in a geographic CRS is projected to Web Mercator first;
//! projected geometry is measured as is.

use kurbo::Point;
use mapmenu_action::ActionError;
use mapmenu_crs::{Crs, TransformError};
use mapmenu_detect::MapCanvas;
use mapmenu_precise_hit::{Geometry, GeometryClass};

/// Geometry ready for planar measurement, with the CRS it is expressed in.
#[derive(Clone, Debug)]
pub(crate) struct Measured {
    pub(crate) geometry: Geometry,
    pub(crate) crs: Crs,
}

impl Measured {
    pub(crate) fn length_unit(&self) -> &'static str {
        self.crs.unit_name()
    }

    pub(crate) fn area_unit(&self) -> String {
        format!("square {}", self.crs.unit_name())
    }
}

/// CRS used to measure geometry stored in `crs`.
pub(crate) fn measurement_crs(crs: &Crs) -> Crs {
    if crs.is_geographic() {
        Crs::web_mercator()
    } else {
        crs.clone()
    }
}

/// Carries `geometry` from `from` into its measurement CRS.
pub(crate) fn measurable(
    canvas: &MapCanvas,
    geometry: &Geometry,
    from: &Crs,
) -> Result<Measured, ActionError> {
    let crs = measurement_crs(from);
    if crs == *from {
        return Ok(Measured {
            geometry: geometry.clone(),
            crs,
        });
    }
    let geometry = reproject(canvas, geometry, from, &crs)?;
    Ok(Measured { geometry, crs })
}

/// Transforms every vertex of `geometry`, failing on the first bad vertex.
pub(crate) fn reproject(
    canvas: &MapCanvas,
    geometry: &Geometry,
    from: &Crs,
    to: &Crs,
) -> Result<Geometry, ActionError> {
    let transform = canvas.transforms().transform(from, to)?;
    let mut failure: Option<TransformError> = None;
    let mapped = geometry.try_map_points(|p| match transform.transform_point(p) {
        Ok(q) => Some(q),
        Err(err) => {
            failure = Some(err);
            None
        }
    });
    match (mapped, failure) {
        (Some(geometry), _) => Ok(geometry),
        (None, Some(err)) => Err(err.into()),
        (None, None) => Err(ActionError::Failed(format!(
            "could not transform geometry from {from} to {to}"
        ))),
    }
}

/// Rejects geometry outside `class`.
pub(crate) fn require_class(geometry: &Geometry, class: GeometryClass) -> Result<(), ActionError> {
    let kind = geometry.kind();
    if kind.class() == class {
        Ok(())
    } else {
        Err(ActionError::UnsupportedGeometry { kind })
    }
}

/// The click point, given in canvas coordinates, expressed in `crs`.
pub(crate) fn click_in(canvas: &MapCanvas, click: Point, crs: &Crs) -> Result<Point, ActionError> {
    Ok(canvas.transform_to(crs)?.transform_point(click)?)
}
