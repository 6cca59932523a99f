// Copyright 2025 the Mapmenu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::f64::consts::FRAC_PI_4;
use std::fmt::Debug;

use kurbo::{Affine, Point, Rect};

use crate::Crs;

/// Number of points sampled along each edge when transforming a bounding box.
pub const DENSIFY_POINTS: u32 = 21;

/// Errors produced while transforming coordinates.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TransformError {
    /// No transform is known between the two systems.
    #[error("no transform available from {from} to {to}")]
    Unsupported {
        /// Source CRS.
        from: Crs,
        /// Destination CRS.
        to: Crs,
    },
    /// The input lies outside the area where the transform is defined.
    #[error("coordinate ({x}, {y}) is outside the valid area of {crs}")]
    OutOfDomain {
        /// Input x.
        x: f64,
        /// Input y.
        y: f64,
        /// CRS whose domain was violated.
        crs: Crs,
    },
    /// Input or output was NaN or infinite.
    #[error("transform of ({x}, {y}) produced non-finite coordinates")]
    NonFinite {
        /// Input x.
        x: f64,
        /// Input y.
        y: f64,
    },
    /// The transform cannot be inverted.
    #[error("transform from {from} to {to} is not invertible")]
    NotInvertible {
        /// Source CRS.
        from: Crs,
        /// Destination CRS.
        to: Crs,
    },
}

/// A transform from one CRS into another.
pub trait CoordinateTransform: Debug {
    /// CRS of the input coordinates.
    fn source(&self) -> &Crs;

    /// CRS of the output coordinates.
    fn destination(&self) -> &Crs;

    /// Transforms a single point.
    fn transform_point(&self, pt: Point) -> Result<Point, TransformError>;

    /// Transforms a rectangle into the bounding box of its image.
    ///
    /// Each edge is sampled at [`DENSIFY_POINTS`] points so that the result
    /// encloses edges that become curved under the transform.
    fn transform_bounding_box(&self, rect: Rect) -> Result<Rect, TransformError> {
        let steps = DENSIFY_POINTS - 1;
        let mut out: Option<Rect> = None;
        for i in 0..=steps {
            let t = f64::from(i) / f64::from(steps);
            let x = rect.x0 + (rect.x1 - rect.x0) * t;
            let y = rect.y0 + (rect.y1 - rect.y0) * t;
            for p in [
                Point::new(x, rect.y0),
                Point::new(x, rect.y1),
                Point::new(rect.x0, y),
                Point::new(rect.x1, y),
            ] {
                let q = self.transform_point(p)?;
                out = Some(match out {
                    Some(r) => r.union_pt(q),
                    None => Rect::from_points(q, q),
                });
            }
        }
        out.ok_or(TransformError::NonFinite {
            x: rect.x0,
            y: rect.y0,
        })
    }
}

fn check_finite(input: Point, output: Point) -> Result<Point, TransformError> {
    if input.is_finite() && output.is_finite() {
        Ok(output)
    } else {
        Err(TransformError::NonFinite {
            x: input.x,
            y: input.y,
        })
    }
}

/// Leaves coordinates unchanged.
#[derive(Clone, Debug)]
pub struct IdentityTransform {
    crs: Crs,
}

impl IdentityTransform {
    /// Identity within `crs`.
    #[must_use]
    pub fn new(crs: Crs) -> Self {
        Self { crs }
    }
}

impl CoordinateTransform for IdentityTransform {
    fn source(&self) -> &Crs {
        &self.crs
    }

    fn destination(&self) -> &Crs {
        &self.crs
    }

    fn transform_point(&self, pt: Point) -> Result<Point, TransformError> {
        check_finite(pt, pt)
    }
}

/// Spherical Web Mercator projection in either direction.
#[derive(Clone, Debug)]
pub struct WebMercator {
    source: Crs,
    destination: Crs,
    forward: bool,
}

impl WebMercator {
    /// Sphere radius used by `EPSG:3857`, in meters.
    pub const RADIUS: f64 = 6_378_137.0;
    /// Latitude limit of the projection, in degrees.
    pub const MAX_LATITUDE: f64 = 85.051_128_779_806_59;

    /// Geographic degrees to projected meters.
    #[must_use]
    pub fn forward() -> Self {
        Self {
            source: Crs::wgs84(),
            destination: Crs::web_mercator(),
            forward: true,
        }
    }

    /// Projected meters to geographic degrees.
    #[must_use]
    pub fn inverse() -> Self {
        Self {
            source: Crs::web_mercator(),
            destination: Crs::wgs84(),
            forward: false,
        }
    }

    fn project(&self, pt: Point) -> Result<Point, TransformError> {
        if pt.y.abs() > Self::MAX_LATITUDE || pt.x.abs() > 180.0 {
            return Err(TransformError::OutOfDomain {
                x: pt.x,
                y: pt.y,
                crs: self.source.clone(),
            });
        }
        let x = Self::RADIUS * pt.x.to_radians();
        let y = Self::RADIUS * (FRAC_PI_4 + pt.y.to_radians() / 2.0).tan().ln();
        Ok(Point::new(x, y))
    }

    fn unproject(pt: Point) -> Point {
        let lon = (pt.x / Self::RADIUS).to_degrees();
        let lat = (2.0 * (pt.y / Self::RADIUS).exp().atan() - 2.0 * FRAC_PI_4).to_degrees();
        Point::new(lon, lat)
    }
}

impl CoordinateTransform for WebMercator {
    fn source(&self) -> &Crs {
        &self.source
    }

    fn destination(&self) -> &Crs {
        &self.destination
    }

    fn transform_point(&self, pt: Point) -> Result<Point, TransformError> {
        let out = if self.forward {
            self.project(pt)?
        } else {
            Self::unproject(pt)
        };
        check_finite(pt, out)
    }
}

/// An affine map between two CRSs.
#[derive(Clone, Debug)]
pub struct AffineTransform {
    source: Crs,
    destination: Crs,
    affine: Affine,
}

impl AffineTransform {
    /// Creates a transform applying `affine` to source coordinates.
    #[must_use]
    pub fn new(source: Crs, destination: Crs, affine: Affine) -> Self {
        Self {
            source,
            destination,
            affine,
        }
    }

    /// The underlying affine map.
    #[must_use]
    pub fn affine(&self) -> Affine {
        self.affine
    }

    /// The transform in the opposite direction.
    pub fn inverted(&self) -> Result<Self, TransformError> {
        let det = self.affine.determinant();
        if det == 0.0 || !det.is_finite() {
            return Err(TransformError::NotInvertible {
                from: self.source.clone(),
                to: self.destination.clone(),
            });
        }
        Ok(Self {
            source: self.destination.clone(),
            destination: self.source.clone(),
            affine: self.affine.inverse(),
        })
    }
}

impl CoordinateTransform for AffineTransform {
    fn source(&self) -> &Crs {
        &self.source
    }

    fn destination(&self) -> &Crs {
        &self.destination
    }

    fn transform_point(&self, pt: Point) -> Result<Point, TransformError> {
        check_finite(pt, self.affine * pt)
    }

    fn transform_bounding_box(&self, rect: Rect) -> Result<Rect, TransformError> {
        check_finite(rect.origin(), Point::new(rect.x1, rect.y1))?;
        let out = self.affine.transform_rect_bbox(rect);
        check_finite(rect.origin(), out.origin())?;
        Ok(out)
    }
}
