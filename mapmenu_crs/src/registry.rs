// Copyright 2025 the Mapmenu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::collections::HashMap;
use std::fmt::Debug;
use std::rc::Rc;

use kurbo::Affine;

use crate::transform::{AffineTransform, CoordinateTransform, IdentityTransform, WebMercator};
use crate::{Crs, TransformError};

/// Source of transforms between pairs of CRSs.
pub trait TransformProvider: Debug {
    /// Returns a transform from `from` into `to`.
    fn transform(
        &self,
        from: &Crs,
        to: &Crs,
    ) -> Result<Rc<dyn CoordinateTransform>, TransformError>;
}

/// Transform provider with the built-in transforms plus registered affine pairs.
///
/// Lookups return identity for equal CRSs, Web Mercator between `EPSG:4326`
/// and `EPSG:3857`, then any registered pair. Everything else is
/// [`TransformError::Unsupported`].
#[derive(Debug, Default)]
pub struct TransformRegistry {
    affine: HashMap<(Crs, Crs), Rc<AffineTransform>>,
}

impl TransformRegistry {
    /// A registry with only the built-in transforms.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an affine map from `from` to `to`, and its inverse when it has one.
    pub fn register_affine(&mut self, from: Crs, to: Crs, affine: Affine) {
        let forward = AffineTransform::new(from.clone(), to.clone(), affine);
        match forward.inverted() {
            Ok(inverse) => {
                self.affine.insert((to.clone(), from.clone()), Rc::new(inverse));
            }
            Err(err) => {
                tracing::debug!(
                    %from,
                    %to,
                    %err,
                    "registered affine transform without inverse"
                );
            }
        }
        self.affine.insert((from, to), Rc::new(forward));
    }
}

impl TransformProvider for TransformRegistry {
    fn transform(
        &self,
        from: &Crs,
        to: &Crs,
    ) -> Result<Rc<dyn CoordinateTransform>, TransformError> {
        if from == to {
            return Ok(Rc::new(IdentityTransform::new(from.clone())));
        }
        let wgs84 = Crs::wgs84();
        let mercator = Crs::web_mercator();
        if *from == wgs84 && *to == mercator {
            return Ok(Rc::new(WebMercator::forward()));
        }
        if *from == mercator && *to == wgs84 {
            return Ok(Rc::new(WebMercator::inverse()));
        }
        if let Some(t) = self.affine.get(&(from.clone(), to.clone())) {
            return Ok(Rc::clone(t) as Rc<dyn CoordinateTransform>);
        }
        Err(TransformError::Unsupported {
            from: from.clone(),
            to: to.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Point;

    #[test]
    fn lookups() {
        let mut reg = TransformRegistry::new();
        let a = Crs::new("LOCAL:GRID");
        let b = Crs::web_mercator();
        reg.register_affine(a.clone(), b.clone(), Affine::translate((1000.0, 2000.0)));

        let t = reg.transform(&a, &b).unwrap();
        assert_eq!(t.transform_point(Point::ZERO).unwrap(), Point::new(1000.0, 2000.0));
        let back = reg.transform(&b, &a).unwrap();
        assert_eq!(back.transform_point(Point::new(1000.0, 2000.0)).unwrap(), Point::ZERO);

        assert_eq!(reg.transform(&a, &a).unwrap().destination(), &a);
        assert!(reg.transform(&Crs::wgs84(), &b).is_ok());
        assert!(matches!(
            reg.transform(&a, &Crs::wgs84()),
            Err(TransformError::Unsupported { .. })
        ));
    }
}
