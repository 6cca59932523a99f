// Copyright 2025 the Mapmenu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The context an action is executed with.

use kurbo::Point;
use mapmenu_detect::{
    ClickContext, ClickType, DetectedFeature, Feature, LayerTree, MapCanvas, VectorLayer,
};
use mapmenu_precise_hit::Geometry;

use crate::error::ActionError;
use crate::services::HostServices;

/// Host state shared by every entry of one menu.
#[derive(Clone, Copy, Debug)]
pub struct ActionEnv<'a> {
    /// The map canvas that was clicked.
    pub canvas: &'a MapCanvas,
    /// All registered layers.
    pub layers: &'a LayerTree,
    /// Host application handle.
    pub services: &'a dyn HostServices,
}

/// Everything an action needs to run for one menu entry.
///
/// Feature entries carry exactly that feature and its layer; canvas and
/// universal entries carry the whole click.
#[derive(Clone, Debug)]
pub struct ActionContext<'a> {
    /// Click position in canvas map coordinates.
    pub click_point: Point,
    /// Click type this entry was built for.
    pub click_type: ClickType,
    /// Feature the entry is bound to.
    pub feature: Option<&'a Feature>,
    /// Layer of [`ActionContext::feature`].
    pub layer: Option<&'a dyn VectorLayer>,
    /// Features visible to the action.
    pub detected_features: Vec<DetectedFeature<'a>>,
    /// The map canvas that was clicked.
    pub canvas: &'a MapCanvas,
    /// All registered layers.
    pub layers: &'a LayerTree,
    /// Host application handle.
    pub services: &'a dyn HostServices,
}

impl<'a> ActionContext<'a> {
    /// Context carrying the full click, bound to no feature.
    #[must_use]
    pub fn for_click(env: ActionEnv<'a>, click: &ClickContext<'a>) -> Self {
        Self {
            click_point: click.click_point,
            click_type: click.click_type,
            feature: None,
            layer: None,
            detected_features: click.detected_features.clone(),
            canvas: env.canvas,
            layers: env.layers,
            services: env.services,
        }
    }

    /// Context bound to one detected feature.
    #[must_use]
    pub fn for_feature(
        env: ActionEnv<'a>,
        click_point: Point,
        feature: DetectedFeature<'a>,
    ) -> Self {
        Self {
            click_point,
            click_type: ClickType::Geometry(feature.geometry_type),
            feature: Some(feature.feature),
            layer: Some(feature.layer),
            detected_features: vec![feature],
            canvas: env.canvas,
            layers: env.layers,
            services: env.services,
        }
    }

    /// The bound feature, or [`ActionError::NoFeature`].
    pub fn require_feature(&self) -> Result<&'a Feature, ActionError> {
        self.feature.ok_or(ActionError::NoFeature)
    }

    /// The bound layer, or [`ActionError::NoLayer`].
    pub fn require_layer(&self) -> Result<&'a dyn VectorLayer, ActionError> {
        self.layer.ok_or(ActionError::NoLayer)
    }

    /// Geometry of the bound feature.
    pub fn require_geometry(&self) -> Result<&'a Geometry, ActionError> {
        let feature = self.require_feature()?;
        feature
            .geometry
            .as_ref()
            .filter(|g| !g.is_empty())
            .ok_or(ActionError::MissingGeometry {
                feature: feature.id.0,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::RecordingServices;
    use kurbo::Rect;
    use mapmenu_crs::Crs;
    use mapmenu_detect::{FeatureDetector, MemoryLayer};
    use mapmenu_precise_hit::GeometryKind;
    use mapmenu_view2d::MapViewport;

    #[test]
    fn feature_context_is_narrowed() {
        let crs = Crs::web_mercator();
        let mut layers = LayerTree::new();
        layers.register(
            MemoryLayer::new("pts", "Points", crs.clone())
                .with_feature(Feature::new(1, Geometry::point(1.0, 0.0)))
                .with_feature(Feature::new(2, Geometry::point(2.0, 0.0))),
        );
        let canvas = MapCanvas::new(
            MapViewport::new(Rect::new(0.0, 0.0, 100.0, 100.0), Point::ZERO, 1.0),
            crs,
        );
        let services = RecordingServices::new();
        let env = ActionEnv {
            canvas: &canvas,
            layers: &layers,
            services: &services,
        };
        let click = FeatureDetector::default().click_context(&layers, &canvas, Point::ZERO);
        assert_eq!(click.feature_count(), 2);

        let whole = ActionContext::for_click(env, &click);
        assert!(whole.require_feature().is_err());
        assert_eq!(whole.detected_features.len(), 2);

        let narrowed =
            ActionContext::for_feature(env, click.click_point, click.detected_features[1]);
        assert_eq!(narrowed.require_feature().map(|f| f.id.0).ok(), Some(2));
        assert_eq!(narrowed.require_layer().map(|l| l.name()).ok(), Some("Points"));
        assert_eq!(narrowed.detected_features.len(), 1);
        assert_eq!(narrowed.click_type, ClickType::Geometry(GeometryKind::Point));
    }
}
