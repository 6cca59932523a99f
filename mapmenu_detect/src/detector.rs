// Copyright 2025 the Mapmenu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The detection pipeline.

use std::cmp::Ordering;
use std::fmt;

use kurbo::{Point, Rect};
use mapmenu_precise_hit::{GeometryClass, GeometryKind, HitParams, PreciseHitTest};

use crate::canvas::MapCanvas;
use crate::layer::{Feature, FeatureId, VectorLayer};
use crate::spatial::{self, FeatureIndex};
use crate::tree::LayerTree;

/// Pixel tolerances and the indexing threshold.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DetectorConfig {
    /// Search radius for point and line layers, in pixels.
    pub point_search_radius: f64,
    /// Search radius and boundary tolerance for polygon layers, in pixels.
    pub default_tolerance: f64,
    /// Layers with more features than this are filtered through a spatial index.
    pub spatial_index_threshold: usize,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            point_search_radius: 10.0,
            default_tolerance: 15.0,
            spatial_index_threshold: 1000,
        }
    }
}

/// A feature under the cursor.
#[derive(Clone, Copy, Debug)]
pub struct DetectedFeature<'a> {
    /// The feature itself.
    pub feature: &'a Feature,
    /// Layer owning the feature.
    pub layer: &'a dyn VectorLayer,
    /// Kind of the feature's geometry.
    pub geometry_type: GeometryKind,
    /// Distance from the click in layer units; zero inside or on a polygon.
    pub distance: f64,
}

impl DetectedFeature<'_> {
    /// Id of the feature.
    #[must_use]
    pub fn feature_id(&self) -> FeatureId {
        self.feature.id
    }

    /// Display name of the owning layer.
    #[must_use]
    pub fn layer_name(&self) -> &str {
        self.layer.name()
    }

    fn priority(&self, other: &Self) -> Ordering {
        self.geometry_type
            .rank()
            .cmp(&other.geometry_type.rank())
            .then(self.distance.total_cmp(&other.distance))
    }
}

/// What a right-click landed on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ClickType {
    /// No feature.
    Canvas,
    /// One or more features, all of this kind.
    Geometry(GeometryKind),
    /// Features of more than one kind.
    Mixed,
}

impl ClickType {
    /// Classifies a detection result.
    #[must_use]
    pub fn of(features: &[DetectedFeature<'_>]) -> Self {
        let Some(first) = features.first() else {
            return Self::Canvas;
        };
        if features.iter().all(|f| f.geometry_type == first.geometry_type) {
            Self::Geometry(first.geometry_type)
        } else {
            Self::Mixed
        }
    }

    /// Lower-case name: `"canvas"`, `"mixed"` or the geometry kind's name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Canvas => "canvas",
            Self::Geometry(kind) => kind.name(),
            Self::Mixed => "mixed",
        }
    }
}

impl fmt::Display for ClickType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Everything known about one right-click.
#[derive(Clone, Debug)]
pub struct ClickContext<'a> {
    /// Click position in canvas map coordinates.
    pub click_point: Point,
    /// Classification of [`ClickContext::detected_features`].
    pub click_type: ClickType,
    /// Features under the cursor, highest priority first.
    pub detected_features: Vec<DetectedFeature<'a>>,
}

impl<'a> ClickContext<'a> {
    /// Builds a context, deriving the click type from `detected_features`.
    #[must_use]
    pub fn new(click_point: Point, detected_features: Vec<DetectedFeature<'a>>) -> Self {
        Self {
            click_point,
            click_type: ClickType::of(&detected_features),
            detected_features,
        }
    }

    /// A click on empty canvas.
    #[must_use]
    pub fn canvas(click_point: Point) -> Self {
        Self::new(click_point, Vec::new())
    }

    /// The same click narrowed to one of its features.
    #[must_use]
    pub fn narrowed_to(&self, feature: DetectedFeature<'a>) -> Self {
        Self::new(self.click_point, vec![feature])
    }

    /// Returns `true` if any feature was hit.
    #[must_use]
    pub fn has_features(&self) -> bool {
        !self.detected_features.is_empty()
    }

    /// Number of features hit.
    #[must_use]
    pub fn feature_count(&self) -> usize {
        self.detected_features.len()
    }
}

/// Tolerances for one layer, already in layer units.
#[derive(Clone, Copy, Debug)]
struct LayerProbe {
    point: Point,
    search: Rect,
    params: HitParams,
}

/// Finds the features under a right-click across all visible vector layers.
///
/// Detection is a pure function of its inputs. Problems with a single layer
/// or feature (failed transforms, missing or non-finite geometry) are logged
/// and that unit is skipped; detection itself never fails.
#[derive(Clone, Copy, Debug, Default)]
pub struct FeatureDetector {
    config: DetectorConfig,
}

impl FeatureDetector {
    /// A detector with the given tolerances.
    #[must_use]
    pub fn new(config: DetectorConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// Detects features at `click` (canvas map coordinates), highest priority first.
    ///
    /// Points rank before lines, lines before polygons; within a rank the
    /// nearer feature wins and ties keep layer then feature order.
    #[must_use]
    pub fn detect<'a>(
        &self,
        layers: &'a LayerTree,
        canvas: &MapCanvas,
        click: Point,
    ) -> Vec<DetectedFeature<'a>> {
        let mut hits = Vec::new();
        let mut scanned = 0_usize;
        for layer in layers.visible_vector_layers() {
            scanned += 1;
            self.detect_in_layer(layer, canvas, click, &mut hits);
        }
        hits.sort_by(DetectedFeature::priority);
        tracing::debug!(
            x = click.x,
            y = click.y,
            layers = scanned,
            hits = hits.len(),
            "feature detection finished"
        );
        hits
    }

    /// Detects features and classifies the click.
    #[must_use]
    pub fn click_context<'a>(
        &self,
        layers: &'a LayerTree,
        canvas: &MapCanvas,
        click: Point,
    ) -> ClickContext<'a> {
        ClickContext::new(click, self.detect(layers, canvas, click))
    }

    fn search_pixels(&self, class: Option<GeometryClass>) -> f64 {
        match class {
            Some(GeometryClass::Point | GeometryClass::Line) => self.config.point_search_radius,
            Some(GeometryClass::Polygon) | None => self.config.default_tolerance,
        }
    }

    /// Carries the click and tolerances into the layer's CRS.
    fn probe(
        &self,
        layer: &dyn VectorLayer,
        canvas: &MapCanvas,
        click: Point,
    ) -> Option<LayerProbe> {
        let mupp = canvas.map_units_per_pixel();
        let reach = self.search_pixels(layer.geometry_class()) * mupp;
        let search = Rect::new(click.x - reach, click.y - reach, click.x + reach, click.y + reach);

        // Reference length used to measure how many layer units one pixel spans.
        let ref_pixels = if self.config.default_tolerance.is_finite()
            && self.config.default_tolerance > 0.0
        {
            self.config.default_tolerance
        } else {
            1.0
        };

        let (point, search, units_per_pixel) = if layer.crs() == canvas.crs() {
            (click, search, mupp)
        } else {
            let transformed = canvas.transform_to(layer.crs()).and_then(|t| {
                let point = t.transform_point(click)?;
                let search = t.transform_bounding_box(search)?;
                let span = ref_pixels * mupp;
                let unit = t.transform_bounding_box(Rect::new(
                    click.x,
                    click.y,
                    click.x + span,
                    click.y + span,
                ))?;
                Ok((point, search, unit.width().max(unit.height()) / ref_pixels))
            });
            match transformed {
                Ok(t) => t,
                Err(err) => {
                    tracing::warn!(
                        layer = layer.name(),
                        from = %canvas.crs(),
                        to = %layer.crs(),
                        %err,
                        "skipping layer, click could not be transformed"
                    );
                    return None;
                }
            }
        };

        let radius = self.config.point_search_radius * units_per_pixel;
        let boundary = self.config.default_tolerance * units_per_pixel;
        if !(point.is_finite() && search.is_finite() && radius.is_finite() && boundary.is_finite())
        {
            tracing::warn!(layer = layer.name(), "skipping layer, non-finite search area");
            return None;
        }
        Some(LayerProbe {
            point,
            search,
            params: HitParams {
                point_tolerance: radius,
                line_tolerance: radius,
                boundary_tolerance: boundary,
            },
        })
    }

    fn detect_in_layer<'a>(
        &self,
        layer: &'a dyn VectorLayer,
        canvas: &MapCanvas,
        click: Point,
        out: &mut Vec<DetectedFeature<'a>>,
    ) {
        let Some(probe) = self.probe(layer, canvas, click) else {
            return;
        };
        let features = layer.features();
        let candidates = if layer.feature_count() > self.config.spatial_index_threshold {
            match layer.spatial_index() {
                Some(index) => index.query(probe.search),
                None => match FeatureIndex::build(features) {
                    Some(index) => index.query(probe.search),
                    None => spatial::scan(features, probe.search),
                },
            }
        } else {
            spatial::scan(features, probe.search)
        };

        let before = out.len();
        for pos in &candidates {
            let Some(feature) = features.get(*pos) else {
                continue;
            };
            let Some(geometry) = feature.geometry.as_ref() else {
                continue;
            };
            if geometry.is_empty() || !geometry.is_finite() {
                tracing::warn!(
                    layer = layer.name(),
                    feature = %feature.id,
                    "skipping unusable geometry"
                );
                continue;
            }
            if let Some(score) = geometry.hit_test_local(probe.point, &probe.params) {
                out.push(DetectedFeature {
                    feature,
                    layer,
                    geometry_type: geometry.kind(),
                    distance: score.distance,
                });
            }
        }
        tracing::debug!(
            layer = layer.name(),
            candidates = candidates.len(),
            hits = out.len() - before,
            "layer scanned"
        );
    }
}
