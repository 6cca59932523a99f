// Copyright 2025 the Mapmenu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Read-only information about features and layers.

use kurbo::Point;
use mapmenu_action::{
    Action, ActionContext, ActionError, ActionMeta, ActionSettings, ClickTypes, Scope, Severity,
};
use mapmenu_crs::Crs;
use mapmenu_precise_hit::{Geometry, GeometryClass};
use mapmenu_settings::SettingsSchema;

use crate::measure::{reproject, require_class};
use crate::report::{
    COPY_TO_CLIPBOARD, DECIMAL_PLACES, Report, SHOW_FEATURE_ID, SHOW_LAYER_NAME, decimal_places,
    decimals, fixed, flag,
};

const INFORMATION: &str = "Information";
const SHOW_CANVAS_CRS: &str = "show_canvas_crs";
const SHOW_WGS84: &str = "show_wgs84";

/// Coordinates of the clicked point feature.
#[derive(Debug)]
pub struct ShowPointCoordinates {
    meta: ActionMeta,
}

impl ShowPointCoordinates {
    /// Action id.
    pub const ID: &'static str = "show_point_coordinates";

    /// Creates the action.
    #[must_use]
    pub fn new() -> Self {
        Self {
            meta: ActionMeta::new(Self::ID, "Show Point Coordinates", Scope::Feature)
                .category(INFORMATION)
                .description(
                    "Show the coordinates of the clicked point in the layer CRS, \
                     optionally also in the canvas CRS and WGS 84.",
                )
                .click_types(ClickTypes::POINTS),
        }
    }
}

impl Default for ShowPointCoordinates {
    fn default() -> Self {
        Self::new()
    }
}

fn xy(p: Point, places: usize) -> String {
    format!("{}, {}", fixed(p.x, places), fixed(p.y, places))
}

fn point_lines(report: &mut Report, heading: &str, geometry: &Geometry, places: usize) {
    let points: Vec<Point> = geometry.vertices().collect();
    if let [single] = points.as_slice() {
        report.line(format!("{heading}: {}", xy(*single, places)));
        return;
    }
    report.line(format!("{heading}:"));
    for (i, p) in points.iter().enumerate() {
        report.line(format!("  Point {}: {}", i + 1, xy(*p, places)));
    }
}

impl Action for ShowPointCoordinates {
    fn meta(&self) -> &ActionMeta {
        &self.meta
    }

    fn settings_schema(&self) -> SettingsSchema {
        SettingsSchema::new()
            .with(DECIMAL_PLACES, decimal_places(6).build())
            .with(
                SHOW_FEATURE_ID,
                flag(true, "Show Feature ID", "Include the feature ID in the result").build(),
            )
            .with(
                SHOW_LAYER_NAME,
                flag(true, "Show Layer Name", "Include the layer name in the result").build(),
            )
            .with(
                SHOW_CANVAS_CRS,
                flag(
                    true,
                    "Show Canvas CRS",
                    "Also show the coordinates in the canvas CRS when it differs",
                )
                .build(),
            )
            .with(
                SHOW_WGS84,
                flag(false, "Show WGS 84", "Also show longitude and latitude").build(),
            )
            .with(
                COPY_TO_CLIPBOARD,
                flag(false, "Copy to Clipboard", "Copy the layer coordinates to the clipboard")
                    .build(),
            )
    }

    fn execute(
        &self,
        ctx: &ActionContext<'_>,
        settings: &ActionSettings,
    ) -> Result<(), ActionError> {
        let feature = ctx.require_feature()?;
        let layer = ctx.require_layer()?;
        let geometry = ctx.require_geometry()?;
        require_class(geometry, GeometryClass::Point)?;
        let places = decimals(settings, 6);
        let first = geometry
            .vertices()
            .next()
            .ok_or(ActionError::MissingGeometry {
                feature: feature.id.0,
            })?;

        let mut report = Report::new();
        report
            .line_if(settings.get_bool(SHOW_FEATURE_ID, true), || {
                format!("Feature ID: {}", feature.id)
            })
            .line_if(settings.get_bool(SHOW_LAYER_NAME, true), || {
                format!("Layer: {}", layer.name())
            });
        point_lines(&mut report, &layer.crs().to_string(), geometry, places);

        let mut also = Vec::new();
        if settings.get_bool(SHOW_CANVAS_CRS, true) && ctx.canvas.crs() != layer.crs() {
            also.push(ctx.canvas.crs().clone());
        }
        if settings.get_bool(SHOW_WGS84, false) && !layer.crs().is_geographic() {
            also.push(Crs::wgs84());
        }
        also.dedup();
        for crs in also {
            match reproject(ctx.canvas, geometry, layer.crs(), &crs) {
                Ok(g) => point_lines(&mut report, &crs.to_string(), &g, places),
                Err(err) => {
                    tracing::warn!(
                        from = %layer.crs(),
                        to = %crs,
                        %err,
                        "coordinates not converted"
                    );
                    report.line(format!("{crs}: not available"));
                }
            }
        }

        let value = xy(first, places);
        report.deliver(ctx, settings, "Point Coordinates", &value, || {
            format!("Coordinates: {value}")
        });
        Ok(())
    }
}

const SHOW_CRS_DETAILS: &str = "show_crs_details";
const HIGHLIGHT_MISMATCHED: &str = "highlight_mismatched";
const SHOW_LAYER_COUNT: &str = "show_layer_count";
const INCLUDE_HIDDEN: &str = "include_hidden_layers";

/// Lists every layer's CRS against the canvas CRS.
#[derive(Debug)]
pub struct CheckCrsAllLayers {
    meta: ActionMeta,
}

impl CheckCrsAllLayers {
    /// Action id.
    pub const ID: &'static str = "check_crs_all_layers";

    /// Creates the action.
    #[must_use]
    pub fn new() -> Self {
        Self {
            meta: ActionMeta::new(Self::ID, "Check CRS for All Layers", Scope::Universal)
                .category(INFORMATION)
                .description(
                    "Report the CRS of every layer and flag those that differ from the map.",
                )
                .click_types(ClickTypes::UNIVERSAL),
        }
    }
}

impl Default for CheckCrsAllLayers {
    fn default() -> Self {
        Self::new()
    }
}

impl Action for CheckCrsAllLayers {
    fn meta(&self) -> &ActionMeta {
        &self.meta
    }

    fn settings_schema(&self) -> SettingsSchema {
        SettingsSchema::new()
            .with(
                SHOW_CRS_DETAILS,
                flag(true, "Show CRS Details", "Show each layer's CRS id").build(),
            )
            .with(
                HIGHLIGHT_MISMATCHED,
                flag(true, "Highlight Mismatched", "Mark layers whose CRS differs from the map")
                    .build(),
            )
            .with(
                SHOW_LAYER_COUNT,
                flag(true, "Show Layer Count", "Show the number of layers checked").build(),
            )
            .with(
                INCLUDE_HIDDEN,
                flag(true, "Include Hidden Layers", "Check layers that are switched off").build(),
            )
    }

    fn execute(
        &self,
        ctx: &ActionContext<'_>,
        settings: &ActionSettings,
    ) -> Result<(), ActionError> {
        let title = "CRS Check";
        if ctx.layers.is_empty() {
            ctx.services
                .notify(Severity::Warning, "No Layers", "No layers found in the project.");
            return Ok(());
        }
        let include_hidden = settings.get_bool(INCLUDE_HIDDEN, true);
        let layers: Vec<_> = ctx
            .layers
            .iter()
            .filter(|(layer, visible)| (include_hidden || *visible) && layer.is_valid())
            .map(|(layer, _)| layer)
            .collect();
        if layers.is_empty() {
            ctx.services
                .notify(
                    Severity::Warning,
                    "No Valid Layers",
                    "No valid layers found in the project.",
                );
            return Ok(());
        }

        let canvas_crs = ctx.canvas.crs();
        let highlight = settings.get_bool(HIGHLIGHT_MISMATCHED, true);
        let details = settings.get_bool(SHOW_CRS_DETAILS, true);
        let mut mismatched = 0;
        let mut report = Report::new();
        report.line(format!("Map CRS: {canvas_crs}"));
        for layer in &layers {
            let differs = layer.crs() != canvas_crs;
            mismatched += usize::from(differs);
            let mut line = if details {
                format!("{}: {}", layer.name(), layer.crs())
            } else {
                layer.name().to_owned()
            };
            if highlight && differs {
                line.push_str(" (mismatch)");
            }
            report.line(line);
        }
        report.line_if(settings.get_bool(SHOW_LAYER_COUNT, true), || {
            if highlight {
                format!("Total Layers: {} | Mismatched CRS: {mismatched}", layers.len())
            } else {
                format!("Total Layers: {}", layers.len())
            }
        });

        let severity = if highlight && mismatched > 0 {
            Severity::Warning
        } else {
            Severity::Info
        };
        tracing::debug!(layers = layers.len(), mismatched, "crs check");
        ctx.services.notify(severity, title, &report.text());
        Ok(())
    }
}
