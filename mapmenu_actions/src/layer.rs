// Copyright 2025 the Mapmenu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Measurements over every feature of the clicked layer.

use mapmenu_action::{
    Action, ActionContext, ActionError, ActionMeta, ActionSettings, ClickTypes, Scope,
};
use mapmenu_crs::Crs;
use mapmenu_detect::FeatureId;
use mapmenu_precise_hit::{Geometry, GeometryClass};
use mapmenu_settings::SettingsSchema;

use crate::measure::{measurable, measurement_crs};
use crate::report::{
    COPY_TO_CLIPBOARD, DECIMAL_PLACES, Report, SHOW_CRS_INFO, SHOW_SUCCESS_MESSAGE, SHOW_UNITS,
    decimal_places, decimals, fixed, flag,
};

const SHOW_SUMMARY: &str = "show_summary_statistics";
const SHOW_INDIVIDUAL: &str = "show_individual_results";

fn layer_schema(quantity: &str) -> SettingsSchema {
    SettingsSchema::new()
        .with(DECIMAL_PLACES, decimal_places(2).build())
        .with(
            SHOW_SUMMARY,
            flag(true, "Show Summary Statistics", "Include total, average, minimum and maximum")
                .build(),
        )
        .with(
            SHOW_INDIVIDUAL,
            flag(false, "Show Individual Results", "List the value of every feature").build(),
        )
        .with(
            SHOW_UNITS,
            flag(true, "Show Units", "Include the units of the result").build(),
        )
        .with(
            SHOW_CRS_INFO,
            flag(false, "Show CRS Information", "Include the CRS used for the measurement")
                .build(),
        )
        .with(
            SHOW_SUCCESS_MESSAGE,
            flag(true, "Show Success Message", "Show a short confirmation after the result")
                .build(),
        )
        .with(
            COPY_TO_CLIPBOARD,
            flag(
                false,
                "Copy to Clipboard",
                &format!("Copy the total {quantity} to the clipboard"),
            )
            .build(),
        )
}

/// Per-feature values over one layer.
#[derive(Debug)]
struct Survey {
    crs: Crs,
    values: Vec<(FeatureId, f64)>,
    skipped: usize,
}

impl Survey {
    fn total(&self) -> f64 {
        self.values.iter().map(|(_, v)| v).sum()
    }

    fn min(&self) -> f64 {
        self.values
            .iter()
            .map(|(_, v)| *v)
            .fold(f64::INFINITY, f64::min)
    }

    fn max(&self) -> f64 {
        self.values
            .iter()
            .map(|(_, v)| *v)
            .fold(f64::NEG_INFINITY, f64::max)
    }

    fn mean(&self) -> f64 {
        self.total() / self.values.len() as f64
    }
}

/// Measures every feature of the context layer; unusable features are skipped.
fn survey(
    ctx: &ActionContext<'_>,
    class: GeometryClass,
    measure: fn(&Geometry) -> f64,
) -> Result<Survey, ActionError> {
    let layer = ctx.require_layer()?;
    let mut out = Survey {
        crs: measurement_crs(layer.crs()),
        values: Vec::new(),
        skipped: 0,
    };
    for feature in layer.features() {
        let Some(geometry) = feature
            .geometry
            .as_ref()
            .filter(|g| !g.is_empty() && g.is_finite() && g.kind().class() == class)
        else {
            out.skipped += 1;
            continue;
        };
        match measurable(ctx.canvas, geometry, layer.crs()) {
            Ok(m) => out.values.push((feature.id, measure(&m.geometry))),
            Err(err) => {
                tracing::warn!(
                    layer = layer.name(),
                    feature = feature.id.0,
                    %err,
                    "skipping feature"
                );
                out.skipped += 1;
            }
        }
    }
    if out.values.is_empty() {
        return Err(ActionError::Failed(format!(
            "layer `{}` has no measurable features",
            layer.name()
        )));
    }
    Ok(out)
}

fn deliver_survey(
    ctx: &ActionContext<'_>,
    settings: &ActionSettings,
    survey: &Survey,
    title: &str,
    quantity: &str,
    unit: &str,
) -> Result<(), ActionError> {
    let layer = ctx.require_layer()?;
    let places = decimals(settings, 2);
    let with_unit = |v: f64| {
        if settings.get_bool(SHOW_UNITS, true) {
            format!("{} {unit}", fixed(v, places))
        } else {
            fixed(v, places)
        }
    };
    let total = fixed(survey.total(), places);
    let processed = survey.values.len();

    let mut report = Report::new();
    report.line(format!("Layer: {}", layer.name())).line(if survey.skipped > 0 {
        format!("Features: {processed} ({} skipped)", survey.skipped)
    } else {
        format!("Features: {processed}")
    });
    if settings.get_bool(SHOW_SUMMARY, true) {
        report
            .line(format!("Total {quantity}: {}", with_unit(survey.total())))
            .line(format!("Average: {}", with_unit(survey.mean())))
            .line(format!("Minimum: {}", with_unit(survey.min())))
            .line(format!("Maximum: {}", with_unit(survey.max())));
    }
    if settings.get_bool(SHOW_INDIVIDUAL, false) {
        for (id, v) in &survey.values {
            report.line(format!("Feature {id}: {}", with_unit(*v)));
        }
    }
    report.line_if(settings.get_bool(SHOW_CRS_INFO, false), || {
        format!("CRS: {}", survey.crs)
    });
    report.deliver(ctx, settings, title, &total, || {
        format!("Processed {processed} features in layer `{}`", layer.name())
    });
    Ok(())
}

/// Area statistics over every polygon of the clicked layer.
#[derive(Debug)]
pub struct PolygonAreasLayer {
    meta: ActionMeta,
}

impl PolygonAreasLayer {
    /// Action id.
    pub const ID: &'static str = "calculate_polygon_areas_layer";

    /// Creates the action.
    #[must_use]
    pub fn new() -> Self {
        Self {
            meta: ActionMeta::new(Self::ID, "Calculate Polygon Areas for Layer", Scope::Layer)
                .category("Analysis")
                .description("Show total, average and extreme areas of every polygon in the layer.")
                .click_types(ClickTypes::POLYGONS),
        }
    }
}

impl Default for PolygonAreasLayer {
    fn default() -> Self {
        Self::new()
    }
}

impl Action for PolygonAreasLayer {
    fn meta(&self) -> &ActionMeta {
        &self.meta
    }

    fn settings_schema(&self) -> SettingsSchema {
        layer_schema("area")
    }

    fn execute(
        &self,
        ctx: &ActionContext<'_>,
        settings: &ActionSettings,
    ) -> Result<(), ActionError> {
        let survey = survey(ctx, GeometryClass::Polygon, Geometry::area)?;
        let unit = format!("square {}", survey.crs.unit_name());
        deliver_survey(ctx, settings, &survey, "Layer Area Statistics", "Area", &unit)
    }
}

/// Length statistics over every line of the clicked layer.
#[derive(Debug)]
pub struct LineLengthLayer {
    meta: ActionMeta,
}

impl LineLengthLayer {
    /// Action id.
    pub const ID: &'static str = "calculate_line_length_layer";

    /// Creates the action.
    #[must_use]
    pub fn new() -> Self {
        Self {
            meta: ActionMeta::new(Self::ID, "Calculate Line Length for Layer", Scope::Layer)
                .category("Analysis")
                .description("Show total, average and extreme lengths of every line in the layer.")
                .click_types(ClickTypes::LINES),
        }
    }
}

impl Default for LineLengthLayer {
    fn default() -> Self {
        Self::new()
    }
}

impl Action for LineLengthLayer {
    fn meta(&self) -> &ActionMeta {
        &self.meta
    }

    fn settings_schema(&self) -> SettingsSchema {
        layer_schema("length")
    }

    fn execute(
        &self,
        ctx: &ActionContext<'_>,
        settings: &ActionSettings,
    ) -> Result<(), ActionError> {
        let survey = survey(ctx, GeometryClass::Line, Geometry::length)?;
        let unit = survey.crs.unit_name();
        deliver_survey(ctx, settings, &survey, "Layer Length Statistics", "Length", unit)
    }
}
