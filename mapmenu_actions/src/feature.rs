// Copyright 2025 the Mapmenu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Measurements of the clicked feature.

use kurbo::{Line, ParamCurveNearest, Point};
use mapmenu_action::{
    Action, ActionContext, ActionError, ActionMeta, ActionSettings, ClickTypes, Scope,
};
use mapmenu_precise_hit::{Geometry, GeometryClass, bearing_degrees};
use mapmenu_settings::SettingsSchema;

use crate::measure::{Measured, click_in, measurable, require_class};
use crate::report::{
    Report, SHOW_CRS_INFO, SHOW_FEATURE_ID, SHOW_LAYER_NAME, SHOW_UNITS, decimal_places, decimals,
    feature_measure_schema, fixed, flag,
};

const ANALYSIS: &str = "Analysis";

/// The measured feature, in the measurement CRS.
fn measure_clicked(
    ctx: &ActionContext<'_>,
    class: GeometryClass,
) -> Result<Measured, ActionError> {
    let layer = ctx.require_layer()?;
    let geometry = ctx.require_geometry()?;
    require_class(geometry, class)?;
    measurable(ctx.canvas, geometry, layer.crs())
}

/// Header lines naming the feature and its layer.
fn identify(report: &mut Report, ctx: &ActionContext<'_>, settings: &ActionSettings) {
    if let (Some(feature), Some(layer)) = (ctx.feature, ctx.layer) {
        report
            .line_if(settings.get_bool(SHOW_FEATURE_ID, true), || {
                format!("Feature ID: {}", feature.id)
            })
            .line_if(settings.get_bool(SHOW_LAYER_NAME, true), || {
                format!("Layer: {}", layer.name())
            });
    }
}

/// Area of the clicked polygon.
#[derive(Debug)]
pub struct PolygonArea {
    meta: ActionMeta,
}

impl PolygonArea {
    /// Action id.
    pub const ID: &'static str = "calculate_polygon_area";

    /// Creates the action.
    #[must_use]
    pub fn new() -> Self {
        Self {
            meta: ActionMeta::new(Self::ID, "Calculate Polygon Area", Scope::Feature)
                .category(ANALYSIS)
                .description("Show the area of the clicked polygon in the units of its CRS.")
                .click_types(ClickTypes::POLYGONS),
        }
    }
}

impl Default for PolygonArea {
    fn default() -> Self {
        Self::new()
    }
}

impl Action for PolygonArea {
    fn meta(&self) -> &ActionMeta {
        &self.meta
    }

    fn settings_schema(&self) -> SettingsSchema {
        feature_measure_schema("area")
    }

    fn execute(
        &self,
        ctx: &ActionContext<'_>,
        settings: &ActionSettings,
    ) -> Result<(), ActionError> {
        let measured = measure_clicked(ctx, GeometryClass::Polygon)?;
        let area = measured.geometry.area();
        let value = fixed(area, decimals(settings, 2));
        let unit = measured.area_unit();
        tracing::debug!(area, crs = %measured.crs, "polygon area");

        let mut report = Report::new();
        identify(&mut report, ctx, settings);
        report
            .line(format!("Area: {value}"))
            .line_if(settings.get_bool(SHOW_UNITS, true), || format!("Units: {unit}"))
            .line_if(settings.get_bool(SHOW_CRS_INFO, true), || {
                format!("CRS: {}", measured.crs)
            });
        report.deliver(ctx, settings, "Area Calculation", &value, || {
            format!("Area calculated successfully: {value} {unit}")
        });
        Ok(())
    }
}

/// Perimeter of the clicked polygon, holes included.
#[derive(Debug)]
pub struct PolygonPerimeter {
    meta: ActionMeta,
}

impl PolygonPerimeter {
    /// Action id.
    pub const ID: &'static str = "calculate_polygon_perimeter";

    /// Creates the action.
    #[must_use]
    pub fn new() -> Self {
        Self {
            meta: ActionMeta::new(Self::ID, "Calculate Polygon Perimeter", Scope::Feature)
                .category(ANALYSIS)
                .description("Show the perimeter of the clicked polygon.")
                .click_types(ClickTypes::POLYGONS),
        }
    }
}

impl Default for PolygonPerimeter {
    fn default() -> Self {
        Self::new()
    }
}

impl Action for PolygonPerimeter {
    fn meta(&self) -> &ActionMeta {
        &self.meta
    }

    fn settings_schema(&self) -> SettingsSchema {
        feature_measure_schema("perimeter")
    }

    fn execute(
        &self,
        ctx: &ActionContext<'_>,
        settings: &ActionSettings,
    ) -> Result<(), ActionError> {
        let measured = measure_clicked(ctx, GeometryClass::Polygon)?;
        let value = fixed(measured.geometry.perimeter(), decimals(settings, 2));
        let unit = measured.length_unit();
        let show_units = settings.get_bool(SHOW_UNITS, true);

        let mut report = Report::new();
        identify(&mut report, ctx, settings);
        report
            .line(if show_units {
                format!("Perimeter: {value} {unit}")
            } else {
                format!("Perimeter: {value}")
            })
            .line_if(settings.get_bool(SHOW_CRS_INFO, true), || {
                format!("CRS: {}", measured.crs)
            });
        report.deliver(ctx, settings, "Perimeter Calculation", &value, || {
            format!("Perimeter calculated successfully: {value} {unit}")
        });
        Ok(())
    }
}

/// Length of the clicked line.
#[derive(Debug)]
pub struct LineLength {
    meta: ActionMeta,
}

impl LineLength {
    /// Action id.
    pub const ID: &'static str = "calculate_line_length";

    /// Creates the action.
    #[must_use]
    pub fn new() -> Self {
        Self {
            meta: ActionMeta::new(Self::ID, "Calculate Line Length", Scope::Feature)
                .category(ANALYSIS)
                .description("Show the length of the clicked line.")
                .click_types(ClickTypes::LINES),
        }
    }
}

impl Default for LineLength {
    fn default() -> Self {
        Self::new()
    }
}

impl Action for LineLength {
    fn meta(&self) -> &ActionMeta {
        &self.meta
    }

    fn settings_schema(&self) -> SettingsSchema {
        feature_measure_schema("length")
    }

    fn execute(
        &self,
        ctx: &ActionContext<'_>,
        settings: &ActionSettings,
    ) -> Result<(), ActionError> {
        let measured = measure_clicked(ctx, GeometryClass::Line)?;
        let value = fixed(measured.geometry.length(), decimals(settings, 2));
        let unit = measured.length_unit();

        let mut report = Report::new();
        identify(&mut report, ctx, settings);
        report
            .line(format!("Length: {value}"))
            .line_if(settings.get_bool(SHOW_UNITS, true), || format!("Units: {unit}"))
            .line_if(settings.get_bool(SHOW_CRS_INFO, true), || {
                format!("CRS: {}", measured.crs)
            });
        report.deliver(ctx, settings, "Line Length Calculation", &value, || {
            format!("Length calculated successfully: {value} {unit}")
        });
        Ok(())
    }
}

const SHOW_START_END: &str = "show_start_end_coordinates";
const SHOW_SEGMENT_INFO: &str = "show_segment_info";
const SHOW_LINE_LENGTH: &str = "show_line_length";
const SHOW_CARDINAL: &str = "show_cardinal_direction";

/// Eight-point compass direction of a bearing in degrees.
#[must_use]
pub fn cardinal_direction(bearing: f64) -> &'static str {
    const POINTS: [&str; 8] = ["N", "NE", "E", "SE", "S", "SW", "W", "NW"];
    let sector = ((bearing.rem_euclid(360.0) + 22.5) / 45.0).floor();
    #[expect(
        clippy::cast_possible_truncation,
        reason = "sector is in 0..=8 after the floor"
    )]
    let index = sector as usize % POINTS.len();
    POINTS[index]
}

/// Index and endpoints of the segment nearest to `pt`, over all parts.
fn nearest_segment(geometry: &Geometry, pt: Point) -> Option<(usize, usize, Line)> {
    let parts: Vec<&[Point]> = match geometry {
        Geometry::LineString(vs) => vec![vs.as_slice()],
        Geometry::MultiLineString(lines) => lines.iter().map(Vec::as_slice).collect(),
        _ => return None,
    };
    let segments: Vec<Line> = parts
        .iter()
        .flat_map(|p| p.windows(2).map(|w| Line::new(w[0], w[1])))
        .collect();
    let (index, line) = segments
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| {
            a.nearest(pt, 1e-9)
                .distance_sq
                .total_cmp(&b.nearest(pt, 1e-9).distance_sq)
        })?;
    Some((index, segments.len(), *line))
}

/// Grid bearing of the clicked line and of the segment under the click.
#[derive(Debug)]
pub struct LineBearing {
    meta: ActionMeta,
}

impl LineBearing {
    /// Action id.
    pub const ID: &'static str = "calculate_line_bearing";

    /// Creates the action.
    #[must_use]
    pub fn new() -> Self {
        Self {
            meta: ActionMeta::new(Self::ID, "Calculate Line Bearing/Azimuth", Scope::Feature)
                .category(ANALYSIS)
                .description(
                    "Show the bearing from the first to the last vertex of the clicked line, \
                     and of the segment closest to the click.",
                )
                .click_types(ClickTypes::LINES),
        }
    }
}

impl Default for LineBearing {
    fn default() -> Self {
        Self::new()
    }
}

impl Action for LineBearing {
    fn meta(&self) -> &ActionMeta {
        &self.meta
    }

    fn settings_schema(&self) -> SettingsSchema {
        SettingsSchema::new()
            .with(crate::report::DECIMAL_PLACES, decimal_places(2).build())
            .with(
                SHOW_FEATURE_ID,
                flag(true, "Show Feature ID", "Include the feature ID in the result").build(),
            )
            .with(
                SHOW_LAYER_NAME,
                flag(true, "Show Layer Name", "Include the layer name in the result").build(),
            )
            .with(
                SHOW_START_END,
                flag(true, "Show Start/End Coordinates", "Include the line's end points").build(),
            )
            .with(
                SHOW_SEGMENT_INFO,
                flag(true, "Show Segment Info", "Include the segment closest to the click")
                    .build(),
            )
            .with(
                SHOW_LINE_LENGTH,
                flag(true, "Show Line Length", "Include the length of the line").build(),
            )
            .with(
                SHOW_CARDINAL,
                flag(true, "Show Cardinal Direction", "Include N, NE, E, ... next to degrees")
                    .build(),
            )
            .with(
                SHOW_CRS_INFO,
                flag(false, "Show CRS Information", "Include the CRS used for the bearing")
                    .build(),
            )
            .with(
                crate::report::SHOW_SUCCESS_MESSAGE,
                flag(false, "Show Success Message", "Show a short confirmation").build(),
            )
            .with(
                crate::report::COPY_TO_CLIPBOARD,
                flag(false, "Copy to Clipboard", "Copy the bearing to the clipboard").build(),
            )
    }

    fn execute(
        &self,
        ctx: &ActionContext<'_>,
        settings: &ActionSettings,
    ) -> Result<(), ActionError> {
        let measured = measure_clicked(ctx, GeometryClass::Line)?;
        let bearing = measured
            .geometry
            .line_bearing()
            .ok_or_else(|| ActionError::Failed("line has no direction".into()))?;
        let places = decimals(settings, 2);
        let value = fixed(bearing, places);
        let cardinal = settings.get_bool(SHOW_CARDINAL, true);
        let with_cardinal = |deg: f64| {
            if cardinal {
                format!("{}° ({})", fixed(deg, places), cardinal_direction(deg))
            } else {
                format!("{}°", fixed(deg, places))
            }
        };

        let mut report = Report::new();
        identify(&mut report, ctx, settings);
        report.line(format!("Bearing: {}", with_cardinal(bearing)));

        if settings.get_bool(SHOW_START_END, true) {
            let first = measured.geometry.vertices().next();
            let last = measured.geometry.vertices().last();
            if let (Some(a), Some(b)) = (first, last) {
                report
                    .line(format!("Start: {}, {}", fixed(a.x, places), fixed(a.y, places)))
                    .line(format!("End: {}, {}", fixed(b.x, places), fixed(b.y, places)));
            }
        }

        if settings.get_bool(SHOW_SEGMENT_INFO, true) {
            match click_in(ctx.canvas, ctx.click_point, &measured.crs) {
                Ok(click) => {
                    if let Some((index, count, seg)) = nearest_segment(&measured.geometry, click)
                        && let Some(seg_bearing) = bearing_degrees(seg.p0, seg.p1)
                    {
                        report
                            .line(format!("Closest Segment: {} of {count}", index + 1))
                            .line(format!("Segment Bearing: {}", with_cardinal(seg_bearing)));
                    }
                }
                Err(err) => tracing::warn!(%err, "click could not be placed on the line"),
            }
        }

        report
            .line_if(settings.get_bool(SHOW_LINE_LENGTH, true), || {
                format!(
                    "Length: {} {}",
                    fixed(measured.geometry.length(), places),
                    measured.length_unit()
                )
            })
            .line_if(settings.get_bool(SHOW_CRS_INFO, false), || {
                format!("CRS: {}", measured.crs)
            });
        report.deliver(ctx, settings, "Line Bearing", &value, || {
            format!("Bearing calculated successfully: {}", with_cardinal(bearing))
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compass_sectors() {
        let cases = [
            (0.0, "N"),
            (22.4, "N"),
            (22.5, "NE"),
            (90.0, "E"),
            (180.0, "S"),
            (247.5, "W"),
            (337.5, "N"),
            (359.9, "N"),
            (-45.0, "NW"),
        ];
        for (deg, expected) in cases {
            assert_eq!(cardinal_direction(deg), expected, "{deg}");
        }
    }

    #[test]
    fn nearest_segment_spans_parts() {
        let lines = Geometry::MultiLineString(vec![
            vec![Point::new(0.0, 0.0), Point::new(10.0, 0.0)],
            vec![Point::new(0.0, 5.0), Point::new(0.0, 15.0), Point::new(10.0, 15.0)],
        ]);
        let (index, count, seg) = nearest_segment(&lines, Point::new(5.0, 14.0)).unwrap();
        assert_eq!((index, count), (2, 3));
        assert_eq!(bearing_degrees(seg.p0, seg.p1), Some(90.0));
    }
}
