// Copyright 2025 the Mapmenu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use mapmenu_action::{
    Action, ActionContext, ActionError, ActionMeta, ActionSettings, ClickTypes, Scope, Severity,
};
use mapmenu_settings::{SettingDefBuilder, SettingValue, SettingsSchema};

use crate::report::{flag, grouped};

/// Scale denominators offered by [`ChangeMapScale`], with their descriptions.
pub const PREDEFINED_SCALES: &[(i64, &str)] = &[
    (500, "Very Detailed (Building Level)"),
    (1_000, "Detailed (Street Level)"),
    (2_000, "Local Area"),
    (5_000, "Neighborhood"),
    (10_000, "District"),
    (25_000, "Town/City"),
    (50_000, "Large City"),
    (100_000, "Regional"),
    (250_000, "County/Province"),
    (500_000, "State/Large Region"),
    (1_000_000, "Country"),
    (5_000_000, "Continental"),
    (10_000_000, "Global"),
];

const SCALE: &str = "scale_denominator";
const SHOW_SCALE_LABELS: &str = "show_scale_labels";

fn known_scale(value: &SettingValue) -> Result<(), String> {
    match value.as_int() {
        Some(d) if PREDEFINED_SCALES.iter().any(|(s, _)| *s == d) => Ok(()),
        _ => Err("not one of the predefined map scales".to_owned()),
    }
}

/// Display text of a predefined scale, such as `1:10,000 - District`.
#[must_use]
pub fn scale_label(denominator: i64, with_description: bool) -> String {
    let ratio = format!("1:{}", grouped(denominator.unsigned_abs()));
    match PREDEFINED_SCALES.iter().find(|(s, _)| *s == denominator) {
        Some((_, description)) if with_description => format!("{ratio} - {description}"),
        _ => ratio,
    }
}

/// Zooms the map to the configured scale.
#[derive(Debug)]
pub struct ChangeMapScale {
    meta: ActionMeta,
}

impl ChangeMapScale {
    /// Action id.
    pub const ID: &'static str = "change_map_scale";

    /// Creates the action.
    #[must_use]
    pub fn new() -> Self {
        Self {
            meta: ActionMeta::new(Self::ID, "Change Map Scale", Scope::Universal)
                .category("Navigation")
                .description("Zoom the map to the scale chosen in the action settings.")
                .click_types(ClickTypes::UNIVERSAL),
        }
    }
}

impl Default for ChangeMapScale {
    fn default() -> Self {
        Self::new()
    }
}

impl Action for ChangeMapScale {
    fn meta(&self) -> &ActionMeta {
        &self.meta
    }

    fn settings_schema(&self) -> SettingsSchema {
        SettingsSchema::new()
            .with(
                SCALE,
                SettingDefBuilder::int(10_000)
                    .range(500, 10_000_000)
                    .label("Map Scale")
                    .description("Denominator of the scale to zoom to")
                    .validate(known_scale)
                    .build(),
            )
            .with(
                SHOW_SCALE_LABELS,
                flag(true, "Show Scale Labels", "Describe the scale in the confirmation").build(),
            )
    }

    fn execute(
        &self,
        ctx: &ActionContext<'_>,
        settings: &ActionSettings,
    ) -> Result<(), ActionError> {
        let denominator = settings.get_int(SCALE, 10_000);
        ctx.services.set_map_scale(denominator as f64)?;
        let label = scale_label(denominator, settings.get_bool(SHOW_SCALE_LABELS, true));
        tracing::debug!(denominator, "map scale changed");
        ctx.services
            .notify(Severity::Info, "Map Scale", &format!("Map scale set to {label}"));
        Ok(())
    }
}
