// Copyright 2025 the Mapmenu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Result formatting shared by the measurement actions.

use mapmenu_action::{ActionContext, ActionSettings, Severity};
use mapmenu_settings::{SettingDefBuilder, SettingsSchema};

pub(crate) const DECIMAL_PLACES: &str = "decimal_places";
pub(crate) const SHOW_FEATURE_ID: &str = "show_feature_id";
pub(crate) const SHOW_LAYER_NAME: &str = "show_layer_name";
pub(crate) const SHOW_CRS_INFO: &str = "show_crs_info";
pub(crate) const SHOW_UNITS: &str = "show_units";
pub(crate) const SHOW_SUCCESS_MESSAGE: &str = "show_success_message";
pub(crate) const COPY_TO_CLIPBOARD: &str = "copy_to_clipboard";

const MAX_DECIMALS: i64 = 10;

pub(crate) fn decimal_places(default: i64) -> SettingDefBuilder {
    SettingDefBuilder::int(default)
        .range(0, MAX_DECIMALS)
        .label("Decimal Places")
        .description("Number of decimal places in the result")
}

pub(crate) fn flag(default: bool, label: &str, description: &str) -> SettingDefBuilder {
    SettingDefBuilder::bool(default)
        .label(label)
        .description(description)
}

/// Settings of the per-feature measurements.
pub(crate) fn feature_measure_schema(quantity: &str) -> SettingsSchema {
    SettingsSchema::new()
        .with(DECIMAL_PLACES, decimal_places(2).build())
        .with(
            SHOW_FEATURE_ID,
            flag(true, "Show Feature ID", "Include the feature ID in the result").build(),
        )
        .with(
            SHOW_LAYER_NAME,
            flag(true, "Show Layer Name", "Include the layer name in the result").build(),
        )
        .with(
            SHOW_CRS_INFO,
            flag(true, "Show CRS Information", "Include the CRS used for the measurement").build(),
        )
        .with(
            SHOW_UNITS,
            flag(true, "Show Units", "Include the units of the result").build(),
        )
        .with(
            SHOW_SUCCESS_MESSAGE,
            flag(
                false,
                "Show Success Message",
                "Show a short confirmation after the result",
            )
            .build(),
        )
        .with(
            COPY_TO_CLIPBOARD,
            flag(
                false,
                "Copy to Clipboard",
                &format!("Copy the {quantity} value to the clipboard"),
            )
            .build(),
        )
}

/// Decimal places from settings, clamped to the schema range.
pub(crate) fn decimals(settings: &ActionSettings, fallback: i64) -> usize {
    let places = settings
        .get_int(DECIMAL_PLACES, fallback)
        .clamp(0, MAX_DECIMALS);
    usize::try_from(places).unwrap_or(2)
}

/// Formats with a fixed number of decimals.
pub(crate) fn fixed(value: f64, decimals: usize) -> String {
    format!("{value:.decimals$}")
}

/// Formats a whole number with comma thousands separators.
pub(crate) fn grouped(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Lines of a result message.
#[derive(Debug, Default)]
pub(crate) struct Report {
    lines: Vec<String>,
}

impl Report {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn line(&mut self, text: impl Into<String>) -> &mut Self {
        self.lines.push(text.into());
        self
    }

    pub(crate) fn line_if(&mut self, show: bool, text: impl FnOnce() -> String) -> &mut Self {
        if show {
            self.lines.push(text());
        }
        self
    }

    pub(crate) fn text(&self) -> String {
        self.lines.join("\n")
    }

    /// Sends the report, then handles the clipboard and success settings.
    pub(crate) fn deliver(
        &self,
        ctx: &ActionContext<'_>,
        settings: &ActionSettings,
        title: &str,
        value: &str,
        success: impl FnOnce() -> String,
    ) {
        ctx.services.notify(Severity::Info, title, &self.text());
        if settings.get_bool(COPY_TO_CLIPBOARD, false) {
            ctx.services.set_clipboard_text(value);
        }
        if settings.get_bool(SHOW_SUCCESS_MESSAGE, false) {
            ctx.services.notify(Severity::Success, "Success", &success());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thousands_are_grouped() {
        assert_eq!(grouped(500), "500");
        assert_eq!(grouped(1000), "1,000");
        assert_eq!(grouped(250_000), "250,000");
        assert_eq!(grouped(10_000_000), "10,000,000");
    }

    #[test]
    fn fixed_respects_decimals() {
        assert_eq!(fixed(2.0 / 3.0, 0), "1");
        assert_eq!(fixed(2.0 / 3.0, 3), "0.667");
    }
}
