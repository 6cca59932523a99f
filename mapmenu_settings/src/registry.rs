// Copyright 2025 the Mapmenu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ordered collection of setting definitions.

use hashbrown::HashMap;

use crate::error::SettingError;
use crate::metadata::SettingDef;
use crate::value::SettingValue;

/// The settings an action exposes, in declaration order.
///
/// # Example
///
/// ```rust
/// use mapmenu_settings::{SettingDefBuilder, SettingsSchema, SettingValue};
///
/// let schema = SettingsSchema::new()
///     .with("decimal_places", SettingDefBuilder::int(2).range(0, 10).build())
///     .with("copy_to_clipboard", SettingDefBuilder::bool(false).build());
///
/// assert_eq!(schema.len(), 2);
/// assert_eq!(schema.names().collect::<Vec<_>>(), ["decimal_places", "copy_to_clipboard"]);
/// assert_eq!(schema.default_value("decimal_places"), Some(&SettingValue::Int(2)));
/// ```
#[derive(Clone, Debug, Default)]
pub struct SettingsSchema {
    settings: Vec<(String, SettingDef)>,
    by_name: HashMap<String, usize>,
}

impl SettingsSchema {
    /// Creates an empty schema.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a setting. A repeated name replaces the earlier definition in place.
    #[must_use]
    pub fn with(mut self, name: &str, def: SettingDef) -> Self {
        self.register(name, def);
        self
    }

    /// Adds a setting. A repeated name replaces the earlier definition in place.
    pub fn register(&mut self, name: &str, def: SettingDef) {
        if let Some(&i) = self.by_name.get(name) {
            tracing::debug!(setting = name, "setting redefined");
            self.settings[i].1 = def;
            return;
        }
        self.by_name.insert(name.to_owned(), self.settings.len());
        self.settings.push((name.to_owned(), def));
    }

    /// Number of settings.
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.settings.len()
    }

    /// Returns `true` if there are no settings.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.settings.is_empty()
    }

    /// Looks up a setting by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&SettingDef> {
        self.by_name.get(name).map(|&i| &self.settings[i].1)
    }

    /// Default value of a setting.
    #[must_use]
    pub fn default_value(&self, name: &str) -> Option<&SettingValue> {
        self.get(name).map(SettingDef::default_value)
    }

    /// Setting names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.settings.iter().map(|(n, _)| n.as_str())
    }

    /// Settings in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &SettingDef)> + '_ {
        self.settings.iter().map(|(n, d)| (n.as_str(), d))
    }

    /// Validates a value against the named setting.
    pub fn validate(&self, name: &str, value: &SettingValue) -> Result<SettingValue, SettingError> {
        self.get(name)
            .ok_or_else(|| SettingError::UnknownSetting {
                name: name.to_owned(),
            })?
            .validate(name, value)
    }
}
