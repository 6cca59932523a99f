// Copyright 2025 the Mapmenu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-action view over the shared configuration.

use std::fmt;
use std::rc::Rc;

use crate::error::SettingError;
use crate::keys::setting_key;
use crate::registry::SettingsSchema;
use crate::store::SharedConfig;
use crate::value::SettingValue;

/// Settings of one action: its schema bound to the shared configuration.
///
/// Reads fall back to the schema default when nothing valid is stored.
/// Writes are validated first and rejected without touching the store.
///
/// # Example
///
/// ```rust
/// use std::rc::Rc;
/// use mapmenu_settings::{
///     ActionSettings, MemoryConfig, SettingDefBuilder, SettingValue, SettingsSchema,
/// };
///
/// let schema = Rc::new(
///     SettingsSchema::new()
///         .with("decimal_places", SettingDefBuilder::int(2).range(0, 10).build()),
/// );
/// let config = MemoryConfig::new().shared();
/// let settings =
///     ActionSettings::new("RightClickUtilities", "calculate_line_length", schema, config);
///
/// assert_eq!(settings.get_int("decimal_places", 0), 2);
/// settings.set("decimal_places", SettingValue::Int(5)).unwrap();
/// assert_eq!(settings.get_int("decimal_places", 0), 5);
/// assert!(settings.set("decimal_places", SettingValue::Int(50)).is_err());
/// assert_eq!(settings.get_int("decimal_places", 0), 5);
/// ```
#[derive(Clone)]
pub struct ActionSettings {
    namespace: String,
    action_id: String,
    schema: Rc<SettingsSchema>,
    config: SharedConfig,
}

impl ActionSettings {
    /// Binds `schema` for `action_id` to `config` under `namespace`.
    #[must_use]
    pub fn new(
        namespace: &str,
        action_id: &str,
        schema: Rc<SettingsSchema>,
        config: SharedConfig,
    ) -> Self {
        Self {
            namespace: namespace.to_owned(),
            action_id: action_id.to_owned(),
            schema,
            config,
        }
    }

    /// Id of the action these settings belong to.
    #[must_use]
    pub fn action_id(&self) -> &str {
        &self.action_id
    }

    /// The settings schema.
    #[must_use]
    pub fn schema(&self) -> &SettingsSchema {
        &self.schema
    }

    /// Current value of a setting; `None` for settings not in the schema.
    ///
    /// A stored value that no longer validates is ignored in favor of the default.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<SettingValue> {
        let def = self.schema.get(name)?;
        let key = setting_key(&self.namespace, &self.action_id, name);
        let stored = self.config.borrow().get(&key);
        match stored.map(|v| def.validate(name, &v)) {
            Some(Ok(v)) => Some(v),
            Some(Err(err)) => {
                tracing::warn!(
                    action = %self.action_id,
                    setting = name,
                    %err,
                    "stored setting invalid; using default"
                );
                Some(def.default_value().clone())
            }
            None => Some(def.default_value().clone()),
        }
    }

    /// Bool setting, or `fallback` if unknown or not a bool.
    #[must_use]
    pub fn get_bool(&self, name: &str, fallback: bool) -> bool {
        self.get(name).and_then(|v| v.as_bool()).unwrap_or(fallback)
    }

    /// Int setting, or `fallback` if unknown or not an int.
    #[must_use]
    pub fn get_int(&self, name: &str, fallback: i64) -> i64 {
        self.get(name).and_then(|v| v.as_int()).unwrap_or(fallback)
    }

    /// Float setting, or `fallback` if unknown or not numeric.
    #[must_use]
    pub fn get_float(&self, name: &str, fallback: f64) -> f64 {
        self.get(name).and_then(|v| v.as_float()).unwrap_or(fallback)
    }

    /// String setting, or `fallback` if unknown or not a string.
    #[must_use]
    pub fn get_str(&self, name: &str, fallback: &str) -> String {
        match self.get(name) {
            Some(SettingValue::Str(s)) => s,
            _ => fallback.to_owned(),
        }
    }

    /// Checks a value without storing it.
    pub fn validate(&self, name: &str, value: &SettingValue) -> Result<SettingValue, SettingError> {
        self.schema.validate(name, value)
    }

    /// Validates and stores a value, then flushes the configuration.
    pub fn set(&self, name: &str, value: SettingValue) -> Result<(), SettingError> {
        let accepted = self.validate(name, &value)?;
        let key = setting_key(&self.namespace, &self.action_id, name);
        let mut config = self.config.borrow_mut();
        config.set(&key, accepted);
        config.flush()?;
        Ok(())
    }

    /// Stores every schema default, then flushes.
    pub fn reset_to_defaults(&self) -> Result<(), SettingError> {
        let mut config = self.config.borrow_mut();
        for (name, def) in self.schema.iter() {
            let key = setting_key(&self.namespace, &self.action_id, name);
            config.set(&key, def.default_value().clone());
        }
        config.flush()?;
        Ok(())
    }

    /// Every schema setting with its current value, in schema order.
    #[must_use]
    pub fn all(&self) -> Vec<(String, SettingValue)> {
        self.schema
            .names()
            .filter_map(|name| Some((name.to_owned(), self.get(name)?)))
            .collect()
    }
}

impl fmt::Debug for ActionSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionSettings")
            .field("namespace", &self.namespace)
            .field("action_id", &self.action_id)
            .field("settings", &self.schema.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ConfigStore, MemoryConfig, SettingDefBuilder};

    fn schema() -> Rc<SettingsSchema> {
        Rc::new(
            SettingsSchema::new()
                .with("decimal_places", SettingDefBuilder::int(2).range(0, 10).build())
                .with("unit", SettingDefBuilder::choice("m", &["m", "km"]).build())
                .with("copy_to_clipboard", SettingDefBuilder::bool(false).build()),
        )
    }

    #[test]
    fn rejected_values_leave_store_untouched() {
        let config = MemoryConfig::new().shared();
        let s = ActionSettings::new("ns", "act", schema(), config.clone());
        assert!(s.set("unit", "ft".into()).is_err());
        assert!(s.set("missing", true.into()).is_err());
        assert!(config.borrow().keys().is_empty());

        s.set("unit", "km".into()).unwrap();
        assert_eq!(config.borrow().get("ns/act/unit"), Some(SettingValue::from("km")));
    }

    #[test]
    fn corrupt_stored_value_falls_back_to_default() {
        let config = MemoryConfig::new().shared();
        config.borrow_mut().set("ns/act/decimal_places", "lots".into());
        let s = ActionSettings::new("ns", "act", schema(), config);
        assert_eq!(s.get("decimal_places"), Some(SettingValue::Int(2)));
        assert_eq!(s.get("nope"), None);
        assert_eq!(s.get_str("nope", "x"), "x");
    }

    #[test]
    fn reset_and_all() {
        let config = MemoryConfig::new().shared();
        let s = ActionSettings::new("ns", "act", schema(), config);
        s.set("decimal_places", 7_i64.into()).unwrap();
        s.set("copy_to_clipboard", true.into()).unwrap();
        s.reset_to_defaults().unwrap();
        assert_eq!(
            s.all(),
            vec![
                ("decimal_places".to_owned(), SettingValue::Int(2)),
                ("unit".to_owned(), SettingValue::from("m")),
                ("copy_to_clipboard".to_owned(), SettingValue::Bool(false)),
            ]
        );
        assert!(!s.get_bool("copy_to_clipboard", true));
        assert_eq!(s.get_float("decimal_places", 0.0), 2.0);
    }
}
