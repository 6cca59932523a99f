// Copyright 2025 the Mapmenu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Flat key/value configuration stores.
//!
//! [`ConfigStore`] is the seam between the catalog and actions on one side
//! and whatever persistence the host offers on the other. Values are written
//! only between clicks, so a single-threaded [`SharedConfig`] handle is enough.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt::Debug;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::error::ConfigError;
use crate::value::SettingValue;

/// Shared handle to the process-wide configuration.
pub type SharedConfig = Rc<RefCell<dyn ConfigStore>>;

/// A flat map from string keys to [`SettingValue`]s.
pub trait ConfigStore: Debug {
    /// Value stored under `key`.
    fn get(&self, key: &str) -> Option<SettingValue>;

    /// Stores `value` under `key`. Not persisted until [`ConfigStore::flush`].
    fn set(&mut self, key: &str, value: SettingValue);

    /// Removes and returns the value under `key`.
    fn remove(&mut self, key: &str) -> Option<SettingValue>;

    /// All keys, sorted.
    fn keys(&self) -> Vec<String>;

    /// Persists pending changes.
    fn flush(&mut self) -> Result<(), ConfigError> {
        Ok(())
    }

    /// Bool under `key`, or `default` when absent or not a bool.
    fn get_bool(&self, key: &str, default: bool) -> bool {
        self.get(key).and_then(|v| v.as_bool()).unwrap_or(default)
    }
}

/// In-memory store; flushing is a no-op.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MemoryConfig {
    values: BTreeMap<String, SettingValue>,
}

impl MemoryConfig {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps this store in a [`SharedConfig`].
    #[must_use]
    pub fn shared(self) -> SharedConfig {
        Rc::new(RefCell::new(self))
    }
}

impl ConfigStore for MemoryConfig {
    fn get(&self, key: &str) -> Option<SettingValue> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: SettingValue) {
        self.values.insert(key.to_owned(), value);
    }

    fn remove(&mut self, key: &str) -> Option<SettingValue> {
        self.values.remove(key)
    }

    fn keys(&self) -> Vec<String> {
        self.values.keys().cloned().collect()
    }
}

/// Store persisted as a flat JSON object in a file.
///
/// The file is read once by [`JsonFileConfig::open`] and rewritten by
/// [`ConfigStore::flush`] whenever there are unsaved changes.
#[derive(Debug)]
pub struct JsonFileConfig {
    path: PathBuf,
    values: BTreeMap<String, SettingValue>,
    dirty: bool,
}

impl JsonFileConfig {
    /// Opens the store at `path`. A missing file yields an empty store.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref().to_path_buf();
        let values = match fs::read_to_string(&path) {
            Ok(text) => parse(&path, &text)?,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no configuration file yet");
                BTreeMap::new()
            }
            Err(source) => return Err(ConfigError::Io { path, source }),
        };
        tracing::debug!(path = %path.display(), keys = values.len(), "configuration loaded");
        Ok(Self {
            path,
            values,
            dirty: false,
        })
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns `true` if there are changes not yet flushed.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Wraps this store in a [`SharedConfig`].
    #[must_use]
    pub fn shared(self) -> SharedConfig {
        Rc::new(RefCell::new(self))
    }
}

fn parse(path: &Path, text: &str) -> Result<BTreeMap<String, SettingValue>, ConfigError> {
    if text.trim().is_empty() {
        return Ok(BTreeMap::new());
    }
    let json: serde_json::Value =
        serde_json::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
    let serde_json::Value::Object(map) = json else {
        return Err(ConfigError::NotAnObject {
            path: path.to_path_buf(),
        });
    };
    let mut values = BTreeMap::new();
    for (key, raw) in map {
        match serde_json::from_value::<SettingValue>(raw) {
            Ok(v) => {
                values.insert(key, v);
            }
            Err(err) => tracing::warn!(%key, %err, "ignoring unsupported configuration value"),
        }
    }
    Ok(values)
}

impl ConfigStore for JsonFileConfig {
    fn get(&self, key: &str) -> Option<SettingValue> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: SettingValue) {
        if self.values.get(key) != Some(&value) {
            self.values.insert(key.to_owned(), value);
            self.dirty = true;
        }
    }

    fn remove(&mut self, key: &str) -> Option<SettingValue> {
        let old = self.values.remove(key);
        self.dirty |= old.is_some();
        old
    }

    fn keys(&self) -> Vec<String> {
        self.values.keys().cloned().collect()
    }

    fn flush(&mut self) -> Result<(), ConfigError> {
        if !self.dirty {
            return Ok(());
        }
        let text = serde_json::to_string_pretty(&self.values).map_err(|source| {
            ConfigError::Encode {
                path: self.path.clone(),
                source,
            }
        })?;
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|source| ConfigError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(&self.path, text).map_err(|source| ConfigError::Io {
            path: self.path.clone(),
            source,
        })?;
        self.dirty = false;
        tracing::debug!(
            path = %self.path.display(),
            keys = self.values.len(),
            "configuration flushed"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_basics() {
        let mut cfg = MemoryConfig::new();
        cfg.set("ns/a", true.into());
        cfg.set("ns/b", 3_i64.into());
        assert!(cfg.get_bool("ns/a", false));
        assert!(cfg.get_bool("ns/b", true));
        assert!(!cfg.get_bool("ns/missing", false));
        assert_eq!(cfg.keys(), ["ns/a", "ns/b"]);
        assert_eq!(cfg.remove("ns/a"), Some(SettingValue::Bool(true)));
        assert!(cfg.flush().is_ok());
    }

    #[test]
    fn json_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let mut cfg = JsonFileConfig::open(&path).unwrap();
        assert!(cfg.keys().is_empty());
        cfg.set("RightClickUtilities/calculate_line_length", false.into());
        cfg.set("RightClickUtilities/calculate_line_length/decimal_places", 4_i64.into());
        assert!(cfg.is_dirty());
        cfg.flush().unwrap();
        assert!(!cfg.is_dirty());

        let reopened = JsonFileConfig::open(&path).unwrap();
        assert!(!reopened.get_bool("RightClickUtilities/calculate_line_length", true));
        assert_eq!(
            reopened.get("RightClickUtilities/calculate_line_length/decimal_places"),
            Some(SettingValue::Int(4))
        );
    }

    #[test]
    fn json_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let bad = dir.path().join("bad.json");
        fs::write(&bad, "{ not json").unwrap();
        assert!(matches!(
            JsonFileConfig::open(&bad),
            Err(ConfigError::Parse { .. })
        ));

        let array = dir.path().join("array.json");
        fs::write(&array, "[1, 2]").unwrap();
        assert!(matches!(
            JsonFileConfig::open(&array),
            Err(ConfigError::NotAnObject { .. })
        ));

        let mixed = dir.path().join("mixed.json");
        fs::write(&mixed, r#"{"a": true, "b": [1], "c": null}"#).unwrap();
        let cfg = JsonFileConfig::open(&mixed).unwrap();
        assert_eq!(cfg.keys(), ["a"]);
    }
}
