// Copyright 2025 the Mapmenu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::io;
use std::path::PathBuf;

/// A setting value was rejected.
///
/// Rejection never mutates stored configuration.
#[derive(Debug, thiserror::Error)]
pub enum SettingError {
    /// The schema has no setting with this name.
    #[error("unknown setting: {name}")]
    UnknownSetting {
        /// Setting name.
        name: String,
    },
    /// The value has the wrong type.
    #[error("setting {name} must be a valid {expected}, got {found}")]
    TypeMismatch {
        /// Setting name.
        name: String,
        /// Expected type.
        expected: &'static str,
        /// Type of the rejected value.
        found: &'static str,
    },
    /// The value is below the schema minimum.
    #[error("setting {name} must be at least {min}")]
    BelowMinimum {
        /// Setting name.
        name: String,
        /// Lower bound.
        min: f64,
    },
    /// The value is above the schema maximum.
    #[error("setting {name} must be at most {max}")]
    AboveMaximum {
        /// Setting name.
        name: String,
        /// Upper bound.
        max: f64,
    },
    /// The value is not one of the allowed options.
    #[error("setting {name} must be one of: {}", options.join(", "))]
    NotAnOption {
        /// Setting name.
        name: String,
        /// Allowed options.
        options: Vec<String>,
    },
    /// A setting-specific check failed.
    #[error("setting {name} rejected: {reason}")]
    Rejected {
        /// Setting name.
        name: String,
        /// Why the value was rejected.
        reason: String,
    },
    /// The value was valid but could not be persisted.
    #[error(transparent)]
    Persist(#[from] ConfigError),
}

/// Loading or flushing persisted configuration failed.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Reading or writing the file failed.
    #[error("configuration file {path}: {source}")]
    Io {
        /// File path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: io::Error,
    },
    /// The file is not valid JSON.
    #[error("configuration file {path} is not valid JSON: {source}")]
    Parse {
        /// File path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: serde_json::Error,
    },
    /// The values could not be encoded as JSON.
    #[error("could not encode configuration for {path}: {source}")]
    Encode {
        /// File path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: serde_json::Error,
    },
    /// The file is JSON but not a flat object.
    #[error("configuration file {path} must contain a JSON object")]
    NotAnObject {
        /// File path.
        path: PathBuf,
    },
}
