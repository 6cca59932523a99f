// Copyright 2025 the Mapmenu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mapmenu Settings: typed configuration for context menu actions.
//!
//! ## Core Concepts
//!
//! ### Schemas
//!
//! Each action declares a [`SettingsSchema`]: an ordered list of named
//! [`SettingDef`]s built with [`SettingDefBuilder`]. A definition carries the
//! kind (bool, int, float, str, choice, color), bounds or options, default,
//! label and description. Validation is schema-driven and always runs before
//! a value is accepted.
//!
//! ### Storage
//!
//! Values live in a flat [`ConfigStore`] keyed as described in [`keys`].
//! [`MemoryConfig`] keeps them in memory; [`JsonFileConfig`] persists them as
//! a JSON object with an explicit load (`open`) and save (`flush`).
//! The store is shared as a [`SharedConfig`] handle and injected into the
//! catalog and into each action's [`ActionSettings`].
//!
//! ## Quick Start
//!
//! ```rust
//! use std::rc::Rc;
//! use mapmenu_settings::{
//!     keys, ActionSettings, ConfigStore, MemoryConfig, SettingDefBuilder, SettingsSchema,
//! };
//!
//! let config = MemoryConfig::new().shared();
//! let schema = Rc::new(
//!     SettingsSchema::new()
//!         .with("show_scale_labels", SettingDefBuilder::bool(true).label("Show labels").build()),
//! );
//! let settings = ActionSettings::new(
//!     keys::DEFAULT_NAMESPACE,
//!     "change_map_scale",
//!     schema,
//!     config.clone(),
//! );
//!
//! settings.set("show_scale_labels", false.into()).unwrap();
//! assert!(!config
//!     .borrow()
//!     .get_bool("RightClickUtilities/change_map_scale/show_scale_labels", true));
//! ```

mod error;
pub mod keys;
mod metadata;
mod registry;
mod store;
mod value;
mod view;

pub use error::{ConfigError, SettingError};
pub use metadata::{SettingDef, SettingDefBuilder, SettingKind, ValidateFn};
pub use registry::SettingsSchema;
pub use store::{ConfigStore, JsonFileConfig, MemoryConfig, SharedConfig};
pub use value::SettingValue;
pub use view::ActionSettings;
