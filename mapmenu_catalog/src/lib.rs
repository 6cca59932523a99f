// Copyright 2025 the Mapmenu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mapmenu Catalog: the set of context menu actions and their enabled flags.
//!
//! An [`ActionCatalog`] is loaded from a fixed list of [`Registration`]s.
//! Each action's declaration is validated; misconfigured or duplicate
//! actions are skipped with a warning and listed in
//! [`ActionCatalog::load_report`]. Enabled flags live in the injected
//! configuration store under `"<namespace>/<action_id>"` and fall back to the
//! action's default when nothing is stored.
//!
//! The catalog also answers the questions of a settings screen: which
//! actions belong on each [`SettingsTab`], how many of them are enabled, and
//! the [`ActionSettings`](mapmenu_action::ActionSettings) view of an action.
//!
//! ```
//! use mapmenu_action::{
//!     Action, ActionContext, ActionError, ActionMeta, ActionSettings, ClickTypes, Scope,
//! };
//! use mapmenu_catalog::{ActionCatalog, Registration, SettingsTab};
//! use mapmenu_settings::MemoryConfig;
//!
//! #[derive(Debug)]
//! struct Hello(ActionMeta);
//!
//! impl Action for Hello {
//!     fn meta(&self) -> &ActionMeta {
//!         &self.0
//!     }
//!     fn execute(&self, _: &ActionContext<'_>, _: &ActionSettings) -> Result<(), ActionError> {
//!         Ok(())
//!     }
//! }
//!
//! fn hello() -> Box<dyn Action> {
//!     Box::new(Hello(
//!         ActionMeta::new("hello", "Hello", Scope::Universal).click_types(ClickTypes::UNIVERSAL),
//!     ))
//! }
//!
//! const ACTIONS: &[Registration] = &[hello];
//!
//! let mut catalog = ActionCatalog::load(ACTIONS, MemoryConfig::new().shared());
//! assert!(catalog.is_enabled("hello"));
//! assert_eq!(catalog.tab_counts(SettingsTab::Universal).to_string(), "1/1");
//!
//! assert!(catalog.set_action_enabled("hello", false));
//! assert_eq!(catalog.get_enabled_actions().count(), 0);
//! assert!(!catalog.set_action_enabled("missing", true));
//! ```

mod catalog;
mod tabs;

pub use catalog::{ActionCatalog, Registration, SkippedAction};
pub use tabs::{SettingsTab, TabCounts};
