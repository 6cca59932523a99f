// Copyright 2025 the Mapmenu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mapmenu Action: the contract between context menus and the actions they offer.
//!
//! An [`Action`] declares an [`ActionMeta`]: id, label, category, a primary
//! [`Scope`] and its [`Capabilities`] (supported [`Scopes`] and
//! [`ClickTypes`]). Menus and settings screens never inspect the raw flags;
//! they ask [`Placement::of`], which sorts every action into exactly one of
//! "universal" or "specific to these click types".
//!
//! Declarations are checked with [`validate_action_configuration`]. The
//! universal click type combined with any specific click type is rejected.
//!
//! When a menu entry is chosen the action receives an [`ActionContext`] bound
//! to that entry (the clicked feature and its layer for feature entries, the
//! whole click otherwise), its [`ActionSettings`], and through the context a
//! [`HostServices`] handle for notifications, the clipboard and map scale.
//!
//! ```
//! use mapmenu_action::{ActionMeta, ClickTypes, Placement, Scope, validate_action_configuration};
//!
//! let meta = ActionMeta::new("calculate_line_length", "Calculate Line Length", Scope::Feature)
//!     .category("Analysis")
//!     .click_types(ClickTypes::LINES);
//! assert!(validate_action_configuration(&meta).is_ok());
//! assert_eq!(meta.placement(), Placement::Specific(ClickTypes::LINES));
//!
//! let bad = meta.clone().click_types(ClickTypes::UNIVERSAL | ClickTypes::LINE);
//! assert!(validate_action_configuration(&bad).is_err());
//! ```

mod action;
mod capability;
mod context;
mod error;
mod meta;
mod services;

pub use action::Action;
pub use capability::{Capabilities, ClickTypes, Placement, Scope, Scopes};
pub use context::{ActionContext, ActionEnv};
pub use error::{ActionError, ConfigurationError};
pub use meta::{ActionMeta, DEFAULT_CATEGORY, validate_action_configuration};
pub use services::{HostServices, Notification, RecordingServices, Severity};

pub use mapmenu_settings::ActionSettings;
