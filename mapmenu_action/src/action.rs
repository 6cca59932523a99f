// Copyright 2025 the Mapmenu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::fmt::Debug;

use mapmenu_detect::ClickType;
use mapmenu_precise_hit::GeometryKind;
use mapmenu_settings::{ActionSettings, SettingsSchema};

use crate::capability::{ClickTypes, Placement, Scope};
use crate::context::ActionContext;
use crate::error::ActionError;
use crate::meta::ActionMeta;

/// A context menu action.
///
/// Implementors provide [`Action::meta`] and [`Action::execute`]; the
/// availability predicates derive from the declared capabilities.
pub trait Action: Debug {
    /// Identity and capabilities.
    fn meta(&self) -> &ActionMeta;

    /// Settings the action reads; empty by default.
    fn settings_schema(&self) -> SettingsSchema {
        SettingsSchema::new()
    }

    /// Runs the action for one menu entry.
    fn execute(
        &self,
        context: &ActionContext<'_>,
        settings: &ActionSettings,
    ) -> Result<(), ActionError>;

    /// Stable id.
    fn id(&self) -> &str {
        &self.meta().id
    }

    /// Menu label.
    fn name(&self) -> &str {
        &self.meta().name
    }

    /// Returns `true` if the action may be offered for this click type.
    fn is_available_for(&self, click_type: ClickType) -> bool {
        let types = self.meta().capabilities.click_types;
        types.contains(ClickTypes::UNIVERSAL) || types.matches(click_type)
    }

    /// [`Action::is_available_for`] the context's click type.
    fn is_available_for_context(&self, context: &ActionContext<'_>) -> bool {
        self.is_available_for(context.click_type)
    }

    /// Returns `true` if `scope` is among the supported scopes.
    fn supports_scope(&self, scope: Scope) -> bool {
        self.meta().capabilities.scopes.contains(scope.flag())
    }

    /// Returns `true` if every flag in `click_types` is supported.
    fn supports_click_type(&self, click_types: ClickTypes) -> bool {
        !click_types.is_empty() && self.meta().capabilities.click_types.contains(click_types)
    }

    /// Returns `true` if the action declares this geometry kind.
    fn supports_geometry_type(&self, kind: GeometryKind) -> bool {
        self.supports_click_type(ClickTypes::from_kind(kind))
    }

    /// Menu and settings-tab placement.
    fn placement(&self) -> Placement {
        self.meta().placement()
    }
}
