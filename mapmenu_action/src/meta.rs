// Copyright 2025 the Mapmenu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Action identity and its configuration check.

use crate::capability::{Capabilities, ClickTypes, Placement, Scope, Scopes};
use crate::error::ConfigurationError;

/// Category used when an action declares none.
pub const DEFAULT_CATEGORY: &str = "Other";

/// Identity, capabilities and defaults of an action.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActionMeta {
    /// Unique, stable id; also the persisted config key suffix.
    pub id: String,
    /// Label shown in menus.
    pub name: String,
    /// Grouping category; `None` groups under [`DEFAULT_CATEGORY`].
    pub category: Option<String>,
    /// One-line description.
    pub description: String,
    /// Enabled flag used when nothing is persisted.
    pub default_enabled: bool,
    /// Primary scope.
    pub action_scope: Scope,
    /// Supported scopes and click types.
    pub capabilities: Capabilities,
}

impl ActionMeta {
    /// An enabled-by-default action supporting only `scope` and no click type yet.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, scope: Scope) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category: None,
            description: String::new(),
            default_enabled: true,
            action_scope: scope,
            capabilities: Capabilities {
                scopes: scope.flag(),
                click_types: ClickTypes::empty(),
            },
        }
    }

    /// Sets the category.
    #[must_use]
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Replaces the supported scopes.
    #[must_use]
    pub fn scopes(mut self, scopes: Scopes) -> Self {
        self.capabilities.scopes = scopes;
        self
    }

    /// Replaces the supported click types.
    #[must_use]
    pub fn click_types(mut self, click_types: ClickTypes) -> Self {
        self.capabilities.click_types = click_types;
        self
    }

    /// Sets the default enabled flag.
    #[must_use]
    pub fn enabled_by_default(mut self, enabled: bool) -> Self {
        self.default_enabled = enabled;
        self
    }

    /// Category name, falling back to [`DEFAULT_CATEGORY`].
    #[must_use]
    pub fn category_name(&self) -> &str {
        self.category
            .as_deref()
            .filter(|c| !c.is_empty())
            .unwrap_or(DEFAULT_CATEGORY)
    }

    /// Menu and settings-tab placement.
    #[must_use]
    pub fn placement(&self) -> Placement {
        Placement::of(&self.capabilities)
    }
}

/// Checks that an action's declaration is usable.
pub fn validate_action_configuration(meta: &ActionMeta) -> Result<(), ConfigurationError> {
    if meta.id.trim().is_empty() {
        return Err(ConfigurationError::MissingId);
    }
    let id = || meta.id.clone();
    if meta.name.trim().is_empty() {
        return Err(ConfigurationError::MissingName { id: id() });
    }
    let caps = &meta.capabilities;
    if caps.scopes.is_empty() {
        return Err(ConfigurationError::NoScopes { id: id() });
    }
    if !caps.scopes.contains(meta.action_scope.flag()) {
        return Err(ConfigurationError::ScopeNotSupported {
            id: id(),
            scope: meta.action_scope,
        });
    }
    if caps.click_types.is_empty() {
        return Err(ConfigurationError::NoClickTypes { id: id() });
    }
    if caps.click_types.contains(ClickTypes::UNIVERSAL) && caps.click_types.has_specific() {
        return Err(ConfigurationError::UniversalWithSpecific { id: id() });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> ActionMeta {
        ActionMeta::new("measure", "Measure", Scope::Feature).click_types(ClickTypes::LINES)
    }

    #[test]
    fn well_formed_action_passes() {
        assert_eq!(validate_action_configuration(&valid()), Ok(()));
        assert_eq!(valid().category_name(), DEFAULT_CATEGORY);
        assert_eq!(valid().category("Analysis").category_name(), "Analysis");
    }

    #[test]
    fn each_defect_is_reported() {
        let cases = [
            (ActionMeta { id: " ".into(), ..valid() }, ConfigurationError::MissingId),
            (
                ActionMeta { name: String::new(), ..valid() },
                ConfigurationError::MissingName { id: "measure".into() },
            ),
            (
                valid().scopes(Scopes::empty()),
                ConfigurationError::NoScopes { id: "measure".into() },
            ),
            (
                valid().scopes(Scopes::LAYER),
                ConfigurationError::ScopeNotSupported {
                    id: "measure".into(),
                    scope: Scope::Feature,
                },
            ),
            (
                valid().click_types(ClickTypes::empty()),
                ConfigurationError::NoClickTypes { id: "measure".into() },
            ),
            (
                valid().click_types(ClickTypes::UNIVERSAL | ClickTypes::POINT),
                ConfigurationError::UniversalWithSpecific { id: "measure".into() },
            ),
        ];
        for (meta, expected) in cases {
            assert_eq!(validate_action_configuration(&meta), Err(expected));
        }
    }
}
