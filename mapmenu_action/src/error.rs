// Copyright 2025 the Mapmenu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use mapmenu_crs::TransformError;
use mapmenu_precise_hit::GeometryKind;
use mapmenu_settings::SettingError;

use crate::capability::Scope;

/// An action declares an unusable identity or capability set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigurationError {
    /// The id is empty.
    #[error("action id is required")]
    MissingId,
    /// The display name is empty.
    #[error("action `{id}`: name is required")]
    MissingName {
        /// Offending action.
        id: String,
    },
    /// No scope is declared.
    #[error("action `{id}`: at least one supported scope must be declared")]
    NoScopes {
        /// Offending action.
        id: String,
    },
    /// No click type is declared.
    #[error("action `{id}`: at least one supported click type must be declared")]
    NoClickTypes {
        /// Offending action.
        id: String,
    },
    /// The primary scope is not among the supported scopes.
    #[error("action `{id}`: primary scope `{scope}` is not among its supported scopes")]
    ScopeNotSupported {
        /// Offending action.
        id: String,
        /// The primary scope.
        scope: Scope,
    },
    /// The universal click type is combined with specific ones.
    #[error("action `{id}`: the universal click type cannot be combined with specific click types")]
    UniversalWithSpecific {
        /// Offending action.
        id: String,
    },
    /// Another action already uses the id.
    #[error("action `{id}` is registered more than once")]
    DuplicateId {
        /// Offending action.
        id: String,
    },
}

/// Failure while executing an action.
#[derive(Debug, thiserror::Error)]
pub enum ActionError {
    /// The action needs a clicked feature and the context has none.
    #[error("no feature was selected")]
    NoFeature,
    /// The action needs a layer and the context has none.
    #[error("no layer was selected")]
    NoLayer,
    /// The feature has no usable geometry.
    #[error("feature {feature} has no usable geometry")]
    MissingGeometry {
        /// Feature id.
        feature: i64,
    },
    /// The geometry is of a kind the action cannot handle.
    #[error("{kind} geometries are not supported by this action")]
    UnsupportedGeometry {
        /// Kind found.
        kind: GeometryKind,
    },
    /// Reading a setting failed.
    #[error(transparent)]
    Setting(#[from] SettingError),
    /// A coordinate transform failed.
    #[error(transparent)]
    Transform(#[from] TransformError),
    /// The host rejected a request.
    #[error("host request failed: {0}")]
    Host(String),
    /// Any other failure, with a message for the user.
    #[error("{0}")]
    Failed(String),
}
