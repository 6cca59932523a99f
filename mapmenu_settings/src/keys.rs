// Copyright 2025 the Mapmenu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Configuration key layout.
//!
//! | Key | Value |
//! |---|---|
//! | `<namespace>/<action_id>` | enabled flag (bool) |
//! | `<namespace>/show_copy_coordinates` | Copy Coordinates entry (bool) |
//! | `<namespace>/<action_id>/<setting>` | action setting, typed per schema |

/// Namespace used when the host does not pick one.
pub const DEFAULT_NAMESPACE: &str = "RightClickUtilities";

/// Name of the Copy Coordinates toggle under the namespace.
pub const SHOW_COPY_COORDINATES: &str = "show_copy_coordinates";

/// Key of an action's enabled flag.
#[must_use]
pub fn enabled_key(namespace: &str, action_id: &str) -> String {
    format!("{namespace}/{action_id}")
}

/// Key of one action setting.
#[must_use]
pub fn setting_key(namespace: &str, action_id: &str, setting: &str) -> String {
    format!("{namespace}/{action_id}/{setting}")
}

/// Key of the Copy Coordinates toggle.
#[must_use]
pub fn show_copy_coordinates_key(namespace: &str) -> String {
    format!("{namespace}/{SHOW_COPY_COORDINATES}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout() {
        assert_eq!(
            enabled_key(DEFAULT_NAMESPACE, "calculate_polygon_area"),
            "RightClickUtilities/calculate_polygon_area"
        );
        assert_eq!(setting_key("ns", "a", "decimal_places"), "ns/a/decimal_places");
        assert_eq!(
            show_copy_coordinates_key(DEFAULT_NAMESPACE),
            "RightClickUtilities/show_copy_coordinates"
        );
    }
}
