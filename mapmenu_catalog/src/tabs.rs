// Copyright 2025 the Mapmenu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Settings-screen grouping of actions.

use std::fmt;

use mapmenu_action::{ClickTypes, Placement};

/// A tab of the action settings screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SettingsTab {
    /// Every action.
    All,
    /// Actions for points and multipoints.
    Point,
    /// Actions for lines and multilines.
    Line,
    /// Actions for polygons and multipolygons.
    Polygon,
    /// Actions for clicks on empty canvas.
    Canvas,
    /// Actions offered for any click.
    Universal,
}

impl SettingsTab {
    /// Every tab in display order.
    pub const ALL: [Self; 6] = [
        Self::All,
        Self::Point,
        Self::Line,
        Self::Polygon,
        Self::Canvas,
        Self::Universal,
    ];

    /// Display title.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Point => "Point",
            Self::Line => "Line",
            Self::Polygon => "Polygon",
            Self::Canvas => "Canvas",
            Self::Universal => "Universal",
        }
    }

    /// Returns `true` if an action with this placement is listed on the tab.
    ///
    /// Universal actions are listed only on the universal tab (and under "All").
    #[must_use]
    pub fn lists(self, placement: Placement) -> bool {
        let wanted = match self {
            Self::All => return true,
            Self::Universal => return placement == Placement::Universal,
            Self::Point => ClickTypes::POINTS,
            Self::Line => ClickTypes::LINES,
            Self::Polygon => ClickTypes::POLYGONS,
            Self::Canvas => ClickTypes::CANVAS,
        };
        matches!(placement, Placement::Specific(types) if types.intersects(wanted))
    }
}

impl fmt::Display for SettingsTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Enabled and total action counts for a tab.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct TabCounts {
    /// Actions on the tab that are enabled.
    pub enabled: usize,
    /// Actions on the tab.
    pub total: usize,
}

impl fmt::Display for TabCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.enabled, self.total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multipart_kinds_fold_into_base_tabs() {
        let multi = Placement::Specific(ClickTypes::MULTIPOLYGON);
        assert!(SettingsTab::Polygon.lists(multi));
        assert!(!SettingsTab::Line.lists(multi));
        assert!(!SettingsTab::Universal.lists(multi));
        assert!(SettingsTab::All.lists(multi));
    }

    #[test]
    fn universal_stays_on_its_tab() {
        for tab in SettingsTab::ALL {
            let expected = matches!(tab, SettingsTab::All | SettingsTab::Universal);
            assert_eq!(tab.lists(Placement::Universal), expected, "{tab}");
        }
    }
}
