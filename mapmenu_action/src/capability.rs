// Copyright 2025 the Mapmenu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scopes, click types and menu placement.

use std::fmt;

use mapmenu_detect::ClickType;
use mapmenu_precise_hit::GeometryKind;

/// Where an action operates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Scope {
    /// On the clicked feature.
    Feature,
    /// On the whole layer of the clicked feature.
    Layer,
    /// Independently of any feature.
    Universal,
}

impl Scope {
    /// Lower-case name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Feature => "feature",
            Self::Layer => "layer",
            Self::Universal => "universal",
        }
    }

    /// The single-flag set for this scope.
    #[must_use]
    pub const fn flag(self) -> Scopes {
        match self {
            Self::Feature => Scopes::FEATURE,
            Self::Layer => Scopes::LAYER,
            Self::Universal => Scopes::UNIVERSAL,
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

bitflags::bitflags! {
    /// Set of scopes an action supports.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Scopes: u8 {
        /// See [`Scope::Feature`].
        const FEATURE   = 0b0000_0001;
        /// See [`Scope::Layer`].
        const LAYER     = 0b0000_0010;
        /// See [`Scope::Universal`].
        const UNIVERSAL = 0b0000_0100;
    }
}

bitflags::bitflags! {
    /// Set of click types an action supports.
    ///
    /// `UNIVERSAL` means "any click" and is mutually exclusive with the
    /// specific types; see [`Placement`].
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct ClickTypes: u16 {
        /// Single points.
        const POINT        = 0b0000_0000_0001;
        /// Multipoints.
        const MULTIPOINT   = 0b0000_0000_0010;
        /// Single lines.
        const LINE         = 0b0000_0000_0100;
        /// Multilines.
        const MULTILINE    = 0b0000_0000_1000;
        /// Single polygons.
        const POLYGON      = 0b0000_0001_0000;
        /// Multipolygons.
        const MULTIPOLYGON = 0b0000_0010_0000;
        /// Empty canvas.
        const CANVAS       = 0b0000_0100_0000;
        /// Any click.
        const UNIVERSAL    = 0b0000_1000_0000;

        /// Points and multipoints.
        const POINTS   = Self::POINT.bits() | Self::MULTIPOINT.bits();
        /// Lines and multilines.
        const LINES    = Self::LINE.bits() | Self::MULTILINE.bits();
        /// Polygons and multipolygons.
        const POLYGONS = Self::POLYGON.bits() | Self::MULTIPOLYGON.bits();
        /// Every geometry kind.
        const GEOMETRY = Self::POINTS.bits() | Self::LINES.bits() | Self::POLYGONS.bits();
    }
}

impl ClickTypes {
    /// The flag for one geometry kind.
    #[must_use]
    pub const fn from_kind(kind: GeometryKind) -> Self {
        match kind {
            GeometryKind::Point => Self::POINT,
            GeometryKind::MultiPoint => Self::MULTIPOINT,
            GeometryKind::Line => Self::LINE,
            GeometryKind::MultiLine => Self::MULTILINE,
            GeometryKind::Polygon => Self::POLYGON,
            GeometryKind::MultiPolygon => Self::MULTIPOLYGON,
        }
    }

    /// Returns `true` if the set names this click type exactly.
    ///
    /// A mixed click matches no specific flag.
    #[must_use]
    pub fn matches(self, click: ClickType) -> bool {
        match click {
            ClickType::Canvas => self.contains(Self::CANVAS),
            ClickType::Geometry(kind) => self.contains(Self::from_kind(kind)),
            ClickType::Mixed => false,
        }
    }

    /// Returns `true` if some specific flag is set.
    #[must_use]
    pub fn has_specific(self) -> bool {
        self.intersects(Self::GEOMETRY | Self::CANVAS)
    }
}

/// Scopes and click types declared by an action.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Capabilities {
    /// Supported scopes.
    pub scopes: Scopes,
    /// Supported click types.
    pub click_types: ClickTypes,
}

/// How an action is placed in menus and settings tabs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Placement {
    /// Offered for every click, once, outside the type-specific groups.
    Universal,
    /// Offered only for the listed click types.
    Specific(ClickTypes),
}

impl Placement {
    /// Classifies a capability set.
    #[must_use]
    pub fn of(capabilities: &Capabilities) -> Self {
        if capabilities.click_types.contains(ClickTypes::UNIVERSAL) {
            Self::Universal
        } else {
            Self::Specific(capabilities.click_types)
        }
    }

    /// Returns `true` for placements that belong in a group for `kind`.
    #[must_use]
    pub fn accepts_kind(self, kind: GeometryKind) -> bool {
        match self {
            Self::Universal => false,
            Self::Specific(types) => types.contains(ClickTypes::from_kind(kind)),
        }
    }

    /// Returns `true` for placements that belong in the canvas group.
    #[must_use]
    pub fn accepts_canvas(self) -> bool {
        match self {
            Self::Universal => false,
            Self::Specific(types) => types.contains(ClickTypes::CANVAS),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_map_to_single_flags() {
        for kind in GeometryKind::ALL {
            let flag = ClickTypes::from_kind(kind);
            assert_eq!(flag.bits().count_ones(), 1);
            assert!(ClickTypes::GEOMETRY.contains(flag));
        }
        assert!(ClickTypes::POLYGONS.matches(ClickType::Geometry(GeometryKind::MultiPolygon)));
        assert!(!ClickTypes::POLYGONS.matches(ClickType::Canvas));
        assert!(!ClickTypes::all().matches(ClickType::Mixed));
    }

    #[test]
    fn placement_keeps_universal_out_of_specific_groups() {
        let universal = Capabilities {
            scopes: Scopes::UNIVERSAL,
            click_types: ClickTypes::UNIVERSAL,
        };
        assert_eq!(Placement::of(&universal), Placement::Universal);
        assert!(!Placement::of(&universal).accepts_kind(GeometryKind::Point));
        assert!(!Placement::of(&universal).accepts_canvas());

        let canvas = Capabilities {
            scopes: Scopes::UNIVERSAL,
            click_types: ClickTypes::CANVAS,
        };
        assert!(Placement::of(&canvas).accepts_canvas());
        assert!(!Placement::of(&canvas).accepts_kind(GeometryKind::Line));
    }
}
