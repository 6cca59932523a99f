// Copyright 2025 the Mapmenu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::fmt;

/// A coordinate reference system, identified by its authority id (`"EPSG:4326"`).
///
/// Ids compare case-insensitively and ignore surrounding whitespace.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Crs {
    authid: String,
}

impl Crs {
    /// Authority id of WGS 84 geographic coordinates.
    pub const WGS84_AUTHID: &'static str = "EPSG:4326";
    /// Authority id of the spherical Web Mercator projection.
    pub const WEB_MERCATOR_AUTHID: &'static str = "EPSG:3857";

    /// Creates a CRS from an authority id.
    #[must_use]
    pub fn new(authid: impl Into<String>) -> Self {
        Self {
            authid: authid.into().trim().to_ascii_uppercase(),
        }
    }

    /// WGS 84 longitude/latitude in degrees.
    #[must_use]
    pub fn wgs84() -> Self {
        Self::new(Self::WGS84_AUTHID)
    }

    /// Spherical Web Mercator in meters.
    #[must_use]
    pub fn web_mercator() -> Self {
        Self::new(Self::WEB_MERCATOR_AUTHID)
    }

    /// Normalized authority id.
    #[must_use]
    pub fn authid(&self) -> &str {
        &self.authid
    }

    /// Returns `true` if the id is empty.
    #[must_use]
    pub fn is_unknown(&self) -> bool {
        self.authid.is_empty()
    }

    /// Returns `true` for CRSs whose units are degrees.
    #[must_use]
    pub fn is_geographic(&self) -> bool {
        self.authid == Self::WGS84_AUTHID
    }

    /// Human-readable unit name.
    #[must_use]
    pub fn unit_name(&self) -> &'static str {
        if self.is_geographic() {
            "degrees"
        } else {
            "meters"
        }
    }
}

impl fmt::Display for Crs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.authid.is_empty() {
            f.write_str("unknown CRS")
        } else {
            f.write_str(&self.authid)
        }
    }
}

impl From<&str> for Crs {
    fn from(authid: &str) -> Self {
        Self::new(authid)
    }
}
