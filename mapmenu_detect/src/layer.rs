// Copyright 2025 the Mapmenu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Features and vector layers.

use std::cell::OnceCell;
use std::collections::BTreeMap;
use std::fmt::{self, Debug};

use mapmenu_crs::Crs;
use mapmenu_precise_hit::{Geometry, GeometryClass};

use crate::spatial::FeatureIndex;

/// Identifier of a feature, unique within its layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FeatureId(pub i64);

impl fmt::Display for FeatureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a layer, unique within a [`LayerTree`](crate::LayerTree).
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LayerId(String);

impl LayerId {
    /// Creates an id from any string.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LayerId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// A map feature: an id, an optional geometry in its layer's CRS, and attributes.
#[derive(Clone, Debug, PartialEq)]
pub struct Feature {
    /// Identifier within the layer.
    pub id: FeatureId,
    /// Geometry in layer coordinates; features without one are never detected.
    pub geometry: Option<Geometry>,
    /// Attribute values by field name.
    pub attributes: BTreeMap<String, String>,
}

impl Feature {
    /// A feature with a geometry and no attributes.
    #[must_use]
    pub fn new(id: i64, geometry: Geometry) -> Self {
        Self {
            id: FeatureId(id),
            geometry: Some(geometry),
            attributes: BTreeMap::new(),
        }
    }

    /// A feature without geometry.
    #[must_use]
    pub fn without_geometry(id: i64) -> Self {
        Self {
            id: FeatureId(id),
            geometry: None,
            attributes: BTreeMap::new(),
        }
    }

    /// Adds an attribute.
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Attribute value by field name.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }
}

/// A vector layer as seen by the detector.
///
/// Implementations must keep `features()` stable between calls for as long
/// as they are borrowed; detected features borrow straight from it.
pub trait VectorLayer: Debug {
    /// Stable layer id.
    fn id(&self) -> &LayerId;

    /// Display name.
    fn name(&self) -> &str;

    /// CRS of the feature geometries.
    fn crs(&self) -> &Crs;

    /// Whether the layer's data source is usable.
    fn is_valid(&self) -> bool {
        true
    }

    /// Declared geometry class, or `None` when unknown or mixed.
    fn geometry_class(&self) -> Option<GeometryClass>;

    /// All features in layer order.
    fn features(&self) -> &[Feature];

    /// Number of features.
    fn feature_count(&self) -> usize {
        self.features().len()
    }

    /// Feature by id.
    fn feature(&self, id: FeatureId) -> Option<&Feature> {
        self.features().iter().find(|f| f.id == id)
    }

    /// A prebuilt spatial index over [`VectorLayer::features`], if the layer keeps one.
    ///
    /// The detector builds a temporary index when this returns `None`.
    fn spatial_index(&self) -> Option<&FeatureIndex> {
        None
    }
}

/// In-memory vector layer with a lazily built spatial index.
///
/// The index and the geometry class are computed on first use and dropped
/// whenever the feature list changes.
pub struct MemoryLayer {
    id: LayerId,
    name: String,
    crs: Crs,
    valid: bool,
    features: Vec<Feature>,
    index: OnceCell<Option<FeatureIndex>>,
    class: OnceCell<Option<GeometryClass>>,
}

impl MemoryLayer {
    /// An empty, valid layer.
    #[must_use]
    pub fn new(id: impl Into<LayerId>, name: impl Into<String>, crs: Crs) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            crs,
            valid: true,
            features: Vec::new(),
            index: OnceCell::new(),
            class: OnceCell::new(),
        }
    }

    /// Builder-style [`MemoryLayer::push`].
    #[must_use]
    pub fn with_feature(mut self, feature: Feature) -> Self {
        self.push(feature);
        self
    }

    /// Builder-style [`MemoryLayer::set_valid`].
    #[must_use]
    pub fn with_valid(mut self, valid: bool) -> Self {
        self.set_valid(valid);
        self
    }

    /// Appends a feature.
    pub fn push(&mut self, feature: Feature) {
        self.features.push(feature);
        self.invalidate();
    }

    /// Appends every feature from `features`.
    pub fn extend(&mut self, features: impl IntoIterator<Item = Feature>) {
        self.features.extend(features);
        self.invalidate();
    }

    /// Removes and returns the feature with `id`.
    pub fn remove(&mut self, id: FeatureId) -> Option<Feature> {
        let pos = self.features.iter().position(|f| f.id == id)?;
        self.invalidate();
        Some(self.features.remove(pos))
    }

    /// Marks the data source as usable or broken.
    pub fn set_valid(&mut self, valid: bool) {
        self.valid = valid;
    }

    fn invalidate(&mut self) {
        self.index = OnceCell::new();
        self.class = OnceCell::new();
    }
}

impl Debug for MemoryLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryLayer")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("crs", &self.crs)
            .field("valid", &self.valid)
            .field("features", &self.features.len())
            .field("indexed", &self.index.get().is_some_and(Option::is_some))
            .finish()
    }
}

impl VectorLayer for MemoryLayer {
    fn id(&self) -> &LayerId {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn crs(&self) -> &Crs {
        &self.crs
    }

    fn is_valid(&self) -> bool {
        self.valid
    }

    fn geometry_class(&self) -> Option<GeometryClass> {
        *self.class.get_or_init(|| {
            let mut classes = self
                .features
                .iter()
                .filter_map(|f| f.geometry.as_ref())
                .map(|g| g.kind().class());
            let first = classes.next()?;
            classes.all(|c| c == first).then_some(first)
        })
    }

    fn features(&self) -> &[Feature] {
        &self.features
    }

    fn spatial_index(&self) -> Option<&FeatureIndex> {
        self.index
            .get_or_init(|| FeatureIndex::build(&self.features))
            .as_ref()
    }
}
