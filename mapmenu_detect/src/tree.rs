// Copyright 2025 the Mapmenu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Registered layers and their visibility.

use crate::layer::{LayerId, VectorLayer};

#[derive(Debug)]
struct LayerNode {
    layer: Box<dyn VectorLayer>,
    visible: bool,
}

/// Ordered registry of vector layers with a visibility flag per layer.
///
/// Registration order is the order in which the detector visits layers.
#[derive(Debug, Default)]
pub struct LayerTree {
    nodes: Vec<LayerNode>,
}

impl LayerTree {
    /// An empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a visible layer and returns its id.
    ///
    /// A layer with the same id is replaced in place, keeping its position
    /// and visibility.
    pub fn register(&mut self, layer: impl VectorLayer + 'static) -> LayerId {
        let id = layer.id().clone();
        let layer: Box<dyn VectorLayer> = Box::new(layer);
        if let Some(node) = self.nodes.iter_mut().find(|n| *n.layer.id() == id) {
            tracing::debug!(layer = %id, "replacing registered layer");
            node.layer = layer;
        } else {
            self.nodes.push(LayerNode {
                layer,
                visible: true,
            });
        }
        id
    }

    /// Unregisters a layer.
    pub fn remove(&mut self, id: &LayerId) -> Option<Box<dyn VectorLayer>> {
        let pos = self.nodes.iter().position(|n| n.layer.id() == id)?;
        Some(self.nodes.remove(pos).layer)
    }

    /// Shows or hides a layer. Returns `false` for unknown ids.
    pub fn set_visible(&mut self, id: &LayerId, visible: bool) -> bool {
        match self.nodes.iter_mut().find(|n| n.layer.id() == id) {
            Some(node) => {
                node.visible = visible;
                true
            }
            None => false,
        }
    }

    /// Visibility of a layer; unknown ids are not visible.
    #[must_use]
    pub fn is_visible(&self, id: &LayerId) -> bool {
        self.nodes
            .iter()
            .any(|n| n.visible && n.layer.id() == id)
    }

    /// Layer by id.
    #[must_use]
    pub fn layer(&self, id: &LayerId) -> Option<&dyn VectorLayer> {
        self.nodes
            .iter()
            .find(|n| n.layer.id() == id)
            .map(|n| n.layer.as_ref())
    }

    /// Every layer with its visibility, in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&dyn VectorLayer, bool)> + '_ {
        self.nodes.iter().map(|n| (n.layer.as_ref(), n.visible))
    }

    /// Layers that are both visible and valid, in registration order.
    pub fn visible_vector_layers(&self) -> impl Iterator<Item = &dyn VectorLayer> + '_ {
        self.nodes
            .iter()
            .filter(|n| n.visible && n.layer.is_valid())
            .map(|n| n.layer.as_ref())
    }

    /// Number of registered layers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if no layer is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryLayer;
    use mapmenu_crs::Crs;

    fn names(tree: &LayerTree) -> Vec<&str> {
        tree.visible_vector_layers().map(|l| l.name()).collect()
    }

    #[test]
    fn hidden_and_invalid_layers_are_skipped() {
        let mut tree = LayerTree::new();
        tree.register(MemoryLayer::new("a", "A", Crs::wgs84()));
        let b = tree.register(MemoryLayer::new("b", "B", Crs::wgs84()));
        tree.register(MemoryLayer::new("c", "C", Crs::wgs84()).with_valid(false));
        tree.register(MemoryLayer::new("d", "D", Crs::wgs84()));
        assert_eq!(names(&tree), ["A", "B", "D"]);

        assert!(tree.set_visible(&b, false));
        assert!(!tree.is_visible(&b));
        assert_eq!(names(&tree), ["A", "D"]);
        assert!(!tree.set_visible(&LayerId::new("missing"), true));
        assert_eq!(tree.len(), 4);
    }

    #[test]
    fn re_registering_keeps_position_and_visibility() {
        let mut tree = LayerTree::new();
        let a = tree.register(MemoryLayer::new("a", "A", Crs::wgs84()));
        tree.register(MemoryLayer::new("b", "B", Crs::wgs84()));
        tree.set_visible(&a, false);
        tree.register(MemoryLayer::new("a", "A2", Crs::wgs84()));
        let all: Vec<_> = tree.iter().map(|(l, v)| (l.name(), v)).collect();
        assert_eq!(all, [("A2", false), ("B", true)]);

        assert!(tree.remove(&a).is_some());
        assert!(tree.layer(&a).is_none());
        assert_eq!(names(&tree), ["B"]);
    }
}
