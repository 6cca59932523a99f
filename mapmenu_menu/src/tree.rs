// Copyright 2025 the Mapmenu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Declarative menu trees.

use std::fmt::Write as _;

use mapmenu_action::{ActionContext, ActionError};
use mapmenu_catalog::ActionCatalog;

/// Handle of an invocable entry in a [`MenuTree`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntryId(usize);

impl EntryId {
    pub(crate) const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Position in [`MenuTree::entries`].
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// One node of a menu.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MenuNode {
    /// A clickable item. Placeholders are disabled and have no entry.
    Action {
        /// Item label.
        label: String,
        /// Whether the item can be chosen.
        enabled: bool,
        /// Entry run when the item is chosen.
        entry: Option<EntryId>,
    },
    /// A separator line.
    Separator,
    /// A nested menu.
    Submenu {
        /// Submenu label.
        label: String,
        /// Nested nodes.
        children: Vec<MenuNode>,
    },
}

/// What an entry runs: an action id and the context it was built with.
#[derive(Clone, Debug)]
pub struct MenuEntry<'a> {
    /// Id of the action in the catalog.
    pub action_id: String,
    /// Context bound to this entry.
    pub context: ActionContext<'a>,
}

/// Failure to run a menu entry.
#[derive(Debug, thiserror::Error)]
pub enum MenuError {
    /// The entry id does not belong to this tree.
    #[error("menu entry {0:?} does not exist")]
    UnknownEntry(EntryId),
    /// The catalog no longer has the action.
    #[error("action `{id}` is not in the catalog")]
    UnknownAction {
        /// Action id.
        id: String,
    },
    /// The action ran and failed.
    #[error("action `{id}` failed: {source}")]
    Action {
        /// Action id.
        id: String,
        /// The action's error.
        #[source]
        source: ActionError,
    },
}

/// A built menu: nodes for display plus the table of invocable entries.
#[derive(Clone, Debug, Default)]
pub struct MenuTree<'a> {
    nodes: Vec<MenuNode>,
    entries: Vec<MenuEntry<'a>>,
}

impl<'a> MenuTree<'a> {
    /// A tree holding one disabled, entry-less item.
    #[must_use]
    pub fn placeholder(label: &str) -> Self {
        Self {
            nodes: vec![MenuNode::Action {
                label: label.to_owned(),
                enabled: false,
                entry: None,
            }],
            entries: Vec::new(),
        }
    }

    pub(crate) fn from_parts(nodes: Vec<MenuNode>, entries: Vec<MenuEntry<'a>>) -> Self {
        Self { nodes, entries }
    }

    /// Top-level nodes.
    #[must_use]
    pub fn nodes(&self) -> &[MenuNode] {
        &self.nodes
    }

    /// Every invocable entry.
    #[must_use]
    pub fn entries(&self) -> &[MenuEntry<'a>] {
        &self.entries
    }

    /// Entry by id.
    #[must_use]
    pub fn entry(&self, id: EntryId) -> Option<&MenuEntry<'a>> {
        self.entries.get(id.0)
    }

    /// Returns `true` if the tree has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns `true` if nothing in the tree can be chosen.
    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        self.entries.is_empty()
    }

    /// Finds the first entry whose item has `label`, searching depth first.
    #[must_use]
    pub fn find_entry(&self, label: &str) -> Option<EntryId> {
        fn walk(nodes: &[MenuNode], label: &str) -> Option<EntryId> {
            nodes.iter().find_map(|node| match node {
                MenuNode::Action {
                    label: l,
                    entry: Some(entry),
                    ..
                } if l == label => Some(*entry),
                MenuNode::Submenu { children, .. } => walk(children, label),
                _ => None,
            })
        }
        walk(&self.nodes, label)
    }

    /// Indented outline of the tree, one node per line.
    ///
    /// Separators print as `---`, submenus as `> label`, disabled items in
    /// brackets. Two trees with equal outlines show the same menu.
    #[must_use]
    pub fn structure(&self) -> String {
        fn walk(out: &mut String, nodes: &[MenuNode], depth: usize) {
            for node in nodes {
                let indent = "  ".repeat(depth);
                let _ = match node {
                    MenuNode::Action {
                        label,
                        enabled: true,
                        ..
                    } => writeln!(out, "{indent}{label}"),
                    MenuNode::Action { label, .. } => writeln!(out, "{indent}[{label}]"),
                    MenuNode::Separator => writeln!(out, "{indent}---"),
                    MenuNode::Submenu { label, children } => {
                        let r = writeln!(out, "{indent}> {label}");
                        walk(out, children, depth + 1);
                        r
                    }
                };
            }
        }
        let mut out = String::new();
        walk(&mut out, &self.nodes, 0);
        out
    }

    /// Runs the action behind `entry` with the entry's own context.
    pub fn invoke(&self, entry: EntryId, catalog: &ActionCatalog) -> Result<(), MenuError> {
        let found = self.entry(entry).ok_or(MenuError::UnknownEntry(entry))?;
        let id = found.action_id.as_str();
        let unknown = || MenuError::UnknownAction { id: id.to_owned() };
        let action = catalog.get_action(id).ok_or_else(unknown)?;
        let settings = catalog.settings_for(id).ok_or_else(unknown)?;
        tracing::debug!(action = id, click_type = %found.context.click_type, "invoking menu entry");
        action
            .execute(&found.context, &settings)
            .map_err(|source| MenuError::Action {
                id: id.to_owned(),
                source,
            })
    }
}

/// Accumulates nodes while keeping separators tidy.
///
/// A separator is only emitted between two items: never first, never last,
/// never twice in a row.
#[derive(Debug, Default)]
pub(crate) struct NodeList {
    nodes: Vec<MenuNode>,
    pending_separator: bool,
}

impl NodeList {
    pub(crate) fn separator(&mut self) {
        if !self.nodes.is_empty() {
            self.pending_separator = true;
        }
    }

    pub(crate) fn push(&mut self, node: MenuNode) {
        if self.pending_separator {
            self.nodes.push(MenuNode::Separator);
            self.pending_separator = false;
        }
        self.nodes.push(node);
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub(crate) fn into_nodes(self) -> Vec<MenuNode> {
        self.nodes
    }
}
