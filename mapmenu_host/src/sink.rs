// Copyright 2025 the Mapmenu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host menu handles.

use std::fmt::Write as _;

use mapmenu_menu::{EntryId, MenuNode};

/// What choosing an item does.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MenuSelection {
    /// Runs a built menu entry.
    Entry(EntryId),
    /// Copies the click coordinates to the clipboard.
    CopyCoordinates,
}

/// The host toolkit's context menu.
///
/// Items are appended in order; submenus nest between
/// [`begin_submenu`](Self::begin_submenu) and [`end_submenu`](Self::end_submenu).
pub trait MenuSink {
    /// Removes every item.
    fn clear(&mut self);

    /// Appends an item. Disabled items carry no selection.
    fn add_item(&mut self, label: &str, enabled: bool, selection: Option<MenuSelection>);

    /// Appends a separator.
    fn add_separator(&mut self);

    /// Opens a submenu; following items go into it.
    fn begin_submenu(&mut self, label: &str);

    /// Closes the innermost open submenu.
    fn end_submenu(&mut self);
}

/// Writes `nodes` into `sink`.
pub fn render(sink: &mut dyn MenuSink, nodes: &[MenuNode]) {
    for node in nodes {
        match node {
            MenuNode::Action {
                label,
                enabled,
                entry,
            } => sink.add_item(label, *enabled, entry.map(MenuSelection::Entry)),
            MenuNode::Separator => sink.add_separator(),
            MenuNode::Submenu { label, children } => {
                sink.begin_submenu(label);
                render(sink, children);
                sink.end_submenu();
            }
        }
    }
}

/// A sink that keeps a text outline of the menu.
///
/// The outline uses the same notation as
/// [`MenuTree::structure`](mapmenu_menu::MenuTree::structure). Useful for
/// headless hosts and tests.
#[derive(Clone, Debug, Default)]
pub struct OutlineSink {
    outline: String,
    depth: usize,
    items: Vec<(String, Option<MenuSelection>)>,
}

impl OutlineSink {
    /// An empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Text outline of everything added since the last clear.
    #[must_use]
    pub fn outline(&self) -> &str {
        &self.outline
    }

    /// Selection of the first item labelled `label`.
    #[must_use]
    pub fn selection(&self, label: &str) -> Option<MenuSelection> {
        self.items
            .iter()
            .find(|(l, _)| l == label)
            .and_then(|(_, s)| *s)
    }

    /// Selections of every item labelled `label`, in order.
    #[must_use]
    pub fn selections(&self, label: &str) -> Vec<MenuSelection> {
        self.items
            .iter()
            .filter(|(l, _)| l == label)
            .filter_map(|(_, s)| *s)
            .collect()
    }

    /// Labels of every item, in order, submenus flattened.
    pub fn labels(&self) -> impl Iterator<Item = &str> + '_ {
        self.items.iter().map(|(l, _)| l.as_str())
    }

    fn line(&mut self, text: &str) {
        let indent = "  ".repeat(self.depth);
        let _ = writeln!(self.outline, "{indent}{text}");
    }
}

impl MenuSink for OutlineSink {
    fn clear(&mut self) {
        self.outline.clear();
        self.items.clear();
        self.depth = 0;
    }

    fn add_item(&mut self, label: &str, enabled: bool, selection: Option<MenuSelection>) {
        if enabled {
            self.line(label);
        } else {
            self.line(&format!("[{label}]"));
        }
        self.items.push((label.to_owned(), selection));
    }

    fn add_separator(&mut self) {
        self.line("---");
    }

    fn begin_submenu(&mut self, label: &str) {
        self.line(&format!("> {label}"));
        self.depth += 1;
    }

    fn end_submenu(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outline_tracks_nesting_and_clears() {
        let mut sink = OutlineSink::new();
        sink.add_item("Copy Coordinates", true, Some(MenuSelection::CopyCoordinates));
        sink.add_separator();
        sink.begin_submenu("Line Feature - Roads");
        sink.add_item("Length", true, None);
        sink.end_submenu();
        sink.add_item("Right-click Utilities", false, None);
        assert_eq!(
            sink.outline(),
            "Copy Coordinates\n---\n> Line Feature - Roads\n  Length\n[Right-click Utilities]\n"
        );
        assert_eq!(
            sink.selection("Copy Coordinates"),
            Some(MenuSelection::CopyCoordinates)
        );
        assert_eq!(sink.selection("Length"), None);

        sink.clear();
        assert!(sink.outline().is_empty());
        assert_eq!(sink.labels().count(), 0);
    }
}
