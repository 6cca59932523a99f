// Copyright 2025 the Mapmenu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::panic::{AssertUnwindSafe, catch_unwind};

use kurbo::Point;
use mapmenu_action::{ActionEnv, Severity};
use mapmenu_catalog::ActionCatalog;
use mapmenu_detect::{FeatureDetector, MapCanvas};
use mapmenu_menu::{ContextMenuBuilder, EntryId, MenuTree};
use mapmenu_settings::keys;

use crate::sink::{MenuSelection, MenuSink, render};

/// Label of the optional coordinate copy item.
pub const COPY_COORDINATES_LABEL: &str = "Copy Coordinates";

const ERROR_TITLE: &str = "Right-click Utilities";

/// A right-click on the map canvas.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClickEvent {
    map_point: Point,
}

impl ClickEvent {
    /// A click at a position in canvas map coordinates.
    #[must_use]
    pub fn at_map(map_point: Point) -> Self {
        Self { map_point }
    }

    /// A click at a device pixel position of `canvas`.
    #[must_use]
    pub fn from_screen(pos: Point, canvas: &MapCanvas) -> Self {
        Self::at_map(canvas.screen_to_map(pos))
    }

    /// Click position in canvas map coordinates.
    #[must_use]
    pub fn map_point(&self) -> Point {
        self.map_point
    }
}

/// Connects a canvas' context-menu event to the action catalog.
#[derive(Clone, Copy, Debug)]
pub struct MenuHost<'c> {
    catalog: &'c ActionCatalog,
    detector: FeatureDetector,
}

impl<'c> MenuHost<'c> {
    /// A host using the default detector settings.
    #[must_use]
    pub fn new(catalog: &'c ActionCatalog) -> Self {
        Self::with_detector(catalog, FeatureDetector::default())
    }

    /// A host with a configured detector.
    #[must_use]
    pub fn with_detector(catalog: &'c ActionCatalog, detector: FeatureDetector) -> Self {
        Self { catalog, detector }
    }

    /// The catalog menus are built from.
    #[must_use]
    pub fn catalog(&self) -> &'c ActionCatalog {
        self.catalog
    }

    /// Returns `true` if the Copy Coordinates item is switched on.
    #[must_use]
    pub fn shows_copy_coordinates(&self) -> bool {
        self.catalog
            .config()
            .borrow()
            .get_bool(&keys::show_copy_coordinates_key(self.catalog.namespace()), false)
    }

    /// Replaces the contents of `sink` with the menu for `event`.
    ///
    /// The returned session resolves whatever the user picks from `sink`.
    pub fn on_context_menu_about_to_show<'a>(
        &self,
        sink: &mut dyn MenuSink,
        event: &ClickEvent,
        env: ActionEnv<'a>,
    ) -> MenuSession<'a, 'c> {
        sink.clear();
        let copy_coordinates = self.shows_copy_coordinates();
        if copy_coordinates {
            sink.add_item(
                COPY_COORDINATES_LABEL,
                true,
                Some(MenuSelection::CopyCoordinates),
            );
            sink.add_separator();
        }

        let click = self
            .detector
            .click_context(env.layers, env.canvas, event.map_point());
        let tree = ContextMenuBuilder::new(self.catalog).build_or_placeholder(env, &click);
        render(sink, tree.nodes());
        tracing::debug!(
            x = event.map_point().x,
            y = event.map_point().y,
            click_type = %click.click_type,
            entries = tree.entries().len(),
            "context menu shown"
        );

        MenuSession {
            catalog: self.catalog,
            env,
            click_point: event.map_point(),
            offers_copy: copy_coordinates,
            tree,
        }
    }
}

/// One open context menu.
#[derive(Debug)]
pub struct MenuSession<'a, 'c> {
    catalog: &'c ActionCatalog,
    env: ActionEnv<'a>,
    click_point: Point,
    offers_copy: bool,
    tree: MenuTree<'a>,
}

impl<'a> MenuSession<'a, '_> {
    /// The built menu.
    #[must_use]
    pub fn tree(&self) -> &MenuTree<'a> {
        &self.tree
    }

    /// Runs the chosen item.
    ///
    /// Failures and panics are reported to the user as critical
    /// notifications and never escape. Returns `true` if the item ran to
    /// completion.
    pub fn activate(&self, selection: MenuSelection) -> bool {
        match selection {
            MenuSelection::CopyCoordinates if self.offers_copy => {
                self.copy_coordinates();
                true
            }
            MenuSelection::CopyCoordinates => false,
            MenuSelection::Entry(entry) => self.run_entry(entry),
        }
    }

    /// Clipboard text for the click position.
    #[must_use]
    pub fn coordinate_text(&self) -> String {
        let Point { x, y } = self.click_point;
        let authid = self.env.canvas.crs().authid();
        if authid.is_empty() {
            format!("{x:.6}, {y:.6}")
        } else {
            format!("{x:.6}, {y:.6} ({authid})")
        }
    }

    fn copy_coordinates(&self) {
        let text = self.coordinate_text();
        self.env.services.set_clipboard_text(&text);
        self.env.services.notify(
            Severity::Info,
            COPY_COORDINATES_LABEL,
            &format!("Coordinates copied to clipboard: {text}"),
        );
    }

    fn run_entry(&self, entry: EntryId) -> bool {
        let title = self
            .tree
            .entry(entry)
            .and_then(|e| self.catalog.get_action(&e.action_id))
            .map_or(ERROR_TITLE, |a| a.name());
        match catch_unwind(AssertUnwindSafe(|| self.tree.invoke(entry, self.catalog))) {
            Ok(Ok(())) => true,
            Ok(Err(err)) => {
                tracing::error!(%err, "menu action failed");
                self.env
                    .services
                    .notify(Severity::Critical, title, &err.to_string());
                false
            }
            Err(payload) => {
                let reason = payload
                    .downcast_ref::<&str>()
                    .map(|s| (*s).to_owned())
                    .or_else(|| payload.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "unknown panic".to_owned());
                tracing::error!(%reason, "menu action panicked");
                self.env.services.notify(
                    Severity::Critical,
                    title,
                    &format!("Unexpected error: {reason}"),
                );
                false
            }
        }
    }
}
