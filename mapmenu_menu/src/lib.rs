// Copyright 2025 the Mapmenu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mapmenu Menu: declarative right-click menus.
//!
//! [`ContextMenuBuilder`] turns a [`ClickContext`](mapmenu_detect::ClickContext)
//! into a [`MenuTree`]: display nodes ([`MenuNode`]) plus a table of
//! invocable entries. Every entry owns the action id and the
//! [`ActionContext`](mapmenu_action::ActionContext) it was built with, so
//! choosing an item in one submenu never sees another submenu's feature.
//!
//! The tree is toolkit-agnostic; a host walks [`MenuTree::nodes`] to draw it
//! and calls [`MenuTree::invoke`] with the chosen [`EntryId`].
//!
//! ```
//! use kurbo::{Point, Rect};
//! use mapmenu_action::{
//!     Action, ActionContext, ActionEnv, ActionError, ActionMeta, ActionSettings, ClickTypes,
//!     RecordingServices, Scope, Severity,
//! };
//! use mapmenu_catalog::{ActionCatalog, Registration};
//! use mapmenu_crs::Crs;
//! use mapmenu_detect::{FeatureDetector, LayerTree, MapCanvas};
//! use mapmenu_menu::ContextMenuBuilder;
//! use mapmenu_settings::MemoryConfig;
//! use mapmenu_view2d::MapViewport;
//!
//! #[derive(Debug)]
//! struct Hello(ActionMeta);
//!
//! impl Action for Hello {
//!     fn meta(&self) -> &ActionMeta {
//!         &self.0
//!     }
//!     fn execute(&self, ctx: &ActionContext<'_>, _: &ActionSettings) -> Result<(), ActionError> {
//!         ctx.services.notify(Severity::Info, "Hello", "clicked");
//!         Ok(())
//!     }
//! }
//!
//! fn hello() -> Box<dyn Action> {
//!     Box::new(Hello(
//!         ActionMeta::new("hello", "Say Hello", Scope::Universal)
//!             .click_types(ClickTypes::UNIVERSAL),
//!     ))
//! }
//!
//! const ACTIONS: &[Registration] = &[hello];
//!
//! let catalog = ActionCatalog::load(ACTIONS, MemoryConfig::new().shared());
//! let layers = LayerTree::new();
//! let canvas = MapCanvas::new(
//!     MapViewport::new(Rect::new(0.0, 0.0, 800.0, 600.0), Point::ZERO, 1.0),
//!     Crs::web_mercator(),
//! );
//! let services = RecordingServices::new();
//! let env = ActionEnv { canvas: &canvas, layers: &layers, services: &services };
//!
//! let click = FeatureDetector::default().click_context(&layers, &canvas, Point::new(5.0, 5.0));
//! let menu = ContextMenuBuilder::new(&catalog).build(env, &click);
//! assert_eq!(menu.structure(), "Say Hello\n");
//!
//! let entry = menu.find_entry("Say Hello").unwrap();
//! menu.invoke(entry, &catalog).unwrap();
//! assert_eq!(services.notifications().len(), 1);
//! ```

mod builder;
mod tree;

pub use builder::{ContextMenuBuilder, ERROR_PLACEHOLDER_LABEL, PLACEHOLDER_LABEL};
pub use tree::{EntryId, MenuEntry, MenuError, MenuNode, MenuTree};
