// Copyright 2025 the Mapmenu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::panic::{AssertUnwindSafe, catch_unwind};

use mapmenu_action::{Action, ActionContext, ActionEnv, Placement, Scope};
use mapmenu_catalog::ActionCatalog;
use mapmenu_detect::{ClickContext, DetectedFeature};
use mapmenu_precise_hit::GeometryKind;

use crate::tree::{EntryId, MenuEntry, MenuNode, MenuTree, NodeList};

/// Label of the disabled item shown when no action applies.
pub const PLACEHOLDER_LABEL: &str = "Right-click Utilities";

/// Label of the disabled item shown when building the menu failed.
pub const ERROR_PLACEHOLDER_LABEL: &str = "Right-click Utilities (Error)";

/// Turns a click into a menu using the enabled actions of a catalog.
///
/// Layout:
///
/// - Empty canvas: canvas actions, a separator, then the general actions.
/// - One feature: feature actions, layer actions, actions offered for any
///   feature of that kind, then the general actions. Every entry is bound
///   to the feature.
/// - Several features: one submenu per feature, grouped by geometry kind
///   with kinds in name order. Each submenu repeats the single feature
///   layout minus the general actions. The general actions follow, bound to
///   the whole click.
///
/// General actions are the universal ones that accept any click type.
#[derive(Clone, Copy, Debug)]
pub struct ContextMenuBuilder<'c> {
    catalog: &'c ActionCatalog,
}

impl<'c> ContextMenuBuilder<'c> {
    /// Builder over the enabled actions of `catalog`.
    #[must_use]
    pub fn new(catalog: &'c ActionCatalog) -> Self {
        Self { catalog }
    }

    /// Builds the menu for `click`.
    ///
    /// Calling this twice with the same inputs gives structurally equal trees.
    #[must_use]
    pub fn build<'a>(&self, env: ActionEnv<'a>, click: &ClickContext<'a>) -> MenuTree<'a> {
        let mut menu = Assembler::default();
        match click.detected_features.as_slice() {
            [] => self.canvas_menu(&mut menu, env, click),
            [single] => self.single_feature_menu(&mut menu, env, click, *single),
            many => self.multi_feature_menu(&mut menu, env, click, many),
        }
        let tree = menu.finish();
        tracing::debug!(
            click_type = %click.click_type,
            features = click.feature_count(),
            entries = tree.entries().len(),
            "context menu built"
        );
        tree
    }

    /// Like [`build`](Self::build), but never fails and never returns an
    /// empty menu.
    ///
    /// A panic while building yields a disabled
    /// [`ERROR_PLACEHOLDER_LABEL`] item; a menu with nothing to choose yields
    /// a disabled [`PLACEHOLDER_LABEL`] item.
    #[must_use]
    pub fn build_or_placeholder<'a>(
        &self,
        env: ActionEnv<'a>,
        click: &ClickContext<'a>,
    ) -> MenuTree<'a> {
        match catch_unwind(AssertUnwindSafe(|| self.build(env, click))) {
            Ok(tree) if tree.is_placeholder() => MenuTree::placeholder(PLACEHOLDER_LABEL),
            Ok(tree) => tree,
            Err(payload) => {
                let reason = payload
                    .downcast_ref::<&str>()
                    .map(|s| (*s).to_owned())
                    .or_else(|| payload.downcast_ref::<String>().cloned())
                    .unwrap_or_default();
                tracing::error!(%reason, "building the context menu panicked");
                MenuTree::placeholder(ERROR_PLACEHOLDER_LABEL)
            }
        }
    }

    fn enabled(&self) -> impl Iterator<Item = &'c dyn Action> + 'c {
        self.catalog.get_enabled_actions()
    }

    /// Enabled actions with `scope` placed in groups for `kind`.
    fn for_kind(&self, scope: Scope, kind: GeometryKind) -> Vec<&'c dyn Action> {
        self.enabled()
            .filter(|a| a.supports_scope(scope) && a.placement().accepts_kind(kind))
            .collect()
    }

    fn canvas_actions(&self) -> Vec<&'c dyn Action> {
        self.enabled()
            .filter(|a| a.supports_scope(Scope::Universal) && a.placement().accepts_canvas())
            .collect()
    }

    fn general_actions(&self) -> Vec<&'c dyn Action> {
        self.enabled()
            .filter(|a| {
                a.supports_scope(Scope::Universal) && a.placement() == Placement::Universal
            })
            .collect()
    }

    fn canvas_menu<'a>(
        &self,
        menu: &mut Assembler<'a>,
        env: ActionEnv<'a>,
        click: &ClickContext<'a>,
    ) {
        let context = ActionContext::for_click(env, click);
        menu.actions(&self.canvas_actions(), &context);
        menu.top.separator();
        menu.actions(&self.general_actions(), &context);
    }

    fn single_feature_menu<'a>(
        &self,
        menu: &mut Assembler<'a>,
        env: ActionEnv<'a>,
        click: &ClickContext<'a>,
        feature: DetectedFeature<'a>,
    ) {
        let kind = feature.geometry_type;
        let context = ActionContext::for_feature(env, click.click_point, feature);
        menu.actions(&self.for_kind(Scope::Feature, kind), &context);
        menu.top.separator();
        menu.actions(&self.for_kind(Scope::Layer, kind), &context);
        menu.top.separator();
        menu.actions(&self.for_kind(Scope::Universal, kind), &context);
        menu.actions(&self.general_actions(), &context);
    }

    fn multi_feature_menu<'a>(
        &self,
        menu: &mut Assembler<'a>,
        env: ActionEnv<'a>,
        click: &ClickContext<'a>,
        features: &[DetectedFeature<'a>],
    ) {
        let mut kinds: Vec<GeometryKind> = Vec::new();
        for f in features {
            if !kinds.contains(&f.geometry_type) {
                kinds.push(f.geometry_type);
            }
        }
        kinds.sort_by_key(|k| k.name());

        for kind in kinds {
            let feature_actions = self.for_kind(Scope::Feature, kind);
            let layer_actions = self.for_kind(Scope::Layer, kind);
            let kind_actions = self.for_kind(Scope::Universal, kind);
            let mut group: Vec<DetectedFeature<'a>> = features
                .iter()
                .filter(|f| f.geometry_type == kind)
                .copied()
                .collect();
            group.sort_by(|a, b| a.distance.total_cmp(&b.distance));
            let numbered = group.len() > 1;

            for (rank, feature) in group.into_iter().enumerate() {
                let label = if numbered {
                    format!(
                        "{} #{} - {} (ID: {})",
                        kind.title(),
                        rank + 1,
                        feature.layer_name(),
                        feature.feature_id()
                    )
                } else {
                    format!("{} Feature - {}", kind.title(), feature.layer_name())
                };
                let context = ActionContext::for_feature(env, click.click_point, feature);
                let mut children = NodeList::default();
                for action in &feature_actions {
                    children.push(menu.item(*action, &context));
                }
                children.separator();
                for action in &layer_actions {
                    children.push(menu.item(*action, &context));
                }
                children.separator();
                for action in &kind_actions {
                    children.push(menu.item(*action, &context));
                }
                if !children.is_empty() {
                    menu.top.push(MenuNode::Submenu {
                        label,
                        children: children.into_nodes(),
                    });
                }
            }
        }

        menu.top.separator();
        menu.actions(&self.general_actions(), &ActionContext::for_click(env, click));
    }
}

#[derive(Debug, Default)]
struct Assembler<'a> {
    top: NodeList,
    entries: Vec<MenuEntry<'a>>,
}

impl<'a> Assembler<'a> {
    /// Records an entry and returns the item that runs it.
    fn item(&mut self, action: &dyn Action, context: &ActionContext<'a>) -> MenuNode {
        let entry = EntryId::new(self.entries.len());
        self.entries.push(MenuEntry {
            action_id: action.id().to_owned(),
            context: context.clone(),
        });
        MenuNode::Action {
            label: action.name().to_owned(),
            enabled: true,
            entry: Some(entry),
        }
    }

    fn actions(&mut self, actions: &[&dyn Action], context: &ActionContext<'a>) {
        for action in actions {
            let node = self.item(*action, context);
            self.top.push(node);
        }
    }

    fn finish(self) -> MenuTree<'a> {
        MenuTree::from_parts(self.top.into_nodes(), self.entries)
    }
}
