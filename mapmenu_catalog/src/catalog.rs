// Copyright 2025 the Mapmenu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use hashbrown::HashSet;
use mapmenu_action::{Action, ActionSettings, ConfigurationError, validate_action_configuration};
use mapmenu_settings::{SettingValue, SettingsSchema, SharedConfig, keys};

use crate::tabs::{SettingsTab, TabCounts};

/// Constructor of one action, as listed in a registration table.
pub type Registration = fn() -> Box<dyn Action>;

/// An action rejected at load time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SkippedAction {
    /// Position in the registration list.
    pub position: usize,
    /// Declared id, possibly empty.
    pub id: String,
    /// Why the action was rejected.
    pub error: ConfigurationError,
}

struct Entry {
    action: Box<dyn Action>,
    schema: Rc<SettingsSchema>,
    enabled: bool,
}

/// Every loaded action with its enabled flag.
///
/// The catalog is built once from a fixed registration list and reloaded only
/// on request. Enabled flags are seeded from the configuration store and
/// written back, with a flush, whenever they change.
pub struct ActionCatalog {
    registrations: Vec<Registration>,
    config: SharedConfig,
    namespace: String,
    entries: Vec<Entry>,
    skipped: Vec<SkippedAction>,
}

impl fmt::Debug for ActionCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionCatalog")
            .field("namespace", &self.namespace)
            .field("registrations", &self.registrations.len())
            .field(
                "actions",
                &self
                    .entries
                    .iter()
                    .map(|e| (e.action.id(), e.enabled))
                    .collect::<Vec<_>>(),
            )
            .field("skipped", &self.skipped)
            .field("config", &self.config)
            .finish()
    }
}

impl ActionCatalog {
    /// Loads `registrations` under the default namespace.
    #[must_use]
    pub fn load(registrations: &[Registration], config: SharedConfig) -> Self {
        Self::load_in(registrations, config, keys::DEFAULT_NAMESPACE)
    }

    /// Loads `registrations` with config keys under `namespace`.
    #[must_use]
    pub fn load_in(registrations: &[Registration], config: SharedConfig, namespace: &str) -> Self {
        let mut catalog = Self {
            registrations: registrations.to_vec(),
            config,
            namespace: namespace.to_owned(),
            entries: Vec::new(),
            skipped: Vec::new(),
        };
        catalog.reload();
        catalog
    }

    /// Rebuilds the catalog from the registration list and persisted flags.
    pub fn reload(&mut self) {
        self.entries.clear();
        self.skipped.clear();
        let mut seen = HashSet::new();
        for (position, register) in self.registrations.iter().enumerate() {
            let action = register();
            let meta = action.meta();
            let checked = validate_action_configuration(meta).and_then(|()| {
                if seen.contains(meta.id.as_str()) {
                    Err(ConfigurationError::DuplicateId {
                        id: meta.id.clone(),
                    })
                } else {
                    Ok(())
                }
            });
            if let Err(error) = checked {
                tracing::warn!(position, id = %meta.id, %error, "skipping misconfigured action");
                self.skipped.push(SkippedAction {
                    position,
                    id: meta.id.clone(),
                    error,
                });
                continue;
            }
            seen.insert(meta.id.clone());
            let enabled = self
                .config
                .borrow()
                .get_bool(&keys::enabled_key(&self.namespace, &meta.id), meta.default_enabled);
            let schema = Rc::new(action.settings_schema());
            self.entries.push(Entry {
                action,
                schema,
                enabled,
            });
        }
        tracing::info!(
            loaded = self.entries.len(),
            enabled = self.entries.iter().filter(|e| e.enabled).count(),
            skipped = self.skipped.len(),
            "action catalog loaded"
        );
    }

    /// Actions rejected by the last load.
    #[must_use]
    pub fn load_report(&self) -> &[SkippedAction] {
        &self.skipped
    }

    /// Config namespace of the enabled flags and settings.
    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// The shared configuration store.
    #[must_use]
    pub fn config(&self) -> &SharedConfig {
        &self.config
    }

    /// Number of loaded actions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no action loaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Every loaded action in registration order.
    pub fn get_all_actions(&self) -> impl Iterator<Item = &dyn Action> + '_ {
        self.entries.iter().map(|e| e.action.as_ref())
    }

    /// Enabled actions in registration order.
    pub fn get_enabled_actions(&self) -> impl Iterator<Item = &dyn Action> + '_ {
        self.entries
            .iter()
            .filter(|e| e.enabled)
            .map(|e| e.action.as_ref())
    }

    /// Actions grouped by category name, categories sorted.
    #[must_use]
    pub fn get_actions_by_category(&self) -> BTreeMap<String, Vec<&dyn Action>> {
        let mut out: BTreeMap<String, Vec<&dyn Action>> = BTreeMap::new();
        for action in self.get_all_actions() {
            out.entry(action.meta().category_name().to_owned())
                .or_default()
                .push(action);
        }
        out
    }

    /// Action by id.
    #[must_use]
    pub fn get_action(&self, id: &str) -> Option<&dyn Action> {
        self.entry(id).map(|e| e.action.as_ref())
    }

    /// Enabled flag of an action; unknown ids are not enabled.
    #[must_use]
    pub fn is_enabled(&self, id: &str) -> bool {
        self.entry(id).is_some_and(|e| e.enabled)
    }

    /// Enables or disables an action and persists the flag.
    ///
    /// Returns `false` for unknown ids.
    pub fn set_action_enabled(&mut self, id: &str, enabled: bool) -> bool {
        let Some(entry) = self.entries.iter_mut().find(|e| e.action.id() == id) else {
            return false;
        };
        entry.enabled = enabled;
        self.config
            .borrow_mut()
            .set(&keys::enabled_key(&self.namespace, id), SettingValue::Bool(enabled));
        self.flush();
        true
    }

    /// Enables or disables every action.
    pub fn set_all_enabled(&mut self, enabled: bool) {
        self.write_flags(|_| enabled);
    }

    /// Restores every action's compiled-in default flag.
    pub fn reset_enabled_to_defaults(&mut self) {
        self.write_flags(|action| action.meta().default_enabled);
    }

    /// Actions listed on a settings tab, in registration order.
    #[must_use]
    pub fn actions_for_tab(&self, tab: SettingsTab) -> Vec<&dyn Action> {
        self.get_all_actions()
            .filter(|a| tab.lists(a.placement()))
            .collect()
    }

    /// Enabled and total counts for a settings tab.
    #[must_use]
    pub fn tab_counts(&self, tab: SettingsTab) -> TabCounts {
        self.entries
            .iter()
            .filter(|e| tab.lists(e.action.placement()))
            .fold(TabCounts::default(), |mut acc, e| {
                acc.total += 1;
                acc.enabled += usize::from(e.enabled);
                acc
            })
    }

    /// Settings view of an action, bound to the catalog's store.
    #[must_use]
    pub fn settings_for(&self, id: &str) -> Option<ActionSettings> {
        let entry = self.entry(id)?;
        Some(ActionSettings::new(
            &self.namespace,
            id,
            Rc::clone(&entry.schema),
            Rc::clone(&self.config),
        ))
    }

    fn entry(&self, id: &str) -> Option<&Entry> {
        self.entries.iter().find(|e| e.action.id() == id)
    }

    fn write_flags(&mut self, flag: impl Fn(&dyn Action) -> bool) {
        {
            let mut config = self.config.borrow_mut();
            for entry in &mut self.entries {
                entry.enabled = flag(entry.action.as_ref());
                config.set(
                    &keys::enabled_key(&self.namespace, entry.action.id()),
                    SettingValue::Bool(entry.enabled),
                );
            }
        }
        self.flush();
    }

    fn flush(&self) {
        if let Err(err) = self.config.borrow_mut().flush() {
            tracing::error!(%err, "failed to persist action flags");
        }
    }
}
