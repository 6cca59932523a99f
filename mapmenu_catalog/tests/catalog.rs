// Copyright 2025 the Mapmenu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Catalog loading, flags and settings tabs.

use mapmenu_action::{
    Action, ActionContext, ActionError, ActionMeta, ActionSettings, ClickTypes,
    ConfigurationError, Scope, Scopes,
};
use mapmenu_catalog::{ActionCatalog, Registration, SettingsTab, TabCounts};
use mapmenu_settings::{
    JsonFileConfig, MemoryConfig, SettingDefBuilder, SettingValue, SettingsSchema,
};

#[derive(Debug)]
struct Stub {
    meta: ActionMeta,
    with_settings: bool,
}

impl Action for Stub {
    fn meta(&self) -> &ActionMeta {
        &self.meta
    }

    fn settings_schema(&self) -> SettingsSchema {
        if self.with_settings {
            SettingsSchema::new()
                .with("decimal_places", SettingDefBuilder::int(2).range(0, 8).build())
        } else {
            SettingsSchema::new()
        }
    }

    fn execute(&self, _: &ActionContext<'_>, _: &ActionSettings) -> Result<(), ActionError> {
        Ok(())
    }
}

fn stub(meta: ActionMeta) -> Box<dyn Action> {
    Box::new(Stub {
        meta,
        with_settings: false,
    })
}

fn area() -> Box<dyn Action> {
    Box::new(Stub {
        meta: ActionMeta::new("area", "Area", Scope::Feature)
            .category("Analysis")
            .click_types(ClickTypes::POLYGONS),
        with_settings: true,
    })
}

fn length() -> Box<dyn Action> {
    stub(
        ActionMeta::new("length", "Length", Scope::Feature)
            .category("Analysis")
            .scopes(Scopes::FEATURE | Scopes::LAYER)
            .click_types(ClickTypes::LINES),
    )
}

fn coords() -> Box<dyn Action> {
    stub(
        ActionMeta::new("coords", "Coordinates", Scope::Feature)
            .click_types(ClickTypes::POINTS)
            .enabled_by_default(false),
    )
}

fn scale() -> Box<dyn Action> {
    stub(
        ActionMeta::new("scale", "Scale", Scope::Universal)
            .category("Navigation")
            .click_types(ClickTypes::UNIVERSAL),
    )
}

fn pan_here() -> Box<dyn Action> {
    stub(
        ActionMeta::new("pan_here", "Pan Here", Scope::Universal)
            .category("Navigation")
            .click_types(ClickTypes::CANVAS),
    )
}

fn ambiguous() -> Box<dyn Action> {
    stub(
        ActionMeta::new("ambiguous", "Ambiguous", Scope::Universal)
            .click_types(ClickTypes::UNIVERSAL | ClickTypes::POLYGON),
    )
}

fn nameless() -> Box<dyn Action> {
    stub(ActionMeta::new("nameless", "", Scope::Feature).click_types(ClickTypes::POINT))
}

fn area_again() -> Box<dyn Action> {
    stub(ActionMeta::new("area", "Area 2", Scope::Feature).click_types(ClickTypes::POLYGON))
}

const GOOD: &[Registration] = &[area, length, coords, scale, pan_here];

#[test]
fn misconfigured_and_duplicate_actions_are_reported() {
    let registrations: &[Registration] = &[area, ambiguous, nameless, length, area_again];
    let catalog = ActionCatalog::load(registrations, MemoryConfig::new().shared());
    let ids: Vec<&str> = catalog.get_all_actions().map(|a| a.id()).collect();
    assert_eq!(ids, ["area", "length"]);

    let report: Vec<(usize, &ConfigurationError)> = catalog
        .load_report()
        .iter()
        .map(|s| (s.position, &s.error))
        .collect();
    assert_eq!(
        report,
        [
            (1, &ConfigurationError::UniversalWithSpecific { id: "ambiguous".into() }),
            (2, &ConfigurationError::MissingName { id: "nameless".into() }),
            (4, &ConfigurationError::DuplicateId { id: "area".into() }),
        ]
    );
}

#[test]
fn flags_seed_from_config_then_defaults() {
    let config = MemoryConfig::new().shared();
    config
        .borrow_mut()
        .set("RightClickUtilities/length", SettingValue::Bool(false));
    config
        .borrow_mut()
        .set("RightClickUtilities/coords", SettingValue::Bool(true));
    let catalog = ActionCatalog::load(GOOD, config);
    assert!(catalog.is_enabled("area"));
    assert!(!catalog.is_enabled("length"));
    assert!(catalog.is_enabled("coords"));
    assert!(!catalog.is_enabled("unknown"));
    assert_eq!(catalog.get_enabled_actions().count(), 4);
}

#[test]
fn categories_are_sorted_with_other_fallback() {
    let catalog = ActionCatalog::load(GOOD, MemoryConfig::new().shared());
    let grouped = catalog.get_actions_by_category();
    let keys: Vec<&str> = grouped.keys().map(String::as_str).collect();
    assert_eq!(keys, ["Analysis", "Navigation", "Other"]);
    let other: Vec<&str> = grouped["Other"].iter().map(|a| a.id()).collect();
    assert_eq!(other, ["coords"]);
}

#[test]
fn tabs_list_universal_actions_only_once() {
    let catalog = ActionCatalog::load(GOOD, MemoryConfig::new().shared());
    let on = |tab| {
        catalog
            .actions_for_tab(tab)
            .into_iter()
            .map(|a| a.id())
            .collect::<Vec<_>>()
    };
    assert_eq!(on(SettingsTab::Polygon), ["area"]);
    assert_eq!(on(SettingsTab::Line), ["length"]);
    assert_eq!(on(SettingsTab::Point), ["coords"]);
    assert_eq!(on(SettingsTab::Canvas), ["pan_here"]);
    assert_eq!(on(SettingsTab::Universal), ["scale"]);
    assert_eq!(on(SettingsTab::All).len(), 5);
    assert_eq!(
        catalog.tab_counts(SettingsTab::All),
        TabCounts {
            enabled: 4,
            total: 5
        }
    );
    assert_eq!(catalog.tab_counts(SettingsTab::Point).to_string(), "0/1");
}

#[test]
fn bulk_changes_and_reset() {
    let config = MemoryConfig::new().shared();
    let mut catalog = ActionCatalog::load(GOOD, config.clone());
    catalog.set_all_enabled(false);
    assert_eq!(catalog.get_enabled_actions().count(), 0);
    assert!(!config.borrow().get_bool("RightClickUtilities/area", true));

    catalog.set_all_enabled(true);
    assert!(catalog.is_enabled("coords"));

    catalog.reset_enabled_to_defaults();
    assert!(!catalog.is_enabled("coords"));
    assert!(catalog.is_enabled("area"));
    assert!(!config.borrow().get_bool("RightClickUtilities/coords", true));
}

#[test]
fn reload_rereads_persisted_flags() {
    let config = MemoryConfig::new().shared();
    let mut catalog = ActionCatalog::load(GOOD, config.clone());
    config
        .borrow_mut()
        .set("RightClickUtilities/area", SettingValue::Bool(false));
    assert!(catalog.is_enabled("area"), "no automatic re-discovery");
    catalog.reload();
    assert!(!catalog.is_enabled("area"));
    assert_eq!(catalog.len(), 5);
}

#[test]
fn settings_share_the_catalog_store() {
    let config = MemoryConfig::new().shared();
    let catalog = ActionCatalog::load_in(GOOD, config.clone(), "Custom");
    let settings = catalog.settings_for("area").unwrap();
    assert_eq!(settings.get_int("decimal_places", 0), 2);
    settings.set("decimal_places", SettingValue::Int(4)).unwrap();
    assert_eq!(
        config.borrow().get("Custom/area/decimal_places"),
        Some(SettingValue::Int(4))
    );
    assert!(settings.set("decimal_places", SettingValue::Int(99)).is_err());
    assert_eq!(settings.get_int("decimal_places", 0), 4);
    assert!(catalog.settings_for("missing").is_none());
    assert!(catalog.settings_for("length").unwrap().schema().is_empty());
}

#[test]
fn flags_survive_a_json_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("mapmenu.json");
    {
        let config = JsonFileConfig::open(&path).unwrap().shared();
        let mut catalog = ActionCatalog::load(GOOD, config);
        assert!(catalog.set_action_enabled("length", false));
        assert!(catalog.set_action_enabled("coords", true));
    }
    let config = JsonFileConfig::open(&path).unwrap().shared();
    let catalog = ActionCatalog::load(GOOD, config);
    assert!(!catalog.is_enabled("length"));
    assert!(catalog.is_enabled("coords"));
    assert!(catalog.is_enabled("area"));
}
