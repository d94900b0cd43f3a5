#![forbid(unsafe_code)]
//! Integration tests for the `store` module.
//!
//! Covers registration overwrite semantics, out-of-order assignment
//! tolerance, revision movement, and the audit-event trail from outside
//! the crate boundary.

use dashkit_widgets::{
    AreaStyle, ComponentRef, RegistryError, RenderOutput, RenderState, StoreConfig,
    WidgetAreaDefinition, WidgetDefinition, WidgetStore, WidgetWidth,
};
use serde_json::{Value, json};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn widget(reference: &str) -> WidgetDefinition {
    WidgetDefinition::new(ComponentRef::new(reference))
}

fn area(title: &str) -> WidgetAreaDefinition {
    WidgetAreaDefinition::titled(title, "subtitle")
}

// ---------------------------------------------------------------------------
// Registration
// ---------------------------------------------------------------------------

#[test]
fn widget_without_component_is_rejected() {
    let mut store = WidgetStore::new();
    let err = store
        .register_widget("broken", widget(""))
        .unwrap_err();
    assert!(matches!(err, RegistryError::InvalidWidgetDefinition { .. }));
    assert_eq!(err.error_code(), "WS_INVALID_WIDGET_DEFINITION");
    assert!(!store.is_widget_registered("broken"));
    // Rejected registrations leave no trace.
    assert_eq!(store.revision(), 0);
}

#[test]
fn definition_fields_round_trip() {
    let mut store = WidgetStore::new();
    store
        .register_widget(
            "clicks",
            WidgetDefinition {
                priority: 5,
                width: WidgetWidth::Half,
                wrap_widget: false,
                modules: ["search-console".to_string()].into(),
                ..widget("ClicksChart")
            },
        )
        .unwrap();

    let definition = store.get_widget("clicks").unwrap();
    assert_eq!(definition.component.as_str(), "ClicksChart");
    assert_eq!(definition.priority, 5);
    assert_eq!(definition.width, WidgetWidth::Half);
    assert!(!definition.wrap_widget);
    assert!(definition.modules.contains("search-console"));
}

#[test]
fn area_overwrite_is_metadata_only() {
    let mut store = WidgetStore::new();
    store.register_widget_area("a1", area("Old title")).unwrap();
    store.assign_widget_area("a1", "ctx");
    store.register_widget("w1", widget("Comp")).unwrap();
    store.assign_widget("w1", "a1");

    store
        .register_widget_area(
            "a1",
            WidgetAreaDefinition {
                style: AreaStyle::Composite,
                has_new_badge: true,
                ..area("New title")
            },
        )
        .unwrap();

    let definition = store.get_widget_area("a1").unwrap();
    assert_eq!(definition.title, "New title");
    assert_eq!(definition.style, AreaStyle::Composite);
    assert!(definition.has_new_badge);
    // Relationships survived the overwrite.
    assert_eq!(store.get_widgets("a1"), ["w1"]);
    assert_eq!(store.get_widget_areas("ctx"), ["a1"]);
}

#[test]
fn widget_overwrite_keeps_assignments_and_state() {
    let mut store = WidgetStore::new();
    store.register_widget_area("a1", area("Area")).unwrap();
    store.register_widget("w1", widget("First")).unwrap();
    store.assign_widget("w1", "a1");
    store.set_widget_state(
        "w1",
        RenderOutput::Content(ComponentRef::new("First")),
        Value::Null,
    );

    store.register_widget("w1", widget("Second")).unwrap();
    assert_eq!(store.get_widget("w1").unwrap().component.as_str(), "Second");
    assert_eq!(store.get_widgets("a1"), ["w1"]);
    assert_eq!(store.get_widget_state("w1"), RenderState::Active);
}

// ---------------------------------------------------------------------------
// Out-of-order assignment
// ---------------------------------------------------------------------------

#[test]
fn early_assignment_is_dropped_then_retried() {
    let mut store = WidgetStore::new();

    // Module assigns before its registrations have run: tolerated no-op.
    store.assign_widget("w1", "a1");
    assert!(store.get_widgets("a1").is_empty());
    assert_eq!(store.events().last().unwrap().outcome, "skipped");

    // Once both sides are registered the same call sticks.
    store.register_widget_area("a1", area("Area")).unwrap();
    store.register_widget("w1", widget("Comp")).unwrap();
    store.assign_widget("w1", "a1");
    assert_eq!(store.get_widgets("a1"), ["w1"]);
    assert_eq!(store.events().last().unwrap().outcome, "ok");
}

#[test]
fn skipped_assignment_does_not_move_revision() {
    let mut store = WidgetStore::new();
    store.assign_widget("w1", "a1");
    store.assign_widget_area("a1", "ctx");
    assert_eq!(store.revision(), 0);
}

#[test]
fn assignment_order_is_insertion_order() {
    let mut store = WidgetStore::new();
    store.register_widget_area("a1", area("Area")).unwrap();
    for slug in ["w3", "w1", "w2"] {
        store.register_widget(slug, widget("Comp")).unwrap();
        store.assign_widget(slug, "a1");
    }
    assert_eq!(store.get_widgets("a1"), ["w3", "w1", "w2"]);
}

// ---------------------------------------------------------------------------
// Events and revision
// ---------------------------------------------------------------------------

#[test]
fn every_operation_leaves_an_audit_event() {
    let mut store = WidgetStore::new();
    store.register_widget_area("a1", area("Area")).unwrap();
    store.register_widget("w1", widget("Comp")).unwrap();
    store.assign_widget("w1", "a1");
    store.assign_widget_area("a1", "ctx");
    store.set_widget_state("w1", RenderOutput::Nothing, json!({}));

    let names: Vec<&str> = store.events().iter().map(|e| e.event.as_str()).collect();
    assert_eq!(
        names,
        [
            "area_registered",
            "widget_registered",
            "widget_assigned",
            "area_assigned",
            "widget_state_set",
        ]
    );
    assert!(store.events().iter().all(|e| e.outcome == "ok"));
}

#[test]
fn event_records_revision_after_the_operation() {
    let mut store = WidgetStore::new();
    store.register_widget_area("a1", area("Area")).unwrap();
    assert_eq!(store.events().last().unwrap().revision, store.revision());
}

#[test]
fn drain_events_resets_the_trail() {
    let mut store = WidgetStore::new();
    store.register_widget_area("a1", area("Area")).unwrap();
    let drained = store.drain_events();
    assert_eq!(drained.len(), 1);
    assert_eq!(drained[0].component, "widget_registry");
    assert!(store.events().is_empty());

    // Draining does not disturb state or revision.
    assert!(store.is_widget_area_registered("a1"));
    assert_eq!(store.revision(), 1);
}

#[test]
fn event_cap_drops_oldest_first() {
    let mut store = WidgetStore::with_config(StoreConfig {
        max_events: 3,
        ..StoreConfig::default()
    });
    for i in 0..6 {
        store.set_widget_state(&format!("w{i}"), RenderOutput::Nothing, Value::Null);
    }
    let slugs: Vec<&str> = store
        .events()
        .iter()
        .filter_map(|e| e.widget_slug.as_deref())
        .collect();
    assert_eq!(slugs, ["w3", "w4", "w5"]);
}

#[test]
fn slug_limit_comes_from_config() {
    let mut store = WidgetStore::with_config(StoreConfig {
        max_slug_len: 4,
        ..StoreConfig::default()
    });
    assert!(store.register_widget("w1", widget("Comp")).is_ok());
    let err = store.register_widget("toolong", widget("Comp")).unwrap_err();
    assert!(matches!(err, RegistryError::InvalidWidgetDefinition { .. }));
}

// ---------------------------------------------------------------------------
// Ordered selectors
// ---------------------------------------------------------------------------

#[test]
fn widget_areas_sort_by_priority_then_slug() {
    let mut store = WidgetStore::new();
    let areas = [("summary", 10), ("detail", 10), ("hero", 1)];
    for (slug, priority) in areas {
        store
            .register_widget_area(
                slug,
                WidgetAreaDefinition {
                    priority,
                    ..area(slug)
                },
            )
            .unwrap();
        store.assign_widget_area(slug, "ctx");
    }
    assert_eq!(store.get_widget_areas("ctx"), ["hero", "detail", "summary"]);
}

#[test]
fn serialized_store_is_deterministic() {
    let build = || {
        let mut store = WidgetStore::new();
        store.register_widget_area("b", area("B")).unwrap();
        store.register_widget_area("a", area("A")).unwrap();
        store.register_widget("w2", widget("C2")).unwrap();
        store.register_widget("w1", widget("C1")).unwrap();
        store.assign_widget("w1", "a");
        store.assign_widget_area("a", "ctx");
        store
    };
    let first = serde_json::to_string(&build()).unwrap();
    let second = serde_json::to_string(&build()).unwrap();
    assert_eq!(first, second);
}
