//! Widget store: the dependency-injected composition root.
//!
//! Owns the definition registry, the assignment index, and the render-state
//! tracker, and exposes every mutating operation widgets call during their
//! setup and render phases. Consumers hold a reference to one explicitly
//! constructed store and pass it to evaluators — there is no ambient
//! process-wide instance.
//!
//! All mutation happens synchronously on the caller's thread. The store
//! keeps a monotonically increasing revision that bumps exactly when
//! observable state changed; consumers re-run their activation queries
//! whenever the revision moves. Every operation, including tolerated
//! no-ops, leaves a structured audit event behind.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::area_assignment::AreaAssignmentIndex;
use crate::context_activation::ContextActivationEvaluator;
use crate::widget_registry::{
    RegistrationOutcome, RegistryError, WidgetAreaDefinition, WidgetDefinition, WidgetRegistry,
};
use crate::widget_state::{RenderOutput, RenderState, WidgetStateEntry, WidgetStateTracker};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

const REGISTRY_COMPONENT: &str = "widget_registry";
const ASSIGNMENT_COMPONENT: &str = "area_assignment";
const STATE_COMPONENT: &str = "widget_state";

const OUTCOME_OK: &str = "ok";
const OUTCOME_UNCHANGED: &str = "unchanged";
const OUTCOME_SKIPPED: &str = "skipped";

/// Default cap on retained audit events.
const DEFAULT_MAX_EVENTS: usize = 1024;

// ---------------------------------------------------------------------------
// StoreConfig
// ---------------------------------------------------------------------------

/// Construction-time limits for a [`WidgetStore`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Maximum slug length accepted at registration.
    pub max_slug_len: usize,
    /// Oldest audit events are dropped beyond this count.
    pub max_events: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            max_slug_len: crate::widget_registry::MAX_SLUG_LEN,
            max_events: DEFAULT_MAX_EVENTS,
        }
    }
}

// ---------------------------------------------------------------------------
// StoreEvent — structured audit record
// ---------------------------------------------------------------------------

/// Structured audit record for one store operation.
///
/// `outcome` is `"ok"` for an applied change, `"unchanged"` for an
/// idempotent repeat, and `"skipped"` for a tolerated no-op (unknown slug
/// at assignment time, mismatched unset).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreEvent {
    pub component: String,
    pub event: String,
    pub outcome: String,
    pub widget_slug: Option<String>,
    pub area_slug: Option<String>,
    pub context_slug: Option<String>,
    /// Store revision after the operation.
    pub revision: u64,
}

// ---------------------------------------------------------------------------
// WidgetStore
// ---------------------------------------------------------------------------

/// Registry, assignment index, and state tracker behind one mutation API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WidgetStore {
    config: StoreConfig,
    registry: WidgetRegistry,
    assignments: AreaAssignmentIndex,
    states: WidgetStateTracker,
    events: Vec<StoreEvent>,
    revision: u64,
}

impl WidgetStore {
    pub fn new() -> Self {
        Self::with_config(StoreConfig::default())
    }

    pub fn with_config(config: StoreConfig) -> Self {
        let registry = WidgetRegistry::with_slug_limit(config.max_slug_len);
        Self {
            config,
            registry,
            assignments: AreaAssignmentIndex::new(),
            states: WidgetStateTracker::new(),
            events: Vec::new(),
            revision: 0,
        }
    }

    // -- Registration -------------------------------------------------------

    /// Create a widget area, or update its metadata if the slug exists.
    ///
    /// Overwrites never clear the area's assigned widgets or contexts.
    pub fn register_widget_area(
        &mut self,
        area_slug: &str,
        definition: WidgetAreaDefinition,
    ) -> Result<(), RegistryError> {
        let outcome = self.registry.register_widget_area(area_slug, definition)?;
        self.record_registration(outcome, "area_registered", None, Some(area_slug));
        Ok(())
    }

    /// Create or overwrite a widget definition.
    pub fn register_widget(
        &mut self,
        widget_slug: &str,
        definition: WidgetDefinition,
    ) -> Result<(), RegistryError> {
        let outcome = self.registry.register_widget(widget_slug, definition)?;
        self.record_registration(outcome, "widget_registered", Some(widget_slug), None);
        Ok(())
    }

    // -- Assignment ---------------------------------------------------------

    /// Append a widget to an area's ordered list.
    ///
    /// Unknown widget or area slugs are tolerated as a silent no-op:
    /// registration ordering is not guaranteed across independent modules,
    /// so an early assignment must not crash. The skip is still recorded
    /// as an audit event.
    pub fn assign_widget(&mut self, widget_slug: &str, area_slug: &str) {
        if !self.registry.has_widget(widget_slug) || !self.registry.has_area(area_slug) {
            self.push_event(
                ASSIGNMENT_COMPONENT,
                "widget_assigned",
                OUTCOME_SKIPPED,
                Some(widget_slug),
                Some(area_slug),
                None,
            );
            return;
        }
        let outcome = if self.assignments.assign_widget(widget_slug, area_slug) {
            self.revision += 1;
            OUTCOME_OK
        } else {
            OUTCOME_UNCHANGED
        };
        self.push_event(
            ASSIGNMENT_COMPONENT,
            "widget_assigned",
            outcome,
            Some(widget_slug),
            Some(area_slug),
            None,
        );
    }

    /// Add a context to an area's context set.
    ///
    /// Contexts need no registration step of their own; an unknown *area*
    /// slug is the tolerated no-op here.
    pub fn assign_widget_area(&mut self, area_slug: &str, context_slug: &str) {
        if !self.registry.has_area(area_slug) {
            self.push_event(
                ASSIGNMENT_COMPONENT,
                "area_assigned",
                OUTCOME_SKIPPED,
                None,
                Some(area_slug),
                Some(context_slug),
            );
            return;
        }
        let outcome = if self.assignments.assign_area_to_context(area_slug, context_slug) {
            self.revision += 1;
            OUTCOME_OK
        } else {
            OUTCOME_UNCHANGED
        };
        self.push_event(
            ASSIGNMENT_COMPONENT,
            "area_assigned",
            outcome,
            None,
            Some(area_slug),
            Some(context_slug),
        );
    }

    // -- Render state -------------------------------------------------------

    /// Record a widget's latest render outcome. Latest report wins; no
    /// history is kept. The tracker accepts reports for slugs the registry
    /// has not (yet) seen — activation only ever consults assigned,
    /// registered widgets.
    pub fn set_widget_state(&mut self, widget_slug: &str, output: RenderOutput, props: Value) {
        let outcome = if self.states.set(widget_slug, output, props) {
            self.revision += 1;
            OUTCOME_OK
        } else {
            OUTCOME_UNCHANGED
        };
        self.push_event(
            STATE_COMPONENT,
            "widget_state_set",
            outcome,
            Some(widget_slug),
            None,
            None,
        );
    }

    /// Clear a widget's state if the stored entry matches exactly.
    pub fn unset_widget_state(&mut self, widget_slug: &str, output: &RenderOutput, props: &Value) {
        let outcome = if self.states.unset(widget_slug, output, props) {
            self.revision += 1;
            OUTCOME_OK
        } else {
            OUTCOME_SKIPPED
        };
        self.push_event(
            STATE_COMPONENT,
            "widget_state_unset",
            outcome,
            Some(widget_slug),
            None,
            None,
        );
    }

    // -- Selectors ----------------------------------------------------------

    pub fn get_widget(&self, widget_slug: &str) -> Option<&WidgetDefinition> {
        self.registry.widget(widget_slug)
    }

    pub fn get_widget_area(&self, area_slug: &str) -> Option<&WidgetAreaDefinition> {
        self.registry.area(area_slug)
    }

    pub fn is_widget_registered(&self, widget_slug: &str) -> bool {
        self.registry.has_widget(widget_slug)
    }

    pub fn is_widget_area_registered(&self, area_slug: &str) -> bool {
        self.registry.has_area(area_slug)
    }

    /// Areas assigned to a context, ordered by (priority, slug).
    pub fn get_widget_areas(&self, context_slug: &str) -> Vec<&str> {
        let mut slugs = self.assignments.areas_for_context(context_slug);
        slugs.sort_by(|a, b| {
            let pa = self.registry.area(a).map_or(u32::MAX, |d| d.priority);
            let pb = self.registry.area(b).map_or(u32::MAX, |d| d.priority);
            pa.cmp(&pb).then_with(|| a.cmp(b))
        });
        slugs
    }

    /// Widgets assigned to an area, in assignment order.
    pub fn get_widgets(&self, area_slug: &str) -> &[String] {
        self.assignments.widgets_in_area(area_slug)
    }

    /// Current render state; `Unknown` if the widget never reported.
    pub fn get_widget_state(&self, widget_slug: &str) -> RenderState {
        self.states.state_of(widget_slug)
    }

    /// Latest reported entry, if any.
    pub fn get_widget_state_entry(&self, widget_slug: &str) -> Option<&WidgetStateEntry> {
        self.states.entry(widget_slug)
    }

    /// Activation queries over the current snapshot.
    pub fn evaluator(&self) -> ContextActivationEvaluator<'_> {
        ContextActivationEvaluator::new(self)
    }

    // -- Observation --------------------------------------------------------

    /// Bumps exactly when observable state changed. Consumers re-run their
    /// activation queries when this moves.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Retained audit events, oldest first.
    pub fn events(&self) -> &[StoreEvent] {
        &self.events
    }

    /// Drain accumulated audit events.
    pub fn drain_events(&mut self) -> Vec<StoreEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    // -- Component access (read-only) ---------------------------------------

    pub fn registry(&self) -> &WidgetRegistry {
        &self.registry
    }

    pub fn assignments(&self) -> &AreaAssignmentIndex {
        &self.assignments
    }

    pub fn states(&self) -> &WidgetStateTracker {
        &self.states
    }

    // -- Internal helpers ---------------------------------------------------

    fn record_registration(
        &mut self,
        outcome: RegistrationOutcome,
        event: &str,
        widget_slug: Option<&str>,
        area_slug: Option<&str>,
    ) {
        let outcome = if outcome.changed() {
            self.revision += 1;
            OUTCOME_OK
        } else {
            OUTCOME_UNCHANGED
        };
        self.push_event(
            REGISTRY_COMPONENT,
            event,
            outcome,
            widget_slug,
            area_slug,
            None,
        );
    }

    fn push_event(
        &mut self,
        component: &str,
        event: &str,
        outcome: &str,
        widget_slug: Option<&str>,
        area_slug: Option<&str>,
        context_slug: Option<&str>,
    ) {
        if self.events.len() >= self.config.max_events {
            self.events.remove(0);
        }
        self.events.push(StoreEvent {
            component: component.to_string(),
            event: event.to_string(),
            outcome: outcome.to_string(),
            widget_slug: widget_slug.map(str::to_string),
            area_slug: area_slug.map(str::to_string),
            context_slug: context_slug.map(str::to_string),
            revision: self.revision,
        });
    }
}

impl Default for WidgetStore {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
