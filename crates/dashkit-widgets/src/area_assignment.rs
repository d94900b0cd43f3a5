//! Assignment index: which widgets belong to which area, and which areas
//! serve which dashboard contexts.
//!
//! Pure relationship storage — the index never validates slugs against the
//! definition registry; the store performs the known-slug check before
//! delegating so that unknown-slug assignments stay tolerated no-ops.
//!
//! Per area the widget list is ordered (insertion order, duplicate-free);
//! context membership is a set. Contexts have no registration step of
//! their own: they exist by virtue of an area being assigned to them.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// Widget-to-area and area-to-context relationships.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AreaAssignmentIndex {
    widgets_by_area: BTreeMap<String, Vec<String>>,
    contexts_by_area: BTreeMap<String, BTreeSet<String>>,
}

impl AreaAssignmentIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a widget to an area's ordered list.
    ///
    /// Returns `false` if the widget is already in the area (the list stays
    /// duplicate-free and the original position is kept).
    pub fn assign_widget(&mut self, widget_slug: &str, area_slug: &str) -> bool {
        let widgets = self.widgets_by_area.entry(area_slug.to_string()).or_default();
        if widgets.iter().any(|slug| slug == widget_slug) {
            return false;
        }
        widgets.push(widget_slug.to_string());
        true
    }

    /// Add a context to an area's context set.
    ///
    /// Returns `false` if the area already served that context.
    pub fn assign_area_to_context(&mut self, area_slug: &str, context_slug: &str) -> bool {
        self.contexts_by_area
            .entry(area_slug.to_string())
            .or_default()
            .insert(context_slug.to_string())
    }

    /// Widgets assigned to an area, in assignment order.
    pub fn widgets_in_area(&self, area_slug: &str) -> &[String] {
        self.widgets_by_area
            .get(area_slug)
            .map_or(&[], |widgets| widgets.as_slice())
    }

    /// Areas assigned to a context, in slug order.
    pub fn areas_for_context(&self, context_slug: &str) -> Vec<&str> {
        self.contexts_by_area
            .iter()
            .filter(|(_, contexts)| contexts.contains(context_slug))
            .map(|(area, _)| area.as_str())
            .collect()
    }

    /// Areas holding a widget, in slug order. Usually one, but the model
    /// tolerates a widget shared across areas.
    pub fn areas_for_widget(&self, widget_slug: &str) -> Vec<&str> {
        self.widgets_by_area
            .iter()
            .filter(|(_, widgets)| widgets.iter().any(|slug| slug == widget_slug))
            .map(|(area, _)| area.as_str())
            .collect()
    }

    /// Contexts an area is assigned to.
    pub fn contexts_for_area(&self, area_slug: &str) -> Option<&BTreeSet<String>> {
        self.contexts_by_area.get(area_slug)
    }

    pub fn is_area_in_context(&self, area_slug: &str, context_slug: &str) -> bool {
        self.contexts_by_area
            .get(area_slug)
            .is_some_and(|contexts| contexts.contains(context_slug))
    }

    /// Every context slug that has at least one area, in slug order.
    pub fn context_slugs(&self) -> BTreeSet<&str> {
        self.contexts_by_area
            .values()
            .flat_map(|contexts| contexts.iter().map(String::as_str))
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
