//! Context activation queries.
//!
//! Answers the one question dashboard navigation needs: does this context
//! have anything worth showing? A context is active when any widget of any
//! area assigned to it currently classifies as `Active`. The reduction is
//! a logical OR — commutative and associative, so evaluation order never
//! affects the result.
//!
//! Widgets that have not reported yet contribute nothing either way; if no
//! widget in the context has reported at all, the answer is `false`
//! (fail-closed: nothing is shown until proven active).
//!
//! All queries are pure reads over the store snapshot they borrow.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::store::WidgetStore;
use crate::widget_state::RenderState;

// ---------------------------------------------------------------------------
// ActivationError
// ---------------------------------------------------------------------------

/// Errors produced by activation queries.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Serialize, Deserialize)]
pub enum ActivationError {
    /// A required slug argument was empty. Surfaced immediately — silently
    /// returning `false` would mask a caller bug.
    #[error("{argument} is required to evaluate widget activation")]
    MissingArgument { argument: String },
}

impl ActivationError {
    /// Stable error code.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::MissingArgument { .. } => "WS_MISSING_ARGUMENT",
        }
    }

    fn missing(argument: &str) -> Self {
        Self::MissingArgument {
            argument: argument.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// ContextActivationEvaluator
// ---------------------------------------------------------------------------

/// Read-only activation queries over a borrowed store.
///
/// Construct one wherever a consumer holds a store reference; the
/// evaluator keeps no state of its own, so repeated queries over an
/// unchanged store always agree.
#[derive(Debug, Clone, Copy)]
pub struct ContextActivationEvaluator<'a> {
    store: &'a WidgetStore,
}

impl<'a> ContextActivationEvaluator<'a> {
    pub fn new(store: &'a WidgetStore) -> Self {
        Self { store }
    }

    /// Whether any area assigned to the context has an active widget.
    ///
    /// Returns `false` for a context with no assigned areas, and `false`
    /// when every assigned widget is `Inactive` or has yet to report.
    pub fn is_widget_context_active(&self, context_slug: &str) -> Result<bool, ActivationError> {
        if context_slug.is_empty() {
            return Err(ActivationError::missing("context_slug"));
        }
        Ok(self.context_active(context_slug, None))
    }

    /// [`Self::is_widget_context_active`] restricted to widgets whose
    /// module dependencies are all covered by `allowed`.
    ///
    /// Used by view-only dashboards, where widgets of unshared modules
    /// must not make a section appear.
    pub fn is_widget_context_active_with_modules(
        &self,
        context_slug: &str,
        allowed: &BTreeSet<String>,
    ) -> Result<bool, ActivationError> {
        if context_slug.is_empty() {
            return Err(ActivationError::missing("context_slug"));
        }
        Ok(self.context_active(context_slug, Some(allowed)))
    }

    /// Whether a single area has an active widget. Same fail-closed rule,
    /// scoped to one area.
    pub fn is_widget_area_active(&self, area_slug: &str) -> Result<bool, ActivationError> {
        if area_slug.is_empty() {
            return Err(ActivationError::missing("area_slug"));
        }
        Ok(self.area_active(area_slug, None))
    }

    /// [`Self::is_widget_area_active`] with a module filter.
    pub fn is_widget_area_active_with_modules(
        &self,
        area_slug: &str,
        allowed: &BTreeSet<String>,
    ) -> Result<bool, ActivationError> {
        if area_slug.is_empty() {
            return Err(ActivationError::missing("area_slug"));
        }
        Ok(self.area_active(area_slug, Some(allowed)))
    }

    /// Whether a widget's latest report classified as `Active`.
    pub fn is_widget_active(&self, widget_slug: &str) -> bool {
        self.store.states().state_of(widget_slug) == RenderState::Active
    }

    fn context_active(&self, context_slug: &str, allowed: Option<&BTreeSet<String>>) -> bool {
        self.store
            .assignments()
            .areas_for_context(context_slug)
            .iter()
            .any(|area_slug| self.area_active(area_slug, allowed))
    }

    fn area_active(&self, area_slug: &str, allowed: Option<&BTreeSet<String>>) -> bool {
        self.store
            .assignments()
            .widgets_in_area(area_slug)
            .iter()
            .any(|widget_slug| {
                let Some(definition) = self.store.registry().widget(widget_slug) else {
                    return false;
                };
                if let Some(allowed) = allowed
                    && !definition.modules.is_subset(allowed)
                {
                    return false;
                }
                self.store.states().state_of(widget_slug) == RenderState::Active
            })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
