//! Per-widget render-state tracker.
//!
//! Widgets decide their own emptiness at render time ("no data for this
//! date range") and report the outcome here; the tracker decouples that
//! per-widget decision from the cross-cutting question of whether a whole
//! dashboard section is worth showing.
//!
//! Each widget's state is a three-state automaton, `Unknown` until the
//! first report and re-enterable on every render after that — a widget
//! that had data can flip back to `Inactive` when the user narrows the
//! date range. Only the latest report is kept.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::widget_registry::ComponentRef;

// ---------------------------------------------------------------------------
// RenderState
// ---------------------------------------------------------------------------

/// Classification of a widget's last render outcome.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderState {
    /// Never reported a render outcome.
    #[default]
    Unknown,
    /// Last render produced meaningful content.
    Active,
    /// Last render explicitly produced nothing.
    Inactive,
}

impl RenderState {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }
}

impl fmt::Display for RenderState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// RenderOutput
// ---------------------------------------------------------------------------

/// What a widget's render decision produced, as reported by the caller.
///
/// An explicit tag rather than an inspected sentinel value: the reporting
/// caller states whether it rendered nothing or some content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderOutput {
    /// The widget rendered an empty/null result.
    Nothing,
    /// The widget rendered the referenced content.
    Content(ComponentRef),
}

impl RenderOutput {
    /// The render state this output classifies as.
    pub const fn state(&self) -> RenderState {
        match self {
            Self::Nothing => RenderState::Inactive,
            Self::Content(_) => RenderState::Active,
        }
    }
}

// ---------------------------------------------------------------------------
// WidgetStateEntry
// ---------------------------------------------------------------------------

/// Latest reported render outcome for one widget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WidgetStateEntry {
    pub output: RenderOutput,
    /// Opaque render props the widget reported alongside the outcome.
    pub props: Value,
}

// ---------------------------------------------------------------------------
// WidgetStateTracker
// ---------------------------------------------------------------------------

/// Records the latest render outcome per widget slug.
///
/// Absent entry means `Unknown`. Entries persist for the session; a widget
/// that unmounts simply stops reporting and its last state stays in place
/// until explicitly unset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WidgetStateTracker {
    states: BTreeMap<String, WidgetStateEntry>,
}

impl WidgetStateTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a widget's latest render outcome, overwriting any prior one.
    ///
    /// Returns `true` if the stored entry changed.
    pub fn set(&mut self, widget_slug: &str, output: RenderOutput, props: Value) -> bool {
        let entry = WidgetStateEntry { output, props };
        if self.states.get(widget_slug) == Some(&entry) {
            return false;
        }
        self.states.insert(widget_slug.to_string(), entry);
        true
    }

    /// Clear a widget's state, but only if the stored entry matches the
    /// given output and props exactly. Returns `true` if cleared.
    ///
    /// The match requirement lets a stale reporter race a newer one without
    /// clobbering the newer report.
    pub fn unset(&mut self, widget_slug: &str, output: &RenderOutput, props: &Value) -> bool {
        let matches = self
            .states
            .get(widget_slug)
            .is_some_and(|entry| entry.output == *output && entry.props == *props);
        if matches {
            self.states.remove(widget_slug);
        }
        matches
    }

    /// Current render state; `Unknown` if the widget never reported.
    pub fn state_of(&self, widget_slug: &str) -> RenderState {
        self.states
            .get(widget_slug)
            .map_or(RenderState::Unknown, |entry| entry.output.state())
    }

    /// Latest reported entry, if any.
    pub fn entry(&self, widget_slug: &str) -> Option<&WidgetStateEntry> {
        self.states.get(widget_slug)
    }

    /// Number of widgets that have reported at least once.
    pub fn reported_count(&self) -> usize {
        self.states.len()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
