//! Widget and widget-area definition registry.
//!
//! Holds the immutable-once-registered definitions that the rest of the
//! store operates on: widgets (a slug bound to an opaque renderable unit)
//! and widget areas (ordered groupings of widgets displayed together).
//! Registration is last-write-wins: re-registering a slug replaces its
//! definition without touching assignments or tracked render state.
//!
//! `BTreeMap` for deterministic ordering.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Maximum length of a widget, area, or context slug (bytes).
pub const MAX_SLUG_LEN: usize = 256;

/// Default render-ordering priority for widgets.
pub const DEFAULT_WIDGET_PRIORITY: u32 = 10;

/// Default ordering priority for widget areas within a context.
pub const DEFAULT_AREA_PRIORITY: u32 = 10;

// ---------------------------------------------------------------------------
// RegistryError
// ---------------------------------------------------------------------------

/// Errors produced by registration operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Serialize, Deserialize)]
pub enum RegistryError {
    /// Widget definition rejected (missing component ref, bad slug).
    #[error("invalid widget definition for {slug:?}: {reason}")]
    InvalidWidgetDefinition { slug: String, reason: String },
    /// Widget-area definition rejected (bad slug).
    #[error("invalid widget area definition for {slug:?}: {reason}")]
    InvalidAreaDefinition { slug: String, reason: String },
}

impl RegistryError {
    /// Stable error code.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidWidgetDefinition { .. } => "WS_INVALID_WIDGET_DEFINITION",
            Self::InvalidAreaDefinition { .. } => "WS_INVALID_AREA_DEFINITION",
        }
    }
}

// ---------------------------------------------------------------------------
// ComponentRef — opaque reference to a renderable unit
// ---------------------------------------------------------------------------

/// Opaque reference to a renderable unit.
///
/// The registry never interprets the reference; it is resolved by the
/// rendering layer that embeds the store. The only structural requirement
/// is that a registered widget's reference is non-empty.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ComponentRef(String);

impl ComponentRef {
    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ComponentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// WidgetWidth / AreaStyle — presentation hints, opaque to activation
// ---------------------------------------------------------------------------

/// Horizontal span a widget requests within its area.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WidgetWidth {
    #[default]
    Quarter,
    Half,
    Full,
}

impl WidgetWidth {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Quarter => "quarter",
            Self::Half => "half",
            Self::Full => "full",
        }
    }
}

impl fmt::Display for WidgetWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Layout style of a widget area.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AreaStyle {
    /// Each widget rendered in its own box.
    #[default]
    Boxes,
    /// All widgets rendered together in one combined box.
    Composite,
}

impl AreaStyle {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Boxes => "boxes",
            Self::Composite => "composite",
        }
    }
}

impl fmt::Display for AreaStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// WidgetDefinition
// ---------------------------------------------------------------------------

/// Definition of a registered widget.
///
/// Everything except `component` is a hint for collaborators (renderers,
/// module gating); the activation rule itself only ever consults the
/// tracked render state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetDefinition {
    /// Renderable unit bound to this widget. Mandatory.
    pub component: ComponentRef,
    /// Render ordering within the area (lower renders first).
    pub priority: u32,
    /// Requested horizontal span.
    pub width: WidgetWidth,
    /// Whether the renderer should wrap the widget in standard chrome.
    pub wrap_widget: bool,
    /// External-resource dependencies (module slugs) this widget needs.
    pub modules: BTreeSet<String>,
}

impl WidgetDefinition {
    /// Definition with default priority, width, and wrapping.
    pub fn new(component: ComponentRef) -> Self {
        Self {
            component,
            priority: DEFAULT_WIDGET_PRIORITY,
            width: WidgetWidth::default(),
            wrap_widget: true,
            modules: BTreeSet::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// WidgetAreaDefinition
// ---------------------------------------------------------------------------

/// Definition of a widget area: descriptive metadata only.
///
/// Which widgets the area holds and which contexts it serves live in the
/// assignment index, so metadata overwrites never disturb them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetAreaDefinition {
    pub title: String,
    pub subtitle: String,
    pub style: AreaStyle,
    /// Orders areas within a context (lower first).
    pub priority: u32,
    pub has_new_badge: bool,
}

impl WidgetAreaDefinition {
    pub fn titled(title: impl Into<String>, subtitle: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            subtitle: subtitle.into(),
            ..Self::default()
        }
    }
}

impl Default for WidgetAreaDefinition {
    fn default() -> Self {
        Self {
            title: String::new(),
            subtitle: String::new(),
            style: AreaStyle::default(),
            priority: DEFAULT_AREA_PRIORITY,
            has_new_badge: false,
        }
    }
}

// ---------------------------------------------------------------------------
// RegistrationOutcome
// ---------------------------------------------------------------------------

/// What a registration call did to the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RegistrationOutcome {
    /// Slug was not registered before.
    Created,
    /// Slug existed; definition replaced with a different one.
    Updated,
    /// Slug existed with an identical definition.
    Unchanged,
}

impl RegistrationOutcome {
    /// Whether observable registry state changed.
    pub const fn changed(self) -> bool {
        !matches!(self, Self::Unchanged)
    }
}

// ---------------------------------------------------------------------------
// WidgetRegistry
// ---------------------------------------------------------------------------

/// Definition tables for widgets and widget areas.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetRegistry {
    widgets: BTreeMap<String, WidgetDefinition>,
    areas: BTreeMap<String, WidgetAreaDefinition>,
    max_slug_len: usize,
}

impl WidgetRegistry {
    pub fn new() -> Self {
        Self::with_slug_limit(MAX_SLUG_LEN)
    }

    pub fn with_slug_limit(max_slug_len: usize) -> Self {
        Self {
            widgets: BTreeMap::new(),
            areas: BTreeMap::new(),
            max_slug_len,
        }
    }

    /// Register or overwrite a widget definition.
    ///
    /// The component ref is mandatory; a definition without one is a
    /// programmer error surfaced immediately.
    pub fn register_widget(
        &mut self,
        slug: &str,
        definition: WidgetDefinition,
    ) -> Result<RegistrationOutcome, RegistryError> {
        self.check_slug(slug)
            .map_err(|reason| RegistryError::InvalidWidgetDefinition {
                slug: slug.to_string(),
                reason,
            })?;
        if definition.component.is_empty() {
            return Err(RegistryError::InvalidWidgetDefinition {
                slug: slug.to_string(),
                reason: "a component ref is required to register a widget".to_string(),
            });
        }
        Ok(Self::insert(&mut self.widgets, slug, definition))
    }

    /// Register or overwrite a widget-area definition.
    pub fn register_widget_area(
        &mut self,
        slug: &str,
        definition: WidgetAreaDefinition,
    ) -> Result<RegistrationOutcome, RegistryError> {
        self.check_slug(slug)
            .map_err(|reason| RegistryError::InvalidAreaDefinition {
                slug: slug.to_string(),
                reason,
            })?;
        Ok(Self::insert(&mut self.areas, slug, definition))
    }

    pub fn widget(&self, slug: &str) -> Option<&WidgetDefinition> {
        self.widgets.get(slug)
    }

    pub fn area(&self, slug: &str) -> Option<&WidgetAreaDefinition> {
        self.areas.get(slug)
    }

    pub fn has_widget(&self, slug: &str) -> bool {
        self.widgets.contains_key(slug)
    }

    pub fn has_area(&self, slug: &str) -> bool {
        self.areas.contains_key(slug)
    }

    pub fn widget_count(&self) -> usize {
        self.widgets.len()
    }

    pub fn area_count(&self) -> usize {
        self.areas.len()
    }

    /// Registered widget slugs in deterministic order.
    pub fn widget_slugs(&self) -> impl Iterator<Item = &str> {
        self.widgets.keys().map(String::as_str)
    }

    /// Registered area slugs in deterministic order.
    pub fn area_slugs(&self) -> impl Iterator<Item = &str> {
        self.areas.keys().map(String::as_str)
    }

    fn check_slug(&self, slug: &str) -> Result<(), String> {
        if slug.is_empty() {
            return Err("slug must not be empty".to_string());
        }
        if slug.len() > self.max_slug_len {
            return Err(format!(
                "slug exceeds {} bytes (got {})",
                self.max_slug_len,
                slug.len()
            ));
        }
        Ok(())
    }

    fn insert<T: PartialEq>(
        table: &mut BTreeMap<String, T>,
        slug: &str,
        definition: T,
    ) -> RegistrationOutcome {
        let outcome = match table.get(slug) {
            None => RegistrationOutcome::Created,
            Some(existing) if *existing == definition => RegistrationOutcome::Unchanged,
            Some(_) => RegistrationOutcome::Updated,
        };
        if outcome.changed() {
            table.insert(slug.to_string(), definition);
        }
        outcome
    }
}

impl Default for WidgetRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
