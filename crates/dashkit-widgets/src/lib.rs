#![forbid(unsafe_code)]
//! Widget activation registry for dashboard navigation.
//!
//! Dashboard widgets register themselves into named areas, areas are
//! assigned to contexts (a context is one navigable dashboard location),
//! and widgets report how their latest render went. Navigation then asks
//! one question per candidate section: [`ContextActivationEvaluator::is_widget_context_active`]
//! — does this context have at least one widget currently rendering
//! meaningful content?
//!
//! The store is an explicitly constructed instance, not ambient global
//! state: callers hold a [`WidgetStore`] and pass references to
//! evaluators. Mutations are synchronous single-thread operations;
//! consumers detect change through [`WidgetStore::revision`] and re-run
//! their queries.
//!
//! ```
//! use dashkit_widgets::{
//!     ComponentRef, RenderOutput, WidgetAreaDefinition, WidgetDefinition, WidgetStore,
//! };
//!
//! let mut store = WidgetStore::new();
//! store.register_widget_area("header", WidgetAreaDefinition::titled("Header", ""))?;
//! store.assign_widget_area("header", "dashboard");
//! store.register_widget("clicks", WidgetDefinition::new(ComponentRef::new("ClicksChart")))?;
//! store.assign_widget("clicks", "header");
//!
//! // Nothing has rendered yet: fail closed.
//! assert!(!store.evaluator().is_widget_context_active("dashboard")?);
//!
//! store.set_widget_state(
//!     "clicks",
//!     RenderOutput::Content(ComponentRef::new("ClicksChart")),
//!     serde_json::Value::Null,
//! );
//! assert!(store.evaluator().is_widget_context_active("dashboard")?);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod area_assignment;
pub mod context_activation;
pub mod default_contexts;
pub mod store;
pub mod widget_registry;
pub mod widget_state;

pub use area_assignment::AreaAssignmentIndex;
pub use context_activation::{ActivationError, ContextActivationEvaluator};
pub use store::{StoreConfig, StoreEvent, WidgetStore};
pub use widget_registry::{
    AreaStyle, ComponentRef, RegistrationOutcome, RegistryError, WidgetAreaDefinition,
    WidgetDefinition, WidgetRegistry, WidgetWidth,
};
pub use widget_state::{RenderOutput, RenderState, WidgetStateEntry, WidgetStateTracker};
