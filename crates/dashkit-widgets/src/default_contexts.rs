//! Canonical dashboard context and area vocabulary.
//!
//! The dashboard is split into four sections (traffic, content, speed,
//! monetization), each existing once on the main dashboard and once on the
//! entity dashboard. Context slugs name those section locations; each
//! context owns a primary widget area that product modules assign their
//! widgets into. Navigation maps a section to its anchor id and shows the
//! chip only while the section's context is active.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::store::WidgetStore;
use crate::widget_registry::{RegistryError, WidgetAreaDefinition};

// ---------------------------------------------------------------------------
// Context slugs
// ---------------------------------------------------------------------------

pub const CONTEXT_MAIN_DASHBOARD_TRAFFIC: &str = "mainDashboardTraffic";
pub const CONTEXT_MAIN_DASHBOARD_CONTENT: &str = "mainDashboardContent";
pub const CONTEXT_MAIN_DASHBOARD_SPEED: &str = "mainDashboardSpeed";
pub const CONTEXT_MAIN_DASHBOARD_MONETIZATION: &str = "mainDashboardMonetization";

pub const CONTEXT_ENTITY_DASHBOARD_TRAFFIC: &str = "entityDashboardTraffic";
pub const CONTEXT_ENTITY_DASHBOARD_CONTENT: &str = "entityDashboardContent";
pub const CONTEXT_ENTITY_DASHBOARD_SPEED: &str = "entityDashboardSpeed";
pub const CONTEXT_ENTITY_DASHBOARD_MONETIZATION: &str = "entityDashboardMonetization";

// ---------------------------------------------------------------------------
// Primary area slugs
// ---------------------------------------------------------------------------

pub const AREA_MAIN_DASHBOARD_TRAFFIC_PRIMARY: &str = "mainDashboardTrafficPrimary";
pub const AREA_MAIN_DASHBOARD_CONTENT_PRIMARY: &str = "mainDashboardContentPrimary";
pub const AREA_MAIN_DASHBOARD_SPEED_PRIMARY: &str = "mainDashboardSpeedPrimary";
pub const AREA_MAIN_DASHBOARD_MONETIZATION_PRIMARY: &str = "mainDashboardMonetizationPrimary";

pub const AREA_ENTITY_DASHBOARD_TRAFFIC_PRIMARY: &str = "entityDashboardTrafficPrimary";
pub const AREA_ENTITY_DASHBOARD_CONTENT_PRIMARY: &str = "entityDashboardContentPrimary";
pub const AREA_ENTITY_DASHBOARD_SPEED_PRIMARY: &str = "entityDashboardSpeedPrimary";
pub const AREA_ENTITY_DASHBOARD_MONETIZATION_PRIMARY: &str = "entityDashboardMonetizationPrimary";

// ---------------------------------------------------------------------------
// Navigation anchors
// ---------------------------------------------------------------------------

pub const ANCHOR_ID_TRAFFIC: &str = "traffic";
pub const ANCHOR_ID_CONTENT: &str = "content";
pub const ANCHOR_ID_SPEED: &str = "speed";
pub const ANCHOR_ID_MONETIZATION: &str = "monetization";

// ---------------------------------------------------------------------------
// DashboardType / DashboardSection
// ---------------------------------------------------------------------------

/// Which dashboard the user is viewing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DashboardType {
    /// Site-wide overview dashboard.
    Main,
    /// Dashboard for a single piece of content.
    Entity,
}

impl fmt::Display for DashboardType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Main => f.write_str("main"),
            Self::Entity => f.write_str("entity"),
        }
    }
}

/// One navigable dashboard section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DashboardSection {
    Traffic,
    Content,
    Speed,
    Monetization,
}

impl DashboardSection {
    pub const ALL: [DashboardSection; 4] = [
        Self::Traffic,
        Self::Content,
        Self::Speed,
        Self::Monetization,
    ];

    /// Scroll anchor id for the section.
    pub const fn anchor_id(self) -> &'static str {
        match self {
            Self::Traffic => ANCHOR_ID_TRAFFIC,
            Self::Content => ANCHOR_ID_CONTENT,
            Self::Speed => ANCHOR_ID_SPEED,
            Self::Monetization => ANCHOR_ID_MONETIZATION,
        }
    }
}

impl fmt::Display for DashboardSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.anchor_id())
    }
}

/// Context slug for a section on a given dashboard.
///
/// This is the lookup navigation performs for every candidate chip before
/// asking the evaluator whether the context is active.
pub const fn context_for_section(
    dashboard: DashboardType,
    section: DashboardSection,
) -> &'static str {
    match (dashboard, section) {
        (DashboardType::Main, DashboardSection::Traffic) => CONTEXT_MAIN_DASHBOARD_TRAFFIC,
        (DashboardType::Main, DashboardSection::Content) => CONTEXT_MAIN_DASHBOARD_CONTENT,
        (DashboardType::Main, DashboardSection::Speed) => CONTEXT_MAIN_DASHBOARD_SPEED,
        (DashboardType::Main, DashboardSection::Monetization) => {
            CONTEXT_MAIN_DASHBOARD_MONETIZATION
        }
        (DashboardType::Entity, DashboardSection::Traffic) => CONTEXT_ENTITY_DASHBOARD_TRAFFIC,
        (DashboardType::Entity, DashboardSection::Content) => CONTEXT_ENTITY_DASHBOARD_CONTENT,
        (DashboardType::Entity, DashboardSection::Speed) => CONTEXT_ENTITY_DASHBOARD_SPEED,
        (DashboardType::Entity, DashboardSection::Monetization) => {
            CONTEXT_ENTITY_DASHBOARD_MONETIZATION
        }
    }
}

/// Primary area slug for a section on a given dashboard.
pub const fn primary_area_for_section(
    dashboard: DashboardType,
    section: DashboardSection,
) -> &'static str {
    match (dashboard, section) {
        (DashboardType::Main, DashboardSection::Traffic) => AREA_MAIN_DASHBOARD_TRAFFIC_PRIMARY,
        (DashboardType::Main, DashboardSection::Content) => AREA_MAIN_DASHBOARD_CONTENT_PRIMARY,
        (DashboardType::Main, DashboardSection::Speed) => AREA_MAIN_DASHBOARD_SPEED_PRIMARY,
        (DashboardType::Main, DashboardSection::Monetization) => {
            AREA_MAIN_DASHBOARD_MONETIZATION_PRIMARY
        }
        (DashboardType::Entity, DashboardSection::Traffic) => AREA_ENTITY_DASHBOARD_TRAFFIC_PRIMARY,
        (DashboardType::Entity, DashboardSection::Content) => AREA_ENTITY_DASHBOARD_CONTENT_PRIMARY,
        (DashboardType::Entity, DashboardSection::Speed) => AREA_ENTITY_DASHBOARD_SPEED_PRIMARY,
        (DashboardType::Entity, DashboardSection::Monetization) => {
            AREA_ENTITY_DASHBOARD_MONETIZATION_PRIMARY
        }
    }
}

fn area_title(section: DashboardSection) -> &'static str {
    match section {
        DashboardSection::Traffic => "Find out how people are finding your site",
        DashboardSection::Content => "See how your content is doing",
        DashboardSection::Speed => "Understand how fast your site loads",
        DashboardSection::Monetization => "Track how much you're earning",
    }
}

/// Register the eight primary areas and assign each to its context.
///
/// Idempotent: running it twice leaves the store unchanged.
pub fn register_default_areas(store: &mut WidgetStore) -> Result<(), RegistryError> {
    for dashboard in [DashboardType::Main, DashboardType::Entity] {
        for section in DashboardSection::ALL {
            let area_slug = primary_area_for_section(dashboard, section);
            store.register_widget_area(
                area_slug,
                WidgetAreaDefinition::titled(area_title(section), ""),
            )?;
            store.assign_widget_area(area_slug, context_for_section(dashboard, section));
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn section_anchor_ids() {
        assert_eq!(DashboardSection::Traffic.anchor_id(), "traffic");
        assert_eq!(DashboardSection::Monetization.anchor_id(), "monetization");
    }

    #[test]
    fn context_lookup_covers_both_dashboards() {
        assert_eq!(
            context_for_section(DashboardType::Main, DashboardSection::Speed),
            CONTEXT_MAIN_DASHBOARD_SPEED
        );
        assert_eq!(
            context_for_section(DashboardType::Entity, DashboardSection::Speed),
            CONTEXT_ENTITY_DASHBOARD_SPEED
        );
    }

    #[test]
    fn default_areas_register_idempotently() {
        let mut store = WidgetStore::new();
        register_default_areas(&mut store).unwrap();
        let revision = store.revision();
        register_default_areas(&mut store).unwrap();
        assert_eq!(store.revision(), revision);
        assert_eq!(store.registry().area_count(), 8);
    }

    #[test]
    fn every_default_context_owns_exactly_its_primary_area() {
        let mut store = WidgetStore::new();
        register_default_areas(&mut store).unwrap();
        for dashboard in [DashboardType::Main, DashboardType::Entity] {
            for section in DashboardSection::ALL {
                let context = context_for_section(dashboard, section);
                assert_eq!(
                    store.get_widget_areas(context),
                    [primary_area_for_section(dashboard, section)]
                );
            }
        }
    }

    #[test]
    fn default_contexts_start_inactive() {
        let mut store = WidgetStore::new();
        register_default_areas(&mut store).unwrap();
        let evaluator = store.evaluator();
        for section in DashboardSection::ALL {
            let context = context_for_section(DashboardType::Main, section);
            assert!(!evaluator.is_widget_context_active(context).unwrap());
        }
    }
}
