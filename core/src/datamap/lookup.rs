use std::collections::BTreeSet;

use serde::Serialize;

use super::model::ParsedSystem;

/// Option lists for the filter controls.
#[derive(Debug, Clone, Serialize, PartialEq, Eq, Default)]
pub struct CatalogLookups {
    pub all_data_uses: Vec<String>,
    pub all_categories: Vec<String>,
}

impl CatalogLookups {
    pub fn from_systems(systems: &[ParsedSystem]) -> Self {
        Self {
            all_data_uses: extract_all_data_uses(systems),
            all_categories: extract_all_categories(systems),
        }
    }
}

pub fn extract_all_data_uses(systems: &[ParsedSystem]) -> Vec<String> {
    systems
        .iter()
        .flat_map(|s| s.data_uses.iter().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Simplified (leaf) categories across all systems.
pub fn extract_all_categories(systems: &[ParsedSystem]) -> Vec<String> {
    systems
        .iter()
        .flat_map(|s| s.data_categories.iter().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
