use serde::{Deserialize, Serialize};

use super::category::category_matches;
use super::model::{DataSourceType, LayoutMode, ParsedSystem};

/// Current filter selection. `None` or empty means no constraint on that dimension.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct FilterState {
    #[serde(default)]
    pub data_use: Option<String>,
    #[serde(default)]
    pub data_categories: Vec<String>,
    #[serde(default)]
    pub data_source_type: Option<DataSourceType>,
    #[serde(default)]
    pub layout_mode: LayoutMode,
}

impl FilterState {
    pub fn with_data_use(mut self, data_use: Option<String>) -> Self {
        self.data_use = data_use;
        self
    }

    /// Adds the category if absent, removes it if present.
    pub fn toggle_category(mut self, category: &str) -> Self {
        if let Some(pos) = self.data_categories.iter().position(|c| c == category) {
            self.data_categories.remove(pos);
        } else {
            self.data_categories.push(category.to_string());
        }
        self
    }

    pub fn with_source_type(mut self, source_type: Option<DataSourceType>) -> Self {
        self.data_source_type = source_type;
        self
    }

    pub fn with_layout_mode(mut self, layout_mode: LayoutMode) -> Self {
        self.layout_mode = layout_mode;
        self
    }

    /// Drops every constraint; layout is a view choice and survives.
    pub fn cleared(&self) -> Self {
        Self {
            layout_mode: self.layout_mode,
            ..Self::default()
        }
    }

    /// Category selection is a set; sorted and deduplicated here so equal selections compare equal.
    pub fn normalized(&self) -> Self {
        let mut out = self.clone();
        out.data_categories.sort();
        out.data_categories.dedup();
        out
    }

    pub fn has_active_filters(&self) -> bool {
        self.data_use.is_some()
            || !self.data_categories.is_empty()
            || self.data_source_type.is_some()
    }
}

pub fn system_matches(system: &ParsedSystem, filters: &FilterState) -> bool {
    if let Some(data_use) = filters.data_use.as_deref() {
        if !system.data_uses.iter().any(|u| u == data_use) {
            return false;
        }
    }

    let has_all_categories = filters.data_categories.iter().all(|term| {
        system
            .full_data_categories
            .iter()
            .any(|full| category_matches(full, term))
    });
    if !has_all_categories {
        return false;
    }

    match filters.data_source_type {
        Some(DataSourceType::Derived) => !system.derived_categories.is_empty(),
        Some(DataSourceType::Provided) => !system.provided_categories.is_empty(),
        None => true,
    }
}

/// Order-preserving selection of the systems that satisfy every active predicate.
pub fn filter_systems(systems: &[ParsedSystem], filters: &FilterState) -> Vec<ParsedSystem> {
    systems
        .iter()
        .filter(|s| system_matches(s, filters))
        .cloned()
        .collect()
}
