use std::collections::HashMap;

use serde::Serialize;

use super::filter::{filter_systems, FilterState};
use super::flow::{dependency_view, DependencyView};
use super::group::group_systems;
use super::lookup::CatalogLookups;
use super::model::{LayoutMode, ParsedSystem, RawSystem, SystemGroup};
use super::normalize::normalize_all;
use crate::determinism::fingerprint::fingerprint;
use crate::error::CoreResult;

/// Normalized systems together with their lookups and content fingerprint.
#[derive(Debug, Clone)]
pub struct Catalog {
    systems: Vec<ParsedSystem>,
    lookups: CatalogLookups,
    fingerprint: String,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DataMapView {
    pub layout_mode: LayoutMode,
    pub filtered_count: usize,
    pub groups: Vec<SystemGroup>,
}

impl DataMapView {
    pub fn is_empty(&self) -> bool {
        self.filtered_count == 0
    }
}

impl Catalog {
    pub fn from_raw(raws: &[RawSystem]) -> CoreResult<Self> {
        Self::from_systems(normalize_all(raws))
    }

    pub fn from_systems(systems: Vec<ParsedSystem>) -> CoreResult<Self> {
        let fingerprint = fingerprint(&systems)?;
        let lookups = CatalogLookups::from_systems(&systems);
        tracing::debug!(
            systems = systems.len(),
            data_uses = lookups.all_data_uses.len(),
            categories = lookups.all_categories.len(),
            "catalog built"
        );
        Ok(Self {
            systems,
            lookups,
            fingerprint,
        })
    }

    pub fn systems(&self) -> &[ParsedSystem] {
        &self.systems
    }

    /// Computed once at construction; callers reuse the catalog instead of re-deriving.
    pub fn lookups(&self) -> &CatalogLookups {
        &self.lookups
    }

    pub fn all_data_uses(&self) -> &[String] {
        &self.lookups.all_data_uses
    }

    pub fn all_categories(&self) -> &[String] {
        &self.lookups.all_categories
    }

    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    pub fn filter(&self, filters: &FilterState) -> Vec<ParsedSystem> {
        filter_systems(&self.systems, filters)
    }

    pub fn data_map(&self, filters: &FilterState) -> DataMapView {
        let filtered = self.filter(filters);
        DataMapView {
            layout_mode: filters.layout_mode,
            filtered_count: filtered.len(),
            groups: group_systems(&filtered, filters.layout_mode),
        }
    }

    /// Graph neighborhood over the full catalog, not the filtered subset.
    pub fn dependency_view(&self, selected_id: &str) -> Option<DependencyView> {
        dependency_view(&self.systems, selected_id)
    }
}

/// Caller-owned memo of data-map views keyed on (catalog, filter) fingerprints.
#[derive(Debug, Default)]
pub struct DataMapCache {
    views: HashMap<(String, String), DataMapView>,
    hits: u64,
    misses: u64,
}

impl DataMapCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&mut self, catalog: &Catalog, filters: &FilterState) -> CoreResult<&DataMapView> {
        let key = (catalog.fingerprint().to_string(), fingerprint(&filters.normalized())?);
        if self.views.contains_key(&key) {
            self.hits += 1;
        } else {
            self.misses += 1;
        }
        Ok(self
            .views
            .entry(key)
            .or_insert_with(|| catalog.data_map(filters)))
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }

    pub fn len(&self) -> usize {
        self.views.len()
    }

    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }

    pub fn clear(&mut self) {
        self.views.clear();
    }
}
