use std::collections::{HashMap, HashSet};

use serde::Serialize;

use super::model::{ParsedSystem, SystemType};

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FlowDirection {
    /// The other system depends on the selected one.
    Incoming,
    /// The selected system depends on the other one.
    Outgoing,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DataFlow {
    pub system: ParsedSystem,
    pub direction: FlowDirection,
    pub shared_categories: Vec<String>,
}

/// Neighborhood of one selected system in the dependency graph.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DependencyView {
    pub selected: ParsedSystem,
    pub dependents: Vec<ParsedSystem>,
    pub dependencies: Vec<ParsedSystem>,
    pub incoming: Vec<DataFlow>,
    pub outgoing: Vec<DataFlow>,
}

impl DependencyView {
    pub fn has_connections(&self) -> bool {
        !self.dependents.is_empty() || !self.dependencies.is_empty()
    }
}

pub fn dependency_view(systems: &[ParsedSystem], selected_id: &str) -> Option<DependencyView> {
    let by_id: HashMap<&str, &ParsedSystem> = systems.iter().map(|s| (s.id.as_str(), s)).collect();
    let selected = *by_id.get(selected_id)?;

    let dependents: Vec<ParsedSystem> = systems
        .iter()
        .filter(|s| s.depends_on(selected_id))
        .cloned()
        .collect();

    let dependencies: Vec<ParsedSystem> = selected
        .dependencies
        .iter()
        .filter_map(|id| {
            let found = by_id.get(id.as_str()).copied();
            if found.is_none() {
                tracing::debug!(system_id = %selected.id, dependency_id = %id, "dangling dependency id");
            }
            found
        })
        .cloned()
        .collect();

    let incoming = dependents
        .iter()
        .map(|sys| DataFlow {
            system: sys.clone(),
            direction: FlowDirection::Incoming,
            shared_categories: shared_categories(sys, selected),
        })
        .collect();
    let outgoing = dependencies
        .iter()
        .map(|sys| DataFlow {
            system: sys.clone(),
            direction: FlowDirection::Outgoing,
            shared_categories: shared_categories(selected, sys),
        })
        .collect();

    Some(DependencyView {
        selected: selected.clone(),
        dependents,
        dependencies,
        incoming,
        outgoing,
    })
}

/// Categories of `from` that `to` also carries, in `from`'s order.
pub fn shared_categories(from: &ParsedSystem, to: &ParsedSystem) -> Vec<String> {
    let other: HashSet<&str> = to.data_categories.iter().map(String::as_str).collect();
    from.data_categories
        .iter()
        .filter(|c| other.contains(c.as_str()))
        .cloned()
        .collect()
}

/// Side-column buckets for the graph: known types in display order, empty ones omitted.
pub fn group_by_type(systems: &[ParsedSystem]) -> Vec<(SystemType, Vec<ParsedSystem>)> {
    SystemType::KNOWN_ORDER
        .iter()
        .map(|t| {
            let members: Vec<ParsedSystem> = systems
                .iter()
                .filter(|s| &s.system_type == t)
                .cloned()
                .collect();
            (t.clone(), members)
        })
        .filter(|(_, members)| !members.is_empty())
        .collect()
}
