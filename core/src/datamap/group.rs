use std::collections::HashMap;

use super::format::{format_data_use, locale_compare};
use super::model::{LayoutMode, ParsedSystem, SystemGroup, SystemType};

pub const UNCATEGORIZED_KEY: &str = "uncategorized";

pub fn group_systems(systems: &[ParsedSystem], layout_mode: LayoutMode) -> Vec<SystemGroup> {
    match layout_mode {
        LayoutMode::SystemType => group_by_system_type(systems),
        LayoutMode::DataUse => group_by_data_use(systems),
    }
}

/// Known types only, in display order; empty buckets are omitted.
fn group_by_system_type(systems: &[ParsedSystem]) -> Vec<SystemGroup> {
    for system in systems.iter().filter(|s| !s.system_type.is_known()) {
        tracing::debug!(
            system_id = %system.id,
            system_type = %system.system_type,
            "system type has no group; excluded from system_type layout"
        );
    }

    SystemType::KNOWN_ORDER
        .iter()
        .filter_map(|system_type| {
            let members: Vec<ParsedSystem> = systems
                .iter()
                .filter(|s| &s.system_type == system_type)
                .cloned()
                .collect();
            if members.is_empty() {
                return None;
            }
            Some(SystemGroup {
                group_key: system_type.to_string(),
                group_label: system_type.to_string(),
                systems: members,
            })
        })
        .collect()
}

fn group_by_data_use(systems: &[ParsedSystem]) -> Vec<SystemGroup> {
    let mut groups: HashMap<&str, Vec<ParsedSystem>> = HashMap::new();

    for system in systems {
        if system.data_uses.is_empty() {
            push_unique(groups.entry(UNCATEGORIZED_KEY).or_default(), system);
            continue;
        }
        for data_use in &system.data_uses {
            push_unique(groups.entry(data_use.as_str()).or_default(), system);
        }
    }

    let mut keyed: Vec<(&str, Vec<ParsedSystem>)> = groups.into_iter().collect();
    keyed.sort_by(|(a, _), (b, _)| locale_compare(a, b));
    keyed
        .into_iter()
        .map(|(key, members)| SystemGroup {
            group_key: key.to_string(),
            group_label: format_data_use(key),
            systems: members,
        })
        .collect()
}

fn push_unique(members: &mut Vec<ParsedSystem>, system: &ParsedSystem) {
    if !members.iter().any(|m| m.id == system.id) {
        members.push(system.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn system(id: &str, system_type: &str, data_uses: &[&str]) -> ParsedSystem {
        ParsedSystem {
            id: id.to_string(),
            name: id.to_uppercase(),
            description: String::new(),
            system_type: SystemType::from(system_type),
            data_categories: vec![],
            full_data_categories: vec![],
            derived_categories: vec![],
            provided_categories: vec![],
            data_uses: data_uses.iter().map(|u| u.to_string()).collect(),
            privacy_declarations: vec![],
            dependencies: vec![],
        }
    }

    fn ids(group: &SystemGroup) -> Vec<&str> {
        group.systems.iter().map(|s| s.id.as_str()).collect()
    }

    #[test]
    fn system_type_groups_follow_fixed_order_and_skip_empty() {
        let groups = group_systems(
            &[
                system("warehouse", "Database", &[]),
                system("web", "Application", &[]),
                system("queue", "Mainframe", &[]),
                system("mobile", "Application", &[]),
            ],
            LayoutMode::SystemType,
        );
        let keys: Vec<&str> = groups.iter().map(|g| g.group_key.as_str()).collect();
        assert_eq!(keys, vec!["Application", "Database"]);
        assert_eq!(groups[0].group_label, "Application");
        assert_eq!(ids(&groups[0]), vec!["web", "mobile"]);
        assert_eq!(ids(&groups[1]), vec!["warehouse"]);
    }

    #[test]
    fn data_use_groups_fan_out_and_sort() {
        let groups = group_systems(
            &[
                system("a", "Service", &["marketing.advertising", "improve.system"]),
                system("b", "Service", &[]),
                system("c", "Service", &["improve.system"]),
            ],
            LayoutMode::DataUse,
        );
        let keys: Vec<&str> = groups.iter().map(|g| g.group_key.as_str()).collect();
        assert_eq!(
            keys,
            vec!["improve.system", "marketing.advertising", "uncategorized"]
        );
        assert_eq!(ids(&groups[0]), vec!["a", "c"]);
        assert_eq!(ids(&groups[1]), vec!["a"]);
        assert_eq!(ids(&groups[2]), vec!["b"]);
        assert_eq!(groups[0].group_label, "Improve › System");
        assert_eq!(groups[2].group_label, "Uncategorized");
    }

    #[test]
    fn accented_data_use_keys_sort_by_base_letter() {
        let groups = group_systems(
            &[system("a", "Service", &["zebra.use", "étude.use"])],
            LayoutMode::DataUse,
        );
        let keys: Vec<&str> = groups.iter().map(|g| g.group_key.as_str()).collect();
        assert_eq!(keys, vec!["étude.use", "zebra.use"]);
        assert_eq!(groups[0].group_label, "Étude › Use");
    }

    #[test]
    fn repeated_system_lands_once_per_group() {
        let groups = group_systems(
            &[
                system("a", "Service", &["analytics"]),
                system("a", "Service", &["analytics"]),
            ],
            LayoutMode::DataUse,
        );
        assert_eq!(groups.len(), 1);
        assert_eq!(ids(&groups[0]), vec!["a"]);
    }

    #[test]
    fn empty_input_yields_no_groups() {
        assert!(group_systems(&[], LayoutMode::SystemType).is_empty());
        assert!(group_systems(&[], LayoutMode::DataUse).is_empty());
    }
}
