use std::collections::{BTreeSet, HashSet};

use super::category::{data_source_type, simplify_data_category};
use super::model::{DataSourceType, ParsedSystem, PrivacyDeclaration, RawSystem, SystemType};

pub fn normalize(raw: &RawSystem) -> ParsedSystem {
    let mut full_categories: BTreeSet<String> = BTreeSet::new();
    let mut data_uses: BTreeSet<String> = BTreeSet::new();

    let privacy_declarations = raw
        .privacy_declarations
        .iter()
        .map(|decl| {
            full_categories.extend(decl.data_categories.iter().cloned());
            data_uses.insert(decl.data_use.clone());
            PrivacyDeclaration {
                name: decl.name.clone(),
                data_categories: decl
                    .data_categories
                    .iter()
                    .map(|c| simplify_data_category(c).to_string())
                    .collect(),
                data_subjects: decl.data_subjects.clone(),
                data_use: decl.data_use.clone(),
            }
        })
        .collect();

    let mut simplified: BTreeSet<String> = BTreeSet::new();
    let mut derived: BTreeSet<String> = BTreeSet::new();
    let mut provided: BTreeSet<String> = BTreeSet::new();
    for path in &full_categories {
        let leaf = simplify_data_category(path).to_string();
        match data_source_type(path) {
            DataSourceType::Derived => derived.insert(leaf.clone()),
            DataSourceType::Provided => provided.insert(leaf.clone()),
        };
        simplified.insert(leaf);
    }

    ParsedSystem {
        id: raw.id.clone(),
        name: raw.name.clone(),
        description: raw.description.clone(),
        system_type: SystemType::from(raw.system_type.as_str()),
        data_categories: simplified.into_iter().collect(),
        full_data_categories: full_categories.into_iter().collect(),
        derived_categories: derived.into_iter().collect(),
        provided_categories: provided.into_iter().collect(),
        data_uses: data_uses.into_iter().collect(),
        privacy_declarations,
        dependencies: raw.dependency_ids.clone(),
    }
}

/// Normalizes in input order; the first record for an id wins and later ones are dropped.
pub fn normalize_all(raws: &[RawSystem]) -> Vec<ParsedSystem> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut out = Vec::with_capacity(raws.len());
    for raw in raws {
        if !seen.insert(raw.id.as_str()) {
            tracing::debug!(system_id = %raw.id, name = %raw.name, "dropping duplicate system record");
            continue;
        }
        out.push(normalize(raw));
    }
    out
}
