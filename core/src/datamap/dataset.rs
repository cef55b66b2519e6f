use std::fs;
use std::path::Path;

use serde::Deserialize;

use super::model::RawSystem;
use crate::error::CoreResult;

#[derive(Deserialize)]
struct WrappedCatalog {
    systems: Vec<RawSystem>,
}

/// Accepts either a JSON array of systems or `{ "systems": [...] }`.
/// The leading token picks the shape, so record errors keep their field and line.
pub fn parse_raw_systems(json: &str) -> CoreResult<Vec<RawSystem>> {
    let systems = if json.trim_start().starts_with('{') {
        serde_json::from_str::<WrappedCatalog>(json)?.systems
    } else {
        serde_json::from_str::<Vec<RawSystem>>(json)?
    };
    tracing::debug!(count = systems.len(), "parsed raw system catalog");
    Ok(systems)
}

pub fn load_raw_systems(path: impl AsRef<Path>) -> CoreResult<Vec<RawSystem>> {
    let json = fs::read_to_string(path.as_ref())?;
    parse_raw_systems(&json)
}
