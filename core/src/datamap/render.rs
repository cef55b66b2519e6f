use crate::error::CoreResult;

use super::model::{LayoutMode, ParsedSystem};
use super::pipeline::DataMapView;

pub fn render_data_map_markdown(view: &DataMapView) -> String {
    let mut out = Vec::new();
    let heading = match view.layout_mode {
        LayoutMode::SystemType => "# Data Map by System Type",
        LayoutMode::DataUse => "# Data Map by Data Use",
    };
    out.push(heading.to_string());
    out.push("".to_string());

    if view.is_empty() {
        out.push("No systems match the current filters.".to_string());
        out.push("".to_string());
        return out.join("\n");
    }

    for group in &view.groups {
        out.push(format!("## {} ({})", group.group_label, group.systems.len()));
        out.push("".to_string());
        for system in &group.systems {
            out.push(format!("- {} (`{}`)", system.name, system.id));
        }
        out.push("".to_string());
    }
    out.join("\n")
}

pub fn render_system_inventory_csv(systems: &[ParsedSystem]) -> CoreResult<String> {
    let mut rows = systems.to_vec();
    rows.sort_by(|a, b| a.id.cmp(&b.id));

    let mut wtr = csv::WriterBuilder::new().from_writer(vec![]);
    wtr.write_record([
        "id",
        "name",
        "system_type",
        "data_uses",
        "data_categories",
        "derived_categories",
        "provided_categories",
        "dependencies",
    ])?;
    for row in rows {
        wtr.write_record([
            row.id,
            row.name,
            row.system_type.to_string(),
            row.data_uses.join(";"),
            row.data_categories.join(";"),
            row.derived_categories.join(";"),
            row.provided_categories.join(";"),
            row.dependencies.join(";"),
        ])?;
    }
    let bytes = wtr.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8_lossy(&bytes).replace("\r\n", "\n"))
}
