use datamap_core::datamap::dataset::load_raw_systems;
use datamap_core::datamap::filter::FilterState;
use datamap_core::datamap::flow::{group_by_type, FlowDirection};
use datamap_core::datamap::lookup::{extract_all_categories, extract_all_data_uses, CatalogLookups};
use datamap_core::datamap::model::{DataSourceType, LayoutMode, SystemType};
use datamap_core::datamap::pipeline::{Catalog, DataMapCache};
use datamap_core::datamap::render::{render_data_map_markdown, render_system_inventory_csv};

fn catalog() -> Catalog {
    let path = format!("{}/tests/fixtures/sample_systems.json", env!("CARGO_MANIFEST_DIR"));
    Catalog::from_raw(&load_raw_systems(path).expect("fixture")).expect("catalog")
}

#[test]
fn lookups_are_sorted_projections() {
    let catalog = catalog();
    assert_eq!(
        catalog.all_data_uses(),
        &[
            "advertising.third_party",
            "improve.system",
            "provide.service",
            "provide.service.operations",
        ]
    );
    assert_eq!(
        catalog.all_categories(),
        &["bank_account", "cookie_id", "email", "location", "name"]
    );
    assert_eq!(extract_all_data_uses(catalog.systems()), catalog.all_data_uses());
    assert_eq!(extract_all_categories(catalog.systems()), catalog.all_categories());
}

#[test]
fn catalog_lookups_match_a_fresh_projection() {
    let catalog = catalog();
    assert_eq!(
        catalog.lookups(),
        &CatalogLookups::from_systems(catalog.systems())
    );
}

#[test]
fn fingerprint_is_stable_across_builds() {
    assert_eq!(catalog().fingerprint(), catalog().fingerprint());
    assert_eq!(catalog().fingerprint().len(), 64);
}

#[test]
fn data_map_runs_filter_then_group() {
    let catalog = catalog();
    let filters = FilterState::default()
        .with_layout_mode(LayoutMode::DataUse)
        .with_source_type(Some(DataSourceType::Derived));
    let view = catalog.data_map(&filters);
    assert_eq!(view.filtered_count, 2);
    assert_eq!(view.layout_mode, LayoutMode::DataUse);
    let keys: Vec<&str> = view.groups.iter().map(|g| g.group_key.as_str()).collect();
    assert_eq!(
        keys,
        vec!["advertising.third_party", "improve.system", "provide.service.operations"]
    );
}

#[test]
fn view_cache_counts_hits_and_ignores_category_order() {
    let catalog = catalog();
    let mut cache = DataMapCache::new();
    let a = FilterState::default().toggle_category("email").toggle_category("name");
    let b = FilterState::default().toggle_category("name").toggle_category("email");

    let first = cache.view(&catalog, &a).unwrap().clone();
    let second = cache.view(&catalog, &b).unwrap().clone();
    assert_eq!(first, second);
    assert_eq!(first.filtered_count, 1);
    assert_eq!(cache.misses(), 1);
    assert_eq!(cache.hits(), 1);

    cache.view(&catalog, &a.with_layout_mode(LayoutMode::DataUse)).unwrap();
    assert_eq!(cache.misses(), 2);
    assert_eq!(cache.len(), 2);
}

#[test]
fn cleared_view_cache_recomputes() {
    let catalog = catalog();
    let mut cache = DataMapCache::new();
    let filters = FilterState::default().toggle_category("email");
    let before = cache.view(&catalog, &filters).unwrap().clone();
    assert!(!cache.is_empty());

    cache.clear();
    assert!(cache.is_empty());
    assert_eq!(cache.len(), 0);

    let after = cache.view(&catalog, &filters).unwrap().clone();
    assert_eq!(before, after);
    assert_eq!(cache.misses(), 2);
    assert_eq!(cache.hits(), 0);
    assert_eq!(cache.len(), 1);
}

#[test]
fn dependents_and_dependencies_of_orders_db() {
    let catalog = catalog();
    let view = catalog.dependency_view("orders_db").unwrap();
    let dependents: Vec<&str> = view.dependents.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(dependents, vec!["checkout_service", "batch_runner"]);
    // the stale duplicate's dependency on web_app was dropped during dedup
    assert!(view.dependencies.is_empty());

    assert!(view.incoming.iter().all(|f| f.direction == FlowDirection::Incoming));
    assert_eq!(view.incoming[0].shared_categories, vec!["bank_account", "email"]);
    assert_eq!(view.incoming[1].shared_categories, vec!["email"]);
    assert!(view.outgoing.is_empty());
}

#[test]
fn outgoing_flows_annotate_shared_categories() {
    let view = catalog().dependency_view("web_app").unwrap();
    assert!(view.dependents.is_empty());
    let deps: Vec<&str> = view.outgoing.iter().map(|f| f.system.id.as_str()).collect();
    assert_eq!(deps, vec!["checkout_service", "analytics_service"]);
    assert_eq!(view.outgoing[0].shared_categories, vec!["email"]);
    assert!(view.outgoing[1].shared_categories.is_empty());

    let buckets = group_by_type(&view.dependencies);
    let types: Vec<&SystemType> = buckets.iter().map(|(t, _)| t).collect();
    assert_eq!(types, vec![&SystemType::Service]);
    assert_eq!(buckets[0].1.len(), 2);
}

#[test]
fn dangling_dependency_ids_are_skipped() {
    let view = catalog().dependency_view("analytics_service").unwrap();
    assert!(view.dependencies.is_empty());
    assert_eq!(view.dependents.len(), 1);
    assert!(view.has_connections());
    assert!(catalog().dependency_view("events_warehouse").is_none());
}

#[test]
fn renders_markdown_and_inventory() {
    let catalog = catalog();
    let view = catalog.data_map(&FilterState::default());
    let md = render_data_map_markdown(&view);
    assert!(md.contains("## Service (2)"));
    assert!(md.contains("- Checkout Service (`checkout_service`)"));
    assert!(!md.contains("batch_runner"));

    let csv = render_system_inventory_csv(catalog.systems()).unwrap();
    assert_eq!(csv.lines().count(), 7);
    assert!(csv.lines().nth(1).unwrap().starts_with("analytics_service,"));
    assert!(csv.contains("batch_runner,Batch Runner,Mainframe,improve.system,email,,email,orders_db"));
}
