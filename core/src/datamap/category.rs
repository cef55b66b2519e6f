use super::model::DataSourceType;

const DERIVED_MARKER: &str = ".derived.";

/// Leaf segment of a dotted category path: `user.derived.identifiable.location` -> `location`.
pub fn simplify_data_category(full_category: &str) -> &str {
    full_category.rsplit('.').next().unwrap_or(full_category)
}

/// Anything without an interior `derived` segment counts as provided, malformed paths included.
pub fn data_source_type(full_category: &str) -> DataSourceType {
    if full_category.contains(DERIVED_MARKER) {
        DataSourceType::Derived
    } else {
        DataSourceType::Provided
    }
}

/// Filter term match: substring of the full path, or exact leaf name.
pub fn category_matches(full_category: &str, term: &str) -> bool {
    full_category.contains(term) || simplify_data_category(full_category) == term
}
