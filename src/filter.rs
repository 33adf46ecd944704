//! Search filtering over catalog records
//!
//! A query matches a record when, trimmed and compared case-insensitively, it
//! is a substring of the record's name or description.

use crate::catalog::CatalogRecord;

/// Returns true if `item` matches `query`
///
/// An empty or whitespace-only query matches everything.
pub fn matches<T: CatalogRecord>(item: &T, query: &str) -> bool {
    let needle = query.trim().to_lowercase();
    needle.is_empty() || matches_needle(item, &needle)
}

/// Returns the records matching `query`, in their original order
pub fn filter_items<'a, T: CatalogRecord>(items: &'a [T], query: &str) -> Vec<&'a T> {
    let needle = query.trim().to_lowercase();
    items
        .iter()
        .filter(|item| needle.is_empty() || matches_needle(*item, &needle))
        .collect()
}

/// `needle` must already be trimmed and lowercased
fn matches_needle<T: CatalogRecord>(item: &T, needle: &str) -> bool {
    item.name().to_lowercase().contains(needle)
        || item.description().to_lowercase().contains(needle)
}
