//! Record predicates: category pre-filter, nature facet, free text.
//!
//! All predicates are total. Selections are general sets even though the
//! state transitions only ever produce zero or one element.

use std::collections::BTreeSet;

use crate::model::types::{Category, Record, Tab};
use crate::search::normalize::{contains_normalized, normalize};
use crate::search::query::FilterState;
use crate::store::RecordStore;

/// Categories of `tab` that take part in a query, in canonical order.
///
/// An empty selection includes every category of the tab.
pub fn included_categories(
    tab: Tab,
    selection: &BTreeSet<Category>,
) -> impl Iterator<Item = Category> + '_ {
    tab.categories()
        .iter()
        .copied()
        .filter(move |c| selection.is_empty() || selection.contains(c))
}

/// Nature facet. Comparison is exact after lowercasing both sides; an
/// absent `natureza` compares as "".
pub fn matches_nature(record: &Record, selection: &BTreeSet<String>) -> bool {
    if selection.is_empty() {
        return true;
    }
    let natureza = record
        .natureza
        .as_deref()
        .map(str::to_lowercase)
        .unwrap_or_default();
    selection.iter().any(|s| s.to_lowercase() == natureza)
}

/// Free-text predicate: any searchable string contains `search` after
/// normalization on both sides.
pub fn matches_text(record: &Record, search: &str) -> bool {
    matches_normalized_text(record, &normalize(search))
}

/// Same as [`matches_text`] with a needle that is already normalized.
pub fn matches_normalized_text(record: &Record, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    record
        .searchable_text()
        .any(|text| contains_normalized(text, needle))
}

/// Apply category inclusion, nature and text predicates. Output order is
/// store order within each category, categories in canonical order.
pub fn filter<'a>(store: &'a RecordStore, state: &FilterState) -> Vec<&'a Record> {
    let needle = normalize(state.search());
    included_categories(state.tab(), state.categories())
        .flat_map(|category| store.get_by_category(category))
        .filter(|record| matches_nature(record, state.natures()))
        .filter(|record| matches_normalized_text(record, &needle))
        .collect()
}
