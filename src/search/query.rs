use serde::Serialize;
use std::collections::BTreeSet;

use crate::model::types::{Category, Record, Tab};
use crate::search::filter;
use crate::search::normalize::normalize;
use crate::search::rank;
use crate::store::RecordStore;

/// Current filter and search selection.
///
/// Immutable: every interaction produces a new state through one of the
/// transition methods. Category and nature selections are sets; the
/// `toggle_*` transitions keep them at zero or one element.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterState {
    tab: Tab,
    categories: BTreeSet<Category>,
    natures: BTreeSet<String>,
    search: String,
}

impl FilterState {
    pub fn new(tab: Tab) -> Self {
        Self {
            tab,
            ..Default::default()
        }
    }

    pub fn tab(&self) -> Tab {
        self.tab
    }

    pub fn categories(&self) -> &BTreeSet<Category> {
        &self.categories
    }

    /// Selected nature values, lowercased.
    pub fn natures(&self) -> &BTreeSet<String> {
        &self.natures
    }

    /// Normalized search string.
    pub fn search(&self) -> &str {
        &self.search
    }

    /// Activate `tab`. Changing tabs clears category and nature selections.
    pub fn switch_tab(&self, tab: Tab) -> Self {
        if tab == self.tab {
            return self.clone();
        }
        Self {
            tab,
            categories: BTreeSet::new(),
            natures: BTreeSet::new(),
            search: self.search.clone(),
        }
    }

    /// Select `category`, or clear the selection if it is already the
    /// active one. Categories of the other tab are ignored.
    pub fn toggle_category(&self, category: Category) -> Self {
        if category.tab() != self.tab {
            tracing::debug!(
                category = category.key(),
                tab = self.tab.as_str(),
                "ignoring category outside active tab"
            );
            return self.clone();
        }
        let mut next = self.clone();
        let already_active = next.categories.contains(&category);
        next.categories.clear();
        if !already_active {
            next.categories.insert(category);
        }
        next
    }

    /// Select the nature `value`, or clear the selection if it is already
    /// the active one.
    pub fn toggle_nature(&self, value: &str) -> Self {
        let value = value.to_lowercase();
        let mut next = self.clone();
        let already_active = next.natures.contains(&value);
        next.natures.clear();
        if !already_active {
            next.natures.insert(value);
        }
        next
    }

    /// Replace the search text; it is stored normalized.
    pub fn with_search(&self, text: &str) -> Self {
        Self {
            search: normalize(text),
            ..self.clone()
        }
    }

    /// Replace the category selection with an arbitrary set.
    pub fn with_categories(&self, categories: impl IntoIterator<Item = Category>) -> Self {
        Self {
            categories: categories.into_iter().collect(),
            ..self.clone()
        }
    }

    /// Replace the nature selection with an arbitrary set.
    pub fn with_natures<S: AsRef<str>>(&self, natures: impl IntoIterator<Item = S>) -> Self {
        Self {
            natures: natures
                .into_iter()
                .map(|s| s.as_ref().to_lowercase())
                .collect(),
            ..self.clone()
        }
    }
}

/// Outcome of one pipeline evaluation.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryOutcome<'a> {
    /// Ranked, never empty.
    Results(Vec<&'a Record>),
    /// Nothing matched; rendered as an informational message.
    NoResults { tab: Tab },
}

impl<'a> QueryOutcome<'a> {
    pub fn records(&self) -> &[&'a Record] {
        match self {
            Self::Results(records) => records,
            Self::NoResults { .. } => &[],
        }
    }

    pub fn len(&self) -> usize {
        self.records().len()
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::NoResults { .. })
    }
}

/// Filter then rank the records selected by `state`.
///
/// Pure: the same store and state always give the same ordered output.
pub fn evaluate<'a>(store: &'a RecordStore, state: &FilterState) -> QueryOutcome<'a> {
    let matched = filter::filter(store, state);
    tracing::debug!(
        tab = state.tab().as_str(),
        categories = state.categories().len(),
        natures = state.natures().len(),
        search = state.search(),
        matched = matched.len(),
        "evaluate"
    );
    if matched.is_empty() {
        return QueryOutcome::NoResults { tab: state.tab() };
    }
    QueryOutcome::Results(rank::rank(matched))
}
