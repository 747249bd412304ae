//! Client-side filtering of the equipment list
//!
//! Facets are derived from the records currently loaded; a query keeps a
//! record when the free-text term and every set criterion match.

use std::collections::BTreeSet;

use crate::models::{status, Equipment, SearchQuery};

/// A status choice offered by the filter panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusFacet {
    pub value: &'static str,
    pub label: String,
}

/// Distinct filterable values present in the data, each list sorted
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Facets {
    pub statuses: Vec<StatusFacet>,
    pub categories: Vec<String>,
    pub brands: Vec<String>,
}

impl Facets {
    pub fn is_empty(&self) -> bool {
        self.statuses.is_empty() && self.categories.is_empty() && self.brands.is_empty()
    }
}

/// Compute the facets of a record list.
///
/// Statuses are normalized and unrecognized ones dropped. Categories and
/// brands are kept verbatim, skipping blank values.
pub fn available_facets(records: &[Equipment]) -> Facets {
    let statuses: BTreeSet<&'static str> = records
        .iter()
        .filter_map(|r| status::normalize(&r.status))
        .collect();

    Facets {
        statuses: statuses
            .into_iter()
            .map(|value| StatusFacet {
                value,
                label: status::label(value),
            })
            .collect(),
        categories: distinct_non_blank(records.iter().map(|r| r.category.as_str())),
        brands: distinct_non_blank(records.iter().map(|r| r.brand.as_str())),
    }
}

fn distinct_non_blank<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    values
        .filter(|v| !v.trim().is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Whether a record satisfies the query
pub fn matches(record: &Equipment, query: &SearchQuery) -> bool {
    let term = query.term.to_lowercase();
    let criteria = &query.criteria;

    let term_matches = term.is_empty()
        || record.name.to_lowercase().contains(&term)
        || record.description.to_lowercase().contains(&term)
        || record.brand.to_lowercase().contains(&term);

    // Raw comparison: "en-uso" in the data does not match an "EN USO" criterion
    term_matches
        && equals_ignore_case(criteria.status.as_deref(), &record.status)
        && equals_ignore_case(criteria.category.as_deref(), &record.category)
        && equals_ignore_case(criteria.brand.as_deref(), &record.brand)
}

fn equals_ignore_case(criterion: Option<&str>, value: &str) -> bool {
    match criterion {
        None => true,
        Some(c) => c.to_lowercase() == value.to_lowercase(),
    }
}

/// Records matching the query, in input order
pub fn apply(records: &[Equipment], query: &SearchQuery) -> Vec<Equipment> {
    if query.is_identity() {
        return records.to_vec();
    }
    records.iter().filter(|r| matches(r, query)).cloned().collect()
}
