//! Search query and filter criteria for the equipment directory

use serde::{Deserialize, Serialize};

/// Exact-match facet constraints; `None` means unconstrained
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub status: Option<String>,
    pub brand: Option<String>,
    pub category: Option<String>,
}

impl FilterCriteria {
    pub fn is_empty(&self) -> bool {
        self.status.is_none() && self.brand.is_none() && self.category.is_none()
    }
}

/// Free-text term plus facet criteria
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    pub term: String,
    pub criteria: FilterCriteria,
}

impl SearchQuery {
    pub fn new(term: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            criteria: FilterCriteria::default(),
        }
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.criteria.status = non_empty(status.into());
        self
    }

    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.criteria.brand = non_empty(brand.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.criteria.category = non_empty(category.into());
        self
    }

    /// True when the query lets every record through
    pub fn is_identity(&self) -> bool {
        self.term.is_empty() && self.criteria.is_empty()
    }
}

/// Search panel state: the term and criteria being edited by the user.
///
/// Setting a criterion to an empty string unsets it.
#[derive(Debug, Clone, Default)]
pub struct SearchPanel {
    term: String,
    criteria: FilterCriteria,
}

impl SearchPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_term(&mut self, term: impl Into<String>) {
        self.term = term.into();
    }

    pub fn set_status(&mut self, status: &str) {
        self.criteria.status = non_empty(status.to_string());
    }

    pub fn set_brand(&mut self, brand: &str) {
        self.criteria.brand = non_empty(brand.to_string());
    }

    pub fn set_category(&mut self, category: &str) {
        self.criteria.category = non_empty(category.to_string());
    }

    pub fn clear(&mut self) {
        self.term.clear();
        self.criteria = FilterCriteria::default();
    }

    /// Snapshot handed to the directory
    pub fn query(&self) -> SearchQuery {
        SearchQuery {
            term: self.term.clone(),
            criteria: self.criteria.clone(),
        }
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}
