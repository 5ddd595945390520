//! Product filters and their translation into Shopify's search syntax.
//!
//! The Admin API accepts a free-text `query:` argument on `products` and
//! `productsCount`. Terms are joined with ` AND `; string values are wrapped in
//! double quotes so vendors and tags containing spaces match as a phrase.

use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FilterError {
    #[error("created-after date {after} is later than created-before date {before}")]
    InvalidDateRange { after: NaiveDate, before: NaiveDate },

    #[error("{field} filter must not be blank")]
    BlankValue { field: &'static str },

    #[error("unknown product status '{0}'; expected any, active, draft or archived")]
    UnknownStatus(String),

    #[error("unknown sort order '{0}'; expected newest, oldest, title-asc or title-desc")]
    UnknownSort(String),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductStatus {
    #[default]
    Any,
    Active,
    Draft,
    Archived,
}

impl ProductStatus {
    /// The value used in a `status:` search term, or `None` for [`ProductStatus::Any`].
    #[must_use]
    pub fn search_value(self) -> Option<&'static str> {
        match self {
            ProductStatus::Any => None,
            ProductStatus::Active => Some("ACTIVE"),
            ProductStatus::Draft => Some("DRAFT"),
            ProductStatus::Archived => Some("ARCHIVED"),
        }
    }
}

impl std::fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProductStatus::Any => write!(f, "any"),
            ProductStatus::Active => write!(f, "active"),
            ProductStatus::Draft => write!(f, "draft"),
            ProductStatus::Archived => write!(f, "archived"),
        }
    }
}

impl FromStr for ProductStatus {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "any" | "all" => Ok(ProductStatus::Any),
            "active" => Ok(ProductStatus::Active),
            "draft" => Ok(ProductStatus::Draft),
            "archived" => Ok(ProductStatus::Archived),
            _ => Err(FilterError::UnknownStatus(s.to_string())),
        }
    }
}

/// Result ordering. Maps onto the `sortKey`/`reverse` pair of the
/// `products` connection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortOrder {
    #[default]
    #[serde(rename = "newest")]
    NewestFirst,
    #[serde(rename = "oldest")]
    OldestFirst,
    #[serde(rename = "title-asc")]
    TitleAsc,
    #[serde(rename = "title-desc")]
    TitleDesc,
}

impl SortOrder {
    /// The `ProductSortKeys` enum value for this ordering.
    #[must_use]
    pub fn sort_key(self) -> &'static str {
        match self {
            SortOrder::NewestFirst | SortOrder::OldestFirst => "CREATED_AT",
            SortOrder::TitleAsc | SortOrder::TitleDesc => "TITLE",
        }
    }

    #[must_use]
    pub fn reverse(self) -> bool {
        matches!(self, SortOrder::NewestFirst | SortOrder::TitleDesc)
    }
}

impl std::fmt::Display for SortOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortOrder::NewestFirst => write!(f, "newest"),
            SortOrder::OldestFirst => write!(f, "oldest"),
            SortOrder::TitleAsc => write!(f, "title-asc"),
            SortOrder::TitleDesc => write!(f, "title-desc"),
        }
    }
}

impl FromStr for SortOrder {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "newest" | "newest-first" => Ok(SortOrder::NewestFirst),
            "oldest" | "oldest-first" => Ok(SortOrder::OldestFirst),
            "title-asc" | "title" => Ok(SortOrder::TitleAsc),
            "title-desc" => Ok(SortOrder::TitleDesc),
            _ => Err(FilterError::UnknownSort(s.to_string())),
        }
    }
}

/// Optional narrowing applied to a product export or count.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProductFilters {
    pub status: ProductStatus,
    pub vendor: Option<String>,
    pub tag: Option<String>,
    /// Sales channel publication GID, e.g. `gid://shopify/Publication/1`.
    pub publication_id: Option<String>,
    /// Inclusive lower bound on `created_at`, from the start of this day (UTC).
    pub created_after: Option<NaiveDate>,
    /// Inclusive upper bound on `created_at`, through the end of this day (UTC).
    pub created_before: Option<NaiveDate>,
    pub sort: SortOrder,
}

impl ProductFilters {
    /// Rejects filter combinations the API would silently answer with an
    /// empty result.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::InvalidDateRange`] when the date bounds are
    /// inverted and [`FilterError::BlankValue`] when a string filter is
    /// present but empty.
    pub fn validate(&self) -> Result<(), FilterError> {
        if let (Some(after), Some(before)) = (self.created_after, self.created_before) {
            if after > before {
                return Err(FilterError::InvalidDateRange { after, before });
            }
        }

        for (field, value) in [
            ("vendor", &self.vendor),
            ("tag", &self.tag),
            ("publication", &self.publication_id),
        ] {
            if value.as_deref().is_some_and(|v| v.trim().is_empty()) {
                return Err(FilterError::BlankValue { field });
            }
        }

        Ok(())
    }

    /// Builds the search-syntax `query:` argument, or `None` when no filter
    /// narrows the result set.
    #[must_use]
    pub fn search_query(&self) -> Option<String> {
        let mut terms: Vec<String> = Vec::new();

        if let Some(status) = self.status.search_value() {
            terms.push(format!("status:{status}"));
        }
        if let Some(publication_id) = &self.publication_id {
            terms.push(format!(
                "published_status:\"{}\"",
                escape_search_value(publication_id)
            ));
        }
        if let Some(vendor) = &self.vendor {
            terms.push(format!("vendor:\"{}\"", escape_search_value(vendor)));
        }
        if let Some(tag) = &self.tag {
            terms.push(format!("tag:\"{}\"", escape_search_value(tag)));
        }
        if let Some(after) = self.created_after {
            terms.push(format!("created_at:>={}T00:00:00Z", after.format("%Y-%m-%d")));
        }
        if let Some(before) = self.created_before {
            terms.push(format!("created_at:<={}T23:59:59Z", before.format("%Y-%m-%d")));
        }

        if terms.is_empty() {
            None
        } else {
            Some(terms.join(" AND "))
        }
    }
}

/// Escapes backslashes and double quotes for use inside a quoted search value.
fn escape_search_value(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(test)]
#[path = "filters_test.rs"]
mod tests;
