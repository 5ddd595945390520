//! Filter and export flags, and how they combine with a saved profile.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Args;
use shopex_core::{ExportProfile, ProductFilters, ProductStatus, SortOrder};

/// Flags narrowing the products a command works on.
///
/// Every flag is optional; an unset flag leaves the base value (a profile's
/// filter, or the default) untouched.
#[derive(Debug, Default, Clone, Args)]
pub struct FilterArgs {
    /// any, active, draft or archived
    #[arg(long)]
    pub status: Option<ProductStatus>,

    /// Exact vendor name
    #[arg(long)]
    pub vendor: Option<String>,

    #[arg(long)]
    pub tag: Option<String>,

    /// Sales channel publication id, e.g. gid://shopify/Publication/1
    #[arg(long = "publication")]
    pub publication_id: Option<String>,

    /// Earliest creation date (YYYY-MM-DD, inclusive)
    #[arg(long)]
    pub created_after: Option<NaiveDate>,

    /// Latest creation date (YYYY-MM-DD, inclusive)
    #[arg(long)]
    pub created_before: Option<NaiveDate>,

    /// newest, oldest, title-asc or title-desc
    #[arg(long)]
    pub sort: Option<SortOrder>,
}

impl FilterArgs {
    /// Overlays the flags that were given onto `base`.
    #[must_use]
    pub fn apply(&self, base: ProductFilters) -> ProductFilters {
        ProductFilters {
            status: self.status.unwrap_or(base.status),
            vendor: self.vendor.clone().or(base.vendor),
            tag: self.tag.clone().or(base.tag),
            publication_id: self.publication_id.clone().or(base.publication_id),
            created_after: self.created_after.or(base.created_after),
            created_before: self.created_before.or(base.created_before),
            sort: self.sort.unwrap_or(base.sort),
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct ExportArgs {
    /// Output file; `.xlsx` is appended when missing
    #[arg(long, short)]
    pub output: PathBuf,

    #[command(flatten)]
    pub filters: FilterArgs,

    /// Maximum number of products to export (0 = no limit)
    #[arg(long)]
    pub limit: Option<u32>,

    /// Comma-separated column names or slugs (default: all columns)
    #[arg(long, value_delimiter = ',')]
    pub columns: Vec<String>,

    /// Keep full `gid://shopify/...` ids instead of the numeric part
    #[arg(long)]
    pub raw_ids: bool,

    /// YAML export profile providing defaults for the flags above
    #[arg(long)]
    pub profile: Option<PathBuf>,
}

impl ExportArgs {
    /// Merges these flags over `profile`; flags win.
    #[must_use]
    pub fn merge(&self, profile: ExportProfile) -> ExportProfile {
        ExportProfile {
            filters: self.filters.apply(profile.filters),
            columns: if self.columns.is_empty() {
                profile.columns
            } else {
                self.columns.clone()
            },
            clean_ids: profile.clean_ids && !self.raw_ids,
            limit: self.limit.or(profile.limit),
        }
    }
}
