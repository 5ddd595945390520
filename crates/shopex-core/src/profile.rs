use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::columns::{ColumnError, ColumnSelection};
use crate::filters::ProductFilters;
use crate::ConfigError;

/// A saved set of export options, loaded from YAML.
///
/// ```yaml
/// filters:
///   status: active
///   vendor: Acme
///   created_after: 2024-01-01
///   sort: title-asc
/// columns: [product-id, sku, price]
/// clean_ids: true
/// limit: 500
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExportProfile {
    #[serde(default)]
    pub filters: ProductFilters,
    /// Column names or slugs; empty means every column.
    #[serde(default)]
    pub columns: Vec<String>,
    #[serde(default = "default_clean_ids")]
    pub clean_ids: bool,
    /// Maximum number of products to export; `0` or absent means no limit.
    #[serde(default)]
    pub limit: Option<u32>,
}

impl Default for ExportProfile {
    fn default() -> Self {
        Self {
            filters: ProductFilters::default(),
            columns: Vec::new(),
            clean_ids: default_clean_ids(),
            limit: None,
        }
    }
}

impl ExportProfile {
    /// # Errors
    ///
    /// Returns [`ColumnError::Unknown`] if a listed column does not exist.
    pub fn column_selection(&self) -> Result<ColumnSelection, ColumnError> {
        ColumnSelection::from_names(&self.columns)
    }

    /// The effective product limit, with `0` normalized to "no limit".
    #[must_use]
    pub fn effective_limit(&self) -> Option<u32> {
        self.limit.filter(|&n| n > 0)
    }
}

fn default_clean_ids() -> bool {
    true
}

/// Load and validate an export profile from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_profile(path: &Path) -> Result<ExportProfile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ProfileFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_profile(&content)
}

/// Parse and validate an export profile from YAML text.
///
/// # Errors
///
/// Returns [`ConfigError::ProfileFileParse`] for malformed YAML and
/// [`ConfigError::Validation`] for invalid filters or unknown columns.
pub fn parse_profile(content: &str) -> Result<ExportProfile, ConfigError> {
    let profile: ExportProfile = serde_yaml::from_str(content)?;
    validate_profile(&profile)?;
    Ok(profile)
}

fn validate_profile(profile: &ExportProfile) -> Result<(), ConfigError> {
    profile
        .filters
        .validate()
        .map_err(|e| ConfigError::Validation(e.to_string()))?;

    profile
        .column_selection()
        .map_err(|e| ConfigError::Validation(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
#[path = "profile_test.rs"]
mod tests;
