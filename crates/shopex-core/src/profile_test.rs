use std::path::Path;

use chrono::NaiveDate;

use super::*;
use crate::columns::ExportColumn;
use crate::filters::{ProductStatus, SortOrder};

#[test]
fn empty_document_yields_defaults() {
    let profile = parse_profile("{}").unwrap();
    assert_eq!(profile, ExportProfile::default());
    assert!(profile.clean_ids);
    assert_eq!(profile.effective_limit(), None);
    assert_eq!(profile.column_selection().unwrap(), ColumnSelection::all());
}

#[test]
fn full_profile_parses() {
    let yaml = r"
filters:
  status: active
  vendor: Acme Goods
  tag: summer
  created_after: 2024-01-01
  created_before: 2024-06-30
  sort: title-asc
columns: [product-id, SKU, Price]
clean_ids: false
limit: 500
";
    let profile = parse_profile(yaml).unwrap();
    assert_eq!(profile.filters.status, ProductStatus::Active);
    assert_eq!(profile.filters.vendor.as_deref(), Some("Acme Goods"));
    assert_eq!(profile.filters.tag.as_deref(), Some("summer"));
    assert_eq!(
        profile.filters.created_after,
        NaiveDate::from_ymd_opt(2024, 1, 1)
    );
    assert_eq!(profile.filters.sort, SortOrder::TitleAsc);
    assert!(!profile.clean_ids);
    assert_eq!(profile.effective_limit(), Some(500));
    assert_eq!(
        profile.column_selection().unwrap().columns(),
        &[
            ExportColumn::ProductId,
            ExportColumn::Sku,
            ExportColumn::Price
        ]
    );
}

#[test]
fn zero_limit_means_unlimited() {
    let profile = parse_profile("limit: 0").unwrap();
    assert_eq!(profile.effective_limit(), None);
}

#[test]
fn unknown_column_fails_validation() {
    let err = parse_profile("columns: [sku, colour]").unwrap_err();
    assert!(
        matches!(err, ConfigError::Validation(ref msg) if msg.contains("colour")),
        "expected Validation error naming the column, got: {err:?}"
    );
}

#[test]
fn inverted_date_range_fails_validation() {
    let yaml = r"
filters:
  created_after: 2024-06-01
  created_before: 2024-01-01
";
    let err = parse_profile(yaml).unwrap_err();
    assert!(matches!(err, ConfigError::Validation(_)), "got: {err:?}");
}

#[test]
fn unknown_key_fails_parse() {
    let err = parse_profile("colums: [sku]").unwrap_err();
    assert!(matches!(err, ConfigError::ProfileFileParse(_)), "got: {err:?}");
}

#[test]
fn unknown_status_fails_parse() {
    let err = parse_profile("filters:\n  status: published\n").unwrap_err();
    assert!(matches!(err, ConfigError::ProfileFileParse(_)), "got: {err:?}");
}

#[test]
fn missing_file_reports_path() {
    let err = load_profile(Path::new("/nonexistent/shopex-profile.yaml")).unwrap_err();
    assert!(
        matches!(err, ConfigError::ProfileFileIo { ref path, .. } if path.contains("shopex-profile.yaml")),
        "got: {err:?}"
    );
}
