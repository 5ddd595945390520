use super::*;

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

#[test]
fn default_filters_produce_no_query() {
    let filters = ProductFilters::default();
    assert_eq!(filters.search_query(), None);
    assert_eq!(filters.sort, SortOrder::NewestFirst);
    assert_eq!(filters.status, ProductStatus::Any);
}

#[test]
fn status_any_contributes_no_term() {
    let filters = ProductFilters {
        status: ProductStatus::Any,
        tag: Some("summer".to_string()),
        ..ProductFilters::default()
    };
    assert_eq!(filters.search_query().as_deref(), Some("tag:\"summer\""));
}

#[test]
fn status_term_uses_upper_case_value() {
    let filters = ProductFilters {
        status: ProductStatus::Draft,
        ..ProductFilters::default()
    };
    assert_eq!(filters.search_query().as_deref(), Some("status:DRAFT"));
}

#[test]
fn all_terms_are_joined_with_and_in_fixed_order() {
    let filters = ProductFilters {
        status: ProductStatus::Active,
        vendor: Some("Acme Goods".to_string()),
        tag: Some("sale".to_string()),
        publication_id: Some("gid://shopify/Publication/42".to_string()),
        created_after: Some(date("2024-01-01")),
        created_before: Some(date("2024-03-31")),
        sort: SortOrder::TitleAsc,
    };
    assert_eq!(
        filters.search_query().as_deref(),
        Some(concat!(
            "status:ACTIVE AND ",
            "published_status:\"gid://shopify/Publication/42\" AND ",
            "vendor:\"Acme Goods\" AND ",
            "tag:\"sale\" AND ",
            "created_at:>=2024-01-01T00:00:00Z AND ",
            "created_at:<=2024-03-31T23:59:59Z"
        ))
    );
}

#[test]
fn quotes_and_backslashes_in_values_are_escaped() {
    let filters = ProductFilters {
        vendor: Some(r#"My "Best" \ Vendor"#.to_string()),
        ..ProductFilters::default()
    };
    assert_eq!(
        filters.search_query().as_deref(),
        Some(r#"vendor:"My \"Best\" \\ Vendor""#)
    );
}

#[test]
fn single_day_range_is_valid() {
    let filters = ProductFilters {
        created_after: Some(date("2024-05-05")),
        created_before: Some(date("2024-05-05")),
        ..ProductFilters::default()
    };
    assert!(filters.validate().is_ok());
}

#[test]
fn inverted_date_range_is_rejected() {
    let filters = ProductFilters {
        created_after: Some(date("2024-06-01")),
        created_before: Some(date("2024-05-01")),
        ..ProductFilters::default()
    };
    assert!(matches!(
        filters.validate(),
        Err(FilterError::InvalidDateRange { .. })
    ));
}

#[test]
fn blank_vendor_is_rejected() {
    let filters = ProductFilters {
        vendor: Some("  ".to_string()),
        ..ProductFilters::default()
    };
    assert_eq!(
        filters.validate(),
        Err(FilterError::BlankValue { field: "vendor" })
    );
}

#[test]
fn sort_orders_map_to_key_and_direction() {
    assert_eq!(SortOrder::NewestFirst.sort_key(), "CREATED_AT");
    assert!(SortOrder::NewestFirst.reverse());
    assert_eq!(SortOrder::OldestFirst.sort_key(), "CREATED_AT");
    assert!(!SortOrder::OldestFirst.reverse());
    assert_eq!(SortOrder::TitleAsc.sort_key(), "TITLE");
    assert!(!SortOrder::TitleAsc.reverse());
    assert_eq!(SortOrder::TitleDesc.sort_key(), "TITLE");
    assert!(SortOrder::TitleDesc.reverse());
}

#[test]
fn status_parses_case_insensitively() {
    assert_eq!("ACTIVE".parse::<ProductStatus>(), Ok(ProductStatus::Active));
    assert_eq!("archived".parse::<ProductStatus>(), Ok(ProductStatus::Archived));
    assert!(matches!(
        "published".parse::<ProductStatus>(),
        Err(FilterError::UnknownStatus(_))
    ));
}

#[test]
fn sort_parses_round_trip_through_display() {
    for order in [
        SortOrder::NewestFirst,
        SortOrder::OldestFirst,
        SortOrder::TitleAsc,
        SortOrder::TitleDesc,
    ] {
        assert_eq!(order.to_string().parse::<SortOrder>(), Ok(order));
    }
    assert!("random".parse::<SortOrder>().is_err());
}

#[test]
fn filters_deserialize_from_json_with_defaults() {
    let filters: ProductFilters = serde_json::from_value(serde_json::json!({
        "status": "active",
        "created_after": "2024-02-01",
        "sort": "title-desc"
    }))
    .unwrap();
    assert_eq!(filters.status, ProductStatus::Active);
    assert_eq!(filters.created_after, Some(date("2024-02-01")));
    assert_eq!(filters.sort, SortOrder::TitleDesc);
    assert!(filters.vendor.is_none());
}
