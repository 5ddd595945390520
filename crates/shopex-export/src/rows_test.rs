use super::*;
use serde_json::json;

fn product(variants: serde_json::Value) -> Product {
    serde_json::from_value(json!({
        "id": "gid://shopify/Product/111",
        "title": "Ceramic Mug",
        "handle": "ceramic-mug",
        "status": "ACTIVE",
        "vendor": "Acme",
        "productType": "Mug",
        "tags": ["kitchen", "gift"],
        "createdAt": "2024-01-01T00:00:00Z",
        "updatedAt": "2024-02-01T00:00:00Z",
        "publishedAt": null,
        "totalInventory": 7,
        "mediaCount": { "count": 3 },
        "resourcePublications": { "edges": [
            { "node": { "isPublished": true, "publication": { "id": "gid://shopify/Publication/1", "name": "Online Store" } } },
            { "node": { "isPublished": true, "publication": { "id": "gid://shopify/Publication/2", "name": "Shop" } } }
        ] },
        "variants": { "pageInfo": { "hasNextPage": false }, "edges": variants }
    }))
    .unwrap()
}

fn two_variants() -> serde_json::Value {
    json!([
        { "node": {
            "id": "gid://shopify/ProductVariant/201",
            "sku": "MUG-S",
            "price": "12.50",
            "compareAtPrice": "15.00",
            "inventoryQuantity": 4,
            "inventoryPolicy": "DENY",
            "inventoryItem": {
                "tracked": true,
                "requiresShipping": true,
                "measurement": { "weight": { "value": 0.35, "unit": "KILOGRAMS" } }
            },
            "selectedOptions": [{ "name": "Size", "value": "S" }, { "name": "Color", "value": "Blue" }]
        } },
        { "node": {
            "id": "gid://shopify/ProductVariant/202",
            "price": "not-a-number",
            "inventoryQuantity": 3,
            "inventoryPolicy": "CONTINUE"
        } }
    ])
}

#[test]
fn clean_id_strips_gid_prefix() {
    assert_eq!(clean_id("gid://shopify/Product/123"), "123");
    assert_eq!(clean_id("gid://shopify/ProductVariant/9"), "9");
    assert_eq!(clean_id("123"), "123");
}

#[test]
fn one_row_per_variant_with_product_fields_repeated() {
    let rows = flatten_product(&product(two_variants()), true);
    assert_eq!(rows.len(), 2);
    for row in &rows {
        assert_eq!(row.product_id, "111");
        assert_eq!(row.product_title, "Ceramic Mug");
        assert_eq!(row.tags, "kitchen, gift");
        assert_eq!(row.variant_count, 2);
        assert_eq!(row.image_count, 3);
        assert_eq!(row.sales_channels, "Online Store, Shop");
        assert_eq!(row.published_at, "");
    }
    assert_eq!(rows[0].variant_id, "201");
    assert_eq!(rows[1].variant_id, "202");
}

#[test]
fn raw_ids_are_kept_when_cleaning_is_off() {
    let rows = flatten_product(&product(two_variants()), false);
    assert_eq!(rows[0].product_id, "gid://shopify/Product/111");
    assert_eq!(rows[0].variant_id, "gid://shopify/ProductVariant/201");
}

#[test]
fn variant_details_are_rendered() {
    let rows = flatten_product(&product(two_variants()), true);
    let first = &rows[0];
    assert_eq!(first.sku, "MUG-S");
    assert_eq!(first.weight, "0.35 KILOGRAMS");
    assert_eq!(first.options, "Size: S, Color: Blue");
    assert_eq!(first.inventory_tracked, Some(true));
    assert_eq!(first.requires_shipping, Some(true));

    let second = &rows[1];
    assert_eq!(second.sku, "");
    assert_eq!(second.weight, "");
    assert_eq!(second.options, "");
    assert_eq!(second.inventory_tracked, None);
}

#[test]
fn whole_number_weight_keeps_decimal_point() {
    let rows = flatten_product(
        &product(json!([{ "node": {
            "id": "gid://shopify/ProductVariant/301",
            "price": "5.00",
            "inventoryItem": {
                "tracked": true,
                "measurement": { "weight": { "value": 1.0, "unit": "KILOGRAMS" } }
            }
        } }])),
        true,
    );
    assert_eq!(rows[0].weight, "1.0 KILOGRAMS");
}

#[test]
fn product_without_variants_yields_no_rows() {
    assert!(flatten_product(&product(json!([])), true).is_empty());
}

#[test]
fn cells_are_typed() {
    let rows = flatten_product(&product(two_variants()), true);
    let first = &rows[0];
    assert_eq!(first.cell(ExportColumn::Price), CellValue::Number(12.5));
    assert_eq!(first.cell(ExportColumn::CompareAtPrice), CellValue::Number(15.0));
    assert_eq!(first.cell(ExportColumn::InventoryQuantity), CellValue::Number(4.0));
    assert_eq!(first.cell(ExportColumn::TotalInventory), CellValue::Number(7.0));
    assert_eq!(first.cell(ExportColumn::RequiresShipping), CellValue::Bool(true));
    assert_eq!(first.cell(ExportColumn::Vendor), CellValue::Text("Acme"));
    assert_eq!(first.cell(ExportColumn::PublishedAt), CellValue::Empty);

    let second = &rows[1];
    assert_eq!(second.cell(ExportColumn::Price), CellValue::Text("not-a-number"));
    assert_eq!(second.cell(ExportColumn::CompareAtPrice), CellValue::Empty);
    assert_eq!(second.cell(ExportColumn::InventoryTracked), CellValue::Empty);
}
