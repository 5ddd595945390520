//! Writes real workbooks into a temp dir and reads them back with `calamine`.

use calamine::{open_workbook, Data, Reader, Xlsx};
use serde_json::json;

use shopex_client::Product;
use shopex_core::ColumnSelection;
use shopex_export::{flatten_product, ExportError, SheetWriter, SHEET_NAME};

fn product(id: u64, variant_count: u64) -> Product {
    let edges: Vec<_> = (0..variant_count)
        .map(|v| {
            json!({ "node": {
                "id": format!("gid://shopify/ProductVariant/{id}{v}"),
                "sku": format!("SKU-{id}-{v}"),
                "price": "19.99",
                "inventoryQuantity": 5,
                "inventoryPolicy": "DENY",
                "inventoryItem": { "tracked": false, "requiresShipping": false }
            } })
        })
        .collect();
    serde_json::from_value(json!({
        "id": format!("gid://shopify/Product/{id}"),
        "title": format!("Product {id}"),
        "handle": format!("product-{id}"),
        "status": "DRAFT",
        "vendor": "Acme",
        "createdAt": "2024-01-01T00:00:00Z",
        "updatedAt": "2024-01-01T00:00:00Z",
        "variants": { "pageInfo": { "hasNextPage": false }, "edges": edges }
    }))
    .unwrap()
}

#[test]
fn written_sheet_has_header_and_typed_rows() {
    let dir = tempfile::tempdir().unwrap();
    let columns =
        ColumnSelection::from_names(["sku", "Product ID", "price", "requires-shipping"]).unwrap();

    let mut writer = SheetWriter::create(&dir.path().join("catalog"), columns).unwrap();
    writer.append(&flatten_product(&product(1, 2), true)).unwrap();
    writer.append(&flatten_product(&product(2, 1), true)).unwrap();
    let summary = writer.finish().unwrap();

    assert_eq!(summary.rows, 3);
    assert_eq!(summary.path, dir.path().join("catalog.xlsx"));

    let mut workbook: Xlsx<_> = open_workbook(&summary.path).unwrap();
    let range = workbook.worksheet_range(SHEET_NAME).unwrap();
    let rows: Vec<_> = range.rows().collect();
    assert_eq!(rows.len(), 4);

    // Canonical column order, not the order requested.
    let header: Vec<_> = rows[0].iter().map(ToString::to_string).collect();
    assert_eq!(header, vec!["Product ID", "SKU", "Price", "Requires Shipping"]);

    assert_eq!(rows[1][0], Data::String("1".to_owned()));
    assert_eq!(rows[1][1], Data::String("SKU-1-0".to_owned()));
    assert_eq!(rows[1][2], Data::Float(19.99));
    assert_eq!(rows[1][3], Data::Bool(false));
    assert_eq!(rows[3][0], Data::String("2".to_owned()));
}

#[test]
fn empty_export_writes_no_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.xlsx");

    let mut writer = SheetWriter::create(&path, ColumnSelection::all()).unwrap();
    writer.append(&flatten_product(&product(1, 0), true)).unwrap();
    let err = writer.finish().unwrap_err();

    assert!(matches!(err, ExportError::NoData), "got: {err:?}");
    assert!(!path.exists());
}
