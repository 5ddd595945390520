//! One spreadsheet row per variant.
//!
//! Product-level fields (title, vendor, tags, ...) are repeated on every row
//! of the product's variants. Prices are converted from the API's decimal
//! strings into numeric cells so the sheet can sum and sort them; a price
//! that does not parse is kept as text rather than dropped.

use std::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use shopex_client::{Product, Variant};
use shopex_core::ExportColumn;

/// A typed cell value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CellValue<'a> {
    Text(&'a str),
    Number(f64),
    Bool(bool),
    Empty,
}

/// Flattened product + variant record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExportRow {
    pub product_id: String,
    pub product_title: String,
    pub handle: String,
    pub status: String,
    pub vendor: String,
    pub product_type: String,
    pub tags: String,
    pub created_at: String,
    pub updated_at: String,
    pub published_at: String,
    pub image_count: u64,
    pub variant_count: usize,
    pub total_inventory: Option<i64>,
    pub sales_channels: String,
    pub variant_id: String,
    pub sku: String,
    pub barcode: String,
    pub price: String,
    pub compare_at_price: String,
    pub inventory_quantity: Option<i64>,
    pub inventory_policy: String,
    pub inventory_tracked: Option<bool>,
    pub requires_shipping: Option<bool>,
    pub weight: String,
    pub options: String,
}

impl ExportRow {
    /// The value of `column` for this row.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn cell(&self, column: ExportColumn) -> CellValue<'_> {
        match column {
            ExportColumn::ProductId => text(&self.product_id),
            ExportColumn::ProductTitle => text(&self.product_title),
            ExportColumn::Handle => text(&self.handle),
            ExportColumn::Status => text(&self.status),
            ExportColumn::Vendor => text(&self.vendor),
            ExportColumn::ProductType => text(&self.product_type),
            ExportColumn::Tags => text(&self.tags),
            ExportColumn::CreatedAt => text(&self.created_at),
            ExportColumn::UpdatedAt => text(&self.updated_at),
            ExportColumn::PublishedAt => text(&self.published_at),
            ExportColumn::ImageCount => CellValue::Number(self.image_count as f64),
            ExportColumn::VariantCount => CellValue::Number(self.variant_count as f64),
            ExportColumn::TotalInventory => integer(self.total_inventory),
            ExportColumn::SalesChannels => text(&self.sales_channels),
            ExportColumn::VariantId => text(&self.variant_id),
            ExportColumn::Sku => text(&self.sku),
            ExportColumn::Barcode => text(&self.barcode),
            ExportColumn::Price => money(&self.price),
            ExportColumn::CompareAtPrice => money(&self.compare_at_price),
            ExportColumn::InventoryQuantity => integer(self.inventory_quantity),
            ExportColumn::InventoryPolicy => text(&self.inventory_policy),
            ExportColumn::InventoryTracked => flag(self.inventory_tracked),
            ExportColumn::RequiresShipping => flag(self.requires_shipping),
            ExportColumn::Weight => text(&self.weight),
            ExportColumn::Options => text(&self.options),
        }
    }
}

fn text(value: &str) -> CellValue<'_> {
    if value.is_empty() {
        CellValue::Empty
    } else {
        CellValue::Text(value)
    }
}

#[allow(clippy::cast_precision_loss)]
fn integer(value: Option<i64>) -> CellValue<'static> {
    value.map_or(CellValue::Empty, |n| CellValue::Number(n as f64))
}

fn flag(value: Option<bool>) -> CellValue<'static> {
    value.map_or(CellValue::Empty, CellValue::Bool)
}

fn money(value: &str) -> CellValue<'_> {
    if value.is_empty() {
        return CellValue::Empty;
    }
    match Decimal::from_str(value.trim()).ok().and_then(|d| d.to_f64()) {
        Some(n) => CellValue::Number(n),
        None => CellValue::Text(value),
    }
}

/// Strips the `gid://shopify/<Type>/` prefix from a global id.
///
/// `"gid://shopify/Product/123"` becomes `"123"`; values without a slash are
/// returned unchanged.
#[must_use]
pub fn clean_id(gid: &str) -> &str {
    gid.rsplit('/').next().unwrap_or(gid)
}

/// Flattens `product` into one row per variant.
///
/// A product without variants produces no rows. When `clean_ids` is set,
/// product and variant ids are reduced to their numeric part.
#[must_use]
pub fn flatten_product(product: &Product, clean_ids: bool) -> Vec<ExportRow> {
    let id = |gid: &str| {
        if clean_ids {
            clean_id(gid).to_owned()
        } else {
            gid.to_owned()
        }
    };

    let base = ExportRow {
        product_id: id(&product.id),
        product_title: product.title.clone(),
        handle: product.handle.clone(),
        status: product.status.clone(),
        vendor: product.vendor.clone(),
        product_type: product.product_type.clone(),
        tags: product.tags.join(", "),
        created_at: product.created_at.clone(),
        updated_at: product.updated_at.clone(),
        published_at: product.published_at.clone().unwrap_or_default(),
        image_count: product.image_count(),
        variant_count: product.variants.edges.len(),
        total_inventory: product.total_inventory,
        sales_channels: product.published_channel_names().join(", "),
        ..ExportRow::default()
    };

    product
        .variants
        .edges
        .iter()
        .map(|edge| variant_row(&base, &edge.node, &id))
        .collect()
}

fn variant_row(base: &ExportRow, variant: &Variant, id: &impl Fn(&str) -> String) -> ExportRow {
    let item = variant.inventory_item.as_ref();
    ExportRow {
        variant_id: id(&variant.id),
        sku: variant.sku.clone().unwrap_or_default(),
        barcode: variant.barcode.clone().unwrap_or_default(),
        price: variant.price.clone(),
        compare_at_price: variant.compare_at_price.clone().unwrap_or_default(),
        inventory_quantity: variant.inventory_quantity,
        inventory_policy: variant.inventory_policy.clone(),
        inventory_tracked: item.map(|i| i.tracked),
        requires_shipping: item.and_then(|i| i.requires_shipping),
        weight: item
            .and_then(|i| i.measurement.as_ref())
            .and_then(|m| m.weight.as_ref())
            .map(|w| format!("{:?} {}", w.value, w.unit))
            .unwrap_or_default(),
        options: variant
            .selected_options
            .iter()
            .map(|o| format!("{}: {}", o.name, o.value))
            .collect::<Vec<_>>()
            .join(", "),
        ..base.clone()
    }
}

#[cfg(test)]
#[path = "rows_test.rs"]
mod tests;
