//! Spreadsheet column catalog.
//!
//! Every export row can fill all of these columns; a [`ColumnSelection`]
//! picks the subset written to the sheet. The order of [`ExportColumn::ALL`]
//! is the order columns appear in the output regardless of the order the
//! user listed them in.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ColumnError {
    #[error("unknown column '{0}'")]
    Unknown(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ExportColumn {
    ProductId,
    ProductTitle,
    Handle,
    Status,
    Vendor,
    ProductType,
    Tags,
    CreatedAt,
    UpdatedAt,
    PublishedAt,
    ImageCount,
    VariantCount,
    TotalInventory,
    SalesChannels,
    VariantId,
    Sku,
    Barcode,
    Price,
    CompareAtPrice,
    InventoryQuantity,
    InventoryPolicy,
    InventoryTracked,
    RequiresShipping,
    Weight,
    Options,
}

impl ExportColumn {
    pub const ALL: [ExportColumn; 25] = [
        ExportColumn::ProductId,
        ExportColumn::ProductTitle,
        ExportColumn::Handle,
        ExportColumn::Status,
        ExportColumn::Vendor,
        ExportColumn::ProductType,
        ExportColumn::Tags,
        ExportColumn::CreatedAt,
        ExportColumn::UpdatedAt,
        ExportColumn::PublishedAt,
        ExportColumn::ImageCount,
        ExportColumn::VariantCount,
        ExportColumn::TotalInventory,
        ExportColumn::SalesChannels,
        ExportColumn::VariantId,
        ExportColumn::Sku,
        ExportColumn::Barcode,
        ExportColumn::Price,
        ExportColumn::CompareAtPrice,
        ExportColumn::InventoryQuantity,
        ExportColumn::InventoryPolicy,
        ExportColumn::InventoryTracked,
        ExportColumn::RequiresShipping,
        ExportColumn::Weight,
        ExportColumn::Options,
    ];

    /// Header text written to the first row of the sheet.
    #[must_use]
    pub fn header(self) -> &'static str {
        match self {
            ExportColumn::ProductId => "Product ID",
            ExportColumn::ProductTitle => "Product Title",
            ExportColumn::Handle => "Handle",
            ExportColumn::Status => "Status",
            ExportColumn::Vendor => "Vendor",
            ExportColumn::ProductType => "Product Type",
            ExportColumn::Tags => "Tags",
            ExportColumn::CreatedAt => "Created At",
            ExportColumn::UpdatedAt => "Updated At",
            ExportColumn::PublishedAt => "Published At",
            ExportColumn::ImageCount => "Image Count",
            ExportColumn::VariantCount => "Variant Count",
            ExportColumn::TotalInventory => "Total Inventory",
            ExportColumn::SalesChannels => "Sales Channels",
            ExportColumn::VariantId => "Variant ID",
            ExportColumn::Sku => "SKU",
            ExportColumn::Barcode => "Barcode",
            ExportColumn::Price => "Price",
            ExportColumn::CompareAtPrice => "Compare At Price",
            ExportColumn::InventoryQuantity => "Inventory Quantity",
            ExportColumn::InventoryPolicy => "Inventory Policy",
            ExportColumn::InventoryTracked => "Inventory Tracked",
            ExportColumn::RequiresShipping => "Requires Shipping",
            ExportColumn::Weight => "Weight",
            ExportColumn::Options => "Options",
        }
    }

    /// Kebab-case name accepted on the command line, e.g. `compare-at-price`.
    #[must_use]
    pub fn slug(self) -> String {
        self.header().to_ascii_lowercase().replace(' ', "-")
    }

    /// Looks a column up by header text or slug, ignoring case and
    /// surrounding whitespace.
    #[must_use]
    pub fn from_name(name: &str) -> Option<ExportColumn> {
        let wanted = name.trim().to_ascii_lowercase().replace(['_', ' '], "-");
        ExportColumn::ALL
            .into_iter()
            .find(|column| column.slug() == wanted)
    }
}

impl std::fmt::Display for ExportColumn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.header())
    }
}

/// The columns written to a sheet, always in catalog order and without
/// duplicates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSelection {
    columns: Vec<ExportColumn>,
}

impl ColumnSelection {
    #[must_use]
    pub fn all() -> Self {
        Self {
            columns: ExportColumn::ALL.to_vec(),
        }
    }

    /// Resolves user-supplied column names. An empty list selects every column.
    ///
    /// # Errors
    ///
    /// Returns [`ColumnError::Unknown`] for the first name that matches no column.
    pub fn from_names<I, S>(names: I) -> Result<Self, ColumnError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut picked: Vec<ExportColumn> = Vec::new();
        for name in names {
            let name = name.as_ref();
            if name.trim().is_empty() {
                continue;
            }
            let column =
                ExportColumn::from_name(name).ok_or_else(|| ColumnError::Unknown(name.to_string()))?;
            picked.push(column);
        }

        if picked.is_empty() {
            return Ok(Self::all());
        }

        picked.sort_unstable();
        picked.dedup();
        Ok(Self { columns: picked })
    }

    #[must_use]
    pub fn columns(&self) -> &[ExportColumn] {
        &self.columns
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl Default for ColumnSelection {
    fn default() -> Self {
        Self::all()
    }
}
