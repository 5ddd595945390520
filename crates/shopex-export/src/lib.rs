//! Flattening of Shopify products into spreadsheet rows and `.xlsx` output.

pub mod error;
pub mod rows;
pub mod xlsx;

pub use error::ExportError;
pub use rows::{clean_id, flatten_product, CellValue, ExportRow};
pub use xlsx::{ExportSummary, SheetWriter, SHEET_NAME};
