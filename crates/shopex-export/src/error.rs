use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("no data to save: the export matched no variants")]
    NoData,

    #[error("output directory {0} does not exist")]
    MissingOutputDir(PathBuf),

    #[error("export exceeds the sheet row limit of {max_rows} rows")]
    RowLimit { max_rows: u32 },

    #[error("spreadsheet error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
}
