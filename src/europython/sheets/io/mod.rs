//! Spreadsheet adapters: the [`TabularStore`](store::TabularStore) seam, the
//! in-place [`XlsxFile`](xlsx_file::XlsxFile) editor used by the update
//! commands, and plain XLSX loading and saving of in-memory grids.

pub mod excel_read;
pub mod excel_write;
pub mod store;
pub mod xlsx_file;

pub use store::{CellValue, Row, Sheet, TabularStore, Workbook};
pub use xlsx_file::XlsxFile;
