use std::ops::RangeFrom;
use std::path::Path;

use tracing::debug;
use umya_spreadsheet::{Spreadsheet, Worksheet};

use crate::europython::sheets::error::{Result, ToolError};
use crate::europython::sheets::io::excel_read;
use crate::europython::sheets::io::store::{CellValue, Row, TabularStore, Workbook};

/// An XLSX file opened for in-place editing.
///
/// Values are read through calamine into a [`Workbook`] grid, while the parsed
/// package is kept alongside it. Writes go to both, and [`TabularStore::save`]
/// serialises the package, so anything the update does not touch (hidden
/// sheets, column widths, cell styles, formulas, hyperlinks, number formats)
/// is written back as it was read.
pub struct XlsxFile {
    values: Workbook,
    book: Spreadsheet,
}

impl XlsxFile {
    pub fn open(path: &Path) -> Result<Self> {
        let values = excel_read::read_workbook(path)?;
        let book = umya_spreadsheet::reader::xlsx::read(path)?;
        debug!(
            path = %path.display(),
            sheets = values.sheets.len(),
            "workbook opened for editing"
        );
        Ok(Self { values, book })
    }

    fn worksheet_mut(&mut self, sheet: &str) -> Result<&mut Worksheet> {
        self.book
            .get_sheet_by_name_mut(sheet)
            .ok_or_else(|| ToolError::MissingSheet(sheet.to_string()))
    }
}

/// umya addresses cells as 1-based `(column, row)`.
fn coordinate(row: usize, col: usize) -> (u32, u32) {
    (col as u32 + 1, row as u32 + 1)
}

impl TabularStore for XlsxFile {
    fn sheet_names(&self) -> Vec<String> {
        self.values.sheet_names()
    }

    fn read_rows(&self, sheet: &str, rows: RangeFrom<usize>) -> Result<Vec<Row>> {
        self.values.read_rows(sheet, rows)
    }

    fn width(&self, sheet: &str) -> Result<usize> {
        self.values.width(sheet)
    }

    fn write_cell(
        &mut self,
        sheet: &str,
        row: usize,
        col: usize,
        value: CellValue,
    ) -> Result<()> {
        self.values.write_cell(sheet, row, col, value.clone())?;
        let cell = self.worksheet_mut(sheet)?.get_cell_mut(coordinate(row, col));
        match value {
            CellValue::Empty => {
                cell.set_blank();
            }
            CellValue::String(text) if text.is_empty() => {
                cell.set_blank();
            }
            CellValue::String(text) => {
                cell.set_value_string(text);
            }
            CellValue::Number(number) | CellValue::DateTime(number) => {
                cell.set_value_number(number);
            }
            CellValue::Bool(flag) => {
                cell.set_value_bool(flag);
            }
        }
        Ok(())
    }

    fn clear_cell(&mut self, sheet: &str, row: usize, col: usize) -> Result<()> {
        self.values.clear_cell(sheet, row, col)?;
        let worksheet = self.worksheet_mut(sheet)?;
        let position = coordinate(row, col);
        if worksheet.get_cell(position).is_some() {
            worksheet.get_cell_mut(position).set_blank();
        }
        Ok(())
    }

    fn save(&self, path: &Path) -> Result<()> {
        umya_spreadsheet::writer::xlsx::write(&self.book, path)?;
        Ok(())
    }
}
