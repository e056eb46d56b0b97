use std::fmt;
use std::ops::RangeFrom;
use std::path::Path;

use crate::europython::sheets::error::{Result, ToolError};
use crate::europython::sheets::io::excel_write;

/// A single cell value as seen by the reconciler.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum CellValue {
    /// Cell without a value. Cleared cells end up here.
    #[default]
    Empty,
    /// Plain string literal.
    String(String),
    /// Numeric literal.
    Number(f64),
    /// Boolean literal.
    Bool(bool),
    /// Excel serial date, kept as-is so it survives a rewrite.
    DateTime(f64),
}

impl CellValue {
    /// Returns `true` for empty cells and for blank strings.
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::String(value) => value.is_empty(),
            _ => false,
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::String(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::String(value)
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::String(value) => f.write_str(value),
            CellValue::Number(value) | CellValue::DateTime(value) => write!(f, "{value}"),
            CellValue::Bool(value) => write!(f, "{value}"),
        }
    }
}

/// One row of cells, indexed by 0-based column.
pub type Row = Vec<CellValue>;

/// Grid-shaped storage the reconciler mutates.
///
/// Row and column indices are 0-based. Rows are never inserted or removed
/// through this interface, only individual cell values change.
pub trait TabularStore {
    /// Names of all sheets, in workbook order.
    fn sheet_names(&self) -> Vec<String>;

    /// Reads the rows of `sheet` from `rows.start` to the last used row.
    ///
    /// Every returned row is padded with empty cells to the sheet width.
    fn read_rows(&self, sheet: &str, rows: RangeFrom<usize>) -> Result<Vec<Row>>;

    /// Number of columns in use on `sheet`.
    fn width(&self, sheet: &str) -> Result<usize>;

    /// Assigns `value` to a single cell, growing the grid when needed.
    fn write_cell(&mut self, sheet: &str, row: usize, col: usize, value: CellValue)
    -> Result<()>;

    /// Resets a single cell to [`CellValue::Empty`].
    fn clear_cell(&mut self, sheet: &str, row: usize, col: usize) -> Result<()>;

    /// Persists the store to `path`.
    fn save(&self, path: &Path) -> Result<()>;
}

/// A named sheet holding a ragged grid of cells.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sheet {
    pub name: String,
    pub rows: Vec<Row>,
}

impl Sheet {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rows: Vec::new(),
        }
    }

    /// Builds a sheet from string rows. Empty strings become empty cells.
    pub fn from_strings<R, C>(name: impl Into<String>, rows: R) -> Self
    where
        R: IntoIterator<Item = C>,
        C: IntoIterator,
        C::Item: AsRef<str>,
    {
        let rows = rows
            .into_iter()
            .map(|row| {
                row.into_iter()
                    .map(|cell| match cell.as_ref() {
                        "" => CellValue::Empty,
                        text => CellValue::from(text),
                    })
                    .collect()
            })
            .collect();
        Self {
            name: name.into(),
            rows,
        }
    }

    /// Number of columns in the widest row.
    pub fn width(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Returns the cell at the given position, if it was ever assigned.
    pub fn cell(&self, row: usize, col: usize) -> Option<&CellValue> {
        self.rows.get(row).and_then(|cells| cells.get(col))
    }

    fn cell_mut(&mut self, row: usize, col: usize) -> &mut CellValue {
        if self.rows.len() <= row {
            self.rows.resize_with(row + 1, Vec::new);
        }
        let cells = &mut self.rows[row];
        if cells.len() <= col {
            cells.resize(col + 1, CellValue::Empty);
        }
        &mut cells[col]
    }

    /// Drops trailing rows that carry no value at all.
    fn used_len(&self) -> usize {
        self.rows
            .iter()
            .rposition(|row| row.iter().any(|cell| *cell != CellValue::Empty))
            .map_or(0, |last| last + 1)
    }
}

/// In-memory workbook: an ordered list of sheets.
///
/// Workbooks are loaded with [`excel_read::read_workbook`](super::excel_read::read_workbook).
/// [`TabularStore::save`] writes the values to a fresh file; edits that must
/// keep the original formatting go through [`XlsxFile`](super::xlsx_file::XlsxFile).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Workbook {
    pub sheets: Vec<Sheet>,
}

impl Workbook {
    pub fn new(sheets: Vec<Sheet>) -> Self {
        Self { sheets }
    }

    pub fn sheet(&self, name: &str) -> Result<&Sheet> {
        self.sheets
            .iter()
            .find(|sheet| sheet.name == name)
            .ok_or_else(|| ToolError::MissingSheet(name.to_string()))
    }

    fn sheet_mut(&mut self, name: &str) -> Result<&mut Sheet> {
        self.sheets
            .iter_mut()
            .find(|sheet| sheet.name == name)
            .ok_or_else(|| ToolError::MissingSheet(name.to_string()))
    }
}

impl TabularStore for Workbook {
    fn sheet_names(&self) -> Vec<String> {
        self.sheets.iter().map(|sheet| sheet.name.clone()).collect()
    }

    fn read_rows(&self, sheet: &str, rows: RangeFrom<usize>) -> Result<Vec<Row>> {
        let sheet = self.sheet(sheet)?;
        let width = sheet.width();
        let used = sheet.used_len();
        Ok(sheet
            .rows
            .iter()
            .take(used)
            .skip(rows.start)
            .map(|row| {
                let mut padded = row.clone();
                padded.resize(width, CellValue::Empty);
                padded
            })
            .collect())
    }

    fn width(&self, sheet: &str) -> Result<usize> {
        Ok(self.sheet(sheet)?.width())
    }

    fn write_cell(
        &mut self,
        sheet: &str,
        row: usize,
        col: usize,
        value: CellValue,
    ) -> Result<()> {
        *self.sheet_mut(sheet)?.cell_mut(row, col) = value;
        Ok(())
    }

    fn clear_cell(&mut self, sheet: &str, row: usize, col: usize) -> Result<()> {
        let sheet = self.sheet_mut(sheet)?;
        if let Some(cell) = sheet.rows.get_mut(row).and_then(|cells| cells.get_mut(col)) {
            *cell = CellValue::Empty;
        }
        Ok(())
    }

    fn save(&self, path: &Path) -> Result<()> {
        excel_write::write_workbook(path, self)
    }
}
