use std::path::Path;

use calamine::{DataType, Reader, Xlsx, open_workbook};
use tracing::debug;

use crate::europython::sheets::error::{Result, ToolError};
use crate::europython::sheets::io::store::{CellValue, Sheet, Workbook};

/// Reads every sheet of an XLSX file into an in-memory [`Workbook`].
///
/// Cell positions are absolute: calamine ranges start at the first used cell,
/// so each range is shifted back by its start offset.
pub fn read_workbook(path: &Path) -> Result<Workbook> {
    if !path.exists() {
        return Err(ToolError::MissingInput(path.to_path_buf()));
    }
    let mut workbook: Xlsx<_> = open_workbook(path)?;

    let names = workbook.sheet_names().to_vec();
    let mut sheets = Vec::with_capacity(names.len());
    for name in names {
        let range = read_required_sheet(&mut workbook, &name)?;
        let sheet = range_to_sheet(&name, &range);
        debug!(sheet = %name, rows = sheet.rows.len(), "sheet loaded");
        sheets.push(sheet);
    }

    Ok(Workbook::new(sheets))
}

fn read_required_sheet<R: std::io::Read + std::io::Seek>(
    workbook: &mut Xlsx<R>,
    name: &str,
) -> Result<calamine::Range<DataType>> {
    let range_result = workbook
        .worksheet_range(name)
        .ok_or_else(|| ToolError::MissingSheet(name.to_string()))?;
    let range = range_result.map_err(ToolError::from)?;
    Ok(range)
}

fn range_to_sheet(name: &str, range: &calamine::Range<DataType>) -> Sheet {
    let mut sheet = Sheet::new(name);
    let Some((start_row, start_col)) = range.start() else {
        return sheet;
    };
    let (start_row, start_col) = (start_row as usize, start_col as usize);

    sheet.rows.resize_with(start_row, Vec::new);
    for row in range.rows() {
        let mut cells = vec![CellValue::Empty; start_col];
        cells.extend(row.iter().map(cell_value));
        while cells.last() == Some(&CellValue::Empty) {
            cells.pop();
        }
        sheet.rows.push(cells);
    }

    sheet
}

fn cell_value(cell: &DataType) -> CellValue {
    match cell {
        DataType::String(value) => CellValue::String(value.clone()),
        DataType::Float(value) => CellValue::Number(*value),
        DataType::Int(value) => CellValue::Number(*value as f64),
        DataType::Bool(value) => CellValue::Bool(*value),
        DataType::DateTime(value) => CellValue::DateTime(*value),
        DataType::Empty => CellValue::Empty,
        other => CellValue::String(other.to_string()),
    }
}
