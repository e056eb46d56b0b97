use std::path::Path;

use rust_xlsxwriter::{Format, Workbook as XlsxWorkbook};

use crate::europython::sheets::error::Result;
use crate::europython::sheets::io::store::{CellValue, Workbook};

/// Number format applied to cells that were read back as Excel dates.
const DATE_TIME_FORMAT: &str = "yyyy-mm-dd hh:mm";

/// Writes the values of an in-memory workbook to a new file, one worksheet per
/// sheet in workbook order. Empty cells are not emitted and no formatting
/// other than the date format is applied.
pub fn write_workbook(path: &Path, workbook: &Workbook) -> Result<()> {
    let mut workbook_writer = XlsxWorkbook::new();
    let date_format = Format::new().set_num_format(DATE_TIME_FORMAT);

    for sheet in &workbook.sheets {
        let worksheet = workbook_writer.add_worksheet();
        worksheet.set_name(&sheet.name)?;

        for (row_idx, row) in sheet.rows.iter().enumerate() {
            let row_idx = row_idx as u32;
            for (col_idx, cell) in row.iter().enumerate() {
                let col_idx = col_idx as u16;
                match cell {
                    CellValue::Empty => {}
                    CellValue::String(value) => {
                        worksheet.write_string(row_idx, col_idx, value)?;
                    }
                    CellValue::Number(value) => {
                        worksheet.write_number(row_idx, col_idx, *value)?;
                    }
                    CellValue::Bool(value) => {
                        worksheet.write_boolean(row_idx, col_idx, *value)?;
                    }
                    CellValue::DateTime(value) => {
                        worksheet.write_number_with_format(
                            row_idx,
                            col_idx,
                            *value,
                            &date_format,
                        )?;
                    }
                }
            }
        }
    }

    workbook_writer.save(path)?;
    Ok(())
}
