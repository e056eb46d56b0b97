//! Merges freshly collected export rows into an existing worksheet while
//! keeping the UIDs the downstream platform assigned to earlier rows.

use std::collections::HashMap;

use tracing::{debug, info, warn};

use crate::europython::sheets::error::{Result, ToolError};
use crate::europython::sheets::io::store::{CellValue, Row, TabularStore};

/// What an unmatched new row gets in its UID column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnmatchedUid {
    /// Force a blank UID; the platform assigns one on the next import.
    Blank,
    /// Keep the value the collector put into the UID column.
    KeepCollected,
}

/// Fixed structure of a target workbook.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SheetLayout {
    /// Exact list of sheet names the workbook must contain, in order.
    pub expected_sheets: &'static [&'static str],
    /// Sheet holding the data rows.
    pub sheet: &'static str,
    /// 0-based index of the first data row.
    pub start_row: usize,
    /// 0-based index of the UID column.
    pub uid_column: usize,
    /// Columns forming the composite matching key.
    pub key_columns: &'static [usize],
    /// Human readable label used in "new entry" log lines.
    pub entry_label: &'static str,
    pub unmatched_uid: UnmatchedUid,
}

/// Attendify speakers workbook.
pub const SPEAKERS_LAYOUT: SheetLayout = SheetLayout {
    expected_sheets: &["Instructions", "Speakers", "System"],
    sheet: "Speakers",
    start_row: 5,
    uid_column: 12,
    key_columns: &[0, 1, 2],
    entry_label: "speaker",
    unmatched_uid: UnmatchedUid::Blank,
};

/// Video production schedule workbook.
pub const SCHEDULE_LAYOUT: SheetLayout = SheetLayout {
    expected_sheets: &["Schedule"],
    sheet: "Schedule",
    start_row: 5,
    uid_column: 10,
    key_columns: &[1, 2, 3, 4],
    entry_label: "or rescheduled talk",
    unmatched_uid: UnmatchedUid::KeepCollected,
};

/// Counters describing what a reconciliation pass did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileSummary {
    pub old_rows: usize,
    pub new_rows: usize,
    pub matched: usize,
    pub unmatched: usize,
    pub cleared_rows: usize,
}

type Key = Vec<String>;

impl SheetLayout {
    /// Fails unless the store carries exactly the expected sheets.
    pub fn check_sheets<S: TabularStore + ?Sized>(&self, store: &S) -> Result<()> {
        let found = store.sheet_names();
        if found.iter().map(String::as_str).eq(self.expected_sheets.iter().copied()) {
            return Ok(());
        }
        Err(ToolError::UnexpectedSheets {
            expected: self.expected_sheets.iter().map(|name| name.to_string()).collect(),
            found,
        })
    }

    fn key(&self, row: &[CellValue]) -> Key {
        self.key_columns
            .iter()
            .map(|&col| row.get(col).map(CellValue::to_string).unwrap_or_default())
            .collect()
    }

    fn uid<'a>(&self, row: &'a [CellValue]) -> Option<&'a CellValue> {
        row.get(self.uid_column).filter(|uid| !uid.is_blank())
    }
}

/// Reconciles `new_rows` into the data region of `layout.sheet`.
///
/// The store is only mutated, never saved; the caller persists it once this
/// returns successfully.
pub fn reconcile<S: TabularStore + ?Sized>(
    store: &mut S,
    layout: &SheetLayout,
    new_rows: Vec<Row>,
) -> Result<ReconcileSummary> {
    layout.check_sheets(&*store)?;

    let old_rows = store.read_rows(layout.sheet, layout.start_row..)?;
    info!(rows = old_rows.len(), "read data lines");
    debug!(first = ?old_rows.first(), last = ?old_rows.last(), "existing data bounds");

    let uids = index_uids(layout, &old_rows);
    let mut summary = ReconcileSummary {
        old_rows: old_rows.len(),
        new_rows: new_rows.len(),
        ..ReconcileSummary::default()
    };

    let merged: Vec<Row> = new_rows
        .into_iter()
        .map(|row| {
            let key = layout.key(&row);
            let uid = match uids.get(&key) {
                Some(uid) => {
                    summary.matched += 1;
                    (*uid).clone()
                }
                None => {
                    summary.unmatched += 1;
                    info!(key = ?key, "New {} found", layout.entry_label);
                    match layout.unmatched_uid {
                        UnmatchedUid::Blank => CellValue::from(""),
                        UnmatchedUid::KeepCollected => {
                            row.get(layout.uid_column).cloned().unwrap_or_default()
                        }
                    }
                }
            };
            with_uid(row, layout.uid_column, uid)
        })
        .collect();

    info!(rows = merged.len(), "new data lines");
    for (offset, row) in merged.iter().enumerate() {
        debug!(row = offset, values = ?row, "updating row");
        let target = layout.start_row + offset;
        for (col, value) in row.iter().enumerate() {
            store.write_cell(layout.sheet, target, col, value.clone())?;
        }
    }

    if merged.len() < summary.old_rows {
        let width = store.width(layout.sheet)?;
        let first = layout.start_row + merged.len();
        let last = layout.start_row + summary.old_rows;
        for target in first..=last {
            debug!(row = target - layout.start_row, "clearing row");
            for col in 0..width {
                store.clear_cell(layout.sheet, target, col)?;
            }
        }
        summary.cleared_rows = summary.old_rows - merged.len();
    }

    Ok(summary)
}

fn index_uids<'a>(layout: &SheetLayout, old_rows: &'a [Row]) -> HashMap<Key, &'a CellValue> {
    let mut uids = HashMap::new();
    for row in old_rows {
        let Some(uid) = layout.uid(row) else {
            continue;
        };
        let key = layout.key(row);
        if let Some(previous) = uids.insert(key.clone(), uid) {
            if previous != uid {
                warn!(
                    key = ?key,
                    %previous,
                    current = %uid,
                    "duplicate key in sheet, later UID wins"
                );
            }
        }
    }
    uids
}

/// Truncates the row to the UID column and puts `uid` there.
fn with_uid(mut row: Row, uid_column: usize, uid: CellValue) -> Row {
    row.resize(uid_column, CellValue::from(""));
    row.push(uid);
    row
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::europython::sheets::io::store::{Sheet, Workbook};

    const LAYOUT: SheetLayout = SheetLayout {
        expected_sheets: &["Data"],
        sheet: "Data",
        start_row: 1,
        uid_column: 2,
        key_columns: &[0],
        entry_label: "entry",
        unmatched_uid: UnmatchedUid::Blank,
    };

    fn row(cells: &[&str]) -> Row {
        cells.iter().map(|cell| CellValue::from(*cell)).collect()
    }

    #[test]
    fn key_ignores_columns_outside_the_row() {
        let layout = SheetLayout {
            key_columns: &[0, 7],
            ..LAYOUT
        };
        assert_eq!(layout.key(&row(&["a"])), vec!["a".to_string(), String::new()]);
    }

    #[test]
    fn blank_uids_are_not_indexed() {
        let rows = vec![row(&["a", "x", ""]), row(&["b", "y", "U2"])];
        let uids = index_uids(&LAYOUT, &rows);
        assert_eq!(uids.len(), 1);
        assert_eq!(uids.get(&vec!["b".to_string()]), Some(&&CellValue::from("U2")));
    }

    #[test]
    fn duplicate_keys_keep_the_later_uid() {
        let rows = vec![row(&["a", "x", "U1"]), row(&["a", "y", "U2"])];
        let uids = index_uids(&LAYOUT, &rows);
        assert_eq!(uids.get(&vec!["a".to_string()]), Some(&&CellValue::from("U2")));
    }

    #[test]
    fn with_uid_pads_short_rows_and_drops_surplus_columns() {
        assert_eq!(with_uid(row(&["a"]), 2, CellValue::from("U")), row(&["a", "", "U"]));
        assert_eq!(
            with_uid(row(&["a", "b", "c", "d"]), 2, CellValue::from("U")),
            row(&["a", "b", "U"])
        );
    }

    #[test]
    fn empty_new_data_clears_every_old_row() {
        let mut workbook = Workbook::new(vec![Sheet::from_strings(
            "Data",
            [vec!["H", "H", "H"], vec!["a", "x", "U1"], vec!["b", "y", "U2"]],
        )]);

        let summary = reconcile(&mut workbook, &LAYOUT, Vec::new()).unwrap();

        assert_eq!(summary.cleared_rows, 2);
        let sheet = workbook.sheet("Data").unwrap();
        assert_eq!(sheet.rows[0], row(&["H", "H", "H"]));
        assert!(sheet.rows[1..].iter().flatten().all(|cell| *cell == CellValue::Empty));
    }
}
