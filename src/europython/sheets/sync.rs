use std::path::Path;

use tracing::{info, instrument};

use crate::europython::sheets::collect::{collect_schedule, collect_speakers};
use crate::europython::sheets::config::ExportSettings;
use crate::europython::sheets::error::Result;
use crate::europython::sheets::io::XlsxFile;
use crate::europython::sheets::io::store::{Row, TabularStore};
use crate::europython::sheets::reconcile::{
    ReconcileSummary, SCHEDULE_LAYOUT, SPEAKERS_LAYOUT, SheetLayout, reconcile,
};
use crate::europython::sheets::source::ConferenceSource;

/// Updates an Attendify speakers workbook with the current speaker list.
///
/// The workbook must have been downloaded from Attendify first: the platform
/// keeps its own metadata in the file, which has to survive the update.
#[instrument(
    level = "info",
    skip_all,
    fields(
        conference = %conference,
        input = %input.display(),
        output = %output.unwrap_or(input).display(),
    )
)]
pub fn update_speakers<S: ConferenceSource + ?Sized>(
    source: &S,
    settings: &ExportSettings,
    conference: &str,
    input: &Path,
    output: Option<&Path>,
) -> Result<ReconcileSummary> {
    let rows = collect_speakers(source, settings, conference)?
        .into_iter()
        .map(|row| row.into_row())
        .collect();
    update_workbook(&SPEAKERS_LAYOUT, rows, input, output)
}

/// Updates a video schedule workbook with the accepted talks and the other
/// schedule slots of the conference.
#[instrument(
    level = "info",
    skip_all,
    fields(
        conference = %conference,
        input = %input.display(),
        output = %output.unwrap_or(input).display(),
    )
)]
pub fn update_schedule<S: ConferenceSource + ?Sized>(
    source: &S,
    settings: &ExportSettings,
    conference: &str,
    input: &Path,
    output: Option<&Path>,
) -> Result<ReconcileSummary> {
    let rows = collect_schedule(source, settings, conference)
        .into_iter()
        .map(|row| row.into_row())
        .collect();
    update_workbook(&SCHEDULE_LAYOUT, rows, input, output)
}

/// Opens the workbook, reconciles `rows` into it and saves it to `output`,
/// or back to `input` when no output is given. Only cell values change; the
/// rest of the file is written back as it was read. Nothing is written when
/// the reconciliation fails.
pub fn update_workbook(
    layout: &SheetLayout,
    rows: Vec<Row>,
    input: &Path,
    output: Option<&Path>,
) -> Result<ReconcileSummary> {
    let mut workbook = XlsxFile::open(input)?;
    let summary = reconcile(&mut workbook, layout, rows)?;

    let target = output.unwrap_or(input);
    workbook.save(target)?;
    info!(?summary, path = %target.display(), "workbook saved");
    Ok(summary)
}
