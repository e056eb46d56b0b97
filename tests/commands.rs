use std::fs;
use std::path::Path;

use europython_sheets::ToolError;
use europython_sheets::collect::{SCHEDULE_COLUMNS, SPEAKER_COLUMNS};
use europython_sheets::config::ExportSettings;
use europython_sheets::io::excel_read;
use europython_sheets::io::{CellValue, Sheet, TabularStore, Workbook};
use europython_sheets::model::ConferenceExport;
use europython_sheets::source::{ConferenceSource, JsonExport};
use europython_sheets::sync;
use rust_xlsxwriter::{Color, Format};
use tempfile::tempdir;

const START: u32 = 5;

fn write_template(
    path: &Path,
    sheets: &[&str],
    data_sheet: &str,
    headers: &[&str],
    rows: &[&[&str]],
) {
    let sheets = sheets
        .iter()
        .map(|name| {
            if *name != data_sheet {
                return Sheet::from_strings(*name, [["keep me"]]);
            }
            let mut grid = vec![vec![""; headers.len()]; START as usize];
            grid[0][0] = "Attendify template";
            grid[3] = headers.to_vec();
            grid.extend(rows.iter().map(|cells| cells.to_vec()));
            Sheet::from_strings(*name, grid)
        })
        .collect();
    Workbook::new(sheets).save(path).expect("template saved");
}

fn source() -> JsonExport {
    let export: ConferenceExport = serde_json::from_value(serde_json::json!({
        "talks": [
            {"id": 1, "conference": "ep2018", "status": "accepted", "type": "t_30",
             "title": "Rust for Pythonistas", "abstract": "Ownership *explained*",
             "speakers": [10, 11]},
            {"id": 2, "conference": "ep2018", "status": "accepted", "type": "t_30",
             "title": "New Talk", "speakers": [12, 13]}
        ],
        "speakers": [
            {"id": 10, "first_name": "jane", "last_name": "doe",
             "profile": {"slug": "jane-doe", "visibility": "p", "company": "Acme",
                         "job_title": "Eng", "twitter": "https://twitter.com/jdoe"}},
            {"id": 11, "first_name": "Hidden", "last_name": "Person",
             "profile": {"slug": "hidden", "visibility": "m"}},
            {"id": 12, "first_name": "To Be", "last_name": "Announced",
             "profile": {"slug": "tba", "visibility": "p"}},
            {"id": 13, "first_name": "John", "last_name": "Roe"}
        ],
        "events": [
            {"id": 100, "conference": "ep2018", "talk": 1, "tracks": ["Kilsyth"],
             "start": "2018-07-25T10:00:00", "end": "2018-07-25T10:45:00"},
            {"id": 101, "conference": "ep2018", "talk": 2, "tracks": ["Lennox"],
             "start": "2018-07-26T09:00:00", "end": "2018-07-26T09:45:00"}
        ]
    }))
    .expect("export parsed");
    JsonExport::new(export)
}

#[test]
fn speakers_workbook_is_updated_in_place() {
    let temp_dir = tempdir().expect("temporary directory");
    let xlsx_path = temp_dir.path().join("speakers.xlsx");
    write_template(
        &xlsx_path,
        &["Instructions", "Speakers", "System"],
        "Speakers",
        &SPEAKER_COLUMNS,
        &[
            &["Jane", "Doe", "Acme", "Eng", "", "", "", "", "", "", "", "", "UID123"],
            &["Gone", "Speaker", "Old Co", "", "", "", "", "", "", "", "", "", "UID999"],
        ],
    );

    let summary = sync::update_speakers(
        &source(),
        &ExportSettings::default(),
        "ep2018",
        &xlsx_path,
        None,
    )
    .expect("speakers updated");
    assert_eq!(summary.new_rows, 1);
    assert_eq!(summary.cleared_rows, 1);

    let workbook = excel_read::read_workbook(&xlsx_path).expect("workbook read back");
    assert_eq!(workbook.sheet_names(), vec!["Instructions", "Speakers", "System"]);
    assert_eq!(
        workbook.sheet("System").expect("system sheet").cell(0, 0),
        Some(&CellValue::from("keep me"))
    );

    let rows = workbook.read_rows("Speakers", START as usize..).expect("data rows");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0][0], CellValue::from("Jane"));
    assert_eq!(rows[0][1], CellValue::from("Doe"));
    assert_eq!(rows[0][8], CellValue::from("jdoe"));
    assert_eq!(rows[0][12], CellValue::from("UID123"));
    assert_eq!(
        rows[0][5],
        CellValue::from(
            r#"<a href="https://ep2018.europython.eu/conference/p/jane-doe">Profile on EuroPython Website</a>"#
        )
    );

    let speakers = workbook.sheet("Speakers").expect("speakers sheet");
    assert_eq!(speakers.cell(3, 12), Some(&CellValue::from("UID (do not delete)")));
}

fn write_styled_speakers_template(path: &Path) {
    let mut template = rust_xlsxwriter::Workbook::new();
    let highlight = Format::new().set_bold().set_background_color(Color::Yellow);

    let instructions = template.add_worksheet();
    instructions.set_name("Instructions").expect("sheet named");
    instructions.write_string(0, 0, "Read me").expect("cell written");

    let speakers = template.add_worksheet();
    speakers.set_name("Speakers").expect("sheet named");
    speakers.set_column_width(0, 40).expect("width set");
    speakers
        .write_string_with_format(0, 0, "Attendify template", &highlight)
        .expect("title written");
    for (col, header) in SPEAKER_COLUMNS.iter().enumerate() {
        speakers
            .write_string_with_format(3, col as u16, *header, &highlight)
            .expect("header written");
    }
    for (col, value) in ["Jane", "Doe", "Acme", "Eng"].iter().enumerate() {
        speakers.write_string(START, col as u16, *value).expect("data written");
    }
    speakers
        .write_string_with_format(START, 5, "stale profile", &highlight)
        .expect("profile written");
    speakers.write_string(START, 12, "UID123").expect("uid written");

    let system = template.add_worksheet();
    system.set_name("System").expect("sheet named");
    system.write_string(0, 0, "attendify metadata").expect("cell written");
    system.set_hidden(true);

    template.save(path).expect("template saved");
}

fn is_bold(cell: &umya_spreadsheet::Cell) -> bool {
    cell.get_style().get_font().is_some_and(|font| *font.get_bold())
}

#[test]
fn update_keeps_hidden_sheets_widths_and_cell_styles() {
    let temp_dir = tempdir().expect("temporary directory");
    let xlsx_path = temp_dir.path().join("speakers.xlsx");
    write_styled_speakers_template(&xlsx_path);

    sync::update_speakers(
        &source(),
        &ExportSettings::default(),
        "ep2018",
        &xlsx_path,
        None,
    )
    .expect("speakers updated");

    let book = umya_spreadsheet::reader::xlsx::read(&xlsx_path).expect("updated file parsed");
    let system = book.get_sheet_by_name("System").expect("system sheet");
    assert_eq!(system.get_sheet_state(), "hidden");

    let speakers = book.get_sheet_by_name("Speakers").expect("speakers sheet");
    let width = speakers
        .get_column_dimension("A")
        .map(|column| *column.get_width())
        .expect("column A width");
    assert!(width >= 40.0, "column A width is {width}");

    let header = speakers.get_cell((1, 4)).expect("header cell");
    assert_eq!(header.get_value(), "First Name");
    assert!(is_bold(header));

    let profile = speakers.get_cell((6, START + 1)).expect("profile cell");
    assert!(profile.get_value().starts_with("<a href="));
    assert!(is_bold(profile));

    let workbook = excel_read::read_workbook(&xlsx_path).expect("workbook read back");
    assert_eq!(
        workbook.sheet("System").expect("system sheet").cell(0, 0),
        Some(&CellValue::from("attendify metadata"))
    );
    let rows = workbook.read_rows("Speakers", START as usize..).expect("data rows");
    assert_eq!(rows[0][12], CellValue::from("UID123"));
}

#[test]
fn schedule_workbook_can_be_written_elsewhere() {
    let temp_dir = tempdir().expect("temporary directory");
    let xlsx_path = temp_dir.path().join("videos.xlsx");
    let output_path = temp_dir.path().join("videos-updated.xlsx");
    write_template(
        &xlsx_path,
        &["Schedule"],
        "Schedule",
        &SCHEDULE_COLUMNS,
        &[&[
            "Jane Doe", "Rust for Pythonistas", "2018-07-25", "10:00", "10:45", "", "", "", "",
            "Talks", "V-1",
        ]],
    );
    let original = fs::read(&xlsx_path).expect("template bytes");

    let summary = sync::update_schedule(
        &source(),
        &ExportSettings::default(),
        "ep2018",
        &xlsx_path,
        Some(output_path.as_path()),
    )
    .expect("schedule updated");
    assert_eq!(summary.matched, 1);
    assert_eq!(summary.unmatched, 1);
    assert_eq!(fs::read(&xlsx_path).expect("input bytes"), original);

    let workbook = excel_read::read_workbook(&output_path).expect("workbook read back");
    let rows = workbook.read_rows("Schedule", START as usize..).expect("data rows");
    assert_eq!(rows.len(), 2);

    assert_eq!(rows[0][1], CellValue::from("New Talk"));
    assert_eq!(rows[0][2], CellValue::from("2018-07-26"));
    assert_eq!(rows[0][3], CellValue::from("09:00"));
    assert_eq!(rows[0][5], CellValue::from("To Be Announced, John Roe - New Talk"));
    assert_eq!(rows[0][10], CellValue::from("101"));

    assert_eq!(rows[1][0], CellValue::from("jane doe, Hidden Person"));
    assert_eq!(rows[1][1], CellValue::from("Rust for Pythonistas"));
    assert_eq!(rows[1][8], CellValue::from("Kilsyth"));
    assert_eq!(rows[1][9], CellValue::from("Talks"));
    assert_eq!(rows[1][10], CellValue::from("V-1"));
}

#[test]
fn wrong_sheet_layout_leaves_the_file_untouched() {
    let temp_dir = tempdir().expect("temporary directory");
    let xlsx_path = temp_dir.path().join("speakers.xlsx");
    write_template(&xlsx_path, &["Speakers"], "Speakers", &SPEAKER_COLUMNS, &[]);
    let original = fs::read(&xlsx_path).expect("template bytes");

    let error = sync::update_speakers(
        &source(),
        &ExportSettings::default(),
        "ep2018",
        &xlsx_path,
        None,
    )
    .unwrap_err();

    assert!(matches!(error, ToolError::UnexpectedSheets { .. }));
    assert_eq!(fs::read(&xlsx_path).expect("file bytes"), original);
}

#[test]
fn missing_workbook_is_reported() {
    let temp_dir = tempdir().expect("temporary directory");
    let error = sync::update_schedule(
        &source(),
        &ExportSettings::default(),
        "ep2018",
        &temp_dir.path().join("absent.xlsx"),
        None,
    )
    .unwrap_err();

    assert!(matches!(error, ToolError::MissingInput(_)));
}

#[test]
fn export_file_round_trips_through_the_loader() {
    let temp_dir = tempdir().expect("temporary directory");
    let json_path = temp_dir.path().join("export.json");
    fs::write(
        &json_path,
        r#"{"talks": [{"id": 1, "conference": "ep2018", "status": "accepted",
                       "type": "t", "title": "T", "speakers": []}]}"#,
    )
    .expect("export written");

    let source = JsonExport::load(&json_path).expect("export loaded");
    assert_eq!(source.accepted_talks("ep2018").len(), 1);
}
