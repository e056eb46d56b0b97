use std::path::PathBuf;

use thiserror::Error;

/// Convenient alias for fallible results returned throughout the crate.
pub type Result<T> = std::result::Result<T, ToolError>;

/// Error type covering the failures that abort a reconciliation run.
///
/// Record-level problems (a speaker without profile, a talk without event)
/// are not errors: the collectors log and skip them.
#[derive(Debug, Error)]
pub enum ToolError {
    /// Wrapper for IO failures such as reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Raised when the data export or the settings file is not valid JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Errors bubbled up from the Excel writer implementation.
    #[error("Excel write error: {0}")]
    ExcelWrite(#[from] rust_xlsxwriter::XlsxError),

    /// Errors raised while parsing or re-serialising a workbook edited in place.
    #[error("Excel edit error: {0}")]
    ExcelEdit(#[from] umya_spreadsheet::XlsxError),

    /// Errors bubbled up from the Excel reader implementation.
    #[error("Excel read error: {0}")]
    ExcelRead(#[from] calamine::XlsxError),

    /// Raised when the configured website URL cannot be joined with a profile path.
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Raised when a positional command argument was not supplied.
    #[error("{0} not specified")]
    MissingArgument(&'static str),

    /// Raised when the user provides a path that does not exist.
    #[error("input file not found: {0}")]
    MissingInput(PathBuf),

    /// Raised when the workbook does not carry exactly the expected sheets.
    #[error("unexpected sheet layout: expected {expected:?}, found {found:?}")]
    UnexpectedSheets {
        expected: Vec<String>,
        found: Vec<String>,
    },

    /// Raised when a sheet is addressed that the workbook does not contain.
    #[error("missing sheet '{0}'")]
    MissingSheet(String),

    /// Raised when the tracing subscriber fails to initialise.
    #[error("failed to initialise logging: {0}")]
    Logging(String),
}
