//! Core library for the europython-sheets command line application.
//!
//! The tool keeps externally owned spreadsheets in step with the conference
//! database. Records are read through [`europython::sheets::source`], turned
//! into export rows by [`europython::sheets::collect`], and merged into the
//! existing workbook by [`europython::sheets::reconcile`], which preserves
//! the UID column the downstream platform maintains. Workbook loading and
//! saving lives under [`europython::sheets::io`]; the per-command
//! orchestration under [`europython::sheets::sync`].

pub mod europython;

pub use europython::sheets::{
    Result, ToolError, collect, config, error, io, model, reconcile, source, sync, text,
};
