use std::path::PathBuf;

use clap::{Parser, Subcommand};
use europython_sheets::config::ExportSettings;
use europython_sheets::source::JsonExport;
use europython_sheets::sync;
use europython_sheets::{Result, ToolError};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    if let Err(error) = init_tracing().and_then(|()| run(cli)) {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}

fn init_tracing() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .map_err(|error| ToolError::Logging(error.to_string()))
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::AttendifySpeakers(args) => {
            let job = args.resolve()?;
            sync::update_speakers(
                &job.source,
                &job.settings,
                &job.conference,
                &job.workbook,
                job.output.as_deref(),
            )?;
        }
        Command::VideoSchedule(args) => {
            let job = args.resolve()?;
            sync::update_schedule(
                &job.source,
                &job.settings,
                &job.conference,
                &job.workbook,
                job.output.as_deref(),
            )?;
        }
    }
    Ok(())
}

/// Validated arguments of one update run.
struct Job {
    conference: String,
    workbook: PathBuf,
    output: Option<PathBuf>,
    settings: ExportSettings,
    source: JsonExport,
}

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Reconcile conference data into Attendify and video schedule workbooks."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Update an Attendify speakers workbook in place.
    AttendifySpeakers(UpdateArgs),
    /// Update a video production schedule workbook in place.
    VideoSchedule(UpdateArgs),
}

#[derive(clap::Args)]
struct UpdateArgs {
    /// Conference identifier, e.g. ep2018.
    conference: Option<String>,

    /// Workbook to update.
    xlsx: Option<PathBuf>,

    /// JSON export of the conference database.
    #[arg(long)]
    data: Option<PathBuf>,

    /// Optional JSON settings file overriding the export defaults.
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Write the updated workbook here instead of overwriting the input.
    #[arg(long)]
    output: Option<PathBuf>,
}

impl UpdateArgs {
    fn resolve(self) -> Result<Job> {
        let conference = self
            .conference
            .ok_or(ToolError::MissingArgument("conference"))?;
        let workbook = self.xlsx.ok_or(ToolError::MissingArgument("XLSX file"))?;
        let data = self
            .data
            .ok_or(ToolError::MissingArgument("conference data export (--data)"))?;
        let settings = ExportSettings::load(self.settings.as_deref())?;
        let source = JsonExport::load(&data)?;
        Ok(Job {
            conference,
            workbook,
            output: self.output,
            settings,
            source,
        })
    }
}
