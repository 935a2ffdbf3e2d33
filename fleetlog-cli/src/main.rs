mod reports;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, ValueEnum};
use fleetlog_core::{DayBoundary, ProgressionConfig, SaveSnapshot, SnapshotAnalysis};
use std::fs::{self, File};
use std::io::{BufWriter, Write, stdout};
use std::num::NonZeroU32;
use std::path::{Path, PathBuf};

use reports::{FleetReport, LaunchLogReport};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum View {
    /// Per-ship levels and launch points
    Progression,
    /// Launches grouped by day
    Log,
    /// Both views
    Both,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BoundaryArg {
    /// Split days at local midnight
    Local,
    /// Split days at UTC midnight
    Utc,
}

impl From<BoundaryArg> for DayBoundary {
    fn from(value: BoundaryArg) -> Self {
        match value {
            BoundaryArg::Local => Self::Local,
            BoundaryArg::Utc => Self::Utc,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "fleetlog", version)]
#[command(about = "Ship progression and launch history reports from a decoded save snapshot")]
struct Args {
    /// Decoded save snapshot (JSON)
    #[arg(long)]
    snapshot: PathBuf,

    /// Progression table overrides (JSON); defaults are used for omitted tables
    #[arg(long)]
    config: Option<PathBuf>,

    /// Which statistics to report
    #[arg(long, value_enum, default_value_t = View::Both)]
    view: View,

    /// Only show launches from the last N days
    #[arg(long)]
    days: Option<NonZeroU32>,

    /// Clock used to split launches into days
    #[arg(long, value_enum, default_value_t = BoundaryArg::Local)]
    day_boundary: BoundaryArg,

    /// Treat this date as today when applying --days (YYYY-MM-DD)
    #[arg(long)]
    today: Option<NaiveDate>,

    /// Output report format
    #[arg(long, default_value = "console")]
    #[arg(value_parser = ["json", "markdown", "console"])]
    report: String,

    /// Include every launch in the console log
    #[arg(short, long)]
    verbose: bool,

    /// Optional path to write the report output instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let snapshot = load_snapshot(&args.snapshot)?;
    let config = load_config(args.config.as_deref())?;
    let analysis = snapshot
        .analyze(config, args.day_boundary.into())
        .with_context(|| format!("failed to analyse {}", args.snapshot.display()))?;
    log::info!(
        "{} launched missions across {} ships",
        analysis.launch_log.mission_count(),
        analysis.progression.ships().len()
    );

    write_reports(&args, &analysis)
}

fn load_snapshot(path: &Path) -> Result<SaveSnapshot> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read snapshot {}", path.display()))?;
    SaveSnapshot::from_json(&raw)
        .with_context(|| format!("failed to parse snapshot {}", path.display()))
}

fn load_config(path: Option<&Path>) -> Result<ProgressionConfig> {
    let Some(path) = path else {
        return Ok(ProgressionConfig::default());
    };
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    ProgressionConfig::from_json(&raw)
        .with_context(|| format!("failed to parse config {}", path.display()))
}

fn build_report<'a>(args: &Args, analysis: &'a SnapshotAnalysis) -> FleetReport<'a> {
    let progression = matches!(args.view, View::Progression | View::Both)
        .then_some(&analysis.progression);
    let launch_log = matches!(args.view, View::Log | View::Both).then(|| {
        let log = &analysis.launch_log;
        let today = args.today.unwrap_or_else(|| log.boundary().today());
        LaunchLogReport {
            boundary: log.boundary(),
            today,
            window_days: args.days,
            days: log.filtered(args.days, today),
        }
    });
    FleetReport {
        progression,
        launch_log,
    }
}

fn write_reports(args: &Args, analysis: &SnapshotAnalysis) -> Result<()> {
    let report = build_report(args, analysis);
    let mut output_target = OutputTarget::new(args.output.clone())?;

    match args.report.as_str() {
        "json" => reports::generate_json_report(&mut output_target, &report)?,
        "markdown" => reports::generate_markdown_report(&mut output_target, &report)?,
        _ => reports::generate_console_report(&mut output_target, &report, args.verbose)?,
    }

    output_target.flush_inner()?;
    Ok(())
}

enum OutputTarget {
    Stdout(BufWriter<std::io::Stdout>),
    File(BufWriter<File>),
}

impl OutputTarget {
    fn new(path: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = path {
            let file = File::create(&path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            Ok(Self::File(BufWriter::new(file)))
        } else {
            Ok(Self::Stdout(BufWriter::new(stdout())))
        }
    }

    fn writer(&mut self) -> &mut dyn Write {
        match self {
            Self::Stdout(w) => w,
            Self::File(w) => w,
        }
    }

    fn flush_inner(&mut self) -> std::io::Result<()> {
        match self {
            Self::Stdout(w) => w.flush(),
            Self::File(w) => w.flush(),
        }
    }
}

impl Write for OutputTarget {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.writer().write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.flush_inner()
    }
}
