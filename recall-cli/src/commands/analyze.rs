//! Scoring commands for serial and free recall folders.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, ValueEnum};
use recall_scoring::{ScoringReport, TaskKind, TrialBatch, TrialLoader, score_batch};
use tracing::info;

use crate::config::{ConfigLoader, RecallConfig};
use crate::report::{self, WrittenFiles};

/// Arguments shared by `recall serial` and `recall free`.
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Folder with one table per trial (columns 'sample' and 'guess')
    pub folder: PathBuf,

    /// Prefix for output file names [default: serial_recall / free_recall]
    #[arg(short, long)]
    pub prefix: Option<String>,

    /// Directory to write report tables into
    #[arg(short, long)]
    pub out_dir: Option<PathBuf>,

    /// Normal quantile for Wilson intervals
    #[arg(long)]
    pub z: Option<f64>,

    /// How to print the report to stdout
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

/// Console output format.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Summary line and tables
    #[default]
    Table,
    /// Full report as JSON
    Json,
}

/// Run a scoring command.
pub fn run(task: TaskKind, args: AnalyzeArgs) -> Result<()> {
    let config = ConfigLoader::load()?;
    let format = args.format;
    let (report, written) = analyze(task, args, config)?;

    match format {
        OutputFormat::Table => {
            println!("{}", report::curve_table(&report));
            println!("{}", report::trial_table(&report));
            println!("[Global] {}", report::global_line(&report.global, report.z));
            let saved: Vec<String> = written
                .all()
                .iter()
                .map(|p| p.display().to_string())
                .collect();
            println!("Saved: {}", saved.join(", "));
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}

/// Load, score and write one folder.
///
/// Every trial is loaded and scored before anything is written, so a bad
/// file leaves no partial report behind.
fn analyze(
    task: TaskKind,
    args: AnalyzeArgs,
    mut config: RecallConfig,
) -> Result<(ScoringReport, WrittenFiles)> {
    if let Some(z) = args.z {
        config.scoring.z = z;
    }
    if let Some(dir) = args.out_dir {
        config.output.directory = dir;
    }
    let loader = TrialLoader::with_options(task, config.loader_options()?);

    let batch = TrialBatch::discover(&args.folder, &config.input.extension)?;
    info!(
        task = %task,
        folder = %args.folder.display(),
        files = batch.len(),
        "scoring trials"
    );
    let trials = batch.load(&loader)?;
    let report = score_batch(task, trials, config.scoring.z)?;
    info!(
        trials = report.trials.len(),
        k = report.global.k_correct_total,
        n = report.global.n_items_total,
        "scored batch"
    );

    let prefix = args
        .prefix
        .unwrap_or_else(|| task.default_prefix().to_string());
    let written = report::write_report(&report, &config.output.directory, &prefix)?;

    Ok((report, written))
}
