//! CSV report tables.
//!
//! Undefined statistics are written as empty fields.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use recall_scoring::{
    ErrorDistribution, GlobalSummary, PositionPoint, ResponseLabel, ScoringReport, TrialSummary,
};
use serde::Serialize;
use tracing::info;

/// Paths of the tables written for one report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenFiles {
    pub curve: PathBuf,
    pub global: PathBuf,
    pub per_trial: PathBuf,
    /// Serial recall only
    pub errors: Option<PathBuf>,
}

impl WrittenFiles {
    pub fn all(&self) -> Vec<&Path> {
        let mut paths = vec![
            self.curve.as_path(),
            self.global.as_path(),
            self.per_trial.as_path(),
        ];
        if let Some(errors) = &self.errors {
            paths.push(errors.as_path());
        }
        paths
    }
}

#[derive(Debug, Serialize)]
struct CurveRow {
    position: usize,
    correct: u64,
    total: u64,
    percent: Option<f64>,
}

impl From<&PositionPoint> for CurveRow {
    fn from(point: &PositionPoint) -> Self {
        Self {
            position: point.position,
            correct: point.correct,
            total: point.total,
            percent: point.percent,
        }
    }
}

#[derive(Debug, Serialize)]
struct GlobalRow {
    n_items_total: u64,
    k_correct_total: u64,
    prop_correct_global: Option<f64>,
    ci_lower: Option<f64>,
    ci_upper: Option<f64>,
    percent_correct_global: Option<f64>,
    ci_lower_percent: Option<f64>,
    ci_upper_percent: Option<f64>,
}

impl From<&GlobalSummary> for GlobalRow {
    fn from(global: &GlobalSummary) -> Self {
        Self {
            n_items_total: global.n_items_total,
            k_correct_total: global.k_correct_total,
            prop_correct_global: global.proportion,
            ci_lower: global.interval.map(|i| i.lower),
            ci_upper: global.interval.map(|i| i.upper),
            percent_correct_global: global.percent(),
            ci_lower_percent: global.interval.map(|i| i.lower_percent()),
            ci_upper_percent: global.interval.map(|i| i.upper_percent()),
        }
    }
}

#[derive(Debug, Serialize)]
struct TrialRow<'a> {
    file: &'a str,
    n_items: u64,
    k_correct: u64,
    prop_correct: Option<f64>,
    ci_lower: Option<f64>,
    ci_upper: Option<f64>,
    percent_correct: Option<f64>,
    ci_lower_percent: Option<f64>,
    ci_upper_percent: Option<f64>,
}

impl<'a> From<&'a TrialSummary> for TrialRow<'a> {
    fn from(trial: &'a TrialSummary) -> Self {
        Self {
            file: &trial.source_id,
            n_items: trial.n_items,
            k_correct: trial.k_correct,
            prop_correct: trial.proportion,
            ci_lower: trial.interval.map(|i| i.lower),
            ci_upper: trial.interval.map(|i| i.upper),
            percent_correct: trial.percent(),
            ci_lower_percent: trial.interval.map(|i| i.lower_percent()),
            ci_upper_percent: trial.interval.map(|i| i.upper_percent()),
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorRow<'a> {
    file: &'a str,
    n_items: u64,
    correct_count: u64,
    omission_count: u64,
    transposition_count: u64,
    intrusion_count: u64,
    correct_prop: Option<f64>,
    omission_prop: Option<f64>,
    transposition_prop: Option<f64>,
    intrusion_prop: Option<f64>,
    correct_percent: Option<f64>,
    omission_percent: Option<f64>,
    transposition_percent: Option<f64>,
    intrusion_percent: Option<f64>,
}

impl<'a> From<&'a ErrorDistribution> for ErrorRow<'a> {
    fn from(dist: &'a ErrorDistribution) -> Self {
        let percent = |label| dist.proportions.get(label).map(|p| p * 100.0);
        Self {
            file: &dist.source_id,
            n_items: dist.n_items,
            correct_count: dist.counts.correct,
            omission_count: dist.counts.omission,
            transposition_count: dist.counts.transposition,
            intrusion_count: dist.counts.intrusion,
            correct_prop: dist.proportions.correct,
            omission_prop: dist.proportions.omission,
            transposition_prop: dist.proportions.transposition,
            intrusion_prop: dist.proportions.intrusion,
            correct_percent: percent(ResponseLabel::Correct),
            omission_percent: percent(ResponseLabel::Omission),
            transposition_percent: percent(ResponseLabel::Transposition),
            intrusion_percent: percent(ResponseLabel::Intrusion),
        }
    }
}

/// Write every table of `report` into `dir`, named `{prefix}_*.csv`.
pub fn write_report(report: &ScoringReport, dir: &Path, prefix: &str) -> Result<WrittenFiles> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory {}", dir.display()))?;

    let curve = dir.join(format!("{prefix}_serial_position.csv"));
    write_rows(&curve, report.curve.iter().map(CurveRow::from))?;

    let global = dir.join(format!("{prefix}_global_summary.csv"));
    write_rows(&global, std::iter::once(GlobalRow::from(&report.global)))?;

    let per_trial = dir.join(format!("{prefix}_per_trial_summary.csv"));
    write_rows(&per_trial, report.trials.iter().map(TrialRow::from))?;

    let errors = match &report.errors {
        Some(errors) => {
            let path = dir.join(format!("{prefix}_error_types_per_trial.csv"));
            write_rows(&path, errors.iter().map(ErrorRow::from))?;
            Some(path)
        }
        None => None,
    };

    let written = WrittenFiles {
        curve,
        global,
        per_trial,
        errors,
    };
    for path in written.all() {
        info!(path = %path.display(), "wrote report table");
    }
    Ok(written)
}

fn write_rows<R: Serialize>(path: &Path, rows: impl Iterator<Item = R>) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    for row in rows {
        writer
            .serialize(row)
            .with_context(|| format!("Failed to write {}", path.display()))?;
    }
    writer.flush()?;
    Ok(())
}
