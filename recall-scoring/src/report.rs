//! Result types handed to report emitters.
//!
//! Every statistic that can be undefined is an `Option`: a position nobody
//! reached or a trial with no items yields `None`, never zero.

use serde::{Deserialize, Serialize};

use crate::classify::{LabelCounts, ResponseLabel};
use crate::interval::{Interval, proportion, wilson_interval};
use crate::types::TaskKind;

/// Running `(correct, total)` pair for one serial position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionTally {
    pub correct: u64,
    pub total: u64,
}

impl PositionTally {
    pub fn record(&mut self, correct: bool) {
        self.total += 1;
        if correct {
            self.correct += 1;
        }
    }

    /// Percent correct, `None` if no trial reached this position.
    #[must_use]
    pub fn percent(&self) -> Option<f64> {
        proportion(self.correct, self.total).map(|p| p * 100.0)
    }
}

/// One point of the serial position curve. Carries no interval.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PositionPoint {
    /// 1-based position in the presented sequence.
    pub position: usize,
    pub correct: u64,
    pub total: u64,
    pub percent: Option<f64>,
}

impl PositionPoint {
    #[must_use]
    pub fn from_tally(position: usize, tally: PositionTally) -> Self {
        Self {
            position,
            correct: tally.correct,
            total: tally.total,
            percent: tally.percent(),
        }
    }
}

/// Accuracy of one trial with its own Wilson interval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrialSummary {
    pub source_id: String,
    pub n_items: u64,
    pub k_correct: u64,
    pub proportion: Option<f64>,
    pub interval: Option<Interval>,
}

impl TrialSummary {
    #[must_use]
    pub fn compute(source_id: impl Into<String>, k_correct: u64, n_items: u64, z: f64) -> Self {
        Self {
            source_id: source_id.into(),
            n_items,
            k_correct,
            proportion: proportion(k_correct, n_items),
            interval: wilson_interval(k_correct, n_items, z),
        }
    }

    #[must_use]
    pub fn percent(&self) -> Option<f64> {
        self.proportion.map(|p| p * 100.0)
    }
}

/// Accuracy over every scored item of every trial.
///
/// The interval is computed once from the pooled counts, not averaged from
/// per-trial intervals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalSummary {
    pub n_items_total: u64,
    pub k_correct_total: u64,
    pub proportion: Option<f64>,
    pub interval: Option<Interval>,
}

impl GlobalSummary {
    #[must_use]
    pub fn compute(k_correct_total: u64, n_items_total: u64, z: f64) -> Self {
        Self {
            n_items_total,
            k_correct_total,
            proportion: proportion(k_correct_total, n_items_total),
            interval: wilson_interval(k_correct_total, n_items_total, z),
        }
    }

    #[must_use]
    pub fn percent(&self) -> Option<f64> {
        self.proportion.map(|p| p * 100.0)
    }
}

/// Share of each label within one trial.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LabelProportions {
    pub correct: Option<f64>,
    pub omission: Option<f64>,
    pub transposition: Option<f64>,
    pub intrusion: Option<f64>,
}

impl LabelProportions {
    #[must_use]
    pub fn get(&self, label: ResponseLabel) -> Option<f64> {
        match label {
            ResponseLabel::Correct => self.correct,
            ResponseLabel::Omission => self.omission,
            ResponseLabel::Transposition => self.transposition,
            ResponseLabel::Intrusion => self.intrusion,
        }
    }
}

/// Error-type breakdown of one serial-recall trial.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorDistribution {
    pub source_id: String,
    pub n_items: u64,
    pub counts: LabelCounts,
    pub proportions: LabelProportions,
}

impl ErrorDistribution {
    #[must_use]
    pub fn from_counts(source_id: impl Into<String>, counts: LabelCounts) -> Self {
        Self {
            source_id: source_id.into(),
            n_items: counts.total(),
            counts,
            proportions: LabelProportions {
                correct: counts.proportion(ResponseLabel::Correct),
                omission: counts.proportion(ResponseLabel::Omission),
                transposition: counts.proportion(ResponseLabel::Transposition),
                intrusion: counts.proportion(ResponseLabel::Intrusion),
            },
        }
    }
}

/// Everything a batch produces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringReport {
    pub task: TaskKind,
    /// Normal quantile used for every interval in the report.
    pub z: f64,
    pub curve: Vec<PositionPoint>,
    pub global: GlobalSummary,
    /// One row per trial, sorted by source id.
    pub trials: Vec<TrialSummary>,
    /// Serial recall only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<ErrorDistribution>>,
}
