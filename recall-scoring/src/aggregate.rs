//! Batch aggregation of scored trials.
//!
//! The [`Aggregator`] folds trials one at a time into running tallies:
//!
//! - per-position `(correct, total)` pairs for the serial position curve
//! - pooled `(K, N)` over every scored item
//! - one [`TrialSummary`] per trial, each with its own interval
//! - serial recall only: one [`ErrorDistribution`] per trial
//!
//! Nothing is written anywhere; [`Aggregator::finish`] returns a
//! [`ScoringReport`] for an emitter to persist.
//!
//! ## Serial sequence length
//!
//! The first serial trial fixes the batch sequence length. Later trials are
//! padded with empty responses or truncated to that length, so a short trial
//! counts its missing tail as omissions.

use tracing::{debug, warn};

use crate::classify::{LabelCounts, ResponseLabel, classify_serial, score_free};
use crate::error::{Result, ScoringError};
use crate::report::{
    ErrorDistribution, GlobalSummary, PositionPoint, PositionTally, ScoringReport, TrialSummary,
};
use crate::types::{TaskKind, Trial};

/// Accumulates scoring results across one batch of trials.
#[derive(Debug, Clone)]
pub struct Aggregator {
    task: TaskKind,
    z: f64,
    sequence_len: Option<usize>,
    positions: Vec<PositionTally>,
    k_total: u64,
    n_total: u64,
    trials: Vec<TrialSummary>,
    errors: Vec<ErrorDistribution>,
}

impl Aggregator {
    /// Create an empty aggregator for `task`, using `z` for every interval.
    #[must_use]
    pub fn new(task: TaskKind, z: f64) -> Self {
        Self {
            task,
            z,
            sequence_len: None,
            positions: Vec::new(),
            k_total: 0,
            n_total: 0,
            trials: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Score one trial and fold it into the running totals.
    pub fn add_trial(&mut self, trial: Trial) -> &TrialSummary {
        let summary = match self.task {
            TaskKind::Serial => self.add_serial(trial),
            TaskKind::Free => self.add_free(trial),
        };
        debug!(
            source_id = %summary.source_id,
            k = summary.k_correct,
            n = summary.n_items,
            "scored trial"
        );
        self.trials.push(summary);
        &self.trials[self.trials.len() - 1]
    }

    fn add_serial(&mut self, mut trial: Trial) -> TrialSummary {
        let len = *self.sequence_len.get_or_insert(trial.presented.len());
        if self.positions.len() < len {
            self.positions.resize(len, PositionTally::default());
        }

        if trial.presented.len() != len || trial.recalled.len() != len {
            warn!(
                source_id = %trial.source_id,
                expected = len,
                presented = trial.presented.len(),
                recalled = trial.recalled.len(),
                "trial length differs from batch sequence length, padding/truncating"
            );
            trial.fit_to_length(len);
        }

        let classified = classify_serial(&trial.presented, &trial.recalled);
        let mut k = 0;
        for (tally, response) in self.positions.iter_mut().zip(&classified) {
            let correct = response.label == ResponseLabel::Correct;
            tally.record(correct);
            if correct {
                k += 1;
            }
        }
        let n = len as u64;
        self.k_total += k;
        self.n_total += n;

        self.errors.push(ErrorDistribution::from_counts(
            trial.source_id.clone(),
            LabelCounts::from_responses(&classified),
        ));
        TrialSummary::compute(trial.source_id, k, n, self.z)
    }

    fn add_free(&mut self, trial: Trial) -> TrialSummary {
        if self.positions.len() < trial.presented.len() {
            self.positions
                .resize(trial.presented.len(), PositionTally::default());
        }

        let correctness = score_free(&trial.presented, &trial.recalled);
        let mut k = 0;
        for (tally, correct) in self.positions.iter_mut().zip(&correctness) {
            tally.record(*correct);
            if *correct {
                k += 1;
            }
        }
        let n = correctness.len() as u64;
        self.k_total += k;
        self.n_total += n;

        TrialSummary::compute(trial.source_id, k, n, self.z)
    }

    /// Batch sequence length, fixed by the first serial trial.
    #[must_use]
    pub fn sequence_len(&self) -> Option<usize> {
        self.sequence_len
    }

    /// Running per-position tallies, position 1 first.
    #[must_use]
    pub fn position_tallies(&self) -> &[PositionTally] {
        &self.positions
    }

    /// Pooled `(correct, total)` over every item scored so far.
    #[must_use]
    pub fn totals(&self) -> (u64, u64) {
        (self.k_total, self.n_total)
    }

    /// Compute the pooled interval and hand back every result table.
    #[must_use]
    pub fn finish(self) -> ScoringReport {
        let curve = self
            .positions
            .iter()
            .enumerate()
            .map(|(i, tally)| PositionPoint::from_tally(i + 1, *tally))
            .collect();
        let global = GlobalSummary::compute(self.k_total, self.n_total, self.z);
        let errors = match self.task {
            TaskKind::Serial => Some(self.errors),
            TaskKind::Free => None,
        };

        ScoringReport {
            task: self.task,
            z: self.z,
            curve,
            global,
            trials: self.trials,
            errors,
        }
    }
}

/// Score a whole batch in source-id order.
///
/// Trials are sorted by `source_id` first, so the result does not depend on
/// the order they were discovered in.
pub fn score_batch(task: TaskKind, mut trials: Vec<Trial>, z: f64) -> Result<ScoringReport> {
    if trials.is_empty() {
        return Err(ScoringError::EmptyInput {
            location: "trial batch".to_string(),
        });
    }
    trials.sort_by(|a, b| a.source_id.cmp(&b.source_id));

    let mut aggregator = Aggregator::new(task, z);
    for trial in trials {
        aggregator.add_trial(trial);
    }
    Ok(aggregator.finish())
}
