//! Scoring and accuracy statistics for recall experiments.
//!
//! This crate scores serial-recall and free-recall trials against the
//! presented item sequences and aggregates accuracy across a batch.
//!
//! # Pipeline
//!
//! - **Loading** ([`TrialLoader`]) reads one trial table into a [`Trial`],
//!   sniffing the field separator and normalizing missing cells
//! - **Classification** ([`classify_serial`], [`score_free`]) decides per
//!   position or per item whether the response was correct
//! - **Aggregation** ([`Aggregator`]) tallies positions, trials and pooled
//!   totals, then [`Aggregator::finish`] yields a [`ScoringReport`]
//! - **Intervals** ([`wilson_interval`]) are closed-form Wilson score bounds
//!
//! Statistics over zero observations are `None` all the way through.

mod aggregate;
mod batch;
mod classify;
mod error;
mod interval;
mod loader;
mod report;
mod sniff;
mod types;

// Aggregation
pub use aggregate::{Aggregator, score_batch};

// Batch discovery
pub use batch::{DEFAULT_EXTENSION, TrialBatch};

// Classification
pub use classify::{
    ClassifiedResponse, LabelCounts, ResponseLabel, classify_response, classify_serial, score_free,
};

// Errors
pub use error::{Result, ScoringError};

// Intervals
pub use interval::{DEFAULT_Z, Interval, proportion, wilson_interval};

// Loading
pub use loader::{
    DEFAULT_FALLBACK_DELIMITER, GUESS_COLUMN, LoaderOptions, SAMPLE_COLUMN, TrialLoader,
};
pub use sniff::{CANDIDATE_DELIMITERS, DEFAULT_SNIFF_CHARS, sniff_delimiter};

// Report types
pub use report::{
    ErrorDistribution, GlobalSummary, LabelProportions, PositionPoint, PositionTally,
    ScoringReport, TrialSummary,
};

// Core types
pub use types::{Item, TaskKind, Trial};
