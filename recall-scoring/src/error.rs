//! Error types for recall scoring.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for loading and scoring operations.
pub type Result<T> = std::result::Result<T, ScoringError>;

/// Errors that abort a scoring run.
///
/// Irregularities inside a trial (blank cells, an undetectable delimiter,
/// positions nobody reached) are not errors; they degrade to fallback values.
#[derive(Debug, Error)]
pub enum ScoringError {
    /// A trial table lacks one of the required columns.
    #[error("{source_id} must contain the columns 'sample' and 'guess' (missing '{missing}')")]
    Schema {
        source_id: String,
        missing: &'static str,
    },

    /// No trial files were found.
    #[error("no trial files found in {location}")]
    EmptyInput { location: String },

    /// Reading a trial file or listing a folder failed.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The table body could not be parsed.
    #[error("malformed table in {source_id}: {source}")]
    Table {
        source_id: String,
        #[source]
        source: csv::Error,
    },
}

impl ScoringError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
