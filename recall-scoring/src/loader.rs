//! Trial table loading.
//!
//! A trial file is a small table with a header row. Only two columns matter,
//! `sample` (the presented items) and `guess` (the responses); they are found
//! by name, so column order and extra columns are irrelevant.

use std::collections::HashSet;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use tracing::debug;

use crate::error::{Result, ScoringError};
use crate::sniff::{DEFAULT_SNIFF_CHARS, sniff_delimiter};
use crate::types::{Item, TaskKind, Trial};

/// Column holding the presented items.
pub const SAMPLE_COLUMN: &str = "sample";
/// Column holding the responses.
pub const GUESS_COLUMN: &str = "guess";

/// Separator used when detection is inconclusive.
pub const DEFAULT_FALLBACK_DELIMITER: u8 = b';';

/// Cell spellings that count as "no value".
const MISSING_TOKENS: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Options controlling how trial tables are read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoaderOptions {
    /// Number of leading characters examined by the separator sniffer.
    pub sniff_chars: usize,
    /// Separator used when sniffing is inconclusive.
    pub fallback_delimiter: u8,
}

impl Default for LoaderOptions {
    fn default() -> Self {
        Self {
            sniff_chars: DEFAULT_SNIFF_CHARS,
            fallback_delimiter: DEFAULT_FALLBACK_DELIMITER,
        }
    }
}

/// Reads trial tables into [`Trial`] values for one task.
#[derive(Debug, Clone)]
pub struct TrialLoader {
    task: TaskKind,
    options: LoaderOptions,
}

impl TrialLoader {
    /// Create a loader with default options.
    #[must_use]
    pub fn new(task: TaskKind) -> Self {
        Self::with_options(task, LoaderOptions::default())
    }

    #[must_use]
    pub fn with_options(task: TaskKind, options: LoaderOptions) -> Self {
        Self { task, options }
    }

    /// Load a trial file; the source id is the file name.
    pub fn load_path(&self, path: &Path) -> Result<Trial> {
        let text = std::fs::read_to_string(path).map_err(|e| ScoringError::io(path, e))?;
        let source_id = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        self.load_str(&source_id, &text)
    }

    /// Load a trial from in-memory text.
    pub fn load_str(&self, source_id: &str, text: &str) -> Result<Trial> {
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        let delimiter = self.delimiter_for(source_id, text);

        let mut reader = ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(true)
            .flexible(true)
            .from_reader(text.as_bytes());

        let headers = reader
            .headers()
            .map_err(|source| table_error(source_id, source))?
            .clone();
        let sample_idx = find_column(&headers, SAMPLE_COLUMN).ok_or_else(|| {
            ScoringError::Schema {
                source_id: source_id.to_string(),
                missing: SAMPLE_COLUMN,
            }
        })?;
        let guess_idx =
            find_column(&headers, GUESS_COLUMN).ok_or_else(|| ScoringError::Schema {
                source_id: source_id.to_string(),
                missing: GUESS_COLUMN,
            })?;

        let mut presented = Vec::new();
        let mut recalled = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|source| table_error(source_id, source))?;
            let sample = cell(&record, sample_idx);
            let guess = cell(&record, guess_idx);
            match self.task {
                TaskKind::Serial => {
                    presented.push(sample.unwrap_or_default());
                    recalled.push(guess.unwrap_or_default());
                }
                TaskKind::Free => {
                    presented.extend(sample);
                    recalled.extend(guess);
                }
            }
        }

        debug!(
            source_id,
            task = %self.task,
            presented = presented.len(),
            recalled = recalled.len(),
            "loaded trial"
        );
        Ok(Trial::new(source_id, presented, recalled))
    }

    fn delimiter_for(&self, source_id: &str, text: &str) -> u8 {
        match sniff_delimiter(text, self.options.sniff_chars) {
            Some(delimiter) => {
                debug!(source_id, delimiter = %char::from(delimiter).escape_default(), "detected delimiter");
                delimiter
            }
            None => {
                debug!(
                    source_id,
                    fallback = %char::from(self.options.fallback_delimiter).escape_default(),
                    "delimiter detection inconclusive, using fallback"
                );
                self.options.fallback_delimiter
            }
        }
    }
}

/// Index of the column whose normalized name is `name`.
///
/// A header repeated verbatim only counts at its first occurrence. Among
/// distinct spellings that normalize to `name` (`Sample`, ` sample`), the
/// last one wins.
fn find_column(headers: &StringRecord, name: &str) -> Option<usize> {
    let mut seen = HashSet::new();
    headers
        .iter()
        .enumerate()
        .filter(|(_, header)| seen.insert(*header))
        .filter(|(_, header)| header.trim().to_ascii_lowercase() == name)
        .map(|(idx, _)| idx)
        .last()
}

/// The normalized item in column `idx`, or `None` if the cell is missing.
fn cell(record: &StringRecord, idx: usize) -> Option<Item> {
    let raw = record.get(idx)?.trim();
    if raw.is_empty() || MISSING_TOKENS.contains(&raw) {
        None
    } else {
        Some(Item::new(raw))
    }
}

fn table_error(source_id: &str, source: csv::Error) -> ScoringError {
    ScoringError::Table {
        source_id: source_id.to_string(),
        source,
    }
}
