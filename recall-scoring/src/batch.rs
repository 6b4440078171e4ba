//! Ordered set of trial files for one run.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Result, ScoringError};
use crate::loader::TrialLoader;
use crate::types::Trial;

/// Default extension of trial files.
pub const DEFAULT_EXTENSION: &str = "csv";

/// Trial files resolved once at the start of a run, sorted by file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrialBatch {
    paths: Vec<PathBuf>,
}

impl TrialBatch {
    /// List the files in `folder` with the given extension.
    ///
    /// Only direct children are considered, and hidden files (names starting
    /// with `.`, such as `._t1.csv` sidecars) are skipped. The extension match
    /// ignores ASCII case. An empty result is [`ScoringError::EmptyInput`].
    pub fn discover(folder: &Path, extension: &str) -> Result<Self> {
        let entries = std::fs::read_dir(folder).map_err(|e| ScoringError::io(folder, e))?;

        let mut paths = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| ScoringError::io(folder, e))?;
            let path = entry.path();
            if entry.file_name().to_string_lossy().starts_with('.') {
                continue;
            }
            let matches_extension = path
                .extension()
                .is_some_and(|ext| ext.to_string_lossy().eq_ignore_ascii_case(extension));
            if matches_extension && path.is_file() {
                paths.push(path);
            }
        }

        if paths.is_empty() {
            return Err(ScoringError::EmptyInput {
                location: folder.display().to_string(),
            });
        }

        let batch = Self::from_paths(paths);
        debug!(folder = %folder.display(), files = batch.len(), "discovered trial files");
        Ok(batch)
    }

    /// Build a batch from explicit paths, sorting them by file name.
    #[must_use]
    pub fn from_paths(mut paths: Vec<PathBuf>) -> Self {
        paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
        Self { paths }
    }

    #[must_use]
    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Load every trial in order, stopping at the first failure.
    pub fn load(&self, loader: &TrialLoader) -> Result<Vec<Trial>> {
        self.paths.iter().map(|path| loader.load_path(path)).collect()
    }
}
