use recall_scoring::{DEFAULT_EXTENSION, DEFAULT_SNIFF_CHARS, DEFAULT_Z};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration as stored in TOML files (with optional fields for merging)
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawRecallConfig {
    #[serde(default)]
    pub scoring: RawScoringConfig,

    #[serde(default)]
    pub input: RawInputConfig,

    #[serde(default)]
    pub output: RawOutputConfig,
}

/// Scoring config as stored in TOML
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawScoringConfig {
    /// Normal quantile for Wilson intervals
    pub z: Option<f64>,
}

/// Input config as stored in TOML
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawInputConfig {
    /// Extension of trial files
    pub extension: Option<String>,

    /// Characters examined when sniffing the separator
    pub sniff_bytes: Option<usize>,

    /// Separator used when sniffing is inconclusive
    pub fallback_delimiter: Option<char>,
}

/// Output config as stored in TOML
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawOutputConfig {
    /// Directory report files are written to
    pub directory: Option<PathBuf>,
}

/// Final configuration with defaults applied
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct RecallConfig {
    #[serde(default)]
    pub scoring: ScoringConfig,

    #[serde(default)]
    pub input: InputConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub z: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self { z: DEFAULT_Z }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputConfig {
    pub extension: String,
    pub sniff_bytes: usize,
    pub fallback_delimiter: char,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            extension: DEFAULT_EXTENSION.to_string(),
            sniff_bytes: DEFAULT_SNIFF_CHARS,
            fallback_delimiter: DEFAULT_FALLBACK_DELIMITER,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub directory: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from(DEFAULT_OUTPUT_DIR),
        }
    }
}

/// Default separator when sniffing fails
pub const DEFAULT_FALLBACK_DELIMITER: char = ';';

/// Default directory for report files
pub const DEFAULT_OUTPUT_DIR: &str = ".";
