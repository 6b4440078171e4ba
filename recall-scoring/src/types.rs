//! Core type definitions for recall trials.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which recall task a batch of trials belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskKind {
    /// Responses must match the presented items position by position.
    Serial,
    /// Responses are scored by set membership, ignoring order.
    Free,
}

impl TaskKind {
    /// Convert to string representation.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Serial => "serial",
            Self::Free => "free",
        }
    }

    /// Default prefix for report files produced for this task.
    #[must_use]
    pub fn default_prefix(&self) -> &'static str {
        match self {
            Self::Serial => "serial_recall",
            Self::Free => "free_recall",
        }
    }
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A normalized response or stimulus token.
///
/// The empty item means "no response" in serial recall.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Item(String);

impl Item {
    /// Build an item from a raw cell, trimming surrounding whitespace.
    #[must_use]
    pub fn new(raw: &str) -> Self {
        Self(raw.trim().to_string())
    }

    /// The empty item.
    #[must_use]
    pub fn empty() -> Self {
        Self(String::new())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Item {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One experimental record: what was shown and what came back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trial {
    /// Identifier of the record, usually the file name.
    pub source_id: String,
    /// Items in presentation order.
    pub presented: Vec<Item>,
    /// Responses; order only matters for serial recall.
    pub recalled: Vec<Item>,
}

impl Trial {
    #[must_use]
    pub fn new(source_id: impl Into<String>, presented: Vec<Item>, recalled: Vec<Item>) -> Self {
        Self {
            source_id: source_id.into(),
            presented,
            recalled,
        }
    }

    /// Pad with empty items or truncate both sequences to `len`.
    pub fn fit_to_length(&mut self, len: usize) {
        self.presented.resize(len, Item::empty());
        self.recalled.resize(len, Item::empty());
    }
}
