//! Fatal error types for validation runs.
//!
//! These abort a run immediately: a dataset that cannot be read, or a
//! configuration that cannot be satisfied (a required column absent with
//! no fallback). Per-row failures are never errors; they are
//! [`quality_core::Violation`]s accumulated into the report.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a validation run.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// The dataset file is missing, unreadable, or not rectangular CSV
    #[error("failed to load dataset {path}: {source}")]
    Load {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// A rule or check requires a column the dataset does not provide
    #[error("required column '{column}' not found in dataset '{dataset}'")]
    MissingColumn { column: String, dataset: String },

    /// None of the unit-price candidates exist in the secondary dataset
    #[error("no unit price column found in '{dataset}' (tried: {})", .candidates.join(", "))]
    NoPriceColumn {
        dataset: String,
        candidates: Vec<String>,
    },

    /// A consistency check's secondary dataset was not supplied
    #[error("no dataset loaded for consistency check '{check}' (expected '{path}')")]
    MissingRelated { check: String, path: String },

    /// A pattern rule carries a regex that does not compile
    #[error("invalid regex for column '{column}': {error}")]
    InvalidRegex { column: String, error: String },
}

impl ValidationError {
    /// Creates a new load error.
    pub fn load(path: impl Into<PathBuf>, source: csv::Error) -> Self {
        Self::Load {
            path: path.into(),
            source,
        }
    }

    /// Creates a new missing-column error.
    pub fn missing_column(column: impl Into<String>, dataset: impl Into<String>) -> Self {
        Self::MissingColumn {
            column: column.into(),
            dataset: dataset.into(),
        }
    }

    /// Creates a new invalid-regex error.
    pub fn invalid_regex(column: impl Into<String>, error: impl Into<String>) -> Self {
        Self::InvalidRegex {
            column: column.into(),
            error: error.into(),
        }
    }
}
