//! Error types for suite definitions.
//!
//! These errors describe defects in a suite file itself (duplicate
//! columns, unknown rule targets, regexes that do not compile). They are
//! fatal configuration errors, reported before any data is read,
//! distinct from per-row violations, which are data accumulated into the
//! validation report.

use thiserror::Error;

/// Result type for suite-definition operations.
pub type Result<T> = std::result::Result<T, SuiteError>;

/// A defect in a suite definition.
#[derive(Debug, Error)]
pub enum SuiteError {
    /// The schema declares no columns
    #[error("suite schema has no columns defined")]
    EmptySchema,

    /// The same column is declared twice
    #[error("duplicate column '{0}' in suite schema")]
    DuplicateColumn(String),

    /// A rule or check references a column the schema does not declare
    #[error("{context} references unknown column '{column}'")]
    UnknownColumn { column: String, context: String },

    /// A pattern rule carries a regex that does not compile
    #[error("invalid regex for column '{column}': {error}")]
    InvalidRegex { column: String, error: String },

    /// A range rule with min greater than max
    #[error("invalid range for column '{column}': min {min} exceeds max {max}")]
    InvalidRange { column: String, min: f64, max: f64 },

    /// A sum_product aggregate with an empty candidate list
    #[error("consistency check '{check}' declares no price candidates")]
    NoPriceCandidates { check: String },
}

impl SuiteError {
    /// Creates a new unknown-column error.
    pub fn unknown_column(column: impl Into<String>, context: impl Into<String>) -> Self {
        Self::UnknownColumn {
            column: column.into(),
            context: context.into(),
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
