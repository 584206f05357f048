//! Validation context and report types.
//!
//! A validation run takes a [`ValidationContext`] and produces a
//! [`ValidationReport`]. Violations are data, not exceptions: every
//! failing rule is accumulated into the report with counts and a bounded
//! set of example rows.

use serde::Serialize;
use std::fmt;

/// Default number of offending examples kept per violation.
pub const DEFAULT_MAX_EXAMPLES: usize = 5;

/// Options for a validation run.
///
/// Each run constructs its own context explicitly; there is no ambient
/// validator state.
#[derive(Debug, Clone)]
pub struct ValidationContext {
    /// Whether to run only the schema pass (skip rules and checks)
    pub schema_only: bool,

    /// Maximum number of rows to validate (head sample)
    pub sample_size: Option<usize>,

    /// Maximum offending examples recorded per violation
    pub max_examples: usize,
}

impl Default for ValidationContext {
    fn default() -> Self {
        Self {
            schema_only: false,
            sample_size: None,
            max_examples: DEFAULT_MAX_EXAMPLES,
        }
    }
}

impl ValidationContext {
    /// Creates a new validation context with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets schema-only validation mode.
    pub fn with_schema_only(mut self, schema_only: bool) -> Self {
        self.schema_only = schema_only;
        self
    }

    /// Sets the number of rows to sample.
    pub fn with_sample_size(mut self, size: usize) -> Self {
        self.sample_size = Some(size);
        self
    }

    /// Sets the example cap per violation.
    pub fn with_max_examples(mut self, max_examples: usize) -> Self {
        self.max_examples = max_examples;
        self
    }
}

/// A recorded failure of a schema or semantic rule.
///
/// Carries the rule tag, the affected column(s), the failing and total
/// row counts, and a bounded list of example offending rows. The example
/// list is capped by [`ValidationContext::max_examples`]; the counts are
/// always exact over the full dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Violation {
    /// Rule tag or check name (e.g., "pattern", "not_null", "total_formula")
    pub rule: String,

    /// Affected column(s)
    pub columns: Vec<String>,

    /// Number of failing rows (or 1 for dataset-level violations)
    pub failing: usize,

    /// Total rows evaluated (or 1 for dataset-level violations)
    pub total: usize,

    /// Bounded sample of offending rows/values
    pub examples: Vec<String>,
}

impl Violation {
    /// Creates a new violation.
    pub fn new(
        rule: impl Into<String>,
        columns: Vec<String>,
        failing: usize,
        total: usize,
        examples: Vec<String>,
    ) -> Self {
        Self {
            rule: rule.into(),
            columns,
            failing,
            total,
            examples,
        }
    }

    /// Creates a dataset-level violation (count 1 of 1).
    pub fn dataset(rule: impl Into<String>, examples: Vec<String>) -> Self {
        Self::new(rule, Vec::new(), 1, 1, examples)
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (cols={}) -> {}/{} unexpected",
            self.rule,
            self.columns.join(", "),
            self.failing,
            self.total
        )?;
        if !self.examples.is_empty() {
            write!(f, " | examples: [{}]", self.examples.join("; "))?;
        }
        Ok(())
    }
}

/// Statistics about validation execution.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationStats {
    /// Number of rows validated in the primary dataset
    pub rows_validated: usize,

    /// Number of declared columns checked
    pub columns_checked: usize,

    /// Number of rules and checks evaluated
    pub rules_evaluated: usize,

    /// Validation duration in milliseconds
    pub duration_ms: u64,
}

/// Report of a validation run.
///
/// Success iff no violations were recorded.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    /// Whether validation passed overall
    pub passed: bool,

    /// Every violated rule, in evaluation order
    pub violations: Vec<Violation>,

    /// Validation statistics
    pub stats: ValidationStats,
}

impl ValidationReport {
    /// Creates a new passing report with empty statistics.
    pub fn success() -> Self {
        Self {
            passed: true,
            violations: Vec::new(),
            stats: ValidationStats::default(),
        }
    }

    /// Records a violation and marks the report failed.
    pub fn add_violation(&mut self, violation: Violation) {
        self.violations.push(violation);
        self.passed = false;
    }

    /// Records every violation from an iterator.
    pub fn extend_violations(&mut self, violations: impl IntoIterator<Item = Violation>) {
        for violation in violations {
            self.add_violation(violation);
        }
    }
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::success()
    }
}
