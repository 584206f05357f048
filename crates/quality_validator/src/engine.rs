//! Main validation engine.
//!
//! This module provides the `DataValidator` that orchestrates the full
//! pipeline: schema validation, semantic rules, dataset-level checks,
//! and cross-dataset consistency. Every pass runs to completion and the
//! results are aggregated into one exhaustive report; violations never
//! short-circuit the run.

use crate::{ConsistencyChecker, Dataset, RuleValidator, SchemaValidator, ValidationError};
use quality_core::{Suite, SuiteError, ValidationContext, ValidationReport, ValidationStats, Violation};
use std::collections::HashMap;
use std::time::Instant;

/// Main validation engine for quality suites.
///
/// Orchestrates all validation passes and produces a comprehensive
/// validation report.
///
/// # Example
///
/// ```rust
/// use quality_core::{SuiteBuilder, ValidationContext};
/// use quality_validator::{DataValidator, Dataset};
/// use std::collections::HashMap;
///
/// let suite = SuiteBuilder::new("orders", "data-quality")
///     .path("data/orders.csv")
///     .build();
/// let dataset = Dataset::new(Vec::new());
/// let mut validator = DataValidator::new();
///
/// let report = validator
///     .validate_with_data(&suite, &dataset, &HashMap::new(), &ValidationContext::new())
///     .unwrap();
///
/// if report.passed {
///     println!("Validation passed!");
/// } else {
///     for violation in &report.violations {
///         println!("Violation: {violation}");
///     }
/// }
/// ```
pub struct DataValidator {
    schema_validator: SchemaValidator,
    rule_validator: RuleValidator,
    consistency_checker: ConsistencyChecker,
}

impl DataValidator {
    /// Creates a new data validator.
    pub fn new() -> Self {
        Self {
            schema_validator: SchemaValidator::new(),
            rule_validator: RuleValidator::new(),
            consistency_checker: ConsistencyChecker::new(),
        }
    }

    /// Validates a dataset against a suite.
    ///
    /// This is the main validation entry point. It runs every pass and
    /// returns one report; only fatal conditions (unreadable data,
    /// unsatisfiable configuration) return `Err`.
    ///
    /// # Arguments
    ///
    /// * `suite` - The quality suite to validate against
    /// * `dataset` - The primary dataset
    /// * `related` - Secondary datasets for consistency checks, keyed by
    ///   each check's `items_path`
    /// * `context` - Validation context with options
    pub fn validate_with_data(
        &mut self,
        suite: &Suite,
        dataset: &Dataset,
        related: &HashMap<String, Dataset>,
        context: &ValidationContext,
    ) -> Result<ValidationReport, ValidationError> {
        let start = Instant::now();
        let mut violations = Vec::new();
        let mut rules_evaluated = 0;

        // Sample dataset if requested
        let dataset_to_validate = if let Some(sample_size) = context.sample_size {
            dataset.sample(sample_size)
        } else {
            dataset.clone()
        };

        // 1. Schema validation (always runs)
        violations.extend(
            self.schema_validator
                .validate(&suite.dataset, &dataset_to_validate, context),
        );

        if !context.schema_only {
            // 2. Semantic rules
            rules_evaluated += RuleValidator::rule_count(&suite.dataset);
            violations.extend(self.rule_validator.validate(
                &suite.dataset,
                &dataset_to_validate,
                context,
            )?);

            // 3. Dataset-level checks
            if let Some(checks) = &suite.checks {
                if let Some(min_rows) = checks.min_rows {
                    rules_evaluated += 1;
                    if dataset_to_validate.len() < min_rows {
                        violations.push(Violation::dataset(
                            "min_rows",
                            vec![format!(
                                "dataset has {} rows, expected at least {min_rows}",
                                dataset_to_validate.len()
                            )],
                        ));
                    }
                }

                if let Some(formulas) = &checks.formulas {
                    rules_evaluated += formulas.len();
                    violations.extend(self.consistency_checker.validate_formulas(
                        formulas,
                        &dataset_to_validate,
                        context,
                    )?);
                }

                if let Some(consistency) = &checks.consistency {
                    rules_evaluated += consistency.len();
                    violations.extend(self.consistency_checker.validate(
                        consistency,
                        &dataset_to_validate,
                        related,
                        context,
                    )?);
                }
            }
        }

        Ok(self.build_report(violations, suite, &dataset_to_validate, rules_evaluated, start))
    }

    /// Validates only the suite definition itself (no data).
    ///
    /// Useful for checking that a suite is well-formed before attempting
    /// to validate data against it.
    pub fn validate_definition(&self, suite: &Suite) -> Vec<SuiteError> {
        self.schema_validator.validate_definition(suite)
    }

    /// Builds a validation report from collected violations.
    fn build_report(
        &self,
        violations: Vec<Violation>,
        suite: &Suite,
        dataset: &Dataset,
        rules_evaluated: usize,
        start: Instant,
    ) -> ValidationReport {
        let mut report = ValidationReport::success();
        report.extend_violations(violations);
        report.stats = ValidationStats {
            rows_validated: dataset.len(),
            columns_checked: suite.dataset.columns.len(),
            rules_evaluated,
            duration_ms: start.elapsed().as_millis() as u64,
        };
        report
    }
}

impl Default for DataValidator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DataValue;
    use pretty_assertions::assert_eq;
    use quality_core::{ChecksBuilder, ColumnBuilder, ColumnType, Rule, SuiteBuilder};

    fn users_suite() -> Suite {
        SuiteBuilder::new("users", "data-quality")
            .path("data/users.csv")
            .column(
                ColumnBuilder::new("user_id", ColumnType::Text)
                    .rule(Rule::Pattern {
                        regex: r"^U\d{6}$".to_string(),
                    })
                    .build(),
            )
            .column(
                ColumnBuilder::new("age", ColumnType::Integer)
                    .rule(Rule::Range {
                        min: 15.0,
                        max: 100.0,
                    })
                    .build(),
            )
            .build()
    }

    fn users_dataset(rows: &[(&str, i64)]) -> Dataset {
        let mut dataset = Dataset::new(vec!["user_id".to_string(), "age".to_string()]);
        for (user_id, age) in rows {
            dataset.push_row(vec![
                DataValue::Text(user_id.to_string()),
                DataValue::Int(*age),
            ]);
        }
        dataset
    }

    #[test]
    fn test_empty_dataset_passes_empty_suite() {
        let suite = SuiteBuilder::new("empty", "owner").path("x.csv").build();
        let dataset = Dataset::new(Vec::new());
        let mut validator = DataValidator::new();

        let report = validator
            .validate_with_data(&suite, &dataset, &HashMap::new(), &ValidationContext::new())
            .unwrap();
        assert!(report.passed);
    }

    #[test]
    fn test_valid_data_passes() {
        let suite = users_suite();
        let dataset = users_dataset(&[("U000001", 25), ("U000002", 99)]);
        let mut validator = DataValidator::new();

        let report = validator
            .validate_with_data(&suite, &dataset, &HashMap::new(), &ValidationContext::new())
            .unwrap();

        assert!(report.passed, "expected pass, got: {:?}", report.violations);
        assert_eq!(report.stats.rows_validated, 2);
        assert_eq!(report.stats.columns_checked, 2);
        assert_eq!(report.stats.rules_evaluated, 2);
    }

    #[test]
    fn test_all_passes_run_without_early_abort() {
        // Schema (null), pattern, and range violations must all be
        // reported in a single run.
        let suite = users_suite();
        let mut dataset = Dataset::new(vec!["user_id".to_string(), "age".to_string()]);
        dataset.push_row(vec![DataValue::Null, DataValue::Int(200)]);
        dataset.push_row(vec![DataValue::Text("bogus".to_string()), DataValue::Int(25)]);

        let mut validator = DataValidator::new();
        let report = validator
            .validate_with_data(&suite, &dataset, &HashMap::new(), &ValidationContext::new())
            .unwrap();

        assert!(!report.passed);
        let rules: Vec<&str> = report.violations.iter().map(|v| v.rule.as_str()).collect();
        assert!(rules.contains(&"not_null"));
        assert!(rules.contains(&"pattern"));
        assert!(rules.contains(&"range"));
    }

    #[test]
    fn test_schema_only_mode_skips_rules() {
        let suite = users_suite();
        let dataset = users_dataset(&[("bogus", 200)]);

        let context = ValidationContext::new().with_schema_only(true);
        let mut validator = DataValidator::new();
        let report = validator
            .validate_with_data(&suite, &dataset, &HashMap::new(), &context)
            .unwrap();

        // Schema is clean; rule violations are not evaluated.
        assert!(report.passed);
        assert_eq!(report.stats.rules_evaluated, 0);
    }

    #[test]
    fn test_min_rows_check() {
        let suite = SuiteBuilder::new("users", "data-quality")
            .path("data/users.csv")
            .column(ColumnBuilder::new("user_id", ColumnType::Text).build())
            .checks(ChecksBuilder::new().min_rows(1).build())
            .build();
        let dataset = Dataset::new(vec!["user_id".to_string()]);

        let mut validator = DataValidator::new();
        let report = validator
            .validate_with_data(&suite, &dataset, &HashMap::new(), &ValidationContext::new())
            .unwrap();

        assert!(!report.passed);
        assert_eq!(report.violations[0].rule, "min_rows");
    }

    #[test]
    fn test_sample_size_limits_rows() {
        let suite = users_suite();
        let rows: Vec<(String, i64)> = (0..100)
            .map(|i| (format!("U{i:06}"), 20 + (i % 50)))
            .collect();
        let refs: Vec<(&str, i64)> = rows.iter().map(|(id, age)| (id.as_str(), *age)).collect();
        let dataset = users_dataset(&refs);

        let context = ValidationContext::new().with_sample_size(10);
        let mut validator = DataValidator::new();
        let report = validator
            .validate_with_data(&suite, &dataset, &HashMap::new(), &context)
            .unwrap();

        assert!(report.passed);
        assert_eq!(report.stats.rows_validated, 10); // Only 10 sampled
    }

    #[test]
    fn test_validate_definition() {
        let validator = DataValidator::new();
        assert!(validator.validate_definition(&users_suite()).is_empty());
    }

    #[test]
    fn test_idempotent_reports() {
        let suite = users_suite();
        let dataset = users_dataset(&[("bogus", 200), ("U000001", 25)]);

        let mut validator = DataValidator::new();
        let context = ValidationContext::new();
        let first = validator
            .validate_with_data(&suite, &dataset, &HashMap::new(), &context)
            .unwrap();
        let second = validator
            .validate_with_data(&suite, &dataset, &HashMap::new(), &context)
            .unwrap();

        assert_eq!(first.passed, second.passed);
        assert_eq!(first.violations, second.violations);
    }
}
