//! Schema validation logic.
//!
//! This module handles structural validation of datasets against a suite's
//! column declarations: presence, exact column count, header order,
//! per-value types, and nullability. It also validates suite definitions
//! themselves (duplicate columns, rules referencing unknown columns,
//! regexes that do not compile); those are fatal configuration defects,
//! caught before any data is read.
//!
//! Structural violations are collected in one pass and returned as data;
//! nothing is raised mid-pass.

use crate::{DataValue, Dataset};
use quality_core::{
    Aggregate, ColumnSpec, ColumnType, DatasetSpec, Rule, Suite, SuiteError, ValidationContext,
    Violation,
};
use regex::Regex;
use std::collections::HashSet;

/// Validates the structure of a dataset against a suite schema.
pub struct SchemaValidator;

impl SchemaValidator {
    /// Creates a new schema validator.
    pub fn new() -> Self {
        Self
    }

    /// Validates a dataset against the declared column schema.
    ///
    /// Returns every structural violation found. An empty list indicates
    /// success.
    pub fn validate(
        &self,
        spec: &DatasetSpec,
        dataset: &Dataset,
        context: &ValidationContext,
    ) -> Vec<Violation> {
        let mut violations = Vec::new();

        self.validate_header(spec, dataset, context, &mut violations);

        for column in &spec.columns {
            if dataset.has_column(&column.name) {
                self.validate_column(column, dataset, context, &mut violations);
            }
        }

        violations
    }

    /// Checks column presence, exact count, and header order.
    fn validate_header(
        &self,
        spec: &DatasetSpec,
        dataset: &Dataset,
        context: &ValidationContext,
        violations: &mut Vec<Violation>,
    ) {
        let declared: Vec<&str> = spec.columns.iter().map(|c| c.name.as_str()).collect();
        let actual: Vec<&str> = dataset.columns().iter().map(|c| c.as_str()).collect();
        let declared_set: HashSet<&str> = declared.iter().copied().collect();
        let actual_set: HashSet<&str> = actual.iter().copied().collect();

        if declared.len() != actual.len() {
            violations.push(Violation::dataset(
                "column_count",
                vec![format!(
                    "expected {} columns, found {}",
                    declared.len(),
                    actual.len()
                )],
            ));
        }

        for column in &spec.columns {
            if !actual_set.contains(column.name.as_str()) {
                violations.push(Violation::new(
                    "missing_column",
                    vec![column.name.clone()],
                    1,
                    1,
                    Vec::new(),
                ));
            }
        }

        for name in &actual {
            if !declared_set.contains(name) {
                violations.push(Violation::new(
                    "unexpected_column",
                    vec![name.to_string()],
                    1,
                    1,
                    Vec::new(),
                ));
            }
        }

        // Order is only meaningful once the column sets agree.
        if declared_set == actual_set && declared != actual {
            let examples = declared
                .iter()
                .zip(&actual)
                .enumerate()
                .filter(|(_, (d, a))| d != a)
                .map(|(i, (d, a))| format!("position {i}: expected '{d}', found '{a}'"))
                .take(context.max_examples)
                .collect();
            violations.push(Violation::dataset("column_order", examples));
        }
    }

    /// Checks one declared column's values for type and nullability.
    fn validate_column(
        &self,
        column: &ColumnSpec,
        dataset: &Dataset,
        context: &ValidationContext,
        violations: &mut Vec<Violation>,
    ) {
        let values = dataset
            .column_values(&column.name)
            .expect("column presence checked by caller");

        let total = dataset.len();
        let mut null_failing = 0;
        let mut null_examples = Vec::new();
        let mut type_failing = 0;
        let mut type_examples = Vec::new();

        for (row, value) in values.enumerate() {
            if value.is_null() {
                if !column.nullable {
                    null_failing += 1;
                    if null_examples.len() < context.max_examples {
                        null_examples.push(format!("row {row}"));
                    }
                }
                continue;
            }

            if !conforms(value, column.column_type) {
                type_failing += 1;
                if type_examples.len() < context.max_examples {
                    type_examples.push(format!(
                        "row {row}: \"{}\" ({})",
                        value.render(),
                        value.type_name()
                    ));
                }
            }
        }

        if null_failing > 0 {
            violations.push(Violation::new(
                "not_null",
                vec![column.name.clone()],
                null_failing,
                total,
                null_examples,
            ));
        }

        if type_failing > 0 {
            violations.push(Violation::new(
                "type",
                vec![column.name.clone()],
                type_failing,
                total,
                type_examples,
            ));
        }
    }

    /// Validates the suite definition itself.
    ///
    /// Returns every defect found: empty schema, duplicate columns, rules
    /// or checks referencing undeclared columns, regexes that do not
    /// compile, inverted ranges.
    pub fn validate_definition(&self, suite: &Suite) -> Vec<SuiteError> {
        let mut errors = Vec::new();
        let spec = &suite.dataset;

        if spec.columns.is_empty() {
            errors.push(SuiteError::EmptySchema);
        }

        let mut seen = HashSet::new();
        for column in &spec.columns {
            if !seen.insert(&column.name) {
                errors.push(SuiteError::DuplicateColumn(column.name.clone()));
            }
        }

        for column in &spec.columns {
            for rule in column.rules.as_deref().unwrap_or_default() {
                match rule {
                    Rule::Pattern { regex } => {
                        if let Err(e) = Regex::new(regex) {
                            errors.push(SuiteError::invalid_regex(&column.name, e.to_string()));
                        }
                    }
                    Rule::Range { min, max } => {
                        if min > max {
                            errors.push(SuiteError::InvalidRange {
                                column: column.name.clone(),
                                min: *min,
                                max: *max,
                            });
                        }
                    }
                    Rule::EqualsColumn { other, .. } => {
                        if spec.column(other).is_none() {
                            errors.push(SuiteError::unknown_column(
                                other.as_str(),
                                format!("equals_column rule on '{}'", column.name),
                            ));
                        }
                    }
                    Rule::InSet { .. } | Rule::DateFormat { .. } => {}
                }
            }
        }

        if let Some(checks) = &suite.checks {
            for formula in checks.formulas.as_deref().unwrap_or_default() {
                let context = format!("formula check '{}'", formula.name);
                for name in std::iter::once(&formula.stated)
                    .chain(&formula.plus)
                    .chain(&formula.minus)
                {
                    if spec.column(name).is_none() {
                        errors.push(SuiteError::unknown_column(name.as_str(), context.clone()));
                    }
                }
            }

            for check in checks.consistency.as_deref().unwrap_or_default() {
                let context = format!("consistency check '{}'", check.name);
                for name in [&check.join_key, &check.stated] {
                    if spec.column(name).is_none() {
                        errors.push(SuiteError::unknown_column(name.as_str(), context.clone()));
                    }
                }
                if let Aggregate::SumProduct { price_candidates, .. } = &check.aggregate {
                    if price_candidates.is_empty() {
                        errors.push(SuiteError::NoPriceCandidates {
                            check: check.name.clone(),
                        });
                    }
                }
            }
        }

        errors
    }
}

impl Default for SchemaValidator {
    fn default() -> Self {
        Self::new()
    }
}

/// Returns true if a non-null value conforms to the declared type.
///
/// Integers are accepted where decimal is declared.
fn conforms(value: &DataValue, column_type: ColumnType) -> bool {
    match column_type {
        ColumnType::Text => matches!(value, DataValue::Text(_)),
        ColumnType::Integer => matches!(value, DataValue::Int(_)),
        ColumnType::Decimal => matches!(value, DataValue::Float(_) | DataValue::Int(_)),
    }
}
