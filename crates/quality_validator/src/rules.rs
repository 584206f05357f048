//! Semantic rule validation logic.
//!
//! This module evaluates per-column rules against every row:
//! - Pattern: value (coerced to text) must fully match a regex
//! - InSet: value must be one of an enumerated set
//! - Range: numeric value must lie within an inclusive [min, max] bound
//! - DateFormat: text value must parse with a chrono format string
//! - EqualsColumn: pairwise equality with another column
//!
//! Every rule runs to completion over the whole dataset (no early abort),
//! and each failing rule yields one violation with exact counts and a
//! bounded example list. Null values are skipped by all rules except
//! `InSet` without `allow_null`; nullability is the schema validator's
//! responsibility.

use crate::{DataValue, Dataset, ValidationError};
use quality_core::{DatasetSpec, Rule, ValidationContext, Violation};
use regex::Regex;
use std::collections::HashMap;
use tracing::debug;

/// Evaluates semantic rules over a dataset.
pub struct RuleValidator {
    /// Cache of compiled regex patterns, keyed by the raw pattern
    regex_cache: HashMap<String, Regex>,
}

impl RuleValidator {
    /// Creates a new rule validator.
    pub fn new() -> Self {
        Self {
            regex_cache: HashMap::new(),
        }
    }

    /// Evaluates every declared rule against every row.
    ///
    /// Returns one violation per failing rule. Rules on columns the
    /// dataset does not provide are skipped; the schema validator has
    /// already reported the missing column.
    pub fn validate(
        &mut self,
        spec: &DatasetSpec,
        dataset: &Dataset,
        context: &ValidationContext,
    ) -> Result<Vec<Violation>, ValidationError> {
        let mut violations = Vec::new();

        for column in &spec.columns {
            let rules = match &column.rules {
                Some(rules) => rules,
                None => continue,
            };

            if !dataset.has_column(&column.name) {
                debug!(column = %column.name, "skipping rules for column absent from dataset");
                continue;
            }

            for rule in rules {
                if let Some(violation) =
                    self.evaluate_rule(&column.name, rule, dataset, context)?
                {
                    violations.push(violation);
                }
            }
        }

        Ok(violations)
    }

    /// Counts the rules that `validate` will evaluate for this spec.
    pub fn rule_count(spec: &DatasetSpec) -> usize {
        spec.columns
            .iter()
            .filter_map(|c| c.rules.as_ref().map(Vec::len))
            .sum()
    }

    /// Evaluates a single rule over the whole dataset.
    fn evaluate_rule(
        &mut self,
        column: &str,
        rule: &Rule,
        dataset: &Dataset,
        context: &ValidationContext,
    ) -> Result<Option<Violation>, ValidationError> {
        let total = dataset.len();
        let mut failing = 0;
        let mut examples = Vec::new();

        match rule {
            Rule::Pattern { regex } => {
                let regex = self.full_match_regex(column, regex)?;
                for (row, value) in dataset.column_values(column).unwrap().enumerate() {
                    if value.is_null() {
                        continue;
                    }
                    if !regex.is_match(&value.render()) {
                        failing += 1;
                        push_example(&mut examples, context, row, value);
                    }
                }
            }

            Rule::InSet { values, allow_null } => {
                for (row, value) in dataset.column_values(column).unwrap().enumerate() {
                    let ok = if value.is_null() {
                        *allow_null
                    } else {
                        values.iter().any(|v| v == &value.render())
                    };
                    if !ok {
                        failing += 1;
                        push_example(&mut examples, context, row, value);
                    }
                }
            }

            Rule::Range { min, max } => {
                for (row, value) in dataset.column_values(column).unwrap().enumerate() {
                    if value.is_null() {
                        continue;
                    }
                    let in_range = value
                        .as_float()
                        .is_some_and(|n| n >= *min && n <= *max);
                    if !in_range {
                        failing += 1;
                        push_example(&mut examples, context, row, value);
                    }
                }
            }

            Rule::DateFormat { format } => {
                for (row, value) in dataset.column_values(column).unwrap().enumerate() {
                    if value.is_null() {
                        continue;
                    }
                    if !parses_with_format(&value.render(), format) {
                        failing += 1;
                        push_example(&mut examples, context, row, value);
                    }
                }
            }

            Rule::EqualsColumn { other, tolerance } => {
                if !dataset.has_column(other) {
                    return Err(ValidationError::missing_column(
                        other.as_str(),
                        "primary dataset",
                    ));
                }
                for row in 0..total {
                    let left = dataset.value(row, column).unwrap();
                    let right = dataset.value(row, other).unwrap();
                    if !values_equal(left, right, *tolerance) {
                        failing += 1;
                        if examples.len() < context.max_examples {
                            examples.push(format!(
                                "row {row}: {column}={} != {other}={}",
                                left.render(),
                                right.render()
                            ));
                        }
                    }
                }
            }
        }

        if failing == 0 {
            return Ok(None);
        }

        let mut columns = vec![column.to_string()];
        if let Rule::EqualsColumn { other, .. } = rule {
            columns.push(other.clone());
        }

        Ok(Some(Violation::new(
            rule.kind(),
            columns,
            failing,
            total,
            examples,
        )))
    }

    /// Gets a full-match regex from cache or compiles and caches it.
    ///
    /// The raw pattern is wrapped in `^(?: … )$` so that partial matches
    /// do not pass.
    fn full_match_regex(&mut self, column: &str, pattern: &str) -> Result<&Regex, ValidationError> {
        if !self.regex_cache.contains_key(pattern) {
            let regex = Regex::new(&format!("^(?:{pattern})$"))
                .map_err(|e| ValidationError::invalid_regex(column, e.to_string()))?;
            self.regex_cache.insert(pattern.to_string(), regex);
        }
        Ok(self.regex_cache.get(pattern).unwrap())
    }
}

impl Default for RuleValidator {
    fn default() -> Self {
        Self::new()
    }
}

/// Records a bounded "row N: value" example.
fn push_example(
    examples: &mut Vec<String>,
    context: &ValidationContext,
    row: usize,
    value: &DataValue,
) {
    if examples.len() < context.max_examples {
        examples.push(format!("row {row}: \"{}\"", value.render()));
    }
}

/// Returns true if the text parses with the chrono format string.
///
/// Tries a full datetime first, then a date-only parse, so one rule kind
/// covers both `%Y-%m-%d %H:%M:%S` and `%Y-%m-%d` columns.
fn parses_with_format(text: &str, format: &str) -> bool {
    chrono::NaiveDateTime::parse_from_str(text, format).is_ok()
        || chrono::NaiveDate::parse_from_str(text, format).is_ok()
}

/// Exact or tolerance-based equality between two values.
///
/// Two nulls are equal; one null is not. Numeric pairs compare as floats
/// with the given absolute tolerance (exact when `None`); everything else
/// compares by rendered text.
pub fn values_equal(left: &DataValue, right: &DataValue, tolerance: Option<f64>) -> bool {
    if left.is_null() && right.is_null() {
        return true;
    }
    if left.is_null() || right.is_null() {
        return false;
    }

    match (left.as_float(), right.as_float()) {
        (Some(l), Some(r)) => match tolerance {
            Some(tolerance) => (l - r).abs() <= tolerance,
            None => l == r,
        },
        _ => left.render() == right.render(),
    }
}
