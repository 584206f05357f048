//! Cross-dataset consistency checking.
//!
//! A consistency check joins a secondary dataset on a key, aggregates it
//! per key (sum, or sum of quantity × unit price), and compares the
//! aggregate against a stated column in the primary dataset. Primary rows
//! with no matching secondary rows take aggregate 0: a left join with a
//! default, never an exclusion.
//!
//! The checker materializes a new derived dataset (join key, stated
//! value, aggregate) and applies the same pairwise-equality evaluation
//! the rule validator uses; the input datasets are never mutated.
//!
//! Formula checks work the same way within a single dataset: the derived
//! column is a linear combination (Σ plus − Σ minus) of other columns.

use crate::rules::values_equal;
use crate::{DataValue, Dataset, ValidationError};
use quality_core::{Aggregate, ConsistencyCheck, FormulaCheck, ValidationContext, Violation};
use std::collections::HashMap;
use tracing::debug;

/// Validates cross-dataset consistency and derived-value formulas.
pub struct ConsistencyChecker;

impl ConsistencyChecker {
    /// Creates a new consistency checker.
    pub fn new() -> Self {
        Self
    }

    /// Runs every consistency check against its secondary dataset.
    ///
    /// `related` maps each check's `items_path` to its loaded dataset; a
    /// missing entry is a fatal configuration error.
    pub fn validate(
        &self,
        checks: &[ConsistencyCheck],
        primary: &Dataset,
        related: &HashMap<String, Dataset>,
        context: &ValidationContext,
    ) -> Result<Vec<Violation>, ValidationError> {
        let mut violations = Vec::new();

        for check in checks {
            let items = related
                .get(&check.items_path)
                .ok_or_else(|| ValidationError::MissingRelated {
                    check: check.name.clone(),
                    path: check.items_path.clone(),
                })?;
            if let Some(violation) = self.validate_check(check, primary, items, context)? {
                violations.push(violation);
            }
        }

        Ok(violations)
    }

    /// Runs a single consistency check.
    pub fn validate_check(
        &self,
        check: &ConsistencyCheck,
        primary: &Dataset,
        items: &Dataset,
        context: &ValidationContext,
    ) -> Result<Option<Violation>, ValidationError> {
        let derived = self.derive(check, primary, items)?;
        let derived_column = check.aggregate.derived_column();

        debug!(
            check = %check.name,
            rows = derived.len(),
            "derived consistency dataset"
        );

        Ok(self.compare(
            &check.name,
            &derived,
            &check.join_key,
            &check.stated,
            &derived_column,
            check.tolerance,
            context,
        ))
    }

    /// Builds the derived dataset: (join key, stated value, aggregate).
    fn derive(
        &self,
        check: &ConsistencyCheck,
        primary: &Dataset,
        items: &Dataset,
    ) -> Result<Dataset, ValidationError> {
        for column in [&check.join_key, &check.stated] {
            if !primary.has_column(column) {
                return Err(ValidationError::missing_column(
                    column.as_str(),
                    "primary dataset",
                ));
            }
        }
        if !items.has_column(&check.join_key) {
            return Err(ValidationError::missing_column(
                check.join_key.as_str(),
                check.items_path.as_str(),
            ));
        }

        let sums = self.aggregate_items(check, items)?;

        let derived_column = check.aggregate.derived_column();
        let mut derived = Dataset::new(vec![
            check.join_key.clone(),
            check.stated.clone(),
            derived_column,
        ]);

        for row in 0..primary.len() {
            let key = primary.value(row, &check.join_key).unwrap();
            let stated = primary.value(row, &check.stated).unwrap();
            // No matching items means an aggregate of 0, not a dropped row.
            let aggregate = sums.get(&key.render()).copied().unwrap_or(0.0);
            derived.push_row(vec![
                key.clone(),
                stated.clone(),
                DataValue::Float(aggregate),
            ]);
        }

        Ok(derived)
    }

    /// Groups the secondary dataset by join key and aggregates.
    fn aggregate_items(
        &self,
        check: &ConsistencyCheck,
        items: &Dataset,
    ) -> Result<HashMap<String, f64>, ValidationError> {
        let key_idx = items
            .column_index(&check.join_key)
            .expect("join key presence checked by caller");

        let mut sums: HashMap<String, f64> = HashMap::new();

        match &check.aggregate {
            Aggregate::Sum { column } => {
                let value_idx = items.column_index(column).ok_or_else(|| {
                    ValidationError::missing_column(column.as_str(), check.items_path.as_str())
                })?;
                for row in items.rows() {
                    let key = &row[key_idx];
                    if key.is_null() {
                        continue;
                    }
                    if let Some(value) = row[value_idx].as_float() {
                        *sums.entry(key.render()).or_insert(0.0) += value;
                    }
                }
            }

            Aggregate::SumProduct {
                quantity,
                price_candidates,
            } => {
                let quantity_idx = items.column_index(quantity).ok_or_else(|| {
                    ValidationError::missing_column(quantity.as_str(), check.items_path.as_str())
                })?;
                let price = resolve_price_column(price_candidates, items).ok_or_else(|| {
                    ValidationError::NoPriceColumn {
                        dataset: check.items_path.clone(),
                        candidates: price_candidates.clone(),
                    }
                })?;
                let price_idx = items.column_index(price).unwrap();

                for row in items.rows() {
                    let key = &row[key_idx];
                    if key.is_null() {
                        continue;
                    }
                    if let (Some(quantity), Some(price)) =
                        (row[quantity_idx].as_float(), row[price_idx].as_float())
                    {
                        *sums.entry(key.render()).or_insert(0.0) += quantity * price;
                    }
                }
            }
        }

        Ok(sums)
    }

    /// Runs every formula check: stated == Σ plus − Σ minus, per row.
    ///
    /// Rows with a null or non-numeric component are skipped; the schema
    /// validator reports those.
    pub fn validate_formulas(
        &self,
        checks: &[FormulaCheck],
        dataset: &Dataset,
        context: &ValidationContext,
    ) -> Result<Vec<Violation>, ValidationError> {
        let mut violations = Vec::new();

        for check in checks {
            for column in std::iter::once(&check.stated)
                .chain(&check.plus)
                .chain(&check.minus)
            {
                if !dataset.has_column(column) {
                    return Err(ValidationError::missing_column(
                        column.as_str(),
                        "primary dataset",
                    ));
                }
            }

            let expected_column = format!("{}_expected", check.stated);
            let mut derived = Dataset::new(vec![check.stated.clone(), expected_column.clone()]);

            for row in 0..dataset.len() {
                let stated = dataset.value(row, &check.stated).unwrap();
                let expected = formula_value(check, dataset, row);
                derived.push_row(vec![
                    stated.clone(),
                    expected.map(DataValue::Float).unwrap_or(DataValue::Null),
                ]);
            }

            let total = derived.len();
            let mut failing = 0;
            let mut examples = Vec::new();

            for row in 0..total {
                let stated = derived.value(row, &check.stated).unwrap();
                let expected = derived.value(row, &expected_column).unwrap();
                if stated.is_null() || expected.is_null() {
                    continue;
                }
                if !values_equal(stated, expected, check.tolerance) {
                    failing += 1;
                    if examples.len() < context.max_examples {
                        examples.push(format!(
                            "row {row}: {}={} != {}={}",
                            check.stated,
                            stated.render(),
                            expected_column,
                            expected.render()
                        ));
                    }
                }
            }

            if failing > 0 {
                violations.push(Violation::new(
                    check.name.clone(),
                    vec![check.stated.clone(), expected_column],
                    failing,
                    total,
                    examples,
                ));
            }
        }

        Ok(violations)
    }

    /// Pairwise equality over the derived dataset.
    #[allow(clippy::too_many_arguments)]
    fn compare(
        &self,
        name: &str,
        derived: &Dataset,
        key_column: &str,
        stated_column: &str,
        derived_column: &str,
        tolerance: Option<f64>,
        context: &ValidationContext,
    ) -> Option<Violation> {
        let total = derived.len();
        let mut failing = 0;
        let mut examples = Vec::new();

        for row in 0..total {
            let stated = derived.value(row, stated_column).unwrap();
            let aggregate = derived.value(row, derived_column).unwrap();
            if !values_equal(stated, aggregate, tolerance) {
                failing += 1;
                if examples.len() < context.max_examples {
                    let key = derived.value(row, key_column).unwrap();
                    examples.push(format!(
                        "{}={}: {}={} != {}={}",
                        key_column,
                        key.render(),
                        stated_column,
                        stated.render(),
                        derived_column,
                        aggregate.render()
                    ));
                }
            }
        }

        if failing == 0 {
            return None;
        }

        Some(Violation::new(
            name,
            vec![stated_column.to_string(), derived_column.to_string()],
            failing,
            total,
            examples,
        ))
    }
}

impl Default for ConsistencyChecker {
    fn default() -> Self {
        Self::new()
    }
}

/// Picks the unit-price column: the first candidate present in the
/// header wins, in the declared priority order.
pub fn resolve_price_column<'a>(candidates: &'a [String], items: &Dataset) -> Option<&'a String> {
    candidates.iter().find(|c| items.has_column(c))
}

/// Computes Σ plus − Σ minus for one row; `None` if any component is
/// null or non-numeric.
fn formula_value(check: &FormulaCheck, dataset: &Dataset, row: usize) -> Option<f64> {
    let mut value = 0.0;
    for column in &check.plus {
        value += dataset.value(row, column).unwrap().as_float()?;
    }
    for column in &check.minus {
        value -= dataset.value(row, column).unwrap().as_float()?;
    }
    Some(value)
}
