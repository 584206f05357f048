//! Builder pattern for creating quality suites.
//!
//! This module provides ergonomic builders for constructing suites
//! and their components with a fluent API.

use crate::{Checks, ColumnSpec, ColumnType, ConsistencyCheck, DatasetSpec, FormulaCheck, Rule, Suite};

/// Builder for creating a `Suite`.
///
/// # Example
///
/// ```rust
/// use quality_core::SuiteBuilder;
///
/// let suite = SuiteBuilder::new("orders", "data-quality")
///     .version("1.0.0")
///     .description("Order-level quality expectations")
///     .path("data/orders.csv")
///     .build();
/// ```
#[derive(Debug, Default)]
pub struct SuiteBuilder {
    name: Option<String>,
    owner: Option<String>,
    version: Option<String>,
    description: Option<String>,
    path: Option<String>,
    columns: Vec<ColumnSpec>,
    checks: Option<Checks>,
}

impl SuiteBuilder {
    /// Creates a new suite builder with required fields.
    ///
    /// # Arguments
    ///
    /// * `name` - Unique suite name
    /// * `owner` - Suite owner identifier
    pub fn new(name: impl Into<String>, owner: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            owner: Some(owner.into()),
            version: Some("1.0.0".to_string()),
            ..Default::default()
        }
    }

    /// Sets the suite version.
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Sets the suite description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the dataset path.
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Adds a column to the schema.
    pub fn column(mut self, column: ColumnSpec) -> Self {
        self.columns.push(column);
        self
    }

    /// Adds multiple columns to the schema.
    pub fn columns(mut self, columns: Vec<ColumnSpec>) -> Self {
        self.columns.extend(columns);
        self
    }

    /// Sets dataset-level checks.
    pub fn checks(mut self, checks: Checks) -> Self {
        self.checks = Some(checks);
        self
    }

    /// Builds the suite.
    ///
    /// # Panics
    ///
    /// Panics if required fields (name, owner, path) are not set.
    pub fn build(self) -> Suite {
        Suite {
            version: self.version.expect("version is required"),
            name: self.name.expect("name is required"),
            owner: self.owner.expect("owner is required"),
            description: self.description,
            dataset: DatasetSpec {
                path: self.path.expect("path is required"),
                columns: self.columns,
            },
            checks: self.checks,
        }
    }
}

/// Builder for creating a `ColumnSpec`.
///
/// # Example
///
/// ```rust
/// use quality_core::{ColumnBuilder, ColumnType, Rule};
///
/// let column = ColumnBuilder::new("user_id", ColumnType::Text)
///     .nullable(false)
///     .rule(Rule::Pattern { regex: r"^U\d{6}$".to_string() })
///     .build();
/// ```
#[derive(Debug)]
pub struct ColumnBuilder {
    name: String,
    column_type: ColumnType,
    nullable: bool,
    description: Option<String>,
    rules: Option<Vec<Rule>>,
}

impl ColumnBuilder {
    /// Creates a new column builder.
    ///
    /// # Arguments
    ///
    /// * `name` - Column name
    /// * `column_type` - Expected primitive type
    pub fn new(name: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            column_type,
            nullable: false,
            description: None,
            rules: None,
        }
    }

    /// Sets whether the column is nullable.
    pub fn nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    /// Sets the column description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Adds a rule to the column.
    pub fn rule(mut self, rule: Rule) -> Self {
        self.rules.get_or_insert_with(Vec::new).push(rule);
        self
    }

    /// Builds the column spec.
    pub fn build(self) -> ColumnSpec {
        ColumnSpec {
            name: self.name,
            column_type: self.column_type,
            nullable: self.nullable,
            description: self.description,
            rules: self.rules,
        }
    }
}

/// Builder for creating `Checks`.
#[derive(Debug, Default)]
pub struct ChecksBuilder {
    min_rows: Option<usize>,
    formulas: Option<Vec<FormulaCheck>>,
    consistency: Option<Vec<ConsistencyCheck>>,
}

impl ChecksBuilder {
    /// Creates a new checks builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the row-count floor.
    pub fn min_rows(mut self, min_rows: usize) -> Self {
        self.min_rows = Some(min_rows);
        self
    }

    /// Adds a formula check.
    pub fn formula(mut self, check: FormulaCheck) -> Self {
        self.formulas.get_or_insert_with(Vec::new).push(check);
        self
    }

    /// Adds a consistency check.
    pub fn consistency(mut self, check: ConsistencyCheck) -> Self {
        self.consistency.get_or_insert_with(Vec::new).push(check);
        self
    }

    /// Builds the checks.
    pub fn build(self) -> Checks {
        Checks {
            min_rows: self.min_rows,
            formulas: self.formulas,
            consistency: self.consistency,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Aggregate;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_suite_builder_minimal() {
        let suite = SuiteBuilder::new("orders", "data-quality")
            .path("data/orders.csv")
            .build();

        assert_eq!(suite.name, "orders");
        assert_eq!(suite.owner, "data-quality");
        assert_eq!(suite.version, "1.0.0");
        assert_eq!(suite.dataset.path, "data/orders.csv");
        assert!(suite.dataset.columns.is_empty());
        assert!(suite.checks.is_none());
    }

    #[test]
    fn test_suite_builder_full() {
        let suite = SuiteBuilder::new("orders", "data-quality")
            .version("2.1.0")
            .description("Order-level quality expectations")
            .path("data/orders.csv")
            .column(
                ColumnBuilder::new("order_id", ColumnType::Text)
                    .rule(Rule::Pattern {
                        regex: r"^O\d{6}$".to_string(),
                    })
                    .build(),
            )
            .checks(
                ChecksBuilder::new()
                    .min_rows(1)
                    .consistency(ConsistencyCheck {
                        name: "num_items_matches".to_string(),
                        items_path: "data/order_items.csv".to_string(),
                        join_key: "order_id".to_string(),
                        stated: "num_items".to_string(),
                        aggregate: Aggregate::Sum {
                            column: "quantity".to_string(),
                        },
                        tolerance: None,
                    })
                    .build(),
            )
            .build();

        assert_eq!(suite.version, "2.1.0");
        assert_eq!(suite.dataset.columns.len(), 1);
        let checks = suite.checks.unwrap();
        assert_eq!(checks.min_rows, Some(1));
        assert_eq!(checks.consistency.unwrap().len(), 1);
    }

    #[test]
    fn test_column_builder_defaults_non_nullable() {
        let column = ColumnBuilder::new("age", ColumnType::Integer).build();
        assert!(!column.nullable);
        assert!(column.rules.is_none());
    }

    #[test]
    fn test_column_builder_accumulates_rules() {
        let column = ColumnBuilder::new("age", ColumnType::Integer)
            .rule(Rule::Range {
                min: 15.0,
                max: 100.0,
            })
            .rule(Rule::InSet {
                values: vec!["15".to_string()],
                allow_null: false,
            })
            .build();

        assert_eq!(column.rules.unwrap().len(), 2);
    }

    #[test]
    #[should_panic(expected = "path is required")]
    fn test_suite_builder_requires_path() {
        SuiteBuilder::new("orders", "data-quality").build();
    }
}
