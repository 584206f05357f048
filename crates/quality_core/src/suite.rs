//! Quality suite types and structures.
//!
//! This module contains the core types for defining quality suites: the
//! dataset schema, per-column rules, and dataset-level checks. All types
//! are serde-(de)serializable so that rule sets live in suite files as
//! data rather than code.

use serde::{Deserialize, Serialize};

/// A quality suite describing the expected shape and content of a dataset.
///
/// A `Suite` is the main entry point for defining data-quality
/// expectations. It names the dataset, declares its column schema, and
/// optionally attaches dataset-level checks (row-count floor, derived-value
/// formulas, cross-dataset consistency).
///
/// # Example
///
/// ```rust
/// use quality_core::{Suite, DatasetSpec, ColumnSpec, ColumnType};
///
/// let suite = Suite {
///     version: "1.0.0".to_string(),
///     name: "orders".to_string(),
///     owner: "data-quality".to_string(),
///     description: Some("Order-level quality expectations".to_string()),
///     dataset: DatasetSpec {
///         path: "data/orders.csv".to_string(),
///         columns: vec![],
///     },
///     checks: None,
/// };
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Suite {
    /// Semantic version of the suite (e.g., "1.0.0")
    pub version: String,

    /// Unique name identifying this suite
    pub name: String,

    /// Team or individual responsible for this suite
    pub owner: String,

    /// Human-readable description of the dataset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Dataset schema: file path plus ordered column declarations
    pub dataset: DatasetSpec,

    /// Optional dataset-level checks
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checks: Option<Checks>,
}

/// Schema declaration for a CSV dataset.
///
/// The column list is ordered: it must match the file's header row in
/// both count and position.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetSpec {
    /// Path to the CSV file, resolved relative to the suite file
    pub path: String,

    /// Ordered column declarations
    pub columns: Vec<ColumnSpec>,
}

impl DatasetSpec {
    /// Looks up a column declaration by name.
    pub fn column(&self, name: &str) -> Option<&ColumnSpec> {
        self.columns.iter().find(|c| c.name == name)
    }
}

/// Primitive column types supported by the loader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    /// Free-form text
    Text,
    /// 64-bit signed integer
    Integer,
    /// 64-bit floating point
    Decimal,
}

impl ColumnType {
    /// Returns the lowercase name of this type, as written in suite files.
    pub fn name(&self) -> &'static str {
        match self {
            ColumnType::Text => "text",
            ColumnType::Integer => "integer",
            ColumnType::Decimal => "decimal",
        }
    }
}

/// A single column declaration in a dataset schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnSpec {
    /// Column name as it appears in the CSV header
    pub name: String,

    /// Expected primitive type
    #[serde(rename = "type")]
    pub column_type: ColumnType,

    /// Whether the column may contain null (empty) values
    #[serde(default)]
    pub nullable: bool,

    /// Optional human-readable description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Optional semantic rules evaluated per row
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rules: Option<Vec<Rule>>,
}

/// Semantic rules that can be applied to a column.
///
/// Rules are declarative data: the validator dispatches on the variant
/// tag, so new rule kinds extend this enum without touching call sites.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Rule {
    /// Value, coerced to text, must fully match the regex pattern
    Pattern {
        /// Regular expression pattern
        regex: String,
    },

    /// Value must be one of the enumerated values
    InSet {
        /// List of permitted values
        values: Vec<String>,
        /// Whether null counts as permitted absent
        #[serde(default)]
        allow_null: bool,
    },

    /// Numeric value must be within the inclusive range
    Range {
        /// Minimum value (inclusive)
        min: f64,
        /// Maximum value (inclusive)
        max: f64,
    },

    /// Text value must parse with the chrono format string
    DateFormat {
        /// chrono format (e.g., "%Y-%m-%d %H:%M:%S")
        format: String,
    },

    /// Value must equal the value of another column in the same row
    EqualsColumn {
        /// Name of the other column
        other: String,
        /// Absolute tolerance for numeric comparisons; exact when absent
        #[serde(default, skip_serializing_if = "Option::is_none")]
        tolerance: Option<f64>,
    },
}

impl Rule {
    /// Short tag identifying the rule kind in violation reports.
    pub fn kind(&self) -> &'static str {
        match self {
            Rule::Pattern { .. } => "pattern",
            Rule::InSet { .. } => "in_set",
            Rule::Range { .. } => "range",
            Rule::DateFormat { .. } => "date_format",
            Rule::EqualsColumn { .. } => "equals_column",
        }
    }
}

/// Dataset-level checks beyond per-column rules.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Checks {
    /// Minimum number of data rows the dataset must contain
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_rows: Option<usize>,

    /// Derived-value formulas within the dataset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formulas: Option<Vec<FormulaCheck>>,

    /// Cross-dataset consistency checks
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consistency: Option<Vec<ConsistencyCheck>>,
}

/// A derived-value check: stated == Σ plus − Σ minus, per row.
///
/// Used for linear business formulas such as
/// `total == subtotal + shipping_fee + tax - discount_total`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormulaCheck {
    /// Check name, used in reports
    pub name: String,

    /// Column holding the stated value
    pub stated: String,

    /// Columns added into the derived value
    #[serde(default)]
    pub plus: Vec<String>,

    /// Columns subtracted from the derived value
    #[serde(default)]
    pub minus: Vec<String>,

    /// Absolute tolerance for the comparison; exact when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tolerance: Option<f64>,
}

/// A cross-dataset consistency check.
///
/// Joins a secondary dataset on `join_key`, aggregates it per key, and
/// compares the aggregate against the primary dataset's `stated` column.
/// Primary rows with no matching secondary rows take aggregate 0.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsistencyCheck {
    /// Check name, used in reports
    pub name: String,

    /// Path to the secondary CSV, resolved like the dataset path
    pub items_path: String,

    /// Column present in both datasets used for the join
    pub join_key: String,

    /// Primary-dataset column holding the stated value
    pub stated: String,

    /// Aggregation over the secondary dataset
    pub aggregate: Aggregate,

    /// Absolute tolerance for the comparison; exact when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tolerance: Option<f64>,
}

/// Aggregations supported by consistency checks.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Aggregate {
    /// Sum of a single secondary-dataset column per join key
    Sum {
        /// Column to sum
        column: String,
    },

    /// Sum of quantity × unit price per join key
    SumProduct {
        /// Quantity column
        quantity: String,
        /// Unit-price column candidates; the first present in the
        /// secondary dataset's header wins
        price_candidates: Vec<String>,
    },
}

impl Aggregate {
    /// Name given to the derived column materialized for the comparison.
    pub fn derived_column(&self) -> String {
        match self {
            Aggregate::Sum { column } => format!("{column}_sum"),
            Aggregate::SumProduct { .. } => "items_amount".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_column_type_names() {
        assert_eq!(ColumnType::Text.name(), "text");
        assert_eq!(ColumnType::Integer.name(), "integer");
        assert_eq!(ColumnType::Decimal.name(), "decimal");
    }

    #[test]
    fn test_rule_kinds() {
        let rule = Rule::Pattern {
            regex: r"^O\d{6}$".to_string(),
        };
        assert_eq!(rule.kind(), "pattern");

        let rule = Rule::InSet {
            values: vec!["COD".to_string()],
            allow_null: false,
        };
        assert_eq!(rule.kind(), "in_set");

        let rule = Rule::EqualsColumn {
            other: "expected".to_string(),
            tolerance: Some(1e-6),
        };
        assert_eq!(rule.kind(), "equals_column");
    }

    #[test]
    fn test_rule_yaml_tagging() {
        let yaml = r#"
type: in_set
values: [Bronze, Silver, Gold, Platinum]
allow_null: true
"#;
        let rule: Rule = serde_yaml_ng::from_str(yaml).unwrap();
        match rule {
            Rule::InSet { values, allow_null } => {
                assert_eq!(values.len(), 4);
                assert!(allow_null);
            }
            other => panic!("expected in_set, got {other:?}"),
        }
    }

    #[test]
    fn test_allow_null_defaults_to_false() {
        let yaml = r#"
type: in_set
values: [processing, shipped]
"#;
        let rule: Rule = serde_yaml_ng::from_str(yaml).unwrap();
        assert!(matches!(rule, Rule::InSet { allow_null: false, .. }));
    }

    #[test]
    fn test_aggregate_derived_column() {
        let agg = Aggregate::Sum {
            column: "quantity".to_string(),
        };
        assert_eq!(agg.derived_column(), "quantity_sum");

        let agg = Aggregate::SumProduct {
            quantity: "quantity".to_string(),
            price_candidates: vec!["unit_price".to_string()],
        };
        assert_eq!(agg.derived_column(), "items_amount");
    }

    #[test]
    fn test_dataset_spec_lookup() {
        let spec = DatasetSpec {
            path: "data/orders.csv".to_string(),
            columns: vec![ColumnSpec {
                name: "order_id".to_string(),
                column_type: ColumnType::Text,
                nullable: false,
                description: None,
                rules: None,
            }],
        };

        assert!(spec.column("order_id").is_some());
        assert!(spec.column("missing").is_none());
    }
}
