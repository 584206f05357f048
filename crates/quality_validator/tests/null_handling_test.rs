//! Tests to verify correct handling of null values across all validators.
//!
//! This test suite ensures that null values are handled consistently:
//! - The schema validator checks nullability constraints
//! - Rules skip null values (nullability is schema's responsibility),
//!   except `in_set`, where `allow_null` states whether absent is permitted
//!
//! This prevents logical bugs where null values might incorrectly pass or
//! fail validation.

use quality_core::{ColumnBuilder, ColumnType, Rule, SuiteBuilder, ValidationContext};
use quality_validator::{DataValidator, DataValue, Dataset};
use std::collections::HashMap;

#[test]
fn test_null_in_non_nullable_column_fails_schema_validation() {
    let suite = SuiteBuilder::new("test", "owner")
        .path("test.csv")
        .column(
            ColumnBuilder::new("id", ColumnType::Text)
                .nullable(false) // Explicitly non-nullable
                .build(),
        )
        .build();

    let mut dataset = Dataset::new(vec!["id".to_string()]);
    dataset.push_row(vec![DataValue::Null]);

    let mut validator = DataValidator::new();
    let report = validator
        .validate_with_data(&suite, &dataset, &HashMap::new(), &ValidationContext::new())
        .unwrap();

    assert!(!report.passed, "Null in non-nullable column should fail");
    assert_eq!(report.violations.len(), 1);
    assert_eq!(report.violations[0].rule, "not_null");
    assert_eq!(report.violations[0].failing, 1);
}

#[test]
fn test_exactly_one_violation_per_null_column() {
    let suite = SuiteBuilder::new("test", "owner")
        .path("test.csv")
        .column(ColumnBuilder::new("a", ColumnType::Text).build())
        .column(ColumnBuilder::new("b", ColumnType::Text).build())
        .build();

    let mut dataset = Dataset::new(vec!["a".to_string(), "b".to_string()]);
    dataset.push_row(vec![DataValue::Null, DataValue::Null]);
    dataset.push_row(vec![DataValue::Text("x".to_string()), DataValue::Null]);

    let mut validator = DataValidator::new();
    let report = validator
        .validate_with_data(&suite, &dataset, &HashMap::new(), &ValidationContext::new())
        .unwrap();

    // One violation per column, with per-row counts inside.
    assert_eq!(report.violations.len(), 2);
    let a = report.violations.iter().find(|v| v.columns == ["a"]).unwrap();
    let b = report.violations.iter().find(|v| v.columns == ["b"]).unwrap();
    assert_eq!(a.failing, 1);
    assert_eq!(b.failing, 2);
}

#[test]
fn test_null_in_nullable_column_passes() {
    let suite = SuiteBuilder::new("test", "owner")
        .path("test.csv")
        .column(
            ColumnBuilder::new("loyalty_tier", ColumnType::Text)
                .nullable(true)
                .build(),
        )
        .build();

    let mut dataset = Dataset::new(vec!["loyalty_tier".to_string()]);
    dataset.push_row(vec![DataValue::Null]);

    let mut validator = DataValidator::new();
    let report = validator
        .validate_with_data(&suite, &dataset, &HashMap::new(), &ValidationContext::new())
        .unwrap();

    assert!(report.passed);
}

#[test]
fn test_pattern_and_range_skip_nulls() {
    // The null is flagged once by the schema pass; the pattern and range
    // rules must not pile on.
    let suite = SuiteBuilder::new("test", "owner")
        .path("test.csv")
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
        .build();

    let mut dataset = Dataset::new(vec!["user_id".to_string(), "age".to_string()]);
    dataset.push_row(vec![DataValue::Null, DataValue::Null]);

    let mut validator = DataValidator::new();
    let report = validator
        .validate_with_data(&suite, &dataset, &HashMap::new(), &ValidationContext::new())
        .unwrap();

    assert!(!report.passed);
    let rules: Vec<&str> = report.violations.iter().map(|v| v.rule.as_str()).collect();
    assert_eq!(rules.iter().filter(|r| **r == "not_null").count(), 2);
    assert!(!rules.contains(&"pattern"));
    assert!(!rules.contains(&"range"));
}

#[test]
fn test_in_set_null_permitted_only_with_allow_null() {
    let make_suite = |allow_null| {
        SuiteBuilder::new("test", "owner")
            .path("test.csv")
            .column(
                ColumnBuilder::new("loyalty_tier", ColumnType::Text)
                    .nullable(true)
                    .rule(Rule::InSet {
                        values: vec!["Bronze".to_string(), "Gold".to_string()],
                        allow_null,
                    })
                    .build(),
            )
            .build()
    };

    let mut dataset = Dataset::new(vec!["loyalty_tier".to_string()]);
    dataset.push_row(vec![DataValue::Null]);

    let mut validator = DataValidator::new();
    let context = ValidationContext::new();

    let permissive = validator
        .validate_with_data(&make_suite(true), &dataset, &HashMap::new(), &context)
        .unwrap();
    assert!(permissive.passed);

    let strict = validator
        .validate_with_data(&make_suite(false), &dataset, &HashMap::new(), &context)
        .unwrap();
    assert!(!strict.passed);
    assert_eq!(strict.violations[0].rule, "in_set");
}
