//! # Data Quality Validator
//!
//! Validation engine for quality suites. This crate provides the core
//! validation logic for checking CSV datasets against suite definitions,
//! including:
//!
//! - CSV loading into typed in-memory datasets
//! - Schema validation (column presence, count, order, types, nullability)
//! - Semantic rules (patterns, value sets, ranges, date formats, pairwise equality)
//! - Cross-dataset consistency checks (join + aggregate + compare)
//!
//! ## Example
//!
//! ```rust
//! use quality_core::{ColumnBuilder, ColumnType, Rule, SuiteBuilder, ValidationContext};
//! use quality_validator::{DataValidator, DataValue, Dataset};
//! use std::collections::HashMap;
//!
//! let suite = SuiteBuilder::new("users", "data-quality")
//!     .path("data/users.csv")
//!     .column(
//!         ColumnBuilder::new("user_id", ColumnType::Text)
//!             .rule(Rule::Pattern { regex: r"^U\d{6}$".to_string() })
//!             .build(),
//!     )
//!     .build();
//!
//! let mut dataset = Dataset::new(vec!["user_id".to_string()]);
//! dataset.push_row(vec![DataValue::Text("U000001".to_string())]);
//!
//! let mut validator = DataValidator::new();
//! let report = validator
//!     .validate_with_data(&suite, &dataset, &HashMap::new(), &ValidationContext::new())
//!     .unwrap();
//!
//! assert!(report.passed);
//! ```

mod consistency;
mod dataset;
mod engine;
mod error;
mod loader;
mod rules;
mod schema;

pub use consistency::*;
pub use dataset::*;
pub use engine::*;
pub use error::*;
pub use loader::*;
pub use rules::*;
pub use schema::*;
