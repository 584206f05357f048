//! # Data Quality Core
//!
//! Core data structures and types for the Data Quality Engine.
//!
//! This crate provides the building blocks for defining, parsing, and working with
//! quality suites. A quality suite is a declarative description of the expected
//! structure and content of a tabular dataset: its column schema, per-column
//! semantic rules, and dataset-level checks.
//!
//! ## Key Concepts
//!
//! - **Suite**: the main data structure representing a complete rule set for one dataset
//! - **DatasetSpec / ColumnSpec**: the ordered, typed column schema
//! - **Rule**: a declarative per-row predicate (pattern, value set, range, date format,
//!   pairwise equality)
//! - **Checks**: dataset-level expectations (row-count floor, derived-value formulas,
//!   cross-dataset consistency)
//! - **ValidationReport / Violation**: structured results with counts and bounded examples
//!
//! ## Example
//!
//! ```rust
//! use quality_core::{ColumnBuilder, ColumnType, Rule, SuiteBuilder};
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
//! assert_eq!(suite.dataset.columns.len(), 1);
//! ```

pub mod builder;
pub mod error;
pub mod report;
pub mod suite;

pub use builder::*;
pub use error::*;
pub use report::*;
pub use suite::*;
