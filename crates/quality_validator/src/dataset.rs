//! Dataset representation for validation.
//!
//! This module provides the in-memory tabular structure that validators
//! operate on. A [`Dataset`] holds an ordered header plus rows that are
//! exactly as wide as the header; nulls are explicit. Datasets are never
//! mutated once loaded: derived datasets (e.g. for consistency checks)
//! are new values.

use std::collections::HashMap;

/// A value in a dataset.
#[derive(Debug, Clone, PartialEq)]
pub enum DataValue {
    /// Null/missing value (empty CSV cell)
    Null,
    /// Text value
    Text(String),
    /// Integer value
    Int(i64),
    /// Floating point value
    Float(f64),
}

impl DataValue {
    /// Returns true if this value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, DataValue::Null)
    }

    /// Returns the type name of this value.
    pub fn type_name(&self) -> &'static str {
        match self {
            DataValue::Null => "null",
            DataValue::Text(_) => "text",
            DataValue::Int(_) => "integer",
            DataValue::Float(_) => "decimal",
        }
    }

    /// Attempts to get this value as a string slice.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            DataValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Attempts to get this value as an integer.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            DataValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Attempts to get this value as a float. Integers coerce.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            DataValue::Float(f) => Some(*f),
            DataValue::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Renders this value for report examples.
    pub fn render(&self) -> String {
        match self {
            DataValue::Null => "null".to_string(),
            DataValue::Text(s) => s.clone(),
            DataValue::Int(i) => i.to_string(),
            DataValue::Float(f) => f.to_string(),
        }
    }
}

impl From<String> for DataValue {
    fn from(s: String) -> Self {
        DataValue::Text(s)
    }
}

impl From<&str> for DataValue {
    fn from(s: &str) -> Self {
        DataValue::Text(s.to_string())
    }
}

impl From<i64> for DataValue {
    fn from(i: i64) -> Self {
        DataValue::Int(i)
    }
}

impl From<f64> for DataValue {
    fn from(f: f64) -> Self {
        DataValue::Float(f)
    }
}

/// A dataset: an ordered header plus rows of values.
///
/// Invariant: every row has exactly one value (possibly `Null`) per
/// header column.
#[derive(Debug, Clone)]
pub struct Dataset {
    columns: Vec<String>,
    index: HashMap<String, usize>,
    rows: Vec<Vec<DataValue>>,
}

impl Dataset {
    /// Creates a new empty dataset with the given header.
    pub fn new(columns: Vec<String>) -> Self {
        let index = columns
            .iter()
            .enumerate()
            .map(|(i, name)| (name.clone(), i))
            .collect();
        Self {
            columns,
            index,
            rows: Vec::new(),
        }
    }

    /// Returns the number of rows in the dataset.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the dataset has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns the ordered header.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Returns the header position of a column, if present.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Returns true if the header contains the column.
    pub fn has_column(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Returns an iterator over the rows.
    pub fn rows(&self) -> impl Iterator<Item = &[DataValue]> {
        self.rows.iter().map(|row| row.as_slice())
    }

    /// Gets a specific row by index.
    pub fn get_row(&self, index: usize) -> Option<&[DataValue]> {
        self.rows.get(index).map(|row| row.as_slice())
    }

    /// Gets the value at (row, column name), if both exist.
    pub fn value(&self, row: usize, column: &str) -> Option<&DataValue> {
        let col = self.column_index(column)?;
        self.rows.get(row).map(|r| &r[col])
    }

    /// Returns an iterator over one column's values, if the column exists.
    pub fn column_values<'a>(&'a self, name: &str) -> Option<impl Iterator<Item = &'a DataValue>> {
        let col = self.column_index(name)?;
        Some(self.rows.iter().map(move |row| &row[col]))
    }

    /// Appends a row.
    ///
    /// # Panics
    ///
    /// Panics if the row width does not match the header width; the
    /// loader guarantees rectangular input before rows reach here.
    pub fn push_row(&mut self, row: Vec<DataValue>) {
        assert_eq!(
            row.len(),
            self.columns.len(),
            "row width must match header width"
        );
        self.rows.push(row);
    }

    /// Takes a head sample of rows from the dataset.
    ///
    /// If `size` is greater than the number of rows, returns all rows.
    pub fn sample(&self, size: usize) -> Dataset {
        let sample_size = size.min(self.rows.len());
        Dataset {
            columns: self.columns.clone(),
            index: self.index.clone(),
            rows: self.rows.iter().take(sample_size).cloned().collect(),
        }
    }
}
