//! CSV dataset loader.
//!
//! Reads a CSV file into a [`Dataset`], coercing each cell to its
//! declared [`ColumnType`]. The loader separates "file could not be
//! read" (fatal [`ValidationError::Load`]) from "file read but invalid":
//! a cell that fails its typed parse is kept as text so the schema
//! validator reports it, and header mismatches are likewise the schema
//! validator's job. Empty cells become explicit nulls. Undeclared
//! columns load as text.

use crate::{DataValue, Dataset, ValidationError};
use quality_core::{Aggregate, ColumnType, ConsistencyCheck, DatasetSpec};
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

/// Builds the column → type mapping for a suite's primary dataset.
pub fn column_types(spec: &DatasetSpec) -> HashMap<String, ColumnType> {
    spec.columns
        .iter()
        .map(|c| (c.name.clone(), c.column_type))
        .collect()
}

/// Builds the column → type mapping for a consistency check's secondary
/// dataset: the join key loads as text, aggregated columns as decimal.
pub fn item_column_types(check: &ConsistencyCheck) -> HashMap<String, ColumnType> {
    let mut types = HashMap::new();
    types.insert(check.join_key.clone(), ColumnType::Text);
    match &check.aggregate {
        Aggregate::Sum { column } => {
            types.insert(column.clone(), ColumnType::Decimal);
        }
        Aggregate::SumProduct {
            quantity,
            price_candidates,
        } => {
            types.insert(quantity.clone(), ColumnType::Decimal);
            for candidate in price_candidates {
                types.insert(candidate.clone(), ColumnType::Decimal);
            }
        }
    }
    types
}

/// Loads a CSV file into a typed dataset.
///
/// The file handle is scoped to this call. Fails with
/// [`ValidationError::Load`] if the file is missing, unreadable, or not
/// rectangular.
pub fn load_csv(
    path: &Path,
    types: &HashMap<String, ColumnType>,
) -> Result<Dataset, ValidationError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .map_err(|e| ValidationError::load(path, e))?;

    let headers = reader
        .headers()
        .map_err(|e| ValidationError::load(path, e))?;
    let columns: Vec<String> = headers.iter().map(|h| h.trim().to_string()).collect();

    let column_types: Vec<ColumnType> = columns
        .iter()
        .map(|name| types.get(name).copied().unwrap_or(ColumnType::Text))
        .collect();

    let mut dataset = Dataset::new(columns);
    for record in reader.records() {
        let record = record.map_err(|e| ValidationError::load(path, e))?;
        let row = record
            .iter()
            .zip(&column_types)
            .map(|(cell, column_type)| coerce(cell, *column_type))
            .collect();
        dataset.push_row(row);
    }

    debug!(
        path = %path.display(),
        rows = dataset.len(),
        columns = dataset.columns().len(),
        "loaded dataset"
    );

    Ok(dataset)
}

/// Coerces a raw CSV cell to the declared type.
///
/// Empty cells are null. A cell that fails its typed parse survives as
/// text; the schema validator flags it as a type violation.
fn coerce(cell: &str, column_type: ColumnType) -> DataValue {
    let trimmed = cell.trim();
    if trimmed.is_empty() {
        return DataValue::Null;
    }

    match column_type {
        ColumnType::Text => DataValue::Text(cell.to_string()),
        ColumnType::Integer => match trimmed.parse::<i64>() {
            Ok(i) => DataValue::Int(i),
            Err(_) => DataValue::Text(cell.to_string()),
        },
        ColumnType::Decimal => match trimmed.parse::<f64>() {
            Ok(f) => DataValue::Float(f),
            Err(_) => DataValue::Text(cell.to_string()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    fn write_csv(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
        write!(file, "{content}").expect("Failed to write temp file");
        file
    }

    fn orders_types() -> HashMap<String, ColumnType> {
        HashMap::from([
            ("order_id".to_string(), ColumnType::Text),
            ("num_items".to_string(), ColumnType::Integer),
            ("total".to_string(), ColumnType::Decimal),
        ])
    }

    #[test]
    fn test_load_typed_csv() {
        let file = write_csv("order_id,num_items,total\nO000001,3,103.00\nO000002,1,9.99\n");
        let dataset = load_csv(file.path(), &orders_types()).expect("load should succeed");

        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.columns(), &["order_id", "num_items", "total"]);
        assert_eq!(
            dataset.value(0, "order_id"),
            Some(&DataValue::Text("O000001".to_string()))
        );
        assert_eq!(dataset.value(0, "num_items"), Some(&DataValue::Int(3)));
        assert_eq!(dataset.value(1, "total"), Some(&DataValue::Float(9.99)));
    }

    #[test]
    fn test_empty_cell_becomes_null() {
        let file = write_csv("order_id,num_items,total\nO000001,,103.00\n");
        let dataset = load_csv(file.path(), &orders_types()).unwrap();

        assert_eq!(dataset.value(0, "num_items"), Some(&DataValue::Null));
    }

    #[test]
    fn test_unparseable_integer_survives_as_text() {
        let file = write_csv("order_id,num_items,total\nO000001,three,103.00\n");
        let dataset = load_csv(file.path(), &orders_types()).unwrap();

        // The loader does not fail; the schema validator reports the type.
        assert_eq!(
            dataset.value(0, "num_items"),
            Some(&DataValue::Text("three".to_string()))
        );
    }

    #[test]
    fn test_undeclared_column_loads_as_text() {
        let file = write_csv("order_id,surprise\nO000001,42\n");
        let dataset = load_csv(file.path(), &orders_types()).unwrap();

        assert_eq!(
            dataset.value(0, "surprise"),
            Some(&DataValue::Text("42".to_string()))
        );
    }

    #[test]
    fn test_missing_file_is_load_error() {
        let result = load_csv(Path::new("does/not/exist.csv"), &HashMap::new());
        assert!(matches!(result, Err(ValidationError::Load { .. })));
    }

    #[test]
    fn test_ragged_row_is_load_error() {
        let file = write_csv("a,b\n1,2\n3\n");
        let result = load_csv(file.path(), &HashMap::new());
        assert!(matches!(result, Err(ValidationError::Load { .. })));
    }

    #[test]
    fn test_item_column_types_for_sum_product() {
        let check = ConsistencyCheck {
            name: "subtotal_matches".to_string(),
            items_path: "data/order_items.csv".to_string(),
            join_key: "order_id".to_string(),
            stated: "subtotal".to_string(),
            aggregate: Aggregate::SumProduct {
                quantity: "quantity".to_string(),
                price_candidates: vec!["unit_price".to_string(), "price".to_string()],
            },
            tolerance: Some(1e-6),
        };

        let types = item_column_types(&check);
        assert_eq!(types.get("order_id"), Some(&ColumnType::Text));
        assert_eq!(types.get("quantity"), Some(&ColumnType::Decimal));
        assert_eq!(types.get("unit_price"), Some(&ColumnType::Decimal));
        assert_eq!(types.get("price"), Some(&ColumnType::Decimal));
    }
}
