use anyhow::{Context, Result, bail};
use quality_core::{ColumnBuilder, ColumnType, SuiteBuilder};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tracing::info;

use crate::output;

pub fn execute(
    csv_path: &str,
    output_path: Option<&str>,
    name: Option<&str>,
    owner: &str,
    sample_rows: usize,
) -> Result<()> {
    info!("Initializing suite from CSV: {}", csv_path);

    let path = Path::new(csv_path);
    let (columns, profiles) = profile_csv(path, sample_rows)
        .with_context(|| format!("Failed to read CSV file: {csv_path}"))?;

    if columns.is_empty() {
        bail!("CSV file has no header columns: {csv_path}");
    }

    output::print_success(&format!("Inspected {} columns", columns.len()));

    // Default the suite name to the file stem
    let suite_name = match name {
        Some(name) => name.to_string(),
        None => path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("dataset")
            .to_string(),
    };

    let mut builder = SuiteBuilder::new(suite_name.as_str(), owner)
        .description(format!("Auto-generated suite for {csv_path}"))
        .path(csv_path);

    for (column, profile) in columns.iter().zip(&profiles) {
        builder = builder.column(
            ColumnBuilder::new(column.as_str(), profile.inferred_type())
                .nullable(profile.saw_null)
                .build(),
        );
    }

    let suite = builder.build();
    let yaml = serde_yaml_ng::to_string(&suite).context("Failed to serialize suite")?;

    match output_path {
        Some(output_path) => {
            let mut file = File::create(output_path)
                .with_context(|| format!("Failed to create output file: {output_path}"))?;
            file.write_all(yaml.as_bytes())
                .with_context(|| format!("Failed to write output file: {output_path}"))?;
            output::print_success(&format!("Suite written to {output_path}"));
        }
        None => {
            println!("{yaml}");
        }
    }

    Ok(())
}

/// Per-column type profile accumulated over sampled rows.
#[derive(Debug, Default)]
struct ColumnProfile {
    saw_null: bool,
    saw_value: bool,
    all_int: bool,
    all_float: bool,
}

impl ColumnProfile {
    fn new() -> Self {
        Self {
            saw_null: false,
            saw_value: false,
            all_int: true,
            all_float: true,
        }
    }

    fn observe(&mut self, cell: &str) {
        let trimmed = cell.trim();
        if trimmed.is_empty() {
            self.saw_null = true;
            return;
        }
        self.saw_value = true;
        if trimmed.parse::<i64>().is_err() {
            self.all_int = false;
        }
        if trimmed.parse::<f64>().is_err() {
            self.all_float = false;
        }
    }

    /// Columns with no observed values stay text.
    fn inferred_type(&self) -> ColumnType {
        if !self.saw_value {
            ColumnType::Text
        } else if self.all_int {
            ColumnType::Integer
        } else if self.all_float {
            ColumnType::Decimal
        } else {
            ColumnType::Text
        }
    }
}

/// Reads the header and up to `sample_rows` records, profiling each column.
fn profile_csv(path: &Path, sample_rows: usize) -> Result<(Vec<String>, Vec<ColumnProfile>)> {
    let mut reader = csv::ReaderBuilder::new().has_headers(true).from_path(path)?;

    let columns: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();
    let mut profiles: Vec<ColumnProfile> = columns.iter().map(|_| ColumnProfile::new()).collect();

    for record in reader.records().take(sample_rows) {
        let record = record?;
        for (cell, profile) in record.iter().zip(&mut profiles) {
            profile.observe(cell);
        }
    }

    Ok((columns, profiles))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_profile_inference() {
        let mut profile = ColumnProfile::new();
        profile.observe("1");
        profile.observe("42");
        assert_eq!(profile.inferred_type(), ColumnType::Integer);

        let mut profile = ColumnProfile::new();
        profile.observe("1.5");
        profile.observe("2");
        assert_eq!(profile.inferred_type(), ColumnType::Decimal);

        let mut profile = ColumnProfile::new();
        profile.observe("hello");
        assert_eq!(profile.inferred_type(), ColumnType::Text);
    }

    #[test]
    fn test_profile_null_tracking() {
        let mut profile = ColumnProfile::new();
        profile.observe("");
        profile.observe("Gold");
        assert!(profile.saw_null);
        assert_eq!(profile.inferred_type(), ColumnType::Text);
    }

    #[test]
    fn test_all_null_column_stays_text() {
        let mut profile = ColumnProfile::new();
        profile.observe("");
        assert_eq!(profile.inferred_type(), ColumnType::Text);
        assert!(profile.saw_null);
    }
}
