use anyhow::{Context, Result, bail};
use quality_core::{ColumnType, ValidationContext};
use quality_parser::parse_file;
use quality_validator::{DataValidator, Dataset, column_types, item_column_types, load_csv};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::output;

pub fn execute(
    suite_path: &str,
    data_dir: Option<&str>,
    schema_only: bool,
    sample_size: Option<usize>,
    max_examples: usize,
    format: &str,
) -> Result<()> {
    info!("Validating suite: {}", suite_path);
    info!("Schema only: {}", schema_only);
    if let Some(size) = sample_size {
        info!("Sample size: {}", size);
    }

    // Parse the suite file
    let path = Path::new(suite_path);
    let suite =
        parse_file(path).with_context(|| format!("Failed to parse suite file: {suite_path}"))?;

    output::print_info(&format!(
        "Suite loaded: {} v{} (owner: {})",
        suite.name, suite.version, suite.owner
    ));

    // A malformed definition is a configuration error; fail before
    // reading any data.
    let validator = DataValidator::new();
    let definition_errors = validator.validate_definition(&suite);
    if !definition_errors.is_empty() {
        for error in &definition_errors {
            output::print_error(&error.to_string());
        }
        bail!(
            "Suite definition has {} error(s)",
            definition_errors.len()
        );
    }

    // Data paths resolve against --data-dir, or the suite's directory.
    let base = match data_dir {
        Some(dir) => PathBuf::from(dir),
        None => path.parent().unwrap_or(Path::new(".")).to_path_buf(),
    };

    let primary_path = base.join(&suite.dataset.path);
    output::print_info(&format!("Loading dataset: {}", primary_path.display()));
    let primary = load_csv(&primary_path, &column_types(&suite.dataset))
        .with_context(|| format!("Failed to load dataset: {}", primary_path.display()))?;

    let related = load_related(&suite, &base)?;

    let mut context = ValidationContext::new()
        .with_schema_only(schema_only)
        .with_max_examples(max_examples);
    if let Some(size) = sample_size {
        context = context.with_sample_size(size);
    }

    let mut validator = DataValidator::new();
    let report = validator
        .validate_with_data(&suite, &primary, &related, &context)
        .context("Validation failed")?;

    // Print the validation report
    output::print_validation_report(&report, format);

    if !report.passed {
        std::process::exit(1);
    }

    Ok(())
}

/// Loads every consistency check's secondary dataset, once per distinct
/// path, with the type mappings of all checks over that path merged.
fn load_related(
    suite: &quality_core::Suite,
    base: &Path,
) -> Result<HashMap<String, Dataset>> {
    let checks = suite
        .checks
        .as_ref()
        .and_then(|c| c.consistency.as_deref())
        .unwrap_or_default();

    let mut types_by_path: HashMap<String, HashMap<String, ColumnType>> = HashMap::new();
    for check in checks {
        types_by_path
            .entry(check.items_path.clone())
            .or_default()
            .extend(item_column_types(check));
    }

    let mut related = HashMap::new();
    for (items_path, types) in &types_by_path {
        let full_path = base.join(items_path);
        output::print_info(&format!("Loading dataset: {}", full_path.display()));
        let dataset = load_csv(&full_path, types)
            .with_context(|| format!("Failed to load dataset: {}", full_path.display()))?;
        related.insert(items_path.clone(), dataset);
    }

    Ok(related)
}
