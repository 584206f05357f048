use anyhow::{Context, Result, bail};
use quality_parser::parse_file;
use quality_validator::DataValidator;
use std::path::Path;
use tracing::info;

use crate::output;

pub fn execute(suite_path: &str, _format: &str) -> Result<()> {
    info!("Checking suite definition: {}", suite_path);

    // Parse the suite file
    let path = Path::new(suite_path);
    let suite =
        parse_file(path).with_context(|| format!("Failed to parse suite file: {suite_path}"))?;

    output::print_info(&format!(
        "Suite loaded: {} v{} (owner: {})",
        suite.name, suite.version, suite.owner
    ));

    let validator = DataValidator::new();
    let errors = validator.validate_definition(&suite);
    if !errors.is_empty() {
        for error in &errors {
            output::print_error(&error.to_string());
        }
        bail!("Suite definition has {} error(s)", errors.len());
    }

    output::print_success("Suite definition is valid");

    // Print suite summary
    let rule_count: usize = suite
        .dataset
        .columns
        .iter()
        .filter_map(|c| c.rules.as_ref().map(Vec::len))
        .sum();

    println!("\nSuite Summary:");
    println!("  Name:        {}", suite.name);
    println!("  Version:     {}", suite.version);
    println!("  Owner:       {}", suite.owner);
    println!(
        "  Description: {}",
        suite.description.as_deref().unwrap_or("N/A")
    );
    println!("  Dataset:     {}", suite.dataset.path);
    println!("  Columns:     {}", suite.dataset.columns.len());
    println!("  Rules:       {rule_count}");

    if let Some(checks) = &suite.checks {
        let mut parts = Vec::new();
        if let Some(min_rows) = checks.min_rows {
            parts.push(format!("min_rows {min_rows}"));
        }
        if let Some(formulas) = &checks.formulas {
            if !formulas.is_empty() {
                parts.push(format!("{} formula(s)", formulas.len()));
            }
        }
        if let Some(consistency) = &checks.consistency {
            if !consistency.is_empty() {
                parts.push(format!("{} consistency", consistency.len()));
            }
        }
        if !parts.is_empty() {
            println!("  Checks:      {}", parts.join(", "));
        }
    }

    Ok(())
}
