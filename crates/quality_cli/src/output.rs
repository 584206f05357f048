use colored::*;
use quality_core::ValidationReport;
use serde_json::json;

pub fn print_validation_report(report: &ValidationReport, format: &str) {
    match format {
        "json" => print_json_report(report),
        _ => print_text_report(report),
    }
}

fn print_text_report(report: &ValidationReport) {
    println!("\n{}", "═".repeat(60));
    println!("{}", "  VALIDATION REPORT".bold());
    println!("{}", "═".repeat(60));

    if report.passed {
        println!(
            "\n{} {}",
            "✓".green().bold(),
            "Validation PASSED".green().bold()
        );
    } else {
        println!(
            "\n{} {}",
            "✗".red().bold(),
            "Validation FAILED".red().bold()
        );
    }

    if !report.violations.is_empty() {
        println!("\n{}", "Violations:".red().bold());
        for (i, violation) in report.violations.iter().enumerate() {
            println!("  {}. {}", i + 1, violation.to_string().red());
        }
    }

    println!("\n{}", "Summary:".bold());
    println!("  Violations:      {}", report.violations.len());
    println!("  Rows validated:  {}", report.stats.rows_validated);
    println!("  Columns checked: {}", report.stats.columns_checked);
    println!("  Rules evaluated: {}", report.stats.rules_evaluated);
    println!("  Duration:        {} ms", report.stats.duration_ms);
    println!("{}", "═".repeat(60));
}

fn print_json_report(report: &ValidationReport) {
    let output = json!({
        "passed": report.passed,
        "violations": report.violations,
        "summary": {
            "violation_count": report.violations.len(),
            "rows_validated": report.stats.rows_validated,
            "columns_checked": report.stats.columns_checked,
            "rules_evaluated": report.stats.rules_evaluated,
            "duration_ms": report.stats.duration_ms,
        }
    });

    println!("{}", serde_json::to_string_pretty(&output).unwrap());
}

pub fn print_success(message: &str) {
    println!("{} {}", "✓".green().bold(), message.green());
}

pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red().bold(), message.red());
}

pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue().bold(), message);
}
