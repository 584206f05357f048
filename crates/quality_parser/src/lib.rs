//! Parser for quality suite definitions (YAML/TOML formats).
//!
//! This module provides functionality to parse quality suites from YAML and TOML
//! files into the strongly-typed `Suite` structure.
//!
//! # Example
//!
//! ```rust
//! use quality_parser::parse_yaml;
//!
//! let yaml = r#"
//! version: "1.0.0"
//! name: users
//! owner: data-quality
//! description: User dataset expectations
//! dataset:
//!   path: data/users.csv
//!   columns:
//!     - name: user_id
//!       type: text
//!       nullable: false
//! "#;
//!
//! let suite = parse_yaml(yaml).expect("Failed to parse suite");
//! assert_eq!(suite.name, "users");
//! ```

use quality_core::Suite;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during suite parsing.
#[derive(Debug, Error)]
pub enum ParserError {
    /// YAML parsing or deserialization failed
    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml_ng::Error),

    /// TOML parsing or deserialization failed
    #[error("Failed to parse TOML: {0}")]
    TomlError(String),

    /// File I/O error
    #[error("File I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Unsupported file format
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// Invalid file extension
    #[error("Invalid or missing file extension")]
    InvalidExtension,
}

/// Result type alias for parser operations.
pub type Result<T> = std::result::Result<T, ParserError>;

/// Supported suite file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuiteFormat {
    /// YAML format (.yml, .yaml)
    Yaml,
    /// TOML format (.toml)
    Toml,
}

/// Parse a suite from a YAML string.
///
/// # Arguments
///
/// * `content` - The YAML string to parse
///
/// # Example
///
/// ```rust
/// use quality_parser::parse_yaml;
///
/// let yaml = r#"
/// version: "1.0.0"
/// name: orders
/// owner: data-quality
/// dataset:
///   path: data/orders.csv
///   columns: []
/// "#;
///
/// let suite = parse_yaml(yaml).unwrap();
/// assert_eq!(suite.name, "orders");
/// ```
pub fn parse_yaml(content: &str) -> Result<Suite> {
    let suite: Suite = serde_yaml_ng::from_str(content)?;
    Ok(suite)
}

/// Parse a suite from a TOML string.
///
/// # Arguments
///
/// * `content` - The TOML string to parse
///
/// # Example
///
/// ```rust
/// use quality_parser::parse_toml;
///
/// let toml = r#"
/// version = "1.0.0"
/// name = "orders"
/// owner = "data-quality"
///
/// [dataset]
/// path = "data/orders.csv"
/// columns = []
/// "#;
///
/// let suite = parse_toml(toml).unwrap();
/// assert_eq!(suite.name, "orders");
/// ```
pub fn parse_toml(content: &str) -> Result<Suite> {
    let suite: Suite = toml::from_str(content).map_err(|e| ParserError::TomlError(e.to_string()))?;
    Ok(suite)
}

/// Detect the suite format from a file path based on its extension.
///
/// # Supported Extensions
///
/// * `.yaml`, `.yml` → `SuiteFormat::Yaml`
/// * `.toml` → `SuiteFormat::Toml`
///
/// # Errors
///
/// Returns `ParserError::InvalidExtension` if the file has no extension.
/// Returns `ParserError::UnsupportedFormat` if the extension is not recognized.
pub fn detect_format(path: &Path) -> Result<SuiteFormat> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .ok_or(ParserError::InvalidExtension)?;

    match extension.to_lowercase().as_str() {
        "yaml" | "yml" => Ok(SuiteFormat::Yaml),
        "toml" => Ok(SuiteFormat::Toml),
        other => Err(ParserError::UnsupportedFormat(other.to_string())),
    }
}

/// Parse a suite from a file with automatic format detection.
///
/// The format is determined by the file extension:
/// - `.yaml`, `.yml` → parsed as YAML
/// - `.toml` → parsed as TOML
///
/// # Example
///
/// ```no_run
/// use quality_parser::parse_file;
/// use std::path::Path;
///
/// let suite = parse_file(Path::new("suites/orders.yml")).unwrap();
/// println!("Loaded suite: {}", suite.name);
/// ```
pub fn parse_file(path: &Path) -> Result<Suite> {
    let content = std::fs::read_to_string(path)?;
    let format = detect_format(path)?;

    match format {
        SuiteFormat::Yaml => parse_yaml(&content),
        SuiteFormat::Toml => parse_toml(&content),
    }
}
