mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "dqe")]
#[command(version, about = "Data Quality Engine CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a dataset against a quality suite
    Validate {
        /// Path to the suite file (YAML or TOML)
        suite: String,

        /// Base directory for data paths (defaults to the suite's directory)
        #[arg(short, long)]
        data_dir: Option<String>,

        /// Run only the schema pass (skip rules and checks)
        #[arg(long)]
        schema_only: bool,

        /// Validate at most this many rows
        #[arg(short, long)]
        sample_size: Option<usize>,

        /// Maximum offending examples reported per violation
        #[arg(short, long, default_value_t = quality_core::DEFAULT_MAX_EXAMPLES)]
        max_examples: usize,

        /// Output format: text, json
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Check a suite definition without validating data
    Check {
        /// Path to the suite file (YAML or TOML)
        suite: String,

        /// Output format: text, json
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Initialize a suite skeleton from an existing CSV file
    Init {
        /// Path to the CSV file to inspect
        csv: String,

        /// Output file path (defaults to stdout)
        #[arg(short, long)]
        output: Option<String>,

        /// Suite name (defaults to the CSV file stem)
        #[arg(short, long)]
        name: Option<String>,

        /// Suite owner
        #[arg(long, default_value = "data-quality")]
        owner: String,

        /// Number of rows to sample for type inference
        #[arg(short, long, default_value_t = 100)]
        rows: usize,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let log_level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_level(true)
                .compact(),
        )
        .with(tracing_subscriber::filter::LevelFilter::from_level(
            log_level,
        ))
        .init();

    // Execute command
    match cli.command {
        Commands::Validate {
            suite,
            data_dir,
            schema_only,
            sample_size,
            max_examples,
            format,
        } => commands::validate::execute(
            &suite,
            data_dir.as_deref(),
            schema_only,
            sample_size,
            max_examples,
            &format,
        ),

        Commands::Check { suite, format } => commands::check::execute(&suite, &format),

        Commands::Init {
            csv,
            output,
            name,
            owner,
            rows,
        } => commands::init::execute(&csv, output.as_deref(), name.as_deref(), &owner, rows),
    }
}
