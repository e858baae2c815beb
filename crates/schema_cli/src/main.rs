mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "tabcheck")]
#[command(version, about = "Check tabular data against column schemas", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Report rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a CSV file against a schema
    Validate {
        /// Path to the schema file (YAML, TOML or JSON)
        schema: PathBuf,

        /// Path to the CSV data file
        data: PathBuf,

        /// Column to use as the row index
        #[arg(short, long)]
        index_column: Option<String>,

        /// Field delimiter of the CSV file
        #[arg(short, long, default_value_t = ',')]
        delimiter: char,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Check a schema file without validating data
    Check {
        /// Path to the schema file (YAML, TOML or JSON)
        schema: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Generate a schema from an existing CSV file
    Init {
        /// Path to the CSV data file
        data: PathBuf,

        /// Output file path (defaults to stdout); a .json extension writes JSON
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Column to use as the row index
        #[arg(short, long)]
        index_column: Option<String>,

        /// Field delimiter of the CSV file
        #[arg(short, long, default_value_t = ',')]
        delimiter: char,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG takes precedence over --verbose
    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_level(true)
                .compact(),
        )
        .with(filter)
        .init();

    match cli.command {
        Commands::Validate {
            schema,
            data,
            index_column,
            delimiter,
            format,
        } => commands::validate::execute(&schema, &data, index_column, delimiter, format),

        Commands::Check { schema, format } => commands::check::execute(&schema, format),

        Commands::Init {
            data,
            output,
            index_column,
            delimiter,
        } => commands::init::execute(&data, output.as_deref(), index_column, delimiter),
    }
}
