//! # colate-cli
//!
//! Command-line interface for colate: merge one sheet from every workbook in
//! a directory into a single output workbook.

use anyhow::{Context, Result};
use clap::Parser;
use colate_core::config::{DEFAULT_COLUMN_TEMPLATES, DEFAULT_FILE_PATTERN};
use colate_core::{run, CollateConfig, TracingSink};
use colored::Colorize;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// colate - collate rows from many spreadsheets into one
#[derive(Parser, Debug)]
#[command(name = "colate")]
#[command(author, version, about = "Collate one sheet from many workbooks into one", long_about = None)]
struct Cli {
    /// Directory of workbooks to process
    #[arg(long = "dir", value_name = "DIR", default_value = ".")]
    dir: PathBuf,

    /// File to write the merged sheet to
    #[arg(long = "output", value_name = "FILE", default_value = "./output.xlsx")]
    output: PathBuf,

    /// Sheet name to pull data from (also names the output sheet)
    #[arg(long = "sheet", default_value = "Sheet1")]
    sheet: String,

    /// Row the data starts on (0-based), to account for headers
    #[arg(long = "row-start", visible_alias = "rowStart", default_value_t = 0)]
    row_start: usize,

    /// Number of rows to take from each file, 0 for no limit
    #[arg(long = "row-count", visible_alias = "rowCount", default_value_t = 0)]
    row_count: usize,

    /// New columns to insert, comma-separated templates
    #[arg(long = "columns", default_value = DEFAULT_COLUMN_TEMPLATES)]
    columns: String,

    /// Column index the new columns are inserted at
    #[arg(long = "position", default_value_t = 0)]
    position: usize,

    /// Case-insensitive glob selecting input files
    #[arg(long = "pattern", default_value = DEFAULT_FILE_PATTERN)]
    pattern: String,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Emit logs as JSON
    #[arg(long = "json-logs")]
    json_logs: bool,
}

impl Cli {
    fn config(&self) -> CollateConfig {
        CollateConfig::default()
            .with_input_dir(&self.dir)
            .with_output_path(&self.output)
            .with_sheet_name(&self.sheet)
            .with_row_start(self.row_start)
            .with_row_limit(self.row_count)
            .with_column_templates(&self.columns)
            .with_column_position(self.position)
            .with_file_pattern(&self.pattern)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.json_logs);

    match execute(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("fatal error: {e:#}");
            eprintln!("{} {e:#}", "Error:".red().bold());
            ExitCode::FAILURE
        }
    }
}

/// Install the tracing subscriber. `RUST_LOG` overrides the verbosity flag.
fn init_logging(verbose: bool, json: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn execute(cli: &Cli) -> Result<()> {
    let config = cli.config();
    tracing::debug!(config = ?config, "starting");

    let collation = run(&config, &mut TracingSink)
        .with_context(|| format!("Failed to collate {}", config.input_dir.display()))?;

    let summary = format!(
        "{} rows from {} files",
        collation.matrix.len(),
        collation.files
    );
    println!(
        "{} {} -> {}",
        "Wrote".green().bold(),
        summary,
        config.output_path.display()
    );
    if collation.template_failures > 0 {
        println!(
            "{} {} column values left empty after template errors",
            "Warning:".yellow().bold(),
            collation.template_failures
        );
    }

    Ok(())
}
