//! Binary entry point for ebm.
//!
//! This binary converts Enterprise Bookmark exports between the service's
//! XLSX download format and its CSV upload format.

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(missing_docs)]
// Allow print_stderr/print_stdout in main binary for CLI output
#![allow(clippy::print_stderr)]
#![allow(clippy::print_stdout)]
// Allow multiple crate versions from transitive dependencies
#![allow(clippy::multiple_crate_versions)]

use anyhow::Context;
use clap::Parser;
use ebm::convert::{self, ConvertOptions, FailurePolicy, DEFAULT_ROW_LIMIT};
use ebm::io::most_recent_input;
use ebm::models::Variation;
use ebm::{DateLocale, Lookups, State};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Ebm - converts Enterprise Bookmarks between XLSX and upload CSV.
#[derive(Parser)]
#[command(name = "ebm")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input file (.xlsx or .csv). Defaults to the most recently modified
    /// candidate in the current directory.
    #[arg(short, long)]
    inputfile: Option<PathBuf>,

    /// List the known country/region codes and exit.
    #[arg(short, long)]
    countries: bool,

    /// List the known device and OS labels and exit.
    #[arg(short, long)]
    devices: bool,

    /// List the known bookmark states and exit.
    #[arg(short, long)]
    status: bool,

    /// Print a sample targeted-variations JSON value and exit.
    #[arg(short, long)]
    variation: bool,

    /// Locale driving the date display formats in workbook output.
    #[arg(long, default_value = "en")]
    locale: String,

    /// Validate every row and report all failures instead of stopping at
    /// the first one.
    #[arg(long)]
    collect_errors: bool,

    /// Data rows per output CSV file before splitting into numbered files.
    #[arg(long, default_value_t = DEFAULT_ROW_LIMIT)]
    row_limit: usize,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        },
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let lookups = Lookups::default();

    if cli.countries {
        for (code, name) in lookups.countries() {
            println!("{code}  {name}");
        }
        return Ok(());
    }
    if cli.devices {
        for label in lookups.device_labels() {
            println!("{label}");
        }
        return Ok(());
    }
    if cli.status {
        for state in State::all() {
            println!("{}", state.label());
        }
        return Ok(());
    }
    if cli.variation {
        println!("{}", serde_json::to_string_pretty(&[Variation::sample()])?);
        return Ok(());
    }

    let input = match &cli.inputfile {
        Some(path) => path.clone(),
        None => {
            let cwd = std::env::current_dir()
                .context("could not determine the current directory")?;
            let found = most_recent_input(&cwd).context(
                "no input file given and no .xlsx or .csv file found in the current directory",
            )?;
            tracing::info!(path = %found.display(), "no input file given, using most recent");
            found
        },
    };

    let options = ConvertOptions::default()
        .with_row_limit(cli.row_limit)
        .with_locale(DateLocale::from_tag(&cli.locale))
        .with_failure_policy(if cli.collect_errors {
            FailurePolicy::CollectAll
        } else {
            FailurePolicy::FailFast
        });

    let report = match input.extension().and_then(|e| e.to_str()) {
        Some("xlsx") => convert::excel_to_csv(&input, &lookups, &options)?,
        Some("csv") => convert::csv_to_excel(&input, &options)?,
        _ => anyhow::bail!("{} is neither an .xlsx nor a .csv file", input.display()),
    };

    if report.has_errors() {
        for failure in &report.errors {
            eprintln!("Row {}: {}", failure.row, failure.error);
        }
        anyhow::bail!(
            "{} of {} rows failed validation",
            report.errors.len(),
            report.rows_read
        );
    }

    for output in &report.outputs {
        println!("Output file: {}", output.display());
    }
    Ok(())
}
