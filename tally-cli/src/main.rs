use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use tally_core::{ReconcileError, ReconcileReport, reconcile};
use tally_statement::{extract_transactions, locate_sections, resolve_name, statement_period};
use tally_table::{CsvWorkbook, records_in_period};

mod name;
mod report;

#[derive(Parser, Debug)]
#[command(name = "tally", version, about = "Reconcile card-statement text against an expense workbook")]
struct Cli {
    /// Verbose logging
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compare a statement against an expense workbook and report missing transactions
    Compare {
        /// Statement text file (output of the PDF-to-text step)
        #[arg(long)]
        statement: PathBuf,

        /// Expense workbook: a .csv file, or a directory of .csv sheets
        #[arg(long)]
        expenses: PathBuf,

        /// Cardholder name; derived from the expenses filename when omitted
        #[arg(long)]
        name: Option<String>,

        /// Emit the report as JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Show the cardholder name derived from an expense filename
    DeriveName {
        filename: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    match cli.command {
        Command::Compare {
            statement,
            expenses,
            name,
            json,
        } => {
            let report = run_compare(&statement, &expenses, name)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print!("{}", report::render(&report));
            }
        }

        Command::DeriveName { filename } => {
            println!("{}", name::derive_name_from_filename(&filename)?);
        }
    }

    Ok(())
}

fn run_compare(
    statement: &Path,
    expenses: &Path,
    name: Option<String>,
) -> Result<ReconcileReport> {
    let raw = fs::read_to_string(statement)
        .with_context(|| format!("reading {}", statement.display()))?;
    let text = normalize_text(&raw)?;

    let period = statement_period(&text)?;
    debug!("statement period {period}");

    let sections = locate_sections(&text)?;
    if sections.is_empty() {
        bail!(ReconcileError::NoCardholdersFound);
    }
    info!("found {} cardholder section(s)", sections.len());

    let target = match name {
        Some(name) => name,
        None => {
            let filename = expenses
                .file_name()
                .and_then(|f| f.to_str())
                .unwrap_or_default();
            name::derive_name_from_filename(filename)?
        }
    };

    let selected = resolve_name(&target, &sections)
        .ok_or_else(|| ReconcileError::NameNotMatched(target.clone()))?
        .to_string();
    info!("resolved '{target}' to cardholder '{selected}'");

    let txns = extract_transactions(&text, &selected, &sections)?;
    let workbook = CsvWorkbook::open(expenses);
    let records = records_in_period(&workbook, &period);
    debug!(
        "{} statement transaction(s), {} workbook record(s) in period",
        txns.len(),
        records.len()
    );

    Ok(reconcile(&selected, period, &txns, &records))
}

/// Whitespace normalization the PDF-to-text step applies: tabs, carriage
/// returns, and non-breaking spaces become spaces, runs of spaces collapse.
/// Newlines survive; the summary-marker scan is line-based.
fn normalize_text(raw: &str) -> Result<String> {
    let unified = Regex::new("[\t\r\u{00a0}]+")?.replace_all(raw, " ");
    Ok(Regex::new(" +")?.replace_all(&unified, " ").into_owned())
}

fn init_logger(verbose: bool) {
    let filter = if verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .init();
}
