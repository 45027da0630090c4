//! Command-line interface for records-extract
//!
//! Usage:
//!   records-extract `<FILE>` [--compact] [--verbose]
//!
//! Reads one export email and writes the extracted record as JSON to stdout.

use anyhow::Context;
use clap::Parser;
use std::io::Write;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "records-extract",
    version,
    about = "Extract account, message and call logs from a records-export email"
)]
struct Cli {
    /// Path to the .eml file to convert
    file: PathBuf,

    /// Write single-line JSON instead of pretty-printed output
    #[arg(long)]
    compact: bool,

    /// Log parsing decisions to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_env("RUST_LOG").unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    tracing::info!("Converting {}", cli.file.display());

    let raw = std::fs::read(&cli.file)
        .with_context(|| format!("failed to read {}", cli.file.display()))?;
    let source = records_extract::parse_eml(&raw)?;
    let mut record = records_extract::parse_document(&source)
        .with_context(|| format!("failed to extract records from {}", cli.file.display()))?;

    if let Some(name) = cli.file.file_name() {
        record = record.with_file(name.to_string_lossy());
    }

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if cli.compact {
        serde_json::to_writer(&mut out, &record)?;
    } else {
        serde_json::to_writer_pretty(&mut out, &record)?;
    }
    writeln!(out)?;
    Ok(())
}
