//! CLI argument definitions for Scripscan.
//!
//! This module contains the command-line interface structure using Clap.
//! The CLI supports parsing pasted research text offline and fetching
//! live market data for NSE-listed equities.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `parse` | Extract metrics from pasted research text |
//! | `quote` | Fetch a live NSE quote for a symbol |
//! | `report` | Combine live sources (and optional text) into one report |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--format` | `table` | Output format (table, json) |
//! | `--pretty` | `false` | Pretty-print JSON output |
//! | `--strict` | `false` | Treat warnings as errors |
//! | `--timeout-ms` | `10000` | Request timeout in ms |
//! | `--out` | stdout | Write output to a file |
//!
//! # Examples
//!
//! ```bash
//! # Parse copied research text from a file
//! scripscan parse page.txt
//!
//! # Parse from stdin
//! cat page.txt | scripscan parse
//!
//! # Fetch a live quote as JSON
//! scripscan quote HDFCBANK --format json --pretty
//!
//! # Full report with pasted text alongside live sources
//! scripscan report HDFCBANK --text page.txt
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// 🦀 Scripscan - Indian equity research extraction CLI
///
/// Extract ~20 fundamental metrics from pasted research-page text and
/// cross-check them against live NSE and Yahoo Finance data, with
/// unified structured output.
#[derive(Debug, Parser)]
#[command(
    name = "scripscan",
    author,
    version,
    about = "Indian equity research extraction CLI",
    long_about = "Scripscan turns pasted research-page text into structured fundamentals \
for NSE-listed equities. Features include:\n\
\n\
  • Offline extraction of ~20 metrics from copied page text\n\
  • Live NSE quotes over the cookie-gated public API\n\
  • Yahoo Finance chart cross-checks (.NS listings)\n\
  • Structured JSON output with request metadata\n\
\n\
Use 'scripscan <command> --help' for command-specific help."
)]
pub struct Cli {
    /// Output format for results.
    ///
    /// - table: Aligned label/value lines (default)
    /// - json: Single JSON envelope
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Treat warnings and errors as failures (exit code 5).
    ///
    /// Useful for CI/CD pipelines that need strict validation.
    #[arg(long, global = true, default_value_t = false)]
    pub strict: bool,

    /// Request timeout budget in milliseconds.
    #[arg(long, global = true, default_value_t = 10_000)]
    pub timeout_ms: u64,

    /// Write output to a file instead of stdout.
    #[arg(long, global = true, value_name = "PATH")]
    pub out: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Aligned label/value lines for terminal display.
    Table,
    /// Single JSON envelope output.
    Json,
}

/// Available CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// 📋 Extract metrics from pasted research text.
    ///
    /// Reads the file argument, or stdin when no file is given, and
    /// extracts price, valuation, growth, shareholding, and corporate
    /// signal fields with a completeness score. Fully offline.
    ///
    /// # Examples
    ///
    ///   scripscan parse page.txt
    ///   cat page.txt | scripscan parse --format json
    Parse(ParseArgs),

    /// 💰 Fetch a live NSE quote for a symbol.
    ///
    /// Warms the NSE cookie session, then returns last price, open,
    /// previous close, day range, and traded volume.
    ///
    /// # Examples
    ///
    ///   scripscan quote HDFCBANK
    ///   scripscan quote TCS --format json --pretty
    Quote(QuoteArgs),

    /// 📊 Combine live sources into one report.
    ///
    /// Fetches the NSE quote and the Yahoo chart snapshot in parallel
    /// and optionally folds in metrics extracted from pasted text.
    /// Per-source failures are reported inside the envelope instead of
    /// failing the whole command.
    ///
    /// # Examples
    ///
    ///   scripscan report HDFCBANK
    ///   scripscan report HDFCBANK --text page.txt --pretty
    Report(ReportArgs),
}

/// Arguments for the `parse` command.
#[derive(Debug, Args)]
pub struct ParseArgs {
    /// File with pasted research text; stdin when omitted.
    pub file: Option<PathBuf>,
}

/// Arguments for the `quote` command.
#[derive(Debug, Args)]
pub struct QuoteArgs {
    /// NSE symbol (e.g., HDFCBANK, TCS, M&M).
    pub symbol: String,
}

/// Arguments for the `report` command.
#[derive(Debug, Args)]
pub struct ReportArgs {
    /// NSE symbol (e.g., HDFCBANK, TCS, M&M).
    pub symbol: String,

    /// Optional file with pasted research text to extract alongside.
    #[arg(long, value_name = "FILE")]
    pub text: Option<PathBuf>,
}
