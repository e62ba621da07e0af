use std::path::PathBuf;

use clap::{Parser, Subcommand};
use macroseries::{AggregationPolicy, Frequency};

/// Fetch, re-sample and export macroeconomic time series.
#[derive(Parser)]
#[command(
    name = "macroseries",
    version,
    about = "Fetch, re-sample and export macroeconomic time series"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Fetch one series and print it.
    Show(ShowArgs),
    /// Load a collection file and write its table as CSV.
    Export(ExportArgs),
    /// Load a collection file and write its chart spec as JSON.
    Chart(ChartArgs),
}

/// Arguments for the `show` subcommand.
#[derive(clap::Args)]
pub struct ShowArgs {
    /// Native frequency of the series (A, Q or M).
    #[arg(short, long)]
    pub frequency: Frequency,

    /// Country/region code, e.g. KR.
    #[arg(short, long)]
    pub country: String,

    /// Indicator code, e.g. NGDP_SA_XDC.
    #[arg(short, long)]
    pub indicator: String,

    /// First year, inclusive.
    #[arg(long)]
    pub start: i32,

    /// Last year, inclusive.
    #[arg(long)]
    pub end: i32,

    /// Re-sample into this frequency (A, Q, M or F for native).
    #[arg(long, default_value = "F")]
    pub to: Frequency,

    /// Aggregation policy used when re-sampling (average or sum).
    #[arg(short, long, default_value = "average")]
    pub aggregation: AggregationPolicy,

    /// Database to query.
    #[arg(long, default_value = macroseries::DEFAULT_DATABASE)]
    pub database: String,

    /// Override the service base URL.
    #[arg(long)]
    pub base_url: Option<String>,

    /// Per-request timeout in seconds.
    #[arg(long, default_value_t = 30)]
    pub timeout: u64,

    /// Print the view as JSON instead of label/value lines.
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `export` subcommand.
#[derive(clap::Args)]
pub struct ExportArgs {
    /// Path to TOML collection file.
    #[arg(short, long, default_value = "macroseries.toml")]
    pub config: PathBuf,

    /// Output CSV file or directory; defaults to `{title}_{yymmdd_HHMM}.csv` in the current directory.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the `chart` subcommand.
#[derive(clap::Args)]
pub struct ChartArgs {
    /// Path to TOML collection file.
    #[arg(short, long, default_value = "macroseries.toml")]
    pub config: PathBuf,

    /// Output JSON file; prints to stdout when omitted.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}
