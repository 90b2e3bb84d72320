//! CLI argument definitions for the `rem` binary.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use rem_model::{Granularity, ReportPeriod};

#[derive(Parser)]
#[command(
    name = "rem",
    version,
    about = "Maternity indicators dashboard and REM regulatory report",
    long_about = "Build maternity and neonatal indicators from a JSON record set.\n\n\
                  `indicators` produces the dashboard (counts, series, distributions, rates).\n\
                  `rem` produces the fixed-layout REM regulatory report."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Build the indicators dashboard.
    Indicators(IndicatorsArgs),

    /// Build the REM regulatory report from births and their newborns.
    Rem(RemArgs),
}

/// Reporting period bounds, echoed into the report.
#[derive(Args)]
pub struct PeriodArgs {
    /// First day of the reporting period (YYYY-MM-DD).
    #[arg(long = "from", value_name = "DATE")]
    pub from: Option<NaiveDate>,

    /// Last day of the reporting period (YYYY-MM-DD).
    #[arg(long = "to", value_name = "DATE")]
    pub to: Option<NaiveDate>,
}

#[derive(Parser)]
pub struct IndicatorsArgs {
    /// JSON file holding the record set.
    #[arg(value_name = "RECORDS_JSON")]
    pub records: PathBuf,

    #[command(flatten)]
    pub period: PeriodArgs,

    /// Time bucket for evolution series.
    #[arg(long = "group-by", value_enum, default_value = "month")]
    pub group_by: GroupByArg,

    /// Reference instant for recent activity (default: now, local time).
    #[arg(long = "as-of", value_name = "DATETIME")]
    pub as_of: Option<String>,

    /// Length of the recent-activity window in days.
    #[arg(long = "recent-days", value_name = "DAYS")]
    pub recent_days: Option<u32>,

    /// Print the report as JSON instead of summary tables.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Parser)]
pub struct RemArgs {
    /// JSON file holding the record set.
    #[arg(value_name = "RECORDS_JSON")]
    pub records: PathBuf,

    #[command(flatten)]
    pub period: PeriodArgs,

    /// Print the report as JSON instead of a summary table.
    #[arg(long = "json")]
    pub json: bool,
}

impl PeriodArgs {
    pub fn to_period(&self, group_by: Granularity) -> ReportPeriod {
        ReportPeriod::new(group_by)
            .with_start(self.from)
            .with_end(self.to)
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum GroupByArg {
    Day,
    Week,
    Month,
}

impl From<GroupByArg> for Granularity {
    fn from(arg: GroupByArg) -> Self {
        match arg {
            GroupByArg::Day => Granularity::Day,
            GroupByArg::Week => Granularity::Week,
            GroupByArg::Month => Granularity::Month,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
