//! CLI argument definitions for the survey dashboard.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

/// Default location of the bundled, pre-cleaned survey sample.
pub const DEFAULT_SAMPLE_PATH: &str = "vans_survey_clean.csv";

#[derive(Parser)]
#[command(
    name = "vdash",
    version,
    about = "Survey KPI dashboard - descriptive statistics for delivery-operations surveys",
    long_about = "Load a tabular survey dataset (bundled sample or uploaded CSV),\n\
                  compute its KPI set (means, counts, mode, distinct-count), and\n\
                  render metric cards plus a text-only data preview.\n\
                  Set VDASH_PASSWORD to put the dashboard behind a password gate."
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
    /// Load the survey data, compute KPIs, and render the dashboard.
    Show(ShowArgs),

    /// Print the active column-role mapping.
    Roles(RolesArgs),
}

#[derive(Parser)]
pub struct ShowArgs {
    /// Uploaded CSV file to load instead of the bundled sample.
    #[arg(long = "file", value_name = "CSV")]
    pub file: Option<PathBuf>,

    /// Path of the bundled sample dataset.
    #[arg(long = "sample", value_name = "PATH", default_value = DEFAULT_SAMPLE_PATH)]
    pub sample: PathBuf,

    /// Column-role mapping override (JSON).
    #[arg(long = "roles", value_name = "JSON")]
    pub roles: Option<PathBuf>,

    /// Number of preview rows to render.
    #[arg(long = "limit", value_name = "N", default_value_t = 3)]
    pub limit: usize,

    /// Print the KPI set as JSON instead of rendering tables.
    #[arg(long = "json")]
    pub json: bool,

    /// Dashboard password for non-interactive use. When omitted and a
    /// password is configured, the password is prompted on stdin.
    #[arg(long = "password", value_name = "PASSWORD")]
    pub password: Option<String>,
}

#[derive(Parser)]
pub struct RolesArgs {
    /// Column-role mapping override (JSON).
    #[arg(long = "roles", value_name = "JSON")]
    pub roles: Option<PathBuf>,
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
