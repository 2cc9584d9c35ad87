//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "cplus-validator",
    version,
    about = "Check that CPLUS pathway datasets are mutually consistent",
    long_about = "Validate a set of raster datasets before they are combined.\n\n\
                  Checks that every dataset is a raster, that all share one\n\
                  coordinate reference system and that they use the expected\n\
                  no-data value."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format.
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
    /// Validate the datasets listed in a manifest.
    Validate(ValidateArgs),

    /// List the NCS validation rules and their configuration.
    Rules(RulesArgs),
}

#[derive(Parser)]
pub struct ValidateArgs {
    /// JSON manifest describing the datasets to validate.
    #[arg(value_name = "MANIFEST")]
    pub manifest: PathBuf,

    /// JSON file overriding rule configurations.
    #[arg(long = "rules", value_name = "PATH")]
    pub rules: Option<PathBuf>,

    /// Print the validation result as JSON.
    #[arg(long = "json")]
    pub json: bool,

    /// Hide the progress bar.
    #[arg(long = "no-progress")]
    pub no_progress: bool,

    /// Cancel the validation if it runs longer than this many seconds.
    #[arg(long = "timeout", value_name = "SECONDS")]
    pub timeout: Option<u64>,
}

#[derive(Parser)]
pub struct RulesArgs {
    /// JSON file overriding rule configurations.
    #[arg(long = "rules", value_name = "PATH")]
    pub rules: Option<PathBuf>,
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
