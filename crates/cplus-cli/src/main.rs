//! CPLUS dataset validator CLI.

use std::io::{self, IsTerminal};

use clap::{ColorChoice, Parser};
use cplus_cli::logging::{LogConfig, LogFormat, init_logging};
use tracing::level_filters::LevelFilter;

mod cli;
mod commands;
mod summary;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use crate::commands::{ValidationOutcome, run_rules, run_validate};
use crate::summary::print_summary;

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match &cli.command {
        Command::Validate(args) => match run_validate(args) {
            Ok(outcome) => report_outcome(&outcome, args.json),
            Err(error) => {
                eprintln!("error: {error:#}");
                2
            }
        },
        Command::Rules(args) => match run_rules(args) {
            Ok(()) => 0,
            Err(error) => {
                eprintln!("error: {error:#}");
                2
            }
        },
    };
    std::process::exit(exit_code);
}

/// 0 when all error rules passed, 1 when a rule failed, 2 when the run did not complete.
fn report_outcome(outcome: &ValidationOutcome, json: bool) -> i32 {
    let Some(result) = outcome.result.as_ref().filter(|_| outcome.completed) else {
        if outcome.cancelled {
            eprintln!("error: validation was cancelled");
        } else {
            eprintln!("error: validation did not complete, see the log for details");
        }
        return 2;
    };
    if json {
        match serde_json::to_string_pretty(result) {
            Ok(text) => println!("{text}"),
            Err(error) => {
                eprintln!("error: failed to serialize result: {error}");
                return 2;
            }
        }
    } else {
        print_summary(result);
    }
    if result.success() { 0 } else { 1 }
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
