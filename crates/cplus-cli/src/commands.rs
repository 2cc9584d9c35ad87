use std::path::Path;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::time::{Duration, Instant};

use anyhow::{Context, Result, bail};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info, info_span, warn};

use cplus_cli::manifest::{DatasetManifest, RuleConfigFile};
use cplus_model::{RuleConfiguration, ValidationResult};
use cplus_validate::{
    DataValidator, NCS_RULES, ValidationUpdate, default_rule_configuration, spawn_validation,
};

use crate::cli::{RulesArgs, ValidateArgs};
use crate::summary::print_rules;

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Outcome of a validation command.
#[derive(Debug)]
pub struct ValidationOutcome {
    /// Whether the run itself completed (independent of rule outcomes).
    pub completed: bool,
    pub cancelled: bool,
    pub result: Option<ValidationResult>,
}

pub fn run_validate(args: &ValidateArgs) -> Result<ValidationOutcome> {
    let span = info_span!("validate", manifest = %args.manifest.display());
    let _guard = span.enter();

    let manifest = DatasetManifest::load(&args.manifest)?;
    let overrides = load_overrides(args.rules.as_deref())?;
    let components = manifest.into_components();
    info!(datasets = components.len(), "loaded dataset manifest");

    let validator = DataValidator::ncs_with_configurations(components, &overrides)
        .context("build NCS validator")?;
    let progress = progress_bar(args.no_progress || args.json)?;
    let deadline = args
        .timeout
        .map(|seconds| Instant::now() + Duration::from_secs(seconds));

    let (sender, receiver) = mpsc::channel();
    let handle = spawn_validation(validator, sender);
    let mut finished = None;

    loop {
        match receiver.recv_timeout(POLL_INTERVAL) {
            Ok(ValidationUpdate::RuleStarted { rule_type }) => {
                progress.set_message(rule_type.label());
            }
            Ok(ValidationUpdate::RuleProgress { .. }) => {}
            Ok(ValidationUpdate::Progress { value }) => {
                progress.set_position(value.round() as u64);
            }
            Ok(ValidationUpdate::RuleFinished { rule_type, result }) => {
                debug!(rule = %rule_type, success = result.success, "{}", result.summary);
            }
            Ok(ValidationUpdate::ValidationCompleted) => info!("validation completed"),
            Ok(ValidationUpdate::Finished { success, result }) => {
                finished = Some((success, result));
                break;
            }
            Err(RecvTimeoutError::Timeout) => {
                if let Some(deadline) = deadline {
                    if Instant::now() >= deadline && !handle.is_cancelled() {
                        warn!(timeout = ?args.timeout, "validation timed out");
                        handle.cancel();
                    }
                }
            }
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }
    progress.finish_and_clear();

    let cancelled = handle.is_cancelled();
    if handle.join().is_none() {
        bail!("validation thread panicked");
    }
    let (completed, result) = finished.unwrap_or((false, None));
    Ok(ValidationOutcome {
        completed,
        cancelled,
        result,
    })
}

pub fn run_rules(args: &RulesArgs) -> Result<()> {
    let overrides = load_overrides(args.rules.as_deref())?;
    let configs: Vec<RuleConfiguration> = NCS_RULES
        .iter()
        .map(|rule_type| {
            overrides
                .iter()
                .find(|config| config.rule_type == *rule_type)
                .cloned()
                .unwrap_or_else(|| default_rule_configuration(*rule_type))
        })
        .collect();
    print_rules(&configs);
    Ok(())
}

fn load_overrides(path: Option<&Path>) -> Result<Vec<RuleConfiguration>> {
    let Some(path) = path else {
        return Ok(Vec::new());
    };
    let file = RuleConfigFile::load(path)?;
    info!(rules = file.rules.len(), path = %path.display(), "loaded rule configuration");
    Ok(file.rules)
}

fn progress_bar(hidden: bool) -> Result<ProgressBar> {
    if hidden {
        return Ok(ProgressBar::hidden());
    }
    let bar = ProgressBar::new(100);
    let style = ProgressStyle::with_template("{spinner} {msg:30} [{bar:40}] {pos:>3}%")
        .context("progress bar template")?
        .progress_chars("=> ");
    bar.set_style(style);
    Ok(bar)
}
