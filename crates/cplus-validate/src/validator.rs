//! Rule validator contract.
//!
//! A rule validator checks one structural property across every model
//! component of a run. Concrete rules embed a [`ValidatorBase`] and only
//! implement [`RuleValidator::validate`].

use std::sync::Arc;

use cplus_model::{ModelComponent, RuleConfiguration, RuleResult, RuleType};
use tracing::{info, warn};

use crate::error::Result;
use crate::feedback::ValidationFeedback;

/// Minimum number of datasets a consistency check needs.
pub const MIN_MODEL_COMPONENTS: usize = 2;

/// State shared by every rule validator.
#[derive(Debug)]
pub struct ValidatorBase {
    config: RuleConfiguration,
    feedback: Arc<ValidationFeedback>,
    model_components: Vec<Arc<dyn ModelComponent>>,
    result: Option<RuleResult>,
}

impl ValidatorBase {
    pub fn new(config: RuleConfiguration, feedback: Arc<ValidationFeedback>) -> Self {
        Self {
            config,
            feedback,
            model_components: Vec::new(),
            result: None,
        }
    }

    pub fn config(&self) -> &RuleConfiguration {
        &self.config
    }

    pub fn feedback(&self) -> &Arc<ValidationFeedback> {
        &self.feedback
    }

    pub fn model_components(&self) -> &[Arc<dyn ModelComponent>] {
        &self.model_components
    }

    pub fn result(&self) -> Option<&RuleResult> {
        self.result.as_ref()
    }

    pub fn set_result(&mut self, result: RuleResult) {
        self.result = Some(result);
    }

    pub fn is_cancelled(&self) -> bool {
        self.feedback.is_cancelled()
    }

    pub fn report_progress(&self, progress: f64) {
        self.feedback.set_rule_progress(progress);
    }

    /// Report progress after `done` of `total` datasets were inspected.
    pub fn report_step(&self, done: usize, total: usize) {
        if total == 0 {
            return;
        }
        self.report_progress(100.0 * done as f64 / total as f64);
    }

    /// Log a message tagged with the rule name; `info == false` logs a warning.
    pub fn log(&self, message: &str, info: bool) {
        if info {
            info!(rule = %self.config.rule_name, "{message}");
        } else {
            warn!(rule = %self.config.rule_name, "{message}");
        }
    }
}

/// A single-purpose check run against the full set of input datasets.
pub trait RuleValidator: Send {
    fn rule_type(&self) -> RuleType;

    fn base(&self) -> &ValidatorBase;

    fn base_mut(&mut self) -> &mut ValidatorBase;

    /// Rule-specific check.
    ///
    /// Implementations report progress from 0 to 100 through the feedback,
    /// poll cancellation before every dataset and return `Ok(false)` without
    /// a result when cancelled. On completion they store a [`RuleResult`] and
    /// return whether the rule passed.
    fn validate(&mut self) -> Result<bool>;

    fn rule_configuration(&self) -> &RuleConfiguration {
        self.base().config()
    }

    fn result(&self) -> Option<&RuleResult> {
        self.base().result()
    }

    fn model_components(&self) -> &[Arc<dyn ModelComponent>] {
        self.base().model_components()
    }

    fn set_model_components(&mut self, model_components: Vec<Arc<dyn ModelComponent>>) {
        self.base_mut().model_components = model_components;
    }

    /// Check preconditions, then validate.
    ///
    /// Fewer than two model components returns `Ok(false)` without a result.
    /// Any result from a previous run is cleared first.
    fn run(&mut self) -> Result<bool> {
        self.base_mut().result = None;
        if self.model_components().len() < MIN_MODEL_COMPONENTS {
            self.base()
                .log("At least two layers are required for the validation process.", false);
            return Ok(false);
        }
        self.validate()
    }
}
