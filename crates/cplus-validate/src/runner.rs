//! Runner executing an ordered list of rule validators.
//!
//! ```text
//! Idle -> Running -> Completed | Cancelled | Failed
//! ```
//!
//! [`DataValidator::run`] performs the rules and [`DataValidator::finished`]
//! assembles the [`ValidationResult`], the way a host task scheduler calls
//! its task body and then its completion callback.

use std::any::Any;
use std::backtrace::Backtrace;
use std::fmt::Write as _;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;
use std::sync::Arc;

use cplus_model::{ModelComponent, ModelComponentType, RuleConfiguration, RuleType, ValidationResult};
use tracing::{debug, error, info, info_span, warn};

use crate::error::{Result, ValidateError};
use crate::feedback::ValidationFeedback;
use crate::progress::ProgressAggregator;
use crate::registry;
use crate::update::{UpdateSender, ValidationUpdate};
use crate::validator::{MIN_MODEL_COMPONENTS, RuleValidator};

pub const DEFAULT_VALIDATOR_NAME: &str = "Default Data Validator";

/// Checks a set of datasets against registered rule validators.
pub struct DataValidator {
    name: String,
    component_type: ModelComponentType,
    model_components: Vec<Arc<dyn ModelComponent>>,
    rule_validators: Vec<Box<dyn RuleValidator>>,
    cancel_flag: Arc<AtomicBool>,
    feedback: Arc<ValidationFeedback>,
    progress: Arc<ProgressAggregator>,
    updates: UpdateSender,
    result: Option<ValidationResult>,
}

impl DataValidator {
    pub fn new(name: impl Into<String>, component_type: ModelComponentType) -> Self {
        let cancel_flag = Arc::new(AtomicBool::new(false));
        let feedback = Arc::new(ValidationFeedback::with_cancel_flag(cancel_flag.clone()));
        let updates = UpdateSender::default();
        let progress = Arc::new(ProgressAggregator::new(updates.clone()));
        feedback.subscribe(progress.clone());

        Self {
            name: name.into(),
            component_type,
            model_components: Vec::new(),
            rule_validators: Vec::new(),
            cancel_flag,
            feedback,
            progress,
            updates,
            result: None,
        }
    }

    #[must_use]
    pub fn with_model_components(mut self, model_components: Vec<Arc<dyn ModelComponent>>) -> Self {
        self.model_components = model_components;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn component_type(&self) -> ModelComponentType {
        self.component_type
    }

    pub fn model_components(&self) -> &[Arc<dyn ModelComponent>] {
        &self.model_components
    }

    pub fn set_model_components(&mut self, model_components: Vec<Arc<dyn ModelComponent>>) {
        self.model_components = model_components;
    }

    /// Feedback shared with the rule validators of this runner.
    pub fn feedback(&self) -> &Arc<ValidationFeedback> {
        &self.feedback
    }

    /// Add a rule validator. It must report through [`feedback`](Self::feedback)
    /// for its progress to be aggregated.
    pub fn add_rule_validator(&mut self, rule_validator: Box<dyn RuleValidator>) {
        self.rule_validators.push(rule_validator);
    }

    /// Create a registered rule validator wired to this runner's feedback and add it.
    pub fn add_rule(&mut self, rule_type: RuleType, config: RuleConfiguration) -> Result<()> {
        let validator = registry::create_rule_validator(rule_type, config, self.feedback.clone())?;
        self.add_rule_validator(validator);
        Ok(())
    }

    pub fn rule_validators(&self) -> &[Box<dyn RuleValidator>] {
        &self.rule_validators
    }

    pub fn set_update_sender(&self, sender: Sender<ValidationUpdate>) {
        self.updates.set(Some(sender));
    }

    /// Overall progress (0-100) of the current or last run.
    pub fn progress(&self) -> f64 {
        self.progress.progress()
    }

    /// Validation result, only set after a successful [`finished`](Self::finished).
    pub fn result(&self) -> Option<&ValidationResult> {
        self.result.as_ref()
    }

    pub fn cancel_flag(&self) -> Arc<AtomicBool> {
        self.cancel_flag.clone()
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel_flag.load(Ordering::SeqCst)
    }

    /// Request cancellation; takes effect at the next poll point.
    pub fn cancel(&self) {
        info!(validator = %self.name, "Validation process has been cancelled.");
        self.cancel_flag.store(true, Ordering::SeqCst);
    }

    /// Run every rule validator in registration order.
    ///
    /// Returns `false` on precondition failure, cancellation, a rule error or
    /// a rule panic. Errors and panics never escape this call.
    pub fn run(&mut self) -> bool {
        let span = info_span!("data_validator", validator = %self.name);
        let _guard = span.enter();
        self.result = None;

        if self.rule_validators.is_empty() {
            warn!("No rule validators specified.");
            return false;
        }
        if self.model_components.len() < MIN_MODEL_COMPONENTS {
            warn!("At least two datasets are required for the validation process.");
            return false;
        }

        self.progress.reset(self.rule_validators.len());
        info!(
            rules = self.rule_validators.len(),
            datasets = self.model_components.len(),
            "starting validation"
        );

        for validator in &mut self.rule_validators {
            if self.cancel_flag.load(Ordering::SeqCst) {
                info!("Validation cancelled, remaining rules skipped.");
                return false;
            }

            let rule_type = validator.rule_type();
            self.updates.send(ValidationUpdate::RuleStarted { rule_type });
            validator.set_model_components(self.model_components.clone());
            self.feedback.set_current_rule(rule_type);

            match panic::catch_unwind(AssertUnwindSafe(|| validator.run())) {
                Ok(Ok(status)) => debug!(rule = %rule_type, status, "rule validation finished"),
                Ok(Err(err)) => {
                    error!(rule = %rule_type, "{}", error_trace(&err));
                    return false;
                }
                Err(payload) => {
                    error!(
                        rule = %rule_type,
                        "rule validator panicked: {}\n{}",
                        panic_message(payload.as_ref()),
                        Backtrace::force_capture()
                    );
                    return false;
                }
            }

            match validator.result() {
                Some(result) => {
                    self.feedback.rule_validation_completed();
                    self.updates.send(ValidationUpdate::RuleFinished {
                        rule_type,
                        result: result.clone(),
                    });
                }
                None if self.cancel_flag.load(Ordering::SeqCst) => {
                    info!(rule = %rule_type, "Validation cancelled during rule.");
                    return false;
                }
                None => {
                    warn!(rule = %rule_type, "rule validator produced no result");
                    return false;
                }
            }
        }

        if self.cancel_flag.load(Ordering::SeqCst) {
            info!("Validation cancelled.");
            return false;
        }
        true
    }

    /// Completion callback: assemble the result and emit `ValidationCompleted`
    /// on success, otherwise leave the result unset.
    pub fn finished(&mut self, success: bool) {
        self.result = None;
        if !success {
            return;
        }

        let rule_results: Option<Vec<_>> = self
            .rule_validators
            .iter()
            .map(|validator| validator.result().cloned())
            .collect();
        let Some(rule_results) = rule_results else {
            warn!(validator = %self.name, "missing rule results, validation result not set");
            return;
        };

        self.result = Some(ValidationResult::new(rule_results, self.component_type));
        self.updates.send(ValidationUpdate::ValidationCompleted);
    }

    /// Run and complete in one call, returning the outcome.
    pub fn execute(&mut self) -> bool {
        let success = self.run();
        self.finished(success);
        success
    }
}

/// Error with its source chain and the backtrace at the runner boundary.
fn error_trace(err: &ValidateError) -> String {
    let mut trace = err.to_string();
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        let _ = write!(trace, "\ncaused by: {cause}");
        source = cause.source();
    }
    let _ = write!(trace, "\n{}", Backtrace::force_capture());
    trace
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message
    } else {
        "unknown panic payload"
    }
}
