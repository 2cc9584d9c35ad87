//! Messages sent from the validation thread to the host.

use std::sync::mpsc::Sender;
use std::sync::{Arc, Mutex, PoisonError};

use cplus_model::{RuleResult, RuleType, ValidationResult};

/// Notifications emitted while a validation run progresses.
///
/// Every message of a run is sent from the thread executing it, so
/// `RuleStarted` always precedes the matching `RuleFinished` and all rule
/// messages precede `ValidationCompleted` and `Finished`.
#[derive(Debug, Clone)]
pub enum ValidationUpdate {
    /// A rule validator is about to run.
    RuleStarted { rule_type: RuleType },
    /// Internal progress (0-100) of the running rule.
    RuleProgress { rule_type: RuleType, progress: f64 },
    /// Aggregate progress (0-100) across all rules.
    Progress { value: f64 },
    /// A rule validator produced its result.
    RuleFinished {
        rule_type: RuleType,
        result: RuleResult,
    },
    /// All rules ran and the validation result was assembled.
    ValidationCompleted,
    /// The background task ended.
    Finished {
        success: bool,
        result: Option<ValidationResult>,
    },
}

/// Shared, optional sender for [`ValidationUpdate`] messages.
#[derive(Debug, Clone, Default)]
pub struct UpdateSender {
    sender: Arc<Mutex<Option<Sender<ValidationUpdate>>>>,
}

impl UpdateSender {
    pub fn set(&self, sender: Option<Sender<ValidationUpdate>>) {
        *self.sender.lock().unwrap_or_else(PoisonError::into_inner) = sender;
    }

    /// Send an update; a missing or disconnected receiver is ignored.
    pub fn send(&self, update: ValidationUpdate) {
        let guard = self.sender.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(sender) = guard.as_ref() {
            sender.send(update).ok();
        }
    }
}
