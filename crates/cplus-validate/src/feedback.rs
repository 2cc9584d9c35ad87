//! Shared progress and cancellation channel between a runner and its rules.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use cplus_model::RuleType;
use tracing::debug;

/// Events published by [`ValidationFeedback`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FeedbackEvent {
    RuleProgressChanged { rule_type: RuleType, progress: f64 },
    RuleValidationCompleted { rule_type: RuleType },
}

/// Receiver of feedback events, called synchronously on the emitting thread.
pub trait FeedbackListener: Send + Sync {
    fn on_feedback(&self, event: FeedbackEvent);
}

#[derive(Debug, Default)]
struct FeedbackState {
    current_rule: Option<RuleType>,
    rule_progress: f64,
}

/// Progress and cancellation state shared by a runner and its rule validators.
///
/// Single writer: only the rule validator whose turn it is (as marked by
/// [`set_current_rule`](Self::set_current_rule)) reports progress. Rules run
/// sequentially, so the internal lock is never contended; running rules
/// concurrently would need one feedback per rule.
pub struct ValidationFeedback {
    cancel_flag: Arc<AtomicBool>,
    state: Mutex<FeedbackState>,
    listeners: Mutex<Vec<Arc<dyn FeedbackListener>>>,
}

impl ValidationFeedback {
    pub fn new() -> Self {
        Self::with_cancel_flag(Arc::new(AtomicBool::new(false)))
    }

    /// Create feedback sharing an existing task-level cancellation flag.
    pub fn with_cancel_flag(cancel_flag: Arc<AtomicBool>) -> Self {
        Self {
            cancel_flag,
            state: Mutex::new(FeedbackState::default()),
            listeners: Mutex::new(Vec::new()),
        }
    }

    pub fn subscribe(&self, listener: Arc<dyn FeedbackListener>) {
        self.listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(listener);
    }

    /// Request cancellation.
    pub fn cancel(&self) {
        self.cancel_flag.store(true, Ordering::SeqCst);
    }

    /// Check if cancellation was requested.
    pub fn is_cancelled(&self) -> bool {
        self.cancel_flag.load(Ordering::SeqCst)
    }

    pub fn cancel_flag(&self) -> Arc<AtomicBool> {
        self.cancel_flag.clone()
    }

    pub fn current_rule(&self) -> Option<RuleType> {
        self.state().current_rule
    }

    pub fn rule_progress(&self) -> f64 {
        self.state().rule_progress
    }

    /// Mark whose turn it is. Resets the rule progress without notifying.
    pub fn set_current_rule(&self, rule_type: RuleType) {
        let mut state = self.state();
        state.current_rule = Some(rule_type);
        state.rule_progress = 0.0;
    }

    /// Report progress (clamped to 0-100) of the current rule.
    pub fn set_rule_progress(&self, progress: f64) {
        let progress = progress.clamp(0.0, 100.0);
        let rule_type = {
            let mut state = self.state();
            let Some(rule_type) = state.current_rule else {
                debug!(progress, "progress reported without a current rule");
                return;
            };
            if state.rule_progress == progress && progress != 0.0 {
                return;
            }
            state.rule_progress = progress;
            rule_type
        };
        self.emit(FeedbackEvent::RuleProgressChanged {
            rule_type,
            progress,
        });
    }

    /// Announce that the current rule produced its result.
    pub fn rule_validation_completed(&self) {
        let Some(rule_type) = self.current_rule() else {
            return;
        };
        self.emit(FeedbackEvent::RuleValidationCompleted { rule_type });
    }

    fn state(&self) -> std::sync::MutexGuard<'_, FeedbackState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn emit(&self, event: FeedbackEvent) {
        let listeners = self
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        for listener in listeners {
            listener.on_feedback(event);
        }
    }
}

impl Default for ValidationFeedback {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ValidationFeedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state();
        f.debug_struct("ValidationFeedback")
            .field("cancelled", &self.is_cancelled())
            .field("current_rule", &state.current_rule)
            .field("rule_progress", &state.rule_progress)
            .finish_non_exhaustive()
    }
}
