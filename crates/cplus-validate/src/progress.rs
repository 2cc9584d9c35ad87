//! Aggregate progress across the rules of one run.
//!
//! Each of the `N` rules owns an equal `100 / N` share. While a rule runs,
//! overall progress is `100 * k / N + p / N` where `k` rules already completed
//! and `p` is the running rule's own progress. Completion always advances to
//! exactly `100 * (k + 1) / N`, whatever `p` the rule last reported.

use std::sync::{Mutex, PoisonError};

use crate::feedback::{FeedbackEvent, FeedbackListener};
use crate::update::{UpdateSender, ValidationUpdate};

#[derive(Debug, Default)]
struct ProgressState {
    rule_count: usize,
    completed_rules: usize,
    overall: f64,
}

/// Feedback listener turning per-rule progress into overall progress.
#[derive(Debug, Default)]
pub struct ProgressAggregator {
    state: Mutex<ProgressState>,
    updates: UpdateSender,
}

impl ProgressAggregator {
    pub fn new(updates: UpdateSender) -> Self {
        Self {
            state: Mutex::new(ProgressState::default()),
            updates,
        }
    }

    /// Start a new run over `rule_count` rules.
    pub fn reset(&self, rule_count: usize) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        *state = ProgressState {
            rule_count,
            completed_rules: 0,
            overall: 0.0,
        };
    }

    /// Overall progress in the range 0-100.
    pub fn progress(&self) -> f64 {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .overall
    }

    pub fn completed_rules(&self) -> usize {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .completed_rules
    }
}

impl FeedbackListener for ProgressAggregator {
    fn on_feedback(&self, event: FeedbackEvent) {
        let overall = {
            let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
            if state.rule_count == 0 {
                return;
            }
            let rules = state.rule_count as f64;
            match event {
                FeedbackEvent::RuleProgressChanged { progress, .. } => {
                    state.overall = (100.0 * state.completed_rules as f64 + progress) / rules;
                }
                FeedbackEvent::RuleValidationCompleted { .. } => {
                    state.completed_rules = (state.completed_rules + 1).min(state.rule_count);
                    state.overall = 100.0 * state.completed_rules as f64 / rules;
                }
            }
            state.overall
        };

        if let FeedbackEvent::RuleProgressChanged {
            rule_type,
            progress,
        } = event
        {
            self.updates.send(ValidationUpdate::RuleProgress {
                rule_type,
                progress,
            });
        }
        self.updates
            .send(ValidationUpdate::Progress { value: overall });
    }
}
