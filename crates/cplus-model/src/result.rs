//! Rule and validation results.

use serde::{Deserialize, Serialize};

use crate::component::ModelComponentType;
use crate::rule::{RuleConfiguration, RuleType, ValidationCategory};

/// Outcome of a single rule run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleResult {
    pub configuration: RuleConfiguration,
    pub recommendation: String,
    pub summary: String,
    /// Ordered `(label, value)` rows, e.g. a bucket key and the dataset names in it.
    pub details: Vec<(String, String)>,
    pub success: bool,
}

impl RuleResult {
    pub fn new(
        configuration: &RuleConfiguration,
        success: bool,
        summary: impl Into<String>,
        details: Vec<(String, String)>,
    ) -> Self {
        Self {
            configuration: configuration.clone(),
            recommendation: configuration.recommendation.clone(),
            summary: summary.into(),
            details,
            success,
        }
    }

    pub fn rule_type(&self) -> RuleType {
        self.configuration.rule_type
    }

    pub fn rule_name(&self) -> &str {
        &self.configuration.rule_name
    }

    pub fn category(&self) -> ValidationCategory {
        self.configuration.category
    }
}

/// Aggregate of every rule result of one validation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub rule_results: Vec<RuleResult>,
    pub component_type: ModelComponentType,
}

impl ValidationResult {
    pub fn new(rule_results: Vec<RuleResult>, component_type: ModelComponentType) -> Self {
        Self {
            rule_results,
            component_type,
        }
    }

    /// True when no rule with error category failed.
    pub fn success(&self) -> bool {
        self.errors().next().is_none()
    }

    pub fn errors(&self) -> impl Iterator<Item = &RuleResult> {
        self.failed(ValidationCategory::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &RuleResult> {
        self.failed(ValidationCategory::Warning)
    }

    pub fn get(&self, rule_type: RuleType) -> Option<&RuleResult> {
        self.rule_results
            .iter()
            .find(|result| result.rule_type() == rule_type)
    }

    fn failed(&self, category: ValidationCategory) -> impl Iterator<Item = &RuleResult> {
        self.rule_results
            .iter()
            .filter(move |result| !result.success && result.category() == category)
    }
}
