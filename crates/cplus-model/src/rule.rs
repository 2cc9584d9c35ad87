//! Rule identifiers and static rule metadata.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Sentinel no-data value expected across NCS datasets.
pub const DEFAULT_NO_DATA_VALUE: f64 = -9999.0;

/// Structural property checked by a rule validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleType {
    DataType,
    Crs,
    NoDataValue,
}

impl RuleType {
    pub const fn all() -> &'static [Self] {
        &[Self::DataType, Self::Crs, Self::NoDataValue]
    }

    pub const fn label(&self) -> &'static str {
        match self {
            Self::DataType => "Data type",
            Self::Crs => "Coordinate reference system",
            Self::NoDataValue => "No data value",
        }
    }
}

impl fmt::Display for RuleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// How a failed rule should be reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationCategory {
    #[default]
    Error,
    Warning,
}

impl ValidationCategory {
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Error => "Error",
            Self::Warning => "Warning",
        }
    }
}

/// Static metadata for one rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleConfiguration {
    pub rule_type: RuleType,
    pub rule_name: String,
    #[serde(default)]
    pub description: String,
    pub recommendation: String,
    #[serde(default)]
    pub category: ValidationCategory,
    /// Expected no-data sentinel, only read by the no-data rule.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub no_data_value: Option<f64>,
}

impl RuleConfiguration {
    pub fn new(
        rule_type: RuleType,
        rule_name: impl Into<String>,
        recommendation: impl Into<String>,
    ) -> Self {
        Self {
            rule_type,
            rule_name: rule_name.into(),
            description: String::new(),
            recommendation: recommendation.into(),
            category: ValidationCategory::default(),
            no_data_value: None,
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn with_category(mut self, category: ValidationCategory) -> Self {
        self.category = category;
        self
    }

    #[must_use]
    pub fn with_no_data_value(mut self, value: f64) -> Self {
        self.no_data_value = Some(value);
        self
    }

    pub fn expected_no_data_value(&self) -> f64 {
        self.no_data_value.unwrap_or(DEFAULT_NO_DATA_VALUE)
    }
}
